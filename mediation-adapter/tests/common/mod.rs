//! Shared fixtures for adapter scenario tests
#![allow(dead_code)]

use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::Duration;

use display_sdk::testing::{FakeSdk, HandleId};
use display_sdk::SdkEvent;
use mediation_adapter::{
    AdViewAdapterListener, AdapterConfig, EquativMediationAdapter, InterstitialAdapterListener,
    MediatedNativeAd, MediationContext, NativeAdAdapterListener, ResponseParameters,
    RewardedAdapterListener,
};
use mediation_types::{ActivityContext, AdFormat, ErrorKind, NormalizedEvent, Reward, ViewId};
use parking_lot::Mutex;
use ui_dispatch::{DispatchConfig, UiContext, UiPump};

pub const ACTIVITY: ActivityContext = ActivityContext(7);
pub const WAIT: Duration = Duration::from_secs(5);

pub fn params(placement: &str) -> ResponseParameters {
    ResponseParameters::new(placement).with_ad_unit_id("test-ad-unit")
}

/// Records every callback as its normalized equivalent
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<NormalizedEvent>>,
    views: Mutex<Vec<ViewId>>,
    native_ads: Mutex<Vec<MediatedNativeAd>>,
    threads: Mutex<Vec<ThreadId>>,
}

impl RecordingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn record(&self, event: NormalizedEvent) {
        self.threads.lock().push(thread::current().id());
        self.events.lock().push(event);
    }

    pub fn events(&self) -> Vec<NormalizedEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self, event: &NormalizedEvent) -> usize {
        self.events.lock().iter().filter(|e| *e == event).count()
    }

    pub fn views(&self) -> Vec<ViewId> {
        self.views.lock().clone()
    }

    pub fn native_ad(&self) -> Option<MediatedNativeAd> {
        self.native_ads.lock().last().cloned()
    }

    pub fn threads(&self) -> Vec<ThreadId> {
        self.threads.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

fn load_failed(error: ErrorKind) -> NormalizedEvent {
    NormalizedEvent::LoadFailed { error }
}

fn display_failed(error: ErrorKind) -> NormalizedEvent {
    NormalizedEvent::DisplayFailed { error }
}

impl AdViewAdapterListener for RecordingListener {
    fn on_ad_view_ad_loaded(&self, view: ViewId) {
        self.views.lock().push(view);
        self.record(NormalizedEvent::Loaded);
    }
    fn on_ad_view_ad_load_failed(&self, error: ErrorKind) {
        self.record(load_failed(error));
    }
    fn on_ad_view_ad_displayed(&self) {
        self.record(NormalizedEvent::Displayed);
    }
    fn on_ad_view_ad_display_failed(&self, error: ErrorKind) {
        self.record(display_failed(error));
    }
    fn on_ad_view_ad_clicked(&self) {
        self.record(NormalizedEvent::Clicked);
    }
    fn on_ad_view_ad_hidden(&self) {
        self.record(NormalizedEvent::Hidden);
    }
    fn on_ad_view_ad_expanded(&self) {
        self.record(NormalizedEvent::Expanded);
    }
    fn on_ad_view_ad_collapsed(&self) {
        self.record(NormalizedEvent::Collapsed);
    }
}

impl InterstitialAdapterListener for RecordingListener {
    fn on_interstitial_ad_loaded(&self) {
        self.record(NormalizedEvent::Loaded);
    }
    fn on_interstitial_ad_load_failed(&self, error: ErrorKind) {
        self.record(load_failed(error));
    }
    fn on_interstitial_ad_displayed(&self) {
        self.record(NormalizedEvent::Displayed);
    }
    fn on_interstitial_ad_display_failed(&self, error: ErrorKind) {
        self.record(display_failed(error));
    }
    fn on_interstitial_ad_clicked(&self) {
        self.record(NormalizedEvent::Clicked);
    }
    fn on_interstitial_ad_hidden(&self) {
        self.record(NormalizedEvent::Hidden);
    }
}

impl RewardedAdapterListener for RecordingListener {
    fn on_rewarded_ad_loaded(&self) {
        self.record(NormalizedEvent::Loaded);
    }
    fn on_rewarded_ad_load_failed(&self, error: ErrorKind) {
        self.record(load_failed(error));
    }
    fn on_rewarded_ad_displayed(&self) {
        self.record(NormalizedEvent::Displayed);
    }
    fn on_rewarded_ad_display_failed(&self, error: ErrorKind) {
        self.record(display_failed(error));
    }
    fn on_rewarded_ad_clicked(&self) {
        self.record(NormalizedEvent::Clicked);
    }
    fn on_rewarded_ad_hidden(&self) {
        self.record(NormalizedEvent::Hidden);
    }
    fn on_rewarded_ad_video_started(&self) {
        self.record(NormalizedEvent::VideoStarted);
    }
    fn on_rewarded_ad_video_completed(&self) {
        self.record(NormalizedEvent::VideoCompleted);
    }
    fn on_user_rewarded(&self, reward: Reward) {
        self.record(NormalizedEvent::UserRewarded { reward });
    }
}

impl NativeAdAdapterListener for RecordingListener {
    fn on_native_ad_loaded(&self, ad: MediatedNativeAd) {
        self.native_ads.lock().push(ad);
        self.record(NormalizedEvent::Loaded);
    }
    fn on_native_ad_load_failed(&self, error: ErrorKind) {
        self.record(load_failed(error));
    }
    fn on_native_ad_displayed(&self) {
        self.record(NormalizedEvent::Displayed);
    }
    fn on_native_ad_clicked(&self) {
        self.record(NormalizedEvent::Clicked);
    }
}

/// Adapter over a [`FakeSdk`] with a UI context pumped by the test thread
pub struct Harness {
    pub sdk: FakeSdk,
    pub context: MediationContext,
    pub adapter: EquativMediationAdapter,
    pub pump: UiPump,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_sdk(FakeSdk::new())
    }

    pub fn with_sdk(sdk: FakeSdk) -> Self {
        let (ui, pump) = UiContext::manual(DispatchConfig::default()).unwrap();
        let context = MediationContext::with_ui(Arc::new(sdk.clone()), ui, AdapterConfig::default());
        let adapter = EquativMediationAdapter::new(&context);
        Self {
            sdk,
            context,
            adapter,
            pump,
        }
    }

    /// Run everything queued on the UI context
    pub fn settle(&mut self) {
        self.pump.run_pending();
    }

    pub fn latest(&self, format: AdFormat) -> HandleId {
        self.sdk.latest(format).expect("no handle created")
    }

    /// Fire `event` from the newest handle of `format` and deliver it
    pub fn emit(&mut self, format: AdFormat, event: SdkEvent) {
        let id = self.latest(format);
        self.emit_from(id, event);
    }

    pub fn emit_from(&mut self, id: HandleId, event: SdkEvent) {
        self.sdk.emit(id, event);
        self.settle();
    }

    /// Load an interstitial and bring it to `Ready`
    pub fn ready_interstitial(&mut self, listener: &Arc<RecordingListener>) {
        self.adapter
            .load_interstitial_ad(&params("1/2/3"), ACTIVITY, listener.clone());
        self.emit(AdFormat::Interstitial, SdkEvent::Loaded);
    }

    pub fn ready_rewarded(&mut self, listener: &Arc<RecordingListener>) {
        self.adapter
            .load_rewarded_ad(&params("1/2/3"), ACTIVITY, listener.clone());
        self.emit(AdFormat::Rewarded, SdkEvent::Loaded);
    }
}
