//! Binding for the 7.x display SDK line (formerly Smart Display SDK)
//!
//! The 7.x objects report failures as exception classes, expose readiness as
//! booleans (`is_showable`, `has_rewarded_video`) and tear down with
//! `reset()`. `configure` needs the site id of the placement being loaded.
//!
//! The host binds the real SDK by implementing [`Library`] and the object
//! traits; [`DisplaySdk7`] adapts them to the capability traits.

use mediation_types::{ActivityContext, PlacementDescriptor, ViewId};
use tracing::{debug, trace};

use crate::capability::{
    AdStatus, BannerAd, DisplaySdk, EventSink, FullscreenAd, NativeAd, SdkConfiguration,
};
use crate::error::{Result, SdkError};
use crate::event::{ImageAsset, NativeAssets, SdkEvent, VideoEvent};

/// Video event ids passed to the 7.x `*VideoEvent` callbacks
pub mod video_events {
    pub const VIDEO_START: i32 = 0;
    pub const VIDEO_PAUSE: i32 = 1;
    pub const VIDEO_RESUME: i32 = 2;
    pub const VIDEO_REWIND: i32 = 3;
    pub const VIDEO_FIRST_QUARTILE: i32 = 4;
    pub const VIDEO_MIDPOINT: i32 = 5;
    pub const VIDEO_THIRD_QUARTILE: i32 = 6;
    pub const VIDEO_COMPLETE: i32 = 7;
    pub const VIDEO_SKIP: i32 = 8;
}

/// Exceptions handed to 7.x failure callbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exception {
    NoAdToDeliver(String),
    AdTimeout(String),
    Other { class: String, message: String },
}

impl From<Exception> for SdkError {
    fn from(exception: Exception) -> Self {
        match exception {
            Exception::NoAdToDeliver(message) => SdkError::NoAd(message),
            Exception::AdTimeout(message) => SdkError::Timeout(message),
            Exception::Other { class, message } => SdkError::Other(format!("{class}: {message}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageElement {
    pub url: String,
    pub width: i32,
    pub height: i32,
}

/// Native ad payload delivered by `on_native_ad_loaded`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeAdElement {
    pub title: Option<String>,
    pub body: Option<String>,
    pub call_to_action: Option<String>,
    pub rating: f32,
    pub icon: Option<ImageElement>,
    pub cover_image: Option<ImageElement>,
    pub has_media_element: bool,
}

impl From<NativeAdElement> for NativeAssets {
    fn from(element: NativeAdElement) -> Self {
        NativeAssets {
            title: element.title,
            body: element.body,
            call_to_action: element.call_to_action,
            rating: Some(f64::from(element.rating)),
            icon: element.icon.map(|icon| ImageAsset {
                url: icon.url,
                width: icon.width.max(0) as u32,
                height: icon.height.max(0) as u32,
            }),
            // Cover images are never scaled
            cover: element.cover_image.map(|cover| ImageAsset {
                url: cover.url,
                width: 0,
                height: 0,
            }),
            has_media_view: element.has_media_element,
        }
    }
}

/// Every listener callback of the 7.x ad objects
#[derive(Debug, Clone, PartialEq)]
pub enum Callback {
    BannerAdLoaded,
    BannerAdFailedToLoad(Exception),
    BannerAdClicked,
    BannerAdExpanded,
    BannerAdCollapsed,
    BannerAdResized,
    BannerAdClosed,
    BannerAdVideoEvent(i32),

    InterstitialAdLoaded,
    InterstitialAdFailedToLoad(Exception),
    InterstitialAdShown,
    InterstitialAdFailedToShow(Exception),
    InterstitialAdClicked,
    InterstitialAdDismissed,
    InterstitialAdVideoEvent(i32),

    RewardedVideoAdLoaded,
    RewardedVideoAdFailedToLoad(Exception),
    RewardedVideoAdShown,
    RewardedVideoAdFailedToShow(Exception),
    RewardedVideoAdClosed,
    RewardReceived { currency: String, amount: f64 },
    RewardedVideoAdClicked,
    RewardedVideoEvent(i32),
    RewardedVideoEndCardDisplayed,

    NativeAdLoaded(NativeAdElement),
    NativeAdFailedToLoad(Exception),
    NativeAdClicked,
}

impl Callback {
    pub fn into_sdk_event(self) -> SdkEvent {
        match self {
            Callback::BannerAdLoaded
            | Callback::InterstitialAdLoaded
            | Callback::RewardedVideoAdLoaded => SdkEvent::Loaded,
            Callback::NativeAdLoaded(element) => SdkEvent::NativeLoaded(element.into()),
            Callback::BannerAdFailedToLoad(e)
            | Callback::InterstitialAdFailedToLoad(e)
            | Callback::RewardedVideoAdFailedToLoad(e)
            | Callback::NativeAdFailedToLoad(e) => SdkEvent::LoadFailed(e.into()),
            Callback::InterstitialAdShown | Callback::RewardedVideoAdShown => SdkEvent::Shown,
            Callback::InterstitialAdFailedToShow(e) | Callback::RewardedVideoAdFailedToShow(e) => {
                SdkEvent::ShowFailed(e.into())
            }
            Callback::BannerAdClicked
            | Callback::InterstitialAdClicked
            | Callback::RewardedVideoAdClicked
            | Callback::NativeAdClicked => SdkEvent::Clicked,
            Callback::BannerAdExpanded => SdkEvent::Expanded,
            Callback::BannerAdCollapsed => SdkEvent::Collapsed,
            Callback::BannerAdResized => SdkEvent::Resized,
            Callback::BannerAdClosed
            | Callback::InterstitialAdDismissed
            | Callback::RewardedVideoAdClosed => SdkEvent::Closed,
            Callback::BannerAdVideoEvent(id)
            | Callback::InterstitialAdVideoEvent(id)
            | Callback::RewardedVideoEvent(id) => SdkEvent::Video(video_event(id)),
            Callback::RewardReceived { currency, amount } => {
                SdkEvent::RewardReceived { currency, amount }
            }
            Callback::RewardedVideoEndCardDisplayed => SdkEvent::EndCardDisplayed,
        }
    }
}

fn video_event(id: i32) -> VideoEvent {
    match id {
        video_events::VIDEO_START => VideoEvent::Started,
        video_events::VIDEO_COMPLETE => VideoEvent::Completed,
        other => VideoEvent::Other(other),
    }
}

/// Listener installed on a 7.x ad object
pub type Listener = Box<dyn Fn(Callback) + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
pub trait BannerView: Send {
    fn set_banner_listener(&mut self, listener: Listener);
    fn load_ad(&mut self, placement: &PlacementDescriptor);
    fn view_id(&self) -> ViewId;
    fn reset(&mut self) -> std::result::Result<(), Exception>;
}

#[cfg_attr(test, mockall::automock)]
pub trait InterstitialManager: Send {
    fn set_interstitial_listener(&mut self, listener: Listener);
    fn load_ad(&mut self);
    fn is_showable(&self) -> bool;
    fn show(&mut self);
    fn reset(&mut self) -> std::result::Result<(), Exception>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RewardedVideoManager: Send {
    fn set_rewarded_video_listener(&mut self, listener: Listener);
    fn load_rewarded_video(&mut self);
    fn has_rewarded_video(&self) -> bool;
    fn show_rewarded_video(&mut self);
    fn reset(&mut self) -> std::result::Result<(), Exception>;
}

#[cfg_attr(test, mockall::automock)]
pub trait NativeAdManager: Send {
    fn set_native_ad_listener(&mut self, listener: Listener);
    fn load_native_ad(&mut self);
    fn register_view(&mut self, container: ViewId, clickable: &[ViewId]);
    fn unregister_view(&mut self, container: ViewId);
    fn on_destroy(&mut self) -> std::result::Result<(), Exception>;
}

/// Entry points of the 7.x library
#[cfg_attr(test, mockall::automock)]
pub trait Library: Send + Sync {
    fn configure(&self, activity: ActivityContext, site_id: i32) -> std::result::Result<(), Exception>;
    fn set_secondary_implementation_info(&self, name: &str, version: &str, adapter_version: &str);
    fn version(&self) -> String;
    fn new_banner_view(&self, activity: ActivityContext) -> Box<dyn BannerView>;
    fn new_interstitial_manager(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
    ) -> Box<dyn InterstitialManager>;
    fn new_rewarded_video_manager(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
    ) -> Box<dyn RewardedVideoManager>;
    fn new_native_ad_manager(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
    ) -> Box<dyn NativeAdManager>;
}

fn forward_to(sink: EventSink) -> Listener {
    Box::new(move |callback| {
        trace!(?callback, "7.x listener callback");
        sink(callback.into_sdk_event())
    })
}

/// Capability adapter over a bound 7.x [`Library`]
pub struct DisplaySdk7<L> {
    library: L,
}

impl<L: Library> DisplaySdk7<L> {
    pub fn new(library: L) -> Self {
        Self { library }
    }
}

impl<L: Library> SdkConfiguration for DisplaySdk7<L> {
    fn configure(&self, activity: ActivityContext, site_id: i32) -> Result<()> {
        debug!(%activity, site_id, "configuring 7.x library");
        self.library.configure(activity, site_id).map_err(SdkError::from)
    }

    fn set_secondary_implementation_info(
        &self,
        mediation_name: &str,
        mediation_version: &str,
        adapter_version: &str,
    ) {
        self.library
            .set_secondary_implementation_info(mediation_name, mediation_version, adapter_version);
    }

    fn library_version(&self) -> String {
        self.library.version()
    }
}

impl<L: Library> DisplaySdk for DisplaySdk7<L> {
    fn configuration(&self) -> &dyn SdkConfiguration {
        self
    }

    fn create_banner(&self, activity: ActivityContext, sink: EventSink) -> Result<Box<dyn BannerAd>> {
        let mut view = self.library.new_banner_view(activity);
        view.set_banner_listener(forward_to(sink));
        Ok(Box::new(Banner { view }))
    }

    fn create_interstitial(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
        sink: EventSink,
    ) -> Result<Box<dyn FullscreenAd>> {
        let mut manager = self.library.new_interstitial_manager(activity, placement);
        manager.set_interstitial_listener(forward_to(sink));
        Ok(Box::new(Interstitial { manager }))
    }

    fn create_rewarded(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
        sink: EventSink,
    ) -> Result<Box<dyn FullscreenAd>> {
        let mut manager = self.library.new_rewarded_video_manager(activity, placement);
        manager.set_rewarded_video_listener(forward_to(sink));
        Ok(Box::new(Rewarded { manager }))
    }

    fn create_native(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
        sink: EventSink,
    ) -> Result<Box<dyn NativeAd>> {
        let mut manager = self.library.new_native_ad_manager(activity, placement);
        manager.set_native_ad_listener(forward_to(sink));
        Ok(Box::new(Native { manager }))
    }
}

struct Banner {
    view: Box<dyn BannerView>,
}

impl BannerAd for Banner {
    fn load(&mut self, placement: &PlacementDescriptor) -> Result<()> {
        self.view.load_ad(placement);
        Ok(())
    }

    fn view(&self) -> ViewId {
        self.view.view_id()
    }

    fn reset(&mut self) -> Result<()> {
        self.view.reset().map_err(SdkError::from)
    }
}

struct Interstitial {
    manager: Box<dyn InterstitialManager>,
}

impl FullscreenAd for Interstitial {
    fn load(&mut self) -> Result<()> {
        self.manager.load_ad();
        Ok(())
    }

    fn status(&self) -> AdStatus {
        if self.manager.is_showable() {
            AdStatus::Ready
        } else {
            AdStatus::NotAvailable
        }
    }

    fn show(&mut self) -> Result<()> {
        self.manager.show();
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.manager.reset().map_err(SdkError::from)
    }
}

struct Rewarded {
    manager: Box<dyn RewardedVideoManager>,
}

impl FullscreenAd for Rewarded {
    fn load(&mut self) -> Result<()> {
        self.manager.load_rewarded_video();
        Ok(())
    }

    fn status(&self) -> AdStatus {
        if self.manager.has_rewarded_video() {
            AdStatus::Ready
        } else {
            AdStatus::NotAvailable
        }
    }

    fn show(&mut self) -> Result<()> {
        self.manager.show_rewarded_video();
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.manager.reset().map_err(SdkError::from)
    }
}

struct Native {
    manager: Box<dyn NativeAdManager>,
}

impl NativeAd for Native {
    fn load(&mut self) -> Result<()> {
        self.manager.load_native_ad();
        Ok(())
    }

    fn register_views(&mut self, container: ViewId, clickable: &[ViewId]) -> Result<()> {
        self.manager.register_view(container, clickable);
        Ok(())
    }

    fn unregister_views(&mut self, container: ViewId) -> Result<()> {
        self.manager.unregister_view(container);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.manager.on_destroy().map_err(SdkError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recording_sink() -> (EventSink, Arc<Mutex<Vec<SdkEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&events);
        let sink: EventSink = Arc::new(move |event| captured.lock().push(event));
        (sink, events)
    }

    #[test]
    fn test_exception_mapping() {
        assert_eq!(
            SdkError::from(Exception::NoAdToDeliver("empty".into())),
            SdkError::NoAd("empty".into())
        );
        assert_eq!(
            SdkError::from(Exception::AdTimeout("slow".into())),
            SdkError::Timeout("slow".into())
        );
        assert!(matches!(
            SdkError::from(Exception::Other {
                class: "IllegalStateException".into(),
                message: "boom".into()
            }),
            SdkError::Other(msg) if msg.contains("boom")
        ));
    }

    #[test]
    fn test_video_event_ids() {
        assert_eq!(
            Callback::RewardedVideoEvent(video_events::VIDEO_START).into_sdk_event(),
            SdkEvent::Video(VideoEvent::Started)
        );
        assert_eq!(
            Callback::RewardedVideoEvent(video_events::VIDEO_COMPLETE).into_sdk_event(),
            SdkEvent::Video(VideoEvent::Completed)
        );
        assert_eq!(
            Callback::RewardedVideoEvent(video_events::VIDEO_MIDPOINT).into_sdk_event(),
            SdkEvent::Video(VideoEvent::Other(video_events::VIDEO_MIDPOINT))
        );
    }

    #[test]
    fn test_native_element_conversion() {
        let element = NativeAdElement {
            title: Some("Title".into()),
            rating: 4.5,
            icon: Some(ImageElement {
                url: "https://cdn/icon.png".into(),
                width: 64,
                height: 64,
            }),
            cover_image: Some(ImageElement {
                url: "https://cdn/cover.png".into(),
                width: 600,
                height: 300,
            }),
            ..Default::default()
        };
        let assets = NativeAssets::from(element);
        assert_eq!(assets.rating, Some(4.5));
        let icon = assets.icon.unwrap();
        assert_eq!((icon.width, icon.height), (64, 64));
        let cover = assets.cover.unwrap();
        assert_eq!(cover.url, "https://cdn/cover.png");
        assert_eq!((cover.width, cover.height), (0, 0));
    }

    #[test]
    fn test_banner_listener_forwards_to_sink() {
        let installed: Arc<Mutex<Option<Listener>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&installed);

        let mut view = MockBannerView::new();
        view.expect_set_banner_listener()
            .times(1)
            .returning(move |listener| *slot.lock() = Some(listener));
        view.expect_load_ad().times(1).return_const(());
        view.expect_view_id().return_const(ViewId(42));

        let mut library = MockLibrary::new();
        library
            .expect_new_banner_view()
            .return_once(move |_| Box::new(view));

        let sdk = DisplaySdk7::new(library);
        let (sink, events) = recording_sink();
        let mut banner = sdk.create_banner(ActivityContext(1), sink).unwrap();
        banner.load(&"1/2/3".parse().unwrap()).unwrap();
        assert_eq!(banner.view(), ViewId(42));

        let guard = installed.lock();
        let listener = guard.as_ref().unwrap();
        listener(Callback::BannerAdLoaded);
        listener(Callback::BannerAdFailedToLoad(Exception::AdTimeout("t".into())));
        listener(Callback::BannerAdClosed);

        assert_eq!(
            *events.lock(),
            vec![
                SdkEvent::Loaded,
                SdkEvent::LoadFailed(SdkError::Timeout("t".into())),
                SdkEvent::Closed,
            ]
        );
    }

    #[test]
    fn test_rewarded_status_follows_has_rewarded_video() {
        let mut manager = MockRewardedVideoManager::new();
        manager.expect_set_rewarded_video_listener().return_const(());
        let mut ready = mockall::Sequence::new();
        manager
            .expect_has_rewarded_video()
            .times(1)
            .in_sequence(&mut ready)
            .return_const(false);
        manager
            .expect_has_rewarded_video()
            .times(1)
            .in_sequence(&mut ready)
            .return_const(true);
        manager
            .expect_reset()
            .times(1)
            .returning(|| Err(Exception::Other {
                class: "RuntimeException".into(),
                message: "already released".into(),
            }));

        let mut library = MockLibrary::new();
        library
            .expect_new_rewarded_video_manager()
            .return_once(move |_, _| Box::new(manager));

        let sdk = DisplaySdk7::new(library);
        let (sink, _) = recording_sink();
        let mut rewarded = sdk
            .create_rewarded(ActivityContext(1), &"1/2/3".parse().unwrap(), sink)
            .unwrap();

        assert_eq!(rewarded.status(), AdStatus::NotAvailable);
        assert_eq!(rewarded.status(), AdStatus::Ready);
        assert!(rewarded.reset().is_err());
    }

    #[test]
    fn test_configure_passes_site_id() {
        let mut library = MockLibrary::new();
        library
            .expect_configure()
            .withf(|activity, site_id| *activity == ActivityContext(7) && *site_id == 1234)
            .times(1)
            .returning(|_, _| Ok(()));
        library.expect_version().return_const("7.25.0".to_string());

        let sdk = DisplaySdk7::new(library);
        sdk.configuration().configure(ActivityContext(7), 1234).unwrap();
        assert_eq!(sdk.configuration().library_version(), "7.25.0");
    }
}
