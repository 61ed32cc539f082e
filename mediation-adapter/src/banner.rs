//! Banner controller
//!
//! Banners display themselves once attached, so a successful load is
//! reported as `Loaded` immediately followed by `Displayed`.

use std::sync::Arc;

use display_sdk::{BannerAd, DisplaySdk, SdkEvent};
use mediation_types::{
    ActivityContext, AdFormat, AdLifecycleState, ErrorKind, NormalizedEvent, PlacementDescriptor,
};
use parking_lot::Mutex;
use ui_dispatch::UiContext;

use crate::lifecycle::{event_sink, Generation, HandleEvents, Lifecycle};
use crate::listener::{deliver_ad_view, AdViewAdapterListener};
use crate::translator;

pub struct BannerController {
    sdk: Arc<dyn DisplaySdk>,
    ui: UiContext,
    lifecycle: Mutex<Lifecycle<Box<dyn BannerAd>, dyn AdViewAdapterListener>>,
}

impl BannerController {
    pub fn new(sdk: Arc<dyn DisplaySdk>, ui: UiContext) -> Arc<Self> {
        Arc::new(Self {
            sdk,
            ui,
            lifecycle: Mutex::new(Lifecycle::new(AdFormat::Banner)),
        })
    }

    pub fn state(&self) -> AdLifecycleState {
        self.lifecycle.lock().state()
    }

    /// Replace any current banner with a new one and request an ad
    ///
    /// Runs on the UI context.
    pub fn load(
        self: &Arc<Self>,
        placement: &PlacementDescriptor,
        activity: ActivityContext,
        listener: Arc<dyn AdViewAdapterListener>,
    ) {
        let failure = {
            let mut lifecycle = self.lifecycle.lock();
            let generation = lifecycle.begin_load(listener);
            let sink = event_sink(&self.ui, Arc::downgrade(self), generation);
            let created = self.sdk.create_banner(activity, sink);
            lifecycle.start(created, |banner| banner.load(placement))
        };

        if let Some((listener, error)) = failure {
            listener.on_ad_view_ad_load_failed(error);
        }
    }

    /// Report a load that failed before reaching the SDK
    ///
    /// Any previous banner is released first, so a failed load never leaves
    /// an older ad live.
    pub fn reject_load(&self, listener: Arc<dyn AdViewAdapterListener>, error: ErrorKind) {
        self.lifecycle.lock().release();
        listener.on_ad_view_ad_load_failed(error);
    }

    /// Release the banner; safe to call in any state
    pub fn destroy(&self) {
        self.lifecycle.lock().release();
    }
}

impl HandleEvents for BannerController {
    fn handle_event(self: Arc<Self>, generation: Generation, event: SdkEvent) {
        let Some(event) = translator::translate(&event) else {
            return;
        };

        let delivery = {
            let mut lifecycle = self.lifecycle.lock();
            let view = lifecycle.handle().map(|banner| banner.view());
            lifecycle
                .apply(generation, &event)
                .map(|listener| (listener, view))
        };

        let Some((listener, view)) = delivery else {
            return;
        };
        let loaded = event == NormalizedEvent::Loaded;
        deliver_ad_view(listener.as_ref(), event, view);
        if loaded {
            listener.on_ad_view_ad_displayed();
        }
    }
}
