//! Native controller
//!
//! A loaded native ad is not reported until its images are prepared. The
//! [`AssetPreparer`] runs on the background pool; the result re-enters the UI
//! context and is only delivered if the handle that produced it is still
//! live.

use std::fmt;
use std::sync::{Arc, Weak};

use display_sdk::{DisplaySdk, ImageAsset, NativeAd, NativeAssets, SdkEvent};
use mediation_types::{
    ActivityContext, AdFormat, AdLifecycleState, ErrorKind, NormalizedEvent, PlacementDescriptor,
    ViewId,
};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};
use ui_dispatch::UiContext;

use crate::lifecycle::{event_sink, Generation, HandleEvents, Lifecycle, Teardown};
use crate::listener::{Deliver, NativeAdAdapterListener};
use crate::translator;

/// Image ready for the host to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImage {
    /// Where the image was loaded from
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// Fetches and scales native ad images
///
/// Called on the background pool, never on the UI context.
pub trait AssetPreparer: Send + Sync {
    /// Prepare one image; `None` leaves the slot empty
    fn prepare_image(&self, image: &ImageAsset) -> Option<PreparedImage>;
}

/// Hands image URLs and size hints through without fetching
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughPreparer;

impl AssetPreparer for PassthroughPreparer {
    fn prepare_image(&self, image: &ImageAsset) -> Option<PreparedImage> {
        Some(PreparedImage {
            source: image.url.clone(),
            width: image.width,
            height: image.height,
        })
    }
}

/// Main media of a native ad
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeMedia {
    /// The SDK renders its own media view (video)
    SdkMediaView,
    Image(PreparedImage),
}

#[derive(Debug, Clone, PartialEq)]
struct PreparedAssets {
    title: Option<String>,
    body: Option<String>,
    call_to_action: Option<String>,
    star_rating: Option<f64>,
    icon: Option<PreparedImage>,
    media: Option<NativeMedia>,
}

impl PreparedAssets {
    fn prepare(preparer: &dyn AssetPreparer, assets: NativeAssets) -> Self {
        let icon = assets
            .icon
            .as_ref()
            .and_then(|image| preparer.prepare_image(image));
        let media = if assets.has_media_view {
            Some(NativeMedia::SdkMediaView)
        } else {
            assets
                .cover
                .as_ref()
                .and_then(|image| preparer.prepare_image(image))
                .map(NativeMedia::Image)
        };

        Self {
            title: assets.title,
            body: assets.body,
            call_to_action: assets.call_to_action,
            star_rating: assets.rating,
            icon,
            media,
        }
    }
}

/// Native ad delivered to the host with `on_native_ad_loaded`
///
/// Keeps a back-reference to its controller and to the listener of the load
/// that produced it. Once a newer load or a destroy replaces the underlying
/// handle, view binding calls no longer reach the SDK.
#[derive(Clone)]
pub struct MediatedNativeAd {
    assets: PreparedAssets,
    controller: Weak<NativeController>,
    generation: Generation,
    listener: Arc<dyn NativeAdAdapterListener>,
    ui: UiContext,
}

impl MediatedNativeAd {
    pub fn title(&self) -> Option<&str> {
        self.assets.title.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.assets.body.as_deref()
    }

    pub fn call_to_action(&self) -> Option<&str> {
        self.assets.call_to_action.as_deref()
    }

    pub fn star_rating(&self) -> Option<f64> {
        self.assets.star_rating
    }

    pub fn icon(&self) -> Option<&PreparedImage> {
        self.assets.icon.as_ref()
    }

    pub fn media(&self) -> Option<&NativeMedia> {
        self.assets.media.as_ref()
    }

    /// Bind click and impression tracking to the host's rendered views
    ///
    /// Always acknowledges with `true` and reports `Displayed`. The binding
    /// runs on the UI context.
    pub fn prepare_for_interaction(&self, clickable: &[ViewId], container: ViewId) -> bool {
        let controller = self.controller.clone();
        let generation = self.generation;
        let listener = Arc::clone(&self.listener);
        let clickable = clickable.to_vec();

        let dispatched = self.ui.run_or_post(move || {
            if let Some(controller) = controller.upgrade() {
                controller.bind_views(generation, container, &clickable);
            }
            listener.on_native_ad_displayed();
        });
        if let Err(error) = dispatched {
            debug!("Native views not bound: {}", error);
        }
        true
    }

    /// Remove tracking from the bound container; no-op if none was bound
    pub fn unregister_views(&self) {
        let controller = self.controller.clone();
        let generation = self.generation;

        let dispatched = self.ui.run_or_post(move || {
            if let Some(controller) = controller.upgrade() {
                controller.unbind_views(generation);
            }
        });
        if let Err(error) = dispatched {
            debug!("Native views not unregistered: {}", error);
        }
    }
}

impl fmt::Debug for MediatedNativeAd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediatedNativeAd")
            .field("assets", &self.assets)
            .field("generation", &self.generation)
            .finish()
    }
}

/// Native handle plus the container its tracking is bound to
pub(crate) struct NativeSlot {
    ad: Box<dyn NativeAd>,
    container: Option<ViewId>,
}

impl NativeSlot {
    fn unbind(&mut self) -> display_sdk::Result<()> {
        match self.container.take() {
            Some(container) => self.ad.unregister_views(container),
            None => Ok(()),
        }
    }
}

impl Teardown for NativeSlot {
    fn teardown(&mut self) -> display_sdk::Result<()> {
        let unbound = self.unbind();
        let reset = self.ad.reset();
        unbound.and(reset)
    }
}

pub struct NativeController {
    sdk: Arc<dyn DisplaySdk>,
    ui: UiContext,
    preparer: Arc<dyn AssetPreparer>,
    lifecycle: Mutex<Lifecycle<NativeSlot, dyn NativeAdAdapterListener>>,
}

impl NativeController {
    pub fn new(
        sdk: Arc<dyn DisplaySdk>,
        ui: UiContext,
        preparer: Arc<dyn AssetPreparer>,
    ) -> Arc<Self> {
        Arc::new(Self {
            sdk,
            ui,
            preparer,
            lifecycle: Mutex::new(Lifecycle::new(AdFormat::Native)),
        })
    }

    pub fn state(&self) -> AdLifecycleState {
        self.lifecycle.lock().state()
    }

    /// Replace any current native ad with a new one and request it
    ///
    /// Runs on the UI context.
    pub fn load(
        self: &Arc<Self>,
        placement: &PlacementDescriptor,
        activity: ActivityContext,
        listener: Arc<dyn NativeAdAdapterListener>,
    ) {
        let failure = {
            let mut lifecycle = self.lifecycle.lock();
            let generation = lifecycle.begin_load(listener);
            let sink = event_sink(&self.ui, Arc::downgrade(self), generation);
            let created = self
                .sdk
                .create_native(activity, placement, sink)
                .map(|ad| NativeSlot {
                    ad,
                    container: None,
                });
            lifecycle.start(created, |slot| slot.ad.load())
        };

        if let Some((listener, error)) = failure {
            listener.on_native_ad_load_failed(error);
        }
    }

    /// Report a load that failed before reaching the SDK
    ///
    /// Any previous native ad is unbound and released first.
    pub fn reject_load(&self, listener: Arc<dyn NativeAdAdapterListener>, error: ErrorKind) {
        self.lifecycle.lock().release();
        listener.on_native_ad_load_failed(error);
    }

    /// Unbind views and release the native ad; safe to call in any state
    pub fn destroy(&self) {
        self.lifecycle.lock().release();
    }

    fn prepare_assets(self: &Arc<Self>, generation: Generation, assets: NativeAssets) {
        {
            let lifecycle = self.lifecycle.lock();
            if !lifecycle.is_current(generation) || lifecycle.state() != AdLifecycleState::Loading
            {
                trace!("Dropping native assets from stale handle {}", generation);
                return;
            }
        }

        let preparer = Arc::clone(&self.preparer);
        let poster = self.ui.poster();
        let controller = Arc::downgrade(self);
        let spawned = self.ui.spawn_background(move || {
            let prepared = PreparedAssets::prepare(preparer.as_ref(), assets);
            let posted = poster.post(move || {
                if let Some(controller) = controller.upgrade() {
                    controller.finish_loading(generation, prepared);
                }
            });
            if posted.is_err() {
                trace!("UI context closed, dropping prepared native ad");
            }
        });

        if let Err(error) = spawned {
            warn!("Failed to schedule native asset preparation: {}", error);
            let failed = NormalizedEvent::LoadFailed {
                error: ErrorKind::Unspecified,
            };
            let listener = self.lifecycle.lock().apply(generation, &failed);
            if let Some(listener) = listener {
                listener.deliver(failed);
            }
        }
    }

    fn finish_loading(self: &Arc<Self>, generation: Generation, assets: PreparedAssets) {
        let delivery = {
            let mut lifecycle = self.lifecycle.lock();
            if !lifecycle.is_current(generation) || lifecycle.state() != AdLifecycleState::Loading
            {
                trace!("Dropping prepared native ad from stale handle {}", generation);
                None
            } else {
                lifecycle.apply(generation, &NormalizedEvent::Loaded)
            }
        };

        if let Some(listener) = delivery {
            let ad = MediatedNativeAd {
                assets,
                controller: Arc::downgrade(self),
                generation,
                listener: Arc::clone(&listener),
                ui: self.ui.clone(),
            };
            listener.on_native_ad_loaded(ad);
        }
    }

    fn bind_views(&self, generation: Generation, container: ViewId, clickable: &[ViewId]) {
        let mut lifecycle = self.lifecycle.lock();
        if !lifecycle.is_current(generation) {
            trace!("Not binding views to stale native ad {}", generation);
            return;
        }
        let Some(slot) = lifecycle.handle_mut() else {
            return;
        };
        if slot.container.is_some_and(|bound| bound != container) {
            if let Err(error) = slot.unbind() {
                warn!("Ignoring error while unbinding native views: {}", error);
            }
        }
        match slot.ad.register_views(container, clickable) {
            Ok(()) => slot.container = Some(container),
            Err(error) => warn!("Failed to register native views: {}", error),
        }
    }

    fn unbind_views(&self, generation: Generation) {
        let mut lifecycle = self.lifecycle.lock();
        if !lifecycle.is_current(generation) {
            return;
        }
        if let Some(slot) = lifecycle.handle_mut() {
            if let Err(error) = slot.unbind() {
                warn!("Ignoring error while unbinding native views: {}", error);
            }
        }
    }
}

impl HandleEvents for NativeController {
    fn handle_event(self: Arc<Self>, generation: Generation, event: SdkEvent) {
        match event {
            SdkEvent::NativeLoaded(assets) => self.prepare_assets(generation, assets),
            // Nothing to deliver until assets arrive
            SdkEvent::Loaded => trace!("Ignoring asset-less native load"),
            other => {
                let Some(event) = translator::translate(&other) else {
                    return;
                };
                let listener = self.lifecycle.lock().apply(generation, &event);
                if let Some(listener) = listener {
                    listener.deliver(event);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, width: u32, height: u32) -> ImageAsset {
        ImageAsset {
            url: url.to_string(),
            width,
            height,
        }
    }

    struct FailingIcons;

    impl AssetPreparer for FailingIcons {
        fn prepare_image(&self, image: &ImageAsset) -> Option<PreparedImage> {
            if image.url.contains("icon") {
                None
            } else {
                PassthroughPreparer.prepare_image(image)
            }
        }
    }

    #[test]
    fn test_sdk_media_view_wins_over_cover() {
        let assets = NativeAssets {
            cover: Some(image("https://cdn/cover.jpg", 1200, 627)),
            has_media_view: true,
            ..Default::default()
        };
        let prepared = PreparedAssets::prepare(&PassthroughPreparer, assets);
        assert_eq!(prepared.media, Some(NativeMedia::SdkMediaView));
    }

    #[test]
    fn test_failed_image_leaves_slot_empty() {
        let assets = NativeAssets {
            title: Some("Title".into()),
            rating: Some(4.5),
            icon: Some(image("https://cdn/icon.png", 64, 64)),
            cover: Some(image("https://cdn/cover.jpg", 0, 0)),
            ..Default::default()
        };
        let prepared = PreparedAssets::prepare(&FailingIcons, assets);

        assert!(prepared.icon.is_none());
        assert_eq!(prepared.title.as_deref(), Some("Title"));
        assert_eq!(prepared.star_rating, Some(4.5));
        match prepared.media {
            Some(NativeMedia::Image(cover)) => {
                assert_eq!(cover.source, "https://cdn/cover.jpg");
                assert_eq!((cover.width, cover.height), (0, 0));
            }
            other => panic!("unexpected media: {:?}", other),
        }
    }
}
