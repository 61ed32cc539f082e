//! Interstitial and rewarded controllers
//!
//! Both formats share one state machine; they differ only in the SDK factory
//! they load through and the listener they report to.

use std::sync::Arc;

use display_sdk::{DisplaySdk, EventSink, FullscreenAd, SdkEvent};
use mediation_types::{
    ActivityContext, AdFormat, AdLifecycleState, ErrorKind, NormalizedEvent, PlacementDescriptor,
};
use parking_lot::Mutex;
use tracing::{debug, warn};
use ui_dispatch::UiContext;

use crate::lifecycle::{event_sink, Generation, HandleEvents, Lifecycle};
use crate::listener::{Deliver, InterstitialAdapterListener, RewardedAdapterListener};
use crate::translator;

type Create = fn(
    &dyn DisplaySdk,
    ActivityContext,
    &PlacementDescriptor,
    EventSink,
) -> display_sdk::Result<Box<dyn FullscreenAd>>;

pub type InterstitialController = FullscreenController<dyn InterstitialAdapterListener>;
pub type RewardedController = FullscreenController<dyn RewardedAdapterListener>;

pub struct FullscreenController<L: ?Sized> {
    format: AdFormat,
    create: Create,
    sdk: Arc<dyn DisplaySdk>,
    ui: UiContext,
    lifecycle: Mutex<Lifecycle<Box<dyn FullscreenAd>, L>>,
}

impl FullscreenController<dyn InterstitialAdapterListener> {
    pub fn interstitial(sdk: Arc<dyn DisplaySdk>, ui: UiContext) -> Arc<Self> {
        Self::with_factory(AdFormat::Interstitial, sdk, ui, |sdk, activity, placement, sink| {
            sdk.create_interstitial(activity, placement, sink)
        })
    }
}

impl FullscreenController<dyn RewardedAdapterListener> {
    pub fn rewarded(sdk: Arc<dyn DisplaySdk>, ui: UiContext) -> Arc<Self> {
        Self::with_factory(AdFormat::Rewarded, sdk, ui, |sdk, activity, placement, sink| {
            sdk.create_rewarded(activity, placement, sink)
        })
    }
}

impl<L> FullscreenController<L>
where
    L: ?Sized + Deliver + 'static,
{
    fn with_factory(
        format: AdFormat,
        sdk: Arc<dyn DisplaySdk>,
        ui: UiContext,
        create: Create,
    ) -> Arc<Self> {
        Arc::new(Self {
            format,
            create,
            sdk,
            ui,
            lifecycle: Mutex::new(Lifecycle::new(format)),
        })
    }

    pub fn state(&self) -> AdLifecycleState {
        self.lifecycle.lock().state()
    }

    /// Replace any current ad with a new one and request it
    ///
    /// Runs on the UI context.
    pub fn load(
        self: &Arc<Self>,
        placement: &PlacementDescriptor,
        activity: ActivityContext,
        listener: Arc<L>,
    ) {
        let failure = {
            let mut lifecycle = self.lifecycle.lock();
            let generation = lifecycle.begin_load(listener);
            let sink = event_sink(&self.ui, Arc::downgrade(self), generation);
            let created = (self.create)(self.sdk.as_ref(), activity, placement, sink);
            lifecycle.start(created, |ad| ad.load())
        };

        if let Some((listener, error)) = failure {
            listener.deliver(NormalizedEvent::LoadFailed { error });
        }
    }

    /// Present the loaded ad
    ///
    /// Without a ready ad nothing reaches the SDK and `DisplayFailed(AdNotReady)`
    /// is reported straight away. `listener` receives every later event of
    /// this ad. Runs on the UI context.
    pub fn show(&self, listener: Arc<L>) {
        let outcome = {
            let mut lifecycle = self.lifecycle.lock();
            let ready = lifecycle.state() == AdLifecycleState::Ready
                && lifecycle.handle().map_or(false, |ad| ad.status().is_ready());

            if !ready {
                debug!(format = %self.format, "Show requested while {}, ad not ready", lifecycle.state());
                Err(ErrorKind::AdNotReady)
            } else {
                lifecycle.attach_listener(Arc::clone(&listener));
                lifecycle.transition(AdLifecycleState::Showing);
                match lifecycle.handle_mut().map(|ad| ad.show()) {
                    Some(Ok(())) => Ok(()),
                    Some(Err(error)) => {
                        warn!(format = %self.format, "Failed to show ad: {}", error);
                        lifecycle.release();
                        Err(translator::display_error_kind(&error))
                    }
                    None => Err(ErrorKind::AdNotReady),
                }
            }
        };

        if let Err(error) = outcome {
            listener.deliver(NormalizedEvent::DisplayFailed { error });
        }
    }

    /// Report a load that failed before reaching the SDK
    ///
    /// Any previous ad is released first, so it can no longer be shown.
    pub fn reject_load(&self, listener: Arc<L>, error: ErrorKind) {
        self.lifecycle.lock().release();
        listener.deliver(NormalizedEvent::LoadFailed { error });
    }

    /// Release the ad; safe to call in any state
    pub fn destroy(&self) {
        self.lifecycle.lock().release();
    }
}

impl<L> HandleEvents for FullscreenController<L>
where
    L: ?Sized + Deliver + 'static,
{
    fn handle_event(self: Arc<Self>, generation: Generation, event: SdkEvent) {
        let Some(event) = translator::translate(&event) else {
            return;
        };
        let listener = self.lifecycle.lock().apply(generation, &event);
        if let Some(listener) = listener {
            listener.deliver(event);
        }
    }
}
