//! Single-handle ownership shared by every format controller
//!
//! A [`Lifecycle`] owns at most one SDK handle and the listener of the
//! operation in flight. Each load bumps the [`Generation`]; callbacks carry
//! the generation of the handle that produced them and are dropped unless it
//! is still the live one.

use std::fmt;
use std::sync::{Arc, Weak};

use display_sdk::{BannerAd, EventSink, FullscreenAd, SdkEvent};
use mediation_types::{AdFormat, AdLifecycleState, ErrorKind, NormalizedEvent};
use tracing::{debug, trace, warn};
use ui_dispatch::UiContext;

use crate::translator;

/// Identity of one load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Release of an SDK handle
pub(crate) trait Teardown {
    fn teardown(&mut self) -> display_sdk::Result<()>;
}

impl Teardown for Box<dyn BannerAd> {
    fn teardown(&mut self) -> display_sdk::Result<()> {
        self.reset()
    }
}

impl Teardown for Box<dyn FullscreenAd> {
    fn teardown(&mut self) -> display_sdk::Result<()> {
        self.reset()
    }
}

/// Receives SDK events re-dispatched onto the UI context
pub(crate) trait HandleEvents: Send + Sync + 'static {
    fn handle_event(self: Arc<Self>, generation: Generation, event: SdkEvent);
}

/// Sink for a handle of `generation`
///
/// Events are always posted, never run inline, so an SDK call that reports
/// synchronously cannot re-enter the controller.
pub(crate) fn event_sink<C: HandleEvents>(
    ui: &UiContext,
    controller: Weak<C>,
    generation: Generation,
) -> EventSink {
    let poster = ui.poster();
    Arc::new(move |event| {
        let controller = controller.clone();
        let posted = poster.post(move || {
            if let Some(controller) = controller.upgrade() {
                controller.handle_event(generation, event);
            }
        });
        if posted.is_err() {
            trace!("UI context closed, dropping SDK event from {}", generation);
        }
    })
}

pub(crate) struct Lifecycle<H, L: ?Sized> {
    format: AdFormat,
    state: AdLifecycleState,
    generation: Generation,
    handle: Option<H>,
    listener: Option<Arc<L>>,
}

impl<H: Teardown, L: ?Sized> Lifecycle<H, L> {
    pub fn new(format: AdFormat) -> Self {
        Self {
            format,
            state: AdLifecycleState::Idle,
            generation: Generation::default(),
            handle: None,
            listener: None,
        }
    }

    pub fn state(&self) -> AdLifecycleState {
        self.state
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    pub fn listener(&self) -> Option<Arc<L>> {
        self.listener.clone()
    }

    /// Whether `generation` names the live handle
    pub fn is_current(&self, generation: Generation) -> bool {
        self.handle.is_some() && generation == self.generation
    }

    pub fn transition(&mut self, to: AdLifecycleState) {
        if self.state != to {
            debug!(format = %self.format, generation = %self.generation, "{} -> {}", self.state, to);
            self.state = to;
        }
    }

    /// Tear down any prior handle and open a new load attempt
    pub fn begin_load(&mut self, listener: Arc<L>) -> Generation {
        self.release();
        self.generation = self.generation.next();
        self.listener = Some(listener);
        self.transition(AdLifecycleState::Loading);
        self.generation
    }

    /// Adopt the handle created for the current attempt and start its load
    ///
    /// On failure the attempt ends in `Idle` and the listener is handed back
    /// with the error kind to report.
    pub fn start<F>(
        &mut self,
        created: display_sdk::Result<H>,
        load: F,
    ) -> Option<(Arc<L>, ErrorKind)>
    where
        F: FnOnce(&mut H) -> display_sdk::Result<()>,
    {
        let result = created.and_then(|handle| load(self.handle.insert(handle)));
        match result {
            Ok(()) => None,
            Err(error) => {
                warn!(format = %self.format, "Failed to start ad load: {}", error);
                let kind = translator::load_error_kind(&error);
                self.release().map(|listener| (listener, kind))
            }
        }
    }

    /// Route later events of this attempt to `listener`
    pub fn attach_listener(&mut self, listener: Arc<L>) {
        self.listener = Some(listener);
    }

    /// Release the handle, if any, and return to `Idle`
    ///
    /// Teardown errors are logged and swallowed. Returns the listener that
    /// was attached, for delivering a terminal event.
    pub fn release(&mut self) -> Option<Arc<L>> {
        if let Some(mut handle) = self.handle.take() {
            if let Err(error) = handle.teardown() {
                warn!(format = %self.format, "Ignoring error while releasing ad handle: {}", error);
            }
        }
        self.transition(AdLifecycleState::Idle);
        self.listener.take()
    }

    /// Apply an event reported by the handle of `generation`
    ///
    /// Returns the listener to deliver the event to, or `None` when the event
    /// is stale or does not fit the current state.
    pub fn apply(&mut self, generation: Generation, event: &NormalizedEvent) -> Option<Arc<L>> {
        if !self.is_current(generation) {
            trace!(format = %self.format, "Dropping {:?} from stale handle {}", event, generation);
            return None;
        }

        use AdLifecycleState::*;
        match (event, self.state) {
            (NormalizedEvent::Loaded, Loading | Ready) => {
                self.transition(Ready);
                self.listener()
            }
            (NormalizedEvent::LoadFailed { .. }, Loading | Ready) => self.release(),
            (NormalizedEvent::Displayed, Showing) => self.listener(),
            (NormalizedEvent::DisplayFailed { .. }, Ready | Showing) => self.release(),
            (NormalizedEvent::Hidden, _) => self.release(),
            (
                NormalizedEvent::Loaded
                | NormalizedEvent::LoadFailed { .. }
                | NormalizedEvent::Displayed
                | NormalizedEvent::DisplayFailed { .. },
                state,
            ) => {
                trace!(format = %self.format, "Ignoring {:?} while {}", event, state);
                None
            }
            _ => self.listener(),
        }
    }
}
