//! Host-driven backend of the UI context

use std::marker::PhantomData;
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use crate::worker::{self, Message, Step};

/// Drains a host-pumped [`UiContext`](crate::UiContext)
///
/// Created by [`UiContext::manual`](crate::UiContext::manual). The pump is
/// tied to the thread that created it, which is the context's UI thread.
pub struct UiPump {
    rx: mpsc::Receiver<Message>,
    stopped: bool,
    /// Keeps the pump on its UI thread
    _not_send: PhantomData<*const ()>,
}

impl UiPump {
    pub(crate) fn new(rx: mpsc::Receiver<Message>) -> Self {
        Self {
            rx,
            stopped: false,
            _not_send: PhantomData,
        }
    }

    /// Run every queued task, including tasks queued while draining
    ///
    /// Returns the number of tasks run.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while !self.stopped {
            match self.rx.try_recv() {
                Ok(message) => ran += self.dispatch(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.stopped = true,
            }
        }
        ran
    }

    /// Wait up to `timeout` for a task, then drain the queue
    pub fn run_timeout(&mut self, timeout: Duration) -> usize {
        if self.stopped {
            return 0;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(message) => self.dispatch(message) + self.run_pending(),
            Err(RecvTimeoutError::Timeout) => 0,
            Err(RecvTimeoutError::Disconnected) => {
                self.stopped = true;
                0
            }
        }
    }

    /// Pump until `done` holds or `timeout` elapses; returns whether it held
    pub fn run_until<F>(&mut self, timeout: Duration, mut done: F) -> bool
    where
        F: FnMut() -> bool,
    {
        let deadline = Instant::now() + timeout;
        self.run_pending();
        while !done() {
            let now = Instant::now();
            if now >= deadline || self.stopped {
                return false;
            }
            self.run_timeout(deadline - now);
        }
        true
    }

    /// The context was shut down and its queue fully drained
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn dispatch(&mut self, message: Message) -> usize {
        match worker::handle(message) {
            Step::Ran => 1,
            Step::Stop => {
                tracing::debug!("UI pump received shutdown");
                self.stopped = true;
                0
            }
        }
    }
}
