//! UI queue loop
//!
//! Both backends drain the same [`Message`] channel; the dedicated thread
//! blocks on it, the host pump polls it.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

/// Unit of work queued onto the UI context
pub(crate) type Task = Box<dyn FnOnce() + Send + 'static>;

/// Messages sent to the UI queue
pub(crate) enum Message {
    /// Run a task
    Run(Task),
    /// Stop draining the queue
    Shutdown,
}

/// Outcome of handling one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Ran,
    Stop,
}

/// Run a task, containing any panic to the task itself
pub(crate) fn execute(task: Task) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::error!("UI task panicked: {}", reason);
    }
}

pub(crate) fn handle(message: Message) -> Step {
    match message {
        Message::Run(task) => {
            execute(task);
            Step::Ran
        }
        Message::Shutdown => Step::Stop,
    }
}

/// Spawns the dedicated UI thread
pub(crate) fn spawn_ui_thread(
    name: String,
    rx: mpsc::Receiver<Message>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new().name(name).spawn(move || {
        tracing::debug!("UI thread started");
        for message in rx {
            if handle(message) == Step::Stop {
                tracing::debug!("UI thread received shutdown");
                break;
            }
        }
        tracing::debug!("UI thread stopped");
    })
}
