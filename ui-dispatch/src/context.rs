//! UI-affine execution context
//!
//! Every ad-object call and every outward listener callback runs on the one
//! thread a [`UiContext`] is bound to. Other threads reach it by posting
//! tasks; tasks run one at a time in posting order.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle, ThreadId};

use parking_lot::Mutex;
use tokio::runtime::Runtime;

use crate::config::DispatchConfig;
use crate::error::{DispatchError, Result};
use crate::pump::UiPump;
use crate::worker::{self, Message, Task};

/// Handle to the UI context; clones share the same queue
#[derive(Clone)]
pub struct UiContext {
    inner: Arc<Inner>,
}

struct Inner {
    tx: mpsc::Sender<Message>,
    closed: Arc<AtomicBool>,
    ui_thread: ThreadId,
    /// Background pool, `None` once shut down
    runtime: Mutex<Option<Runtime>>,
    /// Dedicated thread, `None` for host-pumped contexts
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl UiContext {
    /// Run the UI queue on a dedicated, named thread
    pub fn spawn(config: DispatchConfig) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let runtime = build_runtime(&config)?;
        let thread = worker::spawn_ui_thread(config.thread_name.clone(), rx)
            .map_err(DispatchError::Spawn)?;
        let ui_thread = thread.thread().id();

        tracing::debug!("Spawned UI context on thread '{}'", config.thread_name);

        Ok(Self::from_parts(tx, ui_thread, runtime, Some(thread)))
    }

    /// Bind the context to the calling thread
    ///
    /// Nothing runs until the host drives the returned [`UiPump`] from this
    /// same thread.
    pub fn manual(config: DispatchConfig) -> Result<(Self, UiPump)> {
        let (tx, rx) = mpsc::channel();
        let runtime = build_runtime(&config)?;
        let context = Self::from_parts(tx, thread::current().id(), runtime, None);
        Ok((context, UiPump::new(rx)))
    }

    fn from_parts(
        tx: mpsc::Sender<Message>,
        ui_thread: ThreadId,
        runtime: Runtime,
        thread: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                tx,
                closed: Arc::new(AtomicBool::new(false)),
                ui_thread,
                runtime: Mutex::new(Some(runtime)),
                thread: Mutex::new(thread),
            }),
        }
    }

    /// Queue `task` to run on the UI thread
    pub fn post<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        send(&self.inner.tx, &self.inner.closed, Box::new(task))
    }

    /// Run `task` now when called on the UI thread, otherwise queue it
    pub fn run_or_post<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_ui_thread() {
            if self.is_closed() {
                return Err(DispatchError::Closed);
            }
            task();
            Ok(())
        } else {
            self.post(task)
        }
    }

    pub fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.inner.ui_thread
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Send-only handle for code that must not keep the context alive
    pub fn poster(&self) -> UiPoster {
        UiPoster {
            tx: self.inner.tx.clone(),
            closed: Arc::clone(&self.inner.closed),
        }
    }

    /// Run blocking work on the background pool
    ///
    /// Results reach the UI thread by posting from inside `job`.
    pub fn spawn_background<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        match self.inner.runtime.lock().as_ref() {
            Some(runtime) => {
                runtime.spawn_blocking(job);
                Ok(())
            }
            None => Err(DispatchError::Closed),
        }
    }

    /// Stop the context
    ///
    /// Tasks already queued still run; later posts fail with
    /// [`DispatchError::Closed`]. Blocks until the dedicated thread exits,
    /// unless called from that thread.
    pub fn shutdown(&self) {
        self.inner.close(!self.is_ui_thread());
    }
}

impl fmt::Debug for UiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiContext")
            .field("ui_thread", &self.inner.ui_thread)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Inner {
    fn close(&self, join: bool) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let _ = self.tx.send(Message::Shutdown);

        if let Some(runtime) = self.runtime.lock().take() {
            runtime.shutdown_background();
        }

        if join {
            if let Some(thread) = self.thread.lock().take() {
                if thread.join().is_err() {
                    tracing::warn!("UI thread exited with a panic");
                }
            }
        }

        tracing::debug!("UI context shut down");
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.close(false);
    }
}

/// Posts tasks onto a [`UiContext`] without owning it
#[derive(Clone)]
pub struct UiPoster {
    tx: mpsc::Sender<Message>,
    closed: Arc<AtomicBool>,
}

impl UiPoster {
    pub fn post<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        send(&self.tx, &self.closed, Box::new(task))
    }
}

impl fmt::Debug for UiPoster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiPoster")
            .field("closed", &self.closed.load(Ordering::Acquire))
            .finish()
    }
}

fn send(tx: &mpsc::Sender<Message>, closed: &AtomicBool, task: Task) -> Result<()> {
    if closed.load(Ordering::Acquire) {
        return Err(DispatchError::Closed);
    }
    tx.send(Message::Run(task)).map_err(|_| DispatchError::Closed)
}

fn build_runtime(config: &DispatchConfig) -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .max_blocking_threads(config.background_threads.max(1))
        .thread_name(config.background_thread_name())
        .enable_all()
        .build()
        .map_err(DispatchError::Runtime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[test]
    fn test_run_or_post_is_inline_on_ui_thread() {
        let (context, mut pump) = UiContext::manual(DispatchConfig::default()).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);

        context
            .run_or_post(move || {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(pump.run_pending(), 0);
    }

    #[test]
    fn test_post_is_deferred_until_pumped() {
        let (context, mut pump) = UiContext::manual(DispatchConfig::default()).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);

        context
            .post(move || {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        assert_eq!(pump.run_pending(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_post_after_shutdown_fails() {
        let (context, _pump) = UiContext::manual(DispatchConfig::default()).unwrap();
        let poster = context.poster();
        context.shutdown();

        assert!(matches!(context.post(|| {}), Err(DispatchError::Closed)));
        assert!(matches!(poster.post(|| {}), Err(DispatchError::Closed)));
        assert!(matches!(context.run_or_post(|| {}), Err(DispatchError::Closed)));
        assert!(matches!(context.spawn_background(|| {}), Err(DispatchError::Closed)));
    }

    #[test]
    fn test_background_job_posts_back() {
        let (context, mut pump) = UiContext::manual(DispatchConfig::default()).unwrap();
        let poster = context.poster();
        let on_ui = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&on_ui);
        let ui = context.clone();

        context
            .spawn_background(move || {
                let _ = poster.post(move || flag.store(ui.is_ui_thread(), Ordering::SeqCst));
            })
            .unwrap();

        assert_eq!(pump.run_timeout(Duration::from_secs(5)), 1);
        assert!(on_ui.load(Ordering::SeqCst));
    }
}
