//! # UI dispatch
//!
//! A single-threaded task queue standing in for the host's main thread, plus
//! a small background pool for blocking work.
//!
//! ```text
//! any thread ──post──▶ [ FIFO queue ] ──▶ UI thread (dedicated, or host-pumped)
//!                                            │
//!                               spawn_background
//!                                            ▼
//!                                   tokio blocking pool ──post──▶ queue
//! ```
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use ui_dispatch::{DispatchConfig, UiContext};
//!
//! let (context, mut pump) = UiContext::manual(DispatchConfig::default())?;
//! let poster = context.poster();
//! context.spawn_background(move || {
//!     let _ = poster.post(|| println!("back on the UI thread"));
//! })?;
//! pump.run_timeout(Duration::from_secs(1));
//! # Ok::<(), ui_dispatch::DispatchError>(())
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod pump;
mod worker;

pub use config::DispatchConfig;
pub use context::{UiContext, UiPoster};
pub use error::{DispatchError, Result};
pub use pump::UiPump;
