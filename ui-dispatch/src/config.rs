//! Configuration for the dispatch context

use serde::{Deserialize, Serialize};

/// Configuration for a [`UiContext`](crate::UiContext)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Name of the dedicated UI thread; background threads get a `-bg` suffix
    /// Default: "equativ-ui"
    pub thread_name: String,

    /// Upper bound on concurrent background jobs
    /// Default: 1
    pub background_threads: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            thread_name: "equativ-ui".to_string(),
            background_threads: 1,
        }
    }
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Values below one are raised to one
    pub fn with_background_threads(mut self, threads: usize) -> Self {
        self.background_threads = threads.max(1);
        self
    }

    pub(crate) fn background_thread_name(&self) -> String {
        format!("{}-bg", self.thread_name)
    }
}
