//! Ad formats, controller states and opaque host handles

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four ad formats the adapter mediates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdFormat {
    Banner,
    Interstitial,
    Rewarded,
    Native,
}

impl AdFormat {
    pub const ALL: [AdFormat; 4] = [
        AdFormat::Banner,
        AdFormat::Interstitial,
        AdFormat::Rewarded,
        AdFormat::Native,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdFormat::Banner => "banner",
            AdFormat::Interstitial => "interstitial",
            AdFormat::Rewarded => "rewarded",
            AdFormat::Native => "native",
        }
    }
}

impl fmt::Display for AdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a format controller is in its load/show lifecycle
///
/// `Idle` is both the initial state and the state every terminal outcome
/// (hidden, failed, destroyed) returns to. A controller in `Idle` holds no
/// underlying ad handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdLifecycleState {
    #[default]
    Idle,
    Loading,
    Ready,
    Showing,
}

impl fmt::Display for AdLifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdLifecycleState::Idle => "idle",
            AdLifecycleState::Loading => "loading",
            AdLifecycleState::Ready => "ready",
            AdLifecycleState::Showing => "showing",
        };
        f.write_str(name)
    }
}

/// Opaque reference to a host view (ad container, clickable asset view, or
/// the banner view handed back on load)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Opaque reference to the host activity an ad is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityContext(pub u64);

impl fmt::Display for ActivityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "activity#{}", self.0)
    }
}
