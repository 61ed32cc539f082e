//! Callback vocabulary shared by every SDK binding

use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// Video playback milestones reported by video-capable formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoEvent {
    Started,
    Completed,
    /// Any other milestone (pause, quartiles, skip...), by SDK event id
    Other(i32),
}

/// Image referenced by a native ad
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageAsset {
    pub url: String,
    /// Target width in pixels, `0` when the SDK gives no size hint
    pub width: u32,
    /// Target height in pixels, `0` when the SDK gives no size hint
    pub height: u32,
}

/// Assets of a loaded native ad, as reported by the SDK
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NativeAssets {
    pub title: Option<String>,
    pub body: Option<String>,
    pub call_to_action: Option<String>,
    pub rating: Option<f64>,
    pub icon: Option<ImageAsset>,
    pub cover: Option<ImageAsset>,
    /// The ad carries a video media element rendered by the SDK
    pub has_media_view: bool,
}

/// Event emitted by an underlying ad handle
#[derive(Debug, Clone, PartialEq)]
pub enum SdkEvent {
    Loaded,
    NativeLoaded(NativeAssets),
    LoadFailed(SdkError),
    Shown,
    ShowFailed(SdkError),
    Clicked,
    Expanded,
    Collapsed,
    /// Dismissed, closed, or the ad requested to be closed
    Closed,
    RewardReceived { currency: String, amount: f64 },
    Video(VideoEvent),
    Resized,
    AudioStarted,
    AudioStopped,
    EndCardDisplayed,
}
