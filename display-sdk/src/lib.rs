//! # Equativ display SDK boundary
//!
//! The adapter never talks to the display SDK directly. It talks to the
//! capability traits in [`capability`], and one binding per SDK major version
//! implements them:
//!
//! ```text
//! mediation-adapter (format controllers)
//!     ↓
//! capability traits (BannerAd / FullscreenAd / NativeAd / DisplaySdk)
//!     ↓                               ↓
//! v7 binding (7.x object shapes)      v8 binding (8.x object shapes)
//! ```
//!
//! Each binding converts its version-specific listener callbacks into the
//! version-neutral [`SdkEvent`] vocabulary and pushes them through the
//! [`EventSink`] the handle was created with. Sinks may be called from any
//! thread.
//!
//! Enable the `test-support` feature for [`testing::FakeSdk`], a scriptable
//! in-memory SDK.

pub mod capability;
pub mod error;
pub mod event;
pub mod v7;
pub mod v8;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use capability::{
    AdStatus, BannerAd, DisplaySdk, EventSink, FullscreenAd, NativeAd, SdkConfiguration,
};
pub use error::{Result, SdkError};
pub use event::{ImageAsset, NativeAssets, SdkEvent, VideoEvent};
