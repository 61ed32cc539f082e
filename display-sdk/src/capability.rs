//! Capability traits implemented by each SDK binding
//!
//! One trait per format family, plus the SDK-wide configuration and the
//! factory that creates handles. Handle methods are only ever called from the
//! adapter's UI context; the [`EventSink`] a handle reports through may be
//! called from any thread.

use std::sync::Arc;

use mediation_types::{ActivityContext, PlacementDescriptor, ViewId};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::SdkEvent;

/// Callback channel from an ad handle back into the adapter
pub type EventSink = Arc<dyn Fn(SdkEvent) + Send + Sync>;

/// Readiness of a full-screen ad as reported by the SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdStatus {
    NotAvailable,
    Loading,
    Ready,
    Showing,
    Expired,
}

impl AdStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, AdStatus::Ready)
    }
}

/// Self-displaying banner view
pub trait BannerAd: Send {
    /// Request an ad; the outcome arrives through the sink
    fn load(&mut self, placement: &PlacementDescriptor) -> Result<()>;

    /// The view the host attaches to its layout
    fn view(&self) -> ViewId;

    /// Release the view and cancel any pending request
    fn reset(&mut self) -> Result<()>;
}

/// Interstitial or rewarded ad, displayed on demand
pub trait FullscreenAd: Send {
    fn load(&mut self) -> Result<()>;

    fn status(&self) -> AdStatus;

    /// Present the ad; display outcome arrives through the sink
    fn show(&mut self) -> Result<()>;

    fn reset(&mut self) -> Result<()>;
}

/// Native ad whose assets the host renders itself
pub trait NativeAd: Send {
    fn load(&mut self) -> Result<()>;

    /// Bind click and impression tracking to host views
    fn register_views(&mut self, container: ViewId, clickable: &[ViewId]) -> Result<()>;

    fn unregister_views(&mut self, container: ViewId) -> Result<()>;

    fn reset(&mut self) -> Result<()>;
}

/// Process-wide SDK configuration
///
/// `configure` is called by every load and must be safe to repeat with the
/// same parameters.
pub trait SdkConfiguration: Send + Sync {
    fn configure(&self, activity: ActivityContext, site_id: i32) -> Result<()>;

    /// Report which mediation layer drives the SDK, for cross-network reporting
    fn set_secondary_implementation_info(
        &self,
        mediation_name: &str,
        mediation_version: &str,
        adapter_version: &str,
    );

    fn library_version(&self) -> String;
}

/// Entry point of a bound SDK version
pub trait DisplaySdk: Send + Sync {
    fn configuration(&self) -> &dyn SdkConfiguration;

    fn create_banner(&self, activity: ActivityContext, sink: EventSink) -> Result<Box<dyn BannerAd>>;

    fn create_interstitial(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
        sink: EventSink,
    ) -> Result<Box<dyn FullscreenAd>>;

    fn create_rewarded(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
        sink: EventSink,
    ) -> Result<Box<dyn FullscreenAd>>;

    fn create_native(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
        sink: EventSink,
    ) -> Result<Box<dyn NativeAd>>;
}
