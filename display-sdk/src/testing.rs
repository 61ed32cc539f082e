//! Scriptable in-memory SDK for controller tests
//!
//! [`FakeSdk`] records every call made through the capability traits and
//! keeps the [`EventSink`] of each handle it creates, so a test can drive a
//! handle's callbacks with [`FakeSdk::emit`] from any thread.
//!
//! ```
//! use display_sdk::testing::{FakeCall, FakeSdk};
//! use display_sdk::{DisplaySdk, SdkEvent};
//! use mediation_types::{ActivityContext, AdFormat};
//! use std::sync::Arc;
//!
//! let sdk = FakeSdk::new();
//! let placement = "1/2/3".parse().unwrap();
//! let mut ad = sdk
//!     .create_interstitial(ActivityContext(1), &placement, Arc::new(|_| {}))
//!     .unwrap();
//! ad.load().unwrap();
//!
//! let id = sdk.latest(AdFormat::Interstitial).unwrap();
//! sdk.emit(id, SdkEvent::Loaded);
//! assert!(ad.status().is_ready());
//! assert!(sdk.calls().contains(&FakeCall::Load(id)));
//! ```

use std::sync::Arc;

use mediation_types::{ActivityContext, AdFormat, PlacementDescriptor, ViewId};
use parking_lot::Mutex;

use crate::capability::{
    AdStatus, BannerAd, DisplaySdk, EventSink, FullscreenAd, NativeAd, SdkConfiguration,
};
use crate::error::{Result, SdkError};
use crate::event::SdkEvent;

/// Identifies a handle created by a [`FakeSdk`], in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(pub usize);

/// A call observed by the fake
#[derive(Debug, Clone, PartialEq)]
pub enum FakeCall {
    Configure {
        activity: ActivityContext,
        site_id: i32,
    },
    SecondaryInfo {
        mediation_name: String,
        mediation_version: String,
        adapter_version: String,
    },
    Create {
        id: HandleId,
        format: AdFormat,
    },
    Load(HandleId),
    Show(HandleId),
    Reset(HandleId),
    Register {
        id: HandleId,
        container: ViewId,
        clickable: Vec<ViewId>,
    },
    Unregister {
        id: HandleId,
        container: ViewId,
    },
}

struct HandleRecord {
    format: AdFormat,
    sink: EventSink,
    status: AdStatus,
    released: bool,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<FakeCall>,
    handles: Vec<HandleRecord>,
    version: Option<String>,
    fail_configure: Option<SdkError>,
    fail_next_create: Option<SdkError>,
    fail_next_show: Option<SdkError>,
    fail_reset: Option<SdkError>,
    unsupported: Vec<AdFormat>,
}

/// In-memory [`DisplaySdk`]; clones share state
#[derive(Clone, Default)]
pub struct FakeSdk {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `version` from [`SdkConfiguration::library_version`]
    pub fn with_version(self, version: impl Into<String>) -> Self {
        self.state.lock().version = Some(version.into());
        self
    }

    /// Refuse to create handles of `format`, like an SDK line without it
    pub fn without_format(self, format: AdFormat) -> Self {
        self.state.lock().unsupported.push(format);
        self
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.state.lock().calls.clone()
    }

    /// Calls that targeted handle `id`
    pub fn calls_for(&self, id: HandleId) -> Vec<FakeCall> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| match call {
                FakeCall::Create { id: target, .. }
                | FakeCall::Register { id: target, .. }
                | FakeCall::Unregister { id: target, .. } => *target == id,
                FakeCall::Load(target) | FakeCall::Show(target) | FakeCall::Reset(target) => {
                    *target == id
                }
                _ => false,
            })
            .cloned()
            .collect()
    }

    /// Number of `Show` calls across all handles
    pub fn show_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, FakeCall::Show(_)))
            .count()
    }

    pub fn handles(&self, format: AdFormat) -> Vec<HandleId> {
        self.state
            .lock()
            .handles
            .iter()
            .enumerate()
            .filter(|(_, record)| record.format == format)
            .map(|(index, _)| HandleId(index))
            .collect()
    }

    /// Most recently created handle of `format`
    pub fn latest(&self, format: AdFormat) -> Option<HandleId> {
        self.handles(format).last().copied()
    }

    pub fn is_released(&self, id: HandleId) -> bool {
        self.state
            .lock()
            .handles
            .get(id.0)
            .map_or(false, |record| record.released)
    }

    /// Deliver `event` through the sink of handle `id`
    ///
    /// Full-screen status follows the event: `Loaded` makes the ad ready,
    /// `Shown` marks it showing and `Closed` or a failure makes it
    /// unavailable. The sink runs on the calling thread with no lock held.
    pub fn emit(&self, id: HandleId, event: SdkEvent) {
        let sink = {
            let mut state = self.state.lock();
            let Some(record) = state.handles.get_mut(id.0) else {
                return;
            };
            match &event {
                SdkEvent::Loaded | SdkEvent::NativeLoaded(_) => record.status = AdStatus::Ready,
                SdkEvent::Shown => record.status = AdStatus::Showing,
                SdkEvent::Closed | SdkEvent::LoadFailed(_) | SdkEvent::ShowFailed(_) => {
                    record.status = AdStatus::NotAvailable
                }
                _ => {}
            }
            Arc::clone(&record.sink)
        };
        sink(event);
    }

    pub fn set_status(&self, id: HandleId, status: AdStatus) {
        if let Some(record) = self.state.lock().handles.get_mut(id.0) {
            record.status = status;
        }
    }

    /// Every later `configure` call fails with `error`
    pub fn fail_configure(&self, error: SdkError) {
        self.state.lock().fail_configure = Some(error);
    }

    pub fn fail_next_create(&self, error: SdkError) {
        self.state.lock().fail_next_create = Some(error);
    }

    pub fn fail_next_show(&self, error: SdkError) {
        self.state.lock().fail_next_show = Some(error);
    }

    /// Every later `reset` call fails with `error`, after being recorded
    pub fn fail_reset(&self, error: SdkError) {
        self.state.lock().fail_reset = Some(error);
    }

    fn create(&self, format: AdFormat, sink: EventSink) -> Result<FakeHandle> {
        let mut state = self.state.lock();
        if let Some(error) = state.fail_next_create.take() {
            return Err(error);
        }
        if state.unsupported.contains(&format) {
            return Err(SdkError::Unsupported(format.as_str()));
        }
        let id = HandleId(state.handles.len());
        state.handles.push(HandleRecord {
            format,
            sink,
            status: AdStatus::NotAvailable,
            released: false,
        });
        state.calls.push(FakeCall::Create { id, format });
        Ok(FakeHandle {
            id,
            state: Arc::clone(&self.state),
        })
    }
}

impl SdkConfiguration for FakeSdk {
    fn configure(&self, activity: ActivityContext, site_id: i32) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(FakeCall::Configure { activity, site_id });
        match &state.fail_configure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn set_secondary_implementation_info(
        &self,
        mediation_name: &str,
        mediation_version: &str,
        adapter_version: &str,
    ) {
        self.state.lock().calls.push(FakeCall::SecondaryInfo {
            mediation_name: mediation_name.to_string(),
            mediation_version: mediation_version.to_string(),
            adapter_version: adapter_version.to_string(),
        });
    }

    fn library_version(&self) -> String {
        self.state
            .lock()
            .version
            .clone()
            .unwrap_or_else(|| "0.0.0-fake".to_string())
    }
}

impl DisplaySdk for FakeSdk {
    fn configuration(&self) -> &dyn SdkConfiguration {
        self
    }

    fn create_banner(&self, _activity: ActivityContext, sink: EventSink) -> Result<Box<dyn BannerAd>> {
        Ok(Box::new(self.create(AdFormat::Banner, sink)?))
    }

    fn create_interstitial(
        &self,
        _activity: ActivityContext,
        _placement: &PlacementDescriptor,
        sink: EventSink,
    ) -> Result<Box<dyn FullscreenAd>> {
        Ok(Box::new(self.create(AdFormat::Interstitial, sink)?))
    }

    fn create_rewarded(
        &self,
        _activity: ActivityContext,
        _placement: &PlacementDescriptor,
        sink: EventSink,
    ) -> Result<Box<dyn FullscreenAd>> {
        Ok(Box::new(self.create(AdFormat::Rewarded, sink)?))
    }

    fn create_native(
        &self,
        _activity: ActivityContext,
        _placement: &PlacementDescriptor,
        sink: EventSink,
    ) -> Result<Box<dyn NativeAd>> {
        Ok(Box::new(self.create(AdFormat::Native, sink)?))
    }
}

struct FakeHandle {
    id: HandleId,
    state: Arc<Mutex<FakeState>>,
}

impl FakeHandle {
    fn record(&self, call: FakeCall) {
        self.state.lock().calls.push(call);
    }

    fn load(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(FakeCall::Load(self.id));
        if let Some(record) = state.handles.get_mut(self.id.0) {
            record.status = AdStatus::Loading;
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(FakeCall::Reset(self.id));
        if let Some(record) = state.handles.get_mut(self.id.0) {
            record.released = true;
            record.status = AdStatus::NotAvailable;
        }
        match &state.fail_reset {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl BannerAd for FakeHandle {
    fn load(&mut self, _placement: &PlacementDescriptor) -> Result<()> {
        FakeHandle::load(self)
    }

    fn view(&self) -> ViewId {
        ViewId(1000 + self.id.0 as u64)
    }

    fn reset(&mut self) -> Result<()> {
        FakeHandle::reset(self)
    }
}

impl FullscreenAd for FakeHandle {
    fn load(&mut self) -> Result<()> {
        FakeHandle::load(self)
    }

    fn status(&self) -> AdStatus {
        self.state
            .lock()
            .handles
            .get(self.id.0)
            .map_or(AdStatus::NotAvailable, |record| record.status)
    }

    fn show(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(FakeCall::Show(self.id));
        match state.fail_next_show.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn reset(&mut self) -> Result<()> {
        FakeHandle::reset(self)
    }
}

impl NativeAd for FakeHandle {
    fn load(&mut self) -> Result<()> {
        FakeHandle::load(self)
    }

    fn register_views(&mut self, container: ViewId, clickable: &[ViewId]) -> Result<()> {
        self.record(FakeCall::Register {
            id: self.id,
            container,
            clickable: clickable.to_vec(),
        });
        Ok(())
    }

    fn unregister_views(&mut self, container: ViewId) -> Result<()> {
        self.record(FakeCall::Unregister {
            id: self.id,
            container,
        });
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        FakeHandle::reset(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement() -> PlacementDescriptor {
        "1/2/3".parse().unwrap()
    }

    #[test]
    fn test_emit_reaches_sink_and_tracks_status() {
        let sdk = FakeSdk::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let sink: EventSink = Arc::new(move |event| captured.lock().push(event));

        let mut ad = sdk
            .create_rewarded(ActivityContext(1), &placement(), sink)
            .unwrap();
        ad.load().unwrap();
        let id = sdk.latest(AdFormat::Rewarded).unwrap();
        assert_eq!(ad.status(), AdStatus::Loading);

        sdk.emit(id, SdkEvent::Loaded);
        assert!(ad.status().is_ready());
        sdk.emit(id, SdkEvent::Closed);
        assert_eq!(ad.status(), AdStatus::NotAvailable);
        assert_eq!(*seen.lock(), vec![SdkEvent::Loaded, SdkEvent::Closed]);
    }

    #[test]
    fn test_show_failure_is_one_shot() {
        let sdk = FakeSdk::new();
        let mut ad = sdk
            .create_interstitial(ActivityContext(1), &placement(), Arc::new(|_| {}))
            .unwrap();
        sdk.fail_next_show(SdkError::Other("broken".into()));

        assert!(ad.show().is_err());
        assert!(ad.show().is_ok());
        assert_eq!(sdk.show_count(), 2);
    }

    #[test]
    fn test_reset_marks_release_even_on_error() {
        let sdk = FakeSdk::new();
        let mut banner = sdk
            .create_banner(ActivityContext(1), Arc::new(|_| {}))
            .unwrap();
        sdk.fail_reset(SdkError::Other("already gone".into()));
        let id = sdk.latest(AdFormat::Banner).unwrap();

        assert!(banner.reset().is_err());
        assert!(sdk.is_released(id));
        assert_eq!(
            sdk.calls_for(id),
            vec![FakeCall::Create { id, format: AdFormat::Banner }, FakeCall::Reset(id)]
        );
    }

    #[test]
    fn test_unsupported_format() {
        let sdk = FakeSdk::new().without_format(AdFormat::Rewarded);
        let result = sdk.create_rewarded(ActivityContext(1), &placement(), Arc::new(|_| {}));
        assert!(matches!(result, Err(SdkError::Unsupported("rewarded"))));
        assert!(sdk.handles(AdFormat::Rewarded).is_empty());
    }
}
