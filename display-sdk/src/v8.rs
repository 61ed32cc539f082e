//! Binding for the 8.x display SDK line
//!
//! The 8.x objects report typed exceptions, expose an [`AdStatus`]-like enum,
//! tear down with `on_destroy()` and configure without a site id. There is
//! no rewarded video object in this line, so
//! [`DisplaySdk::create_rewarded`] always fails with
//! [`SdkError::Unsupported`].

use mediation_types::{ActivityContext, PlacementDescriptor, ViewId};
use tracing::{debug, trace};

use crate::capability::{
    AdStatus, BannerAd, DisplaySdk, EventSink, FullscreenAd, NativeAd, SdkConfiguration,
};
use crate::error::{Result, SdkError};
use crate::event::{ImageAsset, NativeAssets, SdkEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SasExceptionType {
    NoAd,
    Timeout,
    NetworkError,
    InvalidParameter,
    Unknown,
}

/// Failure handed to 8.x `*FailedTo*` callbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SasException {
    pub kind: SasExceptionType,
    pub message: String,
}

impl SasException {
    pub fn new(kind: SasExceptionType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<SasException> for SdkError {
    fn from(exception: SasException) -> Self {
        let SasException { kind, message } = exception;
        match kind {
            SasExceptionType::NoAd => SdkError::NoAd(message),
            SasExceptionType::Timeout => SdkError::Timeout(message),
            SasExceptionType::NetworkError => SdkError::Network(message),
            SasExceptionType::InvalidParameter => SdkError::InvalidParameter(message),
            SasExceptionType::Unknown => SdkError::Other(message),
        }
    }
}

/// Status reported by `ad_status()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SasAdStatus {
    NotAvailable,
    Loading,
    Ready,
    Showing,
    Expired,
}

impl From<SasAdStatus> for AdStatus {
    fn from(status: SasAdStatus) -> Self {
        match status {
            SasAdStatus::NotAvailable => AdStatus::NotAvailable,
            SasAdStatus::Loading => AdStatus::Loading,
            SasAdStatus::Ready => AdStatus::Ready,
            SasAdStatus::Showing => AdStatus::Showing,
            SasAdStatus::Expired => AdStatus::Expired,
        }
    }
}

/// Image or media slot of a native ad; sizes are optional in 8.x
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewAsset {
    pub url: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl ViewAsset {
    fn into_image(self) -> Option<ImageAsset> {
        let url = self.url.filter(|url| !url.is_empty())?;
        Some(ImageAsset {
            url,
            width: self.width.unwrap_or(0).max(0) as u32,
            height: self.height.unwrap_or(0).max(0) as u32,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeAdAssets {
    pub title: Option<String>,
    pub body: Option<String>,
    pub call_to_action: Option<String>,
    pub rating: Option<f64>,
    pub icon_image: Option<ViewAsset>,
    pub main_view: Option<ViewAsset>,
}

impl From<NativeAdAssets> for NativeAssets {
    fn from(assets: NativeAdAssets) -> Self {
        NativeAssets {
            title: assets.title,
            body: assets.body,
            call_to_action: assets.call_to_action,
            rating: assets.rating,
            icon: assets.icon_image.and_then(ViewAsset::into_image),
            cover: assets.main_view.and_then(ViewAsset::into_image),
            has_media_view: false,
        }
    }
}

/// Every listener callback of the 8.x ad objects
#[derive(Debug, Clone, PartialEq)]
pub enum Callback {
    BannerAdLoaded,
    BannerAdFailedToLoad(SasException),
    BannerAdClicked,
    BannerAdExpanded,
    BannerAdCollapsed,
    BannerAdAudioStart,
    BannerAdAudioStop,
    BannerAdRequestClose,

    InterstitialAdLoaded,
    InterstitialAdFailedToLoad(SasException),
    InterstitialAdShown,
    InterstitialAdFailedToShow(SasException),
    InterstitialAdClicked,
    InterstitialAdClosed,
    InterstitialAdAudioStart,
    InterstitialAdAudioStop,

    NativeAdLoaded(NativeAdAssets),
    NativeAdFailedToLoad(SasException),
    NativeAdClicked,
    NativeAdRequestClose,
}

impl Callback {
    /// The shared event for this callback, if it has one
    pub fn into_sdk_event(self) -> Option<SdkEvent> {
        let event = match self {
            Callback::BannerAdLoaded | Callback::InterstitialAdLoaded => SdkEvent::Loaded,
            Callback::NativeAdLoaded(assets) => SdkEvent::NativeLoaded(assets.into()),
            Callback::BannerAdFailedToLoad(e)
            | Callback::InterstitialAdFailedToLoad(e)
            | Callback::NativeAdFailedToLoad(e) => SdkEvent::LoadFailed(e.into()),
            Callback::InterstitialAdShown => SdkEvent::Shown,
            Callback::InterstitialAdFailedToShow(e) => SdkEvent::ShowFailed(e.into()),
            Callback::BannerAdClicked
            | Callback::InterstitialAdClicked
            | Callback::NativeAdClicked => SdkEvent::Clicked,
            Callback::BannerAdExpanded => SdkEvent::Expanded,
            Callback::BannerAdCollapsed => SdkEvent::Collapsed,
            Callback::BannerAdRequestClose | Callback::InterstitialAdClosed => SdkEvent::Closed,
            Callback::BannerAdAudioStart | Callback::InterstitialAdAudioStart => {
                SdkEvent::AudioStarted
            }
            Callback::BannerAdAudioStop | Callback::InterstitialAdAudioStop => {
                SdkEvent::AudioStopped
            }
            // Native ads stay in the host layout; a close request has no equivalent
            Callback::NativeAdRequestClose => return None,
        };
        Some(event)
    }
}

pub type Listener = Box<dyn Fn(Callback) + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
pub trait BannerView: Send {
    fn set_banner_view_listener(&mut self, listener: Listener);
    fn load_ad(&mut self, placement: &PlacementDescriptor);
    fn view_id(&self) -> ViewId;
    fn on_destroy(&mut self) -> std::result::Result<(), SasException>;
}

#[cfg_attr(test, mockall::automock)]
pub trait InterstitialManager: Send {
    fn set_interstitial_manager_listener(&mut self, listener: Listener);
    fn load_ad(&mut self);
    fn ad_status(&self) -> SasAdStatus;
    fn show(&mut self);
    fn on_destroy(&mut self) -> std::result::Result<(), SasException>;
}

#[cfg_attr(test, mockall::automock)]
pub trait NativeAdView: Send {
    fn set_native_ad_listener(&mut self, listener: Listener);
    fn load_ad(&mut self, placement: &PlacementDescriptor);
    /// Track impressions and clicks on the host's container view
    fn track_mediation_view(&mut self, container: ViewId);
    /// Forward clicks on the given views to the tracked container
    fn set_click_proxy(&mut self, clickable: &[ViewId]);
    fn on_destroy(&mut self) -> std::result::Result<(), SasException>;
}

#[cfg_attr(test, mockall::automock)]
pub trait Library: Send + Sync {
    fn configure(&self, activity: ActivityContext) -> std::result::Result<(), SasException>;
    fn set_secondary_implementation_info(&self, name: &str, version: &str, adapter_version: &str);
    fn version(&self) -> String;
    fn new_banner_view(&self, activity: ActivityContext) -> Box<dyn BannerView>;
    fn new_interstitial_manager(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
    ) -> Box<dyn InterstitialManager>;
    fn new_native_ad_view(&self, activity: ActivityContext) -> Box<dyn NativeAdView>;
}

fn forward_to(sink: EventSink) -> Listener {
    Box::new(move |callback| {
        trace!(?callback, "8.x listener callback");
        if let Some(event) = callback.into_sdk_event() {
            sink(event)
        }
    })
}

/// Capability adapter over a bound 8.x [`Library`]
pub struct DisplaySdk8<L> {
    library: L,
}

impl<L: Library> DisplaySdk8<L> {
    pub fn new(library: L) -> Self {
        Self { library }
    }
}

impl<L: Library> SdkConfiguration for DisplaySdk8<L> {
    /// 8.x configuration is global; the site id travels with each placement
    fn configure(&self, activity: ActivityContext, _site_id: i32) -> Result<()> {
        debug!(%activity, "configuring 8.x library");
        self.library.configure(activity).map_err(SdkError::from)
    }

    fn set_secondary_implementation_info(
        &self,
        mediation_name: &str,
        mediation_version: &str,
        adapter_version: &str,
    ) {
        self.library
            .set_secondary_implementation_info(mediation_name, mediation_version, adapter_version);
    }

    fn library_version(&self) -> String {
        self.library.version()
    }
}

impl<L: Library> DisplaySdk for DisplaySdk8<L> {
    fn configuration(&self) -> &dyn SdkConfiguration {
        self
    }

    fn create_banner(&self, activity: ActivityContext, sink: EventSink) -> Result<Box<dyn BannerAd>> {
        let mut view = self.library.new_banner_view(activity);
        view.set_banner_view_listener(forward_to(sink));
        Ok(Box::new(Banner { view }))
    }

    fn create_interstitial(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
        sink: EventSink,
    ) -> Result<Box<dyn FullscreenAd>> {
        let mut manager = self.library.new_interstitial_manager(activity, placement);
        manager.set_interstitial_manager_listener(forward_to(sink));
        Ok(Box::new(Interstitial { manager }))
    }

    fn create_rewarded(
        &self,
        _activity: ActivityContext,
        _placement: &PlacementDescriptor,
        _sink: EventSink,
    ) -> Result<Box<dyn FullscreenAd>> {
        Err(SdkError::Unsupported("rewarded video"))
    }

    fn create_native(
        &self,
        activity: ActivityContext,
        placement: &PlacementDescriptor,
        sink: EventSink,
    ) -> Result<Box<dyn NativeAd>> {
        let mut view = self.library.new_native_ad_view(activity);
        view.set_native_ad_listener(forward_to(sink));
        Ok(Box::new(Native {
            view,
            placement: placement.clone(),
        }))
    }
}

struct Banner {
    view: Box<dyn BannerView>,
}

impl BannerAd for Banner {
    fn load(&mut self, placement: &PlacementDescriptor) -> Result<()> {
        self.view.load_ad(placement);
        Ok(())
    }

    fn view(&self) -> ViewId {
        self.view.view_id()
    }

    fn reset(&mut self) -> Result<()> {
        self.view.on_destroy().map_err(SdkError::from)
    }
}

struct Interstitial {
    manager: Box<dyn InterstitialManager>,
}

impl FullscreenAd for Interstitial {
    fn load(&mut self) -> Result<()> {
        self.manager.load_ad();
        Ok(())
    }

    fn status(&self) -> AdStatus {
        self.manager.ad_status().into()
    }

    fn show(&mut self) -> Result<()> {
        self.manager.show();
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.manager.on_destroy().map_err(SdkError::from)
    }
}

struct Native {
    view: Box<dyn NativeAdView>,
    placement: PlacementDescriptor,
}

impl NativeAd for Native {
    fn load(&mut self) -> Result<()> {
        self.view.load_ad(&self.placement);
        Ok(())
    }

    fn register_views(&mut self, container: ViewId, clickable: &[ViewId]) -> Result<()> {
        self.view.track_mediation_view(container);
        self.view.set_click_proxy(clickable);
        Ok(())
    }

    /// Tracking ends with the view itself in 8.x
    fn unregister_views(&mut self, _container: ViewId) -> Result<()> {
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.view.on_destroy().map_err(SdkError::from)
    }
}
