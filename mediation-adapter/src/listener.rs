//! Outward listener interfaces the host supplies per operation
//!
//! Callbacks always arrive on the UI context. A normalized event a format
//! has no callback for is dropped for that format.

use mediation_types::{ErrorKind, NormalizedEvent, Reward, ViewId};
use tracing::trace;

use crate::native::MediatedNativeAd;

/// Banner (ad view) callbacks
pub trait AdViewAdapterListener: Send + Sync {
    fn on_ad_view_ad_loaded(&self, view: ViewId);
    fn on_ad_view_ad_load_failed(&self, error: ErrorKind);
    fn on_ad_view_ad_displayed(&self);
    fn on_ad_view_ad_display_failed(&self, error: ErrorKind);
    fn on_ad_view_ad_clicked(&self);
    fn on_ad_view_ad_hidden(&self);
    fn on_ad_view_ad_expanded(&self);
    fn on_ad_view_ad_collapsed(&self);
}

pub trait InterstitialAdapterListener: Send + Sync {
    fn on_interstitial_ad_loaded(&self);
    fn on_interstitial_ad_load_failed(&self, error: ErrorKind);
    fn on_interstitial_ad_displayed(&self);
    fn on_interstitial_ad_display_failed(&self, error: ErrorKind);
    fn on_interstitial_ad_clicked(&self);
    fn on_interstitial_ad_hidden(&self);
}

pub trait RewardedAdapterListener: Send + Sync {
    fn on_rewarded_ad_loaded(&self);
    fn on_rewarded_ad_load_failed(&self, error: ErrorKind);
    fn on_rewarded_ad_displayed(&self);
    fn on_rewarded_ad_display_failed(&self, error: ErrorKind);
    fn on_rewarded_ad_clicked(&self);
    fn on_rewarded_ad_hidden(&self);
    fn on_rewarded_ad_video_started(&self);
    fn on_rewarded_ad_video_completed(&self);
    fn on_user_rewarded(&self, reward: Reward);
}

pub trait NativeAdAdapterListener: Send + Sync {
    fn on_native_ad_loaded(&self, ad: MediatedNativeAd);
    fn on_native_ad_load_failed(&self, error: ErrorKind);
    fn on_native_ad_displayed(&self);
    fn on_native_ad_clicked(&self);
}

/// Routes a normalized event to the matching listener callback
pub trait Deliver: Send + Sync {
    fn deliver(&self, event: NormalizedEvent);
}

fn dropped(format: &str, event: &NormalizedEvent) {
    trace!("No {} callback for {:?}, dropping", format, event);
}

/// Banner delivery needs the ad view for `Loaded`
pub(crate) fn deliver_ad_view(
    listener: &dyn AdViewAdapterListener,
    event: NormalizedEvent,
    view: Option<ViewId>,
) {
    match event {
        NormalizedEvent::Loaded => match view {
            Some(view) => listener.on_ad_view_ad_loaded(view),
            None => dropped("banner", &NormalizedEvent::Loaded),
        },
        NormalizedEvent::LoadFailed { error } => listener.on_ad_view_ad_load_failed(error),
        NormalizedEvent::Displayed => listener.on_ad_view_ad_displayed(),
        NormalizedEvent::DisplayFailed { error } => listener.on_ad_view_ad_display_failed(error),
        NormalizedEvent::Clicked => listener.on_ad_view_ad_clicked(),
        NormalizedEvent::Hidden => listener.on_ad_view_ad_hidden(),
        NormalizedEvent::Expanded => listener.on_ad_view_ad_expanded(),
        NormalizedEvent::Collapsed => listener.on_ad_view_ad_collapsed(),
        other => dropped("banner", &other),
    }
}

impl<'a> Deliver for dyn InterstitialAdapterListener + 'a {
    fn deliver(&self, event: NormalizedEvent) {
        match event {
            NormalizedEvent::Loaded => self.on_interstitial_ad_loaded(),
            NormalizedEvent::LoadFailed { error } => self.on_interstitial_ad_load_failed(error),
            NormalizedEvent::Displayed => self.on_interstitial_ad_displayed(),
            NormalizedEvent::DisplayFailed { error } => {
                self.on_interstitial_ad_display_failed(error)
            }
            NormalizedEvent::Clicked => self.on_interstitial_ad_clicked(),
            NormalizedEvent::Hidden => self.on_interstitial_ad_hidden(),
            other => dropped("interstitial", &other),
        }
    }
}

impl<'a> Deliver for dyn RewardedAdapterListener + 'a {
    fn deliver(&self, event: NormalizedEvent) {
        match event {
            NormalizedEvent::Loaded => self.on_rewarded_ad_loaded(),
            NormalizedEvent::LoadFailed { error } => self.on_rewarded_ad_load_failed(error),
            NormalizedEvent::Displayed => self.on_rewarded_ad_displayed(),
            NormalizedEvent::DisplayFailed { error } => self.on_rewarded_ad_display_failed(error),
            NormalizedEvent::Clicked => self.on_rewarded_ad_clicked(),
            NormalizedEvent::Hidden => self.on_rewarded_ad_hidden(),
            NormalizedEvent::VideoStarted => self.on_rewarded_ad_video_started(),
            NormalizedEvent::VideoCompleted => self.on_rewarded_ad_video_completed(),
            NormalizedEvent::UserRewarded { reward } => self.on_user_rewarded(reward),
            other => dropped("rewarded", &other),
        }
    }
}

/// `Loaded` is delivered with the prepared ad by the native controller
impl<'a> Deliver for dyn NativeAdAdapterListener + 'a {
    fn deliver(&self, event: NormalizedEvent) {
        match event {
            NormalizedEvent::LoadFailed { error } => self.on_native_ad_load_failed(error),
            NormalizedEvent::Displayed => self.on_native_ad_displayed(),
            NormalizedEvent::Clicked => self.on_native_ad_clicked(),
            other => dropped("native", &other),
        }
    }
}
