//! Host-facing adapter
//!
//! The mediation host creates one [`EquativMediationAdapter`] per adapter
//! instance. Every public method returns immediately and never fails: ad
//! work is moved onto the UI context and every outcome, including bad
//! input, reaches the host through the listener passed to the call.

use std::sync::Arc;

use display_sdk::DisplaySdk;
use mediation_types::placement::PLACEMENT_FORMAT_HINT;
use mediation_types::{ActivityContext, AdFormat, AdLifecycleState, PlacementDescriptor};
use tracing::{debug, error, info, warn};

use crate::banner::BannerController;
use crate::context::MediationContext;
use crate::error::{AdapterError, Result};
use crate::fullscreen::{InterstitialController, RewardedController};
use crate::listener::{
    AdViewAdapterListener, InterstitialAdapterListener, NativeAdAdapterListener,
    RewardedAdapterListener,
};
use crate::native::NativeController;
use crate::params::{InitializationParameters, InitializationStatus, ResponseParameters};

pub struct EquativMediationAdapter {
    context: MediationContext,
    banner: Arc<BannerController>,
    interstitial: Arc<InterstitialController>,
    rewarded: Arc<RewardedController>,
    native: Arc<NativeController>,
}

impl EquativMediationAdapter {
    pub fn new(context: &MediationContext) -> Self {
        let sdk = Arc::clone(context.sdk());
        let ui = context.ui().clone();
        Self {
            banner: BannerController::new(Arc::clone(&sdk), ui.clone()),
            interstitial: InterstitialController::interstitial(Arc::clone(&sdk), ui.clone()),
            rewarded: RewardedController::rewarded(Arc::clone(&sdk), ui.clone()),
            native: NativeController::new(sdk, ui, Arc::clone(context.asset_preparer())),
            context: context.clone(),
        }
    }

    /// Report this mediation layer to the SDK
    ///
    /// The SDK needs no asynchronous setup, so `on_completion` is called
    /// before returning with [`InitializationStatus::DoesNotApply`].
    pub fn initialize<F>(&self, params: &InitializationParameters, on_completion: F)
    where
        F: FnOnce(InitializationStatus, Option<String>),
    {
        let config = self.context.config();
        let host_version = params
            .host_sdk_version
            .as_deref()
            .unwrap_or(&config.mediation_sdk_version);

        self.context.sdk().configuration().set_secondary_implementation_info(
            &config.mediation_name,
            host_version,
            &config.adapter_version,
        );
        info!(
            "Initialized Equativ adapter {} for {} {}",
            config.adapter_version, config.mediation_name, host_version
        );

        on_completion(InitializationStatus::DoesNotApply, None);
    }

    /// Version of the bound display SDK
    pub fn sdk_version(&self) -> String {
        self.context.sdk().configuration().library_version()
    }

    pub fn adapter_version(&self) -> &str {
        &self.context.config().adapter_version
    }

    /// Current state of a format's controller
    pub fn state(&self, format: AdFormat) -> AdLifecycleState {
        match format {
            AdFormat::Banner => self.banner.state(),
            AdFormat::Interstitial => self.interstitial.state(),
            AdFormat::Rewarded => self.rewarded.state(),
            AdFormat::Native => self.native.state(),
        }
    }

    pub fn load_ad_view_ad(
        &self,
        params: &ResponseParameters,
        activity: ActivityContext,
        listener: Arc<dyn AdViewAdapterListener>,
    ) {
        let controller = Arc::clone(&self.banner);
        self.load_with(AdFormat::Banner, params, activity, move |prepared| match prepared {
            Ok(placement) => controller.load(&placement, activity, listener),
            Err(error) => controller.reject_load(listener, error.kind()),
        });
    }

    pub fn load_interstitial_ad(
        &self,
        params: &ResponseParameters,
        activity: ActivityContext,
        listener: Arc<dyn InterstitialAdapterListener>,
    ) {
        let controller = Arc::clone(&self.interstitial);
        self.load_with(AdFormat::Interstitial, params, activity, move |prepared| match prepared {
            Ok(placement) => controller.load(&placement, activity, listener),
            Err(error) => controller.reject_load(listener, error.kind()),
        });
    }

    pub fn load_rewarded_ad(
        &self,
        params: &ResponseParameters,
        activity: ActivityContext,
        listener: Arc<dyn RewardedAdapterListener>,
    ) {
        let controller = Arc::clone(&self.rewarded);
        self.load_with(AdFormat::Rewarded, params, activity, move |prepared| match prepared {
            Ok(placement) => controller.load(&placement, activity, listener),
            Err(error) => controller.reject_load(listener, error.kind()),
        });
    }

    pub fn load_native_ad(
        &self,
        params: &ResponseParameters,
        activity: ActivityContext,
        listener: Arc<dyn NativeAdAdapterListener>,
    ) {
        let controller = Arc::clone(&self.native);
        self.load_with(AdFormat::Native, params, activity, move |prepared| match prepared {
            Ok(placement) => controller.load(&placement, activity, listener),
            Err(error) => controller.reject_load(listener, error.kind()),
        });
    }

    pub fn show_interstitial_ad(
        &self,
        _params: &ResponseParameters,
        _activity: ActivityContext,
        listener: Arc<dyn InterstitialAdapterListener>,
    ) {
        let controller = Arc::clone(&self.interstitial);
        self.dispatch(AdFormat::Interstitial, move || controller.show(listener));
    }

    pub fn show_rewarded_ad(
        &self,
        _params: &ResponseParameters,
        _activity: ActivityContext,
        listener: Arc<dyn RewardedAdapterListener>,
    ) {
        let controller = Arc::clone(&self.rewarded);
        self.dispatch(AdFormat::Rewarded, move || controller.show(listener));
    }

    /// Release every ad this adapter holds; safe to repeat
    pub fn on_destroy(&self) {
        let banner = Arc::clone(&self.banner);
        let interstitial = Arc::clone(&self.interstitial);
        let rewarded = Arc::clone(&self.rewarded);
        let native = Arc::clone(&self.native);

        debug!("Destroying Equativ adapter");
        let dispatched = self.context.ui().run_or_post(move || {
            banner.destroy();
            interstitial.destroy();
            rewarded.destroy();
            native.destroy();
        });
        if let Err(error) = dispatched {
            warn!("Dropping adapter teardown: {}", error);
        }
    }

    /// Resolve the placement and configure the SDK on the UI context, then
    /// hand the outcome to `then`
    fn load_with<F>(
        &self,
        format: AdFormat,
        params: &ResponseParameters,
        activity: ActivityContext,
        then: F,
    ) where
        F: FnOnce(Result<PlacementDescriptor>) + Send + 'static,
    {
        let raw = params.placement_id().map(str::to_string);
        let sdk = Arc::clone(self.context.sdk());
        debug!(%format, ad_unit = ?params.ad_unit_id, "Loading ad for placement {:?}", raw);

        self.dispatch(format, move || {
            then(prepare_placement(sdk.as_ref(), raw.as_deref(), activity));
        });
    }

    fn dispatch<F>(&self, format: AdFormat, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Err(error) = self.context.ui().run_or_post(task) {
            warn!(%format, "Dropping ad request: {}", error);
        }
    }
}

/// Parse the placement id and configure the SDK for its site
fn prepare_placement(
    sdk: &dyn DisplaySdk,
    raw: Option<&str>,
    activity: ActivityContext,
) -> Result<PlacementDescriptor> {
    let placement = PlacementDescriptor::parse(raw).map_err(|source| {
        error!(
            "Invalid third party placement id {:?}; expected {}: {}",
            raw, PLACEMENT_FORMAT_HINT, source
        );
        AdapterError::InvalidPlacement {
            raw: raw.map(str::to_string),
            source,
        }
    })?;

    sdk.configuration().configure(activity, placement.site_id())?;
    Ok(placement)
}
