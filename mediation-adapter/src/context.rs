//! Process-wide collaborators shared by every adapter instance

use std::fmt;
use std::sync::Arc;

use display_sdk::DisplaySdk;
use ui_dispatch::UiContext;

use crate::config::AdapterConfig;
use crate::error::Result;
use crate::native::{AssetPreparer, PassthroughPreparer};

/// Created once per process and handed to each
/// [`EquativMediationAdapter`](crate::EquativMediationAdapter)
///
/// Holds the bound SDK, whose configuration is process-wide, the UI context
/// all ad work runs on, the adapter configuration and the native asset
/// preparer. Clones share all four.
#[derive(Clone)]
pub struct MediationContext {
    sdk: Arc<dyn DisplaySdk>,
    ui: UiContext,
    config: Arc<AdapterConfig>,
    preparer: Arc<dyn AssetPreparer>,
}

impl MediationContext {
    /// Start a dedicated UI thread as configured in `config.dispatch`
    pub fn new(sdk: Arc<dyn DisplaySdk>, config: AdapterConfig) -> Result<Self> {
        let ui = UiContext::spawn(config.dispatch.clone())?;
        Ok(Self::with_ui(sdk, ui, config))
    }

    /// Use an existing UI context, such as one pumped by the host
    pub fn with_ui(sdk: Arc<dyn DisplaySdk>, ui: UiContext, config: AdapterConfig) -> Self {
        Self {
            sdk,
            ui,
            config: Arc::new(config),
            preparer: Arc::new(PassthroughPreparer),
        }
    }

    pub fn with_asset_preparer(mut self, preparer: Arc<dyn AssetPreparer>) -> Self {
        self.preparer = preparer;
        self
    }

    pub fn sdk(&self) -> &Arc<dyn DisplaySdk> {
        &self.sdk
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn asset_preparer(&self) -> &Arc<dyn AssetPreparer> {
        &self.preparer
    }

    /// Stop the UI context; later loads and shows are dropped
    pub fn shutdown(&self) {
        self.ui.shutdown();
    }
}

impl fmt::Debug for MediationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediationContext")
            .field("ui", &self.ui)
            .field("config", &self.config)
            .finish()
    }
}
