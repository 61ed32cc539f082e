//! # Equativ mediation adapter
//!
//! Lets the AppLovin MAX mediation host load and show Equativ display ads
//! (banner, interstitial, rewarded, native) without knowing which SDK
//! version is bound underneath.
//!
//! ```text
//! host ──load/show/destroy──▶ EquativMediationAdapter
//!                                  │ parse placement, configure SDK
//!                                  ▼
//!        Banner / Interstitial / Rewarded / Native controllers   (UI context)
//!                                  │ capability traits
//!                                  ▼
//!                        display SDK binding (7.x or 8.x)
//!                                  │ SdkEvent, any thread
//!                                  ▼
//!               post ▶ UI context ▶ translate ▶ controller ▶ host listener
//! ```
//!
//! Each controller owns at most one SDK handle. Starting a load tears the
//! previous handle down first, and callbacks from a handle that is no longer
//! live are dropped.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use display_sdk::testing::FakeSdk;
//! use mediation_adapter::{AdapterConfig, EquativMediationAdapter, MediationContext};
//! use ui_dispatch::{DispatchConfig, UiContext};
//!
//! let (ui, mut pump) = UiContext::manual(DispatchConfig::default())?;
//! let context = MediationContext::with_ui(Arc::new(FakeSdk::new()), ui, AdapterConfig::default());
//! let adapter = EquativMediationAdapter::new(&context);
//!
//! adapter.initialize(&Default::default(), |status, _| println!("{:?}", status));
//! adapter.on_destroy();
//! pump.run_pending();
//! # Ok::<(), ui_dispatch::DispatchError>(())
//! ```

pub mod adapter;
pub mod banner;
pub mod config;
pub mod context;
pub mod error;
pub mod fullscreen;
mod lifecycle;
pub mod listener;
pub mod logging;
pub mod native;
pub mod params;
pub mod translator;

pub use adapter::EquativMediationAdapter;
pub use banner::BannerController;
pub use config::{AdapterConfig, ADAPTER_VERSION};
pub use context::MediationContext;
pub use error::{AdapterError, Result};
pub use fullscreen::{FullscreenController, InterstitialController, RewardedController};
pub use lifecycle::Generation;
pub use listener::{
    AdViewAdapterListener, InterstitialAdapterListener, NativeAdAdapterListener,
    RewardedAdapterListener,
};
pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};
pub use native::{
    AssetPreparer, MediatedNativeAd, NativeController, NativeMedia, PassthroughPreparer,
    PreparedImage,
};
pub use params::{InitializationParameters, InitializationStatus, ResponseParameters};

#[cfg(feature = "test-support")]
pub use display_sdk::testing;
