//! Parameters the mediation host passes into the adapter

use serde::{Deserialize, Serialize};

/// Server-side parameters of one ad response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseParameters {
    /// Ad unit the host is filling, for diagnostics
    pub ad_unit_id: Option<String>,

    /// Opaque `<siteId>/<pageId>/<formatId>[/<targeting>]` placement string
    pub third_party_ad_placement_id: Option<String>,
}

impl ResponseParameters {
    pub fn new(placement_id: impl Into<String>) -> Self {
        Self {
            ad_unit_id: None,
            third_party_ad_placement_id: Some(placement_id.into()),
        }
    }

    pub fn with_ad_unit_id(mut self, ad_unit_id: impl Into<String>) -> Self {
        self.ad_unit_id = Some(ad_unit_id.into());
        self
    }

    pub fn placement_id(&self) -> Option<&str> {
        self.third_party_ad_placement_id.as_deref()
    }
}

/// Parameters of the one-time adapter initialization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializationParameters {
    /// Version of the host mediation SDK; overrides the configured value
    pub host_sdk_version: Option<String>,
}

/// Outcome reported to the host's initialization callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitializationStatus {
    NotInitialized,
    Initializing,
    InitializedSuccess,
    InitializedFailure,
    InitializedUnknown,
    /// The network needs no asynchronous initialization
    DoesNotApply,
}
