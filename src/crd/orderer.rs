//! IBPOrderer CRD
//!
//! The user-authored description of a Fabric ordering node. Only the fields
//! the override engine consumes are modelled here.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::overrides::OverrideSource;

// =============================================================================
// IBPOrderer CRD
// =============================================================================

/// IBPOrderer describes a Hyperledger Fabric ordering service node.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "ibp.com",
    version = "v1beta1",
    kind = "IBPOrderer",
    plural = "ibporderers",
    shortname = "orderer",
    printcolumn = r#"{"name": "Zone", "type": "string", "jsonPath": ".spec.zone"}"#,
    printcolumn = r#"{"name": "Region", "type": "string", "jsonPath": ".spec.region"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct IBPOrdererSpec {
    /// Zone the orderer should be scheduled into
    #[serde(default)]
    pub zone: String,

    /// Region the orderer should be scheduled into
    #[serde(default)]
    pub region: String,

    /// Persistent storage settings
    #[serde(default)]
    pub storage: Option<OrdererStorages>,

    /// Service exposure settings
    #[serde(default)]
    pub service: Option<ServiceSpec>,

    /// Secrets used to pull the orderer images
    #[serde(default)]
    pub image_pull_secrets: Vec<String>,
}

// =============================================================================
// Sub-Types
// =============================================================================

/// Storage for each orderer component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdererStorages {
    /// Ledger volume of the orderer
    #[serde(default)]
    pub orderer: Option<StorageSpec>,
}

/// Size and class of a persistent volume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    /// Requested capacity (e.g., "100Gi")
    #[serde(default)]
    pub size: String,

    /// Storage class name, "manual" for statically provisioned volumes
    #[serde(default)]
    pub class: String,
}

/// Service exposure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    /// Kubernetes service type (ClusterIP, NodePort, LoadBalancer)
    #[serde(default)]
    pub r#type: String,
}

// =============================================================================
// Implementations
// =============================================================================

impl IBPOrderer {
    /// Get the name of this orderer
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }
}

impl OverrideSource for IBPOrdererSpec {
    fn zone(&self) -> &str {
        &self.zone
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn storage(&self) -> Result<&StorageSpec> {
        self.storage
            .as_ref()
            .and_then(|s| s.orderer.as_ref())
            .ok_or_else(|| Error::MissingRequiredField {
                field: "spec.storage.orderer".into(),
            })
    }

    fn service(&self) -> Option<&ServiceSpec> {
        self.service.as_ref()
    }

    fn image_pull_secrets(&self) -> &[String] {
        &self.image_pull_secrets
    }
}
