//! Fabric Override - Resource Override Engine
//!
//! Customizes the statically defined resource templates of a Hyperledger
//! Fabric orderer with values from its IBPOrderer custom resource, before the
//! operator applies them to the cluster.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────────────────┐
//! │  IBPOrderer spec     │   │  Resource template   │
//! │  (zone, region,      │   │  (PVC, Service,      │
//! │   storage, service)  │   │   ServiceAccount)    │
//! └──────────┬───────────┘   └──────────┬───────────┘
//!            │                          │
//!            └────────────┬─────────────┘
//!                         │  + Action (Create / Update)
//!            ┌────────────┴─────────────┐
//!            │     Override facade      │
//!            │  (per-kind registry)     │
//!            ├──────────────────────────┤
//!            │  Action dispatcher       │
//!            │  Quantity validator      │
//!            │  Field mapper            │
//!            └────────────┬─────────────┘
//!                         │
//!              mutated template / Error
//! ```
//!
//! # Modules
//!
//! - [`overrides`]: Override contract, per-kind overrides, and registry
//! - [`quantity`]: Kubernetes quantity parsing and canonical rendering
//! - [`crd`]: Custom Resource Definitions
//! - [`manifest`]: Template and CR loading for the CLI
//! - [`error`]: Error types and handling

pub mod crd;
pub mod error;
pub mod manifest;
pub mod overrides;
pub mod quantity;

// Re-export commonly used types
pub use crd::{IBPOrderer, IBPOrdererSpec, OrdererStorages, ServiceSpec, StorageSpec};

pub use error::{Error, ErrorAction, Result};

pub use overrides::{
    Action, FieldSet, ManagedKind, ManagedObject, OverrideField, OverrideRegistry,
    OverrideSource, Overrides, PvcOverride, ResourceKind, ResourceOverride,
    ServiceAccountOverride, ServiceOverride, REGION_LABEL, STORAGE_RESOURCE, ZONE_LABEL,
};

pub use quantity::{Quantity, QuantityFormat};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
