//! Resource Overrides
//!
//! Customizes statically defined resource templates with values from an
//! IBPOrderer spec before the operator applies them to the cluster.
//!
//! Every managed kind follows one contract: `apply(spec, &mut object, action)`
//! mutates the object in place or returns a typed error. Overrides never talk
//! to the cluster, never log, and hold no state between calls.
//!
//! - [`Overrides`]: typed entry point, one method per managed kind
//! - [`OverrideRegistry`]: kind tag → transformation, for objects whose kind
//!   is only known at runtime
//! - [`fields`]: the individual field writers shared by all kinds

pub mod action;
pub mod fields;
pub mod object;
pub mod pvc;
pub mod registry;
pub mod service;
pub mod service_account;

pub use action::*;
pub use fields::{REGION_LABEL, STORAGE_RESOURCE, ZONE_LABEL};
pub use object::*;
pub use pvc::PvcOverride;
pub use registry::OverrideRegistry;
pub use service::ServiceOverride;
pub use service_account::ServiceAccountOverride;

use crate::crd::{ServiceSpec, StorageSpec};
use crate::error::{Error, Result};
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Service, ServiceAccount};

// =============================================================================
// Ports
// =============================================================================

/// CR values an override reads
///
/// Implemented by each CR spec whose components share these overrides.
pub trait OverrideSource {
    /// Zone hint, empty if unspecified
    fn zone(&self) -> &str;

    /// Region hint, empty if unspecified
    fn region(&self) -> &str;

    /// Storage backing the component's claim
    fn storage(&self) -> Result<&StorageSpec>;

    fn service(&self) -> Option<&ServiceSpec> {
        None
    }

    fn image_pull_secrets(&self) -> &[String] {
        &[]
    }
}

/// Override for one managed resource kind
pub trait ResourceOverride<S: ?Sized>: Send + Sync {
    /// Object type this override mutates
    type Object: ManagedKind;

    /// Fields this kind may write under `action`, `None` if the action is not
    /// handled at all
    fn eligible_fields(&self, action: Action) -> Option<FieldSet>;

    /// Customize `object` in place
    fn apply(&self, spec: &S, object: &mut Self::Object, action: Action) -> Result<()>;

    fn kind(&self) -> ResourceKind {
        <Self::Object as ManagedKind>::KIND
    }

    /// Eligible fields, or `UnsupportedAction` if the kind does not handle
    /// `action`
    fn resolve_fields(&self, action: Action) -> Result<FieldSet> {
        <Self as ResourceOverride<S>>::eligible_fields(self, action).ok_or_else(|| {
            Error::UnsupportedAction {
                kind: <Self as ResourceOverride<S>>::kind(self).to_string(),
                action: action.to_string(),
            }
        })
    }
}

// =============================================================================
// Facade
// =============================================================================

/// Typed overrides for every kind the orderer manages
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides;

impl Overrides {
    pub fn new() -> Self {
        Self
    }

    /// Customize the orderer's ledger claim
    pub fn pvc<S: OverrideSource + ?Sized>(
        &self,
        spec: &S,
        pvc: &mut PersistentVolumeClaim,
        action: Action,
    ) -> Result<()> {
        PvcOverride.apply(spec, pvc, action)
    }

    /// Customize the orderer's service
    pub fn service<S: OverrideSource + ?Sized>(
        &self,
        spec: &S,
        service: &mut Service,
        action: Action,
    ) -> Result<()> {
        ServiceOverride.apply(spec, service, action)
    }

    /// Customize the orderer's service account
    pub fn service_account<S: OverrideSource + ?Sized>(
        &self,
        spec: &S,
        service_account: &mut ServiceAccount,
        action: Action,
    ) -> Result<()> {
        ServiceAccountOverride.apply(spec, service_account, action)
    }
}
