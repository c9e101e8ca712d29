//! Managed Resource Kinds
//!
//! Tags and a closed sum type over the Kubernetes objects the operator
//! renders from templates.

use crate::error::{Error, Result};
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Service, ServiceAccount};
use serde::Serialize;
use std::str::FromStr;

// =============================================================================
// Resource Kind
// =============================================================================

/// Kind tag of a managed object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    PersistentVolumeClaim,
    Service,
    ServiceAccount,
}

impl ResourceKind {
    /// Kubernetes `kind` string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::PersistentVolumeClaim => "PersistentVolumeClaim",
            ResourceKind::Service => "Service",
            ResourceKind::ServiceAccount => "ServiceAccount",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PersistentVolumeClaim" => Ok(ResourceKind::PersistentVolumeClaim),
            "Service" => Ok(ResourceKind::Service),
            "ServiceAccount" => Ok(ResourceKind::ServiceAccount),
            other => Err(Error::UnregisteredKind {
                kind: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Managed Object
// =============================================================================

/// A template object of any managed kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ManagedObject {
    PersistentVolumeClaim(PersistentVolumeClaim),
    Service(Service),
    ServiceAccount(ServiceAccount),
}

impl ManagedObject {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ManagedObject::PersistentVolumeClaim(_) => ResourceKind::PersistentVolumeClaim,
            ManagedObject::Service(_) => ResourceKind::Service,
            ManagedObject::ServiceAccount(_) => ResourceKind::ServiceAccount,
        }
    }

    /// Name from the object's metadata
    pub fn name(&self) -> Option<&str> {
        let metadata = match self {
            ManagedObject::PersistentVolumeClaim(o) => &o.metadata,
            ManagedObject::Service(o) => &o.metadata,
            ManagedObject::ServiceAccount(o) => &o.metadata,
        };
        metadata.name.as_deref()
    }
}

/// A concrete object type that can be carried in a [`ManagedObject`]
pub trait ManagedKind: Sized {
    const KIND: ResourceKind;

    /// Borrow the concrete object if `object` holds this kind
    fn from_managed_mut(object: &mut ManagedObject) -> Option<&mut Self>;
}

impl ManagedKind for PersistentVolumeClaim {
    const KIND: ResourceKind = ResourceKind::PersistentVolumeClaim;

    fn from_managed_mut(object: &mut ManagedObject) -> Option<&mut Self> {
        match object {
            ManagedObject::PersistentVolumeClaim(o) => Some(o),
            _ => None,
        }
    }
}

impl ManagedKind for Service {
    const KIND: ResourceKind = ResourceKind::Service;

    fn from_managed_mut(object: &mut ManagedObject) -> Option<&mut Self> {
        match object {
            ManagedObject::Service(o) => Some(o),
            _ => None,
        }
    }
}

impl ManagedKind for ServiceAccount {
    const KIND: ResourceKind = ResourceKind::ServiceAccount;

    fn from_managed_mut(object: &mut ManagedObject) -> Option<&mut Self> {
        match object {
            ManagedObject::ServiceAccount(o) => Some(o),
            _ => None,
        }
    }
}

impl From<PersistentVolumeClaim> for ManagedObject {
    fn from(value: PersistentVolumeClaim) -> Self {
        ManagedObject::PersistentVolumeClaim(value)
    }
}

impl From<Service> for ManagedObject {
    fn from(value: Service) -> Self {
        ManagedObject::Service(value)
    }
}

impl From<ServiceAccount> for ManagedObject {
    fn from(value: ServiceAccount) -> Self {
        ManagedObject::ServiceAccount(value)
    }
}
