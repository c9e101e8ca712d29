//! Field Mapper
//!
//! Copies CR values onto Kubernetes objects. Every function here is
//! idempotent: applying it twice with the same input leaves the object as
//! applying it once did.

use crate::quantity::Quantity;
use k8s_openapi::api::core::v1::{
    LocalObjectReference, PersistentVolumeClaim, Service, ServiceAccount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// Label carrying the zone hint, consumed by scheduling and affinity rules
pub const ZONE_LABEL: &str = "zone";

/// Label carrying the region hint
pub const REGION_LABEL: &str = "region";

/// Resource name of a claim's capacity request
pub const STORAGE_RESOURCE: &str = "storage";

// =============================================================================
// PersistentVolumeClaim
// =============================================================================

/// Set the claim's storage class, passed through verbatim
pub fn set_storage_class(pvc: &mut PersistentVolumeClaim, class: &str) {
    pvc.spec.get_or_insert_with(Default::default).storage_class_name = Some(class.to_string());
}

/// Replace the claim's request map with a single storage request
pub fn set_storage_request(pvc: &mut PersistentVolumeClaim, capacity: &Quantity) {
    let resources = pvc
        .spec
        .get_or_insert_with(Default::default)
        .resources
        .get_or_insert_with(Default::default);

    resources.requests = Some(BTreeMap::from([(
        STORAGE_RESOURCE.to_string(),
        capacity.to_k8s(),
    )]));
}

// =============================================================================
// Metadata
// =============================================================================

/// Set `zone` and `region` labels for non-empty values
///
/// Empty values leave an existing label in place rather than clearing it.
pub fn set_topology_labels(metadata: &mut ObjectMeta, zone: &str, region: &str) {
    if zone.is_empty() && region.is_empty() {
        return;
    }

    let labels = metadata.labels.get_or_insert_with(BTreeMap::new);
    if !zone.is_empty() {
        labels.insert(ZONE_LABEL.to_string(), zone.to_string());
    }
    if !region.is_empty() {
        labels.insert(REGION_LABEL.to_string(), region.to_string());
    }
}

// =============================================================================
// Service
// =============================================================================

/// Set the service type if one is given
pub fn set_service_type(service: &mut Service, service_type: &str) {
    if service_type.is_empty() {
        return;
    }
    service.spec.get_or_insert_with(Default::default).type_ = Some(service_type.to_string());
}

// =============================================================================
// ServiceAccount
// =============================================================================

/// Reference each pull secret that is not referenced yet
pub fn add_image_pull_secrets(service_account: &mut ServiceAccount, secrets: &[String]) {
    if secrets.is_empty() {
        return;
    }

    let refs = service_account
        .image_pull_secrets
        .get_or_insert_with(Vec::new);

    for secret in secrets {
        let present = refs.iter().any(|r| r.name.as_deref() == Some(secret.as_str()));
        if !present {
            refs.push(LocalObjectReference {
                name: Some(secret.clone()),
            });
        }
    }
}
