//! PersistentVolumeClaim Override
//!
//! Sizes the orderer's ledger claim, picks its storage class, and labels it
//! with the topology hints from the CR.

use super::fields;
use super::{Action, FieldSet, OverrideField, OverrideSource, ResourceOverride};
use crate::error::Result;
use crate::quantity::Quantity;
use k8s_openapi::api::core::v1::PersistentVolumeClaim;

/// Storage class is immutable once the claim exists
const CREATE_FIELDS: FieldSet = FieldSet::new(&[
    OverrideField::StorageClass,
    OverrideField::Capacity,
    OverrideField::TopologyLabels,
]);

const UPDATE_FIELDS: FieldSet =
    FieldSet::new(&[OverrideField::Capacity, OverrideField::TopologyLabels]);

/// Override for the orderer's PersistentVolumeClaim
#[derive(Debug, Clone, Copy, Default)]
pub struct PvcOverride;

impl<S: OverrideSource + ?Sized> ResourceOverride<S> for PvcOverride {
    type Object = PersistentVolumeClaim;

    fn eligible_fields(&self, action: Action) -> Option<FieldSet> {
        match action {
            Action::Create => Some(CREATE_FIELDS),
            Action::Update => Some(UPDATE_FIELDS),
        }
    }

    fn apply(&self, spec: &S, pvc: &mut PersistentVolumeClaim, action: Action) -> Result<()> {
        let eligible = <Self as ResourceOverride<S>>::resolve_fields(self, action)?;

        // Validate everything before the first write
        let storage = spec.storage()?;
        let capacity = Quantity::parse(&storage.size)?;

        if eligible.contains(OverrideField::StorageClass) {
            fields::set_storage_class(pvc, &storage.class);
        }
        if eligible.contains(OverrideField::Capacity) {
            fields::set_storage_request(pvc, &capacity);
        }
        if eligible.contains(OverrideField::TopologyLabels) {
            fields::set_topology_labels(&mut pvc.metadata, spec.zone(), spec.region());
        }

        Ok(())
    }
}
