//! Service Override
//!
//! Exposes the orderer with the service type requested on the CR.

use super::fields;
use super::{Action, FieldSet, OverrideField, OverrideSource, ResourceOverride};
use crate::error::Result;
use k8s_openapi::api::core::v1::Service;

const FIELDS: FieldSet = FieldSet::new(&[OverrideField::ServiceType]);

/// Override for the orderer's Service
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceOverride;

impl<S: OverrideSource + ?Sized> ResourceOverride<S> for ServiceOverride {
    type Object = Service;

    fn eligible_fields(&self, action: Action) -> Option<FieldSet> {
        match action {
            Action::Create | Action::Update => Some(FIELDS),
        }
    }

    fn apply(&self, spec: &S, service: &mut Service, action: Action) -> Result<()> {
        let eligible = <Self as ResourceOverride<S>>::resolve_fields(self, action)?;

        if eligible.contains(OverrideField::ServiceType) {
            if let Some(requested) = spec.service() {
                fields::set_service_type(service, &requested.r#type);
            }
        }

        Ok(())
    }
}
