//! ServiceAccount Override
//!
//! Lets the orderer pods pull images from the registries named on the CR.

use super::fields;
use super::{Action, FieldSet, OverrideField, OverrideSource, ResourceOverride};
use crate::error::Result;
use k8s_openapi::api::core::v1::ServiceAccount;

const FIELDS: FieldSet = FieldSet::new(&[OverrideField::ImagePullSecrets]);

/// Override for the orderer's ServiceAccount
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceAccountOverride;

impl<S: OverrideSource + ?Sized> ResourceOverride<S> for ServiceAccountOverride {
    type Object = ServiceAccount;

    fn eligible_fields(&self, action: Action) -> Option<FieldSet> {
        match action {
            Action::Create | Action::Update => Some(FIELDS),
        }
    }

    fn apply(&self, spec: &S, service_account: &mut ServiceAccount, action: Action) -> Result<()> {
        let eligible = <Self as ResourceOverride<S>>::resolve_fields(self, action)?;

        if eligible.contains(OverrideField::ImagePullSecrets) {
            fields::add_image_pull_secrets(service_account, spec.image_pull_secrets());
        }

        Ok(())
    }
}
