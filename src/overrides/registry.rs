//! Override Registry
//!
//! Maps a resource kind tag to its transformation so callers holding a
//! [`ManagedObject`] of runtime-determined kind can dispatch without a
//! monolithic match. New kinds are added by registering an override.

use super::{
    Action, ManagedKind, ManagedObject, OverrideSource, PvcOverride, ResourceKind,
    ResourceOverride, ServiceAccountOverride, ServiceOverride,
};
use crate::error::{Error, Result};
use std::collections::BTreeMap;

type OverrideFn<S> = Box<dyn Fn(&S, &mut ManagedObject, Action) -> Result<()> + Send + Sync>;

/// Kind-indexed set of overrides sharing one CR spec type
pub struct OverrideRegistry<S: ?Sized> {
    overrides: BTreeMap<ResourceKind, OverrideFn<S>>,
}

impl<S: OverrideSource + ?Sized + 'static> OverrideRegistry<S> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    /// Create a registry with every built-in override
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register(PvcOverride)
            .register(ServiceOverride)
            .register(ServiceAccountOverride);
        registry
    }

    /// Register an override, replacing any previous one for the same kind
    pub fn register<O>(&mut self, handler: O) -> &mut Self
    where
        O: ResourceOverride<S> + 'static,
    {
        let kind = handler.kind();
        self.overrides.insert(
            kind,
            Box::new(move |spec: &S, object: &mut ManagedObject, action: Action| {
                let found = object.kind();
                let target = O::Object::from_managed_mut(object).ok_or_else(|| {
                    Error::ObjectKindMismatch {
                        expected: kind.to_string(),
                        found: found.to_string(),
                    }
                })?;
                handler.apply(spec, target, action)
            }),
        );
        self
    }

    /// Check if a kind has an override
    pub fn is_registered(&self, kind: ResourceKind) -> bool {
        self.overrides.contains_key(&kind)
    }

    /// Registered kinds in a stable order
    pub fn kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.overrides.keys().copied()
    }

    /// Customize `object` with the override registered for its kind
    pub fn apply(&self, spec: &S, object: &mut ManagedObject, action: Action) -> Result<()> {
        let kind = object.kind();
        let handler = self
            .overrides
            .get(&kind)
            .ok_or_else(|| Error::UnregisteredKind {
                kind: kind.to_string(),
            })?;
        handler(spec, object, action)
    }
}

impl<S: OverrideSource + ?Sized + 'static> Default for OverrideRegistry<S> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<S: ?Sized> std::fmt::Debug for OverrideRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverrideRegistry")
            .field("kinds", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{IBPOrdererSpec, OrdererStorages, StorageSpec};
    use crate::overrides::{FieldSet, STORAGE_RESOURCE, ZONE_LABEL};
    use assert_matches::assert_matches;
    use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Service, ServiceAccount};
    use k8s_openapi::apimachinery::pkg::api::resource::Quantity as K8sQuantity;

    fn spec() -> IBPOrdererSpec {
        IBPOrdererSpec {
            zone: "zone1".into(),
            storage: Some(OrdererStorages {
                orderer: Some(StorageSpec {
                    size: "10Gi".into(),
                    class: "fast".into(),
                }),
            }),
            ..Default::default()
        }
    }

    /// Service override that refuses updates
    struct CreateOnlyService;

    impl ResourceOverride<IBPOrdererSpec> for CreateOnlyService {
        type Object = Service;

        fn eligible_fields(&self, action: Action) -> Option<FieldSet> {
            match action {
                Action::Create => Some(FieldSet::NONE),
                Action::Update => None,
            }
        }

        fn apply(&self, _spec: &IBPOrdererSpec, _object: &mut Service, action: Action) -> Result<()> {
            self.resolve_fields(action).map(|_| ())
        }
    }

    #[test]
    fn test_defaults_cover_all_kinds() {
        let registry = OverrideRegistry::<IBPOrdererSpec>::with_defaults();
        assert_eq!(
            registry.kinds().collect::<Vec<_>>(),
            vec![
                ResourceKind::PersistentVolumeClaim,
                ResourceKind::Service,
                ResourceKind::ServiceAccount,
            ]
        );
    }

    #[test]
    fn test_dispatches_by_kind() {
        let registry = OverrideRegistry::with_defaults();
        let mut object: ManagedObject = PersistentVolumeClaim::default().into();

        registry.apply(&spec(), &mut object, Action::Create).unwrap();

        let ManagedObject::PersistentVolumeClaim(pvc) = object else {
            panic!("kind changed");
        };
        let pvc_spec = pvc.spec.unwrap();
        assert_eq!(pvc_spec.storage_class_name.as_deref(), Some("fast"));
        assert_eq!(
            pvc_spec.resources.unwrap().requests.unwrap()[STORAGE_RESOURCE],
            K8sQuantity("10Gi".into())
        );
        assert_eq!(pvc.metadata.labels.unwrap()[ZONE_LABEL], "zone1");
    }

    #[test]
    fn test_unregistered_kind() {
        let mut registry = OverrideRegistry::<IBPOrdererSpec>::new();
        registry.register(PvcOverride);
        assert!(!registry.is_registered(ResourceKind::ServiceAccount));

        let mut object: ManagedObject = ServiceAccount::default().into();
        assert_matches!(
            registry.apply(&spec(), &mut object, Action::Create),
            Err(Error::UnregisteredKind { ref kind }) if kind == "ServiceAccount"
        );
    }

    #[test]
    fn test_register_replaces_and_rejects_unsupported_action() {
        let mut registry = OverrideRegistry::with_defaults();
        registry.register(CreateOnlyService);

        let mut object: ManagedObject = Service::default().into();
        registry.apply(&spec(), &mut object, Action::Create).unwrap();

        let err = registry
            .apply(&spec(), &mut object, Action::Update)
            .unwrap_err();
        assert_matches!(
            err,
            Error::UnsupportedAction { ref kind, ref action } if kind == "Service" && action == "update"
        );
        assert!(err.is_internal());
    }

    #[test]
    fn test_errors_propagate() {
        let registry = OverrideRegistry::with_defaults();
        let mut object: ManagedObject = PersistentVolumeClaim::default().into();
        let before = object.clone();

        assert_matches!(
            registry.apply(&IBPOrdererSpec::default(), &mut object, Action::Create),
            Err(Error::MissingRequiredField { .. })
        );
        assert_eq!(object, before);
    }
}
