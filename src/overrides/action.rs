//! Lifecycle actions and field eligibility
//!
//! Some fields may only be written before the object first reaches the
//! cluster (a claim's storage class is immutable), others may be adjusted on
//! every reconcile. Each override declares, per action, which fields it is
//! allowed to write.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Action
// =============================================================================

/// Lifecycle phase the override runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// The object does not exist in the cluster yet
    Create,
    /// The object exists and is being reconciled
    Update,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Update => write!(f, "update"),
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            _ => Err(Error::UnsupportedAction {
                kind: "any resource kind".into(),
                action: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Override Fields
// =============================================================================

/// A field an override may write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideField {
    /// PVC storage class name
    StorageClass,
    /// PVC storage request
    Capacity,
    /// `zone` / `region` labels
    TopologyLabels,
    /// Service type
    ServiceType,
    /// ServiceAccount image pull secrets
    ImagePullSecrets,
}

impl std::fmt::Display for OverrideField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverrideField::StorageClass => write!(f, "storageClass"),
            OverrideField::Capacity => write!(f, "capacity"),
            OverrideField::TopologyLabels => write!(f, "topologyLabels"),
            OverrideField::ServiceType => write!(f, "serviceType"),
            OverrideField::ImagePullSecrets => write!(f, "imagePullSecrets"),
        }
    }
}

/// Fields eligible for mutation under one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSet(&'static [OverrideField]);

impl FieldSet {
    /// An action that is handled but writes nothing
    pub const NONE: FieldSet = FieldSet(&[]);

    pub const fn new(fields: &'static [OverrideField]) -> Self {
        Self(fields)
    }

    /// Check if a field may be written
    pub fn contains(&self, field: OverrideField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = OverrideField> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_action_display() {
        assert_eq!(format!("{}", Action::Create), "create");
        assert_eq!(format!("{}", Action::Update), "update");
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("create".parse::<Action>().unwrap(), Action::Create);
        assert_eq!("Update".parse::<Action>().unwrap(), Action::Update);
        assert_matches!(
            "delete".parse::<Action>(),
            Err(Error::UnsupportedAction { ref action, .. }) if action == "delete"
        );
    }

    #[test]
    fn test_field_set() {
        const FIELDS: FieldSet =
            FieldSet::new(&[OverrideField::Capacity, OverrideField::TopologyLabels]);
        assert!(FIELDS.contains(OverrideField::Capacity));
        assert!(!FIELDS.contains(OverrideField::StorageClass));
        assert_eq!(FIELDS.iter().count(), 2);
        assert!(FieldSet::NONE.is_empty());
    }
}
