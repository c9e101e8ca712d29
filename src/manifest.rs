//! Manifest Loading
//!
//! Decodes resource templates and IBPOrderer documents from YAML or JSON and
//! encodes overridden objects back. This sits in front of the override
//! engine, which only ever sees typed values.

use crate::crd::IBPOrderer;
use crate::error::{Error, Result};
use crate::overrides::{ManagedObject, ResourceKind};
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

const ORDERER_KIND: &str = "IBPOrderer";

/// Decode a template document into the managed object its `kind` names
pub fn load_object(text: &str) -> Result<ManagedObject> {
    let value: Value = serde_yaml::from_str(text)?;
    let kind = document_kind(&value)?;

    let kind: ResourceKind = kind
        .parse()
        .map_err(|_| Error::Manifest(format!("unsupported template kind: {}", kind)))?;

    let object = match kind {
        ResourceKind::PersistentVolumeClaim => {
            ManagedObject::PersistentVolumeClaim(serde_yaml::from_value(value)?)
        }
        ResourceKind::Service => ManagedObject::Service(serde_yaml::from_value(value)?),
        ResourceKind::ServiceAccount => {
            ManagedObject::ServiceAccount(serde_yaml::from_value(value)?)
        }
    };

    debug!(kind = %kind, name = object.name().unwrap_or_default(), "Loaded template");
    Ok(object)
}

/// Decode an IBPOrderer document
pub fn load_instance(text: &str) -> Result<IBPOrderer> {
    let value: Value = serde_yaml::from_str(text)?;
    let kind = document_kind(&value)?;
    if kind != ORDERER_KIND {
        return Err(Error::Manifest(format!(
            "expected kind {}, found {}",
            ORDERER_KIND, kind
        )));
    }

    let instance: IBPOrderer = serde_yaml::from_value(value)?;
    debug!(name = instance.name(), "Loaded instance");
    Ok(instance)
}

/// Read and decode a template file
pub fn load_object_file(path: impl AsRef<Path>) -> Result<ManagedObject> {
    let text = std::fs::read_to_string(path.as_ref())?;
    load_object(&text)
}

/// Read and decode an IBPOrderer file
pub fn load_instance_file(path: impl AsRef<Path>) -> Result<IBPOrderer> {
    let text = std::fs::read_to_string(path.as_ref())?;
    load_instance(&text)
}

/// Encode an object as YAML
pub fn to_yaml(object: &ManagedObject) -> Result<String> {
    Ok(serde_yaml::to_string(object)?)
}

/// Encode an object as pretty-printed JSON
pub fn to_json(object: &ManagedObject) -> Result<String> {
    Ok(serde_json::to_string_pretty(object)?)
}

fn document_kind(value: &Value) -> Result<&str> {
    value
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Manifest("document has no kind".into()))
}
