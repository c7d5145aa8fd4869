//! Registry of the resource types this crate can encode and decode.
//!
//! The process-wide [`SCHEME`] is built on first use with every resource of
//! this crate registered, together with its list kind.

use std::collections::BTreeMap;

use kube::core::{ApiResource, GroupVersionKind, ObjectList};
use kube::Resource;
use log::{debug, warn};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
pub use serde_yaml::Value;

use crate::error::{Error, Result};


// registry singleton, populated once at first access
pub static SCHEME: Lazy<Scheme> = Lazy::new(|| {
    let mut scheme = Scheme::new();
    crate::thanos::add_to_scheme(&mut scheme);
    scheme
});


#[derive(Clone, Debug)]
pub struct Registration {
    pub resource: ApiResource,
    pub list: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Scheme {
    // keyed by (apiVersion, kind)
    types: BTreeMap<(String, String), Registration>,
}

impl Scheme {

    pub fn new() -> Scheme {
        Scheme { types: BTreeMap::new() }
    }

    /// Register a resource type and its `<Kind>List` counterpart.
    pub fn register<K: Resource<DynamicType = ()>>(&mut self) {
        let resource = ApiResource::erase::<K>(&());
        let list = ApiResource {
            kind: format!("{}List", resource.kind),
            ..resource.clone()
        };
        self.insert(resource, false);
        self.insert(list, true);
    }

    fn insert(&mut self, resource: ApiResource, list: bool) {
        let key = (resource.api_version.clone(), resource.kind.clone());
        debug!("Registering kind {} of {}", key.1, key.0);
        if self.types.insert(key.clone(), Registration { resource, list }).is_some() {
            warn!("Kind {} of {} registered twice, keeping the latest", key.1, key.0);
        }
    }

    pub fn recognizes(&self, gvk: &GroupVersionKind) -> bool {
        self.resource_for(gvk).is_some()
    }

    pub fn resource_for(&self, gvk: &GroupVersionKind) -> Option<&Registration> {
        self.types.get(&(api_version(&gvk.group, &gvk.version), gvk.kind.clone()))
    }

    // All registered kinds, ordered by apiVersion then kind
    pub fn kinds(&self) -> Vec<GroupVersionKind> {
        self.types.values()
            .map(|r| GroupVersionKind::gvk(&r.resource.group, &r.resource.version, &r.resource.kind))
            .collect()
    }

    /// Decode a single resource of type `K` out of a parsed document.
    pub fn decode<K>(&self, mut document: Value) -> Result<K>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned,
    {
        self.expect_kind(&document, &K::api_version(&()), &K::kind(&()))?;
        fill_missing_spec(&mut document);
        Ok(serde_yaml::from_value(document)?)
    }

    /// Decode a `<Kind>List` of `K` out of a parsed document.
    pub fn decode_list<K>(&self, mut document: Value) -> Result<ObjectList<K>>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned + Clone,
    {
        let list_kind = format!("{}List", K::kind(&()));
        self.expect_kind(&document, &K::api_version(&()), &list_kind)?;
        if let Some(Value::Sequence(items)) = document.get_mut("items") {
            for item in items {
                fill_missing_spec(item);
            }
        }
        Ok(serde_yaml::from_value(document)?)
    }

    /// Encode a registered resource as a YAML document.
    pub fn encode<K>(&self, object: &K) -> Result<String>
    where
        K: Resource<DynamicType = ()> + Serialize,
    {
        let api_version = K::api_version(&()).to_string();
        let kind = K::kind(&()).to_string();
        if !self.types.contains_key(&(api_version.clone(), kind.clone())) {
            return Err(Error::UnregisteredKind { api_version, kind });
        }
        to_yaml(object)
    }

    fn expect_kind(&self, document: &Value, api_version: &str, kind: &str) -> Result<()> {
        let gvk = type_meta(document)?;
        if !self.recognizes(&gvk) {
            return Err(Error::UnregisteredKind {
                api_version: self::api_version(&gvk.group, &gvk.version),
                kind: gvk.kind,
            });
        }
        let found_api_version = self::api_version(&gvk.group, &gvk.version);
        if found_api_version != api_version || gvk.kind != kind {
            return Err(Error::KindMismatch {
                expected: format!("{} {}", api_version, kind),
                found: format!("{} {}", found_api_version, gvk.kind),
            });
        }
        Ok(())
    }
}


fn api_version(group: &str, version: &str) -> String {
    if group.is_empty() {
        version.to_string()
    } else {
        format!("{}/{}", group, version)
    }
}

// a resource without spec decodes with an empty one
fn fill_missing_spec(document: &mut Value) {
    if let Value::Mapping(mapping) = document {
        if !mapping.contains_key("spec") {
            mapping.insert(Value::from("spec"), Value::Mapping(Mapping::new()));
        }
    }
}

/// Read the group, version and kind a document declares.
pub fn type_meta(document: &Value) -> Result<GroupVersionKind> {
    let api_version = document.get("apiVersion").and_then(Value::as_str);
    let kind = document.get("kind").and_then(Value::as_str);
    match (api_version, kind) {
        (Some(api_version), Some(kind)) if !api_version.is_empty() && !kind.is_empty() => {
            let (group, version) = api_version.split_once('/').unwrap_or(("", api_version));
            Ok(GroupVersionKind::gvk(group, version, kind))
        },
        _ => Err(Error::MissingTypeMeta)
    }
}

/// Split a (possibly multi-document) YAML or JSON input into documents,
/// skipping empty ones.
pub fn documents(input: &str) -> Result<Vec<Value>> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(input) {
        let value = Value::deserialize(document)?;
        if !value.is_null() {
            documents.push(value);
        }
    }
    Ok(documents)
}

pub fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

pub fn from_yaml<T: DeserializeOwned>(input: &str) -> Result<T> {
    Ok(serde_yaml::from_str(input)?)
}
