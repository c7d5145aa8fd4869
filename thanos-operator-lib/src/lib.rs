//! Kubernetes custom resource describing the deployment topology of a Thanos
//! metrics federation cluster: query layer, store gateway, ruler and the
//! storage endpoints they federate with.
//!
//! The types here carry no behaviour. A reconciler reads them through the
//! [`SCHEME`] registry and falls back to [`DEFAULT_QUERY`] when the user
//! leaves the query layer unspecified.

pub mod base;
pub mod defaults;
pub mod error;
pub mod scheme;
pub mod secret;
pub mod thanos;

pub use base::{BaseObject, CommonFlags, ImageSpec, PullPolicy};
pub use defaults::{default_query, DEFAULT_QUERY};
pub use error::{Error, Result};
pub use scheme::{Scheme, SCHEME};
pub use secret::{KubernetesSecret, Secret, ValueFrom};
pub use thanos::{
    add_to_scheme, thanos_crd, Local, ManagedTls, Query, Remote, Rule, StorageEndpoints,
    StoreGateway, Thanos, ThanosDiscovery, ThanosList, ThanosSpec, ThanosStatus, TimeRange, Tls,
};
