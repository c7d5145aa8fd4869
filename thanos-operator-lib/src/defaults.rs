use once_cell::sync::Lazy;

use crate::base::{BaseObject, CommonFlags, ImageSpec, PullPolicy};
use crate::thanos::Query;


pub const THANOS_IMAGE_REPOSITORY: &str = "quay.io/thanos/thanos";
pub const THANOS_IMAGE_TAG: &str = "v0.9.0";
pub const DEFAULT_PULL_POLICY: PullPolicy = PullPolicy::IfNotPresent;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_HTTP_ADDRESS: &str = "0.0.0.0:10902";
pub const DEFAULT_GRPC_ADDRESS: &str = "0.0.0.0:10901";

/// Query configuration the reconciler falls back to when the user omits fields.
pub static DEFAULT_QUERY: Lazy<Query> = Lazy::new(|| Query {
    base: BaseObject {
        image: Some(ImageSpec::new(THANOS_IMAGE_REPOSITORY, THANOS_IMAGE_TAG, DEFAULT_PULL_POLICY)),
    },
    flags: CommonFlags {
        log_level: Some(String::from(DEFAULT_LOG_LEVEL)),
        http_address: String::from(DEFAULT_HTTP_ADDRESS),
        grpc_address: String::from(DEFAULT_GRPC_ADDRESS),
        ..CommonFlags::default()
    },
    ..Query::default()
});

// Owned copy of the default query
pub fn default_query() -> Query {
    DEFAULT_QUERY.clone()
}
