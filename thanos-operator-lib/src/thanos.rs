use std::collections::BTreeMap;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::core::ObjectList;
use kube::{CustomResource, CustomResourceExt};
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::base::{BaseObject, CommonFlags};
use crate::scheme::Scheme;
use crate::secret::Secret;


/// Desired deployment topology of a Thanos cluster. Every component is
/// optional; a present component is deployed by the reconciler.
#[derive(CustomResource, Deserialize, Serialize, Clone, PartialEq, Debug, Default, JsonSchema)]
#[kube(
    group = "monitoring.banzaicloud.io",
    version = "v1alpha1",
    kind = "Thanos",
    plural = "thanos",
    category = "thanos",
    status = "ThanosStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ThanosSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<Remote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thanos_discovery: Option<ThanosDiscovery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_gateway: Option<StoreGateway>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
    /// Name of the object store configuration the components read blocks from.
    #[serde(rename = "object_store", default, skip_serializing_if = "Option::is_none")]
    pub object_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
}

/// Observed state of a Thanos cluster.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
pub struct ThanosStatus {}

pub type ThanosList = ObjectList<Thanos>;

impl ThanosSpec {

    // Names of the declared components, in a fixed order
    pub fn components(&self) -> Vec<&'static str> {
        let mut components = Vec::new();
        if self.query.is_some() {
            components.push("query");
        }
        if self.store_gateway.is_some() {
            components.push("storeGateway");
        }
        if self.rule.is_some() {
            components.push("rule");
        }
        if self.remote.is_some() {
            components.push("remote");
        }
        if self.local.is_some() {
            components.push("local");
        }
        if self.thanos_discovery.is_some() {
            components.push("thanosDiscovery");
        }
        if self.object_store.is_some() {
            components.push("objectStore");
        }
        components
    }
}


/// Thanos Query: the global query layer fanning out to store APIs.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(flatten)]
    pub base: BaseObject,
    #[serde(flatten)]
    pub flags: CommonFlags,
    /// Prefix for API and UI endpoints. This allows thanos UI to be served on a sub-path.
    /// This option is analogous to --web.route-prefix of Prometheus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_route_prefix: Option<String>,
    /// Static prefix for all HTML links and redirect URLs in the UI query web interface.
    /// Actual endpoints are still served on / or the web.route-prefix. This allows thanos UI
    /// to be served behind a reverse proxy that strips a URL sub-path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_external_prefix: Option<String>,
    /// Name of HTTP request header used for dynamic prefixing of UI links and redirects.
    /// Ignored if web.external-prefix is set. Enable it only if a reverse proxy in front of
    /// thanos is resetting the header, e.g. X-Forwarded-Prefix behind Traefik with
    /// PathPrefixStrip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_prefix_header: Option<String>,
    /// Maximum time to process query by query node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_timeout: Option<String>,
    /// Maximum number of queries processed concurrently by query node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_max_concurrent: Option<i32>,
    /// Labels to treat as a replica indicator along which data is deduplicated. Queries
    /// without deduplication remain possible with the 'dedup=false' parameter.
    #[serde(rename = "queryReplicaLabel", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_replica_labels: BTreeMap<String, String>,
    /// Query selector labels that will be exposed in info endpoint.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selector_labels: BTreeMap<String, String>,
    /// Addresses of statically configured store API servers. The scheme may be prefixed
    /// with 'dns+' or 'dnssrv+' to detect store API servers through DNS lookups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stores: Vec<String>,
    /// Interval between DNS resolutions.
    #[serde(rename = "storeSDDNSInterval", default, skip_serializing_if = "Option::is_none")]
    pub store_sd_dns_interval: Option<String>,
    /// Timeout before an unhealthy store is cleaned from the store UI page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_unhealthy_timeout: Option<String>,
    /// Enable automatic adjustment (step / 5) to what source of data should be used in
    /// store gateways if no max_source_resolution param is specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_auto_downsampling: Option<bool>,
    /// Enable partial response for queries if no partial_response param is specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_partial_response: Option<bool>,
    /// Default evaluation interval for sub queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_default_evaluation_interval: Option<String>,
    /// If a Store doesn't send any data in this duration it is ignored and partial data is
    /// returned if enabled. 0 disables timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_response_timeout: Option<String>,
}


/// Thanos Store Gateway: serves blocks from the object store.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreGateway {
    #[serde(flatten)]
    pub base: BaseObject,
    #[serde(flatten)]
    pub flags: CommonFlags,
    /// Maximum size of items held in the in-memory index cache.
    #[serde(default)]
    pub index_cache_size: String,
    /// Maximum size of concurrently allocatable bytes for chunks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_pool_size: Option<String>,
    /// Maximum amount of samples returned via a single Series call. 0 means no limit.
    /// A chunk is counted as 120 samples, so the actual number of samples may be lower.
    #[serde(rename = "storeGRPCSeriesSampleLimit", default, skip_serializing_if = "Option::is_none")]
    pub store_grpc_series_sample_limit: Option<String>,
    /// Maximum number of concurrent Series calls.
    #[serde(rename = "storeGRPCSeriesMaxConcurrency", default, skip_serializing_if = "Option::is_none")]
    pub store_grpc_series_max_concurrency: Option<i32>,
    /// Repeat interval for syncing the blocks between local and remote view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_block_duration: Option<String>,
    /// Number of goroutines to use when constructing index-cache.json blocks from object
    /// storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_sync_concurrency: Option<i32>,
    /// Time ranges to partition the Store Gateway by.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_ranges: Vec<TimeRange>,
}

/// Time window a Store Gateway partition serves. Both ends accept a constant time in
/// RFC3339 format or a duration relative to now, such as -1d or 2h45m. Valid duration
/// units are ms, s, m, h, d, w, y.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    /// Serve only metrics which happened later than this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_time: Option<String>,
    /// Serve only blocks which happened earlier than this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time: Option<String>,
}


/// Thanos Ruler: evaluates recording and alerting rules against the query layer.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(flatten)]
    pub base: BaseObject,
    #[serde(flatten)]
    pub flags: CommonFlags,
    /// Labels to be applied to all generated metrics. Similar to external labels for
    /// Prometheus, used to identify ruler and its blocks as unique source.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Rule files content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
    /// Minimum amount of time to wait before resending an alert to Alertmanager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resend_delay: Option<String>,
    /// The default evaluation interval to use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_interval: Option<String>,
    /// Block duration for TSDB block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsdb_block_duration: Option<String>,
    /// Block retention time on local disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsdb_retention: Option<String>,
    /// Alertmanager replica URLs to push firing alerts. Ruler claims success if push to at
    /// least one alertmanager succeeds. The scheme may be prefixed with 'dns+' or
    /// 'dnssrv+' to detect Alertmanager IPs through DNS lookups. The port defaults to 9093
    /// or the SRV record's value.
    #[serde(rename = "alertmanagersURLs", default, skip_serializing_if = "Vec::is_empty")]
    pub alertmanagers_urls: Vec<String>,
    /// Timeout for sending alerts to Alertmanager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alertmanagers_send_timeout: Option<String>,
    /// Interval between DNS resolutions of Alertmanager hosts.
    #[serde(rename = "alertmanagersSDDNSInterval", default, skip_serializing_if = "Option::is_none")]
    pub alertmanagers_sd_dns_interval: Option<String>,
    /// The external Thanos Query URL that would be set in all alerts 'Source' field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_query_url: Option<String>,
    /// Labels by name to drop before sending to alertmanager. This allows alert to be
    /// deduplicated on replica label.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub alert_label_drop: BTreeMap<String, String>,
    /// Prefix for API and UI endpoints, analogous to --web.route-prefix of Prometheus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_route_prefix: Option<String>,
    /// Static prefix for all HTML links and redirect URLs in the UI web interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_external_prefix: Option<String>,
    /// Name of HTTP request header used for dynamic prefixing of UI links and redirects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_prefix_header: Option<String>,
    /// Addresses of statically configured query API servers. The scheme may be prefixed
    /// with 'dns+' or 'dnssrv+' to detect query API servers through DNS lookups.
    #[serde(default)]
    pub queries: Vec<String>,
    /// Interval between DNS resolutions.
    #[serde(rename = "querySddnsInterval", default, skip_serializing_if = "Option::is_none")]
    pub query_sd_dns_interval: Option<String>,
}


/// Storage endpoints a Thanos cluster federates with.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
pub struct StorageEndpoints {
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,
}

pub type Remote = StorageEndpoints;
pub type Local = StorageEndpoints;

/// TLS settings for storage endpoints. On the wire this is a mapping holding
/// exactly one of `managedTLS` or `certificate`, in any format.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug)]
#[serde(try_from = "TlsFields", into = "TlsFields")]
pub enum Tls {
    Managed(ManagedTls),
    Certificate(Secret),
}

// wire shape of Tls
#[derive(Deserialize, Serialize, Clone, Default, JsonSchema)]
struct TlsFields {
    /// Certificates generated and rotated at runtime.
    #[serde(rename = "managedTLS", default, skip_serializing_if = "Option::is_none")]
    managed_tls: Option<ManagedTls>,
    /// Certificate supplied through a secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    certificate: Option<Secret>,
}

impl TryFrom<TlsFields> for Tls {
    type Error = String;

    fn try_from(fields: TlsFields) -> Result<Tls, String> {
        match (fields.managed_tls, fields.certificate) {
            (Some(managed), None) => Ok(Tls::Managed(managed)),
            (None, Some(certificate)) => Ok(Tls::Certificate(certificate)),
            (Some(_), Some(_)) => Err(String::from("tls takes either managedTLS or certificate, not both")),
            (None, None) => Err(String::from("tls needs one of managedTLS or certificate")),
        }
    }
}

impl From<Tls> for TlsFields {
    fn from(tls: Tls) -> TlsFields {
        match tls {
            Tls::Managed(managed) => TlsFields { managed_tls: Some(managed), ..TlsFields::default() },
            Tls::Certificate(certificate) => TlsFields { certificate: Some(certificate), ..TlsFields::default() },
        }
    }
}

impl JsonSchema for Tls {
    fn schema_name() -> String {
        String::from("Tls")
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        TlsFields::json_schema(gen)
    }
}

// TODO: decide how runtime generated certificates are issued before adding fields here
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
pub struct ManagedTls {}

/// Discovery of Thanos sidecars and stores by label.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThanosDiscovery {
    #[serde(default)]
    pub label_selector: LabelSelector,
}


// CustomResourceDefinition of the Thanos resource
pub fn thanos_crd() -> CustomResourceDefinition {
    Thanos::crd()
}

// Register Thanos and ThanosList with the given scheme
pub fn add_to_scheme(scheme: &mut Scheme) {
    scheme.register::<Thanos>();
}
