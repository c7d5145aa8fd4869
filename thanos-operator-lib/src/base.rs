use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};


/// Container image pull policy. The Kubernetes values get their own variants;
/// any other string is kept as written in `Other`.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(from = "String", into = "String")]
pub enum PullPolicy {
    Always,
    #[default]
    IfNotPresent,
    Never,
    Other(String),
}

impl PullPolicy {

    pub fn as_str(&self) -> &str {
        match self {
            PullPolicy::Always => "Always",
            PullPolicy::IfNotPresent => "IfNotPresent",
            PullPolicy::Never => "Never",
            PullPolicy::Other(policy) => policy,
        }
    }
}

impl From<String> for PullPolicy {
    fn from(policy: String) -> PullPolicy {
        match policy.as_str() {
            "Always" => PullPolicy::Always,
            "IfNotPresent" => PullPolicy::IfNotPresent,
            "Never" => PullPolicy::Never,
            _ => PullPolicy::Other(policy),
        }
    }
}

impl From<PullPolicy> for String {
    fn from(policy: PullPolicy) -> String {
        policy.as_str().to_string()
    }
}

// a plain string on the wire
impl JsonSchema for PullPolicy {
    fn schema_name() -> String {
        String::from("PullPolicy")
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

/// Container image used for a Thanos component.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub pull_policy: PullPolicy,
}

impl ImageSpec {

    pub fn new(repository: &str, tag: &str, pull_policy: PullPolicy) -> ImageSpec {
        ImageSpec {
            repository: repository.to_string(),
            tag: tag.to_string(),
            pull_policy,
        }
    }

    // Image reference as it would appear in a pod spec
    pub fn reference(&self) -> String {
        if self.tag.is_empty() {
            self.repository.clone()
        } else {
            format!("{}:{}", self.repository, self.tag)
        }
    }
}

/// Settings shared by every deployed Thanos component, inlined into its spec.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
pub struct BaseObject {
    /// Container image of the component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSpec>,
}

/// Process flags every Thanos component accepts, inlined into its spec.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommonFlags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_format: Option<String>,
    /// Listen host:port for HTTP endpoints.
    #[serde(default)]
    pub http_address: String,
    /// Time to wait after an interrupt received for HTTP Server.
    #[serde(rename = "http_grace_period", default)]
    pub http_grace_period: String,
    /// Listen ip:port address for gRPC endpoints.
    #[serde(default)]
    pub grpc_address: String,
    /// Time to wait after an interrupt received for GRPC Server.
    #[serde(default)]
    pub grpc_grace_period: String,
}
