use schemars::JsonSchema;
use serde::{Deserialize, Serialize};


/// A secret value, given inline or read from a Kubernetes Secret.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// Literal value of the secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Read the value from a Secret key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<ValueFrom>,
    /// Mount the Secret key as a file into the component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_from: Option<ValueFrom>,
}

#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValueFrom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<KubernetesSecret>,
}

/// Reference to a single key of a Kubernetes Secret.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug, Default, JsonSchema)]
pub struct KubernetesSecret {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: String,
    /// Defaults to the namespace of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Secret {

    // Secret read from the given Secret name and key
    pub fn from_secret_key(name: &str, key: &str) -> Secret {
        Secret {
            value_from: Some(ValueFrom {
                secret_key_ref: Some(KubernetesSecret {
                    name: name.to_string(),
                    key: key.to_string(),
                    namespace: None,
                }),
            }),
            ..Secret::default()
        }
    }
}
