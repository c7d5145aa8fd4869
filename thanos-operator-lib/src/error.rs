use thiserror::Error;


#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to process YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("document has no apiVersion or kind")]
    MissingTypeMeta,

    #[error("kind {kind} of {api_version} is not registered")]
    UnregisteredKind { api_version: String, kind: String },

    #[error("expected {expected}, found {found}")]
    KindMismatch { expected: String, found: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnregisteredKind {
            api_version: String::from("v1"),
            kind: String::from("Pod"),
        };
        assert_eq!(err.to_string(), "kind Pod of v1 is not registered");

        let err = Error::KindMismatch {
            expected: String::from("monitoring.banzaicloud.io/v1alpha1 Thanos"),
            found: String::from("monitoring.banzaicloud.io/v1alpha1 ThanosList"),
        };
        assert_eq!(
            err.to_string(),
            "expected monitoring.banzaicloud.io/v1alpha1 Thanos, found monitoring.banzaicloud.io/v1alpha1 ThanosList"
        );
    }
}
