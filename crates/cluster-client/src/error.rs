//! Cluster client errors

use thiserror::Error;

/// HTTP status the API server returns for a missing object.
const STATUS_NOT_FOUND: u16 = 404;
/// HTTP status the API server returns for a stale `resourceVersion`.
const STATUS_CONFLICT: u16 = 409;

/// Errors that can occur when talking to the cluster object store
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write rejected because the object changed since it was read
    #[error("Conflict: {0}")]
    Conflict(String),

    /// API server answered with another error status
    #[error("Kubernetes API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Message returned by the API server
        message: String,
    },

    /// Transport, authentication or decoding failure
    #[error("Kubernetes client error: {0}")]
    Kube(#[source] kube::Error),

    /// Object is missing a field required for the request
    #[error("Invalid object: {0}")]
    InvalidObject(String),
}

impl ClusterError {
    /// Classifies a `kube::Error`, naming the object it concerned.
    pub fn from_kube(error: kube::Error, object: &str) -> Self {
        match error {
            kube::Error::Api(response) if response.code == STATUS_NOT_FOUND => {
                Self::NotFound(object.to_string())
            }
            kube::Error::Api(response) if response.code == STATUS_CONFLICT => {
                Self::Conflict(format!("{}: {}", object, response.message))
            }
            kube::Error::Api(response) => Self::Api {
                code: response.code,
                message: response.message,
            },
            other => Self::Kube(other),
        }
    }

    /// Returns true if the object was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if the write lost an optimistic concurrency race
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<kube::Error> for ClusterError {
    fn from(error: kube::Error) -> Self {
        Self::from_kube(error, "object")
    }
}
