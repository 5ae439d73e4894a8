//! ClusterClient trait for mocking
//!
//! This trait abstracts the Kubernetes API calls the labeler makes so the
//! classification and reconciliation logic can be unit tested without a
//! running cluster. `KubeClusterClient` implements it against a real API
//! server; `MockClusterClient` (feature `test-util`) keeps objects in memory.

use crate::error::ClusterError;
use crate::selector::LabelSelector;
use k8s_openapi::api::core::v1::{Node, Pod};

/// Cluster object store operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait ClusterClient: Send + Sync {
    /// Fetch a node by name.
    async fn get_node(&self, name: &str) -> Result<Node, ClusterError>;

    /// List pods in `namespace` matching every requirement of `selector`.
    async fn list_pods(&self, namespace: &str, selector: &LabelSelector) -> Result<Vec<Pod>, ClusterError>;

    /// Replace a node object (labels, taints and all) in a single write.
    async fn update_node(&self, node: &Node) -> Result<Node, ClusterError>;
}
