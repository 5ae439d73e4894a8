//! Labeler error types.
//!
//! Every collaborator failure carries the operation that failed so the
//! diagnostic printed before the process exits points at the right call.

use cluster_client::ClusterError;
use thiserror::Error;

/// Errors that can occur in the node role labeler.
#[derive(Debug, Error)]
pub enum LabelerError {
    /// Invalid or missing configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Building the cluster client failed
    #[error("Failed to create cluster client: {0}")]
    Client(#[source] ClusterError),

    /// Fetching the target node failed
    #[error("Failed to get node {node}: {source}")]
    GetNode {
        /// Target node name
        node: String,
        #[source]
        source: ClusterError,
    },

    /// Listing control-plane component pods failed
    #[error("Failed to list {component} pods in {namespace} namespace: {source}")]
    ListPods {
        /// Component label value queried
        component: String,
        /// Namespace queried
        namespace: String,
        #[source]
        source: ClusterError,
    },

    /// Writing the reconciled node back failed
    #[error("Failed to apply new labels to node {node}: {source}")]
    UpdateNode {
        /// Target node name
        node: String,
        #[source]
        source: ClusterError,
    },

    /// Installing the termination signal handler failed
    #[error("Failed to wait for termination signal: {0}")]
    Signal(#[source] std::io::Error),
}
