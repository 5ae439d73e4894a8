//! Kubernetes API client
//!
//! Implements `ClusterClient` on top of `kube::Api`.

use crate::cluster_trait::ClusterClient;
use crate::error::ClusterError;
use crate::selector::LabelSelector;
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::api::{ListParams, PostParams};
use kube::{Api, Client};
use tracing::debug;

/// Cluster object store backed by a live API server
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
}

impl std::fmt::Debug for KubeClusterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeClusterClient").finish_non_exhaustive()
    }
}

impl KubeClusterClient {
    /// Wraps an already configured `kube::Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the in-cluster service account or `KUBECONFIG`.
    pub async fn try_default() -> Result<Self, ClusterError> {
        let client = Client::try_default().await.map_err(ClusterError::Kube)?;
        Ok(Self::new(client))
    }

    fn nodes(&self) -> Api<Node> {
        Api::all(self.client.clone())
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait::async_trait]
impl ClusterClient for KubeClusterClient {
    async fn get_node(&self, name: &str) -> Result<Node, ClusterError> {
        debug!("GET node {}", name);
        self.nodes()
            .get(name)
            .await
            .map_err(|e| ClusterError::from_kube(e, &format!("node {}", name)))
    }

    async fn list_pods(&self, namespace: &str, selector: &LabelSelector) -> Result<Vec<Pod>, ClusterError> {
        let selector = selector.to_string();
        debug!("LIST pods in {} matching {}", namespace, selector);
        let params = ListParams::default().labels(&selector);
        let pods = self
            .pods(namespace)
            .list(&params)
            .await
            .map_err(|e| ClusterError::from_kube(e, &format!("pods in {}", namespace)))?;
        Ok(pods.items)
    }

    async fn update_node(&self, node: &Node) -> Result<Node, ClusterError> {
        let name = node
            .metadata
            .name
            .as_deref()
            .ok_or_else(|| ClusterError::InvalidObject("node has no metadata.name".to_string()))?;
        debug!("PUT node {}", name);
        self.nodes()
            .replace(name, &PostParams::default(), node)
            .await
            .map_err(|e| ClusterError::from_kube(e, &format!("node {}", name)))
    }
}
