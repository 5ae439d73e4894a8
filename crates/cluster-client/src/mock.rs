//! Mock ClusterClient for unit testing
//!
//! This module provides an in-memory implementation of `ClusterClient` that
//! can be used in unit tests without requiring a running API server. Failures
//! can be injected per operation, and every pod listing and node write is
//! recorded so tests can assert on what the caller asked for.

use crate::cluster_trait::ClusterClient;
use crate::error::ClusterError;
use crate::selector::LabelSelector;
use k8s_openapi::api::core::v1::{Node, Pod};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Operations whose outcome can be overridden with an injected failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `get_node`
    GetNode,
    /// `list_pods`
    ListPods,
    /// `update_node`
    UpdateNode,
}

/// Mock ClusterClient for testing
///
/// Stores nodes by name and pods by namespace. Cloning shares the underlying
/// storage, so a test can keep a handle while the code under test owns a
/// boxed copy.
#[derive(Clone, Default)]
pub struct MockClusterClient {
    nodes: Arc<Mutex<BTreeMap<String, Node>>>,
    pods: Arc<Mutex<Vec<(String, Pod)>>>,
    failures: Arc<Mutex<HashMap<Operation, fn() -> ClusterError>>>,
    pod_queries: Arc<Mutex<Vec<(String, String)>>>,
    updates: Arc<Mutex<Vec<Node>>>,
}

impl std::fmt::Debug for MockClusterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClusterClient")
            .field("nodes", &lock(&self.nodes).len())
            .field("pods", &lock(&self.pods).len())
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn injected_failure() -> ClusterError {
    ClusterError::Api {
        code: 503,
        message: "injected failure".to_string(),
    }
}

impl MockClusterClient {
    /// Create an empty mock client
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a node (for test setup)
    pub fn add_node(&self, node: Node) {
        let name = node.metadata.name.clone().unwrap_or_default();
        lock(&self.nodes).insert(name, node);
    }

    /// Add a pod to `namespace` (for test setup)
    pub fn add_pod(&self, namespace: impl Into<String>, pod: Pod) {
        lock(&self.pods).push((namespace.into(), pod));
    }

    /// Make every call to `operation` fail with a 503 API error
    pub fn fail(&self, operation: Operation) {
        self.fail_with(operation, injected_failure);
    }

    /// Make every call to `operation` fail with the error `make` builds
    pub fn fail_with(&self, operation: Operation, make: fn() -> ClusterError) {
        lock(&self.failures).insert(operation, make);
    }

    /// Current stored copy of a node
    pub fn node(&self, name: &str) -> Option<Node> {
        lock(&self.nodes).get(name).cloned()
    }

    /// `(namespace, selector)` pairs passed to `list_pods`, in call order
    pub fn pod_queries(&self) -> Vec<(String, String)> {
        lock(&self.pod_queries).clone()
    }

    /// Node objects passed to `update_node`, in call order
    pub fn updates(&self) -> Vec<Node> {
        lock(&self.updates).clone()
    }

    fn check_failure(&self, operation: Operation) -> Result<(), ClusterError> {
        match lock(&self.failures).get(&operation) {
            Some(make) => Err(make()),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ClusterClient for MockClusterClient {
    async fn get_node(&self, name: &str) -> Result<Node, ClusterError> {
        self.check_failure(Operation::GetNode)?;
        lock(&self.nodes)
            .get(name)
            .cloned()
            .ok_or_else(|| ClusterError::NotFound(format!("node {}", name)))
    }

    async fn list_pods(&self, namespace: &str, selector: &LabelSelector) -> Result<Vec<Pod>, ClusterError> {
        lock(&self.pod_queries).push((namespace.to_string(), selector.to_string()));
        self.check_failure(Operation::ListPods)?;

        let empty = BTreeMap::new();
        Ok(lock(&self.pods)
            .iter()
            .filter(|(ns, _)| ns == namespace)
            .filter(|(_, pod)| selector.matches(pod.metadata.labels.as_ref().unwrap_or(&empty)))
            .map(|(_, pod)| pod.clone())
            .collect())
    }

    async fn update_node(&self, node: &Node) -> Result<Node, ClusterError> {
        lock(&self.updates).push(node.clone());
        self.check_failure(Operation::UpdateNode)?;

        let name = node
            .metadata
            .name
            .clone()
            .ok_or_else(|| ClusterError::InvalidObject("node has no metadata.name".to_string()))?;

        let mut nodes = lock(&self.nodes);
        let stored = nodes
            .get(&name)
            .ok_or_else(|| ClusterError::NotFound(format!("node {}", name)))?;

        // Optimistic concurrency: a stale resourceVersion loses the write.
        let current_version = stored.metadata.resource_version.clone();
        if node.metadata.resource_version.is_some() && node.metadata.resource_version != current_version {
            return Err(ClusterError::Conflict(format!(
                "node {}: resourceVersion {:?} is stale",
                name, node.metadata.resource_version
            )));
        }

        let next_version = current_version
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0)
            + 1;
        let mut updated = node.clone();
        updated.metadata.resource_version = Some(next_version.to_string());
        nodes.insert(name, updated.clone());
        Ok(updated)
    }
}
