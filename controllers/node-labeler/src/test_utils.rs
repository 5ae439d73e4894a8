//! Test utilities for unit testing the classifier and reconciler
//!
//! This module provides helpers for creating test nodes and pods.

use crate::labels::{
    COMPONENT_LABEL, CONTROL_PLANE_NODE_ROLE_LABEL, CONTROL_PLANE_NODE_TAINT, CONTROL_PLANE_TIER,
    LEGACY_MASTER_NODE_LABEL, LEGACY_ROLE_LABEL, MASTER_NODE_ROLE_LABEL, TIER_LABEL,
};
use k8s_openapi::api::core::v1::{Node, NodeSpec, Pod, PodSpec, Taint};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// Helper to build a label map
pub fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Helper to create a taint with the given key and effect
pub fn create_test_taint(key: &str, effect: &str) -> Taint {
    Taint {
        key: key.to_string(),
        effect: effect.to_string(),
        ..Default::default()
    }
}

/// Helper to create a test Node with labels and taints
///
/// An empty `labels` slice leaves `metadata.labels` unset, and an empty
/// `taints` slice leaves `spec` unset, the way a freshly registered node
/// comes back from the API server.
pub fn create_test_node(name: &str, node_labels: &[(&str, &str)], taints: Vec<Taint>) -> Node {
    Node {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            resource_version: Some("1".to_string()),
            labels: (!node_labels.is_empty()).then(|| labels(node_labels)),
            ..Default::default()
        },
        spec: (!taints.is_empty()).then(|| NodeSpec {
            taints: Some(taints),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Helper to create a node already carrying the full control-plane label/taint set
pub fn create_canonical_control_plane_node(name: &str) -> Node {
    create_test_node(
        name,
        &[
            (CONTROL_PLANE_NODE_ROLE_LABEL, ""),
            (MASTER_NODE_ROLE_LABEL, ""),
            (LEGACY_MASTER_NODE_LABEL, ""),
            (LEGACY_ROLE_LABEL, "master"),
        ],
        vec![create_test_taint(CONTROL_PLANE_NODE_TAINT, "NoSchedule")],
    )
}

/// Helper to create a kubeadm-style control-plane static pod
pub fn create_test_pod(name: &str, component: &str, node_name: Option<&str>) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("kube-system".to_string()),
            labels: Some(labels(&[
                (COMPONENT_LABEL, component),
                (TIER_LABEL, CONTROL_PLANE_TIER),
            ])),
            ..Default::default()
        },
        spec: Some(PodSpec {
            node_name: node_name.map(str::to_string),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Returns the node's labels, treating an unset map as empty
pub fn node_labels(node: &Node) -> BTreeMap<String, String> {
    node.metadata.labels.clone().unwrap_or_default()
}

/// Returns the node's taint keys in order
pub fn taint_keys(node: &Node) -> Vec<String> {
    node.spec
        .as_ref()
        .and_then(|spec| spec.taints.as_ref())
        .map(|taints| taints.iter().map(|t| t.key.clone()).collect())
        .unwrap_or_default()
}
