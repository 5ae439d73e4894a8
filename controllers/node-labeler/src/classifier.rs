//! Node role classification.
//!
//! A node is control-plane if it already carries one of the control-plane
//! role labels. When none is present (a node being re-bootstrapped during
//! disaster recovery has lost its labels but still runs the static pods)
//! the kube-apiserver and etcd pods in the system namespace are checked for
//! one scheduled onto the node. Anything else is a worker.

use crate::error::LabelerError;
use crate::labels::{
    COMPONENT_LABEL, CONTROL_PLANE_COMPONENTS, CONTROL_PLANE_INDICATOR_LABELS, CONTROL_PLANE_TIER,
    TIER_LABEL,
};
use cluster_client::{ClusterClient, LabelSelector};
use k8s_openapi::api::core::v1::{Node, Pod};
use std::fmt;
use tracing::{debug, info};

/// Role verdict for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Hosts the API server and etcd
    ControlPlane,
    /// Runs user workloads only
    Worker,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ControlPlane => f.write_str("control-plane"),
            Self::Worker => f.write_str("worker"),
        }
    }
}

/// Evidence a verdict was based on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationSignal {
    /// Node carries this control-plane label
    IndicatorLabel(&'static str),
    /// A control-plane component pod is scheduled on the node
    ComponentPod {
        /// `component` label value of the pod
        component: &'static str,
        /// Pod name
        pod: String,
    },
    /// Neither labels nor pods point at control-plane
    NoControlPlaneSignal,
}

impl fmt::Display for ClassificationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndicatorLabel(label) => write!(f, "node has label {}", label),
            Self::ComponentPod { component, pod } => {
                write!(f, "{} pod {} is scheduled on the node", component, pod)
            }
            Self::NoControlPlaneSignal => f.write_str("no control-plane labels or pods found"),
        }
    }
}

/// Result of classifying one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub role: NodeRole,
    pub signal: ClassificationSignal,
}

/// Returns the first control-plane indicator label present on `node`.
///
/// Only key presence counts; the value is ignored.
pub fn control_plane_indicator(node: &Node) -> Option<&'static str> {
    let labels = node.metadata.labels.as_ref()?;
    CONTROL_PLANE_INDICATOR_LABELS
        .iter()
        .copied()
        .find(|label| labels.contains_key(*label))
}

/// Returns the first pod in `pods` assigned to `node_name`.
pub fn pod_on_node<'a>(pods: &'a [Pod], node_name: &str) -> Option<&'a Pod> {
    pods.iter().find(|pod| {
        pod.spec
            .as_ref()
            .and_then(|spec| spec.node_name.as_deref())
            == Some(node_name)
    })
}

/// Label selector for one control-plane component's static pods.
pub fn component_selector(component: &str) -> LabelSelector {
    LabelSelector::new()
        .with(COMPONENT_LABEL, component)
        .with(TIER_LABEL, CONTROL_PLANE_TIER)
}

/// Decide whether `node` is a control-plane or worker node.
///
/// Pod listings are only issued when no indicator label is present. Both
/// component listings must succeed before any verdict is returned.
pub async fn classify(
    client: &dyn ClusterClient,
    namespace: &str,
    node: &Node,
) -> Result<Classification, LabelerError> {
    let node_name = node.metadata.name.as_deref().unwrap_or_default();

    if let Some(label) = control_plane_indicator(node) {
        info!("Node {} is control-plane: has label {}", node_name, label);
        return Ok(Classification {
            role: NodeRole::ControlPlane,
            signal: ClassificationSignal::IndicatorLabel(label),
        });
    }

    debug!(
        "Node {} has no control-plane labels, checking for control-plane pods in {}",
        node_name, namespace
    );

    let mut candidates: Vec<(&'static str, Vec<Pod>)> = Vec::with_capacity(CONTROL_PLANE_COMPONENTS.len());
    for component in CONTROL_PLANE_COMPONENTS {
        let pods = client
            .list_pods(namespace, &component_selector(component))
            .await
            .map_err(|source| LabelerError::ListPods {
                component: component.to_string(),
                namespace: namespace.to_string(),
                source,
            })?;
        debug!("Found {} {} pods in {}", pods.len(), component, namespace);
        candidates.push((component, pods));
    }

    for (component, pods) in &candidates {
        if let Some(pod) = pod_on_node(pods, node_name) {
            let pod = pod.metadata.name.clone().unwrap_or_default();
            info!("Node {} is control-plane: {} pod {} is scheduled on it", node_name, component, pod);
            return Ok(Classification {
                role: NodeRole::ControlPlane,
                signal: ClassificationSignal::ComponentPod {
                    component: *component,
                    pod,
                },
            });
        }
    }

    info!("Node {} is a worker: no control-plane labels or pods found", node_name);
    Ok(Classification {
        role: NodeRole::Worker,
        signal: ClassificationSignal::NoControlPlaneSignal,
    })
}
