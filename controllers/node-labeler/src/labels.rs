//! Well-known node role labels, taints and control-plane pod selectors.

/// Current control-plane role label.
pub const CONTROL_PLANE_NODE_ROLE_LABEL: &str = "node-role.kubernetes.io/control-plane";
/// Pre-1.20 master role label.
pub const MASTER_NODE_ROLE_LABEL: &str = "node-role.kubernetes.io/master";
/// Legacy master node marker.
pub const LEGACY_MASTER_NODE_LABEL: &str = "node.kubernetes.io/master";

/// Worker role label.
pub const WORKER_NODE_ROLE_LABEL: &str = "node-role.kubernetes.io/worker";
/// Legacy worker node marker.
pub const LEGACY_WORKER_NODE_LABEL: &str = "node.kubernetes.io/worker";

/// Legacy generic role label. Unlike the markers above its value matters.
pub const LEGACY_ROLE_LABEL: &str = "kubernetes.io/role";
/// `kubernetes.io/role` value for control-plane nodes.
pub const LEGACY_ROLE_MASTER: &str = "master";
/// `kubernetes.io/role` value for worker nodes.
pub const LEGACY_ROLE_WORKER: &str = "worker";

/// NoSchedule taint carried by control-plane nodes.
pub const CONTROL_PLANE_NODE_TAINT: &str = "node-role.kubernetes.io/control-plane";
/// Kubernetes spelling of the NoSchedule taint effect.
pub const TAINT_EFFECT_NO_SCHEDULE: &str = "NoSchedule";

/// Any of these labels marks a node as control-plane.
pub const CONTROL_PLANE_INDICATOR_LABELS: [&str; 3] = [
    MASTER_NODE_ROLE_LABEL,
    CONTROL_PLANE_NODE_ROLE_LABEL,
    LEGACY_MASTER_NODE_LABEL,
];

/// Namespace the kubeadm static pods run in.
pub const DEFAULT_SYSTEM_NAMESPACE: &str = "kube-system";
/// Label key kubeadm puts the component name under.
pub const COMPONENT_LABEL: &str = "component";
/// Label key kubeadm puts the tier under.
pub const TIER_LABEL: &str = "tier";
/// Tier value of control-plane static pods.
pub const CONTROL_PLANE_TIER: &str = "control-plane";
/// Components whose placement identifies a control-plane node, in lookup order.
pub const CONTROL_PLANE_COMPONENTS: [&str; 2] = ["kube-apiserver", "etcd"];
