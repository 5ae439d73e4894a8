//! Role label and taint reconciliation.
//!
//! Computes the delta between a node's labels/taints and the canonical set
//! for its role, applying it to an in-memory copy of the node. Writing the
//! node back is the caller's job and only happens when something changed.

use crate::classifier::NodeRole;
use crate::labels::{
    CONTROL_PLANE_NODE_ROLE_LABEL, CONTROL_PLANE_NODE_TAINT, LEGACY_MASTER_NODE_LABEL,
    LEGACY_ROLE_LABEL, LEGACY_ROLE_MASTER, LEGACY_ROLE_WORKER, LEGACY_WORKER_NODE_LABEL,
    MASTER_NODE_ROLE_LABEL, TAINT_EFFECT_NO_SCHEDULE, WORKER_NODE_ROLE_LABEL,
};
use k8s_openapi::api::core::v1::{Node, NodeSpec, Taint};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// How an existing label is judged to satisfy a required one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatch {
    /// Any value satisfies the requirement
    KeyPresent,
    /// Value must equal the required value, otherwise it is overwritten
    ExactValue,
}

/// A label that must exist on the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredLabel {
    pub key: &'static str,
    pub value: &'static str,
    pub matching: LabelMatch,
}

/// A taint that must exist on the node, matched by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredTaint {
    pub key: &'static str,
    pub effect: &'static str,
}

/// Canonical labels and taints for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleLabelSet {
    pub present: &'static [RequiredLabel],
    pub absent: &'static [&'static str],
    pub taints: &'static [RequiredTaint],
}

const fn marker(key: &'static str) -> RequiredLabel {
    RequiredLabel {
        key,
        value: "",
        matching: LabelMatch::KeyPresent,
    }
}

/// Control-plane target state.
pub const CONTROL_PLANE_LABEL_SET: RoleLabelSet = RoleLabelSet {
    present: &[
        marker(MASTER_NODE_ROLE_LABEL),
        marker(CONTROL_PLANE_NODE_ROLE_LABEL),
        marker(LEGACY_MASTER_NODE_LABEL),
        RequiredLabel {
            key: LEGACY_ROLE_LABEL,
            value: LEGACY_ROLE_MASTER,
            matching: LabelMatch::ExactValue,
        },
    ],
    absent: &[WORKER_NODE_ROLE_LABEL, LEGACY_WORKER_NODE_LABEL],
    taints: &[RequiredTaint {
        key: CONTROL_PLANE_NODE_TAINT,
        effect: TAINT_EFFECT_NO_SCHEDULE,
    }],
};

/// Worker target state.
pub const WORKER_LABEL_SET: RoleLabelSet = RoleLabelSet {
    present: &[
        marker(WORKER_NODE_ROLE_LABEL),
        marker(LEGACY_WORKER_NODE_LABEL),
        RequiredLabel {
            key: LEGACY_ROLE_LABEL,
            value: LEGACY_ROLE_WORKER,
            matching: LabelMatch::ExactValue,
        },
    ],
    absent: &[],
    taints: &[],
};

impl RoleLabelSet {
    /// Target state for `role`.
    pub fn for_role(role: NodeRole) -> &'static Self {
        match role {
            NodeRole::ControlPlane => &CONTROL_PLANE_LABEL_SET,
            NodeRole::Worker => &WORKER_LABEL_SET,
        }
    }
}

/// A single modification made to the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeChange {
    /// Label was missing and has been added
    AddLabel { key: String, value: String },
    /// Label had the wrong value and has been overwritten
    SetLabel { key: String, from: String, to: String },
    /// Label was present and has been removed
    RemoveLabel { key: String },
    /// Taint was missing and has been appended
    AddTaint { key: String, effect: String },
}

impl fmt::Display for NodeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddLabel { key, value } => write!(f, "adding label {}='{}'", key, value),
            Self::SetLabel { key, from, to } => {
                write!(f, "changing label {} from '{}' to '{}'", key, from, to)
            }
            Self::RemoveLabel { key } => write!(f, "removing label {}", key),
            Self::AddTaint { key, effect } => write!(f, "adding taint {}:{}", key, effect),
        }
    }
}

/// Node after reconciliation, with the changes that were applied.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub node: Node,
    pub changes: Vec<NodeChange>,
}

impl Reconciliation {
    /// True if the node differs from what was passed in and must be written.
    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Returns true if a taint with `key` exists, whatever its effect or value.
pub fn has_taint(taints: &[Taint], key: &str) -> bool {
    taints.iter().any(|taint| taint.key == key)
}

/// Bring `node` to the canonical label/taint state for `role`.
pub fn reconcile(mut node: Node, role: NodeRole) -> Reconciliation {
    let target = RoleLabelSet::for_role(role);
    let mut changes = Vec::new();

    let labels = node.metadata.labels.get_or_insert_with(BTreeMap::new);
    for required in target.present {
        match (labels.get(required.key).cloned(), required.matching) {
            (None, _) => {
                labels.insert(required.key.to_string(), required.value.to_string());
                changes.push(NodeChange::AddLabel {
                    key: required.key.to_string(),
                    value: required.value.to_string(),
                });
            }
            (Some(from), LabelMatch::ExactValue) if from != required.value => {
                labels.insert(required.key.to_string(), required.value.to_string());
                changes.push(NodeChange::SetLabel {
                    key: required.key.to_string(),
                    from,
                    to: required.value.to_string(),
                });
            }
            (Some(_), _) => debug!("label {} already present", required.key),
        }
    }

    for key in target.absent {
        if labels.remove(*key).is_some() {
            changes.push(NodeChange::RemoveLabel {
                key: (*key).to_string(),
            });
        }
    }

    if !target.taints.is_empty() {
        let taints = node
            .spec
            .get_or_insert_with(NodeSpec::default)
            .taints
            .get_or_insert_with(Vec::new);
        for required in target.taints {
            if has_taint(taints, required.key) {
                debug!("taint {} already present", required.key);
                continue;
            }
            taints.push(Taint {
                key: required.key.to_string(),
                effect: required.effect.to_string(),
                ..Default::default()
            });
            changes.push(NodeChange::AddTaint {
                key: required.key.to_string(),
                effect: required.effect.to_string(),
            });
        }
    }

    for change in &changes {
        info!("{}", change);
    }

    Reconciliation { node, changes }
}
