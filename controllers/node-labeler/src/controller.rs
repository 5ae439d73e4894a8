//! One-shot labeling pass.
//!
//! `Labeler` fetches the target node, classifies it, reconciles its role
//! labels and taints, and writes it back only when something changed.
//! Failures are returned to the caller; nothing here exits the process.

use crate::classifier::{self, ClassificationSignal, NodeRole};
use crate::config::LabelerConfig;
use crate::error::LabelerError;
use crate::reconciler::{self, NodeChange};
use cluster_client::ClusterClient;
use tracing::info;

/// What a labeling pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub role: NodeRole,
    pub signal: ClassificationSignal,
    /// Empty when the node already had its canonical labels and taints
    pub changes: Vec<NodeChange>,
}

impl RunOutcome {
    /// True if the node was written back.
    pub fn updated(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Classifies and labels a single node.
pub struct Labeler {
    client: Box<dyn ClusterClient>,
    config: LabelerConfig,
}

impl std::fmt::Debug for Labeler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Labeler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Labeler {
    /// Creates a labeler for the node named in `config`.
    pub fn new(client: Box<dyn ClusterClient>, config: LabelerConfig) -> Self {
        Self { client, config }
    }

    /// Runs one fetch, classify, reconcile and write pass.
    pub async fn run_once(&self) -> Result<RunOutcome, LabelerError> {
        let node_name = &self.config.node_name;
        info!("Reconciling role labels for node {}", node_name);

        let node = self
            .client
            .get_node(node_name)
            .await
            .map_err(|source| LabelerError::GetNode {
                node: node_name.clone(),
                source,
            })?;

        let classification =
            classifier::classify(self.client.as_ref(), &self.config.system_namespace, &node).await?;

        let reconciliation = reconciler::reconcile(node, classification.role);
        if reconciliation.changed() {
            self.client
                .update_node(&reconciliation.node)
                .await
                .map_err(|source| LabelerError::UpdateNode {
                    node: node_name.clone(),
                    source,
                })?;
            info!(
                "Applied {} label/taint changes to {} node {}",
                reconciliation.changes.len(),
                classification.role,
                node_name
            );
        } else {
            info!("Required labels are already applied to {} node {}", classification.role, node_name);
        }

        Ok(RunOutcome {
            role: classification.role,
            signal: classification.signal,
            changes: reconciliation.changes,
        })
    }
}
