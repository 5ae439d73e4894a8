//! Labeler configuration.
//!
//! Everything comes from environment variables set on the init container:
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `NODE_NAME` | yes | |
//! | `SYSTEM_NAMESPACE` | no | `kube-system` |
//! | `IDLE_AFTER_RECONCILE` | no | `true` |

use crate::error::LabelerError;
use crate::labels::DEFAULT_SYSTEM_NAMESPACE;
use std::env;

const NODE_NAME_VAR: &str = "NODE_NAME";
const SYSTEM_NAMESPACE_VAR: &str = "SYSTEM_NAMESPACE";
const IDLE_AFTER_RECONCILE_VAR: &str = "IDLE_AFTER_RECONCILE";

/// Runtime configuration for one labeling pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelerConfig {
    /// Name of the node to classify and label
    pub node_name: String,
    /// Namespace searched for control-plane static pods
    pub system_namespace: String,
    /// Keep the process alive until SIGINT/SIGTERM after a successful pass
    pub idle_after_reconcile: bool,
}

impl LabelerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, LabelerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LabelerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let node_name = lookup(NODE_NAME_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                LabelerError::InvalidConfig(format!("{} env cannot be empty", NODE_NAME_VAR))
            })?;

        let system_namespace = lookup(SYSTEM_NAMESPACE_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_NAMESPACE.to_string());

        let idle_after_reconcile = match lookup(IDLE_AFTER_RECONCILE_VAR) {
            Some(value) => parse_bool(IDLE_AFTER_RECONCILE_VAR, &value)?,
            None => true,
        };

        Ok(Self {
            node_name,
            system_namespace,
            idle_after_reconcile,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, LabelerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LabelerError::InvalidConfig(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_node_name_is_rejected() {
        let err = LabelerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, LabelerError::InvalidConfig(_)));
        assert!(err.to_string().contains("NODE_NAME"));
    }

    #[test]
    fn test_blank_node_name_is_rejected() {
        let err = LabelerConfig::from_lookup(lookup(&[("NODE_NAME", "  ")])).unwrap_err();
        assert!(matches!(err, LabelerError::InvalidConfig(_)));
    }

    #[test]
    fn test_defaults() {
        let config = LabelerConfig::from_lookup(lookup(&[("NODE_NAME", "n1")])).unwrap();
        assert_eq!(
            config,
            LabelerConfig {
                node_name: "n1".to_string(),
                system_namespace: "kube-system".to_string(),
                idle_after_reconcile: true,
            }
        );
    }

    #[test]
    fn test_overrides() {
        let config = LabelerConfig::from_lookup(lookup(&[
            ("NODE_NAME", "cp-0"),
            ("SYSTEM_NAMESPACE", "platform-system"),
            ("IDLE_AFTER_RECONCILE", "False"),
        ]))
        .unwrap();
        assert_eq!(config.node_name, "cp-0");
        assert_eq!(config.system_namespace, "platform-system");
        assert!(!config.idle_after_reconcile);
    }

    #[test]
    fn test_invalid_idle_flag() {
        let err = LabelerConfig::from_lookup(lookup(&[
            ("NODE_NAME", "n1"),
            ("IDLE_AFTER_RECONCILE", "sometimes"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("IDLE_AFTER_RECONCILE"));
    }
}
