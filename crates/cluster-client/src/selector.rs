//! Equality-based label selectors

use std::fmt;

/// An ordered set of `key=value` requirements, all of which must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    requirements: Vec<(String, String)>,
}

impl LabelSelector {
    /// Creates an empty selector (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `key=value` requirement.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.requirements.push((key.into(), value.into()));
        self
    }

    /// Returns the requirement value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.requirements
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if every requirement is satisfied by `labels`.
    pub fn matches<'a, I>(&self, labels: I) -> bool
    where
        I: IntoIterator<Item = (&'a String, &'a String)> + Clone,
    {
        self.requirements.iter().all(|(key, value)| {
            labels
                .clone()
                .into_iter()
                .any(|(k, v)| k == key && v == value)
        })
    }

    /// Returns true if the selector has no requirements.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.requirements {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_display_joins_requirements_in_order() {
        let selector = LabelSelector::new()
            .with("component", "kube-apiserver")
            .with("tier", "control-plane");
        assert_eq!(selector.to_string(), "component=kube-apiserver,tier=control-plane");
    }

    #[test]
    fn test_empty_selector_renders_empty_and_matches_all() {
        let selector = LabelSelector::new();
        assert!(selector.is_empty());
        assert_eq!(selector.to_string(), "");
        assert!(selector.matches(&BTreeMap::new()));
    }

    #[test]
    fn test_matches_requires_every_pair() {
        let selector = LabelSelector::new()
            .with("component", "etcd")
            .with("tier", "control-plane");

        let mut labels = BTreeMap::new();
        labels.insert("component".to_string(), "etcd".to_string());
        assert!(!selector.matches(&labels), "tier missing");

        labels.insert("tier".to_string(), "control-plane".to_string());
        assert!(selector.matches(&labels));

        labels.insert("tier".to_string(), "node".to_string());
        assert!(!selector.matches(&labels), "tier value differs");
    }

    #[test]
    fn test_get_returns_requirement_value() {
        let selector = LabelSelector::new().with("component", "etcd");
        assert_eq!(selector.get("component"), Some("etcd"));
        assert_eq!(selector.get("tier"), None);
    }
}
