//! Cluster Object Store Client
//!
//! A thin, mockable client for the handful of Kubernetes object operations the
//! node role labeler needs: fetching a node, listing pods by label selector and
//! replacing a node object.
//!
//! # Example
//!
//! ```no_run
//! use cluster_client::{ClusterClient, KubeClusterClient, LabelSelector};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = KubeClusterClient::new(kube::Client::try_default().await?);
//!
//! let node = client.get_node("worker-0").await?;
//! let selector = LabelSelector::new()
//!     .with("component", "etcd")
//!     .with("tier", "control-plane");
//! let pods = client.list_pods("kube-system", &selector).await?;
//! # let _ = (node, pods);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod selector;
#[path = "trait.rs"]
pub mod cluster_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::KubeClusterClient;
pub use cluster_trait::ClusterClient;
pub use error::ClusterError;
pub use selector::LabelSelector;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockClusterClient, Operation};
