//! Integration tests for the Kubernetes cluster client
//!
//! These tests require a reachable cluster (in-cluster config or KUBECONFIG).
//! Set TEST_NODE_NAME to a node that exists in that cluster to run.

use cluster_client::{ClusterClient, KubeClusterClient, LabelSelector};

#[tokio::test]
#[ignore] // Requires running cluster
async fn test_get_node() -> anyhow::Result<()> {
    let node_name = std::env::var("TEST_NODE_NAME")?;
    let client = KubeClusterClient::try_default().await?;

    let node = client.get_node(&node_name).await?;
    assert_eq!(node.metadata.name.as_deref(), Some(node_name.as_str()));
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_get_missing_node_is_not_found() -> anyhow::Result<()> {
    let client = KubeClusterClient::try_default().await?;

    let err = client
        .get_node("node-role-labeler-does-not-exist")
        .await
        .expect_err("node should not exist");
    assert!(err.is_not_found(), "unexpected error: {}", err);
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_list_control_plane_pods() -> anyhow::Result<()> {
    let client = KubeClusterClient::try_default().await?;
    let selector = LabelSelector::new()
        .with("component", "kube-apiserver")
        .with("tier", "control-plane");

    let pods = client.list_pods("kube-system", &selector).await?;
    println!("Found {} kube-apiserver pods", pods.len());
    Ok(())
}
