//! Node Role Labeler
//!
//! Bootstrap task that runs once per node:
//! - Classifies the node as control-plane or worker, falling back to
//!   kube-apiserver/etcd pod placement when no role label exists yet
//! - Reconciles the role labels (including legacy variants) and the
//!   control-plane NoSchedule taint onto the node
//! - Idles until SIGINT/SIGTERM so the hosting pod stays Running

mod classifier;
mod config;
mod controller;
mod error;
mod labels;
mod reconciler;
#[cfg(test)]
mod test_utils;

use crate::config::LabelerConfig;
use crate::controller::Labeler;
use crate::error::LabelerError;
use cluster_client::KubeClusterClient;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), LabelerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Node Role Labeler");

    let config = LabelerConfig::from_env().inspect_err(|e| error!("{}", e))?;

    info!("Configuration:");
    info!("  Node: {}", config.node_name);
    info!("  System namespace: {}", config.system_namespace);
    info!("  Idle after reconcile: {}", config.idle_after_reconcile);

    let client = KubeClusterClient::try_default()
        .await
        .map_err(LabelerError::Client)
        .inspect_err(|e| error!("{}", e))?;

    let labeler = Labeler::new(Box::new(client), config.clone());
    let outcome = labeler.run_once().await.inspect_err(|e| error!("{}", e))?;

    info!(
        "node-role-labeler finished successfully: {} node ({}), updated: {}",
        outcome.role,
        outcome.signal,
        outcome.updated()
    );

    if config.idle_after_reconcile {
        info!("Sleeping until terminated");
        wait_for_shutdown().await?;
        info!("Termination signal received, exiting");
    }

    Ok(())
}

/// Blocks until SIGINT or SIGTERM arrives.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<(), LabelerError> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate()).map_err(LabelerError::Signal)?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map_err(LabelerError::Signal)?,
        _ = terminate.recv() => {}
    }
    Ok(())
}

/// Blocks until Ctrl-C arrives.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<(), LabelerError> {
    tokio::signal::ctrl_c().await.map_err(LabelerError::Signal)
}
