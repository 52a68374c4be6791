use kube::config::{InClusterError, KubeconfigError};
use thiserror::Error;

/// Failure to load credentials or build a client at construction time
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load in-cluster configuration: {0}")]
    InCluster(#[from] InClusterError),

    #[error("failed to load kubeconfig: {0}")]
    Kubeconfig(#[from] KubeconfigError),

    #[error("failed to create kubernetes client: {0}")]
    Client(#[source] kube::Error),
}
