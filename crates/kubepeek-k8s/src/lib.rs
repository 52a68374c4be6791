//! Kubernetes client for kubepeek
//!
//! This crate provides a read-only facade over the Kubernetes API for listing
//! namespaces, pods, deployments, services and nodes, and for fetching pod logs.
//! Every call goes straight to the API server and the response is reduced to
//! a small summary record.

mod client;
mod error;
mod project;
mod source;

pub use client::{ClusterClient, DEFAULT_NAMESPACE, DEFAULT_TAIL_LINES};
pub use error::ConfigError;
pub use project::{
    project_deployment, project_namespace, project_node, project_pod, project_service, ROLE_LABEL,
};
pub use source::{ConfigSource, IN_CLUSTER_ENV, LocalConfig};

// Re-export types that are used in our public API
pub use kubepeek_types::{DeploymentSummary, NodeSummary, PodSummary, ServiceSummary};
