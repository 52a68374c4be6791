//! Shared types for kubepeek
//!
//! Summaries are reduced, read-only views of Kubernetes resources. They carry
//! only the fields callers need and are rebuilt on every request.

use serde::Serialize;
use std::collections::BTreeMap;

// ============================================================================
// Workload Summaries
// ============================================================================

/// Pod information
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,

    /// `status.phase` as reported by the API server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// `spec.nodeName`, unset until the pod is scheduled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
}

/// Deployment information
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeploymentSummary {
    pub name: String,

    /// Desired replicas (`spec.replicas`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Ready replicas (`status.readyReplicas`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready: Option<i32>,
}

impl DeploymentSummary {
    /// Format replica status as "ready/desired", with `-` for unreported counts
    pub fn replica_status(&self) -> String {
        let fmt = |n: Option<i32>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
        format!("{}/{}", fmt(self.ready), fmt(self.replicas))
    }
}

/// Service information
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,

    #[serde(rename = "clusterIP", skip_serializing_if = "Option::is_none")]
    pub cluster_ip: Option<String>,
}

// ============================================================================
// Node Summaries
// ============================================================================

/// Node information
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    pub name: String,

    /// Value of the `role` label, if the node carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Status of the `Ready` condition ("True", "False" or "Unknown").
    /// `None` when the node reports no such condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready: Option<String>,

    /// Resource capacity, quantities kept in their API string form
    pub capacity: BTreeMap<String, String>,
}

impl NodeSummary {
    /// Look up a capacity entry such as `cpu` or `nvidia.com/gpu`
    pub fn capacity_of(&self, resource: &str) -> Option<&str> {
        self.capacity.get(resource).map(String::as_str)
    }
}
