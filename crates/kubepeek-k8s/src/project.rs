//! Reduce full API objects to summaries
//!
//! Each function copies the fields a summary needs and drops the rest. Nothing
//! is computed: missing optional fields stay `None`.

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};
use kubepeek_types::{DeploymentSummary, NodeSummary, PodSummary, ServiceSummary};

/// Node label carrying the node's role
pub const ROLE_LABEL: &str = "role";

const READY_CONDITION: &str = "Ready";

pub fn project_namespace(ns: Namespace) -> String {
    ns.metadata.name.unwrap_or_default()
}

pub fn project_pod(pod: Pod) -> PodSummary {
    PodSummary {
        name: pod.metadata.name.unwrap_or_default(),
        namespace: pod.metadata.namespace.unwrap_or_default(),
        phase: pod.status.and_then(|s| s.phase),
        node: pod.spec.and_then(|s| s.node_name),
    }
}

pub fn project_deployment(deploy: Deployment) -> DeploymentSummary {
    DeploymentSummary {
        name: deploy.metadata.name.unwrap_or_default(),
        replicas: deploy.spec.and_then(|s| s.replicas),
        ready: deploy.status.and_then(|s| s.ready_replicas),
    }
}

pub fn project_service(svc: Service) -> ServiceSummary {
    let (service_type, cluster_ip) = match svc.spec {
        Some(spec) => (spec.type_, spec.cluster_ip),
        None => (None, None),
    };

    ServiceSummary {
        name: svc.metadata.name.unwrap_or_default(),
        service_type,
        cluster_ip,
    }
}

pub fn project_node(node: Node) -> NodeSummary {
    let role = node
        .metadata
        .labels
        .and_then(|mut labels| labels.remove(ROLE_LABEL));

    let (ready, capacity) = match node.status {
        Some(status) => {
            let ready = status
                .conditions
                .unwrap_or_default()
                .into_iter()
                .find(|c| c.type_ == READY_CONDITION)
                .map(|c| c.status);
            let capacity = status
                .capacity
                .unwrap_or_default()
                .into_iter()
                .map(|(resource, quantity)| (resource, quantity.0))
                .collect();
            (ready, capacity)
        }
        None => (None, Default::default()),
    };

    NodeSummary {
        name: node.metadata.name.unwrap_or_default(),
        role,
        ready,
        capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::{DeploymentSpec, DeploymentStatus};
    use k8s_openapi::api::core::v1::{
        NodeCondition, NodeStatus, PodSpec, PodStatus, ServiceSpec,
    };
    use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    fn meta(name: &str) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn condition(type_: &str, status: &str) -> NodeCondition {
        NodeCondition {
            type_: type_.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_pod_fields_are_copied() {
        let pod = Pod {
            metadata: ObjectMeta {
                namespace: Some("payments".to_string()),
                ..meta("api-7d9f-abcde")
            },
            spec: Some(PodSpec {
                node_name: Some("worker-2".to_string()),
                ..Default::default()
            }),
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                ..Default::default()
            }),
        };

        assert_eq!(
            project_pod(pod),
            PodSummary {
                name: "api-7d9f-abcde".to_string(),
                namespace: "payments".to_string(),
                phase: Some("Running".to_string()),
                node: Some("worker-2".to_string()),
            }
        );
    }

    #[test]
    fn test_unscheduled_pod_has_no_node() {
        let pod = Pod {
            metadata: meta("pending"),
            spec: Some(PodSpec::default()),
            status: Some(PodStatus {
                phase: Some("Pending".to_string()),
                ..Default::default()
            }),
        };

        let summary = project_pod(pod);
        assert_eq!(summary.phase.as_deref(), Some("Pending"));
        assert!(summary.node.is_none());
    }

    #[test]
    fn test_deployment_keeps_missing_ready_count_unset() {
        let deploy = Deployment {
            metadata: meta("web"),
            spec: Some(DeploymentSpec {
                replicas: Some(3),
                ..Default::default()
            }),
            status: Some(DeploymentStatus::default()),
        };

        let summary = project_deployment(deploy);
        assert_eq!(summary.replicas, Some(3));
        assert_eq!(summary.ready, None);
    }

    #[test]
    fn test_service_projection() {
        let svc = Service {
            metadata: meta("kube-dns"),
            spec: Some(ServiceSpec {
                type_: Some("ClusterIP".to_string()),
                cluster_ip: Some("10.96.0.10".to_string()),
                ..Default::default()
            }),
            status: None,
        };

        let summary = project_service(svc);
        assert_eq!(summary.service_type.as_deref(), Some("ClusterIP"));
        assert_eq!(summary.cluster_ip.as_deref(), Some("10.96.0.10"));
    }

    #[test]
    fn test_node_projection() {
        let node = Node {
            metadata: ObjectMeta {
                labels: Some(BTreeMap::from([
                    ("role".to_string(), "gpu".to_string()),
                    ("zone".to_string(), "a".to_string()),
                ])),
                ..meta("gpu-1")
            },
            spec: None,
            status: Some(NodeStatus {
                conditions: Some(vec![
                    condition("MemoryPressure", "False"),
                    condition("Ready", "True"),
                ]),
                capacity: Some(BTreeMap::from([
                    ("cpu".to_string(), Quantity("16".to_string())),
                    ("memory".to_string(), Quantity("64Gi".to_string())),
                ])),
                ..Default::default()
            }),
        };

        let summary = project_node(node);
        assert_eq!(summary.name, "gpu-1");
        assert_eq!(summary.role.as_deref(), Some("gpu"));
        assert_eq!(summary.ready.as_deref(), Some("True"));
        assert_eq!(summary.capacity_of("memory"), Some("64Gi"));
        assert_eq!(summary.capacity.len(), 2);
    }

    #[test]
    fn test_node_without_ready_condition() {
        let node = Node {
            metadata: meta("worker-1"),
            spec: None,
            status: Some(NodeStatus {
                conditions: Some(vec![condition("DiskPressure", "False")]),
                ..Default::default()
            }),
        };

        let summary = project_node(node);
        assert!(summary.ready.is_none());
        assert!(summary.role.is_none());
        assert!(summary.capacity.is_empty());
    }

    #[test]
    fn test_node_without_status() {
        let summary = project_node(Node {
            metadata: meta("bare"),
            ..Default::default()
        });
        assert!(summary.ready.is_none());
        assert!(summary.capacity.is_empty());
    }
}
