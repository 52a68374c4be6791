use std::fmt::Debug;

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};
use kube::api::{ListParams, LogParams};
use kube::Api;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::project::{
    project_deployment, project_namespace, project_node, project_pod, project_service,
};
use crate::source::{ConfigSource, LocalConfig};
use kubepeek_types::{DeploymentSummary, NodeSummary, PodSummary, ServiceSummary};

/// Namespace used when a namespaced call is not given one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Number of log lines requested when no tail count is given
pub const DEFAULT_TAIL_LINES: i64 = 100;

/// Read-only Kubernetes client wrapper
///
/// The configuration source is chosen once at construction and never
/// revisited. Calls share nothing mutable, so a `ClusterClient` can be cloned
/// or shared across tasks and used concurrently.
#[derive(Clone)]
pub struct ClusterClient {
    client: kube::Client,
    source: ConfigSource,
}

impl ClusterClient {
    /// Create a client from the source detected in the environment, falling
    /// back to the default kubeconfig
    pub async fn try_default() -> Result<Self, ConfigError> {
        Self::connect(ConfigSource::detect(LocalConfig::default())).await
    }

    /// Create a client by loading credentials from `source`
    pub async fn connect(source: ConfigSource) -> Result<Self, ConfigError> {
        info!(%source, "loading cluster configuration");

        let config = source.load().await?;
        let client = kube::Client::try_from(config).map_err(ConfigError::Client)?;

        Ok(Self::from_client(client, source))
    }

    /// Wrap an already built `kube::Client`
    pub fn from_client(client: kube::Client, source: ConfigSource) -> Self {
        Self { client, source }
    }

    /// Where this client's credentials were loaded from
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Fetch all namespace names
    pub async fn list_namespaces(&self) -> kube::Result<Vec<String>> {
        debug!("listing namespaces");
        let api: Api<Namespace> = Api::all(self.client.clone());
        list_projected(&api, &ListParams::default(), project_namespace).await
    }

    /// Fetch all pods in a namespace (`default` when `None`)
    pub async fn list_pods(&self, namespace: Option<&str>) -> kube::Result<Vec<PodSummary>> {
        let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE);
        debug!(namespace, "listing pods");
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        list_projected(&api, &ListParams::default(), project_pod).await
    }

    /// Fetch all deployments in a namespace (`default` when `None`)
    pub async fn list_deployments(
        &self,
        namespace: Option<&str>,
    ) -> kube::Result<Vec<DeploymentSummary>> {
        let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE);
        debug!(namespace, "listing deployments");
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        list_projected(&api, &ListParams::default(), project_deployment).await
    }

    /// Fetch all services in a namespace (`default` when `None`)
    pub async fn list_services(
        &self,
        namespace: Option<&str>,
    ) -> kube::Result<Vec<ServiceSummary>> {
        let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE);
        debug!(namespace, "listing services");
        let api: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        list_projected(&api, &ListParams::default(), project_service).await
    }

    /// Fetch every node in the cluster
    pub async fn list_nodes(&self) -> kube::Result<Vec<NodeSummary>> {
        debug!("listing nodes");
        let api: Api<Node> = Api::all(self.client.clone());
        list_projected(&api, &ListParams::default(), project_node).await
    }

    /// Fetch the nodes matching a label selector such as `role=gpu`
    ///
    /// The selector is passed to the API server as is and evaluated there.
    pub async fn list_nodes_by_label(&self, selector: &str) -> kube::Result<Vec<NodeSummary>> {
        debug!(selector, "listing nodes by label");
        let api: Api<Node> = Api::all(self.client.clone());
        list_projected(&api, &ListParams::default().labels(selector), project_node).await
    }

    /// Fetch the last `tail_lines` lines (100 when `None`) of a pod's log
    pub async fn pod_logs(
        &self,
        name: &str,
        namespace: Option<&str>,
        tail_lines: Option<i64>,
    ) -> kube::Result<String> {
        let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE);
        let tail_lines = tail_lines.unwrap_or(DEFAULT_TAIL_LINES);
        debug!(pod = name, namespace, tail_lines, "fetching pod logs");

        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let params = LogParams {
            tail_lines: Some(tail_lines),
            ..Default::default()
        };
        api.logs(name, &params).await
    }
}

/// Issue a single list call and project every returned item
///
/// Only the first page is read; no continue token is followed.
async fn list_projected<K, T>(
    api: &Api<K>,
    params: &ListParams,
    project: impl Fn(K) -> T,
) -> kube::Result<Vec<T>>
where
    K: Clone + DeserializeOwned + Debug,
{
    let list = api.list(params).await?;
    Ok(list.items.into_iter().map(project).collect())
}
