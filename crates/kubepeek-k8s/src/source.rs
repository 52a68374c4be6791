//! Connection configuration source selection

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use kube::config::{KubeConfigOptions, Kubeconfig};

use crate::error::ConfigError;

/// Set by the kubelet in every container; its presence means we run inside a cluster
pub const IN_CLUSTER_ENV: &str = "KUBERNETES_SERVICE_HOST";

/// Local kubeconfig settings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalConfig {
    /// Explicit kubeconfig path. `None` resolves `$KUBECONFIG` or `~/.kube/config`.
    pub kubeconfig: Option<PathBuf>,

    /// Context to use instead of the kubeconfig's current context
    pub context: Option<String>,
}

impl LocalConfig {
    /// True when the caller named a kubeconfig file or context
    pub fn is_explicit(&self) -> bool {
        self.kubeconfig.is_some() || self.context.is_some()
    }
}

/// Where the client's credentials come from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// Service-account token and CA bundle mounted into the pod
    InCluster,
    /// A kubeconfig file on the local machine
    Local(LocalConfig),
}

impl ConfigSource {
    /// Pick the in-cluster source when [`IN_CLUSTER_ENV`] is set, otherwise `local`
    pub fn detect(local: LocalConfig) -> Self {
        Self::select(std::env::var_os(IN_CLUSTER_ENV), local)
    }

    fn select(signal: Option<OsString>, local: LocalConfig) -> Self {
        match signal {
            Some(host) if !host.is_empty() => Self::InCluster,
            _ => Self::Local(local),
        }
    }

    /// Load the client configuration for this source
    pub(crate) async fn load(&self) -> Result<kube::Config, ConfigError> {
        match self {
            Self::InCluster => Ok(kube::Config::incluster()?),
            Self::Local(local) => {
                let options = KubeConfigOptions {
                    context: local.context.clone(),
                    ..Default::default()
                };

                let config = match &local.kubeconfig {
                    Some(path) => {
                        let kubeconfig = Kubeconfig::read_from(path)?;
                        kube::Config::from_custom_kubeconfig(kubeconfig, &options).await?
                    }
                    None => kube::Config::from_kubeconfig(&options).await?,
                };

                Ok(config)
            }
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InCluster => write!(f, "in-cluster service account"),
            Self::Local(local) => {
                match &local.kubeconfig {
                    Some(path) => write!(f, "kubeconfig {}", path.display())?,
                    None => write!(f, "default kubeconfig")?,
                }
                if let Some(context) = &local.context {
                    write!(f, " (context {})", context)?;
                }
                Ok(())
            }
        }
    }
}
