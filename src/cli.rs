use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kubepeek - A read-only view of Kubernetes namespaces, workloads, nodes and pod logs
#[derive(Parser, Debug)]
#[command(name = "kubepeek")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Kubeconfig file to load (skips in-cluster detection)
    #[arg(long, global = true, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use (skips in-cluster detection)
    #[arg(long, global = true, value_name = "NAME")]
    pub context: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to $KUBEPEEK_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// The subcommand to run; no subcommand means the overview
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Overview)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List namespaces, all nodes, then CPU and GPU nodes
    Overview,

    /// List namespace names
    Namespaces,

    /// List pods in a namespace
    Pods {
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// List deployments in a namespace
    Deployments {
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// List services in a namespace
    Services {
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// List nodes, optionally filtered by a label selector
    Nodes {
        /// Label selector (e.g. role=gpu)
        #[arg(short = 'l', long)]
        selector: Option<String>,
    },

    /// Print the tail of a pod's log
    Logs {
        /// Pod name
        pod: String,

        #[arg(short, long)]
        namespace: Option<String>,

        /// Number of lines to fetch from the end of the log
        #[arg(long, value_name = "LINES")]
        tail: Option<i64>,
    },
}

impl Command {
    /// Namespace given on the command line, if the command takes one
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Pods { namespace }
            | Self::Deployments { namespace }
            | Self::Services { namespace }
            | Self::Logs { namespace, .. } => namespace.as_deref(),
            _ => None,
        }
    }
}
