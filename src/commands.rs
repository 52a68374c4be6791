use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use kubepeek_k8s::{ClusterClient, NodeSummary, ROLE_LABEL};

use crate::cli::Command;
use crate::config::Settings;
use crate::output::{TableRow, render, table};

/// Node roles listed by the overview after the full node list
const OVERVIEW_ROLES: [&str; 2] = ["cpu", "gpu"];

/// Run one subcommand against the cluster, writing results to `out`
pub async fn execute<W: Write>(
    client: &ClusterClient,
    command: Command,
    settings: &Settings,
    out: &mut W,
) -> Result<()> {
    let namespace = settings.namespace.as_deref();
    let json = settings.json;

    match command {
        Command::Overview => overview(client, json, out).await?,
        Command::Namespaces => {
            let namespaces = client
                .list_namespaces()
                .await
                .context("Failed to list namespaces")?;
            out.write_all(render(&namespaces, json)?.as_bytes())?;
        }
        Command::Pods { .. } => {
            let pods = client
                .list_pods(namespace)
                .await
                .context("Failed to list pods")?;
            out.write_all(render(&pods, json)?.as_bytes())?;
        }
        Command::Deployments { .. } => {
            let deployments = client
                .list_deployments(namespace)
                .await
                .context("Failed to list deployments")?;
            out.write_all(render(&deployments, json)?.as_bytes())?;
        }
        Command::Services { .. } => {
            let services = client
                .list_services(namespace)
                .await
                .context("Failed to list services")?;
            out.write_all(render(&services, json)?.as_bytes())?;
        }
        Command::Nodes { selector } => {
            let nodes = match &selector {
                Some(selector) => client.list_nodes_by_label(selector).await,
                None => client.list_nodes().await,
            }
            .context("Failed to list nodes")?;
            out.write_all(render(&nodes, json)?.as_bytes())?;
        }
        Command::Logs { pod, .. } => {
            let logs = client
                .pod_logs(&pod, namespace, settings.tail_lines)
                .await
                .context(format!("Failed to fetch logs for pod {}", pod))?;
            out.write_all(logs.as_bytes())?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Overview printed as one JSON document
#[derive(Debug, Serialize)]
struct OverviewReport {
    namespaces: Vec<String>,
    nodes: Vec<NodeSummary>,
    nodes_by_role: BTreeMap<String, Vec<NodeSummary>>,
}

/// Namespaces, all nodes, then nodes per role. The first failure ends the run.
async fn overview<W: Write>(client: &ClusterClient, json: bool, out: &mut W) -> Result<()> {
    if json {
        let mut report = OverviewReport {
            namespaces: client.list_namespaces().await?,
            nodes: client.list_nodes().await?,
            nodes_by_role: BTreeMap::new(),
        };
        for role in OVERVIEW_ROLES {
            let nodes = client.list_nodes_by_label(&role_selector(role)).await?;
            report.nodes_by_role.insert(role.to_string(), nodes);
        }

        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    // Headings go out before each call so a failure shows which step broke
    heading(out, "Namespaces")?;
    section(out, &client.list_namespaces().await?)?;

    heading(out, "All Nodes")?;
    section(out, &client.list_nodes().await?)?;

    for role in OVERVIEW_ROLES {
        heading(out, &format!("{} Nodes", role.to_uppercase()))?;
        section(out, &client.list_nodes_by_label(&role_selector(role)).await?)?;
    }

    Ok(())
}

fn role_selector(role: &str) -> String {
    format!("{}={}", ROLE_LABEL, role)
}

fn heading<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out, "=== {} ===", title)?;
    out.flush()?;
    Ok(())
}

fn section<W: Write, T: TableRow>(out: &mut W, items: &[T]) -> Result<()> {
    out.write_all(table(items).as_bytes())?;
    writeln!(out)?;
    Ok(())
}
