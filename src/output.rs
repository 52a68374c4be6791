//! Rendering of summaries as aligned tables or JSON

use anyhow::Result;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use kubepeek_k8s::{DeploymentSummary, NodeSummary, PodSummary, ServiceSummary};

const NONE: &str = "<none>";
const COLUMN_GAP: usize = 3;

/// A summary that can be shown as one table row
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

fn or_none(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NONE.to_string())
}

impl TableRow for String {
    fn headers() -> &'static [&'static str] {
        &["NAME"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl TableRow for PodSummary {
    fn headers() -> &'static [&'static str] {
        &["NAME", "NAMESPACE", "STATUS", "NODE"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.namespace.clone(),
            or_none(&self.phase),
            or_none(&self.node),
        ]
    }
}

impl TableRow for DeploymentSummary {
    fn headers() -> &'static [&'static str] {
        &["NAME", "READY"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.replica_status()]
    }
}

impl TableRow for ServiceSummary {
    fn headers() -> &'static [&'static str] {
        &["NAME", "TYPE", "CLUSTER-IP"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            or_none(&self.service_type),
            or_none(&self.cluster_ip),
        ]
    }
}

impl TableRow for NodeSummary {
    fn headers() -> &'static [&'static str] {
        &["NAME", "ROLE", "READY", "CPU", "MEMORY"]
    }

    fn cells(&self) -> Vec<String> {
        let capacity = |resource: &str| {
            self.capacity_of(resource)
                .map_or_else(|| NONE.to_string(), str::to_string)
        };

        vec![
            self.name.clone(),
            or_none(&self.role),
            or_none(&self.ready),
            capacity("cpu"),
            capacity("memory"),
        ]
    }
}

/// Render rows as a table with a header line, columns padded to display width
pub fn table<T: TableRow>(items: &[T]) -> String {
    if items.is_empty() {
        return "No resources found.\n".to_string();
    }

    let headers: Vec<String> = T::headers().iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = std::iter::once(headers)
        .chain(items.iter().map(T::cells))
        .collect();

    let mut widths = vec![0; T::headers().len()];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let last = row.len().saturating_sub(1);
        for (i, cell) in row.iter().enumerate() {
            out.push_str(cell);
            if i < last {
                let pad = widths[i] - cell.width() + COLUMN_GAP;
                out.extend(std::iter::repeat_n(' ', pad));
            }
        }
        out.push('\n');
    }
    out
}

/// Render items as a table, or as pretty JSON when `json` is set
pub fn render<T: TableRow + Serialize>(items: &[T], json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(items)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(table(items))
    }
}
