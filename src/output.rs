//! Output formatting for marshal results.
//!
//! Provides functions to format a [`MarshalResult`] or a [`DuplicateReport`] as a tree
//! listing, plain text, or JSON.

use crate::tree::render_forest;
use crate::{DuplicateReport, FsTreeError, MarshalResult};
use serde_json::json;
use std::fs;
use std::path::Path;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tree,
    Text,
    Json,
}

impl OutputFormat {
    /// Returns the conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Tree | OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Formats the marshal result into a string.
pub fn format_result(
    result: &MarshalResult,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, FsTreeError> {
    match format {
        OutputFormat::Tree => Ok(render_forest(&result.forest)),
        OutputFormat::Text => Ok(format_text(result)),
        OutputFormat::Json => format_json(result, pretty),
    }
}

/// Writes the formatted result to a file.
pub fn write_result_to_file(
    result: &MarshalResult,
    format: OutputFormat,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), FsTreeError> {
    let content = format_result(result, format, pretty)?;
    fs::write(&path, content).map_err(|e| FsTreeError::io(path.as_ref(), e))?;
    Ok(())
}

/// Formats a shallowest-duplicate report. Tree and text render the same single line.
pub fn format_report(
    report: &DuplicateReport,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, FsTreeError> {
    let (node, level) = report;
    match format {
        OutputFormat::Json => {
            let value = json!({ "node": node, "level": level });
            let text = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            Ok(text)
        }
        OutputFormat::Tree | OutputFormat::Text => Ok(match node {
            Some(node) => format!(
                "duplicate id {} ({}) at level {}",
                node.id, node.name, level
            ),
            None => "no duplicates".to_string(),
        }),
    }
}

/// Writes the formatted report to a file.
pub fn write_report_to_file(
    report: &DuplicateReport,
    format: OutputFormat,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), FsTreeError> {
    let content = format_report(report, format, pretty)?;
    fs::write(&path, content).map_err(|e| FsTreeError::io(path.as_ref(), e))?;
    Ok(())
}

// ----------------------- Internal formatting -----------------------

fn format_text(result: &MarshalResult) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str("Forest:\n");
    out.push_str(&render_forest(&result.forest));
    out.push('\n');
    out.push_str(&format!(
        "\n{} roots, {} nodes\n",
        result.forest.len(),
        result.node_count()
    ));
    if result.duplicates.is_empty() {
        out.push_str("\nNo duplicates.\n");
        return out;
    }
    out.push_str("\nDuplicates:\n");
    for duplicate in &result.duplicates {
        out.push_str(&format!(
            "  id {} ({}) at level {}\n",
            duplicate.id, duplicate.name, duplicate.level_found
        ));
    }
    out
}

fn format_json(result: &MarshalResult, pretty: bool) -> Result<String, FsTreeError> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
