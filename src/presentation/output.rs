//! Output Rendering
//!
//! Renders use case results as human-readable text or as JSON lines.
//! Renderers return strings; printing is left to the command.

use chrono::SecondsFormat;
use serde_json::{json, Map, Value};

use crate::application::{DeployResult, InstallOutcome, LocationIssue, UpgradeOutcome};
use crate::domain::entities::ModelRecord;
use crate::domain::value_objects::ContainerBlob;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// One JSON object per line, for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn render_deploy(result: &DeployResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = format!("✓ Deployed {} → {}", result.identity, result.location);
            if result.auto_versioned {
                out.push_str(" (auto-versioned)");
            }
            out
        }
        OutputFormat::Json => json!({
            "event": "complete",
            "command": "deploy",
            "identity": result.identity.to_string(),
            "location": result.location,
            "auto_versioned": result.auto_versioned,
        })
        .to_string(),
    }
}

/// Render records, one block (or JSON line) per record
pub fn render_records(records: &[ModelRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if records.is_empty() {
                return "No models found.".to_string();
            }
            records
                .iter()
                .map(record_text)
                .collect::<Vec<_>>()
                .join("\n\n")
        }
        OutputFormat::Json => records
            .iter()
            .map(|record| record_json(record).to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn record_text(record: &ModelRecord) -> String {
    let mut lines = vec![record.identity.to_string()];
    if let Some(location) = &record.location {
        lines.push(format!("  location:         {location}"));
    }
    if let Some(ready) = record.production_ready {
        lines.push(format!("  production_ready: {ready}"));
    }
    if let Some(container) = &record.container {
        lines.push(format!("  container:        {}", container_text(container)));
    }
    for entry in &record.messages {
        lines.push(format!(
            "  message:          {} ({})",
            entry.text,
            entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    lines.join("\n")
}

fn container_text(container: &ContainerBlob) -> String {
    match container.as_utf8() {
        Some(text) => text.to_string(),
        None => format!("<{} bytes>", container.len()),
    }
}

fn record_json(record: &ModelRecord) -> Value {
    let mut obj = Map::new();
    obj.insert("model".into(), json!(record.identity.to_string()));
    obj.insert("name".into(), json!(record.identity.name()));
    obj.insert(
        "version".into(),
        json!(record.identity.version().map(|v| v.to_string())),
    );
    if let Some(location) = &record.location {
        obj.insert("location".into(), json!(location));
    }
    if let Some(ready) = record.production_ready {
        obj.insert("production_ready".into(), json!(ready));
    }
    if let Some(container) = &record.container {
        let value = match container.as_utf8() {
            Some(text) => json!(text),
            None => json!({ "bytes": container.len() }),
        };
        obj.insert("container".into(), value);
    }
    if !record.messages.is_empty() {
        let messages: Vec<Value> = record
            .messages
            .iter()
            .map(|entry| {
                json!({
                    "timestamp": entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                    "text": entry.text,
                })
            })
            .collect();
        obj.insert("messages".into(), Value::Array(messages));
    }
    Value::Object(obj)
}

pub fn render_issues(issues: &[LocationIssue], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if issues.is_empty() {
                return "✓ All model locations verified.".to_string();
            }
            issues
                .iter()
                .map(|issue| match &issue.location {
                    Some(location) => {
                        format!("✗ {} ({location}): {}", issue.model, issue.problem)
                    }
                    None => format!("✗ {}: {}", issue.model, issue.problem),
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        OutputFormat::Json => json!({
            "event": "check",
            "ok": issues.is_empty(),
            "issues": issues
                .iter()
                .map(|issue| json!({
                    "model": issue.model,
                    "location": issue.location,
                    "problem": issue.problem,
                }))
                .collect::<Vec<_>>(),
        })
        .to_string(),
    }
}

pub fn render_install(outcome: InstallOutcome, root: &str, format: OutputFormat) -> String {
    let (status, from) = match outcome {
        InstallOutcome::Installed => ("installed", None),
        InstallOutcome::Upgraded { from } => ("upgraded", Some(from)),
        InstallOutcome::AlreadyCurrent => ("current", None),
    };
    match format {
        OutputFormat::Text => match from {
            Some(from) => format!("✓ Upgraded model repository at {root} from {from}"),
            None if status == "installed" => format!("✓ Installed model repository at {root}"),
            None => format!("Model repository at {root} is already up to date"),
        },
        OutputFormat::Json => json!({
            "event": "init",
            "status": status,
            "root": root,
            "from": from.map(|f| f.to_string()),
        })
        .to_string(),
    }
}

pub fn render_upgrade(outcome: UpgradeOutcome, root: &str, format: OutputFormat) -> String {
    let from = match outcome {
        UpgradeOutcome::Upgraded { from } => Some(from),
        UpgradeOutcome::AlreadyCurrent => None,
    };
    match format {
        OutputFormat::Text => match from {
            Some(from) => format!("✓ Upgraded model repository at {root} from {from}"),
            None => format!("Model repository at {root} is already up to date"),
        },
        OutputFormat::Json => json!({
            "event": "upgrade",
            "status": if from.is_some() { "upgraded" } else { "current" },
            "root": root,
            "from": from.map(|f| f.to_string()),
        })
        .to_string(),
    }
}

/// One-line confirmation for commands without a richer result
pub fn render_done(command: &str, subject: &str, text: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("✓ {text}"),
        OutputFormat::Json => json!({
            "event": "complete",
            "command": command,
            "subject": subject,
        })
        .to_string(),
    }
}
