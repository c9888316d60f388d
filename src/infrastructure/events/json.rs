//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for scripting.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let json = match event {
            DeployEvent::Resolved {
                name,
                version,
                auto,
            } => {
                serde_json::json!({
                    "event": "resolved",
                    "command": "deploy",
                    "name": name,
                    "version": version.to_string(),
                    "auto": auto,
                })
            }

            DeployEvent::Reserved { identity } => {
                serde_json::json!({
                    "event": "reserved",
                    "command": "deploy",
                    "identity": identity.to_string(),
                })
            }

            DeployEvent::Conflict { identity } => {
                serde_json::json!({
                    "event": "conflict",
                    "command": "deploy",
                    "identity": identity.to_string(),
                })
            }

            DeployEvent::Produced { identity, location } => {
                serde_json::json!({
                    "event": "produced",
                    "command": "deploy",
                    "identity": identity.to_string(),
                    "location": location,
                })
            }

            DeployEvent::Committed { identity, location } => {
                serde_json::json!({
                    "event": "committed",
                    "command": "deploy",
                    "identity": identity.to_string(),
                    "location": location,
                })
            }

            DeployEvent::RolledBack { identity, reason } => {
                serde_json::json!({
                    "event": "rolled_back",
                    "command": "deploy",
                    "identity": identity.to_string(),
                    "reason": reason,
                })
            }
        };

        self.write_event(json);
    }
}
