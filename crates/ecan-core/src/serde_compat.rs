//! JSON serde for attention-store snapshots.
//!
//! The wire format uses camelCase field names and stores VLTI as a bare
//! `0|1` integer. Snapshotting is an external concern — this module only
//! defines the format; callers decide where the bytes go.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attention::AttentionValue;
use crate::config::{ConfigError, EcanConfig};
use crate::system::AttentionSystem;
use crate::time::{now_unix_millis, unix_millis_to_iso8601};

pub const CURRENT_VERSION: &str = "1";

// --- Wire format types ---

#[derive(Serialize, Deserialize, Debug)]
pub struct WireSnapshot {
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
    pub bank: f64,
    pub values: Vec<WireValue>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireValue {
    #[serde(rename = "nodeId")]
    pub node_id: String,
    pub sti: i64,
    pub lti: i64,
    /// 0 or 1 on the wire; any non-zero reads as set.
    #[serde(default)]
    pub vlti: u8,
}

impl WireSnapshot {
    /// Convert wire format to a live system under the given config.
    /// Out-of-bounds entries are clamped on restore.
    pub fn into_system(self, config: EcanConfig) -> Result<AttentionSystem, ConfigError> {
        let entries = self.values.into_iter().map(|v| {
            (
                v.node_id,
                AttentionValue::new(v.sti, v.lti, v.vlti != 0),
            )
        });
        AttentionSystem::restore(config, entries, self.bank)
    }

    /// Capture a system's store and bank in wire form.
    pub fn from_system(system: &AttentionSystem) -> Self {
        let mut values: Vec<WireValue> = system
            .iter()
            .map(|(id, value)| WireValue {
                node_id: id.to_string(),
                sti: value.sti,
                lti: value.lti,
                vlti: value.vlti as u8,
            })
            .collect();
        // Deterministic output regardless of map iteration order
        values.sort_by(|a, b| a.node_id.cmp(&b.node_id));

        WireSnapshot {
            version: CURRENT_VERSION.to_string(),
            timestamp: unix_millis_to_iso8601(now_unix_millis()),
            bank: system.attention_bank(),
            values,
        }
    }
}

/// Failure modes when reading a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    Config(ConfigError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Json(e) => write!(f, "snapshot JSON error: {e}"),
            SnapshotError::Config(e) => write!(f, "snapshot config error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

impl From<ConfigError> for SnapshotError {
    fn from(e: ConfigError) -> Self {
        SnapshotError::Config(e)
    }
}

/// Deserialize a JSON snapshot into a live system.
pub fn import_json(json: &str, config: EcanConfig) -> Result<AttentionSystem, SnapshotError> {
    let wire: WireSnapshot = serde_json::from_str(json)?;
    Ok(wire.into_system(config)?)
}

/// Serialize a system's store and bank to JSON wire format.
pub fn export_json(system: &AttentionSystem) -> Result<String, serde_json::Error> {
    let wire = WireSnapshot::from_system(system);
    serde_json::to_string_pretty(&wire)
}
