//! Error types for xr-manip.
//!
//! The per-frame path never fails; these cover configuration loading, scene
//! lookups made outside a frame, and backends that report failures which the
//! engine then swallows.

use std::path::PathBuf;

use crate::scene::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum ManipError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Unknown scene node: {0}")]
    UnknownNode(NodeId),

    #[error("Haptic actuator error: {0}")]
    Haptic(String),
}

pub type Result<T> = std::result::Result<T, ManipError>;
