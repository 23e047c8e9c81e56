//! Debug drawer configuration.
//!
//! Loaded from TOML (every field optional):
//!
//! ```toml
//! enabled = true
//! development = true
//!
//! [pool]
//! primitive_batches = 64
//! mesh_instances = 64
//! vertex_lists = 64
//! vertex_list_capacity = 32
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::DebugDrawError;

/// Environment variable consulted for the default capability flag.
pub const DEVELOPMENT_ENV_VAR: &str = "DBGDRAW_DEVELOPMENT";

/// Top-level debug drawer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebugDrawConfig {
    /// Initial state of the runtime enable switch.
    pub enabled: bool,
    /// Capability flag: debug drawing only runs in development-configured
    /// processes. Fixed for the lifetime of a [`DebugDraw`](crate::DebugDraw).
    pub development: bool,
    /// Initial pool capacities.
    pub pool: PoolConfig,
}

/// Capacities reserved up front so steady-state frames do not allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Reserved slots in the live primitive-batch list.
    pub primitive_batches: usize,
    /// Reserved slots in the live mesh-instance list.
    pub mesh_instances: usize,
    /// Vertex lists created up front in the free list.
    pub vertex_lists: usize,
    /// Vertex capacity of each pre-created vertex list.
    pub vertex_list_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            primitive_batches: 64,
            mesh_instances: 64,
            vertex_lists: 64,
            vertex_list_capacity: 32,
        }
    }
}

impl Default for DebugDrawConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            development: development_default(),
            pool: PoolConfig::default(),
        }
    }
}

impl DebugDrawConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, DebugDrawError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, DebugDrawError> {
        let text = std::fs::read_to_string(path).map_err(|source| DebugDrawError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("DebugDraw: loaded config from {}", path.display());
        Ok(config)
    }

    /// A configuration with the capability flag forced on.
    pub fn development() -> Self {
        Self {
            development: true,
            ..Self::default()
        }
    }

    /// Override the capability flag.
    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Override the initial enable switch.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Default capability: the environment variable when present, otherwise
/// whether this is a debug build.
fn development_default() -> bool {
    match std::env::var(DEVELOPMENT_ENV_VAR) {
        Ok(value) => parse_flag(&value),
        Err(_) => cfg!(debug_assertions),
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
