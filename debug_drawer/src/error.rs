//! Debug drawing error types.

use std::path::PathBuf;

/// Errors raised by the fallible setup paths of the debug drawer.
///
/// Drawing calls and frame hooks never return errors: once a [`DebugDraw`](crate::DebugDraw)
/// exists, every failure degrades to a logged no-op.
#[derive(Debug, thiserror::Error)]
pub enum DebugDrawError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid TOML for [`DebugDrawConfig`](crate::DebugDrawConfig).
    #[error("failed to parse debug draw config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// The render context refused to create a material.
    #[error("material creation failed: {0}")]
    MaterialCreation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DebugDrawError::MaterialCreation("no pipeline slots".to_string());
        assert_eq!(err.to_string(), "material creation failed: no pipeline slots");

        let err = DebugDrawError::ConfigRead {
            path: PathBuf::from("dbgdraw.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to read dbgdraw.toml: missing");
    }
}
