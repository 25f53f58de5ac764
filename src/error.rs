//! Error types for registry loading and BSP generation

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or parsing a registry file
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read registry file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse registry TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Two target keys that only differ by case
    #[error("duplicate target definition: {name}")]
    DuplicateTarget { name: String },
}

/// Errors that can occur while generating a BSP file
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Target not in the registry, or its template is missing on disk
    #[error("Controller '{target}' not supported.")]
    Unsupported { target: String },

    /// Copying the template failed
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Create an unsupported-target error
    pub fn unsupported(target: impl Into<String>) -> Self {
        Self::Unsupported {
            target: target.into(),
        }
    }

    /// Whether this is the recoverable unsupported-target condition
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
