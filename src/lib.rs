//! bspgen - board support package generator for the KDOS kernel
//!
//! Copies the BSP template registered for a target controller to an output
//! file. The registry is either the built-in controller table or a TOML file.
//!
//! # Example
//!
//! ```rust,no_run
//! use bspgen::{generate, GenerationRequest, Registry};
//!
//! let registry = Registry::builtin();
//! let generated = generate(&registry, &GenerationRequest::new("STM32F4")).unwrap();
//! println!("{}", generated);
//! ```

pub mod controller;
pub mod error;
pub mod generate;
pub mod registry;

use std::path::PathBuf;

pub use controller::Controller;
pub use error::{GenerateError, RegistryError};
pub use generate::{generate, list_targets, GenerationRequest, Generated, DEFAULT_OUTPUT};
pub use registry::Registry;

/// Configuration for building the registry
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// TOML registry file replacing the built-in table
    pub registry_file: Option<PathBuf>,
    /// Base directory for relative template paths
    pub templates_dir: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the registry file
    pub fn with_registry_file(mut self, path: Option<PathBuf>) -> Self {
        self.registry_file = path;
        self
    }

    /// Set the templates directory
    pub fn with_templates_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.templates_dir = dir;
        self
    }

    /// Build the registry this configuration describes
    ///
    /// The templates directory, when set, takes precedence over a `base_dir`
    /// from the registry file.
    pub fn load_registry(&self) -> Result<Registry, RegistryError> {
        let registry = match &self.registry_file {
            Some(path) => Registry::from_file(path)?,
            None => Registry::builtin(),
        };

        Ok(match &self.templates_dir {
            Some(dir) => registry.with_base_path(dir.clone()),
            None => registry,
        })
    }
}
