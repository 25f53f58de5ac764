//! Template registry mapping controller identifiers to template files
//!
//! The registry is built once at startup, either from the built-in
//! [`Controller`] table or from a TOML file, and is read-only afterwards.
//!
//! # File format
//!
//! ```toml
//! [metadata]
//! name = "KDOS boards"
//! base_dir = "/opt/kdos"
//!
//! [targets]
//! stm32f4 = "templates/stm32f4/bsp.c"
//! ```

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::controller::Controller;
use crate::error::RegistryError;

/// Registry of supported targets
#[derive(Debug, Clone)]
pub struct Registry {
    /// Optional name for the registry
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Lowercase identifier -> template path
    targets: BTreeMap<String, PathBuf>,
    /// Base path for resolving relative template paths
    base_path: Option<PathBuf>,
}

/// TOML structure for deserializing registries
#[derive(Deserialize)]
struct TomlRegistry {
    metadata: Option<TomlMetadata>,
    targets: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
    base_dir: Option<PathBuf>,
}

impl Registry {
    /// Registry of every built-in controller
    pub fn builtin() -> Self {
        let targets = Controller::ALL
            .iter()
            .map(|c| (c.to_string(), PathBuf::from(c.template_path())))
            .collect();

        Self {
            name: None,
            description: None,
            targets,
            base_path: None,
        }
    }

    /// Load a registry from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Set the base path for template resolution
    pub fn with_base_path(mut self, path: PathBuf) -> Self {
        self.base_path = Some(path);
        self
    }

    /// Get the base path for template resolution
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Get all target identifiers, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(|s| s.as_str())
    }

    /// Number of registered targets
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Check if a target is registered (case-insensitive)
    pub fn contains(&self, target: &str) -> bool {
        self.targets.contains_key(&target.to_lowercase())
    }

    /// Look up a target (case-insensitive) and resolve its template path
    ///
    /// Returns None if the target is not registered. The returned path is not
    /// checked for existence.
    pub fn resolve(&self, target: &str) -> Option<PathBuf> {
        self.targets
            .get(&target.to_lowercase())
            .map(|p| self.resolve_path(p))
    }

    /// Resolve a template path against the base path
    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }
}

impl FromStr for Registry {
    type Err = RegistryError;

    /// Load a registry from a TOML string
    fn from_str(content: &str) -> Result<Self, RegistryError> {
        let parsed: TomlRegistry = toml::from_str(content)?;

        let mut targets = BTreeMap::new();
        for (key, path) in parsed.targets {
            match targets.entry(key.to_lowercase()) {
                Entry::Occupied(e) => {
                    return Err(RegistryError::DuplicateTarget {
                        name: e.key().clone(),
                    });
                }
                Entry::Vacant(e) => {
                    e.insert(PathBuf::from(path));
                }
            }
        }

        let (name, description, base_path) = match parsed.metadata {
            Some(m) => (m.name, m.description, m.base_dir),
            None => (None, None, None),
        };

        Ok(Registry {
            name,
            description,
            targets,
            base_path,
        })
    }
}
