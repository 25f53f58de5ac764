//! Target listing and BSP file generation

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::GenerateError;
use crate::registry::Registry;

/// Output path used when none is given
pub const DEFAULT_OUTPUT: &str = "bsp_mycpu.c";

/// A single request to materialize a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Controller identifier, matched case-insensitively
    pub target: String,
    /// Destination file
    pub output: PathBuf,
}

impl GenerationRequest {
    /// Create a request writing to [`DEFAULT_OUTPUT`]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }

    /// Set the destination file
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

/// Result of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Template the output was copied from
    pub template: PathBuf,
    /// Output path as requested
    pub output: PathBuf,
    /// Number of bytes copied
    pub bytes: u64,
}

impl fmt::Display for Generated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generated {} from template {}",
            self.output.display(),
            self.template.display()
        )
    }
}

/// Write the list of supported controllers
pub fn list_targets<W: Write>(registry: &Registry, out: &mut W) -> io::Result<()> {
    if let Some(name) = &registry.name {
        writeln!(out, "{}", name)?;
    }
    if let Some(description) = &registry.description {
        writeln!(out, "{}", description)?;
    }
    writeln!(out, "Available controllers:")?;
    for name in registry.names() {
        writeln!(out, "  - {}", name)?;
    }
    Ok(())
}

/// Copy the template registered for `request.target` to `request.output`
///
/// An unknown target, or a registered target whose template is missing on
/// disk, yields [`GenerateError::Unsupported`] and nothing is written. An
/// existing output file is overwritten. An output naming an existing
/// directory receives a file named after the template.
pub fn generate(registry: &Registry, request: &GenerationRequest) -> Result<Generated, GenerateError> {
    let template = match registry.resolve(&request.target) {
        Some(path) if path.exists() => path,
        Some(path) => {
            warn!(
                controller = %request.target,
                template = %path.display(),
                "registered template is missing"
            );
            return Err(GenerateError::unsupported(&request.target));
        }
        None => {
            debug!(controller = %request.target, "controller not in registry");
            return Err(GenerateError::unsupported(&request.target));
        }
    };

    let destination = destination_path(&template, &request.output);
    let io_error = |source| GenerateError::Io {
        from: template.clone(),
        to: destination.clone(),
        source,
    };

    // fs::copy truncates the destination before reading the source
    if is_same_file(&template, &destination) {
        return Err(io_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source and destination are the same file",
        )));
    }

    debug!(
        template = %template.display(),
        output = %destination.display(),
        "copying template"
    );
    let bytes = fs::copy(&template, &destination).map_err(io_error)?;

    Ok(Generated {
        template,
        output: request.output.clone(),
        bytes,
    })
}

/// File actually written for `output`
fn destination_path(template: &Path, output: &Path) -> PathBuf {
    match template.file_name() {
        Some(file_name) if output.is_dir() => output.join(file_name),
        _ => output.to_path_buf(),
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
