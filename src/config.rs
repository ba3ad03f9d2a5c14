//! Configuration of the assembler.
//!
//! All types deserialize from TOML with every field optional:
//!
//! ```toml
//! indent_width = 4
//! function_suffix = "_request"
//! package_policy = "strict"
//!
//! [models]
//! base_import = "from pydantic import BaseModel"
//! base_class = "BaseModel"
//! package = "pydantic"
//! ```

use crate::emitter::DEFAULT_INDENT_WIDTH;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How conflicting version pins of one package are resolved in a dependency manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackagePolicy {
    /// The first declared version/specifier pair is kept; later ones are logged.
    #[default]
    FirstWins,
    /// Differing pins for the same package fail the link.
    Strict,
}

/// How structured types are declared in generated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Import line added to modules that declare structured types.
    pub base_import: String,
    /// Base class every generated type declaration derives from.
    pub base_class: String,
    /// Package added to the manifest of modules that declare structured types.
    pub package: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_import: "from pydantic import BaseModel".to_string(),
            base_class: "BaseModel".to_string(),
            package: "pydantic".to_string(),
        }
    }
}

/// Top-level assembler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Spaces per nesting level of emitted code.
    pub indent_width: usize,
    /// Appended to route names when deriving the orchestration function name.
    pub function_suffix: String,
    pub package_policy: PackagePolicy,
    pub models: ModelConfig,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            function_suffix: "_request".to_string(),
            package_policy: PackagePolicy::default(),
            models: ModelConfig::default(),
        }
    }
}

impl AssemblerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
