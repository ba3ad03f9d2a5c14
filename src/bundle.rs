//! Persisted forms of compiled units: a directory bundle of Python sources and an
//! opaque bincode archive.

use crate::assembler::CompiledUnit;
use crate::error::BundleError;
use crate::linker::DependencyManifest;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    /// Path relative to the bundle root.
    pub path: String,
    pub contents: String,
}

/// The files of a deployable service package.
///
/// Per unit `service_{idx}.py` and `service_{idx}_graph.json`, plus one
/// `requirements.txt` merged across units. The same units always produce
/// byte-identical files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    files: Vec<BundleFile>,
}

impl Bundle {
    pub fn from_units(units: &[CompiledUnit]) -> Result<Self, BundleError> {
        let mut files = Vec::with_capacity(units.len() * 2 + 2);
        files.push(BundleFile {
            path: "__init__.py".to_string(),
            contents: String::new(),
        });
        for (idx, unit) in units.iter().enumerate() {
            let graph_json = serde_json::to_string_pretty(&unit.graph)
                .map_err(|e| BundleError::Serialization(e.to_string()))?;
            files.push(BundleFile {
                path: format!("service_{}.py", idx),
                contents: unit.source_text.clone(),
            });
            files.push(BundleFile {
                path: format!("service_{}_graph.json", idx),
                contents: graph_json,
            });
        }
        let requirements =
            DependencyManifest::merged(units.iter().map(|u| &u.dependency_manifest));
        files.push(BundleFile {
            path: "requirements.txt".to_string(),
            contents: requirements.to_requirements_txt(),
        });
        Ok(Self { files })
    }

    pub fn files(&self) -> &[BundleFile] {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&BundleFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Writes every file below `dir`, creating it if needed.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<(), BundleError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| BundleError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        for file in &self.files {
            let path = dir.join(&file.path);
            fs::write(&path, &file.contents).map_err(|source| BundleError::Io {
                path: path.display().to_string(),
                source,
            })?;
        }
        info!(dir = dir.display().to_string(), files = self.files.len(); "Bundle written");
        Ok(())
    }
}

/// All compiled units of a run, stored in bincode format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledArchive {
    pub units: Vec<CompiledUnit>,
}

impl CompiledArchive {
    pub fn new(units: Vec<CompiledUnit>) -> Self {
        Self { units }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, BundleError> {
        encode_to_vec(self, standard()).map_err(|e| BundleError::Serialization(e.to_string()))
    }

    /// Saves the archive to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BundleError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, bytes).map_err(|source| BundleError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Loads an archive from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BundleError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| BundleError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BundleError> {
        decode_from_slice(bytes, standard())
            .map(|(archive, _)| archive)
            .map_err(|e| BundleError::Serialization(e.to_string()))
    }
}
