use crate::graph::Graph;
use crate::linker::DependencyManifest;
use serde::{Deserialize, Serialize};

/// The final, syntax-checked artifact of one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledUnit {
    pub route_id: String,
    /// Name of the orchestration function inside `source_text`.
    pub function_name: String,
    /// A complete Python module.
    pub source_text: String,
    pub dependency_manifest: DependencyManifest,
    /// The graph the orchestration function was generated from.
    pub graph: Graph,
}

impl CompiledUnit {
    pub fn requirements_txt(&self) -> String {
        self.dependency_manifest.to_requirements_txt()
    }
}
