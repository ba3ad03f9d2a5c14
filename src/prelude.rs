//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the kumitate crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kumitate::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph: Graph = serde_json::from_str(&std::fs::read_to_string("path/to/graph.json")?)?;
//! let fragment: FunctionFragment =
//!     serde_json::from_str(&std::fs::read_to_string("path/to/fragment.json")?)?;
//!
//! let assembler = Assembler::default();
//! let unit = assembler.assemble(&RouteSpec::new("r1", "Lookup", "/lookup"), &graph, &fragment)?;
//! CompiledArchive::new(vec![unit]).save("units.bin")?;
//! # Ok(())
//! # }
//! ```

// Assembly
pub use crate::assembler::{Assembler, AssemblyJob, CompiledUnit, RouteSpec};
pub use crate::bundle::{Bundle, CompiledArchive};
pub use crate::config::{AssemblerConfig, PackagePolicy};

// Canonical model
pub use crate::fragment::{
    FieldDefinition, FunctionFragment, IntoFragment, RequiredPackage, TypeDefinition, TypeRef,
};
pub use crate::graph::{ElseIf, Graph, IntoGraph, Node, NodeKind, Param};

// Pipeline stages
pub use crate::emitter::{CodeEmitter, emit};
pub use crate::linearizer::{RenderableStatement, Statement, linearize};
pub use crate::linker::{DependencyManifest, LinkedModule, link};
pub use crate::syntax::{PythonSyntax, SyntaxChecker};

// Error types
pub use crate::error::{AssemblyError, GraphStructureError, LinkError, SyntaxValidationError};

// Result type alias for convenience
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;
