//! # Kumitate - Code Assembly Compiler
//!
//! **Kumitate** turns a branching computation graph and a tree of implementation
//! fragments into one self-contained, syntax-checked Python module per API route.
//!
//! ## Core Workflow
//!
//! The compiler is format-agnostic. It operates on a canonical model of graphs
//! and fragments. The primary workflow is:
//!
//! 1.  **Load Your Data**: Parse your producer's graph and fragment formats into your own Rust structs.
//! 2.  **Convert to Kumitate's Model**: Implement `IntoGraph` and `IntoFragment` to translate them into `Graph` and `FunctionFragment`.
//! 3.  **Assemble**: Build an `Assembler` with `Assembler::builder` and assemble each route into a `CompiledUnit`.
//! 4.  **Ship**: Write the units as a `Bundle` of Python sources and a merged `requirements.txt`, or save them as a `CompiledArchive`.
//!
//! Internally, assembly runs the control-flow linearizer and code emitter over the
//! graph, links the fragment tree, and validates the concatenated module.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kumitate::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let graph = Graph::new(vec![
//!         Node::start("request", vec![Param::new("url", "str")], "fetch"),
//!         Node::action(
//!             "fetch",
//!             vec![Param::new("url", "str")],
//!             vec![Param::new("page", "str")],
//!             "response",
//!         ),
//!         Node::end("response", vec![Param::new("page", "str")]),
//!     ]);
//!
//!     let fragment = FunctionFragment::new("fetch")
//!         .with_import("import requests")
//!         .with_package(RequiredPackage::pinned("requests", "2.31.0"))
//!         .with_body("def fetch(url: str) -> str:\n    return requests.get(url).text\n");
//!
//!     let route = RouteSpec::new("pages-get", "Get Page", "/pages");
//!     let assembler = Assembler::builder(AssemblerConfig::default()).build();
//!     let unit = assembler.assemble(&route, &graph, &fragment)?;
//!
//!     println!("{}", unit.source_text);
//!     Bundle::from_units(&[unit])?.write_to("out")?;
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod bundle;
pub mod config;
pub mod emitter;
pub mod error;
pub mod fragment;
pub mod graph;
pub mod linearizer;
pub mod linker;
pub mod prelude;
pub mod syntax;

#[cfg(feature = "python-bindings")]
mod python;
