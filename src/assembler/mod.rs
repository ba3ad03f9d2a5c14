//! Per-route assembly: graph to orchestration function, fragment tree to linked
//! module, both concatenated into one checked Python module.

mod route;
mod unit;

pub use route::RouteSpec;
pub use unit::CompiledUnit;

use crate::config::AssemblerConfig;
use crate::emitter::CodeEmitter;
use crate::error::AssemblyError;
use crate::fragment::FunctionFragment;
use crate::graph::Graph;
use crate::linearizer::linearize;
use crate::linker::{FunctionTreeLinker, LinkedModule};
use crate::syntax::{self, PythonSyntax, SyntaxChecker};
use log::{info, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything needed to assemble one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyJob {
    pub route: RouteSpec,
    pub graph: Graph,
    pub fragment: FunctionFragment,
}

pub struct Assembler {
    config: AssemblerConfig,
    checker: Box<dyn SyntaxChecker>,
    emitter: CodeEmitter,
}

pub struct AssemblerBuilder {
    config: AssemblerConfig,
    checker: Box<dyn SyntaxChecker>,
}

impl AssemblerBuilder {
    pub fn new(config: AssemblerConfig) -> Self {
        Self {
            config,
            checker: Box::new(PythonSyntax),
        }
    }

    /// Replaces the Python syntax checker, e.g. to target another dialect.
    pub fn with_syntax_checker(mut self, checker: Box<dyn SyntaxChecker>) -> Self {
        self.checker = checker;
        self
    }

    pub fn build(self) -> Assembler {
        Assembler {
            emitter: CodeEmitter::new(self.config.indent_width),
            config: self.config,
            checker: self.checker,
        }
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::builder(AssemblerConfig::default()).build()
    }
}

impl Assembler {
    pub fn builder(config: AssemblerConfig) -> AssemblerBuilder {
        AssemblerBuilder::new(config)
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Assembles one route into a `CompiledUnit`.
    ///
    /// # Errors
    ///
    /// Returns the first failure of linearization, linking or the final syntax
    /// check, tagged with the route id. No unit is produced on failure.
    pub fn assemble(
        &self,
        route: &RouteSpec,
        graph: &Graph,
        fragment: &FunctionFragment,
    ) -> Result<CompiledUnit, AssemblyError> {
        let function_name = route.function_name(&self.config.function_suffix);
        info!(route_id = route.id, function_name = function_name; "Assembling route");

        let statements = linearize(graph).map_err(|source| AssemblyError::Graph {
            route_id: route.id.clone(),
            source,
        })?;
        let orchestration = self.emitter.emit(&statements, &function_name);
        trace!(route_id = route.id; "Orchestration function:\n{}", orchestration);

        let linked = FunctionTreeLinker::new(self.checker.as_ref(), &self.config)
            .link(fragment)
            .map_err(|source| AssemblyError::Link {
                route_id: route.id.clone(),
                source,
            })?;

        let source_text = compose_module(&linked, &orchestration);
        syntax::validate(self.checker.as_ref(), &function_name, &source_text).map_err(
            |source| AssemblyError::Syntax {
                route_id: route.id.clone(),
                source,
            },
        )?;
        trace!(route_id = route.id; "Assembled module:\n{}", source_text);

        info!(
            route_id = route.id,
            statements = statements.len(),
            packages = linked.dependency_manifest.len();
            "Route assembled"
        );
        Ok(CompiledUnit {
            route_id: route.id.clone(),
            function_name,
            source_text,
            dependency_manifest: linked.dependency_manifest,
            graph: graph.clone(),
        })
    }

    /// Assembles every job independently and in parallel. Results are returned in
    /// input order; one failing route does not affect the others.
    pub fn assemble_all(&self, jobs: &[AssemblyJob]) -> Vec<Result<CompiledUnit, AssemblyError>> {
        jobs.par_iter()
            .map(|job| self.assemble(&job.route, &job.graph, &job.fragment))
            .collect()
    }
}

/// Imports, type declarations, fragment bodies and the orchestration function, in
/// that order, separated by two blank lines.
fn compose_module(linked: &LinkedModule, orchestration: &str) -> String {
    let sections = [
        linked.imports_text(),
        linked.declarations_text(),
        linked.body_text.trim_end().to_string(),
        orchestration.trim_end().to_string(),
    ];
    let mut module = sections
        .iter()
        .filter(|section| !section.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n\n\n");
    module.push('\n');
    module
}
