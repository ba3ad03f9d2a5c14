//! Links a tree of function fragments into one importable module.
//!
//! Children are linked before their parent. Every leaf is syntax-checked with its
//! own imports; every composite is re-checked after its children's bodies are
//! concatenated, so a failure names the smallest fragment that introduced it.

pub mod manifest;
pub mod types;

pub use manifest::DependencyManifest;
pub use types::TypeDeclaration;

use crate::config::{AssemblerConfig, ModelConfig, PackagePolicy};
use crate::error::LinkError;
use crate::fragment::{FunctionFragment, RequiredPackage};
use crate::syntax::{self, PythonSyntax, SyntaxChecker};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use types::TypeExpander;

/// The result of linking a fragment tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedModule {
    /// Concatenated bodies, children before their parents.
    pub body_text: String,
    /// One declaration per structured type, nested types before their users.
    pub type_declarations: Vec<TypeDeclaration>,
    /// Imports in the order they were declared. Duplicates are kept.
    pub import_statements: Vec<String>,
    pub dependency_manifest: DependencyManifest,
}

impl LinkedModule {
    pub fn imports_text(&self) -> String {
        self.import_statements.join("\n")
    }

    pub fn declarations_text(&self) -> String {
        self.type_declarations
            .iter()
            .map(|d| d.source.trim_end())
            .join("\n\n\n")
    }
}

/// Links fragment trees against one syntax checker and configuration.
pub struct FunctionTreeLinker<'a> {
    checker: &'a dyn SyntaxChecker,
    models: &'a ModelConfig,
    policy: PackagePolicy,
}

/// Code gathered from a fragment subtree.
struct PartialLink {
    body: String,
    imports: Vec<String>,
    packages: Vec<RequiredPackage>,
}

impl<'a> FunctionTreeLinker<'a> {
    pub fn new(checker: &'a dyn SyntaxChecker, config: &'a AssemblerConfig) -> Self {
        Self {
            checker,
            models: &config.models,
            policy: config.package_policy,
        }
    }

    pub fn link(&self, root: &FunctionFragment) -> Result<LinkedModule, LinkError> {
        let mut expander = TypeExpander::new(self.models);
        let PartialLink {
            body,
            mut imports,
            mut packages,
        } = self.link_fragment(root, &mut expander)?;

        if expander.has_forward_references() {
            imports.insert(0, types::POSTPONED_ANNOTATIONS.to_string());
        }
        let type_declarations = expander.into_declarations();
        if !type_declarations.is_empty() {
            imports.push(self.models.base_import.clone());
            packages.push(RequiredPackage::new(&self.models.package));
        }
        let dependency_manifest = DependencyManifest::resolve(&packages, self.policy)?;

        debug!(
            root = root.function_name,
            types = type_declarations.len(),
            packages = dependency_manifest.len();
            "Linked fragment tree"
        );

        Ok(LinkedModule {
            body_text: body,
            type_declarations,
            import_statements: imports,
            dependency_manifest,
        })
    }

    fn link_fragment<'f>(
        &self,
        fragment: &'f FunctionFragment,
        expander: &mut TypeExpander<'f, '_>,
    ) -> Result<PartialLink, LinkError> {
        let raw_body = fragment.body.as_deref().filter(|b| !b.trim().is_empty());
        let own_body = raw_body.map(str::trim_end);

        let linked = if fragment.is_leaf() {
            let raw_body = raw_body.ok_or_else(|| LinkError::MissingImplementation {
                fragment: fragment.function_name.clone(),
            })?;
            // Checked verbatim; only the linked copy is trimmed.
            syntax::validate(
                self.checker,
                &fragment.function_name,
                &with_imports(&fragment.import_statements, raw_body),
            )?;
            PartialLink {
                body: raw_body.trim_end().to_string(),
                imports: fragment.import_statements.clone(),
                packages: fragment.required_packages.clone(),
            }
        } else {
            let mut bodies = Vec::with_capacity(fragment.children.len() + 1);
            let mut imports = Vec::new();
            let mut packages = Vec::new();
            for child in &fragment.children {
                let child_link = self.link_fragment(child, expander)?;
                bodies.push(child_link.body);
                imports.extend(child_link.imports);
                packages.extend(child_link.packages);
            }
            bodies.extend(own_body.map(str::to_string));
            imports.extend(fragment.import_statements.iter().cloned());
            packages.extend(fragment.required_packages.iter().cloned());

            let linked = PartialLink {
                body: bodies.join("\n\n"),
                imports,
                packages,
            };
            syntax::validate(
                self.checker,
                &fragment.function_name,
                &with_imports(&linked.imports, &linked.body),
            )?;
            linked
        };

        for argument in &fragment.arguments {
            expander.expand(&argument.type_ref)?;
        }
        if let Some(return_type) = &fragment.return_type {
            expander.expand(return_type)?;
        }

        debug!(fragment = fragment.function_name, leaf = fragment.is_leaf(); "Linked fragment");
        Ok(linked)
    }
}

/// Links `root` with the Python checker and the default configuration.
pub fn link(root: &FunctionFragment) -> Result<LinkedModule, LinkError> {
    let config = AssemblerConfig::default();
    FunctionTreeLinker::new(&PythonSyntax, &config).link(root)
}

fn with_imports(imports: &[String], body: &str) -> String {
    if imports.is_empty() {
        body.to_string()
    } else {
        format!("{}\n\n{}", imports.join("\n"), body)
    }
}
