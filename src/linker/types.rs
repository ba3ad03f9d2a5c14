use crate::config::ModelConfig;
use crate::error::LinkError;
use crate::fragment::{TypeDefinition, TypeRef};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Lets annotations name types declared later in the module, or the type itself.
pub const POSTPONED_ANNOTATIONS: &str = "from __future__ import annotations";

/// Generated source of one structured type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub source: String,
}

/// Expands structured types into declarations, once per type name.
///
/// One expander lives for exactly one link call and is passed down the fragment
/// recursion, so concurrent links never share it.
pub(super) struct TypeExpander<'f, 'c> {
    models: &'c ModelConfig,
    seen: AHashMap<&'f str, &'f TypeDefinition>,
    declared: Vec<&'f TypeDefinition>,
    declarations: Vec<TypeDeclaration>,
}

impl<'f, 'c> TypeExpander<'f, 'c> {
    pub(super) fn new(models: &'c ModelConfig) -> Self {
        Self {
            models,
            seen: AHashMap::new(),
            declared: Vec::new(),
            declarations: Vec::new(),
        }
    }

    /// Declares the type behind `type_ref` and everything it references, nested
    /// types first.
    pub(super) fn expand(&mut self, type_ref: &'f TypeRef) -> Result<(), LinkError> {
        let Some(definition) = type_ref.definition.as_deref() else {
            return Ok(());
        };
        if let Some(existing) = self.seen.get(definition.name.as_str()) {
            if !same_shape(existing, definition) {
                return Err(LinkError::ConflictingTypeDefinition {
                    type_name: definition.name.clone(),
                });
            }
            // Agreeing fields can still carry diverging nested definitions.
            for field in &definition.fields {
                self.expand(&field.type_ref)?;
            }
            return Ok(());
        }

        // Marked before descending so self-references terminate.
        self.seen.insert(definition.name.as_str(), definition);
        for field in &definition.fields {
            self.expand(&field.type_ref)?;
        }
        self.declarations.push(TypeDeclaration {
            name: definition.name.clone(),
            source: render_declaration(definition, self.models),
        });
        self.declared.push(definition);
        Ok(())
    }

    /// Whether some field annotation names a declared type that is not yet defined
    /// at that point of the module: itself, or a type declared after it.
    pub(super) fn has_forward_references(&self) -> bool {
        let mut defined: AHashSet<&str> = AHashSet::with_capacity(self.declared.len());
        for definition in &self.declared {
            let forward = definition.fields.iter().any(|field| {
                identifiers(&field.type_ref.annotation)
                    .any(|name| self.seen.contains_key(name) && !defined.contains(name))
            });
            if forward {
                return true;
            }
            defined.insert(definition.name.as_str());
        }
        false
    }

    pub(super) fn into_declarations(self) -> Vec<TypeDeclaration> {
        self.declarations
    }
}

fn identifiers(annotation: &str) -> impl Iterator<Item = &str> {
    annotation
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|name| !name.is_empty())
}

/// Two definitions are the same type when their field names and annotations agree.
/// Nested definitions are compared by their own declarations, not here.
fn same_shape(a: &TypeDefinition, b: &TypeDefinition) -> bool {
    a.fields.len() == b.fields.len()
        && a
            .fields
            .iter()
            .zip(&b.fields)
            .all(|(x, y)| x.name == y.name && x.type_ref.annotation == y.type_ref.annotation)
}

fn render_declaration(definition: &TypeDefinition, models: &ModelConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "class {}({}):", definition.name, models.base_class);

    let description = definition.description.trim();
    if !description.is_empty() {
        out.push_str("    \"\"\"\n");
        for line in description.replace("\"\"\"", "\\\"\\\"\\\"").lines() {
            if line.trim().is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, "    {}", line.trim_end());
            }
        }
        out.push_str("    \"\"\"\n");
        if !definition.fields.is_empty() {
            out.push('\n');
        }
    }

    for field in &definition.fields {
        let _ = write!(out, "    {}: {}", field.name, field.type_ref.annotation);
        let comment = field.description.split_whitespace().collect::<Vec<_>>().join(" ");
        if !comment.is_empty() {
            let _ = write!(out, "  # {}", comment);
        }
        out.push('\n');
    }

    if definition.fields.is_empty() && description.is_empty() {
        out.push_str("    pass\n");
    }
    out
}
