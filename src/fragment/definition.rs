use serde::{Deserialize, Serialize};

/// A third-party package a fragment depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredPackage {
    pub package_name: String,
    #[serde(default)]
    pub version: Option<String>,
    /// Version comparison operator such as `>=`. Only meaningful with a version.
    #[serde(default)]
    pub specifier: Option<String>,
}

impl RequiredPackage {
    pub fn new(package_name: &str) -> Self {
        Self {
            package_name: package_name.to_string(),
            version: None,
            specifier: None,
        }
    }

    pub fn pinned(package_name: &str, version: &str) -> Self {
        Self {
            version: Some(version.to_string()),
            ..Self::new(package_name)
        }
    }

    pub fn with_specifier(mut self, specifier: &str) -> Self {
        self.specifier = Some(specifier.to_string());
        self
    }

    /// The requirement line for this package, e.g. `requests>=2.31`.
    pub fn requirement(&self) -> String {
        match (&self.version, &self.specifier) {
            (Some(version), Some(specifier)) => {
                format!("{}{}{}", self.package_name, specifier, version)
            }
            (Some(version), None) => format!("{}=={}", self.package_name, version),
            _ => self.package_name.clone(),
        }
    }
}

/// A type as used by a fragment signature or a structured field.
///
/// `annotation` is the text written in code (`str`, `list[Item]`, ...). When the
/// annotation refers to a structured type, `definition` carries it so the linker
/// can emit its declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub annotation: String,
    #[serde(default)]
    pub definition: Option<Box<TypeDefinition>>,
}

impl TypeRef {
    pub fn primitive(annotation: &str) -> Self {
        Self {
            annotation: annotation.to_string(),
            definition: None,
        }
    }

    pub fn structured(definition: TypeDefinition) -> Self {
        Self {
            annotation: definition.name.clone(),
            definition: Some(Box::new(definition)),
        }
    }

    /// A structured reference written with a custom annotation, e.g. `list[Item]`.
    pub fn wrapping(annotation: &str, definition: TypeDefinition) -> Self {
        Self {
            annotation: annotation.to_string(),
            definition: Some(Box::new(definition)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub type_ref: TypeRef,
    #[serde(default)]
    pub description: String,
}

impl FieldDefinition {
    pub fn new(name: &str, type_ref: TypeRef, description: &str) -> Self {
        Self {
            name: name.to_string(),
            type_ref,
            description: description.to_string(),
        }
    }
}

/// A named structured type. Identity is the name: one declaration per compiled unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<FieldDefinition>,
}

impl TypeDefinition {
    pub fn new(name: &str, description: &str, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            fields,
        }
    }
}

/// A unit of generated code and the sub-steps it is composed of.
///
/// Leaves must carry a body. Composites may omit theirs, in which case they only
/// aggregate their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionFragment {
    pub function_name: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub import_statements: Vec<String>,
    #[serde(default)]
    pub required_packages: Vec<RequiredPackage>,
    #[serde(default)]
    pub arguments: Vec<FieldDefinition>,
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub children: Vec<FunctionFragment>,
}

impl FunctionFragment {
    pub fn new(function_name: &str) -> Self {
        Self {
            function_name: function_name.to_string(),
            body: None,
            import_statements: Vec::new(),
            required_packages: Vec::new(),
            arguments: Vec::new(),
            return_type: None,
            children: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn with_import(mut self, import: &str) -> Self {
        self.import_statements.push(import.to_string());
        self
    }

    pub fn with_package(mut self, package: RequiredPackage) -> Self {
        self.required_packages.push(package);
        self
    }

    pub fn with_argument(mut self, name: &str, type_ref: TypeRef) -> Self {
        self.arguments.push(FieldDefinition::new(name, type_ref, ""));
        self
    }

    pub fn with_return(mut self, type_ref: TypeRef) -> Self {
        self.return_type = Some(type_ref);
        self
    }

    pub fn with_child(mut self, child: FunctionFragment) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
