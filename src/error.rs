use thiserror::Error;

/// Errors that make a computation graph impossible to linearize.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphStructureError {
    #[error("Graph has no start node")]
    MissingStart,

    #[error("Graph has multiple start nodes: {}", .0.join(", "))]
    MultipleStarts(Vec<String>),

    #[error("Node name '{0}' is used by more than one node")]
    DuplicateNode(String),

    #[error("Node '{node}' references successor '{successor}', which does not exist")]
    UnknownSuccessor { node: String, successor: String },

    #[error("Start node '{start}' is used as a successor of node '{predecessor}'")]
    StartHasPredecessor { start: String, predecessor: String },

    #[error("Node '{0}' is not an end node but has no successor")]
    DeadEnd(String),

    #[error("End node '{0}' must not have a successor")]
    EndHasSuccessor(String),

    #[error("Branch node '{0}' has no condition")]
    MissingCondition(String),

    #[error("Branch node '{0}' is declared as else-if but has no else-if clauses")]
    MissingElseIfClauses(String),

    #[error("Successor chain forms a cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// A fragment, or a composition of fragments, that the target language does not accept.
///
/// `raw_text` is the exact text handed to the syntax checker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Fragment '{fragment_name}' failed syntax validation: {cause}")]
pub struct SyntaxValidationError {
    pub fragment_name: String,
    pub raw_text: String,
    pub cause: String,
}

/// Errors that can occur while linking a fragment tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("Leaf fragment '{fragment}' has no implementation")]
    MissingImplementation { fragment: String },

    #[error(transparent)]
    Syntax(#[from] SyntaxValidationError),

    #[error("Type '{type_name}' is defined more than once with different fields")]
    ConflictingTypeDefinition { type_name: String },

    #[error("Package '{package}' is pinned as '{first}' and '{second}'")]
    ConflictingPackagePins {
        package: String,
        first: String,
        second: String,
    },
}

/// The top-level failure of assembling one route. No partial unit is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("Route '{route_id}': invalid graph: {source}")]
    Graph {
        route_id: String,
        source: GraphStructureError,
    },

    #[error("Route '{route_id}': linking failed: {source}")]
    Link { route_id: String, source: LinkError },

    #[error("Route '{route_id}': assembled module is invalid: {source}")]
    Syntax {
        route_id: String,
        source: SyntaxValidationError,
    },
}

impl AssemblyError {
    pub fn route_id(&self) -> &str {
        match self {
            AssemblyError::Graph { route_id, .. }
            | AssemblyError::Link { route_id, .. }
            | AssemblyError::Syntax { route_id, .. } => route_id,
        }
    }
}

/// Errors raised while writing or reading persisted bundles.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Errors raised while loading an `AssemblerConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read configuration file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),
}

/// Errors that can occur when converting a custom producer format into Kumitate's model.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}
