use serde::{Deserialize, Serialize};

/// The role a node plays in the control flow of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Start,
    Branch,
    BranchElseIf,
    Action,
    End,
}

impl NodeKind {
    pub fn is_branch(self) -> bool {
        matches!(self, NodeKind::Branch | NodeKind::BranchElseIf)
    }
}

/// A named, typed value flowing into or out of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub param_type: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub description: String,
}

impl Param {
    pub fn new(name: &str, param_type: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type: param_type.to_string(),
            optional: false,
            description: String::new(),
        }
    }
}

/// An additional guarded arm of a branch node, rendered as `elif`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElseIf {
    pub condition: String,
    pub true_next_node_name: String,
}

/// A single step of a computation graph.
///
/// Successors are referenced by name. Start and action nodes use `next_node_name`;
/// branch nodes use `condition`, `true_next_node_name`, `false_next_node_name`
/// and any `else_ifs`. End nodes have no successor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub input_params: Vec<Param>,
    #[serde(default)]
    pub output_params: Vec<Param>,
    #[serde(default)]
    pub next_node_name: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub true_next_node_name: Option<String>,
    #[serde(default)]
    pub false_next_node_name: Option<String>,
    #[serde(default)]
    pub else_ifs: Vec<ElseIf>,
}

impl Node {
    fn bare(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: String::new(),
            input_params: Vec::new(),
            output_params: Vec::new(),
            next_node_name: None,
            condition: None,
            true_next_node_name: None,
            false_next_node_name: None,
            else_ifs: Vec::new(),
        }
    }

    /// Entry node; its output params become the parameters of the generated function.
    pub fn start(name: &str, outputs: Vec<Param>, next: &str) -> Self {
        Self {
            output_params: outputs,
            next_node_name: Some(next.to_string()),
            ..Self::bare(name, NodeKind::Start)
        }
    }

    pub fn action(name: &str, inputs: Vec<Param>, outputs: Vec<Param>, next: &str) -> Self {
        Self {
            input_params: inputs,
            output_params: outputs,
            next_node_name: Some(next.to_string()),
            ..Self::bare(name, NodeKind::Action)
        }
    }

    pub fn branch(name: &str, condition: &str, on_true: &str, on_false: &str) -> Self {
        Self {
            condition: Some(condition.to_string()),
            true_next_node_name: Some(on_true.to_string()),
            false_next_node_name: Some(on_false.to_string()),
            ..Self::bare(name, NodeKind::Branch)
        }
    }

    /// A branch with one or more `elif` arms between the true and false arms.
    pub fn branch_else_if(
        name: &str,
        condition: &str,
        on_true: &str,
        else_ifs: Vec<ElseIf>,
        on_false: &str,
    ) -> Self {
        Self {
            else_ifs,
            ..Self::branch(name, condition, on_true, on_false)
        }
        .with_kind(NodeKind::BranchElseIf)
    }

    /// Exit node; its input params become the returned value(s).
    pub fn end(name: &str, inputs: Vec<Param>) -> Self {
        Self {
            input_params: inputs,
            ..Self::bare(name, NodeKind::End)
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// All successor names in arm order: next, or true, else-ifs, false.
    pub fn successor_names(&self) -> Vec<&str> {
        if self.kind.is_branch() {
            self.true_next_node_name
                .iter()
                .map(String::as_str)
                .chain(self.else_ifs.iter().map(|e| e.true_next_node_name.as_str()))
                .chain(self.false_next_node_name.iter().map(String::as_str))
                .collect()
        } else {
            self.next_node_name.iter().map(String::as_str).collect()
        }
    }
}

/// A branching computation graph for one API route.
///
/// The node order carries no meaning: control flow is derived solely from
/// successor references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub name: Option<String>,
    pub nodes: Vec<Node>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { name: None, nodes }
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }
}
