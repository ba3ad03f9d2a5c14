use crate::graph::{ElseIf, Node};

/// What a renderable statement renders, together with the graph element it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'g> {
    Start(&'g Node),
    If { node: &'g Node, condition: &'g str },
    ElseIf(&'g ElseIf),
    Else,
    Action(&'g Node),
    Return(&'g Node),
    /// Placeholder body for an arm with no statements of its own.
    Pass,
}

/// Discriminant of a `Statement`, convenient for assertions and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Start,
    If,
    ElseIf,
    Else,
    Action,
    Return,
    Pass,
}

/// One line of the orchestration function with its resolved nesting depth.
///
/// Borrows from the graph it was linearized from and is consumed by the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderableStatement<'g> {
    pub depth: usize,
    pub statement: Statement<'g>,
}

impl<'g> RenderableStatement<'g> {
    pub(super) fn new(depth: usize, statement: Statement<'g>) -> Self {
        Self { depth, statement }
    }

    pub fn kind(&self) -> StatementKind {
        match self.statement {
            Statement::Start(_) => StatementKind::Start,
            Statement::If { .. } => StatementKind::If,
            Statement::ElseIf(_) => StatementKind::ElseIf,
            Statement::Else => StatementKind::Else,
            Statement::Action(_) => StatementKind::Action,
            Statement::Return(_) => StatementKind::Return,
            Statement::Pass => StatementKind::Pass,
        }
    }

    /// Name of the referenced node, if the statement refers to one.
    pub fn node_name(&self) -> Option<&'g str> {
        match self.statement {
            Statement::Start(node)
            | Statement::If { node, .. }
            | Statement::Action(node)
            | Statement::Return(node) => Some(node.name.as_str()),
            Statement::ElseIf(_) | Statement::Else | Statement::Pass => None,
        }
    }
}
