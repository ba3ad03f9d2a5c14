//! Control-flow linearization.
//!
//! Turns a branching `Graph` into the ordered, depth-annotated statements of a
//! single function body. Branch arms are nested one level deeper than their
//! branch and rejoin the enclosing path at their merge point.

use crate::error::GraphStructureError;
use crate::graph::{Graph, NodeKind};
use log::{debug, trace};

mod index;
mod merge;
pub mod statement;

use index::{GraphIndex, NodeId};
pub use statement::{RenderableStatement, Statement, StatementKind};

/// Linearizes a graph into renderable statements.
///
/// # Errors
///
/// Returns a `GraphStructureError` if the graph has no or several start nodes,
/// dangling or unknown successors, malformed branches, or a cycle.
pub fn linearize(graph: &Graph) -> Result<Vec<RenderableStatement<'_>>, GraphStructureError> {
    Ok(Linearizer::new(graph)?.run())
}

/// Walks a validated graph and collects its statements.
pub struct Linearizer<'g> {
    index: GraphIndex<'g>,
    statements: Vec<RenderableStatement<'g>>,
}

impl<'g> Linearizer<'g> {
    /// Indexes and validates the graph.
    pub fn new(graph: &'g Graph) -> Result<Self, GraphStructureError> {
        Ok(Self {
            index: GraphIndex::build(graph)?,
            statements: Vec::with_capacity(graph.nodes.len() + 1),
        })
    }

    pub fn run(mut self) -> Vec<RenderableStatement<'g>> {
        let start = self.index.start();
        self.push(0, Statement::Start(self.index.node(start)));
        let first = self.index.next(start);
        self.walk(first, &[], None, 1);
        trace!(statements = self.statements.len(); "Linearization finished");
        self.statements
    }

    fn push(&mut self, depth: usize, statement: Statement<'g>) {
        self.statements
            .push(RenderableStatement::new(depth, statement));
    }

    /// Emits the straight-line path from `entry` until it returns or reaches one of
    /// `boundaries`. Only branches recurse, so the call depth follows branch nesting.
    ///
    /// `exit` is the node control reaches when the emitted block ends without
    /// returning. Stopping there falls through in the generated code. Any other
    /// boundary belongs to an enclosing branch whose merge continuation is not
    /// next in line, so the path from it is inlined up to its return.
    fn walk(
        &mut self,
        entry: NodeId,
        boundaries: &[NodeId],
        exit: Option<NodeId>,
        depth: usize,
    ) {
        let mut current = entry;
        loop {
            if boundaries.contains(&current) {
                if exit == Some(current) {
                    return;
                }
                debug!(node = self.index.name(current); "Inlining path past an enclosing merge point");
                return self.walk(current, &[], None, depth);
            }
            let node = self.index.node(current);
            match node.kind {
                NodeKind::End => {
                    self.push(depth, Statement::Return(node));
                    return;
                }
                NodeKind::Branch | NodeKind::BranchElseIf => {
                    match self.walk_branch(current, boundaries, exit, depth) {
                        Some(merge) => current = merge,
                        None => return,
                    }
                }
                NodeKind::Start | NodeKind::Action => {
                    self.push(depth, Statement::Action(node));
                    current = self.index.next(current);
                }
            }
        }
    }

    /// Emits a branch and all of its arms, returning the merge point the enclosing
    /// path continues from.
    fn walk_branch(
        &mut self,
        id: NodeId,
        boundaries: &[NodeId],
        exit: Option<NodeId>,
        depth: usize,
    ) -> Option<NodeId> {
        let node = self.index.node(id);
        let arms = self.index.successors(id).to_vec();
        let merge = merge::find_merge_point(&self.index, &arms, boundaries);
        debug!(
            branch = node.name,
            merge_point = merge.map_or("<none>", |m| self.index.name(m));
            "Resolved merge point"
        );

        let mut inner = boundaries.to_vec();
        inner.extend(merge);
        // Without a merge point, a finished arm leaves the whole branch.
        let arm_exit = merge.or(exit);

        let (on_true, rest) = arms.split_first()?;
        let (on_false, else_if_arms) = rest.split_last()?;

        self.push(
            depth,
            Statement::If {
                node,
                condition: node.condition.as_deref().unwrap_or_default(),
            },
        );
        self.walk_arm(*on_true, &inner, arm_exit, depth + 1);

        for (clause, entry) in node.else_ifs.iter().zip(else_if_arms) {
            self.push(depth, Statement::ElseIf(clause));
            self.walk_arm(*entry, &inner, arm_exit, depth + 1);
        }

        if arm_exit != Some(*on_false) {
            self.push(depth, Statement::Else);
            self.walk_arm(*on_false, &inner, arm_exit, depth + 1);
        }

        merge
    }

    fn walk_arm(
        &mut self,
        entry: NodeId,
        boundaries: &[NodeId],
        exit: Option<NodeId>,
        depth: usize,
    ) {
        let before = self.statements.len();
        self.walk(entry, boundaries, exit, depth);
        if self.statements.len() == before {
            self.push(depth, Statement::Pass);
        }
    }
}
