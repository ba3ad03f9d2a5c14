use crate::error::GraphStructureError;
use crate::graph::{Graph, Node, NodeKind};
use indexmap::IndexMap;
use indexmap::map::Entry;
use log::warn;

pub(super) type NodeId = usize;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnPath,
    Done,
}

/// Arena view of a `Graph`: nodes addressed by index, keyed by name, with resolved
/// successor lists. Building the index validates the graph's structure.
pub(super) struct GraphIndex<'g> {
    nodes: IndexMap<&'g str, &'g Node>,
    successors: Vec<Vec<NodeId>>,
    start: NodeId,
}

impl<'g> GraphIndex<'g> {
    pub(super) fn build(graph: &'g Graph) -> Result<Self, GraphStructureError> {
        let mut nodes: IndexMap<&'g str, &'g Node> = IndexMap::with_capacity(graph.nodes.len());
        for node in &graph.nodes {
            match nodes.entry(node.name.as_str()) {
                Entry::Occupied(_) => {
                    return Err(GraphStructureError::DuplicateNode(node.name.clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(node);
                }
            }
        }

        let starts: Vec<NodeId> = nodes
            .values()
            .enumerate()
            .filter(|(_, n)| n.kind == NodeKind::Start)
            .map(|(id, _)| id)
            .collect();
        let start = match starts.as_slice() {
            [] => return Err(GraphStructureError::MissingStart),
            [only] => *only,
            many => {
                return Err(GraphStructureError::MultipleStarts(
                    many.iter().map(|&id| nodes[id].name.clone()).collect(),
                ));
            }
        };

        let mut successors = Vec::with_capacity(nodes.len());
        for node in nodes.values() {
            Self::check_shape(node)?;
            let mut resolved = Vec::new();
            for name in node.successor_names() {
                let id = nodes.get_index_of(name).ok_or_else(|| {
                    GraphStructureError::UnknownSuccessor {
                        node: node.name.clone(),
                        successor: name.to_string(),
                    }
                })?;
                if id == start {
                    return Err(GraphStructureError::StartHasPredecessor {
                        start: name.to_string(),
                        predecessor: node.name.clone(),
                    });
                }
                resolved.push(id);
            }
            successors.push(resolved);
        }

        let index = Self {
            nodes,
            successors,
            start,
        };
        index.check_acyclic()?;
        Ok(index)
    }

    /// Per-kind successor requirements.
    fn check_shape(node: &Node) -> Result<(), GraphStructureError> {
        match node.kind {
            NodeKind::End => {
                let has_successor = node.next_node_name.is_some()
                    || node.true_next_node_name.is_some()
                    || node.false_next_node_name.is_some()
                    || !node.else_ifs.is_empty();
                if has_successor {
                    return Err(GraphStructureError::EndHasSuccessor(node.name.clone()));
                }
            }
            NodeKind::Start | NodeKind::Action => {
                if node.next_node_name.is_none() {
                    return Err(GraphStructureError::DeadEnd(node.name.clone()));
                }
            }
            NodeKind::Branch | NodeKind::BranchElseIf => {
                if node.condition.as_deref().is_none_or(|c| c.trim().is_empty()) {
                    return Err(GraphStructureError::MissingCondition(node.name.clone()));
                }
                if node.true_next_node_name.is_none() || node.false_next_node_name.is_none() {
                    return Err(GraphStructureError::DeadEnd(node.name.clone()));
                }
                if node.kind == NodeKind::BranchElseIf && node.else_ifs.is_empty() {
                    return Err(GraphStructureError::MissingElseIfClauses(node.name.clone()));
                }
            }
        }
        Ok(())
    }

    /// Depth-first walk from the start node with an explicit stack. A successor that
    /// is still on the current path closes a cycle.
    fn check_acyclic(&self) -> Result<(), GraphStructureError> {
        let mut state = vec![Visit::Unseen; self.nodes.len()];
        let mut stack: Vec<(NodeId, usize)> = vec![(self.start, 0)];
        state[self.start] = Visit::OnPath;

        while let Some(frame) = stack.last_mut() {
            let id = frame.0;
            if let Some(&next) = self.successors[id].get(frame.1) {
                frame.1 += 1;
                match state[next] {
                    Visit::Unseen => {
                        state[next] = Visit::OnPath;
                        stack.push((next, 0));
                    }
                    Visit::OnPath => {
                        let from = stack.iter().position(|(n, _)| *n == next).unwrap_or(0);
                        let mut cycle: Vec<String> = stack[from..]
                            .iter()
                            .map(|(n, _)| self.name(*n).to_string())
                            .collect();
                        cycle.push(self.name(next).to_string());
                        return Err(GraphStructureError::Cycle(cycle));
                    }
                    Visit::Done => {}
                }
            } else {
                state[id] = Visit::Done;
                stack.pop();
            }
        }

        for (id, visit) in state.iter().enumerate() {
            if *visit == Visit::Unseen {
                warn!(node = self.name(id); "Node is unreachable from start and will not be emitted");
            }
        }
        Ok(())
    }

    pub(super) fn start(&self) -> NodeId {
        self.start
    }

    pub(super) fn node(&self, id: NodeId) -> &'g Node {
        self.nodes[id]
    }

    pub(super) fn name(&self, id: NodeId) -> &'g str {
        self.nodes[id].name.as_str()
    }

    pub(super) fn successors(&self, id: NodeId) -> &[NodeId] {
        &self.successors[id]
    }

    /// The single successor of a start or action node.
    pub(super) fn next(&self, id: NodeId) -> NodeId {
        self.successors[id][0]
    }

    pub(super) fn is_end(&self, id: NodeId) -> bool {
        self.nodes[id].kind == NodeKind::End
    }
}
