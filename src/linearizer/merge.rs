use super::index::{GraphIndex, NodeId};
use ahash::AHashSet;
use std::collections::VecDeque;

/// Finds the node at which the arms of a branch reconverge.
///
/// Every arm expands its own breadth-first frontier, one layer per arm per round and
/// in arm order, until some arm reaches a node another arm has already visited.
/// End nodes and `boundaries` are visited but never expanded, so the result cannot
/// lie beyond the enclosing arm. Returns `None` when no two arms meet, i.e. every
/// arm terminates on its own.
pub(super) fn find_merge_point(
    index: &GraphIndex<'_>,
    arms: &[NodeId],
    boundaries: &[NodeId],
) -> Option<NodeId> {
    let mut visited: Vec<AHashSet<NodeId>> = vec![AHashSet::new(); arms.len()];
    let mut frontiers: Vec<VecDeque<NodeId>> = vec![VecDeque::new(); arms.len()];

    for (arm, &entry) in arms.iter().enumerate() {
        if visited_by_other(&visited, arm, entry) {
            return Some(entry);
        }
        visited[arm].insert(entry);
        frontiers[arm].push_back(entry);
    }

    while frontiers.iter().any(|frontier| !frontier.is_empty()) {
        for arm in 0..arms.len() {
            let layer = frontiers[arm].len();
            for _ in 0..layer {
                let Some(id) = frontiers[arm].pop_front() else {
                    break;
                };
                if index.is_end(id) || boundaries.contains(&id) {
                    continue;
                }
                for &next in index.successors(id) {
                    if visited[arm].contains(&next) {
                        continue;
                    }
                    if visited_by_other(&visited, arm, next) {
                        return Some(next);
                    }
                    visited[arm].insert(next);
                    frontiers[arm].push_back(next);
                }
            }
        }
    }
    None
}

fn visited_by_other(visited: &[AHashSet<NodeId>], arm: usize, id: NodeId) -> bool {
    visited
        .iter()
        .enumerate()
        .any(|(other, seen)| other != arm && seen.contains(&id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, Node, Param};

    fn merge_of<'g>(index: &GraphIndex<'g>, branch: &str, boundaries: &[&str]) -> Option<&'g str> {
        let id = (0..)
            .find(|&id| index.name(id) == branch)
            .expect("branch exists");
        let bounds: Vec<NodeId> = boundaries
            .iter()
            .map(|b| (0..).find(|&id| index.name(id) == *b).expect("boundary exists"))
            .collect();
        find_merge_point(index, index.successors(id), &bounds).map(|m| index.name(m))
    }

    #[test]
    fn unequal_arm_lengths_meet_at_the_join() {
        let graph = Graph::new(vec![
            Node::start("request", vec![Param::new("x", "int")], "check"),
            Node::branch("check", "x > 0", "a1", "join"),
            Node::action("a1", vec![], vec![], "a2"),
            Node::action("a2", vec![], vec![], "a3"),
            Node::action("a3", vec![], vec![], "join"),
            Node::action("join", vec![], vec![], "after"),
            Node::action("after", vec![], vec![], "response"),
            Node::end("response", vec![]),
        ]);
        let index = GraphIndex::build(&graph).unwrap();
        assert_eq!(merge_of(&index, "check", &[]), Some("join"));
    }

    #[test]
    fn private_terminals_have_no_merge() {
        let graph = Graph::new(vec![
            Node::start("request", vec![], "check"),
            Node::branch("check", "flag", "yes", "no"),
            Node::end("yes", vec![]),
            Node::end("no", vec![]),
        ]);
        let index = GraphIndex::build(&graph).unwrap();
        assert_eq!(merge_of(&index, "check", &[]), None);
    }

    #[test]
    fn boundaries_are_not_expanded() {
        let graph = Graph::new(vec![
            Node::start("request", vec![], "check"),
            Node::branch("check", "flag", "left", "right"),
            Node::action("left", vec![], vec![], "outer_join"),
            Node::action("right", vec![], vec![], "response"),
            Node::action("outer_join", vec![], vec![], "response"),
            Node::end("response", vec![]),
        ]);
        let index = GraphIndex::build(&graph).unwrap();
        assert_eq!(merge_of(&index, "check", &[]), Some("response"));
        assert_eq!(merge_of(&index, "check", &["outer_join"]), None);
    }
}
