use std::collections::VecDeque;

use log::trace;

use crate::grid::Grid;
use crate::moves::path_to_moves;
use crate::Pos;

/// Handle of a node inside a [`PathGraph`].
pub type NodeId = usize;

#[derive(Clone, Debug)]
struct PathNode {
    pos: Pos,
    parent: Option<NodeId>,
}

/// BFS tree discovered by one search. Nodes live in an arena and point at
/// their parent by index.
#[derive(Clone, Debug, Default)]
pub struct PathGraph {
    nodes: Vec<PathNode>,
}

impl PathGraph {
    fn add_node(&mut self, pos: Pos, parent: Option<NodeId>) -> NodeId {
        self.nodes.push(PathNode { pos, parent });
        self.nodes.len() - 1
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn pos(&self, node: NodeId) -> Pos {
        self.nodes[node].pos
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].parent
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.nodes.iter().any(|n| n.pos == pos)
    }

    /// Positions from the root down to `node`, inclusive.
    pub fn trace_root(&self, node: NodeId) -> Vec<Pos> {
        let mut path = vec![self.pos(node)];
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            path.push(self.pos(parent));
            current = parent;
        }

        path.reverse();
        path
    }
}

/// Breadth-first search from `start` over the empty cells of `mask`,
/// stopping as soon as `target` is discovered.
///
/// Returns the graph built so far and the target's node, or `None` when the
/// target cannot be reached.
pub fn build_path_graph(mut mask: Grid, start: Pos, target: Pos) -> (PathGraph, Option<NodeId>) {
    let mut graph = PathGraph::default();
    let mut queue = VecDeque::new();

    let root = graph.add_node(start, None);
    queue.push_back(root);
    mask.set_full(start);

    if start == target {
        return (graph, Some(root));
    }

    while let Some(parent) = queue.pop_front() {
        for neighbor in mask.four_neighbors(graph.pos(parent)) {
            let neighbor = match neighbor {
                Some(pos) if mask.is_empty(pos) => pos,
                _ => continue,
            };

            let node = graph.add_node(neighbor, Some(parent));
            queue.push_back(node);
            mask.set_full(neighbor);

            if neighbor == target {
                return (graph, Some(node));
            }
        }
    }

    (graph, None)
}

/// Shortest path from `start` to `target` as positions and as a move string.
pub fn find_path(mask: Grid, start: Pos, target: Pos) -> Option<(Vec<Pos>, String)> {
    let (graph, node) = build_path_graph(mask, start, target);
    let path = graph.trace_root(node?);
    let moves = path_to_moves(&path);
    trace!("path {:?} -> {:?}: {:?}", start, target, moves);
    Some((path, moves))
}
