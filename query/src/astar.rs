//! Best-first search over the unpacked campus graph.
//!
//! Nodes are expanded by `g + h`, where `g` is the accumulated edge weight and
//! `h` the Manhattan distance to the goal vertex. Expansion stops when the goal
//! is popped or the frontier runs dry.

use navgraph::UnpackedGraph;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

#[derive(Clone, Debug)]
struct SearchNode {
    idx: usize,
    g_cost: f64,
    f_cost: f64,
    // Insertion order, so equal f-costs pop first-pushed first.
    seq: u64,
}

impl Eq for SearchNode {}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of a successful search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchPath {
    /// Vertex indices from start to goal inclusive.
    pub indices: Vec<usize>,
    /// Accumulated weight along the path.
    pub cost: f64,
    pub nodes_expanded: usize,
}

/// Find a path between two vertex indices. `None` when the goal is unreachable
/// or either index is out of range.
pub fn find_path(graph: &UnpackedGraph, start: usize, goal: usize) -> Option<SearchPath> {
    let goal_vertex = graph.vertex_at(goal)?;
    graph.vertex_at(start)?;

    let node_count = graph.vertices().len();
    let mut g_costs = vec![f64::INFINITY; node_count];
    let mut came_from: Vec<Option<usize>> = vec![None; node_count];
    let mut closed = vec![false; node_count];
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;
    let mut nodes_expanded = 0;

    let heuristic = |idx: usize| -> f64 {
        graph
            .vertex_at(idx)
            .map(|v| v.manhattan(goal_vertex))
            .unwrap_or(0.0)
    };

    g_costs[start] = 0.0;
    open.push(SearchNode {
        idx: start,
        g_cost: 0.0,
        f_cost: heuristic(start),
        seq,
    });

    let mut reached = false;
    while let Some(current) = open.pop() {
        if closed[current.idx] || current.g_cost > g_costs[current.idx] {
            continue;
        }
        closed[current.idx] = true;
        nodes_expanded += 1;

        if current.idx == goal {
            reached = true;
            break;
        }

        for &(neighbor, weight) in graph.adjacency().neighbors(current.idx) {
            if closed[neighbor] {
                continue;
            }
            let tentative = current.g_cost + weight;
            if tentative < g_costs[neighbor] {
                g_costs[neighbor] = tentative;
                came_from[neighbor] = Some(current.idx);
                seq += 1;
                open.push(SearchNode {
                    idx: neighbor,
                    g_cost: tentative,
                    f_cost: tentative + heuristic(neighbor),
                    seq,
                });
            }
        }
    }

    trace!(start, goal, reached, nodes_expanded, "best-first search finished");

    if !reached {
        return None;
    }

    let indices = reconstruct(&came_from, start, goal)?;
    Some(SearchPath {
        indices,
        cost: g_costs[goal],
        nodes_expanded,
    })
}

/// Walk back-pointers from `goal`; stops at the first vertex without a
/// predecessor and rejects chains that do not end at `start`.
fn reconstruct(came_from: &[Option<usize>], start: usize, goal: usize) -> Option<Vec<usize>> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = came_from[current] {
        if path.len() > came_from.len() {
            return None;
        }
        path.push(prev);
        current = prev;
    }
    if current != start {
        return None;
    }
    path.reverse();
    Some(path)
}
