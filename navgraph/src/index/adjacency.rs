/// Edge representation: (neighbor vertex index, weight)
pub type EdgeData = (usize, f64);

/// Undirected adjacency list keyed by dense vertex index.
pub struct AdjacencyGraph {
    adjacency: Vec<Vec<EdgeData>>,
    edge_count: usize,
}

impl AdjacencyGraph {
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edge_count: 0,
        }
    }

    /// Insert both directions. Returns false if either endpoint is out of range.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) -> bool {
        if a >= self.adjacency.len() || b >= self.adjacency.len() {
            return false;
        }
        self.adjacency[a].push((b, weight));
        if a != b {
            self.adjacency[b].push((a, weight));
        }
        self.edge_count += 1;
        true
    }

    /// Neighbors in edge insertion order.
    pub fn neighbors(&self, id: usize) -> &[EdgeData] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of the first inserted edge joining `a` and `b`.
    pub fn weight_between(&self, a: usize, b: usize) -> Option<f64> {
        self.neighbors(a)
            .iter()
            .find(|(target, _)| *target == b)
            .map(|(_, weight)| *weight)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

impl Default for AdjacencyGraph {
    fn default() -> Self {
        Self::with_nodes(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_undirected() {
        let mut graph = AdjacencyGraph::with_nodes(3);
        graph.add_edge(0, 1, 2.0);
        graph.add_edge(1, 2, 3.0);

        assert_eq!(graph.neighbors(1).len(), 2);
        assert_eq!(graph.weight_between(1, 0), Some(2.0));
        assert_eq!(graph.weight_between(2, 1), Some(3.0));
        assert_eq!(graph.weight_between(0, 2), None);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_out_of_range_edge_is_rejected() {
        let mut graph = AdjacencyGraph::with_nodes(2);
        assert!(!graph.add_edge(0, 5, 1.0));
        assert!(graph.neighbors(0).is_empty());
        assert!(graph.neighbors(9).is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_first_parallel_edge_wins() {
        let mut graph = AdjacencyGraph::with_nodes(2);
        graph.add_edge(0, 1, 4.0);
        graph.add_edge(1, 0, 1.0);
        assert_eq!(graph.weight_between(0, 1), Some(4.0));
        assert_eq!(graph.node_count(), 2);
    }
}
