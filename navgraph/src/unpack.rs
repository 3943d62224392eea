//! Flattening of per-floor graphs into one navigable campus graph.
//!
//! Vertices and edges of every floor are concatenated in floor order. Edges
//! flagged `to_next_floor` carry a map-object id as their target; unpacking
//! re-points them at the vertex backing that object on another floor.

use crate::index::AdjacencyGraph;
use std::collections::BTreeMap;
use std::collections::HashMap;
use tracing::{debug, warn};
use wayfinder_core::model::{Edge, FloorId, Graph, Vertex};

/// Merged graph plus the lookup tables the route engine needs.
pub struct UnpackedGraph {
    graph: Graph,
    vertex_floors: Vec<FloorId>,
    vertex_index: HashMap<String, usize>,
    object_vertices: HashMap<String, Vec<usize>>,
    adjacency: AdjacencyGraph,
    unresolved_transitions: usize,
    dangling_edges: usize,
}

impl UnpackedGraph {
    pub fn build(floors: &BTreeMap<FloorId, Graph>) -> Self {
        let vertex_total = floors.values().map(|g| g.vertices.len()).sum();
        let edge_total = floors.values().map(|g| g.edges.len()).sum();

        let mut vertices: Vec<Vertex> = Vec::with_capacity(vertex_total);
        let mut edges: Vec<Edge> = Vec::with_capacity(edge_total);
        let mut vertex_floors = Vec::with_capacity(vertex_total);
        let mut edge_floors = Vec::with_capacity(edge_total);

        for (floor, graph) in floors {
            vertices.extend(graph.vertices.iter().cloned());
            vertex_floors.extend(std::iter::repeat(floor.clone()).take(graph.vertices.len()));
            edges.extend(graph.edges.iter().cloned());
            edge_floors.extend(std::iter::repeat(floor).take(graph.edges.len()));
        }

        let mut vertex_index = HashMap::with_capacity(vertices.len());
        let mut object_vertices: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, vertex) in vertices.iter().enumerate() {
            if vertex_index.contains_key(&vertex.id) {
                warn!(vertex_id = %vertex.id, "duplicate vertex id across floors, keeping first");
            } else {
                vertex_index.insert(vertex.id.clone(), idx);
            }
            if let Some(object_id) = &vertex.map_object_id {
                object_vertices.entry(object_id.clone()).or_default().push(idx);
            }
        }

        let lookup = TransitionLookup {
            floor_order: floors.keys().collect(),
            vertices: &vertices,
            vertex_floors: &vertex_floors,
            vertex_index: &vertex_index,
            object_vertices: &object_vertices,
        };
        let resolved: Vec<Option<String>> = edges
            .iter()
            .zip(&edge_floors)
            .map(|(edge, floor)| edge.to_next_floor.then(|| lookup.resolve(edge, floor)).flatten())
            .collect();

        let mut unresolved_transitions = 0;
        for (edge, target) in edges.iter_mut().zip(resolved) {
            if !edge.to_next_floor {
                continue;
            }
            match target {
                Some(target) => edge.target = target,
                None => {
                    unresolved_transitions += 1;
                    warn!(
                        source = %edge.source,
                        target_object = %edge.target,
                        "transition edge has no matching vertex on another floor"
                    );
                }
            }
        }

        let mut adjacency = AdjacencyGraph::with_nodes(vertices.len());
        let mut dangling_edges = 0;
        for edge in &edges {
            let endpoints = (
                vertex_index.get(&edge.source),
                vertex_index.get(&edge.target),
            );
            match endpoints {
                (Some(&a), Some(&b)) => {
                    adjacency.add_edge(a, b, edge.weight);
                }
                _ => {
                    dangling_edges += 1;
                    debug!(source = %edge.source, target = %edge.target, "skipping dangling edge");
                }
            }
        }

        debug!(
            floors = floors.len(),
            vertices = vertices.len(),
            edges = edges.len(),
            unresolved_transitions,
            dangling_edges,
            "unpacked campus graph"
        );

        Self {
            graph: Graph::new(vertices, edges),
            vertex_floors,
            vertex_index,
            object_vertices,
            adjacency,
            unresolved_transitions,
            dangling_edges,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.graph.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.graph.edges
    }

    pub fn adjacency(&self) -> &AdjacencyGraph {
        &self.adjacency
    }

    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.index_of(id).map(|idx| &self.graph.vertices[idx])
    }

    pub fn vertex_at(&self, idx: usize) -> Option<&Vertex> {
        self.graph.vertices.get(idx)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.vertex_index.get(id).copied()
    }

    /// Floor a vertex was loaded from.
    pub fn floor_of(&self, id: &str) -> Option<&FloorId> {
        self.index_of(id).and_then(|idx| self.vertex_floors.get(idx))
    }

    pub fn floor_at(&self, idx: usize) -> Option<&FloorId> {
        self.vertex_floors.get(idx)
    }

    /// First vertex (in floor order) backing `object_id`.
    pub fn object_vertex_index(&self, object_id: &str) -> Option<usize> {
        self.object_vertices
            .get(object_id)
            .and_then(|indices| indices.first().copied())
    }

    pub fn object_vertex(&self, object_id: &str) -> Option<&Vertex> {
        self.object_vertex_index(object_id)
            .map(|idx| &self.graph.vertices[idx])
    }

    /// Every vertex backing `object_id`, one per floor for stairs and elevators.
    pub fn object_vertices(&self, object_id: &str) -> Vec<&Vertex> {
        self.object_vertices
            .get(object_id)
            .map(|indices| indices.iter().map(|&i| &self.graph.vertices[i]).collect())
            .unwrap_or_default()
    }

    pub fn contains_object(&self, object_id: &str) -> bool {
        self.object_vertices.contains_key(object_id)
    }

    /// Weight of the edge joining two vertices in either direction.
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let (a, b) = (self.index_of(a)?, self.index_of(b)?);
        self.adjacency.weight_between(a, b)
    }

    pub fn unresolved_transitions(&self) -> usize {
        self.unresolved_transitions
    }

    pub fn dangling_edges(&self) -> usize {
        self.dangling_edges
    }
}

struct TransitionLookup<'a> {
    floor_order: Vec<&'a FloorId>,
    vertices: &'a [Vertex],
    vertex_floors: &'a [FloorId],
    vertex_index: &'a HashMap<String, usize>,
    object_vertices: &'a HashMap<String, Vec<usize>>,
}

impl TransitionLookup<'_> {
    /// Vertex id backing the edge's target object on another floor. Prefers
    /// the floor the edge was declared on, then the floor right after the
    /// source's, then any other floor.
    fn resolve(&self, edge: &Edge, edge_floor: &FloorId) -> Option<String> {
        let candidates = self.object_vertices.get(&edge.target)?;
        let Some(source_floor) = self
            .vertex_index
            .get(&edge.source)
            .map(|&idx| &self.vertex_floors[idx])
        else {
            return candidates
                .iter()
                .find(|&&idx| self.vertices[idx].id != edge.source)
                .map(|&idx| self.vertices[idx].id.clone());
        };

        let next_floor = self
            .floor_order
            .iter()
            .position(|floor| *floor == source_floor)
            .and_then(|pos| self.floor_order.get(pos + 1).copied());

        let on_floor = |floor: &FloorId| {
            candidates
                .iter()
                .copied()
                .find(|&idx| &self.vertex_floors[idx] == floor)
        };

        let preferred = Some(edge_floor)
            .filter(|floor| *floor != source_floor)
            .and_then(on_floor)
            .or_else(|| next_floor.and_then(on_floor))
            .or_else(|| {
                candidates
                    .iter()
                    .copied()
                    .find(|&idx| &self.vertex_floors[idx] != source_floor)
            });

        preferred.map(|idx| self.vertices[idx].id.clone())
    }
}
