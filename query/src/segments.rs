//! Splitting of a vertex path into floor/transition segments.

use navgraph::CampusMap;
use wayfinder_core::model::{MapObjectType, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Append,
    Split,
    /// Split, unless the ongoing segment holds only the previous vertex.
    SplitAfterTransition,
}

fn boundary(prev: MapObjectType, curr: MapObjectType) -> Boundary {
    match (prev.is_transition(), curr.is_transition()) {
        (true, true) => Boundary::Split,
        (false, true) => Boundary::Append,
        (true, false) => Boundary::SplitAfterTransition,
        (false, false) => Boundary::Append,
    }
}

/// Segments in path order. The first vertex always seeds segment 0; an empty
/// path yields no segments.
pub fn segment_path(map: &CampusMap, path: &[Vertex]) -> Vec<Vec<Vertex>> {
    let Some(first) = path.first() else {
        return Vec::new();
    };

    let mut segments = vec![vec![first.clone()]];
    for pair in path.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);

        let rule = match (map.object_of_vertex(prev), map.object_of_vertex(curr)) {
            (Some(p), Some(c)) => boundary(p.object_type, c.object_type),
            // Bare waypoints never split.
            _ => Boundary::Append,
        };

        let split = match rule {
            Boundary::Append => false,
            Boundary::Split => true,
            Boundary::SplitAfterTransition => segments
                .last()
                .map(|segment| !(segment.len() == 1 && segment[0].id == prev.id))
                .unwrap_or(true),
        };

        if split {
            segments.push(vec![curr.clone()]);
        } else if let Some(segment) = segments.last_mut() {
            segment.push(curr.clone());
        }
    }
    segments
}
