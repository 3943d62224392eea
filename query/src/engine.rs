use crate::astar::{find_path, SearchPath};
use crate::directions::{directions, RouteStep};
use crate::segments::segment_path;
use navgraph::CampusMap;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;
use wayfinder_core::model::{MapObject, MapObjectType, Vertex};

/// One routing request's result. Replaced wholesale on the next request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub start: MapObject,
    pub end: MapObject,
    pub path: Vec<Vertex>,
    pub segments: Vec<Vec<Vertex>>,
    pub total_weight: f64,
    pub steps: Vec<RouteStep>,
}

/// Routing queries over a loaded campus. Holds no state of its own.
#[derive(Clone, Copy)]
pub struct RouteEngine<'a> {
    map: &'a CampusMap,
}

impl<'a> RouteEngine<'a> {
    pub fn new(map: &'a CampusMap) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &'a CampusMap {
        self.map
    }

    /// Vertices from the start object's vertex to the end object's vertex.
    /// `None` if either object has no vertex or no path joins them.
    pub fn shortest_path(&self, start: &MapObject, end: &MapObject) -> Option<Vec<Vertex>> {
        let found = self.search(start, end)?;
        let unpacked = self.map.unpacked();
        Some(
            found
                .indices
                .iter()
                .filter_map(|&idx| unpacked.vertex_at(idx).cloned())
                .collect(),
        )
    }

    pub fn shortest_path_by_segments(
        &self,
        start: &MapObject,
        end: &MapObject,
    ) -> Option<Vec<Vec<Vertex>>> {
        let path = self.shortest_path(start, end)?;
        Some(segment_path(self.map, &path))
    }

    /// Sum of edge weights along consecutive vertex pairs. Pairs without a
    /// joining edge count as zero.
    pub fn path_weight(&self, path: &[Vertex]) -> f64 {
        let unpacked = self.map.unpacked();
        path.windows(2)
            .map(|pair| unpacked.edge_weight(&pair[0].id, &pair[1].id).unwrap_or(0.0))
            .sum()
    }

    /// Closest reachable object of `object_type`, optionally limited to the
    /// given names. The start object itself is never a candidate.
    pub fn nearest_by_type(
        &self,
        start: &MapObject,
        object_type: MapObjectType,
        names: &[String],
    ) -> Option<&'a MapObject> {
        let mut best: Option<(&'a MapObject, f64)> = None;

        for candidate in self.map.objects_by_type(object_type) {
            if candidate.id == start.id {
                continue;
            }
            if !names.is_empty() && !names.iter().any(|name| *name == candidate.name) {
                continue;
            }
            let Some(path) = self.shortest_path(start, candidate) else {
                continue;
            };
            if path.len() <= 1 {
                continue;
            }
            let weight = self.path_weight(&path);
            if best.map_or(true, |(_, w)| weight < w) {
                best = Some((candidate, weight));
            }
        }

        debug!(
            start = %start.id,
            object_type = %object_type,
            nearest = best.map(|(o, _)| o.id.as_str()),
            "nearest object lookup"
        );
        best.map(|(object, _)| object)
    }

    /// Full route between two object ids, with segments and direction steps.
    pub fn route(&self, start_id: &str, end_id: &str) -> Option<Route> {
        let start = self.map.object_by_id(start_id)?;
        let end = self.map.object_by_id(end_id)?;
        let path = self.shortest_path(start, end)?;
        let segments = segment_path(self.map, &path);
        let total_weight = self.path_weight(&path);
        let steps = directions(self.map, &segments);

        Some(Route {
            start: start.clone(),
            end: end.clone(),
            path,
            segments,
            total_weight,
            steps,
        })
    }

    fn search(&self, start: &MapObject, end: &MapObject) -> Option<SearchPath> {
        let started = Instant::now();
        let unpacked = self.map.unpacked();
        let (Some(from), Some(to)) = (
            unpacked.object_vertex_index(&start.id),
            unpacked.object_vertex_index(&end.id),
        ) else {
            debug!(start = %start.id, end = %end.id, "object has no vertex in graph");
            return None;
        };

        let found = find_path(unpacked, from, to);
        debug!(
            start = %start.id,
            end = %end.id,
            found = found.is_some(),
            hops = found.as_ref().map(|p| p.indices.len()),
            elapsed_us = started.elapsed().as_micros() as u64,
            "shortest path search"
        );
        found
    }
}
