use crate::unpack::UnpackedGraph;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;
use tracing::{debug, info};
use wayfinder_core::error::LoadError;
use wayfinder_core::model::{CampusData, FloorId, Graph, MapObject, MapObjectType, Vertex};

/// Read-only indoor map of one campus: floor graphs, the object registry and
/// the lazily built unpacked graph.
pub struct CampusMap {
    floors: BTreeMap<FloorId, Graph>,
    objects: Vec<MapObject>,
    object_index: HashMap<String, usize>,
    unpacked: OnceLock<UnpackedGraph>,
}

impl CampusMap {
    pub fn new(data: CampusData) -> Self {
        let CampusData { floors, objects } = data;
        let mut object_index = HashMap::with_capacity(objects.len());
        for (idx, object) in objects.iter().enumerate() {
            object_index.entry(object.id.clone()).or_insert(idx);
        }

        info!(
            floors = floors.len(),
            vertices = floors.values().map(|g| g.vertices.len()).sum::<usize>(),
            edges = floors.values().map(|g| g.edges.len()).sum::<usize>(),
            objects = objects.len(),
            "campus map loaded"
        );

        Self {
            floors,
            objects,
            object_index,
            unpacked: OnceLock::new(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, LoadError> {
        CampusData::from_json_str(raw).map(Self::new)
    }

    /// Merged graph of all floors, built on first access and reused afterwards.
    pub fn unpacked(&self) -> &UnpackedGraph {
        self.unpacked.get_or_init(|| {
            debug!("building unpacked campus graph");
            UnpackedGraph::build(&self.floors)
        })
    }

    /// Drop the cached unpacked graph; the next access rebuilds it.
    pub fn invalidate(&mut self) {
        self.unpacked.take();
    }

    pub fn set_floor(&mut self, floor: FloorId, graph: Graph) -> Option<Graph> {
        let previous = self.floors.insert(floor, graph);
        self.invalidate();
        previous
    }

    pub fn remove_floor(&mut self, floor: &FloorId) -> Option<Graph> {
        let removed = self.floors.remove(floor);
        if removed.is_some() {
            self.invalidate();
        }
        removed
    }

    pub fn floors(&self) -> impl Iterator<Item = &FloorId> {
        self.floors.keys()
    }

    pub fn floor_graph(&self, floor: &FloorId) -> Option<&Graph> {
        self.floors.get(floor)
    }

    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    /// Floor whose graph holds `vertex`, matched by vertex id.
    pub fn floor_by_point(&self, vertex: &Vertex) -> Option<&FloorId> {
        self.floors
            .iter()
            .find(|(_, graph)| graph.contains_vertex(vertex))
            .map(|(floor, _)| floor)
    }

    /// First floor (in floor order) with a vertex backing the object.
    pub fn object_floor(&self, object_id: &str) -> Option<&FloorId> {
        self.floors
            .iter()
            .find(|(_, graph)| graph.contains_object(object_id))
            .map(|(floor, _)| floor)
    }

    /// Objects with at least one vertex in the unpacked graph.
    pub fn available_objects(&self) -> Vec<&MapObject> {
        let unpacked = self.unpacked();
        self.objects
            .iter()
            .filter(|object| unpacked.contains_object(&object.id))
            .collect()
    }

    pub fn objects_by_type(&self, object_type: MapObjectType) -> Vec<&MapObject> {
        let unpacked = self.unpacked();
        self.objects
            .iter()
            .filter(|o| o.object_type == object_type && unpacked.contains_object(&o.id))
            .collect()
    }

    pub fn object_by_id(&self, id: &str) -> Option<&MapObject> {
        self.object_index.get(id).map(|&idx| &self.objects[idx])
    }

    pub fn object_by_name(&self, name: &str) -> Option<&MapObject> {
        self.objects.iter().find(|object| object.name == name)
    }

    /// Object backing a vertex, if the vertex carries a resolvable id.
    pub fn object_of_vertex(&self, vertex: &Vertex) -> Option<&MapObject> {
        vertex
            .map_object_id
            .as_deref()
            .and_then(|id| self.object_by_id(id))
    }

    pub fn vertices_of_object(&self, object_id: &str) -> Vec<&Vertex> {
        self.unpacked().object_vertices(object_id)
    }
}

pub fn is_object_in_graph(object: &MapObject, graph: &Graph) -> bool {
    graph.contains_object(&object.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::model::Edge;

    fn campus() -> CampusMap {
        let mut floors = BTreeMap::new();
        floors.insert(
            FloorId::from("1"),
            Graph::new(
                vec![
                    Vertex::new("a", 0.0, 0.0).with_object("room"),
                    Vertex::new("b", 1.0, 0.0),
                ],
                vec![Edge::new("a", "b", 1.0)],
            ),
        );
        CampusMap::new(CampusData {
            floors,
            objects: vec![
                MapObject::new("room", MapObjectType::Room, "101"),
                MapObject::new("orphan", MapObjectType::Atm, "ATM"),
            ],
        })
    }

    #[test]
    fn test_unknown_vertex_has_no_floor() {
        let map = campus();
        assert_eq!(
            map.floor_by_point(&Vertex::new("b", 1.0, 0.0)),
            Some(&FloorId::from("1"))
        );
        // Same coordinates, different identity.
        assert_eq!(map.floor_by_point(&Vertex::new("zz", 0.0, 0.0)), None);
    }

    #[test]
    fn test_objects_without_vertices_are_not_available() {
        let map = campus();
        let available: Vec<&str> = map.available_objects().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(available, vec!["room"]);
        assert!(map.object_by_id("orphan").is_some());
        assert_eq!(map.object_floor("orphan"), None);
        assert!(map.objects_by_type(MapObjectType::Atm).is_empty());
    }

    #[test]
    fn test_exact_lookups() {
        let map = campus();
        assert_eq!(map.object_by_name("101").unwrap().id, "room");
        assert!(map.object_by_name("10").is_none());
        assert!(map.object_by_id("nope").is_none());
        let graph = map.floor_graph(&FloorId::from("1")).unwrap();
        assert!(is_object_in_graph(map.object_by_id("room").unwrap(), graph));
        assert!(!is_object_in_graph(map.object_by_id("orphan").unwrap(), graph));
    }
}
