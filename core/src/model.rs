use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Opaque floor key. Integer-looking ids order numerically so that `"2"`
/// sorts before `"10"`; anything else falls back to string order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorId(String);

impl FloorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric level of the floor, if the id is an integer.
    pub fn level(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl Ord for FloorId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.level(), other.level()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for FloorId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FloorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FloorId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for FloorId {
    fn from(value: i64) -> Self {
        Self::new(value.to_string())
    }
}

/// A navigable point on one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_object_id: Option<String>,
}

impl Vertex {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            map_object_id: None,
        }
    }

    pub fn with_object(mut self, map_object_id: impl Into<String>) -> Self {
        self.map_object_id = Some(map_object_id.into());
        self
    }

    pub fn manhattan(&self, other: &Vertex) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Undirected walkable connection. For `to_next_floor` edges `target` holds a
/// map-object id until the campus graph is unpacked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub to_next_floor: bool,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
            to_next_floor: false,
        }
    }

    pub fn to_next_floor(
        source: impl Into<String>,
        target_object_id: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            to_next_floor: true,
            ..Self::new(source, target_object_id, weight)
        }
    }

    /// True if the edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Self {
        Self { vertices, edges }
    }

    pub fn contains_vertex(&self, vertex: &Vertex) -> bool {
        self.vertices.iter().any(|v| v.id == vertex.id)
    }

    pub fn contains_object(&self, object_id: &str) -> bool {
        self.vertices
            .iter()
            .any(|v| v.map_object_id.as_deref() == Some(object_id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapObjectType {
    Room,
    Toilet,
    Canteen,
    Atm,
    Stairs,
    Elevator,
    Lecture,
}

impl MapObjectType {
    pub const ALL: [MapObjectType; 7] = [
        MapObjectType::Room,
        MapObjectType::Toilet,
        MapObjectType::Canteen,
        MapObjectType::Atm,
        MapObjectType::Stairs,
        MapObjectType::Elevator,
        MapObjectType::Lecture,
    ];

    /// Stairs and elevators move a walker between floors.
    pub fn is_transition(self) -> bool {
        matches!(self, MapObjectType::Stairs | MapObjectType::Elevator)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MapObjectType::Room => "room",
            MapObjectType::Toilet => "toilet",
            MapObjectType::Canteen => "canteen",
            MapObjectType::Atm => "atm",
            MapObjectType::Stairs => "stairs",
            MapObjectType::Elevator => "elevator",
            MapObjectType::Lecture => "lecture",
        }
    }
}

impl fmt::Display for MapObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapObjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        MapObjectType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("unknown map object type: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: MapObjectType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MapObject {
    pub fn new(id: impl Into<String>, object_type: MapObjectType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object_type,
            name: name.into(),
            description: None,
        }
    }
}

/// Deserialized map asset: every floor graph plus the object registry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CampusData {
    #[serde(default)]
    pub floors: BTreeMap<FloorId, Graph>,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

impl CampusData {
    pub fn from_json_str(raw: &str) -> Result<Self, LoadError> {
        let data: CampusData = serde_json::from_str(raw)?;
        data.validate()?;
        Ok(data)
    }

    pub fn from_json_slice(raw: &[u8]) -> Result<Self, LoadError> {
        let data: CampusData = serde_json::from_slice(raw)?;
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        for (floor, graph) in &self.floors {
            if let Some(vertex) = graph.vertices.iter().find(|v| v.id.is_empty()) {
                return Err(LoadError::InvalidData(format!(
                    "floor {floor}: vertex at ({}, {}) has an empty id",
                    vertex.x, vertex.y
                )));
            }
            for edge in &graph.edges {
                if !edge.weight.is_finite() || edge.weight < 0.0 {
                    return Err(LoadError::InvalidData(format!(
                        "floor {floor}: edge {} -> {} has invalid weight {}",
                        edge.source, edge.target, edge.weight
                    )));
                }
            }
        }
        if self.objects.iter().any(|o| o.id.is_empty()) {
            return Err(LoadError::InvalidData(
                "map object with an empty id".to_string(),
            ));
        }
        Ok(())
    }
}
