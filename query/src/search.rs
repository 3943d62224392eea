//! Fuzzy lookup of navigable objects by name.
//!
//! Room names follow a `<building>-<number><letter>.<postfix>` shape, e.g.
//! `А-101`, `Б-204а`, `В-310-2`. Both the query and each candidate are
//! compared with hyphens and spaces stripped; when both parse as room names,
//! at least one structural part has to agree as well.

use navgraph::CampusMap;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use wayfinder_core::config::SearchConfig;
use wayfinder_core::model::{FloorId, MapObject, MapObjectType};

static ROOM_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<building>\p{Cyrillic}*)[-\s]?(?P<number>\d+)(?P<letter>\p{Cyrillic})?(?:[-.](?P<postfix>[\p{L}\d]+))?$",
    )
    .expect("room name pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
struct RoomName {
    building: String,
    number: String,
    letter: Option<String>,
    postfix: Option<String>,
}

impl RoomName {
    fn parse(name: &str) -> Option<Self> {
        let caps = ROOM_NAME.captures(name.trim())?;
        let group = |key: &str| caps.name(key).map(|m| m.as_str().to_string());
        Some(Self {
            building: group("building").unwrap_or_default(),
            number: group("number")?,
            letter: group("letter"),
            postfix: group("postfix"),
        })
    }

    /// Whether a candidate shares any structural part with this query.
    fn agrees_with(&self, candidate: &RoomName) -> bool {
        let number = !self.number.is_empty() && candidate.number.contains(&self.number);
        let building = !self.building.is_empty() && candidate.building.contains(&self.building);
        let letter = self.letter.is_some() && self.letter == candidate.letter;
        let postfix = self.postfix.is_some() && self.postfix == candidate.postfix;
        number || building || letter || postfix
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<'a> {
    pub floor: FloorId,
    #[serde(rename = "mapObject")]
    pub object: &'a MapObject,
}

pub struct ObjectSearch<'a> {
    map: &'a CampusMap,
    config: SearchConfig,
}

impl<'a> ObjectSearch<'a> {
    pub fn new(map: &'a CampusMap) -> Self {
        Self::with_config(map, SearchConfig::default())
    }

    pub fn with_config(map: &'a CampusMap, config: SearchConfig) -> Self {
        Self { map, config }
    }

    /// Ranked matches among navigable objects of `types` (configured defaults
    /// when empty). Exact name matches come first, the rest by name.
    pub fn search(&self, query: &str, types: &[MapObjectType]) -> Vec<SearchHit<'a>> {
        let types = if types.is_empty() {
            self.config.default_types.as_slice()
        } else {
            types
        };

        let needle = self.normalize(query);
        let query_name = RoomName::parse(&self.fold(query));

        let mut hits: Vec<SearchHit<'a>> = self
            .map
            .available_objects()
            .into_iter()
            .filter(|object| types.contains(&object.object_type))
            .filter(|object| !object.name.is_empty())
            .filter(|object| self.matches(&needle, query_name.as_ref(), &object.name))
            .filter_map(|object| {
                let floor = self.map.object_floor(&object.id)?;
                if floor.as_str().is_empty() {
                    return None;
                }
                Some(SearchHit {
                    floor: floor.clone(),
                    object,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            (a.object.name != query)
                .cmp(&(b.object.name != query))
                .then_with(|| a.object.name.cmp(&b.object.name))
        });

        if self.config.max_results > 0 {
            hits.truncate(self.config.max_results);
        }
        hits
    }

    fn matches(&self, needle: &str, query_name: Option<&RoomName>, name: &str) -> bool {
        if !self.normalize(name).contains(needle) {
            return false;
        }
        match (query_name, RoomName::parse(&self.fold(name))) {
            (Some(query), Some(candidate)) => query.agrees_with(&candidate),
            _ => true,
        }
    }

    fn fold(&self, text: &str) -> String {
        if self.config.case_insensitive {
            text.to_lowercase()
        } else {
            text.to_string()
        }
    }

    fn normalize(&self, text: &str) -> String {
        self.fold(text)
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect()
    }
}
