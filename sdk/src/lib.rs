//! In-process entry point for indoor wayfinding.
//!
//! ```no_run
//! # async fn demo() -> Result<(), wayfinder_sdk::SdkError> {
//! let wayfinder = wayfinder_sdk::Wayfinder::open("data/map.json").await?;
//! if let Some(route) = wayfinder.route("r1", "r2") {
//!     println!("{} steps", route.steps.len());
//! }
//! # Ok(())
//! # }
//! ```

use config::ConfigError;
use navgraph::CampusMap;
use query::{
    NearestRequest, ObjectSearch, RequestError, Route, RouteEngine, RouteRequest, SearchHit,
    SearchRequest,
};
use std::path::Path;
use thiserror::Error;
use tracing::info;
use wayfinder_core::config::WayfinderConfig;
use wayfinder_core::error::{ErrorCode, LoadError, WayfinderError};
use wayfinder_core::model::{CampusData, FloorId, MapObject, MapObjectType, Vertex};

pub use navgraph;
pub use query;
pub use wayfinder_core;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("request error: {0}")]
    Request(#[from] RequestError),
}

impl WayfinderError for SdkError {
    fn error_code(&self) -> ErrorCode {
        match self {
            SdkError::Load(err) => err.error_code(),
            SdkError::Config(_) => ErrorCode::InvalidArgument,
            SdkError::Request(err) => err.error_code(),
        }
    }
}

pub struct Wayfinder {
    map: CampusMap,
    config: WayfinderConfig,
}

impl Wayfinder {
    pub fn new(data: CampusData, config: WayfinderConfig) -> Self {
        Self {
            map: CampusMap::new(data),
            config,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SdkError> {
        Ok(Self::new(
            CampusData::from_json_str(raw)?,
            WayfinderConfig::default(),
        ))
    }

    /// Read the map asset at `path` with default settings.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SdkError> {
        Self::open_with_config(path, WayfinderConfig::default()).await
    }

    /// Load configuration from `config/` and the environment, then the asset
    /// it points at.
    pub async fn from_env() -> Result<Self, SdkError> {
        let config = WayfinderConfig::load()?;
        let path = config.data.map_path.clone();
        Self::open_with_config(path, config).await
    }

    pub async fn open_with_config(
        path: impl AsRef<Path>,
        config: WayfinderConfig,
    ) -> Result<Self, SdkError> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path).await.map_err(LoadError::from)?;
        let data = CampusData::from_json_slice(&raw)?;
        info!(path = %path.display(), "map asset read");
        Ok(Self::new(data, config))
    }

    pub fn config(&self) -> &WayfinderConfig {
        &self.config
    }

    pub fn map(&self) -> &CampusMap {
        &self.map
    }

    /// Mutable access for floor edits; the unpacked graph is rebuilt lazily.
    pub fn map_mut(&mut self) -> &mut CampusMap {
        &mut self.map
    }

    fn engine(&self) -> RouteEngine<'_> {
        RouteEngine::new(&self.map)
    }

    pub fn shortest_path(&self, start: &MapObject, end: &MapObject) -> Option<Vec<Vertex>> {
        self.engine().shortest_path(start, end)
    }

    pub fn shortest_path_by_segments(
        &self,
        start: &MapObject,
        end: &MapObject,
    ) -> Option<Vec<Vec<Vertex>>> {
        self.engine().shortest_path_by_segments(start, end)
    }

    pub fn nearest_map_object_by_type(
        &self,
        start: &MapObject,
        object_type: MapObjectType,
        names: &[String],
    ) -> Option<&MapObject> {
        self.engine().nearest_by_type(start, object_type, names)
    }

    pub fn search_objects_by_name(&self, query: &str, types: &[MapObjectType]) -> Vec<SearchHit<'_>> {
        ObjectSearch::with_config(&self.map, self.config.search.clone()).search(query, types)
    }

    pub fn route(&self, start_id: &str, end_id: &str) -> Option<Route> {
        self.engine().route(start_id, end_id)
    }

    pub fn floor_by_point(&self, vertex: &Vertex) -> Option<&FloorId> {
        self.map.floor_by_point(vertex)
    }

    pub fn object_floor(&self, object_id: &str) -> Option<&FloorId> {
        self.map.object_floor(object_id)
    }

    pub fn available_objects(&self) -> Vec<&MapObject> {
        self.map.available_objects()
    }

    pub fn object_by_id(&self, id: &str) -> Option<&MapObject> {
        self.map.object_by_id(id)
    }

    pub fn object_by_name(&self, name: &str) -> Option<&MapObject> {
        self.map.object_by_name(name)
    }

    pub fn execute_search_json(&self, raw: &str) -> Result<Vec<SearchHit<'_>>, SdkError> {
        let request = SearchRequest::parse_json(raw)?;
        request.validate()?;
        let mut search_config = self.config.search.clone();
        if let Some(limit) = request.limit {
            search_config.max_results = limit;
        }
        let types = request.object_types()?;
        Ok(ObjectSearch::with_config(&self.map, search_config).search(&request.query, &types))
    }

    pub fn execute_route_json(&self, raw: &str) -> Result<Option<Route>, SdkError> {
        let request = RouteRequest::parse_json(raw)?;
        request.validate()?;
        Ok(self.route(&request.from, &request.to))
    }

    pub fn execute_nearest_json(&self, raw: &str) -> Result<Option<&MapObject>, SdkError> {
        let request = NearestRequest::parse_json(raw)?;
        request.validate()?;
        let object_type = request.target_type()?;
        Ok(self
            .map
            .object_by_id(&request.from)
            .and_then(|start| self.nearest_map_object_by_type(start, object_type, &request.names)))
    }
}
