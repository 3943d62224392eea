pub mod astar;
pub mod directions;
pub mod dsl;
pub mod engine;
pub mod search;
pub mod segments;

pub use directions::{directions, Direction, RouteStep, TransitionKind};
pub use dsl::{NearestRequest, RequestError, RouteRequest, SearchRequest};
pub use engine::{Route, RouteEngine};
pub use search::{ObjectSearch, SearchHit};
pub use segments::segment_path;
