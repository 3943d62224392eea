pub mod campus;
pub mod index;
pub mod unpack;

pub use campus::{is_object_in_graph, CampusMap};
pub use index::AdjacencyGraph;
pub use unpack::UnpackedGraph;
