//! `nav-spatial` — road network graph, spatial index, and route search.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`graph`]      | `RoadGraph` (frozen graph + KD-tree), `RoadGraphBuilder` |
//! | [`index`]      | `KdTree` — balanced 2-D partition tree                   |
//! | [`router`]     | A* shortest path, `CancelToken`                          |
//! | [`ingest`]     | `build_graph` from normalized node/way records           |
//! | [`directions`] | `Turn`, `NavigationStep` data shapes                     |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                       |
//!
//! # Lifecycle
//!
//! Build once, query forever: [`ingest::build_graph`] (or a hand-driven
//! [`RoadGraphBuilder`]) runs single-threaded and produces an immutable
//! [`RoadGraph`] that owns its spatial index.  Every query after that point
//! is a pure read — the graph is `Send + Sync` and safe to share across
//! threads without locking.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public data types.       |

pub mod directions;
pub mod error;
pub mod graph;
pub mod index;
pub mod ingest;
pub mod router;


pub use directions::{NavigationStep, Turn};
pub use error::{SpatialError, SpatialResult};
pub use graph::{RoadGraph, RoadGraphBuilder, VertexInfo};
pub use ingest::{NodeRecord, WayRecord, build_graph};
pub use router::CancelToken;
