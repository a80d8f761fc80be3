//! `nav-core` — foundational types for the `rust_nav` routing core.
//!
//! This crate has no dependency on the rest of the workspace and minimal
//! external ones (only optional `serde`).
//!
//! # What lives here
//!
//! | Module  | Contents                                                  |
//! |---------|-----------------------------------------------------------|
//! | [`ids`] | `VertexId`                                                |
//! | [`geo`] | `Projection`, haversine distance, initial bearing         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::{EARTH_RADIUS_MILES, Projection, haversine_miles, initial_bearing_deg, planar_distance};
pub use ids::VertexId;
