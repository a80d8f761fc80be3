//! Spatial-subsystem error type.
//!
//! An unreachable destination is deliberately *not* an error: the router
//! returns an empty route for it, since disconnected components are an
//! expected property of real road data, not a fault.

use thiserror::Error;

use nav_core::VertexId;

/// Errors produced by `nav-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// A way references a node id absent from the node list.  Fatal to the
    /// whole build — the normalized input is malformed.
    #[error("way {way} references unknown node {node}")]
    UnknownWayNode { way: usize, node: VertexId },

    /// Lookup by a vertex id the graph does not contain.  Always surfaced,
    /// never silently defaulted to zero coordinates.
    #[error("vertex {0} not found in graph")]
    VertexNotFound(VertexId),

    /// Spatial query against a graph with zero surviving vertices.
    #[error("spatial index is empty")]
    EmptyIndex,

    /// A route query was cancelled via its [`CancelToken`](crate::CancelToken)
    /// before completing.  No partial route is returned.
    #[error("route search cancelled")]
    Cancelled,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
