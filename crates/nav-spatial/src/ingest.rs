//! Graph construction from normalized map-data records.
//!
//! Raw map parsing lives upstream; this module consumes its output — a
//! flat node list plus a way list — and turns it into a frozen
//! [`RoadGraph`].
//!
//! # What is kept
//!
//! Only ways whose `highway` tag is in the drivable allow-list contribute
//! edges (see [`is_drivable`]).  A kept way's nodes, in declared order,
//! form a path graph: interior nodes become adjacent to predecessor and
//! successor, endpoints to their single neighbor.  Ways sharing a node
//! accumulate adjacency as a union.  Nodes left with no adjacency after
//! all ways are processed (building outlines, POIs) are pruned so they can
//! never win a nearest-vertex query.

use rustc_hash::FxHashMap;

use nav_core::{Projection, VertexId};

use crate::error::{SpatialError, SpatialResult};
use crate::graph::{RoadGraph, RoadGraphBuilder};

// ── Normalized input records ──────────────────────────────────────────────────

/// One map node, as produced by the ingestion collaborator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord {
    pub id: i64,
    pub lon: f64,
    pub lat: f64,
    pub name: Option<String>,
}

/// One map way: an ordered node-ref path plus its tags.  Every ref must
/// resolve to an id present in the node list.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WayRecord {
    pub node_refs: Vec<i64>,
    pub tags: FxHashMap<String, String>,
}

// ── Road-class filter ─────────────────────────────────────────────────────────

/// `true` if a `highway` class belongs to the drivable allow-list.
///
/// Service roads and purely pedestrian classes are excluded so routes stay
/// on real streets as much as possible.
pub fn is_drivable(highway: &str) -> bool {
    matches!(
        highway,
        "motorway"
            | "trunk"
            | "primary"
            | "secondary"
            | "tertiary"
            | "unclassified"
            | "residential"
            | "living_street"
            | "motorway_link"
            | "trunk_link"
            | "primary_link"
            | "secondary_link"
            | "tertiary_link"
    )
}

// ── Build ─────────────────────────────────────────────────────────────────────

/// Build a frozen [`RoadGraph`] from normalized node and way records.
///
/// The projection is centered on the midpoint of the node list's bounding
/// box, so planar coordinates stay accurate across the covered region.
///
/// # Errors
///
/// [`SpatialError::UnknownWayNode`] if a kept way references a node id
/// absent from `nodes`; the whole build is aborted.
pub fn build_graph(nodes: &[NodeRecord], ways: &[WayRecord]) -> SpatialResult<RoadGraph> {
    let projection = coverage_projection(nodes);
    let mut builder = RoadGraphBuilder::with_capacity(projection, nodes.len());

    for n in nodes {
        builder.add_vertex(VertexId(n.id), n.lon, n.lat, n.name.clone());
    }

    let mut kept_ways = 0usize;
    for (way_idx, way) in ways.iter().enumerate() {
        let class = match way.tags.get("highway") {
            Some(c) => c.as_str(),
            None => {
                log::debug!("way {way_idx}: no highway tag, skipped");
                continue;
            }
        };
        if !is_drivable(class) {
            log::debug!("way {way_idx}: highway={class} not drivable, skipped");
            continue;
        }
        if way.node_refs.len() < 2 {
            log::debug!("way {way_idx}: fewer than two nodes, skipped");
            continue;
        }

        for pair in way.node_refs.windows(2) {
            let (a, b) = (VertexId(pair[0]), VertexId(pair[1]));
            builder.connect(a, b).map_err(|e| match e {
                SpatialError::VertexNotFound(node) => {
                    SpatialError::UnknownWayNode { way: way_idx, node }
                }
                other => other,
            })?;
        }
        kept_ways += 1;
    }

    let before = builder.vertex_count();
    let graph = builder.finish();
    log::info!(
        "road graph built: {} vertices ({} isolated pruned), {} of {} ways kept",
        graph.vertex_count(),
        before - graph.vertex_count(),
        kept_ways,
        ways.len(),
    );
    Ok(graph)
}

/// Projection centered on the midpoint of the nodes' bounding box.  An
/// empty node list centers at (0, 0); the resulting graph is empty and
/// every spatial query against it reports `EmptyIndex`.
fn coverage_projection(nodes: &[NodeRecord]) -> Projection {
    if nodes.is_empty() {
        return Projection::centered_at(0.0, 0.0);
    }
    let mut min_lon = f64::INFINITY;
    let mut max_lon = f64::NEG_INFINITY;
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    for n in nodes {
        min_lon = min_lon.min(n.lon);
        max_lon = max_lon.max(n.lon);
        min_lat = min_lat.min(n.lat);
        max_lat = max_lat.max(n.lat);
    }
    Projection::centered_at((min_lon + max_lon) / 2.0, (min_lat + max_lat) / 2.0)
}
