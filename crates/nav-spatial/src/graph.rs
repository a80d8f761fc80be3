//! Road graph representation and builder.
//!
//! # Lifecycle
//!
//! [`RoadGraphBuilder`] is the only mutable phase: vertices and symmetric
//! adjacency go in, then [`finish`](RoadGraphBuilder::finish) prunes
//! isolated vertices, builds the KD-tree over the survivors, and freezes
//! everything into a [`RoadGraph`].  The graph never mutates afterwards, so
//! it can be queried from any number of threads concurrently.
//!
//! # Data layout
//!
//! Vertices are keyed by their stable external [`VertexId`] in an
//! `FxHashMap`; an insertion-order side list keeps
//! [`vertex_ids`](RoadGraph::vertex_ids) stable within a single build.
//! Planar x/y are
//! projected once at insertion and cached on the vertex — the KD-tree and
//! every proximity comparison read the cache, never re-project.
//!
//! Traversal cost between adjacent vertices is *not* stored; it is always
//! recomputed as the great-circle distance between their coordinates.

use rustc_hash::FxHashMap;

use nav_core::{Projection, VertexId, haversine_miles, initial_bearing_deg};

use crate::error::{SpatialError, SpatialResult};
use crate::index::{KdTree, PlanarPoint};
use crate::router::{self, CancelToken};

// ── Vertex ────────────────────────────────────────────────────────────────────

/// A road-network vertex (intersection or way point).  Owned exclusively by
/// the graph.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub id: VertexId,
    pub lon: f64,
    pub lat: f64,
    /// Cached planar coordinates, projected once at insertion.
    pub x: f64,
    pub y: f64,
    /// Location name from the map data, when tagged.
    pub name: Option<String>,
    /// Neighbor ids, set semantics (no duplicates).  Symmetric: `v` lists
    /// `w` iff `w` lists `v`.
    neighbors: Vec<VertexId>,
}

/// Coordinate and name snapshot for one vertex, borrowed from the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInfo<'a> {
    pub lon: f64,
    pub lat: f64,
    pub name: Option<&'a str>,
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`finish`](Self::finish).
///
/// Construction is single-threaded and must complete before any query is
/// served.  Re-adding an existing id overwrites it — the ingestion layer
/// guarantees id uniqueness, so the builder does not try to detect it.
pub struct RoadGraphBuilder {
    projection: Projection,
    vertices: FxHashMap<VertexId, Vertex>,
    order: Vec<VertexId>,
}

impl RoadGraphBuilder {
    /// A builder whose planar coordinates come from `projection`.  Center
    /// the projection on the midpoint of the coverage bounding box.
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            vertices: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Pre-allocate for the expected vertex count.
    pub fn with_capacity(projection: Projection, vertices: usize) -> Self {
        Self {
            projection,
            vertices: FxHashMap::with_capacity_and_hasher(vertices, Default::default()),
            order: Vec::with_capacity(vertices),
        }
    }

    /// Insert a vertex.  Planar x/y are projected and cached immediately.
    pub fn add_vertex(&mut self, id: VertexId, lon: f64, lat: f64, name: Option<String>) {
        let x = self.projection.project_x(lon, lat);
        let y = self.projection.project_y(lon, lat);
        self.order.push(id);
        self.vertices.insert(
            id,
            Vertex { id, lon, lat, x, y, name, neighbors: Vec::new() },
        );
    }

    /// Connect two vertices, symmetrically and idempotently: `a` gains `b`
    /// as a neighbor and vice versa, with duplicates ignored (a node shared
    /// by several ways accumulates adjacency as a union).
    ///
    /// # Errors
    ///
    /// [`SpatialError::VertexNotFound`] if either id is absent.
    pub fn connect(&mut self, a: VertexId, b: VertexId) -> SpatialResult<()> {
        if !self.vertices.contains_key(&a) {
            return Err(SpatialError::VertexNotFound(a));
        }
        if !self.vertices.contains_key(&b) {
            return Err(SpatialError::VertexNotFound(b));
        }
        let mut link = |from: VertexId, to: VertexId| {
            // Adjacency lists are tiny (road intersections have degree ≤ ~6),
            // so a linear containment check beats a per-vertex hash set.
            if let Some(v) = self.vertices.get_mut(&from) {
                if !v.neighbors.contains(&to) {
                    v.neighbors.push(to);
                }
            }
        };
        link(a, b);
        link(b, a);
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Consume the builder and produce a frozen [`RoadGraph`].
    ///
    /// Removes every vertex whose neighbor set is empty (non-road points
    /// would otherwise win nearest-vertex queries), then builds the KD-tree
    /// over the survivors.
    pub fn finish(self) -> RoadGraph {
        let mut vertices = self.vertices;
        vertices.retain(|_, v| !v.neighbors.is_empty());

        // Adjacency symmetry guarantees no surviving vertex references a
        // pruned one: a pruned vertex had no neighbors, so nothing lists it.
        let order: Vec<VertexId> = self
            .order
            .iter()
            .copied()
            .filter(|id| vertices.contains_key(id))
            .collect();

        let points: Vec<PlanarPoint> = order
            .iter()
            .filter_map(|id| vertices.get(id))
            .map(|v| PlanarPoint { x: v.x, y: v.y, id: v.id })
            .collect();
        let index = KdTree::build(points);

        RoadGraph { projection: self.projection, vertices, order, index }
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Frozen road graph plus the KD-tree built over its vertices.
///
/// Immutable for the remainder of the process lifetime; all queries are
/// pure reads with per-call working state, so concurrent callers need no
/// locking.
#[derive(Debug)]
pub struct RoadGraph {
    projection: Projection,
    vertices: FxHashMap<VertexId, Vertex>,
    order: Vec<VertexId>,
    index: KdTree,
}

impl RoadGraph {
    fn vertex(&self, id: VertexId) -> SpatialResult<&Vertex> {
        self.vertices.get(&id).ok_or(SpatialError::VertexNotFound(id))
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The projection the graph's planar coordinates were derived with.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    // ── Per-vertex accessors ──────────────────────────────────────────────

    pub fn lon(&self, id: VertexId) -> SpatialResult<f64> {
        Ok(self.vertex(id)?.lon)
    }

    pub fn lat(&self, id: VertexId) -> SpatialResult<f64> {
        Ok(self.vertex(id)?.lat)
    }

    /// Coordinates and optional name of one vertex.
    pub fn vertex_info(&self, id: VertexId) -> SpatialResult<VertexInfo<'_>> {
        let v = self.vertex(id)?;
        Ok(VertexInfo { lon: v.lon, lat: v.lat, name: v.name.as_deref() })
    }

    /// Lazy, restartable iterator over the neighbor ids of `id`.
    pub fn neighbors(
        &self,
        id: VertexId,
    ) -> SpatialResult<impl Iterator<Item = VertexId> + '_> {
        Ok(self.vertex(id)?.neighbors.iter().copied())
    }

    /// Iterator over all surviving vertex ids, in insertion order (stable
    /// within a single build).
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.order.iter().copied()
    }

    // ── Pairwise geometry ─────────────────────────────────────────────────

    /// Great-circle distance between two vertices, in miles.  This is the
    /// traversal cost of the edge between them, recomputed on demand.
    pub fn distance(&self, a: VertexId, b: VertexId) -> SpatialResult<f64> {
        let va = self.vertex(a)?;
        let vb = self.vertex(b)?;
        Ok(haversine_miles(va.lon, va.lat, vb.lon, vb.lat))
    }

    /// Initial bearing from `a` to `b`, in degrees.
    pub fn bearing(&self, a: VertexId, b: VertexId) -> SpatialResult<f64> {
        let va = self.vertex(a)?;
        let vb = self.vertex(b)?;
        Ok(initial_bearing_deg(va.lon, va.lat, vb.lon, vb.lat))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Id of the vertex closest (in projected planar distance) to the given
    /// geographic coordinate.
    ///
    /// # Errors
    ///
    /// [`SpatialError::EmptyIndex`] if the graph has no vertices.
    pub fn nearest_vertex(&self, lon: f64, lat: f64) -> SpatialResult<VertexId> {
        let x = self.projection.project_x(lon, lat);
        let y = self.projection.project_y(lon, lat);
        self.index.nearest(x, y).ok_or(SpatialError::EmptyIndex)
    }

    /// Shortest travelable route between two coordinates, as an ordered
    /// vertex-id sequence.  Empty if the snapped endpoints are not
    /// connected; see [`router::shortest_path`].
    pub fn route(
        &self,
        st_lon: f64,
        st_lat: f64,
        dest_lon: f64,
        dest_lat: f64,
    ) -> SpatialResult<Vec<VertexId>> {
        router::shortest_path(self, st_lon, st_lat, dest_lon, dest_lat)
    }

    /// [`route`](Self::route) with a cancellation token, checked at each
    /// frontier pop.
    pub fn route_cancellable(
        &self,
        st_lon: f64,
        st_lat: f64,
        dest_lon: f64,
        dest_lat: f64,
        cancel: &CancelToken,
    ) -> SpatialResult<Vec<VertexId>> {
        router::shortest_path_cancellable(self, st_lon, st_lat, dest_lon, dest_lat, cancel)
    }
}
