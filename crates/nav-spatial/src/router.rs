//! A* shortest-path search over the frozen road graph.
//!
//! # Guarantee
//!
//! The heuristic is the great-circle distance to the destination vertex —
//! admissible (the great-circle distance is the shortest possible distance
//! between two points) and consistent (triangle inequality), so the search
//! returns a path of minimal total real-world distance, same as Dijkstra
//! but expanding fewer vertices on average.
//!
//! # Per-query state
//!
//! Frontier, best-cost map, predecessor map, and the finalized set are all
//! local to one call and discarded afterwards.  Nothing in the query path
//! writes to shared structures, so concurrent searches over one graph are
//! safe without locking.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use rustc_hash::{FxHashMap, FxHashSet};

use nav_core::VertexId;

use crate::error::{SpatialError, SpatialResult};
use crate::graph::RoadGraph;

// ── CancelToken ───────────────────────────────────────────────────────────────

/// Cheap clonable handle for cancelling an in-flight route search.
///
/// The router checks the flag at each frontier pop; a cancelled search
/// fails with [`SpatialError::Cancelled`] and never returns a partial
/// route.  A retry is pointless — the computation is deterministic — so a
/// timeout should simply cancel and give up.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

// ── Frontier ordering ─────────────────────────────────────────────────────────

/// Frontier entry: vertex plus its `g + h` priority.  Ordered ascending by
/// priority via `Reverse` in the heap; ties break on the vertex id so pop
/// order is deterministic.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    priority: f64,
    vertex: VertexId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Shortest route between two coordinates, as an ordered vertex-id
/// sequence from start to destination.
///
/// Both endpoints are snapped to their nearest graph vertex first.  An
/// empty result means the snapped endpoints are not connected — an
/// expected outcome, not an error.
///
/// # Errors
///
/// [`SpatialError::EmptyIndex`] if the graph has no vertices (the initial
/// snap has no valid answer).
pub fn shortest_path(
    graph: &RoadGraph,
    st_lon: f64,
    st_lat: f64,
    dest_lon: f64,
    dest_lat: f64,
) -> SpatialResult<Vec<VertexId>> {
    a_star(graph, st_lon, st_lat, dest_lon, dest_lat, None)
}

/// [`shortest_path`] with a cancellation token, checked at each frontier
/// pop.  Fails with [`SpatialError::Cancelled`] once the token fires.
pub fn shortest_path_cancellable(
    graph: &RoadGraph,
    st_lon: f64,
    st_lat: f64,
    dest_lon: f64,
    dest_lat: f64,
    cancel: &CancelToken,
) -> SpatialResult<Vec<VertexId>> {
    a_star(graph, st_lon, st_lat, dest_lon, dest_lat, Some(cancel))
}

fn a_star(
    graph: &RoadGraph,
    st_lon: f64,
    st_lat: f64,
    dest_lon: f64,
    dest_lat: f64,
    cancel: Option<&CancelToken>,
) -> SpatialResult<Vec<VertexId>> {
    let start = graph.nearest_vertex(st_lon, st_lat)?;
    let dest = graph.nearest_vertex(dest_lon, dest_lat)?;
    if start == dest {
        return Ok(vec![start]);
    }

    // best[v] = lowest known real cost (miles) from start to v.
    let mut best: FxHashMap<VertexId, f64> = FxHashMap::default();
    // prev[v] = predecessor of v on that best path.
    let mut prev: FxHashMap<VertexId, VertexId> = FxHashMap::default();
    // Vertices expanded once with their lowest possible cost.
    let mut finalized: FxHashSet<VertexId> = FxHashSet::default();

    let mut frontier: BinaryHeap<Reverse<FrontierEntry>> = BinaryHeap::new();
    best.insert(start, 0.0);
    frontier.push(Reverse(FrontierEntry {
        priority: graph.distance(start, dest)?,
        vertex: start,
    }));

    while let Some(Reverse(entry)) = frontier.pop() {
        if let Some(token) = cancel {
            if token.is_cancelled() {
                return Err(SpatialError::Cancelled);
            }
        }

        let current = entry.vertex;
        if !finalized.insert(current) {
            // Stale queue entry; the vertex was already expanded cheaper.
            continue;
        }
        if current == dest {
            return Ok(reconstruct(&prev, start, dest));
        }

        let g_current = best[&current];
        for neighbor in graph.neighbors(current)? {
            if finalized.contains(&neighbor) {
                continue;
            }
            let tentative = g_current + graph.distance(current, neighbor)?;
            if best.get(&neighbor).is_none_or(|&g| tentative < g) {
                best.insert(neighbor, tentative);
                prev.insert(neighbor, current);
                frontier.push(Reverse(FrontierEntry {
                    priority: tentative + graph.distance(neighbor, dest)?,
                    vertex: neighbor,
                }));
            }
        }
    }

    // Frontier exhausted without finalizing the destination: unreachable.
    Ok(Vec::new())
}

/// Follow `prev` backward from the destination, then reverse into
/// start-to-destination order.
fn reconstruct(
    prev: &FxHashMap<VertexId, VertexId>,
    start: VertexId,
    dest: VertexId,
) -> Vec<VertexId> {
    let mut path = vec![dest];
    let mut current = dest;
    while current != start {
        current = prev[&current];
        path.push(current);
    }
    path.reverse();
    path
}
