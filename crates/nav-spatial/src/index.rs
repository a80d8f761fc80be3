//! Balanced 2-D partition tree over projected vertex coordinates.
//!
//! # Shape
//!
//! The splitting axis alternates with depth (x at even depths, y at odd).
//! Each level sorts its sub-slice by the active axis and takes the lower
//! median (`len / 2`) as the node; the strict left/right sub-ranges become
//! the children.  Sorting happens in place on sub-slices, which produces a
//! tree identical in shape to a copy-and-resort build without the copies.
//!
//! With duplicate coordinate values the shape depends on the relative order
//! of equal keys; real map coordinates are effectively unique, so this is
//! accepted (sorts use `total_cmp`, so a fixed input order always yields
//! the same tree).
//!
//! # Query
//!
//! Nearest-neighbor search threads its best-so-far through a per-call
//! accumulator, never through shared state, so any number of threads can
//! query one tree concurrently.

use nav_core::{VertexId, planar_distance};

/// One vertex's projected position, as fed to [`KdTree::build`].
#[derive(Debug, Clone, Copy)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
    pub id: VertexId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

#[derive(Debug)]
struct KdNode {
    id: VertexId,
    // Copies of the referenced vertex's cached planar coordinates, kept
    // inline so queries never touch the graph.
    x: f64,
    y: f64,
    left: Option<Box<KdNode>>,
    right: Option<Box<KdNode>>,
}

/// Per-query nearest-so-far accumulator.
struct Best {
    id: Option<VertexId>,
    dist: f64,
}

/// Immutable spatial index answering nearest-vertex queries in expected
/// O(log n) for well-distributed inputs.  Built once by the graph and owned
/// by it for its whole lifetime.
#[derive(Debug)]
pub struct KdTree {
    root: Option<Box<KdNode>>,
}

impl KdTree {
    /// Build the tree.  An empty point set yields an empty tree (every
    /// query then answers `None`).
    pub fn build(mut points: Vec<PlanarPoint>) -> Self {
        let root = Self::build_node(&mut points, Axis::X);
        Self { root }
    }

    fn build_node(points: &mut [PlanarPoint], axis: Axis) -> Option<Box<KdNode>> {
        if points.is_empty() {
            return None;
        }
        match axis {
            Axis::X => points.sort_unstable_by(|a, b| a.x.total_cmp(&b.x)),
            Axis::Y => points.sort_unstable_by(|a, b| a.y.total_cmp(&b.y)),
        }
        // Lower median for even-sized slices.
        let mid = points.len() / 2;
        let p = points[mid];
        let (left, rest) = points.split_at_mut(mid);
        Some(Box::new(KdNode {
            id: p.id,
            x: p.x,
            y: p.y,
            left: Self::build_node(left, axis.next()),
            right: Self::build_node(&mut rest[1..], axis.next()),
        }))
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Id of the vertex with minimum Euclidean planar distance to `(x, y)`,
    /// or `None` for an empty tree.
    pub fn nearest(&self, x: f64, y: f64) -> Option<VertexId> {
        let mut best = Best { id: None, dist: f64::INFINITY };
        Self::search(self.root.as_deref(), x, y, Axis::X, &mut best);
        best.id
    }

    fn search(node: Option<&KdNode>, x: f64, y: f64, axis: Axis, best: &mut Best) {
        let Some(node) = node else { return };

        let d = planar_distance(x, y, node.x, node.y);
        if d < best.dist {
            best.id = Some(node.id);
            best.dist = d;
            if d == 0.0 {
                // Exact match; every remaining subtree is prunable.
                return;
            }
        }

        // Same-side child first; the opposite child only if the splitting
        // plane is closer than the current best (the pruning rule that keeps
        // the search correct without a full scan).
        let (plane_dist, near, far) = match axis {
            Axis::X if x < node.x => ((node.x - x).abs(), &node.left, &node.right),
            Axis::X => ((node.x - x).abs(), &node.right, &node.left),
            Axis::Y if y < node.y => ((node.y - y).abs(), &node.left, &node.right),
            Axis::Y => ((node.y - y).abs(), &node.right, &node.left),
        };

        Self::search(near.as_deref(), x, y, axis.next(), best);
        if plane_dist < best.dist {
            Self::search(far.as_deref(), x, y, axis.next(), best);
        }
    }
}
