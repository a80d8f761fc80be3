//! Geographic math: planar projection, great-circle distance, bearing.
//!
//! All functions here are pure and total for finite input — no error paths.
//! Two distinct notions of distance coexist and must not be confused:
//!
//! - **Planar (Euclidean) distance** over projected x/y, used *only* for
//!   proximity comparison in the spatial index.  The projection is
//!   locally-Euclidean near its origin and meaningless far from it.
//! - **Great-circle distance** in miles, used for every path cost and for
//!   the route-search heuristic.

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3963.0;

// ── Projection ────────────────────────────────────────────────────────────────

/// Transverse Mercator projection centered at a fixed reference origin.
///
/// The origin should be the midpoint of the service's coverage bounding box
/// so that projected coordinates stay near the region where the projection
/// is accurate.  Scale factor defaults to 1.0 (rather than the UTM 0.9996)
/// since the output is never interpreted as a real-world length.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projection {
    pub origin_lon: f64,
    pub origin_lat: f64,
    pub scale: f64,
}

impl Projection {
    /// Projection centered at `(lon, lat)` with unit scale.
    pub fn centered_at(lon: f64, lat: f64) -> Self {
        Self { origin_lon: lon, origin_lat: lat, scale: 1.0 }
    }

    /// Planar x-value of `(lon, lat)`.
    pub fn project_x(&self, lon: f64, lat: f64) -> f64 {
        let dlon = (lon - self.origin_lon).to_radians();
        let phi = lat.to_radians();
        let b = dlon.sin() * phi.cos();
        (self.scale / 2.0) * ((1.0 + b) / (1.0 - b)).ln()
    }

    /// Planar y-value of `(lon, lat)`.
    pub fn project_y(&self, lon: f64, lat: f64) -> f64 {
        let dlon = (lon - self.origin_lon).to_radians();
        let phi = lat.to_radians();
        let con = (phi.tan() / dlon.cos()).atan();
        self.scale * (con - self.origin_lat.to_radians())
    }
}

// ── Spherical math ────────────────────────────────────────────────────────────

/// Haversine great-circle distance between two lon/lat points, in miles.
///
/// Symmetric in its arguments.  This is the only distance used for route
/// costs; it is also the search heuristic (the great-circle distance is the
/// shortest possible distance between two points, so the heuristic never
/// overestimates).
pub fn haversine_miles(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Initial compass bearing from the first point to the second, in degrees.
///
/// The angle that, followed in a straight line along a great-circle arc from
/// the starting point, reaches the end point.  Kept for direction
/// derivation; the route search itself never consults it.
pub fn initial_bearing_deg(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let lambda1 = lon1.to_radians();
    let lambda2 = lon2.to_radians();

    let y = (lambda2 - lambda1).sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * (lambda2 - lambda1).cos();
    y.atan2(x).to_degrees()
}

/// Euclidean distance between two projected planar points.
#[inline]
pub fn planar_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    (dx * dx + dy * dy).sqrt()
}
