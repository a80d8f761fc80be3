//! Navigation-step data shapes for turn-by-turn directions.
//!
//! Deriving turn categories from bearings is a future extension — only the
//! shapes a direction generator would produce live here.

/// Discrete turn category for one navigation step.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    /// First step of a route.
    #[default]
    Start,
    Straight,
    SlightLeft,
    SlightRight,
    Right,
    Left,
    SharpLeft,
    SharpRight,
}

impl Turn {
    /// Human-readable instruction label.
    pub fn as_str(self) -> &'static str {
        match self {
            Turn::Start => "Start",
            Turn::Straight => "Go straight",
            Turn::SlightLeft => "Slight left",
            Turn::SlightRight => "Slight right",
            Turn::Right => "Turn right",
            Turn::Left => "Turn left",
            Turn::SharpLeft => "Sharp left",
            Turn::SharpRight => "Sharp right",
        }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a set of travel directions: a turn, the way it is taken on,
/// and the distance to continue for.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationStep {
    pub turn: Turn,
    /// Name of the way, when the map data provides one.
    pub way: Option<String>,
    pub distance_miles: f64,
}

impl std::fmt::Display for NavigationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {} and continue for {:.3} miles.",
            self.turn,
            self.way.as_deref().unwrap_or("unknown road"),
            self.distance_miles,
        )
    }
}
