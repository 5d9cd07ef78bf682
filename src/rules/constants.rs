//! Rules constants - all fixed game values in one place
//!
//! These come straight from the tournament ruleset and are never
//! runtime-configurable.

/// Exact conversion factor between the game's display unit and native mm
pub const MM_PER_INCH: f64 = 25.4;

/// Coherency range: each model must stay within 2" of its required
/// number of unit-mates, edge to edge
pub const COHERENCY_RANGE_MM: f64 = 2.0 * MM_PER_INCH; // 50.8

/// Units at or below this model count need 1 in-range neighbor per model;
/// larger units need 2
pub const SMALL_UNIT_MAX_MODELS: usize = 6;

/// Base diameter assumed when an imported unit carries no base size
pub const DEFAULT_BASE_DIAMETER_MM: f64 = 25.0;

/// Slack absorbing float noise in distance comparisons (spawn-grid packing
/// and sqrt round-off must not flip a boundary-exact measurement)
pub const DISTANCE_EPSILON_MM: f64 = 1e-6;

/// Two bases closer than their summed radii minus this tolerance count
/// as overlapping
pub const OVERLAP_TOLERANCE_MM: f64 = 0.5;

/// Deep-strike exclusion buffer: reserves cannot arrive within 9" of an enemy
pub const DEEP_STRIKE_RANGE_MM: f64 = 9.0 * MM_PER_INCH; // 228.6

// Board scale: tournament boards are 44" x 60"
pub const BOARD_WIDTH_MM: f64 = 60.0 * MM_PER_INCH; // 1524.0
pub const BOARD_HEIGHT_MM: f64 = 44.0 * MM_PER_INCH; // 1117.6

// Spawn layout
pub const SPAWN_SPACING_MM: f64 = 5.0;
pub const SPAWN_ORIGIN_MM: f64 = 50.0;

/// Minimum in-range neighbors each model needs for its unit to be coherent.
/// A lone model (or an empty unit) needs none.
pub fn required_neighbor_count(model_count: usize) -> usize {
    if model_count <= 1 {
        0
    } else if model_count <= SMALL_UNIT_MAX_MODELS {
        1
    } else {
        2
    }
}
