//! Edge-to-edge distance between based models
//!
//! All measurement runs on the circle approximation: each base contributes
//! its effective radius (half the diameter, or half the larger rectangle
//! dimension), and the reported distance is the gap between base edges along
//! the line connecting centers.

use crate::board::group::{Model, SpawnedGroup};

/// Gap in mm between two models' base edges. The models may belong to the
/// same group or to different groups; each uses its own group's origin and
/// base size. Overlapping bases report 0, never a negative gap.
pub fn edge_distance(
    model_a: &Model,
    group_a: &SpawnedGroup,
    model_b: &Model,
    group_b: &SpawnedGroup,
) -> f64 {
    let center_a = group_a.absolute_center(model_a);
    let center_b = group_b.absolute_center(model_b);

    let center_distance = center_a.distance(&center_b);
    let gap =
        center_distance - group_a.base.effective_radius() - group_b.base.effective_radius();

    gap.max(0.0)
}
