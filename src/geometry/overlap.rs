//! Pairwise base overlap detection
//!
//! Flags physically impossible placements (two bases occupying the same
//! space) across every group on the board, regardless of unit. Bases are
//! approximated as circles; a small tolerance absorbs float noise from the
//! spawn grid so freshly packed groups never self-report.

use std::collections::HashSet;

use crate::board::group::SpawnedGroup;
use crate::core::types::Vec2;
use crate::rules::constants::OVERLAP_TOLERANCE_MM;

/// Composite `group-model` ids of every model whose base overlaps another.
/// Two models overlap when their centers are closer than the sum of their
/// radii minus the tolerance; bases exactly touching do not count. Plain
/// O(n^2) scan, fine at board scale (tens of models).
pub fn find_overlapping_models(groups: &[&SpawnedGroup]) -> HashSet<String> {
    let mut entries: Vec<(String, Vec2, f64)> = Vec::new();
    for group in groups {
        for model in &group.models {
            entries.push((
                group.composite_id(&model.id),
                group.absolute_center(model),
                group.base.effective_radius(),
            ));
        }
    }

    let mut overlapping = HashSet::new();
    for (i, (key_a, center_a, radius_a)) in entries.iter().enumerate() {
        for (key_b, center_b, radius_b) in entries.iter().skip(i + 1) {
            let center_distance = center_a.distance(center_b);
            if center_distance < radius_a + radius_b - OVERLAP_TOLERANCE_MM {
                overlapping.insert(key_a.clone());
                overlapping.insert(key_b.clone());
            }
        }
    }

    overlapping
}
