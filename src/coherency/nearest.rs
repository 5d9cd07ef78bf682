//! Nearest-neighbor queries for a selected model
//!
//! Used by the measurement overlay: pick a model, see how far its closest
//! unit-mates are. The result count mirrors the coherency rule so the overlay
//! shows exactly the neighbors the player must keep in range.

use ordered_float::OrderedFloat;

use crate::board::group::{Model, SpawnedGroup};
use crate::geometry::distance::edge_distance;
use crate::rules::constants::required_neighbor_count;
use crate::units::display_inches;

/// One ranked neighbor of the query model
#[derive(Debug, Clone)]
pub struct NearestModel<'a> {
    pub model: &'a Model,
    pub group: &'a SpawnedGroup,
    pub distance_mm: f64,
    /// Display distance, rounded up to 2 decimals
    pub distance_inches: f64,
}

/// Find the closest other models to `target`, sorted ascending by edge-to-edge
/// distance. The search scope is the target's own group unless `search_groups`
/// is non-empty (pass all of a parent unit's groups to search across it).
/// Returns 1 result for scopes of 6 or fewer models, 2 for 7+, and nothing
/// when the target is alone.
pub fn find_nearest_models<'a>(
    target: &Model,
    target_group: &'a SpawnedGroup,
    search_groups: &[&'a SpawnedGroup],
) -> Vec<NearestModel<'a>> {
    let own_group = [target_group];
    let scope: &[&'a SpawnedGroup] = if search_groups.is_empty() {
        &own_group
    } else {
        search_groups
    };

    let total_models: usize = scope.iter().map(|g| g.model_count()).sum();
    let wanted = required_neighbor_count(total_models);
    if wanted == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<NearestModel<'a>> = Vec::new();
    for group in scope {
        for model in &group.models {
            if group.id == target_group.id && model.id == target.id {
                continue;
            }
            let distance_mm = edge_distance(target, target_group, model, group);
            candidates.push(NearestModel {
                model,
                group,
                distance_mm,
                distance_inches: display_inches(distance_mm),
            });
        }
    }

    candidates.sort_by_key(|c| OrderedFloat(c.distance_mm));
    candidates.truncate(wanted);
    candidates
}
