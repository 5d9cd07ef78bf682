//! Unit coherency engine
//!
//! Coherency is the tournament legality rule for deployed units: every model
//! must stay within 2" (edge to edge) of at least one other model of its
//! unit — two others once the unit has 7+ models — and the unit as a whole
//! must form a single connected cluster. A unit split into two internally
//! tight clusters is still illegal.
//!
//! Both entry points are pure and never fail: empty or single-model input is
//! trivially coherent.

pub mod connectivity;
pub mod nearest;

use std::collections::HashSet;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::board::group::{Model, SpawnedGroup};
use crate::coherency::connectivity::is_single_connected_component;
use crate::geometry::distance::edge_distance;
use crate::rules::constants::{
    required_neighbor_count, COHERENCY_RANGE_MM, DISTANCE_EPSILON_MM,
};

/// Outcome of a coherency check. Identifiers in the violation set are bare
/// model ids for single-group checks and composite `group-model` ids for
/// parent-unit checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoherencyResult {
    pub is_in_coherency: bool,
    pub out_of_coherency_models: HashSet<String>,
}

impl CoherencyResult {
    fn coherent() -> Self {
        Self {
            is_in_coherency: true,
            out_of_coherency_models: HashSet::new(),
        }
    }
}

/// Check a single deployed group against the coherency rule
pub fn check_coherency(group: &SpawnedGroup) -> CoherencyResult {
    let roster: Vec<(String, &Model, &SpawnedGroup)> = group
        .models
        .iter()
        .map(|m| (m.id.to_string(), m, group))
        .collect();

    check_roster(&roster)
}

/// Check one logical unit rendered as several groups. Neighbor counting and
/// the connectivity graph span every model of every supplied group, and the
/// combined model count picks the 6/7 neighbor threshold. Violating models
/// are reported as composite `group-model` identifiers.
pub fn check_parent_unit_coherency(groups: &[&SpawnedGroup]) -> CoherencyResult {
    let roster: Vec<(String, &Model, &SpawnedGroup)> = groups
        .iter()
        .flat_map(|g| g.models.iter().map(move |m| (g.composite_id(&m.id), m, *g)))
        .collect();

    check_roster(&roster)
}

fn check_roster(roster: &[(String, &Model, &SpawnedGroup)]) -> CoherencyResult {
    if roster.len() <= 1 {
        return CoherencyResult::coherent();
    }

    let required = required_neighbor_count(roster.len());
    let range = COHERENCY_RANGE_MM + DISTANCE_EPSILON_MM;

    let mut adjacency: AHashMap<String, AHashSet<String>> = AHashMap::new();
    for (i, (key_a, model_a, group_a)) in roster.iter().enumerate() {
        for (key_b, model_b, group_b) in roster.iter().skip(i + 1) {
            let distance = edge_distance(model_a, group_a, model_b, group_b);
            if distance <= range {
                adjacency.entry(key_a.clone()).or_default().insert(key_b.clone());
                adjacency.entry(key_b.clone()).or_default().insert(key_a.clone());
            }
        }
    }

    let keys: Vec<String> = roster.iter().map(|(key, _, _)| key.clone()).collect();

    let mut out_of_coherency_models: HashSet<String> = keys
        .iter()
        .filter(|key| adjacency.get(*key).map_or(0, |n| n.len()) < required)
        .cloned()
        .collect();

    // A unit split into separate clusters is incoherent as a whole, even if
    // every model individually meets its neighbor count
    if !is_single_connected_component(&keys, &adjacency) {
        out_of_coherency_models.extend(keys);
    }

    CoherencyResult {
        is_in_coherency: out_of_coherency_models.is_empty(),
        out_of_coherency_models,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::base::BaseShape;
    use crate::board::group::ParentUnit;
    use crate::core::types::{GroupId, ModelId, Vec2};

    fn group(id: &str, base: BaseShape, positions: &[(f64, f64)]) -> SpawnedGroup {
        SpawnedGroup {
            id: GroupId::from(id),
            name: id.to_string(),
            parent_unit: None,
            base,
            models: positions
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| Model::new(ModelId::from_index(i), Vec2::new(x, y)))
                .collect(),
            origin: Vec2::default(),
        }
    }

    fn circles(id: &str, diameter: f64, positions: &[(f64, f64)]) -> SpawnedGroup {
        group(id, BaseShape::Circular { diameter }, positions)
    }

    #[test]
    fn test_empty_group_is_trivially_coherent() {
        let g = circles("g", 25.0, &[]);
        let result = check_coherency(&g);
        assert!(result.is_in_coherency);
        assert!(result.out_of_coherency_models.is_empty());
    }

    #[test]
    fn test_single_model_is_trivially_coherent() {
        let g = circles("g", 40.0, &[(0.0, 0.0)]);
        let result = check_coherency(&g);
        assert!(result.is_in_coherency);
        assert!(result.out_of_coherency_models.is_empty());
    }

    #[test]
    fn test_small_unit_chain_is_coherent() {
        // Five 25 mm bases in a row, 30 mm pitch: 5 mm edge gap to each
        // neighbor, well inside 2"
        let positions: Vec<(f64, f64)> = (0..5).map(|i| (i as f64 * 30.0, 0.0)).collect();
        let g = circles("g", 25.0, &positions);
        let result = check_coherency(&g);
        assert!(result.is_in_coherency);
    }

    #[test]
    fn test_small_unit_straggler_violates() {
        // Two together, one 200 mm away
        let g = circles("g", 25.0, &[(0.0, 0.0), (30.0, 0.0), (230.0, 0.0)]);
        let result = check_coherency(&g);
        assert!(!result.is_in_coherency);
        // The straggler fails the neighbor count; the connectivity override
        // then pulls in the whole unit
        assert!(result.out_of_coherency_models.contains("model-2"));
        assert_eq!(result.out_of_coherency_models.len(), 3);
    }

    #[test]
    fn test_large_unit_requires_two_neighbors() {
        // Seven 25 mm bases in a line, 60 mm pitch: each model is within 2"
        // of its immediate neighbors only (35 mm edge gap; next-but-one is
        // 95 mm away). The two ends have a single neighbor and violate.
        let positions: Vec<(f64, f64)> = (0..7).map(|i| (i as f64 * 60.0, 0.0)).collect();
        let g = circles("g", 25.0, &positions);
        let result = check_coherency(&g);
        assert!(!result.is_in_coherency);
        assert!(result.out_of_coherency_models.contains("model-0"));
        assert!(result.out_of_coherency_models.contains("model-6"));
        assert_eq!(result.out_of_coherency_models.len(), 2);
    }

    #[test]
    fn test_six_model_line_needs_only_one_neighbor() {
        // Same spacing as the seven-model line, but at 6 models the ends
        // only need one neighbor
        let positions: Vec<(f64, f64)> = (0..6).map(|i| (i as f64 * 60.0, 0.0)).collect();
        let g = circles("g", 25.0, &positions);
        let result = check_coherency(&g);
        assert!(result.is_in_coherency);
    }

    #[test]
    fn test_split_clusters_fail_as_a_whole() {
        // Two clusters of three, each internally satisfying the 1-neighbor
        // rule, separated by far more than 2"
        let g = circles(
            "g",
            25.0,
            &[
                (0.0, 0.0),
                (30.0, 0.0),
                (15.0, 30.0),
                (500.0, 0.0),
                (530.0, 0.0),
                (515.0, 30.0),
            ],
        );
        let result = check_coherency(&g);
        assert!(!result.is_in_coherency);
        assert_eq!(result.out_of_coherency_models.len(), 6);
    }

    #[test]
    fn test_exact_two_inch_gap_is_coherent() {
        // 32 mm bases with centers 82.8 mm apart: edge gap is exactly 50.8 mm,
        // and the threshold is inclusive
        let g = circles("g", 32.0, &[(0.0, 0.0), (82.8, 0.0)]);
        let result = check_coherency(&g);
        assert!(result.is_in_coherency);
    }

    #[test]
    fn test_just_past_two_inches_is_not_coherent() {
        let g = circles("g", 32.0, &[(0.0, 0.0), (83.5, 0.0)]);
        let result = check_coherency(&g);
        assert!(!result.is_in_coherency);
        assert_eq!(result.out_of_coherency_models.len(), 2);
    }

    fn parent_linked(mut g: SpawnedGroup) -> SpawnedGroup {
        g.parent_unit = Some(ParentUnit {
            id: "character".into(),
            name: "Named Character".into(),
        });
        g
    }

    #[test]
    fn test_parent_unit_spanning_two_groups_is_coherent() {
        // Group A: one 32 mm model; group B: two 25 mm models. All three are
        // mutually within 40 mm edge to edge.
        let a = parent_linked(circles("A", 32.0, &[(0.0, 0.0)]));
        let mut b = parent_linked(circles("B", 25.0, &[(0.0, 0.0), (20.0, 0.0)]));
        b.origin = Vec2::new(40.0, 0.0);

        let result = check_parent_unit_coherency(&[&a, &b]);
        assert!(result.is_in_coherency);
        assert!(result.out_of_coherency_models.is_empty());
    }

    #[test]
    fn test_parent_unit_violations_use_composite_ids() {
        let a = parent_linked(circles("A", 32.0, &[(0.0, 0.0)]));
        let mut b = parent_linked(circles("B", 25.0, &[(0.0, 0.0), (400.0, 0.0)]));
        b.origin = Vec2::new(40.0, 0.0);

        let result = check_parent_unit_coherency(&[&a, &b]);
        assert!(!result.is_in_coherency);
        // The far model splits the unit, so everything is flagged, under
        // composite group-model identifiers
        assert!(result.out_of_coherency_models.contains("A-model-0"));
        assert!(result.out_of_coherency_models.contains("B-model-0"));
        assert!(result.out_of_coherency_models.contains("B-model-1"));
    }

    #[test]
    fn test_parent_unit_count_picks_large_threshold() {
        // 4 + 3 models across two groups totals 7, so the 2-neighbor rule
        // applies. A 60 mm pitch line across both groups leaves the ends
        // with one neighbor each.
        let a = parent_linked(circles(
            "A",
            25.0,
            &[(0.0, 0.0), (60.0, 0.0), (120.0, 0.0), (180.0, 0.0)],
        ));
        let mut b = parent_linked(circles("B", 25.0, &[(0.0, 0.0), (60.0, 0.0), (120.0, 0.0)]));
        b.origin = Vec2::new(240.0, 0.0);

        let result = check_parent_unit_coherency(&[&a, &b]);
        assert!(!result.is_in_coherency);
        assert!(result.out_of_coherency_models.contains("A-model-0"));
        assert!(result.out_of_coherency_models.contains("B-model-2"));
        assert_eq!(result.out_of_coherency_models.len(), 2);
    }

    #[test]
    fn test_empty_group_list_is_trivially_coherent() {
        let result = check_parent_unit_coherency(&[]);
        assert!(result.is_in_coherency);
    }

    #[test]
    fn test_mixed_base_shapes_measure_cross_group() {
        // A rectangular-base character next to a round-base squad member
        let a = parent_linked(group(
            "A",
            BaseShape::Rectangular { width: 25.0, length: 70.0 },
            &[(0.0, 0.0)],
        ));
        let mut b = parent_linked(circles("B", 25.0, &[(0.0, 0.0)]));
        // Effective radii 35 + 12.5; centers end up 60.5 mm apart, a 13 mm gap
        b.origin = Vec2::new(83.0, 22.5);

        let result = check_parent_unit_coherency(&[&a, &b]);
        assert!(result.is_in_coherency);
    }
}
