//! Exclusion and aura zone geometry
//!
//! A zone is a buffer region offset outward from a base edge by a fixed
//! distance: the 9" deep-strike exclusion ring around enemy models, or a
//! unit's aura range. Zones are descriptive output for the rendering layer;
//! nothing in the engine passes or fails because of one.

use serde::{Deserialize, Serialize};

use crate::board::base::BaseShape;
use crate::board::group::{Model, SpawnedGroup};
use crate::core::types::Vec2;
use crate::geometry::distance::edge_distance;
use crate::rules::auras::AuraCatalog;
use crate::rules::constants::DEEP_STRIKE_RANGE_MM;

/// Buffer region around one model's base, all dimensions in mm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionZone {
    /// Concentric circle around a round base
    Circle { center: Vec2, radius: f64 },
    /// Rounded rectangle around a rectangular base: straight extents are the
    /// base dimensions plus the buffer on each side, corners rounded at the
    /// buffer radius, rotated to the model's facing
    RoundedRect {
        center: Vec2,
        width: f64,
        length: f64,
        corner_radius: f64,
        rotation: f64,
    },
}

/// Build the buffer zone offset `buffer_mm` outward from a model's base edge
pub fn exclusion_zone(model: &Model, group: &SpawnedGroup, buffer_mm: f64) -> ExclusionZone {
    match group.base {
        BaseShape::Circular { diameter } => ExclusionZone::Circle {
            center: group.absolute_center(model),
            radius: diameter / 2.0 + buffer_mm,
        },
        BaseShape::Rectangular { width, length } => ExclusionZone::RoundedRect {
            center: group.base_center(model),
            width: width + 2.0 * buffer_mm,
            length: length + 2.0 * buffer_mm,
            corner_radius: buffer_mm,
            rotation: model.rotation_or_zero(),
        },
    }
}

/// Deep-strike exclusion zone: reserves may not arrive within 9" of this model
pub fn deep_strike_zone(model: &Model, group: &SpawnedGroup) -> ExclusionZone {
    exclusion_zone(model, group, DEEP_STRIKE_RANGE_MM)
}

/// Deep-strike zones for every model of every supplied group
pub fn deep_strike_zones(groups: &[&SpawnedGroup]) -> Vec<ExclusionZone> {
    groups
        .iter()
        .flat_map(|g| g.models.iter().map(|m| deep_strike_zone(m, g)))
        .collect()
}

/// Aura zone for a model, if its unit has an aura in the catalog
pub fn aura_zone(
    model: &Model,
    group: &SpawnedGroup,
    catalog: &AuraCatalog,
) -> Option<ExclusionZone> {
    catalog
        .range_mm(&group.name)
        .map(|range| exclusion_zone(model, group, range))
}

impl ExclusionZone {
    /// Whether a point lies inside the zone. Rounded rectangles test in the
    /// base's local frame, undoing the model rotation first.
    pub fn contains(&self, point: Vec2) -> bool {
        match *self {
            Self::Circle { center, radius } => center.distance(&point) <= radius,
            Self::RoundedRect { center, width, length, corner_radius, rotation } => {
                let rad = -rotation.to_radians();
                let (sin, cos) = rad.sin_cos();
                let rel = point - center;
                let local = Vec2::new(rel.x * cos - rel.y * sin, rel.x * sin + rel.y * cos);

                // Distance from the inner (un-rounded) rectangle
                let half_w = width / 2.0 - corner_radius;
                let half_l = length / 2.0 - corner_radius;
                let dx = (local.x.abs() - half_w).max(0.0);
                let dy = (local.y.abs() - half_l).max(0.0);
                (dx * dx + dy * dy).sqrt() <= corner_radius
            }
        }
    }
}

/// Convenience check for deep-strike legality visualization: the nearest
/// edge gap from an arriving model to any model of the listed groups
pub fn nearest_gap_to_groups(
    model: &Model,
    group: &SpawnedGroup,
    others: &[&SpawnedGroup],
) -> Option<f64> {
    others
        .iter()
        .flat_map(|g| g.models.iter().map(|m| edge_distance(model, group, m, g)))
        .min_by(|a, b| a.total_cmp(b))
}
