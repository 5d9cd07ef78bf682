//! Positioned model groups
//!
//! A `SpawnedGroup` is one deployed instance of a unit on the board. A
//! rules-unit with mixed base sizes is rendered as several groups that share
//! a `ParentUnit` link and are judged jointly for coherency.

use serde::{Deserialize, Serialize};

use crate::board::base::BaseShape;
use crate::core::types::{GroupId, ModelId, Vec2};

/// One physical miniature within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,
    /// Position in mm relative to the owning group's origin
    pub position: Vec2,
    /// Facing in degrees, normalized to [0, 360). Only meaningful for
    /// rectangular bases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl Model {
    pub fn new(id: ModelId, position: Vec2) -> Self {
        Self { id, position, rotation: None }
    }

    /// Set facing, wrapping any angle into [0, 360)
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = Some(degrees.rem_euclid(360.0));
    }

    pub fn rotation_or_zero(&self) -> f64 {
        self.rotation.unwrap_or(0.0)
    }
}

/// Link tying several groups into one logical rules-unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentUnit {
    pub id: String,
    pub name: String,
}

/// One deployed unit (or one visual sub-group of a parent unit)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnedGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_unit: Option<ParentUnit>,
    pub base: BaseShape,
    pub models: Vec<Model>,
    /// Group origin in mm relative to the board origin
    pub origin: Vec2,
}

impl SpawnedGroup {
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn model(&self, id: &ModelId) -> Option<&Model> {
        self.models.iter().find(|m| &m.id == id)
    }

    pub fn model_mut(&mut self, id: &ModelId) -> Option<&mut Model> {
        self.models.iter_mut().find(|m| &m.id == id)
    }

    /// Absolute center of a model's measurement circle: group origin plus the
    /// model's local position, offset by the effective half-size on each axis
    /// (local positions address the footprint's top-left corner)
    pub fn absolute_center(&self, model: &Model) -> Vec2 {
        let half = self.base.effective_radius();
        self.origin + model.position + Vec2::new(half, half)
    }

    /// Center of the actual base rectangle/circle, used for zone geometry.
    /// Differs from `absolute_center` for rectangular bases, whose true
    /// center offsets by half of each real dimension
    pub fn base_center(&self, model: &Model) -> Vec2 {
        let (w, h) = self.base.footprint();
        self.origin + model.position + Vec2::new(w / 2.0, h / 2.0)
    }

    /// Composite identifier disambiguating this group's models in
    /// multi-group result sets
    pub fn composite_id(&self, model_id: &ModelId) -> String {
        format!("{}-{}", self.id, model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with_one_model(base: BaseShape) -> SpawnedGroup {
        SpawnedGroup {
            id: GroupId::from("squad"),
            name: "Squad".into(),
            parent_unit: None,
            base,
            models: vec![Model::new(ModelId::from("model-0"), Vec2::new(10.0, 20.0))],
            origin: Vec2::new(100.0, 200.0),
        }
    }

    #[test]
    fn test_absolute_center_circular() {
        let group = group_with_one_model(BaseShape::Circular { diameter: 32.0 });
        let center = group.absolute_center(&group.models[0]);
        assert_eq!(center, Vec2::new(126.0, 236.0));
    }

    #[test]
    fn test_absolute_center_rectangular_uses_effective_half() {
        let group = group_with_one_model(BaseShape::Rectangular { width: 25.0, length: 70.0 });
        let center = group.absolute_center(&group.models[0]);
        // effective half-size is 35 on both axes
        assert_eq!(center, Vec2::new(145.0, 255.0));
    }

    #[test]
    fn test_base_center_rectangular_uses_real_dims() {
        let group = group_with_one_model(BaseShape::Rectangular { width: 25.0, length: 70.0 });
        let center = group.base_center(&group.models[0]);
        assert_eq!(center, Vec2::new(122.5, 255.0));
    }

    #[test]
    fn test_rotation_normalization() {
        let mut model = Model::new(ModelId::from("m"), Vec2::default());
        model.set_rotation(370.0);
        assert_eq!(model.rotation, Some(10.0));
        model.set_rotation(-90.0);
        assert_eq!(model.rotation, Some(270.0));
        model.set_rotation(360.0);
        assert_eq!(model.rotation, Some(0.0));
        assert_eq!(model.rotation_or_zero(), 0.0);
    }

    #[test]
    fn test_composite_id_format() {
        let group = group_with_one_model(BaseShape::default());
        assert_eq!(group.composite_id(&ModelId::from("model-0")), "squad-model-0");
    }

    #[test]
    fn test_model_lookup() {
        let mut group = group_with_one_model(BaseShape::default());
        assert!(group.model(&ModelId::from("model-0")).is_some());
        assert!(group.model(&ModelId::from("model-1")).is_none());
        assert!(group.model_mut(&ModelId::from("model-0")).is_some());
    }
}
