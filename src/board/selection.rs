//! Model selection
//!
//! The selection is a set-like list of (group, model) references with the
//! usual click semantics: plain click replaces, ctrl-click toggles, box
//! select replaces with everything the box touches. Selection state never
//! owns models; deleting a group must be followed by `retain_groups`.

use serde::{Deserialize, Serialize};

use crate::board::group::SpawnedGroup;
use crate::core::types::{GroupId, ModelId, Vec2};

/// Reference to one selected model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedModel {
    pub group_id: GroupId,
    pub model_id: ModelId,
}

impl SelectedModel {
    pub fn new(group_id: GroupId, model_id: ModelId) -> Self {
        Self { group_id, model_id }
    }
}

/// Current set of selected models
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    items: Vec<SelectedModel>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedModel> {
        self.items.iter()
    }

    pub fn contains(&self, group_id: &GroupId, model_id: &ModelId) -> bool {
        self.items
            .iter()
            .any(|s| &s.group_id == group_id && &s.model_id == model_id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Plain click: replace the whole selection with one model
    pub fn select_only(&mut self, item: SelectedModel) {
        self.items = vec![item];
    }

    /// Ctrl-click: add if absent, remove if present
    pub fn toggle(&mut self, item: SelectedModel) {
        if let Some(pos) = self.items.iter().position(|s| *s == item) {
            self.items.remove(pos);
        } else {
            self.items.push(item);
        }
    }

    /// Replace the selection wholesale (box select, select-all)
    pub fn replace(&mut self, items: Vec<SelectedModel>) {
        self.items = items;
    }

    /// Select every model of every supplied group
    pub fn select_all<'a>(&mut self, groups: impl Iterator<Item = &'a SpawnedGroup>) {
        self.items = groups
            .flat_map(|g| {
                g.models
                    .iter()
                    .map(|m| SelectedModel::new(g.id.clone(), m.id.clone()))
            })
            .collect();
    }

    /// Drop references into groups that no longer exist
    pub fn retain_groups(&mut self, removed: &[GroupId]) {
        self.items.retain(|s| !removed.contains(&s.group_id));
    }

    /// Number of distinct groups the selection spans
    pub fn group_count(&self) -> usize {
        let mut seen: Vec<&GroupId> = Vec::new();
        for item in &self.items {
            if !seen.contains(&&item.group_id) {
                seen.push(&item.group_id);
            }
        }
        seen.len()
    }
}

/// Every model whose axis-aligned footprint intersects the box spanned by
/// the two corners, in mm board space
pub fn box_select(
    groups: &[&SpawnedGroup],
    corner_a: Vec2,
    corner_b: Vec2,
) -> Vec<SelectedModel> {
    let left = corner_a.x.min(corner_b.x);
    let right = corner_a.x.max(corner_b.x);
    let top = corner_a.y.min(corner_b.y);
    let bottom = corner_a.y.max(corner_b.y);

    let mut hits = Vec::new();
    for group in groups {
        let (w, h) = group.base.footprint();
        for model in &group.models {
            let model_left = group.origin.x + model.position.x;
            let model_top = group.origin.y + model.position.y;
            let model_right = model_left + w;
            let model_bottom = model_top + h;

            let outside = model_right < left
                || model_left > right
                || model_bottom < top
                || model_top > bottom;
            if !outside {
                hits.push(SelectedModel::new(group.id.clone(), model.id.clone()));
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::base::BaseShape;
    use crate::board::group::Model;

    fn sel(group: &str, model: &str) -> SelectedModel {
        SelectedModel::new(GroupId::from(group), ModelId::from(model))
    }

    fn circles(id: &str, positions: &[(f64, f64)]) -> SpawnedGroup {
        SpawnedGroup {
            id: GroupId::from(id),
            name: id.to_string(),
            parent_unit: None,
            base: BaseShape::Circular { diameter: 25.0 },
            models: positions
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| Model::new(ModelId::from_index(i), Vec2::new(x, y)))
                .collect(),
            origin: Vec2::default(),
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = Selection::new();
        selection.toggle(sel("g", "model-0"));
        assert!(selection.contains(&GroupId::from("g"), &ModelId::from("model-0")));
        selection.toggle(sel("g", "model-0"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_only_replaces() {
        let mut selection = Selection::new();
        selection.toggle(sel("g", "model-0"));
        selection.toggle(sel("g", "model-1"));
        selection.select_only(sel("g", "model-2"));
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(&GroupId::from("g"), &ModelId::from("model-2")));
    }

    #[test]
    fn test_select_all_spans_groups() {
        let a = circles("a", &[(0.0, 0.0), (30.0, 0.0)]);
        let b = circles("b", &[(0.0, 0.0)]);
        let mut selection = Selection::new();
        selection.select_all([&a, &b].into_iter());
        assert_eq!(selection.len(), 3);
        assert_eq!(selection.group_count(), 2);
    }

    #[test]
    fn test_retain_groups_drops_removed() {
        let mut selection = Selection::new();
        selection.toggle(sel("a", "model-0"));
        selection.toggle(sel("b", "model-0"));
        selection.retain_groups(&[GroupId::from("a")]);
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(&GroupId::from("b"), &ModelId::from("model-0")));
    }

    #[test]
    fn test_box_select_hits_intersecting_models() {
        let g = circles("g", &[(0.0, 0.0), (100.0, 0.0)]);
        // Box covering the first model's footprint only
        let hits = box_select(&[&g], Vec2::new(-5.0, -5.0), Vec2::new(30.0, 30.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].model_id, ModelId::from("model-0"));
    }

    #[test]
    fn test_box_select_corners_in_any_order() {
        let g = circles("g", &[(0.0, 0.0)]);
        let forward = box_select(&[&g], Vec2::new(-5.0, -5.0), Vec2::new(30.0, 30.0));
        let backward = box_select(&[&g], Vec2::new(30.0, 30.0), Vec2::new(-5.0, -5.0));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_box_select_partial_overlap_counts() {
        let g = circles("g", &[(0.0, 0.0)]);
        // Box clipping just the right edge of the 25 mm footprint
        let hits = box_select(&[&g], Vec2::new(20.0, 5.0), Vec2::new(60.0, 20.0));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_box_select_miss() {
        let g = circles("g", &[(0.0, 0.0)]);
        let hits = box_select(&[&g], Vec2::new(50.0, 50.0), Vec2::new(80.0, 80.0));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_box_select_respects_group_origin() {
        let mut g = circles("g", &[(0.0, 0.0)]);
        g.origin = Vec2::new(200.0, 200.0);
        assert!(box_select(&[&g], Vec2::new(0.0, 0.0), Vec2::new(50.0, 50.0)).is_empty());
        assert_eq!(
            box_select(&[&g], Vec2::new(190.0, 190.0), Vec2::new(240.0, 240.0)).len(),
            1
        );
    }
}
