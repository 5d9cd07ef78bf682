//! Owned board state
//!
//! All deployed groups live here, keyed by group id with stable insertion
//! order. The rendering layer drives mutation through explicit operations
//! (spawn, drag, rotate, line up, delete) and reads derived state through
//! query methods; nothing is recomputed implicitly.

use std::collections::HashSet;

use ahash::AHashMap;
use tracing::{debug, warn};

use crate::board::base::BaseShape;
use crate::board::group::{Model, ParentUnit, SpawnedGroup};
use crate::board::selection::Selection;
use crate::coherency::nearest::{find_nearest_models, NearestModel};
use crate::coherency::{check_coherency, check_parent_unit_coherency, CoherencyResult};
use crate::core::error::{PlannerError, Result};
use crate::core::types::{GroupId, ModelId, Vec2};
use crate::geometry::overlap::find_overlapping_models;
use crate::geometry::zones::{aura_zone, deep_strike_zone, ExclusionZone};
use crate::rules::auras::AuraCatalog;
use crate::rules::constants::{SPAWN_ORIGIN_MM, SPAWN_SPACING_MM};

/// Parameters for instantiating a unit onto the board
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub name: String,
    pub parent_unit: Option<ParentUnit>,
    pub base: BaseShape,
    pub model_count: usize,
    /// Board position for the new group; defaults to (50, 50) mm
    pub origin: Option<Vec2>,
}

/// The deployed board: every spawned group, in spawn order
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    groups: AHashMap<GroupId, SpawnedGroup>,
    order: Vec<GroupId>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a board from persisted groups, keeping their order
    pub fn from_groups(groups: Vec<SpawnedGroup>) -> Self {
        let mut state = Self::new();
        for group in groups {
            state.insert(group);
        }
        state
    }

    /// Snapshot the board as an ordered group list for persistence
    pub fn to_groups(&self) -> Vec<SpawnedGroup> {
        self.iter().cloned().collect()
    }

    fn insert(&mut self, group: SpawnedGroup) {
        if !self.groups.contains_key(&group.id) {
            self.order.push(group.id.clone());
        }
        self.groups.insert(group.id.clone(), group);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn group(&self, id: &GroupId) -> Option<&SpawnedGroup> {
        self.groups.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpawnedGroup> {
        self.order.iter().filter_map(|id| self.groups.get(id))
    }

    fn group_refs(&self) -> Vec<&SpawnedGroup> {
        self.iter().collect()
    }

    /// Instantiate a unit as a new group, packing its models into a square
    /// grid with 5 mm gaps between bases
    pub fn spawn(&mut self, request: SpawnRequest) -> GroupId {
        let count = if request.model_count == 0 {
            warn!(unit = %request.name, "spawn request for zero models, spawning one");
            1
        } else {
            request.model_count
        };

        let pitch = request.base.effective_diameter() + SPAWN_SPACING_MM;
        let per_row = (count as f64).sqrt().ceil() as usize;

        let models = (0..count)
            .map(|i| {
                let row = i / per_row;
                let col = i % per_row;
                Model::new(
                    ModelId::from_index(i),
                    Vec2::new(col as f64 * pitch, row as f64 * pitch),
                )
            })
            .collect();

        let id = GroupId::new();
        let group = SpawnedGroup {
            id: id.clone(),
            name: request.name,
            parent_unit: request.parent_unit,
            base: request.base,
            models,
            origin: request
                .origin
                .unwrap_or(Vec2::new(SPAWN_ORIGIN_MM, SPAWN_ORIGIN_MM)),
        };

        debug!(group = %id, unit = %group.name, models = count, "spawned group");
        self.insert(group);
        id
    }

    /// Remove a whole group from the board
    pub fn remove_group(&mut self, id: &GroupId) -> Option<SpawnedGroup> {
        let removed = self.groups.remove(id);
        if removed.is_some() {
            self.order.retain(|g| g != id);
            debug!(group = %id, "removed group");
        }
        removed
    }

    /// Move a group's origin (whole-group drag)
    pub fn translate_group(&mut self, id: &GroupId, origin: Vec2) -> Result<()> {
        if !origin.is_finite() {
            warn!(group = %id, "ignoring non-finite group origin");
            return Ok(());
        }
        let group = self
            .groups
            .get_mut(id)
            .ok_or_else(|| PlannerError::GroupNotFound(id.clone()))?;
        group.origin = origin;
        Ok(())
    }

    /// Move one model within its group (single-model drag)
    pub fn move_model(&mut self, group_id: &GroupId, model_id: &ModelId, position: Vec2) -> Result<()> {
        if !position.is_finite() {
            warn!(group = %group_id, model = %model_id, "ignoring non-finite model position");
            return Ok(());
        }
        let group = self
            .groups
            .get_mut(group_id)
            .ok_or_else(|| PlannerError::GroupNotFound(group_id.clone()))?;
        let model = group.model_mut(model_id).ok_or_else(|| PlannerError::ModelNotFound {
            group: group_id.clone(),
            model: model_id.clone(),
        })?;
        model.position = position;
        Ok(())
    }

    /// Shift every selected model by the same delta (multi-model drag)
    pub fn translate_selected(&mut self, selection: &Selection, delta: Vec2) {
        if !delta.is_finite() {
            warn!("ignoring non-finite drag delta");
            return;
        }
        for item in selection.iter() {
            if let Some(group) = self.groups.get_mut(&item.group_id) {
                if let Some(model) = group.model_mut(&item.model_id) {
                    model.position = model.position + delta;
                }
            }
        }
    }

    /// Set a model's facing, normalized to [0, 360)
    pub fn rotate_model(&mut self, group_id: &GroupId, model_id: &ModelId, degrees: f64) -> Result<()> {
        let group = self
            .groups
            .get_mut(group_id)
            .ok_or_else(|| PlannerError::GroupNotFound(group_id.clone()))?;
        let model = group.model_mut(model_id).ok_or_else(|| PlannerError::ModelNotFound {
            group: group_id.clone(),
            model: model_id.clone(),
        })?;
        model.set_rotation(degrees);
        Ok(())
    }

    /// Arrange each group's selected models into a single row, anchored at
    /// the leftmost selected model and spaced like the spawn grid
    pub fn line_up_selected(&mut self, selection: &Selection) {
        let mut by_group: AHashMap<GroupId, Vec<ModelId>> = AHashMap::new();
        for item in selection.iter() {
            by_group
                .entry(item.group_id.clone())
                .or_default()
                .push(item.model_id.clone());
        }

        for (group_id, model_ids) in by_group {
            let Some(group) = self.groups.get_mut(&group_id) else {
                continue;
            };
            let pitch = group.base.effective_diameter() + SPAWN_SPACING_MM;

            let mut picked: Vec<(ModelId, Vec2)> = group
                .models
                .iter()
                .filter(|m| model_ids.contains(&m.id))
                .map(|m| (m.id.clone(), m.position))
                .collect();
            if picked.len() < 2 {
                continue;
            }
            picked.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));
            let anchor = picked[0].1;

            for (i, (model_id, _)) in picked.iter().enumerate() {
                if let Some(model) = group.model_mut(model_id) {
                    model.position = Vec2::new(anchor.x + i as f64 * pitch, anchor.y);
                }
            }
        }
    }

    /// Delete every selected model, pruning groups that end up empty.
    /// Returns the ids of pruned groups so the caller can clean its selection.
    pub fn delete_selected(&mut self, selection: &Selection) -> Vec<GroupId> {
        for item in selection.iter() {
            if let Some(group) = self.groups.get_mut(&item.group_id) {
                group.models.retain(|m| m.id != item.model_id);
            }
        }

        let emptied: Vec<GroupId> = self
            .order
            .iter()
            .filter(|id| self.groups.get(*id).map_or(false, |g| g.models.is_empty()))
            .cloned()
            .collect();
        for id in &emptied {
            self.groups.remove(id);
            debug!(group = %id, "pruned emptied group");
        }
        self.order.retain(|id| !emptied.contains(id));

        emptied
    }

    /// Parent-unit key to member groups, built on demand. Groups without a
    /// parent link are absent.
    pub fn parent_units(&self) -> AHashMap<&str, Vec<&SpawnedGroup>> {
        let mut map: AHashMap<&str, Vec<&SpawnedGroup>> = AHashMap::new();
        for group in self.iter() {
            if let Some(parent) = &group.parent_unit {
                map.entry(parent.id.as_str()).or_default().push(group);
            }
        }
        map
    }

    /// All groups forming the logical unit that contains `id`: the group's
    /// parent-unit siblings (itself included), or just the group itself
    pub fn unit_groups(&self, id: &GroupId) -> Vec<&SpawnedGroup> {
        let Some(group) = self.group(id) else {
            return Vec::new();
        };
        match &group.parent_unit {
            Some(parent) => self
                .iter()
                .filter(|g| {
                    g.parent_unit
                        .as_ref()
                        .map_or(false, |p| p.id == parent.id)
                })
                .collect(),
            None => vec![group],
        }
    }

    /// Coherency for the logical unit containing this group: the single-group
    /// rule, or the parent-unit rule across all sibling groups
    pub fn unit_coherency(&self, id: &GroupId) -> Option<CoherencyResult> {
        let group = self.group(id)?;
        if group.parent_unit.is_some() {
            Some(check_parent_unit_coherency(&self.unit_groups(id)))
        } else {
            Some(check_coherency(group))
        }
    }

    /// Coherency for every logical unit on the board, parent units evaluated
    /// once under their parent name
    pub fn all_unit_coherency(&self) -> Vec<(String, CoherencyResult)> {
        let mut results = Vec::new();
        let mut seen_parents: HashSet<&str> = HashSet::new();

        for group in self.iter() {
            match &group.parent_unit {
                Some(parent) => {
                    if seen_parents.insert(parent.id.as_str()) {
                        let members = self.unit_groups(&group.id);
                        results.push((parent.name.clone(), check_parent_unit_coherency(&members)));
                    }
                }
                None => {
                    results.push((group.name.clone(), check_coherency(group)));
                }
            }
        }
        results
    }

    /// Nearest unit-mates of one model, searching across its parent unit
    /// when it has one
    pub fn nearest_to(&self, group_id: &GroupId, model_id: &ModelId) -> Option<Vec<NearestModel<'_>>> {
        let group = self.group(group_id)?;
        let model = group.model(model_id)?;
        let scope = self.unit_groups(group_id);
        Some(find_nearest_models(model, group, &scope))
    }

    /// Composite ids of models whose bases overlap, across all groups
    pub fn overlapping_models(&self) -> HashSet<String> {
        find_overlapping_models(&self.group_refs())
    }

    /// Deep-strike exclusion zones for every model on the board
    pub fn deep_strike_zones(&self) -> Vec<ExclusionZone> {
        self.iter()
            .flat_map(|g| g.models.iter().map(|m| deep_strike_zone(m, g)))
            .collect()
    }

    /// Aura zones for every model whose unit has an aura in the catalog
    pub fn aura_zones(&self, catalog: &AuraCatalog) -> Vec<ExclusionZone> {
        self.iter()
            .flat_map(|g| g.models.iter().filter_map(|m| aura_zone(m, g, catalog)))
            .collect()
    }
}
