//! Saved-plan persistence
//!
//! Tournaments run five rounds on five different layouts, so a saved plan is
//! a map from round id to that round's deployed groups. The snapshot is plain
//! JSON so players can pass plans around.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::group::SpawnedGroup;
use crate::core::error::Result;

/// One saved plan: deployed groups per tournament round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    pub rounds: BTreeMap<String, Vec<SpawnedGroup>>,
}

impl PlannerSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_round(&mut self, round: impl Into<String>, groups: Vec<SpawnedGroup>) {
        self.rounds.insert(round.into(), groups);
    }

    pub fn round(&self, round: &str) -> Option<&[SpawnedGroup]> {
        self.rounds.get(round).map(|g| g.as_slice())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), rounds = self.rounds.len(), "saved snapshot");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        debug!(path = %path.display(), rounds = snapshot.rounds.len(), "loaded snapshot");
        Ok(snapshot)
    }
}
