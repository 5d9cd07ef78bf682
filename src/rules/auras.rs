//! Aura range catalog
//!
//! Aura radii vary per unit (chaplain litanies, captain rerolls, etc.), so
//! unlike the fixed deep-strike buffer they are loaded from a TOML file.

use ahash::AHashMap;
use serde::Deserialize;

use crate::core::error::{PlannerError, Result};
use crate::rules::constants::MM_PER_INCH;

/// Per-unit-name aura ranges, keyed by unit display name
#[derive(Debug, Clone, Default)]
pub struct AuraCatalog {
    ranges_mm: AHashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct TomlAuras {
    #[serde(default)]
    aura: Vec<TomlAura>,
}

#[derive(Debug, Deserialize)]
struct TomlAura {
    unit: String,
    range_inches: f64,
}

impl AuraCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an aura range directly (in inches, as printed on the datasheet)
    pub fn add(&mut self, unit_name: impl Into<String>, range_inches: f64) {
        self.ranges_mm.insert(unit_name.into(), range_inches * MM_PER_INCH);
    }

    /// Aura range in mm for a unit, if it has one
    pub fn range_mm(&self, unit_name: &str) -> Option<f64> {
        self.ranges_mm.get(unit_name).copied()
    }

    pub fn len(&self) -> usize {
        self.ranges_mm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges_mm.is_empty()
    }

    /// Load an aura catalog from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(PlannerError::IoError)?;
        Self::parse_toml(&content)
    }

    /// Parse an aura catalog from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let data: TomlAuras = toml::from_str(content)?;

        let mut catalog = Self::new();
        for entry in data.aura {
            catalog.add(entry.unit, entry.range_inches);
        }
        Ok(catalog)
    }
}
