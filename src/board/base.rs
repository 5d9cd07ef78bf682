//! Base footprints for miniatures
//!
//! A base is either circular (the common case) or rectangular (cavalry,
//! chariots, some characters). Distance rules approximate a rectangular base
//! by its circumscribing circle, diameter = max(width, length). That matches
//! how the planner has always measured and is kept for behavioral parity even
//! though it is loose for very elongated bases.

use serde::{Deserialize, Serialize};

use crate::rules::constants::DEFAULT_BASE_DIAMETER_MM;

/// Physical footprint of a model's base, dimensions in mm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BaseShape {
    Circular { diameter: f64 },
    Rectangular { width: f64, length: f64 },
}

impl BaseShape {
    /// Circular base from an optional imported size, falling back to the
    /// 25 mm infantry base when the army list carries none
    pub fn circular_or_default(diameter: Option<f64>) -> Self {
        Self::Circular {
            diameter: diameter.unwrap_or(DEFAULT_BASE_DIAMETER_MM),
        }
    }

    /// Rectangular base from optional imported dimensions, falling back to
    /// the default diameter on each missing axis
    pub fn rectangular_or_default(width: Option<f64>, length: Option<f64>) -> Self {
        Self::Rectangular {
            width: width.unwrap_or(DEFAULT_BASE_DIAMETER_MM),
            length: length.unwrap_or(DEFAULT_BASE_DIAMETER_MM),
        }
    }

    pub fn is_rectangular(&self) -> bool {
        matches!(self, Self::Rectangular { .. })
    }

    /// Diameter of the circle used for distance measurement:
    /// the base diameter, or the larger rectangle dimension
    pub fn effective_diameter(&self) -> f64 {
        match *self {
            Self::Circular { diameter } => diameter,
            Self::Rectangular { width, length } => width.max(length),
        }
    }

    pub fn effective_radius(&self) -> f64 {
        self.effective_diameter() / 2.0
    }

    /// Axis-aligned footprint (width, height) for layout and box selection
    pub fn footprint(&self) -> (f64, f64) {
        match *self {
            Self::Circular { diameter } => (diameter, diameter),
            Self::Rectangular { width, length } => (width, length),
        }
    }
}

impl Default for BaseShape {
    fn default() -> Self {
        Self::Circular {
            diameter: DEFAULT_BASE_DIAMETER_MM,
        }
    }
}
