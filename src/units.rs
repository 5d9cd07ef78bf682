//! Unit conversion boundary
//!
//! The whole core computes in millimeters. Inches exist only where a
//! human-readable distance leaves the engine, and pixels only where the
//! rendering layer asks for them; both conversions live here and nowhere
//! else.

use crate::core::types::Vec2;
use crate::rules::constants::{BOARD_HEIGHT_MM, BOARD_WIDTH_MM, MM_PER_INCH};

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Inches for display, rounded UP to 2 decimals. Tape-measure convention:
/// a measured gap is never reported shorter than it is.
pub fn display_inches(mm: f64) -> f64 {
    (mm / MM_PER_INCH * 100.0).ceil() / 100.0
}

/// Pixel scale factor between board millimeters and screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    pub px_per_mm: f64,
}

impl PixelScale {
    pub fn new(px_per_mm: f64) -> Self {
        Self { px_per_mm }
    }

    /// Largest scale at which the full 60" x 44" board fits the container,
    /// letterboxing on whichever axis is not limiting
    pub fn fit(container_width_px: f64, container_height_px: f64) -> Self {
        let container_aspect = container_width_px / container_height_px;
        let board_aspect = BOARD_WIDTH_MM / BOARD_HEIGHT_MM;

        let px_per_mm = if container_aspect > board_aspect {
            // Height is the limiting dimension
            container_height_px / BOARD_HEIGHT_MM
        } else {
            container_width_px / BOARD_WIDTH_MM
        };

        Self { px_per_mm }
    }

    pub fn mm_to_px(&self, mm: f64) -> f64 {
        mm * self.px_per_mm
    }

    pub fn px_to_mm(&self, px: f64) -> f64 {
        px / self.px_per_mm
    }

    pub fn point_to_px(&self, point: Vec2) -> Vec2 {
        point * self.px_per_mm
    }

    pub fn point_to_mm(&self, point: Vec2) -> Vec2 {
        point * (1.0 / self.px_per_mm)
    }
}
