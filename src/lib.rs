//! Battleline - Tabletop Tournament Deployment Planner Core

pub mod board;
pub mod coherency;
pub mod core;
pub mod geometry;
pub mod persist;
pub mod rules;
pub mod units;
