pub mod distance;
pub mod overlap;
pub mod zones;
