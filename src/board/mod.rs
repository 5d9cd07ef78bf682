pub mod base;
pub mod group;
pub mod selection;
pub mod store;
