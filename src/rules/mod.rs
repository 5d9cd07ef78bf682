pub mod auras;
pub mod constants;
