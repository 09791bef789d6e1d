//! Core utilities shared by the lane passes

#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;
pub mod random;
