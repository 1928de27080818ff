//! Heredity math utilities.

pub mod math;

pub use math::normalize::*;
pub use math::powerset::*;
pub use math::transmission::*;
