//! Core math modules.

pub mod normalize;
pub mod powerset;
pub mod transmission;
