//! Posterior report rendering.
//!
//! Each renderer is a pure function over an [`InferenceOutcome`]; the
//! binary decides where the text goes.

pub mod render;

pub use render::{render, render_json, render_text, JsonReport};
