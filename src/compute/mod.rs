//! Compute module - Random generation, rendering, scoring and search.

pub mod evolution;

mod image;
mod render;
mod rng;
mod score;

pub use image::*;
pub use render::*;
pub use rng::*;
pub use score::*;
