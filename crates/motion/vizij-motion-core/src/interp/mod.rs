//! Easing and interpolation helpers.
//!
//! Fade ramps use a sine ease; curve sampling uses linear blends.

pub mod functions;

pub use functions::{ease_sine, lerp_f32};
