//! Vizij Motion Core (engine-agnostic)
//!
//! Fade-weighted motion playback for rig parameter models. A `Motion` writes
//! parameter values into a host `ParameterModel` each tick; its blend weight
//! ramps in and out with a sine ease. `PlaybackEntry` tracks one playback
//! episode, and `MotionQueue` drives several motions sequentially.

pub mod config;
pub mod curve;
pub mod entry;
pub mod error;
pub mod ids;
pub mod interp;
pub mod model;
pub mod motion;
pub mod outputs;
pub mod queue;
pub mod timing;
pub mod wave;

// Re-exports for consumers (adapters)
pub use config::MotionConfig;
pub use curve::{
    sample_curve, CurveKey, CurveMotion, CurveMotionData, CurveTarget, MotionCurve, MotionEvent,
    Segment,
};
pub use entry::PlaybackEntry;
pub use error::{MotionError, Result};
pub use ids::EntryId;
pub use interp::ease_sine;
pub use model::{ParameterModel, ParameterStore};
pub use motion::{Motion, MotionCore, MotionHandler};
pub use outputs::QueueEvent;
pub use queue::MotionQueue;
pub use timing::{LoopDuration, MotionDuration};
pub use wave::{WaveMotion, WaveSettings};
