//! Procedural sine oscillation of a single parameter.
//!
//! Runs until stopped from outside, so it reports an infinite duration and
//! no single-loop length.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;
use crate::entry::PlaybackEntry;
use crate::model::ParameterModel;
use crate::motion::{Motion, MotionCore};

/// `center + amplitude * sin(TAU * (t / period) + phase)` on one parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveSettings {
    pub parameter_id: String,
    pub center: f32,
    pub amplitude: f32,
    /// Seconds per cycle; non-positive periods hold the center value.
    pub period: f32,
    #[serde(default)]
    pub phase: f32,
}

#[derive(Debug)]
pub struct WaveMotion {
    core: MotionCore,
    settings: WaveSettings,
}

impl WaveMotion {
    pub fn new(settings: WaveSettings, cfg: &MotionConfig) -> Self {
        let core = MotionCore::with_config(format!("wave:{}", settings.parameter_id), cfg);
        Self { core, settings }
    }

    pub fn settings(&self) -> &WaveSettings {
        &self.settings
    }

    /// Target value at `elapsed` seconds since start.
    pub fn value_at(&self, elapsed: f32) -> f32 {
        let s = &self.settings;
        if s.period <= 0.0 {
            return s.center;
        }
        s.center + s.amplitude * (TAU * (elapsed / s.period) + s.phase).sin()
    }
}

impl Motion for WaveMotion {
    fn core(&self) -> &MotionCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MotionCore {
        &mut self.core
    }

    fn apply_parameters(
        &mut self,
        model: &mut dyn ParameterModel,
        time: f32,
        fade_weight: f32,
        entry: &PlaybackEntry,
    ) -> bool {
        let Some(idx) = model.parameter_index(&self.settings.parameter_id) else {
            return false;
        };
        let value = self.value_at(time - entry.start_time());
        model.blend_parameter_value(idx, value, fade_weight);
        true
    }
}
