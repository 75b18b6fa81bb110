#![allow(dead_code)]
use std::cell::Cell;
use std::rc::Rc;

use vizij_motion_core::{
    EntryId, Motion, MotionConfig, MotionCore, MotionDuration, ParameterModel, PlaybackEntry,
};

/// Minimal motion that records how often it was applied.
pub struct Recorder {
    pub core: MotionCore,
    pub duration: MotionDuration,
    pub applied: u32,
    pub last_fade_weight: f32,
}

impl Recorder {
    pub fn new(fade_in: f32, fade_out: f32) -> Self {
        Self::with_config(fade_in, fade_out, &MotionConfig::default())
    }

    pub fn with_config(fade_in: f32, fade_out: f32, cfg: &MotionConfig) -> Self {
        let mut core = MotionCore::with_config("recorder", cfg);
        core.set_fade_in_time(fade_in);
        core.set_fade_out_time(fade_out);
        Self {
            core,
            duration: MotionDuration::Infinite,
            applied: 0,
            last_fade_weight: -1.0,
        }
    }

    pub fn with_duration(mut self, duration: MotionDuration) -> Self {
        self.duration = duration;
        self
    }
}

impl Motion for Recorder {
    fn core(&self) -> &MotionCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MotionCore {
        &mut self.core
    }

    fn apply_parameters(
        &mut self,
        _model: &mut dyn ParameterModel,
        _time: f32,
        fade_weight: f32,
        _entry: &PlaybackEntry,
    ) -> bool {
        self.applied += 1;
        self.last_fade_weight = fade_weight;
        true
    }

    fn duration(&self) -> MotionDuration {
        self.duration
    }
}

/// Entry already marked started, with the given fade-in start and end.
pub fn started_entry(fade_in_start: f32, end: Option<f32>) -> PlaybackEntry {
    let mut e = PlaybackEntry::new(EntryId(0));
    e.set_started(true);
    e.set_fade_in_start_time(fade_in_start);
    e.set_end_time(end);
    e
}

/// Shared counter plus a handler that bumps it.
pub fn counter() -> (Rc<Cell<u32>>, impl Fn(&MotionCore) + 'static) {
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    (count, move |_: &MotionCore| c.set(c.get() + 1))
}
