//! Motion base: shared state, fade blending and the per-entry lifecycle.
//!
//! A concrete motion owns a `MotionCore` and implements `apply_parameters`.
//! Everything else (entry setup, fade weight, auto-finish) is provided by the
//! `Motion` trait and may be overridden.
//!
//! Lifecycle per `PlaybackEntry`:
//! - Unstarted -> Started on the first `update_parameters` while available
//! - Started -> Finished when the end time has passed (or set externally)
//! - an unavailable entry is frozen: nothing is processed

use std::fmt;

use log::{debug, error, warn};

use crate::config::MotionConfig;
use crate::entry::PlaybackEntry;
use crate::error::{MotionError, Result};
use crate::interp::ease_sine;
use crate::model::ParameterModel;
use crate::timing::{LoopDuration, MotionDuration};

/// Single-slot lifecycle callback. Receives the motion's shared state.
pub type MotionHandler = Box<dyn Fn(&MotionCore)>;

/// State every motion carries regardless of how it drives parameters.
pub struct MotionCore {
    name: String,
    /// `None` falls back to `default_fade_in_seconds`.
    fade_in_seconds: Option<f32>,
    fade_out_seconds: Option<f32>,
    weight: f32,
    offset_seconds: f32,
    fired_events: Vec<String>,
    on_began: Option<MotionHandler>,
    on_finished: Option<MotionHandler>,

    default_fade_in_seconds: f32,
    default_fade_out_seconds: f32,
    strict_contracts: bool,
}

impl fmt::Debug for MotionCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionCore")
            .field("name", &self.name)
            .field("fade_in_seconds", &self.fade_in_seconds)
            .field("fade_out_seconds", &self.fade_out_seconds)
            .field("weight", &self.weight)
            .field("offset_seconds", &self.offset_seconds)
            .field("fired_events", &self.fired_events)
            .field("on_began", &self.on_began.is_some())
            .field("on_finished", &self.on_finished.is_some())
            .finish()
    }
}

impl Default for MotionCore {
    fn default() -> Self {
        Self::with_config("", &MotionConfig::default())
    }
}

impl MotionCore {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, &MotionConfig::default())
    }

    pub fn with_config(name: impl Into<String>, cfg: &MotionConfig) -> Self {
        Self {
            name: name.into(),
            fade_in_seconds: None,
            fade_out_seconds: None,
            weight: 1.0,
            offset_seconds: 0.0,
            fired_events: Vec::new(),
            on_began: None,
            on_finished: None,
            default_fade_in_seconds: cfg.default_fade_in_seconds,
            default_fade_out_seconds: cfg.default_fade_out_seconds,
            strict_contracts: cfg.strict_contracts,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the fade-in length. A negative value clears it back to the default.
    pub fn set_fade_in_time(&mut self, seconds: f32) {
        self.fade_in_seconds = (seconds >= 0.0).then_some(seconds);
    }

    /// Explicitly set fade-in length, if any.
    #[inline]
    pub fn fade_in_time(&self) -> Option<f32> {
        self.fade_in_seconds
    }

    /// Set the fade-out length. A negative value clears it back to the default.
    pub fn set_fade_out_time(&mut self, seconds: f32) {
        self.fade_out_seconds = (seconds >= 0.0).then_some(seconds);
    }

    #[inline]
    pub fn fade_out_time(&self) -> Option<f32> {
        self.fade_out_seconds
    }

    /// Fade-in length actually used for blending.
    pub fn effective_fade_in_seconds(&self) -> f32 {
        self.fade_in_seconds
            .unwrap_or(self.default_fade_in_seconds)
            .max(0.0)
    }

    /// Fade-out length actually used for blending.
    pub fn effective_fade_out_seconds(&self) -> f32 {
        self.fade_out_seconds
            .unwrap_or(self.default_fade_out_seconds)
            .max(0.0)
    }

    /// Not clamped; callers keep it within [0, 1].
    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn set_offset_time(&mut self, seconds: f32) {
        self.offset_seconds = seconds;
    }

    #[inline]
    pub fn offset_time(&self) -> f32 {
        self.offset_seconds
    }

    pub fn set_strict_contracts(&mut self, strict: bool) {
        self.strict_contracts = strict;
    }

    #[inline]
    pub fn fired_events(&self) -> &[String] {
        &self.fired_events
    }

    pub fn push_fired_event(&mut self, value: impl Into<String>) {
        self.fired_events.push(value.into());
    }

    pub fn clear_fired_events(&mut self) {
        self.fired_events.clear();
    }

    /// Drain the event buffer, leaving it empty.
    pub fn take_fired_events(&mut self) -> Vec<String> {
        std::mem::take(&mut self.fired_events)
    }

    pub fn set_began_handler(&mut self, handler: impl Fn(&MotionCore) + 'static) {
        self.on_began = Some(Box::new(handler));
    }

    pub fn began_handler(&self) -> Option<&dyn Fn(&MotionCore)> {
        self.on_began.as_deref()
    }

    pub fn clear_began_handler(&mut self) {
        self.on_began = None;
    }

    pub fn set_finished_handler(&mut self, handler: impl Fn(&MotionCore) + 'static) {
        self.on_finished = Some(Box::new(handler));
    }

    pub fn finished_handler(&self) -> Option<&dyn Fn(&MotionCore)> {
        self.on_finished.as_deref()
    }

    pub fn clear_finished_handler(&mut self) {
        self.on_finished = None;
    }

    /// Invoke the began handler, if one is registered.
    pub fn notify_began(&self) {
        if let Some(handler) = &self.on_began {
            handler(self);
        }
    }

    /// Invoke the finished handler, if one is registered.
    pub fn notify_finished(&self) {
        if let Some(handler) = &self.on_finished {
            handler(self);
        }
    }

    /// Drop the motion's influence; used when a host retires a motion.
    pub fn release(&mut self) {
        self.weight = 0.0;
    }

    /// Enforce the [0, 1] fade weight contract.
    fn checked_fade_weight(&self, fade_weight: f32) -> Result<f32> {
        if (0.0..=1.0).contains(&fade_weight) {
            return Ok(fade_weight);
        }
        if self.strict_contracts {
            error!(
                "motion '{}': fade weight {} outside [0, 1]",
                self.name, fade_weight
            );
            return Err(MotionError::ContractViolation {
                what: "fade_weight".to_string(),
                value: fade_weight,
            });
        }
        warn!(
            "motion '{}': clamping fade weight {} into [0, 1]",
            self.name, fade_weight
        );
        if fade_weight.is_nan() {
            Ok(0.0)
        } else {
            Ok(fade_weight.clamp(0.0, 1.0))
        }
    }
}

/// A timed routine that writes weighted parameter values into a model.
pub trait Motion {
    fn core(&self) -> &MotionCore;
    fn core_mut(&mut self) -> &mut MotionCore;

    /// Write this motion's parameters into `model` at `time`, scaled by
    /// `fade_weight`. Returns true if any parameter was written.
    fn apply_parameters(
        &mut self,
        model: &mut dyn ParameterModel,
        time: f32,
        fade_weight: f32,
        entry: &PlaybackEntry,
    ) -> bool;

    fn duration(&self) -> MotionDuration {
        MotionDuration::Infinite
    }

    fn loop_duration(&self) -> LoopDuration {
        LoopDuration::Undefined
    }

    /// Events fired in the motion-local window `(since, now]`.
    /// The base implementation hands back the whole buffer.
    fn fired_events(&mut self, _since: f32, _now: f32) -> &[String] {
        self.core().fired_events()
    }

    fn has_opacity_curve(&self) -> bool {
        false
    }

    fn opacity_curve_index(&self) -> Option<usize> {
        None
    }

    fn opacity_id(&self, _index: usize) -> Option<&str> {
        None
    }

    /// Opacity at the last update; 1.0 is fully opaque.
    fn opacity_value(&self) -> f32 {
        1.0
    }

    /// Drive one tick: setup, fade, apply, then auto-finish.
    /// Returns whether the model was changed.
    fn update_parameters(
        &mut self,
        model: &mut dyn ParameterModel,
        entry: &mut PlaybackEntry,
        time: f32,
    ) -> Result<bool> {
        if !entry.is_available() || entry.is_finished() {
            return Ok(false);
        }

        self.setup_entry(entry, time);

        let fade_weight = self.compute_fade_weight(entry, time)?;

        let changed = self.apply_parameters(model, time, fade_weight, entry);

        // Unbounded entries never finish on their own.
        if let Some(end) = entry.end_time() {
            if end > 0.0 && end < time {
                entry.set_finished(true);
                debug!(
                    "motion '{}' entry {:?} finished at {}",
                    self.core().name(),
                    entry.id(),
                    time
                );
            }
        }

        Ok(changed)
    }

    /// Initialize a fresh entry. No-op once started or while unavailable.
    fn setup_entry(&mut self, entry: &mut PlaybackEntry, time: f32) {
        if entry.is_started() || !entry.is_available() {
            return;
        }

        entry.set_started(true);
        entry.set_start_time(time - self.core().offset_time());
        entry.set_fade_in_start_time(time);

        // An end may already be set if a fade-out was requested before start.
        // A computed end below zero is stored as unbounded.
        if entry.end_time().is_none() {
            let end = self
                .duration()
                .seconds()
                .map(|d| entry.start_time() + d)
                .filter(|end| *end >= 0.0);
            entry.set_end_time(end);
        }

        debug!(
            "motion '{}' entry {:?} started at {} (end {:?})",
            self.core().name(),
            entry.id(),
            time,
            entry.end_time()
        );

        self.core().notify_began();
    }

    /// Blend weight for `time`: weight * fade-in * fade-out.
    /// Records `(time, weight)` into the entry's state.
    fn compute_fade_weight(&self, entry: &mut PlaybackEntry, time: f32) -> Result<f32> {
        if !time.is_finite() {
            return Err(MotionError::invalid_argument(format!(
                "fade time must be finite, got {time}"
            )));
        }

        let core = self.core();

        let fade_in_seconds = core.effective_fade_in_seconds();
        let fade_in = if fade_in_seconds == 0.0 {
            1.0
        } else {
            ease_sine((time - entry.fade_in_start_time()) / fade_in_seconds)
        };

        let fade_out_seconds = core.effective_fade_out_seconds();
        // Negative ends written by a host are unbounded too.
        let fade_out = match entry.end_time() {
            Some(end) if end >= 0.0 && fade_out_seconds != 0.0 => {
                ease_sine((end - time) / fade_out_seconds)
            }
            _ => 1.0,
        };

        let fade_weight = core.checked_fade_weight(core.weight() * fade_in * fade_out)?;
        entry.set_state(time, fade_weight);
        Ok(fade_weight)
    }
}
