//! Per-episode playback record.
//!
//! The queue owner writes `available`/`finished`; a motion writes the
//! timing fields and the state record from inside `update_parameters`.

use serde::{Deserialize, Serialize};

use crate::ids::EntryId;

/// Mutable state for one playback episode of one motion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackEntry {
    id: EntryId,
    available: bool,
    started: bool,
    finished: bool,
    triggered_fade_out: bool,
    start_time: f32,
    fade_in_start_time: f32,
    /// `None` while unbounded.
    end_time: Option<f32>,
    state_time: f32,
    state_weight: f32,
    /// `None` until the first event check of the episode.
    last_event_check_time: Option<f32>,
}

impl PlaybackEntry {
    pub fn new(id: EntryId) -> Self {
        Self {
            id,
            available: true,
            started: false,
            finished: false,
            triggered_fade_out: false,
            start_time: 0.0,
            fade_in_start_time: 0.0,
            end_time: None,
            state_time: 0.0,
            state_weight: 0.0,
            last_event_check_time: None,
        }
    }

    #[inline]
    pub fn id(&self) -> EntryId {
        self.id
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn set_started(&mut self, started: bool) {
        self.started = started;
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn set_finished(&mut self, finished: bool) {
        self.finished = finished;
    }

    #[inline]
    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    pub fn set_start_time(&mut self, seconds: f32) {
        self.start_time = seconds;
    }

    #[inline]
    pub fn fade_in_start_time(&self) -> f32 {
        self.fade_in_start_time
    }

    pub fn set_fade_in_start_time(&mut self, seconds: f32) {
        self.fade_in_start_time = seconds;
    }

    #[inline]
    pub fn end_time(&self) -> Option<f32> {
        self.end_time
    }

    pub fn set_end_time(&mut self, seconds: Option<f32>) {
        self.end_time = seconds;
    }

    /// Record the time and fade weight of the latest update.
    pub fn set_state(&mut self, time: f32, weight: f32) {
        self.state_time = time;
        self.state_weight = weight;
    }

    #[inline]
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    #[inline]
    pub fn state_weight(&self) -> f32 {
        self.state_weight
    }

    #[inline]
    pub fn last_event_check_time(&self) -> Option<f32> {
        self.last_event_check_time
    }

    pub fn set_last_event_check_time(&mut self, seconds: f32) {
        self.last_event_check_time = Some(seconds);
    }

    #[inline]
    pub fn is_triggered_fade_out(&self) -> bool {
        self.triggered_fade_out
    }

    /// Begin fading out `fade_out_seconds` from `now`.
    ///
    /// The end time only ever moves earlier; an unbounded entry gains an end.
    pub fn start_fade_out(&mut self, fade_out_seconds: f32, now: f32) {
        let new_end = now + fade_out_seconds;
        self.triggered_fade_out = true;
        match self.end_time {
            Some(end) if end <= new_end => {}
            _ => self.end_time = Some(new_end),
        }
    }
}
