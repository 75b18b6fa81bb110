//! Motion queue: owns playing motions and their entries, drives them per tick.
//!
//! Methods:
//! - new, start_motion, update (setup -> fade -> apply -> events -> prune)
//! - entry/entry_mut for host control of availability and finish
//! - drain_events for the tick's QueueEvents

use log::{debug, warn};

use crate::config::MotionConfig;
use crate::entry::PlaybackEntry;
use crate::error::{MotionError, Result};
use crate::ids::{EntryId, IdAllocator};
use crate::model::ParameterModel;
use crate::motion::Motion;
use crate::outputs::{Outputs, QueueEvent};

/// One playing motion and its episode record.
struct QueueSlot {
    motion: Box<dyn Motion>,
    entry: PlaybackEntry,
}

/// Sequentially updated set of concurrently playing motions.
pub struct MotionQueue {
    cfg: MotionConfig,
    ids: IdAllocator,
    slots: Vec<QueueSlot>,

    // Per-tick outputs
    outputs: Outputs,
}

impl Default for MotionQueue {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl MotionQueue {
    pub fn new(cfg: MotionConfig) -> Self {
        Self {
            outputs: Outputs::with_capacity(cfg.max_events_per_tick),
            cfg,
            ids: IdAllocator::new(),
            slots: Vec::new(),
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.cfg
    }

    /// Queue a motion. Motions already playing begin their fade-out at `now`.
    pub fn start_motion(&mut self, motion: Box<dyn Motion>, now: f32) -> EntryId {
        for slot in &mut self.slots {
            if slot.entry.is_finished() {
                continue;
            }
            let fade_out = slot.motion.core().effective_fade_out_seconds();
            slot.entry.start_fade_out(fade_out, now);
        }

        let id = self.ids.alloc_entry();
        debug!(
            "queue: start motion '{}' as entry {:?} at {}",
            motion.core().name(),
            id,
            now
        );
        self.slots.push(QueueSlot {
            motion,
            entry: PlaybackEntry::new(id),
        });
        id
    }

    /// Update every available entry at `now`, then drop finished ones.
    /// Returns true if any motion wrote to the model, or the first error a
    /// motion reported once every other entry has been updated.
    pub fn update(&mut self, model: &mut dyn ParameterModel, now: f32) -> Result<bool> {
        if !now.is_finite() {
            return Err(MotionError::invalid_argument(format!(
                "queue time must be finite, got {now}"
            )));
        }

        let mut updated = false;
        let mut first_err = None;
        for slot in &mut self.slots {
            let entry = &mut slot.entry;
            if !entry.is_available() || entry.is_finished() {
                continue;
            }

            let was_started = entry.is_started();
            let result = slot.motion.update_parameters(model, entry, now);

            let name = slot.motion.core().name().to_string();
            if !was_started && entry.is_started() {
                self.outputs.push(QueueEvent::MotionStarted {
                    entry: entry.id(),
                    motion: name.clone(),
                    time: now,
                });
            }

            // A failing motion only loses its own tick.
            match result {
                Ok(changed) => updated |= changed,
                Err(err) => {
                    warn!("queue: entry {:?} ('{}') failed: {}", entry.id(), name, err);
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                    continue;
                }
            }

            // First check of an episode covers everything up to now.
            let start = entry.start_time();
            let since = entry
                .last_event_check_time()
                .map_or(f32::NEG_INFINITY, |t| t - start);
            for value in slot.motion.fired_events(since, now - start) {
                self.outputs.push(QueueEvent::EventFired {
                    entry: entry.id(),
                    motion: name.clone(),
                    value: value.clone(),
                });
            }
            entry.set_last_event_check_time(now);
        }

        let outputs = &mut self.outputs;
        self.slots.retain(|slot| {
            if !slot.entry.is_finished() {
                return true;
            }
            let core = slot.motion.core();
            core.notify_finished();
            debug!(
                "queue: entry {:?} ('{}') finished",
                slot.entry.id(),
                core.name()
            );
            outputs.push(QueueEvent::MotionFinished {
                entry: slot.entry.id(),
                motion: core.name().to_string(),
                time: now,
            });
            false
        });

        match first_err {
            Some(err) => Err(err),
            None => Ok(updated),
        }
    }

    /// True when nothing is left that could still play.
    /// Unavailable entries count as finished here.
    pub fn is_finished(&self) -> bool {
        self.slots
            .iter()
            .all(|s| s.entry.is_finished() || !s.entry.is_available())
    }

    pub fn is_entry_finished(&self, id: EntryId) -> bool {
        self.entry(id).map_or(true, |e| e.is_finished())
    }

    pub fn entry(&self, id: EntryId) -> Option<&PlaybackEntry> {
        self.slots
            .iter()
            .find(|s| s.entry.id() == id)
            .map(|s| &s.entry)
    }

    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut PlaybackEntry> {
        self.slots
            .iter_mut()
            .find(|s| s.entry.id() == id)
            .map(|s| &mut s.entry)
    }

    pub fn motion(&self, id: EntryId) -> Option<&dyn Motion> {
        self.slots
            .iter()
            .find(|s| s.entry.id() == id)
            .map(|s| s.motion.as_ref())
    }

    pub fn motion_mut(&mut self, id: EntryId) -> Option<&mut (dyn Motion + 'static)> {
        self.slots
            .iter_mut()
            .find(|s| s.entry.id() == id)
            .map(|s| s.motion.as_mut())
    }

    /// Drop every entry without firing finished handlers.
    pub fn stop_all(&mut self) {
        debug!("queue: stopping {} entries", self.slots.len());
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Take the events collected since the last drain.
    pub fn drain_events(&mut self) -> Vec<QueueEvent> {
        self.outputs.drain()
    }

    /// Events dropped because the per-tick cap was reached.
    pub fn dropped_events(&self) -> usize {
        self.outputs.dropped
    }
}
