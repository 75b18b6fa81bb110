//! Output contracts from the motion queue.
//!
//! Parameter writes go straight into the host model; what is collected here
//! is the list of semantic events for the tick. The host drains it.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::ids::EntryId;

/// Discrete signals emitted while updating the queue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum QueueEvent {
    MotionStarted {
        entry: EntryId,
        motion: String,
        time: f32,
    },
    EventFired {
        entry: EntryId,
        motion: String,
        value: String,
    },
    MotionFinished {
        entry: EntryId,
        motion: String,
        time: f32,
    },
}

/// Bounded event list. Overflow beyond the cap is dropped and counted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    pub events: Vec<QueueEvent>,
    /// Events dropped since the last drain.
    pub dropped: usize,
    #[serde(skip)]
    cap: usize,
}

impl Outputs {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::new(),
            dropped: 0,
            cap,
        }
    }

    pub fn push(&mut self, event: QueueEvent) {
        if self.events.len() >= self.cap {
            if self.dropped == 0 {
                warn!("queue event cap {} reached; dropping events", self.cap);
            }
            self.dropped += 1;
            return;
        }
        self.events.push(event);
    }

    /// Take every buffered event, resetting the overflow counter.
    pub fn drain(&mut self) -> Vec<QueueEvent> {
        self.dropped = 0;
        std::mem::take(&mut self.events)
    }
}
