//! Duration types reported by motions.

use serde::{Deserialize, Serialize};

/// Total playback length of a motion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum MotionDuration {
    /// Ends after this many seconds. Non-positive lengths behave as `Infinite`.
    Finite(f32),
    /// Plays until stopped from outside (looping or procedural motions).
    #[default]
    Infinite,
}

impl MotionDuration {
    /// Positive finite length, if any.
    #[inline]
    pub fn seconds(self) -> Option<f32> {
        match self {
            Self::Finite(d) if d > 0.0 => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        self.seconds().is_none()
    }
}

/// Length of a single loop of a motion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum LoopDuration {
    Finite(f32),
    /// No single-loop length can be expressed (e.g. procedural motions).
    #[default]
    Undefined,
}

impl LoopDuration {
    #[inline]
    pub fn seconds(self) -> Option<f32> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Undefined => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_finite_is_infinite() {
        assert_eq!(MotionDuration::Finite(2.0).seconds(), Some(2.0));
        assert!(MotionDuration::Finite(0.0).is_infinite());
        assert!(MotionDuration::Finite(-1.0).is_infinite());
        assert!(MotionDuration::default().is_infinite());
    }

    #[test]
    fn loop_duration_default_is_undefined() {
        assert_eq!(LoopDuration::default().seconds(), None);
        assert_eq!(LoopDuration::Finite(0.5).seconds(), Some(0.5));
    }
}
