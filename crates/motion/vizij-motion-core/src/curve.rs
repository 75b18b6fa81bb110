//! Curve-driven motion.
//!
//! Model:
//! - Each curve has keys ordered by time (seconds from motion start).
//! - A key's `segment` decides how the value travels to the next key
//!   (linear blend or hold).
//! - Curves target either a model parameter or the model's overall opacity.
//! - Events are named markers fired when playback crosses their time.

use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;
use crate::entry::PlaybackEntry;
use crate::error::{MotionError, Result};
use crate::interp::lerp_f32;
use crate::model::ParameterModel;
use crate::motion::{Motion, MotionCore};
use crate::timing::{LoopDuration, MotionDuration};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveTarget {
    #[default]
    Parameter,
    Opacity,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    #[default]
    Linear,
    Stepped,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub segment: Segment,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionCurve {
    /// Parameter id, or a label for the opacity curve.
    pub id: String,
    #[serde(default)]
    pub target: CurveTarget,
    pub keys: Vec<CurveKey>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    pub time: f32,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveMotionData {
    #[serde(default)]
    pub name: String,
    /// Clip length in seconds.
    pub duration: f32,
    #[serde(default)]
    pub looping: bool,
    #[serde(default)]
    pub fade_in_seconds: Option<f32>,
    #[serde(default)]
    pub fade_out_seconds: Option<f32>,
    pub curves: Vec<MotionCurve>,
    #[serde(default)]
    pub events: Vec<MotionEvent>,
}

impl CurveMotionData {
    fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(MotionError::invalid_argument(format!(
                "motion '{}': duration must be finite and non-negative, got {}",
                self.name, self.duration
            )));
        }
        for curve in &self.curves {
            if curve.keys.is_empty() {
                return Err(MotionError::invalid_argument(format!(
                    "motion '{}': curve '{}' has no keys",
                    self.name, curve.id
                )));
            }
            let mut prev = f32::NEG_INFINITY;
            for key in &curve.keys {
                if !key.time.is_finite() || !key.value.is_finite() {
                    return Err(MotionError::invalid_argument(format!(
                        "motion '{}': curve '{}' has a non-finite key",
                        self.name, curve.id
                    )));
                }
                if key.time < prev || key.time < 0.0 || key.time > self.duration {
                    return Err(MotionError::invalid_argument(format!(
                        "motion '{}': curve '{}' key at {} is out of order or outside [0, {}]",
                        self.name, curve.id, key.time, self.duration
                    )));
                }
                prev = key.time;
            }
        }
        if let Some(ev) = self.events.iter().find(|e| !e.time.is_finite()) {
            return Err(MotionError::invalid_argument(format!(
                "motion '{}': event '{}' has a non-finite time",
                self.name, ev.value
            )));
        }
        Ok(())
    }
}

/// Find the key pair around `t` and the local blend factor between them.
/// Before the first key returns (0, 0, 0); after the last returns (last, last, 0).
fn find_segment(keys: &[CurveKey], t: f32) -> (usize, usize, f32) {
    let n = keys.len();
    if n <= 1 || t <= keys[0].time {
        return (0, 0, 0.0);
    }
    if t >= keys[n - 1].time {
        return (n - 1, n - 1, 0.0);
    }
    // Keys are sorted; the first key strictly after t closes the segment.
    let i1 = keys.partition_point(|k| k.time <= t);
    let i0 = i1 - 1;
    let denom = (keys[i1].time - keys[i0].time).max(f32::EPSILON);
    let lt = (t - keys[i0].time) / denom;
    (i0, i1, lt.clamp(0.0, 1.0))
}

/// Sample a curve at motion-local time `t` (seconds).
pub fn sample_curve(curve: &MotionCurve, t: f32) -> f32 {
    let keys = &curve.keys;
    if keys.is_empty() {
        return 0.0;
    }
    let (i0, i1, lt) = find_segment(keys, t);
    let left = &keys[i0];
    if i0 == i1 || left.segment == Segment::Stepped {
        return left.value;
    }
    lerp_f32(left.value, keys[i1].value, lt)
}

/// Keyframed motion over model parameters and opacity.
#[derive(Debug)]
pub struct CurveMotion {
    core: MotionCore,
    data: CurveMotionData,
    opacity_index: Option<usize>,
    opacity_value: f32,
}

impl CurveMotion {
    pub fn new(data: CurveMotionData, cfg: &MotionConfig) -> Result<Self> {
        data.validate()?;
        let mut core = MotionCore::with_config(data.name.clone(), cfg);
        if let Some(seconds) = data.fade_in_seconds {
            core.set_fade_in_time(seconds);
        }
        if let Some(seconds) = data.fade_out_seconds {
            core.set_fade_out_time(seconds);
        }
        let opacity_index = data
            .curves
            .iter()
            .position(|c| c.target == CurveTarget::Opacity);
        Ok(Self {
            core,
            data,
            opacity_index,
            opacity_value: 1.0,
        })
    }

    pub fn data(&self) -> &CurveMotionData {
        &self.data
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.data.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.data.looping = looping;
    }

    /// Motion-local time: clamped to the clip, or wrapped when looping.
    fn local_time(&self, time: f32, entry: &PlaybackEntry) -> f32 {
        let elapsed = (time - entry.start_time()).max(0.0);
        let duration = self.data.duration;
        if self.data.looping && duration > 0.0 {
            elapsed.rem_euclid(duration)
        } else {
            elapsed.min(duration)
        }
    }
}

impl Motion for CurveMotion {
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
        let t = self.local_time(time, entry);
        let mut changed = false;
        for curve in &self.data.curves {
            let value = sample_curve(curve, t);
            match curve.target {
                CurveTarget::Parameter => {
                    if let Some(idx) = model.parameter_index(&curve.id) {
                        model.blend_parameter_value(idx, value, fade_weight);
                        changed = true;
                    }
                }
                CurveTarget::Opacity => {
                    self.opacity_value = value;
                    model.set_opacity(value);
                    changed = true;
                }
            }
        }
        changed
    }

    fn duration(&self) -> MotionDuration {
        if self.data.looping {
            MotionDuration::Infinite
        } else {
            MotionDuration::Finite(self.data.duration)
        }
    }

    fn loop_duration(&self) -> LoopDuration {
        LoopDuration::Finite(self.data.duration)
    }

    /// Refills the buffer with events in `(since, now]`, wrapping when looping.
    /// A looping window spanning a whole loop or more reports each event once.
    fn fired_events(&mut self, since: f32, now: f32) -> &[String] {
        self.core.clear_fired_events();
        let duration = self.data.duration;
        if now > since {
            if self.data.looping && duration > 0.0 {
                // A window opening before the clip also covers its first instant.
                let from_start = since < 0.0;
                let since = since.max(0.0);
                let full_loop = now - since >= duration;
                let s = since.rem_euclid(duration);
                let n = now.rem_euclid(duration);
                let wrapped = n < s;
                for ev in &self.data.events {
                    let hit = full_loop
                        || if wrapped {
                            ev.time > s || ev.time <= n
                        } else {
                            (from_start || ev.time > s) && ev.time <= n
                        };
                    if hit {
                        self.core.push_fired_event(ev.value.clone());
                    }
                }
            } else {
                for ev in &self.data.events {
                    if ev.time > since && ev.time <= now {
                        self.core.push_fired_event(ev.value.clone());
                    }
                }
            }
        }
        self.core.fired_events()
    }

    fn has_opacity_curve(&self) -> bool {
        self.opacity_index.is_some()
    }

    fn opacity_curve_index(&self) -> Option<usize> {
        self.opacity_index
    }

    fn opacity_id(&self, index: usize) -> Option<&str> {
        self.data
            .curves
            .get(index)
            .filter(|c| c.target == CurveTarget::Opacity)
            .map(|c| c.id.as_str())
    }

    fn opacity_value(&self) -> f32 {
        self.opacity_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(keys: &[(f32, f32)]) -> MotionCurve {
        MotionCurve {
            id: "ParamAngleX".into(),
            target: CurveTarget::Parameter,
            keys: keys
                .iter()
                .map(|&(time, value)| CurveKey {
                    time,
                    value,
                    segment: Segment::Linear,
                })
                .collect(),
        }
    }

    #[test]
    fn sample_linear_and_edges() {
        let c = curve(&[(0.0, 0.0), (1.0, 10.0), (2.0, 0.0)]);
        assert_eq!(sample_curve(&c, -1.0), 0.0);
        assert!((sample_curve(&c, 0.5) - 5.0).abs() < 1e-5);
        assert!((sample_curve(&c, 1.5) - 5.0).abs() < 1e-5);
        assert_eq!(sample_curve(&c, 3.0), 0.0);
        assert_eq!(sample_curve(&c, 1.0), 10.0);
    }

    #[test]
    fn sample_stepped_holds_left() {
        let mut c = curve(&[(0.0, 1.0), (1.0, 3.0)]);
        c.keys[0].segment = Segment::Stepped;
        assert_eq!(sample_curve(&c, 0.99), 1.0);
        assert_eq!(sample_curve(&c, 1.0), 3.0);
    }

    #[test]
    fn validate_rejects_unsorted_keys() {
        let data = CurveMotionData {
            name: "bad".into(),
            duration: 2.0,
            looping: false,
            fade_in_seconds: None,
            fade_out_seconds: None,
            curves: vec![curve(&[(1.0, 0.0), (0.5, 1.0)])],
            events: vec![],
        };
        let err = CurveMotion::new(data, &MotionConfig::default()).unwrap_err();
        assert_eq!(err.category(), "argument");
    }
}
