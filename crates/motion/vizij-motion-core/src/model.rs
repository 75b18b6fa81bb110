//! Target model contract.
//!
//! Hosts implement `ParameterModel` over their own rig storage; motions only
//! see indices and scalar values. `ParameterStore` is a flat in-memory
//! implementation for simple hosts and tests.

use serde::{Deserialize, Serialize};

/// Parameter surface a motion writes into.
pub trait ParameterModel {
    fn parameter_index(&self, id: &str) -> Option<usize>;
    fn parameter_value(&self, index: usize) -> f32;
    fn set_parameter_value(&mut self, index: usize, value: f32);

    /// Add `delta * weight` to the current value.
    fn add_parameter_value(&mut self, index: usize, delta: f32, weight: f32) {
        let current = self.parameter_value(index);
        self.set_parameter_value(index, current + delta * weight);
    }

    /// Move the current value toward `target` by `weight`.
    fn blend_parameter_value(&mut self, index: usize, target: f32, weight: f32) {
        let current = self.parameter_value(index);
        self.set_parameter_value(index, current + (target - current) * weight);
    }

    /// Overall model transparency. Models without one ignore it.
    fn set_opacity(&mut self, _opacity: f32) {}
}

/// One named parameter with its allowed range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    pub value: f32,
    pub default: f32,
    pub min: f32,
    pub max: f32,
}

/// Flat parameter storage keyed by string id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterStore {
    params: Vec<Parameter>,
    opacity: f32,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self {
            params: Vec::new(),
            opacity: 1.0,
        }
    }
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parameter (or reset an existing one) and return its index.
    pub fn insert(&mut self, id: &str, default: f32, min: f32, max: f32) -> usize {
        let param = Parameter {
            id: id.to_string(),
            value: default,
            default,
            min,
            max,
        };
        if let Some(idx) = self.parameter_index(id) {
            self.params[idx] = param;
            idx
        } else {
            self.params.push(param);
            self.params.len() - 1
        }
    }

    /// Look up the current value by id.
    pub fn get(&self, id: &str) -> Option<f32> {
        self.parameter_index(id).map(|idx| self.params[idx].value)
    }

    /// Restore every parameter to its default.
    pub fn reset(&mut self) {
        for p in &mut self.params {
            p.value = p.default;
        }
        self.opacity = 1.0;
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl ParameterModel for ParameterStore {
    fn parameter_index(&self, id: &str) -> Option<usize> {
        self.params.iter().position(|p| p.id == id)
    }

    fn parameter_value(&self, index: usize) -> f32 {
        self.params.get(index).map(|p| p.value).unwrap_or(0.0)
    }

    fn set_parameter_value(&mut self, index: usize, value: f32) {
        if let Some(p) = self.params.get_mut(index) {
            p.value = value.clamp(p.min, p.max);
        }
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }
}
