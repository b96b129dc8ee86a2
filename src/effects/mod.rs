mod block;
mod distortion;
mod gaussian;
mod rgb_shift;
mod salt_pepper;
mod shift;

pub use block::BlockSwap;
pub use distortion::Distortion;
pub use gaussian::GaussianNoise;
pub use rgb_shift::RgbShift;
pub use salt_pepper::SaltPepper;
pub use shift::RowShift;

use crate::buffer::ImageBuffer;
use crate::error::{EffectError, ParamError};
use crate::rng::RandomSource;
use log::warn;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// A named, parameterized image transformation.
///
/// Parameters arrive as a raw JSON object and are validated exactly once, at
/// pipeline compilation, by `prepare`. The returned step is ready to run
/// against any number of images.
pub trait Effect {
    /// Effect name used for registry lookups and diagnostics
    fn name(&self) -> &'static str;

    /// Validate raw parameters and produce a runnable step.
    fn prepare(&self, params: &serde_json::Value) -> Result<Box<dyn EffectStep>, ParamError>;
}

/// A compiled effect invocation: typed parameters bound and ready to run.
///
/// Dimensions are preserved: `run` never resizes the buffer. Implementations
/// draw from the shared `RandomSource` in a fixed internal order so runs are
/// reproducible under a fixed seed.
pub trait EffectStep {
    fn run(&self, image: &mut ImageBuffer, rng: &mut RandomSource) -> Result<(), EffectError>;
}

/// Deserialize a raw JSON parameter object into a typed, defaulted struct.
/// Unknown keys are ignored; wrong-typed values are a `ParamError`.
pub(crate) fn parse_params<T: DeserializeOwned>(
    effect: &'static str,
    raw: &serde_json::Value,
) -> Result<T, ParamError> {
    serde_json::from_value(raw.clone()).map_err(|e| ParamError::new(effect, e.to_string()))
}

/// Name-to-effect mapping, populated at startup and append-only afterwards.
/// Lookups are exact-name and case-sensitive.
pub struct EffectRegistry {
    effects: HashMap<String, Box<dyn Effect>>,
}

impl EffectRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            effects: HashMap::new(),
        }
    }

    /// Registry holding every built-in effect.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Distortion));
        registry.register(Box::new(RgbShift));
        registry.register(Box::new(BlockSwap));
        registry.register(Box::new(RowShift));
        registry.register(Box::new(GaussianNoise));
        registry.register(Box::new(SaltPepper));
        registry
    }

    /// Register an effect under its own name. A duplicate name is refused:
    /// the first registration wins and a warning is emitted.
    pub fn register(&mut self, effect: Box<dyn Effect>) {
        let name = effect.name();
        if self.effects.contains_key(name) {
            warn!("effect '{}' already registered, keeping the first", name);
            return;
        }
        self.effects.insert(name.to_string(), effect);
    }

    /// Look up an effect by exact name.
    pub fn resolve(&self, name: &str) -> Option<&dyn Effect> {
        self.effects.get(name).map(|e| e.as_ref())
    }

    /// Registered effect names, sorted for stable display.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.effects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}
