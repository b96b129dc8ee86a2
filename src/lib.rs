//! glitchforge - deterministic glitch-art effect pipeline
//!
//! Applies an ordered, configurable sequence of pixel-level effects to RGB
//! images. The pipeline is compiled once per batch (names resolved,
//! parameters validated), then each image is threaded through the steps in
//! order; a step that cannot run is skipped with a warning and the pipeline
//! continues from the last good image. All randomness flows through one
//! seedable `RandomSource`, so a fixed seed reproduces a run byte for byte.

pub mod buffer;
pub mod config;
pub mod effects;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod rng;

pub use buffer::ImageBuffer;
pub use config::BatchConfig;
pub use effects::{Effect, EffectRegistry, EffectStep};
pub use error::{EffectError, GlitchError, ParamError};
pub use pipeline::{Pipeline, RunReport, StepStatus};
pub use rng::RandomSource;
