//! Error taxonomy
//!
//! Three tiers, matching how far an error is allowed to propagate:
//! - `ParamError`: a pipeline entry's parameters failed validation. Caught at
//!   pipeline compilation; the step is marked invalid and skipped at run time.
//! - `EffectError`: an effect could not run against a particular image (e.g.
//!   the image is smaller than a block). Non-fatal: the step becomes a no-op.
//! - `GlitchError`: batch-layer failures. Config and folder errors abort the
//!   run; per-image codec errors skip that image only.

use std::path::PathBuf;
use thiserror::Error;

/// Parameter validation failure for one pipeline entry.
#[derive(Debug, Clone, Error)]
#[error("invalid parameters for '{effect}': {reason}")]
pub struct ParamError {
    pub effect: &'static str,
    pub reason: String,
}

impl ParamError {
    pub fn new(effect: &'static str, reason: impl Into<String>) -> Self {
        Self {
            effect,
            reason: reason.into(),
        }
    }
}

/// Runtime failure of a single effect invocation.
#[derive(Debug, Clone, Error)]
pub enum EffectError {
    /// The effect needs a larger image than it was given.
    #[error("image is {width}x{height} but at least {min_width}x{min_height} is required")]
    ImageTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },
}

/// Batch-layer errors surfaced by config loading and the codec boundary.
#[derive(Debug, Error)]
pub enum GlitchError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode configuration: {0}")]
    ConfigEncode(#[source] serde_json::Error),

    #[error("image codec error for '{path}': {source}")]
    Codec {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("input folder '{0}' does not exist or is not a directory")]
    MissingInputFolder(PathBuf),

    #[error("decoded image has an unexpected pixel layout")]
    BadPixelLayout,
}

impl GlitchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn codec(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Codec {
            path: path.into(),
            source,
        }
    }
}
