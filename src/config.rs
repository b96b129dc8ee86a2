//! Batch configuration
//!
//! A single JSON file drives a run: where to read and write images, an
//! optional seed, the effect order, and a raw parameter object per effect.
//! Parameter objects stay untyped here; each effect validates its own block
//! when the pipeline is compiled.

use crate::error::GlitchError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Configuration for one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_input_folder")]
    pub input_folder: String,
    #[serde(default = "default_output_folder")]
    pub output_folder: String,
    /// Seeds the shared RandomSource when present; otherwise the run is
    /// non-reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Execution order. Duplicate names are legal.
    #[serde(default)]
    pub effects_order: Vec<String>,
    /// Raw per-effect parameter objects, keyed by effect name.
    #[serde(default)]
    pub effects: HashMap<String, serde_json::Value>,
}

fn default_input_folder() -> String {
    "input_images".to_string()
}

fn default_output_folder() -> String {
    "output_images".to_string()
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_folder: default_input_folder(),
            output_folder: default_output_folder(),
            seed: None,
            effects_order: Vec::new(),
            effects: HashMap::new(),
        }
    }
}

impl BatchConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GlitchError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| GlitchError::io(path, e))?;
        serde_json::from_str(&json).map_err(|e| GlitchError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GlitchError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(GlitchError::ConfigEncode)?;
        fs::write(path, json).map_err(|e| GlitchError::io(path, e))
    }

    /// Raw parameter object for an effect, or an empty object when absent.
    pub fn params_for(&self, name: &str) -> serde_json::Value {
        self.effects
            .get(name)
            .cloned()
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_in() {
        let config: BatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.input_folder, "input_images");
        assert_eq!(config.output_folder, "output_images");
        assert_eq!(config.seed, None);
        assert!(config.effects_order.is_empty());
        assert!(config.effects.is_empty());
    }

    #[test]
    fn test_full_config_parses() {
        let json = r#"{
            "input_folder": "in",
            "output_folder": "out",
            "seed": 1234,
            "effects_order": ["distortion", "gaussian", "distortion"],
            "effects": {
                "distortion": {"distortion_strength": 0.8},
                "gaussian": {"std": 12.0}
            }
        }"#;
        let config: BatchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.effects_order.len(), 3);
        let params = config.params_for("distortion");
        assert_eq!(params["distortion_strength"], 0.8);
    }

    #[test]
    fn test_params_for_missing_effect_is_empty_object() {
        let config = BatchConfig::default();
        let params = config.params_for("block");
        assert!(params.as_object().unwrap().is_empty());
    }
}
