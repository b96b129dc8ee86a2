//! Gaussian Noise
//!
//! Additive noise from a normal distribution, clamped to [0, 255] and
//! truncated back to bytes. Combined mode draws one sample per byte in buffer
//! order; per-channel mode (`rgb: true`) draws channel-major (all red, then
//! green, then blue), matching a fixed, reproducible draw sequence.

use super::{parse_params, Effect, EffectStep};
use crate::buffer::{ImageBuffer, CHANNELS};
use crate::error::{EffectError, ParamError};
use crate::rng::RandomSource;
use rand_distr::Normal;
use serde::Deserialize;

pub struct GaussianNoise;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GaussianParams {
    pub mean: f32,
    pub std: f32,
    pub rgb: bool,
}

impl Default for GaussianParams {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std: 25.0,
            rgb: false,
        }
    }
}

impl Effect for GaussianNoise {
    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn prepare(&self, params: &serde_json::Value) -> Result<Box<dyn EffectStep>, ParamError> {
        let p: GaussianParams = parse_params(self.name(), params)?;
        // Normal::new rejects a negative or non-finite std; surface that as a
        // parameter error here rather than at run time
        let noise = Normal::new(p.mean, p.std)
            .map_err(|e| ParamError::new(self.name(), e.to_string()))?;
        Ok(Box::new(GaussianStep { noise, rgb: p.rgb }))
    }
}

struct GaussianStep {
    noise: Normal<f32>,
    rgb: bool,
}

#[inline]
fn add_noise(byte: u8, noise: f32) -> u8 {
    (byte as f32 + noise).clamp(0.0, 255.0) as u8
}

impl EffectStep for GaussianStep {
    fn run(&self, image: &mut ImageBuffer, rng: &mut RandomSource) -> Result<(), EffectError> {
        let pixel_count = image.pixel_count();
        let pixels = image.pixels_mut();
        if self.rgb {
            for channel in 0..CHANNELS {
                for pixel in 0..pixel_count {
                    let idx = pixel * CHANNELS + channel;
                    pixels[idx] = add_noise(pixels[idx], rng.sample(&self.noise));
                }
            }
        } else {
            for byte in pixels.iter_mut() {
                *byte = add_noise(*byte, rng.sample(&self.noise));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(image: &mut ImageBuffer, params: serde_json::Value, seed: u64) {
        let step = GaussianNoise.prepare(&params).unwrap();
        let mut rng = RandomSource::from_seed(seed);
        step.run(image, &mut rng).unwrap();
    }

    #[test]
    fn test_zero_std_is_pure_mean_offset() {
        let mut image = ImageBuffer::filled(8, 8, 100, 100, 100);
        run(&mut image, serde_json::json!({ "mean": 10.0, "std": 0.0 }), 1);
        assert!(image.pixels().iter().all(|&b| b == 110));
    }

    #[test]
    fn test_output_stays_in_byte_range_near_extremes() {
        let mut bright = ImageBuffer::filled(16, 16, 250, 250, 250);
        run(&mut bright, serde_json::json!({ "std": 80.0 }), 2);
        let mut dark = ImageBuffer::filled(16, 16, 5, 5, 5);
        run(&mut dark, serde_json::json!({ "std": 80.0 }), 3);
        // clamp keeps everything a valid byte; nothing to assert beyond type
        // safety for u8, but the values must have actually moved
        assert_ne!(bright, ImageBuffer::filled(16, 16, 250, 250, 250));
        assert_ne!(dark, ImageBuffer::filled(16, 16, 5, 5, 5));
    }

    #[test]
    fn test_deterministic_under_fixed_seed() {
        let mut a = ImageBuffer::filled(20, 20, 128, 128, 128);
        let mut b = a.clone();
        run(&mut a, serde_json::json!({}), 42);
        run(&mut b, serde_json::json!({}), 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rgb_mode_differs_from_combined_only_in_draw_order() {
        let mut combined = ImageBuffer::filled(10, 10, 128, 128, 128);
        let mut per_channel = ImageBuffer::filled(10, 10, 128, 128, 128);
        run(&mut combined, serde_json::json!({ "rgb": false }), 5);
        run(&mut per_channel, serde_json::json!({ "rgb": true }), 5);
        assert_eq!(combined.width(), per_channel.width());
        // Same draw count, different assignment order
        assert_ne!(combined, per_channel);
    }

    #[test]
    fn test_negative_std_rejected() {
        let raw = serde_json::json!({ "std": -1.0 });
        assert!(GaussianNoise.prepare(&raw).is_err());
    }
}
