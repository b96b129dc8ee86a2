//! Salt-and-Pepper Noise
//!
//! Forces a fraction of pixels to pure white (salt) or pure black (pepper).
//! Counts are taken over the pixel grid: amount * width * height pixels are
//! hit in total, split by the salt_vs_pepper ratio. Coordinates are drawn
//! with replacement, so the realized density can land slightly under the
//! requested amount. Every hit writes all three channels.

use super::{parse_params, Effect, EffectStep};
use crate::buffer::ImageBuffer;
use crate::error::{EffectError, ParamError};
use crate::rng::RandomSource;
use serde::Deserialize;

pub struct SaltPepper;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SaltPepperParams {
    /// Fraction of pixels to corrupt, in [0, 1].
    pub amount: f64,
    /// Salt share of the corrupted pixels, in [0, 1].
    pub salt_vs_pepper: f64,
    /// Accepted for parameter-schema compatibility; hits always cover all
    /// three channels.
    pub rgb: bool,
}

impl Default for SaltPepperParams {
    fn default() -> Self {
        Self {
            amount: 0.005,
            salt_vs_pepper: 0.5,
            rgb: false,
        }
    }
}

impl Effect for SaltPepper {
    fn name(&self) -> &'static str {
        "salt_pepper"
    }

    fn prepare(&self, params: &serde_json::Value) -> Result<Box<dyn EffectStep>, ParamError> {
        let p: SaltPepperParams = parse_params(self.name(), params)?;
        if !(0.0..=1.0).contains(&p.amount) {
            return Err(ParamError::new(self.name(), "amount must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&p.salt_vs_pepper) {
            return Err(ParamError::new(
                self.name(),
                "salt_vs_pepper must be in [0, 1]",
            ));
        }
        Ok(Box::new(p))
    }
}

impl EffectStep for SaltPepperParams {
    fn run(&self, image: &mut ImageBuffer, rng: &mut RandomSource) -> Result<(), EffectError> {
        let w = image.width();
        let h = image.height();
        if w == 0 || h == 0 {
            return Ok(());
        }

        let total = self.amount * (w as f64) * (h as f64);
        let num_salt = (total * self.salt_vs_pepper).ceil() as u64;
        let num_pepper = (total * (1.0 - self.salt_vs_pepper)).ceil() as u64;

        for _ in 0..num_salt {
            let y = rng.range_u32(h);
            let x = rng.range_u32(w);
            image.set_pixel(x as i32, y as i32, 255, 255, 255);
        }
        for _ in 0..num_pepper {
            let y = rng.range_u32(h);
            let x = rng.range_u32(w);
            image.set_pixel(x as i32, y as i32, 0, 0, 0);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_gray_density() {
        // 100x100 flat gray, amount = 0.01: about 1% of pixels become 0 or
        // 255, the rest stay at 128
        let mut image = ImageBuffer::filled(100, 100, 128, 128, 128);
        let step = SaltPepper
            .prepare(&serde_json::json!({ "amount": 0.01 }))
            .unwrap();
        let mut rng = RandomSource::from_seed(2024);
        step.run(&mut image, &mut rng).unwrap();

        let mut salt = 0usize;
        let mut pepper = 0usize;
        let mut untouched = 0usize;
        for px in image.pixels().chunks_exact(3) {
            match px[0] {
                255 => salt += 1,
                0 => pepper += 1,
                128 => untouched += 1,
                other => panic!("unexpected channel value {}", other),
            }
            // Hits cover the whole pixel
            assert!(px[1] == px[0] && px[2] == px[0]);
        }
        // 50 + 50 draws with replacement: a few collisions are possible
        assert!(salt <= 50 && salt >= 40, "salt count {}", salt);
        assert!(pepper <= 50 && pepper >= 40, "pepper count {}", pepper);
        assert_eq!(salt + pepper + untouched, 10_000);
    }

    #[test]
    fn test_ratio_splits_counts() {
        let mut image = ImageBuffer::filled(50, 50, 128, 128, 128);
        let step = SaltPepper
            .prepare(&serde_json::json!({ "amount": 0.2, "salt_vs_pepper": 1.0 }))
            .unwrap();
        let mut rng = RandomSource::from_seed(3);
        step.run(&mut image, &mut rng).unwrap();
        // ratio 1.0: salt only
        assert!(image.pixels().iter().all(|&b| b == 128 || b == 255));
        assert!(image.pixels().iter().any(|&b| b == 255));
    }

    #[test]
    fn test_zero_amount_is_identity() {
        let original = ImageBuffer::filled(10, 10, 77, 88, 99);
        let mut image = original.clone();
        let step = SaltPepper
            .prepare(&serde_json::json!({ "amount": 0.0 }))
            .unwrap();
        let mut rng = RandomSource::from_seed(4);
        step.run(&mut image, &mut rng).unwrap();
        assert_eq!(image, original);
    }

    #[test]
    fn test_deterministic_under_fixed_seed() {
        let step = SaltPepper.prepare(&serde_json::json!({})).unwrap();
        let mut a = ImageBuffer::filled(64, 64, 128, 128, 128);
        let mut b = a.clone();
        step.run(&mut a, &mut RandomSource::from_seed(11)).unwrap();
        step.run(&mut b, &mut RandomSource::from_seed(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_range_amount_rejected() {
        assert!(SaltPepper
            .prepare(&serde_json::json!({ "amount": 1.5 }))
            .is_err());
        assert!(SaltPepper
            .prepare(&serde_json::json!({ "salt_vs_pepper": -0.1 }))
            .is_err());
    }
}
