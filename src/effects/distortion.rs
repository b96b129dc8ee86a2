//! Radial Distortion
//!
//! Barrel/pincushion warping driven by a single strength parameter. Every
//! destination pixel is mapped through polar space (r' = r + k*r^3) back to a
//! floating-point source coordinate and bilinearly resampled. Each output
//! pixel depends only on the source image, never on other output pixels.

use super::{parse_params, Effect, EffectStep};
use crate::buffer::{ImageBuffer, CHANNELS};
use crate::error::{EffectError, ParamError};
use crate::rng::RandomSource;
use serde::Deserialize;

pub struct Distortion;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DistortionParams {
    pub distortion_strength: f32,
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            distortion_strength: 0.5,
        }
    }
}

impl Effect for Distortion {
    fn name(&self) -> &'static str {
        "distortion"
    }

    fn prepare(&self, params: &serde_json::Value) -> Result<Box<dyn EffectStep>, ParamError> {
        let p: DistortionParams = parse_params(self.name(), params)?;
        if !p.distortion_strength.is_finite() {
            return Err(ParamError::new(
                self.name(),
                "distortion_strength must be finite",
            ));
        }
        Ok(Box::new(p))
    }
}

impl EffectStep for DistortionParams {
    fn run(&self, image: &mut ImageBuffer, _rng: &mut RandomSource) -> Result<(), EffectError> {
        let w = image.width();
        let h = image.height();
        // Normalization divides by (dim - 1)
        if w < 2 || h < 2 {
            return Err(EffectError::ImageTooSmall {
                width: w,
                height: h,
                min_width: 2,
                min_height: 2,
            });
        }

        let k = self.distortion_strength;
        let src = image.pixels();
        let mut out = vec![0u8; src.len()];

        for py in 0..h {
            let y = -1.0 + 2.0 * py as f32 / (h - 1) as f32;
            for px in 0..w {
                let x = -1.0 + 2.0 * px as f32 / (w - 1) as f32;

                let r = (x * x + y * y).sqrt();
                // r = 0 would give a degenerate scale factor; pin it to 1
                let r_distorted = if r == 0.0 { 1.0 } else { r + k * r * r * r };
                let theta = y.atan2(x);
                let xd = r_distorted * theta.cos();
                let yd = r_distorted * theta.sin();

                // Back to pixel space; may land outside the image
                let sx = (xd + 1.0) / 2.0 * (w - 1) as f32;
                let sy = (yd + 1.0) / 2.0 * (h - 1) as f32;

                // Bilinear weights from the unclamped coordinate, border-clamped
                // corner indices
                let x0f = sx.floor();
                let y0f = sy.floor();
                let x1f = x0f + 1.0;
                let y1f = y0f + 1.0;

                let wa = (x1f - sx) * (y1f - sy);
                let wb = (sx - x0f) * (y1f - sy);
                let wc = (x1f - sx) * (sy - y0f);
                let wd = (sx - x0f) * (sy - y0f);

                let x0 = (x0f as i64).clamp(0, w as i64 - 1) as u32;
                let x1 = (x1f as i64).clamp(0, w as i64 - 1) as u32;
                let y0 = (y0f as i64).clamp(0, h as i64 - 1) as u32;
                let y1 = (y1f as i64).clamp(0, h as i64 - 1) as u32;

                let ia = image.pixel_index(x0, y0);
                let ib = image.pixel_index(x1, y0);
                let ic = image.pixel_index(x0, y1);
                let id = image.pixel_index(x1, y1);
                let dst = image.pixel_index(px, py);

                for c in 0..CHANNELS {
                    let v = wa * src[ia + c] as f32
                        + wb * src[ib + c] as f32
                        + wc * src[ic + c] as f32
                        + wd * src[id + c] as f32;
                    out[dst + c] = v.round().clamp(0.0, 255.0) as u8;
                }
            }
        }

        image.pixels_mut().copy_from_slice(&out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(w: u32, h: u32) -> ImageBuffer {
        let mut image = ImageBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                image.set_pixel(
                    x as i32,
                    y as i32,
                    (x * 7 % 256) as u8,
                    (y * 13 % 256) as u8,
                    ((x + y) * 3 % 256) as u8,
                );
            }
        }
        image
    }

    fn run(image: &mut ImageBuffer, strength: f32) {
        let step = Distortion
            .prepare(&serde_json::json!({ "distortion_strength": strength }))
            .unwrap();
        let mut rng = RandomSource::from_seed(0);
        step.run(image, &mut rng).unwrap();
    }

    #[test]
    fn test_zero_strength_is_identity() {
        // Even dimensions keep every pixel off the exact center, so the
        // r = 0 -> r' = 1 pin never fires and k = 0 is a pure identity.
        let original = gradient_image(32, 24);
        let mut image = original.clone();
        run(&mut image, 0.0);
        // Spot-check fixed coordinates: corners, center, and an edge midpoint
        for &(x, y) in &[(0, 0), (31, 0), (0, 23), (31, 23), (16, 12), (15, 0)] {
            assert_eq!(
                image.get_pixel(x, y),
                original.get_pixel(x, y),
                "pixel ({}, {}) changed under k=0",
                x,
                y
            );
        }
        // And the whole buffer, since rounding absorbs float jitter
        assert_eq!(image, original);
    }

    #[test]
    fn test_preserves_dimensions() {
        let mut image = gradient_image(17, 9);
        run(&mut image, 0.7);
        assert_eq!(image.width(), 17);
        assert_eq!(image.height(), 9);
        assert_eq!(image.pixels().len(), 17 * 9 * 3);
    }

    #[test]
    fn test_positive_strength_warps_off_center_pixels() {
        let original = gradient_image(41, 41);
        let mut image = original.clone();
        run(&mut image, 0.9);
        assert_ne!(image, original);
    }

    #[test]
    fn test_too_small_image_is_an_error() {
        let mut image = ImageBuffer::new(1, 5);
        let step = Distortion.prepare(&serde_json::json!({})).unwrap();
        let mut rng = RandomSource::from_seed(0);
        assert!(step.run(&mut image, &mut rng).is_err());
    }

    #[test]
    fn test_non_finite_strength_rejected() {
        let raw = serde_json::json!({ "distortion_strength": f64::NAN });
        // NaN is not representable in JSON; serde_json maps it to null, which
        // fails typed deserialization
        assert!(Distortion.prepare(&raw).is_err());
    }
}
