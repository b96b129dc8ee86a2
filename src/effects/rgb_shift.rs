//! Radial Band RGB Shift
//!
//! Chromatic-aberration-style ripples. Pixels are grouped into equal-width
//! annular bands by distance from the image center; within each band the red,
//! green and blue values are circularly rolled through the band's pixels
//! (red and blue forward, green backward), with progressively larger shifts
//! toward the image edge.

use super::{parse_params, Effect, EffectStep};
use crate::buffer::{ImageBuffer, CHANNELS};
use crate::error::{EffectError, ParamError};
use crate::rng::RandomSource;
use serde::Deserialize;

pub struct RgbShift;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RgbShiftParams {
    /// Maximum shift, reached in the outermost band.
    pub distortion_strength: f32,
    pub num_bands: u32,
}

impl Default for RgbShiftParams {
    fn default() -> Self {
        Self {
            distortion_strength: 10.0,
            num_bands: 10,
        }
    }
}

impl Effect for RgbShift {
    fn name(&self) -> &'static str {
        "rgb_shift"
    }

    fn prepare(&self, params: &serde_json::Value) -> Result<Box<dyn EffectStep>, ParamError> {
        let p: RgbShiftParams = parse_params(self.name(), params)?;
        if p.num_bands == 0 {
            return Err(ParamError::new(self.name(), "num_bands must be at least 1"));
        }
        if !p.distortion_strength.is_finite() {
            return Err(ParamError::new(
                self.name(),
                "distortion_strength must be finite",
            ));
        }
        Ok(Box::new(p))
    }
}

/// Channel roll directions: red forward, green backward, blue forward.
const CHANNEL_SIGNS: [i64; CHANNELS] = [1, -1, 1];

impl EffectStep for RgbShiftParams {
    fn run(&self, image: &mut ImageBuffer, _rng: &mut RandomSource) -> Result<(), EffectError> {
        let w = image.width();
        let h = image.height();
        let cx = w as f32 / 2.0;
        let cy = h as f32 / 2.0;
        let max_radius = (cx * cx + cy * cy).sqrt();
        let bands = self.num_bands as usize;
        let band_width = max_radius / bands as f32;

        // Group pixel indices by band, in row-major order. The final band is
        // closed on its outer edge so the corner pixel belongs to it.
        let mut band_pixels: Vec<Vec<usize>> = vec![Vec::new(); bands];
        for y in 0..h {
            for x in 0..w {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let band = ((dist / band_width) as usize).min(bands - 1);
                band_pixels[band].push((y * w + x) as usize);
            }
        }

        // Every band gathers from the pre-effect image
        let source = image.pixels().to_vec();
        let pixels = image.pixels_mut();
        let shift_increment = self.distortion_strength / bands as f32;

        for (i, members) in band_pixels.iter().enumerate() {
            let n = members.len() as i64;
            if n == 0 {
                continue;
            }
            let shift = (shift_increment * (i + 1) as f32).round() as i64;
            for (channel, sign) in CHANNEL_SIGNS.iter().enumerate() {
                let s = sign * shift;
                for (j, &pixel) in members.iter().enumerate() {
                    // out[j] = src[(j - s) mod n]: positive s rolls forward
                    let from = members[(j as i64 - s).rem_euclid(n) as usize];
                    pixels[pixel * CHANNELS + channel] = source[from * CHANNELS + channel];
                }
            }
        }

        Ok(())
    }
}
