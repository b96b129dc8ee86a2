//! Row Shift Glitch
//!
//! Picks random horizontal bands and rolls each of their rows circularly by a
//! random amount. Whole RGB pixels move together; bytes shifted past one edge
//! reappear at the other.

use super::{parse_params, Effect, EffectStep};
use crate::buffer::{ImageBuffer, CHANNELS};
use crate::error::{EffectError, ParamError};
use crate::rng::RandomSource;
use serde::Deserialize;

pub struct RowShift;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RowShiftParams {
    /// Inclusive (min, max) pixel shift drawn per band.
    pub shift_range: (i32, i32),
    pub num_lines: u32,
    pub shift_line_height: u32,
    /// Accepted for parameter-schema compatibility; rows always move whole
    /// pixels.
    pub rgb: bool,
}

impl Default for RowShiftParams {
    fn default() -> Self {
        Self {
            shift_range: (-10, 10),
            num_lines: 10,
            shift_line_height: 1,
            rgb: false,
        }
    }
}

impl Effect for RowShift {
    fn name(&self) -> &'static str {
        "shift"
    }

    fn prepare(&self, params: &serde_json::Value) -> Result<Box<dyn EffectStep>, ParamError> {
        let p: RowShiftParams = parse_params(self.name(), params)?;
        if p.shift_range.0 > p.shift_range.1 {
            return Err(ParamError::new(
                self.name(),
                "shift_range min must not exceed max",
            ));
        }
        if p.shift_line_height == 0 {
            return Err(ParamError::new(
                self.name(),
                "shift_line_height must be at least 1",
            ));
        }
        Ok(Box::new(p))
    }
}

/// Circularly shift one row of interleaved RGB bytes by `shift` pixels
/// (positive = rightward).
fn roll_row(row: &mut [u8], shift: i32) {
    let n = (row.len() / CHANNELS) as i64;
    if n == 0 {
        return;
    }
    let src = row.to_vec();
    for x in 0..n {
        let from = ((x - shift as i64).rem_euclid(n)) as usize;
        let dst = x as usize * CHANNELS;
        row[dst..dst + CHANNELS].copy_from_slice(&src[from * CHANNELS..from * CHANNELS + CHANNELS]);
    }
}

impl EffectStep for RowShiftParams {
    fn run(&self, image: &mut ImageBuffer, rng: &mut RandomSource) -> Result<(), EffectError> {
        let h = image.height();
        let lh = self.shift_line_height;
        if h < lh {
            return Err(EffectError::ImageTooSmall {
                width: image.width(),
                height: h,
                min_width: 1,
                min_height: lh,
            });
        }

        for _ in 0..self.num_lines {
            // Band top is drawn so the whole band fits
            let y = rng.range_u32(h - lh + 1);
            let shift = rng.range_i32(self.shift_range.0, self.shift_range.1);
            for row in y..y + lh {
                roll_row(image.row_mut(row), shift);
            }
        }

        Ok(())
    }
}
