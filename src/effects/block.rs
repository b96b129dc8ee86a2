//! Block Swap Glitch
//!
//! Repeatedly swaps a randomly chosen square block with a randomly displaced
//! one. Both regions are copied out before either is written, so a swap whose
//! source and destination overlap still exchanges the original contents
//! cleanly.

use super::{parse_params, Effect, EffectStep};
use crate::buffer::{ImageBuffer, CHANNELS};
use crate::error::{EffectError, ParamError};
use crate::rng::RandomSource;
use serde::Deserialize;

pub struct BlockSwap;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlockSwapParams {
    pub block_size: u32,
    pub displacement: i32,
    pub num_blocks: u32,
    /// Accepted for parameter-schema compatibility; block swaps always move
    /// whole pixels.
    pub rgb: bool,
}

impl Default for BlockSwapParams {
    fn default() -> Self {
        Self {
            block_size: 10,
            displacement: 20,
            num_blocks: 50,
            rgb: false,
        }
    }
}

impl Effect for BlockSwap {
    fn name(&self) -> &'static str {
        "block"
    }

    fn prepare(&self, params: &serde_json::Value) -> Result<Box<dyn EffectStep>, ParamError> {
        let p: BlockSwapParams = parse_params(self.name(), params)?;
        if p.block_size == 0 {
            return Err(ParamError::new(self.name(), "block_size must be at least 1"));
        }
        if p.displacement < 0 {
            return Err(ParamError::new(
                self.name(),
                "displacement must be non-negative",
            ));
        }
        Ok(Box::new(p))
    }
}

/// Copy a `size` x `size` block out of the image.
fn copy_block(image: &ImageBuffer, x: u32, y: u32, size: u32) -> Vec<u8> {
    let row_bytes = size as usize * CHANNELS;
    let mut block = Vec::with_capacity(row_bytes * size as usize);
    for row in y..y + size {
        let start = image.pixel_index(x, row);
        block.extend_from_slice(&image.pixels()[start..start + row_bytes]);
    }
    block
}

/// Write a previously copied block back at (x, y).
fn write_block(image: &mut ImageBuffer, x: u32, y: u32, size: u32, block: &[u8]) {
    let row_bytes = size as usize * CHANNELS;
    for (i, row) in (y..y + size).enumerate() {
        let start = image.pixel_index(x, row);
        image.pixels_mut()[start..start + row_bytes]
            .copy_from_slice(&block[i * row_bytes..(i + 1) * row_bytes]);
    }
}

impl EffectStep for BlockSwapParams {
    fn run(&self, image: &mut ImageBuffer, rng: &mut RandomSource) -> Result<(), EffectError> {
        let w = image.width();
        let h = image.height();
        let bs = self.block_size;
        // Origin is drawn from [0, dim - bs - 1], so the image must be
        // strictly larger than the block on both axes
        if w <= bs || h <= bs {
            return Err(EffectError::ImageTooSmall {
                width: w,
                height: h,
                min_width: bs + 1,
                min_height: bs + 1,
            });
        }

        for _ in 0..self.num_blocks {
            let x = rng.range_u32(w - bs);
            let y = rng.range_u32(h - bs);
            let dx = rng.range_i32(-self.displacement, self.displacement);
            let dy = rng.range_i32(-self.displacement, self.displacement);
            // Displaced origin clamped so the destination block also fits
            let nx = (x as i32 + dx).clamp(0, (w - bs) as i32) as u32;
            let ny = (y as i32 + dy).clamp(0, (h - bs) as i32) as u32;

            let a = copy_block(image, x, y, bs);
            let b = copy_block(image, nx, ny, bs);
            write_block(image, x, y, bs, &b);
            write_block(image, nx, ny, bs, &a);
        }

        Ok(())
    }
}
