//! Iteration-count coloring.
//!
//! The escape iteration is read as base-4 digits: bits 0–1 pick the red
//! level, bits 2–3 green, bits 4–5 blue, so neighbouring bands always
//! differ and the pattern repeats every 64 iterations. Levels start at 64
//! rather than 0 so no escaped point shares the interior's black.

use juliabrot_core::IterationResult;
use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::iteration_buffer::IterationBuffer;

/// Color of points that never escaped.
pub const INTERIOR_COLOR: [u8; 3] = [0, 0, 0];

const LEVELS: [u8; 4] = [64, 128, 192, 255];

/// Map a single iteration result to an RGB triple.
#[inline]
pub fn color(result: IterationResult) -> [u8; 3] {
    match result {
        IterationResult::Interior => INTERIOR_COLOR,
        IterationResult::Escaped { iterations: n } => [
            LEVELS[(n & 3) as usize],
            LEVELS[((n >> 2) & 3) as usize],
            LEVELS[((n >> 4) & 3) as usize],
        ],
    }
}

/// Colorize an entire iteration buffer into an RGB pixel buffer.
pub fn colorize(iter_buf: &IterationBuffer) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(juliabrot_core::Viewport {
        width: iter_buf.width,
        height: iter_buf.height,
    });
    buffer
        .pixels_mut()
        .par_iter_mut()
        .zip(iter_buf.data.par_iter())
        .for_each(|(pixel, &result)| *pixel = color(result));
    buffer
}
