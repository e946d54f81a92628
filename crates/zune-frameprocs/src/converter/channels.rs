/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Kernels for interleaved 8 bit pixels
//!
//! Channel reordering, adding or dropping alpha, gray replication and
//! the luminance computation all live here.
use crate::converter::RowKernel;

/// Pattern entry which writes the alpha value instead of a source channel
pub const ALPHA: usize = usize::MAX;

/// Builds every target pixel from the channels of one source pixel
///
/// `pattern[i]` is the source channel copied into target channel `i`,
/// or [`ALPHA`].
///
/// # Example
/// RGB24 to BGRA32
/// ```
/// use zune_frameprocs::converter::channels::{ShuffleChannels, ALPHA};
/// use zune_frameprocs::converter::RowKernel;
///
/// let kernel = ShuffleChannels::<3, 4>::new([2, 1, 0, ALPHA], 255);
/// let mut target = [0; 8];
/// kernel.convert_row(&[1, 2, 3, 4, 5, 6], &mut target, 2);
/// assert_eq!(target, [3, 2, 1, 255, 6, 5, 4, 255]);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ShuffleChannels<const SOURCE: usize, const TARGET: usize> {
    pattern: [usize; TARGET],
    alpha:   u8
}

impl<const SOURCE: usize, const TARGET: usize> ShuffleChannels<SOURCE, TARGET> {
    /// Create the kernel
    ///
    /// # Panics
    /// In debug builds, if the pattern names a channel outside the source pixel
    pub fn new(pattern: [usize; TARGET], alpha: u8) -> Self {
        debug_assert!(pattern.iter().all(|x| *x < SOURCE || *x == ALPHA));
        ShuffleChannels { pattern, alpha }
    }
}

impl<const SOURCE: usize, const TARGET: usize> RowKernel<u8, u8>
    for ShuffleChannels<SOURCE, TARGET>
{
    fn source_elements(&self, pixels: usize) -> usize {
        pixels * SOURCE
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels * TARGET
    }

    fn convert_row(&self, source: &[u8], target: &mut [u8], pixels: usize) {
        for (src, dst) in source[..pixels * SOURCE]
            .chunks_exact(SOURCE)
            .zip(target[..pixels * TARGET].chunks_exact_mut(TARGET))
        {
            for (out, index) in dst.iter_mut().zip(self.pattern.iter()) {
                *out = if *index == ALPHA {
                    self.alpha
                } else {
                    src[*index]
                };
            }
        }
    }
}

/// Luminance of an RGB triple with 7 bit precision
///
/// `(38 * r + 75 * g + 15 * b + 64) >> 7`, the weights sum to 128.
#[inline(always)]
pub const fn luma_from_rgb(r: u8, g: u8, b: u8) -> u8 {
    ((38 * r as u32 + 75 * g as u32 + 15 * b as u32 + 64) >> 7) as u8
}

/// Color pixels to 8 bit luminance
///
/// Green is always channel 1, red and blue positions are configurable,
/// any fourth channel is ignored.
#[derive(Copy, Clone, Debug)]
pub struct ColorToLuma<const CHANNELS: usize> {
    red:  usize,
    blue: usize
}

impl<const CHANNELS: usize> ColorToLuma<CHANNELS> {
    /// Red first, e.g. RGB24 or RGBA32
    pub const fn red_first() -> Self {
        ColorToLuma { red: 0, blue: 2 }
    }

    /// Blue first, e.g. BGR24 or BGRA32
    pub const fn blue_first() -> Self {
        ColorToLuma { red: 2, blue: 0 }
    }
}

impl<const CHANNELS: usize> RowKernel<u8, u8> for ColorToLuma<CHANNELS> {
    fn source_elements(&self, pixels: usize) -> usize {
        pixels * CHANNELS
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels
    }

    fn convert_row(&self, source: &[u8], target: &mut [u8], pixels: usize) {
        for (src, dst) in source[..pixels * CHANNELS]
            .chunks_exact(CHANNELS)
            .zip(target[..pixels].iter_mut())
        {
            *dst = luma_from_rgb(src[self.red], src[1], src[self.blue]);
        }
    }
}
