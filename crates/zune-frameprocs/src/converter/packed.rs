/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! 16 bit 5-6-5 packed pixels
//!
//! One `u16` holds a whole pixel, the first channel of the format name in
//! the five least significant bits, green in the middle six bits and the
//! last channel in the five most significant bits. For `BGR565`, counting
//! from bit 0, that is `BBBBBGGGGGGRRRRR`, i.e. `rrrrrggg gggbbbbb` written
//! most significant bit first. This is the layout of Android's `RGB_565`.
//!
//! Fields are widened to 8 bits by shifting them up and inserting their own
//! low bits below, `(v << (8 - n)) | (v & ((1 << (8 - n)) - 1))`, so all ones
//! stays all ones.
use crate::converter::channels::luma_from_rgb;
use crate::converter::RowKernel;

/// Widen a 5 bit field to 8 bits
#[inline(always)]
pub const fn expand_5_bits(value: u16) -> u8 {
    let value = value & 0x1F;
    ((value << 3) | (value & 0x07)) as u8
}

/// Widen a 6 bit field to 8 bits
#[inline(always)]
pub const fn expand_6_bits(value: u16) -> u8 {
    let value = value & 0x3F;
    ((value << 2) | (value & 0x03)) as u8
}

/// Split a packed pixel into its (high, middle, low) fields, widened to 8 bits
#[inline(always)]
pub const fn unpack_565(value: u16) -> [u8; 3] {
    [
        expand_5_bits(value >> 11),
        expand_6_bits(value >> 5),
        expand_5_bits(value)
    ]
}

/// Packed 5-6-5 pixels to 24 bit interleaved pixels
///
/// `high_first` writes the most significant field first, e.g. `BGR565` to
/// `RGB24`. Otherwise the least significant field comes first, which keeps
/// the channel order of the format name, e.g. `BGR565` to `BGR24`.
#[derive(Copy, Clone, Debug)]
pub struct Unpack565 {
    high_first: bool
}

impl Unpack565 {
    pub const fn new(high_first: bool) -> Unpack565 {
        Unpack565 { high_first }
    }
}

impl RowKernel<u16, u8> for Unpack565 {
    fn source_elements(&self, pixels: usize) -> usize {
        pixels
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels * 3
    }

    fn convert_row(&self, source: &[u16], target: &mut [u8], pixels: usize) {
        for (src, dst) in source[..pixels]
            .iter()
            .zip(target[..pixels * 3].chunks_exact_mut(3))
        {
            let [high, middle, low] = unpack_565(*src);

            if self.high_first {
                dst.copy_from_slice(&[high, middle, low]);
            } else {
                dst.copy_from_slice(&[low, middle, high]);
            }
        }
    }
}

/// Packed 5-6-5 pixels to 8 bit luminance
#[derive(Copy, Clone, Debug)]
pub struct Packed565ToLuma {
    red_high: bool
}

impl Packed565ToLuma {
    /// `red_high` is true for `BGR565`, false for `RGB565`
    pub const fn new(red_high: bool) -> Packed565ToLuma {
        Packed565ToLuma { red_high }
    }

    pub(crate) const fn red_high(&self) -> bool {
        self.red_high
    }
}

impl RowKernel<u16, u8> for Packed565ToLuma {
    fn source_elements(&self, pixels: usize) -> usize {
        pixels
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels
    }

    fn convert_row(&self, source: &[u16], target: &mut [u8], pixels: usize) {
        packed_565_to_luma_scalar(source, target, pixels, self.red_high);
    }
}

pub(crate) fn packed_565_to_luma_scalar(
    source: &[u16], target: &mut [u8], pixels: usize, red_high: bool
) {
    for (src, dst) in source[..pixels].iter().zip(target[..pixels].iter_mut()) {
        let [high, green, low] = unpack_565(*src);
        let (red, blue) = if red_high { (high, low) } else { (low, high) };

        *dst = luma_from_rgb(red, green, blue);
    }
}
