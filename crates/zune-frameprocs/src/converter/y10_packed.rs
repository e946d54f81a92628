/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Packed 10 bit grayscale, four pixels in five bytes
//!
//! ```text
//! byte:   0        1        2        3        4
//!         p0[9:2]  p1[9:2]  p2[9:2]  p3[9:2]  p3[1:0] p2[1:0] p1[1:0] p0[1:0]
//! ```
//!
//! The linear 8 bit conversions simply keep the first four bytes of a group.
//! The gamma corrected ones map every 10 bit sample through
//! `Y8 = 255 * (Y10 / 1023) ^ gamma`, either exactly with a lookup table or
//! with three line segments.
use crate::converter::RowKernel;

const GROUP_BYTES: usize = 5;
const GROUP_PIXELS: usize = 4;

#[inline(always)]
fn group_elements(pixels: usize) -> usize {
    debug_assert!(pixels % GROUP_PIXELS == 0);
    pixels / GROUP_PIXELS * GROUP_BYTES
}

/// Unpack one group into four 10 bit samples
#[inline(always)]
pub const fn unpack_group(group: [u8; 5]) -> [u16; 4] {
    let low = group[4] as u16;
    [
        (group[0] as u16) << 2 | (low & 0b11),
        (group[1] as u16) << 2 | ((low >> 2) & 0b11),
        (group[2] as u16) << 2 | ((low >> 4) & 0b11),
        (group[3] as u16) << 2 | (low >> 6)
    ]
}

/// Packed Y10 to 8 bit grayscale
#[derive(Copy, Clone, Debug, Default)]
pub struct Y10PackedToY8;

impl RowKernel<u8, u8> for Y10PackedToY8 {
    fn source_elements(&self, pixels: usize) -> usize {
        group_elements(pixels)
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels
    }

    fn convert_row(&self, source: &[u8], target: &mut [u8], pixels: usize) {
        for (src, dst) in source[..group_elements(pixels)]
            .chunks_exact(GROUP_BYTES)
            .zip(target[..pixels].chunks_exact_mut(GROUP_PIXELS))
        {
            dst.copy_from_slice(&src[..GROUP_PIXELS]);
        }
    }
}

/// `255 * (value / 1023) ^ gamma`
fn gamma_curve(value: u16, gamma: f32) -> f32 {
    255.0 * (f32::from(value) / 1023.0).powf(gamma)
}

/// Whether `gamma` lies in (0, 2), false for NaN
pub fn is_valid_gamma(gamma: f32) -> bool {
    gamma > 0.0 && gamma < 2.0
}

/// Packed Y10 to 8 bit grayscale through a gamma lookup table
#[derive(Clone, Debug)]
pub struct Y10PackedToY8Gamma {
    table: Vec<u8>
}

impl Y10PackedToY8Gamma {
    /// Build the table for `gamma`, which must be in (0, 2)
    pub fn new(gamma: f32) -> Y10PackedToY8Gamma {
        debug_assert!(is_valid_gamma(gamma));

        let table = (0..1024_u16)
            .map(|value| gamma_curve(value, gamma).round() as u8)
            .collect();
        Y10PackedToY8Gamma { table }
    }
}

impl RowKernel<u8, u8> for Y10PackedToY8Gamma {
    fn source_elements(&self, pixels: usize) -> usize {
        group_elements(pixels)
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels
    }

    fn convert_row(&self, source: &[u8], target: &mut [u8], pixels: usize) {
        for (src, dst) in source[..group_elements(pixels)]
            .chunks_exact(GROUP_BYTES)
            .zip(target[..pixels].chunks_exact_mut(GROUP_PIXELS))
        {
            let group = [src[0], src[1], src[2], src[3], src[4]];
            for (value, out) in unpack_group(group).iter().zip(dst.iter_mut()) {
                *out = self.table[usize::from(*value)];
            }
        }
    }
}

/// Packed Y10 to 8 bit grayscale, gamma curve approximated by three lines
///
/// The lines pass through the curve at 0, [`STEP_01`](Self::STEP_01),
/// [`STEP_12`](Self::STEP_12) and 1023. Slopes and intercepts are fixed
/// point with 8 fractional bits.
#[derive(Copy, Clone, Debug)]
pub struct Y10PackedToY8GammaApproximated {
    slopes_256:     [i32; 3],
    intercepts_256: [i32; 3]
}

impl Y10PackedToY8GammaApproximated {
    pub const STEP_01: u16 = 64;
    pub const STEP_12: u16 = 256;

    /// Fit the three lines for `gamma`, which must be in (0, 2)
    pub fn new(gamma: f32) -> Y10PackedToY8GammaApproximated {
        debug_assert!(is_valid_gamma(gamma));

        let knots = [0, Self::STEP_01, Self::STEP_12, 1023];
        let mut slopes_256 = [0; 3];
        let mut intercepts_256 = [0; 3];

        for (i, pair) in knots.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            let start_256 = (gamma_curve(start, gamma) * 256.0).round() as i32;
            let end_256 = (gamma_curve(end, gamma) * 256.0).round() as i32;
            let run = i32::from(end - start);

            slopes_256[i] = (f64::from(end_256 - start_256) / f64::from(run)).round() as i32;
            intercepts_256[i] = start_256 - slopes_256[i] * i32::from(start);
        }
        Y10PackedToY8GammaApproximated {
            slopes_256,
            intercepts_256
        }
    }

    #[inline(always)]
    fn apply(&self, value: u16) -> u8 {
        let segment = if value < Self::STEP_01 {
            0
        } else if value <= Self::STEP_12 {
            1
        } else {
            2
        };
        let result_256 = self.slopes_256[segment] * i32::from(value) + self.intercepts_256[segment];

        ((result_256 + 128) >> 8).clamp(0, 255) as u8
    }
}

impl RowKernel<u8, u8> for Y10PackedToY8GammaApproximated {
    fn source_elements(&self, pixels: usize) -> usize {
        group_elements(pixels)
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels
    }

    fn convert_row(&self, source: &[u8], target: &mut [u8], pixels: usize) {
        for (src, dst) in source[..group_elements(pixels)]
            .chunks_exact(GROUP_BYTES)
            .zip(target[..pixels].chunks_exact_mut(GROUP_PIXELS))
        {
            let group = [src[0], src[1], src[2], src[3], src[4]];
            for (value, out) in unpack_group(group).iter().zip(dst.iter_mut()) {
                *out = self.apply(*value);
            }
        }
    }
}

/// Packed Y10 to 24 bit color, gray replicated into all channels
#[derive(Copy, Clone, Debug, Default)]
pub struct Y10PackedToColor24;

impl RowKernel<u8, u8> for Y10PackedToColor24 {
    fn source_elements(&self, pixels: usize) -> usize {
        group_elements(pixels)
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels * 3
    }

    fn convert_row(&self, source: &[u8], target: &mut [u8], pixels: usize) {
        for (src, dst) in source[..group_elements(pixels)]
            .chunks_exact(GROUP_BYTES)
            .zip(target[..pixels * 3].chunks_exact_mut(GROUP_PIXELS * 3))
        {
            for (value, pixel) in src[..GROUP_PIXELS].iter().zip(dst.chunks_exact_mut(3)) {
                pixel.fill(*value);
            }
        }
    }
}

/// Packed Y10 to unpacked Y10, one sample per `u16`
#[derive(Copy, Clone, Debug, Default)]
pub struct Y10PackedToY10;

impl RowKernel<u8, u16> for Y10PackedToY10 {
    fn source_elements(&self, pixels: usize) -> usize {
        group_elements(pixels)
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels
    }

    fn convert_row(&self, source: &[u8], target: &mut [u16], pixels: usize) {
        for (src, dst) in source[..group_elements(pixels)]
            .chunks_exact(GROUP_BYTES)
            .zip(target[..pixels].chunks_exact_mut(GROUP_PIXELS))
        {
            let group = [src[0], src[1], src[2], src[3], src[4]];
            dst.copy_from_slice(&unpack_group(group));
        }
    }
}
