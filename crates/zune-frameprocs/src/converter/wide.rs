/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Kernels narrowing 16 bit elements to 8 bits
//!
//! Covers RGBA64, Y16 and Y10. For full range 16 bit samples the 8 bit value
//! is the high byte, for Y10 the sample is shifted down by two.
use crate::converter::RowKernel;

/// Builds every 8 bit target pixel from the 16 bit channels of a source pixel
///
/// `pattern[i]` is the source channel narrowed into target channel `i`
#[derive(Copy, Clone, Debug)]
pub struct Narrow16<const SOURCE: usize, const TARGET: usize> {
    pattern: [usize; TARGET],
    shift:   u32
}

impl<const SOURCE: usize, const TARGET: usize> Narrow16<SOURCE, TARGET> {
    /// Keep the high byte of each selected channel
    pub fn high_byte(pattern: [usize; TARGET]) -> Self {
        debug_assert!(pattern.iter().all(|x| *x < SOURCE));
        Narrow16 { pattern, shift: 8 }
    }

    /// Shift each selected channel down by `shift`, saturating at 255
    pub fn with_shift(pattern: [usize; TARGET], shift: u32) -> Self {
        debug_assert!(pattern.iter().all(|x| *x < SOURCE));
        debug_assert!(shift < 16);
        Narrow16 { pattern, shift }
    }

    pub(crate) fn is_identity_high_byte(&self) -> bool {
        self.shift == 8
            && SOURCE == TARGET
            && self.pattern.iter().enumerate().all(|(i, x)| i == *x)
    }
}

impl<const SOURCE: usize, const TARGET: usize> RowKernel<u16, u8> for Narrow16<SOURCE, TARGET> {
    fn source_elements(&self, pixels: usize) -> usize {
        pixels * SOURCE
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels * TARGET
    }

    fn convert_row(&self, source: &[u16], target: &mut [u8], pixels: usize) {
        for (src, dst) in source[..pixels * SOURCE]
            .chunks_exact(SOURCE)
            .zip(target[..pixels * TARGET].chunks_exact_mut(TARGET))
        {
            for (out, index) in dst.iter_mut().zip(self.pattern.iter()) {
                *out = (src[*index] >> self.shift).min(255) as u8;
            }
        }
    }
}

pub(crate) fn rgba64_to_rgba32_scalar(source: &[u16], target: &mut [u8], pixels: usize) {
    for (src, dst) in source[..pixels * 4]
        .iter()
        .zip(target[..pixels * 4].iter_mut())
    {
        *dst = (*src >> 8) as u8;
    }
}
