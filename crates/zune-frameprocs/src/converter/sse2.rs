/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#![cfg(feature = "sse2")]
//! SSE2 row kernels
//!
//! Both kernels work on blocks of 8 pixels. A row that isn't a multiple of 8
//! handles its tail by running the last block again, shifted left so it ends
//! on the final pixel. The overlapping pixels are written twice with the same
//! values, so results match the scalar kernels bit for bit.
//!
//! Rows shorter than one block go to the scalar kernel.
//!
//! The kernels are only reachable through [`Packed565ToLumaSse2::try_new`]
//! and [`Rgba64ToRgba32Sse2::try_new`] which confirm SSE2 support at runtime.
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::converter::packed::packed_565_to_luma_scalar;
use crate::converter::wide::rgba64_to_rgba32_scalar;
use crate::converter::RowKernel;

const BLOCK: usize = 8;

/// Start of every block of a row of `pixels` pixels, the final block
/// shifted back to end on the last pixel
fn block_starts(pixels: usize) -> impl Iterator<Item = usize> {
    let last = pixels - BLOCK;
    (0..pixels)
        .step_by(BLOCK)
        .map(move |start| start.min(last))
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn packed_565_to_luma_sse2(
    source: &[u16], target: &mut [u8], pixels: usize, red_high: bool
) {
    if pixels < BLOCK {
        return packed_565_to_luma_scalar(source, target, pixels, red_high);
    }
    let source = &source[..pixels];
    let target = &mut target[..pixels];

    let mask_5 = _mm_set1_epi16(0x1F);
    let mask_6 = _mm_set1_epi16(0x3F);
    let low_3 = _mm_set1_epi16(0x07);
    let low_2 = _mm_set1_epi16(0x03);
    let red_weight = _mm_set1_epi16(38);
    let green_weight = _mm_set1_epi16(75);
    let blue_weight = _mm_set1_epi16(15);
    let rounding = _mm_set1_epi16(64);

    for start in block_starts(pixels) {
        let values = _mm_loadu_si128(source.as_ptr().add(start).cast());

        let high = _mm_srli_epi16::<11>(values);
        let middle = _mm_and_si128(_mm_srli_epi16::<5>(values), mask_6);
        let low = _mm_and_si128(values, mask_5);

        // v << (8 - n) | (v & ((1 << (8 - n)) - 1))
        let high = _mm_or_si128(_mm_slli_epi16::<3>(high), _mm_and_si128(high, low_3));
        let green = _mm_or_si128(_mm_slli_epi16::<2>(middle), _mm_and_si128(middle, low_2));
        let low = _mm_or_si128(_mm_slli_epi16::<3>(low), _mm_and_si128(low, low_3));

        let (red, blue) = if red_high { (high, low) } else { (low, high) };

        // at most 128 * 255 + 64, fits in an unsigned 16 bit lane
        let sum = _mm_add_epi16(
            _mm_add_epi16(
                _mm_mullo_epi16(red, red_weight),
                _mm_mullo_epi16(green, green_weight)
            ),
            _mm_add_epi16(_mm_mullo_epi16(blue, blue_weight), rounding)
        );
        let luma = _mm_srli_epi16::<7>(sum);
        let packed = _mm_packus_epi16(luma, luma);

        _mm_storel_epi64(target.as_mut_ptr().add(start).cast(), packed);
    }
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn rgba64_to_rgba32_sse2(source: &[u16], target: &mut [u8], pixels: usize) {
    if pixels < BLOCK {
        return rgba64_to_rgba32_scalar(source, target, pixels);
    }
    let source = &source[..pixels * 4];
    let target = &mut target[..pixels * 4];

    for start in block_starts(pixels) {
        let offset = start * 4;
        let src = source.as_ptr().add(offset);
        let dst = target.as_mut_ptr().add(offset);

        let a = _mm_srli_epi16::<8>(_mm_loadu_si128(src.cast()));
        let b = _mm_srli_epi16::<8>(_mm_loadu_si128(src.add(8).cast()));
        let c = _mm_srli_epi16::<8>(_mm_loadu_si128(src.add(16).cast()));
        let d = _mm_srli_epi16::<8>(_mm_loadu_si128(src.add(24).cast()));

        _mm_storeu_si128(dst.cast(), _mm_packus_epi16(a, b));
        _mm_storeu_si128(dst.add(16).cast(), _mm_packus_epi16(c, d));
    }
}

/// SSE2 version of [`Packed565ToLuma`](crate::converter::packed::Packed565ToLuma)
#[derive(Copy, Clone, Debug)]
pub(crate) struct Packed565ToLumaSse2 {
    red_high: bool
}

impl Packed565ToLumaSse2 {
    /// Returns `None` if the CPU lacks SSE2
    pub(crate) fn try_new(red_high: bool) -> Option<Self> {
        if is_x86_feature_detected!("sse2") {
            return Some(Packed565ToLumaSse2 { red_high });
        }
        None
    }
}

impl RowKernel<u16, u8> for Packed565ToLumaSse2 {
    fn source_elements(&self, pixels: usize) -> usize {
        pixels
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels
    }

    fn convert_row(&self, source: &[u16], target: &mut [u8], pixels: usize) {
        // SAFETY: constructed only after runtime detection of SSE2
        unsafe { packed_565_to_luma_sse2(source, target, pixels, self.red_high) }
    }
}

/// SSE2 version of the RGBA64 to RGBA32 narrowing
#[derive(Copy, Clone, Debug)]
pub(crate) struct Rgba64ToRgba32Sse2;

impl Rgba64ToRgba32Sse2 {
    /// Returns `None` if the CPU lacks SSE2
    pub(crate) fn try_new() -> Option<Self> {
        if is_x86_feature_detected!("sse2") {
            return Some(Rgba64ToRgba32Sse2);
        }
        None
    }
}

impl RowKernel<u16, u8> for Rgba64ToRgba32Sse2 {
    fn source_elements(&self, pixels: usize) -> usize {
        pixels * 4
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels * 4
    }

    fn convert_row(&self, source: &[u16], target: &mut [u8], pixels: usize) {
        // SAFETY: constructed only after runtime detection of SSE2
        unsafe { rgba64_to_rgba32_sse2(source, target, pixels) }
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::converter::packed::packed_565_to_luma_scalar;
    use crate::converter::sse2::{packed_565_to_luma_sse2, rgba64_to_rgba32_sse2};
    use crate::converter::wide::rgba64_to_rgba32_scalar;

    #[test]
    fn test_565_luma_sse_scalar_identical() {
        let mut rng = nanorand::WyRand::new();

        // 8 = one block, 13 = overlapping tail, 5 = scalar fallback
        for pixels in [5, 8, 13, 64, 67] {
            let mut source = vec![0_u16; pixels];
            rng.fill(&mut source);

            for red_high in [true, false] {
                let mut sse_out = vec![3; pixels];
                let mut scalar_out = vec![90; pixels];

                unsafe { packed_565_to_luma_sse2(&source, &mut sse_out, pixels, red_high) };
                packed_565_to_luma_scalar(&source, &mut scalar_out, pixels, red_high);

                assert_eq!(sse_out, scalar_out, "pixels={pixels} red_high={red_high}");
            }
        }
    }

    #[test]
    fn test_rgba64_sse_scalar_identical() {
        let mut rng = nanorand::WyRand::new();

        for pixels in [3, 8, 9, 31, 40] {
            let mut source = vec![0_u16; pixels * 4];
            rng.fill(&mut source);

            let mut sse_out = vec![3; pixels * 4];
            let mut scalar_out = vec![90; pixels * 4];

            unsafe { rgba64_to_rgba32_sse2(&source, &mut sse_out, pixels) };
            rgba64_to_rgba32_scalar(&source, &mut scalar_out, pixels);

            assert_eq!(sse_out, scalar_out, "pixels={pixels}");
        }
    }

    #[test]
    fn test_padding_after_row_untouched() {
        let pixels = 11;
        let source = vec![0xFFFF_u16; pixels + 5];
        let mut target = vec![7_u8; pixels + 5];

        unsafe { packed_565_to_luma_sse2(&source, &mut target, pixels, true) };

        assert!(target[..pixels].iter().all(|x| *x == 255));
        assert!(target[pixels..].iter().all(|x| *x == 7));
    }
}
