/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Kernels between planar and interleaved 8 bit pixels
//!
//! Interleaved to planar runs one [`ExtractChannel`] pass per plane, planar
//! to interleaved reads all planes in one [`InterleavePlanes`] pass.
use crate::converter::channels::ALPHA;
use crate::converter::{PlanesRowKernel, RowKernel};

/// Copies one channel of interleaved pixels into a plane
#[derive(Copy, Clone, Debug)]
pub struct ExtractChannel<const CHANNELS: usize> {
    channel: usize
}

impl<const CHANNELS: usize> ExtractChannel<CHANNELS> {
    pub fn new(channel: usize) -> Self {
        debug_assert!(channel < CHANNELS);
        ExtractChannel { channel }
    }
}

impl<const CHANNELS: usize> RowKernel<u8, u8> for ExtractChannel<CHANNELS> {
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
            *dst = src[self.channel];
        }
    }
}

/// Interleaves `PLANES` planes into pixels of `TARGET` channels
///
/// `pattern[i]` is the plane copied into target channel `i`, or [`ALPHA`]
#[derive(Copy, Clone, Debug)]
pub struct InterleavePlanes<const PLANES: usize, const TARGET: usize> {
    pattern: [usize; TARGET],
    alpha:   u8
}

impl<const PLANES: usize, const TARGET: usize> InterleavePlanes<PLANES, TARGET> {
    pub fn new(pattern: [usize; TARGET], alpha: u8) -> Self {
        debug_assert!(pattern.iter().all(|x| *x < PLANES || *x == ALPHA));
        InterleavePlanes { pattern, alpha }
    }
}

impl<const PLANES: usize, const TARGET: usize> PlanesRowKernel<u8, u8, PLANES>
    for InterleavePlanes<PLANES, TARGET>
{
    fn source_elements(&self, pixels: usize) -> usize {
        pixels
    }

    fn target_elements(&self, pixels: usize) -> usize {
        pixels * TARGET
    }

    fn convert_row(&self, sources: [&[u8]; PLANES], target: &mut [u8], pixels: usize) {
        for (x, dst) in target[..pixels * TARGET]
            .chunks_exact_mut(TARGET)
            .enumerate()
        {
            for (out, plane) in dst.iter_mut().zip(self.pattern.iter()) {
                *out = if *plane == ALPHA {
                    self.alpha
                } else {
                    sources[*plane][x]
                };
            }
        }
    }
}
