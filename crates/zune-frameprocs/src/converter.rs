/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel format conversion
//!
//! A conversion is a [`RowKernel`], which converts one row of pixels, run
//! over a whole frame by [`convert_generic_pixel_format`]. The driver owns
//! everything a kernel shouldn't care about:
//!
//! - Row strides and padding, padding is never touched
//! - Flipping (row order) and mirroring (pixel order)
//! - Splitting the target rows across a [`Worker`]
//!
//! Formats with several planes go through [`convert_planes_to_interleaved`].
//!
//! Most users want [`FrameConverter`] which picks the kernel at runtime.
use zune_frame_core::conversion_flag::ConversionFlag;

pub use crate::converter::dispatch::{Convert, FrameConverter};
use crate::worker::{execute_rows, Worker};

pub mod channels;
mod dispatch;
pub mod packed;
pub mod planar;
pub(crate) mod sse2;
pub mod wide;
pub mod y10_packed;

/// Converts one row of `S` elements into one row of `T` elements
///
/// Kernels are pure, they read `source_elements(pixels)` source elements
/// and write `target_elements(pixels)` target elements, nothing else.
///
/// A kernel must be linear in `pixels`: converting two rows in one call of
/// `2 * pixels` gives the same result as two calls of `pixels`, the driver
/// relies on it for continuous buffers.
pub trait RowKernel<S, T>: Sync {
    /// Number of source elements `pixels` pixels span
    fn source_elements(&self, pixels: usize) -> usize;
    /// Number of target elements `pixels` pixels span
    fn target_elements(&self, pixels: usize) -> usize;
    /// Convert `pixels` pixels from `source` into `target`
    fn convert_row(&self, source: &[S], target: &mut [T], pixels: usize);
}

/// Converts one row from several planes into one interleaved row
pub trait PlanesRowKernel<S, T, const PLANES: usize>: Sync {
    /// Number of elements of every plane `pixels` pixels span
    fn source_elements(&self, pixels: usize) -> usize;
    /// Number of target elements `pixels` pixels span
    fn target_elements(&self, pixels: usize) -> usize;
    fn convert_row(&self, sources: [&[S]; PLANES], target: &mut [T], pixels: usize);
}

/// Reverses the order of `pixels` pixels of a row in place
pub type RowReverseFunction<T> = fn(row: &mut [T], pixels: usize);

/// Copies rows of any format unchanged
#[derive(Copy, Clone, Debug)]
pub struct CopyRow {
    elements_per_pixel: usize,
    pixels_per_group:   usize
}

impl CopyRow {
    /// A copy kernel for rows holding `elements_per_group` elements for
    /// every `pixels_per_group` pixels, e.g. `(5, 4)` for packed Y10
    pub const fn new(elements_per_group: usize, pixels_per_group: usize) -> CopyRow {
        CopyRow {
            elements_per_pixel: elements_per_group,
            pixels_per_group
        }
    }

    fn elements(&self, pixels: usize) -> usize {
        pixels * self.elements_per_pixel / self.pixels_per_group
    }
}

impl<T: Copy + Sync> RowKernel<T, T> for CopyRow {
    fn source_elements(&self, pixels: usize) -> usize {
        self.elements(pixels)
    }

    fn target_elements(&self, pixels: usize) -> usize {
        self.elements(pixels)
    }

    fn convert_row(&self, source: &[T], target: &mut [T], pixels: usize) {
        let length = self.elements(pixels);
        target[..length].copy_from_slice(&source[..length]);
    }
}

/// Reverse the pixel order of a row whose pixels are `CHANNELS` elements each
///
/// The middle pixel of an odd length row stays in place
pub fn reverse_row_pixels<T: Copy, const CHANNELS: usize>(row: &mut [T], pixels: usize) {
    let row = &mut row[..pixels * CHANNELS];
    let (left, right) = row.split_at_mut((pixels / 2) * CHANNELS);

    for (l, r) in left
        .chunks_exact_mut(CHANNELS)
        .zip(right.rchunks_exact_mut(CHANNELS))
    {
        l.swap_with_slice(r);
    }
}

/// Convert a single plane frame from one pixel format to another
///
/// # Arguments
/// - source: Source elements, row `y` starts at `y * source_stride_elements`
/// - target: Target elements, row `y` starts at `y * target_stride_elements`
/// - width: Width in pixels, at least 1
/// - height: Height in rows, at least 1
/// - source_stride_elements: Source row length plus source padding
/// - target_stride_elements: Target row length plus target padding
/// - flag: Orientation of the target relative to the source
/// - row_kernel: Converts one row
/// - reverse_row: Reverses one target row, required if `flag` mirrors
/// - are_continuous: Whether neither buffer has padding, allows converting
///   whole blocks of rows in one kernel call
/// - worker: Optional worker, `None` runs on the calling thread
///
/// Only the active elements of target rows are written.
///
/// Preconditions are checked with debug assertions only.
#[allow(clippy::too_many_arguments)]
pub fn convert_generic_pixel_format<S, T, K>(
    source: &[S], target: &mut [T], width: usize, height: usize, source_stride_elements: usize,
    target_stride_elements: usize, flag: ConversionFlag, row_kernel: &K,
    reverse_row: Option<RowReverseFunction<T>>, are_continuous: bool, worker: Option<&Worker>
) where
    S: Sync,
    T: Send,
    K: RowKernel<S, T> + ?Sized
{
    let source_row = row_kernel.source_elements(width);
    let target_row = row_kernel.target_elements(width);

    debug_assert!(width >= 1 && height >= 1);
    debug_assert!(source_stride_elements >= source_row);
    debug_assert!(target_stride_elements >= target_row);
    debug_assert!(source.len() >= source_stride_elements * (height - 1) + source_row);
    debug_assert!(target.len() >= target_stride_elements * (height - 1) + target_row);
    debug_assert!(!flag.is_mirrored() || reverse_row.is_some());
    debug_assert!(
        !are_continuous
            || (source_stride_elements == source_row && target_stride_elements == target_row)
    );

    let collapse = are_continuous && flag == ConversionFlag::Normal;

    let convert_rows = |block: &mut [T], first_row: usize, rows: usize| {
        if collapse {
            // rows follow each other, treat them as one long row
            let start = first_row * source_stride_elements;
            let end = start + rows * source_row;
            row_kernel.convert_row(&source[start..end], block, width * rows);
            return;
        }
        for (y, target_data) in block
            .chunks_mut(target_stride_elements)
            .take(rows)
            .enumerate()
        {
            let target_y = first_row + y;
            let source_y = if flag.is_flipped() {
                height - 1 - target_y
            } else {
                target_y
            };
            let start = source_y * source_stride_elements;
            let target_data = &mut target_data[..target_row];

            row_kernel.convert_row(&source[start..start + source_row], target_data, width);

            if flag.is_mirrored() {
                if let Some(reverse) = reverse_row {
                    reverse(target_data, width);
                }
            }
        }
    };

    execute_rows(worker, target, target_stride_elements, height, convert_rows);
}

/// Convert a frame stored in `PLANES` separate planes into a single
/// interleaved plane
///
/// Same contract as [`convert_generic_pixel_format`], with one source slice
/// and stride per plane.
#[allow(clippy::too_many_arguments)]
pub fn convert_planes_to_interleaved<S, T, K, const PLANES: usize>(
    sources: [&[S]; PLANES], target: &mut [T], width: usize, height: usize,
    source_strides_elements: [usize; PLANES], target_stride_elements: usize,
    flag: ConversionFlag, row_kernel: &K, reverse_row: Option<RowReverseFunction<T>>,
    worker: Option<&Worker>
) where
    S: Sync,
    T: Send,
    K: PlanesRowKernel<S, T, PLANES> + ?Sized
{
    let source_row = row_kernel.source_elements(width);
    let target_row = row_kernel.target_elements(width);

    debug_assert!(width >= 1 && height >= 1);
    debug_assert!(target_stride_elements >= target_row);
    debug_assert!(target.len() >= target_stride_elements * (height - 1) + target_row);
    debug_assert!(!flag.is_mirrored() || reverse_row.is_some());
    debug_assert!(sources
        .iter()
        .zip(source_strides_elements.iter())
        .all(|(plane, stride)| *stride >= source_row
            && plane.len() >= stride * (height - 1) + source_row));

    let convert_rows = |block: &mut [T], first_row: usize, rows: usize| {
        for (y, target_data) in block
            .chunks_mut(target_stride_elements)
            .take(rows)
            .enumerate()
        {
            let target_y = first_row + y;
            let source_y = if flag.is_flipped() {
                height - 1 - target_y
            } else {
                target_y
            };
            let rows_in: [&[S]; PLANES] = core::array::from_fn(|plane| {
                let start = source_y * source_strides_elements[plane];
                &sources[plane][start..start + source_row]
            });
            let target_data = &mut target_data[..target_row];

            row_kernel.convert_row(rows_in, target_data, width);

            if flag.is_mirrored() {
                if let Some(reverse) = reverse_row {
                    reverse(target_data, width);
                }
            }
        }
    };

    execute_rows(worker, target, target_stride_elements, height, convert_rows);
}
