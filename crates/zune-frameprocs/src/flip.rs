/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! In place flip (top-bottom) and mirror (left-right) of frames
//!
//! Conversions apply orientation while converting, these are for frames
//! that are already in the wanted format.
use zune_frame_core::data_type::DataType;
use zune_frame_core::log::warn;
use zune_frame_core::pixel_format::PixelFormat;

use crate::converter::{reverse_row_pixels, RowReverseFunction};
use crate::errors::FrameErrors;
use crate::frame::{Frame, Plane};
use crate::traits::Element;

/// Reverse function for rows of `plane` in `format`
///
/// Returns `None` if pixels of that plane can't be reordered, e.g. packed Y10
/// where pixels share bytes, or if the pixel spans an unusual number of elements.
pub fn row_reverse_function<T: Copy>(
    format: PixelFormat, plane: usize
) -> Option<RowReverseFunction<T>> {
    if !format.supports_mirror() {
        return None;
    }
    let function: RowReverseFunction<T> = match format.plane_row_elements(plane, 1) {
        1 => reverse_row_pixels::<T, 1>,
        2 => reverse_row_pixels::<T, 2>,
        3 => reverse_row_pixels::<T, 3>,
        4 => reverse_row_pixels::<T, 4>,
        6 => reverse_row_pixels::<T, 6>,
        8 => reverse_row_pixels::<T, 8>,
        12 => reverse_row_pixels::<T, 12>,
        16 => reverse_row_pixels::<T, 16>,
        _ => return None
    };
    Some(function)
}

/// Whether every plane of `format` can be mirrored
pub fn can_mirror(format: PixelFormat) -> bool {
    (0..format.num_planes()).all(|plane| row_reverse_function::<u8>(format, plane).is_some())
}

fn flip_plane(plane: &mut Plane) {
    let height = plane.height();
    let size = plane.data_type().size_of();
    let stride = plane.stride_elements() * size;
    let row = plane.row_elements() * size;
    let data = plane.as_bytes_mut();

    for y in 0..height / 2 {
        let (top, bottom) = data.split_at_mut((height - 1 - y) * stride);
        top[y * stride..y * stride + row].swap_with_slice(&mut bottom[..row]);
    }
}

fn mirror_plane<T: Element>(
    plane: &mut Plane, reverse: RowReverseFunction<T>, width: usize
) -> Result<(), FrameErrors> {
    let stride = plane.stride_elements();
    let row = plane.row_elements();

    for data in plane.data_mut::<T>()?.chunks_mut(stride) {
        reverse(&mut data[..row], width);
    }
    Ok(())
}

/// Reverse the row order of every plane, padding stays where it is
pub fn flip(frame: &mut Frame) {
    for plane in frame.planes_mut() {
        flip_plane(plane);
    }
}

/// Reverse the pixel order of every row, padding stays where it is
///
/// # Errors
/// [`FrameErrors::UnsupportedFormat`] if pixels of the format can't be reordered
pub fn mirror(frame: &mut Frame) -> Result<(), FrameErrors> {
    let format = frame.format();
    let width = frame.width();

    if !can_mirror(format) {
        warn!("Cannot mirror {:?} frames", format);
        return Err(FrameErrors::UnsupportedFormat(format, "Mirror", &[]));
    }
    for (index, plane) in frame.planes_mut().iter_mut().enumerate() {
        // can_mirror confirmed every plane has a reverse function
        let missing = FrameErrors::GenericStr("No reverse function for plane");

        match format.data_type() {
            DataType::U8 => {
                let reverse = row_reverse_function::<u8>(format, index).ok_or(missing)?;
                mirror_plane(plane, reverse, width)?;
            }
            DataType::I8 => {
                let reverse = row_reverse_function::<i8>(format, index).ok_or(missing)?;
                mirror_plane(plane, reverse, width)?;
            }
            DataType::U16 => {
                let reverse = row_reverse_function::<u16>(format, index).ok_or(missing)?;
                mirror_plane(plane, reverse, width)?;
            }
            DataType::I16 => {
                let reverse = row_reverse_function::<i16>(format, index).ok_or(missing)?;
                mirror_plane(plane, reverse, width)?;
            }
        }
    }
    Ok(())
}
