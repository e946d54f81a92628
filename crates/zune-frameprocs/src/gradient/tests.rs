/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(test)]

use nanorand::Rng;
use zune_frame_core::data_type::DataType;
use zune_frame_core::pixel_format::PixelFormat;

use crate::gradient::{
    filter_maximum_responses, filter_responses, EdgeFilter, EdgeOperator, FilterMode,
    ResponseType, ALL_ORIENTATIONS
};
use crate::frame::Frame;
use crate::prewitt::Prewitt;
use crate::scharr::Scharr;
use crate::sobel::Sobel;
use crate::traits::FrameOperation;
use crate::worker::Worker;

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = nanorand::WyRand::new_seed(seed);
    let mut data = vec![0; len];
    rng.fill(&mut data);
    data
}

/// Response of `kernel` at (x, y) for channel `c`, without normalization
fn naive<const CHANNELS: usize>(
    source: &[u8], stride: usize, x: usize, y: usize, c: usize, kernel: &[i32; 9]
) -> i32 {
    let mut sum = 0;
    for dy in 0..3 {
        for dx in 0..3 {
            let value = source[(y + dy - 1) * stride + (x + dx - 1) * CHANNELS + c];
            sum += i32::from(value) * kernel[dy * 3 + dx];
        }
    }
    sum
}

fn check_operator<O: EdgeOperator, const CHANNELS: usize>() {
    let (width, height, source_padding, target_padding) = (13, 9, 3, 5);
    let source_stride = width * CHANNELS + source_padding;
    let target_stride = width * CHANNELS * 4 + target_padding;
    let source = random_bytes(source_stride * height, 7 + CHANNELS as u64);

    let mut raw = vec![i16::MAX; target_stride * height];
    let mut normalized = vec![i8::MAX; target_stride * height];

    filter_responses::<O, i16, CHANNELS, 4>(
        &source, &mut raw, width, height, source_padding, target_padding, ALL_ORIENTATIONS, None
    );
    filter_responses::<O, i8, CHANNELS, 4>(
        &source, &mut normalized, width, height, source_padding, target_padding, ALL_ORIENTATIONS,
        None
    );

    for y in 0..height {
        let row = &raw[y * target_stride..(y + 1) * target_stride];
        assert!(row[width * CHANNELS * 4..].iter().all(|x| *x == i16::MAX));

        for x in 0..width {
            for c in 0..CHANNELS {
                for (o, orientation) in ALL_ORIENTATIONS.iter().enumerate() {
                    let index = y * target_stride + (x * CHANNELS + c) * 4 + o;

                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        assert_eq!(raw[index], 0);
                        assert_eq!(normalized[index], 0);
                        continue;
                    }
                    let sum = naive::<CHANNELS>(
                        &source, source_stride, x, y, c, &orientation.kernel::<O>()
                    );
                    assert_eq!(i32::from(raw[index]), sum, "{} {x} {y}", O::NAME);
                    assert_eq!(i32::from(normalized[index]), sum / O::NORMALIZATION);
                }
            }
        }
    }
}

#[test]
fn test_responses_match_naive_kernels() {
    check_operator::<Scharr, 1>();
    check_operator::<Scharr, 3>();
    check_operator::<Sobel, 2>();
    check_operator::<Sobel, 4>();
    check_operator::<Prewitt, 1>();
    check_operator::<Prewitt, 3>();
}

#[test]
fn test_maximum_absolute_matches_responses() {
    let (width, height) = (11, 8);
    let source = random_bytes(width * height, 3);

    let mut responses = vec![0_i16; width * height * 4];
    let mut magnitude = vec![0_u16; width * height];
    let mut rounded = vec![0_u8; width * height];

    Scharr::filter::<i16, 1>(&source, &mut responses, width, height, 0, 0, None);
    Scharr::filter_maximum_absolute::<u16, 1>(&source, &mut magnitude, width, height, 0, 0, None);
    Scharr::filter_maximum_absolute::<u8, 1>(&source, &mut rounded, width, height, 0, 0, None);

    for (i, pixel) in responses.chunks_exact(4).enumerate() {
        let maximum = pixel.iter().map(|x| x.unsigned_abs()).max().unwrap();
        assert_eq!(magnitude[i], maximum);
        assert_eq!(u32::from(rounded[i]), (u32::from(maximum) + 8) / 16);
    }
}

#[test]
fn test_every_border_is_zero() {
    let (width, height) = (6, 5);
    let source = vec![200_u8; width * height * 2];
    let mut target = vec![1_u8; width * height * 2];

    // a flat image has no gradient anywhere
    filter_maximum_responses::<Sobel, u8, 2, 4>(
        &source, &mut target, width, height, 0, 0, ALL_ORIENTATIONS, None
    );
    assert!(target.iter().all(|x| *x == 0));
}

#[test]
fn test_threads_match_single_thread() {
    let (width, height) = (31, 173);
    let source = random_bytes(width * height * 3, 11);
    let worker = Worker::new(4).set_minimal_rows(5);

    let mut single = vec![0_i16; width * height * 3 * 4];
    let mut threaded = vec![0_i16; width * height * 3 * 4];

    Scharr::filter::<i16, 3>(&source, &mut single, width, height, 0, 0, None);
    Scharr::filter::<i16, 3>(&source, &mut threaded, width, height, 0, 0, Some(&worker));
    assert_eq!(single, threaded);
}

#[test]
fn test_edge_filter_output_formats() {
    let frame = Frame::new(PixelFormat::BGRA32, 5, 4).unwrap();

    let cases = [
        (FilterMode::HorizontalVertical, ResponseType::Normalized, DataType::I8, 8),
        (FilterMode::Diagonal, ResponseType::Raw, DataType::I16, 8),
        (FilterMode::All, ResponseType::Raw, DataType::I16, 16),
        (FilterMode::HorizontalVerticalMaximumAbsolute, ResponseType::Raw, DataType::U16, 4),
        (FilterMode::MaximumAbsolute, ResponseType::Normalized, DataType::U8, 4)
    ];
    for (mode, response, data_type, channels) in cases {
        let output = EdgeFilter::<Prewitt>::new(mode, response)
            .execute(&frame, None)
            .unwrap();
        assert_eq!(output.format(), PixelFormat::generic(data_type, channels).unwrap());
        assert_eq!(output.dimensions(), (5, 4));
    }
}

#[test]
fn test_edge_filter_matches_direct_call() {
    let (width, height) = (9, 7);
    let data = random_bytes(width * height * 3, 5);
    let frame = Frame::from_data(PixelFormat::RGB24, width, height, 0, &data).unwrap();

    let output = EdgeFilter::<Sobel>::new(FilterMode::HorizontalVertical, ResponseType::Raw)
        .execute(&frame, None)
        .unwrap();

    let mut expected = vec![0_i16; width * height * 6];
    Sobel::filter_horizontal_vertical::<i16, 3>(&data, &mut expected, width, height, 0, 0, None);
    assert_eq!(output.plane(0).unwrap().data::<i16>().unwrap(), &expected[..]);
}

#[test]
fn test_edge_filter_keeps_target_padding() {
    let frame = Frame::from_data(PixelFormat::Y8, 4, 3, 0, &random_bytes(12, 1)).unwrap();
    let filter = EdgeFilter::<Scharr>::new(FilterMode::MaximumAbsolute, ResponseType::Raw);

    let format = filter.output_format(PixelFormat::Y8).unwrap();
    let mut target = Frame::new_with_padding(format, 4, 3, 2).unwrap();
    target.plane_mut(0).unwrap().fill(u16::MAX).unwrap();

    filter.filter_into(&frame, &mut target, None).unwrap();

    for y in 0..3 {
        let plane = target.plane(0).unwrap();
        let row = &plane.data::<u16>().unwrap()[y * 6..y * 6 + 6];
        assert_eq!(&row[4..], &[u16::MAX, u16::MAX]);
    }
}

#[test]
fn test_edge_filter_rejects_bad_input() {
    let filter = EdgeFilter::<Scharr>::new(FilterMode::All, ResponseType::Normalized);

    let small = Frame::new(PixelFormat::RGB24, 2, 8).unwrap();
    assert!(filter.execute(&small, None).is_err());

    let wide = Frame::new(PixelFormat::RGB565, 8, 8).unwrap();
    assert!(filter.execute(&wide, None).is_err());

    let signed = Frame::new(PixelFormat::generic(DataType::I8, 1).unwrap(), 8, 8).unwrap();
    assert!(filter.execute(&signed, None).is_err());

    let generic = Frame::new(PixelFormat::generic(DataType::U8, 2).unwrap(), 8, 8).unwrap();
    assert!(filter.execute(&generic, None).is_ok());
}
