/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_frame_core::pixel_format::PixelFormat;
use zune_frameprocs::frame::Frame;
use zune_frameprocs::gradient::{EdgeFilter, EdgeOperator, FilterMode, ResponseType};
use zune_frameprocs::prewitt::Prewitt;
use zune_frameprocs::scharr::Scharr;
use zune_frameprocs::sobel::Sobel;
use zune_frameprocs::traits::FrameOperation;
use zune_frameprocs::worker::Worker;

use crate::{random_bytes, reference, synthetic_y8};

#[test]
fn test_scharr_against_reference() {
    for (width, height) in [(3, 3), (4, 7), (64, 33), (101, 5)] {
        let source = synthetic_y8(width, height, 0, 17, 80);
        let frame = Frame::from_data(PixelFormat::Y8, width, height, 0, &source).unwrap();
        let worker = Worker::new(4).set_minimal_rows(1);

        let raw = EdgeFilter::<Scharr>::new(FilterMode::All, ResponseType::Raw)
            .execute(&frame, Some(&worker))
            .unwrap();
        let raw = raw.plane(0).unwrap().data::<i16>().unwrap().to_vec();

        let normalized = EdgeFilter::<Scharr>::new(FilterMode::All, ResponseType::Normalized)
            .execute(&frame, Some(&worker))
            .unwrap();
        let normalized = normalized.plane(0).unwrap().data::<i8>().unwrap().to_vec();

        for y in 0..height {
            for x in 0..width {
                let index = (y * width + x) * 4;
                let expected = if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    [0; 4]
                } else {
                    reference::scharr(&source, width, x, y)
                };
                for o in 0..4 {
                    assert_eq!(i32::from(raw[index + o]), expected[o], "{width}x{height} ({x},{y})");
                    assert_eq!(i32::from(normalized[index + o]), expected[o] / 32);
                }
            }
        }
    }
}

fn check_borders<O: EdgeOperator>() {
    for (width, height) in [(3, 3), (3, 9), (9, 3), (17, 12)] {
        for format in [PixelFormat::Y8, PixelFormat::YA16, PixelFormat::RGB24, PixelFormat::BGRA32] {
            let channels = format.num_channels();
            let data = random_bytes(width * height * channels, (width * height) as u64);
            let frame = Frame::from_data(format, width, height, 0, &data).unwrap();

            for mode in [
                FilterMode::HorizontalVertical,
                FilterMode::Diagonal,
                FilterMode::All,
                FilterMode::HorizontalVerticalMaximumAbsolute,
                FilterMode::MaximumAbsolute
            ] {
                let output = EdgeFilter::<O>::new(mode, ResponseType::Raw)
                    .execute(&frame, None)
                    .unwrap();
                let plane = output.plane(0).unwrap();
                let bytes = plane.as_bytes();
                let pixel = channels * mode.outputs_per_channel() * 2;

                for y in 0..height {
                    for x in 0..width {
                        if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                            let start = (y * width + x) * pixel;
                            assert!(
                                bytes[start..start + pixel].iter().all(|b| *b == 0),
                                "{} {format:?} {mode:?} ({x},{y})",
                                O::NAME
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_border_zeroing() {
    check_borders::<Scharr>();
    check_borders::<Sobel>();
    check_borders::<Prewitt>();
}

#[test]
fn test_filter_target_padding_untouched() {
    let (width, height) = (13, 11);
    let source = synthetic_y8(width, height, 4, 2, 50);
    let frame = Frame::from_data(PixelFormat::Y8, width, height, 4, &source).unwrap();
    let filter = EdgeFilter::<Sobel>::new(FilterMode::HorizontalVertical, ResponseType::Normalized);

    let format = filter.output_format(PixelFormat::Y8).unwrap();
    let mut target = Frame::new_with_padding(format, width, height, 3).unwrap();
    target.plane_mut(0).unwrap().fill(0x5A_i8).unwrap();

    filter.filter_into(&frame, &mut target, None).unwrap();

    let data = target.plane(0).unwrap().data::<i8>().unwrap();
    let stride = width * 2 + 3;
    for row in data.chunks(stride) {
        assert!(row[width * 2..].iter().all(|x| *x == 0x5A));
    }
}
