/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_frame_core::pixel_format::PixelFormat;
use zune_frameprocs::canny::{canny_filter, Canny};
use zune_frameprocs::frame::Frame;
use zune_frameprocs::gradient::ResponseType;
use zune_frameprocs::traits::FrameOperation;
use zune_frameprocs::worker::Worker;

use crate::{canny_cases, reference, synthetic_y8, CannyCase, JsonResponse};

fn run_case(case: &CannyCase, worker: Option<&Worker>) -> Vec<u8> {
    let source = synthetic_y8(case.width, case.height, case.padding, case.seed, case.noise);
    let stride = case.width + case.padding;
    let mut target = vec![0xA5_u8; stride * case.height];

    match case.response {
        JsonResponse::Normalized => canny_filter::<i8>(
            &source, &mut target, case.width, case.height, case.padding, case.padding, case.low,
            case.high, worker
        ),
        JsonResponse::Raw => canny_filter::<i16>(
            &source, &mut target, case.width, case.height, case.padding, case.padding, case.low,
            case.high, worker
        )
    }
    target
}

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_canny_against_reference() {
    let mut errors = Vec::new();

    for case in canny_cases() {
        let stride = case.width + case.padding;
        let source = synthetic_y8(case.width, case.height, case.padding, case.seed, case.noise);
        let expected = reference::canny(
            &source,
            case.width,
            case.height,
            stride,
            case.low,
            case.high,
            case.response == JsonResponse::Normalized
        );
        let found = run_case(&case, None);

        let mut mismatches = 0;
        for y in 0..case.height {
            let row = &found[y * stride..(y + 1) * stride];
            assert!(
                row[case.width..].iter().all(|x| *x == 0xA5),
                "padding touched in {}",
                case.name
            );
            for x in 0..case.width {
                if x == 0 || y == 0 || x == case.width - 1 || y == case.height - 1 {
                    assert_eq!(row[x], 0, "border pixel set in {}", case.name);
                }
                if row[x] != expected[y * case.width + x] {
                    mismatches += 1;
                }
            }
        }
        // at most 0.1% of pixels
        if mismatches * 1000 > case.width * case.height {
            errors.push(format!(
                "{}: {} of {} pixels differ\nConfig:{:#?}",
                case.name,
                mismatches,
                case.width * case.height,
                case
            ));
        }
    }
    if !errors.is_empty() {
        panic!("Canny mismatches\n{:#?}", errors);
    }
}

#[test]
fn test_canny_thread_count_invariant() {
    for case in canny_cases() {
        let single = run_case(&case, None);

        for threads in [2, 3, 8] {
            let worker = Worker::new(threads).set_minimal_rows(1);
            assert_eq!(
                single,
                run_case(&case, Some(&worker)),
                "{} with {threads} threads",
                case.name
            );
        }
    }
}

#[test]
fn test_canny_flat_frames() {
    for value in [0_u8, 1, 128, 255] {
        let frame = Frame::from_data(PixelFormat::Y8, 40, 30, 0, &vec![value; 40 * 30]).unwrap();

        for (low, high, response) in [
            (0, 1, ResponseType::Normalized),
            (0, 127, ResponseType::Normalized),
            (0, 1, ResponseType::Raw),
            (2000, 4080, ResponseType::Raw)
        ] {
            let edges = Canny::new(low, high, response).execute(&frame, None).unwrap();
            let data = edges.plane(0).unwrap().data::<u8>().unwrap();
            assert!(data.iter().all(|x| *x == 0));
        }
    }
}

#[test]
fn test_canny_from_packed_formats() {
    let (width, height) = (48, 32);
    let gray = synthetic_y8(width, height, 0, 9, 0);

    // equal 5 bit fields for every channel
    let packed: Vec<u16> = gray
        .iter()
        .map(|x| {
            let five = u16::from(*x >> 3);
            (five << 11) | (five << 6) | five
        })
        .collect();
    let luma: Vec<u8> = packed
        .iter()
        .map(|v| {
            let [r, g, b] = reference::rgb_from_565(*v, false);
            reference::luma(r, g, b)
        })
        .collect();

    let canny = Canny::new(8, 24, ResponseType::Normalized);
    let from_y8 = canny
        .execute(&Frame::from_data(PixelFormat::Y8, width, height, 0, &luma).unwrap(), None)
        .unwrap();
    let from_565 = canny
        .execute(
            &Frame::from_data(PixelFormat::RGB565, width, height, 0, &packed).unwrap(),
            None
        )
        .unwrap();
    assert_eq!(from_y8, from_565);
    assert!(from_565.plane(0).unwrap().data::<u8>().unwrap().contains(&255));
}
