/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_frame_core::conversion_flag::ConversionFlag;
use zune_frame_core::options::ConverterOptions;
use zune_frame_core::pixel_format::PixelFormat;
use zune_frameprocs::converter::{Convert, FrameConverter};
use zune_frameprocs::frame::Frame;
use zune_frameprocs::traits::FrameOperation;
use zune_frameprocs::worker::Worker;

use crate::{random_bytes, random_words, reference};

fn convert(frame: &Frame, to: PixelFormat) -> Vec<u8> {
    let safe = FrameConverter::new(ConverterOptions::new_safe())
        .convert(frame, to, ConversionFlag::Normal, None)
        .unwrap();
    let fast = FrameConverter::new(ConverterOptions::new_fast())
        .convert(frame, to, ConversionFlag::Normal, Some(&Worker::new(3)))
        .unwrap();
    assert_eq!(safe, fast, "{:?} -> {to:?}", frame.format());

    safe.plane(0).unwrap().data::<u8>().unwrap().to_vec()
}

#[test]
fn test_565_against_reference() {
    let (width, height) = (67, 9);
    let data = random_words(width * height, 565);

    for (format, red_high) in [(PixelFormat::RGB565, false), (PixelFormat::BGR565, true)] {
        let frame = Frame::from_data(format, width, height, 0, &data).unwrap();

        let rgb = convert(&frame, PixelFormat::RGB24);
        let bgr = convert(&frame, PixelFormat::BGR24);
        let y8 = convert(&frame, PixelFormat::Y8);

        for (i, value) in data.iter().enumerate() {
            let [r, g, b] = reference::rgb_from_565(*value, red_high);
            assert_eq!(&rgb[i * 3..i * 3 + 3], &[r, g, b], "{format:?} {value:#06x}");
            assert_eq!(&bgr[i * 3..i * 3 + 3], &[b, g, r], "{format:?} {value:#06x}");
            assert_eq!(y8[i], reference::luma(r, g, b), "{format:?} {value:#06x}");
        }
    }
}

#[test]
fn test_bgr565_scenarios() {
    let zeros = Frame::from_data::<u16>(PixelFormat::BGR565, 8, 8, 0, &[0; 64]).unwrap();
    assert!(convert(&zeros, PixelFormat::BGR24).iter().all(|x| *x == 0));

    let ones = Frame::from_data::<u16>(PixelFormat::BGR565, 8, 8, 0, &[0xFFFF; 64]).unwrap();
    assert!(convert(&ones, PixelFormat::BGR24).iter().all(|x| *x == 0xFF));

    // first named channel in the five low bits
    let blue = Frame::from_data::<u16>(PixelFormat::BGR565, 1, 1, 0, &[0x001F]).unwrap();
    assert_eq!(convert(&blue, PixelFormat::BGR24), [0xFF, 0, 0]);
    assert_eq!(convert(&blue, PixelFormat::RGB24), [0, 0, 0xFF]);

    let red = Frame::from_data::<u16>(PixelFormat::BGR565, 1, 1, 0, &[0xF800]).unwrap();
    assert_eq!(convert(&red, PixelFormat::BGR24), [0, 0, 0xFF]);
}

#[test]
fn test_rgb565_red_in_low_bits() {
    let red = Frame::from_data::<u16>(PixelFormat::RGB565, 1, 1, 0, &[0x001F]).unwrap();
    assert_eq!(convert(&red, PixelFormat::RGB24), [0xFF, 0, 0]);
    assert_eq!(convert(&red, PixelFormat::BGR24), [0, 0, 0xFF]);
    assert_eq!(convert(&red, PixelFormat::Y8), [reference::luma(0xFF, 0, 0)]);

    let green = Frame::from_data::<u16>(PixelFormat::RGB565, 1, 1, 0, &[0x07E0]).unwrap();
    assert_eq!(convert(&green, PixelFormat::RGB24), [0, 0xFF, 0]);
}

#[test]
fn test_rgba64_keeps_high_byte() {
    let (width, height) = (21, 5);
    let data = random_words(width * height * 4, 64);
    let frame = Frame::from_data(PixelFormat::RGBA64, width, height, 0, &data).unwrap();

    let rgba = convert(&frame, PixelFormat::RGBA32);
    let bgra = convert(&frame, PixelFormat::BGRA32);
    let rgb = convert(&frame, PixelFormat::RGB24);

    for (i, pixel) in data.chunks_exact(4).enumerate() {
        let high = <[u16; 4]>::try_from(pixel).unwrap().map(|x| (x >> 8) as u8);
        assert_eq!(&rgba[i * 4..i * 4 + 4], &high);
        assert_eq!(&bgra[i * 4..i * 4 + 4], &[high[2], high[1], high[0], high[3]]);
        assert_eq!(&rgb[i * 3..i * 3 + 3], &high[..3]);
    }
}

#[test]
fn test_gray_narrowing() {
    let data = random_words(64, 10);

    let y16 = Frame::from_data(PixelFormat::Y16, 8, 8, 0, &data).unwrap();
    let out = convert(&y16, PixelFormat::Y8);
    assert!(out.iter().zip(&data).all(|(a, b)| u16::from(*a) == b >> 8));

    let y10 = Frame::from_data(PixelFormat::Y10, 8, 8, 0, &data).unwrap();
    let out = convert(&y10, PixelFormat::Y8);
    assert!(out
        .iter()
        .zip(&data)
        .all(|(a, b)| u16::from(*a) == (b >> 2).min(255)));
}

#[test]
fn test_packed_y10_against_reference() {
    let (width, height) = (16, 3);
    let data = random_bytes(width * 5 / 4 * height, 10);
    let frame = Frame::from_data(PixelFormat::Y10Packed, width, height, 0, &data).unwrap();

    let y8 = convert(&frame, PixelFormat::Y8);
    let rgb = convert(&frame, PixelFormat::RGB24);
    let y10 = FrameConverter::default()
        .convert(&frame, PixelFormat::Y10, ConversionFlag::Normal, None)
        .unwrap();
    let y10 = y10.plane(0).unwrap().data::<u16>().unwrap();

    for (g, group) in data.chunks_exact(5).enumerate() {
        let pixels = reference::unpack_y10(group);
        for (p, value) in pixels.iter().enumerate() {
            let i = g * 4 + p;
            assert_eq!(y10[i], *value);
            assert_eq!(y8[i], group[p]);
            assert_eq!(&rgb[i * 3..i * 3 + 3], &[group[p]; 3]);
        }
    }
}

#[test]
fn test_packed_y10_gamma_against_curve() {
    let (width, height) = (32, 4);
    let data = random_bytes(width * 5 / 4 * height, 11);
    let frame = Frame::from_data(PixelFormat::Y10Packed, width, height, 0, &data).unwrap();

    for gamma in [0.3_f32, 0.8, 1.2, 1.6] {
        let options = ConverterOptions::default().set_gamma(gamma);
        // three chords only track moderate curves closely
        let approximation_bound = if (0.7..=1.3).contains(&gamma) { 13.0 } else { 64.0 };
        let exact = FrameConverter::new(options)
            .convert(&frame, PixelFormat::Y8, ConversionFlag::Normal, Some(&Worker::new(2)))
            .unwrap();
        let approximated = FrameConverter::new(options.set_allow_approximation(true))
            .convert(&frame, PixelFormat::Y8, ConversionFlag::Flipped, None)
            .unwrap();
        let exact = exact.plane(0).unwrap().data::<u8>().unwrap();
        let approximated = approximated.plane(0).unwrap().data::<u8>().unwrap();

        for (g, group) in data.chunks_exact(5).enumerate() {
            for (p, value) in reference::unpack_y10(group).iter().enumerate() {
                let (x, y) = ((g * 4 + p) % width, (g * 4 + p) / width);
                let expected = 255.0 * (f64::from(*value) / 1023.0).powf(f64::from(gamma));

                let out = exact[y * width + x];
                assert!(
                    (f64::from(out) - expected).abs() <= 0.501,
                    "gamma={gamma} value={value} out={out}"
                );
                let flipped = approximated[(height - 1 - y) * width + x];
                assert!(
                    (f64::from(flipped) - expected).abs() <= approximation_bound,
                    "gamma={gamma} value={value} out={flipped}"
                );
            }
        }
    }
}

#[test]
fn test_packed_y10_gamma_out_of_range() {
    let frame = Frame::new(PixelFormat::Y10Packed, 8, 2).unwrap();
    for gamma in [0.0_f32, 2.0, -1.0, f32::NAN] {
        let converter = FrameConverter::new(ConverterOptions::default().set_gamma(gamma));
        assert!(converter
            .convert(&frame, PixelFormat::Y8, ConversionFlag::Normal, None)
            .is_err());
    }
    // gamma only concerns the narrowing to Y8
    let converter = FrameConverter::new(ConverterOptions::default().set_gamma(5.0));
    assert!(converter
        .convert(&frame, PixelFormat::Y10, ConversionFlag::Normal, None)
        .is_ok());
}

#[test]
fn test_gray_alpha_expands() {
    let data: Vec<u8> = vec![10, 200, 20, 100, 30, 0];
    let frame = Frame::from_data(PixelFormat::YA16, 3, 1, 0, &data).unwrap();

    assert_eq!(
        convert(&frame, PixelFormat::RGBA32),
        [10, 10, 10, 200, 20, 20, 20, 100, 30, 30, 30, 0]
    );
    assert_eq!(convert(&frame, PixelFormat::Y8), [10, 20, 30]);
}

#[test]
fn test_convert_operation_orientation() {
    let data: Vec<u8> = (0..12).collect();
    let frame = Frame::from_data(PixelFormat::Y8, 4, 3, 0, &data).unwrap();

    let out = Convert::new(PixelFormat::Y8, ConversionFlag::FlippedAndMirrored)
        .execute(&frame, None)
        .unwrap();
    let out = out.plane(0).unwrap().data::<u8>().unwrap().to_vec();
    let expected: Vec<u8> = (0..12).rev().collect();
    assert_eq!(out, expected);

    let out = Convert::new(PixelFormat::RGB24, ConversionFlag::Flipped)
        .execute(&frame, None)
        .unwrap();
    assert_eq!(
        out.plane(0).unwrap().row::<u8>(0).unwrap(),
        &[8, 8, 8, 9, 9, 9, 10, 10, 10, 11, 11, 11]
    );
}
