/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Integration tests comparing the engine against straightforward
//! reference implementations
#![allow(dead_code)]

use std::fs::read;
use std::path::{Path, PathBuf};

use nanorand::Rng;
use serde::Deserialize;

mod canny;
mod conversion;
mod filters;
mod reference;
mod serde_formats;

#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum JsonResponse {
    Normalized,
    Raw
}

#[derive(Clone, Deserialize, Debug)]
pub struct CannyCase {
    pub name:     String,
    pub width:    usize,
    pub height:   usize,
    pub seed:     u64,
    /// Amplitude of the noise added on top of the shapes
    pub noise:    u8,
    pub low:      u16,
    pub high:     u16,
    pub response: JsonResponse,
    #[serde(default)]
    pub padding:  usize,
    pub comment:  Option<String>
}

pub fn cases_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("cases")
}

pub fn canny_cases() -> Vec<CannyCase> {
    let json = read(cases_path().join("canny.json")).unwrap();
    serde_json::from_slice(&json).unwrap()
}

/// Y8 test image with `padding` trailing elements per row set to 0xA5
///
/// A couple of rectangles and a disc on a gradient background, with
/// uniform noise of amplitude `noise` on top.
pub fn synthetic_y8(width: usize, height: usize, padding: usize, seed: u64, noise: u8) -> Vec<u8> {
    let mut rng = nanorand::WyRand::new_seed(seed);
    let stride = width + padding;
    let mut data = vec![0xA5_u8; stride * height];

    let (cx, cy) = (width as i64 / 2, height as i64 / 2);
    let radius = (width.min(height) as i64) / 4;

    for y in 0..height {
        for x in 0..width {
            let mut value = 40 + (x * 60 / width) as i32;

            if x > width / 8 && x < width / 3 && y > height / 8 && y < height / 2 {
                value = 190;
            }
            if x > 2 * width / 3 && y > height / 2 && y < 7 * height / 8 {
                value = 10;
            }
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            if dx * dx + dy * dy < radius * radius {
                value = 140;
            }
            if noise > 0 {
                value += i32::from(rng.generate_range(0..=noise)) - i32::from(noise / 2);
            }
            data[y * stride + x] = value.clamp(0, 255) as u8;
        }
    }
    data
}

pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut data = vec![0; len];
    nanorand::WyRand::new_seed(seed).fill(&mut data);
    data
}

pub fn random_words(len: usize, seed: u64) -> Vec<u16> {
    let mut data = vec![0; len];
    nanorand::WyRand::new_seed(seed).fill(&mut data);
    data
}
