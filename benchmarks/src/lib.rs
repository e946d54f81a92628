/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Shared inputs for the frame benchmarks

/// Benchmark frame dimensions, a 1080p frame
pub const WIDTH: usize = 1920;
pub const HEIGHT: usize = 1080;

/// Deterministic pseudo random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    use nanorand::Rng;

    let mut data = vec![0; len];
    nanorand::WyRand::new_seed(42).fill(&mut data);
    data
}

/// Smooth Y8 image with a few hard edges, closer to camera input than noise
pub fn smooth_y8(width: usize, height: usize) -> Vec<u8> {
    let mut data = vec![0; width * height];
    for (y, row) in data.chunks_exact_mut(width).enumerate() {
        for (x, pixel) in row.iter_mut().enumerate() {
            let mut value = ((x + y) * 255 / (width + height)) as u8;
            if (x / 64 + y / 64) % 3 == 0 {
                value = value.wrapping_add(90);
            }
            *pixel = value;
        }
    }
    data
}
