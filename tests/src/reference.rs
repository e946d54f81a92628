/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Slow, obvious versions of the engine's routines
use std::collections::VecDeque;

/// Expand an `n` bit value to 8 bits by replicating its low bits
pub fn expand(value: u16, bits: u32) -> u8 {
    let shift = 8 - bits;
    ((value << shift) | (value & ((1 << shift) - 1))) as u8
}

/// (r, g, b) of a 565 value, red in the high bits when `red_high`
pub fn rgb_from_565(value: u16, red_high: bool) -> [u8; 3] {
    let high = expand(value >> 11, 5);
    let green = expand((value >> 5) & 0x3F, 6);
    let low = expand(value & 0x1F, 5);

    if red_high {
        [high, green, low]
    } else {
        [low, green, high]
    }
}

pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((38 * u32::from(r) + 75 * u32::from(g) + 15 * u32::from(b) + 64) >> 7) as u8
}

/// The four pixels of a packed Y10 group
pub fn unpack_y10(group: &[u8]) -> [u16; 4] {
    let low = group[4];
    [
        (u16::from(group[0]) << 2) | u16::from(low & 3),
        (u16::from(group[1]) << 2) | u16::from((low >> 2) & 3),
        (u16::from(group[2]) << 2) | u16::from((low >> 4) & 3),
        (u16::from(group[3]) << 2) | u16::from(low >> 6)
    ]
}

/// Scharr responses at (x, y) of a Y8 image, order 0°, 90°, 45°, 135°
#[rustfmt::skip]
pub fn scharr(image: &[u8], stride: usize, x: usize, y: usize) -> [i32; 4] {
    let p = |dx: usize, dy: usize| i32::from(image[(y + dy - 1) * stride + x + dx - 1]);

    let horizontal = 3 * (p(2, 0) - p(0, 0)) + 10 * (p(2, 1) - p(0, 1)) + 3 * (p(2, 2) - p(0, 2));
    let vertical = 3 * (p(0, 2) - p(0, 0)) + 10 * (p(1, 2) - p(1, 0)) + 3 * (p(2, 2) - p(2, 0));
    let diagonal_45 = 10 * (p(2, 2) - p(0, 0)) + 3 * (p(1, 2) - p(1, 0)) + 3 * (p(2, 1) - p(0, 1));
    let diagonal_135 = 10 * (p(0, 2) - p(2, 0)) + 3 * (p(1, 2) - p(1, 0)) + 3 * (p(0, 1) - p(2, 1));

    [horizontal, vertical, diagonal_45, diagonal_135]
}

/// Canny edge map, 255 for edges, no padding in the output
pub fn canny(
    image: &[u8], width: usize, height: usize, stride: usize, low: u16, high: u16,
    normalized: bool
) -> Vec<u8> {
    let mut magnitude = vec![0_i32; width * height];
    let mut direction = vec![0_usize; width * height];

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let responses = scharr(image, stride, x, y);
            let mut best = 0;
            for (d, response) in responses.iter().enumerate() {
                let value = if normalized { response / 32 } else { *response }.abs();
                if value > best {
                    best = value;
                    direction[y * width + x] = d;
                }
            }
            magnitude[y * width + x] = best;
        }
    }
    // 0 none, 1 weak, 2 strong
    let mut state = vec![0_u8; width * height];
    let (low, high) = (i32::from(low), i32::from(high));

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let m = magnitude[y * width + x];
            if m <= low {
                continue;
            }
            let at = |dx: i64, dy: i64| {
                magnitude[(y as i64 + dy) as usize * width + (x as i64 + dx) as usize]
            };
            let (a, b) = match direction[y * width + x] {
                0 => (at(-1, 0), at(1, 0)),
                1 => (at(0, -1), at(0, 1)),
                2 => (at(-1, -1), at(1, 1)),
                _ => (at(1, -1), at(-1, 1))
            };
            if m > a && m >= b {
                state[y * width + x] = if m > high { 2 } else { 1 };
            }
        }
    }
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
    for y in 0..height {
        for x in 0..width {
            if state[y * width + x] == 2 {
                queue.push_back((x, y));
            }
        }
    }
    while let Some((x, y)) = queue.pop_front() {
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                if state[ny * width + nx] == 1 {
                    state[ny * width + nx] = 2;
                    queue.push_back((nx, ny));
                }
            }
        }
    }
    state
        .iter()
        .map(|s| if *s == 2 { 255 } else { 0 })
        .collect()
}
