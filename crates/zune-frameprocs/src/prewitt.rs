/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The Prewitt operator
use crate::gradient::EdgeOperator;

/// Prewitt kernels
///
/// Responses reach at most `3 * 255 = 765` in magnitude, `i8` output
/// divides by 6 and `u8` magnitudes divide by 3.
#[derive(Copy, Clone, Debug, Default)]
pub struct Prewitt;

#[rustfmt::skip]
impl EdgeOperator for Prewitt {
    const NAME: &'static str = "Prewitt";

    const HORIZONTAL: [i32; 9] = [
        -1, 0, 1,
        -1, 0, 1,
        -1, 0, 1
    ];

    const VERTICAL: [i32; 9] = [
        -1, -1, -1,
         0,  0,  0,
         1,  1,  1
    ];

    const DIAGONAL_45: [i32; 9] = [
        -1, -1, 0,
        -1,  0, 1,
         0,  1, 1
    ];

    const DIAGONAL_135: [i32; 9] = [
        0, -1, -1,
        1,  0, -1,
        1,  1,  0
    ];

    const NORMALIZATION: i32 = 6;
    const MAXIMUM_ABSOLUTE_NORMALIZATION: u32 = 3;
}
