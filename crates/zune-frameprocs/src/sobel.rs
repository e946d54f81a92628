/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The Sobel operator
use crate::gradient::EdgeOperator;

/// Sobel kernels
///
/// Responses reach at most `4 * 255 = 1020` in magnitude, `i8` output
/// divides by 8 and `u8` magnitudes divide by 4.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sobel;

#[rustfmt::skip]
impl EdgeOperator for Sobel {
    const NAME: &'static str = "Sobel";

    // matrix
    //  -1, 0, 1,
    //  -2, 0, 2,
    //  -1, 0, 1
    const HORIZONTAL: [i32; 9] = [
        -1, 0, 1,
        -2, 0, 2,
        -1, 0, 1
    ];

    // matrix
    //  -1,-2,-1,
    //   0, 0, 0,
    //   1, 2, 1
    const VERTICAL: [i32; 9] = [
        -1, -2, -1,
         0,  0,  0,
         1,  2,  1
    ];

    const DIAGONAL_45: [i32; 9] = [
        -2, -1, 0,
        -1,  0, 1,
         0,  1, 2
    ];

    const DIAGONAL_135: [i32; 9] = [
        0, -1, -2,
        1,  0, -1,
        2,  1,  0
    ];

    const NORMALIZATION: i32 = 8;
    const MAXIMUM_ABSOLUTE_NORMALIZATION: u32 = 4;
}
