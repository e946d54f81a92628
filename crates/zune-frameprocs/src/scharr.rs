/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The Scharr operator
//!
//! Responses reach at most `16 * 255 = 4080` in magnitude, so `i8` output
//! divides by 32 and `u8` magnitudes divide by 16, rounding.
use crate::gradient::EdgeOperator;

/// Scharr kernels
///
/// # Example
/// ```
/// use zune_frameprocs::gradient::EdgeOperator;
/// use zune_frameprocs::scharr::Scharr;
///
/// // 3x3 Y8 image with a bright right column
/// let source = [0, 0, 255, 0, 0, 255, 0, 0, 255];
/// let mut target = [0_i16; 18];
///
/// Scharr::filter_horizontal_vertical::<i16, 1>(&source, &mut target, 3, 3, 0, 0, None);
/// // centre pixel, 0° and 90°
/// assert_eq!(&target[8..10], &[16 * 255, 0]);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct Scharr;

#[rustfmt::skip]
impl EdgeOperator for Scharr {
    const NAME: &'static str = "Scharr";

    // matrix
    //   -3, 0,  3,
    //  -10, 0, 10,
    //   -3, 0,  3
    const HORIZONTAL: [i32; 9] = [
         -3, 0,  3,
        -10, 0, 10,
         -3, 0,  3
    ];

    // matrix
    //  -3,-10,-3,
    //   0,  0, 0,
    //   3, 10, 3
    const VERTICAL: [i32; 9] = [
        -3, -10, -3,
         0,   0,  0,
         3,  10,  3
    ];

    // matrix
    //  -10,-3, 0,
    //   -3, 0, 3,
    //    0, 3, 10
    const DIAGONAL_45: [i32; 9] = [
        -10, -3,  0,
         -3,  0,  3,
          0,  3, 10
    ];

    // matrix
    //    0,-3,-10,
    //    3, 0, -3,
    //   10, 3,  0
    const DIAGONAL_135: [i32; 9] = [
         0, -3, -10,
         3,  0,  -3,
        10,  3,   0
    ];

    const NORMALIZATION: i32 = 32;
    const MAXIMUM_ABSOLUTE_NORMALIZATION: u32 = 16;
}
