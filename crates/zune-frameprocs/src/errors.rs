/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible at the runtime dispatch boundary
//!
//! Direct kernels never fail, their preconditions are debug assertions.
//! Everything that picks a kernel at runtime returns these instead.
use std::fmt::{Debug, Display, Formatter};

use zune_frame_core::conversion_flag::ConversionFlag;
use zune_frame_core::data_type::DataType;
use zune_frame_core::pixel_format::PixelFormat;

/// All possible frame processing errors
pub enum FrameErrors {
    /// No conversion exists between the two formats
    UnsupportedConversion(PixelFormat, PixelFormat),
    /// The operation does not support the format
    ///
    /// Carries the offending format, the operation name and the formats
    /// the operation supports
    UnsupportedFormat(PixelFormat, &'static str, &'static [PixelFormat]),
    /// The conversion exists but can't honour the flag for that format
    UnsupportedFlag(PixelFormat, ConversionFlag),
    /// Expected length and found length differ
    DimensionsMisMatch(usize, usize),
    /// Width and height are unusable for the operation, (width, height, reason)
    InvalidDimensions(usize, usize, &'static str),
    /// A plane was read as a different element type than it stores,
    /// (expected, found)
    WrongDataType(DataType, DataType),
    /// Canny thresholds out of order or out of range, (low, high, maximum)
    InvalidThresholds(u16, u16, u16),
    /// Gamma outside (0, 2)
    InvalidGamma(f32),
    GenericStr(&'static str),
    GenericString(String)
}

impl Debug for FrameErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedConversion(from, to) => {
                writeln!(f, "No conversion from {from:?} to {to:?}")
            }
            Self::UnsupportedFormat(present, operation, supported) => {
                writeln!(
                    f,
                    "Unsupported pixel format {present:?}, for the operation {operation}\nSupported formats are {supported:?}"
                )
            }
            Self::UnsupportedFlag(format, flag) => {
                writeln!(f, "Flag {flag:?} can't be applied to {format:?} rows")
            }
            Self::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {expected} but found {found}"
                )
            }
            Self::InvalidDimensions(width, height, reason) => {
                writeln!(f, "Invalid dimensions {width}x{height}: {reason}")
            }
            Self::WrongDataType(expected, found) => {
                writeln!(
                    f,
                    "Wrong element type, expected {expected:?} but plane stores {found:?}"
                )
            }
            Self::InvalidThresholds(low, high, max) => {
                writeln!(
                    f,
                    "Invalid thresholds low={low}, high={high}, expected low < high <= {max}"
                )
            }
            Self::InvalidGamma(gamma) => {
                writeln!(f, "Invalid gamma {gamma}, expected a value in (0, 2)")
            }
            Self::GenericStr(err) => writeln!(f, "{err}"),
            Self::GenericString(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for FrameErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for FrameErrors {}

impl From<&'static str> for FrameErrors {
    fn from(value: &'static str) -> Self {
        Self::GenericStr(value)
    }
}

impl From<String> for FrameErrors {
    fn from(value: String) -> Self {
        Self::GenericString(value)
    }
}
