/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Orientation changes applied while converting a frame

/// How the target frame is oriented relative to the source frame.
///
/// The flag is resolved once per frame, row kernels never see it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ConversionFlag {
    /// Rows and pixels keep their order
    #[default]
    Normal,
    /// Top-bottom swap, source row `y` lands in target row `height - 1 - y`
    Flipped,
    /// Left-right swap, the pixel order of each row is reversed
    Mirrored,
    /// Both of the above
    FlippedAndMirrored
}

/// All conversion flags, useful for exhaustive tests
pub static ALL_CONVERSION_FLAGS: [ConversionFlag; 4] = [
    ConversionFlag::Normal,
    ConversionFlag::Flipped,
    ConversionFlag::Mirrored,
    ConversionFlag::FlippedAndMirrored
];

impl ConversionFlag {
    /// Build a flag from its two components
    ///
    /// # Example
    /// ```
    /// use zune_frame_core::conversion_flag::ConversionFlag;
    /// assert_eq!(ConversionFlag::from_parts(true, true), ConversionFlag::FlippedAndMirrored);
    /// assert_eq!(ConversionFlag::from_parts(false, false), ConversionFlag::Normal);
    /// ```
    pub const fn from_parts(flipped: bool, mirrored: bool) -> ConversionFlag {
        match (flipped, mirrored) {
            (false, false) => Self::Normal,
            (true, false) => Self::Flipped,
            (false, true) => Self::Mirrored,
            (true, true) => Self::FlippedAndMirrored
        }
    }

    /// Whether row order is reversed
    pub const fn is_flipped(self) -> bool {
        matches!(self, Self::Flipped | Self::FlippedAndMirrored)
    }

    /// Whether pixel order inside a row is reversed
    pub const fn is_mirrored(self) -> bool {
        matches!(self, Self::Mirrored | Self::FlippedAndMirrored)
    }

    /// Combine two flags as if they were applied one after the other.
    ///
    /// Flip and mirror are each their own inverse, so composing
    /// a flag with itself gives [`ConversionFlag::Normal`]
    pub const fn compose(self, other: ConversionFlag) -> ConversionFlag {
        Self::from_parts(
            self.is_flipped() ^ other.is_flipped(),
            self.is_mirrored() ^ other.is_mirrored()
        )
    }
}
