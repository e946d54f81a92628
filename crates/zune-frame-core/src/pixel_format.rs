/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel formats and the memory layout each of them implies.
//!
//! A [`PixelFormat`] names a format, a [`PixelLayout`] describes how its
//! pixels sit in memory. The layout is what conversion dispatch keys on.
use core::num::NonZeroU8;

use crate::data_type::DataType;

/// How the channels of a pixel are placed in memory
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Packing {
    /// Every channel is one element, channels of a pixel are adjacent
    Interleaved,
    /// Several channels (or several pixels) share elements at bit level
    Packed,
    /// Every channel lives in its own plane
    Planar
}

/// Order of the channels inside a pixel
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ChannelOrder {
    Luma,
    LumaAlpha,
    Rgb,
    Bgr,
    Rgba,
    Bgra,
    /// Channels carry no color meaning, e.g. filter responses
    Unordered
}

/// Immutable description of a pixel format's memory layout
///
/// `bits_per_pixel` counts significant bits, so `Y10` reports 10 even
/// though each sample occupies a 16 bit element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PixelLayout {
    pub channels:       u8,
    pub bits_per_pixel: u32,
    pub planes:         u8,
    pub data_type:      DataType,
    pub packing:        Packing,
    pub order:          ChannelOrder
}

/// All pixel formats the engine knows about
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PixelFormat {
    /// 8 bit grayscale
    Y8,
    /// 10 bit grayscale, one sample in the low bits of a `u16`
    Y10,
    /// 16 bit grayscale
    Y16,
    /// 8 bit luma followed by 8 bit alpha, 16 bits per pixel
    YA16,
    /// Red, Green, Blue, 8 bits each
    RGB24,
    /// Blue, Green, Red, 8 bits each
    BGR24,
    /// Red, Green, Blue, Alpha, 8 bits each
    RGBA32,
    /// Blue, Green, Red, Alpha, 8 bits each
    BGRA32,
    /// One native endian `u16` per pixel, red in bits 0..5, green in 5..11,
    /// blue in 11..16
    RGB565,
    /// One native endian `u16` per pixel, blue in bits 0..5, green in 5..11,
    /// red in 11..16
    ///
    /// Same layout as Android's `RGB_565`
    BGR565,
    /// Red, Green, Blue, Alpha, 16 bits each
    RGBA64,
    /// 10 bit grayscale, four pixels packed in five bytes.
    ///
    /// The first four bytes hold the high 8 bits of pixels 0..4, the fifth
    /// byte holds the two low bits of each pixel, pixel 0 in its lowest bits.
    /// Width must be a multiple of 4.
    Y10Packed,
    /// Red, Green and Blue in three separate full resolution planes
    R_G_B24,
    /// Interleaved channels without a color meaning
    Generic(DataType, NonZeroU8)
}

/// Encapsulates all named pixel formats.
///
/// This explicitly leaves out [`PixelFormat::Generic`]
pub static ALL_PIXEL_FORMATS: [PixelFormat; 13] = [
    PixelFormat::Y8,
    PixelFormat::Y10,
    PixelFormat::Y16,
    PixelFormat::YA16,
    PixelFormat::RGB24,
    PixelFormat::BGR24,
    PixelFormat::RGBA32,
    PixelFormat::BGRA32,
    PixelFormat::RGB565,
    PixelFormat::BGR565,
    PixelFormat::RGBA64,
    PixelFormat::Y10Packed,
    PixelFormat::R_G_B24
];

impl PixelFormat {
    /// Create a generic interleaved format
    ///
    /// Returns `None` if `channels` is zero
    pub const fn generic(data_type: DataType, channels: u8) -> Option<PixelFormat> {
        match NonZeroU8::new(channels) {
            Some(n) => Some(PixelFormat::Generic(data_type, n)),
            None => None
        }
    }

    /// The memory layout of this format
    pub const fn layout(self) -> PixelLayout {
        use ChannelOrder::*;
        use DataType::*;
        use Packing::*;

        let (channels, bits_per_pixel, planes, data_type, packing, order) = match self {
            Self::Y8 => (1, 8, 1, U8, Interleaved, Luma),
            Self::Y10 => (1, 10, 1, U16, Interleaved, Luma),
            Self::Y16 => (1, 16, 1, U16, Interleaved, Luma),
            Self::YA16 => (2, 16, 1, U8, Interleaved, LumaAlpha),
            Self::RGB24 => (3, 24, 1, U8, Interleaved, Rgb),
            Self::BGR24 => (3, 24, 1, U8, Interleaved, Bgr),
            Self::RGBA32 => (4, 32, 1, U8, Interleaved, Rgba),
            Self::BGRA32 => (4, 32, 1, U8, Interleaved, Bgra),
            Self::RGB565 => (3, 16, 1, U16, Packed, Rgb),
            Self::BGR565 => (3, 16, 1, U16, Packed, Bgr),
            Self::RGBA64 => (4, 64, 1, U16, Interleaved, Rgba),
            Self::Y10Packed => (1, 10, 1, U8, Packed, Luma),
            Self::R_G_B24 => (3, 24, 3, U8, Planar, Rgb),
            Self::Generic(data_type, channels) => (
                channels.get(),
                channels.get() as u32 * data_type.bits(),
                1,
                data_type,
                Interleaved,
                Unordered
            )
        };
        PixelLayout {
            channels,
            bits_per_pixel,
            planes,
            data_type,
            packing,
            order
        }
    }

    /// Resolve a layout back to the format it describes
    ///
    /// # Example
    /// ```
    /// use zune_frame_core::pixel_format::PixelFormat;
    /// let layout = PixelFormat::BGR565.layout();
    /// assert_eq!(PixelFormat::from_layout(&layout), Some(PixelFormat::BGR565));
    /// ```
    pub fn from_layout(layout: &PixelLayout) -> Option<PixelFormat> {
        if let Some(format) = ALL_PIXEL_FORMATS
            .iter()
            .find(|format| format.layout() == *layout)
        {
            return Some(*format);
        }
        if layout.order == ChannelOrder::Unordered && layout.planes == 1 {
            let format = PixelFormat::generic(layout.data_type, layout.channels)?;
            if format.layout() == *layout {
                return Some(format);
            }
        }
        None
    }

    /// Number of channels in a pixel
    ///
    /// E.g. RGB565 returns 3, even though all three share one element
    pub const fn num_channels(self) -> usize {
        self.layout().channels as usize
    }

    /// Number of separate planes holding the pixel data
    pub const fn num_planes(self) -> usize {
        self.layout().planes as usize
    }

    /// Element type of every plane
    pub const fn data_type(self) -> DataType {
        self.layout().data_type
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::YA16 | Self::RGBA32 | Self::BGRA32 | Self::RGBA64)
    }

    pub const fn is_grayscale(self) -> bool {
        matches!(
            self,
            Self::Y8 | Self::Y10 | Self::Y16 | Self::YA16 | Self::Y10Packed
        )
    }

    /// Number of channels stored in one plane
    pub const fn plane_channels(self, plane: usize) -> usize {
        let layout = self.layout();
        if plane >= layout.planes as usize {
            return 0;
        }
        match layout.packing {
            Packing::Planar => 1,
            _ => layout.channels as usize
        }
    }

    /// Width of a frame in this format must be a multiple of this value
    pub const fn width_multiple(self) -> usize {
        match self {
            Self::Y10Packed => 4,
            _ => 1
        }
    }

    /// Whether pixels can be reordered inside a row without unpacking,
    /// i.e. every pixel starts on an element boundary
    pub const fn supports_mirror(self) -> bool {
        !matches!(self, Self::Y10Packed)
    }

    /// Number of elements in one row of `plane` for a frame `width` pixels wide,
    /// padding excluded.
    ///
    /// `width` must be a multiple of [`PixelFormat::width_multiple`]
    pub const fn plane_row_elements(self, plane: usize, width: usize) -> usize {
        match self {
            Self::RGB565 | Self::BGR565 => {
                if plane == 0 {
                    width
                } else {
                    0
                }
            }
            Self::Y10Packed => {
                if plane == 0 {
                    width * 5 / 4
                } else {
                    0
                }
            }
            _ => width * self.plane_channels(plane)
        }
    }

    /// Number of pixels one element row holds, used for the inverse
    /// computation of [`PixelFormat::plane_row_elements`]
    pub const fn pixels_in_row_elements(self, plane: usize, elements: usize) -> usize {
        match self {
            Self::Y10Packed => elements * 4 / 5,
            _ => {
                let per_pixel = self.plane_row_elements(plane, 1);
                if per_pixel == 0 {
                    0
                } else {
                    elements / per_pixel
                }
            }
        }
    }
}
