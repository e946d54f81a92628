/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Element data types, the integer type a single sample is stored in

/// The underlying element type of a plane
///
/// This represents the rust type that is used to
/// store one sample (or one packed group of samples) of a pixel.
///
/// Packed formats like `RGB565` store a whole pixel in one
/// [`DataType::U16`] element, `Y10Packed` stores bytes, and a pixel spans
/// a fractional number of them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DataType {
    /// Unsigned 8 bit elements, [`u8`]
    U8,
    /// Signed 8 bit elements, [`i8`]
    ///
    /// Used by the normalized outputs of edge filters.
    I8,
    /// Unsigned 16 bit elements, [`u16`], native endian
    U16,
    /// Signed 16 bit elements, [`i16`], native endian
    ///
    /// Used by the raw outputs of edge filters.
    I16
}

impl DataType {
    /// Size of a single element in bytes
    ///
    /// # Example
    /// ```
    /// use zune_frame_core::data_type::DataType;
    /// assert_eq!(DataType::U16.size_of(), 2);
    /// assert_eq!(DataType::I8.size_of(), 1);
    /// ```
    pub const fn size_of(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2
        }
    }

    /// Number of bits in one element
    pub const fn bits(self) -> u32 {
        (self.size_of() * 8) as u32
    }

    /// Whether the element type is signed
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16)
    }
}
