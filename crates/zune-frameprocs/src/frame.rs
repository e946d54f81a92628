/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Owned frame memory
//!
//! A [`Frame`] is a pixel format, dimensions and one [`Plane`] per format
//! plane. A plane is a block of elements laid out row after row, each row
//! followed by optional padding elements which no kernel reads or writes.
//!
//! Plane memory is stored as `u16` so any element type up to 16 bits can be
//! reinterpreted in place without alignment issues.
use std::fmt::{Debug, Formatter};

use zune_frame_core::data_type::DataType;
use zune_frame_core::pixel_format::PixelFormat;

use crate::errors::FrameErrors;
use crate::traits::Element;

/// One plane of a frame
#[derive(Clone, PartialEq, Eq)]
pub struct Plane {
    /// Backing storage, always at least `length` bytes
    data:             Vec<u16>,
    /// Length in bytes of the plane
    length:           usize,
    data_type:        DataType,
    row_elements:     usize,
    padding_elements: usize,
    height:           usize
}

impl Debug for Plane {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Plane: [Type: {:?}, rows: {}, row elements: {}, padding elements: {}]",
            self.data_type, self.height, self.row_elements, self.padding_elements
        )
    }
}

impl Plane {
    /// Create a zero filled plane
    ///
    /// # Arguments
    /// - data_type: Element type stored in the plane
    /// - row_elements: Active elements in one row
    /// - height: Number of rows
    /// - padding_elements: Elements following each row that hold no pixels
    pub fn new(
        data_type: DataType, row_elements: usize, height: usize, padding_elements: usize
    ) -> Plane {
        let length = (row_elements + padding_elements) * height * data_type.size_of();

        Plane {
            data: vec![0; length.div_ceil(2)],
            length,
            data_type,
            row_elements,
            padding_elements,
            height
        }
    }

    pub const fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Number of active elements in a row
    pub const fn row_elements(&self) -> usize {
        self.row_elements
    }

    /// Number of padding elements after every row
    pub const fn padding_elements(&self) -> usize {
        self.padding_elements
    }

    /// Distance in elements between the starts of two consecutive rows
    pub const fn stride_elements(&self) -> usize {
        self.row_elements + self.padding_elements
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Length of the plane in elements, padding included
    pub const fn len(&self) -> usize {
        self.stride_elements() * self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether rows follow each other without padding
    pub const fn is_continuous(&self) -> bool {
        self.padding_elements == 0
    }

    fn confirm_type<T: Element>(&self) -> Result<(), FrameErrors> {
        if T::DATA_TYPE != self.data_type {
            return Err(FrameErrors::WrongDataType(T::DATA_TYPE, self.data_type));
        }
        Ok(())
    }

    /// Plane bytes, padding included
    pub fn as_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<u16, u8>(&self.data)[..self.length]
    }

    /// Plane bytes, padding included
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut bytemuck::cast_slice_mut::<u16, u8>(&mut self.data)[..self.length]
    }

    /// Reinterpret the plane as a slice of `T`
    ///
    /// # Errors
    /// If `T` is not the element type the plane was created with
    pub fn data<T: Element>(&self) -> Result<&[T], FrameErrors> {
        self.confirm_type::<T>()?;
        bytemuck::try_cast_slice(self.as_bytes())
            .map_err(|_| FrameErrors::GenericStr("Plane memory not aligned for its element type"))
    }

    /// Reinterpret the plane as a mutable slice of `T`
    ///
    /// # Errors
    /// If `T` is not the element type the plane was created with
    pub fn data_mut<T: Element>(&mut self) -> Result<&mut [T], FrameErrors> {
        self.confirm_type::<T>()?;
        bytemuck::try_cast_slice_mut(self.as_bytes_mut())
            .map_err(|_| FrameErrors::GenericStr("Plane memory not aligned for its element type"))
    }

    /// Active elements of row `y`, padding excluded
    ///
    /// # Errors
    /// On element type mismatch or if `y` is out of range
    pub fn row<T: Element>(&self, y: usize) -> Result<&[T], FrameErrors> {
        if y >= self.height {
            return Err(FrameErrors::DimensionsMisMatch(self.height, y));
        }
        let start = y * self.stride_elements();
        Ok(&self.data::<T>()?[start..start + self.row_elements])
    }

    /// Fill every element of the plane, padding included, with `value`
    ///
    /// # Errors
    /// On element type mismatch
    pub fn fill<T: Element>(&mut self, value: T) -> Result<(), FrameErrors> {
        self.data_mut::<T>()?.fill(value);
        Ok(())
    }
}

/// An image in one pixel format, owning its planes
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Frame {
    format: PixelFormat,
    width:  usize,
    height: usize,
    planes: Vec<Plane>
}

impl Frame {
    fn check_dimensions(format: PixelFormat, width: usize, height: usize) -> Result<(), FrameErrors> {
        if width == 0 || height == 0 {
            return Err(FrameErrors::InvalidDimensions(
                width,
                height,
                "width and height must be non zero"
            ));
        }
        if width % format.width_multiple() != 0 {
            return Err(FrameErrors::InvalidDimensions(
                width,
                height,
                "width is not a multiple of the pixel group of the format"
            ));
        }
        Ok(())
    }

    /// Create a zero filled frame without padding
    ///
    /// # Errors
    /// If the dimensions can't hold the format, e.g a zero width
    pub fn new(format: PixelFormat, width: usize, height: usize) -> Result<Frame, FrameErrors> {
        Frame::new_with_padding(format, width, height, 0)
    }

    /// Create a zero filled frame whose plane rows are followed by
    /// `padding_elements` unused elements
    ///
    /// # Errors
    /// If the dimensions can't hold the format, e.g a zero width
    pub fn new_with_padding(
        format: PixelFormat, width: usize, height: usize, padding_elements: usize
    ) -> Result<Frame, FrameErrors> {
        Frame::check_dimensions(format, width, height)?;

        let planes = (0..format.num_planes())
            .map(|plane| {
                Plane::new(
                    format.data_type(),
                    format.plane_row_elements(plane, width),
                    height,
                    padding_elements
                )
            })
            .collect();

        Ok(Frame {
            format,
            width,
            height,
            planes
        })
    }

    /// Create a single plane frame by copying `data`
    ///
    /// `data` holds `height` rows of `row elements + padding_elements` each
    ///
    /// # Errors
    /// - If the format has more than one plane
    /// - If `T` is not the element type of the format
    /// - If `data` length doesn't match the dimensions
    pub fn from_data<T: Element>(
        format: PixelFormat, width: usize, height: usize, padding_elements: usize, data: &[T]
    ) -> Result<Frame, FrameErrors> {
        if format.num_planes() != 1 {
            return Err(FrameErrors::GenericStr(
                "from_data can only create single plane frames"
            ));
        }
        let mut frame = Frame::new_with_padding(format, width, height, padding_elements)?;

        let target = frame.planes[0].data_mut::<T>()?;
        if target.len() != data.len() {
            return Err(FrameErrors::DimensionsMisMatch(target.len(), data.len()));
        }
        target.copy_from_slice(data);
        Ok(frame)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return a tuple of (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn planes_mut(&mut self) -> &mut [Plane] {
        &mut self.planes
    }

    /// Get a plane, `None` if the format has fewer planes
    pub fn plane(&self, plane: usize) -> Option<&Plane> {
        self.planes.get(plane)
    }

    pub fn plane_mut(&mut self, plane: usize) -> Option<&mut Plane> {
        self.planes.get_mut(plane)
    }

    /// Whether no plane carries row padding
    pub fn is_continuous(&self) -> bool {
        self.planes.iter().all(Plane::is_continuous)
    }
}

#[cfg(test)]
mod tests {
    use zune_frame_core::data_type::DataType;
    use zune_frame_core::pixel_format::PixelFormat;

    use crate::frame::{Frame, Plane};

    #[test]
    fn test_wrong_interpretation() {
        let plane = Plane::new(DataType::U16, 10, 2, 0);
        assert!(plane.data::<u8>().is_err());
        assert!(plane.data::<i16>().is_err());
        assert_eq!(plane.data::<u16>().unwrap().len(), 20);
    }

    #[test]
    fn test_odd_u8_plane() {
        let mut plane = Plane::new(DataType::U8, 3, 3, 0);
        plane.data_mut::<u8>().unwrap()[8] = 7;
        assert_eq!(plane.data::<u8>().unwrap().len(), 9);
        assert_eq!(plane.row::<u8>(2).unwrap(), &[0, 0, 7]);
    }

    #[test]
    fn test_padding_layout() {
        let frame = Frame::new_with_padding(PixelFormat::RGB24, 5, 4, 3).unwrap();
        let plane = frame.plane(0).unwrap();
        assert_eq!(plane.row_elements(), 15);
        assert_eq!(plane.stride_elements(), 18);
        assert_eq!(plane.len(), 72);
        assert!(!frame.is_continuous());
    }

    #[test]
    fn test_planar_frame_has_three_planes() {
        let frame = Frame::new(PixelFormat::R_G_B24, 6, 2).unwrap();
        assert_eq!(frame.planes().len(), 3);
        assert_eq!(frame.plane(2).unwrap().row_elements(), 6);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(Frame::new(PixelFormat::Y8, 0, 4).is_err());
        assert!(Frame::new(PixelFormat::Y10Packed, 6, 4).is_err());
        assert!(Frame::new(PixelFormat::Y10Packed, 8, 4).is_ok());
        assert!(Frame::from_data::<u8>(PixelFormat::Y8, 4, 4, 0, &[0; 15]).is_err());
    }
}
