/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits shared by kernels and operations
use bytemuck::Pod;
use zune_frame_core::data_type::DataType;
use zune_frame_core::log::{trace, warn};
use zune_frame_core::pixel_format::PixelFormat;

use crate::errors::FrameErrors;
use crate::frame::Frame;
use crate::worker::Worker;

/// An integer type a plane can store its samples in
pub trait Element: Pod + Default + Send + Sync + 'static {
    /// The descriptor matching this type
    const DATA_TYPE: DataType;
}

impl Element for u8 {
    const DATA_TYPE: DataType = DataType::U8;
}

impl Element for i8 {
    const DATA_TYPE: DataType = DataType::I8;
}

impl Element for u16 {
    const DATA_TYPE: DataType = DataType::U16;
}

impl Element for i16 {
    const DATA_TYPE: DataType = DataType::I16;
}

/// This encapsulates a frame operation.
///
/// An operation reads a frame and produces a new one, it never
/// modifies its input.
pub trait FrameOperation {
    /// Get the name of this operation
    fn name(&self) -> &'static str;

    /// Execute the operation, the input format has already been
    /// checked against [`FrameOperation::supports`].
    ///
    /// # Errors
    /// Any operation error will be propagated to the caller
    fn execute_impl(&self, frame: &Frame, worker: Option<&Worker>) -> Result<Frame, FrameErrors>;

    /// Formats this operation accepts as input
    fn supported_formats(&self) -> &'static [PixelFormat];

    /// Whether the operation accepts `format`.
    ///
    /// The default looks `format` up in [`FrameOperation::supported_formats`],
    /// operations accepting generic formats override it.
    fn supports(&self, format: PixelFormat) -> bool {
        self.supported_formats().contains(&format)
    }

    /// Execute the operation on `frame`
    ///
    /// # Arguments
    /// - frame: The input frame, left unmodified
    /// - worker: Optional worker, `None` runs on the calling thread
    ///
    /// # Errors
    /// Returns [`FrameErrors::UnsupportedFormat`] if the frame format isn't
    /// supported, otherwise whatever the operation reports
    fn execute(&self, frame: &Frame, worker: Option<&Worker>) -> Result<Frame, FrameErrors> {
        let format = frame.format();

        if !self.supports(format) {
            warn!("Operation {} does not support {:?}", self.name(), format);
            return Err(FrameErrors::UnsupportedFormat(
                format,
                self.name(),
                self.supported_formats()
            ));
        }
        trace!(
            "Running {} on a {}x{} {:?} frame",
            self.name(),
            frame.width(),
            frame.height(),
            format
        );
        self.execute_impl(frame, worker)
    }
}
