/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Canny edge detection on Y8 frames
//!
//! The detector runs in five passes
//! 1. Four oriented Scharr responses per pixel
//! 2. The strongest absolute response and its orientation
//! 3. Non-maximum suppression along that orientation and classification
//!    against the two thresholds
//! 4. Hysteresis, promoting weak edges connected to strong ones
//! 5. The binary edge map, 255 for edges and 0 otherwise
//!
//! Passes 1 to 3 and 5 split rows over the worker. Hysteresis runs on the
//! calling thread, so the edge map doesn't depend on the thread count.
use zune_frame_core::conversion_flag::ConversionFlag;
use zune_frame_core::log::{trace, warn};
use zune_frame_core::pixel_format::PixelFormat;

use crate::converter::FrameConverter;
use crate::errors::FrameErrors;
use crate::frame::Frame;
use crate::gradient::{EdgeOperator, Response, ResponseType, ALL_ORIENTATIONS};
use crate::scharr::Scharr;
use crate::traits::FrameOperation;
use crate::worker::{execute_rows, Worker};

/// Scharr response types the detector can threshold
pub trait CannyResponse: Response {
    /// Largest usable high threshold, the largest possible magnitude
    const MAXIMUM_THRESHOLD: u16;
}

impl CannyResponse for i8 {
    const MAXIMUM_THRESHOLD: u16 = 127;
}

impl CannyResponse for i16 {
    const MAXIMUM_THRESHOLD: u16 = 4080;
}

/// Classification of a pixel during detection
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum EdgeClassification {
    #[default]
    NoEdge,
    /// Kept only if connected to a strong edge
    WeakEdge,
    StrongEdge
}

/// Strongest absolute response of a pixel, `orientation` indexes
/// [`ALL_ORIENTATIONS`]
#[derive(Copy, Clone, Debug, Default)]
struct Gradient {
    magnitude:   u16,
    orientation: u8
}

/// Check thresholds for response type `R`
///
/// # Errors
/// [`FrameErrors::InvalidThresholds`] unless `low < high <= R::MAXIMUM_THRESHOLD`
pub fn check_thresholds<R: CannyResponse>(low: u16, high: u16) -> Result<(), FrameErrors> {
    if low >= high || high > R::MAXIMUM_THRESHOLD {
        return Err(FrameErrors::InvalidThresholds(
            low,
            high,
            R::MAXIMUM_THRESHOLD
        ));
    }
    Ok(())
}

/// First response wins on ties, in orientation order
fn strongest<R: CannyResponse>(responses: &[R]) -> Gradient {
    let mut gradient = Gradient::default();

    for (orientation, response) in responses.iter().enumerate() {
        let magnitude = response.unsigned_abs() as u16;

        if magnitude > gradient.magnitude {
            gradient = Gradient {
                magnitude,
                orientation: orientation as u8
            };
        }
    }
    gradient
}

/// Offsets (dx, dy) of the two neighbours along the gradient of `orientation`.
///
/// The pixel must be strictly larger than the first and at least as
/// large as the second.
#[rustfmt::skip]
const fn suppression_neighbours(orientation: u8) -> [(isize, isize); 2] {
    match orientation {
        // vertical edge, left and right
        0 => [(-1, 0), (1, 0)],
        // horizontal edge, above and below
        1 => [(0, -1), (0, 1)],
        // top-left and bottom-right
        2 => [(-1, -1), (1, 1)],
        // top-right and bottom-left
        _ => [(1, -1), (-1, 1)]
    }
}

#[inline(always)]
fn neighbour(index: usize, width: usize, (dx, dy): (isize, isize)) -> usize {
    index
        .wrapping_add_signed(dy * width as isize)
        .wrapping_add_signed(dx)
}

fn classify(
    gradients: &[Gradient], width: usize, height: usize, low: u16, high: u16,
    worker: Option<&Worker>, classes: &mut [EdgeClassification]
) {
    execute_rows(worker, classes, width, height, |block, first_row, rows| {
        for (offset, row) in block.chunks_exact_mut(width).take(rows).enumerate() {
            let y = first_row + offset;
            row.fill(EdgeClassification::NoEdge);

            if y == 0 || y == height - 1 {
                continue;
            }
            for x in 1..width - 1 {
                let index = y * width + x;
                let gradient = gradients[index];

                if gradient.magnitude <= low {
                    continue;
                }
                let [first, second] = suppression_neighbours(gradient.orientation);
                let first = gradients[neighbour(index, width, first)].magnitude;
                let second = gradients[neighbour(index, width, second)].magnitude;

                if gradient.magnitude > first && gradient.magnitude >= second {
                    row[x] = if gradient.magnitude > high {
                        EdgeClassification::StrongEdge
                    } else {
                        EdgeClassification::WeakEdge
                    };
                }
            }
        }
    });
}

/// Promote every weak edge 8-connected to a strong edge
///
/// Border pixels are never edges so neighbours of a traversed pixel are
/// always inside the frame.
fn hysteresis(classes: &mut [EdgeClassification], width: usize) {
    const NEIGHBOURS: [(isize, isize); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1)
    ];
    let mut stack = Vec::with_capacity(classes.len() / 8);

    for seed in 0..classes.len() {
        if classes[seed] != EdgeClassification::StrongEdge {
            continue;
        }
        stack.push(seed);

        while let Some(index) = stack.pop() {
            for offset in NEIGHBOURS {
                let next = neighbour(index, width, offset);

                if classes[next] == EdgeClassification::WeakEdge {
                    classes[next] = EdgeClassification::StrongEdge;
                    stack.push(next);
                }
            }
        }
    }
}

/// Canny edge map of a Y8 image
///
/// Writes 255 for edge pixels and 0 otherwise, the frame border is always 0
/// and target padding is left untouched.
///
/// # Arguments
/// - source: Y8 pixels, `width + source_padding_elements` per row
/// - target: Y8 edge map, `width + target_padding_elements` per row
/// - width, height: Frame dimensions, both at least 3
/// - low, high: Magnitude thresholds, `low < high <= R::MAXIMUM_THRESHOLD`,
///   in units of `R` (normalized `i8` or raw `i16` Scharr responses).
///   See [`check_thresholds`]
/// - worker: Optional worker, `None` runs on the calling thread
#[allow(clippy::too_many_arguments)]
pub fn canny_filter<R: CannyResponse>(
    source: &[u8], target: &mut [u8], width: usize, height: usize, source_padding_elements: usize,
    target_padding_elements: usize, low: u16, high: u16, worker: Option<&Worker>
) {
    debug_assert!(width >= 3 && height >= 3);
    debug_assert!(check_thresholds::<R>(low, high).is_ok());

    let pixels = width * height;

    let mut responses = vec![R::default(); pixels * ALL_ORIENTATIONS.len()];
    Scharr::filter::<R, 1>(
        source,
        &mut responses,
        width,
        height,
        source_padding_elements,
        0,
        worker
    );

    let mut gradients = vec![Gradient::default(); pixels];
    execute_rows(worker, &mut gradients, width, height, |block, first_row, rows| {
        let responses = &responses[first_row * width * 4..(first_row + rows) * width * 4];

        for (gradient, pixel) in block.iter_mut().zip(responses.chunks_exact(4)) {
            *gradient = strongest(pixel);
        }
    });
    drop(responses);

    let mut classes = vec![EdgeClassification::NoEdge; pixels];
    classify(&gradients, width, height, low, high, worker, &mut classes);
    drop(gradients);

    hysteresis(&mut classes, width);

    let target_stride = width + target_padding_elements;
    execute_rows(worker, target, target_stride, height, |block, first_row, rows| {
        for (offset, row) in block.chunks_mut(target_stride).take(rows).enumerate() {
            let y = first_row + offset;
            let classes = &classes[y * width..(y + 1) * width];

            for (out, class) in row[..width].iter_mut().zip(classes) {
                *out = if *class == EdgeClassification::StrongEdge { 255 } else { 0 };
            }
        }
    });
}

/// Canny edge detection as a frame operation
///
/// Frames in another format are converted to Y8 first, the output is
/// always Y8.
///
/// # Example
/// ```
/// use zune_frame_core::pixel_format::PixelFormat;
/// use zune_frameprocs::canny::Canny;
/// use zune_frameprocs::frame::Frame;
/// use zune_frameprocs::gradient::ResponseType;
/// use zune_frameprocs::traits::FrameOperation;
///
/// let frame = Frame::new(PixelFormat::RGB24, 16, 16).unwrap();
/// let edges = Canny::new(20, 40, ResponseType::Normalized)
///     .execute(&frame, None)
///     .unwrap();
/// assert_eq!(edges.format(), PixelFormat::Y8);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Canny {
    low:       u16,
    high:      u16,
    response:  ResponseType,
    converter: FrameConverter
}

/// Formats converted to Y8 before detection
static CANNY_FORMATS: [PixelFormat; 11] = [
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
    PixelFormat::Y10Packed
];

impl Canny {
    /// Create a detector
    ///
    /// Thresholds are in units of the chosen response type, see
    /// [`CannyResponse::MAXIMUM_THRESHOLD`]
    #[must_use]
    pub fn new(low: u16, high: u16, response: ResponseType) -> Canny {
        Canny {
            low,
            high,
            response,
            converter: FrameConverter::default()
        }
    }

    /// Set the converter used for frames that aren't Y8
    #[must_use]
    pub fn set_converter(mut self, converter: FrameConverter) -> Canny {
        self.converter = converter;
        self
    }

    /// Check the thresholds against the response type
    ///
    /// # Errors
    /// [`FrameErrors::InvalidThresholds`] for unusable thresholds
    pub fn check_thresholds(&self) -> Result<(), FrameErrors> {
        match self.response {
            ResponseType::Normalized => check_thresholds::<i8>(self.low, self.high),
            ResponseType::Raw => check_thresholds::<i16>(self.low, self.high)
        }
    }

    /// Detect edges of the Y8 frame `frame` into `target`
    ///
    /// # Errors
    /// - Either frame isn't Y8 or sizes differ
    /// - Frames smaller than 3x3
    /// - Unusable thresholds
    pub fn detect_into(
        &self, frame: &Frame, target: &mut Frame, worker: Option<&Worker>
    ) -> Result<(), FrameErrors> {
        let (width, height) = frame.dimensions();

        for format in [frame.format(), target.format()] {
            if format != PixelFormat::Y8 {
                warn!("Canny detection needs Y8 frames, found {:?}", format);
                return Err(FrameErrors::UnsupportedFormat(
                    format,
                    "Canny",
                    &[PixelFormat::Y8]
                ));
            }
        }
        if width < 3 || height < 3 {
            return Err(FrameErrors::InvalidDimensions(
                width,
                height,
                "canny detection needs at least 3x3 pixels"
            ));
        }
        if target.dimensions() != frame.dimensions() {
            return Err(FrameErrors::DimensionsMisMatch(
                width * height,
                target.width() * target.height()
            ));
        }
        self.check_thresholds()?;

        trace!(
            "Canny on a {}x{} frame, thresholds {}..{} ({:?})",
            width,
            height,
            self.low,
            self.high,
            self.response
        );
        let missing = || FrameErrors::GenericStr("Frame is missing a plane");

        let source = frame.plane(0).ok_or_else(missing)?;
        let source_padding = source.padding_elements();
        let target = target.plane_mut(0).ok_or_else(missing)?;
        let target_padding = target.padding_elements();

        let source = source.data::<u8>()?;
        let target = target.data_mut::<u8>()?;

        match self.response {
            ResponseType::Normalized => canny_filter::<i8>(
                source, target, width, height, source_padding, target_padding, self.low,
                self.high, worker
            ),
            ResponseType::Raw => canny_filter::<i16>(
                source, target, width, height, source_padding, target_padding, self.low,
                self.high, worker
            )
        }
        Ok(())
    }
}

impl FrameOperation for Canny {
    fn name(&self) -> &'static str {
        "Canny"
    }

    fn execute_impl(&self, frame: &Frame, worker: Option<&Worker>) -> Result<Frame, FrameErrors> {
        let mut target = Frame::new(PixelFormat::Y8, frame.width(), frame.height())?;

        if frame.format() == PixelFormat::Y8 {
            self.detect_into(frame, &mut target, worker)?;
        } else {
            let gray =
                self.converter
                    .convert(frame, PixelFormat::Y8, ConversionFlag::Normal, worker)?;
            self.detect_into(&gray, &mut target, worker)?;
        }
        Ok(target)
    }

    fn supported_formats(&self) -> &'static [PixelFormat] {
        &CANNY_FORMATS
    }

    fn supports(&self, format: PixelFormat) -> bool {
        format == PixelFormat::Y8 || FrameConverter::is_supported(format, PixelFormat::Y8)
    }
}
