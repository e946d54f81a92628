/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Oriented 3x3 gradient responses
//!
//! An [`EdgeOperator`] is a set of four fixed 3x3 kernels, one per
//! orientation, plus the divisors bringing responses into 8 bits.
//! Scharr, Sobel and Prewitt live in their own modules.
//!
//! All filters read interleaved 8 bit pixels of 1 to 4 channels. For every
//! channel of every pixel they write one response per requested orientation,
//! or one magnitude (the largest absolute response) for the maximum
//! absolute variants.
//!
//! The first and last row, and the first and last pixel of every row, have no
//! full neighbourhood and are written as zero.
use zune_frame_core::data_type::DataType;
use zune_frame_core::log::{trace, warn};
use zune_frame_core::pixel_format::PixelFormat;

use crate::errors::FrameErrors;
use crate::frame::Frame;
use crate::traits::{Element, FrameOperation};
use crate::worker::{execute_rows, Worker};

mod tests;

/// Kernel orientations
///
/// The angle is that of the gradient: a [`Orientation::Horizontal`] kernel
/// responds to intensity changing along x, i.e. to vertical edges.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// 0°
    Horizontal,
    /// 90°
    Vertical,
    /// 45°, top-left to bottom-right
    Diagonal45,
    /// 135°, top-right to bottom-left
    Diagonal135
}

impl Orientation {
    /// The kernel of operator `O` for this orientation, row major, top row first
    pub const fn kernel<O: EdgeOperator>(self) -> [i32; 9] {
        match self {
            Self::Horizontal => O::HORIZONTAL,
            Self::Vertical => O::VERTICAL,
            Self::Diagonal45 => O::DIAGONAL_45,
            Self::Diagonal135 => O::DIAGONAL_135
        }
    }
}

/// The two axis aligned orientations, in output order
pub const HORIZONTAL_VERTICAL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];
/// The two diagonal orientations, in output order
pub const DIAGONAL: [Orientation; 2] = [Orientation::Diagonal45, Orientation::Diagonal135];
/// All orientations, in output order
pub const ALL_ORIENTATIONS: [Orientation; 4] = [
    Orientation::Horizontal,
    Orientation::Vertical,
    Orientation::Diagonal45,
    Orientation::Diagonal135
];

/// A gradient response element, the filter output of one orientation
pub trait Response: Element {
    /// Bring a kernel sum into this type
    fn from_sum<O: EdgeOperator>(sum: i32) -> Self;
    /// Absolute value as an unsigned integer
    fn unsigned_abs(self) -> u32;
}

impl Response for i8 {
    /// Integer division by the operator's normalization, truncating
    #[inline(always)]
    fn from_sum<O: EdgeOperator>(sum: i32) -> Self {
        (sum / O::NORMALIZATION) as i8
    }

    #[inline(always)]
    fn unsigned_abs(self) -> u32 {
        u32::from(i8::unsigned_abs(self))
    }
}

impl Response for i16 {
    /// The raw kernel sum
    #[inline(always)]
    fn from_sum<O: EdgeOperator>(sum: i32) -> Self {
        sum as i16
    }

    #[inline(always)]
    fn unsigned_abs(self) -> u32 {
        u32::from(i16::unsigned_abs(self))
    }
}

/// A magnitude element, the output of the maximum absolute filters
pub trait Magnitude: Element {
    /// Bring the largest absolute kernel sum into this type
    fn from_maximum<O: EdgeOperator>(maximum: u32) -> Self;
}

impl Magnitude for u8 {
    /// Division by the operator's maximum absolute normalization, rounding
    #[inline(always)]
    fn from_maximum<O: EdgeOperator>(maximum: u32) -> Self {
        let divisor = O::MAXIMUM_ABSOLUTE_NORMALIZATION;
        ((maximum + divisor / 2) / divisor) as u8
    }
}

impl Magnitude for u16 {
    /// The raw maximum
    #[inline(always)]
    fn from_maximum<O: EdgeOperator>(maximum: u32) -> Self {
        maximum as u16
    }
}

/// The 3x3 neighbourhood of channel `index` in `current`
#[inline(always)]
fn window<const CHANNELS: usize>(
    above: &[u8], current: &[u8], below: &[u8], index: usize
) -> [i32; 9] {
    let (left, right) = (index - CHANNELS, index + CHANNELS);
    [
        i32::from(above[left]),
        i32::from(above[index]),
        i32::from(above[right]),
        i32::from(current[left]),
        i32::from(current[index]),
        i32::from(current[right]),
        i32::from(below[left]),
        i32::from(below[index]),
        i32::from(below[right])
    ]
}

#[inline(always)]
fn apply(window: &[i32; 9], kernel: &[i32; 9]) -> i32 {
    window.iter().zip(kernel.iter()).map(|(a, b)| a * b).sum()
}

/// Run `write_pixel` for every inner pixel of every row, zeroing borders.
///
/// `OUTPUTS` is the number of target elements per source channel.
#[allow(clippy::too_many_arguments)]
fn filter_rows<T, F, const CHANNELS: usize, const OUTPUTS: usize>(
    source: &[u8], target: &mut [T], width: usize, height: usize, source_padding_elements: usize,
    target_padding_elements: usize, worker: Option<&Worker>, write_pixel: F
) where
    T: Element,
    F: Fn(&[u8], &[u8], &[u8], usize, &mut [T]) + Sync
{
    let source_row = width * CHANNELS;
    let source_stride = source_row + source_padding_elements;
    let pixel_elements = CHANNELS * OUTPUTS;
    let target_row = width * pixel_elements;
    let target_stride = target_row + target_padding_elements;

    debug_assert!((1..=4).contains(&CHANNELS));
    debug_assert!(width >= 3 && height >= 3);
    debug_assert!(source.len() >= source_stride * (height - 1) + source_row);
    debug_assert!(target.len() >= target_stride * (height - 1) + target_row);

    let rows = |block: &mut [T], first_row: usize, rows: usize| {
        for (offset, target_data) in block.chunks_mut(target_stride).take(rows).enumerate() {
            let y = first_row + offset;
            let target_data = &mut target_data[..target_row];

            if y == 0 || y == height - 1 {
                target_data.fill(T::default());
                continue;
            }
            let above = &source[(y - 1) * source_stride..(y - 1) * source_stride + source_row];
            let current = &source[y * source_stride..y * source_stride + source_row];
            let below = &source[(y + 1) * source_stride..(y + 1) * source_stride + source_row];

            let (first, rest) = target_data.split_at_mut(pixel_elements);
            let (inner, last) = rest.split_at_mut(rest.len() - pixel_elements);
            first.fill(T::default());
            last.fill(T::default());

            for (x, pixel) in (1..width - 1).zip(inner.chunks_exact_mut(pixel_elements)) {
                write_pixel(above, current, below, x * CHANNELS, pixel);
            }
        }
    };
    execute_rows(worker, target, target_stride, height, rows);
}

/// Oriented responses of operator `O`
///
/// Writes `CHANNELS * N` responses per pixel, for each channel the
/// orientations in the order given.
///
/// # Arguments
/// - source: Interleaved 8 bit pixels of `CHANNELS` channels
/// - target: Response elements, row `y` starts at `y * (width * CHANNELS * N + target_padding_elements)`
/// - width, height: Frame dimensions, both at least 3
/// - source_padding_elements: Padding after every source row
/// - target_padding_elements: Padding after every target row, left untouched
/// - orientations: Kernels to evaluate, in output order
/// - worker: Optional worker, `None` runs on the calling thread
#[allow(clippy::too_many_arguments)]
pub fn filter_responses<O, R, const CHANNELS: usize, const N: usize>(
    source: &[u8], target: &mut [R], width: usize, height: usize, source_padding_elements: usize,
    target_padding_elements: usize, orientations: [Orientation; N], worker: Option<&Worker>
) where
    O: EdgeOperator,
    R: Response
{
    let kernels = orientations.map(Orientation::kernel::<O>);

    filter_rows::<R, _, CHANNELS, N>(
        source,
        target,
        width,
        height,
        source_padding_elements,
        target_padding_elements,
        worker,
        |above, current, below, index, pixel| {
            for (channel, responses) in pixel.chunks_exact_mut(N).enumerate() {
                let window = window::<CHANNELS>(above, current, below, index + channel);

                for (response, kernel) in responses.iter_mut().zip(kernels.iter()) {
                    *response = R::from_sum::<O>(apply(&window, kernel));
                }
            }
        }
    );
}

/// Largest absolute response of operator `O` over `orientations`
///
/// Writes `CHANNELS` magnitudes per pixel, arguments as in [`filter_responses`]
#[allow(clippy::too_many_arguments)]
pub fn filter_maximum_responses<O, M, const CHANNELS: usize, const N: usize>(
    source: &[u8], target: &mut [M], width: usize, height: usize, source_padding_elements: usize,
    target_padding_elements: usize, orientations: [Orientation; N], worker: Option<&Worker>
) where
    O: EdgeOperator,
    M: Magnitude
{
    let kernels = orientations.map(Orientation::kernel::<O>);

    filter_rows::<M, _, CHANNELS, 1>(
        source,
        target,
        width,
        height,
        source_padding_elements,
        target_padding_elements,
        worker,
        |above, current, below, index, pixel| {
            for (channel, magnitude) in pixel.iter_mut().enumerate() {
                let window = window::<CHANNELS>(above, current, below, index + channel);

                let maximum = kernels
                    .iter()
                    .map(|kernel| apply(&window, kernel).unsigned_abs())
                    .max()
                    .unwrap_or(0);

                *magnitude = M::from_maximum::<O>(maximum);
            }
        }
    );
}

/// A 3x3 gradient operator
///
/// The provided functions are the direct, monomorphized entry points,
/// e.g. `Scharr::filter::<i8, 3>(...)` for RGB input with normalized output.
pub trait EdgeOperator: Sized + Sync {
    const NAME: &'static str;
    /// 0° kernel
    const HORIZONTAL: [i32; 9];
    /// 90° kernel
    const VERTICAL: [i32; 9];
    /// 45° kernel
    const DIAGONAL_45: [i32; 9];
    /// 135° kernel
    const DIAGONAL_135: [i32; 9];
    /// Divisor bringing any response into `i8`
    const NORMALIZATION: i32;
    /// Divisor bringing any absolute response into `u8`
    const MAXIMUM_ABSOLUTE_NORMALIZATION: u32;

    /// 0° and 90° responses, `CHANNELS * 2` per pixel
    #[allow(clippy::too_many_arguments)]
    fn filter_horizontal_vertical<R: Response, const CHANNELS: usize>(
        source: &[u8], target: &mut [R], width: usize, height: usize,
        source_padding_elements: usize, target_padding_elements: usize, worker: Option<&Worker>
    ) {
        filter_responses::<Self, R, CHANNELS, 2>(
            source,
            target,
            width,
            height,
            source_padding_elements,
            target_padding_elements,
            HORIZONTAL_VERTICAL,
            worker
        );
    }

    /// 45° and 135° responses, `CHANNELS * 2` per pixel
    #[allow(clippy::too_many_arguments)]
    fn filter_diagonal<R: Response, const CHANNELS: usize>(
        source: &[u8], target: &mut [R], width: usize, height: usize,
        source_padding_elements: usize, target_padding_elements: usize, worker: Option<&Worker>
    ) {
        filter_responses::<Self, R, CHANNELS, 2>(
            source,
            target,
            width,
            height,
            source_padding_elements,
            target_padding_elements,
            DIAGONAL,
            worker
        );
    }

    /// 0°, 90°, 45° and 135° responses, `CHANNELS * 4` per pixel
    #[allow(clippy::too_many_arguments)]
    fn filter<R: Response, const CHANNELS: usize>(
        source: &[u8], target: &mut [R], width: usize, height: usize,
        source_padding_elements: usize, target_padding_elements: usize, worker: Option<&Worker>
    ) {
        filter_responses::<Self, R, CHANNELS, 4>(
            source,
            target,
            width,
            height,
            source_padding_elements,
            target_padding_elements,
            ALL_ORIENTATIONS,
            worker
        );
    }

    /// Largest absolute 0° or 90° response, `CHANNELS` per pixel
    #[allow(clippy::too_many_arguments)]
    fn filter_horizontal_vertical_maximum_absolute<M: Magnitude, const CHANNELS: usize>(
        source: &[u8], target: &mut [M], width: usize, height: usize,
        source_padding_elements: usize, target_padding_elements: usize, worker: Option<&Worker>
    ) {
        filter_maximum_responses::<Self, M, CHANNELS, 2>(
            source,
            target,
            width,
            height,
            source_padding_elements,
            target_padding_elements,
            HORIZONTAL_VERTICAL,
            worker
        );
    }

    /// Largest absolute response over all four orientations, `CHANNELS` per pixel
    #[allow(clippy::too_many_arguments)]
    fn filter_maximum_absolute<M: Magnitude, const CHANNELS: usize>(
        source: &[u8], target: &mut [M], width: usize, height: usize,
        source_padding_elements: usize, target_padding_elements: usize, worker: Option<&Worker>
    ) {
        filter_maximum_responses::<Self, M, CHANNELS, 4>(
            source,
            target,
            width,
            height,
            source_padding_elements,
            target_padding_elements,
            ALL_ORIENTATIONS,
            worker
        );
    }
}

/// Which responses a filter call produces
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterMode {
    /// 0° and 90° per channel
    HorizontalVertical,
    /// 45° and 135° per channel
    Diagonal,
    /// All four orientations per channel
    All,
    /// Largest absolute 0° or 90° response per channel
    HorizontalVerticalMaximumAbsolute,
    /// Largest absolute response of all four orientations per channel
    MaximumAbsolute
}

impl FilterMode {
    /// Output elements per source channel
    pub const fn outputs_per_channel(self) -> usize {
        match self {
            Self::HorizontalVertical | Self::Diagonal => 2,
            Self::All => 4,
            Self::HorizontalVerticalMaximumAbsolute | Self::MaximumAbsolute => 1
        }
    }

    pub const fn is_maximum_absolute(self) -> bool {
        matches!(
            self,
            Self::HorizontalVerticalMaximumAbsolute | Self::MaximumAbsolute
        )
    }
}

/// Output precision of a filter call
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ResponseType {
    /// 8 bit output, `i8` responses or `u8` magnitudes
    #[default]
    Normalized,
    /// 16 bit output, `i16` responses or `u16` magnitudes
    Raw
}

impl ResponseType {
    /// Element type of the output for `mode`
    pub const fn data_type(self, mode: FilterMode) -> DataType {
        match (self, mode.is_maximum_absolute()) {
            (Self::Normalized, false) => DataType::I8,
            (Self::Raw, false) => DataType::I16,
            (Self::Normalized, true) => DataType::U8,
            (Self::Raw, true) => DataType::U16
        }
    }
}

/// Interleaved 8 bit formats with 1 to 4 channels the filters accept
pub static FILTER_FORMATS: [PixelFormat; 6] = [
    PixelFormat::Y8,
    PixelFormat::YA16,
    PixelFormat::RGB24,
    PixelFormat::BGR24,
    PixelFormat::RGBA32,
    PixelFormat::BGRA32
];

/// Whether a gradient filter can read `format`
pub fn filter_supports(format: PixelFormat) -> bool {
    match format {
        PixelFormat::Generic(DataType::U8, channels) => channels.get() <= 4,
        _ => FILTER_FORMATS.contains(&format)
    }
}

/// Gradient filter over whole frames, choosing the monomorphized kernel at runtime
///
/// The output is a [`PixelFormat::Generic`] frame with
/// `channels * mode.outputs_per_channel()` elements per pixel.
///
/// # Example
/// ```
/// use zune_frame_core::pixel_format::PixelFormat;
/// use zune_frameprocs::frame::Frame;
/// use zune_frameprocs::gradient::{EdgeFilter, FilterMode, ResponseType};
/// use zune_frameprocs::scharr::Scharr;
/// use zune_frameprocs::traits::FrameOperation;
///
/// let frame = Frame::new(PixelFormat::RGB24, 8, 8).unwrap();
/// let responses = EdgeFilter::<Scharr>::new(FilterMode::All, ResponseType::Raw)
///     .execute(&frame, None)
///     .unwrap();
/// assert_eq!(responses.format().num_channels(), 12);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct EdgeFilter<O: EdgeOperator> {
    mode:      FilterMode,
    response:  ResponseType,
    _operator: core::marker::PhantomData<O>
}

impl<O: EdgeOperator> EdgeFilter<O> {
    #[must_use]
    pub fn new(mode: FilterMode, response: ResponseType) -> EdgeFilter<O> {
        EdgeFilter {
            mode,
            response,
            _operator: core::marker::PhantomData
        }
    }

    fn run<const CHANNELS: usize>(
        &self, frame: &Frame, target: &mut Frame, worker: Option<&Worker>
    ) -> Result<(), FrameErrors> {
        let (width, height) = frame.dimensions();
        let missing = || FrameErrors::GenericStr("Frame is missing a plane");

        let source = frame.plane(0).ok_or_else(missing)?;
        let source_padding = source.padding_elements();
        let source = source.data::<u8>()?;

        let target = target.plane_mut(0).ok_or_else(missing)?;
        let target_padding = target.padding_elements();

        match (self.mode, self.response) {
            (FilterMode::HorizontalVertical, ResponseType::Normalized) => O::filter_horizontal_vertical::<i8, CHANNELS>(
                source, target.data_mut()?, width, height, source_padding, target_padding, worker
            ),
            (FilterMode::HorizontalVertical, ResponseType::Raw) => O::filter_horizontal_vertical::<i16, CHANNELS>(
                source, target.data_mut()?, width, height, source_padding, target_padding, worker
            ),
            (FilterMode::Diagonal, ResponseType::Normalized) => O::filter_diagonal::<i8, CHANNELS>(
                source, target.data_mut()?, width, height, source_padding, target_padding, worker
            ),
            (FilterMode::Diagonal, ResponseType::Raw) => O::filter_diagonal::<i16, CHANNELS>(
                source, target.data_mut()?, width, height, source_padding, target_padding, worker
            ),
            (FilterMode::All, ResponseType::Normalized) => O::filter::<i8, CHANNELS>(
                source, target.data_mut()?, width, height, source_padding, target_padding, worker
            ),
            (FilterMode::All, ResponseType::Raw) => O::filter::<i16, CHANNELS>(
                source, target.data_mut()?, width, height, source_padding, target_padding, worker
            ),
            (FilterMode::HorizontalVerticalMaximumAbsolute, ResponseType::Normalized) => O::filter_horizontal_vertical_maximum_absolute::<u8, CHANNELS>(
                source, target.data_mut()?, width, height, source_padding, target_padding, worker
            ),
            (FilterMode::HorizontalVerticalMaximumAbsolute, ResponseType::Raw) => O::filter_horizontal_vertical_maximum_absolute::<u16, CHANNELS>(
                source, target.data_mut()?, width, height, source_padding, target_padding, worker
            ),
            (FilterMode::MaximumAbsolute, ResponseType::Normalized) => O::filter_maximum_absolute::<u8, CHANNELS>(
                source, target.data_mut()?, width, height, source_padding, target_padding, worker
            ),
            (FilterMode::MaximumAbsolute, ResponseType::Raw) => O::filter_maximum_absolute::<u16, CHANNELS>(
                source, target.data_mut()?, width, height, source_padding, target_padding, worker
            )
        }
        Ok(())
    }

    /// Filter `frame` into the existing frame `target`, whose padding is left untouched
    ///
    /// # Errors
    /// - Unsupported input format, or a target of the wrong format
    /// - Frames smaller than 3x3, or differing dimensions
    pub fn filter_into(
        &self, frame: &Frame, target: &mut Frame, worker: Option<&Worker>
    ) -> Result<(), FrameErrors> {
        let format = frame.format();
        let (width, height) = frame.dimensions();

        if !filter_supports(format) {
            warn!("{} filter does not support {:?}", O::NAME, format);
            return Err(FrameErrors::UnsupportedFormat(format, O::NAME, &FILTER_FORMATS));
        }
        if width < 3 || height < 3 {
            return Err(FrameErrors::InvalidDimensions(
                width,
                height,
                "gradient filters need at least 3x3 pixels"
            ));
        }
        if target.dimensions() != frame.dimensions() {
            return Err(FrameErrors::DimensionsMisMatch(
                width * height,
                target.width() * target.height()
            ));
        }
        let expected = self.output_format(format)?;
        if target.format() != expected {
            return Err(FrameErrors::GenericString(format!(
                "{} filter writes {:?} but the target is {:?}",
                O::NAME,
                expected,
                target.format()
            )));
        }
        trace!(
            "Running {} filter ({:?}, {:?}) on a {}x{} {:?} frame",
            O::NAME,
            self.mode,
            self.response,
            width,
            height,
            format
        );
        match format.num_channels() {
            1 => self.run::<1>(frame, target, worker),
            2 => self.run::<2>(frame, target, worker),
            3 => self.run::<3>(frame, target, worker),
            4 => self.run::<4>(frame, target, worker),
            _ => Err(FrameErrors::UnsupportedFormat(format, O::NAME, &FILTER_FORMATS))
        }
    }

    /// Format of the frame produced for an input of `format`
    ///
    /// # Errors
    /// If `format` isn't accepted by the filters
    pub fn output_format(&self, format: PixelFormat) -> Result<PixelFormat, FrameErrors> {
        if !filter_supports(format) {
            return Err(FrameErrors::UnsupportedFormat(format, O::NAME, &FILTER_FORMATS));
        }
        let channels = format.num_channels() * self.mode.outputs_per_channel();

        PixelFormat::generic(self.response.data_type(self.mode), channels as u8)
            .ok_or(FrameErrors::GenericStr("Filter output has no channels"))
    }
}

impl<O: EdgeOperator> FrameOperation for EdgeFilter<O> {
    fn name(&self) -> &'static str {
        O::NAME
    }

    fn execute_impl(&self, frame: &Frame, worker: Option<&Worker>) -> Result<Frame, FrameErrors> {
        let mut target = Frame::new(self.output_format(frame.format())?, frame.width(), frame.height())?;
        self.filter_into(frame, &mut target, worker)?;
        Ok(target)
    }

    fn supported_formats(&self) -> &'static [PixelFormat] {
        &FILTER_FORMATS
    }

    fn supports(&self, format: PixelFormat) -> bool {
        filter_supports(format)
    }
}
