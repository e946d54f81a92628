/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Runtime kernel selection for whole frames
use std::sync::Once;

use zune_frame_core::conversion_flag::ConversionFlag;
use zune_frame_core::data_type::DataType;
use zune_frame_core::log::{trace, warn};
use zune_frame_core::options::ConverterOptions;
use zune_frame_core::pixel_format::{PixelFormat, ALL_PIXEL_FORMATS};

use crate::converter::channels::{ColorToLuma, ShuffleChannels, ALPHA};
use crate::converter::packed::{Packed565ToLuma, Unpack565};
use crate::converter::planar::{ExtractChannel, InterleavePlanes};
use crate::converter::wide::Narrow16;
use crate::converter::y10_packed::{
    is_valid_gamma, Y10PackedToColor24, Y10PackedToY10, Y10PackedToY8, Y10PackedToY8Gamma,
    Y10PackedToY8GammaApproximated
};
use crate::converter::{
    convert_generic_pixel_format, convert_planes_to_interleaved, CopyRow, PlanesRowKernel,
    RowKernel
};
use crate::errors::FrameErrors;
use crate::flip::{can_mirror, row_reverse_function};
use crate::frame::{Frame, Plane};
use crate::traits::{Element, FrameOperation};
use crate::worker::Worker;

static START_565: Once = Once::new();
static START_RGBA64: Once = Once::new();

/// The kernel family serving a pair of formats, with its parameters
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Route {
    Copy,
    Shuffle1To2([usize; 2]),
    Shuffle1To3([usize; 3]),
    Shuffle1To4([usize; 4]),
    Shuffle2To1([usize; 1]),
    Shuffle2To3([usize; 3]),
    Shuffle2To4([usize; 4]),
    Shuffle3To3([usize; 3]),
    Shuffle3To4([usize; 4]),
    Shuffle4To3([usize; 3]),
    Shuffle4To4([usize; 4]),
    Luma3 { red_first: bool },
    Luma4 { red_first: bool },
    Unpack565 { high_first: bool },
    Packed565ToLuma { red_high: bool },
    Narrow1To1 { shift: u32 },
    Narrow4To3([usize; 3]),
    Narrow4To4([usize; 4]),
    Y10PackedToY8,
    Y10PackedToY10,
    Y10PackedToColor24,
    /// Planes to interleaved, pattern per target channel
    Interleave3([usize; 3]),
    Interleave4([usize; 4]),
    /// Interleaved to planes, source channel per plane
    Deinterleave3([usize; 3]),
    Deinterleave4([usize; 3])
}

fn route(from: PixelFormat, to: PixelFormat) -> Option<Route> {
    use PixelFormat::*;

    const IN_ORDER: [usize; 3] = [0, 1, 2];
    const SWAPPED: [usize; 3] = [2, 1, 0];

    let route = match (from, to) {
        (a, b) if a == b => Route::Copy,

        (Y8, YA16) => Route::Shuffle1To2([0, ALPHA]),
        (Y8, RGB24 | BGR24) => Route::Shuffle1To3([0, 0, 0]),
        (Y8, RGBA32 | BGRA32) => Route::Shuffle1To4([0, 0, 0, ALPHA]),

        (Y10, Y8) => Route::Narrow1To1 { shift: 2 },
        (Y16, Y8) => Route::Narrow1To1 { shift: 8 },

        (YA16, Y8) => Route::Shuffle2To1([0]),
        (YA16, RGB24 | BGR24) => Route::Shuffle2To3([0, 0, 0]),
        (YA16, RGBA32 | BGRA32) => Route::Shuffle2To4([0, 0, 0, 1]),

        (RGB24, BGR24) | (BGR24, RGB24) => Route::Shuffle3To3(SWAPPED),
        (RGB24, RGBA32) | (BGR24, BGRA32) => Route::Shuffle3To4([0, 1, 2, ALPHA]),
        (RGB24, BGRA32) | (BGR24, RGBA32) => Route::Shuffle3To4([2, 1, 0, ALPHA]),
        (RGB24, Y8) => Route::Luma3 { red_first: true },
        (BGR24, Y8) => Route::Luma3 { red_first: false },
        (RGB24, R_G_B24) => Route::Deinterleave3(IN_ORDER),
        (BGR24, R_G_B24) => Route::Deinterleave3(SWAPPED),

        (RGBA32, RGB24) | (BGRA32, BGR24) => Route::Shuffle4To3(IN_ORDER),
        (RGBA32, BGR24) | (BGRA32, RGB24) => Route::Shuffle4To3(SWAPPED),
        (RGBA32, BGRA32) | (BGRA32, RGBA32) => Route::Shuffle4To4([2, 1, 0, 3]),
        (RGBA32, Y8) => Route::Luma4 { red_first: true },
        (BGRA32, Y8) => Route::Luma4 { red_first: false },
        (RGBA32, R_G_B24) => Route::Deinterleave4(IN_ORDER),
        (BGRA32, R_G_B24) => Route::Deinterleave4(SWAPPED),

        // first named channel in the low bits
        (RGB565, RGB24) | (BGR565, BGR24) => Route::Unpack565 { high_first: false },
        (RGB565, BGR24) | (BGR565, RGB24) => Route::Unpack565 { high_first: true },
        (RGB565, Y8) => Route::Packed565ToLuma { red_high: false },
        (BGR565, Y8) => Route::Packed565ToLuma { red_high: true },

        (RGBA64, RGB24) => Route::Narrow4To3(IN_ORDER),
        (RGBA64, RGBA32) => Route::Narrow4To4([0, 1, 2, 3]),
        (RGBA64, BGRA32) => Route::Narrow4To4([2, 1, 0, 3]),

        (Y10Packed, Y8) => Route::Y10PackedToY8,
        (Y10Packed, Y10) => Route::Y10PackedToY10,
        (Y10Packed, RGB24 | BGR24) => Route::Y10PackedToColor24,

        (R_G_B24, RGB24) => Route::Interleave3(IN_ORDER),
        (R_G_B24, BGR24) => Route::Interleave3(SWAPPED),
        (R_G_B24, RGBA32) => Route::Interleave4([0, 1, 2, ALPHA]),
        (R_G_B24, BGRA32) => Route::Interleave4([2, 1, 0, ALPHA]),

        _ => return None
    };
    Some(route)
}

#[allow(clippy::too_many_arguments)]
fn run<S: Element, T: Element, K: RowKernel<S, T>>(
    source: &Plane, target: &mut Plane, target_format: PixelFormat, target_plane: usize,
    width: usize, height: usize, flag: ConversionFlag, kernel: &K, worker: Option<&Worker>
) -> Result<(), FrameErrors> {
    let are_continuous = source.is_continuous() && target.is_continuous();
    let source_stride = source.stride_elements();
    let target_stride = target.stride_elements();

    convert_generic_pixel_format(
        source.data::<S>()?,
        target.data_mut::<T>()?,
        width,
        height,
        source_stride,
        target_stride,
        flag,
        kernel,
        row_reverse_function::<T>(target_format, target_plane),
        are_continuous,
        worker
    );
    Ok(())
}

/// Converts whole frames between pixel formats, picking the kernel at runtime
///
/// # Example
/// ```
/// use zune_frame_core::conversion_flag::ConversionFlag;
/// use zune_frame_core::pixel_format::PixelFormat;
/// use zune_frameprocs::converter::FrameConverter;
/// use zune_frameprocs::frame::Frame;
///
/// let source = Frame::from_data::<u16>(PixelFormat::BGR565, 2, 1, 0, &[0xFFFF, 0]).unwrap();
/// let target = FrameConverter::default()
///     .convert(&source, PixelFormat::BGR24, ConversionFlag::Normal, None)
///     .unwrap();
/// assert_eq!(target.plane(0).unwrap().data::<u8>().unwrap(), &[255, 255, 255, 0, 0, 0]);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct FrameConverter {
    options: ConverterOptions
}

impl FrameConverter {
    pub fn new(options: ConverterOptions) -> FrameConverter {
        FrameConverter { options }
    }

    pub const fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Whether a conversion from `from` to `to` exists
    pub fn is_supported(from: PixelFormat, to: PixelFormat) -> bool {
        route(from, to).is_some()
    }

    /// Whether a conversion from `from` to `to` exists and can honour `flag`
    pub fn is_supported_with_flag(from: PixelFormat, to: PixelFormat, flag: ConversionFlag) -> bool {
        FrameConverter::is_supported(from, to) && (!flag.is_mirrored() || can_mirror(to))
    }

    /// Convert `source` into a newly allocated frame of format `to`, without padding
    ///
    /// # Errors
    /// See [`FrameConverter::convert_into`]
    pub fn convert(
        &self, source: &Frame, to: PixelFormat, flag: ConversionFlag, worker: Option<&Worker>
    ) -> Result<Frame, FrameErrors> {
        let mut target = Frame::new(to, source.width(), source.height())?;
        self.convert_into(source, &mut target, flag, worker)?;
        Ok(target)
    }

    /// Convert `source` into the existing frame `target`
    ///
    /// Both frames may carry row padding, target padding is left untouched.
    ///
    /// # Errors
    /// - [`FrameErrors::DimensionsMisMatch`] if the frames differ in size
    /// - [`FrameErrors::InvalidDimensions`] if the frame exceeds the configured limits
    /// - [`FrameErrors::UnsupportedConversion`] if no kernel converts between the formats
    /// - [`FrameErrors::UnsupportedFlag`] if the target can't be mirrored
    /// - [`FrameErrors::InvalidGamma`] if a gamma corrected conversion has a gamma outside (0, 2)
    pub fn convert_into(
        &self, source: &Frame, target: &mut Frame, flag: ConversionFlag, worker: Option<&Worker>
    ) -> Result<(), FrameErrors> {
        let (from, to) = (source.format(), target.format());
        let (width, height) = source.dimensions();

        if width != target.width() {
            return Err(FrameErrors::DimensionsMisMatch(width, target.width()));
        }
        if height != target.height() {
            return Err(FrameErrors::DimensionsMisMatch(height, target.height()));
        }
        if width > self.options.get_max_width() || height > self.options.get_max_height() {
            return Err(FrameErrors::InvalidDimensions(
                width,
                height,
                "frame larger than the configured maximum"
            ));
        }
        let Some(route) = route(from, to) else {
            warn!("No conversion from {:?} to {:?}", from, to);
            return Err(FrameErrors::UnsupportedConversion(from, to));
        };
        if flag.is_mirrored() && !can_mirror(to) {
            warn!("Cannot mirror rows of {:?}", to);
            return Err(FrameErrors::UnsupportedFlag(to, flag));
        }
        trace!(
            "Converting {}x{} frame from {:?} to {:?} ({:?})",
            width,
            height,
            from,
            to,
            flag
        );
        self.execute_route(route, source, target, flag, worker)
    }

    fn execute_route(
        &self, route: Route, source: &Frame, target: &mut Frame, flag: ConversionFlag,
        worker: Option<&Worker>
    ) -> Result<(), FrameErrors> {
        let (width, height) = source.dimensions();
        let to = target.format();
        let alpha = self.options.get_alpha_value();

        let missing = || FrameErrors::GenericStr("Frame is missing a plane");
        let src = source.plane(0).ok_or_else(missing)?;

        macro_rules! single {
            ($s:ty, $t:ty, $kernel:expr) => {{
                let dst = target.plane_mut(0).ok_or_else(missing)?;
                run::<$s, $t, _>(src, dst, to, 0, width, height, flag, &$kernel, worker)
            }};
        }

        match route {
            Route::Copy => {
                let from = source.format();
                let group = from.width_multiple();

                for (plane, (src, dst)) in source
                    .planes()
                    .iter()
                    .zip(target.planes_mut().iter_mut())
                    .enumerate()
                {
                    let kernel = CopyRow::new(from.plane_row_elements(plane, group), group);
                    match from.data_type() {
                        DataType::U8 => {
                            run::<u8, u8, _>(src, dst, to, plane, width, height, flag, &kernel, worker)?
                        }
                        DataType::I8 => {
                            run::<i8, i8, _>(src, dst, to, plane, width, height, flag, &kernel, worker)?
                        }
                        DataType::U16 => run::<u16, u16, _>(
                            src, dst, to, plane, width, height, flag, &kernel, worker
                        )?,
                        DataType::I16 => run::<i16, i16, _>(
                            src, dst, to, plane, width, height, flag, &kernel, worker
                        )?
                    }
                }
                Ok(())
            }
            Route::Shuffle1To2(pattern) => {
                single!(u8, u8, ShuffleChannels::<1, 2>::new(pattern, alpha))
            }
            Route::Shuffle1To3(pattern) => {
                single!(u8, u8, ShuffleChannels::<1, 3>::new(pattern, alpha))
            }
            Route::Shuffle1To4(pattern) => {
                single!(u8, u8, ShuffleChannels::<1, 4>::new(pattern, alpha))
            }
            Route::Shuffle2To1(pattern) => {
                single!(u8, u8, ShuffleChannels::<2, 1>::new(pattern, alpha))
            }
            Route::Shuffle2To3(pattern) => {
                single!(u8, u8, ShuffleChannels::<2, 3>::new(pattern, alpha))
            }
            Route::Shuffle2To4(pattern) => {
                single!(u8, u8, ShuffleChannels::<2, 4>::new(pattern, alpha))
            }
            Route::Shuffle3To3(pattern) => {
                single!(u8, u8, ShuffleChannels::<3, 3>::new(pattern, alpha))
            }
            Route::Shuffle3To4(pattern) => {
                single!(u8, u8, ShuffleChannels::<3, 4>::new(pattern, alpha))
            }
            Route::Shuffle4To3(pattern) => {
                single!(u8, u8, ShuffleChannels::<4, 3>::new(pattern, alpha))
            }
            Route::Shuffle4To4(pattern) => {
                single!(u8, u8, ShuffleChannels::<4, 4>::new(pattern, alpha))
            }
            Route::Luma3 { red_first: true } => single!(u8, u8, ColorToLuma::<3>::red_first()),
            Route::Luma3 { red_first: false } => single!(u8, u8, ColorToLuma::<3>::blue_first()),
            Route::Luma4 { red_first: true } => single!(u8, u8, ColorToLuma::<4>::red_first()),
            Route::Luma4 { red_first: false } => single!(u8, u8, ColorToLuma::<4>::blue_first()),
            Route::Unpack565 { high_first } => single!(u16, u8, Unpack565::new(high_first)),
            Route::Packed565ToLuma { red_high } => {
                #[cfg(all(feature = "sse2", any(target_arch = "x86", target_arch = "x86_64")))]
                {
                    use crate::converter::sse2::Packed565ToLumaSse2;

                    if self.options.use_sse2() {
                        if let Some(kernel) = Packed565ToLumaSse2::try_new(red_high) {
                            START_565.call_once(|| {
                                trace!("Using SSE2 565 to luma kernel");
                            });
                            return single!(u16, u8, kernel);
                        }
                    }
                }
                START_565.call_once(|| {
                    trace!("Using scalar 565 to luma kernel");
                });
                single!(u16, u8, Packed565ToLuma::new(red_high))
            }
            Route::Narrow1To1 { shift } => single!(u16, u8, Narrow16::<1, 1>::with_shift([0], shift)),
            Route::Narrow4To3(pattern) => single!(u16, u8, Narrow16::<4, 3>::high_byte(pattern)),
            Route::Narrow4To4(pattern) => {
                let kernel = Narrow16::<4, 4>::high_byte(pattern);

                #[cfg(all(feature = "sse2", any(target_arch = "x86", target_arch = "x86_64")))]
                {
                    use crate::converter::sse2::Rgba64ToRgba32Sse2;

                    if self.options.use_sse2() && kernel.is_identity_high_byte() {
                        if let Some(kernel) = Rgba64ToRgba32Sse2::try_new() {
                            START_RGBA64.call_once(|| {
                                trace!("Using SSE2 RGBA64 to RGBA32 kernel");
                            });
                            return single!(u16, u8, kernel);
                        }
                    }
                }
                START_RGBA64.call_once(|| {
                    trace!("Using scalar RGBA64 narrowing kernel");
                });
                single!(u16, u8, kernel)
            }
            Route::Y10PackedToY8 => match self.options.get_gamma() {
                None => single!(u8, u8, Y10PackedToY8),
                Some(gamma) if !is_valid_gamma(gamma) => {
                    warn!("Gamma {} outside (0, 2)", gamma);
                    Err(FrameErrors::InvalidGamma(gamma))
                }
                Some(gamma) if self.options.get_allow_approximation() => {
                    single!(u8, u8, Y10PackedToY8GammaApproximated::new(gamma))
                }
                Some(gamma) => single!(u8, u8, Y10PackedToY8Gamma::new(gamma))
            },
            Route::Y10PackedToY10 => single!(u8, u16, Y10PackedToY10),
            Route::Y10PackedToColor24 => single!(u8, u8, Y10PackedToColor24),
            Route::Interleave3(pattern) => self.interleave(
                source,
                target,
                flag,
                &InterleavePlanes::<3, 3>::new(pattern, alpha),
                worker
            ),
            Route::Interleave4(pattern) => self.interleave(
                source,
                target,
                flag,
                &InterleavePlanes::<3, 4>::new(pattern, alpha),
                worker
            ),
            Route::Deinterleave3(channels) => {
                for (plane, dst) in target.planes_mut().iter_mut().enumerate() {
                    let kernel = ExtractChannel::<3>::new(channels[plane]);
                    run::<u8, u8, _>(src, dst, to, plane, width, height, flag, &kernel, worker)?;
                }
                Ok(())
            }
            Route::Deinterleave4(channels) => {
                for (plane, dst) in target.planes_mut().iter_mut().enumerate() {
                    let kernel = ExtractChannel::<4>::new(channels[plane]);
                    run::<u8, u8, _>(src, dst, to, plane, width, height, flag, &kernel, worker)?;
                }
                Ok(())
            }
        }
    }

    fn interleave<K: PlanesRowKernel<u8, u8, 3>>(
        &self, source: &Frame, target: &mut Frame, flag: ConversionFlag, kernel: &K,
        worker: Option<&Worker>
    ) -> Result<(), FrameErrors> {
        let (width, height) = source.dimensions();
        let to = target.format();

        let planes = source.planes();
        if planes.len() != 3 {
            return Err(FrameErrors::DimensionsMisMatch(3, planes.len()));
        }
        let sources = [
            planes[0].data::<u8>()?,
            planes[1].data::<u8>()?,
            planes[2].data::<u8>()?
        ];
        let strides = [
            planes[0].stride_elements(),
            planes[1].stride_elements(),
            planes[2].stride_elements()
        ];
        let dst = target
            .plane_mut(0)
            .ok_or(FrameErrors::GenericStr("Frame is missing a plane"))?;
        let target_stride = dst.stride_elements();

        convert_planes_to_interleaved(
            sources,
            dst.data_mut::<u8>()?,
            width,
            height,
            strides,
            target_stride,
            flag,
            kernel,
            row_reverse_function::<u8>(to, 0),
            worker
        );
        Ok(())
    }
}

/// Convert a frame to another pixel format
///
/// # Example
/// ```
/// use zune_frame_core::conversion_flag::ConversionFlag;
/// use zune_frame_core::pixel_format::PixelFormat;
/// use zune_frameprocs::converter::Convert;
/// use zune_frameprocs::frame::Frame;
/// use zune_frameprocs::traits::FrameOperation;
///
/// let frame = Frame::new(PixelFormat::RGB24, 10, 10).unwrap();
/// let gray = Convert::new(PixelFormat::Y8, ConversionFlag::Flipped)
///     .execute(&frame, None)
///     .unwrap();
/// assert_eq!(gray.format(), PixelFormat::Y8);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Convert {
    target:  PixelFormat,
    flag:    ConversionFlag,
    options: ConverterOptions
}

impl Convert {
    #[must_use]
    pub fn new(target: PixelFormat, flag: ConversionFlag) -> Convert {
        Convert {
            target,
            flag,
            options: ConverterOptions::default()
        }
    }

    #[must_use]
    pub fn set_options(mut self, options: ConverterOptions) -> Convert {
        self.options = options;
        self
    }
}

impl FrameOperation for Convert {
    fn name(&self) -> &'static str {
        "Convert"
    }

    fn execute_impl(&self, frame: &Frame, worker: Option<&Worker>) -> Result<Frame, FrameErrors> {
        FrameConverter::new(self.options).convert(frame, self.target, self.flag, worker)
    }

    fn supported_formats(&self) -> &'static [PixelFormat] {
        &ALL_PIXEL_FORMATS
    }

    fn supports(&self, format: PixelFormat) -> bool {
        FrameConverter::is_supported_with_flag(format, self.target, self.flag)
    }
}
