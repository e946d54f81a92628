/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel format conversion and edge filtering over raw frames
//!
//! This crate converts frames between pixel layouts (bit depths, channel
//! counts, packed, planar), computes oriented Scharr, Sobel and Prewitt
//! gradients and detects edges with Canny.
//!
//! Every routine comes in two flavours
//! - Direct generic functions over borrowed slices, e.g
//!   [`Scharr::filter`](gradient::EdgeOperator::filter) or
//!   [`canny_filter`](canny::canny_filter). Their preconditions are only
//!   checked with debug assertions.
//! - Runtime dispatchers which inspect the frame format and return an
//!   error for unsupported combinations, e.g.
//!   [`FrameConverter`](converter::FrameConverter) and the
//!   [`FrameOperation`](traits::FrameOperation) implementations.
//!
//! # Example
//! - Detect edges of an RGB frame using four threads
//! ```
//! use zune_frame_core::pixel_format::PixelFormat;
//! use zune_frameprocs::canny::Canny;
//! use zune_frameprocs::frame::Frame;
//! use zune_frameprocs::gradient::ResponseType;
//! use zune_frameprocs::traits::FrameOperation;
//! use zune_frameprocs::worker::Worker;
//!
//! let frame = Frame::new(PixelFormat::RGB24, 100, 100).unwrap();
//! let worker = Worker::new(4);
//! let edges = Canny::new(30, 60, ResponseType::Normalized)
//!     .execute(&frame, Some(&worker))
//!     .unwrap();
//! assert_eq!(edges.format(), PixelFormat::Y8);
//! ```
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

pub mod canny;
pub mod converter;
pub mod errors;
pub mod flip;
pub mod frame;
pub mod gradient;
pub mod prewitt;
pub mod scharr;
pub mod sobel;
pub mod traits;
pub mod worker;
