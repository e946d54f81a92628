/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core descriptors shared by the frame processing crates
//!
//! This crate carries no image memory, it describes it.
//!
//! It currently contains
//!
//! - Element data types used to store samples
//! - Pixel formats and the memory layout each format implies
//! - Conversion flags (flip and mirror)
//! - Converter options
//! - Logging macros which compile to nothing when the `log` feature is disabled
//!
//! # Features
//!  - `std`: Enables std facilities, without it the crate is `#[no_std]`
//!
//!  - `serde`: Enables serializing of the descriptors
//!
//!  - `log`: Routes the logging macros to the `log` crate
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod conversion_flag;
pub mod data_type;
#[cfg(not(feature = "log"))]
pub mod log;
pub mod options;
pub mod pixel_format;
pub mod serde;

#[cfg(feature = "log")]
pub use log;
