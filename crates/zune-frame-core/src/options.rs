/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Options respected by frame conversions and filters

/// Options that are flags
#[derive(Copy, Debug, Clone)]
struct ConverterFlags {
    /// Whether the routines should use unsafe platform specific intrinsics
    ///
    /// This will also shut down platform specific intrinsics `(zune_use_{ext})` values
    zune_use_unsafe: bool,
    /// Whether we should use SSE2.
    ///
    /// Only consulted if `zune_use_unsafe` is true
    zune_use_sse2:   bool,
    /// Whether a conversion may trade exactness for speed where an
    /// approximated kernel exists
    allow_approximation: bool
}

impl Default for ConverterFlags {
    fn default() -> Self {
        fast_flags()
    }
}

/// Scalar converter flags
///
/// All platform intrinsics are disabled
fn safe_flags() -> ConverterFlags {
    ConverterFlags {
        zune_use_unsafe:     false,
        zune_use_sse2:       false,
        allow_approximation: false
    }
}

/// Fast converter flags
///
/// Enables all intrinsics + unsafe routines
fn fast_flags() -> ConverterFlags {
    ConverterFlags {
        zune_use_unsafe:     true,
        zune_use_sse2:       true,
        allow_approximation: false
    }
}

/// Converter options
///
/// Direct kernels do not read options, the runtime dispatchers
/// (`FrameConverter`, the filter and canny comfort functions) do.
#[derive(Debug, Copy, Clone)]
pub struct ConverterOptions {
    /// Value written into the alpha channel when the source format has
    /// no alpha but the target format has one.
    ///
    /// - Default value: 255
    alpha_value:    u8,
    /// Maximum width accepted by the dispatchers
    ///
    /// - Default value: 1 << 16
    max_width:      usize,
    /// Maximum height accepted by the dispatchers
    ///
    /// - Default value: 1 << 16
    max_height:     usize,
    /// Gamma applied by conversions that narrow packed 10 bit samples,
    /// `Y8 = 255 * (Y10 / 1023) ^ gamma`, range (0, 2)
    ///
    /// - Default value: None, conversions are linear
    gamma:          Option<f32>,
    /// Boolean flags that influence conversion
    flags:          ConverterFlags
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            alpha_value:  u8::MAX,
            max_width:    1 << 16,
            max_height:   1 << 16,
            gamma:        None,
            flags:        ConverterFlags::default()
        }
    }
}

/// Initializers
impl ConverterOptions {
    /// Create options setting most configurable options to their
    /// safe counterparts.
    ///
    /// Platform specific intrinsics are disabled and the scalar kernels run.
    pub fn new_safe() -> ConverterOptions {
        let mut options = ConverterOptions::default();
        options.flags = safe_flags();
        options
    }

    /// Create options which enable platform specific code paths.
    ///
    /// This is the same as `default`. Intrinsics are still only used if
    /// the cargo feature is enabled and the CPU supports them at runtime.
    pub fn new_fast() -> ConverterOptions {
        ConverterOptions::default()
    }
}

impl ConverterOptions {
    /// Get the value written to a freshly added alpha channel
    pub const fn get_alpha_value(&self) -> u8 {
        self.alpha_value
    }

    /// Get maximum width a dispatcher accepts
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height a dispatcher accepts
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true if the routines should use unsafe
    /// platform intrinsics where possible
    pub const fn get_use_unsafe(&self) -> bool {
        self.flags.zune_use_unsafe
    }

    /// Get the gamma value for gamma corrected conversions, if set
    pub const fn get_gamma(&self) -> Option<f32> {
        self.gamma
    }

    /// Return true if approximated kernels may replace exact ones
    pub const fn get_allow_approximation(&self) -> bool {
        self.flags.allow_approximation
    }

    /// Return true if SSE2 routines may be used.
    ///
    /// This is false whenever unsafe routines are disabled.
    pub const fn use_sse2(&self) -> bool {
        self.flags.zune_use_unsafe & self.flags.zune_use_sse2
    }

    /// Set the value written into a freshly added alpha channel
    ///
    /// # Arguments
    ///
    /// * `alpha`: The alpha value, e.g. 255 for opaque pixels
    ///
    /// returns: ConverterOptions
    pub fn set_alpha_value(mut self, alpha: u8) -> Self {
        self.alpha_value = alpha;
        self
    }

    /// Set maximum width for which dispatchers refuse larger frames
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which dispatchers refuse larger frames
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the gamma applied when narrowing packed 10 bit samples
    ///
    /// # Arguments
    ///
    /// * `gamma`: Exponent of `255 * (Y10 / 1023) ^ gamma`, range (0, 2).
    ///  Dispatchers refuse values outside the range.
    ///
    /// returns: ConverterOptions
    pub fn set_gamma(mut self, gamma: f32) -> Self {
        self.gamma = Some(gamma);
        self
    }

    /// Go back to linear conversions
    pub fn clear_gamma(mut self) -> Self {
        self.gamma = None;
        self
    }

    /// Allow approximated kernels, e.g. a piecewise linear gamma curve
    /// instead of the exact one
    pub fn set_allow_approximation(mut self, yes: bool) -> Self {
        self.flags.allow_approximation = yes;
        self
    }

    /// Whether the routines can use unsafe platform specific
    /// intrinsics when necessary
    ///
    /// Platform intrinsics are implemented for kernels which
    /// the compiler can't auto-vectorize.
    ///
    /// Treat this with caution, disabling it will cause slowdowns but
    /// it's provided mainly for debugging use.
    pub fn set_use_unsafe(mut self, yes: bool) -> Self {
        self.flags.zune_use_unsafe = yes;
        self
    }

    /// Set whether SSE2 routines may be used
    pub fn set_use_sse2(mut self, yes: bool) -> Self {
        self.flags.zune_use_sse2 = yes;
        self
    }
}
