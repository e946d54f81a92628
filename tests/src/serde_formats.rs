/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_frame_core::conversion_flag::ConversionFlag;
use zune_frame_core::data_type::DataType;
use zune_frame_core::pixel_format::PixelFormat;

#[test]
fn test_formats_serialize_as_names() {
    assert_eq!(serde_json::to_string(&PixelFormat::RGB565).unwrap(), "\"RGB565\"");
    assert_eq!(serde_json::to_string(&DataType::I16).unwrap(), "\"I16\"");
    assert_eq!(
        serde_json::to_string(&ConversionFlag::FlippedAndMirrored).unwrap(),
        "\"FlippedAndMirrored\""
    );
    let formats = [PixelFormat::Y8, PixelFormat::Y10Packed];
    assert_eq!(serde_json::to_string(&formats).unwrap(), "[\"Y8\",\"Y10Packed\"]");
}
