use super::*;

#[test]
fn stride_is_padded_to_four_bytes() {
    assert_eq!(PixelFormat::Argb32.stride_for_width(3), 12);
    assert_eq!(PixelFormat::Rgb24.stride_for_width(1), 4);
    assert_eq!(PixelFormat::Rgb565.stride_for_width(1), 4);
    assert_eq!(PixelFormat::Rgb565.stride_for_width(2), 4);
    assert_eq!(PixelFormat::Rgb565.stride_for_width(3), 8);
    assert_eq!(PixelFormat::Rgb30.stride_for_width(0), 0);
}

#[test]
fn format_names_round_trip() {
    for f in PixelFormat::ALL {
        assert_eq!(PixelFormat::from_name(f.name()), Some(f));
    }
    assert_eq!(PixelFormat::from_name("a8"), None);
}

#[test]
fn format_serde_uses_lowercase_names() {
    let s = serde_json::to_string(&PixelFormat::Rgb565).unwrap();
    assert_eq!(s, "\"rgb16_565\"");
    let f: PixelFormat = serde_json::from_str("\"rgb24\"").unwrap();
    assert_eq!(f, PixelFormat::Rgb24);
}

#[test]
fn blank_image_is_zeroed_and_sized() {
    let img = ImageDescriptor::blank(3, 2, PixelFormat::Rgb565).unwrap();
    assert_eq!(img.data.len(), 16);
    assert!(img.data.iter().all(|&b| b == 0));
    assert_eq!(img.stride(), 8);
}

#[test]
fn blank_rejects_oversized_dimensions() {
    assert!(matches!(
        ImageDescriptor::blank(100_000, 100_000, PixelFormat::Argb32),
        Err(DrawError::Dimension(_))
    ));
    assert!(matches!(
        ImageDescriptor::blank(u32::MAX, 1, PixelFormat::Argb32),
        Err(DrawError::Dimension(_))
    ));
}

#[test]
fn dimensions_are_checked() {
    assert_eq!(checked_dimensions(0, 0, MAX_DIMENSION).unwrap(), (0, 0));
    assert!(matches!(
        checked_dimensions(-1, 4, MAX_DIMENSION),
        Err(DrawError::Dimension(_))
    ));
    assert!(matches!(
        checked_dimensions(4, 32769, MAX_DIMENSION),
        Err(DrawError::Dimension(_))
    ));
    assert!(matches!(
        checked_dimensions(65, 4, 64),
        Err(DrawError::Dimension(_))
    ));
}

#[test]
fn padded_copy_zero_fills_short_data() {
    let img = ImageDescriptor {
        width: 2,
        height: 2,
        format: PixelFormat::Rgb24,
        data: vec![7; 5],
    };
    let (w, h, data) = img.padded_copy(MAX_DIMENSION).unwrap();
    assert_eq!((w, h), (2, 2));
    assert_eq!(data.len(), 16);
    assert_eq!(&data[..5], &[7; 5]);
    assert!(data[5..].iter().all(|&b| b == 0));
}

#[test]
fn padded_copy_rejects_oversized_data() {
    let img = ImageDescriptor {
        width: 1,
        height: 1,
        format: PixelFormat::Argb32,
        data: vec![0; 5],
    };
    assert!(matches!(
        img.padded_copy(MAX_DIMENSION),
        Err(DrawError::Format(_))
    ));
}
