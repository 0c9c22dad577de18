use std::io::Cursor;

use super::*;

fn encode(img: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let buf = encode(image::DynamicImage::ImageRgba8(img), image::ImageFormat::Png);

    let decoded = decode_image(&buf).unwrap();
    assert_eq!(decoded.size(), Size::new(1, 1));
    assert!(decoded.has_alpha);
    assert_eq!(
        decoded.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_rgb_is_opaque() {
    let img = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
    let buf = encode(image::DynamicImage::ImageRgb8(img), image::ImageFormat::Png);

    let decoded = decode_image(&buf).unwrap();
    assert!(!decoded.has_alpha);
    assert_eq!(decoded.size(), Size::new(3, 2));
    assert!(decoded.rgba8_premul.chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
}

#[test]
fn garbage_is_a_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, MontageError::Decode(_)));
}

#[test]
fn resize_to_same_size_shares_buffer() {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]));
    let decoded = decode_image(&encode(
        image::DynamicImage::ImageRgba8(img),
        image::ImageFormat::Png,
    ))
    .unwrap();
    let same = decoded.resized(Size::new(4, 4)).unwrap();
    assert!(Arc::ptr_eq(&same.rgba8_premul, &decoded.rgba8_premul));
}

#[test]
fn resize_keeps_flat_color_and_premul_invariant() {
    let img = image::RgbaImage::from_pixel(40, 20, image::Rgba([200, 100, 50, 255]));
    let decoded = decode_image(&encode(
        image::DynamicImage::ImageRgba8(img),
        image::ImageFormat::Png,
    ))
    .unwrap();

    let small = decoded.resized(Size::new(10, 5)).unwrap();
    assert_eq!(small.size(), Size::new(10, 5));
    assert_eq!(small.rgba8_premul.len(), 10 * 5 * 4);
    for px in small.rgba8_premul.chunks_exact(4) {
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3]);
        assert!((i32::from(px[0]) - 200).abs() <= 1);
    }
}
