use std::io::Cursor;

use super::*;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([0, 128, 255, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn failed_sources_are_dropped_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let alien = dir.path().join("alien.png");
    std::fs::write(&alien, png(3, 3)).unwrap();

    let loaded = load_tagged(&[
        TaggedSource::from_bytes("Sunny", png(2, 1)),
        TaggedSource::from_path("Vally", dir.path().join("missing.png")),
        TaggedSource::from_bytes("Broken", b"nope".to_vec()),
        TaggedSource::from_path("Alien", &alien),
    ]);

    let tags: Vec<&str> = loaded.iter().map(|l| l.tag.as_str()).collect();
    assert_eq!(tags, ["Sunny", "Alien"]);
    assert_eq!(loaded[0].image.width, 2);
    assert_eq!(loaded[1].image.width, 3);
}

#[test]
fn missing_path_is_a_decode_error() {
    let err = load_source(&ImageSource::Path("/definitely/not/here.png".into())).unwrap_err();
    assert!(matches!(err, MontageError::Decode(_)));
    assert!(err.to_string().contains("here.png"));
}
