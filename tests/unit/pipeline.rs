use super::*;
use crate::foundation::core::Canvas;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn request(prompt: &str, tags: &[&str]) -> GenerateRequest {
    GenerateRequest {
        prompt: prompt.to_string(),
        images: tags
            .iter()
            .map(|t| TaggedSource::from_bytes(*t, png_bytes(8, 8, [255, 0, 0, 255])))
            .collect(),
        output: OutputKind::Still,
    }
}

struct Canned(Elaboration);

impl PromptElaborator for Canned {
    fn elaborate(&self, _prompt: &str, _tags: &[TagId]) -> MontageResult<Elaboration> {
        Ok(self.0.clone())
    }

    fn refine(&self, original: &str, _feedback: &str) -> MontageResult<String> {
        Ok(original.to_string())
    }
}

#[test]
fn validate_rejects_blank_prompt_and_no_images() {
    assert!(matches!(
        validate_request(&request("   ", &["a"])),
        Err(MontageError::InvalidInput(_))
    ));
    assert!(matches!(
        validate_request(&request("@a", &[])),
        Err(MontageError::InvalidInput(_))
    ));
}

#[test]
fn validate_rejects_duplicate_tags_and_keeps_order() {
    assert!(validate_request(&request("@a", &["a", "b", "a"])).is_err());
    let tags = validate_request(&request("@a", &["c", "a", "b"])).unwrap();
    assert_eq!(tags, [TagId::new("c"), TagId::new("a"), TagId::new("b")]);
}

#[test]
fn canvas_override_replaces_prompt_canvas() {
    let mut options = RenderOptions::default();
    let tags = [TagId::new("a")];
    let d = resolve_directive("@a landscape", &tags, OutputKind::Still, &options);
    assert_eq!(d.canvas, Canvas::new(1920, 1080).unwrap());

    options.canvas = Some(Canvas::new(300, 200).unwrap());
    let d = resolve_directive("@a landscape", &tags, OutputKind::Still, &options);
    assert_eq!(d.canvas, Canvas::new(300, 200).unwrap());
}

#[test]
fn elaborator_png_is_used_verbatim() {
    let png = png_bytes(40, 30, [0, 0, 0, 255]);
    let got = consult_elaborator(
        &Canned(Elaboration::Image(png.clone())),
        "@a",
        &[TagId::new("a")],
    )
    .unwrap();
    assert_eq!(got.bytes, png);
    assert_eq!((got.width, got.height, got.frame_count), (40, 30, 1));
    assert!(got.directive.is_none());
}

#[test]
fn elaborator_garbage_prompt_or_error_falls_through() {
    let tags = [TagId::new("a")];
    assert!(consult_elaborator(&Canned(Elaboration::Image(b"nope".to_vec())), "@a", &tags).is_none());
    assert!(
        consult_elaborator(&Canned(Elaboration::Prompt("richer".into())), "@a", &tags).is_none()
    );
    assert!(consult_elaborator(&crate::elaborate::NoElaborator, "@a", &tags).is_none());
}

#[test]
fn png_dimensions_rejects_other_formats() {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]));
    let mut bmp = Cursor::new(Vec::new());
    img.write_to(&mut bmp, image::ImageFormat::Bmp).unwrap();
    assert_eq!(png_dimensions(&bmp.into_inner()), None);
    assert_eq!(png_dimensions(&png_bytes(5, 7, [0; 4])), Some((5, 7)));
}
