use super::*;

fn empty_rasterizer() -> TextRasterizer {
    TextRasterizer::with_fontdb(Arc::new(usvg::fontdb::Database::new()))
}

#[test]
fn blank_label_is_skipped() {
    let r = empty_rasterizer();
    assert_eq!(r.rasterize("   ", TextLanguage::Default, 48.0).unwrap(), None);
}

#[test]
fn missing_fonts_skip_instead_of_failing() {
    let r = empty_rasterizer();
    assert_eq!(r.face_count(), 0);
    assert_eq!(r.rasterize("Hello", TextLanguage::Default, 48.0).unwrap(), None);
}

#[test]
fn escape_xml_handles_markup() {
    assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
}

#[test]
fn label_svg_parses_for_hostile_labels() {
    let opts = usvg::Options::default();
    for label in ["<script>", "Tom & Jerry", "\"quoted\" 'single'", "नमस्ते"] {
        let svg = label_svg(label, TextLanguage::DevanagariScript, 48.0);
        assert!(usvg::Tree::from_str(&svg, &opts).is_ok(), "{label}");
    }
}

#[test]
fn system_font_renders_some_ink() {
    let r = TextRasterizer::new(None);
    if r.face_count() == 0 {
        return;
    }
    let Some(mask) = r.rasterize("Hi", TextLanguage::Default, 48.0).unwrap() else {
        return;
    };
    assert_eq!(mask.coverage.len(), (mask.width * mask.height) as usize);
    assert!(mask.width > 0 && mask.height > 0);
    assert!(mask.coverage.iter().any(|&a| a > 0));
}

#[test]
fn unreadable_font_dir_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.ttf"), b"not a font").unwrap();
    let mut db = usvg::fontdb::Database::new();
    load_fonts_from_dir(&mut db, dir.path());
    load_fonts_from_dir(&mut db, &dir.path().join("missing"));
}
