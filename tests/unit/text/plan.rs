use super::*;
use crate::directive::model::OverlayText;

fn spec(content: OverlayText, color: Rgb8, anchor: VerticalAnchor) -> TextOverlaySpec {
    TextOverlaySpec {
        content,
        color,
        language: TextLanguage::Default,
        vertical_anchor: anchor,
    }
}

#[test]
fn placeholder_takes_frame_label() {
    let s = spec(OverlayText::Placeholder, Rgb8::WHITE, VerticalAnchor::Bottom);
    assert_eq!(plan_text_overlay(&s, "Sunny").label, "Sunny");

    let s = spec(
        OverlayText::Literal("Fixed".to_string()),
        Rgb8::WHITE,
        VerticalAnchor::Bottom,
    );
    assert_eq!(plan_text_overlay(&s, "Sunny").label, "Fixed");
}

#[test]
fn outline_contrasts_with_fill() {
    assert_eq!(contrasting_outline(Rgb8::WHITE), Rgb8::BLACK);
    assert_eq!(contrasting_outline(Rgb8::BLACK), Rgb8::WHITE);
    assert_eq!(contrasting_outline(Rgb8::new(255, 0, 0)), Rgb8::WHITE);
}

#[test]
fn outline_offsets_cover_ring_without_centre() {
    let offsets: Vec<_> = outline_offsets().collect();
    assert_eq!(offsets.len(), 24);
    assert!(!offsets.contains(&(0, 0)));
    assert!(offsets.contains(&(-2, -2)));
    assert!(offsets.contains(&(2, 1)));
}

#[test]
fn origin_follows_anchor() {
    let canvas = Canvas::new(1000, 800).unwrap();
    let text = Size::new(300, 50);
    let layout = |anchor| {
        plan_text_overlay(&spec(OverlayText::Placeholder, Rgb8::BLACK, anchor), "x")
    };

    assert_eq!(layout(VerticalAnchor::Top).origin(text, canvas), (350, 30));
    assert_eq!(layout(VerticalAnchor::Center).origin(text, canvas), (350, 375));
    assert_eq!(layout(VerticalAnchor::Bottom).origin(text, canvas), (350, 720));
}

#[test]
fn wide_text_centres_to_negative_x() {
    let canvas = Canvas::new(100, 100).unwrap();
    let layout = plan_text_overlay(
        &spec(OverlayText::Placeholder, Rgb8::BLACK, VerticalAnchor::Bottom),
        "x",
    );
    assert_eq!(layout.origin(Size::new(141, 40), canvas), (-21, 30));
}
