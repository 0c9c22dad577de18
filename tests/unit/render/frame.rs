use std::sync::Arc;

use super::*;
use crate::{
    directive::model::{OverlayText, TextLanguage, TextOverlaySpec, VerticalAnchor},
    text::plan::plan_text_overlay,
};

fn solid(w: u32, h: u32, px: [u8; 4], has_alpha: bool) -> SourceImage {
    SourceImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(px.repeat((w * h) as usize)),
        has_alpha,
    }
}

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn background_fills_every_pixel() {
    let f = compose_frame(canvas(100, 120), Rgb8::new(1, 2, 3), &[], None);
    assert_eq!((f.width, f.height), (100, 120));
    assert_eq!(f.data.len(), 100 * 120 * 4);
    assert!(f.data.chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
    assert_eq!(f.to_rgb8().len(), 100 * 120 * 3);
}

#[test]
fn later_layers_occlude_earlier() {
    let red = solid(10, 10, [255, 0, 0, 255], false);
    let blue = solid(10, 10, [0, 0, 255, 255], false);
    let f = compose_frame(
        canvas(100, 100),
        Rgb8::WHITE,
        &[
            Layer {
                image: &red,
                x: 0,
                y: 0,
            },
            Layer {
                image: &blue,
                x: 5,
                y: 5,
            },
        ],
        None,
    );
    assert_eq!(f.pixel(2, 2), [255, 0, 0, 255]);
    assert_eq!(f.pixel(7, 7), [0, 0, 255, 255]);
    assert_eq!(f.pixel(12, 12), [0, 0, 255, 255]);
    assert_eq!(f.pixel(15, 15), [255, 255, 255, 255]);
    assert_eq!(f.pixel(50, 50), [255, 255, 255, 255]);
}

#[test]
fn transparent_pixels_keep_destination() {
    let clear = solid(10, 10, [0, 0, 0, 0], true);
    let f = compose_frame(
        canvas(100, 100),
        Rgb8::new(9, 9, 9),
        &[Layer {
            image: &clear,
            x: 0,
            y: 0,
        }],
        None,
    );
    assert_eq!(f.pixel(3, 3), [9, 9, 9, 255]);
}

#[test]
fn layers_are_clipped_at_every_edge() {
    let img = solid(50, 50, [0, 255, 0, 255], false);
    let layers = [
        Layer {
            image: &img,
            x: -25,
            y: -25,
        },
        Layer {
            image: &img,
            x: 75,
            y: 75,
        },
        Layer {
            image: &img,
            x: 500,
            y: 0,
        },
    ];
    let f = compose_frame(canvas(100, 100), Rgb8::BLACK, &layers, None);
    assert_eq!(f.pixel(0, 0), [0, 255, 0, 255]);
    assert_eq!(f.pixel(24, 24), [0, 255, 0, 255]);
    assert_eq!(f.pixel(25, 25), [0, 0, 0, 255]);
    assert_eq!(f.pixel(99, 99), [0, 255, 0, 255]);
}

#[test]
fn text_is_outlined_then_filled() {
    let spec = TextOverlaySpec {
        content: OverlayText::Literal("x".to_string()),
        color: Rgb8::new(255, 0, 0),
        language: TextLanguage::Default,
        vertical_anchor: VerticalAnchor::Top,
    };
    let layout = plan_text_overlay(&spec, "unused");
    let mask = GlyphMask {
        width: 1,
        height: 1,
        coverage: vec![255],
    };
    let f = compose_frame(
        canvas(101, 100),
        Rgb8::BLACK,
        &[],
        Some(TextStamp {
            mask: &mask,
            layout: &layout,
        }),
    );

    // A 1px mask on a 101px canvas lands at x = 50, y = 30.
    assert_eq!(f.pixel(50, 30), [255, 0, 0, 255]);
    assert_eq!(f.pixel(52, 30), [255, 255, 255, 255]);
    assert_eq!(f.pixel(48, 28), [255, 255, 255, 255]);
    assert_eq!(f.pixel(53, 30), [0, 0, 0, 255]);
}
