use std::sync::Arc;

use super::*;
use crate::directive::{extract::extract_directive, model::OutputKind};

fn loaded(tag: &str, w: u32, h: u32, px: [u8; 4]) -> LoadedImage {
    LoadedImage {
        tag: TagId::new(tag),
        image: SourceImage {
            width: w,
            height: h,
            rgba8_premul: Arc::new(px.repeat((w * h) as usize)),
            has_alpha: false,
        },
    }
}

fn tags(images: &[LoadedImage]) -> Vec<TagId> {
    images.iter().map(|l| l.tag.clone()).collect()
}

fn ctx<'a>(
    directive: &'a Directive,
    images: &'a [LoadedImage],
    threading: &'a RenderThreading,
) -> SequenceContext<'a> {
    SequenceContext {
        directive,
        images,
        text: None,
        threading,
    }
}

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

#[test]
fn still_places_every_loaded_image() {
    let images = [loaded("a", 50, 50, RED), loaded("b", 50, 50, GREEN)];
    let directive = extract_directive(
        "@b on the right, 400x300 black background",
        &tags(&images),
        OutputKind::Still,
    );
    let threading = RenderThreading::default();
    let frame = render_still(&ctx(&directive, &images, &threading)).unwrap();

    assert_eq!((frame.width, frame.height), (400, 300));
    assert_eq!(frame.pixel(0, 0), [0, 0, 0, 255]);
    // `a` is unmentioned and stays centred; `b` is flush right.
    assert_eq!(frame.pixel(200, 150), RED);
    assert_eq!(frame.pixel(399, 150), GREEN);
    assert_eq!(frame.pixel(349, 150), [0, 0, 0, 255]);
}

#[test]
fn motion_renders_requested_frame_count() {
    let images = [loaded("a", 30, 30, BLUE)];
    let directive = extract_directive(
        "move @a left to right, 300x300",
        &tags(&images),
        OutputKind::Animated,
    );
    let threading = RenderThreading::default();
    let frames = render_motion(&ctx(&directive, &images, &threading), 5).unwrap();

    assert_eq!(frames.len(), 5);
    assert_eq!(frames[0].pixel(0, 150), BLUE);
    assert_eq!(frames[0].pixel(299, 150), [255, 255, 255, 255]);
    assert_eq!(frames[4].pixel(299, 150), BLUE);
    assert_eq!(frames[4].pixel(0, 150), [255, 255, 255, 255]);
}

#[test]
fn parallel_motion_matches_sequential_order() {
    let images = [loaded("a", 30, 30, BLUE), loaded("b", 20, 20, RED)];
    let directive = extract_directive(
        "move @a and @b top to bottom, 200x200",
        &tags(&images),
        OutputKind::Animated,
    );
    let sequential = RenderThreading::default();
    let parallel = RenderThreading {
        parallel: true,
        threads: Some(2),
    };
    let a = render_motion(&ctx(&directive, &images, &sequential), 7).unwrap();
    let b = render_motion(&ctx(&directive, &images, &parallel), 7).unwrap();
    assert_eq!(a, b);
}

#[test]
fn presentation_skips_missing_and_appends_end_frame() {
    let images = [
        loaded("Sunny", 40, 40, RED),
        loaded("Alien", 40, 40, GREEN),
        loaded("Extra", 40, 40, BLUE),
    ];
    let known = [
        TagId::new("Sunny"),
        TagId::new("Vally"),
        TagId::new("Alien"),
        TagId::new("Extra"),
    ];
    let directive = extract_directive(
        "slideshow in order @Sunny, @Vally and @Alien",
        &known,
        OutputKind::Animated,
    );
    let threading = RenderThreading::default();
    let frames = render_presentation(&ctx(&directive, &images, &threading)).unwrap();

    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].pixel(540, 540), RED);
    assert_eq!(frames[1].pixel(540, 540), GREEN);
    assert!(frames[2].data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn presentation_without_any_loaded_slide_is_invalid() {
    let images = [loaded("Extra", 40, 40, BLUE)];
    let known = [TagId::new("Vally"), TagId::new("Extra")];
    let directive = extract_directive("slideshow of @Vally", &known, OutputKind::Animated);
    let threading = RenderThreading::default();
    let err = render_presentation(&ctx(&directive, &images, &threading)).unwrap_err();
    assert!(matches!(err, MontageError::InvalidInput(_)));
}

#[test]
fn zero_threads_is_rejected() {
    assert!(matches!(
        build_thread_pool(Some(0)),
        Err(MontageError::InvalidInput(_))
    ));
    build_thread_pool(Some(1)).unwrap();
}
