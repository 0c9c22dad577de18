//! Per-frame motion for the general animated path.

use std::f64::consts::TAU;

use crate::{
    directive::model::{AnimationInstruction, Direction},
    foundation::core::{Canvas, Point, Size, Vec2},
    layout::{centered_offset, shrink_to_longest_side},
};

/// Normalized time of frame `frame` in a sequence of `frame_count` frames.
///
/// `0.0` on the first frame and `1.0` on the last; a single-frame sequence stays at `0.0`.
pub fn frame_progress(frame: u32, frame_count: u32) -> f64 {
    if frame_count <= 1 {
        return 0.0;
    }
    let p = f64::from(frame) / f64::from(frame_count - 1);
    p.clamp(0.0, 1.0)
}

/// Size an animated layer is drawn at: longest side capped at a third of the shorter canvas edge.
pub fn motion_size(img: Size, canvas: Canvas) -> Size {
    shrink_to_longest_side(img, canvas.min_side() / 3)
}

/// Top-left paste coordinate for `img` at `progress` under `instruction`.
pub fn animated_position(
    instruction: AnimationInstruction,
    progress: f64,
    img: Size,
    canvas: Canvas,
) -> (i64, i64) {
    let progress = progress.clamp(0.0, 1.0);
    let cw = i64::from(canvas.width);
    let ch = i64::from(canvas.height);
    let iw = i64::from(img.width);
    let ih = i64::from(img.height);
    let cx = centered_offset(canvas.width, img.width);
    let cy = centered_offset(canvas.height, img.height);

    match instruction {
        AnimationInstruction::Static | AnimationInstruction::Fade => (cx, cy),
        AnimationInstruction::SlideHorizontal(dir) => {
            (lerp_trunc(directed(dir, progress), cw - iw), cy)
        }
        AnimationInstruction::SlideVertical(dir) => {
            (cx, lerp_trunc(directed(dir, progress), ch - ih))
        }
        AnimationInstruction::Rotate => {
            let center = Point::new((cw / 2) as f64, (ch / 2) as f64);
            let radius = (i64::from(canvas.min_side()) / 4) as f64;
            let anchor = Vec2::new((iw / 2) as f64, (ih / 2) as f64);
            let p = center + Vec2::from_angle(progress * TAU) * radius - anchor;
            (p.x.trunc() as i64, p.y.trunc() as i64)
        }
        AnimationInstruction::Bounce => {
            let amplitude = ch / 4;
            let lift = ((amplitude as f64) * (progress * TAU).sin().abs()).trunc() as i64;
            (cx, ch - ih - lift)
        }
    }
}

fn directed(dir: Direction, progress: f64) -> f64 {
    match dir {
        Direction::Forward => progress,
        Direction::Reverse => 1.0 - progress,
    }
}

fn lerp_trunc(t: f64, span: i64) -> i64 {
    (t * span as f64).trunc() as i64
}

#[cfg(test)]
#[path = "../../tests/unit/animation/mod.rs"]
mod tests;
