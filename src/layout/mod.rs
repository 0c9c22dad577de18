//! Static placement: resize rules and top-left paste coordinates for still composites and
//! presentation slides.

use crate::{
    directive::model::{Directive, PositionSpec},
    foundation::core::{Canvas, Size, TagId},
};

/// Where one layer lands on the canvas. Coordinates may be negative or exceed the canvas; the
/// compositor clips.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub tag: TagId,
    pub size: Size,
    pub x: i64,
    pub y: i64,
}

/// Floor-divided centring offset. Negative when `content` is larger than `container`.
pub fn centered_offset(container: u32, content: u32) -> i64 {
    (i64::from(container) - i64::from(content)).div_euclid(2)
}

/// Scale down so the longer side is at most `limit`, keeping aspect ratio. Never upscales.
pub fn shrink_to_longest_side(img: Size, limit: u32) -> Size {
    let longest = img.longest_side();
    let limit = limit.max(1);
    if longest <= limit {
        return img;
    }
    Size::new(
        scale_dim(img.width, limit, longest),
        scale_dim(img.height, limit, longest),
    )
}

/// Scale down to fit inside `max_w x max_h`, keeping aspect ratio. Never upscales.
pub fn fit_within(img: Size, max_w: u32, max_h: u32) -> Size {
    let max_w = max_w.max(1);
    let max_h = max_h.max(1);
    if img.width <= max_w && img.height <= max_h {
        return img;
    }

    // Compare w/max_w against h/max_h without floats to pick the binding edge.
    let width_bound =
        u64::from(img.width) * u64::from(max_h) >= u64::from(img.height) * u64::from(max_w);
    if width_bound {
        Size::new(max_w, scale_dim(img.height, max_w, img.width))
    } else {
        Size::new(scale_dim(img.width, max_h, img.height), max_h)
    }
}

fn scale_dim(dim: u32, num: u32, den: u32) -> u32 {
    let scaled = u64::from(dim) * u64::from(num) / u64::from(den.max(1));
    (scaled as u32).max(1)
}

/// Size an image takes on a still composite for a given position.
pub fn still_size(position: PositionSpec, img: Size, canvas: Canvas) -> Size {
    match position {
        PositionSpec::Background => canvas.size(),
        PositionSpec::Foreground | PositionSpec::Center => {
            shrink_to_longest_side(img, canvas.min_side() / 2)
        }
        PositionSpec::Left | PositionSpec::Right | PositionSpec::Top | PositionSpec::Bottom => img,
    }
}

/// Top-left paste coordinate of an already-sized image.
pub fn still_origin(position: PositionSpec, img: Size, canvas: Canvas) -> (i64, i64) {
    let cx = centered_offset(canvas.width, img.width);
    let cy = centered_offset(canvas.height, img.height);
    let right = i64::from(canvas.width) - i64::from(img.width);
    let bottom = i64::from(canvas.height) - i64::from(img.height);
    match position {
        PositionSpec::Background => (0, 0),
        PositionSpec::Foreground | PositionSpec::Center => (cx, cy),
        PositionSpec::Left => (0, cy),
        PositionSpec::Right => (right, cy),
        PositionSpec::Top => (cx, 0),
        PositionSpec::Bottom => (cx, bottom),
    }
}

/// Plan every loaded image of a still composite, in the caller's order.
pub fn plan_still_layout(directive: &Directive, images: &[(TagId, Size)]) -> Vec<Placement> {
    images
        .iter()
        .map(|(tag, natural)| {
            let position = directive.position_for(tag);
            let size = still_size(position, *natural, directive.canvas);
            let (x, y) = still_origin(position, size, directive.canvas);
            tracing::trace!(%tag, ?position, ?size, x, y, "still placement");
            Placement {
                tag: tag.clone(),
                size,
                x,
                y,
            }
        })
        .collect()
}

/// Slide placement: fit inside `(w - 100, h - 150)` and centre.
pub fn plan_slide(tag: &TagId, natural: Size, canvas: Canvas) -> Placement {
    let size = fit_within(
        natural,
        canvas.width.saturating_sub(100),
        canvas.height.saturating_sub(150),
    );
    Placement {
        tag: tag.clone(),
        size,
        x: centered_offset(canvas.width, size.width),
        y: centered_offset(canvas.height, size.height),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/mod.rs"]
mod tests;
