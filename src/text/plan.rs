use crate::{
    directive::model::{TextLanguage, TextOverlaySpec, VerticalAnchor},
    foundation::core::{Canvas, Rgb8, Size},
    layout::centered_offset,
};

pub const FONT_SIZE_PX: f32 = 48.0;
/// Gap between the text box and the canvas edge for `Top` and `Bottom` anchors.
pub const EDGE_MARGIN_PX: i64 = 30;
/// Outline reach in pixels on each axis.
pub const OUTLINE_RADIUS: i64 = 2;

/// Resolved overlay for one frame: label, colors and anchoring.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    pub label: String,
    pub fill: Rgb8,
    pub outline: Rgb8,
    pub language: TextLanguage,
    pub anchor: VerticalAnchor,
    pub font_size_px: f32,
}

impl TextLayout {
    /// Top-left of a rendered text box of size `text` on `canvas`.
    pub fn origin(&self, text: Size, canvas: Canvas) -> (i64, i64) {
        let x = centered_offset(canvas.width, text.width);
        let free = i64::from(canvas.height) - i64::from(text.height);
        let y = match self.anchor {
            VerticalAnchor::Top => EDGE_MARGIN_PX,
            VerticalAnchor::Center => free.div_euclid(2),
            VerticalAnchor::Bottom => free - EDGE_MARGIN_PX,
        };
        (x, y)
    }
}

/// Every outline stamp offset: the `(2r+1)^2` grid minus the centre.
pub fn outline_offsets() -> impl Iterator<Item = (i64, i64)> {
    (-OUTLINE_RADIUS..=OUTLINE_RADIUS)
        .flat_map(|dy| (-OUTLINE_RADIUS..=OUTLINE_RADIUS).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| dx != 0 || dy != 0)
}

/// White text gets a black outline; anything else gets white.
pub fn contrasting_outline(fill: Rgb8) -> Rgb8 {
    if fill == Rgb8::WHITE {
        Rgb8::BLACK
    } else {
        Rgb8::WHITE
    }
}

/// Resolve `spec` for a frame whose placeholder label is `fallback_label`.
pub fn plan_text_overlay(spec: &TextOverlaySpec, fallback_label: &str) -> TextLayout {
    TextLayout {
        label: spec.label(fallback_label).to_string(),
        fill: spec.color,
        outline: contrasting_outline(spec.color),
        language: spec.language,
        anchor: spec.vertical_anchor,
        font_size_px: FONT_SIZE_PX,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/plan.rs"]
mod tests;
