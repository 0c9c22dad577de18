use std::collections::BTreeMap;

use crate::foundation::core::{Canvas, Rgb8, TagId};

/// Which encoder the request is headed for. Selects the mode-specific extraction rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// One composed PNG.
    Still,
    /// A looping GIF, either parametric motion or a presentation slideshow.
    Animated,
}

/// Where a still composite places one tagged image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSpec {
    Background,
    Foreground,
    Center,
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left to right, or top to bottom.
    Forward,
    /// Right to left, or bottom to top.
    Reverse,
}

/// Per-tag motion for the general animation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationInstruction {
    Static,
    SlideHorizontal(Direction),
    SlideVertical(Direction),
    Rotate,
    Bounce,
    /// Holds the centre position; opacity is not ramped.
    Fade,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextLanguage {
    Default,
    DevanagariScript,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

/// Overlay label: either fixed by the prompt or filled in per frame by the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayText {
    /// Quoted or `text:` content taken verbatim from the prompt.
    Literal(String),
    /// No explicit content; the renderer substitutes a frame-specific label.
    Placeholder,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TextOverlaySpec {
    pub content: OverlayText,
    pub color: Rgb8,
    pub language: TextLanguage,
    pub vertical_anchor: VerticalAnchor,
}

impl TextOverlaySpec {
    /// The label to draw on a frame whose placeholder would be `fallback`.
    pub fn label<'a>(&'a self, fallback: &'a str) -> &'a str {
        match &self.content {
            OverlayText::Literal(s) => s.as_str(),
            OverlayText::Placeholder => fallback,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PresentationSpec {
    /// One slide per entry, in this order.
    pub tag_order: Vec<TagId>,
    /// Explicit `<N> seconds` from the prompt; `None` defers to the caller's default.
    pub per_frame_duration_ms: Option<u32>,
}

/// Fully resolved rendering instructions for one prompt. Built once, never mutated.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Directive {
    pub output: OutputKind,
    pub canvas: Canvas,
    pub background: Rgb8,
    pub per_tag_position: BTreeMap<TagId, PositionSpec>,
    pub per_tag_animation: BTreeMap<TagId, AnimationInstruction>,
    pub text_overlay: Option<TextOverlaySpec>,
    pub presentation: Option<PresentationSpec>,
}

impl Directive {
    pub fn position_for(&self, tag: &TagId) -> PositionSpec {
        self.per_tag_position
            .get(tag)
            .copied()
            .unwrap_or(PositionSpec::Center)
    }

    pub fn animation_for(&self, tag: &TagId) -> AnimationInstruction {
        self.per_tag_animation
            .get(tag)
            .copied()
            .unwrap_or(AnimationInstruction::Static)
    }

    pub fn is_presentation(&self) -> bool {
        self.presentation.is_some()
    }
}
