//! Read-only keyword tables consulted by the extractor.
//!
//! Every table is scanned linearly in declaration order and the first hit wins, so entry order is
//! part of the contract (for example `blue` is checked before `lightblue`).

use crate::{
    directive::model::{AnimationInstruction, Direction, PositionSpec},
    foundation::core::Rgb8,
};

pub const NAMED_COLORS: [(&str, Rgb8); 18] = [
    ("white", Rgb8::new(255, 255, 255)),
    ("black", Rgb8::new(0, 0, 0)),
    ("red", Rgb8::new(255, 0, 0)),
    ("green", Rgb8::new(0, 255, 0)),
    ("blue", Rgb8::new(0, 0, 255)),
    ("yellow", Rgb8::new(255, 255, 0)),
    ("cyan", Rgb8::new(0, 255, 255)),
    ("magenta", Rgb8::new(255, 0, 255)),
    ("gray", Rgb8::new(128, 128, 128)),
    ("grey", Rgb8::new(128, 128, 128)),
    ("orange", Rgb8::new(255, 165, 0)),
    ("purple", Rgb8::new(128, 0, 128)),
    ("pink", Rgb8::new(255, 192, 203)),
    ("brown", Rgb8::new(165, 42, 42)),
    ("lightblue", Rgb8::new(173, 216, 230)),
    ("darkblue", Rgb8::new(0, 0, 139)),
    ("lightgreen", Rgb8::new(144, 238, 144)),
    ("darkgreen", Rgb8::new(0, 100, 0)),
];

pub const NAMED_CANVASES: [(&str, u32, u32); 8] = [
    ("square", 1080, 1080),
    ("landscape", 1920, 1080),
    ("portrait", 1080, 1920),
    ("widescreen", 1920, 1080),
    ("instagram", 1080, 1080),
    ("youtube", 1920, 1080),
    ("facebook", 1200, 630),
    ("twitter", 1200, 675),
];

/// Explicit `W x H` style patterns, tried in order. Each has exactly two numeric captures.
pub const DIMENSION_PATTERNS: [&str; 8] = [
    r"(\d+)\s*x\s*(\d+)",
    r"(\d+)\s*by\s*(\d+)",
    r"(\d+)\s*width\s*(\d+)\s*height",
    r"width\s*(\d+)\s*height\s*(\d+)",
    r"(\d+)\s*wide\s*(\d+)\s*tall",
    r"(\d+)\s*pixels?\s*wide\s*(\d+)\s*pixels?\s*tall",
    r"size\s*(\d+)\s*x\s*(\d+)",
    r"dimensions?\s*(\d+)\s*x\s*(\d+)",
];

pub const PRESENTATION_KEYWORDS: [&str; 10] = [
    "presentation",
    "slideshow",
    "shift images",
    "slide",
    "show images",
    "display images",
    "sequence",
    "order",
    "one by one",
    "turn by turn",
];

pub const MOTION_VERBS: [&str; 2] = ["moving", "move"];

/// Motion rules: any keyword in a row selects that row's instruction.
pub const MOTION_RULES: [(&[&str], AnimationInstruction); 7] = [
    (
        &["left to right"],
        AnimationInstruction::SlideHorizontal(Direction::Forward),
    ),
    (
        &["right to left"],
        AnimationInstruction::SlideHorizontal(Direction::Reverse),
    ),
    (
        &["up to down", "top to bottom"],
        AnimationInstruction::SlideVertical(Direction::Forward),
    ),
    (
        &["down to up", "bottom to top"],
        AnimationInstruction::SlideVertical(Direction::Reverse),
    ),
    (&["rotate", "spinning"], AnimationInstruction::Rotate),
    (&["bounce"], AnimationInstruction::Bounce),
    (&["fade"], AnimationInstruction::Fade),
];

pub const STILLNESS_KEYWORDS: [&str; 2] = ["stable", "static"];

/// Position keywords in scan order; later rows overwrite earlier ones.
pub const POSITION_RULES: [(&[&str], PositionSpec); 7] = [
    (&["background", "bg"], PositionSpec::Background),
    (&["front", "foreground"], PositionSpec::Foreground),
    (&["center"], PositionSpec::Center),
    (&["left"], PositionSpec::Left),
    (&["right"], PositionSpec::Right),
    (&["top"], PositionSpec::Top),
    (&["bottom"], PositionSpec::Bottom),
];

pub const STILL_TEXT_KEYWORDS: [&str; 4] = ["add text", "with text", "text", "write"];

pub const ANIMATED_TEXT_KEYWORDS: [&str; 11] = [
    "add text",
    "with text",
    "text overlay",
    "show text",
    "display text",
    "tag name",
    "label",
    "caption",
    "title",
    "white text",
    "text color",
];

/// `<color> text` phrases, first match wins.
pub const TEXT_COLORS: [(&str, Rgb8); 4] = [
    ("white text", Rgb8::WHITE),
    ("black text", Rgb8::BLACK),
    ("red text", Rgb8::new(255, 0, 0)),
    ("blue text", Rgb8::new(0, 0, 255)),
];

pub const HINDI_KEYWORDS: [&str; 2] = ["hindi", "हिंदी"];

pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
