use std::fmt;

use crate::foundation::error::{MontageError, MontageResult};

pub use kurbo::{Point, Vec2};

/// Smallest accepted canvas edge in pixels.
pub const MIN_CANVAS_DIM: u32 = 100;
/// Largest accepted canvas edge in pixels.
pub const MAX_CANVAS_DIM: u32 = 4000;

/// Caller-chosen identifier binding an `@name` token in a prompt to one source image.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TagId(String);

impl TagId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TagId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Output canvas dimensions. Both edges live in `[MIN_CANVAS_DIM, MAX_CANVAS_DIM]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const DEFAULT: Self = Self {
        width: 1080,
        height: 1080,
    };

    pub fn new(width: u32, height: u32) -> MontageResult<Self> {
        if !Self::in_bounds(width) || !Self::in_bounds(height) {
            return Err(MontageError::invalid_input(format!(
                "canvas {width}x{height} is outside [{MIN_CANVAS_DIM}, {MAX_CANVAS_DIM}]"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn in_bounds(dim: u32) -> bool {
        (MIN_CANVAS_DIM..=MAX_CANVAS_DIM).contains(&dim)
    }

    pub fn validate(self) -> MontageResult<()> {
        Self::new(self.width, self.height).map(|_| ())
    }

    pub fn min_side(self) -> u32 {
        self.width.min(self.height)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pixel dimensions of a source image or a placed layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn longest_side(self) -> u32 {
        self.width.max(self.height)
    }
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully opaque premultiplied RGBA8 (identical to straight alpha at `a = 255`).
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// This color premultiplied by `coverage`.
    pub fn premul_with_coverage(self, coverage: u8) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, coverage),
            premul(self.g, coverage),
            premul(self.b, coverage),
            coverage,
        ]
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
