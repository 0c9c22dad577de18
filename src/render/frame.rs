use crate::{
    assets::decode::SourceImage,
    foundation::core::{Canvas, Rgb8},
    render::composite::{clip_rect, over, over_in_place},
    text::{
        plan::{TextLayout, outline_offsets},
        raster::GlyphMask,
    },
};

/// A rendered frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Opaque frame of `canvas` size filled with `color`.
    pub fn filled(canvas: Canvas, color: Rgb8) -> Self {
        let px = color.to_rgba8();
        let count = canvas.width as usize * canvas.height as usize;
        let mut data = Vec::with_capacity(count * 4);
        for _ in 0..count {
            data.extend_from_slice(&px);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Drop alpha. Frames built on an opaque background are opaque everywhere.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    /// Paste `image` with its top-left at `(x, y)`, clipped to the frame.
    pub fn paste(&mut self, image: &SourceImage, x: i64, y: i64) {
        let Some(clip) = clip_rect(self.width, self.height, image.width, image.height, x, y) else {
            return;
        };
        let row_bytes = clip.cols as usize * 4;
        for r in 0..clip.rows {
            let s = ((clip.src_y + r) as usize * image.width as usize + clip.src_x as usize) * 4;
            let d = ((clip.dst_y + r) as usize * self.width as usize + clip.dst_x as usize) * 4;
            let src_row = &image.rgba8_premul[s..s + row_bytes];
            let dst_row = &mut self.data[d..d + row_bytes];
            if image.has_alpha {
                over_in_place(dst_row, src_row);
            } else {
                dst_row.copy_from_slice(src_row);
            }
        }
    }

    /// Blend solid `color` through `mask` placed with its top-left at `(x, y)`.
    pub fn stamp(&mut self, mask: &GlyphMask, x: i64, y: i64, color: Rgb8) {
        let Some(clip) = clip_rect(self.width, self.height, mask.width, mask.height, x, y) else {
            return;
        };
        for r in 0..clip.rows {
            for c in 0..clip.cols {
                let a = mask.at(clip.src_x + c, clip.src_y + r);
                if a == 0 {
                    continue;
                }
                let i = ((clip.dst_y + r) as usize * self.width as usize
                    + (clip.dst_x + c) as usize)
                    * 4;
                let dst = [
                    self.data[i],
                    self.data[i + 1],
                    self.data[i + 2],
                    self.data[i + 3],
                ];
                let out = over(dst, color.premul_with_coverage(a));
                self.data[i..i + 4].copy_from_slice(&out);
            }
        }
    }
}

/// One image layer, already resized, with its paste origin.
#[derive(Clone, Copy, Debug)]
pub struct Layer<'a> {
    pub image: &'a SourceImage,
    pub x: i64,
    pub y: i64,
}

/// Rasterized overlay text and how to draw it.
#[derive(Clone, Copy, Debug)]
pub struct TextStamp<'a> {
    pub mask: &'a GlyphMask,
    pub layout: &'a TextLayout,
}

/// Background fill, then `layers` in order, then the outlined text on top.
pub fn compose_frame(
    canvas: Canvas,
    background: Rgb8,
    layers: &[Layer<'_>],
    text: Option<TextStamp<'_>>,
) -> FrameRGBA {
    let mut frame = FrameRGBA::filled(canvas, background);
    for layer in layers {
        frame.paste(layer.image, layer.x, layer.y);
    }
    if let Some(TextStamp { mask, layout }) = text {
        let (x, y) = layout.origin(mask.size(), canvas);
        for (dx, dy) in outline_offsets() {
            frame.stamp(mask, x + dx, y + dy, layout.outline);
        }
        frame.stamp(mask, x, y, layout.fill);
    }
    frame
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
