use std::sync::Arc;

use image::imageops::FilterType;

use crate::foundation::{
    core::Size,
    error::{MontageError, MontageResult},
};

/// Decoded source image in premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
    /// `false` when the encoded image had no alpha channel; every pixel is then opaque.
    pub has_alpha: bool,
}

impl SourceImage {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Resample to `target` with Lanczos3. Returns a cheap clone when the size already matches.
    pub fn resized(&self, target: Size) -> MontageResult<Self> {
        if target == self.size() {
            return Ok(self.clone());
        }
        let src = image::RgbaImage::from_raw(self.width, self.height, self.rgba8_premul.to_vec())
            .ok_or_else(|| MontageError::decode("source buffer does not match its dimensions"))?;
        let out = image::imageops::resize(
            &src,
            target.width.max(1),
            target.height.max(1),
            FilterType::Lanczos3,
        );
        let (width, height) = out.dimensions();

        let mut rgba8_premul = out.into_raw();
        // Lanczos ringing can push a channel above its alpha.
        for px in rgba8_premul.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = px[0].min(a);
            px[1] = px[1].min(a);
            px[2] = px[2].min(a);
        }

        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
            has_alpha: self.has_alpha,
        })
    }
}

pub fn decode_image(bytes: &[u8]) -> MontageResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).map_err(|e| MontageError::decode(e.to_string()))?;
    let has_alpha = dyn_img.color().has_alpha();
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(MontageError::decode("image has zero area"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(SourceImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
        has_alpha,
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
