use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    directive::model::TextLanguage,
    foundation::core::Size,
    foundation::error::{MontageError, MontageResult},
};

/// Single-channel coverage of a rendered label, tightly cropped to its ink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    /// `width * height` alpha values, row-major.
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

/// Shapes and rasterizes overlay labels through usvg/resvg.
///
/// Holds one font database for the whole request; cloning is cheap.
#[derive(Clone)]
pub struct TextRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

impl TextRasterizer {
    /// System fonts plus any `.ttf`/`.otf`/`.ttc` files directly inside `font_dir`.
    pub fn new(font_dir: Option<&Path>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = font_dir {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self::with_fontdb(Arc::new(db))
    }

    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Render `label` at `size_px`. `Ok(None)` when there is nothing to draw or no usable font.
    pub fn rasterize(
        &self,
        label: &str,
        language: TextLanguage,
        size_px: f32,
    ) -> MontageResult<Option<GlyphMask>> {
        if label.trim().is_empty() {
            return Ok(None);
        }
        if self.fontdb.is_empty() {
            tracing::warn!("no fonts available, skipping text overlay");
            return Ok(None);
        }

        let svg = label_svg(label, language, size_px);
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .context("parse overlay label svg")
            .map_err(MontageError::from)?;

        let root = tree.root();
        if !root.has_children() {
            tracing::warn!(label, "no font could shape the overlay text, skipping it");
            return Ok(None);
        }

        let bbox = root.abs_bounding_box();
        let left = bbox.left().floor();
        let top = bbox.top().floor();
        let width = (bbox.right().ceil() - left).max(1.0) as u32;
        let height = (bbox.bottom().ceil() - top).max(1.0) as u32;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| anyhow::anyhow!("allocate {width}x{height} overlay text pixmap"))?;
        let xform = resvg::tiny_skia::Transform::from_translate(-left, -top);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        let coverage = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
        Ok(Some(GlyphMask {
            width,
            height,
            coverage,
        }))
    }
}

fn label_svg(label: &str, language: TextLanguage, size_px: f32) -> String {
    let family = match language {
        TextLanguage::Default => "DejaVu Sans, Liberation Sans, Arial, sans-serif",
        TextLanguage::DevanagariScript => "Noto Sans Devanagari, Lohit Devanagari, sans-serif",
    };
    // The viewport only has to be positive; content is cropped to its bounding box afterwards.
    let vw = (label.chars().count() as f32 * size_px * 1.5).ceil().max(1.0);
    let vh = (size_px * 3.0).ceil();
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{vw}" height="{vh}"><text x="0" y="{baseline}" font-family="{family}" font-size="{size_px}" font-weight="bold" fill="#ffffff">{text}</text></svg>"##,
        baseline = size_px * 1.5,
        text = escape_xml(label),
    )
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(err) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), %err, "skipping unreadable font");
        }
    }
}

/// Requested families first, then any generic family, then whatever face exists.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/raster.rs"]
mod tests;
