use rayon::prelude::*;

use crate::{
    animation::{animated_position, frame_progress, motion_size},
    assets::{decode::SourceImage, load::LoadedImage},
    config::RenderThreading,
    directive::model::Directive,
    foundation::core::{Canvas, Size, TagId},
    foundation::error::{MontageError, MontageResult},
    layout::{plan_slide, plan_still_layout},
    render::frame::{FrameRGBA, Layer, TextStamp, compose_frame},
    text::{
        plan::{TextLayout, plan_text_overlay},
        raster::{GlyphMask, TextRasterizer},
    },
};

/// Placeholder label for still and general animated output.
pub const GENERATED_LABEL: &str = "Generated Image";
/// Label of the trailing presentation frame.
pub const END_LABEL: &str = "End";

/// Everything the frame renderers read. Nothing here is mutated while rendering.
#[derive(Clone, Copy, Debug)]
pub struct SequenceContext<'a> {
    pub directive: &'a Directive,
    /// Decoded images in caller order.
    pub images: &'a [LoadedImage],
    /// `None` skips any text overlay.
    pub text: Option<&'a TextRasterizer>,
    pub threading: &'a RenderThreading,
}

impl SequenceContext<'_> {
    fn canvas(&self) -> Canvas {
        self.directive.canvas
    }

    fn image(&self, tag: &TagId) -> Option<&SourceImage> {
        self.images.iter().find(|l| &l.tag == tag).map(|l| &l.image)
    }

    /// Overlay plan and glyph mask for a frame whose placeholder is `fallback_label`.
    fn overlay(&self, fallback_label: &str) -> MontageResult<Option<(TextLayout, GlyphMask)>> {
        let Some(spec) = &self.directive.text_overlay else {
            return Ok(None);
        };
        let Some(rasterizer) = self.text else {
            tracing::debug!("text overlay requested without a rasterizer, skipping");
            return Ok(None);
        };
        let layout = plan_text_overlay(spec, fallback_label);
        let mask = rasterizer.rasterize(&layout.label, layout.language, layout.font_size_px)?;
        Ok(mask.map(|mask| (layout, mask)))
    }
}

/// Compose the single frame of a still image.
#[tracing::instrument(level = "debug", skip_all, fields(images = ctx.images.len()))]
pub fn render_still(ctx: &SequenceContext<'_>) -> MontageResult<FrameRGBA> {
    let naturals: Vec<(TagId, Size)> = ctx
        .images
        .iter()
        .map(|l| (l.tag.clone(), l.image.size()))
        .collect();
    let plan = plan_still_layout(ctx.directive, &naturals);

    let mut resized = Vec::with_capacity(plan.len());
    for (placement, loaded) in plan.iter().zip(ctx.images) {
        resized.push(loaded.image.resized(placement.size)?);
    }
    let layers: Vec<Layer<'_>> = plan
        .iter()
        .zip(&resized)
        .map(|(p, image)| Layer {
            image,
            x: p.x,
            y: p.y,
        })
        .collect();

    let overlay = ctx.overlay(GENERATED_LABEL)?;
    Ok(compose_frame(
        ctx.canvas(),
        ctx.directive.background,
        &layers,
        overlay.as_ref().map(|(layout, mask)| TextStamp { mask, layout }),
    ))
}

/// General animation: every image moves per its instruction over `frame_count` frames.
#[tracing::instrument(level = "debug", skip_all, fields(images = ctx.images.len(), frame_count))]
pub fn render_motion(
    ctx: &SequenceContext<'_>,
    frame_count: u32,
) -> MontageResult<Vec<FrameRGBA>> {
    let canvas = ctx.canvas();
    let mut sized = Vec::with_capacity(ctx.images.len());
    for loaded in ctx.images {
        let image = loaded.image.resized(motion_size(loaded.image.size(), canvas))?;
        sized.push((ctx.directive.animation_for(&loaded.tag), image));
    }
    let overlay = ctx.overlay(GENERATED_LABEL)?;

    render_indexed(frame_count, ctx.threading, |idx| {
        let progress = frame_progress(idx, frame_count);
        let layers: Vec<Layer<'_>> = sized
            .iter()
            .map(|(instruction, image)| {
                let (x, y) = animated_position(*instruction, progress, image.size(), canvas);
                Layer { image, x, y }
            })
            .collect();
        Ok(compose_frame(
            canvas,
            ctx.directive.background,
            &layers,
            overlay.as_ref().map(|(layout, mask)| TextStamp { mask, layout }),
        ))
    })
}

/// Slideshow: one frame per ordered tag with a loaded image, then a blank closing frame.
#[tracing::instrument(level = "debug", skip_all, fields(images = ctx.images.len()))]
pub fn render_presentation(ctx: &SequenceContext<'_>) -> MontageResult<Vec<FrameRGBA>> {
    let order = ctx
        .directive
        .presentation
        .as_ref()
        .map(|p| p.tag_order.clone())
        .unwrap_or_default();

    let slides: Vec<(&TagId, &SourceImage)> = order
        .iter()
        .filter_map(|tag| match ctx.image(tag) {
            Some(image) => Some((tag, image)),
            None => {
                tracing::warn!(%tag, "presentation slide has no loaded image, dropping it");
                None
            }
        })
        .collect();
    if slides.is_empty() {
        return Err(MontageError::invalid_input(
            "none of the presentation tags has a loaded image",
        ));
    }

    let canvas = ctx.canvas();
    let frame_count = u32::try_from(slides.len() + 1)
        .map_err(|_| MontageError::invalid_input("too many presentation slides"))?;

    render_indexed(frame_count, ctx.threading, |idx| {
        let Some(&(tag, image)) = slides.get(idx as usize) else {
            let overlay = ctx.overlay(END_LABEL)?;
            return Ok(compose_frame(
                canvas,
                ctx.directive.background,
                &[],
                overlay.as_ref().map(|(layout, mask)| TextStamp { mask, layout }),
            ));
        };

        let placement = plan_slide(tag, image.size(), canvas);
        let fitted = image.resized(placement.size)?;
        let overlay = ctx.overlay(tag.as_str())?;
        Ok(compose_frame(
            canvas,
            ctx.directive.background,
            &[Layer {
                image: &fitted,
                x: placement.x,
                y: placement.y,
            }],
            overlay.as_ref().map(|(layout, mask)| TextStamp { mask, layout }),
        ))
    })
}

/// Render frames `0..count` and return them in index order, on a pool when parallel.
fn render_indexed<F>(
    count: u32,
    threading: &RenderThreading,
    render: F,
) -> MontageResult<Vec<FrameRGBA>>
where
    F: Fn(u32) -> MontageResult<FrameRGBA> + Sync + Send,
{
    if !threading.parallel || count <= 1 {
        return (0..count).map(render).collect();
    }

    let pool = build_thread_pool(threading.threads)?;
    let rendered = pool.install(|| (0..count).into_par_iter().map(&render).collect::<Vec<_>>());

    let mut frames = Vec::<FrameRGBA>::with_capacity(rendered.len());
    for item in rendered {
        frames.push(item?);
    }
    Ok(frames)
}

pub fn build_thread_pool(threads: Option<usize>) -> MontageResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MontageError::invalid_input(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/render/sequence.rs"]
mod tests;
