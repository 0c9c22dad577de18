use std::{collections::BTreeSet, io::Cursor, path::Path};

use crate::{
    assets::load::{TaggedSource, load_tagged},
    config::RenderOptions,
    directive::{
        extract::extract_directive,
        model::{Directive, OutputKind},
    },
    elaborate::{Elaboration, PromptElaborator},
    encode::{SinkConfig, encode_frames, gif::GifSink, png::PngSink, write_output_atomic},
    foundation::core::TagId,
    foundation::error::{MontageError, MontageResult},
    render::{
        frame::FrameRGBA,
        sequence::{SequenceContext, render_motion, render_presentation, render_still},
    },
    text::raster::TextRasterizer,
};

/// One generation request: a prompt over caller-tagged images.
#[derive(Clone, Debug)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Tagged sources in caller order. Tags must be unique.
    pub images: Vec<TaggedSource>,
    pub output: OutputKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Png,
    Gif,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

/// Encoded result of [`generate`].
#[derive(Clone, Debug)]
pub struct Generated {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    /// `None` for still output.
    pub frame_duration_ms: Option<u32>,
    /// `None` when an elaborator supplied the image.
    pub directive: Option<Directive>,
}

/// Extract a directive and apply the caller's canvas override.
pub fn resolve_directive(
    prompt: &str,
    known_tags: &[TagId],
    output: OutputKind,
    options: &RenderOptions,
) -> Directive {
    let extracted = extract_directive(prompt, known_tags, output);
    match options.canvas {
        Some(canvas) => Directive {
            canvas,
            ..extracted
        },
        None => extracted,
    }
}

/// Compile, render and encode one request.
#[tracing::instrument(
    level = "info",
    skip_all,
    fields(output = ?request.output, images = request.images.len())
)]
pub fn generate(
    request: &GenerateRequest,
    options: &RenderOptions,
    elaborator: &dyn PromptElaborator,
) -> MontageResult<Generated> {
    let known_tags = validate_request(request)?;
    options.validate()?;

    if request.output == OutputKind::Still
        && let Some(generated) = consult_elaborator(elaborator, &request.prompt, &known_tags)
    {
        return Ok(generated);
    }

    let directive = resolve_directive(&request.prompt, &known_tags, request.output, options);

    let images = load_tagged(&request.images);
    if images.is_empty() {
        return Err(MontageError::invalid_input(
            "none of the tagged images could be loaded",
        ));
    }

    let rasterizer = directive
        .text_overlay
        .is_some()
        .then(|| TextRasterizer::new(options.font_dir.as_deref()));
    let ctx = SequenceContext {
        directive: &directive,
        images: &images,
        text: rasterizer.as_ref(),
        threading: &options.threading,
    };
    let canvas = directive.canvas;

    let (format, frames, frame_duration_ms) = match (request.output, &directive.presentation) {
        (OutputKind::Still, _) => (OutputFormat::Png, vec![render_still(&ctx)?], None),
        (OutputKind::Animated, Some(presentation)) => {
            let ms = presentation
                .per_frame_duration_ms
                .unwrap_or(options.frame_duration_ms);
            (OutputFormat::Gif, render_presentation(&ctx)?, Some(ms))
        }
        (OutputKind::Animated, None) => (
            OutputFormat::Gif,
            render_motion(&ctx, options.frame_count)?,
            Some(options.frame_duration_ms),
        ),
    };

    let cfg = SinkConfig {
        width: canvas.width,
        height: canvas.height,
        frame_duration_ms: frame_duration_ms.unwrap_or(0),
    };
    let bytes = encode(format, cfg, &frames)?;
    let frame_count = u32::try_from(frames.len())
        .map_err(|_| MontageError::encode("frame count overflows u32"))?;
    tracing::info!(
        format = format.extension(),
        width = canvas.width,
        height = canvas.height,
        frame_count,
        bytes = bytes.len(),
        "generated"
    );

    Ok(Generated {
        format,
        bytes,
        width: canvas.width,
        height: canvas.height,
        frame_count,
        frame_duration_ms,
        directive: Some(directive),
    })
}

/// [`generate`], then write the encoded bytes atomically to `out`.
pub fn generate_to_file(
    request: &GenerateRequest,
    options: &RenderOptions,
    elaborator: &dyn PromptElaborator,
    out: &Path,
) -> MontageResult<Generated> {
    let generated = generate(request, options, elaborator)?;
    write_output_atomic(out, &generated.bytes)?;
    Ok(generated)
}

fn validate_request(request: &GenerateRequest) -> MontageResult<Vec<TagId>> {
    if request.prompt.trim().is_empty() {
        return Err(MontageError::invalid_input("prompt is empty"));
    }
    if request.images.is_empty() {
        return Err(MontageError::invalid_input("no tagged images supplied"));
    }

    let mut seen = BTreeSet::new();
    for source in &request.images {
        if source.tag.as_str().is_empty() {
            return Err(MontageError::invalid_input("image tag is empty"));
        }
        if !seen.insert(source.tag.as_str()) {
            return Err(MontageError::invalid_input(format!(
                "tag '{}' is bound to more than one image",
                source.tag
            )));
        }
    }
    Ok(request.images.iter().map(|s| s.tag.clone()).collect())
}

/// A usable ready-made PNG from the elaborator, if it produced one.
fn consult_elaborator(
    elaborator: &dyn PromptElaborator,
    prompt: &str,
    tags: &[TagId],
) -> Option<Generated> {
    match elaborator.elaborate(prompt, tags) {
        Ok(Elaboration::Image(bytes)) => match png_dimensions(&bytes) {
            Some((width, height)) => {
                tracing::info!(width, height, "using elaborator-supplied image");
                Some(Generated {
                    format: OutputFormat::Png,
                    bytes,
                    width,
                    height,
                    frame_count: 1,
                    frame_duration_ms: None,
                    directive: None,
                })
            }
            None => {
                tracing::warn!("elaborator image is not a readable png, composing instead");
                None
            }
        },
        Ok(Elaboration::Prompt(elaborated)) => {
            tracing::debug!(
                chars = elaborated.len(),
                "elaborated prompt ignored, composing from the original"
            );
            None
        }
        Ok(Elaboration::Nothing) => None,
        Err(err) => {
            tracing::warn!(%err, "prompt elaboration failed, composing from the original");
            None
        }
    }
}

fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    if reader.format() != Some(image::ImageFormat::Png) {
        return None;
    }
    reader.into_dimensions().ok()
}

fn encode(format: OutputFormat, cfg: SinkConfig, frames: &[FrameRGBA]) -> MontageResult<Vec<u8>> {
    match format {
        OutputFormat::Png => {
            let mut sink = PngSink::new();
            encode_frames(&mut sink, cfg, frames)?;
            sink.into_bytes()
        }
        OutputFormat::Gif => {
            let mut sink = GifSink::new();
            encode_frames(&mut sink, cfg, frames)?;
            sink.into_bytes()
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
