#![forbid(unsafe_code)]
//! Compile free-text prompts over `@tagged` images into composed PNG stills and looping GIFs.
//!
//! A prompt is compiled once into a [`Directive`] (canvas, background, per-tag placement and
//! motion, text overlay, presentation order). The renderer then lays out and composites the
//! decoded images into premultiplied RGBA frames, which a [`FrameSink`] encodes.
//!
//! ```no_run
//! use tagmontage::{GenerateRequest, NoElaborator, OutputKind, RenderOptions, TaggedSource};
//!
//! let request = GenerateRequest {
//!     prompt: "@cat on the left, @dog on the right, blue background".to_string(),
//!     images: vec![
//!         TaggedSource::from_path("cat", "cat.png"),
//!         TaggedSource::from_path("dog", "dog.jpg"),
//!     ],
//!     output: OutputKind::Still,
//! };
//! let out = tagmontage::generate(&request, &RenderOptions::default(), &NoElaborator)?;
//! std::fs::write("out.png", &out.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod animation;
pub mod assets;
pub mod config;
pub mod directive;
pub mod elaborate;
pub mod encode;
pub mod foundation;
pub mod layout;
pub mod pipeline;
pub mod render;
pub mod text;

pub use assets::load::{ImageSource, LoadedImage, TaggedSource};
pub use config::{RenderOptions, RenderThreading};
pub use directive::extract::extract_directive;
pub use directive::model::{
    AnimationInstruction, Direction, Directive, OutputKind, OverlayText, PositionSpec,
    PresentationSpec, TextLanguage, TextOverlaySpec, VerticalAnchor,
};
pub use elaborate::{Elaboration, NoElaborator, PromptElaborator, refine_prompt};
pub use encode::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Canvas, Rgb8, Size, TagId};
pub use foundation::error::{MontageError, MontageResult};
pub use pipeline::{
    GenerateRequest, Generated, OutputFormat, generate, generate_to_file, resolve_directive,
};
pub use render::frame::FrameRGBA;
