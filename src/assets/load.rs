use std::path::PathBuf;

use crate::{
    assets::decode::{SourceImage, decode_image},
    foundation::core::TagId,
    foundation::error::{MontageError, MontageResult},
};

/// Where a tagged image's encoded bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedSource {
    pub tag: TagId,
    pub source: ImageSource,
}

impl TaggedSource {
    pub fn from_path(tag: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            tag: TagId::new(tag),
            source: ImageSource::Path(path.into()),
        }
    }

    pub fn from_bytes(tag: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            tag: TagId::new(tag),
            source: ImageSource::Bytes(bytes),
        }
    }
}

/// A tag whose image decoded successfully.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub tag: TagId,
    pub image: SourceImage,
}

pub fn load_source(source: &ImageSource) -> MontageResult<SourceImage> {
    match source {
        ImageSource::Path(path) => {
            let bytes = std::fs::read(path).map_err(|e| {
                MontageError::decode(format!("read image '{}': {e}", path.display()))
            })?;
            decode_image(&bytes)
        }
        ImageSource::Bytes(bytes) => decode_image(bytes),
    }
}

/// Decode every source independently. Failures are logged and the tag is dropped; caller order
/// is kept for the survivors.
#[tracing::instrument(level = "debug", skip_all, fields(sources = sources.len()))]
pub fn load_tagged(sources: &[TaggedSource]) -> Vec<LoadedImage> {
    sources
        .iter()
        .filter_map(|s| match load_source(&s.source) {
            Ok(image) => {
                tracing::debug!(
                    tag = %s.tag,
                    width = image.width,
                    height = image.height,
                    "image loaded"
                );
                Some(LoadedImage {
                    tag: s.tag.clone(),
                    image,
                })
            }
            Err(err) => {
                tracing::warn!(tag = %s.tag, %err, "skipping image that failed to load");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/load.rs"]
mod tests;
