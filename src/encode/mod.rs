//! Encoding sinks.
//!
//! Sinks consume rendered frames in index order and encode into memory. Writing the encoded bytes
//! to disk is a separate, atomic step.

/// Animated GIF sink.
pub mod gif;
/// Single-frame PNG sink.
pub mod png;

use std::{io::Write as _, path::Path};

use anyhow::Context;

use crate::foundation::error::{MontageError, MontageResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before any frame is pushed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Display time of each frame. Ignored by single-frame sinks.
    pub frame_duration_ms: u32,
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices; sinks reject
/// anything else.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> MontageResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> MontageResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> MontageResult<()>;
}

/// Tracks the ordering and geometry contract shared by every sink.
#[derive(Debug, Default)]
pub(crate) struct SinkState {
    cfg: Option<SinkConfig>,
    last: Option<u32>,
}

impl SinkState {
    pub(crate) fn begin(&mut self, cfg: SinkConfig) {
        self.cfg = Some(cfg);
        self.last = None;
    }

    pub(crate) fn config(&self) -> MontageResult<&SinkConfig> {
        self.cfg
            .as_ref()
            .ok_or_else(|| MontageError::encode("sink used before begin"))
    }

    pub(crate) fn accept(&mut self, idx: u32, frame: &FrameRGBA) -> MontageResult<()> {
        let cfg = self.config()?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(MontageError::encode(format!(
                "frame {idx} is {}x{}, sink expects {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if let Some(last) = self.last
            && idx <= last
        {
            return Err(MontageError::encode(format!(
                "frame index {idx} does not follow {last}"
            )));
        }
        self.last = Some(idx);
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    state: SinkState,
    frames: Vec<(u32, FrameRGBA)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.state.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(u32, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> MontageResult<()> {
        self.state.begin(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> MontageResult<()> {
        self.state.accept(idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> MontageResult<()> {
        Ok(())
    }
}

/// Drive `sink` over `frames` in order.
pub fn encode_frames(
    sink: &mut dyn FrameSink,
    cfg: SinkConfig,
    frames: &[FrameRGBA],
) -> MontageResult<()> {
    sink.begin(cfg)?;
    for (idx, frame) in frames.iter().enumerate() {
        let idx = u32::try_from(idx).map_err(|_| MontageError::encode("too many frames"))?;
        sink.push_frame(idx, frame)?;
    }
    sink.end()
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> MontageResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write `bytes` to a uniquely named temp file beside `path`, then rename it over `path`.
pub fn write_output_atomic(path: &Path, bytes: &[u8]) -> MontageResult<()> {
    ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        MontageError::encode(format!("create temp file in '{}': {e}", dir.display()))
    })?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| MontageError::encode(format!("write '{}': {e}", tmp.path().display())))?;
    tmp.persist(path).map_err(|e| {
        MontageError::encode(format!(
            "move output into place at '{}': {}",
            path.display(),
            e.error
        ))
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "output written");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mod.rs"]
mod tests;
