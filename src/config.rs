use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{MontageError, MontageResult},
};

/// Upper bound on frames in one general animation.
pub const MAX_FRAME_COUNT: u32 = 1000;

/// Longest per-frame delay a GIF can hold: a `u16` count of centiseconds.
pub const MAX_FRAME_DURATION_MS: u32 = u16::MAX as u32 * 10;

/// Threading controls for multi-frame rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    /// Render frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Caller-tunable rendering options. Every field has a default, so `{}` is a valid options file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Frames in a general (non-presentation) animation.
    pub frame_count: u32,
    /// Per-frame delay, also the presentation delay when the prompt names no `<N> seconds`.
    pub frame_duration_ms: u32,
    /// Replaces the canvas size derived from the prompt.
    pub canvas: Option<Canvas>,
    /// Extra font files to load next to the system fonts.
    pub font_dir: Option<PathBuf>,
    pub threading: RenderThreading,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            frame_count: 10,
            frame_duration_ms: 500,
            canvas: None,
            font_dir: None,
            threading: RenderThreading::default(),
        }
    }
}

impl RenderOptions {
    pub fn from_json_str(s: &str) -> MontageResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| MontageError::invalid_input(format!("render options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_json_file(path: &Path) -> MontageResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read render options '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> MontageResult<()> {
        if self.frame_count == 0 || self.frame_count > MAX_FRAME_COUNT {
            return Err(MontageError::invalid_input(format!(
                "frame_count must be in [1, {MAX_FRAME_COUNT}], got {}",
                self.frame_count
            )));
        }
        if self.frame_duration_ms > MAX_FRAME_DURATION_MS {
            return Err(MontageError::invalid_input(format!(
                "frame_duration_ms must be at most {MAX_FRAME_DURATION_MS}, got {}",
                self.frame_duration_ms
            )));
        }
        if let Some(canvas) = self.canvas {
            canvas.validate()?;
        }
        if let Some(n) = self.threading.threads
            && n == 0
        {
            return Err(MontageError::invalid_input(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
