use std::io::Cursor;

use crate::{
    encode::{FrameSink, SinkConfig, SinkState},
    foundation::error::{MontageError, MontageResult},
    render::frame::FrameRGBA,
};

/// Encodes exactly one frame as an RGB8 PNG.
#[derive(Debug, Default)]
pub struct PngSink {
    state: SinkState,
    frame: Option<Vec<u8>>,
    bytes: Option<Vec<u8>>,
}

impl PngSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded PNG, available after [`FrameSink::end`].
    pub fn into_bytes(self) -> MontageResult<Vec<u8>> {
        self.bytes
            .ok_or_else(|| MontageError::encode("png sink finished without output"))
    }
}

impl FrameSink for PngSink {
    fn begin(&mut self, cfg: SinkConfig) -> MontageResult<()> {
        self.state.begin(cfg);
        self.frame = None;
        self.bytes = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> MontageResult<()> {
        if self.frame.is_some() {
            return Err(MontageError::encode("png output takes exactly one frame"));
        }
        self.state.accept(idx, frame)?;
        self.frame = Some(frame.to_rgb8());
        Ok(())
    }

    fn end(&mut self) -> MontageResult<()> {
        let cfg = self.state.config()?;
        let rgb = self
            .frame
            .take()
            .ok_or_else(|| MontageError::encode("png sink received no frame"))?;

        let mut buf = Cursor::new(Vec::new());
        image::write_buffer_with_format(
            &mut buf,
            &rgb,
            cfg.width,
            cfg.height,
            image::ExtendedColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .map_err(|e| MontageError::encode(format!("png: {e}")))?;
        self.bytes = Some(buf.into_inner());
        Ok(())
    }
}
