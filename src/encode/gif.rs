use image::{
    Delay, Frame, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::{
    encode::{FrameSink, SinkConfig, SinkState},
    foundation::error::{MontageError, MontageResult},
    render::frame::FrameRGBA,
};

/// NeuQuant sampling factor; 1 is best quality, 30 is fastest.
const QUANTIZER_SPEED: i32 = 10;

/// Encodes frames as an infinitely looping GIF with a constant per-frame delay.
#[derive(Default)]
pub struct GifSink {
    state: SinkState,
    frames: Vec<Frame>,
    bytes: Option<Vec<u8>>,
}

impl std::fmt::Debug for GifSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifSink")
            .field("state", &self.state)
            .field("frames", &self.frames.len())
            .field("encoded", &self.bytes.as_ref().map(Vec::len))
            .finish()
    }
}

impl GifSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded GIF, available after [`FrameSink::end`].
    pub fn into_bytes(self) -> MontageResult<Vec<u8>> {
        self.bytes
            .ok_or_else(|| MontageError::encode("gif sink finished without output"))
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> MontageResult<()> {
        self.state.begin(cfg);
        self.frames.clear();
        self.bytes = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> MontageResult<()> {
        self.state.accept(idx, frame)?;
        let delay_ms = self.state.config()?.frame_duration_ms;
        // Frames are composited over an opaque background, so premultiplied equals straight.
        let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
            .ok_or_else(|| MontageError::encode(format!("frame {idx} buffer size mismatch")))?;
        self.frames.push(Frame::from_parts(
            rgba,
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms, 1),
        ));
        Ok(())
    }

    fn end(&mut self) -> MontageResult<()> {
        self.state.config()?;
        if self.frames.is_empty() {
            return Err(MontageError::encode("gif sink received no frames"));
        }

        let mut buf = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut buf, QUANTIZER_SPEED);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| MontageError::encode(format!("gif: {e}")))?;
            encoder
                .encode_frames(std::mem::take(&mut self.frames))
                .map_err(|e| MontageError::encode(format!("gif: {e}")))?;
        }
        self.bytes = Some(buf);
        Ok(())
    }
}
