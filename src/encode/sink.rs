use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{GiltError, GiltResult};
use crate::render::raster::{FrameRGBA, write_png};
use std::path::PathBuf;

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> GiltResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> GiltResult<()>;
    fn end(&mut self) -> GiltResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> GiltResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> GiltResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> GiltResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes each frame as `frame_000123.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
    last_idx: Option<FrameIndex>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
            last_idx: None,
        }
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", idx.0))
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> GiltResult<()> {
        use anyhow::Context as _;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame dir '{}'", self.dir.display()))?;
        self.written = 0;
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> GiltResult<()> {
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(GiltError::encode("png sink received out-of-order frame index"));
        }
        self.last_idx = Some(idx);
        write_png(&self.frame_path(idx), frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> GiltResult<()> {
        tracing::info!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}
