use crate::content::color::Rgba8;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{GiltError, GiltResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::raster::FrameRGBA;
use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Color translucent pixels are flattened onto; its own alpha is ignored.
    pub background: Rgba8,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::rgb(0xF5, 0xF5, 0xF5),
        }
    }
}

/// Streams frames into the system `ffmpeg` as opaque raw RGBA (h264/yuv420p MP4).
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> GiltResult<()> {
        if self.encoder.is_some() {
            return Err(GiltError::encode("ffmpeg sink already started"));
        }
        self.encoder = Some(Encoder::spawn(&self.opts, cfg)?);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> GiltResult<()> {
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| GiltError::encode("ffmpeg sink not started"))?;
        encoder.write(idx, frame, self.opts.background)
    }

    fn end(&mut self) -> GiltResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| GiltError::encode("ffmpeg sink not started"))?;
        encoder.finish()?;
        tracing::info!(out = %self.opts.out_path.display(), "reveal video written");
        Ok(())
    }
}

/// One live `ffmpeg` process and the buffer frames are flattened into.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
    cfg: SinkConfig,
    opaque: Vec<u8>,
    next_idx: u64,
}

impl Encoder {
    fn spawn(opts: &FfmpegSinkOpts, cfg: SinkConfig) -> GiltResult<Self> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(GiltError::validation(
                "video width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(GiltError::validation(
                "video width/height must be even (yuv420p)",
            ));
        }
        ensure_parent_dir(&opts.out_path)?;
        if !opts.overwrite && opts.out_path.exists() {
            return Err(GiltError::validation(format!(
                "output file '{}' already exists",
                opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(GiltError::encode(
                "rendering a video needs ffmpeg on PATH",
            ));
        }

        let mut child = encode_command(opts, &cfg)
            .spawn()
            .map_err(|e| GiltError::encode(format!("spawn ffmpeg: {e}")))?;
        let (Some(stdin), Some(mut pipe)) = (child.stdin.take(), child.stderr.take()) else {
            return Err(GiltError::encode("ffmpeg started without stdio pipes"));
        };
        let stderr = std::thread::spawn(move || {
            let mut log = Vec::new();
            pipe.read_to_end(&mut log)?;
            Ok(log)
        });

        tracing::info!(
            out = %opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = %rate(cfg.fps),
            "encoding reveal video"
        );
        let opaque = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        Ok(Self {
            child,
            stdin,
            stderr,
            cfg,
            opaque,
            next_idx: 0,
        })
    }

    fn write(
        &mut self,
        idx: FrameIndex,
        frame: &FrameRGBA,
        background: Rgba8,
    ) -> GiltResult<()> {
        if idx.0 < self.next_idx {
            return Err(GiltError::encode(format!(
                "frame {} arrived after frame {}",
                idx.0,
                self.next_idx - 1
            )));
        }
        if (frame.width, frame.height) != (self.cfg.width, self.cfg.height) {
            return Err(GiltError::validation(format!(
                "frame is {}x{}, video is {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        self.next_idx = idx.0 + 1;

        flatten(frame, background, &mut self.opaque)?;
        self.stdin
            .write_all(&self.opaque)
            .map_err(|e| GiltError::encode(format!("write frame {} to ffmpeg: {e}", idx.0)))
    }

    /// Close stdin and wait for ffmpeg; its stderr becomes the error on failure.
    fn finish(self) -> GiltResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
            ..
        } = self;
        drop(stdin);

        let status = child
            .wait()
            .map_err(|e| GiltError::encode(format!("wait for ffmpeg: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| GiltError::encode("ffmpeg stderr reader panicked"))?
            .map_err(|e| GiltError::encode(format!("read ffmpeg stderr: {e}")))?;
        if !status.success() {
            return Err(GiltError::encode(format!(
                "ffmpeg failed ({status}): {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        Ok(())
    }
}

fn encode_command(opts: &FfmpegSinkOpts, cfg: &SinkConfig) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .arg(if opts.overwrite { "-y" } else { "-n" })
        .args(["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"])
        .args(["-s", &format!("{}x{}", cfg.width, cfg.height)])
        .args(["-r", &rate(cfg.fps)])
        .args(["-i", "pipe:0", "-an", "-c:v", "libx264", "-pix_fmt", "yuv420p"])
        .args(["-movflags", "+faststart"])
        .arg(&opts.out_path);
    cmd
}

/// Input rate as ffmpeg's rational `num/den`.
fn rate(fps: Fps) -> String {
    format!("{}/{}", fps.num, fps.den)
}

/// Composite `frame` onto `background` into `dst`, which comes out fully opaque.
fn flatten(frame: &FrameRGBA, background: Rgba8, dst: &mut [u8]) -> GiltResult<()> {
    if dst.len() != frame.data.len() || !dst.len().is_multiple_of(4) {
        return Err(GiltError::validation(
            "frame data size does not match width*height*4",
        ));
    }
    let under = [background.r, background.g, background.b].map(u16::from);
    for (out, px) in dst.chunks_exact_mut(4).zip(frame.data.chunks_exact(4)) {
        let alpha = u16::from(px[3]);
        for (o, (&c, &u)) in out.iter_mut().zip(px.iter().zip(&under)) {
            let c = if frame.premultiplied {
                u16::from(c)
            } else {
                mul_div255_u16(u16::from(c), alpha)
            };
            *o = (c + mul_div255_u16(u, 255 - alpha)).min(255) as u8;
        }
        out[3] = u8::MAX;
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
fn ensure_parent_dir(path: &Path) -> GiltResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
