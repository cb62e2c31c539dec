use crate::foundation::core::Canvas;
use crate::foundation::error::{GiltError, GiltResult};
use anyhow::Context as _;
use std::path::Path;
use std::sync::Arc;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha in place (no-op when already straight).
    pub fn unpremultiply(&mut self) {
        if !self.premultiplied {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Rasterizes SVG documents with a shared font database.
#[derive(Clone)]
pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgRasterizer {
    /// Load system fonts plus any fonts found directly inside `font_dir`.
    pub fn new(font_dir: Option<&Path>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = font_dir {
            db.load_fonts_dir(dir);
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self { fontdb: Arc::new(db) }
    }

    /// A rasterizer without any fonts; text is skipped.
    pub fn without_fonts() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }

    pub fn font_faces(&self) -> usize {
        self.fontdb.len()
    }

    /// Parse `svg` and draw it scaled to fill `canvas`, optionally over an opaque clear color.
    pub fn rasterize(
        &self,
        svg: &str,
        canvas: Canvas,
        clear_rgba: Option<[u8; 4]>,
    ) -> GiltResult<FrameRGBA> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| GiltError::render(format!("parse scene svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| GiltError::render("failed to allocate frame pixmap"))?;
        if let Some([r, g, b, a]) = clear_rgba {
            pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));
        }

        let size = tree.size();
        if !size.width().is_finite() || size.width() <= 0.0 || size.height() <= 0.0 {
            return Err(GiltError::render("svg has invalid width/height"));
        }
        let sx = (canvas.width as f32) / size.width();
        let sy = (canvas.height as f32) / size.height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

impl std::fmt::Debug for SvgRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRasterizer")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

/// Write a frame as PNG (straight alpha), creating parent directories.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> GiltResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let mut straight = frame.clone();
    straight.unpremultiply();
    image::save_buffer_with_format(
        path,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
