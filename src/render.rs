//! CPU rasterization of scene SVG into RGBA frames.

pub mod raster;

pub use raster::{FrameRGBA, SvgRasterizer, write_png};
