//! Gilt renders a scripted birthday reveal.
//!
//! The core is a timer-driven [`SequenceController`] (`idle -> chars -> settled -> finalShow ->
//! complete`, with a delayed reset back to `idle`). Around it:
//!
//! - Load a [`RevealConfig`] and a [`ContentSet`]
//! - Create a [`RevealSession`], which plays the config script against a virtual clock
//! - Render single frames, or stream a range into a [`FrameSink`] (PNG sequence or MP4 via ffmpeg)
#![forbid(unsafe_code)]

mod foundation;

/// Reveal configuration and interaction script.
pub mod config;
/// Cards, theme colors and the card modal.
pub mod content;
/// Frame sinks.
pub mod encode;
pub mod icons;
/// SVG rasterization.
pub mod render;
pub mod scene;
pub mod sequence;
/// Scripted playback and frame rendering.
pub mod session;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Millis, Point, Vec2};
pub use crate::foundation::error::{GiltError, GiltResult};

pub use crate::config::{RevealConfig, ScriptAction, ScriptEvent};
pub use crate::content::color::Rgba8;
pub use crate::content::modal::CardModal;
pub use crate::content::{CardData, ContentSet, IconType, Theme};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::icons::{Character, standalone_icon_svg};
pub use crate::render::{FrameRGBA, SvgRasterizer, write_png};
pub use crate::scene::{PageScroll, SceneSnapshot, Section, build_scene_svg};
pub use crate::sequence::{
    Clock, ControllerEvent, FixedVelocities, ManualClock, Particle, SeededVelocities,
    SequenceController, SequenceStage, SequenceTimings, SystemClock, Transition, VelocitySource,
    VisibilityFlags, VisibilityTrigger,
};
pub use crate::session::{RevealSession, TimelineEntry};
