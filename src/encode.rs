//! Frame sinks. Sinks consume rendered frames in timeline order.

/// `ffmpeg`-based MP4 sink.
pub mod ffmpeg;
/// Sink trait and built-in sinks.
pub mod sink;
