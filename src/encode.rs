//! Video frame sinks.
//!
//! Sinks consume composed frames in output order; the video pipeline pushes each picture's frame
//! as many times as its display duration needs.

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
