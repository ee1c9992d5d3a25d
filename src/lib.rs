//! Turn a folder of photos into a shuffled slideshow.
//!
//! Two outputs share one layout rule: each picture is scaled uniformly to fit a frame and
//! centered in it ([`compute_placement`]).
//!
//! - [`build_deck`] writes one PowerPoint slide per picture, captioned with the file name.
//! - [`build_video`] renders fixed-size frames and streams them to a [`FrameSink`], usually
//!   [`FfmpegSink`] for an H.264 MP4.
#![forbid(unsafe_code)]

/// Image discovery, decoding and caption fonts.
pub mod assets;
/// Caption text derived from file names.
pub mod caption;
/// Run configuration.
pub mod config;
/// Slide deck output.
pub mod deck;
/// Frame sinks.
pub mod encode;
/// Shared primitives and errors.
pub mod foundation;
/// Fit-and-center layout.
pub mod layout;
/// End-to-end runs.
pub mod pipeline;
/// Frame composition and pixel formats.
pub mod render;

pub use assets::decode::{decode_image, decode_image_file, probe_dimensions};
pub use assets::discover::{discover_media, shuffle_media};
pub use assets::font::CaptionFont;
pub use caption::{file_stem_caption, normalize_caption, wrap_caption};
pub use config::{BoxInches, DeckConfig, ReelConfig, VideoConfig};
pub use deck::{CaptionText, DeckStyle, InMemoryDeck, PptxWriter, Slide, SlideSink};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Canvas, Fps, FrameIndex, Rect, Size};
pub use foundation::error::{ReelError, ReelResult};
pub use layout::{Binding, PixelPlacement, Placement, compute_pixel_placement, compute_placement};
pub use pipeline::{RunReport, SkippedItem, build_deck, build_video, build_video_with_font};
pub use render::compose::FrameComposer;
pub use render::{FrameRGBA, PixelFormat, convert_pixels};
