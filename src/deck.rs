//! Slide deck output.
//!
//! A deck is built one slide per picture through a [`SlideSink`]; [`PptxWriter`] buffers
//! everything and serializes a PowerPoint package on `finish`.

/// OOXML part builders.
mod parts;
/// PowerPoint package writer.
pub mod pptx;
/// Slide description, sink trait and the in-memory sink.
pub mod sink;

pub use pptx::PptxWriter;
pub use sink::{CaptionText, DeckStyle, InMemoryDeck, Slide, SlideSink};
