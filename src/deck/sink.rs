use std::path::PathBuf;

use crate::config::DeckConfig;
use crate::foundation::core::Rect;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::Placement;

/// Deck-wide page size and caption typography.
#[derive(Clone, Debug, PartialEq)]
pub struct DeckStyle {
    /// Slide width in EMU.
    pub slide_width_emu: i64,
    /// Slide height in EMU.
    pub slide_height_emu: i64,
    /// Caption font family.
    pub caption_font: String,
    /// Caption size in points.
    pub caption_size_pt: f64,
    /// Bold caption.
    pub caption_bold: bool,
    /// Caption color.
    pub caption_rgb: [u8; 3],
}

impl DeckStyle {
    /// Style taken from a deck configuration.
    pub fn from_config(cfg: &DeckConfig) -> Self {
        let (slide_width_emu, slide_height_emu) = cfg.slide_size_emu();
        Self {
            slide_width_emu,
            slide_height_emu,
            caption_font: cfg.caption_font.clone(),
            caption_size_pt: cfg.caption_size_pt,
            caption_bold: cfg.caption_bold,
            caption_rgb: cfg.caption_rgb,
        }
    }

    /// Caption size in OOXML hundredths of a point.
    pub fn caption_size_centipoints(&self) -> u32 {
        (self.caption_size_pt * 100.0).round() as u32
    }
}

/// Caption text box: position in EMU and the already wrapped lines.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionText {
    /// Text box bounds in EMU.
    pub bounds: Rect,
    /// One entry per visual line.
    pub lines: Vec<String>,
}

/// One slide: a picture placed in EMU plus its caption.
#[derive(Clone, Debug, PartialEq)]
pub struct Slide {
    /// Picture file, embedded as-is.
    pub image_path: PathBuf,
    /// Picture bounds in EMU.
    pub picture: Placement,
    /// Caption below the picture.
    pub caption: CaptionText,
}

/// Accumulates slides and writes the deck once at the end.
pub trait SlideSink {
    /// Append one slide.
    ///
    /// A [`ReelError::MediaDecode`] means this slide was not added and the deck is unchanged.
    fn add_slide(&mut self, slide: Slide) -> ReelResult<()>;
    /// Serialize the deck. Called once, after the last slide.
    fn finish(&mut self) -> ReelResult<()>;
}

/// Sink that keeps slides in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryDeck {
    slides: Vec<Slide>,
    finished: bool,
}

impl InMemoryDeck {
    /// Empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slides in insertion order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// `true` once `finish` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl SlideSink for InMemoryDeck {
    fn add_slide(&mut self, slide: Slide) -> ReelResult<()> {
        if self.finished {
            return Err(ReelError::output_write("deck is already finished"));
        }
        self.slides.push(slide);
        Ok(())
    }

    fn finish(&mut self) -> ReelResult<()> {
        if self.finished {
            return Err(ReelError::output_write("deck is already finished"));
        }
        self.finished = true;
        Ok(())
    }
}
