//! Run configuration.
//!
//! Every field has a default matching the stock behavior, so a JSON file only needs the keys it
//! wants to change. Configuration is passed explicitly into [`crate::build_deck`] and
//! [`crate::build_video`]; nothing reads global state.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Fps, Rect, inches_to_emu};
use crate::foundation::error::{ReelError, ReelResult};

/// Top-level configuration shared by both subcommands.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReelConfig {
    /// Slide deck settings.
    pub deck: DeckConfig,
    /// Video settings.
    pub video: VideoConfig,
    /// Shuffle seed. `None` shuffles from OS entropy.
    pub seed: Option<u64>,
}

impl ReelConfig {
    /// Read a JSON configuration file and validate it.
    pub fn load(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| ReelError::validation(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate both sections.
    pub fn validate(&self) -> ReelResult<()> {
        self.deck.validate()?;
        self.video.validate()
    }
}

/// A rectangle on a slide, in inches from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxInches {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl BoxInches {
    /// Same box in EMU, as a frame rectangle for the layout engine.
    pub fn to_emu_rect(self) -> Rect {
        Rect::new(
            inches_to_emu(self.left) as f64,
            inches_to_emu(self.top) as f64,
            inches_to_emu(self.left + self.width) as f64,
            inches_to_emu(self.top + self.height) as f64,
        )
    }

    fn validate(&self, what: &str) -> ReelResult<()> {
        let finite = [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.left < 0.0 || self.top < 0.0 || self.width <= 0.0 || self.height <= 0.0
        {
            return Err(ReelError::validation(format!(
                "{what} must have non-negative position and positive size"
            )));
        }
        Ok(())
    }
}

/// Slide deck (PPTX) settings. Lengths are inches.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckConfig {
    /// Output file.
    pub output: PathBuf,
    /// Recognized extensions, compared case-insensitively, without the dot.
    pub extensions: Vec<String>,
    /// Slide width.
    pub slide_width_in: f64,
    /// Slide height.
    pub slide_height_in: f64,
    /// Region the picture is fitted into.
    pub frame: BoxInches,
    /// Caption text box.
    pub caption_box: BoxInches,
    /// Caption font family.
    pub caption_font: String,
    /// Caption size in points.
    pub caption_size_pt: f64,
    /// Bold caption.
    pub caption_bold: bool,
    /// Caption color.
    pub caption_rgb: [u8; 3],
    /// Wrap captions at this many characters.
    pub caption_wrap_width: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("random_images_presentation.pptx"),
            extensions: ["jpg", "jpeg", "png", "bmp"].map(String::from).to_vec(),
            slide_width_in: 10.0,
            slide_height_in: 7.5,
            frame: BoxInches {
                left: 0.5,
                top: 0.5,
                width: 8.0,
                height: 6.0,
            },
            caption_box: BoxInches {
                left: 0.5,
                top: 6.5,
                width: 8.0,
                height: 1.0,
            },
            caption_font: "Calibri".to_string(),
            caption_size_pt: 18.0,
            caption_bold: true,
            caption_rgb: [0, 0, 0],
            caption_wrap_width: 60,
        }
    }
}

impl DeckConfig {
    /// Check sizes and bounds.
    pub fn validate(&self) -> ReelResult<()> {
        // PowerPoint accepts slide sizes between 1in and 56in.
        for (what, v) in [
            ("slide_width_in", self.slide_width_in),
            ("slide_height_in", self.slide_height_in),
        ] {
            if !v.is_finite() || !(1.0..=56.0).contains(&v) {
                return Err(ReelError::validation(format!(
                    "{what} must be between 1 and 56 inches"
                )));
            }
        }
        self.frame.validate("frame")?;
        self.caption_box.validate("caption_box")?;
        if !self.caption_size_pt.is_finite()
            || self.caption_size_pt < 1.0
            || self.caption_size_pt > 4000.0
        {
            return Err(ReelError::validation(
                "caption_size_pt must be between 1 and 4000",
            ));
        }
        if self.caption_wrap_width == 0 {
            return Err(ReelError::validation("caption_wrap_width must be > 0"));
        }
        validate_extensions(&self.extensions)
    }

    /// Slide size in EMU.
    pub fn slide_size_emu(&self) -> (i64, i64) {
        (
            inches_to_emu(self.slide_width_in),
            inches_to_emu(self.slide_height_in),
        )
    }
}

/// Video (MP4) settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoConfig {
    /// Output file.
    pub output: PathBuf,
    /// Recognized extensions, compared case-insensitively, without the dot.
    pub extensions: Vec<String>,
    /// Frame width in pixels, even.
    pub width: u32,
    /// Frame height in pixels, even.
    pub height: u32,
    /// Output frame rate.
    pub fps: u32,
    /// How long each picture stays on screen.
    pub seconds_per_image: f64,
    /// Caption font family.
    pub caption_font: String,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files before system fonts are used.
    pub font_dirs: Vec<PathBuf>,
    /// Caption font size in pixels.
    pub caption_size_px: f32,
    /// Caption text color.
    pub caption_rgb: [u8; 3],
    /// Caption backdrop color, straight alpha.
    pub caption_box_rgba: [u8; 4],
    /// Padding around the caption and distance to the bottom edge.
    pub caption_margin_px: u32,
    /// Canvas color around the fitted picture.
    pub background_rgb: [u8; 3],
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("random_photos_video.mp4"),
            extensions: ["png", "jpg", "jpeg", "bmp", "tiff"]
                .map(String::from)
                .to_vec(),
            width: 1280,
            height: 720,
            fps: 1,
            seconds_per_image: 3.0,
            caption_font: "Arial".to_string(),
            font_dirs: vec![PathBuf::from("fonts")],
            caption_size_px: 48.0,
            caption_rgb: [255, 255, 255],
            caption_box_rgba: [0, 0, 0, 128],
            caption_margin_px: 10,
            background_rgb: [0, 0, 0],
        }
    }
}

impl VideoConfig {
    /// Check sizes and timing.
    pub fn validate(&self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation(
                "video width/height must be non-zero",
            ));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // yuv420p output needs even dimensions.
            return Err(ReelError::validation(
                "video width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.width > 16_384 || self.height > 16_384 {
            return Err(ReelError::validation(
                "video width/height must be at most 16384",
            ));
        }
        Fps::new(self.fps, 1)?;
        if !self.seconds_per_image.is_finite() || self.seconds_per_image <= 0.0 {
            return Err(ReelError::validation("seconds_per_image must be > 0"));
        }
        if !self.caption_size_px.is_finite() || self.caption_size_px <= 0.0 {
            return Err(ReelError::validation("caption_size_px must be > 0"));
        }
        if self.caption_margin_px > self.width.min(self.height) / 4 {
            return Err(ReelError::validation(
                "caption_margin_px must be at most a quarter of the smaller frame side",
            ));
        }
        validate_extensions(&self.extensions)
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Output frame rate.
    pub fn frame_rate(&self) -> ReelResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// How many identical frames realize one picture's display time.
    pub fn frames_per_image(&self) -> ReelResult<u64> {
        Ok(self.frame_rate()?.frames_for_secs(self.seconds_per_image))
    }
}

fn validate_extensions(exts: &[String]) -> ReelResult<()> {
    if exts.is_empty() {
        return Err(ReelError::validation("extensions must not be empty"));
    }
    if let Some(bad) = exts
        .iter()
        .find(|e| e.is_empty() || e.starts_with('.') || e.contains(['/', '\\']))
    {
        return Err(ReelError::validation(format!(
            "extension '{bad}' must be a bare suffix such as \"jpg\""
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        ReelConfig::default().validate().unwrap();
        let video = VideoConfig::default();
        assert_eq!(video.frames_per_image().unwrap(), 3);
        assert_eq!(video.canvas(), Canvas { width: 1280, height: 720 });
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ReelConfig =
            serde_json::from_str(r#"{ "video": { "fps": 25, "seconds_per_image": 2 }, "seed": 7 }"#)
                .unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.video.fps, 25);
        assert_eq!(cfg.video.frames_per_image().unwrap(), 50);
        assert_eq!(cfg.video.width, 1280);
        assert_eq!(cfg.deck, DeckConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<ReelConfig>(r#"{ "vidoe": {} }"#).is_err());
    }

    #[test]
    fn bad_values_are_rejected() {
        let mut video = VideoConfig::default();
        video.width = 1281;
        assert!(video.validate().is_err());

        let mut video = VideoConfig::default();
        video.fps = 0;
        assert!(video.validate().is_err());

        let mut video = VideoConfig::default();
        video.seconds_per_image = 0.0;
        assert!(video.validate().is_err());

        let mut video = VideoConfig::default();
        video.caption_margin_px = 1_200_000_000;
        assert!(video.validate().is_err());
        video.caption_margin_px = 180;
        video.validate().unwrap();
        video.caption_margin_px = 181;
        assert!(video.validate().is_err());

        let mut deck = DeckConfig::default();
        deck.frame.width = 0.0;
        assert!(deck.validate().is_err());

        let mut deck = DeckConfig::default();
        deck.extensions = vec![".png".to_string()];
        assert!(deck.validate().is_err());

        let mut deck = DeckConfig::default();
        deck.slide_width_in = 100.0;
        assert!(deck.validate().is_err());
    }

    #[test]
    fn frame_box_converts_to_emu() {
        let rect = DeckConfig::default().frame.to_emu_rect();
        assert_eq!(rect.x0, 457_200.0);
        assert_eq!(rect.y0, 457_200.0);
        assert_eq!(rect.width(), 7_315_200.0);
        assert_eq!(rect.height(), 5_486_400.0);
        assert_eq!(DeckConfig::default().slide_size_emu(), (9_144_000, 6_858_000));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "photoreel_config_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "deck": { "caption_font": "Georgia" } }"#).unwrap();
        let cfg = ReelConfig::load(&path).unwrap();
        assert_eq!(cfg.deck.caption_font, "Georgia");
        std::fs::remove_file(&path).ok();

        assert!(ReelConfig::load(Path::new("definitely/missing.json")).is_err());
    }
}
