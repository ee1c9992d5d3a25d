use std::path::Path;

use crate::assets::decode::decode_image_file;
use crate::assets::discover::{discover_media, shuffle_media};
use crate::assets::font::CaptionFont;
use crate::caption::{file_stem_caption, normalize_caption};
use crate::config::ReelConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::pipeline::RunReport;
use crate::render::compose::FrameComposer;

/// Build a slideshow from every recognized picture in `input_dir`, in shuffled order.
///
/// The caption font is resolved from `cfg.video.font_dirs` and the system fonts.
pub fn build_video(
    cfg: &ReelConfig,
    input_dir: &Path,
    sink: &mut dyn FrameSink,
) -> ReelResult<RunReport> {
    let video = &cfg.video;
    let font = CaptionFont::resolve(&video.caption_font, video.caption_size_px, &video.font_dirs);
    build_video_with_font(cfg, input_dir, font, sink)
}

/// [`build_video`] with an already resolved caption font.
///
/// Each picture is held for `seconds_per_image * fps` identical frames. Pictures that fail to
/// decode are skipped with a warning. `sink.begin` runs just before the first frame and
/// `sink.end` once after the last; if no picture decodes the sink is never started and the call
/// fails with [`ReelError::EmptyInputSet`].
#[tracing::instrument(skip(cfg, font, sink), fields(input = %input_dir.display()))]
pub fn build_video_with_font(
    cfg: &ReelConfig,
    input_dir: &Path,
    font: CaptionFont,
    sink: &mut dyn FrameSink,
) -> ReelResult<RunReport> {
    let video = &cfg.video;
    video.validate()?;
    let fps = video.frame_rate()?;
    let hold = video.frames_per_image()?;

    let mut items = discover_media(input_dir, &video.extensions)?;
    shuffle_media(&mut items, cfg.seed);

    let composer = FrameComposer::new(video, font);
    let canvas = composer.canvas();
    let total = items.len();
    let mut report = RunReport::default();
    let mut next = 0u64;
    let mut started = false;

    for (i, path) in items.into_iter().enumerate() {
        let caption = normalize_caption(&file_stem_caption(&path));
        tracing::info!("processing {}/{}: {} caption='{}'", i + 1, total, path.display(), caption);

        let picture = match decode_image_file(&path) {
            Ok(img) => img,
            Err(e) if e.is_per_item() => {
                report.skip(path, &e);
                continue;
            }
            Err(e) => return Err(e),
        };
        let frame = composer.compose(&picture, &caption)?;

        if !started {
            sink.begin(SinkConfig {
                width: canvas.width,
                height: canvas.height,
                fps,
            })?;
            started = true;
        }
        for _ in 0..hold {
            sink.push_frame(FrameIndex(next), &frame)?;
            next += 1;
        }
        report.written += 1;
    }

    if !started {
        return Err(ReelError::EmptyInputSet(input_dir.to_path_buf()));
    }
    sink.end()?;
    tracing::info!(
        written = report.written,
        skipped = report.skipped.len(),
        frames = next,
        "video complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use usvg::fontdb;

    use super::*;
    use crate::config::VideoConfig;
    use crate::encode::sink::InMemorySink;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "photoreel_videorun_{name}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path, w: u32, h: u32, rgb: [u8; 3]) {
        let [r, g, b] = rgb;
        image::RgbaImage::from_pixel(w, h, image::Rgba([r, g, b, 255]))
            .save_with_format(path, image::ImageFormat::Png)
            .unwrap();
    }

    fn small_cfg() -> ReelConfig {
        ReelConfig {
            video: VideoConfig {
                width: 64,
                height: 32,
                fps: 2,
                seconds_per_image: 1.5,
                caption_margin_px: 2,
                ..VideoConfig::default()
            },
            seed: Some(9),
            ..ReelConfig::default()
        }
    }

    fn builtin_font() -> CaptionFont {
        CaptionFont::with_database("Arial", 12.0, fontdb::Database::new())
    }

    #[test]
    fn each_picture_is_held_for_its_frame_count() {
        let dir = temp_dir("hold");
        write_png(&dir.join("a.png"), 40, 40, [255, 0, 0]);
        write_png(&dir.join("b.png"), 80, 20, [0, 255, 0]);

        let mut sink = InMemorySink::new();
        let report = build_video_with_font(&small_cfg(), &dir, builtin_font(), &mut sink).unwrap();
        assert_eq!(report.written, 2);
        assert!(sink.is_finished());

        let cfg = sink.config().unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.fps.num), (64, 32, 2));
        // 1.5s at 2fps rounds to 3 frames per picture.
        let frames = sink.frames();
        assert_eq!(frames.len(), 6);
        for (i, (idx, frame)) in frames.iter().enumerate() {
            assert_eq!(*idx, FrameIndex(i as u64));
            assert_eq!((frame.width, frame.height), (64, 32));
        }
        assert_eq!(frames[0].1.data, frames[2].1.data);
        assert_ne!(frames[2].1.data, frames[3].1.data);
    }

    #[test]
    fn undecodable_files_are_skipped() {
        let dir = temp_dir("skip");
        write_png(&dir.join("ok.png"), 10, 10, [1, 2, 3]);
        std::fs::write(dir.join("bad.png"), b"garbage").unwrap();

        let mut sink = InMemorySink::new();
        let report = build_video_with_font(&small_cfg(), &dir, builtin_font(), &mut sink).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(sink.frames().len(), 3);
    }

    #[test]
    fn nothing_decodable_never_starts_the_sink() {
        let dir = temp_dir("none");
        std::fs::write(dir.join("bad.png"), b"garbage").unwrap();

        let mut sink = InMemorySink::new();
        let err = build_video_with_font(&small_cfg(), &dir, builtin_font(), &mut sink).unwrap_err();
        assert!(matches!(err, ReelError::EmptyInputSet(_)));
        assert!(sink.config().is_none());
        assert!(!sink.is_finished());
    }

    #[test]
    fn missing_folder_is_reported() {
        let dir = temp_dir("missing").join("does-not-exist");
        let mut sink = InMemorySink::new();
        let err = build_video_with_font(&small_cfg(), &dir, builtin_font(), &mut sink).unwrap_err();
        assert!(matches!(err, ReelError::MissingInputDirectory(_)));
    }
}
