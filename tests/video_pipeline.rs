use std::path::{Path, PathBuf};

use photoreel::{
    CaptionFont, FrameIndex, InMemorySink, ReelConfig, VideoConfig, build_video_with_font,
};
use usvg::fontdb;

fn fixture_dir(name: &str) -> PathBuf {
    let dir =
        std::env::temp_dir().join(format!("photoreel_it_video_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &Path, w: u32, h: u32, rgba: [u8; 4]) {
    image::RgbaImage::from_pixel(w, h, image::Rgba(rgba))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

fn cfg(width: u32, height: u32) -> ReelConfig {
    ReelConfig {
        video: VideoConfig {
            width,
            height,
            fps: 1,
            seconds_per_image: 2.0,
            background_rgb: [0, 0, 255],
            caption_margin_px: 2,
            ..VideoConfig::default()
        },
        seed: Some(1),
        ..ReelConfig::default()
    }
}

fn builtin_font() -> CaptionFont {
    CaptionFont::with_database("Arial", 16.0, fontdb::Database::new())
}

#[test]
fn wide_picture_is_letterboxed() {
    let dir = fixture_dir("letterbox");
    // Prefix only, so the caption is empty and nothing covers the picture.
    write_png(&dir.join("Photo 1 - .png"), 200, 50, [255, 0, 0, 255]);

    let mut sink = InMemorySink::new();
    build_video_with_font(&cfg(100, 100), &dir, builtin_font(), &mut sink).unwrap();

    let frames = sink.frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1].0, FrameIndex(1));
    let frame = &frames[0].1;
    // 200x50 fitted into 100x100 is 100x25 at y = 37..62.
    assert_eq!(frame.pixel(50, 10), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(50, 90), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(50, 50), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(0, 50), Some([255, 0, 0, 255]));
}

#[test]
fn transparent_pixels_show_background() {
    let dir = fixture_dir("alpha");
    write_png(&dir.join("Photo 2 -.png"), 10, 10, [255, 255, 255, 0]);

    let mut sink = InMemorySink::new();
    build_video_with_font(&cfg(20, 10), &dir, builtin_font(), &mut sink).unwrap();
    let frame = &sink.frames()[0].1;
    assert_eq!(frame.pixel(10, 5), Some([0, 0, 255, 255]));
}

#[test]
fn frame_indices_continue_across_pictures() {
    let dir = fixture_dir("indices");
    for i in 0..3 {
        write_png(&dir.join(format!("p{i}.png")), 4, 4, [i * 80, 0, 0, 255]);
    }
    std::fs::write(dir.join("broken.png"), b"nope").unwrap();

    let mut sink = InMemorySink::new();
    let report = build_video_with_font(&cfg(8, 8), &dir, builtin_font(), &mut sink).unwrap();
    assert_eq!(report.written, 3);
    assert_eq!(report.skipped.len(), 1);

    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, (0..6).collect::<Vec<_>>());
}

#[test]
fn stripped_caption_is_drawn_in_the_bottom_band() {
    let dir = fixture_dir("caption");
    write_png(&dir.join("Photo 3 - Sunset at the lake.png"), 160, 90, [255, 0, 0, 255]);

    let mut sink = InMemorySink::new();
    build_video_with_font(&cfg(160, 90), &dir, builtin_font(), &mut sink).unwrap();
    let frame = &sink.frames()[0].1;

    // The picture fills the frame; the top stays untouched.
    for x in 0..160 {
        assert_eq!(frame.pixel(x, 5), Some([255, 0, 0, 255]));
    }
    let changed = (60..90)
        .flat_map(|y| (0..160).map(move |x| (x, y)))
        .filter(|&(x, y)| frame.pixel(x, y) != Some([255, 0, 0, 255]))
        .count();
    assert!(changed > 0, "no caption pixels in the bottom band");
}

#[test]
fn whitespace_only_caption_leaves_frame_untouched() {
    let dir = fixture_dir("blank_caption");
    write_png(&dir.join("Photo 3 -   .png"), 160, 90, [255, 0, 0, 255]);

    let mut sink = InMemorySink::new();
    build_video_with_font(&cfg(160, 90), &dir, builtin_font(), &mut sink).unwrap();
    let frame = &sink.frames()[0].1;
    assert!(frame.data.chunks_exact(4).all(|px| px == [255, 0, 0, 255]));
}

#[test]
fn caption_comes_from_the_stripped_stem() {
    // Same picture, with and without the numbered prefix, gives identical frames.
    let prefixed = fixture_dir("prefixed");
    write_png(&prefixed.join("Photo 12 - Lake.png"), 160, 90, [0, 128, 0, 255]);
    let bare = fixture_dir("bare");
    write_png(&bare.join("Lake.png"), 160, 90, [0, 128, 0, 255]);

    let mut a = InMemorySink::new();
    build_video_with_font(&cfg(160, 90), &prefixed, builtin_font(), &mut a).unwrap();
    let mut b = InMemorySink::new();
    build_video_with_font(&cfg(160, 90), &bare, builtin_font(), &mut b).unwrap();
    assert_eq!(a.frames()[0].1, b.frames()[0].1);
}
