use std::io::Read as _;
use std::path::{Path, PathBuf};

use photoreel::{DeckStyle, PptxWriter, ReelConfig, ReelError, build_deck};

fn fixture_dir(name: &str) -> PathBuf {
    let dir =
        std::env::temp_dir().join(format!("photoreel_it_deck_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_image(path: &Path, w: u32, h: u32, format: image::ImageFormat) {
    image::RgbImage::from_pixel(w, h, image::Rgb([90, 140, 200]))
        .save_with_format(path, format)
        .unwrap();
}

fn read_entry(archive: &mut zip::ZipArchive<std::fs::File>, name: &str) -> String {
    let mut s = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing {name}"))
        .read_to_string(&mut s)
        .unwrap();
    s
}

#[test]
fn deck_has_one_slide_per_readable_picture() {
    let dir = fixture_dir("slides");
    write_image(&dir.join("beach.png"), 300, 200, image::ImageFormat::Png);
    write_image(&dir.join("forest.JPG"), 200, 300, image::ImageFormat::Jpeg);
    write_image(&dir.join("Photo 7 - city.bmp"), 64, 64, image::ImageFormat::Bmp);
    std::fs::write(dir.join("corrupt.png"), b"\x89PNG but not really").unwrap();
    std::fs::write(dir.join("readme.txt"), "skip me").unwrap();

    let out = dir.join("out").join("deck.pptx");
    let cfg = ReelConfig {
        seed: Some(42),
        ..ReelConfig::default()
    };
    let mut writer = PptxWriter::new(&out, DeckStyle::from_config(&cfg.deck));
    let report = build_deck(&cfg, &dir, &mut writer).unwrap();

    assert_eq!(report.written, 3);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].path.ends_with("corrupt.png"));

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&out).unwrap()).unwrap();
    let presentation = read_entry(&mut archive, "ppt/presentation.xml");
    assert_eq!(presentation.matches("<p:sldId ").count(), 3);
    assert!(archive.by_name("ppt/slides/slide4.xml").is_err());

    let types = read_entry(&mut archive, "[Content_Types].xml");
    for ext in ["png", "jpeg", "bmp"] {
        assert!(types.contains(&format!(r#"Extension="{ext}""#)), "{ext}");
    }

    // Deck captions keep the raw stem.
    let mut all_slides = String::new();
    for n in 1..=3 {
        all_slides.push_str(&read_entry(&mut archive, &format!("ppt/slides/slide{n}.xml")));
    }
    assert!(all_slides.contains("<a:t>Photo 7 - city</a:t>"));
    assert!(all_slides.contains("<a:t>beach</a:t>"));
}

#[test]
fn same_seed_gives_same_order() {
    let dir = fixture_dir("seed");
    for i in 0..6 {
        write_image(&dir.join(format!("img{i}.png")), 8, 8, image::ImageFormat::Png);
    }
    let cfg = ReelConfig {
        seed: Some(7),
        ..ReelConfig::default()
    };

    let order = |cfg: &ReelConfig| {
        let mut deck = photoreel::InMemoryDeck::new();
        build_deck(cfg, &dir, &mut deck).unwrap();
        deck.slides()
            .iter()
            .map(|s| s.image_path.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(order(&cfg), order(&cfg));
}

#[test]
fn empty_and_missing_folders_fail() {
    let dir = fixture_dir("empty");
    std::fs::write(dir.join("notes.txt"), "x").unwrap();

    let mut deck = photoreel::InMemoryDeck::new();
    let err = build_deck(&ReelConfig::default(), &dir, &mut deck).unwrap_err();
    assert!(matches!(err, ReelError::EmptyInputSet(_)));

    let err = build_deck(&ReelConfig::default(), &dir.join("nope"), &mut deck).unwrap_err();
    assert!(matches!(err, ReelError::MissingInputDirectory(_)));
}
