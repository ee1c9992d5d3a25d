use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_photoreel")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "photoreel.exe"
            } else {
                "photoreel"
            });
            p
        })
}

fn fixture_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_deck_writes_pptx() {
    let dir = fixture_dir("deck");
    let photos = dir.join("photos");
    std::fs::create_dir_all(&photos).unwrap();
    for (i, (w, h)) in [(64, 32), (32, 64)].into_iter().enumerate() {
        image::RgbImage::from_pixel(w, h, image::Rgb([10, 200, 10]))
            .save(photos.join(format!("shot{i}.png")))
            .unwrap();
    }
    let out = dir.join("deck.pptx");

    let status = std::process::Command::new(exe())
        .args(["--seed", "5", "deck", "--in"])
        .arg(&photos)
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();

    assert!(status.success());
    let archive = zip::ZipArchive::new(std::fs::File::open(&out).unwrap()).unwrap();
    assert!(archive.file_names().any(|n| n == "ppt/slides/slide2.xml"));
}

#[test]
fn cli_reads_folder_from_stdin_when_in_is_missing() {
    use std::io::Write as _;

    let dir = fixture_dir("prompt");
    let photos = dir.join("photos");
    std::fs::create_dir_all(&photos).unwrap();
    image::RgbImage::from_pixel(16, 16, image::Rgb([1, 2, 3]))
        .save(photos.join("only.png"))
        .unwrap();
    let out = dir.join("deck.pptx");

    let mut child = std::process::Command::new(exe())
        .arg("deck")
        .arg("--out")
        .arg(&out)
        .stdin(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .unwrap();
    writeln!(child.stdin.take().unwrap(), "{}", photos.display()).unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Enter the path to the folder containing images"));
    assert!(out.exists());
}

#[test]
fn cli_fails_on_missing_folder() {
    let dir = fixture_dir("missing");
    let output = std::process::Command::new(exe())
        .args(["deck", "--in"])
        .arg(dir.join("nowhere"))
        .arg("--out")
        .arg(dir.join("deck.pptx"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("input directory not found"));
}
