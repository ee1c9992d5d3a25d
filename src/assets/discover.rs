use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::{SeedableRng as _, seq::SliceRandom as _};

use crate::foundation::error::{ReelError, ReelResult};

/// Return `true` when `path` has one of `extensions` (case-insensitive, no leading dot).
pub fn has_media_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

/// List regular files in `dir` whose extension is in `extensions`, sorted by file name.
///
/// Subdirectories are not descended into.
pub fn discover_media(dir: &Path, extensions: &[String]) -> ReelResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ReelError::MissingInputDirectory(dir.to_path_buf()));
    }

    let rd = std::fs::read_dir(dir).with_context(|| format!("list '{}'", dir.display()))?;
    let mut found = Vec::new();
    for entry in rd {
        let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || !has_media_extension(&path, extensions) {
            continue;
        }
        found.push(path);
    }

    if found.is_empty() {
        return Err(ReelError::EmptyInputSet(dir.to_path_buf()));
    }

    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::info!(count = found.len(), dir = %dir.display(), "found images");
    Ok(found)
}

/// Shuffle in place. A seed makes the order reproducible for the same input list.
pub fn shuffle_media(items: &mut [PathBuf], seed: Option<u64>) {
    match seed {
        Some(seed) => items.shuffle(&mut rand::rngs::StdRng::seed_from_u64(seed)),
        None => items.shuffle(&mut rand::thread_rng()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "photoreel_{name}_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    fn exts() -> Vec<String> {
        vec!["jpg".to_string(), "png".to_string()]
    }

    #[test]
    fn extension_match_ignores_case() {
        assert!(has_media_extension(Path::new("a/B.JPG"), &exts()));
        assert!(has_media_extension(Path::new("x.Png"), &exts()));
        assert!(!has_media_extension(Path::new("x.gif"), &exts()));
        assert!(!has_media_extension(Path::new("png"), &exts()));
    }

    #[test]
    fn discover_filters_and_sorts() {
        let dir = temp_dir("discover_filters");
        std::fs::create_dir_all(dir.join("nested.png")).unwrap();
        for name in ["c.PNG", "a.jpg", "b.txt", "d.jpeg"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }

        let found = discover_media(&dir, &exts()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "c.PNG"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_and_empty_dirs_are_run_level_errors() {
        let dir = temp_dir("discover_empty");
        assert!(matches!(
            discover_media(&dir, &exts()),
            Err(ReelError::MissingInputDirectory(_))
        ));

        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("notes.txt"), b"x").unwrap();
        assert!(matches!(
            discover_media(&dir, &exts()),
            Err(ReelError::EmptyInputSet(_))
        ));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn seeded_shuffle_is_reproducible_permutation() {
        let items: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("{i}.png"))).collect();

        let mut a = items.clone();
        let mut b = items.clone();
        shuffle_media(&mut a, Some(42));
        shuffle_media(&mut b, Some(42));
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort();
        let mut expected = items.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }
}
