use std::path::{Path, PathBuf};
use std::sync::Arc;

use usvg::fontdb;

/// Family name of the built-in face.
pub const FALLBACK_FAMILY: &str = "Tuffy";

/// Tuffy Regular (public domain), used when no other face can be found.
const FALLBACK_FONT: &[u8] = include_bytes!("../../assets/Tuffy.ttf");

/// A caption font: the requested family at a pixel size, backed by a font database.
///
/// Resolution never fails. The requested family is used when installed; otherwise the first of
/// sans-serif, serif, monospace that exists; otherwise any face at all. A database without faces
/// gets the built-in [`FALLBACK_FAMILY`] face, so captions are always drawn.
#[derive(Clone)]
pub struct CaptionFont {
    requested: String,
    resolved: Option<String>,
    size_px: f32,
    db: Arc<fontdb::Database>,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("requested", &self.requested)
            .field("resolved", &self.resolved)
            .field("size_px", &self.size_px)
            .field("faces", &self.db.len())
            .finish()
    }
}

impl CaptionFont {
    /// Resolve `family` against font files in `font_dirs` plus the system fonts.
    pub fn resolve(family: &str, size_px: f32, font_dirs: &[PathBuf]) -> Self {
        let mut db = fontdb::Database::new();
        for dir in font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        db.load_system_fonts();
        Self::with_database(family, size_px, db)
    }

    /// Resolve `family` against an already populated database.
    ///
    /// An empty database is given the built-in face first.
    pub fn with_database(family: &str, size_px: f32, mut db: fontdb::Database) -> Self {
        if db.is_empty() {
            tracing::warn!(
                requested = family,
                using = FALLBACK_FAMILY,
                "no fonts installed, using the built-in face"
            );
            db.load_font_data(FALLBACK_FONT.to_vec());
        }
        let resolved = pick_family(&db, family);
        match &resolved {
            Some(name) if name.eq_ignore_ascii_case(family) => {
                tracing::debug!(family, "caption font resolved");
            }
            Some(name) => {
                tracing::warn!(
                    requested = family,
                    using = %name,
                    "caption font not installed, falling back"
                );
            }
            None => {
                tracing::warn!(
                    requested = family,
                    "built-in font could not be loaded, captions will be skipped"
                );
            }
        }
        Self {
            requested: family.to_string(),
            resolved,
            size_px,
            db: Arc::new(db),
        }
    }

    /// Family name that was asked for.
    pub fn requested_family(&self) -> &str {
        &self.requested
    }

    /// Family name that will actually draw text, if any face exists.
    pub fn resolved_family(&self) -> Option<&str> {
        self.resolved.as_deref()
    }

    /// `false` only when not even the built-in face could be loaded.
    pub fn is_available(&self) -> bool {
        self.resolved.is_some()
    }

    /// Size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Parse options for caption SVG documents rendered with this font.
    pub(crate) fn usvg_options(&self) -> usvg::Options<'static> {
        usvg::Options {
            fontdb: Arc::clone(&self.db),
            font_family: self
                .resolved
                .clone()
                .unwrap_or_else(|| self.requested.clone()),
            font_resolver: make_font_resolver(),
            ..Default::default()
        }
    }
}

fn pick_family(db: &fontdb::Database, family: &str) -> Option<String> {
    let families = [
        fontdb::Family::Name(family),
        fontdb::Family::SansSerif,
        fontdb::Family::Serif,
        fontdb::Family::Monospace,
    ];
    let query = fontdb::Query {
        families: &families,
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    let face = db.face(id)?;
    face.families.first().map(|(name, _)| name.clone())
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font file");
        }
    }
}

/// Resolver that always lands on some face when the database is non-empty.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, db| {
            let mut families = Vec::<fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => fontdb::Family::Name(s),
                });
            }
            families.push(fontdb::Family::SansSerif);
            families.push(fontdb::Family::Serif);

            let style = match font.style() {
                usvg::FontStyle::Normal => fontdb::Style::Normal,
                usvg::FontStyle::Italic => fontdb::Style::Italic,
                usvg::FontStyle::Oblique => fontdb::Style::Oblique,
            };

            let query = fontdb::Query {
                families: &families,
                weight: fontdb::Weight(font.weight()),
                stretch: fontdb::Stretch::Normal,
                style,
            };

            db.query(&query).or_else(|| db.faces().next().map(|f| f.id))
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}
