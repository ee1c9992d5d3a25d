use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::deck::parts::{self, MediaKind};
use crate::deck::sink::{CaptionText, DeckStyle, Slide, SlideSink};
use crate::encode::ffmpeg::ensure_parent_dir;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::Placement;

/// Writes slides into a `.pptx` package.
///
/// Picture bytes are read and sniffed in [`SlideSink::add_slide`], so an unreadable picture
/// is reported against that slide and the rest of the deck is unaffected. Nothing touches
/// `out_path` until [`SlideSink::finish`].
pub struct PptxWriter {
    out_path: PathBuf,
    style: DeckStyle,
    slides: Vec<PendingSlide>,
    finished: bool,
}

struct PendingSlide {
    name: String,
    bytes: Vec<u8>,
    kind: MediaKind,
    picture: Placement,
    caption: CaptionText,
}

impl PptxWriter {
    /// Writer for a deck at `out_path`.
    pub fn new(out_path: impl Into<PathBuf>, style: DeckStyle) -> Self {
        Self {
            out_path: out_path.into(),
            style,
            slides: Vec::new(),
            finished: false,
        }
    }

    /// Destination file.
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    /// Slides accepted so far.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Serialize the package into any seekable writer.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> ReelResult<W> {
        let mut archive = zip::ZipWriter::new(writer);
        let xml_opts =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        // Pictures are already compressed.
        let media_opts =
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        let count = self.slides.len();
        let kinds: Vec<MediaKind> = self.slides.iter().map(|s| s.kind.clone()).collect();

        let package = [
            ("[Content_Types].xml", parts::content_types(count, &kinds)),
            ("_rels/.rels", parts::package_rels()),
            ("docProps/core.xml", parts::core_props("Photo slideshow")),
            ("docProps/app.xml", parts::app_props(count)),
            ("ppt/presentation.xml", parts::presentation(&self.style, count)),
            ("ppt/_rels/presentation.xml.rels", parts::presentation_rels(count)),
            ("ppt/slideMasters/slideMaster1.xml", parts::slide_master()),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels",
                parts::slide_master_rels(),
            ),
            ("ppt/slideLayouts/slideLayout1.xml", parts::blank_layout()),
            (
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
                parts::blank_layout_rels(),
            ),
            ("ppt/theme/theme1.xml", parts::theme()),
        ];
        for (name, xml) in &package {
            put(&mut archive, name, xml_opts, xml.as_bytes())?;
        }

        for (i, slide) in self.slides.iter().enumerate() {
            let n = i + 1;
            let media_name = format!("image{n}.{}", slide.kind.ext);
            let xml = parts::slide(&self.style, &slide.picture, &slide.name, &slide.caption);
            let rels = parts::slide_rels(&media_name);
            put(&mut archive, &format!("ppt/slides/slide{n}.xml"), xml_opts, xml.as_bytes())?;
            let rels_name = format!("ppt/slides/_rels/slide{n}.xml.rels");
            put(&mut archive, &rels_name, xml_opts, rels.as_bytes())?;
            let media_path = format!("ppt/media/{media_name}");
            put(&mut archive, &media_path, media_opts, &slide.bytes)?;
        }

        archive
            .finish()
            .map_err(|e| ReelError::output_write(format!("finish zip: {e}")))
    }
}

fn put<W: Write + Seek>(
    archive: &mut zip::ZipWriter<W>,
    name: &str,
    opts: SimpleFileOptions,
    data: &[u8],
) -> ReelResult<()> {
    archive
        .start_file(name, opts)
        .map_err(|e| ReelError::output_write(format!("zip entry '{name}': {e}")))?;
    archive
        .write_all(data)
        .map_err(|e| ReelError::output_write(format!("zip entry '{name}': {e}")))
}

impl SlideSink for PptxWriter {
    fn add_slide(&mut self, slide: Slide) -> ReelResult<()> {
        if self.finished {
            return Err(ReelError::output_write("deck is already finished"));
        }
        let path = slide.image_path.as_path();
        let bytes = std::fs::read(path).map_err(|e| ReelError::media_decode(path, e))?;
        let format = image::guess_format(&bytes).map_err(|e| ReelError::media_decode(path, e))?;
        let kind = MediaKind::for_format(format).ok_or_else(|| {
            ReelError::media_decode(
                path,
                format!("{format:?} pictures cannot be embedded in a deck"),
            )
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.slides.push(PendingSlide {
            name,
            bytes,
            kind,
            picture: slide.picture,
            caption: slide.caption,
        });
        Ok(())
    }

    #[tracing::instrument(
        skip(self),
        fields(out = %self.out_path.display(), slides = self.slides.len())
    )]
    fn finish(&mut self) -> ReelResult<()> {
        if self.finished {
            return Err(ReelError::output_write("deck is already finished"));
        }
        self.finished = true;

        ensure_parent_dir(&self.out_path)?;
        let file = std::fs::File::create(&self.out_path).map_err(|e| {
            ReelError::output_write(format!("create '{}': {e}", self.out_path.display()))
        })?;
        let file = self.write_to(std::io::BufWriter::new(file))?;
        file.into_inner().map_err(|e| {
            ReelError::output_write(format!("flush '{}': {e}", self.out_path.display()))
        })?;
        tracing::debug!("deck written");
        Ok(())
    }
}
