use std::path::Path;

use crate::assets::decode::probe_dimensions;
use crate::assets::discover::{discover_media, shuffle_media};
use crate::caption::{file_stem_caption, wrap_caption};
use crate::config::ReelConfig;
use crate::deck::{CaptionText, Slide, SlideSink};
use crate::foundation::core::Size;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::compute_placement;
use crate::pipeline::RunReport;

/// Build a deck from every recognized picture in `input_dir`, one slide each, in shuffled order.
///
/// Pictures that cannot be read are skipped with a warning. Fails with
/// [`ReelError::EmptyInputSet`] if no slide could be made; `sink` is only finished when at least
/// one slide was added.
#[tracing::instrument(skip(cfg, sink), fields(input = %input_dir.display()))]
pub fn build_deck(
    cfg: &ReelConfig,
    input_dir: &Path,
    sink: &mut dyn SlideSink,
) -> ReelResult<RunReport> {
    let deck = &cfg.deck;
    deck.validate()?;
    let mut items = discover_media(input_dir, &deck.extensions)?;
    shuffle_media(&mut items, cfg.seed);

    let frame = deck.frame.to_emu_rect();
    let caption_bounds = deck.caption_box.to_emu_rect();
    let total = items.len();
    let mut report = RunReport::default();

    for (i, path) in items.into_iter().enumerate() {
        let caption = file_stem_caption(&path);
        tracing::info!("processing {}/{}: {} caption='{}'", i + 1, total, path.display(), caption);

        let (width, height) = match probe_dimensions(&path) {
            Ok(dims) => dims,
            Err(e) if e.is_per_item() => {
                report.skip(path, &e);
                continue;
            }
            Err(e) => return Err(e),
        };
        let picture = compute_placement(Size::new(f64::from(width), f64::from(height)), frame)?;
        let slide = Slide {
            image_path: path.clone(),
            picture,
            caption: CaptionText {
                bounds: caption_bounds,
                lines: wrap_caption(&caption, deck.caption_wrap_width),
            },
        };

        match sink.add_slide(slide) {
            Ok(()) => report.written += 1,
            Err(e) if e.is_per_item() => report.skip(path, &e),
            Err(e) => return Err(e),
        }
    }

    if report.written == 0 {
        return Err(ReelError::EmptyInputSet(input_dir.to_path_buf()));
    }
    sink.finish()?;
    tracing::info!(written = report.written, skipped = report.skipped.len(), "deck complete");
    Ok(report)
}
