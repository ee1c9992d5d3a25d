use std::io::{BufRead as _, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "photoreel", version, about)]
struct Cli {
    /// JSON configuration file. Missing keys keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Shuffle seed for a reproducible order.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a PowerPoint deck, one captioned slide per picture.
    Deck(RunArgs),
    /// Render an MP4 slideshow (requires `ffmpeg` on PATH).
    Video(RunArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Folder with the pictures. Asked for on stdin when omitted.
    #[arg(long = "in")]
    in_dir: Option<PathBuf>,

    /// Output file. Defaults to the configured output name.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = match &cli.config {
        Some(path) => photoreel::ReelConfig::load(path)?,
        None => photoreel::ReelConfig::default(),
    };
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }

    match cli.cmd {
        Command::Deck(args) => cmd_deck(cfg, args),
        Command::Video(args) => cmd_video(cfg, args),
    }
}

fn cmd_deck(mut cfg: photoreel::ReelConfig, args: RunArgs) -> anyhow::Result<()> {
    let input = input_dir(args.in_dir)?;
    if let Some(out) = args.out {
        cfg.deck.output = out;
    }

    let style = photoreel::DeckStyle::from_config(&cfg.deck);
    let mut writer = photoreel::PptxWriter::new(&cfg.deck.output, style);
    let report = photoreel::build_deck(&cfg, &input, &mut writer)?;

    print_summary(&report, &cfg.deck.output);
    Ok(())
}

fn cmd_video(mut cfg: photoreel::ReelConfig, args: RunArgs) -> anyhow::Result<()> {
    let input = input_dir(args.in_dir)?;
    if let Some(out) = args.out {
        cfg.video.output = out;
    }

    let mut sink = photoreel::FfmpegSink::new(photoreel::FfmpegSinkOpts::new(&cfg.video.output));
    let report = photoreel::build_video(&cfg, &input, &mut sink)?;

    print_summary(&report, &cfg.video.output);
    Ok(())
}

fn input_dir(arg: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = arg {
        return Ok(dir);
    }
    eprint!("Enter the path to the folder containing images: ");
    std::io::stderr().flush().context("flush prompt")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read folder path from stdin")?;
    let line = line.trim();
    anyhow::ensure!(!line.is_empty(), "no input folder given");
    Ok(PathBuf::from(line))
}

fn print_summary(report: &photoreel::RunReport, out: &Path) {
    for item in &report.skipped {
        eprintln!("skipped {}: {}", item.path.display(), item.reason);
    }
    eprintln!(
        "wrote {} ({} image(s), {} skipped)",
        out.display(),
        report.written,
        report.skipped.len()
    );
}
