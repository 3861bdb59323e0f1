//! # CLI Module
//!
//! Command-line interface for the marker overlay engine.
//!
//! ## Usage
//! ```bash
//! # Compare an upload with one target
//! marker-overlay score target.png upload.jpg
//!
//! # Rank an upload against every target in a directory
//! marker-overlay catalog upload.jpg ~/markers --limit 5
//!
//! # Feed a script of found/lost signals to the overlay controller
//! marker-overlay replay signals.txt
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use marker_overlay::core::catalog::{Catalog, CatalogConfig, CatalogMatcher, CatalogReport};
use marker_overlay::core::marker::{LoggingMedia, MarkerSignal, MarkerView, NoHint};
use marker_overlay::core::scorer::{ImageSource, MatchResult, ScorerConfig, SimilarityScorer};
use marker_overlay::error::{MarkerOverlayError, Result};
use marker_overlay::events::{CatalogEvent, Event, EventChannel, MarkerEvent};
use std::path::{Path, PathBuf};
use std::thread;

/// Marker Overlay - score photos against marker images and drive overlays
#[derive(Parser, Debug)]
#[command(name = "marker-overlay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Scorer configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare a candidate image with a target image
    Score {
        /// Reference (marker) image
        target: PathBuf,

        /// Image to check against the target
        candidate: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Rank a candidate image against every target in a directory
    Catalog {
        /// Image to check against the catalog
        candidate: PathBuf,

        /// Directory of target images
        targets: PathBuf,

        /// Show only the best N targets
        #[arg(short, long)]
        limit: Option<usize>,

        /// Maximum directory depth to search
        #[arg(long)]
        max_depth: Option<usize>,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Replay a script of "found"/"lost" lines against the overlay controller
    Replay {
        /// Script file, one signal per line; '#' starts a comment
        script: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    marker_overlay::init_tracing(if cli.verbose { "debug" } else { "warn" });

    let scorer_config = load_scorer_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Score {
            target,
            candidate,
            output,
        } => run_score(scorer_config, &target, &candidate, output),
        Commands::Catalog {
            candidate,
            targets,
            limit,
            max_depth,
            include_hidden,
            output,
        } => {
            let catalog_config = CatalogConfig {
                include_hidden,
                max_depth,
                limit,
                ..CatalogConfig::default()
            };
            run_catalog(scorer_config, catalog_config, &candidate, &targets, output)
        }
        Commands::Replay { script } => run_replay(&script),
    }
}

/// Load the scorer configuration.
///
/// An explicit `--config` file must exist. Otherwise the per-user file under
/// the platform config directory is used when present, and the built-in
/// defaults when not.
fn load_scorer_config(explicit: Option<&Path>) -> Result<ScorerConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(ScorerConfig::default()),
        },
    };

    let text = std::fs::read_to_string(&path).map_err(|e| {
        MarkerOverlayError::Config(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config: ScorerConfig = serde_json::from_str(&text).map_err(|e| {
        MarkerOverlayError::Config(format!("invalid config {}: {}", path.display(), e))
    })?;
    config.validate()?;

    tracing::debug!(path = %path.display(), ?config, "loaded scorer config");
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("marker-overlay").join("scorer.json"))
}

fn run_score(
    config: ScorerConfig,
    target: &Path,
    candidate: &Path,
    output: OutputFormat,
) -> Result<()> {
    let scorer = config.build()?;
    let result = scorer.score(&ImageSource::path(target), &ImageSource::path(candidate))?;

    match output {
        OutputFormat::Pretty => print_pretty_score(&Term::stdout(), target, candidate, &result),
        OutputFormat::Json => print_json(&serde_json::json!({
            "target": target,
            "candidate": candidate,
            "result": result,
        }))?,
    }

    Ok(())
}

fn run_catalog(
    scorer_config: ScorerConfig,
    catalog_config: CatalogConfig,
    candidate: &Path,
    targets_dir: &Path,
    output: OutputFormat,
) -> Result<()> {
    let scorer: SimilarityScorer = scorer_config.build()?;
    let targets = Catalog::discover(targets_dir, &catalog_config)?;
    let matcher = CatalogMatcher::new(scorer, targets).with_limit(catalog_config.limit);

    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(matcher.targets().len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Catalog(CatalogEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                    pb.set_message(p.current_target);
                }
                Event::Catalog(CatalogEvent::Completed { .. }) => pb.finish_and_clear(),
                _ => {}
            }
        }
    });

    let result = matcher.match_candidate_with_events(&ImageSource::path(candidate), &sender);

    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let report = result?;
    match output {
        OutputFormat::Pretty => print_pretty_catalog(&Term::stdout(), &report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}

fn run_replay(script: &Path) -> Result<()> {
    let text = std::fs::read_to_string(script).map_err(|e| {
        MarkerOverlayError::Config(format!("cannot read {}: {}", script.display(), e))
    })?;
    let signals = parse_script(&text)?;

    let term = Term::stdout();
    let (sender, receiver) = EventChannel::new();
    let (mut view, tracker) =
        MarkerView::mount(Box::new(LoggingMedia::new("overlay")), Box::new(NoHint), sender);

    for (line, signal) in signals {
        tracker.send(signal);
        view.pump();
        term.write_line(&format!(
            "  {} {:<6} -> {}",
            style(format!("{:>3}:", line)).dim(),
            format!("{:?}", signal).to_lowercase(),
            view.session()
        ))
        .ok();
    }

    view.unmount();
    drop(view);

    let failures = receiver
        .drain()
        .into_iter()
        .filter(|e| matches!(e, Event::Marker(MarkerEvent::PlaybackFailed { .. })))
        .count();
    if failures > 0 {
        term.write_line(&format!(
            "{} {} playback failures",
            style("!").yellow().bold(),
            failures
        ))
        .ok();
    }

    Ok(())
}

/// Parse a replay script into (line number, signal) pairs
fn parse_script(text: &str) -> Result<Vec<(usize, MarkerSignal)>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line_no = i + 1;
            let content = line.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                return None;
            }
            Some(
                content
                    .parse::<MarkerSignal>()
                    .map(|signal| (line_no, signal))
                    .map_err(|e| MarkerOverlayError::Config(format!("line {}: {}", line_no, e))),
            )
        })
        .collect()
}

fn print_pretty_score(term: &Term, target: &Path, candidate: &Path, result: &MatchResult) {
    term.write_line(&format!(
        "{} {}",
        style("Marker Overlay").bold().cyan(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
    ))
    .ok();
    term.write_line("").ok();
    term.write_line(&format!("  target:    {}", target.display())).ok();
    term.write_line(&format!("  candidate: {}", candidate.display())).ok();
    term.write_line("").ok();

    let verdict = if result.matched {
        style("✓").green().bold()
    } else {
        style("✗").red().bold()
    };
    term.write_line(&format!(
        "{} {} {}",
        verdict,
        style(format!("{:.1}%", result.score)).cyan(),
        style(result.band).yellow()
    ))
    .ok();
    term.write_line(&format!(
        "  {}",
        style(result.band.description()).dim()
    ))
    .ok();
    term.write_line(&format!(
        "  {} of {} pixels matched",
        result.matching_pixels, result.total_pixels
    ))
    .ok();
}

fn print_pretty_catalog(term: &Term, report: &CatalogReport) {
    term.write_line(&format!(
        "{} {} ({} ms)",
        style("Catalog results for").bold(),
        style(&report.candidate).cyan(),
        report.duration_ms
    ))
    .ok();
    term.write_line("").ok();

    if report.entries.is_empty() {
        term.write_line("  No targets could be scored.").ok();
    }

    for (rank, entry) in report.entries.iter().enumerate() {
        let marker = if entry.result.matched {
            style("★").green().to_string()
        } else {
            style("○").dim().to_string()
        };
        term.write_line(&format!(
            "  {} {:>2}. {:<30} {:>6.1}%  {}",
            marker,
            rank + 1,
            entry.target_id,
            entry.result.score,
            style(entry.result.band).yellow()
        ))
        .ok();
    }

    if !report.errors.is_empty() {
        term.write_line("").ok();
        term.write_line(&format!(
            "{}",
            style(format!("{} targets skipped:", report.errors.len())).dim()
        ))
        .ok();
        for failure in &report.errors {
            term.write_line(&format!(
                "    {} {}",
                style(&failure.target_id).dim(),
                style(&failure.message).dim()
            ))
            .ok();
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| MarkerOverlayError::Config(format!("failed to serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}
