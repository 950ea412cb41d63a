//! # Moving Load CLI
//!
//! Terminal front end for the moving load engine: reads the span and load
//! pair from flags (prompting for anything missing), prints the envelope
//! report and optionally shows the influence lines as terminal charts.
//!
//! ```text
//! calc_cli --span 10 --w1 30 --w2 20 --spacing 3 --section 0.25L --no-plot
//! RUST_LOG=calc_core=debug calc_cli --open girder.mls --json
//! ```

mod plot;
mod prompt;
mod report;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use calc_core::calculations::{build_influence_ordinates, BeamSpec, LoadPair, SectionLocation};
use calc_core::{load_settings, load_study, save_study, AnalysisSettings, CalcError, Study};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::prompt::{confirm, prompt_f64};
use crate::report::Report;

/// Envelope reactions, shear and moment of a simply supported beam under two moving point loads
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Span L between supports (m)
    #[arg(long, value_name = "M")]
    span: Option<f64>,

    /// Leading load W1 (kN)
    #[arg(long, value_name = "KN")]
    w1: Option<f64>,

    /// Trailing load W2 (kN)
    #[arg(long, value_name = "KN")]
    w2: Option<f64>,

    /// Distance x that W2 trails behind W1 (m)
    #[arg(long, value_name = "M")]
    spacing: Option<f64>,

    /// Reference section: `mid`, a span fraction such as `0.25L`, or a distance in metres
    #[arg(long, value_parser = parse_section)]
    section: Option<SectionLocation>,

    /// Leading-load positions in the sweep
    #[arg(long, value_name = "N")]
    samples: Option<usize>,

    /// JSON file with analysis settings; flags above override it
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Re-run a saved study instead of entering a new beam
    #[arg(long, value_name = "FILE", conflicts_with_all = ["span", "w1", "w2", "spacing"])]
    open: Option<PathBuf>,

    /// Save the study (input, settings and result) to this file
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Engineer recorded in a saved study
    #[arg(long, default_value = "")]
    engineer: String,

    /// Job number recorded in a saved study
    #[arg(long, default_value = "")]
    job: String,

    /// Also print the result as JSON
    #[arg(long)]
    json: bool,

    /// Show influence line charts without asking
    #[arg(long, overrides_with = "no_plot")]
    plot: bool,

    /// Never show influence line charts
    #[arg(long = "no-plot", overrides_with = "plot")]
    no_plot: bool,
}

impl Cli {
    /// `Some` when the plot decision was made on the command line
    fn plot_choice(&self) -> Option<bool> {
        match (self.plot, self.no_plot) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Parse `mid`/`midspan`, `<ratio>L` or a plain distance in metres.
fn parse_section(raw: &str) -> Result<SectionLocation, String> {
    let text = raw.trim();
    if text.eq_ignore_ascii_case("mid") || text.eq_ignore_ascii_case("midspan") {
        return Ok(SectionLocation::Midspan);
    }
    let number = |s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{}' is not a section (use mid, 0.25L or metres)", raw))
    };
    match text.strip_suffix(['L', 'l']) {
        Some(ratio) => number(ratio).map(SectionLocation::Ratio),
        None => number(text).map(SectionLocation::AtDistance),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn resolve_settings(cli: &Cli, base: AnalysisSettings) -> anyhow::Result<AnalysisSettings> {
    let mut settings = match &cli.settings {
        Some(path) => load_settings(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => base,
    };
    if let Some(section) = cli.section {
        settings.section = section;
    }
    if let Some(samples) = cli.samples {
        settings.sample_count = samples;
    }
    settings.validate()?;
    Ok(settings)
}

/// Flag value, or the answer to `prompt`; closed input means the value is missing.
fn value_or_prompt<R: BufRead, W: Write>(
    flag: Option<f64>,
    field: &str,
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> anyhow::Result<f64> {
    let Some(value) = flag else {
        return match prompt_f64(input, output, prompt) {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(CalcError::missing_field(field).into()),
            other => Ok(other?),
        };
    };
    Ok(value)
}

fn build_study<R: BufRead, W: Write>(cli: &Cli, input: &mut R, output: &mut W) -> anyhow::Result<Study> {
    if let Some(path) = &cli.open {
        let mut study = load_study(path).with_context(|| format!("opening study {}", path.display()))?;
        let settings = resolve_settings(cli, study.settings)?;
        study.set_settings(settings);
        tracing::info!(path = %path.display(), id = %study.meta.id, "re-running saved study");
        return Ok(study);
    }

    let span_m = value_or_prompt(cli.span, "span_m", input, output, "Enter beam length L (m): ")?;
    let w1_kn = value_or_prompt(cli.w1, "w1_kn", input, output, "Enter first load W1 (kN): ")?;
    let w2_kn = value_or_prompt(cli.w2, "w2_kn", input, output, "Enter second load W2 (kN): ")?;
    let spacing_m = value_or_prompt(cli.spacing, "spacing_m", input, output, "Enter distance between loads x (m): ")?;

    let beam = BeamSpec::new(span_m)?;
    let loads = LoadPair::new(w1_kn, w2_kn, spacing_m)?;

    let mut study = Study::new(cli.engineer.as_str(), cli.job.as_str(), beam, loads);
    study.set_settings(resolve_settings(cli, AnalysisSettings::default())?);
    Ok(study)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if cli.open.is_none() {
        println!("Moving Load Analysis for Simply Supported Beam");
        println!("==============================================");
    }

    let mut study = build_study(&cli, &mut input, &mut output)?;

    let result = match study.run() {
        Ok(result) => result.clone(),
        Err(e) => {
            if cli.json {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            bail!("analysis failed: {}", e);
        }
    };

    println!();
    println!("{}", Report::new(&study.input, &result));

    if cli.json {
        println!();
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    if let Some(path) = &cli.save {
        save_study(&study, path).with_context(|| format!("saving study to {}", path.display()))?;
        println!("Saved study to {}", path.display());
    }

    let show_plots = match cli.plot_choice() {
        Some(choice) => choice,
        None => {
            writeln!(output)?;
            confirm(&mut input, &mut output, "Would you like to see influence line plots?")?
        }
    };
    if show_plots {
        let lines = build_influence_ordinates(study.input.beam.span_m, result.section_m);
        plot::show_influence_lines(&lines, study.settings.plot_points).context("drawing influence lines")?;
    }

    Ok(())
}
