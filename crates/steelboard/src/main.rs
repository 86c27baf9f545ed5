//! steelboard - Dashboard sparkline and trend rendering

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use steelboard_core::{
    load_snapshot, map_series, render_geometry_svg, DashboardPreferences, DashboardView,
    DegradedState, LoadError, LoadReport, RenderSpec, Viewport,
};
use steelboard_types::AnalyticsSnapshot;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "steelboard",
    version,
    about = "Dashboard sparkline and trend rendering",
    long_about = "Maps numeric series into sparkline geometry and renders dashboard cards.\n\
                  \n\
                  Reads the analytics snapshot exported by the dashboard backend (trends,\n\
                  forecast, anomalies) and produces standalone SVGs or terminal summaries.\n\
                  \n\
                  Examples:\n\
                    steelboard sparkline 1 5 3                 # SVG on stdout\n\
                    echo '1,5,3' | steelboard sparkline        # Values from stdin\n\
                    steelboard sparkline 1 5 3 --format json   # Points and paths\n\
                    steelboard render snapshot.json --out svg  # One SVG per metric\n\
                    steelboard summary snapshot.json           # Trend and anomaly tables\n\
                    steelboard config --init                   # Write default preferences\n\
                  \n\
                  Environment Variables:\n\
                    STEELBOARD_CONFIG                # Preferences file path\n\
                    STEELBOARD_FORMAT                # Sparkline output format: svg|json\n\
                    STEELBOARD_NO_COLOR              # Disable ANSI colors (log-friendly)\n\
                    STEELBOARD_LOG                   # Log filter (falls back to RUST_LOG)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Preferences file (default: <config_dir>/steelboard/preferences.json)
    #[arg(long, global = true, env = "STEELBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, global = true, env = "STEELBOARD_NO_COLOR")]
    no_color: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Map values to a sparkline and print it
    Sparkline {
        /// Values (comma or whitespace separated); read from stdin when omitted
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
        /// Viewport width
        #[arg(long, value_parser = cli::parse_dimension)]
        width: Option<f64>,
        /// Viewport height
        #[arg(long, value_parser = cli::parse_dimension)]
        height: Option<f64>,
        /// Fill the area under the curve
        #[arg(long)]
        fill: bool,
        /// Line color
        #[arg(long)]
        stroke: Option<String>,
        /// Area color
        #[arg(long)]
        fill_color: Option<String>,
        /// Output format
        #[arg(long, env = "STEELBOARD_FORMAT", value_enum, default_value = "svg")]
        format: OutputFormat,
    },
    /// Render every trend (and the forecast) of a snapshot to SVG files
    Render {
        /// Snapshot JSON file
        snapshot: PathBuf,
        /// Output directory
        #[arg(long, short = 'o', default_value = "steelboard-svg")]
        out: PathBuf,
        /// Fill the area under each curve
        #[arg(long)]
        fill: bool,
    },
    /// Print trend cards and anomalies for a snapshot
    Summary {
        /// Snapshot JSON file
        snapshot: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show effective preferences
    Config {
        /// Write default preferences if the file does not exist
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.no_color);

    let prefs_path = cli.config.clone().or_else(DashboardPreferences::default_path);
    let prefs = prefs_path
        .as_deref()
        .map(DashboardPreferences::load)
        .unwrap_or_default();

    match cli.command {
        Command::Sparkline {
            values,
            width,
            height,
            fill,
            stroke,
            fill_color,
            format,
        } => {
            let mut spec = prefs.sparkline.clone();
            spec.viewport = Viewport::new(
                width.unwrap_or(spec.viewport.width),
                height.unwrap_or(spec.viewport.height),
            );
            spec.filled = spec.filled || fill;
            if let Some(stroke) = stroke {
                spec.stroke = stroke;
            }
            if let Some(fill_color) = fill_color {
                spec.fill = fill_color;
            }
            run_sparkline(values, &spec, format)?;
        }
        Command::Render {
            snapshot,
            out,
            fill,
        } => {
            let spec = prefs.sparkline.clone().with_filled(prefs.sparkline.filled || fill);
            run_render(snapshot, out, &prefs, &spec)?;
        }
        Command::Summary { snapshot, json } => {
            run_summary(snapshot, &prefs, json, cli.no_color)?;
        }
        Command::Config { init } => {
            run_config(prefs_path, &prefs, init)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so SVG/JSON on stdout stays clean
fn init_tracing(no_color: bool) {
    let filter = EnvFilter::try_from_env("STEELBOARD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .init();
}

fn run_sparkline(values: Vec<String>, spec: &RenderSpec, format: OutputFormat) -> Result<()> {
    let series = if values.is_empty() {
        cli::read_values(std::io::stdin().lock())?
    } else {
        cli::parse_values(&values)
    };

    let geometry = map_series(&series, spec.viewport);
    match format {
        OutputFormat::Svg => print!("{}", render_geometry_svg(&geometry, spec)),
        OutputFormat::Json => println!("{}", cli::format_sparkline_json(&geometry)?),
    }

    Ok(())
}

fn run_render(
    snapshot: PathBuf,
    out: PathBuf,
    prefs: &DashboardPreferences,
    spec: &RenderSpec,
) -> Result<()> {
    let (snapshot, mut report) = load(&snapshot)?;
    let view = DashboardView::build(&snapshot, prefs);

    let written = cli::write_dashboard_svgs(&view, spec, &out, &mut report)?;
    for path in &written {
        println!("{}", path.display());
    }

    print_warnings(&report);

    let (_, failed) = report.error_count();
    if failed > 0 {
        anyhow::bail!("{} SVG file(s) could not be written", failed);
    }
    Ok(())
}

fn run_summary(
    snapshot: PathBuf,
    prefs: &DashboardPreferences,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let (snapshot, report) = load(&snapshot)?;
    let view = DashboardView::build(&snapshot, prefs);

    println!("{}", cli::format_summary(&view, json, no_color)?);
    if !json {
        print_warnings(&report);
    }
    Ok(())
}

fn run_config(path: Option<PathBuf>, prefs: &DashboardPreferences, init: bool) -> Result<()> {
    let path = path.context("Could not determine config directory; pass --config")?;

    if init {
        if path.exists() {
            println!("Preferences already exist: {}", path.display());
        } else {
            DashboardPreferences::default().save(&path)?;
            println!("Wrote default preferences to {}", path.display());
            return Ok(());
        }
    }

    println!("Preferences: {}", path.display());
    println!(
        "{}",
        serde_json::to_string_pretty(prefs).context("Failed to serialize preferences")?
    );
    Ok(())
}

/// Load a snapshot, turning failures into messages with a hint
fn load(path: &Path) -> Result<(AnalyticsSnapshot, LoadReport)> {
    load_snapshot(path).map_err(|e| {
        let friendly = LoadError::from_core_error("snapshot", &e);
        match friendly.suggestion {
            Some(hint) => anyhow::anyhow!("{}\n  hint: {}", friendly.message, hint),
            None => anyhow::anyhow!("{}", friendly.message),
        }
    })
}

fn print_warnings(report: &LoadReport) {
    let lines = cli::format_report(report);
    if lines.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("Warnings:");
    for line in lines {
        eprintln!("{}", line);
    }
    if let DegradedState::PartialData { reason, .. } = report.degraded_state() {
        eprintln!("Snapshot loaded with {}", reason);
    }
}
