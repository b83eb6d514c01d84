use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use irs_phase_lib::{
    display::DisplayFormat,
    export::CsvConfig,
    geometry::ValidationPolicy,
    logging,
    plot::PlotConfig,
    Session, SessionConfig,
};

/// Per-element phase shifts that steer a reflecting surface from θᵢ to θᵣ.
#[derive(Parser, Debug)]
#[command(name = "irs-phase")]
#[command(about = "IRS Phase Shift Calculator")]
struct Cli {
    /// Number of elements N (integer)
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    elements: Option<String>,

    /// Incident angle θᵢ in degrees
    #[arg(short, long, allow_hyphen_values = true)]
    incident: Option<String>,

    /// Reflection angle θᵣ in degrees
    #[arg(short, long, allow_hyphen_values = true)]
    reflection: Option<String>,

    /// Write the table as CSV (".csv" added when no extension is given)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the plot as an image (".png" added when no extension is given, ".svg" for vector)
    #[arg(long)]
    png: Option<PathBuf>,

    /// Reduce every phase into (-π, π] before display and export
    #[arg(long)]
    wrap: bool,

    /// Upper bound on N
    #[arg(long, default_value_t = 10_000)]
    max_elements: usize,

    /// Decimal places shown per phase
    #[arg(long, default_value_t = 6)]
    precision: usize,

    /// Fixed decimal places in the CSV (default: exact shortest form)
    #[arg(long)]
    csv_precision: Option<usize>,

    /// Prefix the CSV with geometry comments
    #[arg(long)]
    csv_metadata: bool,

    /// Plot width in pixels
    #[arg(long, default_value_t = 2400)]
    width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = 1050)]
    height: u32,

    /// Do not print the phase table
    #[arg(short, long)]
    quiet: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        let mut csv = CsvConfig::default().precision(self.csv_precision);
        csv.include_metadata = self.csv_metadata;

        SessionConfig {
            policy: ValidationPolicy::default().max_elements(self.max_elements),
            display: DisplayFormat::default().precision(self.precision),
            csv,
            plot: PlotConfig::default().size(self.width, self.height),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level_from_verbosity(cli.verbose, cli.quiet));

    let mut session = Session::new(cli.session_config());
    session.compute(
        cli.elements.as_deref().unwrap_or(""),
        cli.incident.as_deref().unwrap_or(""),
        cli.reflection.as_deref().unwrap_or(""),
    )?;

    if cli.wrap {
        session.wrap_current()?;
    }

    if !cli.quiet {
        for line in session.display_lines()? {
            println!("{}", line);
        }
    }

    if let Some(path) = &cli.csv {
        let written = session
            .export_csv(path)
            .with_context(|| "Save CSV failed")?;
        eprintln!("CSV saved to: {}", written.display());
    }

    if let Some(path) = &cli.png {
        let written = session
            .export_plot(path)
            .with_context(|| "Save PNG failed")?;
        eprintln!("Plot saved to: {}", written.display());
    }

    Ok(())
}
