/*
    CSV export of a phase profile

    Writes the `(element index, phase)` rows of a [PhaseProfile] so the data can be
    opened in a spreadsheet, pandas or MATLAB, and reads such a file back.

    Output for N=4, θᵢ=0°, θᵣ=30°:

    Element Index,Phase (rad)
    0,0
    1,-3.1415926535897927
    2,-6.283185307179585
    3,-9.424777960769378

    Values default to the shortest representation that parses back to the same
    `f64`, so a written file re-reads exactly. A fixed number of decimals can be
    requested with [CsvConfig::precision].
*/

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    display::to_rows,
    error::{PhaseError, PhaseResult},
    helper::with_default_extension,
    phase::PhaseProfile,
};

pub const INDEX_HEADER: &str = "Element Index";
pub const PHASE_HEADER: &str = "Phase (rad)";

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Fixed decimal places, or `None` for the shortest exact form (default)
    pub precision: Option<usize>,

    /// Prefix the table with `#` comment lines describing the geometry (default: false)
    pub include_metadata: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: None,
            include_metadata: false,
        }
    }
}

impl CsvConfig {
    /// Semicolon-delimited with decimal comma, as expected by European spreadsheets.
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    pub fn precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_metadata(mut self) -> Self {
        self.include_metadata = true;
        self
    }

    fn header(&self) -> String {
        format!("{}{}{}", INDEX_HEADER, self.delimiter, PHASE_HEADER)
    }

    fn format_number(&self, value: f64) -> String {
        let formatted = match self.precision {
            Some(prec) => format!("{:.prec$}", value, prec = prec),
            None => format!("{}", value),
        };
        if self.decimal_separator != '.' {
            formatted.replace('.', &self.decimal_separator.to_string())
        } else {
            formatted
        }
    }

    fn parse_number(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        if self.decimal_separator != '.' {
            text.replace(self.decimal_separator, ".").parse().ok()
        } else {
            text.parse().ok()
        }
    }
}

// =============================================================================
// Export
// =============================================================================

/// Writes `profile` as a two-column table and returns the path written.
///
/// `.csv` is appended when `output_path` has no extension. A failure to create
/// or write the file is reported as [PhaseError::ExportIo].
pub fn export_csv(
    profile: &PhaseProfile,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> PhaseResult<PathBuf> {
    let binding = CsvConfig::default();
    let config = configuration.unwrap_or(&binding);
    let path = with_default_extension(output_path, "csv");

    write_table(profile, &path, config).map_err(|e| PhaseError::export_io(&path, e))?;

    debug!(path = %path.display(), rows = profile.len(), "wrote csv");
    Ok(path)
}

fn write_table(profile: &PhaseProfile, path: &Path, config: &CsvConfig) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    if config.include_metadata {
        let geometry = profile.geometry();
        writeln!(file, "# IRS Phase Shift Distribution")?;
        writeln!(file, "# Elements: {}", geometry.element_count)?;
        writeln!(file, "# Incident Angle: {} deg", geometry.incident_angle_deg)?;
        writeln!(file, "# Reflection Angle: {} deg", geometry.reflection_angle_deg)?;
        writeln!(file, "#")?;
    }

    writeln!(file, "{}", config.header())?;
    for (index, φ) in to_rows(profile) {
        writeln!(file, "{}{}{}", index, config.delimiter, config.format_number(φ))?;
    }

    file.flush()
}

// =============================================================================
// Import
// =============================================================================

/// Reads back a table written by [export_csv] with the same configuration.
///
/// Comment lines starting with `#` are skipped; the first remaining line must
/// be the header.
pub fn read_csv(
    input_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> PhaseResult<Vec<(usize, f64)>> {
    let binding = CsvConfig::default();
    let config = configuration.unwrap_or(&binding);
    let path = input_path.as_ref();

    let text = fs::read_to_string(path).map_err(|e| PhaseError::export_io(path, e))?;

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.starts_with('#') && !line.trim().is_empty());

    match lines.next() {
        Some((_, header)) if header.trim() == config.header() => {}
        Some((line, header)) => {
            return Err(PhaseError::MalformedCsv {
                line,
                reason: format!("unexpected header {:?}", header),
            })
        }
        None => {
            return Err(PhaseError::MalformedCsv {
                line: 1,
                reason: "missing header".to_owned(),
            })
        }
    }

    lines
        .map(|(line, text)| parse_row(config, line, text))
        .collect()
}

fn parse_row(config: &CsvConfig, line: usize, text: &str) -> PhaseResult<(usize, f64)> {
    let malformed = |reason: String| PhaseError::MalformedCsv { line, reason };

    let mut fields = text.split(config.delimiter);
    let (index, φ) = match (fields.next(), fields.next(), fields.next()) {
        (Some(index), Some(φ), None) => (index, φ),
        _ => return Err(malformed(format!("expected 2 columns in {:?}", text))),
    };

    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|_| malformed(format!("bad element index {:?}", index)))?;
    let φ = config
        .parse_number(φ)
        .ok_or_else(|| malformed(format!("bad phase value {:?}", φ)))?;

    Ok((index, φ))
}

#[cfg(test)]
mod test {
    use std::fs;

    use approx::assert_abs_diff_eq;
    use tempfile::tempdir;

    use super::{export_csv, read_csv, CsvConfig};
    use crate::{
        display::to_rows, error::PhaseError, geometry::GeometryInput,
        phase::compute_phase_profile,
    };

    #[test]
    fn writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let profile = compute_phase_profile(&GeometryInput::new(3, 0., 30.));

        let path = export_csv(&profile, dir.path().join("phases"), None).unwrap();
        assert_eq!(path, dir.path().join("phases.csv"));

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Element Index,Phase (rad)");
        assert_eq!(lines[1], "0,0");
        assert!(lines[2].starts_with("1,-3.14159265"));
        assert!(lines[3].starts_with("2,-6.2831853"));
    }

    #[test]
    fn shortest_form_reads_back_exactly() {
        let dir = tempdir().unwrap();
        let profile = compute_phase_profile(&GeometryInput::new(257, -33.3, 71.25));

        let path = export_csv(&profile, dir.path().join("exact.csv"), None).unwrap();
        assert_eq!(read_csv(&path, None).unwrap(), to_rows(&profile));
    }

    #[test]
    fn european_with_metadata_and_fixed_precision() {
        let dir = tempdir().unwrap();
        let profile = compute_phase_profile(&GeometryInput::new(4, 0., 30.));
        let config = CsvConfig::european().precision(Some(10)).with_metadata();

        let path = export_csv(&profile, dir.path().join("eu.csv"), Some(&config)).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# IRS Phase Shift Distribution\n# Elements: 4\n"));
        assert!(text.contains("Element Index;Phase (rad)\n"));
        assert!(text.contains("\n1;-3,1415926536\n"));

        let rows = read_csv(&path, Some(&config)).unwrap();
        assert_eq!(rows.len(), 4);
        for ((i, φ), (j, expected)) in rows.iter().zip(to_rows(&profile)) {
            assert_eq!(*i, j);
            assert_abs_diff_eq!(*φ, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempdir().unwrap();
        let profile = compute_phase_profile(&GeometryInput::new(2, 0., 10.));

        let target = dir.path().join("no/such/dir/out.csv");
        match export_csv(&profile, &target, None) {
            Err(PhaseError::ExportIo { path, .. }) => assert_eq!(path, target),
            other => panic!("expected ExportIo, got {:?}", other),
        }
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");

        fs::write(&path, "Element Index,Phase (rad)\n0,0\n1,abc\n").unwrap();
        assert!(matches!(
            read_csv(&path, None),
            Err(PhaseError::MalformedCsv { line: 3, .. })
        ));

        fs::write(&path, "index,phase\n0,0\n").unwrap();
        assert!(matches!(
            read_csv(&path, None),
            Err(PhaseError::MalformedCsv { line: 1, .. })
        ));
    }
}
