// Image export of a phase profile, and the axis bounds shared with the
// interactive chart.

use std::{
    io,
    path::{Path, PathBuf},
};

use plotters::{
    coord::Shift,
    drawing::DrawingAreaErrorKind,
    prelude::*,
};
use tracing::debug;

use crate::{
    display::to_rows,
    error::{PhaseError, PhaseResult},
    helper::with_default_extension,
    phase::PhaseProfile,
};

pub const PLOT_TITLE: &str = "IRS Phase Shift Distribution";
pub const X_LABEL: &str = "Element Index";
pub const Y_LABEL: &str = "Phase (rad)";

#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 2400, i.e. 8 in at 300 dpi)
    pub width: u32,
    /// Image height in pixels (default: 1050, i.e. 3.5 in at 300 dpi)
    pub height: u32,
    pub title: String,
    pub line_color: RGBColor,
    pub line_width: u32,
    /// Marker radius in pixels, 0 disables markers
    pub marker_size: u32,
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 2400,
            height: 1050,
            title: PLOT_TITLE.to_string(),
            line_color: RGBColor(31, 119, 180),
            line_width: 3,
            marker_size: 6,
            show_grid: true,
        }
    }
}

impl PlotConfig {
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

// Axis ranges for a series, padded by `border` (a fraction of the data span) on each axis.
// The span is clamped to a minimum so one element or a flat ramp still gives a usable range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesBounds {
    pub bottom_x: f64,
    pub top_x: f64,
    pub bottom_y: f64,
    pub top_y: f64,
}

impl SeriesBounds {
    pub fn new(rows: &[(usize, f64)], border: f64) -> SeriesBounds {
        let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
        let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
        for &(x, y) in rows {
            let x = x as f64;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        if rows.is_empty() {
            min_x = 0.;
            max_x = 0.;
            min_y = 0.;
            max_y = 0.;
        }

        let dist_x = (max_x - min_x).max(1.);
        let dist_y = (max_y - min_y).max(1e-6);

        SeriesBounds {
            bottom_x: min_x - dist_x * border / 2.,
            top_x: max_x + dist_x * border / 2.,
            bottom_y: min_y - dist_y * border / 2.,
            top_y: max_y + dist_y * border / 2.,
        }
    }
}

/// Renders the phase ramp to `output_path` and returns the path written.
///
/// `.png` is appended when the path has no extension; `.svg` paths use the
/// vector backend, everything else is rasterized.
pub fn export_plot(
    profile: &PhaseProfile,
    output_path: impl AsRef<Path>,
    configuration: Option<&PlotConfig>,
) -> PhaseResult<PathBuf> {
    let binding = PlotConfig::default();
    let config = configuration.unwrap_or(&binding);
    let path = with_default_extension(output_path, "png");

    // The backends only touch the file in `present`, after all the drawing work.
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(PhaseError::export_io(
                &path,
                io::Error::new(io::ErrorKind::NotFound, "destination directory does not exist"),
            ));
        }
    }

    let rows = to_rows(profile);
    let is_svg = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("svg"));
    let drawn = if is_svg {
        let root = SVGBackend::new(&path, (config.width, config.height)).into_drawing_area();
        draw_on_area(&root, &rows, config).map_err(|e| render_error(&path, e))
    } else {
        let root = BitMapBackend::new(&path, (config.width, config.height)).into_drawing_area();
        draw_on_area(&root, &rows, config).map_err(|e| render_error(&path, e))
    };
    drawn?;

    debug!(path = %path.display(), points = rows.len(), "wrote plot");
    Ok(path)
}

fn draw_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    rows: &[(usize, f64)],
    config: &PlotConfig,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let bounds = SeriesBounds::new(rows, 0.1);
    let font_scale = config.height as f64 / 1050.;

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 48. * font_scale).into_font())
        .margin((20. * font_scale) as u32)
        .x_label_area_size((90. * font_scale) as u32)
        .y_label_area_size((130. * font_scale) as u32)
        .build_cartesian_2d(bounds.bottom_x..bounds.top_x, bounds.bottom_y..bounds.top_y)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .label_style(("sans-serif", 28. * font_scale))
        .axis_desc_style(("sans-serif", 34. * font_scale));
    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    let points = rows.iter().map(|&(i, φ)| (i as f64, φ));
    chart.draw_series(LineSeries::new(
        points.clone(),
        config.line_color.stroke_width(config.line_width),
    ))?;
    if config.marker_size > 0 {
        chart.draw_series(
            points.map(|p| Circle::new(p, config.marker_size, config.line_color.filled())),
        )?;
    }

    root.present()?;
    Ok(())
}

// Backend failures are where an unwritable destination shows up; anything else is a drawing bug.
fn render_error<E: std::error::Error + Send + Sync>(
    path: &Path,
    err: DrawingAreaErrorKind<E>,
) -> PhaseError {
    match err {
        DrawingAreaErrorKind::BackendError(e) => {
            PhaseError::export_io(path, io::Error::new(io::ErrorKind::Other, e.to_string()))
        }
        other => PhaseError::Internal(other.to_string()),
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::{export_plot, PlotConfig, SeriesBounds};
    use crate::{error::PhaseError, geometry::GeometryInput, phase::compute_phase_profile};

    #[test]
    fn bounds_pad_the_data() {
        let bounds = SeriesBounds::new(&[(0, 0.), (10, -20.)], 0.1);
        assert_eq!(bounds.bottom_x, -0.5);
        assert_eq!(bounds.top_x, 10.5);
        assert_eq!(bounds.bottom_y, -21.);
        assert_eq!(bounds.top_y, 1.);
    }

    #[test]
    fn bounds_of_degenerate_series_are_non_empty() {
        for rows in [vec![(0, 0.)], vec![(0, 0.), (1, 0.), (2, 0.)], vec![]] {
            let bounds = SeriesBounds::new(&rows, 0.1);
            assert!(bounds.top_x > bounds.bottom_x);
            assert!(bounds.top_y > bounds.bottom_y);
        }
    }

    #[test]
    fn png_is_default_extension() {
        let dir = tempdir().unwrap();
        let profile = compute_phase_profile(&GeometryInput::new(16, 0., 30.));
        let config = PlotConfig::default().size(800, 350);

        let path = export_plot(&profile, dir.path().join("ramp"), Some(&config)).unwrap();
        assert_eq!(path, dir.path().join("ramp.png"));
        assert!(path.exists());
    }

    #[test]
    fn svg_by_extension() {
        let dir = tempdir().unwrap();
        let profile = compute_phase_profile(&GeometryInput::new(1, 0., 30.));

        let path = export_plot(&profile, dir.path().join("single.svg"), None).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempdir().unwrap();
        let profile = compute_phase_profile(&GeometryInput::new(4, 0., 30.));

        let target = dir.path().join("missing").join("plot.png");
        assert!(matches!(
            export_plot(&profile, &target, None),
            Err(PhaseError::ExportIo { .. })
        ));
        assert!(!target.exists());
    }
}
