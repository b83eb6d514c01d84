use plotters::{
    drawing::DrawingAreaErrorKind,
    prelude::{Circle, LabelAreaPosition, LineSeries},
    style::{AsRelative, Color, IntoFont, RGBColor},
};
use plotters_iced::{Chart, ChartBuilder, DrawingBackend};
use tracing::warn;

use crate::{
    display::to_rows,
    phase::PhaseProfile,
    plot::{SeriesBounds, PLOT_TITLE, X_LABEL, Y_LABEL},
};

const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);

// Live chart of the current phase ramp. An empty chart draws bare axes.
#[derive(Default)]
pub struct PhaseChart {
    rows: Vec<(usize, f64)>,
}

impl PhaseChart {
    pub fn new(profile: &PhaseProfile) -> PhaseChart {
        PhaseChart {
            rows: to_rows(profile),
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PhaseChart {
    fn draw<DB: DrawingBackend>(
        &self,
        mut builder: ChartBuilder<DB>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let bounds = SeriesBounds::new(&self.rows, 0.1);

        let mut chart = builder
            .caption(PLOT_TITLE, ("sans-serif", 20).into_font())
            .set_label_area_size(LabelAreaPosition::Left, (10i32).percent_width())
            .set_label_area_size(LabelAreaPosition::Bottom, (12i32).percent_height())
            .build_cartesian_2d(bounds.bottom_x..bounds.top_x, bounds.bottom_y..bounds.top_y)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .draw()?;

        let points = self.rows.iter().map(|&(i, φ)| (i as f64, φ));
        chart.draw_series(LineSeries::new(points.clone(), &LINE_COLOR))?;
        chart.draw_series(points.map(|p| Circle::new(p, 3, LINE_COLOR.filled())))?;
        Ok(())
    }
}

impl<Message> Chart<Message> for PhaseChart {
    fn build_chart<DB: DrawingBackend>(&self, builder: ChartBuilder<DB>) {
        // A failed frame is skipped; the next redraw tries again.
        if let Err(e) = self.draw(builder) {
            warn!(error = %e, "phase chart frame not drawn");
        }
    }
}

#[cfg(test)]
mod test {
    use plotters::prelude::{ChartBuilder, IntoDrawingArea, SVGBackend};

    use super::PhaseChart;
    use crate::{geometry::GeometryInput, phase::compute_phase_profile};

    fn render(chart: &PhaseChart) -> String {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (480, 240)).into_drawing_area();
            chart.draw(ChartBuilder::on(&root)).unwrap();
            root.present().unwrap();
        }
        svg
    }

    #[test]
    fn draws_ramp_and_bare_axes() {
        let profile = compute_phase_profile(&GeometryInput::new(4, 0., 30.));
        let mut chart = PhaseChart::new(&profile);
        assert!(!chart.is_empty());
        let full = render(&chart);
        assert!(full.contains("<circle"));

        chart.clear();
        assert!(chart.is_empty());
        let bare = render(&chart);
        assert!(bare.contains("<svg"));
        assert!(!bare.contains("<circle"));
    }
}
