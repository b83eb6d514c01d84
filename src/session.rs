use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    display::{to_rows, DisplayFormat},
    error::{PhaseError, PhaseResult},
    export::{self, CsvConfig},
    geometry::ValidationPolicy,
    phase::{compute_phase_profile, PhaseProfile},
    plot::{self, PlotConfig},
};

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub policy: ValidationPolicy,
    pub display: DisplayFormat,
    pub csv: CsvConfig,
    pub plot: PlotConfig,
}

/// One interactive session: the configuration plus at most one current result.
///
/// A successful [Session::compute] replaces the result, a failed one leaves it
/// in place, and [Session::reset] clears it. Display and export read the
/// result through shared references only.
#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    current: Option<PhaseProfile>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Session {
        Session {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn compute(
        &mut self,
        raw_element_count: &str,
        raw_incident_angle: &str,
        raw_reflection_angle: &str,
    ) -> PhaseResult<&PhaseProfile> {
        let geometry = self
            .config
            .policy
            .validate(raw_element_count, raw_incident_angle, raw_reflection_angle)
            .map_err(|e| {
                warn!(error = %e, "rejected input");
                e
            })?;

        let profile = compute_phase_profile(&geometry);
        info!(
            elements = geometry.element_count,
            incident_deg = geometry.incident_angle_deg,
            reflection_deg = geometry.reflection_angle_deg,
            "computed phase profile"
        );

        Ok(self.current.insert(profile))
    }

    pub fn current(&self) -> PhaseResult<&PhaseProfile> {
        self.current.as_ref().ok_or(PhaseError::NoResult)
    }

    pub fn has_result(&self) -> bool {
        self.current.is_some()
    }

    pub fn display_lines(&self) -> PhaseResult<Vec<String>> {
        Ok(self.config.display.format(self.current()?))
    }

    pub fn rows(&self) -> PhaseResult<Vec<(usize, f64)>> {
        Ok(to_rows(self.current()?))
    }

    pub fn export_csv(&self, path: impl AsRef<Path>) -> PhaseResult<PathBuf> {
        let profile = self.current()?;
        let written = export::export_csv(profile, path, Some(&self.config.csv)).map_err(|e| {
            warn!(error = %e, "csv export failed");
            e
        })?;
        info!(path = %written.display(), "saved csv");
        Ok(written)
    }

    pub fn export_plot(&self, path: impl AsRef<Path>) -> PhaseResult<PathBuf> {
        let profile = self.current()?;
        let written = plot::export_plot(profile, path, Some(&self.config.plot)).map_err(|e| {
            warn!(error = %e, "plot export failed");
            e
        })?;
        info!(path = %written.display(), "saved plot");
        Ok(written)
    }

    /// Replaces the current ramp with its (-π, π] reduction.
    pub fn wrap_current(&mut self) -> PhaseResult<&PhaseProfile> {
        let wrapped = self.current()?.wrapped();
        debug!("wrapped current phase profile");
        Ok(self.current.insert(wrapped))
    }

    pub fn reset(&mut self) {
        if self.current.take().is_some() {
            debug!("cleared current phase profile");
        }
    }
}
