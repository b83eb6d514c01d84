// Text and row adapters over a computed [PhaseProfile].
//
// Lines look like `0003: Phase = -9.424778 rad`: the element index
// zero-padded to 4 digits, the phase with 6 decimals. Both widths are
// configurable through [DisplayFormat]; the row form feeds plots and CSV.

use crate::phase::PhaseProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFormat {
    /// Minimum number of digits of the element index, zero-padded.
    pub index_width: usize,
    /// Decimal places of the phase value.
    pub precision: usize,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            index_width: 4,
            precision: 6,
        }
    }
}

impl DisplayFormat {
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn line(&self, index: usize, φ: f64) -> String {
        format!(
            "{:0width$}: Phase = {:.prec$} rad",
            index,
            φ,
            width = self.index_width,
            prec = self.precision
        )
    }

    pub fn format(&self, profile: &PhaseProfile) -> Vec<String> {
        profile
            .iter()
            .enumerate()
            .map(|(i, φ)| self.line(i, φ))
            .collect()
    }
}

/// One line per element using [DisplayFormat::default].
pub fn format_for_display(profile: &PhaseProfile) -> Vec<String> {
    DisplayFormat::default().format(profile)
}

/// `(element index, phase)` pairs in index order.
pub fn to_rows(profile: &PhaseProfile) -> Vec<(usize, f64)> {
    profile.iter().enumerate().collect()
}
