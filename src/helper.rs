use std::path::{Path, PathBuf};

use num::{traits::FloatConst, Float};

// Maps a phase onto (-π, π]. `%` keeps the sign of the dividend, so one correction step is enough.
pub fn wrap_phase<F: Float + FloatConst>(φ: F) -> F {
    let two_pi = F::PI() + F::PI();
    let r = φ % two_pi;
    if r > F::PI() {
        r - two_pi
    } else if r <= -F::PI() {
        r + two_pi
    } else {
        r
    }
}

// Appends `extension` when the path has none, e.g. "phases" -> "phases.csv". A trailing dot counts as none.
pub fn with_default_extension(path: impl AsRef<Path>, extension: &str) -> PathBuf {
    let path = path.as_ref();
    if path.extension().map_or(false, |ext| !ext.is_empty()) {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}
