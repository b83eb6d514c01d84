// Do this because numerics calls for a lot of non-standard names
#![allow(non_snake_case)]
pub mod display;
pub mod error;
pub mod export;
pub mod geometry;
pub mod helper;
pub mod logging;
pub mod phase;
pub mod plot;
#[cfg(feature = "gui")]
pub mod series_chart;
pub mod session;

pub use error::{PhaseError, PhaseResult};
pub use geometry::{validate, GeometryInput};
pub use phase::{compute_phase_profile, PhaseProfile};
pub use session::{Session, SessionConfig};
