use std::f64::consts::PI;

use ndarray::{Array1, ArrayView1};

use crate::{geometry::GeometryInput, helper::wrap_phase};

/// Difference of directional sines, `sin(θᵣ) - sin(θᵢ)`, the quantity that
/// sets the phase gradient across the array.
pub fn steering_delta(geometry: &GeometryInput) -> f64 {
    let θi = geometry.incident_angle_deg.to_radians();
    let θr = geometry.reflection_angle_deg.to_radians();
    θr.sin() - θi.sin()
}

/*
Far-field steering of a uniform linear reflecting array. Element n must add a phase of
-2π·δ·n so that the wavefronts leaving the surface line up along the reflection direction,
where δ = sin(θᵣ) - sin(θᵢ). The ramp is reported as-is, not reduced modulo 2π; call
[PhaseProfile::wrapped] to get values a phase shifter can realize.
*/
pub fn compute_phase_profile(geometry: &GeometryInput) -> PhaseProfile {
    let δ = steering_delta(geometry);
    let step = -2. * PI * δ;

    // `step * n` keeps phase[n] == n * phase[1] exactly. Adding 0 turns -0.0 into 0.0.
    let phases = Array1::from_shape_fn(geometry.element_count, |n| step * n as f64 + 0.);

    PhaseProfile {
        geometry: *geometry,
        phases,
    }
}

/// Per-element phase shifts in radians, index `i` belonging to element `i`.
///
/// The values can only be read; every consumer sees the sequence exactly as
/// it was computed.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseProfile {
    geometry: GeometryInput,
    phases: Array1<f64>,
}

impl PhaseProfile {
    pub fn geometry(&self) -> &GeometryInput {
        &self.geometry
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.phases.get(index).copied()
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.phases.view()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.phases.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.phases.iter().copied()
    }

    /// The same profile with each phase reduced into (-π, π].
    pub fn wrapped(&self) -> PhaseProfile {
        PhaseProfile {
            geometry: self.geometry,
            phases: self.phases.mapv(wrap_phase),
        }
    }
}
