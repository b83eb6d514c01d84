use std::{convert::TryFrom, num::IntErrorKind};

use tracing::debug;

use crate::error::{PhaseError, PhaseResult};

pub const ELEMENT_COUNT_FIELD: &str = "Number of Elements (N)";
pub const INCIDENT_ANGLE_FIELD: &str = "Incident Angle θᵢ (deg)";
pub const REFLECTION_ANGLE_FIELD: &str = "Reflection Angle θᵣ (deg)";

// Geometry of a uniform linear reflecting array and the desired steering.
// Angles are in degrees and are not restricted to [-90, 90].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryInput {
    pub element_count: usize,
    pub incident_angle_deg: f64,
    pub reflection_angle_deg: f64,
}

impl GeometryInput {
    pub fn new(element_count: usize, incident_angle_deg: f64, reflection_angle_deg: f64) -> Self {
        GeometryInput {
            element_count,
            incident_angle_deg,
            reflection_angle_deg,
        }
    }
}

/// Bounds applied to the element count when parsing form input.
///
/// The upper bound only guards against runaway allocation and plotting; a
/// larger surface is physically fine, so hosts may raise it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub min_elements: usize,
    pub max_elements: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_elements: 1,
            max_elements: 10_000,
        }
    }
}

impl ValidationPolicy {
    pub fn max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }

    /// Parses the three raw form tokens into a [GeometryInput].
    ///
    /// Blank fields are reported before any parse error, so a form with an
    /// empty N and a garbage angle says "fill all fields" first.
    pub fn validate(
        &self,
        raw_element_count: &str,
        raw_incident_angle: &str,
        raw_reflection_angle: &str,
    ) -> PhaseResult<GeometryInput> {
        let n_raw = required(ELEMENT_COUNT_FIELD, raw_element_count)?;
        let θi_raw = required(INCIDENT_ANGLE_FIELD, raw_incident_angle)?;
        let θr_raw = required(REFLECTION_ANGLE_FIELD, raw_reflection_angle)?;

        // An integer too large for i64 is still an integer, just far out of range.
        let N = match n_raw.parse::<i64>() {
            Ok(N) => N,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
            Err(_) => {
                return Err(PhaseError::Parse {
                    field: ELEMENT_COUNT_FIELD,
                    value: n_raw.to_owned(),
                })
            }
        };
        let element_count = self.check_range(N)?;

        let geometry = GeometryInput {
            element_count,
            incident_angle_deg: parse_angle(INCIDENT_ANGLE_FIELD, θi_raw)?,
            reflection_angle_deg: parse_angle(REFLECTION_ANGLE_FIELD, θr_raw)?,
        };
        debug!(?geometry, "validated geometry");
        Ok(geometry)
    }

    fn check_range(&self, N: i64) -> PhaseResult<usize> {
        let out_of_range = PhaseError::Range {
            value: N,
            min: self.min_elements,
            max: self.max_elements,
        };
        match usize::try_from(N) {
            Ok(n) if n >= self.min_elements && n <= self.max_elements => Ok(n),
            _ => Err(out_of_range),
        }
    }
}

/// [ValidationPolicy::validate] with the default `[1, 10000]` element bound.
pub fn validate(
    raw_element_count: &str,
    raw_incident_angle: &str,
    raw_reflection_angle: &str,
) -> PhaseResult<GeometryInput> {
    ValidationPolicy::default().validate(raw_element_count, raw_incident_angle, raw_reflection_angle)
}

fn required<'a>(field: &'static str, raw: &'a str) -> PhaseResult<&'a str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(PhaseError::MissingInput { field })
    } else {
        Ok(trimmed)
    }
}

// `f64::from_str` accepts "inf" and "NaN", neither of which is an angle.
fn parse_angle(field: &'static str, raw: &str) -> PhaseResult<f64> {
    match raw.parse::<f64>() {
        Ok(θ) if θ.is_finite() => Ok(θ),
        _ => Err(PhaseError::Parse {
            field,
            value: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::{validate, GeometryInput, ValidationPolicy};
    use crate::error::PhaseError;

    #[test]
    fn parses_trimmed_tokens() {
        let geometry = validate(" 16 ", "\t-12.5", "40").unwrap();
        assert_eq!(geometry, GeometryInput::new(16, -12.5, 40.));
    }

    #[test]
    fn element_count_bounds() {
        for ok in ["1", "10000"] {
            assert!(validate(ok, "0", "30").is_ok(), "{} should be accepted", ok);
        }
        for bad in ["0", "10001", "-3"] {
            match validate(bad, "0", "30") {
                Err(PhaseError::Range { min: 1, max: 10000, .. }) => {}
                other => panic!("{} gave {:?}", bad, other),
            }
        }
    }

    #[test]
    fn missing_fields_reported_before_parse_errors() {
        assert!(matches!(
            validate("", "abc", "30"),
            Err(PhaseError::MissingInput { field: super::ELEMENT_COUNT_FIELD })
        ));
        assert!(matches!(
            validate("4", "   ", "30"),
            Err(PhaseError::MissingInput { field: super::INCIDENT_ANGLE_FIELD })
        ));
        assert!(matches!(
            validate("4", "0", ""),
            Err(PhaseError::MissingInput { field: super::REFLECTION_ANGLE_FIELD })
        ));
    }

    #[test]
    fn non_numeric_tokens() {
        assert!(matches!(validate("4.0", "0", "30"), Err(PhaseError::Parse { .. })));
        assert!(matches!(validate("four", "0", "30"), Err(PhaseError::Parse { .. })));
        assert!(matches!(validate("4", "thirty", "30"), Err(PhaseError::Parse { .. })));
        assert!(matches!(validate("4", "0", "NaN"), Err(PhaseError::Parse { .. })));
        assert!(matches!(validate("4", "inf", "0"), Err(PhaseError::Parse { .. })));
    }

    #[test]
    fn huge_integers_are_out_of_range() {
        assert!(matches!(
            validate("99999999999999999999", "0", "30"),
            Err(PhaseError::Range { value: i64::MAX, .. })
        ));
        assert!(matches!(
            validate("-99999999999999999999", "0", "30"),
            Err(PhaseError::Range { value: i64::MIN, .. })
        ));
        assert!(matches!(validate("+7e3", "0", "30"), Err(PhaseError::Parse { .. })));
    }

    #[test]
    fn angles_are_unrestricted() {
        let geometry = validate("3", "-720", "135.5").unwrap();
        assert_eq!(geometry.incident_angle_deg, -720.);
        assert_eq!(geometry.reflection_angle_deg, 135.5);
    }

    #[test]
    fn custom_upper_bound() {
        let policy = ValidationPolicy::default().max_elements(20_000);
        assert_eq!(policy.validate("15000", "0", "10").unwrap().element_count, 15_000);
        assert!(matches!(
            policy.validate("20001", "0", "10"),
            Err(PhaseError::Range { max: 20_000, .. })
        ));
    }
}
