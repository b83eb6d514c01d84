// Helper functions for integration tests

use irs_phase_lib::PhaseProfile;

/// Assert that exported rows match a profile element by element
pub fn assert_rows_match(rows: &[(usize, f64)], profile: &PhaseProfile, tolerance: f64) {
    assert_eq!(rows.len(), profile.len(), "row count differs from element count");

    for (i, &(index, φ)) in rows.iter().enumerate() {
        assert_eq!(index, i, "rows out of order at {}", i);
        let expected = profile.get(i).unwrap();
        let diff = (φ - expected).abs();
        assert!(
            diff <= tolerance,
            "Element {} differs by {} (tolerance {})",
            i,
            diff,
            tolerance
        );
    }
}
