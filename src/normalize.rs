//! Unit normalizer: raw reading value to a 0–100 percentage.

use crate::error::{Result, TelemetryError};
use crate::models::Bounds;

/// Map `value` onto `bounds` as a percentage clamped to `[0, 100]`.
///
/// Values outside the calibration range are clamped rather than rejected,
/// since readings may legitimately overshoot the bounds for a while. The
/// bounds themselves must satisfy `min < max`.
pub fn normalize(value: f64, bounds: &Bounds) -> Result<f64> {
    // ---
    bounds.validate()?;
    if value.is_nan() {
        return Err(TelemetryError::NonFiniteReading("value"));
    }

    let percentage = (value - bounds.min) / bounds.span() * 100.0;
    Ok(percentage.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    const RATION: Bounds = Bounds::new(100.0, 500.0);

    #[test]
    fn test_linear_mapping() {
        // ---
        assert_eq!(normalize(100.0, &RATION).unwrap(), 0.0);
        assert_eq!(normalize(300.0, &RATION).unwrap(), 50.0);
        assert_eq!(normalize(500.0, &RATION).unwrap(), 100.0);
        assert!((normalize(280.0, &RATION).unwrap() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamps_out_of_range_values() {
        // ---
        assert_eq!(normalize(-20.0, &RATION).unwrap(), 0.0);
        assert_eq!(normalize(900.0, &RATION).unwrap(), 100.0);
        assert_eq!(normalize(f64::INFINITY, &RATION).unwrap(), 100.0);
        assert_eq!(normalize(f64::NEG_INFINITY, &RATION).unwrap(), 0.0);
    }

    #[test]
    fn test_always_within_percentage_range() {
        // ---
        let bounds = Bounds::new(-10.0, 40.0);
        for step in -200..=200 {
            let value = step as f64 * 0.75;
            let pct = normalize(value, &bounds).unwrap();
            assert!((0.0..=100.0).contains(&pct), "{value} -> {pct}");
        }
    }

    #[test]
    fn test_rejects_degenerate_bounds() {
        // ---
        let flat = Bounds::new(7.0, 7.0);
        assert_eq!(
            normalize(7.0, &flat),
            Err(TelemetryError::InvalidBounds { min: 7.0, max: 7.0 })
        );

        let inverted = Bounds::new(500.0, 100.0);
        assert!(matches!(
            normalize(300.0, &inverted),
            Err(TelemetryError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_nan_value() {
        // ---
        assert_eq!(
            normalize(f64::NAN, &RATION),
            Err(TelemetryError::NonFiniteReading("value"))
        );
    }
}
