use crate::models::MonthlySeries;

/// Largest monthly value accepted as a plain unit count
pub const UNIT_ANOMALY_THRESHOLD: f64 = 1_000_000.0;

/// Divisor applied when a series exceeds [`UNIT_ANOMALY_THRESHOLD`]
pub const UNIT_CORRECTION_FACTOR: f64 = 100_000.0;

/// Result of a unit normalization pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    pub series: MonthlySeries,
    pub rescaled: bool,
}

/// Rescale a series whose maximum is implausibly large for monthly unit counts.
///
/// Some years report values inflated by a formatting/units drift in the source
/// workbook. This is a heuristic repair inferred from those years, not a verified
/// conversion. The check re-reads the maximum, so apply it exactly once per
/// series: a second pass can rescale again.
pub fn normalize_units(series: MonthlySeries) -> Normalized {
    if series.max() > UNIT_ANOMALY_THRESHOLD {
        Normalized {
            series: series.map(|v| v / UNIT_CORRECTION_FACTOR),
            rescaled: true,
        }
    } else {
        Normalized {
            series,
            rescaled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescales_above_threshold() {
        let mut values = [1_000_000.0; 12];
        values[4] = 5_000_000.0;
        let result = normalize_units(MonthlySeries::new(values));

        assert!(result.rescaled);
        assert_eq!(result.series[4], 50.0);
        assert_eq!(result.series[0], 10.0);
    }

    #[test]
    fn test_unchanged_below_threshold() {
        let mut values = [1000.0; 12];
        values[7] = 900_000.0;
        let input = MonthlySeries::new(values);
        let result = normalize_units(input);

        assert!(!result.rescaled);
        assert_eq!(result.series, input);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let input = MonthlySeries::new([UNIT_ANOMALY_THRESHOLD; 12]);
        assert!(!normalize_units(input).rescaled);
    }

    #[test]
    fn test_not_idempotent_for_huge_values() {
        let input = MonthlySeries::new([1e12; 12]);
        let once = normalize_units(input).series;
        let twice = normalize_units(once).series;
        assert_eq!(once[0], 1e7);
        assert_ne!(once, twice);
    }
}
