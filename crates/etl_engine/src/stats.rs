//! Numeric helpers shared by the coercer and the metrics engine.

use etl_core::DataValue;

/// Attempts to read a value as a number.
///
/// Numbers pass through; strings are parsed after trimming. Anything that
/// does not yield a non-NaN number is treated as missing.
pub fn parse_numeric(value: &DataValue) -> Option<f64> {
    match value {
        DataValue::String(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
        other => other.as_float(),
    }
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (divisor n-1), or `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Quantile of a sorted slice using linear interpolation between ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = last as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Rounds to a number of decimal places, sending ties to the even digit.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric(&DataValue::Int(3)), Some(3.0));
        assert_eq!(parse_numeric(&DataValue::String(" 2.5 ".into())), Some(2.5));
        assert_eq!(parse_numeric(&DataValue::String("unknown".into())), None);
        assert_eq!(parse_numeric(&DataValue::String("NaN".into())), None);
        assert_eq!(parse_numeric(&DataValue::Null), None);
    }

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        let std = sample_std(&values).unwrap();
        assert!((std - 2.138089935).abs() < 1e-9);

        assert_eq!(mean(&[]), None);
        assert_eq!(sample_std(&[1.0]), None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[7.0], 0.75), Some(7.0));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(29.833333, 1), 29.8);
        assert_eq!(round_to(0.0, 1), 0.0);
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.75, 1), 0.8);
        assert_eq!(round_to(22.25, 1), 22.2);
    }
}
