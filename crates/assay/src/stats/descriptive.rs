//! Descriptive statistics over plain float samples.

use std::cmp::Ordering;

/// Round to a number of decimal places, ties to even.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round_ties_even() / scale;
    // Avoid reporting -0.0.
    if rounded == 0.0 { 0.0 } else { rounded }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); `None` below two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Sort a copy of the values ascending. NaNs compare equal to everything.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    out
}

/// Quantile of already-sorted values, linearly interpolated between the
/// two nearest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Shannon entropy in bits of a frequency distribution.
pub fn shannon_entropy<I>(counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
{
    let counts: Vec<usize> = counts.into_iter().filter(|&c| c > 0).collect();
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let entropy: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum();
    // A single category gives -0.0.
    entropy.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_ties_even() {
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-0.001, 2), 0.0);
    }

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        let sd = sample_std_dev(&values).unwrap();
        assert!((sd - 2.138_089_935).abs() < 1e-6);
        assert_eq!(sample_std_dev(&[1.0]), None);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_quantile_linear() {
        let s = sorted(&[5.0, 1.0, 4.0, 2.0, 3.0, 100.0]);
        assert_eq!(quantile_sorted(&s, 0.25), Some(2.25));
        assert_eq!(quantile_sorted(&s, 0.75), Some(4.75));
        assert_eq!(quantile_sorted(&s, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&s, 1.0), Some(100.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_entropy() {
        assert_eq!(shannon_entropy([10]), 0.0);
        assert!((shannon_entropy([1, 1, 1, 1]) - 2.0).abs() < 1e-12);
        assert!((shannon_entropy([1, 1]) - 1.0).abs() < 1e-12);
        assert_eq!(shannon_entropy(Vec::<usize>::new()), 0.0);
    }
}
