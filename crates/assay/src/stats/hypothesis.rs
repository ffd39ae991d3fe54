//! Two-sample hypothesis tests.

use std::cmp::Ordering;

use indexmap::IndexMap;
use thiserror::Error;

use super::descriptive::sorted;
use super::special::{chi_square_sf, kolmogorov_sf};

/// Why a test could not be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TestError {
    #[error("sample is empty")]
    EmptySample,
    #[error("sample contains no finite values")]
    NoFiniteValues,
    #[error("the table of expected frequencies has a zero element at {0}")]
    ZeroExpected(String),
}

/// Result of a hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    pub statistic: f64,
    pub p_value: f64,
}

/// Two-sample Kolmogorov-Smirnov test.
///
/// The statistic is the largest gap between the two empirical CDFs. The
/// two-sided p-value is exact while neither sample exceeds
/// [`KS_EXACT_MAX`] values, and otherwise comes from the asymptotic
/// Kolmogorov distribution with Stephens' correction.
pub fn ks_two_sample(baseline: &[f64], current: &[f64]) -> Result<TestOutcome, TestError> {
    if baseline.is_empty() || current.is_empty() {
        return Err(TestError::EmptySample);
    }
    let a: Vec<f64> = baseline.iter().copied().filter(|x| x.is_finite()).collect();
    let b: Vec<f64> = current.iter().copied().filter(|x| x.is_finite()).collect();
    if a.is_empty() || b.is_empty() {
        return Err(TestError::NoFiniteValues);
    }

    let a = sorted(&a);
    let b = sorted(&b);
    let d = ks_statistic(&a, &b);

    let (m, n) = (a.len(), b.len());
    let p_value = if d == 0.0 {
        1.0
    } else if m.max(n) <= KS_EXACT_MAX {
        ks_exact_sf(m, n, d)
    } else {
        let (n1, n2) = (m as f64, n as f64);
        let en = (n1 * n2 / (n1 + n2)).sqrt();
        kolmogorov_sf((en + 0.12 + 0.11 / en) * d)
    };

    Ok(TestOutcome {
        statistic: d,
        p_value,
    })
}

/// Largest sample size for which the exact KS distribution is used.
pub const KS_EXACT_MAX: usize = 10_000;

/// Exact two-sided `P(D >= d)` for samples of size `m` and `n`.
fn ks_exact_sf(m: usize, n: usize, d: f64) -> f64 {
    // d is a multiple of 1/(m*n); recover the integer numerator.
    let h = (d * (m * n) as f64).round() as i64;
    if h <= 0 {
        return 1.0;
    }
    let p = if m == n {
        outside_square(n, (h / n as i64) as usize)
    } else {
        outside_band(m, n, h)
    };
    p.clamp(0.0, 1.0)
}

/// `P(D >= h/n)` for two samples of size `n`, by the alternating sum of
/// binomial ratios evaluated in nested form.
fn outside_square(n: usize, h: usize) -> f64 {
    let mut p = 0.0;
    for k in (0..=n / h).rev() {
        let mut term = 1.0;
        for j in 0..h {
            let num = n as f64 - (k * h + j) as f64;
            let den = (n + k * h + j + 1) as f64;
            term *= num / den;
        }
        p = term * (1.0 - p);
    }
    2.0 * p
}

/// Share of monotone lattice paths from `(0, 0)` to `(m, n)` that touch
/// `|i*n - j*m| >= h`. Paths are weighted as uniform draws without
/// replacement, so every cell holds a probability in `[0, 1]`.
fn outside_band(m: usize, n: usize, h: i64) -> f64 {
    let (mi, ni) = (m as i64, n as i64);
    let inside = |i: usize, j: usize| (i as i64 * ni - j as i64 * mi).abs() < h;
    // Probability of the next step taking a value from the first sample.
    let step_first = |i: usize, j: usize| (m - i) as f64 / (m + n - i - j) as f64;
    let step_second = |i: usize, j: usize| (n - j) as f64 / (m + n - i - j) as f64;

    let mut row = vec![0.0_f64; n + 1];
    row[0] = 1.0;
    for j in 1..=n {
        row[j] = if inside(0, j) {
            row[j - 1] * step_second(0, j - 1)
        } else {
            0.0
        };
    }

    for i in 1..=m {
        row[0] = if inside(i, 0) {
            row[0] * step_first(i - 1, 0)
        } else {
            0.0
        };
        for j in 1..=n {
            row[j] = if inside(i, j) {
                row[j] * step_first(i - 1, j) + row[j - 1] * step_second(i, j - 1)
            } else {
                0.0
            };
        }
    }

    1.0 - row[n]
}

/// Largest CDF difference of two sorted samples, by a merge walk.
fn ks_statistic(a: &[f64], b: &[f64]) -> f64 {
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (mut i, mut j) = (0usize, 0usize);
    let mut max_diff = 0.0_f64;

    while i < a.len() && j < b.len() {
        let x = match a[i].partial_cmp(&b[j]).unwrap_or(Ordering::Equal) {
            Ordering::Greater => b[j],
            _ => a[i],
        };
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        max_diff = max_diff.max((i as f64 / n1 - j as f64 / n2).abs());
    }

    max_diff
}

/// Chi-square test of independence on a 2xK table of category counts.
///
/// Categories absent from one side count as zero. With one degree of
/// freedom Yates' continuity correction is applied. A single category
/// has no degrees of freedom and yields a statistic of 0 and p = 1.
pub fn chi_square_two_sample<K>(
    baseline: &IndexMap<K, usize>,
    current: &IndexMap<K, usize>,
) -> Result<TestOutcome, TestError>
where
    K: std::hash::Hash + Eq + std::fmt::Display,
{
    let mut categories: Vec<&K> = baseline.keys().collect();
    categories.extend(current.keys().filter(|k| !baseline.contains_key(*k)));

    let observed: [Vec<f64>; 2] = [
        categories
            .iter()
            .map(|k| baseline.get(*k).copied().unwrap_or(0) as f64)
            .collect(),
        categories
            .iter()
            .map(|k| current.get(*k).copied().unwrap_or(0) as f64)
            .collect(),
    ];

    let row_totals = [observed[0].iter().sum::<f64>(), observed[1].iter().sum::<f64>()];
    let total = row_totals[0] + row_totals[1];
    if row_totals[0] == 0.0 || row_totals[1] == 0.0 {
        return Err(TestError::EmptySample);
    }

    let dof = categories.len().saturating_sub(1);
    if dof == 0 {
        return Ok(TestOutcome {
            statistic: 0.0,
            p_value: 1.0,
        });
    }

    let mut statistic = 0.0;
    for (col, category) in categories.iter().enumerate() {
        let col_total = observed[0][col] + observed[1][col];
        for row in 0..2 {
            let expected = row_totals[row] * col_total / total;
            if expected == 0.0 {
                return Err(TestError::ZeroExpected(category.to_string()));
            }
            let mut diff = observed[row][col] - expected;
            if dof == 1 {
                diff = diff.signum() * (diff.abs() - 0.5).max(0.0);
            }
            statistic += diff * diff / expected;
        }
    }

    Ok(TestOutcome {
        statistic,
        p_value: chi_square_sf(statistic, dof),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&'static str, usize)]) -> IndexMap<&'static str, usize> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_ks_identical_samples() {
        let values: Vec<f64> = (0..50).map(f64::from).collect();
        let outcome = ks_two_sample(&values, &values).unwrap();
        assert_eq!(outcome.statistic, 0.0);
        assert_eq!(outcome.p_value, 1.0);
    }

    #[test]
    fn test_ks_shifted_samples() {
        let a: Vec<f64> = (0..100).map(f64::from).collect();
        let b: Vec<f64> = (0..100).map(|i| f64::from(i) + 60.0).collect();
        let outcome = ks_two_sample(&a, &b).unwrap();
        assert!((outcome.statistic - 0.6).abs() < 1e-12);
        assert!(outcome.p_value < 1e-6);
    }

    #[test]
    fn test_ks_exact_small_samples() {
        // scipy.stats.ks_2samp(..., method='exact')
        let outcome = ks_two_sample(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(outcome.statistic, 1.0);
        assert!((outcome.p_value - 0.1).abs() < 1e-12);

        let outcome = ks_two_sample(&[1.0, 2.0], &[3.0, 4.0]).unwrap();
        assert!((outcome.p_value - 1.0 / 3.0).abs() < 1e-12);

        let a: Vec<f64> = (0..10).map(f64::from).collect();
        let b: Vec<f64> = (5..15).map(f64::from).collect();
        let outcome = ks_two_sample(&a, &b).unwrap();
        assert!((outcome.statistic - 0.5).abs() < 1e-12);
        assert!((outcome.p_value - 0.167_821_34).abs() < 1e-8);
    }

    #[test]
    fn test_ks_exact_unequal_sizes() {
        // Only the two extreme orderings reach D = 1: 2 / C(7, 3).
        let outcome = ks_two_sample(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0, 7.0]).unwrap();
        assert!((outcome.p_value - 2.0 / 35.0).abs() < 1e-12);
    }

    #[test]
    fn test_ks_lattice_matches_square_formula() {
        // m = n = 10, D = 0.5: |10i - 10j| >= 50.
        assert!((outside_band(10, 10, 50) - outside_square(10, 5)).abs() < 1e-12);
        assert!((outside_band(4, 4, 16) - outside_square(4, 4)).abs() < 1e-12);
    }

    #[test]
    fn test_ks_large_samples_use_asymptotic_tail() {
        let a: Vec<f64> = (0..KS_EXACT_MAX + 1).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..100).map(|i| i as f64 * 100.0).collect();
        let outcome = ks_two_sample(&a, &b).unwrap();
        assert!(outcome.statistic > 0.0);
        assert!((0.0..=1.0).contains(&outcome.p_value));
    }

    #[test]
    fn test_ks_statistic_with_ties() {
        let a = [1.0, 2.0, 2.0, 3.0];
        let b = [2.0, 2.0, 3.0, 4.0];
        // F_a(2) = 0.75, F_b(2) = 0.5
        assert!((ks_statistic(&a, &b) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_ks_empty() {
        assert_eq!(ks_two_sample(&[], &[1.0]), Err(TestError::EmptySample));
        assert_eq!(
            ks_two_sample(&[f64::NAN], &[1.0]),
            Err(TestError::NoFiniteValues)
        );
    }

    #[test]
    fn test_chi_square_identical() {
        let c = counts(&[("a", 10), ("b", 20), ("c", 5)]);
        let outcome = chi_square_two_sample(&c, &c).unwrap();
        assert_eq!(outcome.statistic, 0.0);
        assert_eq!(outcome.p_value, 1.0);
    }

    #[test]
    fn test_chi_square_yates() {
        // scipy.stats.chi2_contingency([[10, 20], [20, 10]]) -> (5.4, 0.0201...)
        let a = counts(&[("x", 10), ("y", 20)]);
        let b = counts(&[("x", 20), ("y", 10)]);
        let outcome = chi_square_two_sample(&a, &b).unwrap();
        assert!((outcome.statistic - 5.4).abs() < 1e-9);
        assert!((outcome.p_value - 0.020_136).abs() < 1e-4);
    }

    #[test]
    fn test_chi_square_new_category() {
        let a = counts(&[("x", 10), ("y", 10)]);
        let b = counts(&[("x", 10), ("y", 10), ("z", 10)]);
        let outcome = chi_square_two_sample(&a, &b).unwrap();
        assert!(outcome.statistic > 0.0);
        assert!(outcome.p_value < 0.05);
    }

    #[test]
    fn test_chi_square_single_category() {
        let a = counts(&[("x", 3)]);
        let b = counts(&[("x", 7)]);
        let outcome = chi_square_two_sample(&a, &b).unwrap();
        assert_eq!(outcome.statistic, 0.0);
        assert_eq!(outcome.p_value, 1.0);
    }
}
