//! Mean and standard deviation over bucket values
//!
//! Every function here ignores non-finite inputs and returns `None` instead
//! of NaN when the statistic is undefined.

use serde::{Deserialize, Serialize};

/// Denominator used for the variance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadNormalization {
    /// Divide by `n - 1`
    #[default]
    Sample,
    /// Divide by `n`
    Population,
}

impl SpreadNormalization {
    fn denominator(&self, n: usize) -> f64 {
        match self {
            Self::Sample => (n - 1) as f64,
            Self::Population => n as f64,
        }
    }
}

/// Arithmetic mean of the finite values, `None` when there are none
pub fn mean(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    (!finite.is_empty()).then(|| finite_mean(&finite))
}

/// Mean of a non-empty slice of finite values
///
/// Falls back to a running mean when the plain sum overflows, so the result
/// is finite for any finite input.
pub(crate) fn finite_mean(finite: &[f64]) -> f64 {
    let sum: f64 = finite.iter().sum();
    if sum.is_finite() {
        return sum / finite.len() as f64;
    }
    finite.iter().enumerate().fold(0.0, |m, (i, &x)| {
        let k = (i + 1) as f64;
        m + (x / k - m / k)
    })
}

/// Standard deviation of the finite values
///
/// `None` when fewer than two values are available, for either
/// normalization, so a lone value never reports a spread of zero. Also
/// `None` when the deviation itself exceeds the `f64` range.
pub fn std_dev(values: &[f64], normalization: SpreadNormalization) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < 2 {
        return None;
    }
    spread(&finite, finite_mean(&finite), normalization)
}

/// Deviation of finite values about an already computed `center`
pub(crate) fn spread(finite: &[f64], center: f64, normalization: SpreadNormalization) -> Option<f64> {
    let n = finite.len();
    if n < 2 {
        return None;
    }
    let den = normalization.denominator(n);

    let sum_sq: f64 = finite.iter().map(|&x| (x - center) * (x - center)).sum();
    if sum_sq.is_finite() {
        return Some((sum_sq / den).sqrt());
    }

    // Halved and scaled deviations stay finite for any finite input
    let halves: Vec<f64> = finite.iter().map(|&x| x / 2.0 - center / 2.0).collect();
    let scale = halves.iter().fold(0.0f64, |acc, h| acc.max(h.abs()));
    if scale == 0.0 {
        return Some(0.0);
    }
    let scaled: f64 = halves.iter().map(|h| (h / scale) * (h / scale)).sum();
    let sd = 2.0 * scale * (scaled / den).sqrt();
    sd.is_finite().then_some(sd)
}

/// Sample standard deviation (`n - 1`)
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    std_dev(values, SpreadNormalization::Sample)
}
