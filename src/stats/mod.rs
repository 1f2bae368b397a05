//! Descriptive statistics and Welch's t-test
//!
//! Nothing here fails on degenerate input: empty or zero-variance samples yield `NaN`, which
//! callers are expected to check before reading significance into a result.

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

pub fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population variance, the mean of squared deviations.
pub fn variance(xs: &[f64]) -> f64 {
    let m = mean(xs);
    xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / xs.len() as f64
}

/// Population standard deviation (no Bessel correction).
pub fn std_dev(xs: &[f64]) -> f64 {
    variance(xs).sqrt()
}

/// Unbiased variance with `n - 1` in the denominator.
pub fn sample_variance(xs: &[f64]) -> f64 {
    let m = mean(xs);
    xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (xs.len() as f64 - 1.0)
}

/// Error function, Abramowitz and Stegun 7.1.26 (max error about 1.5e-7).
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / SQRT_2))
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TTest {
    pub t_statistic: f64,
    pub df: f64,
    pub p_value: f64,
}

impl TTest {
    pub fn is_nan(&self) -> bool {
        self.t_statistic.is_nan() || self.p_value.is_nan()
    }

    /// False when the test is undefined.
    pub fn is_significant(&self, alpha: f64) -> bool {
        !self.p_value.is_nan() && self.p_value < alpha
    }
}

/// Welch's unequal-variance t-test
///
/// `df` is the Welch-Satterthwaite estimate. The p-value is two-sided and taken from the
/// standard normal rather than Student's t, so it is too small at low `df`.
pub fn welch_t_test(xs1: &[f64], xs2: &[f64]) -> TTest {
    let n1 = xs1.len() as f64;
    let n2 = xs2.len() as f64;
    let v1 = sample_variance(xs1) / n1;
    let v2 = sample_variance(xs2) / n2;

    let t_statistic = (mean(xs1) - mean(xs2)) / (v1 + v2).sqrt();
    let df = (v1 + v2) * (v1 + v2) / (v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0));
    let p_value = 2.0 * (1.0 - normal_cdf(t_statistic.abs()));
    TTest {
        t_statistic: t_statistic,
        df: df,
        p_value: p_value,
    }
}
