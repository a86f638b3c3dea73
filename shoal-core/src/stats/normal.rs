//! Standard normal CDF via a rational error-function approximation.
//!
//! Abramowitz & Stegun 7.1.26 — maximum absolute error about 1.5e-7,
//! plenty for sizing decisions and cheaper than pulling in a special-
//! functions dependency.

const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

/// 5-term rational approximation of the error function.
pub fn erf(x: f64) -> f64 {
    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t) * (-x * x).exp();
    sign * y
}

/// CDF of Normal(mean, std) at `x`.
pub fn normal_cdf(x: f64, mean: f64, std: f64) -> f64 {
    let z = (x - mean) / (std * std::f64::consts::SQRT_2);
    0.5 * (1.0 + erf(z))
}
