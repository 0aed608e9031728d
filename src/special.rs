//! Normal-distribution quantiles for confidence intervals.

/// Two-sided z value of the 95% normal confidence interval.
pub const Z_95: f64 = 1.96;

/// Approximation of the inverse standard normal CDF (quantile function).
///
/// Given a probability `p ∈ (0, 1)`, returns `z` such that `Φ(z) = p`.
///
/// # Algorithm
/// Abramowitz & Stegun formula 26.2.23, rational approximation.
/// Maximum absolute error < 4.5 × 10⁻⁴.
///
/// # Returns
/// - `f64::NAN` if `p` is outside `[0, 1]` or NaN.
/// - `f64::NEG_INFINITY` / `f64::INFINITY` at `p == 0` / `p == 1`.
///
/// # Examples
/// ```
/// use percolation::special::inverse_normal_cdf;
/// assert!(inverse_normal_cdf(0.5).abs() < 1e-4);
/// assert!((inverse_normal_cdf(0.975) - 1.96).abs() < 1e-3);
/// ```
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let (q, sign) = if p > 0.5 { (1.0 - p, 1.0) } else { (p, -1.0) };
    let t = (-2.0 * q.ln()).sqrt();

    const C0: f64 = 2.515517;
    const C1: f64 = 0.802853;
    const C2: f64 = 0.010328;
    const D1: f64 = 1.432788;
    const D2: f64 = 0.189269;
    const D3: f64 = 0.001308;

    let z = t - (C0 + C1 * t + C2 * t * t) / (1.0 + D1 * t + D2 * t * t + D3 * t * t * t);

    sign * z
}

/// Two-sided z value for a confidence `level` in `(0, 1)`, i.e.
/// `Φ⁻¹((1 + level) / 2)`.
///
/// Returns exactly [`Z_95`] for `level == 0.95` so that the conventional
/// interval does not pick up the approximation error.
pub fn two_sided_z(level: f64) -> f64 {
    if level == 0.95 {
        return Z_95;
    }
    inverse_normal_cdf((1.0 + level) / 2.0)
}
