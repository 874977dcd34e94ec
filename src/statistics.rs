//! Goodness-of-fit statistics for a regression.
//!
//! The regression engine reports the coefficient of determination and fits
//! on a normalized x domain. The helpers work on plain iterators so they can
//! be used against any pair of observed and predicted values.

/// Computes the arithmetic mean of a sequence of values.
///
/// Returns `NaN` if the iterator yields no elements.
///
/// # Example
/// ```
/// # use polycurve::statistics::mean;
/// assert_eq!(mean([1.0, 2.0, 3.0].into_iter()), 2.0);
/// ```
pub fn mean(data: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0.0;
    for value in data {
        sum += value;
        count += 1.0;
    }
    sum / count
}

/// Computes the coefficient of determination (R²) of `y_fit` against `y`.
///
/// R² measures how much of the variance of the observed values is explained
/// by the predictions. `1` is a perfect fit.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - mean(y))²
/// ```
///
/// If every observed value is the same, `SS_tot` is zero. The result is then
/// `1` when the predictions match exactly and `0` otherwise, instead of NaN.
/// An empty input is also reported as `0`.
/// </div>
///
/// # Example
/// ```
/// # use polycurve::statistics::r_squared;
/// let y = [1.0, 2.0, 3.0];
/// assert_eq!(r_squared(y.into_iter(), y.into_iter()), 1.0);
/// ```
pub fn r_squared(y: impl Iterator<Item = f64>, y_fit: impl Iterator<Item = f64>) -> f64 {
    let y: Vec<f64> = y.collect();
    if y.is_empty() {
        return 0.0;
    }

    let y_mean = mean(y.iter().copied());

    //
    // Sum of (y - y_fit)^2
    // Sum of (y - y_mean)^2
    let mut ss_total = 0.0;
    let mut ss_residual = 0.0;
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += (y - y_mean).powi(2);
        ss_residual += (y - y_fit).powi(2);
    }

    if ss_total == 0.0 {
        return if ss_residual == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - (ss_residual / ss_total)
}

/// Maps values from one range onto another.
///
/// Fitting on x values mapped onto `[-1, 1]` keeps the monomial design matrix
/// well conditioned no matter how wide or far from zero the data lies.
/// [`DomainNormalizer::denormalize_coefs`] turns coefficients found in the
/// destination range back into coefficients over the source range.
///
/// A source range that is empty, or too wide to represent, is left as is.
///
/// # Example
/// ```
/// # use polycurve::statistics::DomainNormalizer;
/// let normalizer = DomainNormalizer::new((0.0, 300.0), (-1.0, 1.0));
/// assert_eq!(normalizer.normalize(150.0), 0.0);
/// assert_eq!(normalizer.denormalize(1.0), 300.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainNormalizer {
    src_range: (f64, f64),
    dst_range: (f64, f64),
}
impl DomainNormalizer {
    /// Creates a new `DomainNormalizer` for the given source and destination ranges.
    #[must_use]
    pub fn new(src_range: (f64, f64), dst_range: (f64, f64)) -> Self {
        Self {
            src_range,
            dst_range,
        }
    }

    /// Creates a new `DomainNormalizer` from the range of the given data and a destination range.
    pub fn from_data(data: impl Iterator<Item = f64>, dst_range: (f64, f64)) -> Self {
        let src_range = data.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        Self::new(src_range, dst_range)
    }

    /// Returns the source range of the normalizer.
    #[must_use]
    pub fn src_range(&self) -> (f64, f64) {
        self.src_range
    }

    /// `normalize(x) = alpha * x + beta`
    fn scale(&self) -> (f64, f64) {
        let (src_min, src_max) = self.src_range;
        let (dst_min, dst_max) = self.dst_range;

        let alpha = (dst_max - dst_min) / (src_max - src_min);
        let beta = dst_min - alpha * src_min;
        if alpha.is_finite() && alpha != 0.0 && beta.is_finite() {
            (alpha, beta)
        } else {
            (1.0, 0.0)
        }
    }

    /// Normalizes a value from the source range to the destination range.
    #[must_use]
    pub fn normalize(&self, x: f64) -> f64 {
        let (alpha, beta) = self.scale();
        alpha * x + beta
    }

    /// Denormalizes a value from the destination range back to the source range.
    #[must_use]
    pub fn denormalize(&self, x: f64) -> f64 {
        let (alpha, beta) = self.scale();
        (x - beta) / alpha
    }

    /// Denormalizes polynomial coefficients from the destination range back to the source range.
    ///
    /// The coefficients are in ascending order (constant term first), and so is the result.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// ```math
    /// Σ c_i (αx + β)^i = Σ_j x^j Σ_{i>=j} c_i * C(i, j) * α^j * β^(i-j)
    /// ```
    /// </div>
    #[must_use]
    pub fn denormalize_coefs(&self, coefs: &[f64]) -> Vec<f64> {
        let (alpha, beta) = self.scale();

        let mut unnorm = vec![0.0; coefs.len()];
        for (i, &c) in coefs.iter().enumerate() {
            // C(i, j), built up from C(i, 0) = 1
            let mut binom = 1.0;
            for j in 0..=i {
                unnorm[j] += c * binom * alpha.powi(exponent(j)) * beta.powi(exponent(i - j));

                #[allow(clippy::cast_precision_loss)]
                let ratio = (i - j) as f64 / (j + 1) as f64;
                binom *= ratio;
            }
        }
        unnorm
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn exponent(e: usize) -> i32 {
    e.min(i32::MAX as usize) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close};

    #[test]
    fn test_mean() {
        assert_close!(mean([1.0, 2.0, 6.0].into_iter()), 3.0);
        assert!(mean(std::iter::empty()).is_nan());
    }

    #[test]
    fn test_r_squared() {
        let y = [1.0, 2.0, 3.0, 4.0];
        let y_fit = [1.0, 2.0, 3.0, 5.0];

        // ss_res = 1, mean = 2.5, ss_tot = 5
        assert_close!(r_squared(y.into_iter(), y_fit.into_iter()), 0.8);
        assert_eq!(r_squared(y.into_iter(), y.into_iter()), 1.0);
    }

    #[test]
    fn test_r_squared_constant_data() {
        let y = [2.0, 2.0, 2.0];
        assert_eq!(r_squared(y.into_iter(), y.into_iter()), 1.0);
        assert_eq!(r_squared(y.into_iter(), [2.0, 2.5, 2.0].into_iter()), 0.0);
        assert_eq!(r_squared(std::iter::empty(), std::iter::empty()), 0.0);
    }

    #[test]
    fn test_normalizer() {
        let normalizer = DomainNormalizer::from_data([300.0, 0.0, 120.0].into_iter(), (-1.0, 1.0));
        assert_eq!(normalizer.src_range(), (0.0, 300.0));
        assert_close!(normalizer.normalize(0.0), -1.0);
        assert_close!(normalizer.normalize(300.0), 1.0);
        assert_close!(normalizer.denormalize(normalizer.normalize(120.0)), 120.0);

        // Nothing to scale
        let flat = DomainNormalizer::from_data([2.0, 2.0].into_iter(), (-1.0, 1.0));
        assert_eq!(flat.normalize(2.0), 2.0);
    }

    #[test]
    fn test_denormalize_coefs() {
        // t = x / 5 - 1 on [0, 10]; q(t) = 1 + 2t + 3t^2
        let normalizer = DomainNormalizer::new((0.0, 10.0), (-1.0, 1.0));
        let coefs = normalizer.denormalize_coefs(&[1.0, 2.0, 3.0]);

        // 1 + 2(x/5 - 1) + 3(x/5 - 1)^2 = 2 - 0.8x + 0.12x^2
        assert_all_close!(coefs, [2.0, -0.8, 0.12]);
        for x in [0.0, 2.5, 7.0, 10.0] {
            let t = normalizer.normalize(x);
            let expected = 1.0 + 2.0 * t + 3.0 * t * t;
            assert_close!(coefs[0] + coefs[1] * x + coefs[2] * x * x, expected);
        }
    }
}
