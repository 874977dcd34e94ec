use std::borrow::Cow;

use crate::{
    display::generate_polynomial_equation,
    value::{Point, SampledValues},
};

/// Evaluates the polynomial defined by `coefficients` at `x`.
///
/// Coefficients are ordered highest degree first, so `[-1, 2, 1]` is
/// `-x^2 + 2x + 1`. An empty coefficient list evaluates to `0`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// y(x) = Σ c_i * x^(n - i - 1)
/// where
///   n = number of coefficients
/// ```
/// </div>
///
/// # Example
/// ```
/// # use polycurve::polynomial_value;
/// assert_eq!(polynomial_value(2.0, &[-1.0, 2.0, 1.0]), 1.0);
/// ```
#[must_use]
pub fn polynomial_value(x: f64, coefficients: &[f64]) -> f64 {
    let n = coefficients.len();
    coefficients
        .iter()
        .enumerate()
        .map(|(i, c)| c * x.powi(exponent(n - i - 1)))
        .sum()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn exponent(e: usize) -> i32 {
    e.min(i32::MAX as usize) as i32
}

/// A polynomial in monomial form, highest degree first.
///
/// Unlike [`crate::Regression`], this type is **not tied to any dataset**;
/// it is a canonical function that can be evaluated for any x-value.
///
/// # Example
/// ```
/// # use polycurve::Polynomial;
/// let poly = Polynomial::borrowed(&[3.0, -2.0, 1.0]); // 3x^2 - 2x + 1
/// assert_eq!(poly.y(2.0), 9.0);
/// assert_eq!(poly.to_string(), "3*x^2 - 2*x + 1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<'a> {
    coefficients: Cow<'a, [f64]>,
}
impl<'a> Polynomial<'a> {
    /// Creates a polynomial from its coefficients, highest degree first.
    pub fn new(coefficients: impl Into<Cow<'a, [f64]>>) -> Self {
        Self {
            coefficients: coefficients.into(),
        }
    }

    /// Creates a polynomial borrowing its coefficients.
    #[must_use]
    pub const fn borrowed(coefficients: &'a [f64]) -> Self {
        Self {
            coefficients: Cow::Borrowed(coefficients),
        }
    }

    /// Converts the polynomial into an owned version.
    #[must_use]
    pub fn into_owned(self) -> Polynomial<'static> {
        Polynomial {
            coefficients: Cow::Owned(self.coefficients.into_owned()),
        }
    }

    /// Returns the coefficients, highest degree first.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Returns the degree (order) of the polynomial.
    ///
    /// This is the number of coefficients minus one; leading zeros count.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at a given x-value.
    #[must_use]
    pub fn y(&self, x: f64) -> f64 {
        polynomial_value(x, &self.coefficients)
    }

    /// Evaluates the polynomial at multiple x-values.
    pub fn solve(&self, x: impl IntoIterator<Item = f64>) -> Vec<Point> {
        x.into_iter().map(|x| [x, self.y(x)]).collect()
    }

    /// Evaluates the polynomial at `frequency` evenly spaced samples per unit over `[start, end]`.
    ///
    /// See [`SampledValues`].
    #[must_use]
    pub fn solve_range(&self, start: f64, end: f64, frequency: u32) -> Vec<Point> {
        self.solve(SampledValues::new(start, end, frequency))
    }

    /// Returns the human-readable equation, without a `y = ` prefix.
    ///
    /// See [`generate_polynomial_equation`].
    #[must_use]
    pub fn equation(&self) -> String {
        generate_polynomial_equation(&self.coefficients)
    }
}

impl std::fmt::Display for Polynomial<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.equation())
    }
}
