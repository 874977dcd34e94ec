use nalgebra::{DMatrix, DVector, SVD};
use tracing::{debug, trace};

use crate::{
    display::generate_polynomial_equation,
    error::{Error, Result},
    polynomial::polynomial_value,
    statistics::{self, DomainNormalizer},
    value::{check_bounds, round, Point, PointExt, SampledValues},
    Polynomial,
};

/// Number of curve samples per unit of x produced by [`generate_curve_points`].
///
/// Controls the smoothness of a drawn curve against the number of points.
pub const SAMPLES_PER_UNIT: u32 = 7;

/// Largest number of samples [`generate_curve_points`] will produce.
///
/// At [`SAMPLES_PER_UNIT`] this caps the sampled width at a little over 142 857 units.
pub const MAX_CURVE_SAMPLES: usize = 1_000_000;

/// The result of a polynomial least-squares regression.
///
/// Holds the fitted coefficients, rounded to the precision the fit was made
/// with, together with the goodness of fit and a display string. The struct
/// keeps no reference to the points it was fitted on; [`Regression::predict`]
/// only reads the coefficients and can be called any number of times.
///
/// # Example
/// ```
/// # use polycurve::polynomial_regression;
/// let fit = polynomial_regression(&[[0.0, 0.0], [5.0, 8.0], [10.0, 2.0]], 2, 5).unwrap();
/// assert_eq!(fit.coefficients, vec![-0.28, 3.0, 0.0]);
/// assert_eq!(fit.r2, 1.0);
/// assert_eq!(fit.string, "y = -0.28*x^2 + 3*x");
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Regression {
    /// Fitted coefficients, highest degree first, rounded to the fit precision.
    pub coefficients: Vec<f64>,

    /// Coefficient of determination of the rounded coefficients against the source points.
    ///
    /// Rounded to the fit precision, so an exact fit reports exactly `1`.
    pub r2: f64,

    /// Human-readable equation, `y = ...`.
    pub string: String,
}
impl Regression {
    fn from_coefficients(coefficients: Vec<f64>, points: &[Point], precision: i32) -> Self {
        let y_fit = points.x_iter().map(|x| polynomial_value(x, &coefficients));
        let r2 = round(statistics::r_squared(points.y_iter(), y_fit), precision);

        let equation = generate_polynomial_equation(&coefficients);
        let string = if equation.is_empty() {
            "y = 0".to_string()
        } else {
            format!("y = {equation}")
        };

        Self {
            coefficients,
            r2,
            string,
        }
    }

    /// Evaluates the fitted polynomial at `x`.
    ///
    /// Returns the point `[x, y]`. The y value is not rounded.
    #[must_use]
    pub fn predict(&self, x: f64) -> Point {
        [x, polynomial_value(x, &self.coefficients)]
    }

    /// Returns the order (degree) of the fitted polynomial.
    #[must_use]
    pub fn order(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Calculates the R² of the fitted coefficients against `points`.
    ///
    /// Unlike [`Regression::r2`] this value is not rounded.
    ///
    /// See [`statistics::r_squared`].
    #[must_use]
    pub fn r_squared(&self, points: &[Point]) -> f64 {
        let y_fit = points.x_iter().map(|x| polynomial_value(x, &self.coefficients));
        statistics::r_squared(points.y_iter(), y_fit)
    }

    /// Borrows the fitted coefficients as a [`Polynomial`].
    #[must_use]
    pub fn as_polynomial(&self) -> Polynomial<'_> {
        Polynomial::borrowed(&self.coefficients)
    }
}

impl std::fmt::Display for Regression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.string)
    }
}

/// Turns the points into a monomial design matrix and y-values vector.
///
/// Row `i` is `[1, t_i, t_i^2, ..., t_i^order]` where `t_i` is `x_i` normalized.
fn create_matrix(
    points: &[Point],
    k: usize,
    normalizer: &DomainNormalizer,
) -> (DMatrix<f64>, DVector<f64>) {
    let mut bigx = DMatrix::zeros(points.len(), k);
    let b = DVector::from_iterator(points.len(), points.y_iter());

    for (mut row, [x, _]) in bigx.row_iter_mut().zip(points.iter()) {
        let t = normalizer.normalize(*x);
        let mut value = 1.0;
        for j in 0..k {
            row[j] = value;
            value *= t;
        }
    }

    (bigx, b)
}

/// Solves the least-squares system using SVD.
fn solve_matrix(matrix: DMatrix<f64>, b: &DVector<f64>) -> Result<Vec<f64>> {
    let size = matrix.shape();

    // Calculate the singular value decomposition of the matrix
    let decomp = SVD::new_unordered(matrix, true, true);

    // Calculate epsilon value
    // ~= machine_epsilon * max(size) * max_singular
    #[allow(clippy::cast_precision_loss)]
    let max_size = size.0.max(size.1) as f64;
    let sigma_max = decomp.singular_values.max();
    let epsilon = f64::EPSILON * max_size * sigma_max;

    // Solve for X in `SVD * X = b`
    let big_x = decomp.solve(b, epsilon).map_err(Error::Algebra)?;
    let coefficients: Vec<_> = big_x.data.into();

    // Make sure the coefficients are valid
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(Error::Algebra("Non-finite value in coefficients"));
    }

    Ok(coefficients)
}

/// Fits a polynomial of the given `order` through `points` by linear least squares.
///
/// The coefficients of the polynomial `a_n*x^n + ... + a_1*x + a_0` are
/// returned highest degree first and rounded to `precision` decimal places.
/// The points do not need to be sorted.
///
/// # How it works
/// - Maps the x values onto `[-1, 1]` so the fit is equally well conditioned
///   at any scale. See [`DomainNormalizer`].
/// - Builds a monomial design matrix with one row per point.
/// - Solves `A * c = y` in the least-squares sense using the SVD of `A`.
/// - Maps the coefficients back onto the original x domain.
/// - Rounds the coefficients, then computes R² from the *rounded*
///   coefficients and rounds it to `precision` too.
///
/// # Precision
/// Coefficients that need more than `precision` decimal places cannot be
/// recovered exactly; the fit returns the nearest representable values.
///
/// # Errors
/// - [`Error::NoData`]: `points` is empty.
/// - [`Error::NonFinite`]: a coordinate is NaN or infinite.
/// - [`Error::Underdetermined`]: fewer than `order + 1` points.
/// - [`Error::DegenerateGeometry`]: fewer than `order + 1` distinct x values.
/// - [`Error::Algebra`]: the linear system could not be solved.
///
/// # Example
/// ```
/// # use polycurve::polynomial_regression;
/// let fit = polynomial_regression(&[[0.0, 1.0], [1.0, 3.0], [2.0, 5.0]], 1, 3).unwrap();
/// assert_eq!(fit.coefficients, vec![2.0, 1.0]);
/// assert_eq!(fit.predict(4.0), [4.0, 9.0]);
/// ```
pub fn polynomial_regression(points: &[Point], order: usize, precision: i32) -> Result<Regression> {
    if points.is_empty() {
        return Err(Error::NoData);
    } else if !points.all_finite() {
        return Err(Error::NonFinite);
    } else if points.len() <= order {
        return Err(Error::Underdetermined {
            points: points.len(),
            order,
        });
    }

    let distinct = points.distinct_x();
    if distinct <= order {
        return Err(Error::DegenerateGeometry { distinct, order });
    }

    let k = order + 1;
    let normalizer = DomainNormalizer::from_data(points.x_iter(), (-1.0, 1.0));
    let (m, b) = create_matrix(points, k, &normalizer);
    let mut coefficients = normalizer.denormalize_coefs(&solve_matrix(m, &b)?);
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(Error::Algebra("Non-finite value in coefficients"));
    }

    // Solved lowest degree first
    coefficients.reverse();
    for c in &mut coefficients {
        *c = round(*c, precision);
    }

    let regression = Regression::from_coefficients(coefficients, points, precision);
    debug!(
        points = points.len(),
        order,
        precision,
        r2 = regression.r2,
        "fitted polynomial {}",
        regression.string
    );

    Ok(regression)
}

/// Samples the curve fitted through `points` between `x_min` and `x_max`.
///
/// The curve is a fresh [`polynomial_regression`] of `order` at `precision`.
/// Samples are taken at `x_min + i / 7` for `i` in `0..=floor(7 * (x_max - x_min))`,
/// so an integer-width interval ends exactly on `x_max` and a fractional
/// width is truncated. See [`SAMPLES_PER_UNIT`].
///
/// # Errors
/// - [`Error::NonFinite`] or [`Error::InvalidBounds`]: the bounds are not a
///   finite, non-empty interval.
/// - [`Error::TooManySamples`]: the interval needs more than [`MAX_CURVE_SAMPLES`] samples.
/// - Any error of [`polynomial_regression`].
///
/// # Example
/// ```
/// # use polycurve::generate_curve_points;
/// let samples = generate_curve_points(&[[0.0, 0.0], [1.0, 1.0]], 1, 0.0, 2.0, 5).unwrap();
/// assert_eq!(samples.len(), 15);
/// assert_eq!(samples[14], [2.0, 2.0]);
/// ```
pub fn generate_curve_points(
    points: &[Point],
    order: usize,
    x_min: f64,
    x_max: f64,
    precision: i32,
) -> Result<Vec<Point>> {
    check_sample_range(x_min, x_max)?;

    let regression = polynomial_regression(points, order, precision)?;
    sample_curve(&regression, x_min, x_max)
}

/// Fails unless `[x_min, x_max]` is a valid interval within [`MAX_CURVE_SAMPLES`] samples.
fn check_sample_range(x_min: f64, x_max: f64) -> Result<()> {
    check_bounds(x_min, x_max)?;

    let steps = (f64::from(SAMPLES_PER_UNIT) * (x_max - x_min)).floor();
    #[allow(clippy::cast_precision_loss)]
    let limit = MAX_CURVE_SAMPLES as f64;
    if steps.is_finite() && steps < limit {
        Ok(())
    } else {
        Err(Error::TooManySamples {
            min: x_min,
            max: x_max,
            limit: MAX_CURVE_SAMPLES,
        })
    }
}

/// Samples an existing fit across `[x_min, x_max]`.
pub(crate) fn sample_curve(regression: &Regression, x_min: f64, x_max: f64) -> Result<Vec<Point>> {
    check_sample_range(x_min, x_max)?;

    let samples: Vec<Point> = SampledValues::new(x_min, x_max, SAMPLES_PER_UNIT)
        .map(|x| regression.predict(x))
        .collect();

    trace!(x_min, x_max, samples = samples.len(), "sampled curve");
    Ok(samples)
}
