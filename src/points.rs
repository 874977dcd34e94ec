//! Control-point maintenance.
//!
//! These functions create and restructure the point set a curve is fitted
//! through. Ownership is explicit in the signatures:
//!
//! - [`sort_points_by_x`] borrows the points and returns a sorted copy.
//! - [`sort_points_by_x_in_place`], [`remove_point`] and [`add_point`] take
//!   `&mut` and change the caller's point set.
//!
//! Keeping `points.len() == order + 1` across an order change is done by
//! calling [`add_point`] or [`remove_point`] until the length matches:
//!
//! ```rust
//! # use polycurve::points::{add_point, remove_point};
//! let mut points = vec![[0.0, 0.0], [10.0, 10.0]];
//! let order = 3;
//! while points.len() < order + 1 {
//!     add_point(&mut points, 5, 5).unwrap();
//! }
//! assert_eq!(points, vec![[0.0, 0.0], [2.5, 2.5], [5.0, 5.0], [10.0, 10.0]]);
//!
//! while points.len() > 2 {
//!     remove_point(&mut points);
//! }
//! assert_eq!(points, vec![[0.0, 0.0], [10.0, 10.0]]);
//! ```
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::{
    error::{Error, Result},
    fit::polynomial_regression,
    value::{check_bounds, round, Point},
};

/// Creates the random source used by [`generate_random_points_seeded`].
///
/// A fixed `seed` makes the generated points reproducible.
#[must_use]
pub fn rng(seed: Option<u64>) -> rand::rngs::SmallRng {
    match seed {
        Some(s) => rand::rngs::SmallRng::seed_from_u64(s),
        None => rand::rngs::SmallRng::from_rng(&mut rand::rng()),
    }
}

/// Creates `n` points evenly spread over `[x_min, x_max]` with random y values.
///
/// The first point sits on `x_min` and the last on `x_max`; the spacing is
/// `(x_max - x_min) / (n - 1)`. Each y value is drawn uniformly from
/// `[y_min, y_max]` using `rng` and rounded to `precision` decimal places.
/// x values are not rounded.
///
/// # Errors
/// - [`Error::NotEnoughSamples`]: `n < 2`.
/// - [`Error::NonFinite`] or [`Error::InvalidBounds`]: either interval is
///   not finite and non-empty.
///
/// # Example
/// ```
/// # use polycurve::points::{generate_random_points, rng};
/// let points = generate_random_points(&mut rng(Some(7)), 3, 2, -10.0, 10.0, -10.0, 10.0).unwrap();
/// assert_eq!(points.len(), 3);
/// assert_eq!(points[1][0], 0.0);
/// ```
pub fn generate_random_points<R: Rng>(
    rng: &mut R,
    n: usize,
    precision: i32,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) -> Result<Vec<Point>> {
    if n < 2 {
        return Err(Error::NotEnoughSamples(n));
    }
    check_bounds(x_min, x_max)?;
    check_bounds(y_min, y_max)?;

    #[allow(clippy::cast_precision_loss)]
    let spacing = (x_max - x_min) / (n - 1) as f64;

    #[allow(clippy::cast_precision_loss)]
    let points = (0..n)
        .map(|i| {
            let x = spacing * i as f64 + x_min;
            let y = round(rng.random_range(y_min..=y_max), precision);
            [x, y]
        })
        .collect();

    Ok(points)
}

/// [`generate_random_points`] using a [`rng`] built from `seed`.
///
/// # Errors
/// See [`generate_random_points`].
pub fn generate_random_points_seeded(
    seed: Option<u64>,
    n: usize,
    precision: i32,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) -> Result<Vec<Point>> {
    generate_random_points(&mut rng(seed), n, precision, x_min, x_max, y_min, y_max)
}

/// Returns a copy of `points` sorted by ascending x.
///
/// The sort is stable, so points sharing an x keep their relative order.
/// The input is not modified.
///
/// # Example
/// ```
/// # use polycurve::points::sort_points_by_x;
/// let points = vec![[3.0, 1.0], [1.0, 2.0]];
/// assert_eq!(sort_points_by_x(&points), vec![[1.0, 2.0], [3.0, 1.0]]);
/// assert_eq!(points[0], [3.0, 1.0]);
/// ```
#[must_use]
pub fn sort_points_by_x(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sort_points_by_x_in_place(&mut sorted);
    sorted
}

/// Sorts `points` by ascending x, in place.
///
/// The sort is stable.
pub fn sort_points_by_x_in_place(points: &mut [Point]) {
    points.sort_by(|[a, _], [b, _]| a.total_cmp(b));
}

/// Removes the second point of `points`, in place, and returns it.
///
/// The first and last points anchor the visible ends of the curve, so the
/// interior point nearest the start is the one dropped. Returns `None` and
/// leaves `points` untouched if there is no second point.
///
/// # Example
/// ```
/// # use polycurve::points::remove_point;
/// let mut points = vec![[0.0, 1.0], [4.0, 2.0], [3.0, 5.0]];
/// assert_eq!(remove_point(&mut points), Some([4.0, 2.0]));
///
/// let mut single = vec![[0.0, 1.0]];
/// assert_eq!(remove_point(&mut single), None);
/// ```
pub fn remove_point(points: &mut Vec<Point>) -> Option<Point> {
    if points.len() < 2 {
        return None;
    }

    let removed = points.remove(1);
    debug!(x = removed[0], y = removed[1], remaining = points.len(), "removed control point");
    Some(removed)
}

/// Inserts a new point lying on the curve through `points`, in place.
///
/// 1. For every point the gap to the *next array element* is measured
///    (the last point is compared with itself, so its gap is zero).
/// 2. The new x is the midpoint of the first widest gap.
/// 3. The new y comes from a fit of order `points.len() - 1` through the
///    current points, made at `coefficient_precision`. With one coefficient
///    per point this fit interpolates every existing point.
/// 4. Both coordinates are rounded to `points_precision`, the point is
///    appended and the set is re-sorted by x.
///
/// The fit happens before anything is inserted, so on error `points` is unchanged.
///
/// # Errors
/// - [`Error::NotEnoughPoints`]: fewer than 2 points.
/// - Any error of [`polynomial_regression`], e.g. [`Error::DegenerateGeometry`]
///   when points share x values.
///
/// # Example
/// ```
/// # use polycurve::points::add_point;
/// let mut points = vec![[0.0, 0.0], [2.0, 4.0], [6.0, 36.0]];
/// add_point(&mut points, 5, 5).unwrap();
/// assert_eq!(points[2], [4.0, 16.0]);
/// ```
pub fn add_point(
    points: &mut Vec<Point>,
    coefficient_precision: i32,
    points_precision: i32,
) -> Result<()> {
    if points.len() < 2 {
        return Err(Error::NotEnoughPoints(points.len()));
    }

    // Widest gap between a point and the next array element
    let gap = |i: usize| -> f64 {
        let next = points.get(i + 1).unwrap_or(&points[i]);
        (points[i][0] - next[0]).abs()
    };
    let (index, _) = (0..points.len()).fold((0, f64::NEG_INFINITY), |(best, widest), i| {
        let g = gap(i);
        if g > widest {
            (i, g)
        } else {
            (best, widest)
        }
    });
    let next = points.get(index + 1).unwrap_or(&points[index]);
    let new_x = (points[index][0] + next[0]) / 2.0;

    let regression = polynomial_regression(points, points.len() - 1, coefficient_precision)?;
    let [_, new_y] = regression.predict(new_x);

    let point = [
        round(new_x, points_precision),
        round(new_y, points_precision),
    ];
    points.push(point);
    sort_points_by_x_in_place(points);

    debug!(x = point[0], y = point[1], total = points.len(), "inserted control point");
    Ok(())
}
