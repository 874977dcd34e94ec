//! Numeric primitives shared by the regression engine and the point utilities.
//!
//! # Types
//!
//! - [`Point`]: an `(x, y)` pair stored as `[f64; 2]`, so callers can
//!   destructure it by position.
//! - [`PointExt`]: coordinate accessors for point sequences.
//! - [`SampledValues`]: an iterator over evenly spaced x values at a fixed
//!   number of samples per unit.
//!
//! # Functions
//!
//! - [`round`]: round to a number of decimal places (negative values round to tens, hundreds, ...).
//! - [`range`]: `0..n` collected into a vector.
//! - [`precision_to_step_size`]: the input step matching a precision.
//!
//! # Example
//!
//! ```rust
//! use polycurve::value::{round, precision_to_step_size, SampledValues};
//!
//! assert_eq!(round(7.128, 2), 7.13);
//! assert_eq!(precision_to_step_size(2), 0.01);
//!
//! // 7 samples per unit between 0 and 1, both ends included
//! let xs: Vec<f64> = SampledValues::new(0.0, 1.0, 7).collect();
//! assert_eq!(xs.len(), 8);
//! ```
use std::ops::Range;

/// A 2D point `[x, y]`.
pub type Point = [f64; 2];

/// Rounds `n` to `p` decimal places, half away from zero.
///
/// Multiplies by `10^p`, rounds to the nearest integer and divides back.
/// `p` may be zero or negative: `round(1234.0, -2) == 1200.0`.
///
/// Non-finite input is returned unchanged. If `n * 10^p` overflows the
/// value already has fewer significant digits than `p` asks for and is
/// returned as-is; if `10^p` underflows to zero the result is zero.
///
/// # Example
/// ```
/// # use polycurve::value::round;
/// assert_eq!(round(1.4, 0), 1.0);
/// assert_eq!(round(1.6, 0), 2.0);
/// assert_eq!(round(-2.5, 0), -3.0);
/// ```
#[must_use]
pub fn round(n: f64, p: i32) -> f64 {
    if !n.is_finite() {
        return n;
    }

    let m = 10f64.powi(p);
    if m == 0.0 {
        return 0.0;
    }

    let scaled = n * m;
    if !scaled.is_finite() || !m.is_finite() {
        return n;
    }

    scaled.round() / m
}

/// Creates the sequence `0, 1, ..., n - 1`.
///
/// # Example
/// ```
/// # use polycurve::value::range;
/// assert_eq!(range(0), Vec::<usize>::new());
/// assert_eq!(range(3), vec![0, 1, 2]);
/// ```
#[must_use]
pub fn range(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Returns the step size of a numeric input that holds `precision` decimal places.
///
/// This is `10^(-precision)`; `3` gives `0.001` and `-2` gives `100`.
#[must_use]
pub fn precision_to_step_size(precision: i32) -> f64 {
    10f64.powi(-precision)
}

/// Checks that a `min..max` pair is finite and non-empty, with a representable width.
pub(crate) fn check_bounds(min: f64, max: f64) -> crate::error::Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(crate::error::Error::NonFinite);
    }
    if max <= min || !(max - min).is_finite() {
        return Err(crate::error::Error::InvalidBounds { min, max });
    }
    Ok(())
}

/// Extension trait for reading the coordinates of a point sequence.
///
/// # Example
/// ```
/// # use polycurve::value::PointExt;
/// let points = vec![[1.5, -2.0], [2.0, 3.0], [0.0, 1.0]];
/// assert_eq!(points.x(), vec![1.5, 2.0, 0.0]);
/// assert_eq!(points.x_range(), Some(0.0..2.0));
/// ```
pub trait PointExt {
    /// Returns an iterator over the x-coordinates.
    fn x_iter(&self) -> impl Iterator<Item = f64>;

    /// Returns an iterator over the y-coordinates.
    fn y_iter(&self) -> impl Iterator<Item = f64>;

    /// Returns the x-coordinates.
    fn x(&self) -> Vec<f64> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates.
    fn y(&self) -> Vec<f64> {
        self.y_iter().collect()
    }

    /// Returns the range spanned by the x-coordinates.
    fn x_range(&self) -> Option<Range<f64>> {
        let bounds = self.x_iter().fold(None, |acc: Option<(f64, f64)>, x| {
            Some(match acc {
                Some((min, max)) => (min.min(x), max.max(x)),
                None => (x, x),
            })
        });
        bounds.map(|(start, end)| start..end)
    }

    /// Returns true if every coordinate is finite.
    fn all_finite(&self) -> bool {
        self.x_iter().chain(self.y_iter()).all(f64::is_finite)
    }

    /// Returns true if the x-coordinates never decrease.
    fn is_sorted_by_x(&self) -> bool {
        let xs = self.x();
        xs.windows(2).all(|w| w[0] <= w[1])
    }

    /// Counts the distinct x-coordinates.
    fn distinct_x(&self) -> usize {
        let mut xs = self.x();
        xs.sort_by(f64::total_cmp);
        xs.dedup();
        xs.len()
    }
}
impl PointExt for [Point] {
    fn x_iter(&self) -> impl Iterator<Item = f64> {
        self.iter().map(|[x, _]| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = f64> {
        self.iter().map(|[_, y]| *y)
    }
}
impl PointExt for Vec<Point> {
    fn x_iter(&self) -> impl Iterator<Item = f64> {
        self.iter().map(|[x, _]| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = f64> {
        self.iter().map(|[_, y]| *y)
    }
}

/// Iterator over evenly spaced x values at a fixed number of samples per unit.
///
/// Yields `start + i / frequency` for `i` in `0..=floor(frequency * (end - start))`.
/// Each value is computed from its index rather than accumulated, so the
/// last sample of an integer-width interval lands exactly on `end`.
pub struct SampledValues {
    start: f64,
    frequency: u32,
    index: usize,
    count: usize,
}
impl SampledValues {
    /// Creates a new iterator over `[start, end]` with `frequency` samples per unit.
    ///
    /// Fractional sample counts are truncated. An empty or inverted interval
    /// yields nothing; a count beyond `usize::MAX` saturates.
    #[must_use]
    pub fn new(start: f64, end: f64, frequency: u32) -> Self {
        let width = f64::from(frequency) * (end - start);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = if width.is_finite() && width >= 0.0 {
            (width.floor() as usize).saturating_add(1)
        } else {
            0
        };

        Self {
            start,
            frequency,
            index: 0,
            count,
        }
    }

    /// Returns the number of samples remaining in the iterator
    #[must_use]
    pub fn len(&self) -> usize {
        self.count - self.index
    }

    /// Returns true if the iterator is exhausted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl Iterator for SampledValues {
    type Item = f64;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.count {
            let value = self.index as f64 / f64::from(self.frequency) + self.start;
            self.index += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}
impl ExactSizeIterator for SampledValues {}
