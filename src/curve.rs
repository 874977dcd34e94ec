//! The fitted state behind a curve editor.
//!
//! A [`Curve`] packages the control flow an editor runs on every edit: keep
//! the control points consistent with the order, refit the polynomial and
//! resample the drawn curve. It is created from a declarative
//! [`CurveConfig`], typically loaded from JSON:
//!
//! ```rust
//! # use polycurve::curve::{Curve, CurveConfig, PrecisionSettings};
//! let config = CurveConfig::from_json(r#"{ "coefficients": [0.12, 7.5, 200.0] }"#).unwrap();
//! let curve = Curve::generate(&config, PrecisionSettings::default(), None).unwrap();
//!
//! assert_eq!(curve.polynomial_order, 2);
//! assert_eq!(curve.coefficients, vec![0.12, 7.5, 200.0]);
//! assert_eq!(curve.r2, 1.0);
//! ```
//!
//! Every edit works on a copy of the points and only commits when the refit
//! succeeds, so a failed edit leaves the curve as it was.
use tracing::debug;

use crate::{
    error::{Error, Result},
    fit::{generate_curve_points, polynomial_regression, sample_curve, MAX_CURVE_SAMPLES},
    points::{add_point, generate_random_points_seeded, remove_point, sort_points_by_x_in_place},
    polynomial::polynomial_value,
    value::{check_bounds, round, Point},
};

/// Default order of a curve when neither points, order nor coefficients are configured.
pub const DEFAULT_ORDER: usize = 3;

/// A labelled axis with its visible bounds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Axis {
    /// Axis label
    pub label: String,

    /// Lower visible bound
    pub min: f64,

    /// Upper visible bound
    pub max: f64,
}
impl Axis {
    fn new(label: &str, min: f64, max: f64) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
        }
    }

    fn default_x() -> Self {
        Self::new("x Values", -5.0, 10.0)
    }

    fn default_y() -> Self {
        Self::new("y Values", -5.0, 10.0)
    }
}

/// Decimal places kept for fitted coefficients and for control points.
///
/// The two knobs are independent. A fit only reproduces caller-supplied
/// coefficients exactly if they are expressible in `coefficient_precision`
/// decimals; points rounded to a coarser `points_precision` than the
/// coefficients can make a refit drift from the coefficients a user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PrecisionSettings {
    /// Decimal places of fitted coefficients
    pub coefficient_precision: i32,

    /// Decimal places of control points
    pub points_precision: i32,
}
impl Default for PrecisionSettings {
    fn default() -> Self {
        Self {
            coefficient_precision: 5,
            points_precision: 5,
        }
    }
}

/// Declarative description of a curve.
///
/// Every field is optional. The order is taken from, in priority:
/// 1. `points` (`len - 1`),
/// 2. `polynomial_order`,
/// 3. `coefficients` (`len - 1`),
/// 4. [`DEFAULT_ORDER`].
///
/// Without `points`, random points are spread over the axes. With
/// `coefficients`, each point's y is replaced by the polynomial's value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CurveConfig {
    /// Name of the curve
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Horizontal axis
    pub x_axis: Axis,

    /// Vertical axis
    pub y_axis: Axis,

    /// Initial control points
    pub points: Option<Vec<Point>>,

    /// Polynomial order
    pub polynomial_order: Option<usize>,

    /// Polynomial coefficients, highest degree first
    pub coefficients: Option<Vec<f64>>,

    /// Seed for random point generation; entropy if absent
    pub seed: Option<u64>,
}
impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            name: "Random Polynomial".to_string(),
            description: "This is some random polynomial.".to_string(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            points: None,
            polynomial_order: None,
            coefficients: None,
            seed: None,
        }
    }
}
impl CurveConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves the polynomial order of the configured curve.
    #[must_use]
    pub fn order(&self) -> usize {
        if let Some(points) = &self.points {
            points.len().saturating_sub(1)
        } else if let Some(order) = self.polynomial_order {
            order
        } else if let Some(coefficients) = &self.coefficients {
            coefficients.len().saturating_sub(1)
        } else {
            DEFAULT_ORDER
        }
    }
}

/// Which coordinate of a point an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coordinate {
    /// The x coordinate (index 0)
    X,

    /// The y coordinate (index 1)
    Y,
}
impl Coordinate {
    fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }
}

/// A fitted curve with its control points and drawn samples.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curve {
    /// Name of the curve
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Horizontal axis
    pub x_axis: Axis,

    /// Vertical axis
    pub y_axis: Axis,

    /// Control points, `polynomial_order + 1` of them
    pub points: Vec<Point>,

    /// Order of the fitted polynomial
    pub polynomial_order: usize,

    /// Samples of the fitted curve across the x axis
    pub curve_points: Vec<Point>,

    /// Fitted coefficients, highest degree first
    pub coefficients: Vec<f64>,

    /// Display string of the fit, `y = ...`
    pub equation: String,

    /// Coefficient of determination of the fit
    pub r2: f64,

    /// Precision settings used for every refit
    pub precision: PrecisionSettings,
}
impl Curve {
    /// Builds and fits a curve from its configuration.
    ///
    /// `seed` overrides [`CurveConfig::seed`] for random point generation.
    ///
    /// # Errors
    /// - [`Error::OrderTooLarge`] if the order is not below [`MAX_CURVE_SAMPLES`].
    /// - [`Error::NotEnoughSamples`] if random points are needed for an order below 1.
    /// - Any bounds error for the axes.
    /// - Any error of [`polynomial_regression`] or [`generate_curve_points`].
    pub fn generate(
        config: &CurveConfig,
        precision: PrecisionSettings,
        seed: Option<u64>,
    ) -> Result<Self> {
        let order = check_order(config.order())?;
        check_bounds(config.x_axis.min, config.x_axis.max)?;

        let mut points = match &config.points {
            Some(points) => points.clone(),
            None => generate_random_points_seeded(
                seed.or(config.seed),
                order + 1,
                precision.points_precision,
                config.x_axis.min,
                config.x_axis.max,
                config.y_axis.min,
                config.y_axis.max,
            )?,
        };

        if let Some(coefficients) = &config.coefficients {
            for point in &mut points {
                point[1] = polynomial_value(point[0], coefficients);
            }
        }

        let mut curve = Self {
            name: config.name.clone(),
            description: config.description.clone(),
            x_axis: config.x_axis.clone(),
            y_axis: config.y_axis.clone(),
            points: Vec::new(),
            polynomial_order: order,
            curve_points: Vec::new(),
            coefficients: Vec::new(),
            equation: String::new(),
            r2: 0.0,
            precision,
        };
        curve.update_points(points, order)?;

        debug!(name = %curve.name, order, "generated curve {}", curve.equation);
        Ok(curve)
    }

    /// Refits and resamples for `points` at `order`, committing only on success.
    fn update_points(&mut self, points: Vec<Point>, order: usize) -> Result<()> {
        let regression =
            polynomial_regression(&points, order, self.precision.coefficient_precision)?;
        let curve_points = sample_curve(&regression, self.x_axis.min, self.x_axis.max)?;

        self.points = points;
        self.polynomial_order = order;
        self.curve_points = curve_points;
        self.coefficients = regression.coefficients;
        self.equation = regression.string;
        self.r2 = regression.r2;
        Ok(())
    }

    /// Changes the polynomial order, inserting or removing control points to match.
    ///
    /// Points are added with [`add_point`] and removed with [`remove_point`]
    /// until there are `order + 1` of them, then sorted by x and refitted.
    ///
    /// # Errors
    /// - [`Error::OrderTooLarge`] if `order` is not below [`MAX_CURVE_SAMPLES`].
    /// - Any error of [`add_point`] or the refit; the curve is then unchanged.
    pub fn set_order(&mut self, order: usize) -> Result<()> {
        let order = check_order(order)?;
        let mut points = self.points.clone();
        while points.len() < order + 1 {
            add_point(
                &mut points,
                self.precision.coefficient_precision,
                self.precision.points_precision,
            )?;
        }
        while points.len() > order + 1 {
            if remove_point(&mut points).is_none() {
                break;
            }
        }

        sort_points_by_x_in_place(&mut points);
        debug!(from = self.polynomial_order, to = order, "changed curve order");
        self.update_points(points, order)
    }

    /// Replaces coefficient `index` and moves every control point onto the new polynomial.
    ///
    /// The new y values are rounded to the points precision before refitting.
    ///
    /// # Errors
    /// - [`Error::IndexOutOfRange`] if there is no coefficient `index`.
    /// - [`Error::NonFinite`] if `value` is not finite.
    /// - Any error of the refit; the curve is then unchanged.
    pub fn set_coefficient(&mut self, index: usize, value: f64) -> Result<()> {
        if index >= self.coefficients.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.coefficients.len(),
            });
        } else if !value.is_finite() {
            return Err(Error::NonFinite);
        }

        let mut coefficients = self.coefficients.clone();
        coefficients[index] = value;

        let points = self
            .points
            .iter()
            .map(|&[x, _]| {
                [
                    x,
                    round(
                        polynomial_value(x, &coefficients),
                        self.precision.points_precision,
                    ),
                ]
            })
            .collect();

        self.update_points(points, self.polynomial_order)
    }

    /// Sets one coordinate of control point `index` and refits.
    ///
    /// This is a form edit: the value is taken as typed and the points are
    /// not re-sorted.
    ///
    /// # Errors
    /// - [`Error::IndexOutOfRange`] if there is no point `index`.
    /// - [`Error::NonFinite`] if `value` is not finite.
    /// - Any error of the refit; the curve is then unchanged.
    pub fn set_point_coordinate(
        &mut self,
        index: usize,
        coordinate: Coordinate,
        value: f64,
    ) -> Result<()> {
        let mut points = self.points.clone();
        let len = points.len();
        let point = points
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        if !value.is_finite() {
            return Err(Error::NonFinite);
        }

        point[coordinate.index()] = value;
        self.update_points(points, self.polynomial_order)
    }

    /// Moves control point `index` to `(x, y)`, as at the end of a drag.
    ///
    /// The position is rounded to the points precision, the curve is refitted
    /// and the points are re-sorted so they keep describing a function.
    ///
    /// # Errors
    /// - [`Error::IndexOutOfRange`] if there is no point `index`.
    /// - [`Error::NonFinite`] if a coordinate is not finite.
    /// - Any error of the refit; the curve is then unchanged.
    pub fn drag_point(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        let mut points = self.points.clone();
        let len = points.len();
        let point = points
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::NonFinite);
        }

        let precision = self.precision.points_precision;
        *point = [round(x, precision), round(y, precision)];

        sort_points_by_x_in_place(&mut points);
        self.update_points(points, self.polynomial_order)
    }

    /// Changes the visible x bounds and resamples the curve.
    ///
    /// The control points and the fit are unchanged.
    ///
    /// # Errors
    /// - [`Error::NonFinite`] or [`Error::InvalidBounds`] for an invalid interval.
    /// - [`Error::TooManySamples`] if the interval is too wide to sample.
    pub fn set_x_bounds(&mut self, min: f64, max: f64) -> Result<()> {
        self.curve_points = generate_curve_points(
            &self.points,
            self.polynomial_order,
            min,
            max,
            self.precision.coefficient_precision,
        )?;
        self.x_axis.min = min;
        self.x_axis.max = max;
        Ok(())
    }
}

/// A curve never holds more control points than drawn samples.
fn check_order(order: usize) -> Result<usize> {
    if order < MAX_CURVE_SAMPLES {
        Ok(order)
    } else {
        Err(Error::OrderTooLarge {
            order,
            limit: MAX_CURVE_SAMPLES,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close, value::PointExt};

    fn from_coefficients(coefficients: &[f64]) -> Curve {
        let config = CurveConfig {
            coefficients: Some(coefficients.to_vec()),
            ..CurveConfig::default()
        };
        Curve::generate(&config, PrecisionSettings::default(), Some(0)).unwrap()
    }

    #[test]
    fn test_coefficients_round_trip() {
        for coefficients in [
            [0.12, 7.5, 200.0],
            [0.1, -6.75, 162.5],
            [0.22, -4.0, 32.0],
        ] {
            let curve = from_coefficients(&coefficients);
            assert_eq!(curve.coefficients, coefficients.to_vec());
            assert_eq!(curve.polynomial_order, 2);
            assert_eq!(curve.r2, 1.0);
        }
    }

    #[test]
    fn test_coefficients_beyond_precision() {
        // Needs 6 decimal places, coefficients keep 5
        let coefficients = [0.080808, 2.0, -8.080808];
        let curve = from_coefficients(&coefficients);
        assert_ne!(curve.coefficients, coefficients.to_vec());
        assert_all_close!(curve.coefficients, coefficients, tol = 1e-5);
    }

    #[test]
    fn test_default_curve() {
        let curve = Curve::generate(&CurveConfig::default(), PrecisionSettings::default(), Some(9))
            .unwrap();
        assert_eq!(curve.polynomial_order, DEFAULT_ORDER);
        assert_eq!(curve.points.len(), DEFAULT_ORDER + 1);
        assert_eq!(curve.points.x(), vec![-5.0, 0.0, 5.0, 10.0]);
        assert_eq!(curve.curve_points.len(), 7 * 15 + 1);
        assert_eq!(curve.coefficients.len(), DEFAULT_ORDER + 1);
    }

    #[test]
    fn test_order_priority() {
        let config = CurveConfig {
            points: Some(vec![[0.0, 1.0], [1.0, 2.0]]),
            polynomial_order: Some(4),
            ..CurveConfig::default()
        };
        assert_eq!(config.order(), 1);

        let config = CurveConfig {
            polynomial_order: Some(4),
            coefficients: Some(vec![1.0, 2.0]),
            ..CurveConfig::default()
        };
        assert_eq!(config.order(), 4);
    }

    #[test]
    fn test_config_from_json() {
        let config = CurveConfig::from_json(
            r#"{
                "name": "Churn",
                "xAxis": { "label": "t", "min": 0, "max": 20 },
                "polynomialOrder": 2,
                "seed": 11
            }"#,
        )
        .unwrap();
        assert_eq!(config.name, "Churn");
        assert_eq!(config.x_axis.max, 20.0);
        assert_eq!(config.y_axis, Axis::default_y());
        assert_eq!(config.order(), 2);

        let a = Curve::generate(&config, PrecisionSettings::default(), None).unwrap();
        let b = Curve::generate(&config, PrecisionSettings::default(), None).unwrap();
        assert_eq!(a, b);

        assert!(matches!(
            CurveConfig::from_json("{ \"xAxis\": 3 }"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_set_order() {
        let mut curve = from_coefficients(&[1.0, 0.0, 0.0]);
        curve.set_order(4).unwrap();
        assert_eq!(curve.points.len(), 5);
        assert!(curve.points.is_sorted_by_x());

        // Points were inserted on the parabola, so the fit keeps its shape
        assert_all_close!(curve.coefficients, [0.0, 0.0, 1.0, 0.0, 0.0], tol = 1e-4);

        curve.set_order(1).unwrap();
        assert_eq!(curve.points.len(), 2);
        assert_eq!(curve.polynomial_order, 1);
        assert_eq!(curve.points.x(), vec![-5.0, 10.0]);
    }

    #[test]
    fn test_set_order_failure_keeps_curve() {
        let config = CurveConfig {
            points: Some(vec![[1.0, 1.0]]),
            ..CurveConfig::default()
        };
        let mut curve = Curve::generate(&config, PrecisionSettings::default(), None).unwrap();
        let before = curve.clone();
        assert!(matches!(curve.set_order(2), Err(Error::NotEnoughPoints(1))));
        assert_eq!(curve, before);

        assert!(matches!(
            curve.set_order(usize::MAX),
            Err(Error::OrderTooLarge { order: usize::MAX, .. })
        ));
        assert_eq!(curve, before);
    }

    #[test]
    fn test_generate_order_too_large() {
        let config = CurveConfig {
            polynomial_order: Some(usize::MAX),
            ..CurveConfig::default()
        };
        assert!(matches!(
            Curve::generate(&config, PrecisionSettings::default(), Some(0)),
            Err(Error::OrderTooLarge { .. })
        ));
    }

    #[test]
    fn test_wide_axis_keeps_shape() {
        let config = CurveConfig {
            x_axis: Axis::new("t", 0.0, 300.0),
            polynomial_order: Some(4),
            ..CurveConfig::default()
        };
        // Coefficients of x^4 over [0, 300] are far below 5 decimal places
        let precision = PrecisionSettings {
            coefficient_precision: 300,
            points_precision: 5,
        };
        let mut curve = Curve::generate(&config, precision, Some(5)).unwrap();
        assert_eq!(curve.points.x(), vec![0.0, 75.0, 150.0, 225.0, 300.0]);
        assert_close!(curve.r2, 1.0, tol = 1e-9);

        // Interpolating fit over a wide span still passes through every point
        curve.set_order(6).unwrap();
        assert_eq!(curve.points.len(), 7);
        assert_close!(curve.r2, 1.0, tol = 1e-9);
        for [x, y] in &curve.points {
            assert_close!(polynomial_value(*x, &curve.coefficients), *y, tol = 1e-6);
        }
    }

    #[test]
    fn test_set_coefficient() {
        let mut curve = from_coefficients(&[1.0, 0.0, 0.0]);
        curve.set_coefficient(2, 3.0).unwrap();
        assert_eq!(curve.coefficients, vec![1.0, 0.0, 3.0]);
        assert_eq!(curve.equation, "y = x^2 + 3");
        for [x, y] in &curve.points {
            assert_close!(*y, x * x + 3.0);
        }

        assert!(matches!(
            curve.set_coefficient(3, 1.0),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_set_point_coordinate() {
        let mut curve = from_coefficients(&[1.0, 0.0]);
        curve.set_point_coordinate(1, Coordinate::Y, 25.0).unwrap();
        assert_eq!(curve.points, vec![[-5.0, -5.0], [10.0, 25.0]]);
        assert_all_close!(curve.coefficients, [2.0, 5.0], tol = 1e-9);

        // Duplicate x cannot be fitted; nothing changes
        let before = curve.clone();
        assert!(matches!(
            curve.set_point_coordinate(0, Coordinate::X, 10.0),
            Err(Error::DegenerateGeometry { .. })
        ));
        assert!(matches!(
            curve.set_point_coordinate(2, Coordinate::X, 0.0),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(curve, before);
    }

    #[test]
    fn test_drag_point() {
        let config = CurveConfig {
            points: Some(vec![[0.0, 0.0], [5.0, 5.0], [10.0, 10.0]]),
            ..CurveConfig::default()
        };
        let mut curve = Curve::generate(&config, PrecisionSettings::default(), None).unwrap();
        curve.drag_point(0, 7.123456, 7.0).unwrap();
        assert_eq!(curve.points, vec![[5.0, 5.0], [7.12346, 7.0], [10.0, 10.0]]);
        assert!(curve.points.is_sorted_by_x());
    }

    #[test]
    fn test_set_x_bounds() {
        let mut curve = from_coefficients(&[1.0, 0.0]);
        curve.set_x_bounds(0.0, 1.0).unwrap();
        assert_eq!(curve.curve_points.len(), 8);
        assert_eq!(curve.x_axis.min, 0.0);
        assert!(curve.set_x_bounds(1.0, 0.0).is_err());
        assert_eq!(curve.x_axis.max, 1.0);

        let before = curve.clone();
        assert!(matches!(
            curve.set_x_bounds(0.0, 1e300),
            Err(Error::TooManySamples { .. })
        ));
        assert!(matches!(
            curve.set_x_bounds(-1e308, 1e308),
            Err(Error::InvalidBounds { .. })
        ));
        assert_eq!(curve, before);
    }
}
