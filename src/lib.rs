//! # Polycurve
//! ## Least-squares polynomials for interactive curve editors
//!
//! This crate is the numeric core behind a curve editor: a user drags a handful
//! of control points around, and the editor draws the polynomial that best fits
//! them along with its equation and goodness of fit.
//!
//! I provide a set of tools designed to help you:
//! - Fit a polynomial of a given order through a set of points
//! - Sample the fitted curve across a visible range for drawing
//! - Keep the control points consistent with the order as it changes
//! - Write easy to understand tests for fitted values
//!
//! The simplest use-case is to fit a curve through some points:
//! ```rust
//! # use polycurve::{polynomial_regression, generate_curve_points};
//! let points = [[0.0, 0.0], [5.0, 8.0], [10.0, 2.0]];
//!
//! let fit = polynomial_regression(&points, 2, 5).unwrap();
//! assert_eq!(fit.string, "y = -0.28*x^2 + 3*x");
//!
//! // 7 samples per unit, ready to draw
//! let samples = generate_curve_points(&points, 2, 0.0, 10.0, 5).unwrap();
//! assert_eq!(samples.len(), 71);
//! ```
//!
//! # Core Concepts
//! - A [`value::Point`] is an `[x, y]` pair. Point sets are plain slices and `Vec`s.
//! - A [`Regression`] is the result of a least-squares fit.
//!     - Coefficients are ordered highest degree first, and rounded to the requested precision.
//!     - It keeps no reference to the points it was fitted on.
//! - A [`Polynomial`] is a function returning a value `y` for a given input `x`.
//! - The **order** of a polynomial is the highest power of `x` in it.
//!     - A fit of order `n` needs at least `n + 1` points with distinct x values.
//!     - With exactly `n + 1` points the fit interpolates them.
//! - A [`curve::Curve`] bundles the points, the fit and the drawn samples, and
//!   implements the edits of a curve editor. See [`curve`].
//! - The [`points`] module maintains point sets: random generation, sorting,
//!   inserting and removing control points.
//!
//! # Implementation Details
//!
//! Fits are solved with the singular value decomposition from `nalgebra`, on x
//! values mapped onto `[-1, 1]` so that wide or offset x ranges stay well
//! conditioned. Fits and edits are traced with
//! `tracing`; install a subscriber to see them.
//!
//! # Testing utilities
//!
//! This crate includes a set of assertion macros for comparing floating-point
//! results within a tolerance. See [`test`].
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::too_many_arguments)]
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar


pub mod curve;
pub mod display;
pub mod error;
pub mod points;
pub mod statistics;
pub mod value;

mod fit;
mod polynomial;

pub use fit::*;
pub use polynomial::{polynomial_value, Polynomial};

pub use nalgebra;
