//! Error types for polynomial regression and point maintenance
//!
//! This module defines the failure modes of fitting, sampling and editing
//! a curve, along with a convenient `Result` alias.

/// Errors that can occur while fitting or editing a curve.
///
/// Every error is local to the call that produced it. Functions that mutate
/// a point set validate first, so an error always leaves the caller's data
/// untouched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cannot perform curve fitting because there is no data.
    #[error("No data available for fitting")]
    NoData,

    /// The requested order needs more points than were supplied.
    ///
    /// A polynomial of order `n` has `n + 1` coefficients and needs at least
    /// as many points to be determined.
    #[error("Cannot fit a polynomial of order {order} through {points} points")]
    Underdetermined {
        /// Number of points supplied
        points: usize,
        /// Requested polynomial order
        order: usize,
    },

    /// The points do not span enough distinct x values for the requested order.
    ///
    /// Usually every point shares the same x coordinate.
    #[error("Only {distinct} distinct x values; not enough to determine a polynomial of order {order}")]
    DegenerateGeometry {
        /// Number of distinct x values in the data
        distinct: usize,
        /// Requested polynomial order
        order: usize,
    },

    /// An operation needs more points than the set contains.
    #[error("At least 2 points are required, got {0}")]
    NotEnoughPoints(usize),

    /// An input coordinate or bound was NaN or infinite.
    #[error("Input contains a non-finite value")]
    NonFinite,

    /// A `min..max` pair is not a valid, non-empty interval.
    #[error("Invalid bounds: {min} must be smaller than {max}")]
    InvalidBounds {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Sampling an interval would produce more curve samples than allowed.
    #[error("Sampling {min}..{max} needs more than {limit} curve samples")]
    TooManySamples {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
        /// Largest number of samples produced
        limit: usize,
    },

    /// A curve cannot hold the control points the requested order needs.
    #[error("Polynomial order {order} is too large for a curve; must be below {limit}")]
    OrderTooLarge {
        /// Requested polynomial order
        order: usize,
        /// Exclusive upper bound on the order
        limit: usize,
    },

    /// Random point generation was asked for fewer than 2 points.
    #[error("Cannot spread {0} points over an interval; at least 2 are required")]
    NotEnoughSamples(usize),

    /// A point or coefficient index does not exist.
    #[error("Index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Length of the indexed sequence
        len: usize,
    },

    /// Failed to solve the least-squares system.
    ///
    /// Contains a static string describing the solver error.
    #[error("Failed to solve: {0}")]
    Algebra(&'static str),

    /// A curve configuration could not be parsed.
    #[error("Invalid curve configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for polynomial regression and point maintenance
pub type Result<T> = std::result::Result<T, Error>;
