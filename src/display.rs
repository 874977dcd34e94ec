//! Utilities for displaying polynomial equations
//!
//! This module turns coefficient sequences (highest degree first) into the
//! human-readable strings shown next to a curve editor.
//!
//! # Key Concepts
//! - **[`Term`]**: a single polynomial term with a sign and body.
//! - **[`Sign`]**: tracks whether a term is positive or negative.
//!
//! # Helpers
//! - [`generate_polynomial_equation`]: renders `-6*x^2 + 3*x - 1`.
//! - [`generate_polynomial_term`]: renders the label that follows one
//!   coefficient in a coefficient editor (`" * x^2 + "`).

/// Name of the variable used by the equation helpers.
pub const VARIABLE: &str = "x";

/// Represents the sign of a polynomial term.
///
/// Used when formatting polynomial expressions to determine how a term
/// should be connected to the rest of the polynomial (e.g., with `+` or `-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// Zero (including `-0.0`) is positive.
    ///
    /// # Example
    /// ```
    /// # use polycurve::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    #[must_use]
    pub fn from_coef(coef: f64) -> Self {
        if coef < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(self) -> char {
        match self {
            Self::Positive => '+',
            Self::Negative => '-',
        }
    }
}

/// A single rendered polynomial term, without its sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Sign of the coefficient
    pub sign: Sign,

    /// Coefficient and variable part, e.g. `3*x^2` or `x`
    pub body: String,
}

impl Term {
    /// Creates a new term
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }

    /// Formats the term for the coefficient at `exponent`.
    ///
    /// Returns `None` for a zero coefficient. A coefficient of exactly `1`
    /// is omitted when a variable part follows.
    #[must_use]
    pub fn from_coef(coef: f64, exponent: usize) -> Option<Self> {
        if coef == 0.0 {
            return None;
        }

        let variable = match exponent {
            0 => String::new(),
            1 => VARIABLE.to_string(),
            _ => format!("{VARIABLE}^{exponent}"),
        };

        let magnitude = coef.abs();
        let body = match (magnitude == 1.0, variable.is_empty()) {
            (true, false) => variable,
            (_, true) => magnitude.to_string(),
            (false, false) => format!("{magnitude}*{variable}"),
        };

        Some(Self::new(Sign::from_coef(coef), body))
    }
}

/// Generates the polynomial equation for `coefficients`, highest degree first.
///
/// - Terms with a coefficient of exactly `0` are dropped.
/// - The first shown term has no leading `+`; a leading negative term is
///   written as `-` directly followed by the term.
/// - Later terms are joined with ` + ` or ` - `.
/// - An all-zero (or empty) coefficient list gives an empty string.
///
/// # Example
/// ```
/// # use polycurve::display::generate_polynomial_equation;
/// assert_eq!(generate_polynomial_equation(&[3.0, -2.0, 1.0]), "3*x^2 - 2*x + 1");
/// assert_eq!(generate_polynomial_equation(&[1.0, 0.0]), "x");
/// ```
#[must_use]
pub fn generate_polynomial_equation(coefficients: &[f64]) -> String {
    let degree = coefficients.len().saturating_sub(1);
    let mut output = String::new();

    for (i, &coef) in coefficients.iter().enumerate() {
        let Some(term) = Term::from_coef(coef, degree - i) else {
            continue;
        };

        match (output.is_empty(), term.sign) {
            (true, Sign::Positive) => {}
            (true, Sign::Negative) => output.push('-'),
            (false, sign) => {
                output.push(' ');
                output.push(sign.char());
                output.push(' ');
            }
        }
        output.push_str(&term.body);
    }

    output
}

/// Generates the label that follows coefficient `i` of `n` in a coefficient editor.
///
/// For `-7 * x^3 + 3 * x^2 + x + 5` the labels are `" * x^3 + "`,
/// `" * x^2 + "`, `" * x + "` and `""`.
///
/// # Example
/// ```
/// # use polycurve::display::generate_polynomial_term;
/// assert_eq!(generate_polynomial_term(3, 0, "y"), " * y^2 + ");
/// assert_eq!(generate_polynomial_term(3, 2, "y"), "");
/// ```
#[must_use]
pub fn generate_polynomial_term(n: usize, i: usize, variable: &str) -> String {
    let mut result = String::new();
    if i >= n {
        return result;
    }

    match n - i - 1 {
        0 => {}
        1 => result.push_str(&format!(" * {variable}")),
        exponent => result.push_str(&format!(" * {variable}^{exponent}")),
    }

    if i < n - 1 {
        result.push_str(" + ");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equation() {
        assert_eq!(generate_polynomial_equation(&[1.0]), "1");
        assert_eq!(generate_polynomial_equation(&[2.0]), "2");
        assert_eq!(generate_polynomial_equation(&[1.0, 0.0]), "x");
        assert_eq!(generate_polynomial_equation(&[1.0, 1.0]), "x + 1");
        assert_eq!(generate_polynomial_equation(&[2.0, -2.0]), "2*x - 2");
        assert_eq!(generate_polynomial_equation(&[1.0, 0.0, 0.0]), "x^2");
        assert_eq!(generate_polynomial_equation(&[2.0, 1.0, 0.0]), "2*x^2 + x");
        assert_eq!(
            generate_polynomial_equation(&[-6.0, 3.0, -1.0]),
            "-6*x^2 + 3*x - 1"
        );
    }

    #[test]
    fn test_equation_leading_zeros() {
        assert_eq!(generate_polynomial_equation(&[0.0, -1.0, 0.5]), "-x + 0.5");
        assert_eq!(generate_polynomial_equation(&[0.0, 0.0, -3.0]), "-3");
        assert_eq!(generate_polynomial_equation(&[0.0, -0.0]), "");
        assert_eq!(generate_polynomial_equation(&[]), "");
    }

    #[test]
    fn test_equation_decimals() {
        assert_eq!(
            generate_polynomial_equation(&[0.12, 7.5, 200.0]),
            "0.12*x^2 + 7.5*x + 200"
        );
        assert_eq!(generate_polynomial_equation(&[-1.0, 0.0, 0.0, 1.0]), "-x^3 + 1");
    }

    #[test]
    fn test_term() {
        assert_eq!(generate_polynomial_term(0, 0, "x"), "");
        assert_eq!(generate_polynomial_term(1, 0, "x"), "");
        assert_eq!(generate_polynomial_term(2, 0, "x"), " * x + ");
        assert_eq!(generate_polynomial_term(2, 1, "x"), "");
        assert_eq!(generate_polynomial_term(3, 0, "y"), " * y^2 + ");
        assert_eq!(generate_polynomial_term(3, 1, "y"), " * y + ");
        assert_eq!(generate_polynomial_term(3, 2, "y"), "");
    }

    #[test]
    fn test_sign() {
        assert_eq!(Sign::from_coef(-0.0), Sign::Positive);
        assert_eq!(Sign::Negative.char(), '-');
        assert_eq!(Term::from_coef(0.0, 3), None);
        assert_eq!(Term::from_coef(-1.0, 0).map(|t| t.body), Some("1".to_string()));
    }
}
