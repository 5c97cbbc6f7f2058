//! Composite Newton-Cotes rules over equally spaced samples.
//!
//! Both rules take the ordinates `y[0..=n]` of a curve sampled with a constant step `h`
//! and return the area under it:
//! - trapezoidal: `h/2 * (y0 + yn + 2*sum(y1..y(n-1)))`, any `n >= 1`
//! - Simpson's first rule: `h/3 * (y0 + yn + 4*sum(odd) + 2*sum(even interior))`, `n` even
//!
//! Example
//! ```
//! use app_area::numerical::quadrature::{simpson, trapezoid};
//! let y = vec![0.0, 1.0, 4.0, 9.0, 16.0];
//! let s = simpson(&y, 1.0).unwrap();
//! assert!((s - 64.0 / 3.0).abs() < 1e-12);
//! let t = trapezoid(&y, 1.0).unwrap();
//! assert!((t - 22.0).abs() < 1e-12);
//! ```
use log::{debug, warn};
use std::fmt;
use strum_macros::{Display, EnumIter};

/// Error types for the composite rules
#[derive(Debug, Clone, PartialEq)]
pub enum QuadratureError {
    /// input violates a precondition of the rule (odd interval count for Simpson, ragged tables...)
    InvalidInput(String),
    TooFewPoints {
        rule: QuadMethod,
        required: usize,
        got: usize,
    },
    NonPositiveStep(f64),
}

impl fmt::Display for QuadratureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadratureError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            QuadratureError::TooFewPoints {
                rule,
                required,
                got,
            } => write!(
                f,
                "{} needs at least {} points, got {}",
                rule, required, got
            ),
            QuadratureError::NonPositiveStep(h) => {
                write!(f, "step must be a positive finite number, got {}", h)
            }
        }
    }
}

impl std::error::Error for QuadratureError {}

/// Available composite rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum QuadMethod {
    #[strum(to_string = "Trapezoidal rule")]
    Trapezoidal,
    #[strum(to_string = "Simpson's first rule")]
    Simpson,
}

impl QuadMethod {
    /// apply the rule to ordinates `y` sampled with step `h`
    pub fn integrate(&self, y: &[f64], h: f64) -> Result<f64, QuadratureError> {
        match self {
            QuadMethod::Trapezoidal => trapezoid(y, h),
            QuadMethod::Simpson => simpson(y, h),
        }
    }

    /// minimal number of points the rule accepts
    pub fn min_points(&self) -> usize {
        match self {
            QuadMethod::Trapezoidal => 2,
            QuadMethod::Simpson => 3,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            QuadMethod::Trapezoidal => "Trapezoidal",
            QuadMethod::Simpson => "Simpson",
        }
    }
}

fn check_step(h: f64) -> Result<(), QuadratureError> {
    if h.is_finite() && h > 0.0 {
        Ok(())
    } else {
        Err(QuadratureError::NonPositiveStep(h))
    }
}

fn check_len(rule: QuadMethod, y: &[f64]) -> Result<(), QuadratureError> {
    if y.len() < rule.min_points() {
        return Err(QuadratureError::TooFewPoints {
            rule,
            required: rule.min_points(),
            got: y.len(),
        });
    }
    Ok(())
}

/// Composite trapezoidal rule.
/// `y` - ordinates at equally spaced abscissas, `h` - the spacing
pub fn trapezoid(y: &[f64], h: f64) -> Result<f64, QuadratureError> {
    check_step(h)?;
    check_len(QuadMethod::Trapezoidal, y)?;
    let n = y.len() - 1;
    let interior: f64 = y[1..n].iter().sum();
    let sum = y[0] + y[n] + 2.0 * interior;
    debug!("trapezoid: n = {}, weighted sum = {}", n, sum);
    Ok(h / 2.0 * sum)
}

/// Composite Simpson's first (1/3) rule. The number of intervals `y.len() - 1` must be even,
/// an odd count is rejected with `QuadratureError::InvalidInput`.
pub fn simpson(y: &[f64], h: f64) -> Result<f64, QuadratureError> {
    check_step(h)?;
    // a single interval is an odd count too, only 0 or 1 points are too few
    if y.len() >= 2 && (y.len() - 1) % 2 != 0 {
        let n = y.len() - 1;
        warn!("Simpson's rule called with {} intervals", n);
        return Err(QuadratureError::InvalidInput(format!(
            "Simpson's rule requires an even number of intervals, got {}",
            n
        )));
    }
    check_len(QuadMethod::Simpson, y)?;
    let n = y.len() - 1;
    let mut sum = y[0] + y[n];
    for i in 1..n {
        if i % 2 == 0 {
            sum += 2.0 * y[i];
        } else {
            sum += 4.0 * y[i];
        }
    }
    debug!("simpson: n = {}, weighted sum = {}", n, sum);
    Ok(h / 3.0 * sum)
}
