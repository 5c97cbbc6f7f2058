//! Measured margins of the permanent preservation area (APP) and the fixed reference areas
//! it is compared against.
use crate::numerical::quadrature::QuadratureError;
use log::info;
use nalgebra::DVector;

/// spacing of the survey stations along the watercourse, m
pub const STEP: f64 = 7.05;

/// ordinates of the upper APP margin at x = i*STEP, m
pub const Y_UPPER: [f64; 21] = [
    0.0, 11.75, 23.5, 32.04, 32.64, 32.23, 34.07, 34.81, 36.95, 39.56, 41.17, 38.1, 33.86, 29.62,
    25.39, 21.15, 16.93, 12.69, 8.46, 4.23, 0.0,
];

/// ordinates of the lower APP margin at x = i*STEP, m
pub const Y_LOWER: [f64; 21] = [
    0.0, 4.24, 8.49, 12.73, 16.97, 21.22, 25.46, 27.19, 22.5, 24.9, 23.72, 21.55, 18.35, 18.04,
    18.13, 18.23, 17.12, 14.97, 10.57, 5.28, 0.0,
];

/// relative tolerance for the uniform spacing check
const SPACING_RTOL: f64 = 1e-9;

/// Survey stations: abscissas with the upper and lower margin ordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    pub h: f64,
    pub x: DVector<f64>,
    pub y_upper: DVector<f64>,
    pub y_lower: DVector<f64>,
}

impl SampleSet {
    /// Build a sample set, checking that the three tables have the same length (at least 3),
    /// the step is positive and the abscissas grow by exactly `h`.
    pub fn new(
        h: f64,
        x: Vec<f64>,
        y_upper: Vec<f64>,
        y_lower: Vec<f64>,
    ) -> Result<SampleSet, QuadratureError> {
        if !(h.is_finite() && h > 0.0) {
            return Err(QuadratureError::NonPositiveStep(h));
        }
        if x.len() != y_upper.len() || x.len() != y_lower.len() {
            return Err(QuadratureError::InvalidInput(format!(
                "tables must have the same length: x {}, upper {}, lower {}",
                x.len(),
                y_upper.len(),
                y_lower.len()
            )));
        }
        if x.len() < 3 {
            return Err(QuadratureError::InvalidInput(format!(
                "at least 3 stations are needed, got {}",
                x.len()
            )));
        }
        for (i, pair) in x.windows(2).enumerate() {
            let dx = pair[1] - pair[0];
            if (dx - h).abs() > SPACING_RTOL * h.max(pair[1].abs()) {
                return Err(QuadratureError::InvalidInput(format!(
                    "stations {} and {} are {} apart, expected step {}",
                    i,
                    i + 1,
                    dx,
                    h
                )));
            }
        }
        Ok(SampleSet {
            h,
            x: DVector::from_vec(x),
            y_upper: DVector::from_vec(y_upper),
            y_lower: DVector::from_vec(y_lower),
        })
    }

    /// abscissas are generated as x_i = x0 + i*h
    pub fn from_ordinates(
        x0: f64,
        h: f64,
        y_upper: Vec<f64>,
        y_lower: Vec<f64>,
    ) -> Result<SampleSet, QuadratureError> {
        let x = (0..y_upper.len()).map(|i| x0 + i as f64 * h).collect();
        SampleSet::new(h, x, y_upper, y_lower)
    }

    /// the 21 stations measured along the watercourse
    pub fn survey() -> SampleSet {
        let x: Vec<f64> = (0..Y_UPPER.len()).map(|i| i as f64 * STEP).collect();
        // the embedded tables are consistent by construction
        SampleSet {
            h: STEP,
            x: DVector::from_vec(x),
            y_upper: DVector::from_row_slice(&Y_UPPER),
            y_lower: DVector::from_row_slice(&Y_LOWER),
        }
    }

    /// number of stations, at least 3 by construction
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn intervals(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Simpson's rule is applicable only for an even number of intervals
    pub fn simpson_applicable(&self) -> bool {
        self.len() >= 3 && self.intervals() % 2 == 0
    }

    pub fn length(&self) -> f64 {
        self.x[self.len() - 1] - self.x[0]
    }

    pub fn max_upper(&self) -> f64 {
        self.y_upper.max()
    }

    pub fn max_lower(&self) -> f64 {
        self.y_lower.max()
    }

    pub fn log_summary(&self) {
        info!(
            "survey: {} stations, step {} m, length {} m, Simpson applicable: {}",
            self.len(),
            self.h,
            self.length(),
            self.simpson_applicable()
        );
    }
}

/// Areas taken from the published study and the CAD drawing, m²
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceAreas {
    /// street cutting through the block, excluded from the APP
    pub street: f64,
    /// whole block
    pub block: f64,
    /// area measured on the CAD drawing, used as the exact value
    pub cad: f64,
    /// trapezoidal result published in the study
    pub published_trapezoidal: f64,
    /// Simpson result published in the study
    pub published_simpson: f64,
    /// APP share of the block reported in the study, %
    pub published_share: f64,
}

impl Default for ReferenceAreas {
    fn default() -> Self {
        ReferenceAreas {
            street: 134.4333,
            block: 10954.83,
            cad: 5777.0648,
            published_trapezoidal: 5779.1772,
            published_simpson: 5803.2647,
            published_share: 52.75,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_survey_invariants() {
        let s = SampleSet::survey();
        assert_eq!(s.len(), 21);
        assert_eq!(s.intervals(), 20);
        assert!(s.simpson_applicable());
        assert_relative_eq!(s.length(), 141.0, epsilon = 1e-9);
        assert_relative_eq!(s.max_upper(), 41.17, epsilon = 1e-12);
        assert_relative_eq!(s.max_lower(), 27.19, epsilon = 1e-12);
        for i in 1..s.len() {
            assert_relative_eq!(s.x[i] - s.x[i - 1], STEP, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_survey_passes_validation() {
        let s = SampleSet::survey();
        let checked = SampleSet::new(
            s.h,
            s.x.iter().copied().collect(),
            Y_UPPER.to_vec(),
            Y_LOWER.to_vec(),
        )
        .unwrap();
        assert_eq!(checked, s);
    }

    #[test]
    fn test_ragged_tables_rejected() {
        let res = SampleSet::new(1.0, vec![0.0, 1.0, 2.0], vec![1.0, 2.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(res, Err(QuadratureError::InvalidInput(_))));
    }

    #[test]
    fn test_irregular_spacing_rejected() {
        let res = SampleSet::new(
            1.0,
            vec![0.0, 1.0, 2.5],
            vec![1.0, 2.0, 3.0],
            vec![1.0, 2.0, 3.0],
        );
        match res {
            Err(QuadratureError::InvalidInput(msg)) => assert!(msg.contains("stations 1 and 2")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_too_short_and_bad_step() {
        assert!(SampleSet::from_ordinates(0.0, 1.0, vec![1.0, 2.0], vec![1.0, 2.0]).is_err());
        assert_eq!(
            SampleSet::from_ordinates(0.0, 0.0, vec![1.0; 3], vec![1.0; 3]),
            Err(QuadratureError::NonPositiveStep(0.0))
        );
    }

    #[test]
    fn test_even_point_count_flags_simpson() {
        let s = SampleSet::from_ordinates(0.0, 1.0, vec![1.0; 4], vec![0.5; 4]).unwrap();
        assert_eq!(s.intervals(), 3);
        assert!(!s.simpson_applicable());
    }
}
