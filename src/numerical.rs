//! Numerical part: composite quadrature rules and the APP area computation built on them.
///  Example
/// ```
/// use app_area::numerical::app_survey::{ReferenceAreas, SampleSet};
/// use app_area::numerical::app_area::AppAreaAnalysis;
/// let analysis = AppAreaAnalysis::run(&SampleSet::survey(), &ReferenceAreas::default()).unwrap();
/// assert!((analysis.trapezoidal.net - 5779.1772).abs() < 1e-4);
/// ```
pub mod app_area;
/// survey stations and reference areas
pub mod app_survey;
/// settings, logging and postprocessing around the computation
pub mod app_task;
/// trapezoids and parabolas behind both rules, used for the charts
pub mod approximation_shapes;
/// composite trapezoidal and Simpson rules
pub mod quadrature;
