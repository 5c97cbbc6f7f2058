//! Net APP area by both composite rules and its comparison with the reference areas.
use crate::numerical::app_survey::{ReferenceAreas, SampleSet};
use crate::numerical::quadrature::{QuadMethod, QuadratureError};
use log::info;

/// Area breakdown obtained with one rule
#[derive(Debug, Clone, PartialEq)]
pub struct MethodArea {
    pub method: QuadMethod,
    /// integral under the upper margin
    pub upper: f64,
    /// integral under the lower margin
    pub lower: f64,
    pub gross: f64,
    /// gross area minus the street
    pub net: f64,
}

impl MethodArea {
    pub fn compute(
        method: QuadMethod,
        samples: &SampleSet,
        street: f64,
    ) -> Result<MethodArea, QuadratureError> {
        let upper = method.integrate(samples.y_upper.as_slice(), samples.h)?;
        let lower = method.integrate(samples.y_lower.as_slice(), samples.h)?;
        let gross = upper + lower;
        let net = gross - street;
        info!(
            "{}: upper = {:.4}, lower = {:.4}, gross = {:.4}, net = {:.4}",
            method, upper, lower, gross, net
        );
        Ok(MethodArea {
            method,
            upper,
            lower,
            gross,
            net,
        })
    }

    /// share of the block taken by the APP, %
    pub fn block_share(&self, block: f64) -> f64 {
        self.net / block * 100.0
    }
}

/// Deviation of an area from the CAD measurement
#[derive(Debug, Clone, PartialEq)]
pub struct Deviation {
    pub label: String,
    pub area: f64,
    /// area - cad
    pub signed: f64,
    pub absolute: f64,
    /// absolute error relative to the CAD area, %
    pub relative_percent: f64,
}

impl Deviation {
    pub fn new(label: &str, area: f64, cad: f64) -> Deviation {
        let signed = area - cad;
        Deviation {
            label: label.to_string(),
            area,
            signed,
            absolute: signed.abs(),
            relative_percent: signed.abs() / cad * 100.0,
        }
    }
}

/// Result of the whole analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AppAreaAnalysis {
    pub references: ReferenceAreas,
    pub trapezoidal: MethodArea,
    pub simpson: MethodArea,
    /// published trapezoidal, ours trapezoidal, published Simpson, ours Simpson
    pub deviations: Vec<Deviation>,
}

impl AppAreaAnalysis {
    pub fn run(
        samples: &SampleSet,
        references: &ReferenceAreas,
    ) -> Result<AppAreaAnalysis, QuadratureError> {
        samples.log_summary();
        let trapezoidal = MethodArea::compute(QuadMethod::Trapezoidal, samples, references.street)?;
        let simpson = MethodArea::compute(QuadMethod::Simpson, samples, references.street)?;
        let cad = references.cad;
        let deviations = vec![
            Deviation::new("Trapezoidal (published)", references.published_trapezoidal, cad),
            Deviation::new("Trapezoidal (computed)", trapezoidal.net, cad),
            Deviation::new("Simpson (published)", references.published_simpson, cad),
            Deviation::new("Simpson (computed)", simpson.net, cad),
        ];
        for d in &deviations {
            info!(
                "{}: |error| = {:.4} m² ({:.3}%)",
                d.label, d.absolute, d.relative_percent
            );
        }
        Ok(AppAreaAnalysis {
            references: references.clone(),
            trapezoidal,
            simpson,
            deviations,
        })
    }

    pub fn method(&self, method: QuadMethod) -> &MethodArea {
        match method {
            QuadMethod::Trapezoidal => &self.trapezoidal,
            QuadMethod::Simpson => &self.simpson,
        }
    }

    /// deviation of our result for `method` from the CAD area
    pub fn error(&self, method: QuadMethod) -> &Deviation {
        match method {
            QuadMethod::Trapezoidal => &self.deviations[1],
            QuadMethod::Simpson => &self.deviations[3],
        }
    }

    pub fn block_share(&self, method: QuadMethod) -> f64 {
        self.method(method).block_share(self.references.block)
    }

    /// rule whose net area is closest to the CAD measurement
    pub fn closest_method(&self) -> QuadMethod {
        if self.error(QuadMethod::Trapezoidal).absolute <= self.error(QuadMethod::Simpson).absolute
        {
            QuadMethod::Trapezoidal
        } else {
            QuadMethod::Simpson
        }
    }
}
