//! # APP area task
//!
//! Bundles the survey, the reference areas and the run settings, computes the APP area with
//! both rules and does the postprocessing (console report, charts, csv files).
//!
//! Settings can be given as a task document:
//! ```text
//! settings
//!   loglevel: info
//!   plots: true
//!   save_csv: false
//!   output_dir: app_output
//! ```
//! Every key is optional, missing ones keep their current value.
use crate::Utils::logger::{
    init_term_logger, parse_loglevel, save_results_to_csv, save_samples_to_csv,
};
use crate::Utils::plots::plot_analysis;
use crate::Utils::report::print_report;
use crate::Utils::task_parser::{parse_task_document, single_value};
use crate::numerical::app_area::AppAreaAnalysis;
use crate::numerical::app_survey::{ReferenceAreas, SampleSet};
use crate::numerical::quadrature::QuadratureError;
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

/// task document used when nothing else is given
pub const DEFAULT_TASK: &str = "
settings
  loglevel: info
  plots: true
  save_csv: false
  output_dir: app_output
";

pub const SETTINGS_SECTION: &str = "settings";

pub struct AppTask {
    pub samples: SampleSet,
    pub references: ReferenceAreas,
    pub loglevel: Option<String>,
    /// render charts into output_dir
    pub plots: bool,
    /// save stations and results as csv into output_dir
    pub save_csv: bool,
    pub output_dir: PathBuf,
    result: Option<AppAreaAnalysis>,
}

impl Default for AppTask {
    fn default() -> Self {
        AppTask::new()
    }
}

impl AppTask {
    pub fn new() -> AppTask {
        AppTask {
            samples: SampleSet::survey(),
            references: ReferenceAreas::default(),
            loglevel: Some("info".to_string()),
            plots: true,
            save_csv: false,
            output_dir: PathBuf::from("app_output"),
            result: None,
        }
    }
    ////////////////////////////SETTERS///////////////////////////////////////////////////////////
    pub fn set_data(&mut self, samples: SampleSet, references: ReferenceAreas) {
        self.samples = samples;
        self.references = references;
        self.result = None;
    }

    pub fn set_loglevel(&mut self, loglevel: Option<String>) -> Result<(), String> {
        if let Some(level) = &loglevel {
            parse_loglevel(level)?;
        }
        self.loglevel = loglevel;
        Ok(())
    }

    pub fn set_postprocessing(
        &mut self,
        plots: bool,
        save_csv: bool,
        output_dir: Option<PathBuf>,
    ) {
        self.plots = plots;
        self.save_csv = save_csv;
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
    }

    /// Apply the `settings` section of a task document
    pub fn parse_settings_from_str(&mut self, input: &str) -> Result<(), String> {
        let document = parse_task_document(input)?;
        if let Some(section) = document.get(SETTINGS_SECTION) {
            let known = ["loglevel", "plots", "save_csv", "output_dir"];
            if let Some(unknown) = section.keys().find(|k| !known.contains(&k.as_str())) {
                return Err(format!("unknown key {} in section {}", unknown, SETTINGS_SECTION));
            }
        }
        let as_bool = |key: &str| -> Result<Option<bool>, String> {
            match single_value(&document, SETTINGS_SECTION, key)? {
                None => Ok(None),
                Some(value) => value
                    .as_boolean()
                    .map(Some)
                    .ok_or_else(|| format!("{} must be true or false, got {}", key, value)),
            }
        };
        if let Some(plots) = as_bool("plots")? {
            self.plots = plots;
        }
        if let Some(save_csv) = as_bool("save_csv")? {
            self.save_csv = save_csv;
        }
        if let Some(value) = single_value(&document, SETTINGS_SECTION, "loglevel")? {
            self.set_loglevel(Some(value.to_string()))?;
        }
        if let Some(value) = single_value(&document, SETTINGS_SECTION, "output_dir")? {
            self.output_dir = PathBuf::from(value.to_string());
        }
        Ok(())
    }

    /// compute areas by both rules
    pub fn solver(&mut self) -> Result<&AppAreaAnalysis, QuadratureError> {
        let begin = Instant::now();
        let analysis = AppAreaAnalysis::run(&self.samples, &self.references)?;
        info!("areas computed in {:?}", begin.elapsed());
        Ok(self.result.insert(analysis))
    }

    /// wrapper around solver to install the logger first
    pub fn solve(&mut self) -> Result<&AppAreaAnalysis, QuadratureError> {
        // unparsable loglevel leaves logging off
        let filter = match self.loglevel.as_deref() {
            Some(level) => parse_loglevel(level).unwrap_or_else(|e| {
                eprintln!("{}, logger not installed", e);
                None
            }),
            None => None,
        };
        if let Some(filter) = filter {
            if !init_term_logger(filter) {
                // a logger is already installed, keep using it
                info!("logger already initialized");
            }
        }
        match self.solver() {
            Ok(analysis) => Ok(analysis),
            Err(e) => {
                error!("APP area computation failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn get_result(&self) -> Option<&AppAreaAnalysis> {
        self.result.as_ref()
    }

    /// console report, charts and csv files according to the settings
    pub fn postprocessing(&self) -> Result<(), Box<dyn Error>> {
        let analysis = self
            .result
            .as_ref()
            .ok_or("no result yet, call solve() first")?;
        print_report(&self.samples, analysis);
        if self.plots {
            plot_analysis(&self.samples, analysis, &self.output_dir)?;
        }
        if self.save_csv {
            std::fs::create_dir_all(&self.output_dir)?;
            let stations = self.output_dir.join("app_stations.csv");
            let results = self.output_dir.join("app_results.csv");
            save_samples_to_csv(&self.samples, &stations)?;
            save_results_to_csv(analysis, &results)?;
            info!("csv saved to {} and {}", stations.display(), results.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    #[test]
    fn test_default_task_document() {
        let mut task = AppTask::new();
        task.set_postprocessing(false, true, Some(PathBuf::from("elsewhere")));
        task.parse_settings_from_str(DEFAULT_TASK).unwrap();
        assert_eq!(task.loglevel.as_deref(), Some("info"));
        assert!(task.plots);
        assert!(!task.save_csv);
        assert_eq!(task.output_dir, PathBuf::from("app_output"));
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let mut task = AppTask::new();
        task.parse_settings_from_str("settings\n save_csv: true\n").unwrap();
        assert!(task.save_csv);
        assert!(task.plots);
        assert_eq!(task.loglevel.as_deref(), Some("info"));
    }

    #[test]
    fn test_bad_settings_rejected() {
        let mut task = AppTask::new();
        assert!(task.parse_settings_from_str("settings\n plots: maybe\n").is_err());
        assert!(task.parse_settings_from_str("settings\n loglevel: loud\n").is_err());
        assert!(task.parse_settings_from_str("settings\n colour: red\n").is_err());
        assert!(task.set_loglevel(Some("trace".to_string())).is_err());
        assert!(task.set_loglevel(Some("off".to_string())).is_ok());
    }

    #[test]
    fn test_solve_survey() {
        let mut task = AppTask::new();
        task.set_loglevel(Some("none".to_string())).unwrap();
        assert!(task.get_result().is_none());
        let net = task.solve().unwrap().trapezoidal.net;
        assert_relative_eq!(net, 5779.1772, epsilon = 1e-4);
        assert!(task.get_result().is_some());
    }

    #[test]
    fn test_solve_rejects_odd_intervals() {
        let mut task = AppTask::new();
        task.set_loglevel(None).unwrap();
        let samples =
            SampleSet::from_ordinates(0.0, 2.0, vec![1.0, 3.0, 2.0, 0.0], vec![0.0; 4]).unwrap();
        task.set_data(samples, ReferenceAreas::default());
        assert!(matches!(
            task.solve(),
            Err(QuadratureError::InvalidInput(_))
        ));
        assert!(task.get_result().is_none());
    }

    #[test]
    fn test_solve_ignores_unparsable_loglevel() {
        let mut task = AppTask::new();
        task.loglevel = Some("loud".to_string());
        let analysis = task.solve().unwrap();
        assert_relative_eq!(analysis.simpson.net, 5803.2647, epsilon = 1e-4);
    }

    #[test]
    fn test_postprocessing_requires_result() {
        let task = AppTask::new();
        assert!(task.postprocessing().is_err());
    }

    #[test]
    fn test_postprocessing_saves_csv() {
        let dir = tempdir().unwrap();
        let mut task = AppTask::new();
        task.set_loglevel(None).unwrap();
        task.set_postprocessing(false, true, Some(dir.path().join("out")));
        task.solve().unwrap();
        task.postprocessing().unwrap();
        assert!(dir.path().join("out").join("app_stations.csv").exists());
        assert!(dir.path().join("out").join("app_results.csv").exists());
    }
}
