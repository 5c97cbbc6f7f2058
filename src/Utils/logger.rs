use crate::numerical::app_area::AppAreaAnalysis;
use crate::numerical::app_survey::SampleSet;
use csv::Writer;
use simplelog::*;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Map a textual log level onto a filter. `off`/`none` disable logging (Ok(None)).
pub fn parse_loglevel(level: &str) -> Result<Option<LevelFilter>, String> {
    match level.to_lowercase().as_str() {
        "debug" => Ok(Some(LevelFilter::Debug)),
        "info" => Ok(Some(LevelFilter::Info)),
        "warn" => Ok(Some(LevelFilter::Warn)),
        "error" => Ok(Some(LevelFilter::Error)),
        "off" | "none" => Ok(None),
        other => Err(format!(
            "loglevel must be debug, info, warn, error, off or none, got {}",
            other
        )),
    }
}

/// Install the terminal logger. Returns false if a logger has already been installed.
pub fn init_term_logger(level: LevelFilter) -> bool {
    CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .is_ok()
}

/// stations table: x, upper margin, lower margin
pub fn save_samples_to_csv(samples: &SampleSet, filename: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(["i", "x", "y_upper", "y_lower"])?;
    for i in 0..samples.len() {
        writer.write_record(&[
            i.to_string(),
            samples.x[i].to_string(),
            samples.y_upper[i].to_string(),
            samples.y_lower[i].to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// per-method areas followed by the deviations from the CAD area
pub fn save_results_to_csv(
    analysis: &AppAreaAnalysis,
    filename: &Path,
) -> Result<(), Box<dyn Error>> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(["quantity", "label", "value"])?;
    for m in [&analysis.trapezoidal, &analysis.simpson] {
        let name = m.method.short_name();
        for (quantity, value) in [
            ("upper", m.upper),
            ("lower", m.lower),
            ("gross", m.gross),
            ("net", m.net),
            ("block_share_percent", m.block_share(analysis.references.block)),
        ] {
            writer.write_record(&[quantity.to_string(), name.to_string(), format!("{:.6}", value)])?;
        }
    }
    for d in &analysis.deviations {
        writer.write_record(&[
            "abs_error".to_string(),
            d.label.clone(),
            format!("{:.6}", d.absolute),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
