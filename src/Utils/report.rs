/*
Pretty printing of the APP area analysis: tables of areas and errors plus the final summary.
*/
use crate::numerical::app_area::AppAreaAnalysis;
use crate::numerical::app_survey::SampleSet;
use crate::numerical::quadrature::QuadMethod;
use chrono::Local;
use strum::IntoEnumIterator;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct AreaRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Upper I1, m²")]
    upper: String,
    #[tabled(rename = "Lower I2, m²")]
    lower: String,
    #[tabled(rename = "Gross, m²")]
    gross: String,
    #[tabled(rename = "Net (no street), m²")]
    net: String,
    #[tabled(rename = "Block share, %")]
    share: String,
}

#[derive(Tabled)]
pub struct ErrorRow {
    #[tabled(rename = "Source")]
    label: String,
    #[tabled(rename = "Area, m²")]
    area: String,
    #[tabled(rename = "Area - CAD, m²")]
    signed: String,
    #[tabled(rename = "|Error|, m²")]
    absolute: String,
    #[tabled(rename = "Relative, %")]
    relative: String,
}

pub fn area_rows(analysis: &AppAreaAnalysis) -> Vec<AreaRow> {
    QuadMethod::iter()
        .map(|method| {
            let m = analysis.method(method);
            AreaRow {
                method: method.to_string(),
                upper: format!("{:.4}", m.upper),
                lower: format!("{:.4}", m.lower),
                gross: format!("{:.4}", m.gross),
                net: format!("{:.4}", m.net),
                share: format!("{:.2}", analysis.block_share(method)),
            }
        })
        .collect()
}

pub fn error_rows(analysis: &AppAreaAnalysis) -> Vec<ErrorRow> {
    analysis
        .deviations
        .iter()
        .map(|d| ErrorRow {
            label: d.label.clone(),
            area: format!("{:.4}", d.area),
            signed: format!("{:+.4}", d.signed),
            absolute: format!("{:.4}", d.absolute),
            relative: format!("{:.3}", d.relative_percent),
        })
        .collect()
}

pub fn area_table(analysis: &AppAreaAnalysis) -> String {
    let rows = area_rows(analysis);
    let mut table = Table::new(&rows);
    table.with(Style::modern_rounded());
    table.to_string()
}

pub fn error_table(analysis: &AppAreaAnalysis) -> String {
    let rows = error_rows(analysis);
    let mut table = Table::new(&rows);
    table.with(Style::modern_rounded());
    table.to_string()
}

/// Closing summary: data used, results, comparison with the study and the block impact
pub fn summary_text(samples: &SampleSet, analysis: &AppAreaAnalysis) -> String {
    let refs = &analysis.references;
    let trap = &analysis.trapezoidal;
    let simp = &analysis.simpson;
    let closest = analysis.closest_method();
    let mut lines = vec![
        "1. DATA".to_string(),
        format!("   - stations: {}", samples.len()),
        format!("   - step h: {} m", samples.h),
        format!("   - total length: {} m", samples.length()),
        "2. RESULTS".to_string(),
        format!("   - trapezoidal rule: {:.2} m²", trap.net),
        format!("   - Simpson's rule:   {:.2} m²", simp.net),
        "3. COMPARISON WITH THE STUDY".to_string(),
        format!("   - CAD (reference):  {:.2} m²", refs.cad),
        format!("   - trapezoidal diff: {:+.2} m²", trap.net - refs.cad),
        format!("   - Simpson diff:     {:+.2} m²", simp.net - refs.cad),
        "4. BLOCK IMPACT".to_string(),
        format!("   - block area: {:.2} m²", refs.block),
        format!(
            "   - APP by trapezoidal rule: {:.2}%",
            analysis.block_share(QuadMethod::Trapezoidal)
        ),
        format!(
            "   - APP by Simpson's rule:   {:.2}%",
            analysis.block_share(QuadMethod::Simpson)
        ),
    ];
    if analysis.block_share(closest) > 50.0 {
        lines.push("   - more than half of the block is compromised".to_string());
    }
    lines.push("5. CONCLUSION".to_string());
    lines.push(format!("   - {} gives the smaller error against CAD", closest));
    if closest == QuadMethod::Trapezoidal {
        lines.push(
            "   - the stream margins are nearly piecewise linear between stations".to_string(),
        );
    }
    lines.push(format!(
        "   - about {:.2}% of the block is APP (published), not buildable",
        refs.published_share
    ));
    let mut s = lines.join("\n");
    s.push('\n');
    s
}

/// Print the full console report
pub fn print_report(samples: &SampleSet, analysis: &AppAreaAnalysis) {
    let line = "=".repeat(60);
    println!("{}", line);
    println!("PERMANENT PRESERVATION AREA (APP): numerical integration");
    println!("run at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("{}", line);
    println!("\nAreas by method\n{}", area_table(analysis));
    let refs = &analysis.references;
    println!("\nReference values");
    println!("CAD (reference):       {:.4} m²", refs.cad);
    println!("Trapezoidal (study):   {:.4} m²", refs.published_trapezoidal);
    println!("Simpson (study):       {:.4} m²", refs.published_simpson);
    println!("\nErrors against CAD\n{}", error_table(analysis));
    println!("\n{}\nSUMMARY\n{}", line, line);
    println!("{}", summary_text(samples, analysis));
}
