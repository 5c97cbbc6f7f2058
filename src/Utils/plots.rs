//! Charts of the APP analysis rendered with plotters into PNG files:
//! - margins of the APP with the region between them, next to the area comparison bars
//! - geometric meaning of both rules (trapezoids and parabolas)
//! - absolute errors against the CAD area
use crate::numerical::app_area::AppAreaAnalysis;
use crate::numerical::app_survey::SampleSet;
use crate::numerical::approximation_shapes::{
    PARABOLA_RESOLUTION, simpson_bands, trapezoid_panels,
};
use crate::numerical::quadrature::QuadMethod;
use log::info;
use nalgebra::DVector;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};

pub const MARGINS_AND_AREAS_PNG: &str = "app_margins_and_areas.png";
pub const APPROXIMATIONS_PNG: &str = "app_approximations.png";
pub const ERRORS_PNG: &str = "app_errors.png";

const GRAY: RGBColor = RGBColor(128, 128, 128);
const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);
const LIGHT_CORAL: RGBColor = RGBColor(240, 128, 128);

/// relative axis headroom added per note line of a bar chart
const NOTE_HEADROOM: f64 = 0.07;
/// distance between note lines as a share of the axis
const NOTE_SPACING: f64 = 0.05;

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// one bar of a bar chart
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
    /// text printed in the middle of the bar
    pub inner: Option<String>,
}

fn series(x: &DVector<f64>, y: &DVector<f64>) -> Vec<(f64, f64)> {
    x.iter().zip(y.iter()).map(|(&x, &y)| (x, y)).collect()
}

fn x_range(samples: &SampleSet) -> std::ops::Range<f64> {
    samples.x[0]..samples.x[samples.len() - 1]
}

/// Both margins, the APP between them and the survey stations
pub fn draw_margins<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    samples: &SampleSet,
) -> DrawResult<DB> {
    let y_max = samples.max_upper().max(samples.max_lower()) + 5.0;
    let mut chart = ChartBuilder::on(area)
        .caption("Permanent preservation area (APP)", ("sans-serif", 26))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range(samples), 0.0..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Length, m")
        .y_desc("Width, m")
        .draw()?;

    let upper = series(&samples.x, &samples.y_upper);
    let lower = series(&samples.x, &samples.y_lower);
    let mut region = upper.clone();
    region.extend(lower.iter().rev().copied());
    chart
        .draw_series(std::iter::once(Polygon::new(
            region,
            GREEN.mix(0.3).filled(),
        )))?
        .label("APP")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], GREEN.mix(0.3).filled()));
    chart
        .draw_series(LineSeries::new(upper.clone(), BLUE.stroke_width(2)))?
        .label("Upper margin")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
    chart
        .draw_series(LineSeries::new(lower.clone(), RED.stroke_width(2)))?
        .label("Lower margin")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    chart.draw_series(upper.iter().map(|&p| Circle::new(p, 4, BLUE.filled())))?;
    chart.draw_series(lower.iter().map(|&p| Circle::new(p, 4, RED.filled())))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

/// Upper bound of the value axis. Every note line adds headroom so the notes stay above the
/// value labels of the bars.
pub fn bar_chart_top(bars: &[Bar], notes: usize) -> f64 {
    let max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    let top = max * (1.2 + NOTE_HEADROOM * notes as f64);
    if top > 0.0 { top } else { 1.0 }
}

/// height of the text anchor of a note line, in axis units
fn note_y(line: usize, top: f64) -> f64 {
    top * (0.97 - NOTE_SPACING * line as f64)
}

fn value_label_y(value: f64, top: f64) -> f64 {
    value + 0.06 * top
}

/// Vertical bars at x = 0, 1, ... with value labels. `reference` draws a horizontal line,
/// `notes` are printed in the upper left corner.
pub fn draw_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    y_desc: &str,
    bars: &[Bar],
    reference: Option<(&str, f64)>,
    notes: &[String],
) -> DrawResult<DB> {
    let n = bars.len();
    let top = bar_chart_top(bars, notes.len());
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 26))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..top)?;

    let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
    let label_of = |x: &f64| {
        let i = x.round();
        if (x - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < labels.len() {
            labels[i as usize].clone()
        } else {
            String::new()
        }
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&label_of)
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let x = i as f64;
        Rectangle::new([(x - 0.35, 0.0), (x + 0.35, bar.value)], bar.color.mix(0.8).filled())
    }))?;
    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        Text::new(
            format!("{:.2} m²", bar.value),
            (i as f64 - 0.25, value_label_y(bar.value, top)),
            ("sans-serif", 16),
        )
    }))?;
    chart.draw_series(bars.iter().enumerate().filter_map(|(i, bar)| {
        bar.inner.as_ref().map(|text| {
            Text::new(
                text.clone(),
                (i as f64 - 0.2, bar.value / 2.0),
                ("sans-serif", 14).into_font().color(&WHITE),
            )
        })
    }))?;

    if let Some((name, value)) = reference {
        chart
            .draw_series(LineSeries::new(
                vec![(-0.5, value), (n as f64 - 0.5, value)],
                BLACK.mix(0.6).stroke_width(1),
            ))?
            .label(name)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }
    chart.draw_series(notes.iter().enumerate().map(|(k, note)| {
        Text::new(
            note.clone(),
            (-0.45, note_y(k, top)),
            ("sans-serif", 15),
        )
    }))?;
    Ok(())
}

/// Trapezoids of the composite trapezoidal rule: upper margin above the axis,
/// lower margin mirrored below it
pub fn draw_trapezoid_approximation<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    samples: &SampleSet,
) -> DrawResult<DB> {
    let y_top = samples.max_upper() + 5.0;
    let y_bottom = -(samples.max_lower() + 5.0);
    let mut chart = ChartBuilder::on(area)
        .caption("Trapezoidal rule approximation", ("sans-serif", 26))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range(samples), y_bottom..y_top)?;
    chart
        .configure_mesh()
        .x_desc("Length, m")
        .y_desc("Width, m")
        .draw()?;

    chart
        .draw_series(
            trapezoid_panels(&samples.x, &samples.y_upper, false)
                .into_iter()
                .map(|p| Polygon::new(p, BLUE.mix(0.2).filled())),
        )?
        .label("Upper trapezoids")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], BLUE.mix(0.2).filled()));
    chart
        .draw_series(
            trapezoid_panels(&samples.x, &samples.y_lower, true)
                .into_iter()
                .map(|p| Polygon::new(p, RED.mix(0.2).filled())),
        )?
        .label("Lower trapezoids")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], RED.mix(0.2).filled()));
    chart.draw_series(LineSeries::new(
        series(&samples.x, &samples.y_upper),
        BLUE.mix(0.5).stroke_width(2),
    ))?;
    chart.draw_series(LineSeries::new(
        series(&samples.x, &samples.y_lower),
        RED.mix(0.5).stroke_width(2),
    ))?;
    chart.draw_series(LineSeries::new(
        vec![(samples.x[0], 0.0), (samples.x[samples.len() - 1], 0.0)],
        &BLACK,
    ))?;
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

/// Parabolas through each pair of intervals for both margins, the region between them filled
pub fn draw_simpson_approximation<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    samples: &SampleSet,
) -> DrawResult<DB> {
    let y_top = samples.max_upper() + 5.0;
    let mut chart = ChartBuilder::on(area)
        .caption("Simpson's rule approximation (parabolas)", ("sans-serif", 26))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range(samples), 0.0..y_top)?;
    chart
        .configure_mesh()
        .x_desc("Length, m")
        .y_desc("Width, m")
        .draw()?;

    chart
        .draw_series(
            simpson_bands(samples, PARABOLA_RESOLUTION)
                .into_iter()
                .map(|band| Polygon::new(band, GREEN.mix(0.2).filled())),
        )?
        .label("Simpson area")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], GREEN.mix(0.2).filled()));
    let upper = series(&samples.x, &samples.y_upper);
    let lower = series(&samples.x, &samples.y_lower);
    chart
        .draw_series(LineSeries::new(upper.clone(), BLUE.mix(0.5).stroke_width(2)))?
        .label("Upper margin")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
    chart
        .draw_series(LineSeries::new(lower.clone(), RED.mix(0.5).stroke_width(2)))?
        .label("Lower margin")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    chart.draw_series(upper.iter().map(|&p| Circle::new(p, 3, BLUE.mix(0.7).filled())))?;
    chart.draw_series(lower.iter().map(|&p| Circle::new(p, 3, RED.mix(0.7).filled())))?;
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

/// CAD, trapezoidal and Simpson net areas
pub fn area_bars(analysis: &AppAreaAnalysis) -> Vec<Bar> {
    vec![
        Bar {
            label: "CAD".to_string(),
            value: analysis.references.cad,
            color: GRAY,
            inner: None,
        },
        Bar {
            label: "Trapezoidal".to_string(),
            value: analysis.trapezoidal.net,
            color: BLUE,
            inner: None,
        },
        Bar {
            label: "Simpson".to_string(),
            value: analysis.simpson.net,
            color: RED,
            inner: None,
        },
    ]
}

/// absolute errors against CAD: published and computed, for both rules
pub fn error_bars(analysis: &AppAreaAnalysis) -> Vec<Bar> {
    let colors = [LIGHT_BLUE, BLUE, LIGHT_CORAL, RED];
    analysis
        .deviations
        .iter()
        .zip(colors)
        .map(|(d, color)| Bar {
            label: d.label.clone(),
            value: d.absolute,
            color,
            inner: Some(format!("({:.3}%)", d.relative_percent)),
        })
        .collect()
}

fn error_notes(analysis: &AppAreaAnalysis) -> Vec<String> {
    vec![
        "Errors against CAD:".to_string(),
        format!(
            "Trapezoidal: {:.2} m²",
            analysis.error(QuadMethod::Trapezoidal).absolute
        ),
        format!(
            "Simpson: {:.2} m²",
            analysis.error(QuadMethod::Simpson).absolute
        ),
    ]
}

/// Render the three figures into `output_dir` and return their paths
pub fn plot_analysis(
    samples: &SampleSet,
    analysis: &AppAreaAnalysis,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    std::fs::create_dir_all(output_dir)?;

    let first = output_dir.join(MARGINS_AND_AREAS_PNG);
    {
        let root = BitMapBackend::new(&first, (1400, 600)).into_drawing_area();
        root.fill(&WHITE)?;
        let panels = root.split_evenly((1, 2));
        draw_margins(&panels[0], samples)?;
        draw_bars(
            &panels[1],
            "Computed areas",
            "Area, m²",
            &area_bars(analysis),
            Some(("CAD reference", analysis.references.cad)),
            &error_notes(analysis),
        )?;
        root.present()?;
    }

    let second = output_dir.join(APPROXIMATIONS_PNG);
    {
        let root = BitMapBackend::new(&second, (1200, 1000)).into_drawing_area();
        root.fill(&WHITE)?;
        let panels = root.split_evenly((2, 1));
        draw_trapezoid_approximation(&panels[0], samples)?;
        draw_simpson_approximation(&panels[1], samples)?;
        root.present()?;
    }

    let third = output_dir.join(ERRORS_PNG);
    {
        let root = BitMapBackend::new(&third, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;
        draw_bars(
            &root,
            "Errors against the CAD reference",
            "Absolute error, m²",
            &error_bars(analysis),
            None,
            &[],
        )?;
        root.present()?;
    }

    let files = vec![first, second, third];
    for f in &files {
        info!("chart saved to {}", f.display());
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::app_survey::ReferenceAreas;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    fn analysis() -> AppAreaAnalysis {
        AppAreaAnalysis::run(&SampleSet::survey(), &ReferenceAreas::default()).unwrap()
    }

    #[test]
    fn test_area_bars() {
        let bars = area_bars(&analysis());
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].label, "CAD");
        assert_relative_eq!(bars[0].value, 5777.0648);
        assert_relative_eq!(bars[1].value, 5779.1772, epsilon = 1e-4);
        assert_relative_eq!(bars[2].value, 5803.2647, epsilon = 1e-4);
    }

    #[test]
    fn test_error_bars() {
        let bars = error_bars(&analysis());
        assert_eq!(bars.len(), 4);
        assert_eq!(bars[1].label, "Trapezoidal (computed)");
        assert_relative_eq!(bars[3].value, 26.1999, epsilon = 1e-4);
        assert_eq!(bars[3].inner.as_deref(), Some("(0.454%)"));
    }

    #[test]
    fn test_error_notes() {
        let notes = error_notes(&analysis());
        assert_eq!(notes[1], "Trapezoidal: 2.11 m²");
        assert_eq!(notes[2], "Simpson: 26.20 m²");
    }

    #[test]
    fn test_notes_stay_above_value_labels() {
        let analysis = analysis();
        let bars = area_bars(&analysis);
        let notes = error_notes(&analysis);
        let top = bar_chart_top(&bars, notes.len());
        let highest_label = bars
            .iter()
            .map(|b| value_label_y(b.value, top))
            .fold(f64::MIN, f64::max);
        // text is anchored at its upper left corner, leave one line of height below the last note
        let lowest_note = note_y(notes.len() - 1, top) - NOTE_SPACING * top;
        assert!(lowest_note > highest_label);
        assert!(highest_label < top);
    }

    #[test]
    fn test_bar_chart_top_without_bars() {
        assert_relative_eq!(bar_chart_top(&[], 0), 1.0);
        let bars = error_bars(&analysis());
        let max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
        assert_relative_eq!(bar_chart_top(&bars, 0), 1.2 * max, epsilon = 1e-9);
    }

    #[test]
    fn test_plot_analysis_writes_pngs() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("charts");
        let samples = SampleSet::survey();
        let files = plot_analysis(&samples, &analysis(), &out).unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec![MARGINS_AND_AREAS_PNG, APPROXIMATIONS_PNG, ERRORS_PNG]);
        for f in &files {
            assert!(f.starts_with(&out));
            assert!(std::fs::metadata(f).unwrap().len() > 0);
        }
    }
}
