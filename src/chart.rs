use crate::{compute::Totals, data::Error};
use log::{info, warn};
use plotters::element::Pie;
use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use std::path::{Path, PathBuf};

pub(crate) const PIE_CHART_FILE: &str = "category_pie_chart.svg";
pub(crate) const BAR_CHART_FILE: &str = "monthly_bar_chart.svg";

const CHART_SIZE: (u32, u32) = (960, 720);
const FONT: &str = "sans-serif";

fn chart_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Chart(e.to_string())
}

fn palette(len: usize) -> Vec<RGBColor> {
    (0..len)
        .map(|i| {
            let (r, g, b) = Palette99::COLORS[i % Palette99::COLORS.len()];
            RGBColor(r, g, b)
        })
        .collect()
}

/// Pie chart of the category totals with percentage labels. A pie can't show
/// zero or negative shares, so those categories are left out; if nothing is
/// left no file is written.
pub(crate) fn render_category_pie(dir: &Path, totals: &Totals) -> Result<Option<PathBuf>, Error> {
    let (labels, sizes): (Vec<&str>, Vec<f64>) = totals
        .iter()
        .filter_map(|(category, total)| match total.to_f64() {
            Some(size) if size > 0.0 => Some((category.as_str(), size)),
            _ => {
                warn!("Leaving {category:?} ({total}) out of the pie chart");
                None
            }
        })
        .unzip();
    if sizes.is_empty() {
        return Ok(None);
    }

    let path = dir.join(PIE_CHART_FILE);
    draw_pie(&path, &labels, &sizes).map_err(chart_error)?;
    info!("Saved category pie chart to {}", path.display());
    Ok(Some(path))
}

fn draw_pie(
    path: &Path,
    labels: &[&str],
    sizes: &[f64],
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled("Category-wise Expense Distribution", (FONT, 30))?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;
    let colors = palette(sizes.len());
    let mut pie = Pie::new(&center, &radius, sizes, &colors, labels);
    pie.label_style((FONT, 18).into_font().color(&BLACK));
    pie.percentages((FONT, 16).into_font().color(&BLACK));
    area.draw(&pie)?;
    root.present()?;
    Ok(())
}

/// Bar chart with one bar per month, in the order of `totals`.
pub(crate) fn render_monthly_bar(
    dir: &Path,
    totals: &Totals,
    currency: &str,
) -> Result<Option<PathBuf>, Error> {
    if totals.is_empty() {
        return Ok(None);
    }
    let months: Vec<&str> = totals.keys().map(String::as_str).collect();
    let values: Vec<f64> = totals
        .values()
        .map(|total| total.to_f64().unwrap_or_default())
        .collect();
    let path = dir.join(BAR_CHART_FILE);
    draw_bars(&path, &months, &values, currency).map_err(chart_error)?;
    info!("Saved monthly bar chart to {}", path.display());
    Ok(Some(path))
}

fn draw_bars(
    path: &Path,
    months: &[&str],
    values: &[f64],
    currency: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let low = values.iter().copied().fold(0.0, f64::min);
    let high = values.iter().copied().fold(0.0, f64::max);
    let high = if high == low { 1.0 } else { high * 1.1 };

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    // Bars are centered on integer x positions so each key point lands on a month.
    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly Expense Summary", (FONT, 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..months.len() as f64 - 0.5, low..high)?;

    let month_label = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        months
            .get(idx as usize)
            .map(|m| m.to_string())
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(months.len())
        .x_label_formatter(&month_label)
        .x_desc("Month")
        .y_desc(format!("Total Expense ({currency})"))
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, &value)| {
        let x = i as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, value)], BLUE.mix(0.6).filled())
    }))?;
    root.present()?;
    Ok(())
}
