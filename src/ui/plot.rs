use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::{generate_palette, sex_color};
use crate::data::model::{NameRecord, Sex};
use crate::data::summary::NameTotal;

// ---------------------------------------------------------------------------
// Name trend charts
// ---------------------------------------------------------------------------

/// One `(year, value)` series per sex present in `rows`.
fn series_by_sex(rows: &[NameRecord], value: impl Fn(&NameRecord) -> f64) -> Vec<(Sex, PlotPoints)> {
    Sex::ALL
        .into_iter()
        .filter_map(|sex| {
            let points: Vec<[f64; 2]> = rows
                .iter()
                .filter(|r| r.sex == sex)
                .map(|r| [r.year as f64, value(r)])
                .collect();
            (!points.is_empty()).then(|| (sex, PlotPoints::from(points)))
        })
        .collect()
}

/// Births per year for the looked-up name, one line per sex.
pub fn trend_plot(ui: &mut Ui, name: &str, rows: &[NameRecord]) {
    Plot::new("trend_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Count")
        .height(320.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (sex, points) in series_by_sex(rows, |r| r.count as f64) {
                let line = Line::new(points)
                    .name(format!("{name} ({sex})"))
                    .color(sex_color(sex))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

/// Share of births per year for the looked-up name, as filled areas.
pub fn popularity_plot(ui: &mut Ui, name: &str, rows: &[NameRecord]) {
    Plot::new("popularity_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Share of births")
        .height(260.0)
        .show(ui, |plot_ui| {
            for (sex, points) in series_by_sex(rows, |r| r.pct) {
                let area = Line::new(points)
                    .name(format!("{name} ({sex})"))
                    .color(sex_color(sex))
                    .fill(0.0_f32);
                plot_ui.line(area);
            }
        });
}

// ---------------------------------------------------------------------------
// Most common names
// ---------------------------------------------------------------------------

/// Bar chart of name totals, ranked left to right.
pub fn top_names_plot(ui: &mut Ui, totals: &[NameTotal]) {
    let palette = generate_palette(totals.len());
    let bars: Vec<Bar> = totals
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(rank, (total, color))| {
            Bar::new(rank as f64 + 1.0, total.count as f64)
                .name(&total.name)
                .fill(color)
                .width(0.7)
        })
        .collect();

    Plot::new("top_names_plot")
        .x_axis_label("Rank")
        .y_axis_label("Total Count")
        .height(280.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Top names"));
        });
}
