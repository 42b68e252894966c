use eframe::egui::{self, ScrollArea, Ui};

use crate::state::{AppState, Tab, TOP_NAMES};
use crate::ui::{plot, tables};

// ---------------------------------------------------------------------------
// Central panel – tabbed views
// ---------------------------------------------------------------------------

/// Render the tab strip and the active tab.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.loading {
                ui.heading("Fetching baby-name data…");
            } else {
                ui.heading("No data loaded  (File → Open archive… or Reload from source)");
            }
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.active_tab, Tab::Trends, "Name Trends");
        ui.selectable_value(&mut state.active_tab, Tab::Summary, "Summary Statistics");
    });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.active_tab {
            Tab::Trends => trends_tab(ui, state),
            Tab::Summary => summary_tab(ui, state),
        });
}

fn trends_tab(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Name Trends");

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Enter a name:");
        if ui.text_edit_singleline(&mut state.name_query).changed() {
            state.refresh_name_trend();
        }
    });

    if state.name_trend.is_empty() {
        ui.label(format!(
            "No records for '{}' in the selected gender and years.",
            state.name_query.trim()
        ));
        return;
    }

    let name = state.name_query.trim().to_string();
    ui.strong(format!("Trend for the name '{name}'"));
    plot::trend_plot(ui, &name, &state.name_trend);

    egui::CollapsingHeader::new("Name Popularity Over Time")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label(format!(
                "Popularity of '{name}' as a share of total births each year."
            ));
            plot::popularity_plot(ui, &name, &state.name_trend);
        });
}

fn summary_tab(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Summary Statistics");

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("One-Hit Wonders");
        if ui.small_button("Shuffle").clicked() {
            state.resample_wonders();
        }
    });
    ui.label("Names that appeared in only one year.");
    tables::records_table(ui, "wonder_table", &state.wonder_sample);

    ui.add_space(12.0);
    ui.strong(format!("Top {TOP_NAMES} Most Common Names"));
    if state.view.is_empty() {
        ui.label("No records in the selected gender and years.");
        return;
    }
    plot::top_names_plot(ui, &state.top_names);
    tables::totals_table(ui, "top_names_table", &state.top_names);
}
