use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::cache;
use crate::data::export::export_dataset;
use crate::data::filter::SexFilter;
use crate::data::loader::load_from;
use crate::data::source::FileSource;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        if state.loading {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label("Loading name data…");
            });
        } else {
            ui.label("No dataset loaded.");
        }
        return;
    }

    // ---- Gender ----
    ui.strong("Select Gender");
    let mut selected = state.filters.selected_sex;
    for option in SexFilter::ALL {
        ui.radio_value(&mut selected, option, option.to_string());
    }
    state.set_sex(selected);
    if ui.button("Reset Gender").clicked() {
        state.reset_sex();
    }
    ui.separator();

    // ---- Year range ----
    ui.strong("Select Year Range");
    let (lo, hi) = state.filters.year_bounds();
    let (mut start, mut end) = state.filters.year_range;
    let start_changed = ui
        .add(egui::Slider::new(&mut start, lo..=hi).text("from"))
        .changed();
    let end_changed = ui
        .add(egui::Slider::new(&mut end, lo..=hi).text("to"))
        .changed();

    // Keep the pair ordered: whichever handle moved drags the other along.
    if start_changed && start > end {
        end = start;
    } else if end_changed && end < start {
        start = end;
    }
    state.set_year_range(start, end);

    if ui.button("Reset Year Range").clicked() {
        state.reset_year_range();
    }
    ui.separator();

    if !state.filters.is_default() {
        ui.label(RichText::new("Filters active").italics());
    }
    ui.label(format!(
        "{} one-hit wonders in the full dataset",
        state.one_hit_wonders.len()
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open archive…").clicked() {
                open_archive_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.loading, egui::Button::new("Reload from source"))
                .clicked()
            {
                reload_from_source(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.dataset.is_some(), egui::Button::new("Export view…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} in view",
                ds.len(),
                state.view.len()
            ));
        }

        if state.loading {
            ui.separator();
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Loading and export actions
// ---------------------------------------------------------------------------

/// Load the configured source through the process-wide cache.
pub fn load_default(state: &mut AppState) {
    state.start_load(cache::load);
}

fn reload_from_source(state: &mut AppState) {
    state.start_load(|| {
        let cache = cache::global();
        cache.invalidate();
        cache.get()
    });
}

pub fn open_archive_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open baby-name archive")
        .add_filter("ZIP archive", &["zip"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening archive {}", path.display());
        state.start_load(move || load_from(&FileSource::new(path)).map(Arc::new));
    }
}

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered view")
        .set_file_name("names.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .save_file();

    if let Some(path) = file {
        match export_to(&path, state) {
            Ok(()) => state.status_message = Some(format!("Exported to {}", path.display())),
            Err(e) => {
                log::error!("Failed to export view: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_to(path: &Path, state: &AppState) -> anyhow::Result<()> {
    export_dataset(path, &state.view)
        .with_context(|| format!("exporting to {}", path.display()))
}
