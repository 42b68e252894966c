use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::NameRecord;
use crate::data::summary::NameTotal;

const ROW_HEIGHT: f32 = 18.0;

/// Full records, one row each.
pub fn records_table(ui: &mut Ui, id: &str, rows: &[NameRecord]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(120.0))
            .columns(Column::auto().at_least(60.0), 3)
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["Name", "Sex", "Year", "Count", "Share"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let rec = &rows[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(&rec.name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.sex.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.year.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.count.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.4}%", rec.pct * 100.0));
                    });
                });
            });
    });
}

/// Ranked name totals.
pub fn totals_table(ui: &mut Ui, id: &str, totals: &[NameTotal]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(40.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["#", "Name", "Total Count"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, totals.len(), |mut row| {
                    let idx = row.index();
                    let total = &totals[idx];
                    row.col(|ui: &mut Ui| {
                        ui.label((idx + 1).to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&total.name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(total.count.to_string());
                    });
                });
            });
    });
}
