use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use super::actions::ActionQueue;
use crate::core::{
    classify::{
        bias_label,
        classify,
        shorten,
        BIAS_LABEL_CHARS,
        Verdict,
    },
    Action,
    FileSet,
    ResultRecord,
    SessionView,
};

const BADGE_GREEN: egui::Color32 = egui::Color32::from_rgb(46, 160, 67);
const BADGE_RED: egui::Color32 = egui::Color32::from_rgb(207, 34, 46);
const BADGE_AMBER: egui::Color32 = egui::Color32::from_rgb(191, 135, 0);
const BADGE_NEUTRAL: egui::Color32 = egui::Color32::from_rgb(87, 96, 106);

pub fn analysis_panel(ui: &mut egui::Ui, view: &SessionView<'_>, actions: &mut ActionQueue) {
    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        ui_submission_form(ui, view, actions);
        ui.add_space(12.0);
        ui.separator();

        if !view.has_results() {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                let hint = if view.is_submitting {
                    "Processing..."
                } else {
                    "Select files and run an analysis to see results here."
                };
                ui.label(egui::RichText::new(hint).italics().weak());
            });
            return;
        }

        ui_stats(ui, view);
        ui.add_space(12.0);
        ui_results_table(ui, view, actions);
    });
}

fn ui_submission_form(ui: &mut egui::Ui, view: &SessionView<'_>, actions: &mut ActionQueue) {
    ui.label(egui::RichText::new("Instruction").strong());

    let mut instruction = view.instruction.to_string();
    let edit = egui::TextEdit::multiline(&mut instruction)
        .desired_rows(3)
        .desired_width(f32::INFINITY)
        .hint_text("What should the analysis look for?");
    if ui.add(edit).changed() {
        actions.push(Action::SetInstruction(instruction));
    }

    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui.button("Select Files...").clicked() {
            if let Some(paths) = rfd::FileDialog::new().pick_files() {
                actions.push(Action::SelectFiles(FileSet::from_paths(paths)));
            }
        }

        match view.files.len() {
            0 => ui.label(egui::RichText::new("No files selected").weak()),
            1 => ui.label("1 file selected"),
            n => ui.label(format!("{} files selected", n)),
        };

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if view.is_submitting { "Analyzing..." } else { "Analyze" };
            let button = ui.add_enabled(!view.is_submitting, egui::Button::new(label));
            if button.clicked() {
                actions.push(Action::Submit);
            }
            if view.is_submitting {
                ui.spinner();
            }
        });
    });

    if !view.files.is_empty() {
        ui.collapsing("Selected files", |ui| {
            for file in view.files.iter() {
                ui.label(format!("{} ({})", file.name, file.mime_type));
            }
        });
    }
}

fn ui_stats(ui: &mut egui::Ui, view: &SessionView<'_>) {
    let stats = view.stats();
    let max = stats.max().max(1) as f32;

    ui.heading("Summary");
    egui::Grid::new("stats_grid").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
        for (label, count) in stats.bars() {
            ui.label(label);
            ui.add(
                egui::ProgressBar::new(count as f32 / max)
                    .desired_width(280.0)
                    .text(count.to_string()),
            );
            ui.end_row();
        }
    });
}

fn ui_results_table(ui: &mut egui::Ui, view: &SessionView<'_>, actions: &mut ActionQueue) {
    ui.heading(format!("Files ({})", view.results.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(320.0))
        .column(Column::remainder().at_least(200.0))
        .column(Column::exact(40.0))
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.strong("File");
            });
            header.col(|ui| {
                ui.strong("Flags");
            });
            header.col(|ui| {
                ui.strong("Summary");
            });
            header.col(|_| {});
        })
        .body(|body| {
            body.rows(28.0, view.results.len(), |mut row| {
                let index = row.index();
                let Some(record) = view.results.get(index) else {
                    return;
                };

                row.col(|ui| {
                    ui.label(&record.filename);
                });
                row.col(|ui| ui_badges(ui, record));
                row.col(|ui| {
                    let summary = record.summary().unwrap_or("Processing...");
                    ui.add(egui::Label::new(summary).truncate()).on_hover_text(summary);
                });
                row.col(|ui| {
                    let speak = ui
                        .add_enabled(!view.is_speaking(), egui::Button::new("🔊"))
                        .on_hover_text("Read summary aloud")
                        .on_disabled_hover_text("Narration in progress");
                    if speak.clicked() {
                        actions.push(Action::Narrate { index });
                    }
                });
            });
        });
}

fn ui_badges(ui: &mut egui::Ui, record: &ResultRecord) {
    let flags = classify(record);

    match flags.usable {
        Verdict::Yes => {
            badge(ui, "Usable", BADGE_GREEN);
        }
        Verdict::No => {
            badge(ui, "Not usable", BADGE_RED);
        }
        Verdict::Unknown => {}
    }

    if let Some(biases) = record.biases().filter(|_| flags.biased.is_yes()) {
        badge(ui, &format!("Bias: {}", bias_label(biases)), BADGE_AMBER)
            .on_hover_text(biases.as_text().into_owned());
    }

    if let Some(quality) = record.quality_label() {
        let color = if flags.low_quality.is_yes() { BADGE_RED } else { BADGE_NEUTRAL };
        badge(ui, &format!("Quality: {}", shorten(&quality, BIAS_LABEL_CHARS)), color)
            .on_hover_text(quality.as_ref());
    }
}

fn badge(ui: &mut egui::Ui, text: &str, color: egui::Color32) -> egui::Response {
    egui::Frame::new()
        .fill(color)
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE).small());
        })
        .response
}
