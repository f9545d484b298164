use eframe::egui;

use crate::core::Notice;

/// Blocking notification for the notice at the head of the session queue.
pub struct ErrorModal;

impl ErrorModal {
    /// Returns true once the operator has acknowledged the notice.
    pub fn show(ctx: &egui::Context, notice: &Notice) -> bool {
        let modal = egui::Modal::new(egui::Id::new("error_modal")).show(ctx, |ui| {
            ui.set_width(450.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("⚠").size(24.0).color(egui::Color32::RED));
                ui.label(
                    egui::RichText::new(&notice.title)
                        .size(18.0)
                        .color(egui::Color32::WHITE)
                        .strong(),
                );
            });

            ui.add_space(10.0);

            ui.label(
                egui::RichText::new(&notice.message).size(14.0).color(egui::Color32::LIGHT_GRAY),
            );

            if let Some(details) = &notice.details {
                ui.add_space(10.0);
                ui.collapsing("Technical Details", |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut details.as_str())
                            .desired_width(f32::INFINITY)
                            .desired_rows(4)
                            .code_editor(),
                    );
                });
            };

            ui.add_space(15.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        ui.close();
                    }
                });
            });
        });

        modal.should_close()
    }
}
