use std::sync::Arc;

use eframe::egui;

use super::actions::ExportRequest;
use crate::core::{
    export::{
        self,
        ExportDocument,
    },
    ResultSet,
};

pub enum JsonModalResponse {
    Close,
    Export(ExportRequest),
}

/// Preview of the exact document that copy and download produce.
#[derive(Default)]
pub struct JsonModal {
    cached: Option<(Arc<ResultSet>, ExportDocument)>,
    copy_success: bool,
}

impl JsonModal {
    pub fn new() -> Self {
        Self { cached: None, copy_success: false }
    }

    /// Confirms a copy until the modal closes or the results change.
    pub fn mark_copied(&mut self) {
        self.copy_success = true;
    }

    pub fn copy_success(&self) -> bool {
        self.copy_success
    }

    pub fn reset_feedback(&mut self) {
        self.copy_success = false;
    }

    /// Serialized form of `results`, re-rendered only when the set was replaced.
    pub fn document(&mut self, results: &Arc<ResultSet>) -> Option<&ExportDocument> {
        let stale = self.cached.as_ref().map_or(true, |(source, _)| !Arc::ptr_eq(source, results));
        if stale {
            self.copy_success = false;
            match export::serialize(results) {
                Ok(document) => self.cached = Some((Arc::clone(results), document)),
                Err(e) => {
                    tracing::error!("Failed to serialize results: {}", e);
                    self.cached = None;
                }
            }
        }
        self.cached.as_ref().map(|(_, document)| document)
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        results: &Arc<ResultSet>,
    ) -> Option<JsonModalResponse> {
        let mut response = None;

        let modal = egui::Modal::new(egui::Id::new("json_modal")).show(ctx, |ui| {
            ui.set_width(ctx.screen_rect().width() * 0.7);

            ui.horizontal(|ui| {
                ui.heading("Results JSON");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✖").on_hover_text("Close").clicked() {
                        response = Some(JsonModalResponse::Close);
                    }
                });
            });

            ui.separator();

            match self.document(results) {
                Some(document) => {
                    egui::ScrollArea::vertical().max_height(ctx.screen_rect().height() * 0.6).show(
                        ui,
                        |ui| {
                            ui.add(
                                egui::TextEdit::multiline(&mut document.as_str())
                                    .desired_width(f32::INFINITY)
                                    .code_editor(),
                            );
                        },
                    );
                }
                None => {
                    ui.label("The results could not be rendered as JSON.");
                }
            }

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if self.copy_success {
                    ui.label(
                        egui::RichText::new("✓").color(egui::Color32::from_rgb(100, 200, 100)),
                    );
                    ui.label(
                        egui::RichText::new("JSON copied to clipboard")
                            .color(egui::Color32::from_rgb(100, 200, 100)),
                    );
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Download").clicked() {
                        response = Some(JsonModalResponse::Export(ExportRequest::Download));
                    }
                    if ui.button("Copy").clicked() {
                        response = Some(JsonModalResponse::Export(ExportRequest::Copy));
                    }
                });
            });
        });

        if response.is_none() && modal.should_close() {
            response = Some(JsonModalResponse::Close);
        }
        if matches!(response, Some(JsonModalResponse::Close)) {
            self.reset_feedback();
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResultRecord;

    #[test]
    fn document_is_cached_per_result_set() {
        let mut modal = JsonModal::new();
        let results = Arc::new(vec![ResultRecord::new("a.csv", None)]);

        let first = modal.document(&results).map(|doc| doc.as_str().to_string());
        assert!(first.as_deref().unwrap_or_default().contains("a.csv"));
        assert!(Arc::ptr_eq(&modal.cached.as_ref().unwrap().0, &results));
    }

    #[test]
    fn copy_confirmation_clears_when_results_change() {
        let mut modal = JsonModal::new();
        let results = Arc::new(vec![ResultRecord::new("a.csv", None)]);
        modal.document(&results);

        modal.mark_copied();
        modal.document(&results);
        assert!(modal.copy_success());

        let replaced = Arc::new(vec![ResultRecord::new("b.csv", None)]);
        modal.document(&replaced);
        assert!(!modal.copy_success());
    }
}
