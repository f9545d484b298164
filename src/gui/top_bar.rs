use eframe::egui::{
    self,
    containers,
};

use super::actions::{
    ActionQueue,
    ExportRequest,
};
use crate::core::{
    Action,
    Section,
    SessionView,
};

pub struct TopBar;

impl TopBar {
    /// Export shortcuts only appear on the analysis screen once there is
    /// something to export.
    pub fn show(
        ctx: &egui::Context,
        view: &SessionView<'_>,
        actions: &mut ActionQueue,
    ) -> Option<ExportRequest> {
        let mut export = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                let toggle_hint =
                    if view.view.sidebar_open() { "Hide navigation" } else { "Show navigation" };
                if ui.button("☰").on_hover_text(toggle_hint).clicked() {
                    actions.push(Action::ToggleSidebar);
                }

                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.label(egui::RichText::new(view.view.active_section().heading()).strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if view.view.active_section() != Section::Overview || !view.has_results() {
                        return;
                    }
                    if ui.button("Download").on_hover_text("Save results as JSON").clicked() {
                        export = Some(ExportRequest::Download);
                    }
                    if ui.button("View JSON").clicked() {
                        actions.push(Action::OpenJsonModal);
                    }
                });
            });
        });

        export
    }
}
