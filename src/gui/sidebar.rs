use eframe::egui;

use super::actions::ActionQueue;
use crate::core::{
    Action,
    Section,
    SessionView,
};

pub struct Sidebar;

impl Sidebar {
    pub fn show(ctx: &egui::Context, view: &SessionView<'_>, actions: &mut ActionQueue) {
        if !view.view.sidebar_open() {
            return;
        }

        egui::SidePanel::left("navigation").resizable(false).default_width(160.0).show(
            ctx,
            |ui| {
                ui.add_space(8.0);
                ui.heading("DataClean AI");
                ui.separator();

                for section in Section::ALL {
                    let selected = view.view.active_section() == section;
                    if ui.selectable_label(selected, section.label()).clicked() && !selected {
                        actions.push(Action::ShowSection(section));
                    }
                }

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    if view.is_submitting {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Analyzing...");
                        });
                    }
                });
            },
        );
    }
}
