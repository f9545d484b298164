use eframe::egui;

use crate::core::Section;

/// Sections that are reachable from navigation but have no backend yet.
pub fn placeholder_panel(ui: &mut egui::Ui, section: Section) {
    let blurb = match section {
        Section::Train => "Model training on cleaned datasets will be available here.",
        Section::Chat => "Ask questions about your analyzed datasets here.",
        Section::Overview => return,
    };

    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        ui.heading(section.heading());
        ui.add_space(8.0);
        ui.label(egui::RichText::new(blurb).weak());
        ui.add_space(4.0);
        ui.label(egui::RichText::new("Coming soon").italics().weak());
    });
}
