use dataclean::{
    gui::DatacleanApp,
    logging,
    Settings,
};
use eframe::egui;

fn main() -> eframe::Result {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = Settings::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("DataClean AI"),
        ..Default::default()
    };

    eframe::run_native(
        "DataClean AI",
        options,
        Box::new(move |cc| {
            let app = DatacleanApp::new(cc, &settings)?;
            Ok(Box::new(app))
        }),
    )
}
