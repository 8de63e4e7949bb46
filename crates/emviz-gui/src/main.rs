//! emviz GUI application entry point.

mod app;
mod panels;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Electromagnetic Field Simulator")
            .with_inner_size([1080.0, 920.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "emviz",
        options,
        Box::new(|_cc| Ok(Box::new(app::EmVizApp::default()))),
    )
}
