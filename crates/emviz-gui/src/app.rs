//! Main application state and egui integration.

use eframe::egui;

use emviz_core::FieldGrid;

use crate::panels;

/// The emviz viewer application.
///
/// Owns the field grid together with the camera and control state that
/// drive the render loop; nothing is shared through globals.
pub struct EmVizApp {
    /// State for the controls side panel.
    pub controls: panels::controls::ControlsPanel,
    /// Camera and render-loop state for the 3D view.
    pub viewport: panels::viewport::ViewportPanel,
    /// The current grid, `None` if the last rebuild failed.
    grid: Option<FieldGrid>,
}

impl Default for EmVizApp {
    fn default() -> Self {
        let mut app = Self {
            controls: panels::controls::ControlsPanel::default(),
            viewport: panels::viewport::ViewportPanel::default(),
            grid: None,
        };
        app.rebuild();
        app
    }
}

impl EmVizApp {
    /// Rebuild the grid from the control settings and re-frame the camera.
    fn rebuild(&mut self) {
        match self.controls.build_grid() {
            Ok(grid) => {
                log::debug!("rebuilt {:?} grid", grid.dims());
                self.viewport.frame_grid(&grid);
                self.controls.error_message = None;
                self.grid = Some(grid);
            }
            Err(e) => {
                log::error!("Failed to rebuild grid: {}", e);
                self.controls.error_message = Some(e.to_string());
                self.grid = None;
            }
        }
    }
}

impl eframe::App for EmVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("controls_panel")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("emviz");
                ui.separator();
                self.controls.ui(ui);
            });

        if std::mem::take(&mut self.controls.rebuild_requested) {
            self.rebuild();
        }
        if std::mem::take(&mut self.controls.reset_camera_requested) {
            if let Some(grid) = &self.grid {
                self.viewport.frame_grid(grid);
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.viewport.ui(ui, self.grid.as_mut(), &self.controls);
            });
    }
}
