//! Controls panel: grid extents, sources and display settings.

use egui::Ui;

use emviz_core::{FieldGrid, FieldKind, GridError, Vector3};

/// Largest extent offered per axis; the viewport paints every cell.
const MAX_EXTENT: usize = 48;

/// State for the controls side panel.
#[derive(Debug)]
pub struct ControlsPanel {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    /// Lattice spacing (world units).
    pub spacing: f64,
    /// Point charge position (world units).
    pub charge_position: [f64; 3],
    /// Point charge (C).
    pub charge_magnitude: f64,
    /// Uniform current contribution stamped onto the magnetic field.
    pub current_strength: f64,
    /// Which field the viewport colours by.
    pub field: FieldKind,
    /// Point radius (px).
    pub point_size: f32,
    /// Orders of magnitude covered by the colour ramp.
    pub decades: f32,
    /// Set by the UI when the user clicks "Rebuild".
    pub rebuild_requested: bool,
    /// Set by the UI when the user clicks "Reset camera".
    pub reset_camera_requested: bool,
    /// Error from the last rebuild, if any.
    pub error_message: Option<String>,
}

impl Default for ControlsPanel {
    fn default() -> Self {
        Self {
            nx: 21,
            ny: 21,
            nz: 21,
            spacing: 1.0,
            charge_position: [10.0, 10.0, 10.0],
            charge_magnitude: 1e-6,
            current_strength: 0.0,
            field: FieldKind::Electric,
            point_size: 2.5,
            decades: 3.0,
            rebuild_requested: false,
            reset_camera_requested: false,
            error_message: None,
        }
    }
}

impl ControlsPanel {
    /// Build a grid from the current settings and stamp its sources.
    pub fn build_grid(&self) -> Result<FieldGrid, GridError> {
        let mut grid = FieldGrid::new(self.nx, self.ny, self.nz, self.spacing)?;
        grid.apply_point_charge_field(Vector3::from(self.charge_position), self.charge_magnitude);
        if self.current_strength != 0.0 {
            grid.apply_current_contribution(Vector3::ZERO, self.current_strength);
        }
        Ok(grid)
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("Grid");
        ui.separator();

        ui.add(egui::Slider::new(&mut self.nx, 1..=MAX_EXTENT).text("Nx"));
        ui.add(egui::Slider::new(&mut self.ny, 1..=MAX_EXTENT).text("Ny"));
        ui.add(egui::Slider::new(&mut self.nz, 1..=MAX_EXTENT).text("Nz"));
        ui.add(
            egui::Slider::new(&mut self.spacing, 0.1..=10.0)
                .logarithmic(true)
                .text("Spacing"),
        );

        ui.add_space(12.0);
        ui.heading("Sources");
        ui.separator();

        ui.label("Charge position:");
        ui.horizontal(|ui| {
            for (axis, value) in ["x", "y", "z"].iter().zip(self.charge_position.iter_mut()) {
                ui.label(*axis);
                ui.add(egui::DragValue::new(value).speed(0.1));
            }
        });
        ui.add(
            egui::Slider::new(&mut self.charge_magnitude, -1e-3..=1e-3)
                .logarithmic(true)
                .smallest_positive(1e-12)
                .text("Charge (C)"),
        );
        ui.add(egui::Slider::new(&mut self.current_strength, -10.0..=10.0).text("Current"));

        ui.add_space(8.0);
        if ui.button("Rebuild").clicked() {
            self.rebuild_requested = true;
        }
        if let Some(err) = &self.error_message {
            ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
        }

        ui.add_space(12.0);
        ui.heading("Display");
        ui.separator();

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.field, FieldKind::Electric, "E field");
            ui.selectable_value(&mut self.field, FieldKind::Magnetic, "B field");
        });
        ui.add(egui::Slider::new(&mut self.point_size, 0.5..=8.0).text("Point size (px)"));
        ui.add(egui::Slider::new(&mut self.decades, 0.5..=8.0).text("Colour range (decades)"));
        if ui.button("Reset camera").clicked() {
            self.reset_camera_requested = true;
        }

        ui.add_space(12.0);
        ui.label(
            egui::RichText::new("W/A/S/D to fly, drag with the left button to look.")
                .weak()
                .small(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_build() {
        let panel = ControlsPanel::default();
        let grid = panel.build_grid().unwrap();
        assert_eq!(grid.dims(), (21, 21, 21));

        // The default charge sits on lattice point (10, 10, 10).
        let (e, b) = grid.samples().get(10, 10, 10).unwrap();
        assert_eq!(e, Vector3::ZERO);
        assert_eq!(b, Vector3::ZERO);
    }

    #[test]
    fn test_current_strength_is_stamped() {
        let panel = ControlsPanel { current_strength: 2.0, ..Default::default() };
        let grid = panel.build_grid().unwrap();
        let (_, b) = grid.samples().get(0, 0, 0).unwrap();
        assert_eq!(b, Vector3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_invalid_spacing_surfaces_error() {
        let panel = ControlsPanel { spacing: 0.0, ..Default::default() };
        assert!(panel.build_grid().is_err());
    }
}
