//! 3D viewport: the per-frame render loop over the field samples.
//!
//! Each frame reads keyboard and pointer input into the camera, advances the
//! grid by the frame time, then projects and paints every lattice point
//! coloured by field strength.

use egui::{Color32, Key, PointerButton, Sense, Ui};

use emviz_core::{FieldGrid, VertexStreams};
use emviz_view::colour::{field_colour, normalised_strength};
use emviz_view::{project_streams, FlyCamera, Movement, Viewport};
use nalgebra as na;

use super::controls::ControlsPanel;

/// Frame times above this are clamped so a stalled frame does not fling the camera.
const MAX_FRAME_DT: f32 = 0.1;

/// Camera and per-frame statistics for the viewport.
#[derive(Debug)]
pub struct ViewportPanel {
    pub camera: FlyCamera,
    /// Points painted in the last frame.
    pub visible_points: usize,
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self {
            camera: FlyCamera::new(
                na::Point3::new(50.0, 50.0, 150.0),
                na::Vector3::new(0.0, 0.0, -1.0),
                na::Vector3::y(),
            ),
            visible_points: 0,
        }
    }
}

impl ViewportPanel {
    /// Point the camera at the centre of `grid` from far enough to see all of it.
    pub fn frame_grid(&mut self, grid: &FieldGrid) {
        let (nx, ny, nz) = grid.dims();
        let far_corner = grid.position_of(nx - 1, ny - 1, nz - 1);
        let centre = far_corner * 0.5;
        let extent = far_corner.magnitude().max(grid.spacing()) as f32;

        let mut camera = FlyCamera::framing(
            na::Point3::new(centre.x as f32, centre.y as f32, centre.z as f32),
            extent * 1.5,
        );
        camera.speed = extent;
        camera.far = camera.far.max(extent * 10.0);
        self.camera = camera;
    }

    pub fn ui(&mut self, ui: &mut Ui, grid: Option<&mut FieldGrid>, controls: &ControlsPanel) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, Color32::BLACK);

        let ctx = ui.ctx().clone();
        let dt = ctx.input(|i| i.stable_dt).min(MAX_FRAME_DT);

        if !ctx.wants_keyboard_input() {
            let movement = ctx.input(|i| Movement {
                forward: i.key_down(Key::W),
                backward: i.key_down(Key::S),
                left: i.key_down(Key::A),
                right: i.key_down(Key::D),
            });
            if !movement.is_idle() {
                self.camera.process_movement(movement, dt);
            }
        }

        let dragging = response.dragged_by(PointerButton::Primary);
        match ctx.input(|i| i.pointer.latest_pos()) {
            Some(pos) => self.camera.process_cursor(pos.x, pos.y, dragging),
            None => self.camera.process_cursor(0.0, 0.0, false),
        }

        let Some(grid) = grid else {
            self.visible_points = 0;
            return;
        };

        grid.update(f64::from(dt));

        let streams = VertexStreams::from_samples(&grid.samples(), controls.field);
        let max = streams.max_magnitude();

        let viewport = Viewport {
            x: rect.min.x,
            y: rect.min.y,
            width: rect.width(),
            height: rect.height(),
        };
        let view_proj = self.camera.view_projection(viewport.aspect());
        let projected = project_streams(&view_proj, &streams, &viewport);
        self.visible_points = projected.len();

        for (n, p) in &projected {
            let t = normalised_strength(streams.magnitudes[*n], max, controls.decades);
            let [r, g, b] = field_colour(t);
            painter.circle_filled(
                egui::pos2(p.x, p.y),
                controls.point_size,
                Color32::from_rgb(r, g, b),
            );
        }

        let (nx, ny, nz) = grid.dims();
        painter.text(
            rect.left_top() + egui::vec2(8.0, 8.0),
            egui::Align2::LEFT_TOP,
            format!(
                "{}x{}x{} grid, {} points visible, max |field| {:.3e}, t = {:.2}",
                nx,
                ny,
                nz,
                self.visible_points,
                max,
                grid.elapsed()
            ),
            egui::FontId::monospace(12.0),
            Color32::LIGHT_GRAY,
        );

        ctx.request_repaint();
    }
}
