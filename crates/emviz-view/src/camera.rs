//! Free-fly camera.
//!
//! Orientation is kept as yaw/pitch angles in degrees; the `front` vector is
//! recomputed from them after every mouse-look update:
//!
//! ```text
//! front = normalise(cos(yaw)·cos(pitch), sin(pitch), sin(yaw)·cos(pitch))
//! ```
//!
//! With the default yaw of −90° and pitch of 0° the camera looks down −z.

use nalgebra as na;

/// Pitch limit (degrees) keeping `front` away from the `up` axis.
const PITCH_LIMIT: f32 = 89.0;

/// Movement keys held during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl Movement {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// A camera that flies freely through the scene.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: na::Point3<f32>,
    /// Unit view direction.
    pub front: na::Vector3<f32>,
    pub up: na::Vector3<f32>,
    /// Degrees.
    pub yaw: f32,
    /// Degrees, clamped to ±89.
    pub pitch: f32,
    /// Degrees of rotation per pixel of mouse travel.
    pub sensitivity: f32,
    /// World units per second.
    pub speed: f32,
    /// Vertical field of view (radians).
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Cursor position at the previous drag sample.
    last_cursor: Option<(f32, f32)>,
}

impl FlyCamera {
    pub fn new(
        position: na::Point3<f32>,
        front: na::Vector3<f32>,
        up: na::Vector3<f32>,
    ) -> Self {
        Self {
            position,
            front: front.try_normalize(f32::EPSILON).unwrap_or(-na::Vector3::z()),
            up,
            yaw: -90.0,
            pitch: 0.0,
            sensitivity: 0.1,
            speed: 1000.0,
            fov_y: 45f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            last_cursor: None,
        }
    }

    /// Camera `distance` units in front of `target` along +z, looking down −z.
    pub fn framing(target: na::Point3<f32>, distance: f32) -> Self {
        Self::new(
            target + na::Vector3::new(0.0, 0.0, distance),
            -na::Vector3::z(),
            na::Vector3::y(),
        )
    }

    /// Translate the camera for one frame of held movement keys.
    pub fn process_movement(&mut self, movement: Movement, dt: f32) {
        let velocity = self.speed * dt;

        if movement.forward {
            self.position += self.front * velocity;
        }
        if movement.backward {
            self.position -= self.front * velocity;
        }

        // Strafing is undefined while looking straight along `up`.
        if let Some(right) = self.front.cross(&self.up).try_normalize(f32::EPSILON) {
            if movement.left {
                self.position -= right * velocity;
            }
            if movement.right {
                self.position += right * velocity;
            }
        }
    }

    /// Feed a cursor sample. Only rotates while `dragging`; the first sample
    /// of each drag just records the cursor.
    pub fn process_cursor(&mut self, x: f32, y: f32, dragging: bool) {
        if !dragging {
            self.last_cursor = None;
            return;
        }

        let Some((last_x, last_y)) = self.last_cursor.replace((x, y)) else {
            return;
        };

        let x_offset = (x - last_x) * self.sensitivity;
        let y_offset = (last_y - y) * self.sensitivity;

        self.yaw -= x_offset;
        self.pitch = (self.pitch - y_offset).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.front = direction(self.yaw, self.pitch);
    }

    /// Right-handed look-at matrix from `position` towards `position + front`.
    pub fn view_matrix(&self) -> na::Matrix4<f32> {
        let target = self.position + self.front;
        na::Matrix4::look_at_rh(&self.position, &target, &self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> na::Matrix4<f32> {
        na::Perspective3::new(aspect, self.fov_y, self.near, self.far).to_homogeneous()
    }

    /// `projection * view`.
    pub fn view_projection(&self, aspect: f32) -> na::Matrix4<f32> {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

fn direction(yaw_deg: f32, pitch_deg: f32) -> na::Vector3<f32> {
    let (yaw, pitch) = (yaw_deg.to_radians(), pitch_deg.to_radians());
    na::Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_camera() -> FlyCamera {
        FlyCamera::new(
            na::Point3::new(50.0, 50.0, 150.0),
            na::Vector3::new(0.0, 0.0, -1.0),
            na::Vector3::y(),
        )
    }

    #[test]
    fn test_default_angles_match_front() {
        let cam = default_camera();
        let d = direction(cam.yaw, cam.pitch);
        assert_relative_eq!(d, cam.front, epsilon = 1e-6);
    }

    #[test]
    fn test_forward_moves_along_front() {
        let mut cam = default_camera();
        cam.process_movement(Movement { forward: true, ..Default::default() }, 0.005);
        assert_relative_eq!(cam.position, na::Point3::new(50.0, 50.0, 145.0), epsilon = 1e-4);

        cam.process_movement(Movement { backward: true, ..Default::default() }, 0.005);
        assert_relative_eq!(cam.position, na::Point3::new(50.0, 50.0, 150.0), epsilon = 1e-4);
    }

    #[test]
    fn test_strafe_uses_front_cross_up() {
        let mut cam = default_camera();
        cam.speed = 2.0;
        cam.process_movement(Movement { right: true, ..Default::default() }, 1.0);
        // (0,0,-1) × (0,1,0) = (1,0,0)
        assert_relative_eq!(cam.position, na::Point3::new(52.0, 50.0, 150.0), epsilon = 1e-5);

        cam.process_movement(Movement { left: true, ..Default::default() }, 0.5);
        assert_relative_eq!(cam.position, na::Point3::new(51.0, 50.0, 150.0), epsilon = 1e-5);
    }

    #[test]
    fn test_first_drag_sample_does_not_rotate() {
        let mut cam = default_camera();
        let front = cam.front;
        cam.process_cursor(300.0, 200.0, true);
        assert_eq!(cam.front, front);
        assert_eq!(cam.yaw, -90.0);

        cam.process_cursor(310.0, 200.0, true);
        assert_relative_eq!(cam.yaw, -91.0, epsilon = 1e-5);
    }

    #[test]
    fn test_releasing_drag_resets_anchor() {
        let mut cam = default_camera();
        cam.process_cursor(0.0, 0.0, true);
        cam.process_cursor(0.0, 0.0, false);
        // A new drag far away must not produce a jump.
        cam.process_cursor(500.0, 500.0, true);
        assert_eq!(cam.yaw, -90.0);
        assert_eq!(cam.pitch, 0.0);
    }

    #[test]
    fn test_cursor_ignored_without_drag() {
        let mut cam = default_camera();
        cam.process_cursor(10.0, 10.0, false);
        cam.process_cursor(90.0, 40.0, false);
        assert_eq!(cam.yaw, -90.0);
        assert_eq!(cam.pitch, 0.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut cam = default_camera();
        cam.process_cursor(0.0, 0.0, true);
        cam.process_cursor(0.0, 5000.0, true);
        assert_eq!(cam.pitch, 89.0);

        cam.process_cursor(0.0, -10000.0, true);
        assert_eq!(cam.pitch, -89.0);
        assert!(cam.front.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_view_matrix_maps_target_onto_negative_z() {
        let cam = default_camera();
        let target = na::Point3::new(50.0, 50.0, 100.0);
        let eye_space = cam.view_matrix().transform_point(&target);
        assert_relative_eq!(eye_space, na::Point3::new(0.0, 0.0, -50.0), epsilon = 1e-4);
    }

    #[test]
    fn test_framing_places_camera_on_z_axis() {
        let cam = FlyCamera::framing(na::Point3::new(1.0, 2.0, 3.0), 10.0);
        assert_eq!(cam.position, na::Point3::new(1.0, 2.0, 13.0));
        assert_eq!(cam.front, na::Vector3::new(0.0, 0.0, -1.0));
    }
}
