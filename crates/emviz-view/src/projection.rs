//! World-to-screen projection.
//!
//! Screen coordinates follow the usual windowing convention: origin at the
//! viewport's top-left corner, `y` growing downwards.

use nalgebra as na;

use emviz_core::VertexStreams;

/// A screen rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// A projected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Normalised device depth in [-1, 1]; larger is farther away.
    pub depth: f32,
}

/// Project a world point through `view_proj` onto `viewport`.
///
/// Returns `None` for points behind the camera, outside the near/far range,
/// or outside the viewport.
pub fn project_point(
    view_proj: &na::Matrix4<f32>,
    world: [f32; 3],
    viewport: &Viewport,
) -> Option<ScreenPoint> {
    let clip = view_proj * na::Vector4::new(world[0], world[1], world[2], 1.0);
    if clip.w <= 0.0 {
        return None;
    }

    let ndc = clip.xyz() / clip.w;
    if !(-1.0..=1.0).contains(&ndc.x)
        || !(-1.0..=1.0).contains(&ndc.y)
        || !(-1.0..=1.0).contains(&ndc.z)
    {
        return None;
    }

    Some(ScreenPoint {
        x: viewport.x + (ndc.x + 1.0) * 0.5 * viewport.width,
        y: viewport.y + (1.0 - ndc.y) * 0.5 * viewport.height,
        depth: ndc.z,
    })
}

/// Project every position in `streams`, returning `(point index, screen point)`
/// pairs ordered back to front so that nearer points paint last.
pub fn project_streams(
    view_proj: &na::Matrix4<f32>,
    streams: &VertexStreams,
    viewport: &Viewport,
) -> Vec<(usize, ScreenPoint)> {
    let mut visible: Vec<(usize, ScreenPoint)> = (0..streams.len())
        .filter_map(|n| project_point(view_proj, streams.position(n), viewport).map(|p| (n, p)))
        .collect();

    visible.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));
    visible
}
