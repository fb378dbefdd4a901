//! 3D experiment scene: orbit camera and mesh generation
//!
//! The scene is cosmetic; slit positions track the live slit separation
//! but nothing rendered here feeds back into the sampler.

use glam::{Mat4, Vec3};

use super::vertex::{SceneVertex, colors};
use crate::consts::*;

/// Perspective orbit camera around the experiment axis
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians
    pub yaw: f32,
    /// Vertical rotation angle in radians
    pub pitch: f32,
    /// Distance from the target point
    pub distance: f32,
    /// Point the camera orbits around
    pub target: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: -0.6,
            pitch: 0.35,
            distance: 14.0,
            target: Vec3::new(0.0, 0.0, SCREEN_DISTANCE / 2.0),
        }
    }
}

impl OrbitCamera {
    /// Camera world position
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Apply a mouse drag in pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let sensitivity = 0.008;
        self.yaw -= dx * sensitivity;
        // Keep the camera off the poles
        self.pitch = (self.pitch + dy * sensitivity).clamp(-1.4, 1.4);
    }

    /// Apply a wheel delta (positive zooms out)
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 + delta * 0.001)).clamp(4.0, 50.0);
    }

    /// Combined view-projection matrix for the given aspect ratio
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(50f32.to_radians(), aspect, 0.1, 200.0);
        let view = Mat4::look_at_rh(self.position(), self.target, Vec3::Y);
        proj * view
    }
}

/// Axis-aligned rectangle in a z-plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRect {
    pub x0: f32,
    pub x1: f32,
    pub y0: f32,
    pub y1: f32,
}

impl PanelRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > self.x0 && x < self.x1 && y > self.y0 && y < self.y1
    }

    fn is_valid(&self) -> bool {
        self.x1 > self.x0 && self.y1 > self.y0
    }
}

/// Barrier panels for slit separation `d`: solid rectangles covering the
/// barrier plane except two slit apertures centered at `x = ±d/2`
pub fn barrier_panels(d: f32) -> Vec<PanelRect> {
    let hw = SCREEN_HALF_WIDTH;
    let hh = SCREEN_HALF_HEIGHT;
    let sw = SLIT_WIDTH / 2.0;
    let sh = SLIT_HEIGHT / 2.0;
    let left_slit = -d / 2.0;
    let right_slit = d / 2.0;

    let mut panels = vec![
        // full-height side panels
        PanelRect {
            x0: -hw,
            x1: left_slit - sw,
            y0: -hh,
            y1: hh,
        },
        PanelRect {
            x0: right_slit + sw,
            x1: hw,
            y0: -hh,
            y1: hh,
        },
        // center column between the slits (vanishes when the slits merge)
        PanelRect {
            x0: left_slit + sw,
            x1: right_slit - sw,
            y0: -hh,
            y1: hh,
        },
    ];

    // strips above and below each slit aperture
    for slit in [left_slit, right_slit] {
        panels.push(PanelRect {
            x0: slit - sw,
            x1: slit + sw,
            y0: sh,
            y1: hh,
        });
        panels.push(PanelRect {
            x0: slit - sw,
            x1: slit + sw,
            y0: -hh,
            y1: -sh,
        });
    }

    panels.retain(|p| p.is_valid());
    panels
}

fn quad(rect: &PanelRect, z: f32, color: [f32; 4], out: &mut Vec<SceneVertex>) {
    let (x0, x1, y0, y1) = (rect.x0, rect.x1, rect.y0, rect.y1);
    out.push(SceneVertex::new(x0, y0, z, color));
    out.push(SceneVertex::new(x1, y0, z, color));
    out.push(SceneVertex::new(x1, y1, z, color));

    out.push(SceneVertex::new(x1, y1, z, color));
    out.push(SceneVertex::new(x0, y1, z, color));
    out.push(SceneVertex::new(x0, y0, z, color));
}

/// Barrier mesh with two slit cutouts, front and back faces
pub fn barrier(d: f32) -> Vec<SceneVertex> {
    let mut vertices = Vec::new();
    for panel in barrier_panels(d) {
        quad(&panel, -BARRIER_DEPTH / 2.0, colors::BARRIER, &mut vertices);
        quad(&panel, BARRIER_DEPTH / 2.0, colors::BARRIER_EDGE, &mut vertices);
    }
    vertices
}

/// Detection screen plane at `z = L`
pub fn detection_screen() -> Vec<SceneVertex> {
    let mut vertices = Vec::new();
    quad(
        &PanelRect {
            x0: -SCREEN_HALF_WIDTH,
            x1: SCREEN_HALF_WIDTH,
            y0: -SCREEN_HALF_HEIGHT,
            y1: SCREEN_HALF_HEIGHT,
        },
        SCREEN_DISTANCE,
        colors::SCREEN,
        &mut vertices,
    );
    vertices
}

/// Marker size on the screen plane
const MARKER_SIZE: f32 = 0.05;

/// Quad markers for the most recent `max` hits, drawn just in front of
/// the screen plane at `y = 0`
pub fn hit_markers(hits: &[crate::sim::ScreenHit], max: usize) -> Vec<SceneVertex> {
    let start = hits.len().saturating_sub(max);
    let mut vertices = Vec::with_capacity((hits.len() - start) * 6);
    for hit in &hits[start..] {
        quad(
            &PanelRect {
                x0: hit.x - MARKER_SIZE,
                x1: hit.x + MARKER_SIZE,
                y0: -MARKER_SIZE,
                y1: MARKER_SIZE,
            },
            SCREEN_DISTANCE - 0.02,
            colors::MARKER,
            &mut vertices,
        );
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ScreenHit;

    #[test]
    fn test_panels_avoid_slit_apertures() {
        for d in [0.5, 1.0, 2.0, 5.0] {
            let panels = barrier_panels(d);
            for slit in [-d / 2.0, d / 2.0] {
                // probe the middle of each aperture
                assert!(
                    panels.iter().all(|p| !p.contains(slit, 0.0)),
                    "panel covers slit center at d={d}"
                );
            }
        }
    }

    #[test]
    fn test_panels_cover_solid_barrier() {
        let d = 1.0;
        let panels = barrier_panels(d);
        // points well away from the apertures must be covered
        for (x, y) in [(-3.0, 0.0), (3.0, 0.0), (0.0, 0.0), (0.5, 1.8), (-0.5, -1.8)] {
            assert!(
                panels.iter().any(|p| p.contains(x, y)),
                "barrier has a hole at ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_merged_slits_drop_center_panel() {
        // d smaller than the slit width leaves no room for a center column
        let panels = barrier_panels(0.1);
        assert!(panels.iter().all(|p| p.x1 > p.x0 && p.y1 > p.y0));
    }

    #[test]
    fn test_marker_count_capped() {
        let hits: Vec<ScreenHit> = (0..100).map(|i| ScreenHit { x: i as f32 * 0.01 }).collect();
        assert_eq!(hit_markers(&hits, 10).len(), 10 * 6);
        assert_eq!(hit_markers(&hits, 1000).len(), 100 * 6);
    }

    #[test]
    fn test_camera_position_respects_distance() {
        let camera = OrbitCamera::default();
        let to_target = camera.position() - camera.target;
        assert!((to_target.length() - camera.distance).abs() < 1e-4);
    }
}
