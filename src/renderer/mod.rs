//! WebGPU rendering module
//!
//! Two independent surfaces: a 3D experiment scene (barrier, slits,
//! detection screen, hit markers) with an orbit camera, and a 2D plot
//! (theoretical curve / histogram). Both rebuild their geometry in full
//! on every redraw; nothing here feeds back into the simulation.

pub mod plot;
pub mod plot_pipeline;
pub mod scene;
pub mod scene_pipeline;
pub mod vertex;

pub use plot_pipeline::PlotRenderState;
pub use scene::OrbitCamera;
pub use scene_pipeline::SceneRenderState;
pub use vertex::{PlotVertex, SceneVertex, colors};
