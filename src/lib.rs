//! Slitviz - an interactive double-slit experiment visualizer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (intensity law, rejection sampler, histogram, mode state machine)
//! - `renderer`: WebGPU rendering for the 3D experiment scene and the 2D intensity plot
//! - `nav`: Responsive dropdown navigation for the surrounding site shell
//! - `settings`: User preferences persisted to LocalStorage

#[cfg(target_arch = "wasm32")]
pub mod nav;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Experiment configuration constants
pub mod consts {
    /// Barrier-to-screen distance `L`
    pub const SCREEN_DISTANCE: f32 = 10.0;
    /// Detection screen half-width `X`; the sampling domain is `[-X, X)`
    pub const SCREEN_HALF_WIDTH: f32 = 5.0;
    /// Detection screen half-height `Y` (cosmetic, sets scene proportions)
    pub const SCREEN_HALF_HEIGHT: f32 = 2.0;

    /// Number of fixed-width histogram bins across the screen
    pub const HISTOGRAM_BINS: usize = 100;
    /// Evenly spaced sample points for the theoretical curve
    pub const CURVE_SAMPLES: usize = 400;
    /// Rejection sampler retry cap before a draw is skipped
    pub const MAX_SAMPLE_TRIES: u32 = 1000;
    /// Milliseconds between automatic sampling ticks while playing
    pub const SAMPLE_INTERVAL_MS: i32 = 50;
    /// Stored screen hits beyond this are dropped oldest-first
    pub const MAX_HITS: usize = 4096;

    /// Slit separation slider range (`d`, one decimal displayed)
    pub const SLIT_SEPARATION_MIN: f32 = 0.1;
    pub const SLIT_SEPARATION_MAX: f32 = 5.0;
    pub const DEFAULT_SLIT_SEPARATION: f32 = 1.0;

    /// Wavelength slider range (`lambda`, two decimals displayed)
    pub const WAVELENGTH_MIN: f32 = 0.05;
    pub const WAVELENGTH_MAX: f32 = 2.0;
    pub const DEFAULT_WAVELENGTH: f32 = 0.5;

    /// Barrier geometry (cosmetic only, not part of the computation)
    pub const BARRIER_DEPTH: f32 = 0.15;
    pub const SLIT_WIDTH: f32 = 0.3;
    pub const SLIT_HEIGHT: f32 = 1.2;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
