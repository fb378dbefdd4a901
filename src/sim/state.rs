//! Simulation state and core types
//!
//! All state that drives the visualizer lives here, owned by a single
//! [`SimState`] for the lifetime of the page.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Display mode for the plot panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Theoretical interference intensity curve
    Wave,
    /// Accumulating particle-hit histogram
    Particle,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Wave => "wave",
            Mode::Particle => "particle",
        }
    }
}

/// Physical parameters of the experiment
///
/// The screen distance `L` and screen extents are fixed in `consts`;
/// only the slit separation and wavelength are user-adjustable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    /// Slit separation `d`
    pub slit_separation: f32,
    /// Wavelength `lambda`
    pub wavelength: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            slit_separation: DEFAULT_SLIT_SEPARATION,
            wavelength: DEFAULT_WAVELENGTH,
        }
    }
}

impl SimParams {
    /// Set the slit separation, clamped to the slider range (keeps `d > 0`)
    pub fn set_slit_separation(&mut self, d: f32) {
        self.slit_separation = d.clamp(SLIT_SEPARATION_MIN, SLIT_SEPARATION_MAX);
    }

    /// Set the wavelength, clamped to the slider range (keeps `lambda > 0`)
    pub fn set_wavelength(&mut self, lambda: f32) {
        self.wavelength = lambda.clamp(WAVELENGTH_MIN, WAVELENGTH_MAX);
    }
}

/// A detected particle on the screen plane (visual only)
///
/// The hit sits at `(x, 0, L)` in scene coordinates; only `x` carries
/// information, and nothing reads hits back into the computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenHit {
    pub x: f32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving the rejection sampler
    pub rng: Pcg32,
    /// Current experiment parameters
    pub params: SimParams,
    /// Active display mode
    pub mode: Mode,
    /// Playback flag; sampling only runs while `mode == Particle`
    pub playing: bool,
    /// Per-bin hit counts over `[-X, X]`
    pub histogram: super::Histogram,
    /// Detected hits for marker rendering (oldest dropped past MAX_HITS)
    pub hits: Vec<ScreenHit>,
}

impl SimState {
    /// Create the initial state: Wave mode, paused, default parameters
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            params: SimParams::default(),
            mode: Mode::Wave,
            playing: false,
            histogram: super::Histogram::new(HISTOGRAM_BINS, SCREEN_HALF_WIDTH),
            hits: Vec::new(),
        }
    }

    /// Whether the sampling timer should currently be running
    ///
    /// Invariant for the glue layer: an interval handle exists iff this
    /// returns true.
    pub fn timer_should_run(&self) -> bool {
        self.playing && self.mode == Mode::Particle
    }

    /// Drop all accumulated results, leaving parameters and mode alone
    pub fn clear_results(&mut self) {
        self.histogram.reset();
        self.hits.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SimState::new(7);
        assert_eq!(state.mode, Mode::Wave);
        assert!(!state.playing);
        assert_eq!(state.histogram.total(), 0);
        assert!(state.hits.is_empty());
        assert_eq!(state.params, SimParams::default());
    }

    #[test]
    fn test_param_setters_clamp() {
        let mut params = SimParams::default();
        params.set_slit_separation(-1.0);
        assert_eq!(params.slit_separation, SLIT_SEPARATION_MIN);
        params.set_wavelength(1000.0);
        assert_eq!(params.wavelength, WAVELENGTH_MAX);
        params.set_slit_separation(2.5);
        assert_eq!(params.slit_separation, 2.5);
    }

    #[test]
    fn test_timer_predicate() {
        let mut state = SimState::new(1);
        assert!(!state.timer_should_run());
        state.playing = true;
        assert!(!state.timer_should_run()); // still in Wave mode
        state.mode = Mode::Particle;
        assert!(state.timer_should_run());
    }
}
