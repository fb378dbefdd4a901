//! UI command dispatch and sampling tick
//!
//! Every control event maps to exactly one [`Command`]; the glue layer
//! never mutates [`SimState`] directly. After applying a command the
//! caller re-syncs its interval timer against
//! [`SimState::timer_should_run`] and performs a full plot redraw.

use super::sampler::sample_position;
use super::state::{Mode, ScreenHit, SimState};
use crate::consts::MAX_HITS;

/// A single discrete UI action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Slit separation slider moved
    SetSlitSeparation(f32),
    /// Wavelength slider moved
    SetWavelength(f32),
    /// Mode toggle flipped
    SwitchMode(Mode),
    /// Play/pause button pressed
    TogglePlay,
    /// Reset button pressed
    Reset,
}

/// Apply one command to the state machine
///
/// Parameter changes reset accumulated results so the display never
/// mixes samples drawn under different parameters. `TogglePlay` in Wave
/// mode records the flag only; sampling starts once the mode switches.
pub fn apply_command(state: &mut SimState, cmd: Command) {
    match cmd {
        Command::SetSlitSeparation(d) => {
            state.params.set_slit_separation(d);
            state.clear_results();
        }
        Command::SetWavelength(lambda) => {
            state.params.set_wavelength(lambda);
            state.clear_results();
        }
        Command::SwitchMode(mode) => {
            state.mode = mode;
        }
        Command::TogglePlay => {
            state.playing = !state.playing;
        }
        Command::Reset => {
            state.clear_results();
        }
    }
}

/// Draw and record one particle; no-op unless playing in Particle mode
///
/// A rejection-capped draw that comes back empty skips this tick
/// entirely rather than stalling (see `sampler`).
pub fn sample_tick(state: &mut SimState) {
    if !state.timer_should_run() {
        return;
    }
    if let Some(x) = sample_position(&state.params, &mut state.rng) {
        state.histogram.record(x);
        state.hits.push(ScreenHit { x });
        if state.hits.len() > MAX_HITS {
            state.hits.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn playing_particle_state(seed: u64) -> SimState {
        let mut state = SimState::new(seed);
        apply_command(&mut state, Command::SwitchMode(Mode::Particle));
        apply_command(&mut state, Command::TogglePlay);
        state
    }

    #[test]
    fn test_tick_records_hits_while_playing() {
        let mut state = playing_particle_state(42);
        for _ in 0..200 {
            sample_tick(&mut state);
        }
        assert!(state.histogram.total() > 0);
        assert_eq!(state.histogram.total(), state.hits.len() as u64);
    }

    #[test]
    fn test_tick_noop_when_paused_or_wave() {
        let mut state = SimState::new(42);
        sample_tick(&mut state); // Wave + paused
        state.playing = true;
        sample_tick(&mut state); // Wave + playing
        state.mode = Mode::Particle;
        state.playing = false;
        sample_tick(&mut state); // Particle + paused
        assert_eq!(state.histogram.total(), 0);
        assert!(state.hits.is_empty());
    }

    #[test]
    fn test_switch_to_wave_stops_sampling() {
        let mut state = playing_particle_state(7);
        for _ in 0..50 {
            sample_tick(&mut state);
        }
        let before = state.histogram.total();
        assert!(before > 0);

        apply_command(&mut state, Command::SwitchMode(Mode::Wave));
        assert!(!state.timer_should_run());
        // Even stray ticks after the switch must not mutate the histogram
        for _ in 0..50 {
            sample_tick(&mut state);
        }
        assert_eq!(state.histogram.total(), before);
        // Playback flag survives the switch and resumes with Particle mode
        assert!(state.playing);
        apply_command(&mut state, Command::SwitchMode(Mode::Particle));
        assert!(state.timer_should_run());
    }

    #[test]
    fn test_parameter_change_resets_results() {
        let mut state = playing_particle_state(9);
        for _ in 0..50 {
            sample_tick(&mut state);
        }
        assert!(state.histogram.total() > 0);

        apply_command(&mut state, Command::SetSlitSeparation(2.0));
        assert_eq!(state.params.slit_separation, 2.0);
        assert_eq!(state.histogram.total(), 0);
        assert!(state.hits.is_empty());

        for _ in 0..10 {
            sample_tick(&mut state);
        }
        apply_command(&mut state, Command::SetWavelength(1.25));
        assert_eq!(state.params.wavelength, 1.25);
        assert_eq!(state.histogram.total(), 0);
    }

    #[test]
    fn test_toggle_play_in_wave_records_flag_only() {
        let mut state = SimState::new(3);
        apply_command(&mut state, Command::TogglePlay);
        assert!(state.playing);
        assert!(!state.timer_should_run());
        sample_tick(&mut state);
        assert_eq!(state.histogram.total(), 0);
    }

    #[test]
    fn test_reset_clears_results_only() {
        let mut state = playing_particle_state(11);
        for _ in 0..50 {
            sample_tick(&mut state);
        }
        let params = state.params;
        apply_command(&mut state, Command::Reset);
        assert_eq!(state.histogram.total(), 0);
        assert!(state.hits.is_empty());
        assert_eq!(state.params, params);
        assert_eq!(state.mode, Mode::Particle);
        assert!(state.playing);

        // Idempotence: a second reset changes nothing
        let snapshot = state.histogram.counts().to_vec();
        apply_command(&mut state, Command::Reset);
        assert_eq!(state.histogram.counts(), snapshot.as_slice());
    }

    #[test]
    fn test_determinism_same_seed_same_histogram() {
        let mut a = playing_particle_state(99999);
        let mut b = playing_particle_state(99999);
        for _ in 0..500 {
            sample_tick(&mut a);
            sample_tick(&mut b);
        }
        assert_eq!(a.histogram.counts(), b.histogram.counts());
        assert_eq!(a.hits.len(), b.hits.len());
    }

    #[test]
    fn test_hits_capped() {
        let mut state = playing_particle_state(5);
        for _ in 0..(MAX_HITS + 500) {
            sample_tick(&mut state);
        }
        assert!(state.hits.len() <= MAX_HITS);
        // histogram keeps the full total even after markers are dropped
        assert!(state.histogram.total() as usize > state.hits.len());
    }
}
