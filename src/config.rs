//! Tuning constants, their defaults, and the RON loader.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Every numeric knob of the movement core in one place.
///
/// All speeds are px/s, durations are seconds, positions are px. Fields not
/// present in a loaded file keep their defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed timestep the numbers below were tuned against. Callers that
    /// step at a fixed rate should pass this as their dt.
    pub dt: f32,

    // Integrator ------------------------------------------------------------
    /// Downward acceleration while airborne.
    pub gravity: f32,
    /// Gravity multiplier while ascending (vel.y < 0); < 1 gives jump hang.
    pub ascend_gravity_scale: f32,
    /// Terminal fall speed clamp.
    pub terminal_fall_speed: f32,
    /// Hard horizontal speed clamp, independent of input source (slides and
    /// knockback included).
    pub max_horizontal_speed: f32,
    /// Target speed of input-driven running; must not exceed the hard clamp.
    pub max_run_speed: f32,
    pub run_accel: f32,
    pub run_decel: f32,

    // State machine ---------------------------------------------------------
    /// Upward jump impulse before the per-character scale.
    pub jump_impulse: f32,
    /// Initial slide dash speed.
    pub slide_speed: f32,
    /// Multiplicative per-frame slide decay, in (0, 1).
    pub slide_decay: f32,
    /// Slide exits once speed decays below this.
    pub slide_min_speed: f32,
    /// Total length of the Hit state.
    pub hit_duration: f32,
    /// Fraction of `hit_duration` during which only Hit/Exploding/Dead may
    /// pre-empt the state (the super-armor window).
    pub hit_armor_fraction: f32,
    /// Horizontal knockback speed applied on a landed hit.
    pub hit_knockback: f32,
    /// Upward pop applied alongside the knockback, lifting the body off the
    /// ground.
    pub hit_pop: f32,
    /// Base invincibility length before the per-character scale.
    pub invincibility_duration: f32,
    /// Length of the Exploding state before Dead.
    pub explosion_duration: f32,

    // Resolver --------------------------------------------------------------
    /// Separation epsilon kept between a resolved body and terrain.
    pub skin: f32,
    /// Horizontal inset of the ground probe from the body's edges.
    pub probe_inset: f32,
    /// How far a rect top may sit from the feet and still count as ground.
    pub probe_tolerance: f32,
    /// Minimal horizontal overlap for the ground probe to accept a rect.
    pub probe_overlap_eps: f32,
    /// Below this speed, direction-dependent branches keep their previous
    /// classification instead of recomputing from noise.
    pub min_speed: f32,
    /// Anti-stuck valve: movement under this distance counts as stalled.
    pub stall_threshold: f32,
    /// Anti-stuck valve: consecutive stalled frames before a nudge.
    pub stall_frames: u32,
    /// Anti-stuck valve: nudge distance opposite the dominant velocity.
    pub stall_nudge: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            gravity: 1800.0,
            ascend_gravity_scale: 0.7,
            terminal_fall_speed: 900.0,
            max_horizontal_speed: 600.0,
            max_run_speed: 320.0,
            run_accel: 3000.0,
            run_decel: 2600.0,
            jump_impulse: 680.0,
            slide_speed: 540.0,
            slide_decay: 0.92,
            slide_min_speed: 60.0,
            hit_duration: 0.5,
            hit_armor_fraction: 0.5,
            hit_knockback: 260.0,
            hit_pop: 220.0,
            invincibility_duration: 1.5,
            explosion_duration: 1.2,
            skin: 0.01,
            probe_inset: 2.0,
            probe_tolerance: 1.0,
            probe_overlap_eps: 0.5,
            min_speed: 1.0,
            stall_threshold: 0.05,
            stall_frames: 4,
            stall_nudge: 1.0,
        }
    }
}

/// Failure modes of loading or validating a tuning file.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

impl Tuning {
    /// Parse a RON document; omitted fields keep defaults.
    pub fn from_ron_str(s: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = ron::from_str(s)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        Self::from_ron_str(&std::fs::read_to_string(path)?)
    }

    /// Reject values the simulation cannot run on.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.dt <= 0.0 {
            return Err(TuningError::Invalid("dt must be positive"));
        }
        if self.gravity <= 0.0 {
            return Err(TuningError::Invalid("gravity must be positive"));
        }
        if !(0.0..=1.0).contains(&self.ascend_gravity_scale) {
            return Err(TuningError::Invalid("ascend_gravity_scale must be in [0, 1]"));
        }
        if self.terminal_fall_speed <= 0.0 || self.max_horizontal_speed <= 0.0 {
            return Err(TuningError::Invalid("speed clamps must be positive"));
        }
        if self.max_run_speed <= 0.0 || self.max_run_speed > self.max_horizontal_speed {
            return Err(TuningError::Invalid(
                "max_run_speed must be positive and within the horizontal clamp",
            ));
        }
        if !(self.slide_decay > 0.0 && self.slide_decay < 1.0) {
            return Err(TuningError::Invalid("slide_decay must be in (0, 1)"));
        }
        if !(0.0..=1.0).contains(&self.hit_armor_fraction) {
            return Err(TuningError::Invalid("hit_armor_fraction must be in [0, 1]"));
        }
        if self.hit_duration <= 0.0 || self.explosion_duration <= 0.0 {
            return Err(TuningError::Invalid("state durations must be positive"));
        }
        if self.skin <= 0.0 {
            return Err(TuningError::Invalid("skin must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let t = Tuning::default();
        t.validate().unwrap();
        assert_eq!(t.dt, 1.0 / 60.0);
    }

    #[test]
    fn test_partial_ron_overrides() {
        let t = Tuning::from_ron_str("(gravity: 2000.0, slide_decay: 0.9)").unwrap();
        assert_eq!(t.gravity, 2000.0);
        assert_eq!(t.slide_decay, 0.9);
        // untouched fields keep defaults
        assert_eq!(t.max_run_speed, Tuning::default().max_run_speed);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_ron_str("(gravity: -5.0)"),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_ron_str("(slide_decay: 1.5)"),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_ron_str("(hit_armor_fraction: 2.0)"),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_ron_str("(dt: 0.0)"),
            Err(TuningError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Tuning::from_ron_str("not ron at all"),
            Err(TuningError::Parse(_))
        ));
    }
}
