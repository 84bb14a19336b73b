//! Per-frame driver: the fixed intra-frame order lives here.
//!
//! integrate -> gather terrain -> resolve+apply -> state machine. Nothing
//! suspends or blocks; one call is one rendered frame.

use crate::config::Tuning;
use crate::physics;
use crate::resolve;
use crate::state::StateMachine;
use crate::terrain::{self, TerrainSource};
use crate::types::{Body, InputFrame, Rect, Resolution};

/// Owns the frame-local terrain scratch buffer so the union allocation is
/// reused across frames.
#[derive(Debug, Default)]
pub struct Stepper {
    rects: Vec<Rect>,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// The terrain union gathered for the last frame (debug overlays).
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Advance one frame.
    pub fn step(
        &mut self,
        body: &mut Body,
        machine: &mut StateMachine,
        input: &InputFrame,
        sources: &[&dyn TerrainSource],
        dt: f32,
        cfg: &Tuning,
    ) -> Resolution {
        physics::drive(body, machine.control_axis(input), dt, cfg);
        physics::integrate(body, dt, cfg);
        terrain::gather(sources, &mut self.rects);
        let res = resolve::resolve_and_apply(body, &self.rects, dt, cfg);
        machine.update(body, input, &res, dt, cfg);
        res
    }
}
