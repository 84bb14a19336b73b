//! stomp: kinematic movement and collision core for tile platformers
//! (ephemeral per-frame terrain, axis-separated resolution)

pub mod config;
pub mod physics;
pub mod resolve;
pub mod state;
pub mod step;
pub mod terrain;
pub mod types;

pub use crate::config::{Tuning, TuningError};
pub use crate::resolve::{resolve, resolve_and_apply};
pub use crate::state::{MovementState, StateMachine, Traits};
pub use crate::step::Stepper;
pub use crate::terrain::{gather, BreakableTiles, RectSet, TerrainSource};
pub use crate::types::*;
