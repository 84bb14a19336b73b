//! Movement state machine for the controllable body.
//!
//! All mutation funnels through one `set_state` gate: identical-state
//! requests are no-ops, the early fraction of Hit rejects everything except
//! Hit/Exploding/Dead (super-armor), Exploding accepts only Dead, and Dead
//! accepts nothing. External damage and death triggers come in through
//! [`StateMachine::hit`] and [`StateMachine::start_explosion`] and are
//! idempotent.

use glam::Vec2;
use log::{debug, trace};

use crate::config::Tuning;
use crate::types::{Body, InputFrame, Resolution};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MovementState {
    Idle,
    Walk,
    Jump,
    Duck,
    Slide,
    Hit,
    Exploding,
    Dead,
}

/// Per-character multipliers applied on top of the shared tuning.
#[derive(Copy, Clone, Debug)]
pub struct Traits {
    pub jump_scale: f32,
    pub invincibility_scale: f32,
}

impl Default for Traits {
    fn default() -> Self {
        Self {
            jump_scale: 1.0,
            invincibility_scale: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StateMachine {
    state: MovementState,
    /// Seconds since the current state was entered. Keeps advancing in Dead
    /// for death-animation pacing.
    state_time: f32,
    invincibility_timer: f32,
    slide_speed: f32,
    slide_dir: f32,
    traits: Traits,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new(Traits::default())
    }
}

impl StateMachine {
    pub fn new(traits: Traits) -> Self {
        Self {
            state: MovementState::Idle,
            state_time: 0.0,
            invincibility_timer: 0.0,
            slide_speed: 0.0,
            slide_dir: 1.0,
            traits,
        }
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    pub fn invincible(&self) -> bool {
        self.invincibility_timer > 0.0
    }

    /// Collision height for external interaction checks; halved while the
    /// body is ducking or sliding. The resolver keeps the full height.
    pub fn effective_half_height(&self, body: &Body) -> f32 {
        match self.state {
            MovementState::Duck | MovementState::Slide => body.half.y * 0.5,
            _ => body.half.y,
        }
    }

    /// Horizontal intent the integrator may act on in the current state.
    /// Slide forces its own velocity; Hit/Exploding/Dead strip control.
    pub fn control_axis(&self, input: &InputFrame) -> f32 {
        match self.state {
            MovementState::Idle | MovementState::Walk | MovementState::Jump => input.axis(),
            _ => 0.0,
        }
    }

    /// The single legality gate. Returns whether the transition happened.
    fn set_state(&mut self, next: MovementState, cfg: &Tuning) -> bool {
        if next == self.state {
            return false;
        }
        match self.state {
            MovementState::Dead => return false,
            MovementState::Exploding => {
                if next != MovementState::Dead {
                    return false;
                }
            }
            MovementState::Hit => {
                let armor = cfg.hit_duration * cfg.hit_armor_fraction;
                let shielded = self.state_time < armor;
                let overriding = matches!(
                    next,
                    MovementState::Hit | MovementState::Exploding | MovementState::Dead
                );
                if shielded && !overriding {
                    return false;
                }
            }
            _ => {}
        }
        trace!("movement state {:?} -> {:?}", self.state, next);
        self.state = next;
        self.state_time = 0.0;
        true
    }

    fn jump(&mut self, body: &mut Body, cfg: &Tuning) {
        if self.set_state(MovementState::Jump, cfg) {
            body.vel.y = -cfg.jump_impulse * self.traits.jump_scale;
            body.grounded = false;
        }
    }

    fn begin_slide(&mut self, body: &mut Body, axis: f32, cfg: &Tuning) {
        if self.set_state(MovementState::Slide, cfg) {
            self.slide_dir = axis.signum();
            self.slide_speed = cfg.slide_speed;
            body.vel.x = self.slide_dir * self.slide_speed;
        }
    }

    /// Pick the grounded stand-up state from current input.
    fn landing_state(input: &InputFrame) -> MovementState {
        if input.down {
            MovementState::Duck
        } else if input.axis() != 0.0 {
            MovementState::Walk
        } else {
            MovementState::Idle
        }
    }

    /// Advance the machine one frame, after resolution.
    pub fn update(
        &mut self,
        body: &mut Body,
        input: &InputFrame,
        res: &Resolution,
        dt: f32,
        cfg: &Tuning,
    ) {
        self.state_time += dt;
        if self.invincibility_timer > 0.0 {
            self.invincibility_timer = (self.invincibility_timer - dt).max(0.0);
        }

        match self.state {
            MovementState::Idle | MovementState::Walk => {
                if !res.grounded {
                    self.set_state(MovementState::Jump, cfg);
                } else if input.jump {
                    self.jump(body, cfg);
                } else if input.down && input.axis() != 0.0 {
                    self.begin_slide(body, input.axis(), cfg);
                } else if input.down {
                    self.set_state(MovementState::Duck, cfg);
                } else if input.axis() != 0.0 {
                    self.set_state(MovementState::Walk, cfg);
                } else {
                    self.set_state(MovementState::Idle, cfg);
                }
            }
            MovementState::Duck => {
                if !res.grounded {
                    self.set_state(MovementState::Jump, cfg);
                } else if input.down && input.axis() != 0.0 {
                    self.begin_slide(body, input.axis(), cfg);
                } else if !input.down {
                    self.set_state(Self::landing_state(input), cfg);
                }
            }
            MovementState::Jump => {
                if res.grounded {
                    self.set_state(Self::landing_state(input), cfg);
                }
            }
            MovementState::Slide => {
                if !res.grounded {
                    self.set_state(MovementState::Jump, cfg);
                } else if !input.down || self.slide_speed < cfg.slide_min_speed {
                    body.vel.x = 0.0;
                    self.set_state(MovementState::Duck, cfg);
                } else {
                    body.vel.x = self.slide_dir * self.slide_speed;
                    self.slide_speed *= cfg.slide_decay;
                }
            }
            MovementState::Hit => {
                if self.state_time >= cfg.hit_duration {
                    // Recovery stands the body up: Walk or Idle only, even
                    // with down held.
                    if !res.grounded {
                        self.set_state(MovementState::Jump, cfg);
                    } else if input.axis() != 0.0 {
                        self.set_state(MovementState::Walk, cfg);
                    } else {
                        self.set_state(MovementState::Idle, cfg);
                    }
                }
            }
            MovementState::Exploding => {
                body.vel = Vec2::ZERO;
                if self.state_time >= cfg.explosion_duration {
                    self.set_state(MovementState::Dead, cfg);
                }
            }
            // Terminal; only the timer moves.
            MovementState::Dead => {}
        }
    }

    /// External damage trigger. `knock_dir` is the horizontal direction the
    /// body is pushed (+1 right, -1 left); the pop lifts it off the ground.
    ///
    /// No-op while invincible or already in Hit/Exploding/Dead; the
    /// knockback of the hit that *grants* invincibility still lands, because
    /// the timer starts only after the impulse is applied.
    pub fn hit(&mut self, body: &mut Body, knock_dir: f32, cfg: &Tuning) {
        if matches!(
            self.state,
            MovementState::Hit | MovementState::Exploding | MovementState::Dead
        ) {
            return;
        }
        if self.invincible() {
            return;
        }
        if self.set_state(MovementState::Hit, cfg) {
            let dir = if knock_dir == 0.0 { -1.0 } else { knock_dir.signum() };
            body.vel.x = dir * cfg.hit_knockback;
            body.vel.y = -cfg.hit_pop;
            body.grounded = false;
            self.invincibility_timer =
                cfg.invincibility_duration * self.traits.invincibility_scale;
            debug!("hit: knockback dir {dir}, invincible {:.2}s", self.invincibility_timer);
        }
    }

    /// External death trigger (health reached zero). Idempotent while an
    /// explosion is already running or the body is dead. The cosmetic
    /// particle sequence lives outside; only the timer is tracked here.
    pub fn start_explosion(&mut self, body: &mut Body, cfg: &Tuning) {
        if matches!(self.state, MovementState::Exploding | MovementState::Dead) {
            return;
        }
        if self.set_state(MovementState::Exploding, cfg) {
            body.vel = Vec2::ZERO;
            debug!("explosion started");
        }
    }
}
