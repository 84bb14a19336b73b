//! Velocity integration, run before each resolution pass.

use crate::config::Tuning;
use crate::types::Body;

/// Accelerate toward `axis * max_run_speed`, or decelerate to rest with no
/// input. `axis` is the net horizontal intent in [-1, 1].
pub fn drive(body: &mut Body, axis: f32, dt: f32, cfg: &Tuning) {
    let target = axis * cfg.max_run_speed;
    if axis.abs() > 0.1 {
        let accel = cfg.run_accel * dt;
        if body.vel.x < target {
            body.vel.x = (body.vel.x + accel).min(target);
        } else {
            body.vel.x = (body.vel.x - accel).max(target);
        }
    } else {
        let decel = cfg.run_decel * dt;
        if body.vel.x > 0.0 {
            body.vel.x = (body.vel.x - decel).max(0.0);
        } else {
            body.vel.x = (body.vel.x + decel).min(0.0);
        }
    }
}

/// Apply gravity and the speed clamps.
///
/// Gravity is asymmetric: the ascending half of a jump (vel.y < 0) gets the
/// reduced multiplier for hang; descent gets the full magnitude, clamped to
/// terminal fall speed. Grounded bodies receive no gravity at all this
/// frame.
pub fn integrate(body: &mut Body, dt: f32, cfg: &Tuning) {
    if !body.grounded {
        let scale = if body.vel.y < 0.0 {
            cfg.ascend_gravity_scale
        } else {
            1.0
        };
        body.vel.y = (body.vel.y + cfg.gravity * scale * dt).min(cfg.terminal_fall_speed);
    }
    body.vel.x = body
        .vel
        .x
        .clamp(-cfg.max_horizontal_speed, cfg.max_horizontal_speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn cfg() -> Tuning {
        Tuning::default()
    }

    fn airborne() -> Body {
        let mut b = Body::new(Vec2::ZERO, 60.0);
        b.grounded = false;
        b
    }

    #[test]
    fn test_ascending_gravity_is_reduced() {
        let cfg = cfg();
        let mut up = airborne();
        up.vel.y = -400.0;
        let mut down = airborne();
        down.vel.y = 400.0;

        integrate(&mut up, DT, &cfg);
        integrate(&mut down, DT, &cfg);

        let up_delta = up.vel.y - (-400.0);
        let down_delta = down.vel.y - 400.0;
        assert!(up_delta > 0.0 && down_delta > 0.0);
        assert!(
            (up_delta / down_delta - cfg.ascend_gravity_scale).abs() < 1e-3,
            "ascend/descend gravity ratio off: {}",
            up_delta / down_delta
        );
    }

    #[test]
    fn test_terminal_fall_speed_clamps() {
        let cfg = cfg();
        let mut b = airborne();
        b.vel.y = cfg.terminal_fall_speed - 1.0;
        for _ in 0..120 {
            integrate(&mut b, DT, &cfg);
        }
        assert_eq!(b.vel.y, cfg.terminal_fall_speed);
    }

    #[test]
    fn test_grounded_body_gets_no_gravity() {
        let cfg = cfg();
        let mut b = airborne();
        b.grounded = true;
        integrate(&mut b, DT, &cfg);
        assert_eq!(b.vel.y, 0.0);
    }

    #[test]
    fn test_horizontal_clamp_is_input_independent() {
        let cfg = cfg();
        let mut b = airborne();
        b.vel.x = 10_000.0;
        integrate(&mut b, DT, &cfg);
        assert_eq!(b.vel.x, cfg.max_horizontal_speed);
        b.vel.x = -10_000.0;
        integrate(&mut b, DT, &cfg);
        assert_eq!(b.vel.x, -cfg.max_horizontal_speed);
    }

    #[test]
    fn test_drive_reaches_and_holds_run_speed() {
        let cfg = cfg();
        let mut b = airborne();
        for _ in 0..60 {
            drive(&mut b, 1.0, DT, &cfg);
        }
        assert_eq!(b.vel.x, cfg.max_run_speed);

        // Releasing input decelerates to exactly zero, no overshoot.
        for _ in 0..60 {
            drive(&mut b, 0.0, DT, &cfg);
        }
        assert_eq!(b.vel.x, 0.0);
    }

    #[test]
    fn test_drive_turnaround_decelerates_through_zero() {
        let cfg = cfg();
        let mut b = airborne();
        b.vel.x = cfg.max_run_speed;
        drive(&mut b, -1.0, DT, &cfg);
        assert!(b.vel.x < cfg.max_run_speed);
        for _ in 0..60 {
            drive(&mut b, -1.0, DT, &cfg);
        }
        assert_eq!(b.vel.x, -cfg.max_run_speed);
    }
}
