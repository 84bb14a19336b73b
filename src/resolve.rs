//! Axis-separated collision resolution of one moving body against the
//! frame's terrain rects.
//!
//! The pass order is fixed: x first at the current y, then y at the
//! x-corrected position. Horizontal hits take the first intersecting rect in
//! list order and stop scanning; vertical hits keep scanning with the
//! corrected candidate so stacked rects cannot leave a residual overlap.
//! List order is therefore a tie-break, not a contract — callers may rely
//! only on the no-overlap guarantee.

use glam::Vec2;
use log::debug;

use crate::config::Tuning;
use crate::types::{Body, Contact, Rect, Resolution, Surface};

/// Resolve `body` against `terrain` for one frame of motion.
///
/// Pure: reads the body, never writes it, retains nothing between calls.
/// An empty terrain list returns the unmodified desired position.
pub fn resolve(body: &Body, terrain: &[Rect], dt: f32, cfg: &Tuning) -> Resolution {
    let desired = body.pos + body.vel * dt;
    let mut pos = desired;
    let mut vel = body.vel;
    let mut contact = Contact::None;
    let mut collided = false;

    // Feet position before the move; one-way platforms only stop a body
    // that was entirely above them.
    let prev_feet = body.feet();

    // --- X pass ------------------------------------------------------------
    let candidate = Rect::candidate(Vec2::new(desired.x, body.pos.y), body.half);
    for rect in terrain.iter().filter(|r| r.surface.blocks_x()) {
        if !candidate.intersects(rect) {
            continue;
        }
        // Below min_speed the velocity sign is noise; classify by which
        // side of the rect the body center sits on instead.
        let moving_right = if vel.x.abs() > cfg.min_speed {
            vel.x > 0.0
        } else {
            body.pos.x < rect.center().x
        };
        if moving_right {
            pos.x = rect.left() - body.half.x - cfg.skin;
            contact = Contact::WallRight;
        } else {
            pos.x = rect.right() + body.half.x + cfg.skin;
            contact = Contact::WallLeft;
        }
        vel.x = 0.0;
        collided = true;
        break;
    }

    // --- Y pass ------------------------------------------------------------
    let descending = vel.y >= 0.0;
    let mut grounded = false;
    let mut y_hit = false;
    let mut candidate = Rect::candidate(Vec2::new(pos.x, desired.y), body.half);
    for rect in terrain {
        let blocks = match rect.surface {
            Surface::Solid => true,
            Surface::OneWay => descending && prev_feet <= rect.top() + cfg.skin,
            Surface::Goal => false,
        };
        if !blocks || !candidate.intersects(rect) {
            continue;
        }
        if descending {
            pos.y = rect.top() - body.half.y - cfg.skin;
            grounded = true;
            contact = Contact::Ground;
        } else {
            pos.y = rect.bottom() + body.half.y + cfg.skin;
            contact = Contact::Ceiling;
        }
        vel.y = 0.0;
        collided = true;
        y_hit = true;
        candidate = Rect::candidate(Vec2::new(pos.x, pos.y), body.half);
    }

    // --- Ground probe ------------------------------------------------------
    // A body at rest on terrain produces no y-pass hit (it never moves into
    // the tile), so probe a thin strip at the feet instead. Only bodies that
    // are not actively moving vertically qualify; a falling body grounds
    // through the y pass when it actually reaches the tile.
    if !y_hit && vel.y.abs() <= cfg.min_speed {
        let feet = pos.y + body.half.y;
        let probe = Rect::new(
            pos.x - body.half.x + cfg.probe_inset,
            feet,
            (body.half.x - cfg.probe_inset) * 2.0,
            cfg.probe_tolerance,
        );
        for rect in terrain.iter().filter(|r| r.surface.supports()) {
            if (rect.top() - feet).abs() <= cfg.probe_tolerance
                && probe.overlap_x(rect) > cfg.probe_overlap_eps
            {
                grounded = true;
                break;
            }
        }
    }

    Resolution {
        pos,
        vel,
        contact,
        grounded,
        collided,
    }
}

/// Resolve and write the outcome back to the body, then advance the
/// anti-stuck valve.
///
/// The valve counts consecutive frames in which the applied position barely
/// moved while the body was still trying to move on its dominant axis, and
/// nudges one `stall_nudge` opposite that axis once the count is reached.
/// Safety valve for wedge geometry (a gap exactly the body's width); not a
/// correctness mechanism.
pub fn resolve_and_apply(
    body: &mut Body,
    terrain: &[Rect],
    dt: f32,
    cfg: &Tuning,
) -> Resolution {
    let attempted = body.vel;
    let mut res = resolve(body, terrain, dt, cfg);

    body.pos = res.pos;
    body.vel = res.vel;
    body.grounded = res.grounded;

    let dominant_x = attempted.x.abs() >= attempted.y.abs();
    let dominant_speed = attempted.x.abs().max(attempted.y.abs());
    let stalled = dominant_speed > cfg.min_speed
        && body.pos.distance(body.stall_anchor) <= cfg.stall_threshold;

    if stalled {
        body.stall_frames += 1;
        if body.stall_frames >= cfg.stall_frames {
            let nudge = if dominant_x {
                Vec2::new(-attempted.x.signum() * cfg.stall_nudge, 0.0)
            } else {
                Vec2::new(0.0, -attempted.y.signum() * cfg.stall_nudge)
            };
            body.pos += nudge;
            body.stall_frames = 0;
            body.stall_anchor = body.pos;
            res.pos = body.pos;
            debug!(
                "anti-stuck nudge {:?} applied at ({:.1}, {:.1})",
                nudge, body.pos.x, body.pos.y
            );
        }
    } else {
        body.stall_frames = 0;
        body.stall_anchor = body.pos;
    }

    res
}
