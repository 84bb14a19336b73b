use glam::Vec2;

/// Capability tag carried by every terrain rectangle.
///
/// Resolution branches on what a surface *can do*, not on what kind of tile
/// produced it; terrain sources decide the tag when they emit rects.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Surface {
    /// Blocks on every axis.
    #[default]
    Solid,
    /// Blocks only a descending landing from above; passable otherwise.
    OneWay,
    /// Sensor only, never blocks (level-exit markers and the like).
    Goal,
}

impl Surface {
    /// Does this surface ever stop horizontal motion?
    pub fn blocks_x(self) -> bool {
        matches!(self, Surface::Solid)
    }

    /// Can this surface carry a standing body?
    pub fn supports(self) -> bool {
        matches!(self, Surface::Solid | Surface::OneWay)
    }
}

/// One axis-aligned terrain rectangle for **this frame**.
///
/// `min` is the top-left corner in y-down screen space. Rects are rebuilt
/// every frame from the terrain sources; never cached across frames.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
    pub surface: Surface,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
            surface: Surface::Solid,
        }
    }

    pub fn tagged(x: f32, y: f32, w: f32, h: f32, surface: Surface) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
            surface,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Centered candidate rectangle for a body at `pos` with `half` extents.
    pub fn candidate(pos: Vec2, half: Vec2) -> Self {
        Self {
            min: pos - half,
            size: half * 2.0,
            surface: Surface::Solid,
        }
    }

    /// Strict AABB intersection (shared edges do not count).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.right()
            && self.right() > other.min.x
            && self.min.y < other.bottom()
            && self.bottom() > other.min.y
    }

    /// Length of the horizontal span shared with `other` (0 when disjoint).
    pub fn overlap_x(&self, other: &Rect) -> f32 {
        (self.right().min(other.right()) - self.left().max(other.left())).max(0.0)
    }
}

/// The one kinematically moved body resolved against terrain each frame.
///
/// `pos` is the center; `half` extents stay fixed for the whole life of the
/// body (ducking shrinks only the *interaction* height, see the state
/// machine). `grounded` is recomputed every resolution pass and never
/// carries stale frames.
///
/// `stall_anchor`/`stall_frames` back the anti-stuck valve; they are plain
/// per-body fields advanced once per frame by `resolve_and_apply` so that
/// multiple bodies never share hidden bookkeeping.
#[derive(Copy, Clone, Debug)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub half: Vec2,
    pub grounded: bool,
    pub stall_anchor: Vec2,
    pub stall_frames: u32,
}

impl Body {
    /// Square body of side `size`, centered at `pos`, at rest.
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half: Vec2::splat(size * 0.5),
            grounded: false,
            stall_anchor: pos,
            stall_frames: 0,
        }
    }

    pub fn aabb(&self) -> Rect {
        Rect::candidate(self.pos, self.half)
    }

    /// y coordinate of the feet (bottom edge, y-down space).
    pub fn feet(&self) -> f32 {
        self.pos.y + self.half.y
    }
}

/// Which side of contact a resolution pass decided on.
///
/// When both axes collide in one frame the vertical result is reported;
/// it is the one gameplay reacts to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Contact {
    #[default]
    None,
    Ground,
    Ceiling,
    WallLeft,
    WallRight,
}

/// Outcome of one resolution pass. Produced and consumed within one frame.
#[derive(Copy, Clone, Debug)]
pub struct Resolution {
    /// Corrected position, guaranteed free of the supplied blocking rects.
    pub pos: Vec2,
    /// Velocity with the collided components zeroed.
    pub vel: Vec2,
    pub contact: Contact,
    pub grounded: bool,
    pub collided: bool,
}

/// Per-frame snapshot of discrete input intent. Polling lives upstream.
#[derive(Copy, Clone, Debug, Default)]
pub struct InputFrame {
    pub left: bool,
    pub right: bool,
    /// Edge-triggered: true only on the frame jump was pressed.
    pub jump: bool,
    /// Level-triggered: held down.
    pub down: bool,
    /// Edge-triggered fire intent; consumed by external weapon logic.
    pub fire: bool,
}

impl InputFrame {
    /// Net horizontal intent in {-1, 0, 1}.
    pub fn axis(&self) -> f32 {
        (self.right as i32 as f32) - (self.left as i32 as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_intersection() {
        let r = Rect::new(64.0, 164.0, 64.0, 64.0);
        assert_eq!(r.left(), 64.0);
        assert_eq!(r.right(), 128.0);
        assert_eq!(r.top(), 164.0);
        assert_eq!(r.bottom(), 228.0);

        let touching = Rect::new(128.0, 164.0, 64.0, 64.0);
        assert!(!r.intersects(&touching), "shared edge must not intersect");

        let overlapping = Rect::new(120.0, 164.0, 64.0, 64.0);
        assert!(r.intersects(&overlapping));
        assert!((r.overlap_x(&overlapping) - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_body_aabb_is_centered() {
        let b = Body::new(Vec2::new(100.0, 100.0), 60.0);
        let r = b.aabb();
        assert_eq!(r.min, Vec2::new(70.0, 70.0));
        assert_eq!(r.max(), Vec2::new(130.0, 130.0));
        assert_eq!(b.feet(), 130.0);
    }

    #[test]
    fn test_input_axis() {
        let mut i = InputFrame::default();
        assert_eq!(i.axis(), 0.0);
        i.right = true;
        assert_eq!(i.axis(), 1.0);
        i.left = true;
        assert_eq!(i.axis(), 0.0);
        i.right = false;
        assert_eq!(i.axis(), -1.0);
    }

    #[test]
    fn test_surface_capabilities() {
        assert!(Surface::Solid.blocks_x());
        assert!(!Surface::OneWay.blocks_x());
        assert!(!Surface::Goal.blocks_x());
        assert!(Surface::Solid.supports());
        assert!(Surface::OneWay.supports());
        assert!(!Surface::Goal.supports());
    }
}
