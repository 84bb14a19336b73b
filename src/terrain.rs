//! Terrain providers and the per-frame union of their collision rects.

use glam::Vec2;
use std::collections::{HashMap, HashSet};

use crate::types::{Rect, Surface};

/// Anything that can report solid occupied space for the current frame.
///
/// Implementations must be side-effect free and callable any number of times
/// per frame; the resolver treats the result as a read-only snapshot.
pub trait TerrainSource {
    /// Append this source's current collision rects to `out`.
    fn collision_rects(&self, out: &mut Vec<Rect>);
}

/// Union all sources into `out` by simple concatenation.
///
/// The resulting list order follows source order; resolution tie-breaks
/// follow list order, so callers get a no-overlap guarantee but not a
/// source-order-independent contact choice.
pub fn gather(sources: &[&dyn TerrainSource], out: &mut Vec<Rect>) {
    out.clear();
    for source in sources {
        source.collision_rects(out);
    }
}

/// Static level geometry: a fixed set of rects decided at construction.
#[derive(Clone, Debug, Default)]
pub struct RectSet {
    rects: Vec<Rect>,
}

impl RectSet {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    /// Build from an ASCII sketch, one character per tile:
    /// `#` solid, `-` one-way platform, `G` goal sensor, anything else empty.
    /// `origin` is the top-left corner of the top-left tile.
    pub fn from_sketch(origin: Vec2, tile: f32, rows: &[&str]) -> Self {
        let mut rects = Vec::new();
        for (iy, row) in rows.iter().enumerate() {
            for (ix, ch) in row.chars().enumerate() {
                let surface = match ch {
                    '#' => Surface::Solid,
                    '-' => Surface::OneWay,
                    'G' => Surface::Goal,
                    _ => continue,
                };
                rects.push(Rect::tagged(
                    origin.x + ix as f32 * tile,
                    origin.y + iy as f32 * tile,
                    tile,
                    tile,
                    surface,
                ));
            }
        }
        Self { rects }
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl TerrainSource for RectSet {
    fn collision_rects(&self, out: &mut Vec<Rect>) {
        out.extend_from_slice(&self.rects);
    }
}

/// Destructible tile field keyed by integer cell coordinates.
///
/// Cells can be broken and restored between frames; a broken cell simply
/// stops contributing a rect, which is why the resolver re-gathers terrain
/// every frame instead of caching.
#[derive(Clone, Debug)]
pub struct BreakableTiles {
    origin: Vec2,
    tile: f32,
    cells: HashMap<(i32, i32), Surface>,
    broken: HashSet<(i32, i32)>,
}

impl BreakableTiles {
    pub fn new(origin: Vec2, tile: f32) -> Self {
        Self {
            origin,
            tile,
            cells: HashMap::new(),
            broken: HashSet::new(),
        }
    }

    /// Place a breakable solid tile at cell `(ix, iy)`.
    pub fn fill(&mut self, ix: i32, iy: i32) {
        self.cells.insert((ix, iy), Surface::Solid);
        self.broken.remove(&(ix, iy));
    }

    /// Break the tile at `(ix, iy)`. Returns false when there is nothing
    /// left to break there.
    pub fn break_at(&mut self, ix: i32, iy: i32) -> bool {
        if !self.cells.contains_key(&(ix, iy)) || self.broken.contains(&(ix, iy)) {
            return false;
        }
        self.broken.insert((ix, iy));
        true
    }

    /// Undo a break (tile respawn).
    pub fn restore(&mut self, ix: i32, iy: i32) {
        self.broken.remove(&(ix, iy));
    }

    pub fn is_broken(&self, ix: i32, iy: i32) -> bool {
        self.broken.contains(&(ix, iy))
    }

    /// World-space rect of a cell, broken or not.
    pub fn cell_rect(&self, ix: i32, iy: i32) -> Rect {
        Rect::new(
            self.origin.x + ix as f32 * self.tile,
            self.origin.y + iy as f32 * self.tile,
            self.tile,
            self.tile,
        )
    }
}

impl TerrainSource for BreakableTiles {
    fn collision_rects(&self, out: &mut Vec<Rect>) {
        for (&(ix, iy), &surface) in &self.cells {
            if self.broken.contains(&(ix, iy)) {
                continue;
            }
            let mut rect = self.cell_rect(ix, iy);
            rect.surface = surface;
            out.push(rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sketch_tags_surfaces() {
        let set = RectSet::from_sketch(
            Vec2::ZERO,
            32.0,
            &[
                ".G.", //
                "-..", //
                "###",
            ],
        );
        assert_eq!(set.len(), 5);
        let mut out = Vec::new();
        set.collision_rects(&mut out);
        assert!(out.iter().any(|r| r.surface == Surface::Goal && r.min == Vec2::new(32.0, 0.0)));
        assert!(out.iter().any(|r| r.surface == Surface::OneWay && r.min == Vec2::new(0.0, 32.0)));
        assert_eq!(out.iter().filter(|r| r.surface == Surface::Solid).count(), 3);
    }

    #[test]
    fn test_gather_concatenates_sources_in_order() {
        let a = RectSet::new(vec![Rect::new(0.0, 0.0, 32.0, 32.0)]);
        let mut b = BreakableTiles::new(Vec2::ZERO, 32.0);
        b.fill(5, 5);

        let mut out = vec![Rect::new(9.0, 9.0, 9.0, 9.0)]; // stale, must be cleared
        gather(&[&a, &b], &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].min, Vec2::ZERO);
        assert_eq!(out[1].min, Vec2::new(160.0, 160.0));
    }

    #[test]
    fn test_break_and_restore() {
        let mut tiles = BreakableTiles::new(Vec2::ZERO, 64.0);
        tiles.fill(1, 0);
        tiles.fill(2, 0);

        assert!(tiles.break_at(1, 0));
        assert!(!tiles.break_at(1, 0), "double break is a no-op");
        assert!(!tiles.break_at(7, 7), "empty cell cannot break");
        assert!(tiles.is_broken(1, 0));

        let mut out = Vec::new();
        tiles.collision_rects(&mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].min, Vec2::new(128.0, 0.0));

        tiles.restore(1, 0);
        out.clear();
        tiles.collision_rects(&mut out);
        assert_eq!(out.len(), 2);
    }
}
