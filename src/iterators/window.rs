use glam::{IVec2, Vec2};

use crate::types::GridInfo;

/// Inclusive rectangle of candidate cells.
///
/// Construction saturates instead of overflowing, so windows around cells far
/// outside the grid stay well formed and clip to nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellWindow {
    pub min: IVec2,
    pub max: IVec2,
}

impl CellWindow {
    /// Every cell of a `width` x `height` grid.
    pub fn full(width: u32, height: u32) -> Self {
        let clamp = |n: u32| n.min(i32::MAX as u32) as i32;
        Self {
            min: IVec2::ZERO,
            max: IVec2::new(clamp(width), clamp(height)) - IVec2::ONE,
        }
    }

    /// Square of half-width `reach` around `center`. Not clipped.
    pub fn around_cell(center: IVec2, reach: i32) -> Self {
        let reach = IVec2::splat(reach.max(0));
        Self {
            min: center.saturating_sub(reach),
            max: center.saturating_add(reach),
        }
    }

    /// Cells touched by a world-space box, widened by one cell on each side to
    /// cover partial overlap, then clipped to the grid.
    pub fn around_world_box(info: &GridInfo, min: Vec2, max: Vec2) -> Self {
        let raw = Self {
            min: info.world_to_grid(min).saturating_sub(IVec2::ONE),
            max: info.world_to_grid(max).saturating_add(IVec2::ONE),
        };
        raw.intersect(Self::full(info.width, info.height))
    }

    pub fn intersect(self, other: Self) -> Self {
        Self {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Row-major iteration over the window.
    pub fn cells(self) -> impl Iterator<Item = IVec2> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| IVec2::new(x, y)))
    }
}
