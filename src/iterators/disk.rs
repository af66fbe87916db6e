use glam::IVec2;

use crate::iterators::CellWindow;

/// Iterator over the cells of a discrete disk: every `(x, y)` with
/// `(x - cx)² + (y - cy)² ≤ r²`.
///
/// [`DiskIterator::new`] yields the whole disk and leaves bounds checks to the
/// caller; [`DiskIterator::within`] only visits cells inside a window, so a
/// huge radius or a far-away center costs no more than the window itself.
pub struct DiskIterator {
    center: IVec2,
    radius_sq: i64,
    window: CellWindow,
    next: Option<IVec2>,
}

impl DiskIterator {
    /// A negative radius yields nothing; radius 0 yields only the center.
    pub fn new(center: IVec2, radius: i32) -> Self {
        Self::within(center, radius, CellWindow::around_cell(center, radius))
    }

    /// The part of the disk that lies inside `window`.
    pub fn within(center: IVec2, radius: i32, window: CellWindow) -> Self {
        let window = window.intersect(CellWindow::around_cell(center, radius));
        let next = (radius >= 0 && !window.is_empty()).then_some(window.min);
        Self {
            center,
            radius_sq: i64::from(radius).pow(2),
            window,
            next,
        }
    }
}

impl Iterator for DiskIterator {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(cell) = self.next {
            self.next = if cell.x < self.window.max.x {
                Some(IVec2::new(cell.x + 1, cell.y))
            } else if cell.y < self.window.max.y {
                Some(IVec2::new(self.window.min.x, cell.y + 1))
            } else {
                None
            };

            let dx = i64::from(cell.x) - i64::from(self.center.x);
            let dy = i64::from(cell.y) - i64::from(self.center.y);
            let dist_sq = dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy));
            if dist_sq <= self.radius_sq {
                return Some(cell);
            }
        }
        None
    }
}
