use glam::IVec2;

/// Integer Bresenham walk from `start` to `end`, both endpoints included.
///
/// Cells are not clipped to any grid. The error term is kept in `i64`, so any
/// pair of `IVec2` endpoints is valid.
pub struct LineIterator {
    cell: IVec2,
    end: IVec2,
    step: IVec2,
    dx: i64,
    dy: i64,
    err: i64,
    done: bool,
}

impl LineIterator {
    pub fn new(start: IVec2, end: IVec2) -> Self {
        let dx = (i64::from(end.x) - i64::from(start.x)).abs();
        let dy = -(i64::from(end.y) - i64::from(start.y)).abs();
        let step = IVec2::new(
            if start.x < end.x { 1 } else { -1 },
            if start.y < end.y { 1 } else { -1 },
        );
        Self {
            cell: start,
            end,
            step,
            dx,
            dy,
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for LineIterator {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.cell;
        if current == self.end {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.cell.x += self.step.x;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.cell.y += self.step.y;
        }

        Some(current)
    }
}
