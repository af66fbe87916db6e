use glam::{IVec2, UVec2};

use crate::types::GridError;

/// Dense row-major 2D buffer addressed by `(x = column, y = row)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T> Grid2d<T> {
    pub fn new(width: u32, height: u32, data: Vec<T>) -> Result<Self, GridError> {
        let expected_len = (width as usize) * (height as usize);
        if data.len() != expected_len {
            return Err(GridError::InvalidRaster(format!(
                "data length {} does not match grid size {}x{}",
                data.len(),
                width,
                height
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: u32, height: u32, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        // equivalent to (x >= 0 && x < width) for signed x
        (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    #[inline]
    pub fn get(&self, cell: IVec2) -> Option<&T> {
        if !self.contains(cell) {
            return None;
        }
        let idx = self.index(cell);
        Some(&self.data[idx])
    }

    #[inline]
    pub fn get_mut(&mut self, cell: IVec2) -> Option<&mut T> {
        if !self.contains(cell) {
            return None;
        }
        let idx = self.index(cell);
        Some(&mut self.data[idx])
    }

    pub fn set(&mut self, cell: IVec2, value: T) -> Result<(), GridError> {
        match self.get_mut(cell) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(GridError::OutOfBounds(format!(
                "cell ({}, {}) out of bounds for grid {}x{}",
                cell.x, cell.y, self.width, self.height
            ))),
        }
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    #[inline]
    fn index(&self, cell: IVec2) -> usize {
        (cell.y as usize) * (self.width as usize) + (cell.x as usize)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Iterate over `(cell, value)` pairs in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (UVec2, &T)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, value)| {
                let idx = idx as u32;
                (UVec2::new(idx % width, idx / width), value)
            })
    }

    /// Build a grid of the same shape by mapping every value.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid2d<U> {
        Grid2d {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}
