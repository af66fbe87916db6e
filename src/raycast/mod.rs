//! Line-of-sight queries over the occupancy grid.

pub mod visibility;
