pub mod grid2d;
pub mod grid_map;

pub use grid2d::Grid2d;
pub use grid_map::GridMap;
