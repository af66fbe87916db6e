//! 2D occupancy grid fusion.
//!
//! A [`GridMap`] covers a fixed world region centered on the origin. Local
//! rasters, obstacle descriptors and visibility sweeps are fused into its
//! cells under a sticky-occupied policy; a fiducial marker footprint is kept
//! in a separate layer for display.

pub mod fusion;
pub mod grid;
pub mod inflation;
pub mod iterators;
pub mod loaders;
pub mod marker;
pub mod rasterize;
pub mod raycast;
pub mod types;
pub mod visualization;

pub use fusion::LocalRaster;
pub use grid::{Grid2d, GridMap};
pub use loaders::{Scene, load_scene};
pub use types::{
    CellState, GridConfig, GridError, GridInfo, MarkerDescriptor, MarkerRecord, Obstacle,
    ObstacleRecord,
};
