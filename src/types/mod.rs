pub mod constants;
pub mod error;
pub mod geometry;
pub mod info;
pub mod obstacle;

pub use constants::*;
pub use error::GridError;
pub use geometry::{MarkerDescriptor, MarkerRecord};
pub use info::{GridConfig, GridInfo};
pub use obstacle::{BBoxRecord, Obstacle, ObstacleRecord};
