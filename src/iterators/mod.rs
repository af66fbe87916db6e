pub mod disk;
pub mod line;
pub mod polygon;
pub mod window;

pub use disk::DiskIterator;
pub use line::LineIterator;
pub use polygon::{PolygonIterator, point_in_polygon};
pub use window::CellWindow;
