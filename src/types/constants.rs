//! Cell vocabulary and numeric defaults.

/// Ordinal of an unexplored cell.
pub const UNKNOWN: i8 = -1;
/// Ordinal of a traversable cell.
pub const FREE: i8 = 0;
/// Ordinal of a blocked cell.
pub const OCCUPIED: i8 = 1;
/// Display-only ordinal for marker footprint cells. Never stored in the occupancy grid.
pub const MARKER: i8 = 2;

/// Radius applied to obstacle records that carry no `radius_m`.
pub const DEFAULT_OBSTACLE_RADIUS_M: f32 = 0.0;

/// Guard added to the edge height in the ray-casting crossing test.
pub const POLYGON_EDGE_EPSILON: f32 = 1e-12;

/// Lightness at or below which an image pixel is classified as occupied.
pub const DEFAULT_OCCUPIED_THRESH: f32 = 0.35;
/// Lightness at or above which an image pixel is classified as free.
pub const DEFAULT_FREE_THRESH: f32 = 0.65;

/// State of a single occupancy cell.
///
/// The discriminants are the ordinals used by snapshots, local rasters and the
/// display raster.
#[repr(i8)]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Unknown = UNKNOWN,
    Free = FREE,
    Occupied = OCCUPIED,
}

impl CellState {
    #[inline]
    pub const fn value(self) -> i8 {
        self as i8
    }

    /// Map a raster ordinal to a state. Returns `None` for values outside the
    /// occupancy vocabulary (including [`MARKER`]).
    pub const fn from_value(value: i8) -> Option<Self> {
        match value {
            UNKNOWN => Some(Self::Unknown),
            FREE => Some(Self::Free),
            OCCUPIED => Some(Self::Occupied),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_occupied(self) -> bool {
        matches!(self, Self::Occupied)
    }
}

impl From<CellState> for i8 {
    fn from(state: CellState) -> Self {
        state.value()
    }
}
