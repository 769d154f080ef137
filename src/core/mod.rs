pub mod bounds;
pub mod dataset;
pub mod geometry;
pub mod labels;
pub mod types;

pub use bounds::{MIN_WINDOW_WIDTH, VisibleBounds};
pub use dataset::{ActiveSeries, SeriesDataset, SeriesSpec};
pub use geometry::{
    GRID_STEPS, GeometrySnapshot, STROKE_TOP_PADDING, active_columns, max_across_series,
    to_points, x_coordinates, y_coordinates,
};
pub use types::{ChartId, HostBounds, Point, SeriesId, Viewport, WindowRect};
