pub mod chart;
pub mod preview;
pub mod theme;

pub use chart::ChartView;
pub use preview::PreviewView;
pub use theme::{Palette, palette_for};
