pub mod driver;
pub mod easing;

pub use driver::{ChannelAnimator, TICK_COUNT, blend, blend_point, blend_series};
pub use easing::ease_out_quart;

use serde::{Deserialize, Serialize};

/// Named animation lanes with independent tick state.
///
/// The chart view animates its scene, x-axis labels and y-axis grid
/// separately; the preview animates its whole window scene as one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationChannel {
    ChartScene,
    XAxis,
    YAxis,
    WindowScene,
}

impl AnimationChannel {
    pub const ALL: [AnimationChannel; 4] = [
        AnimationChannel::ChartScene,
        AnimationChannel::XAxis,
        AnimationChannel::YAxis,
        AnimationChannel::WindowScene,
    ];
}
