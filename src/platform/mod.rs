//! Injected platform services.
//!
//! The engine never touches host globals directly: frame scheduling, wall
//! time and element measurement come in through these traits so the whole
//! widget runs headless under test with a synchronous scheduler and a
//! manually advanced clock.

pub mod clock;
pub mod metrics;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock, Throttle};
pub use metrics::{FixedMetrics, MAX_DEVICE_PIXEL_RATIO, SurfaceMetrics, clamped_device_pixel_ratio};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler, ScheduledFrame};
