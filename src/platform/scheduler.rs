use crate::animation::AnimationChannel;

/// Opaque identifier of one requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// One frame request waiting to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledFrame {
    pub handle: FrameHandle,
    pub channel: AnimationChannel,
}

/// Host-provided animation-frame service.
///
/// A request enqueues one callback slot; cancelling an unknown or already
/// fired handle is a no-op. Hosts pump fired frames back into the widget
/// through `take_due`.
pub trait FrameScheduler {
    fn request_frame(&mut self, channel: AnimationChannel) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn take_due(&mut self) -> Vec<ScheduledFrame>;
}

/// Deterministic scheduler: frames fire only when the owner drains them.
///
/// Doubles as the test double and as the production implementation for hosts
/// that drive the widget from their own frame tick.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    pending: Vec<ScheduledFrame>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending_total(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn pending_for(&self, channel: AnimationChannel) -> usize {
        self.pending
            .iter()
            .filter(|frame| frame.channel == channel)
            .count()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self, channel: AnimationChannel) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending.push(ScheduledFrame { handle, channel });
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|frame| frame.handle != handle);
    }

    fn take_due(&mut self) -> Vec<ScheduledFrame> {
        std::mem::take(&mut self.pending)
    }
}
