//! Stacked drawing layers with per-channel animation-frame bookkeeping.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::animation::AnimationChannel;
use crate::core::Viewport;
use crate::interaction::PointerEventKind;
use crate::platform::{FrameHandle, FrameScheduler, SurfaceMetrics, clamped_device_pixel_ratio};
use crate::render::{Primitive, RenderFrame};

/// Named drawing layers composing one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    /// Full-range series backdrop (preview).
    Backdrop,
    /// Y-axis grid lines and value labels.
    Grid,
    /// Main series strokes.
    Series,
    /// X-axis baseline and date labels.
    XAxis,
    /// Crosshair line and per-series dots.
    Hover,
    /// Hover tooltip chrome and text.
    Tooltip,
    /// Preview selection window and side overlays.
    Window,
}

/// How a layer's primitives composite against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Later primitives paint over earlier ones.
    #[default]
    SourceOver,
    /// Later primitives paint under earlier ones.
    DestinationOver,
}

#[derive(Debug)]
struct Layer {
    viewport: Viewport,
    composite: CompositeMode,
    scene: Vec<Primitive>,
}

/// At most one live frame handle per channel, by construction.
#[derive(Debug, Default)]
struct ChannelSlots {
    chart_scene: Option<FrameHandle>,
    x_axis: Option<FrameHandle>,
    y_axis: Option<FrameHandle>,
    window_scene: Option<FrameHandle>,
}

impl ChannelSlots {
    fn slot(&self, channel: AnimationChannel) -> Option<FrameHandle> {
        match channel {
            AnimationChannel::ChartScene => self.chart_scene,
            AnimationChannel::XAxis => self.x_axis,
            AnimationChannel::YAxis => self.y_axis,
            AnimationChannel::WindowScene => self.window_scene,
        }
    }

    fn slot_mut(&mut self, channel: AnimationChannel) -> &mut Option<FrameHandle> {
        match channel {
            AnimationChannel::ChartScene => &mut self.chart_scene,
            AnimationChannel::XAxis => &mut self.x_axis,
            AnimationChannel::YAxis => &mut self.y_axis,
            AnimationChannel::WindowScene => &mut self.window_scene,
        }
    }
}

/// Stacked set of drawing layers sized to one host element.
///
/// Layers stack in creation order; the topmost layer with an input binding
/// receives pointer events while lower layers stay presentational. The
/// surface also owns the frame-handle slot per animation channel, so a new
/// schedule always cancels the stale frame and two redraw loops can never
/// interleave on one channel. Operations on a missing layer are no-ops: a
/// view that forgot to create a layer has a construction bug, not a runtime
/// condition worth crashing the render loop for.
pub struct LayeredSurface {
    width: f64,
    height: f64,
    device_pixel_ratio: f64,
    layers: IndexMap<LayerKind, Layer>,
    bindings: Vec<(LayerKind, PointerEventKind)>,
    channels: ChannelSlots,
    scheduler: Rc<RefCell<dyn FrameScheduler>>,
}

impl LayeredSurface {
    #[must_use]
    pub fn new(metrics: &dyn SurfaceMetrics, scheduler: Rc<RefCell<dyn FrameScheduler>>) -> Self {
        let bounds = metrics.bounding_box();
        Self {
            width: bounds.width,
            height: bounds.height,
            device_pixel_ratio: clamped_device_pixel_ratio(metrics.device_pixel_ratio()),
            layers: IndexMap::new(),
            bindings: Vec::new(),
            channels: ChannelSlots::default(),
            scheduler,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Creates (or re-creates) a layer sized to the host element times the
    /// clamped device pixel ratio. Scene coordinates stay in css pixels.
    pub fn create_layer(&mut self, kind: LayerKind) {
        let viewport = Viewport::new(
            (self.width * self.device_pixel_ratio).round() as u32,
            (self.height * self.device_pixel_ratio).round() as u32,
        );
        self.layers.insert(
            kind,
            Layer {
                viewport,
                composite: CompositeMode::SourceOver,
                scene: Vec::new(),
            },
        );
    }

    pub fn set_layer_composite(&mut self, kind: LayerKind, mode: CompositeMode) {
        if let Some(layer) = self.layers.get_mut(&kind) {
            layer.composite = mode;
        }
    }

    #[must_use]
    pub fn layer_viewport(&self, kind: LayerKind) -> Option<Viewport> {
        self.layers.get(&kind).map(|layer| layer.viewport)
    }

    pub fn push(&mut self, kind: LayerKind, primitive: Primitive) {
        if let Some(layer) = self.layers.get_mut(&kind) {
            layer.scene.push(primitive);
        }
    }

    pub fn clear_layer(&mut self, kind: LayerKind) {
        if let Some(layer) = self.layers.get_mut(&kind) {
            layer.scene.clear();
        }
    }

    pub fn clear_all_layers(&mut self) {
        for layer in self.layers.values_mut() {
            layer.scene.clear();
        }
    }

    #[must_use]
    pub fn layer_scene(&self, kind: LayerKind) -> Option<&[Primitive]> {
        self.layers.get(&kind).map(|layer| layer.scene.as_slice())
    }

    /// Registers an input binding on an existing layer.
    pub fn bind_handler(&mut self, kind: LayerKind, event: PointerEventKind) {
        if !self.layers.contains_key(&kind) {
            return;
        }
        if !self.bindings.contains(&(kind, event)) {
            self.bindings.push((kind, event));
        }
    }

    /// Topmost layer bound for the given event kind, if any.
    #[must_use]
    pub fn hit_layer(&self, event: PointerEventKind) -> Option<LayerKind> {
        self.layers
            .keys()
            .rev()
            .find(|kind| self.bindings.contains(&(**kind, event)))
            .copied()
    }

    /// Requests a frame for the channel, cancelling the stale handle.
    ///
    /// This is the mechanism that keeps at most one redraw loop alive per
    /// channel when state changes arrive faster than a transition completes.
    pub fn schedule_frame(&mut self, channel: AnimationChannel) -> FrameHandle {
        let handle = self.scheduler.borrow_mut().request_frame(channel);
        let slot = self.channels.slot_mut(channel);
        if let Some(stale) = slot.replace(handle) {
            trace!(?channel, stale = stale.value(), "cancel stale animation frame");
            self.scheduler.borrow_mut().cancel_frame(stale);
        }
        handle
    }

    pub fn cancel_channel(&mut self, channel: AnimationChannel) {
        if let Some(handle) = self.channels.slot_mut(channel).take() {
            self.scheduler.borrow_mut().cancel_frame(handle);
        }
    }

    /// Cancels every channel; used when a continuous-drag redraw loop takes
    /// over from a discrete transition.
    pub fn cancel_all_animations(&mut self) {
        for channel in AnimationChannel::ALL {
            self.cancel_channel(channel);
        }
    }

    #[must_use]
    pub fn live_handle(&self, channel: AnimationChannel) -> Option<FrameHandle> {
        self.channels.slot(channel)
    }

    /// Flattens all layers, bottom to top, into one render frame.
    ///
    /// Destination-over layers contribute their primitives in reverse push
    /// order, which reproduces the compositing result on a plain painter.
    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let viewport = Viewport::new(
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        );
        let mut frame = RenderFrame::new(viewport);
        for layer in self.layers.values() {
            match layer.composite {
                CompositeMode::SourceOver => {
                    frame.primitives.extend(layer.scene.iter().cloned());
                }
                CompositeMode::DestinationOver => {
                    frame.primitives.extend(layer.scene.iter().rev().cloned());
                }
            }
        }
        frame
    }
}
