use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CirclePrimitive, LinePrimitive, RectPrimitive, TextPrimitive};

/// One draw command.
///
/// Frames keep a single ordered list rather than per-kind vectors because
/// intra-layer order is semantic: destination-over layers rely on it.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Primitive::Line(line) => line.validate(),
            Primitive::Rect(rect) => rect.validate(),
            Primitive::Circle(circle) => circle.validate(),
            Primitive::Text(text) => text.validate(),
        }
    }
}

/// Backend-agnostic scene for one draw pass, in painter's order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub primitives: Vec<Primitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for primitive in &self.primitives {
            primitive.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|primitive| matches!(primitive, Primitive::Line(_)))
            .count()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|primitive| matches!(primitive, Primitive::Text(_)))
            .count()
    }
}
