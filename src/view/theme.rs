use crate::render::Color;

/// Fixed color set for one display mode.
///
/// Series strokes are not part of the palette; those travel with the
/// dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub font: Color,
    pub axis: Color,
    pub grid_line: Color,
    pub hover_line: Color,
    pub tooltip_background: Color,
    pub tooltip_border: Color,
    pub tooltip_text: Color,
    pub dot_fill: Color,
    pub overlay: Color,
    pub window_border: Color,
}

impl Palette {
    #[must_use]
    pub const fn day() -> Self {
        Self {
            font: Color::from_rgb8(150, 162, 170),
            axis: Color::from_rgb8(236, 240, 243),
            grid_line: Color::from_rgb8(242, 244, 245),
            hover_line: Color::from_rgb8(223, 230, 235),
            tooltip_background: Color::from_rgb8(255, 255, 255),
            tooltip_border: Color::from_rgb8(227, 227, 227),
            tooltip_text: Color::from_rgb8(34, 34, 34),
            dot_fill: Color::from_rgb8(255, 255, 255),
            overlay: Color::from_rgba8(245, 249, 251, 0.8),
            window_border: Color::from_rgba8(221, 234, 243, 0.9),
        }
    }

    #[must_use]
    pub const fn night() -> Self {
        Self {
            font: Color::from_rgb8(85, 103, 119),
            axis: Color::from_rgb8(49, 61, 76),
            grid_line: Color::from_rgb8(41, 53, 67),
            hover_line: Color::from_rgb8(60, 74, 89),
            tooltip_background: Color::from_rgb8(37, 50, 64),
            tooltip_border: Color::from_rgb8(32, 42, 54),
            tooltip_text: Color::from_rgb8(255, 255, 255),
            dot_fill: Color::from_rgb8(36, 47, 61),
            overlay: Color::from_rgba8(31, 42, 55, 0.6),
            window_border: Color::from_rgba8(65, 86, 106, 0.9),
        }
    }
}

#[must_use]
pub fn palette_for(night_mode: bool) -> Palette {
    if night_mode {
        Palette::night()
    } else {
        Palette::day()
    }
}
