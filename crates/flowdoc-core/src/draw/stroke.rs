//! Outline styling shared by shapes and connectors.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Dash pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    /// SVG `stroke-dasharray` value, `None` for a continuous line.
    pub fn dasharray(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
            Self::Dotted => Some("2,3"),
        }
    }
}

/// Color, width in pixels and dash style of a line.
///
/// ```
/// use flowdoc_core::{color::Color, draw::{StrokeDefinition, StrokeStyle}};
///
/// let edge = StrokeDefinition::solid(Color::new("gray").unwrap(), 1.5)
///     .with_style(StrokeStyle::Dashed);
/// assert_eq!(edge.width(), 1.5);
/// assert_eq!(edge.style(), StrokeStyle::Dashed);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Set the `stroke*` attributes of an SVG element from a [`StrokeDefinition`].
///
/// ```
/// use flowdoc_core::{color::Color, draw::StrokeDefinition};
/// use svg::node::element::Circle;
///
/// let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// let circle = flowdoc_core::apply_stroke!(Circle::new().set("r", 10), &stroke);
/// assert!(circle.to_string().contains("stroke-width=\"2\""));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        let element = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width())
            .set("stroke-linejoin", "round");
        match stroke.style().dasharray() {
            Some(dasharray) => element.set("stroke-dasharray", dasharray),
            None => element,
        }
    }};
}
