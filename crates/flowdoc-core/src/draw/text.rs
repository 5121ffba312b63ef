//! Text roles and their SVG rendering.
//!
//! Text appears in four places: node labels, free-floating annotations,
//! legend entries and the diagram title. Each [`TextRole`] fixes the font
//! styling for one of them. Text size is estimated from character counts,
//! which is sufficient for sizing the canvas and label backgrounds.

use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    color::Color,
    draw::{LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f32 = 0.6;
/// Line height as a fraction of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Where a piece of text is used, which determines its styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// Bold label centered on a node, drawn over a white rounded box.
    NodeLabel,
    /// Italic gray caption, e.g. a branch guard.
    Annotation,
    /// Entry text next to a legend swatch.
    Legend,
    /// Diagram heading.
    Title,
}

impl TextRole {
    /// Font size in pixels.
    pub fn font_size(self) -> f32 {
        match self {
            Self::NodeLabel => 11.0,
            Self::Annotation => 10.0,
            Self::Legend => 12.0,
            Self::Title => 20.0,
        }
    }

    fn font_weight(self) -> &'static str {
        match self {
            Self::NodeLabel | Self::Title => "bold",
            Self::Annotation | Self::Legend => "normal",
        }
    }

    fn font_style(self) -> &'static str {
        match self {
            Self::Annotation => "italic",
            _ => "normal",
        }
    }

    fn anchor(self) -> &'static str {
        match self {
            Self::Legend => "start",
            _ => "middle",
        }
    }

    fn color(self) -> Option<Color> {
        match self {
            Self::Annotation => Color::new("gray").ok(),
            _ => None,
        }
    }

    fn background(self) -> Option<Color> {
        match self {
            Self::NodeLabel => Color::new("white").ok().map(|color| color.with_alpha(0.8)),
            _ => None,
        }
    }

    /// Space around the text on every side, in pixels.
    fn padding(self) -> f32 {
        match self {
            Self::NodeLabel => 3.0,
            _ => 0.0,
        }
    }

    /// Estimate the rendered size of `text` in pixels, padding included.
    ///
    /// Lines are separated by `\n`.
    pub fn estimate_size(self, text: &str) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        let font_size = self.font_size();
        let longest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let line_count = text.lines().count().max(1);
        Size::new(
            longest as f32 * font_size * CHAR_WIDTH_FACTOR,
            line_count as f32 * font_size * LINE_HEIGHT_FACTOR,
        )
        .grow(self.padding())
    }

    /// Render `text` at `position` (pixels). Centered roles treat the
    /// position as the text center; legend text starts at the position.
    pub fn render_to_layers(self, text: &str, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if text.is_empty() {
            return output;
        }

        let font_size = self.font_size();
        let line_height = font_size * LINE_HEIGHT_FACTOR;
        let lines: Vec<&str> = text.lines().collect();
        // First baseline sits so the block is vertically centered
        let first_dy = -line_height * (lines.len() as f32 - 1.0) / 2.0;

        let mut rendered = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.anchor())
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-size", font_size)
            .set("font-weight", self.font_weight())
            .set("font-style", self.font_style());

        if let Some(color) = self.color() {
            rendered = rendered
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for (idx, line) in lines.iter().enumerate() {
            let dy = if idx == 0 { first_dy } else { line_height };
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", dy)
                .add(SvgText::new(*line));
            rendered = rendered.add(tspan);
        }

        if let Some(bg_color) = self.background() {
            let bg_bounds = position.to_bounds(self.estimate_size(text));
            let bg = svg_element::Rectangle::new()
                .set("x", bg_bounds.min_x())
                .set("y", bg_bounds.min_y())
                .set("width", bg_bounds.width())
                .set("height", bg_bounds.height())
                .set("fill", bg_color.to_string())
                .set("fill-opacity", bg_color.alpha())
                .set("rx", 3.0);
            output.add_to_layer(RenderLayer::Label, Box::new(bg));
        }

        let layer = match self {
            Self::NodeLabel => RenderLayer::Label,
            Self::Annotation | Self::Title => RenderLayer::Annotation,
            Self::Legend => RenderLayer::Legend,
        };
        output.add_to_layer(layer, Box::new(rendered));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_size_empty() {
        assert_eq!(TextRole::Annotation.estimate_size(""), Size::default());
    }

    #[test]
    fn test_estimate_size_multiline_uses_longest_line() {
        let single = TextRole::Annotation.estimate_size("if runMigrations &");
        let multi = TextRole::Annotation.estimate_size("if runMigrations &\nSQLite & Drizzle");
        assert_eq!(single.width(), multi.width());
        assert!(multi.height() > single.height());
    }

    #[test]
    fn test_node_label_includes_background() {
        let output = TextRole::NodeLabel.render_to_layers("Start CLI", Point::new(10.0, 10.0));
        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();
        assert!(rendered.contains("<rect"));
        assert!(rendered.contains("Start CLI"));
        assert!(rendered.contains("font-weight=\"bold\""));
    }

    #[test]
    fn test_annotation_is_italic_without_background() {
        let output = TextRole::Annotation.render_to_layers("if initializeGit", Point::default());
        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();
        assert!(!rendered.contains("<rect"));
        assert!(rendered.contains("font-style=\"italic\""));
    }

    #[test]
    fn test_multiline_renders_one_tspan_per_line() {
        let output = TextRole::Annotation.render_to_layers("a\nb\nc", Point::default());
        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered.matches("<tspan").count(), 3);
    }
}
