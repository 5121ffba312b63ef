//! Configuration types for Flowdoc rendering.
//!
//! All types implement [`serde::Deserialize`] with defaults for every
//! field, so a configuration file only needs to name what it changes.
//!
//! - [`AppConfig`] - Root combining layout, style and an optional palette.
//! - [`LayoutConfig`] - Gap policy and force simulation parameters.
//! - [`StyleConfig`] - Canvas and connector styling.
//!
//! # Example
//!
//! ```
//! # use flowdoc::config::{AppConfig, GapPolicy};
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     gap_policy = "strict"
//!
//!     [style]
//!     scale = 60.0
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.layout().gap_policy(), GapPolicy::Strict);
//! assert_eq!(config.style().scale(), 60.0);
//! ```

use serde::Deserialize;

use flowdoc_core::{
    color::Color,
    draw::{DEFAULT_CURVATURE, StrokeStyle},
};

use crate::render::Palette;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    /// Replaces the default palette entirely when present.
    #[serde(default)]
    palette: Option<Palette>,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, style: StyleConfig, palette: Option<Palette>) -> Self {
        Self {
            layout,
            style,
            palette,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// The configured palette, or the default one.
    pub fn palette(&self) -> Palette {
        self.palette.clone().unwrap_or_default()
    }
}

/// What the layout engine does with nodes missing from a manual position
/// table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Place missing nodes with the force simulation, keeping manually
    /// positioned nodes pinned in the same coordinate frame.
    #[default]
    Fill,
    /// Fail with `NodeWithoutCoordinate` on the first missing node.
    Strict,
}

/// Parameters of the force-directed fallback layout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    pub iterations: usize,
    pub seed: u64,
    pub spring: f32,
    pub repulsion: f32,
    pub damping: f32,
    /// Extra clearance kept between node bounding boxes, in diagram units.
    pub min_distance: f32,
    /// Largest width or height of an unpinned layout before it is scaled down.
    pub max_extent: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            seed: 42,
            spring: 0.1,
            repulsion: 0.1,
            damping: 0.85,
            min_distance: 0.8,
            max_extent: 12.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    gap_policy: GapPolicy,

    #[serde(default)]
    force: ForceConfig,
}

impl LayoutConfig {
    pub fn new(gap_policy: GapPolicy, force: ForceConfig) -> Self {
        Self { gap_policy, force }
    }

    pub fn gap_policy(&self) -> GapPolicy {
        self.gap_policy
    }

    pub fn force(&self) -> &ForceConfig {
        &self.force
    }
}

/// Visual styling of rendered diagrams.
///
/// Colors are kept as strings and parsed on access so an invalid value is
/// reported when it is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    /// Pixels per diagram unit.
    scale: f32,
    /// Canvas margin in pixels.
    margin: f32,
    edge_color: String,
    edge_width: f32,
    edge_style: StrokeStyle,
    curvature: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            scale: 80.0,
            margin: 40.0,
            edge_color: "black".to_string(),
            edge_width: 1.5,
            edge_style: StrokeStyle::Solid,
            curvature: DEFAULT_CURVATURE,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn edge_color(&self) -> Result<Color, String> {
        Color::new(&self.edge_color).map_err(|err| format!("Invalid edge color in config: {err}"))
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn edge_width(&self) -> f32 {
        self.edge_width
    }

    pub fn edge_style(&self) -> StrokeStyle {
        self.edge_style
    }

    pub fn curvature(&self) -> f32 {
        self.curvature
    }
}
