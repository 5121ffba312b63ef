//! Flowdoc - Render documented process flows.
//!
//! A flow definition (typed nodes, directed edges, optional manual
//! positions and annotations) is turned into two views of the same
//! process: a diagram with typed shapes, curved connectors, annotations
//! and a legend, and a numbered textual step summary.
//!
//! The pipeline is Build → Layout → Render → Present. Rendering produces an
//! immutable [`draw::DrawList`]; exporters in [`export`] consume it.

pub mod config;
pub mod definition;
pub mod export;
pub mod flows;
pub mod graph;
pub mod layout;
pub mod render;
pub mod summary;

mod error;

pub use flowdoc_core::{color, draw, geometry, identifier, node_type};

pub use error::{DefinitionError, FlowError, LayoutError, PaletteError, RenderError};

use log::{debug, info};

use config::AppConfig;
use definition::FlowDefinition;
use draw::DrawList;
use export::{Exporter, svg::SvgExporter, text::TextArtExporter};
use layout::LayoutEngine;
use render::DiagramRenderer;
use summary::SummaryReporter;

/// Runs the Flowdoc pipeline on flow definitions.
///
/// # Examples
///
/// ```
/// use flowdoc::{DiagramBuilder, config::AppConfig, flows};
///
/// let definition = flows::documented().expect("built-in flow parses");
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// let svg = builder.render_svg(&definition).expect("Failed to render");
/// assert!(svg.contains("<svg"));
///
/// let summary = builder.summary(&definition).expect("Failed to summarize");
/// assert!(summary.contains("14. Success Message"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build, lay out and render a definition into draw commands.
    ///
    /// # Errors
    ///
    /// Definition and layout errors are raised before any drawing starts;
    /// palette and render errors abort the render.
    pub fn draw(&self, definition: &FlowDefinition) -> Result<DrawList, FlowError> {
        info!("Building flow graph");
        let graph = definition.graph()?;

        info!("Computing layout");
        let layout =
            LayoutEngine::new(self.config.layout()).layout(&graph, definition.positions.as_ref())?;
        debug!(placed = layout.len(); "Layout computed");

        let palette = self.config.palette();
        let draw_list = DiagramRenderer::new(&palette, self.config.style()).render(
            &graph,
            &layout,
            &definition.annotations,
            definition.title.as_deref(),
        )?;
        info!(
            commands = draw_list.len(),
            connectors = render::connector_count(&draw_list);
            "Diagram rendered"
        );
        Ok(draw_list)
    }

    /// Render a definition to an SVG document.
    pub fn render_svg(&self, definition: &FlowDefinition) -> Result<String, FlowError> {
        let draw_list = self.draw(definition)?;

        let style = self.config.style();
        let background = style.background_color().map_err(FlowError::Config)?;
        let mut exporter =
            SvgExporter::new(style.scale(), style.margin()).with_background(background);
        exporter.export(&draw_list)?;

        info!("SVG rendered successfully");
        Ok(exporter.finish()?)
    }

    /// Render a definition to a character-grid preview.
    pub fn render_text_art(&self, definition: &FlowDefinition) -> Result<String, FlowError> {
        let draw_list = self.draw(definition)?;
        let mut exporter = TextArtExporter::default();
        exporter.export(&draw_list)?;
        Ok(exporter.finish()?)
    }

    /// Format the step summary of a definition.
    ///
    /// Independent of layout and rendering: only the graph (for derived
    /// steps) or the explicit step list is consulted.
    pub fn summary(&self, definition: &FlowDefinition) -> Result<String, FlowError> {
        let steps = definition.steps()?;
        debug!(steps = steps.len(); "Summary steps resolved");
        Ok(SummaryReporter::new()
            .with_title(definition.title.clone())
            .render(&steps))
    }
}
