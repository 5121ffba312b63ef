//! Drawing primitives shared by renderers and exporters.

mod command;
mod connector;
mod layer;
mod shape;
mod stroke;
mod text;

pub use command::{
    DrawCommand, DrawList, LEGEND_LABEL_GAP, LEGEND_SWATCH_SIZE, Projection,
};
pub use connector::{ARROW_HEAD_LENGTH, ARROW_HEAD_WIDTH, ArrowHead, Connector, DEFAULT_CURVATURE};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use shape::{
    CIRCLE_RADIUS, DIAMOND_RADIUS, ROUNDED_RECT_HEIGHT, ROUNDED_RECT_PAD, ROUNDED_RECT_WIDTH,
    SHAPE_FILL_ALPHA, ShapeKind,
};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::TextRole;
