//! Free-floating text: annotations and the diagram title.

use log::warn;

use flowdoc_core::{
    draw::{DrawCommand, DrawList, TextRole},
    geometry::Point,
};

use crate::definition::AnnotationSpec;

/// Emit an annotation exactly where it was declared. No validation
/// against the graph happens here.
pub fn render(annotation: &AnnotationSpec) -> DrawCommand {
    DrawCommand::Text {
        text: annotation.text.clone(),
        position: annotation.position,
        role: TextRole::Annotation,
    }
}

/// Render every annotation with a finite position, in declaration order.
///
/// Annotations at `inf` or `nan` coordinates are dropped with a warning.
pub fn render_all(annotations: &[AnnotationSpec]) -> DrawList {
    annotations
        .iter()
        .filter(|annotation| {
            let finite = annotation.position.is_finite();
            if !finite {
                warn!(text:% = annotation.text; "Ignoring annotation at non-finite position");
            }
            finite
        })
        .map(render)
        .collect()
}

pub fn render_title(title: &str, position: Point) -> DrawCommand {
    DrawCommand::Text {
        text: title.to_string(),
        position,
        role: TextRole::Title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_keeps_text_and_position() {
        let spec = AnnotationSpec::new("if runMigrations &\nSQLite & Drizzle", Point::new(-1.0, -3.5));
        assert_eq!(
            render(&spec),
            DrawCommand::Text {
                text: "if runMigrations &\nSQLite & Drizzle".to_string(),
                position: Point::new(-1.0, -3.5),
                role: TextRole::Annotation,
            }
        );
    }

    #[test]
    fn test_render_all_drops_non_finite_positions() {
        let annotations = [
            AnnotationSpec::new("far away", Point::new(f32::INFINITY, 0.0)),
            AnnotationSpec::new("kept", Point::new(1.0, 2.0)),
            AnnotationSpec::new("undefined", Point::new(0.0, f32::NAN)),
        ];
        let list = render_all(&annotations);
        assert_eq!(list.len(), 1);
        assert_eq!(list.commands()[0], render(&annotations[1]));
    }
}
