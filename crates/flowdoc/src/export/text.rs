//! Character-grid preview for terminals.
//!
//! Shapes become bracketed labels (`( )` circles, `< >` diamonds, `[ ]`
//! rectangles), connectors are traced with dots and end in an arrow glyph
//! pointing along the curve, and free text is written as is.

use log::info;

use flowdoc_core::{
    draw::{DrawCommand, DrawList, ShapeKind},
    geometry::{Bounds, Point, Size},
};

use crate::export::{self, Exporter};

/// Samples taken along each connector, per diagram unit of chord length.
const SAMPLES_PER_UNIT: f32 = 12.0;
/// Largest grid the exporter will allocate, in cells.
const MAX_CELLS: f32 = 4_000_000.0;

/// Renders a draw list onto a grid of characters.
#[derive(Debug)]
pub struct TextArtExporter {
    columns_per_unit: f32,
    rows_per_unit: f32,
    output: Option<String>,
}

impl Default for TextArtExporter {
    fn default() -> Self {
        Self::new(8.0, 2.0)
    }
}

impl TextArtExporter {
    pub fn new(columns_per_unit: f32, rows_per_unit: f32) -> Self {
        Self {
            columns_per_unit,
            rows_per_unit,
            output: None,
        }
    }

    pub fn finish(self) -> Result<String, export::Error> {
        self.output
            .ok_or_else(|| export::Error::Render("no draw list was exported".to_string()))
    }

    fn text_size(&self, text: &str) -> Size {
        let longest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let lines = text.lines().count().max(1);
        Size::new(
            longest as f32 / self.columns_per_unit,
            lines as f32 / self.rows_per_unit,
        )
    }

    fn extent(&self, command: &DrawCommand) -> Bounds {
        match command {
            DrawCommand::Shape {
                kind,
                center,
                size,
                label,
                ..
            } => {
                let label_size = self.text_size(&shape_text(*kind, label));
                center.to_bounds(size.max(label_size))
            }
            DrawCommand::Connector { path, .. } => Bounds::from_point(path.start())
                .merge(&Bounds::from_point(path.control()))
                .merge(&Bounds::from_point(path.end())),
            DrawCommand::Text { text, position, .. } => position.to_bounds(self.text_size(text)),
            DrawCommand::LegendSwatch {
                kind,
                label,
                position,
                ..
            } => {
                let size = self.text_size(&legend_text(*kind, label));
                Point::new(position.x() + size.width() / 2.0, position.y()).to_bounds(size)
            }
        }
    }
}

impl Exporter for TextArtExporter {
    fn export(&mut self, draw_list: &DrawList) -> Result<(), export::Error> {
        if !(self.columns_per_unit > 0.0 && self.rows_per_unit > 0.0) {
            return Err(export::Error::Render(
                "grid resolution must be positive".to_string(),
            ));
        }

        let extents: Vec<Bounds> = draw_list
            .commands()
            .iter()
            .map(|command| self.extent(command))
            .collect();
        if extents.iter().any(|extent| !extent.is_finite()) {
            return Err(export::Error::Render(
                "draw list contains a command at a non-finite position".to_string(),
            ));
        }
        let Some(bounds) = extents.into_iter().reduce(|acc, b| acc.merge(&b)) else {
            self.output = Some(String::new());
            return Ok(());
        };

        let mut grid = Grid::new(bounds, self.columns_per_unit, self.rows_per_unit)?;

        // Connectors first so shapes and text overwrite their dots
        for command in draw_list {
            if let DrawCommand::Connector { path, head, .. } = command {
                let samples = (path.start().distance(path.end()) * SAMPLES_PER_UNIT)
                    .ceil()
                    .max(2.0) as usize;
                for step in 1..samples {
                    grid.put(path.point_at(step as f32 / samples as f32), '.');
                }
                grid.put(head.tip(), arrow_glyph(path.end_direction()));
            }
        }

        for command in draw_list {
            match command {
                DrawCommand::Shape {
                    kind,
                    center,
                    label,
                    ..
                } => grid.write_centered(*center, &shape_text(*kind, label)),
                DrawCommand::Text { text, position, .. } => grid.write_centered(*position, text),
                DrawCommand::LegendSwatch {
                    kind,
                    label,
                    position,
                    ..
                } => grid.write_from(*position, &legend_text(*kind, label)),
                DrawCommand::Connector { .. } => {}
            }
        }

        let art = grid.into_string();
        info!(lines = art.lines().count(); "Text art exported");
        self.output = Some(art);
        Ok(())
    }
}

fn shape_text(kind: ShapeKind, label: &str) -> String {
    let (open, close) = match kind {
        ShapeKind::Circle => ('(', ')'),
        ShapeKind::Diamond => ('<', '>'),
        ShapeKind::RoundedRectangle => ('[', ']'),
    };
    // Multi-line labels are flattened onto one row
    let label = label.lines().collect::<Vec<_>>().join(" ");
    format!("{open} {label} {close}")
}

fn legend_text(kind: ShapeKind, label: &str) -> String {
    let glyph = match kind {
        ShapeKind::Circle => "()",
        ShapeKind::Diamond => "<>",
        ShapeKind::RoundedRectangle => "[]",
    };
    format!("{glyph} {label}")
}

fn arrow_glyph(direction: Point) -> char {
    if direction.x().abs() >= direction.y().abs() {
        if direction.x() >= 0.0 { '>' } else { '<' }
    } else if direction.y() >= 0.0 {
        '^'
    } else {
        'v'
    }
}

struct Grid {
    cells: Vec<Vec<char>>,
    bounds: Bounds,
    columns_per_unit: f32,
    rows_per_unit: f32,
}

impl Grid {
    fn new(
        bounds: Bounds,
        columns_per_unit: f32,
        rows_per_unit: f32,
    ) -> Result<Self, export::Error> {
        let columns = (bounds.width() * columns_per_unit).ceil() + 1.0;
        let rows = (bounds.height() * rows_per_unit).ceil() + 1.0;
        let cells = columns * rows;
        if !cells.is_finite() || cells > MAX_CELLS {
            return Err(export::Error::Render(format!(
                "diagram needs a {columns} x {rows} character grid, more than {MAX_CELLS} cells"
            )));
        }
        Ok(Self {
            cells: vec![vec![' '; columns as usize]; rows as usize],
            bounds,
            columns_per_unit,
            rows_per_unit,
        })
    }

    fn cell(&self, point: Point) -> (isize, isize) {
        let column = ((point.x() - self.bounds.min_x()) * self.columns_per_unit).round();
        let row = ((self.bounds.max_y() - point.y()) * self.rows_per_unit).round();
        (column as isize, row as isize)
    }

    fn put_cell(&mut self, column: isize, row: isize, ch: char) {
        let (Ok(column), Ok(row)) = (usize::try_from(column), usize::try_from(row)) else {
            return;
        };
        if let Some(cell) = self.cells.get_mut(row).and_then(|line| line.get_mut(column)) {
            *cell = ch;
        }
    }

    fn put(&mut self, point: Point, ch: char) {
        let (column, row) = self.cell(point);
        self.put_cell(column, row, ch);
    }

    /// Write each line of `text` starting at the cell of `start`.
    fn write_from(&mut self, start: Point, text: &str) {
        let (column, row) = self.cell(start);
        for (offset, ch) in text.chars().enumerate() {
            self.put_cell(column + offset as isize, row, ch);
        }
    }

    /// Write `text` centered on `center`, one grid row per line.
    fn write_centered(&mut self, center: Point, text: &str) {
        let (column, row) = self.cell(center);
        let lines: Vec<&str> = text.lines().collect();
        let first_row = row - (lines.len() as isize - 1) / 2;
        for (line_offset, line) in lines.iter().enumerate() {
            let width = line.chars().count() as isize;
            let start = column - width / 2;
            for (offset, ch) in line.chars().enumerate() {
                self.put_cell(start + offset as isize, first_row + line_offset as isize, ch);
            }
        }
    }

    fn into_string(self) -> String {
        let mut out = String::new();
        for line in self.cells {
            let line: String = line.into_iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use flowdoc_core::{
        color::Color,
        draw::{ArrowHead, Connector, StrokeDefinition, TextRole},
        identifier::Id,
        node_type::NodeType,
    };

    use super::*;

    fn shape(name: &str, kind: ShapeKind, y: f32) -> DrawCommand {
        DrawCommand::Shape {
            node: Id::new(name),
            kind,
            center: Point::new(0.0, y),
            size: kind.size(),
            fill: Color::default(),
            stroke: StrokeDefinition::default(),
            label: name.to_string(),
        }
    }

    fn export(list: &DrawList) -> String {
        let mut exporter = TextArtExporter::default();
        exporter.export(list).unwrap();
        exporter.finish().unwrap()
    }

    #[test]
    fn test_shapes_use_bracket_styles() {
        let list: DrawList = [
            shape("begin", ShapeKind::Circle, 2.0),
            shape("check", ShapeKind::Diamond, 1.0),
            shape("work", ShapeKind::RoundedRectangle, 0.0),
        ]
        .into_iter()
        .collect();
        let art = export(&list);
        assert!(art.contains("( begin )"));
        assert!(art.contains("< check >"));
        assert!(art.contains("[ work ]"));
    }

    #[test]
    fn test_downward_connector_ends_in_arrow() {
        let path = Connector::curved(Point::new(0.0, 3.0), Point::new(0.0, 0.0), 0.0);
        let list: DrawList = [DrawCommand::Connector {
            from: Id::new("a"),
            to: Id::new("b"),
            path,
            head: ArrowHead::for_connector(&path),
            stroke: StrokeDefinition::default(),
        }]
        .into_iter()
        .collect();
        let art = export(&list);
        assert!(art.contains('v'));
        assert!(art.contains('.'));
    }

    #[test]
    fn test_legend_line() {
        let list: DrawList = [DrawCommand::LegendSwatch {
            node_type: NodeType::Decision,
            kind: ShapeKind::Diamond,
            color: Color::default(),
            label: "Decision".to_string(),
            position: Point::new(0.0, 0.0),
        }]
        .into_iter()
        .collect();
        assert!(export(&list).contains("<> Decision"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(export(&DrawList::new()), "");
    }

    #[test]
    fn test_non_finite_position_rejected() {
        let list: DrawList = [
            shape("begin", ShapeKind::Circle, 0.0),
            DrawCommand::Text {
                text: "lost".to_string(),
                position: Point::new(f32::INFINITY, 0.0),
                role: TextRole::Annotation,
            },
        ]
        .into_iter()
        .collect();

        let mut exporter = TextArtExporter::default();
        let err = exporter.export(&list).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let list: DrawList = [
            shape("begin", ShapeKind::Circle, 0.0),
            DrawCommand::Text {
                text: "far".to_string(),
                position: Point::new(1e5, 1e5),
                role: TextRole::Annotation,
            },
        ]
        .into_iter()
        .collect();

        let mut exporter = TextArtExporter::default();
        let err = exporter.export(&list).unwrap_err();
        assert!(err.to_string().contains("character grid"));
        assert!(exporter.finish().is_err());
    }

    #[test]
    fn test_arrow_glyphs() {
        assert_eq!(arrow_glyph(Point::new(1.0, 0.0)), '>');
        assert_eq!(arrow_glyph(Point::new(-1.0, 0.2)), '<');
        assert_eq!(arrow_glyph(Point::new(0.0, 1.0)), '^');
        assert_eq!(arrow_glyph(Point::new(0.1, -1.0)), 'v');
    }
}
