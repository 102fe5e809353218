use crate::cli::{io, output};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub align: Align,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Right,
        }
    }
}

/// Row data for a [`Table`].
#[derive(Debug, Clone)]
pub struct TableRow {
    pub cells: Vec<String>,
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        let row = TableRow {
            cells: cells.into_iter().map(|value| value.into()).collect(),
        };
        self.rows.push(row);
    }
}

const COLUMN_GAP: &str = "  ";

/// Renders [`Table`] instances using padded columns sized to their content.
pub struct TableRenderer;

impl TableRenderer {
    pub fn widths(table: &Table) -> Vec<usize> {
        table
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                table
                    .rows
                    .iter()
                    .filter_map(|row| row.cells.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Header, separator and rows, without the title.
    pub fn render_lines(table: &Table) -> Vec<String> {
        let widths = Self::widths(table);
        let headers: Vec<&str> = table.columns.iter().map(|c| c.header.as_str()).collect();
        let total = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);

        let mut lines = vec![Self::format_line(table, &widths, &headers), "-".repeat(total)];
        for row in &table.rows {
            let cells: Vec<&str> = (0..table.columns.len())
                .map(|idx| row.cells.get(idx).map(String::as_str).unwrap_or(""))
                .collect();
            lines.push(Self::format_line(table, &widths, &cells));
        }
        lines
    }

    pub fn render(table: &Table) -> String {
        Self::render_lines(table).join("\n")
    }

    pub fn print(table: &Table) {
        if let Some(title) = &table.title {
            output::section(title);
        }
        for line in Self::render_lines(table) {
            let _ = io::println_text(&line);
        }
    }

    fn format_line(table: &Table, widths: &[usize], cells: &[&str]) -> String {
        let padded: Vec<String> = table
            .columns
            .iter()
            .zip(widths)
            .zip(cells)
            .map(|((column, width), cell)| {
                let fill = width.saturating_sub(cell.chars().count());
                match column.align {
                    Align::Left => format!("{cell}{}", " ".repeat(fill)),
                    Align::Right => format!("{}{cell}", " ".repeat(fill)),
                }
            })
            .collect();
        padded.join(COLUMN_GAP).trim_end().to_string()
    }
}
