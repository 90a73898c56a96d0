// ABOUTME: Table exporter walking a snapshot's expression list in order
// Folders become header lines, table columns become "latex = values" lines

use std::io::Write;

use tracing::debug;

use crate::data::model::{Expression, GraphState};
use crate::export::render::{ValueFormat, ValueRenderer};
use crate::utils::error::Result;

/// Exports the table data of one snapshot as text lines.
///
/// The pass is a single linear walk over the expression list: a folder emits
/// one `#title` header, a table emits one line per column in column order,
/// every other variant emits nothing. Input order is preserved throughout.
pub struct TableExporter {
    renderer: Box<dyn ValueRenderer>,
    include_folders: bool,
}

impl TableExporter {
    pub fn new(format: ValueFormat) -> Self {
        Self {
            renderer: format.renderer(),
            include_folders: true,
        }
    }

    /// Use a caller-provided rendering strategy
    pub fn with_renderer(renderer: Box<dyn ValueRenderer>) -> Self {
        Self {
            renderer,
            include_folders: true,
        }
    }

    /// Toggle folder header lines (on by default)
    pub fn include_folders(mut self, include: bool) -> Self {
        self.include_folders = include;
        self
    }

    /// Lazily iterate the export lines for `state`.
    ///
    /// The iterator is finite and yields lines in emission order; it borrows
    /// the snapshot, so it reflects exactly the state passed in.
    pub fn lines<'a>(&'a self, state: &'a GraphState) -> ExportLines<'a> {
        ExportLines {
            exporter: self,
            expressions: state.expressions(),
            next_expr: 0,
            next_column: 0,
        }
    }

    /// Stream the export to a writer, one newline-terminated line per
    /// emission. Returns the number of lines written.
    pub fn export_to<W: Write>(&self, state: &GraphState, out: &mut W) -> Result<u64> {
        let mut count = 0u64;
        for line in self.lines(state) {
            writeln!(out, "{}", line)?;
            count += 1;
        }
        debug!(
            lines = count,
            expressions = state.expressions().len(),
            "export pass complete"
        );
        Ok(count)
    }
}

impl Default for TableExporter {
    fn default() -> Self {
        Self::new(ValueFormat::default())
    }
}

/// Lazy line iterator produced by [`TableExporter::lines`]
pub struct ExportLines<'a> {
    exporter: &'a TableExporter,
    expressions: &'a [Expression],
    next_expr: usize,
    next_column: usize,
}

impl<'a> Iterator for ExportLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let expr = self.expressions.get(self.next_expr)?;
            match expr {
                Expression::Folder(folder) => {
                    self.next_expr += 1;
                    if self.exporter.include_folders {
                        return Some(format!("#{}", folder.title));
                    }
                }
                Expression::Table(table) => {
                    if let Some(column) = table.columns().get(self.next_column) {
                        self.next_column += 1;
                        return Some(format!(
                            "{} = {}",
                            column.latex,
                            self.exporter.renderer.render(&column.values)
                        ));
                    }
                    self.next_expr += 1;
                    self.next_column = 0;
                }
                Expression::Other => {
                    self.next_expr += 1;
                }
            }
        }
    }
}
