//! Fixed-width, pipe-delimited text tables.
//!
//! ```text
//! -----------------------
//! | ID     | UTC Offset |
//! |--------|------------|
//! | london | +00:00     |
//! -----------------------
//! ```
//!
//! Every column is as wide as its longest value, header included.

use std::fmt;

use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing trailing cells render empty; extra cells are
    /// dropped.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn build(&self) -> tabled::Table {
        let mut builder = Builder::new();
        builder.push_record(self.headers.iter().cloned());
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }

        // Markdown body and header divider, boxed in by plain dash lines.
        let style = Style::markdown()
            .top('-')
            .bottom('-')
            .corner_top_left('-')
            .corner_top_right('-')
            .corner_bottom_left('-')
            .corner_bottom_right('-')
            .intersection_top('-')
            .intersection_bottom('-');

        let mut table = builder.build();
        table.with(style);
        table
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.build())
    }
}
