//! Table rendering utilities for CLI outputs.
//!
//! Cells are padded before colouring so escape codes never break alignment.

use crate::utils::colors::RESET;

pub struct Column {
    pub header: String,
    pub width: usize,
    pub color: &'static str,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
            color: RESET,
        }
    }

    pub fn colored(header: &str, width: usize, color: &'static str) -> Self {
        Self {
            header: header.to_string(),
            width,
            color,
        }
    }
}

pub struct Cell {
    pub text: String,
    pub color: &'static str,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: RESET,
        }
    }

    pub fn colored(text: impl Into<String>, color: &'static str) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
    /// Row indexes followed by a separator line.
    pub separators: Vec<usize>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separators: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Draw a separator under the last added row.
    pub fn add_separator(&mut self) {
        if !self.rows.is_empty() {
            self.separators.push(self.rows.len() - 1);
        }
    }

    fn line_width(&self) -> usize {
        self.columns.iter().map(|c| c.width + 1).sum()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&format!(
                "{}{:<width$}{} ",
                col.color,
                col.header,
                RESET,
                width = col.width
            ));
        }
        out.push('\n');
        out.push_str(&"-".repeat(self.line_width()));
        out.push('\n');

        // Rows
        for (r, row) in self.rows.iter().enumerate() {
            for (i, col) in self.columns.iter().enumerate() {
                let (text, color) = row
                    .get(i)
                    .map(|c| (c.text.as_str(), c.color))
                    .unwrap_or(("", RESET));
                out.push_str(&format!(
                    "{}{:<width$}{} ",
                    color,
                    text,
                    RESET,
                    width = col.width
                ));
            }
            out.push('\n');

            if self.separators.contains(&r) {
                out.push_str(&"-".repeat(self.line_width()));
                out.push('\n');
            }
        }

        out
    }
}
