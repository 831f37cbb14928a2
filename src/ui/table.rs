//! Box-drawn tables for course listings.

use console::measure_text_width;

/// A simple table for formatted output.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
    right_aligned: Vec<bool>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: Vec<&str>) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| measure_text_width(h)).collect();
        let right_aligned = vec![false; headers.len()];

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
            right_aligned,
        }
    }

    /// Right-align a column (numbers).
    pub fn align_right(mut self, column: usize) -> Self {
        if let Some(flag) = self.right_aligned.get_mut(column) {
            *flag = true;
        }
        self
    }

    /// Add a row to the table.
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let row: Vec<String> = row.iter().map(|s| s.as_ref().to_string()).collect();

        for (i, cell) in row.iter().enumerate() {
            if i < self.column_widths.len() {
                self.column_widths[i] = self.column_widths[i].max(measure_text_width(cell));
            }
        }

        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let mut lines = vec![
            self.render_border('┌', '┬', '┐'),
            self.render_row(&self.headers),
            self.render_border('├', '┼', '┤'),
        ];
        lines.extend(self.rows.iter().map(|row| self.render_row(row)));
        lines.push(self.render_border('└', '┴', '┘'));
        lines.join("\n")
    }

    fn render_border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self
            .column_widths
            .iter()
            .map(|width| "─".repeat(width + 2))
            .collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn render_row(&self, row: &[String]) -> String {
        let mut s = String::from("│");

        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let padding = " ".repeat(width - measure_text_width(cell));
            if self.right_aligned[i] {
                s.push_str(&format!(" {}{} │", padding, cell));
            } else {
                s.push_str(&format!(" {}{} │", cell, padding));
            }
        }

        s
    }
}
