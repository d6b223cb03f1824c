//! Plain column tables for listings.

use crate::utils::formatting::truncate;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Every cell is cut to its column width; the last column is left open.
    pub fn render(&self) -> String {
        let last = self.columns.len().saturating_sub(1);
        let mut out = String::new();

        let headers: Vec<&str> = self.columns.iter().map(|c| c.header.as_str()).collect();
        self.push_line(&mut out, &headers, last);

        let rule: Vec<String> = self.columns.iter().map(|c| "-".repeat(c.width)).collect();
        let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
        self.push_line(&mut out, &rule, last);

        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            self.push_line(&mut out, &cells, last);
        }

        out
    }

    fn push_line(&self, out: &mut String, cells: &[&str], last: usize) {
        let mut line = String::new();
        for (i, col) in self.columns.iter().enumerate() {
            let cell = cells.get(i).copied().unwrap_or("");
            if i == last {
                line.push_str(cell);
            } else {
                let cell = truncate(cell, col.width);
                line.push_str(&format!("{:<width$} ", cell, width = col.width));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}
