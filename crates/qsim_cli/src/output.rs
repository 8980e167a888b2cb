//! Result rendering for the terminal.

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Boxed two-column table.
    #[default]
    Table,
    /// Pretty-printed JSON document.
    Json,
}

/// A labelled two-column table.
#[derive(Debug, Default)]
pub struct Table {
    title: String,
    rows: Vec<(String, String)>,
}

impl Table {
    /// Empty table with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn row(mut self, label: impl Into<String>, value: impl ToString) -> Self {
        self.rows.push((label.into(), value.to_string()));
        self
    }

    /// Appends a numeric row with six decimals.
    pub fn number(self, label: impl Into<String>, value: f64) -> Self {
        self.row(label, format!("{:.6}", value))
    }

    /// Renders the table with box-drawing characters.
    pub fn render(&self) -> String {
        let label_width = self
            .rows
            .iter()
            .map(|(l, _)| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(5);
        let value_width = self
            .rows
            .iter()
            .map(|(_, v)| v.chars().count())
            .max()
            .unwrap_or(0)
            .max(5);
        let inner = label_width + value_width + 5;
        let title_width = self.title.chars().count();
        let inner = inner.max(title_width + 2);
        let value_width = inner - label_width - 5;

        let mut out = String::new();
        out.push_str(&format!("┌{}┐\n", "─".repeat(inner)));
        out.push_str(&format!("│ {:<w$} │\n", self.title, w = inner - 2));
        out.push_str(&format!(
            "├{}┬{}┤\n",
            "─".repeat(label_width + 2),
            "─".repeat(value_width + 2)
        ));
        for (label, value) in &self.rows {
            out.push_str(&format!(
                "│ {:<lw$} │ {:>vw$} │\n",
                label,
                value,
                lw = label_width,
                vw = value_width
            ));
        }
        out.push_str(&format!(
            "└{}┴{}┘",
            "─".repeat(label_width + 2),
            "─".repeat(value_width + 2)
        ));
        out
    }
}

/// Renders a serialisable report as pretty JSON.
pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Prints either the table or the JSON form of a report to stdout.
pub fn emit<T: Serialize>(
    format: OutputFormat,
    report: &T,
    table: impl FnOnce(&T) -> Table,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", table(report).render()),
        OutputFormat::Json => println!("{}", render_json(report)?),
    }
    Ok(())
}
