//! Table formatting for list commands
//!
//! Rows are built once as typed cells and rendered in the requested format.
//! Rendering returns a `String` so commands decide where it goes.

use console::style;
use serde_json::{Map, Value};

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Wrap text columns at this width instead of truncating
    pub wrap_width: Option<usize>,
    /// Print a "N item(s)" line after TSV output
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            wrap_width: None,
            show_summary: true,
        }
    }
}

impl TableConfig {
    pub fn with_wrap(width: usize) -> Self {
        Self {
            wrap_width: Some(width),
            show_summary: true,
        }
    }

    /// No summary line
    pub fn for_pipe() -> Self {
        Self {
            wrap_width: None,
            show_summary: false,
        }
    }
}

/// Break text at word boundaries to fit `max_width` characters
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.chars().count() <= max_width || max_width < 5 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// A typed cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Record id, cyan
    Id(String),
    /// Plain text, truncated to the column
    Text(String),
    /// Dimension or destination value, bold
    Value(String),
    /// A count, right-aligned
    Number(usize),
    /// Placeholder for an empty value
    Empty,
}

impl CellValue {
    /// Text cell, or `Empty` for an empty string
    pub fn text(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }

    /// Unformatted value
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(s) | CellValue::Text(s) | CellValue::Value(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    fn display_width(&self) -> usize {
        match self {
            CellValue::Empty => 1,
            other => other.raw().chars().count(),
        }
    }

    fn format_tsv(&self, width: usize, color: bool) -> String {
        let padded = |s: &str| pad(s, width);
        match self {
            CellValue::Id(id) if color => padded(&style(id).cyan().to_string()),
            CellValue::Value(v) if color => padded(&style(v).bold().to_string()),
            CellValue::Id(s) | CellValue::Value(s) => padded(s),
            CellValue::Text(s) => padded(&truncate_str(s, width)),
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Empty if color => padded(&style("-").dim().to_string()),
            CellValue::Empty => padded("-"),
        }
    }

    fn format_md(&self) -> String {
        match self {
            CellValue::Empty => "-".to_string(),
            other => other.raw().replace('|', "\\|"),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            CellValue::Number(n) => Value::from(*n),
            other => Value::String(other.raw()),
        }
    }
}

/// Left-align `s` in `width` visible columns, ignoring ANSI escapes
fn pad(s: &str, width: usize) -> String {
    let visible = console::measure_text_width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(visible)))
}

/// Column definition with key, header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cells keyed by column
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Renders rows in any [`OutputFormat`]
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    item_name: &'static str,
    config: TableConfig,
    color: bool,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], item_name: &'static str) -> Self {
        Self {
            columns,
            item_name,
            config: TableConfig::default(),
            color: console::colors_enabled(),
        }
    }

    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Force colors on or off
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Render rows. `Auto` and `Yaml` render as TSV.
    pub fn render(&self, rows: &[TableRow], format: OutputFormat) -> String {
        match format {
            OutputFormat::Csv => self.render_csv(rows),
            OutputFormat::Json => self.render_json(rows),
            OutputFormat::Md => self.render_md(rows),
            OutputFormat::Id => rows.iter().map(|r| format!("{}\n", r.id)).collect(),
            OutputFormat::Auto | OutputFormat::Tsv | OutputFormat::Yaml => self.render_tsv(rows),
        }
    }

    /// Render and print
    pub fn output(&self, rows: &[TableRow], format: OutputFormat) {
        print!("{}", self.render(rows, format));
    }

    fn widths(&self, rows: &[TableRow]) -> Vec<usize> {
        self.columns
            .iter()
            .map(|col| {
                let content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);
                let natural = col.header.len().max(content);
                match self.config.wrap_width {
                    Some(wrap) => natural.min(col.width.max(wrap)),
                    None => natural.min(col.width),
                }
            })
            .collect()
    }

    fn render_tsv(&self, rows: &[TableRow]) -> String {
        let widths = self.widths(rows);
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| {
                if self.color {
                    pad(&style(col.header).bold().to_string(), *w)
                } else {
                    pad(col.header, *w)
                }
            })
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');
        let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total));
        out.push('\n');

        for row in rows {
            match self.config.wrap_width {
                Some(wrap) => self.render_wrapped_row(&mut out, row, &widths, wrap),
                None => {
                    let line: Vec<String> = self
                        .columns
                        .iter()
                        .zip(&widths)
                        .map(|(col, w)| {
                            row.get(col.key)
                                .unwrap_or(&CellValue::Empty)
                                .format_tsv(*w, self.color)
                        })
                        .collect();
                    out.push_str(line.join(" ").trim_end());
                    out.push('\n');
                }
            }
        }

        if self.config.show_summary {
            let count = if self.color {
                style(rows.len()).cyan().to_string()
            } else {
                rows.len().to_string()
            };
            out.push_str(&format!("\n{} {}(s) found.\n", count, self.item_name));
        }
        out
    }

    fn render_wrapped_row(&self, out: &mut String, row: &TableRow, widths: &[usize], wrap: usize) {
        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .zip(widths)
            .map(|(col, w)| match row.get(col.key) {
                Some(CellValue::Text(s)) => wrap_text(s, wrap.min(*w)),
                Some(CellValue::Empty) | None => vec!["-".to_string()],
                Some(other) => vec![other.raw()],
            })
            .collect();
        let height = cells.iter().map(Vec::len).max().unwrap_or(1);
        for line in 0..height {
            let parts: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(lines, w)| pad(lines.get(line).map(String::as_str).unwrap_or(""), *w))
                .collect();
            out.push_str(parts.join(" ").trim_end());
            out.push('\n');
        }
        if height > 1 {
            out.push('\n');
        }
    }

    fn render_csv(&self, rows: &[TableRow]) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let header: Vec<&str> = self.columns.iter().map(|c| c.key).collect();
        let mut ok = writer.write_record(&header).is_ok();
        for row in rows {
            let record: Vec<String> = self
                .columns
                .iter()
                .map(|c| row.get(c.key).map(CellValue::raw).unwrap_or_default())
                .collect();
            ok &= writer.write_record(&record).is_ok();
        }
        match (ok, writer.into_inner()) {
            (true, Ok(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
            _ => String::new(),
        }
    }

    fn render_json(&self, rows: &[TableRow]) -> String {
        let items: Vec<Value> = rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                for col in self.columns {
                    let value = row.get(col.key).map(CellValue::to_json).unwrap_or(Value::Null);
                    object.insert(col.key.to_string(), value);
                }
                Value::Object(object)
            })
            .collect();
        let mut text = serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string());
        text.push('\n');
        text
    }

    fn render_md(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        out.push_str(&format!("| {} |\n", headers.join(" | ")));
        out.push_str(&format!(
            "|{}|\n",
            self.columns.iter().map(|_| "---").collect::<Vec<_>>().join("|")
        ));
        for row in rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|c| row.get(c.key).unwrap_or(&CellValue::Empty).format_md())
                .collect();
            out.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        out
    }
}
