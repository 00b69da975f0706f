//! Document rendering for table exports

use chrono::{DateTime, Local};
use rust_embed::Embed;
use serde::Serialize;
use tera::Tera;
use thiserror::Error;

use crate::core::filter::FilterCriteria;
use crate::entities::{Project, ProjectField};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Template for the Word-compatible project table
pub const PROJECT_TABLE_TEMPLATE: &str = "project_table.doc.tera";

/// Column order of the exported table
pub const TABLE_COLUMNS: [ProjectField; 8] = [
    ProjectField::ProjectName,
    ProjectField::ProjectType,
    ProjectField::GlobalDestination,
    ProjectField::PreciseDestination,
    ProjectField::Description,
    ProjectField::WorkInProgress,
    ProjectField::DueDate,
    ProjectField::Comments,
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

#[derive(Serialize)]
struct FilterLine {
    label: &'static str,
    value: String,
}

/// Renders exports from the embedded templates
pub struct TemplateGenerator {
    tera: Tera,
}

impl TemplateGenerator {
    /// Load every embedded template. Cell values are HTML-escaped.
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".doc.tera"]);

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                let text = std::str::from_utf8(&content.data)
                    .map_err(|e| TemplateError::RenderError(format!("{filename}: {e}")))?;
                tera.add_raw_template(filename, text)
                    .map_err(|e| TemplateError::RenderError(e.to_string()))?;
            }
        }

        Ok(Self { tera })
    }

    /// Render the project table as an HTML document Word opens in landscape A4
    pub fn render_project_table(
        &self,
        projects: &[&Project],
        criteria: &FilterCriteria,
        generated_at: DateTime<Local>,
    ) -> Result<String, TemplateError> {
        if !self
            .tera
            .get_template_names()
            .any(|n| n == PROJECT_TABLE_TEMPLATE)
        {
            return Err(TemplateError::NotFound(PROJECT_TABLE_TEMPLATE.to_string()));
        }

        let headers: Vec<String> = TABLE_COLUMNS.iter().map(|f| capitalize(f.label())).collect();
        let rows: Vec<Vec<&str>> = projects
            .iter()
            .map(|p| TABLE_COLUMNS.iter().map(|f| f.value(p)).collect())
            .collect();
        let filters: Vec<FilterLine> = criteria
            .active()
            .into_iter()
            .map(|(field, value)| FilterLine {
                label: field.label(),
                value: value.to_string(),
            })
            .collect();

        let mut context = tera::Context::new();
        context.insert("title", "Project table");
        context.insert("headers", &headers);
        context.insert("rows", &rows);
        context.insert("filters", &filters);
        context.insert(
            "generated",
            &format!(
                "{} project(s), generated {}",
                projects.len(),
                generated_at.format("%Y-%m-%d %H:%M")
            ),
        );

        self.tera
            .render(PROJECT_TABLE_TEMPLATE, &context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::AppState;

    #[test]
    fn test_project_table_has_word_page_setup_and_rows() {
        let state = AppState::seed();
        let projects: Vec<&Project> = state.projects.iter().collect();
        let html = TemplateGenerator::new()
            .unwrap()
            .render_project_table(&projects, &FilterCriteria::new(), Local::now())
            .unwrap();

        assert!(html.contains("urn:schemas-microsoft-com:office:word"));
        assert!(html.contains("size: A4 landscape"));
        assert!(html.contains("<th>Project name</th>"));
        assert!(html.contains("<td>Alpha</td>"));
        assert!(html.contains("<td>Tokyo</td>"));
        assert!(html.contains("2 project(s)"));
    }

    #[test]
    fn test_cells_are_escaped_and_filters_listed() {
        let mut state = AppState::seed();
        state.projects[0].comments = "<b>&</b>".to_string();
        let projects: Vec<&Project> = state.projects.iter().take(1).collect();
        let criteria = FilterCriteria::new().global_destination("Europe");
        let html = TemplateGenerator::new()
            .unwrap()
            .render_project_table(&projects, &criteria, Local::now())
            .unwrap();

        assert!(!html.contains("<b>&</b>"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("global destination: Europe"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("due date"), "Due date");
        assert_eq!(capitalize(""), "");
    }
}
