//! Catalog document validation with source-located diagnostics

use jsonschema::error::ValidationErrorKind;
use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::schema::registry::{SchemaRegistry, CATALOG_SCHEMA};

/// A document that failed to parse or did not match the catalog schema
#[derive(Debug, Error, Diagnostic)]
#[error("{filename} is not a valid catalog document: {summary}")]
#[diagnostic(
    code(pcat::document::invalid),
    help("A catalog document needs at least bdd1_TypeProjet, bddTb1_Projects and bddTb2_Destinations")
)]
pub struct DocumentError {
    filename: String,
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<SchemaViolation>,
}

/// A single problem in a document
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaViolation {
    #[label("{hint}")]
    span: SourceSpan,

    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl SchemaViolation {
    pub fn new(message: String, hint: String, span: SourceSpan, help: Option<String>) -> Self {
        Self {
            span,
            message,
            hint,
            help,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl DocumentError {
    pub fn new(filename: &str, source: &str, violations: Vec<SchemaViolation>) -> Self {
        let summary = match violations.len() {
            1 => "1 error".to_string(),
            n => format!("{n} errors"),
        };
        Self {
            filename: filename.to_string(),
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// One line per violation
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    /// Whether the text was not JSON at all
    pub fn is_syntax_error(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.hint == SYNTAX_HINT)
    }
}

/// The embedded schema could not be loaded or compiled
#[derive(Debug, Error)]
#[error("catalog schema unavailable: {0}")]
pub struct SchemaLoadError(String);

const SYNTAX_HINT: &str = "invalid JSON";

/// Compiled catalog schema
pub struct Validator {
    compiled: JsonValidator,
}

impl Validator {
    /// Compile the catalog schema from the registry
    pub fn new(registry: &SchemaRegistry) -> Result<Self, SchemaLoadError> {
        let text = registry
            .get(CATALOG_SCHEMA)
            .ok_or_else(|| SchemaLoadError(format!("{CATALOG_SCHEMA} is not embedded")))?;
        let schema: JsonValue =
            serde_json::from_str(&text).map_err(|e| SchemaLoadError(e.to_string()))?;
        let compiled = validator_for(&schema).map_err(|e| SchemaLoadError(e.to_string()))?;
        Ok(Self { compiled })
    }

    /// Parse `content` and check it against the schema, reporting every
    /// violation. Returns the parsed value on success.
    pub fn validate(&self, content: &str, filename: &str) -> Result<JsonValue, DocumentError> {
        let value: JsonValue = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                let span = line_column_span(content, e.line(), e.column());
                let violation = SchemaViolation::new(
                    format!("JSON parse error: {e}"),
                    SYNTAX_HINT.to_string(),
                    span,
                    Some("Check for missing commas, quotes or brackets".to_string()),
                );
                return Err(DocumentError::new(filename, content, vec![violation]));
            }
        };

        let violations: Vec<SchemaViolation> = self
            .compiled
            .iter_errors(&value)
            .map(|e| error_to_violation(content, &e))
            .collect();

        if violations.is_empty() {
            Ok(value)
        } else {
            Err(DocumentError::new(filename, content, violations))
        }
    }
}

fn error_to_violation(content: &str, error: &JsonSchemaError) -> SchemaViolation {
    let path = error.instance_path.to_string();
    let span = find_path_span(content, &path);
    SchemaViolation::new(
        format_schema_error(error),
        format_error_hint(error),
        span,
        generate_help_message(error),
    )
}

fn format_schema_error(error: &JsonSchemaError) -> String {
    let path = if error.instance_path.as_str().is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", error.instance_path)
    };

    match &error.kind {
        ValidationErrorKind::Required { property } => {
            format!("Missing required key {} at {}", property_name(property), path)
        }
        ValidationErrorKind::Type { kind } => {
            format!("Wrong type at {}: expected {:?}", path, kind)
        }
        ValidationErrorKind::Pattern { .. } | ValidationErrorKind::MinLength { .. } => {
            format!("Invalid id at {}", path)
        }
        _ => format!("Invalid value at {}: {}", path, error),
    }
}

fn format_error_hint(error: &JsonSchemaError) -> String {
    match &error.kind {
        ValidationErrorKind::Required { .. } => "required key missing",
        ValidationErrorKind::Type { .. } => "wrong type",
        ValidationErrorKind::Pattern { .. } | ValidationErrorKind::MinLength { .. } => {
            "invalid id"
        }
        _ => "validation error",
    }
    .to_string()
}

fn generate_help_message(error: &JsonSchemaError) -> Option<String> {
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            Some(format!("Add the '{}' key", property_name(property)))
        }
        ValidationErrorKind::Pattern { .. } | ValidationErrorKind::MinLength { .. } => {
            Some("Ids are non-empty and contain no whitespace".to_string())
        }
        _ => None,
    }
}

fn property_name(property: &JsonValue) -> String {
    property
        .as_str()
        .map(|s| s.to_string())
        .unwrap_or_else(|| property.to_string())
}

/// Span covering the rest of the line at a 1-based line/column
fn line_column_span(content: &str, line: usize, column: usize) -> SourceSpan {
    let line = line.saturating_sub(1);
    let column = column.saturating_sub(1);

    let mut offset = 0;
    for (i, line_content) in content.lines().enumerate() {
        if i == line {
            offset += column.min(line_content.len());
            break;
        }
        offset += line_content.len() + 1;
    }
    let offset = offset.min(content.len());
    let rest = &content[offset..];
    let len = rest.find('\n').unwrap_or(rest.len()).max(1);
    (offset, len).into()
}

/// Best-effort span for a JSON pointer: the last object key on the path
fn find_path_span(content: &str, pointer: &str) -> SourceSpan {
    let key = pointer
        .split('/')
        .filter(|s| !s.is_empty())
        .rev()
        .find(|s| s.parse::<usize>().is_err());

    if let Some(key) = key {
        let needle = format!("\"{key}\"");
        if let Some(start) = content.find(&needle) {
            return (start, needle.len()).into();
        }
    }
    let len = content.find('\n').unwrap_or(content.len()).max(1);
    (0, len).into()
}
