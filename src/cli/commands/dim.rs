//! `pcat dim` command - dimension list management

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{confirm, load_config, open_catalog, persisted};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dimension::DimensionKind;
use crate::core::error::ValidationError;
use crate::core::integrity::{self, CascadeReport, CascadeRequest, CascadeTarget};
use crate::core::month;
use crate::entities::ProjectField;

#[derive(Subcommand, Debug)]
pub enum DimCommands {
    /// List the values of a dimension
    List(ListArgs),

    /// Add a value to a dimension
    Add(AddArgs),

    /// Delete a value and every project (and link) that references it
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Dimension: type, name, global or due
    pub kind: DimensionKind,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Dimension: type, name, global or due
    pub kind: DimensionKind,

    /// Value to add (due dates as MM/YYYY or YYYY-MM)
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Dimension: type, name or global
    pub kind: DimensionKind,

    /// Value to delete
    pub value: String,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("value", "VALUE", 40),
    ColumnDef::new("projects", "PROJECTS", 8),
];

pub fn run(cmd: DimCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        DimCommands::List(args) => run_list(args, global),
        DimCommands::Add(args) => run_add(args, global),
        DimCommands::Rm(args) => run_rm(args, global),
    }
}

/// Project field holding values of this dimension
pub fn field_for(kind: DimensionKind) -> ProjectField {
    match kind {
        DimensionKind::Type => ProjectField::ProjectType,
        DimensionKind::Name => ProjectField::ProjectName,
        DimensionKind::GlobalDestination => ProjectField::GlobalDestination,
        DimensionKind::DueDate => ProjectField::DueDate,
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let state = catalog.state();
    let field = field_for(args.kind);

    let rows: Vec<TableRow> = state
        .dimension(args.kind)
        .iter()
        .map(|value| {
            let used = state
                .projects
                .iter()
                .filter(|p| field.value(p) == value)
                .count();
            TableRow::new(value.clone())
                .cell("value", CellValue::Value(value.clone()))
                .cell("projects", CellValue::Number(used))
        })
        .collect();

    let config = load_config(global);
    let format = OutputFormat::resolve(global.format, config.default_format.as_deref());
    TableFormatter::new(COLUMNS, args.kind.label()).output(&rows, format);
    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;

    let value = if args.kind == DimensionKind::DueDate && !args.value.trim().is_empty() {
        month::normalize_due_date(&args.value).ok_or_else(|| {
            miette::miette!("'{}' is not a month (use MM/YYYY or YYYY-MM)", args.value)
        })?
    } else {
        args.value
    };

    let applied = catalog
        .add_dimension_value(args.kind, &value)
        .map_err(|e| miette::miette!("{}", e))?;
    let inserted = persisted(applied)?;

    if inserted {
        println!(
            "{} Added {} {}",
            style("✓").green(),
            args.kind.label(),
            style(value.trim()).cyan()
        );
    } else {
        println!(
            "{} {} {} already exists",
            style("!").yellow(),
            args.kind.label(),
            style(value.trim()).cyan()
        );
    }
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;

    let target = CascadeTarget::from_dimension(args.kind)
        .ok_or_else(|| miette::miette!("{}", ValidationError::NotDeletable(args.kind)))?;
    let request = CascadeRequest::new(target, args.value.trim());
    let (_, preview) =
        integrity::cascade_delete(catalog.state(), &request).map_err(|e| miette::miette!("{}", e))?;

    if !preview.list_entry_removed && preview.projects_removed == 0 && preview.links_removed == 0 {
        println!(
            "{} No {} '{}'",
            style("!").yellow(),
            args.kind.label(),
            request.value
        );
        return Ok(());
    }

    if !confirm(global, &confirm_prompt(&preview))? {
        println!("Cancelled.");
        return Ok(());
    }

    let report = persisted(catalog.cascade(request).map_err(|e| miette::miette!("{}", e))?)?;
    print_report(&report);
    Ok(())
}

/// "Delete X? This also removes N project(s) and M link(s)."
pub fn confirm_prompt(preview: &CascadeReport) -> String {
    let mut prompt = format!("Delete {} '{}'", preview.target, preview.value);
    if let Some(scope) = &preview.scope {
        prompt.push_str(&format!(" under '{scope}'"));
    }
    prompt.push('?');
    if preview.projects_removed > 0 || preview.links_removed > 0 {
        prompt.push_str(&format!(
            " This also removes {} project(s) and {} destination link(s).",
            preview.projects_removed, preview.links_removed
        ));
    }
    prompt
}

pub fn print_report(report: &CascadeReport) {
    println!(
        "{} Deleted {} {}",
        style("✓").green(),
        report.target,
        style(&report.value).cyan()
    );
    if report.projects_removed > 0 {
        println!("  {} project(s) removed", report.projects_removed);
    }
    if report.links_removed > 0 {
        println!("  {} destination link(s) removed", report.links_removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_prompt_mentions_cascade() {
        let report = CascadeReport {
            target: CascadeTarget::GlobalDestination,
            value: "Europe".to_string(),
            scope: None,
            list_entry_removed: true,
            projects_removed: 1,
            links_removed: 2,
        };
        assert_eq!(
            confirm_prompt(&report),
            "Delete global destination 'Europe'? This also removes 1 project(s) and 2 destination link(s)."
        );
    }

    #[test]
    fn test_field_for_each_kind() {
        assert_eq!(field_for(DimensionKind::Type), ProjectField::ProjectType);
        assert_eq!(field_for(DimensionKind::DueDate), ProjectField::DueDate);
    }
}
