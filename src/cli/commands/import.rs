//! `pcat import` command - replace the catalog with a document

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::helpers::{confirm, open_catalog, persisted};
use crate::cli::GlobalOpts;
use crate::schema::registry::SchemaRegistry;
use crate::schema::validator::Validator;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Catalog document (JSON) to load
    pub file: PathBuf,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let content = fs::read_to_string(&args.file)
        .into_diagnostic()
        .map_err(|e| e.wrap_err(format!("failed to read {}", args.file.display())))?;

    let filename = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    let validator = Validator::new(&SchemaRegistry).map_err(|e| miette::miette!("{}", e))?;
    validator.validate(&content, &filename)?;

    let mut catalog = open_catalog(global)?;
    if !confirm(global, "Replace the whole catalog with this document?")? {
        println!("Cancelled.");
        return Ok(());
    }

    persisted(
        catalog
            .import_document(&content)
            .map_err(|e| miette::miette!("{}", e))?,
    )?;

    let state = catalog.state();
    println!(
        "{} Imported {} project(s) and {} destination link(s) from {}",
        style("✓").green(),
        state.projects.len(),
        state.destinations.len(),
        style(args.file.display()).cyan()
    );
    Ok(())
}
