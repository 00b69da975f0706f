//! `pcat export` command - catalog document and printable project table

use chrono::Local;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::commands::proj::FilterArgs;
use crate::cli::helpers::open_catalog;
use crate::cli::GlobalOpts;
use crate::core::error::ValidationError;
use crate::schema::template::TemplateGenerator;

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Write the whole catalog as a JSON document (stdout by default)
    Db(DbArgs),

    /// Write the filtered project table as a Word-compatible document
    Table(TableArgs),
}

#[derive(clap::Args, Debug)]
pub struct DbArgs {
    /// Output file
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct TableArgs {
    /// Output file (e.g. projects.doc)
    #[arg(long, short = 'o')]
    pub out: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run(cmd: ExportCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ExportCommands::Db(args) => run_db(args, global),
        ExportCommands::Table(args) => run_table(args, global),
    }
}

fn run_db(args: DbArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let document = catalog.export_document().map_err(|e| miette::miette!("{}", e))?;

    match args.out {
        Some(path) => {
            write_file(&path, &document)?;
            if !global.quiet {
                println!(
                    "{} Exported {} project(s) and {} destination link(s) to {}",
                    style("✓").green(),
                    catalog.state().projects.len(),
                    catalog.state().destinations.len(),
                    style(path.display()).cyan()
                );
            }
        }
        None => println!("{document}"),
    }
    Ok(())
}

fn run_table(args: TableArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let criteria = args.filter.to_criteria()?;
    let visible = catalog.visible_projects(&criteria);

    if visible.is_empty() {
        return Err(miette::miette!("{}", ValidationError::EmptyTable));
    }

    let generator = TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))?;
    let document = generator
        .render_project_table(&visible, &criteria, Local::now())
        .map_err(|e| miette::miette!("{}", e))?;
    write_file(&args.out, &document)?;

    if !global.quiet {
        println!(
            "{} Exported {} project(s) to {}",
            style("✓").green(),
            visible.len(),
            style(args.out.display()).cyan()
        );
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(path, content)
        .into_diagnostic()
        .map_err(|e| e.wrap_err(format!("failed to write {}", path.display())))
}
