//! `pcat init` command - create the catalog data file

use console::style;
use miette::Result;

use crate::cli::helpers::{confirm, load_config, persisted};
use crate::cli::GlobalOpts;
use crate::core::catalog::Catalog;
use crate::core::state::AppState;
use crate::core::store::{JsonFileStore, Store};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Replace an existing catalog with the sample catalog
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let store = JsonFileStore::new(load_config(global).data_file());

    if store.exists() && !args.force {
        println!(
            "{} A catalog already exists at {}",
            style("!").yellow(),
            style(store.describe()).cyan()
        );
        println!("  Use {} to replace it with the sample catalog", style("--force").yellow());
        return Ok(());
    }

    if store.exists()
        && !confirm(global, "Replace the whole catalog with the sample catalog?")?
    {
        println!("Cancelled.");
        return Ok(());
    }

    let mut catalog = Catalog::with_state(store, AppState::default());
    persisted(catalog.reset_to_seed())?;

    let state = catalog.state();
    println!(
        "{} Initialized catalog at {}",
        style("✓").green(),
        style(catalog.store().describe()).cyan()
    );
    if !global.quiet {
        println!(
            "  {} project(s), {} destination link(s)",
            state.projects.len(),
            state.destinations.len()
        );
        println!();
        println!("Next steps:");
        println!("  {} List projects", style("pcat proj list").yellow());
        println!("  {} Add a project type", style("pcat dim add type <VALUE>").yellow());
        println!("  {} Link a precise destination", style("pcat dest add <PRECISE>").yellow());
    }
    Ok(())
}
