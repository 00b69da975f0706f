//! Shared helper functions for CLI commands

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::catalog::{Applied, Catalog};
use crate::core::config::Config;
use crate::core::identity::RecordId;
use crate::core::store::{JsonFileStore, Store};
use crate::core::LoadOutcome;

/// Truncate a string to `max_len` characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Effective configuration: config file and environment, then CLI flags
pub fn load_config(global: &GlobalOpts) -> Config {
    let mut config = Config::load();
    config.merge(Config {
        data_file: global.db.clone(),
        default_format: None,
        confirm: global.yes.then_some(false),
    });
    config
}

/// Open the catalog behind the configured data file, reporting a reseed
pub fn open_catalog(global: &GlobalOpts) -> Result<Catalog<JsonFileStore>> {
    let config = load_config(global);
    let store = JsonFileStore::new(config.data_file());
    let (catalog, outcome) = Catalog::open(store);

    if let LoadOutcome::Seeded { reason, persisted } = outcome {
        if let Some(reason) = reason {
            eprintln!(
                "{} {} could not be loaded ({}); the sample catalog was restored",
                style("!").yellow(),
                catalog.store().describe(),
                reason
            );
        } else if !global.quiet {
            eprintln!(
                "{} Created {} with the sample catalog",
                style("✓").green(),
                style(catalog.store().describe()).cyan()
            );
        }
        persisted.map_err(|e| miette::miette!("{}", e))?;
    }
    Ok(catalog)
}

/// Fail the command if the mutation could not be written
pub fn persisted<T>(applied: Applied<T>) -> Result<T> {
    applied.into_result().map_err(|e| {
        miette::miette!("{} (the change was not saved)", e)
    })
}

/// Ask before a destructive operation. Answers yes when confirmation is
/// disabled by `--yes` or the config file.
pub fn confirm(global: &GlobalOpts, prompt: &str) -> Result<bool> {
    if !load_config(global).confirm() {
        return Ok(true);
    }
    if !console::user_attended() {
        return Err(miette::miette!(
            "confirmation required for a destructive operation; pass --yes to proceed"
        ));
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .into_diagnostic()
}

/// Find a project id by exact id or unique prefix (case-insensitive)
pub fn resolve_project_id<S: Store>(catalog: &Catalog<S>, query: &str) -> Result<RecordId> {
    let query = query.trim();
    if let Some(project) = catalog.project(&RecordId::from(query)) {
        return Ok(project.id.clone());
    }
    let needle = query.to_uppercase();
    let matches: Vec<&RecordId> = catalog
        .state()
        .projects
        .iter()
        .map(|p| &p.id)
        .filter(|id| !needle.is_empty() && id.as_str().to_uppercase().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [one] => Ok((*one).clone()),
        [] => Err(miette::miette!("No project matches '{}'", query)),
        many => Err(miette::miette!(
            "'{}' is ambiguous ({} projects match)",
            query,
            many.len()
        )),
    }
}

/// Short form of a long id for tables
pub fn format_short_id(id: &RecordId) -> String {
    let s = id.as_str();
    if s.chars().count() > 16 {
        format!("{}...", s.chars().take(13).collect::<String>())
    } else {
        s.to_string()
    }
}
