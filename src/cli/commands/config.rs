//! `pcat config` command - effective configuration

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::load_config;
use crate::cli::GlobalOpts;
use crate::core::config::{Config, ENV_CONFIG, ENV_DB, ENV_FORMAT};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as YAML
    Show,

    /// Print where the config file and the catalog live
    Path,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    match cmd {
        ConfigCommands::Show => {
            let yaml = serde_yml::to_string(&config.resolved()).into_diagnostic()?;
            print!("{yaml}");
        }
        ConfigCommands::Path => {
            let config_path = Config::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string());
            println!("{} {}", style("config:").bold(), config_path);
            println!("{} {}", style("catalog:").bold(), config.data_file().display());
            if !global.quiet {
                println!();
                println!(
                    "Override with {}, {}, {} or --db",
                    style(ENV_CONFIG).yellow(),
                    style(ENV_DB).yellow(),
                    style(ENV_FORMAT).yellow()
                );
            }
        }
    }
    Ok(())
}
