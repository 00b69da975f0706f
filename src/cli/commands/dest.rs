//! `pcat dest` command - precise destinations, links and contacts

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::dim::{confirm_prompt, print_report};
use crate::cli::helpers::{confirm, format_short_id, load_config, open_catalog, persisted};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::integrity::{self, CascadeRequest, CascadeTarget};
use crate::core::store::Store;
use crate::entities::DestinationLink;
use crate::schema::wizard::{LinkWizard, WizardAnswers, WizardOutcome};

#[derive(Subcommand, Debug)]
pub enum DestCommands {
    /// List destination links
    List(ListArgs),

    /// List distinct precise destinations
    Values(ValuesArgs),

    /// Link a precise destination to a global destination (guided)
    Add(AddArgs),

    /// Delete a precise destination, its links and its projects
    Rm(RmArgs),

    /// Show the contact for a precise destination
    Contact(ContactArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only links under this global destination
    #[arg(long, short = 'g')]
    pub global: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ValuesArgs {
    /// Only precise destinations under this global destination
    #[arg(long, short = 'g')]
    pub global: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Precise destination (e.g. a city)
    pub precise: String,

    /// Global destination; asked for when omitted on a terminal
    #[arg(long, short = 'g')]
    pub global: Option<String>,

    /// Contact name
    #[arg(long)]
    pub contact_name: Option<String>,

    /// Contact email or phone
    #[arg(long)]
    pub contact_info: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Precise destination to delete
    pub precise: String,

    /// Only delete it under this global destination
    #[arg(long, short = 'g')]
    pub global: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ContactArgs {
    /// Precise destination
    pub precise: String,

    /// Global destination, when the same precise destination exists under several
    #[arg(long, short = 'g')]
    pub global: Option<String>,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 16),
    ColumnDef::new("global", "GLOBAL", 20),
    ColumnDef::new("precise", "PRECISE", 24),
    ColumnDef::new("contact", "CONTACT", 24),
    ColumnDef::new("info", "INFO", 32),
];

const VALUE_COLUMNS: &[ColumnDef] = &[ColumnDef::new("precise", "PRECISE", 40)];

pub fn run(cmd: DestCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        DestCommands::List(args) => run_list(args, global),
        DestCommands::Values(args) => run_values(args, global),
        DestCommands::Add(args) => run_add(args, global),
        DestCommands::Rm(args) => run_rm(args, global),
        DestCommands::Contact(args) => run_contact(args, global),
    }
}

fn output_format(global: &GlobalOpts) -> OutputFormat {
    let config = load_config(global);
    OutputFormat::resolve(global.format, config.default_format.as_deref())
}

fn link_row(link: &DestinationLink, full_id: bool) -> TableRow {
    let id = if full_id {
        link.id.to_string()
    } else {
        format_short_id(&link.id)
    };
    TableRow::new(link.id.to_string())
        .cell("id", CellValue::Id(id))
        .cell("global", CellValue::Value(link.global_destination.clone()))
        .cell("precise", CellValue::Value(link.precise_destination.clone()))
        .cell("contact", CellValue::text(&link.contact_name))
        .cell("info", CellValue::text(&link.contact_info))
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let format = output_format(global);
    let scope = args.global.as_deref().filter(|g| !g.is_empty());

    let rows: Vec<TableRow> = catalog
        .state()
        .destinations
        .iter()
        .filter(|l| scope.map_or(true, |g| l.global_destination == g))
        .map(|l| link_row(l, !matches!(format, OutputFormat::Auto | OutputFormat::Tsv)))
        .collect();

    TableFormatter::new(COLUMNS, "destination link").output(&rows, format);
    Ok(())
}

fn run_values(args: ValuesArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let rows: Vec<TableRow> = catalog
        .distinct_precise_destinations(args.global.as_deref())
        .into_iter()
        .map(|v| TableRow::new(v.clone()).cell("precise", CellValue::Value(v)))
        .collect();
    TableFormatter::new(VALUE_COLUMNS, "precise destination").output(&rows, output_format(global));
    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;

    if let Some(g) = args.global.as_deref() {
        if catalog.has_link(g.trim(), args.precise.trim()) {
            println!(
                "{} {} is already linked to {}; another link will be added",
                style("!").yellow(),
                style(args.precise.trim()).cyan(),
                style(g.trim()).cyan()
            );
        }
    }

    let preset = WizardAnswers {
        global_destination: args.global,
        contact_name: args.contact_name,
        contact_info: args.contact_info,
    };
    let interactive = preset.global_destination.is_none() && console::user_attended();
    let mut wizard = LinkWizard::new(interactive);
    if global.yes {
        wizard = wizard.without_confirmation();
    }

    match wizard.run(&mut catalog, &args.precise, &preset)? {
        WizardOutcome::Committed { link, saved } => {
            if !saved {
                return Err(miette::miette!(
                    "the destination link could not be saved to {}",
                    catalog.store().describe()
                ));
            }
            println!(
                "{} Linked {} to {} ({})",
                style("✓").green(),
                style(&link.precise_destination).cyan(),
                style(&link.global_destination).cyan(),
                style(link.id.as_str()).dim()
            );
        }
        WizardOutcome::Cancelled => println!("Cancelled."),
    }
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;

    let mut request = CascadeRequest::new(CascadeTarget::PreciseDestination, args.precise.trim());
    if let Some(g) = args.global.as_deref() {
        request = request.scoped(g.trim());
    }
    let (_, preview) =
        integrity::cascade_delete(catalog.state(), &request).map_err(|e| miette::miette!("{}", e))?;

    if preview.projects_removed == 0 && preview.links_removed == 0 {
        println!(
            "{} Nothing references precise destination {}",
            style("!").yellow(),
            style(&request.value).cyan()
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

fn run_contact(args: ContactArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    match catalog.lookup_contact(args.precise.trim(), args.global.as_deref()) {
        Some(link) => {
            print_contact(link);
            Ok(())
        }
        None => Err(miette::miette!(
            "No destination link for '{}'",
            args.precise.trim()
        )),
    }
}

/// "Europe / Paris: Jean Dupont <jean.dupont@example.com>"
pub fn contact_line(link: &DestinationLink) -> String {
    let place = format!("{} / {}", link.global_destination, link.precise_destination);
    if !link.has_contact() {
        return format!("{}: {}", place, style("(no contact)").dim());
    }
    let name = if link.contact_name.is_empty() {
        "-".to_string()
    } else {
        style(&link.contact_name).bold().to_string()
    };
    if link.contact_info.is_empty() {
        format!("{place}: {name}")
    } else {
        format!("{place}: {name} <{}>", link.contact_info)
    }
}

pub fn print_contact(link: &DestinationLink) {
    println!("{}", contact_line(link));
}
