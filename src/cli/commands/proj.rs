//! `pcat proj` command - project listing and editing

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::dest::print_contact;
use crate::cli::helpers::{
    confirm, format_short_id, load_config, open_catalog, persisted, resolve_project_id,
};
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::Catalog;
use crate::core::filter::FilterCriteria;
use crate::core::month;
use crate::core::projects::Upserted;
use crate::core::store::Store;
use crate::entities::{Project, ProjectDraft, ProjectField};

#[derive(Subcommand, Debug)]
pub enum ProjCommands {
    /// List projects matching the filters
    List(ListArgs),

    /// Show one project
    Show(ShowArgs),

    /// Create a project
    New(NewArgs),

    /// Change fields of a project
    Edit(EditArgs),

    /// Delete a project
    Rm(RmArgs),
}

/// Exact-match filters shared by `proj list` and `export table`
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Project type
    #[arg(long = "type", short = 't')]
    pub project_type: Option<String>,

    /// Project name
    #[arg(long = "name", short = 'n')]
    pub project_name: Option<String>,

    /// Global destination
    #[arg(long = "global", short = 'g')]
    pub global_destination: Option<String>,

    /// Precise destination
    #[arg(long = "precise", short = 'p')]
    pub precise_destination: Option<String>,

    /// Due date (MM/YYYY or YYYY-MM)
    #[arg(long = "due", short = 'd')]
    pub due_date: Option<String>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> Result<FilterCriteria> {
        let due = match self.due_date.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => month::normalize_due_date(d)
                .ok_or_else(|| miette::miette!("'{}' is not a month (use MM/YYYY or YYYY-MM)", d))?,
            _ => String::new(),
        };
        let value = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().to_string();

        Ok(FilterCriteria::new()
            .project_type(value(&self.project_type))
            .project_name(value(&self.project_name))
            .global_destination(value(&self.global_destination))
            .precise_destination(value(&self.precise_destination))
            .due_date(due))
    }
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Wrap long text columns instead of truncating them
    #[arg(long, short = 'w', value_name = "WIDTH")]
    pub wrap: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Project id (or unique prefix)
    pub id: String,
}

/// Field values for `new` and `edit`. Omitted fields are asked for (new) or
/// left unchanged (edit).
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Project name
    #[arg(long = "name")]
    pub project_name: Option<String>,

    /// Project type
    #[arg(long = "type")]
    pub project_type: Option<String>,

    /// Global destination
    #[arg(long = "global")]
    pub global_destination: Option<String>,

    /// Precise destination
    #[arg(long = "precise")]
    pub precise_destination: Option<String>,

    /// Due date (MM/YYYY or YYYY-MM)
    #[arg(long = "due")]
    pub due_date: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Work in progress
    #[arg(long = "wip")]
    pub work_in_progress: Option<String>,

    #[arg(long)]
    pub comments: Option<String>,
}

impl FieldArgs {
    fn get(&self, field: ProjectField) -> Option<&str> {
        let value = match field {
            ProjectField::ProjectName => &self.project_name,
            ProjectField::ProjectType => &self.project_type,
            ProjectField::GlobalDestination => &self.global_destination,
            ProjectField::PreciseDestination => &self.precise_destination,
            ProjectField::DueDate => &self.due_date,
            ProjectField::Description => &self.description,
            ProjectField::WorkInProgress => &self.work_in_progress,
            ProjectField::Comments => &self.comments,
        };
        value.as_deref()
    }

    /// Fields given on the command line
    fn supplied(&self) -> Vec<ProjectField> {
        ALL_FIELDS
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_some())
            .collect()
    }

    /// Write supplied values into the draft
    fn apply(&self, draft: &mut ProjectDraft) -> Result<()> {
        for field in self.supplied() {
            let raw = self.get(field).unwrap_or_default();
            set_field(draft, field, raw)?;
        }
        Ok(())
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Never prompt; fail if a required field is missing
    #[arg(long)]
    pub no_input: bool,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Project id (or unique prefix)
    pub id: String,

    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Project id (or unique prefix)
    pub id: String,
}

const ALL_FIELDS: [ProjectField; 8] = [
    ProjectField::ProjectName,
    ProjectField::ProjectType,
    ProjectField::GlobalDestination,
    ProjectField::PreciseDestination,
    ProjectField::DueDate,
    ProjectField::Description,
    ProjectField::WorkInProgress,
    ProjectField::Comments,
];

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 16),
    ColumnDef::new("name", "NAME", 20),
    ColumnDef::new("type", "TYPE", 14),
    ColumnDef::new("global", "GLOBAL", 14),
    ColumnDef::new("precise", "PRECISE", 16),
    ColumnDef::new("description", "DESCRIPTION", 30),
    ColumnDef::new("wip", "WIP", 16),
    ColumnDef::new("due", "DUE", 7),
    ColumnDef::new("comments", "COMMENTS", 30),
];

pub fn run(cmd: ProjCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProjCommands::List(args) => run_list(args, global),
        ProjCommands::Show(args) => run_show(args, global),
        ProjCommands::New(args) => run_new(args, global),
        ProjCommands::Edit(args) => run_edit(args, global),
        ProjCommands::Rm(args) => run_rm(args, global),
    }
}

fn project_row(project: &Project, full_id: bool) -> TableRow {
    let id = if full_id {
        project.id.to_string()
    } else {
        format_short_id(&project.id)
    };
    TableRow::new(project.id.to_string())
        .cell("id", CellValue::Id(id))
        .cell("name", CellValue::Value(project.project_name.clone()))
        .cell("type", CellValue::text(&project.project_type))
        .cell("global", CellValue::text(&project.global_destination))
        .cell("precise", CellValue::text(&project.precise_destination))
        .cell("description", CellValue::text(&project.description))
        .cell("wip", CellValue::text(&project.work_in_progress))
        .cell("due", CellValue::text(&project.due_date))
        .cell("comments", CellValue::text(&project.comments))
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let criteria = args.filter.to_criteria()?;
    let config = load_config(global);
    let format = OutputFormat::resolve(global.format, config.default_format.as_deref());
    let terminal = matches!(format, OutputFormat::Auto | OutputFormat::Tsv);

    let rows: Vec<TableRow> = catalog
        .visible_projects(&criteria)
        .into_iter()
        .map(|p| project_row(p, !terminal))
        .collect();

    let table_config = match args.wrap {
        Some(width) => TableConfig::with_wrap(width),
        None if global.quiet => TableConfig::for_pipe(),
        None => TableConfig::default(),
    };
    TableFormatter::new(COLUMNS, "project")
        .with_config(table_config)
        .output(&rows, format);

    if terminal && !criteria.precise_destination.is_empty() {
        let scope = Some(criteria.global_destination.as_str()).filter(|g| !g.is_empty());
        match catalog.lookup_contact(&criteria.precise_destination, scope) {
            Some(link) => {
                println!();
                print!("{} ", style("Contact").bold());
                print_contact(link);
            }
            None => println!(
                "\n{} No contact for {}",
                style("!").yellow(),
                style(&criteria.precise_destination).cyan()
            ),
        }
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let id = resolve_project_id(&catalog, &args.id)?;
    let project = catalog
        .project(&id)
        .ok_or_else(|| miette::miette!("No project '{}'", id))?;

    let config = load_config(global);
    match OutputFormat::resolve(global.format, config.default_format.as_deref()) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(project).into_diagnostic()?;
            println!("{json}");
        }
        OutputFormat::Id => println!("{}", project.id),
        _ => {
            let yaml = serde_yml::to_string(project).into_diagnostic()?;
            print!("{yaml}");
        }
    }
    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;

    let mut draft = ProjectDraft::default();
    args.fields.apply(&mut draft)?;

    if !args.no_input && console::user_attended() {
        prompt_missing(&catalog, &mut draft)?;
    }

    check_references(&catalog, &draft, &ProjectField::REQUIRED)?;
    let outcome = persisted(catalog.upsert_project(draft).map_err(|e| miette::miette!("{}", e))?)?;
    print_upserted(&catalog, &outcome);
    Ok(())
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;
    let id = resolve_project_id(&catalog, &args.id)?;
    let project = catalog
        .project(&id)
        .ok_or_else(|| miette::miette!("No project '{}'", id))?;

    let supplied = args.fields.supplied();
    if supplied.is_empty() {
        return Err(miette::miette!(
            "Nothing to change; pass at least one field such as --name or --due"
        ));
    }

    let mut draft = ProjectDraft::from_project(project);
    let dangling_before = catalog.unresolved_references(&draft);
    args.fields.apply(&mut draft)?;

    // Supplied values, plus untouched ones the edit leaves dangling
    let checked: Vec<ProjectField> = catalog
        .unresolved_references(&draft)
        .into_iter()
        .filter(|f| supplied.contains(f) || !dangling_before.contains(f))
        .collect();
    check_references(&catalog, &draft, &checked)?;
    let outcome = persisted(catalog.upsert_project(draft).map_err(|e| miette::miette!("{}", e))?)?;
    print_upserted(&catalog, &outcome);
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;
    let id = resolve_project_id(&catalog, &args.id)?;
    let name = catalog
        .project(&id)
        .map(|p| p.project_name.clone())
        .unwrap_or_default();

    if !confirm(global, &format!("Delete project '{name}' ({id})?"))? {
        println!("Cancelled.");
        return Ok(());
    }

    if persisted(catalog.remove_project(&id))? {
        println!("{} Deleted project {} ({})", style("✓").green(), style(&name).cyan(), id);
    }
    Ok(())
}

fn set_field(draft: &mut ProjectDraft, field: ProjectField, raw: &str) -> Result<()> {
    let value = raw.trim().to_string();
    let slot = match field {
        ProjectField::ProjectName => &mut draft.project_name,
        ProjectField::ProjectType => &mut draft.project_type,
        ProjectField::GlobalDestination => &mut draft.global_destination,
        ProjectField::PreciseDestination => &mut draft.precise_destination,
        ProjectField::DueDate => &mut draft.due_date,
        ProjectField::Description => &mut draft.description,
        ProjectField::WorkInProgress => &mut draft.work_in_progress,
        ProjectField::Comments => &mut draft.comments,
    };
    *slot = if field == ProjectField::DueDate && !value.is_empty() {
        month::normalize_due_date(&value).ok_or_else(|| {
            miette::miette!("'{}' is not a month (use MM/YYYY or YYYY-MM)", value)
        })?
    } else {
        value
    };
    Ok(())
}

/// Ask for every required field still blank. Fields backed by a list are
/// chosen from it.
fn prompt_missing<S: Store>(catalog: &Catalog<S>, draft: &mut ProjectDraft) -> Result<()> {
    let theme = ColorfulTheme::default();
    for field in draft.missing_fields() {
        let label = capitalize(field.label());
        let answer = match field_choices(catalog, draft, field) {
            Some(choices) if choices.is_empty() => {
                return Err(miette::miette!(
                    help = "add one with `pcat dim add` or `pcat dest add`",
                    "No {} to choose from",
                    field.label()
                ));
            }
            Some(choices) => {
                let selection = Select::with_theme(&theme)
                    .with_prompt(&label)
                    .items(choices.as_slice())
                    .default(0)
                    .interact()
                    .into_diagnostic()?;
                choices[selection].clone()
            }
            None => {
                let known = &catalog.state().due_dates;
                let prompt = if field == ProjectField::DueDate && !known.is_empty() {
                    format!("{} (MM/YYYY, e.g. {})", label, known.join(", "))
                } else {
                    label
                };
                Input::<String>::with_theme(&theme)
                    .with_prompt(prompt)
                    .interact_text()
                    .into_diagnostic()?
            }
        };
        set_field(draft, field, &answer)?;
    }
    Ok(())
}

/// Values a field must be picked from, or `None` for free input. Precise
/// destinations are narrowed to the draft's global destination.
fn field_choices<S: Store>(
    catalog: &Catalog<S>,
    draft: &ProjectDraft,
    field: ProjectField,
) -> Option<Vec<String>> {
    let state = catalog.state();
    match field {
        ProjectField::ProjectType => Some(state.project_types.clone()),
        ProjectField::ProjectName => Some(state.project_names.clone()),
        ProjectField::GlobalDestination => Some(state.global_destinations.clone()),
        ProjectField::PreciseDestination => {
            let scope = Some(draft.global_destination.as_str()).filter(|g| !g.is_empty());
            Some(catalog.distinct_precise_destinations(scope))
        }
        _ => None,
    }
}

/// Refuse references to values that do not exist, among `fields`
fn check_references<S: Store>(
    catalog: &Catalog<S>,
    draft: &ProjectDraft,
    fields: &[ProjectField],
) -> Result<()> {
    let unresolved: Vec<String> = catalog
        .unresolved_references(draft)
        .into_iter()
        .filter(|f| fields.contains(f))
        .map(|f| match f {
            ProjectField::PreciseDestination => format!(
                "{} '{}' under '{}'",
                f.label(),
                draft.get(f),
                draft.global_destination
            ),
            _ => format!("{} '{}'", f.label(), draft.get(f)),
        })
        .collect();
    if unresolved.is_empty() {
        return Ok(());
    }
    Err(miette::miette!(
        help = "add the value first with `pcat dim add` or `pcat dest add`",
        "Unknown {}",
        unresolved.join(", ")
    ))
}

fn print_upserted<S: Store>(catalog: &Catalog<S>, outcome: &Upserted) {
    let name = catalog
        .project(outcome.id())
        .map(|p| p.project_name.as_str())
        .unwrap_or_default();
    let verb = match outcome {
        Upserted::Created(_) => "Created",
        Upserted::Updated(_) => "Updated",
    };
    println!(
        "{} {} project {} ({})",
        style("✓").green(),
        verb,
        style(name).cyan(),
        style(outcome.id().as_str()).dim()
    );
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
