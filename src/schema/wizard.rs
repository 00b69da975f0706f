//! Interactive driver for the destination link wizard
//!
//! Walks a [`Catalog`]'s wizard question by question. Answers supplied up
//! front are submitted as-is; the rest are asked with dialoguer prompts.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::core::catalog::Catalog;
use crate::core::error::{CatalogError, ValidationError};
use crate::core::store::Store;
use crate::core::wizard::{Transition, WizardError, WizardStep};
use crate::entities::DestinationLink;

/// Answers known before the wizard starts
#[derive(Debug, Clone, Default)]
pub struct WizardAnswers {
    pub global_destination: Option<String>,
    pub contact_name: Option<String>,
    pub contact_info: Option<String>,
}

impl WizardAnswers {
    fn for_step(&self, step: WizardStep) -> Option<&str> {
        match step {
            WizardStep::AwaitGlobalDestination => self.global_destination.as_deref(),
            WizardStep::AwaitContactName => self.contact_name.as_deref(),
            WizardStep::AwaitContactInfo => self.contact_info.as_deref(),
            WizardStep::Idle => None,
        }
    }
}

/// How a wizard run ended
#[derive(Debug)]
pub enum WizardOutcome {
    /// The link was appended; `saved` is false if writing it out failed
    Committed { link: DestinationLink, saved: bool },
    Cancelled,
}

pub struct LinkWizard {
    theme: ColorfulTheme,
    interactive: bool,
    confirm: bool,
}

impl LinkWizard {
    /// `interactive: false` never prompts; a missing required answer is an
    /// error instead.
    pub fn new(interactive: bool) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            interactive,
            confirm: interactive,
        }
    }

    /// Skip the final "create this link?" question
    pub fn without_confirmation(mut self) -> Self {
        self.confirm = false;
        self
    }

    pub fn run<S: Store>(
        &self,
        catalog: &mut Catalog<S>,
        precise_destination: &str,
        preset: &WizardAnswers,
    ) -> Result<WizardOutcome> {
        catalog
            .wizard_start(precise_destination)
            .map_err(|e| miette::miette!("{}", e))?;

        if self.interactive {
            println!();
            println!(
                "{} New destination link for {}",
                style("◆").cyan(),
                style(precise_destination.trim()).bold()
            );
            println!("{}", style("─".repeat(50)).dim());
        }

        let result = self.drive(catalog, preset);
        if result.is_err() && !catalog.wizard().is_idle() {
            let _ = catalog.wizard_cancel();
        }
        result
    }

    fn drive<S: Store>(&self, catalog: &mut Catalog<S>, preset: &WizardAnswers) -> Result<WizardOutcome> {
        loop {
            let step = catalog.wizard_step();
            let (answer, prompted) = match preset.for_step(step) {
                Some(answer) => (answer.to_string(), false),
                None if self.interactive => (self.ask(catalog, step)?, true),
                None if step.answer_required() => {
                    return Err(miette::miette!(
                        "{}",
                        ValidationError::MissingGlobalDestination
                    ))
                }
                None => (String::new(), false),
            };

            if step == WizardStep::AwaitGlobalDestination {
                check_known_global(catalog, &answer)?;
            }

            if step == WizardStep::AwaitContactInfo
                && self.confirm
                && !self.confirm_commit(catalog, &answer)?
            {
                catalog.wizard_cancel().map_err(|e| miette::miette!("{}", e))?;
                return Ok(WizardOutcome::Cancelled);
            }

            match catalog.wizard_submit(&answer) {
                Ok(applied) => match applied.value {
                    Transition::Committed(_) => {
                        let link = catalog
                            .state()
                            .destinations
                            .last()
                            .cloned()
                            .ok_or_else(|| miette::miette!("committed link is missing"))?;
                        return Ok(WizardOutcome::Committed {
                            link,
                            saved: applied.persisted.is_ok(),
                        });
                    }
                    Transition::Cancelled => return Ok(WizardOutcome::Cancelled),
                    Transition::Advanced(_) => {}
                },
                Err(CatalogError::Wizard(WizardError::Validation(e))) if prompted => {
                    println!("{} {}", style("!").yellow(), e);
                }
                Err(e) => return Err(miette::miette!("{}", e)),
            }
        }
    }

    fn ask<S: Store>(&self, catalog: &Catalog<S>, step: WizardStep) -> Result<String> {
        let position = step.position().unwrap_or(0);
        let prompt = format!(
            "[{}/{}] {}",
            position,
            WizardStep::QUESTIONS,
            step.prompt().unwrap_or_default()
        );

        if step == WizardStep::AwaitGlobalDestination {
            let known = &catalog.state().global_destinations;
            if known.is_empty() {
                return Err(miette::miette!(
                    help = "add one with `pcat dim add global <VALUE>`",
                    "There are no global destinations to choose from"
                ));
            }
            let selection = Select::with_theme(&self.theme)
                .with_prompt(&prompt)
                .items(known.as_slice())
                .default(0)
                .interact()
                .into_diagnostic()?;
            return Ok(known[selection].clone());
        }

        Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("{prompt} (optional)"))
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()
    }

    /// Asked once every answer is known, before the last one is submitted
    fn confirm_commit<S: Store>(&self, catalog: &Catalog<S>, contact_info: &str) -> Result<bool> {
        let wizard = catalog.wizard();
        println!();
        println!(
            "  {} {}",
            style("Global destination:").dim(),
            wizard.global_destination().unwrap_or_default()
        );
        println!(
            "  {} {}",
            style("Precise destination:").dim(),
            wizard.precise_destination().unwrap_or_default()
        );
        println!("  {} {}", style("Contact info:").dim(), contact_info.trim());
        Confirm::with_theme(&self.theme)
            .with_prompt("Create this destination link?")
            .default(true)
            .interact()
            .into_diagnostic()
    }
}

/// A global destination answer must name a listed value. Blank answers are
/// left to the wizard, which rejects them.
fn check_known_global<S: Store>(catalog: &Catalog<S>, answer: &str) -> Result<()> {
    let answer = answer.trim();
    if answer.is_empty() || catalog.state().global_destinations.iter().any(|g| g == answer) {
        return Ok(());
    }
    Err(miette::miette!(
        help = "add it first with `pcat dim add global <VALUE>`",
        "Unknown global destination '{}'",
        answer
    ))
}
