//! Destination link wizard
//!
//! A linear three-question flow started from a precise destination value.
//! The state machine is a single `match` over `(step, event)`; anything not
//! listed in it is rejected without changing the wizard.
//!
//! ```text
//! Idle --start(precise)--> AwaitGlobalDestination
//! AwaitGlobalDestination --submit(global, required)--> AwaitContactName
//! AwaitContactName --submit(name)--> AwaitContactInfo
//! AwaitContactInfo --submit(info)--> Committed, back to Idle
//! Await* --cancel--> Idle
//! ```

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::error::ValidationError;
use crate::entities::DestinationLink;

/// Where the wizard currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Idle,
    AwaitGlobalDestination,
    AwaitContactName,
    AwaitContactInfo,
}

impl WizardStep {
    /// 1-based question number, `None` when idle
    pub fn position(&self) -> Option<usize> {
        match self {
            WizardStep::Idle => None,
            WizardStep::AwaitGlobalDestination => Some(1),
            WizardStep::AwaitContactName => Some(2),
            WizardStep::AwaitContactInfo => Some(3),
        }
    }

    pub const QUESTIONS: usize = 3;

    /// Question asked at this step
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            WizardStep::Idle => None,
            WizardStep::AwaitGlobalDestination => Some("Global destination"),
            WizardStep::AwaitContactName => Some("Contact name"),
            WizardStep::AwaitContactInfo => Some("Contact info"),
        }
    }

    /// Whether an empty answer is accepted at this step
    pub fn answer_required(&self) -> bool {
        matches!(self, WizardStep::AwaitGlobalDestination)
    }
}

/// Input to the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    Start(String),
    Submit(String),
    Cancel,
}

/// Answers collected by a completed wizard run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDraft {
    pub global_destination: String,
    pub precise_destination: String,
    pub contact_name: String,
    pub contact_info: String,
}

impl LinkDraft {
    /// Materialize the draft as a link under a fresh id
    pub fn into_link(self) -> DestinationLink {
        DestinationLink::new(
            self.global_destination,
            self.precise_destination,
            self.contact_name,
            self.contact_info,
        )
    }
}

/// Result of feeding an event to the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Now waiting at this step
    Advanced(WizardStep),
    /// The last question was answered; the wizard is idle again
    Committed(LinkDraft),
    /// Answers discarded; the wizard is idle again
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("a destination wizard is already running (question {}/{})", .0.position().unwrap_or(0), WizardStep::QUESTIONS)]
    Busy(WizardStep),

    #[error("no destination wizard is running")]
    NotStarted,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Session-local wizard state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationWizard {
    step: WizardStep,
    answers: LinkDraft,
}

impl Default for DestinationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl DestinationWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Idle,
            answers: LinkDraft::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_idle(&self) -> bool {
        self.step == WizardStep::Idle
    }

    /// Precise destination the running wizard was started from
    pub fn precise_destination(&self) -> Option<&str> {
        (!self.is_idle()).then_some(self.answers.precise_destination.as_str())
    }

    /// Global destination answered so far, if any
    pub fn global_destination(&self) -> Option<&str> {
        Some(self.answers.global_destination.as_str()).filter(|g| !g.is_empty())
    }

    pub fn start(&mut self, precise_destination: &str) -> Result<Transition, WizardError> {
        self.handle(WizardEvent::Start(precise_destination.to_string()))
    }

    pub fn submit(&mut self, answer: &str) -> Result<Transition, WizardError> {
        self.handle(WizardEvent::Submit(answer.to_string()))
    }

    pub fn cancel(&mut self) -> Result<Transition, WizardError> {
        self.handle(WizardEvent::Cancel)
    }

    /// Apply one event. On error the wizard is unchanged.
    pub fn handle(&mut self, event: WizardEvent) -> Result<Transition, WizardError> {
        use WizardStep::*;

        let transition = match (self.step, event) {
            (Idle, WizardEvent::Start(precise)) => {
                let precise = precise.trim();
                if precise.is_empty() {
                    return Err(ValidationError::EmptyPreciseDestination.into());
                }
                self.answers = LinkDraft {
                    precise_destination: precise.to_string(),
                    ..LinkDraft::default()
                };
                self.advance(AwaitGlobalDestination)
            }
            (step, WizardEvent::Start(_)) => return Err(WizardError::Busy(step)),
            (Idle, WizardEvent::Submit(_) | WizardEvent::Cancel) => {
                return Err(WizardError::NotStarted)
            }
            (AwaitGlobalDestination, WizardEvent::Submit(answer)) => {
                let answer = answer.trim();
                if answer.is_empty() {
                    return Err(ValidationError::MissingGlobalDestination.into());
                }
                self.answers.global_destination = answer.to_string();
                self.advance(AwaitContactName)
            }
            (AwaitContactName, WizardEvent::Submit(answer)) => {
                self.answers.contact_name = answer.trim().to_string();
                self.advance(AwaitContactInfo)
            }
            (AwaitContactInfo, WizardEvent::Submit(answer)) => {
                self.answers.contact_info = answer.trim().to_string();
                let draft = std::mem::take(&mut self.answers);
                self.step = Idle;
                debug!(
                    global = %draft.global_destination,
                    precise = %draft.precise_destination,
                    "wizard committed"
                );
                Transition::Committed(draft)
            }
            (_, WizardEvent::Cancel) => {
                self.answers = LinkDraft::default();
                self.step = Idle;
                debug!("wizard cancelled");
                Transition::Cancelled
            }
        };
        Ok(transition)
    }

    fn advance(&mut self, next: WizardStep) -> Transition {
        self.step = next;
        Transition::Advanced(next)
    }
}
