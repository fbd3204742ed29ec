//! Three-step lead form: service selection, contact details, budget review.
//!
//! The wizard owns a single [`DraftLead`] while it is open. Forward navigation
//! is gated by a per-step predicate; submission is split into
//! [`Wizard::begin_submit`] and [`Wizard::complete_submit`] so a host event
//! loop can keep a dispatch pending while further submit events arrive.

use crate::core::LeadDispatcher;
use crate::domain::model::{DraftLead, LeadSubmission, Service, SubmissionOutcome};
use crate::utils::validation::is_plausible_email;
use std::fmt;
use std::str::FromStr;

pub const SERVICES_REQUIRED: &str = "Please select at least one service";
pub const CONTACT_FIELDS_REQUIRED: &str = "Please fill in all required fields";
pub const BUDGET_REQUIRED: &str = "Please enter your budget";
pub const EMAIL_FORMAT_INVALID: &str = "Please enter a valid email address";
pub const SUBMITTED_NOTICE: &str =
    "Your project inquiry has been submitted! We'll get back to you soon.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    SelectServices,
    ContactDetails,
    BudgetReview,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Step::SelectServices => 1,
            Step::ContactDetails => 2,
            Step::BudgetReview => 3,
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::SelectServices => Some(Step::ContactDetails),
            Step::ContactDetails => Some(Step::BudgetReview),
            Step::BudgetReview => None,
        }
    }

    fn previous(self) -> Option<Step> {
        match self {
            Step::SelectServices => None,
            Step::ContactDetails => Some(Step::SelectServices),
            Step::BudgetReview => Some(Step::ContactDetails),
        }
    }

    pub fn is_valid(&self, draft: &DraftLead) -> bool {
        match self {
            Step::SelectServices => is_step1_valid(draft),
            Step::ContactDetails => is_step2_valid(draft),
            Step::BudgetReview => is_step3_valid(draft),
        }
    }

    fn invalid_message(&self) -> &'static str {
        match self {
            Step::SelectServices => SERVICES_REQUIRED,
            Step::ContactDetails => CONTACT_FIELDS_REQUIRED,
            Step::BudgetReview => BUDGET_REQUIRED,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}", self.number())
    }
}

pub fn is_step1_valid(draft: &DraftLead) -> bool {
    !draft.services.is_empty()
}

pub fn is_step2_valid(draft: &DraftLead) -> bool {
    [&draft.name, &draft.email, &draft.phone, &draft.details]
        .iter()
        .all(|value| !value.trim().is_empty())
}

pub fn is_step3_valid(draft: &DraftLead) -> bool {
    !draft.budget.trim().is_empty()
}

/// Editable text fields of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    CountryCode,
    Phone,
    Details,
    Currency,
    Budget,
}

impl FromStr for Field {
    type Err = String;

    /// Accepts the form's input names (`countryCode`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "countryCode" | "country_code" => Ok(Field::CountryCode),
            "phone" => Ok(Field::Phone),
            "details" => Ok(Field::Details),
            "currency" => Ok(Field::Currency),
            "budget" => Ok(Field::Budget),
            other => Err(format!("Unknown form field: {}", other)),
        }
    }
}

type CompletionHook = Box<dyn FnMut() + Send>;

/// Identifies one `begin_submit` call; outcomes carrying an older ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// A submission snapshot handed to the host together with its ticket.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub submission: LeadSubmission,
}

pub struct Wizard {
    draft: DraftLead,
    step: Step,
    open: bool,
    generation: u64,
    in_flight: Option<SubmissionTicket>,
    error: Option<String>,
    toast: Option<String>,
    contact_address: String,
    on_complete: Option<CompletionHook>,
}

impl fmt::Debug for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("draft", &self.draft)
            .field("step", &self.step)
            .field("open", &self.open)
            .field("in_flight", &self.in_flight)
            .field("error", &self.error)
            .field("toast", &self.toast)
            .finish_non_exhaustive()
    }
}

impl Wizard {
    /// `contact_address` is quoted in the failure message as a fallback.
    pub fn new(contact_address: impl Into<String>) -> Self {
        Self {
            draft: DraftLead::default(),
            step: Step::SelectServices,
            open: false,
            generation: 0,
            in_flight: None,
            error: None,
            toast: None,
            contact_address: contact_address.into(),
            on_complete: None,
        }
    }

    /// Invoked after a successful submission, e.g. to dismiss a host modal.
    pub fn on_complete<F>(&mut self, hook: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_complete = Some(Box::new(hook));
    }

    pub fn draft(&self) -> &DraftLead {
        &self.draft
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toast(&self) -> Option<&str> {
        self.toast.as_deref()
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    pub fn open(&mut self) {
        self.open = true;
        tracing::debug!("Lead form opened");
    }

    /// Closes the form and discards the draft. A pending submission's
    /// outcome will no longer apply.
    pub fn close(&mut self) {
        self.open = false;
        self.generation += 1;
        self.reset();
        tracing::debug!("Lead form closed");
    }

    fn ignore_when_closed(&self, action: &str) -> bool {
        if !self.open {
            tracing::debug!("Ignoring {} on a closed form", action);
        }
        !self.open
    }

    /// Edits and navigation are ignored while the form is closed.
    pub fn toggle_service(&mut self, service: Service) {
        if self.ignore_when_closed("service toggle") {
            return;
        }
        self.draft.toggle_service(service);
    }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        if self.ignore_when_closed("field update") {
            return;
        }
        let value = value.into();
        let slot = match field {
            Field::Name => &mut self.draft.name,
            Field::Email => &mut self.draft.email,
            Field::CountryCode => &mut self.draft.country_code,
            Field::Phone => &mut self.draft.phone,
            Field::Details => &mut self.draft.details,
            Field::Currency => &mut self.draft.currency,
            Field::Budget => &mut self.draft.budget,
        };
        *slot = value;
    }

    pub fn is_current_step_valid(&self) -> bool {
        self.step.is_valid(&self.draft)
    }

    pub fn can_submit(&self) -> bool {
        self.open
            && self.in_flight.is_none()
            && self.step == Step::BudgetReview
            && is_step3_valid(&self.draft)
    }

    /// Returns `true` when the step advanced.
    pub fn attempt_next(&mut self) -> bool {
        if self.ignore_when_closed("next") {
            return false;
        }
        if !self.is_current_step_valid() {
            self.error = Some(self.step.invalid_message().to_string());
            tracing::debug!("Blocked on {}: {}", self.step, self.step.invalid_message());
            return false;
        }
        if self.step == Step::ContactDetails && !is_plausible_email(&self.draft.email) {
            self.error = Some(EMAIL_FORMAT_INVALID.to_string());
            return false;
        }

        self.error = None;
        match self.step.next() {
            Some(next) => {
                tracing::debug!("Advancing from {} to {}", self.step, next);
                self.step = next;
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) {
        if self.ignore_when_closed("back") {
            return;
        }
        self.error = None;
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
    }

    /// Marks a submission in flight and returns the snapshot to dispatch.
    /// Returns `None` while another submission is pending or the form is not
    /// ready to submit.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if !self.can_submit() {
            tracing::debug!(
                "Ignoring submit (open: {}, in flight: {}, {})",
                self.open,
                self.is_submitting(),
                self.step
            );
            return None;
        }
        self.generation += 1;
        let ticket = SubmissionTicket(self.generation);
        self.in_flight = Some(ticket);
        self.error = None;
        Some(PendingSubmission {
            ticket,
            submission: LeadSubmission::from_draft(&self.draft),
        })
    }

    /// Applies the dispatch result for `ticket`. Outcomes for a submission
    /// that is no longer in flight (form closed, or a newer submit) are ignored.
    pub fn complete_submit(&mut self, ticket: SubmissionTicket, outcome: &SubmissionOutcome) {
        if self.in_flight != Some(ticket) {
            tracing::debug!("Discarding stale submission outcome {:?}: {:?}", ticket, outcome);
            return;
        }
        self.in_flight = None;

        match outcome {
            SubmissionOutcome::Success => {
                self.open = false;
                self.reset();
                self.toast = Some(SUBMITTED_NOTICE.to_string());
                if let Some(hook) = self.on_complete.as_mut() {
                    hook();
                }
            }
            SubmissionOutcome::Failure { reason } => {
                tracing::warn!("Submission failed: {}", reason);
                self.error = Some(self.failure_message());
            }
        }
    }

    /// Runs the whole submit cycle against `dispatcher`. Returns `None` when
    /// the submit was ignored.
    pub async fn submit<D>(&mut self, dispatcher: &D) -> Option<SubmissionOutcome>
    where
        D: LeadDispatcher + ?Sized,
    {
        let pending = self.begin_submit()?;
        let outcome = match dispatcher.dispatch(&pending.submission).await {
            Ok(()) => SubmissionOutcome::Success,
            Err(e) => SubmissionOutcome::Failure {
                reason: e.to_string(),
            },
        };
        self.complete_submit(pending.ticket, &outcome);
        Some(outcome)
    }

    pub fn failure_message(&self) -> String {
        format!(
            "There was an issue submitting your form. Please try again or contact us directly at {}",
            self.contact_address
        )
    }

    fn reset(&mut self) {
        self.draft = DraftLead::default();
        self.step = Step::SelectServices;
        self.error = None;
        self.in_flight = None;
    }
}
