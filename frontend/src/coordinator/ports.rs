//! Seams between the coordinator and the browser.
//!
//! The coordinator only talks to these traits; the Yew hook provides the
//! real implementations and the tests provide recording fakes.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::state::{ChartSlot, Tab};
use super::view_models::{
    BudgetFormView, ChartSpec, DashboardView, ExpenseListView, GoalListView, LearningPeriodView,
    ReportMonthsView, ReportView, SavingsListView,
};

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Receives finished view models; never sees raw DTOs
pub trait ViewRenderer {
    fn show_tab(&self, tab: Tab);
    fn show_greeting(&self, username: &str);

    fn show_expenses(&self, view: ExpenseListView);
    /// Clear the entry form and put `today` in its date field
    fn reset_expense_form(&self, today: NaiveDate);

    fn show_dashboard(&self, view: DashboardView);

    fn show_budget_form(&self, view: BudgetFormView);
    fn show_learning_period(&self, view: Option<LearningPeriodView>);

    fn show_savings(&self, view: SavingsListView);
    fn reset_savings_form(&self, today: NaiveDate);
    /// Called once, the first time the savings tab is shown
    fn enable_goal_controls(&self);
    fn show_goals(&self, view: GoalListView);

    fn show_report_months(&self, view: ReportMonthsView);
    /// `None` hides the report
    fn show_report(&self, view: Option<ReportView>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Celebration,
}

impl NotificationLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
            NotificationLevel::Celebration => "celebration",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn celebration(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Celebration,
            message: message.into(),
        }
    }
}

/// Short-lived messages; implementations dismiss them on their own
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

impl ConfirmRequest {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        confirm_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: confirm_label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Amount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptField {
    pub label: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub title: String,
    pub fields: Vec<PromptField>,
}

impl PromptRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, label: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(PromptField {
            label: label.into(),
            kind,
        });
        self
    }
}

#[async_trait(?Send)]
pub trait Dialogs {
    /// `false` when the user cancels or the dialog is replaced
    async fn confirm(&self, request: ConfirmRequest) -> bool;

    /// One raw value per field, in field order; `None` when dismissed
    async fn prompt(&self, request: PromptRequest) -> Option<Vec<String>>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("canvas `{0}` is not in the document")]
    CanvasMissing(String),
    #[error("failed to draw chart: {0}")]
    Draw(String),
}

/// A chart that is currently painted on a canvas
pub trait ChartHandle {
    fn dispose(&mut self);
}

pub trait ChartPainter {
    fn draw(&self, slot: ChartSlot, spec: &ChartSpec) -> Result<Box<dyn ChartHandle>, ChartError>;
}
