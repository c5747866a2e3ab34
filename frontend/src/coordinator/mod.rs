//! Tab switching, form submission and refresh orchestration.
//!
//! [`ViewCoordinator`] owns the page state and decides which API calls to
//! make; everything visible goes through the ports in [`ports`].

pub mod forms;
pub mod ports;
pub mod state;
pub mod view_models;


use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::rc::Rc;

use shared::{AuthStatus, Category, DateRange, NewSavingsGoal};

use crate::services::api::{ApiError, FailureKind};
use crate::services::ApiClient;
use forms::{
    parse_budget_inputs, parse_date_range, parse_positive_amount, ExpenseForm, FormError,
    SavingsForm,
};
use ports::{
    ChartPainter, Clock, ConfirmRequest, Dialogs, FieldKind, Notification, Notifier,
    PromptRequest, ViewRenderer,
};
use state::{ChartSlot, Loader, Tab, ViewState};
use view_models::{
    BudgetFormView, ChartSpec, DashboardView, ExpenseListView, GoalListView, LearningPeriodView,
    ReportMonthsView, ReportView, SavingsListView,
};

/// Everything the coordinator needs from the outside world
pub struct Ports {
    pub renderer: Rc<dyn ViewRenderer>,
    pub notifier: Rc<dyn Notifier>,
    pub dialogs: Rc<dyn Dialogs>,
    pub charts: Rc<dyn ChartPainter>,
    pub clock: Rc<dyn Clock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub learning_period: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            learning_period: true,
        }
    }
}

/// Things that can be deleted from a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Expense,
    Savings,
    Goal,
}

impl EntityKind {
    fn confirm_request(&self) -> ConfirmRequest {
        match self {
            EntityKind::Expense => ConfirmRequest::new(
                "Delete Expense?",
                "Are you sure you want to delete this expense? This action cannot be undone.",
                "Delete",
            ),
            EntityKind::Savings => ConfirmRequest::new(
                "Delete Savings?",
                "Are you sure you want to delete this savings entry? This action cannot be undone.",
                "Delete",
            ),
            EntityKind::Goal => ConfirmRequest::new(
                "Delete Goal?",
                "Are you sure you want to permanently delete this goal? This action cannot be undone.",
                "Delete",
            ),
        }
    }

    fn deleted_message(&self) -> &'static str {
        match self {
            EntityKind::Expense => "Expense deleted",
            EntityKind::Savings => "Savings deleted",
            EntityKind::Goal => "Goal deleted",
        }
    }

    fn failed_message(&self) -> &'static str {
        match self {
            EntityKind::Expense => "Error deleting expense",
            EntityKind::Savings => "Error deleting savings",
            EntityKind::Goal => "Error deleting goal",
        }
    }

    fn log_target(&self) -> &'static str {
        match self {
            EntityKind::Expense => "expenses",
            EntityKind::Savings => "savings",
            EntityKind::Goal => "goals",
        }
    }
}

pub struct ViewCoordinator {
    api: ApiClient,
    ports: Ports,
    features: Features,
    state: RefCell<ViewState>,
}

impl ViewCoordinator {
    pub fn new(api: ApiClient, ports: Ports, features: Features, initial_tab: Tab) -> Self {
        Self {
            api,
            ports,
            features,
            state: RefCell::new(ViewState::new(initial_tab)),
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.state.borrow().active_tab
    }

    pub fn showing_archived_goals(&self) -> bool {
        self.state.borrow().show_archived_goals
    }

    /// Greeting, initial form dates and the first tab
    pub async fn start(&self) {
        self.load_greeting().await;

        let today = self.ports.clock.today();
        self.ports.renderer.reset_expense_form(today);
        self.ports.renderer.reset_savings_form(today);

        let tab = self.active_tab();
        self.activate_tab(tab).await;
    }

    async fn load_greeting(&self) {
        match self.api.current_user().await {
            Ok(AuthStatus {
                logged_in: true,
                username: Some(username),
            }) => self.ports.renderer.show_greeting(&username),
            Ok(_) => log::warn!(target: "auth", "no signed-in user"),
            Err(e) => log::error!(target: "auth", "failed to read current user: {}", e),
        }
    }

    // ============= Tabs =============

    /// Show `tab` and run its loader; returns the loader that ran
    pub async fn activate_tab(&self, tab: Tab) -> Loader {
        self.state.borrow_mut().active_tab = tab;
        self.ports.renderer.show_tab(tab);

        let loader = tab.loader();
        log::debug!(target: "tabs", "{:?} active, running {:?}", tab, loader);
        match loader {
            Loader::ExpenseList => self.refresh_expenses().await,
            Loader::Dashboard => self.refresh_dashboard().await,
            Loader::BudgetSetup => self.refresh_budget_setup().await,
            Loader::SavingsAndGoals => self.refresh_savings_tab().await,
            Loader::Reports => self.refresh_reports().await,
            Loader::Visualizations => self.refresh_visualizations().await,
        }
        loader
    }

    // ============= Expenses =============

    pub async fn refresh_expenses(&self) {
        let filter = self.state.borrow().expense_filter;
        match self.api.list_expenses(&filter).await {
            Ok(expenses) => self
                .ports
                .renderer
                .show_expenses(ExpenseListView::from_expenses(&expenses)),
            Err(e) => self.report_api_failure("expenses", "Error loading expenses", &e),
        }
    }

    /// Apply the filter inputs; an empty input leaves that bound open
    pub async fn filter_expenses(&self, start: &str, end: &str) {
        let range = match parse_date_range(start, end) {
            Ok(range) => range,
            Err(e) => return self.report_invalid_input("expenses", &e),
        };

        self.state.borrow_mut().expense_filter = range;
        self.refresh_expenses().await;
    }

    pub async fn clear_expense_filter(&self) {
        self.state.borrow_mut().expense_filter = DateRange::default();
        self.refresh_expenses().await;
    }

    pub async fn submit_expense(&self, form: ExpenseForm) {
        let expense = match form.parse() {
            Ok(expense) => expense,
            Err(e) => return self.report_invalid_input("expenses", &e),
        };

        match self.api.create_expense(&expense).await {
            Ok(()) => {
                log::info!(target: "expenses", "added {} expense of {}", expense.category, expense.amount);
                self.ports
                    .notifier
                    .notify(Notification::success("Expense added successfully!"));
                self.ports
                    .renderer
                    .reset_expense_form(self.ports.clock.today());
                self.refresh_expenses().await;
            }
            Err(e) => self.report_api_failure("expenses", "Error adding expense", &e),
        }
    }

    /// Confirm, delete, then re-read the list the entity belongs to
    pub async fn delete_entity(&self, kind: EntityKind, id: i64) {
        if !self.ports.dialogs.confirm(kind.confirm_request()).await {
            log::debug!(target: kind.log_target(), "delete of {} cancelled", id);
            return;
        }

        let result = match kind {
            EntityKind::Expense => self.api.delete_expense(id).await,
            EntityKind::Savings => self.api.delete_savings(id).await,
            EntityKind::Goal => self.api.delete_goal(id).await,
        };

        match result {
            Ok(()) => {
                log::info!(target: kind.log_target(), "deleted {}", id);
                self.ports
                    .notifier
                    .notify(Notification::success(kind.deleted_message()));
                match kind {
                    EntityKind::Expense => self.refresh_expenses().await,
                    EntityKind::Savings => self.refresh_savings().await,
                    EntityKind::Goal => self.refresh_goals().await,
                }
            }
            Err(e) => self.report_api_failure(kind.log_target(), kind.failed_message(), &e),
        }
    }

    // ============= Dashboard =============

    pub async fn refresh_dashboard(&self) {
        match self.api.dashboard().await {
            Ok(summary) => self
                .ports
                .renderer
                .show_dashboard(DashboardView::from_summary(&summary)),
            Err(e) => self.report_api_failure("dashboard", "Error loading dashboard", &e),
        }
    }

    // ============= Budget setup =============

    pub async fn refresh_budget_setup(&self) {
        match self.api.get_budgets().await {
            Ok(budgets) => {
                self.ports
                    .renderer
                    .show_budget_form(BudgetFormView::from_budgets(&budgets));
                self.state.borrow_mut().cached_budgets = budgets;
            }
            Err(e) => self.report_api_failure("budget", "Error loading budgets", &e),
        }

        if self.features.learning_period {
            self.refresh_learning_period().await;
        }
    }

    async fn refresh_learning_period(&self) {
        let status = match self.api.learning_period_status().await {
            Ok(status) => status,
            Err(e) => {
                return self.report_api_failure("budget", "Error loading learning period", &e)
            }
        };

        if !status.is_complete {
            self.state.borrow_mut().suggested_budgets = None;
            self.ports
                .renderer
                .show_learning_period(Some(LearningPeriodView::in_progress(&status)));
            return;
        }

        let analysis = match self.api.learning_period_analysis().await {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                self.report_api_failure("budget", "Error loading spending analysis", &e);
                None
            }
        };

        let suggestions = analysis
            .as_ref()
            .map(|a| a.suggested_budgets.clone())
            .or(status.suggested_budgets)
            .filter(|s| !s.is_empty());
        let view = LearningPeriodView::complete(analysis.as_ref(), suggestions.is_some());

        self.state.borrow_mut().suggested_budgets = suggestions;
        self.ports.renderer.show_learning_period(Some(view));
    }

    /// Fill the budget inputs with the learning-period suggestions; nothing is saved
    pub fn apply_suggested_budgets(&self) {
        let suggestions = self.state.borrow().suggested_budgets.clone();
        match suggestions {
            Some(suggestions) => {
                self.ports
                    .renderer
                    .show_budget_form(BudgetFormView::from_budgets(&suggestions));
                self.ports.notifier.notify(Notification::success(
                    "Suggested budgets applied. Review and save to keep them.",
                ));
            }
            None => self
                .ports
                .notifier
                .notify(Notification::error("No suggested budgets available yet")),
        }
    }

    /// Replace the server's budget map with the positive inputs
    pub async fn save_budget(&self, inputs: &BTreeMap<Category, String>) {
        let budgets = parse_budget_inputs(inputs);

        match self.api.save_budgets(&budgets).await {
            Ok(()) => {
                log::info!(target: "budget", "saved {} category limits", budgets.len());
                self.ports
                    .notifier
                    .notify(Notification::success("Budget saved successfully!"));
                self.state.borrow_mut().cached_budgets = budgets;
            }
            Err(e) => self.report_api_failure("budget", "Error saving budget", &e),
        }
    }

    // ============= Savings & goals =============

    async fn refresh_savings_tab(&self) {
        self.refresh_savings().await;
        self.ensure_goal_controls();
        self.refresh_goals().await;
    }

    fn ensure_goal_controls(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.goal_controls_ready {
                return;
            }
            state.goal_controls_ready = true;
        }
        self.ports.renderer.enable_goal_controls();
    }

    pub async fn refresh_savings(&self) {
        match self.api.list_savings().await {
            Ok(entries) => self
                .ports
                .renderer
                .show_savings(SavingsListView::from_entries(&entries)),
            Err(e) => self.report_api_failure("savings", "Error loading savings", &e),
        }
    }

    pub async fn submit_savings(&self, form: SavingsForm) {
        let entry = match form.parse() {
            Ok(entry) => entry,
            Err(e) => return self.report_invalid_input("savings", &e),
        };

        match self.api.create_savings(&entry).await {
            Ok(()) => {
                self.ports
                    .notifier
                    .notify(Notification::success("Savings added successfully!"));
                self.ports
                    .renderer
                    .reset_savings_form(self.ports.clock.today());
                self.refresh_savings().await;
            }
            Err(e) => self.report_api_failure("savings", "Error adding savings", &e),
        }
    }

    pub async fn refresh_goals(&self) {
        let archived = self.showing_archived_goals();
        match self.api.list_goals(archived).await {
            Ok(goals) => self
                .ports
                .renderer
                .show_goals(GoalListView::from_goals(&goals, archived)),
            Err(e) => self.report_api_failure("goals", "Error loading savings goals", &e),
        }
    }

    /// Switch between active and archived goals; returns the new flag
    pub async fn toggle_archived_goals(&self) -> bool {
        let archived = {
            let mut state = self.state.borrow_mut();
            state.show_archived_goals = !state.show_archived_goals;
            state.show_archived_goals
        };
        self.refresh_goals().await;
        archived
    }

    pub async fn create_goal(&self) {
        let request = PromptRequest::new("New Savings Goal")
            .field("What are you saving for?", FieldKind::Text)
            .field("Target amount ($):", FieldKind::Amount);

        let Some(values) = self.ports.dialogs.prompt(request).await else {
            return;
        };

        let name = values.first().map(|v| v.trim()).unwrap_or_default();
        if name.is_empty() {
            return;
        }

        let raw_target = values.get(1).map(String::as_str).unwrap_or_default();
        let Some(target_amount) = parse_positive_amount(raw_target) else {
            return self.report_invalid_input("goals", &FormError::InvalidTarget(raw_target.to_string()));
        };

        let goal = NewSavingsGoal {
            name: name.to_string(),
            target_amount,
        };
        match self.api.create_goal(&goal).await {
            Ok(()) => {
                log::info!(target: "goals", "created goal {:?}", goal.name);
                self.ports
                    .notifier
                    .notify(Notification::success("Goal created successfully!"));
                self.refresh_goals().await;
            }
            Err(e) => self.report_api_failure("goals", "Error creating goal", &e),
        }
    }

    /// Ask how much to add, then contribute
    pub async fn contribute_to_goal(&self, goal_id: i64, goal_name: &str) {
        let request = PromptRequest::new(format!("Add to \"{}\"", goal_name)).field(
            format!("How much would you like to add to \"{}\"?", goal_name),
            FieldKind::Amount,
        );

        let Some(values) = self.ports.dialogs.prompt(request).await else {
            return;
        };
        let raw_amount = values.first().map(String::as_str).unwrap_or_default();
        self.add_to_savings_goal(goal_id, raw_amount).await;
    }

    pub async fn add_to_savings_goal(&self, goal_id: i64, raw_amount: &str) {
        let Some(amount) = parse_positive_amount(raw_amount) else {
            return self
                .report_invalid_input("goals", &FormError::InvalidAmount(raw_amount.to_string()));
        };

        match self.api.add_to_goal(goal_id, amount).await {
            Ok(response) => {
                let notification = if response.completed {
                    log::info!(target: "goals", "goal {} completed", goal_id);
                    Notification::celebration("🎉 Goal completed! Congratulations!")
                } else {
                    Notification::success("Amount added successfully!")
                };
                self.ports.notifier.notify(notification);
                self.refresh_goals().await;
            }
            Err(e) => {
                let message = e.server_message().unwrap_or("Error adding to goal").to_string();
                self.fail("goals", e.kind(), &message, &e);
            }
        }
    }

    pub async fn archive_goal(&self, goal_id: i64) {
        let request = ConfirmRequest::new(
            "Archive Goal?",
            "Are you sure you want to archive this goal? You can view it later in archived goals.",
            "Archive",
        );
        if !self.ports.dialogs.confirm(request).await {
            return;
        }

        match self.api.archive_goal(goal_id).await {
            Ok(()) => {
                self.ports
                    .notifier
                    .notify(Notification::success("Goal archived"));
                self.refresh_goals().await;
            }
            Err(e) => self.report_api_failure("goals", "Error archiving goal", &e),
        }
    }

    // ============= Reports =============

    /// Re-read the month list; a selection that still exists is reloaded
    pub async fn refresh_reports(&self) {
        let months = match self.api.available_months().await {
            Ok(months) => months,
            Err(e) => return self.report_api_failure("reports", "Error loading report months", &e),
        };

        let selected = self.state.borrow().report_month.clone();
        let view = ReportMonthsView::from_months(&months, selected.clone());
        let still_listed = selected.filter(|month| view.contains(month));
        self.ports.renderer.show_report_months(view);

        match still_listed {
            Some(month) => self.load_report(&month).await,
            None => self.select_report_month(None).await,
        }
    }

    /// `None` (or an empty value) hides the report
    pub async fn select_report_month(&self, month: Option<String>) {
        let month = month.filter(|m| !m.trim().is_empty());
        self.state.borrow_mut().report_month = month.clone();

        match month {
            Some(month) => self.load_report(&month).await,
            None => self.ports.renderer.show_report(None),
        }
    }

    async fn load_report(&self, month: &str) {
        match self.api.monthly_report(month).await {
            Ok(report) => self
                .ports
                .renderer
                .show_report(Some(ReportView::from_report(month, &report))),
            Err(e) => self.report_api_failure("reports", "Error loading report", &e),
        }
    }

    // ============= Visualizations =============

    pub async fn refresh_visualizations(&self) {
        match self.api.monthly_trends().await {
            Ok(points) => self.paint(ChartSlot::MonthlyTrends, ChartSpec::monthly_trends(&points)),
            Err(e) => self.report_api_failure("charts", "Error loading monthly trends", &e),
        }

        self.draw_category_breakdown().await;

        match self.api.budget_vs_actual().await {
            Ok(rows) => self.paint(ChartSlot::BudgetVsActual, ChartSpec::budget_vs_actual(&rows)),
            Err(e) => self.report_api_failure("charts", "Error loading budget comparison", &e),
        }
    }

    /// Redraw only the category breakdown with new bounds
    pub async fn refresh_category_breakdown(&self, start: &str, end: &str) {
        let range = match parse_date_range(start, end) {
            Ok(range) => range,
            Err(e) => return self.report_invalid_input("charts", &e),
        };

        self.state.borrow_mut().chart_range = range;
        self.draw_category_breakdown().await;
    }

    async fn draw_category_breakdown(&self) {
        let range = self.state.borrow().chart_range;
        match self.api.category_breakdown(&range).await {
            Ok(totals) => self.paint(
                ChartSlot::CategoryBreakdown,
                ChartSpec::category_breakdown(&totals),
            ),
            Err(e) => self.report_api_failure("charts", "Error loading category breakdown", &e),
        }
    }

    /// Release the slot's previous chart, then draw the new one
    fn paint(&self, slot: ChartSlot, spec: ChartSpec) {
        let painter = self.ports.charts.clone();
        let result = self
            .state
            .borrow_mut()
            .charts
            .replace(slot, || painter.draw(slot, &spec));

        if let Err(e) = result {
            log::warn!(target: "charts", "{:?} not drawn: {}", slot, e);
        }
    }

    /// Release every live chart, e.g. when the page goes away
    pub fn dispose_charts(&self) {
        self.state.borrow_mut().charts.dispose_all();
    }

    // ============= Failures =============

    fn report_api_failure(&self, target: &str, message: &str, error: &ApiError) {
        self.fail(target, error.kind(), message, error);
    }

    fn report_invalid_input(&self, target: &str, error: &FormError) {
        self.fail(target, FailureKind::Validation, &error.to_string(), error);
    }

    /// Log, notify, and let the caller abort. Views are left as they were.
    fn fail(&self, target: &str, kind: FailureKind, message: &str, detail: &dyn Display) {
        match kind {
            FailureKind::Validation => log::warn!(target: target, "{}: {}", message, detail),
            FailureKind::Network | FailureKind::Application => {
                log::error!(target: target, "{} ({:?}): {}", message, kind, detail)
            }
        }
        self.ports.notifier.notify(Notification::error(message));
    }
}
