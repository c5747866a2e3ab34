//! Recording fakes for the coordinator's ports and the HTTP transport.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::coordinator::ports::{
    ChartError, ChartHandle, ChartPainter, Clock, ConfirmRequest, Dialogs, Notification,
    Notifier, PromptRequest, ViewRenderer,
};
use crate::coordinator::state::{ChartSlot, Tab};
use crate::coordinator::view_models::{
    BudgetFormView, ChartSpec, DashboardView, ExpenseListView, GoalListView, LearningPeriodView,
    ReportMonthsView, ReportView, SavingsListView,
};
use crate::services::api::{ApiRequest, HttpTransport, Method, RawResponse};

// ============= Transport =============

/// Answers requests from a script and remembers every request it saw.
///
/// Unscripted requests fail like an unreachable server.
#[derive(Default)]
pub struct RecordingTransport {
    script: RefCell<HashMap<(Method, String), Result<RawResponse, String>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.script.borrow_mut().insert(
            (method, path.to_string()),
            Ok(RawResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.script
            .borrow_mut()
            .insert((method, path.to_string()), Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// "METHOD /path?query" per request, in order
    pub fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method.as_str(), r.path))
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }
}

#[async_trait(?Send)]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, String> {
        let key = (request.method, request.path.clone());
        self.requests.borrow_mut().push(request);

        self.script
            .borrow()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(format!("no response scripted for {} {}", key.0.as_str(), key.1)))
    }
}

// ============= Renderer =============

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Tab(Tab),
    Greeting(String),
    Expenses(ExpenseListView),
    ExpenseFormReset(NaiveDate),
    Dashboard(DashboardView),
    BudgetForm(BudgetFormView),
    LearningPeriod(Option<LearningPeriodView>),
    Savings(SavingsListView),
    SavingsFormReset(NaiveDate),
    GoalControls,
    Goals(GoalListView),
    ReportMonths(ReportMonthsView),
    Report(Option<ReportView>),
}

#[derive(Default)]
pub struct RecordingRenderer {
    events: RefCell<Vec<Rendered>>,
}

impl RecordingRenderer {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Rendered> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn last_expenses(&self) -> Option<ExpenseListView> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            Rendered::Expenses(view) => Some(view.clone()),
            _ => None,
        })
    }

    pub fn last_goals(&self) -> Option<GoalListView> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            Rendered::Goals(view) => Some(view.clone()),
            _ => None,
        })
    }

    pub fn last_budget_form(&self) -> Option<BudgetFormView> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            Rendered::BudgetForm(view) => Some(view.clone()),
            _ => None,
        })
    }

    fn push(&self, event: Rendered) {
        self.events.borrow_mut().push(event);
    }
}

impl ViewRenderer for RecordingRenderer {
    fn show_tab(&self, tab: Tab) {
        self.push(Rendered::Tab(tab));
    }

    fn show_greeting(&self, username: &str) {
        self.push(Rendered::Greeting(username.to_string()));
    }

    fn show_expenses(&self, view: ExpenseListView) {
        self.push(Rendered::Expenses(view));
    }

    fn reset_expense_form(&self, today: NaiveDate) {
        self.push(Rendered::ExpenseFormReset(today));
    }

    fn show_dashboard(&self, view: DashboardView) {
        self.push(Rendered::Dashboard(view));
    }

    fn show_budget_form(&self, view: BudgetFormView) {
        self.push(Rendered::BudgetForm(view));
    }

    fn show_learning_period(&self, view: Option<LearningPeriodView>) {
        self.push(Rendered::LearningPeriod(view));
    }

    fn show_savings(&self, view: SavingsListView) {
        self.push(Rendered::Savings(view));
    }

    fn reset_savings_form(&self, today: NaiveDate) {
        self.push(Rendered::SavingsFormReset(today));
    }

    fn enable_goal_controls(&self) {
        self.push(Rendered::GoalControls);
    }

    fn show_goals(&self, view: GoalListView) {
        self.push(Rendered::Goals(view));
    }

    fn show_report_months(&self, view: ReportMonthsView) {
        self.push(Rendered::ReportMonths(view));
    }

    fn show_report(&self, view: Option<ReportView>) {
        self.push(Rendered::Report(view));
    }
}

// ============= Notifier =============

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications
            .borrow()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }
}

// ============= Dialogs =============

/// Replays queued answers; an empty queue means the user dismissed the dialog
#[derive(Default)]
pub struct ScriptedDialogs {
    confirms: RefCell<VecDeque<bool>>,
    prompts: RefCell<VecDeque<Option<Vec<String>>>>,
    confirm_requests: RefCell<Vec<ConfirmRequest>>,
    prompt_requests: RefCell<Vec<PromptRequest>>,
}

impl ScriptedDialogs {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirms.borrow_mut().push_back(answer);
    }

    pub fn answer_prompt(&self, values: &[&str]) {
        self.prompts
            .borrow_mut()
            .push_back(Some(values.iter().map(|v| v.to_string()).collect()));
    }

    pub fn dismiss_prompt(&self) {
        self.prompts.borrow_mut().push_back(None);
    }

    pub fn confirm_requests(&self) -> Vec<ConfirmRequest> {
        self.confirm_requests.borrow().clone()
    }

    pub fn prompt_requests(&self) -> Vec<PromptRequest> {
        self.prompt_requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Dialogs for ScriptedDialogs {
    async fn confirm(&self, request: ConfirmRequest) -> bool {
        self.confirm_requests.borrow_mut().push(request);
        self.confirms.borrow_mut().pop_front().unwrap_or(false)
    }

    async fn prompt(&self, request: PromptRequest) -> Option<Vec<String>> {
        self.prompt_requests.borrow_mut().push(request);
        self.prompts.borrow_mut().pop_front().flatten()
    }
}

// ============= Charts =============

/// Logs "draw <slot>" and "dispose <slot>" in the order they happen
#[derive(Default)]
pub struct RecordingChartPainter {
    log: Rc<RefCell<Vec<String>>>,
    specs: RefCell<Vec<(ChartSlot, ChartSpec)>>,
    fail_draws: Cell<bool>,
}

struct RecordingChartHandle {
    slot: ChartSlot,
    log: Rc<RefCell<Vec<String>>>,
}

impl ChartHandle for RecordingChartHandle {
    fn dispose(&mut self) {
        self.log.borrow_mut().push(format!("dispose {:?}", self.slot));
    }
}

impl RecordingChartPainter {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn specs(&self) -> Vec<(ChartSlot, ChartSpec)> {
        self.specs.borrow().clone()
    }

    pub fn fail_draws(&self, fail: bool) {
        self.fail_draws.set(fail);
    }
}

impl ChartPainter for RecordingChartPainter {
    fn draw(&self, slot: ChartSlot, spec: &ChartSpec) -> Result<Box<dyn ChartHandle>, ChartError> {
        if self.fail_draws.get() {
            return Err(ChartError::CanvasMissing(slot.canvas_id().to_string()));
        }

        self.log.borrow_mut().push(format!("draw {:?}", slot));
        self.specs.borrow_mut().push((slot, spec.clone()));
        Ok(Box::new(RecordingChartHandle {
            slot,
            log: self.log.clone(),
        }))
    }
}

// ============= Clock =============

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
