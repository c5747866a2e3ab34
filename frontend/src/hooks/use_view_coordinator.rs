use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::coordinator::ports::{Dialogs, Notification, Notifier, ViewRenderer};
use crate::coordinator::state::Tab;
use crate::coordinator::view_models::{
    BudgetFormView, DashboardView, ExpenseListView, GoalListView, LearningPeriodView,
    ReportMonthsView, ReportView, SavingsListView,
};
use crate::coordinator::{Features, Ports, ViewCoordinator};
use crate::services::charts::CanvasChartPainter;
use crate::services::config::{AppConfig, ConfirmStyle};
use crate::services::date_utils::{input_value, BrowserClock};
use crate::services::dialogs::{DialogAnswer, DialogView, ModalDialogs, NativeDialogs};
use crate::services::ApiClient;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub notification: Notification,
}

/// Remount key and default date of an entry form.
///
/// Bumping `generation` recreates the form, which clears every input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormReset {
    pub generation: u32,
    pub date: String,
}

impl FormReset {
    fn next(&self, today: NaiveDate) -> Self {
        Self {
            generation: self.generation.wrapping_add(1),
            date: input_value(today),
        }
    }
}

/// Everything the page shows. `None` means "not loaded yet".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppView {
    pub active_tab: Tab,
    pub greeting: Option<String>,
    pub expenses: Option<ExpenseListView>,
    pub expense_form: FormReset,
    pub dashboard: Option<DashboardView>,
    pub budget_form: Option<BudgetFormView>,
    /// Bumped on every budget form render so inputs pick up new values
    pub budget_generation: u32,
    pub learning_period: Option<LearningPeriodView>,
    pub savings: Option<SavingsListView>,
    pub savings_form: FormReset,
    pub goal_controls: bool,
    pub goals: Option<GoalListView>,
    pub report_months: ReportMonthsView,
    pub report: Option<ReportView>,
    pub toasts: Vec<Toast>,
    pub dialog: Option<DialogView>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    ShowTab(Tab),
    Greeting(String),
    Expenses(ExpenseListView),
    ResetExpenseForm(NaiveDate),
    Dashboard(DashboardView),
    BudgetForm(BudgetFormView),
    LearningPeriod(Option<LearningPeriodView>),
    Savings(SavingsListView),
    ResetSavingsForm(NaiveDate),
    EnableGoalControls,
    Goals(GoalListView),
    ReportMonths(ReportMonthsView),
    Report(Option<ReportView>),
    PushToast(Toast),
    DismissToast(u32),
    Dialog(Option<DialogView>),
}

impl Reducible for AppView {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            AppAction::ShowTab(tab) => next.active_tab = tab,
            AppAction::Greeting(username) => next.greeting = Some(username),
            AppAction::Expenses(view) => next.expenses = Some(view),
            AppAction::ResetExpenseForm(today) => next.expense_form = self.expense_form.next(today),
            AppAction::Dashboard(view) => next.dashboard = Some(view),
            AppAction::BudgetForm(view) => {
                next.budget_form = Some(view);
                next.budget_generation = self.budget_generation.wrapping_add(1);
            }
            AppAction::LearningPeriod(view) => next.learning_period = view,
            AppAction::Savings(view) => next.savings = Some(view),
            AppAction::ResetSavingsForm(today) => next.savings_form = self.savings_form.next(today),
            AppAction::EnableGoalControls => next.goal_controls = true,
            AppAction::Goals(view) => next.goals = Some(view),
            AppAction::ReportMonths(view) => next.report_months = view,
            AppAction::Report(view) => next.report = view,
            AppAction::PushToast(toast) => next.toasts.push(toast),
            AppAction::DismissToast(id) => next.toasts.retain(|toast| toast.id != id),
            AppAction::Dialog(dialog) => next.dialog = dialog,
        }

        Rc::new(next)
    }
}

/// Renders by dispatching into the page reducer
struct ReducerRenderer {
    dispatcher: UseReducerDispatcher<AppView>,
}

impl ViewRenderer for ReducerRenderer {
    fn show_tab(&self, tab: Tab) {
        self.dispatcher.dispatch(AppAction::ShowTab(tab));
    }

    fn show_greeting(&self, username: &str) {
        self.dispatcher
            .dispatch(AppAction::Greeting(username.to_string()));
    }

    fn show_expenses(&self, view: ExpenseListView) {
        self.dispatcher.dispatch(AppAction::Expenses(view));
    }

    fn reset_expense_form(&self, today: NaiveDate) {
        self.dispatcher.dispatch(AppAction::ResetExpenseForm(today));
    }

    fn show_dashboard(&self, view: DashboardView) {
        self.dispatcher.dispatch(AppAction::Dashboard(view));
    }

    fn show_budget_form(&self, view: BudgetFormView) {
        self.dispatcher.dispatch(AppAction::BudgetForm(view));
    }

    fn show_learning_period(&self, view: Option<LearningPeriodView>) {
        self.dispatcher.dispatch(AppAction::LearningPeriod(view));
    }

    fn show_savings(&self, view: SavingsListView) {
        self.dispatcher.dispatch(AppAction::Savings(view));
    }

    fn reset_savings_form(&self, today: NaiveDate) {
        self.dispatcher.dispatch(AppAction::ResetSavingsForm(today));
    }

    fn enable_goal_controls(&self) {
        self.dispatcher.dispatch(AppAction::EnableGoalControls);
    }

    fn show_goals(&self, view: GoalListView) {
        self.dispatcher.dispatch(AppAction::Goals(view));
    }

    fn show_report_months(&self, view: ReportMonthsView) {
        self.dispatcher.dispatch(AppAction::ReportMonths(view));
    }

    fn show_report(&self, view: Option<ReportView>) {
        self.dispatcher.dispatch(AppAction::Report(view));
    }
}

/// Toasts that dismiss themselves after a timeout
struct ToastNotifier {
    dispatcher: UseReducerDispatcher<AppView>,
    timeout_ms: u32,
    next_id: Cell<u32>,
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        let id = self.next_id.get().wrapping_add(1);
        self.next_id.set(id);

        self.dispatcher
            .dispatch(AppAction::PushToast(Toast { id, notification }));

        let dispatcher = self.dispatcher.clone();
        let timeout_ms = self.timeout_ms;
        spawn_local(async move {
            gloo::timers::future::TimeoutFuture::new(timeout_ms).await;
            dispatcher.dispatch(AppAction::DismissToast(id));
        });
    }
}

/// Shared handle to the page's coordinator; equal only to itself
#[derive(Clone)]
pub struct CoordinatorHandle(Rc<ViewCoordinator>);

impl PartialEq for CoordinatorHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl CoordinatorHandle {
    pub fn get(&self) -> &ViewCoordinator {
        &self.0
    }

    /// Run a coordinator operation in the background
    pub fn spawn<F, Fut>(&self, operation: F)
    where
        F: FnOnce(Rc<ViewCoordinator>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(operation(self.0.clone()));
    }
}

struct Wiring {
    coordinator: CoordinatorHandle,
    modal: Option<Rc<ModalDialogs>>,
}

fn wire(config: &AppConfig, dispatcher: UseReducerDispatcher<AppView>) -> Wiring {
    let renderer = Rc::new(ReducerRenderer {
        dispatcher: dispatcher.clone(),
    });
    let notifier = Rc::new(ToastNotifier {
        dispatcher: dispatcher.clone(),
        timeout_ms: config.notification_timeout_ms,
        next_id: Cell::new(0),
    });

    let (dialogs, modal): (Rc<dyn Dialogs>, Option<Rc<ModalDialogs>>) = match config.confirm_style
    {
        ConfirmStyle::Modal => {
            let show = Callback::from(move |dialog: Option<DialogView>| {
                dispatcher.dispatch(AppAction::Dialog(dialog))
            });
            let modal = Rc::new(ModalDialogs::new(show));
            let dialogs: Rc<dyn Dialogs> = modal.clone();
            (dialogs, Some(modal))
        }
        ConfirmStyle::Native => (Rc::new(NativeDialogs), None),
    };

    let ports = Ports {
        renderer,
        notifier,
        dialogs,
        charts: Rc::new(CanvasChartPainter),
        clock: Rc::new(BrowserClock),
    };
    let features = Features {
        learning_period: config.learning_period,
    };
    let api = ApiClient::with_base_url(config.api_base_url.clone());

    log::info!(
        target: "app",
        "coordinator ready (dialogs: {:?}, learning period: {})",
        config.confirm_style,
        config.learning_period
    );

    Wiring {
        coordinator: CoordinatorHandle(Rc::new(ViewCoordinator::new(
            api,
            ports,
            features,
            config.initial_tab,
        ))),
        modal,
    }
}

pub struct UseViewCoordinatorResult {
    pub view: UseReducerHandle<AppView>,
    pub coordinator: CoordinatorHandle,
    /// Answers the in-page dialog; a no-op with native dialogs
    pub on_dialog_answer: Callback<DialogAnswer>,
}

/// Builds the coordinator once, starts it on mount and disposes charts on unmount
#[hook]
pub fn use_view_coordinator(config: &AppConfig) -> UseViewCoordinatorResult {
    let view = use_reducer(AppView::default);

    let wiring = {
        let config = config.clone();
        let dispatcher = view.dispatcher();
        use_memo((), move |_| wire(&config, dispatcher))
    };

    use_effect_with((), {
        let coordinator = wiring.coordinator.clone();
        move |_| {
            coordinator.spawn(|c| async move { c.start().await });
            move || coordinator.get().dispose_charts()
        }
    });

    let on_dialog_answer = {
        let modal = wiring.modal.clone();
        Callback::from(move |answer: DialogAnswer| match &modal {
            Some(modal) if modal.is_open() => modal.resolve(answer),
            Some(_) => log::debug!(target: "dialogs", "ignoring answer, no dialog is open"),
            None => log::debug!(target: "dialogs", "native dialogs answer themselves"),
        })
    };

    UseViewCoordinatorResult {
        view,
        coordinator: wiring.coordinator.clone(),
        on_dialog_answer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::ports::NotificationLevel;

    fn reduce(view: AppView, action: AppAction) -> AppView {
        (*Rc::new(view).reduce(action)).clone()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_form_reset_bumps_generation_and_sets_date() {
        let view = reduce(AppView::default(), AppAction::ResetExpenseForm(today()));
        assert_eq!(view.expense_form.generation, 1);
        assert_eq!(view.expense_form.date, "2024-03-15");

        let view = reduce(view, AppAction::ResetExpenseForm(today()));
        assert_eq!(view.expense_form.generation, 2);
        assert_eq!(view.savings_form, FormReset::default());
    }

    #[test]
    fn test_budget_form_render_bumps_generation() {
        let form = BudgetFormView { inputs: Vec::new() };
        let view = reduce(AppView::default(), AppAction::BudgetForm(form.clone()));
        let view = reduce(view, AppAction::BudgetForm(form.clone()));

        assert_eq!(view.budget_form, Some(form));
        assert_eq!(view.budget_generation, 2);
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let view = reduce(
            AppView::default(),
            AppAction::PushToast(Toast {
                id: 1,
                notification: Notification::success("Expense added successfully"),
            }),
        );
        let view = reduce(
            view,
            AppAction::PushToast(Toast {
                id: 2,
                notification: Notification::error("Error loading expenses"),
            }),
        );

        let view = reduce(view, AppAction::DismissToast(1));

        assert_eq!(view.toasts.len(), 1);
        assert_eq!(view.toasts[0].id, 2);
        assert_eq!(view.toasts[0].notification.level, NotificationLevel::Error);
    }

    #[test]
    fn test_report_can_be_hidden_again() {
        let view = reduce(AppView::default(), AppAction::Report(None));
        assert_eq!(view.report, None);

        let view = reduce(view, AppAction::ShowTab(Tab::Reports));
        assert_eq!(view.active_tab, Tab::Reports);
    }

    #[test]
    fn test_goal_controls_stay_enabled() {
        let view = reduce(AppView::default(), AppAction::EnableGoalControls);
        let view = reduce(view, AppAction::Goals(GoalListView::from_goals(&[], true)));

        assert!(view.goal_controls);
        assert_eq!(view.goals.map(|g| g.archived), Some(true));
    }
}
