mod components;
mod coordinator;
mod hooks;
mod services;
#[cfg(test)]
mod test_support;

use yew::prelude::*;

use components::budget_setup::BudgetPanel;
use components::dashboard::DashboardPanel;
use components::dialog_modal::DialogModal;
use components::expenses::ExpensesPanel;
use components::header::Header;
use components::notifications::ToastStack;
use components::reports::ReportsPanel;
use components::savings::SavingsPanel;
use components::tab_bar::TabBar;
use components::visualizations::VisualizationsPanel;
use coordinator::state::Tab;
use hooks::use_view_coordinator::{use_view_coordinator, UseViewCoordinatorResult};
use services::{logging, AppConfig};

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AppConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let UseViewCoordinatorResult {
        view,
        coordinator,
        on_dialog_answer,
    } = use_view_coordinator(&props.config);

    let on_select_tab = {
        let coordinator = coordinator.clone();
        Callback::from(move |tab: Tab| {
            coordinator.spawn(move |c| async move {
                c.activate_tab(tab).await;
            });
        })
    };

    let active = view.active_tab;

    html! {
        <>
            <Header greeting={view.greeting.clone()} />
            <main class="container">
                <TabBar active={active} on_select={on_select_tab} />
                <ExpensesPanel
                    active={active == Tab::Expenses}
                    coordinator={coordinator.clone()}
                    list={view.expenses.clone()}
                    form={view.expense_form.clone()}
                />
                <DashboardPanel
                    active={active == Tab::Dashboard}
                    view={view.dashboard.clone()}
                />
                <BudgetPanel
                    active={active == Tab::Budget}
                    coordinator={coordinator.clone()}
                    form={view.budget_form.clone()}
                    generation={view.budget_generation}
                    learning_period={view.learning_period.clone()}
                />
                <SavingsPanel
                    active={active == Tab::Savings}
                    coordinator={coordinator.clone()}
                    list={view.savings.clone()}
                    form={view.savings_form.clone()}
                    goal_controls={view.goal_controls}
                    goals={view.goals.clone()}
                />
                <ReportsPanel
                    active={active == Tab::Reports}
                    coordinator={coordinator.clone()}
                    months={view.report_months.clone()}
                    report={view.report.clone()}
                />
                <VisualizationsPanel
                    active={active == Tab::Visualizations}
                    coordinator={coordinator}
                />
            </main>
            <ToastStack toasts={view.toasts.clone()} />
            <DialogModal dialog={view.dialog.clone()} on_answer={on_dialog_answer} />
        </>
    }
}

fn main() {
    logging::init(log::LevelFilter::Info);
    let config = AppConfig::load();
    log::set_max_level(config.level_filter());
    log::info!(target: "app", "starting on the {} tab", config.initial_tab.label());

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
