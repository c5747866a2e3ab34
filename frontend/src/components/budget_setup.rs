use std::collections::BTreeMap;

use shared::Category;
use web_sys::HtmlFormElement;
use yew::prelude::*;

use super::{form_field, form_values, panel_classes};
use crate::coordinator::state::Tab;
use crate::coordinator::view_models::{BudgetFormView, LearningPeriodView};
use crate::hooks::use_view_coordinator::CoordinatorHandle;

#[derive(Properties, PartialEq)]
pub struct BudgetPanelProps {
    pub active: bool,
    pub coordinator: CoordinatorHandle,
    pub form: Option<BudgetFormView>,
    pub generation: u32,
    pub learning_period: Option<LearningPeriodView>,
}

#[function_component(BudgetPanel)]
pub fn budget_panel(props: &BudgetPanelProps) -> Html {
    html! {
        <section id={Tab::Budget.panel_id()} class={panel_classes(props.active)}>
            {if let Some(view) = &props.learning_period {
                html! { <LearningPeriodBanner coordinator={props.coordinator.clone()} view={view.clone()} /> }
            } else {
                html! {}
            }}
            {match &props.form {
                None => html! { <div class="card loading">{"Loading..."}</div> },
                Some(form) => html! {
                    <BudgetForm
                        key={props.generation.to_string()}
                        coordinator={props.coordinator.clone()}
                        form={form.clone()}
                    />
                },
            }}
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct BudgetFormProps {
    coordinator: CoordinatorHandle,
    form: BudgetFormView,
}

#[function_component(BudgetForm)]
fn budget_form(props: &BudgetFormProps) -> Html {
    let onsubmit = {
        let coordinator = props.coordinator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: HtmlFormElement = e.target_unchecked_into();
            let Some(data) = form_values(&form) else {
                return;
            };

            let inputs: BTreeMap<Category, String> = Category::ALL
                .iter()
                .map(|&category| (category, form_field(&data, category.as_str())))
                .collect();
            coordinator.spawn(move |c| async move { c.save_budget(&inputs).await });
        })
    };

    html! {
        <form class="card budget-form" {onsubmit}>
            <h2>{"Monthly Budget"}</h2>
            <div class="budget-grid">
                {for props.form.inputs.iter().map(|input| {
                    let id = format!("budget-{}", input.category.as_str().to_lowercase().replace(' ', "-"));
                    html! {
                        <div class="form-group">
                            <label for={id.clone()}>{input.category.as_str()}</label>
                            <input
                                type="number"
                                id={id}
                                name={input.category.as_str()}
                                value={input.value.clone()}
                                step="0.01"
                                min="0"
                            />
                        </div>
                    }
                })}
            </div>
            <button type="submit" class="btn btn-primary">{"Save Budget"}</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct LearningPeriodBannerProps {
    coordinator: CoordinatorHandle,
    view: LearningPeriodView,
}

#[function_component(LearningPeriodBanner)]
fn learning_period_banner(props: &LearningPeriodBannerProps) -> Html {
    let on_apply = {
        let coordinator = props.coordinator.clone();
        Callback::from(move |_: MouseEvent| coordinator.get().apply_suggested_budgets())
    };

    let details = match &props.view {
        LearningPeriodView::InProgress { .. } => html! {
            <p>{"Keep logging expenses. Suggested budgets appear once the learning period is over."}</p>
        },
        LearningPeriodView::Complete {
            insights,
            has_suggestions,
            ..
        } => html! {
            <>
                <ul class="insights">
                    {for insights.iter().map(|insight| html! { <li>{insight}</li> })}
                </ul>
                {if *has_suggestions {
                    html! {
                        <button type="button" class="btn btn-secondary" onclick={on_apply}>
                            {"Apply Suggested Budgets"}
                        </button>
                    }
                } else {
                    html! {}
                }}
            </>
        },
    };

    html! {
        <div class="card learning-banner">
            <h3>{props.view.headline()}</h3>
            {details}
        </div>
    }
}
