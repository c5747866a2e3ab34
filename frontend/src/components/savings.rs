use web_sys::HtmlFormElement;
use yew::prelude::*;

use super::goal_list::GoalList;
use super::{form_field, form_values, panel_classes};
use crate::coordinator::forms::SavingsForm;
use crate::coordinator::state::Tab;
use crate::coordinator::view_models::{GoalListView, SavingsListView};
use crate::coordinator::EntityKind;
use crate::hooks::use_view_coordinator::{CoordinatorHandle, FormReset};

#[derive(Properties, PartialEq)]
pub struct SavingsPanelProps {
    pub active: bool,
    pub coordinator: CoordinatorHandle,
    pub list: Option<SavingsListView>,
    pub form: FormReset,
    pub goal_controls: bool,
    pub goals: Option<GoalListView>,
}

#[function_component(SavingsPanel)]
pub fn savings_panel(props: &SavingsPanelProps) -> Html {
    html! {
        <section id={Tab::Savings.panel_id()} class={panel_classes(props.active)}>
            <div class="savings-layout">
                <div class="savings-column">
                    <SavingsEntryForm
                        key={props.form.generation.to_string()}
                        coordinator={props.coordinator.clone()}
                        default_date={props.form.date.clone()}
                    />
                    <SavingsList coordinator={props.coordinator.clone()} list={props.list.clone()} />
                </div>
                <div class="goals-column">
                    <GoalList
                        coordinator={props.coordinator.clone()}
                        controls_enabled={props.goal_controls}
                        goals={props.goals.clone()}
                    />
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SavingsEntryFormProps {
    coordinator: CoordinatorHandle,
    default_date: String,
}

#[function_component(SavingsEntryForm)]
fn savings_entry_form(props: &SavingsEntryFormProps) -> Html {
    let onsubmit = {
        let coordinator = props.coordinator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: HtmlFormElement = e.target_unchecked_into();
            let Some(data) = form_values(&form) else {
                return;
            };

            let entry = SavingsForm {
                date: form_field(&data, "date"),
                amount: form_field(&data, "amount"),
                description: form_field(&data, "description"),
            };
            coordinator.spawn(move |c| async move { c.submit_savings(entry).await });
        })
    };

    html! {
        <form class="card savings-form" {onsubmit}>
            <h2>{"Record Savings"}</h2>
            <div class="form-row">
                <div class="form-group">
                    <label for="savings-date">{"Date"}</label>
                    <input type="date" id="savings-date" name="date" value={props.default_date.clone()} required=true />
                </div>
                <div class="form-group">
                    <label for="savings-amount">{"Amount"}</label>
                    <input type="number" id="savings-amount" name="amount" step="0.01" min="0" placeholder="0.00" required=true />
                </div>
            </div>
            <div class="form-group">
                <label for="savings-description">{"Description"}</label>
                <input type="text" id="savings-description" name="description" placeholder="Optional" />
            </div>
            <button type="submit" class="btn btn-primary">{"Add Savings"}</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct SavingsListProps {
    coordinator: CoordinatorHandle,
    list: Option<SavingsListView>,
}

#[function_component(SavingsList)]
fn savings_list(props: &SavingsListProps) -> Html {
    let Some(list) = &props.list else {
        return html! { <div class="card loading">{"Loading..."}</div> };
    };

    if list.rows.is_empty() {
        return html! {
            <div class="card empty-state">{SavingsListView::EMPTY_MESSAGE}</div>
        };
    }

    html! {
        <div class="card savings-list">
            {for list.rows.iter().map(|row| {
                let on_delete = {
                    let coordinator = props.coordinator.clone();
                    let id = row.id;
                    Callback::from(move |_: MouseEvent| {
                        coordinator.spawn(move |c| async move {
                            c.delete_entity(EntityKind::Savings, id).await
                        });
                    })
                };
                html! {
                    <div class="savings-item" key={row.id.to_string()}>
                        <div class="savings-info">
                            <span class="savings-amount">{&row.amount}</span>
                            <span class="savings-date">{&row.date}</span>
                            {if let Some(description) = &row.description {
                                html! { <span class="savings-description">{description}</span> }
                            } else {
                                html! {}
                            }}
                        </div>
                        <button type="button" class="btn btn-danger btn-small" onclick={on_delete}>
                            {"Delete"}
                        </button>
                    </div>
                }
            })}
        </div>
    }
}
