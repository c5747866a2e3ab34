use shared::Category;
use web_sys::{HtmlFormElement, HtmlInputElement};
use yew::prelude::*;

use super::{form_field, form_values, input_text, panel_classes};
use crate::coordinator::forms::ExpenseForm;
use crate::coordinator::state::Tab;
use crate::coordinator::view_models::ExpenseListView;
use crate::coordinator::EntityKind;
use crate::hooks::use_view_coordinator::{CoordinatorHandle, FormReset};

#[derive(Properties, PartialEq)]
pub struct ExpensesPanelProps {
    pub active: bool,
    pub coordinator: CoordinatorHandle,
    pub list: Option<ExpenseListView>,
    pub form: FormReset,
}

#[function_component(ExpensesPanel)]
pub fn expenses_panel(props: &ExpensesPanelProps) -> Html {
    html! {
        <section id={Tab::Expenses.panel_id()} class={panel_classes(props.active)}>
            <ExpenseEntryForm
                key={props.form.generation.to_string()}
                coordinator={props.coordinator.clone()}
                default_date={props.form.date.clone()}
            />
            <ExpenseFilter coordinator={props.coordinator.clone()} />
            <ExpenseList coordinator={props.coordinator.clone()} list={props.list.clone()} />
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ExpenseEntryFormProps {
    coordinator: CoordinatorHandle,
    default_date: String,
}

/// Uncontrolled form; the parent remounts it to clear the inputs
#[function_component(ExpenseEntryForm)]
fn expense_entry_form(props: &ExpenseEntryFormProps) -> Html {
    let onsubmit = {
        let coordinator = props.coordinator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: HtmlFormElement = e.target_unchecked_into();
            let Some(data) = form_values(&form) else {
                return;
            };

            let expense = ExpenseForm {
                date: form_field(&data, "date"),
                category: form_field(&data, "category"),
                amount: form_field(&data, "amount"),
                description: form_field(&data, "description"),
            };
            coordinator.spawn(move |c| async move { c.submit_expense(expense).await });
        })
    };

    html! {
        <form class="card expense-form" {onsubmit}>
            <h2>{"Add Expense"}</h2>
            <div class="form-row">
                <div class="form-group">
                    <label for="expense-date">{"Date"}</label>
                    <input type="date" id="expense-date" name="date" value={props.default_date.clone()} required=true />
                </div>
                <div class="form-group">
                    <label for="expense-category">{"Category"}</label>
                    <select id="expense-category" name="category" required=true>
                        <option value="" selected=true>{"Select category"}</option>
                        {for Category::ALL.iter().map(|category| html! {
                            <option value={category.as_str()}>{category.as_str()}</option>
                        })}
                    </select>
                </div>
                <div class="form-group">
                    <label for="expense-amount">{"Amount"}</label>
                    <input type="number" id="expense-amount" name="amount" step="0.01" min="0" placeholder="0.00" required=true />
                </div>
            </div>
            <div class="form-group">
                <label for="expense-description">{"Description"}</label>
                <input type="text" id="expense-description" name="description" placeholder="Optional" />
            </div>
            <button type="submit" class="btn btn-primary">{"Add Expense"}</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct ExpenseFilterProps {
    coordinator: CoordinatorHandle,
}

#[function_component(ExpenseFilter)]
fn expense_filter(props: &ExpenseFilterProps) -> Html {
    let start_ref = use_node_ref();
    let end_ref = use_node_ref();

    let on_filter = {
        let coordinator = props.coordinator.clone();
        let start_ref = start_ref.clone();
        let end_ref = end_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let start = input_text(&start_ref);
            let end = input_text(&end_ref);
            coordinator.spawn(move |c| async move { c.filter_expenses(&start, &end).await });
        })
    };

    let on_clear = {
        let coordinator = props.coordinator.clone();
        let start_ref = start_ref.clone();
        let end_ref = end_ref.clone();
        Callback::from(move |_: MouseEvent| {
            for node in [&start_ref, &end_ref] {
                if let Some(input) = node.cast::<HtmlInputElement>() {
                    input.set_value("");
                }
            }
            coordinator.spawn(|c| async move { c.clear_expense_filter().await });
        })
    };

    html! {
        <div class="card filter-bar">
            <label for="filter-start">{"From"}</label>
            <input type="date" id="filter-start" ref={start_ref} />
            <label for="filter-end">{"To"}</label>
            <input type="date" id="filter-end" ref={end_ref} />
            <button type="button" class="btn btn-secondary" onclick={on_filter}>{"Filter"}</button>
            <button type="button" class="btn btn-link" onclick={on_clear}>{"Clear"}</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ExpenseListProps {
    coordinator: CoordinatorHandle,
    list: Option<ExpenseListView>,
}

#[function_component(ExpenseList)]
fn expense_list(props: &ExpenseListProps) -> Html {
    let Some(list) = &props.list else {
        return html! { <div class="card loading">{"Loading..."}</div> };
    };

    if list.rows.is_empty() {
        return html! {
            <div class="card empty-state">{ExpenseListView::EMPTY_MESSAGE}</div>
        };
    }

    html! {
        <div class="card">
            <table class="expense-table">
                <thead>
                    <tr>
                        <th>{"Date"}</th>
                        <th>{"Category"}</th>
                        <th>{"Description"}</th>
                        <th class="amount">{"Amount"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {for list.rows.iter().map(|row| {
                        let on_delete = {
                            let coordinator = props.coordinator.clone();
                            let id = row.id;
                            Callback::from(move |_: MouseEvent| {
                                coordinator.spawn(move |c| async move {
                                    c.delete_entity(EntityKind::Expense, id).await
                                });
                            })
                        };
                        html! {
                            <tr key={row.id.to_string()}>
                                <td>{&row.date}</td>
                                <td><span class="category-tag">{&row.category}</span></td>
                                <td>{&row.description}</td>
                                <td class="amount">{&row.amount}</td>
                                <td>
                                    <button type="button" class="btn btn-danger btn-small" onclick={on_delete}>
                                        {"Delete"}
                                    </button>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}
