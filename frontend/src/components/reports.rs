use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::panel_classes;
use crate::coordinator::state::Tab;
use crate::coordinator::view_models::{ReportMonthsView, ReportView};
use crate::hooks::use_view_coordinator::CoordinatorHandle;

#[derive(Properties, PartialEq)]
pub struct ReportsPanelProps {
    pub active: bool,
    pub coordinator: CoordinatorHandle,
    pub months: ReportMonthsView,
    pub report: Option<ReportView>,
}

#[function_component(ReportsPanel)]
pub fn reports_panel(props: &ReportsPanelProps) -> Html {
    let onchange = {
        let coordinator = props.coordinator.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            let month = (!value.is_empty()).then_some(value);
            coordinator.spawn(move |c| async move { c.select_report_month(month).await });
        })
    };

    let selected = props.months.selected.as_deref();

    html! {
        <section id={Tab::Reports.panel_id()} class={panel_classes(props.active)}>
            <div class="card report-picker">
                <label for="report-month">{"Month"}</label>
                <select id="report-month" {onchange}>
                    <option value="" selected={selected.is_none()}>{"Select a month"}</option>
                    {for props.months.options.iter().map(|option| html! {
                        <option
                            value={option.value.clone()}
                            selected={selected == Some(option.value.as_str())}
                        >
                            {&option.label}
                        </option>
                    })}
                </select>
            </div>
            {if let Some(report) = &props.report {
                report_body(report)
            } else {
                html! {}
            }}
        </section>
    }
}

fn report_body(report: &ReportView) -> Html {
    let difference_label = if report.within_budget {
        format!("{} under budget", report.difference)
    } else {
        format!("{} over budget", report.difference)
    };

    html! {
        <div class="card report">
            <h2>{&report.month_label}</h2>
            <div class="summary-cards">
                <div class="summary-card">
                    <span class="summary-label">{"Budget"}</span>
                    <span class="summary-value">{&report.total_budget}</span>
                </div>
                <div class="summary-card">
                    <span class="summary-label">{"Spent"}</span>
                    <span class="summary-value">{&report.total_spent}</span>
                </div>
                <div class="summary-card">
                    <span class="summary-label">{"Saved"}</span>
                    <span class="summary-value">{&report.total_saved}</span>
                </div>
                <div class={classes!("summary-card", if report.within_budget { "good" } else { "over" })}>
                    <span class="summary-label">{"Difference"}</span>
                    <span class="summary-value">{difference_label}</span>
                </div>
            </div>
            {if report.categories.is_empty() {
                html! { <p class="empty-state">{ReportView::EMPTY_MESSAGE}</p> }
            } else {
                html! {
                    <table class="report-table">
                        <thead>
                            <tr>
                                <th>{"Category"}</th>
                                <th>{"Transactions"}</th>
                                <th class="amount">{"Budget"}</th>
                                <th class="amount">{"Spent"}</th>
                                <th class="amount">{"Variance"}</th>
                                <th class="amount">{"Used"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for report.categories.iter().map(|row| html! {
                                <tr class={row.status_class}>
                                    <td>{&row.category}</td>
                                    <td>{&row.transactions_label}</td>
                                    <td class="amount">{&row.budget}</td>
                                    <td class="amount">{&row.spent}</td>
                                    <td class={classes!("amount", if row.within_budget { "under" } else { "over" })}>
                                        {format!("{} {}", row.variance_label, row.variance_amount)}
                                    </td>
                                    <td class="amount">{&row.percent_label}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            }}
        </div>
    }
}
