use yew::prelude::*;

use super::panel_classes;
use crate::coordinator::state::Tab;
use crate::coordinator::view_models::{CategoryProgressView, DashboardView};

#[derive(Properties, PartialEq)]
pub struct DashboardPanelProps {
    pub active: bool,
    pub view: Option<DashboardView>,
}

#[function_component(DashboardPanel)]
pub fn dashboard_panel(props: &DashboardPanelProps) -> Html {
    html! {
        <section id={Tab::Dashboard.panel_id()} class={panel_classes(props.active)}>
            {match &props.view {
                None => html! { <div class="card loading">{"Loading..."}</div> },
                Some(view) => dashboard_body(view),
            }}
        </section>
    }
}

fn dashboard_body(view: &DashboardView) -> Html {
    html! {
        <>
            {if view.in_learning_period {
                html! {
                    <div class="card learning-note">
                        {"📊 Still learning your spending habits. Budgets will be suggested when the learning period ends."}
                    </div>
                }
            } else {
                html! {}
            }}
            <div class="summary-cards">
                <div class="summary-card">
                    <span class="summary-label">{"Total Budget"}</span>
                    <span class="summary-value">{&view.total_budget}</span>
                </div>
                <div class="summary-card">
                    <span class="summary-label">{"Total Spent"}</span>
                    <span class="summary-value">{&view.total_spent}</span>
                </div>
                <div class="summary-card">
                    <span class="summary-label">{"Remaining"}</span>
                    <span class="summary-value">{&view.total_remaining}</span>
                </div>
            </div>
            <div class="card">
                <h2>{"This Month by Category"}</h2>
                {if view.shows_no_budget_message() {
                    html! {
                        <p class="empty-state">
                            {"No budgets set yet. Set them up in the Budget Setup tab."}
                        </p>
                    }
                } else {
                    html! { <>{for view.categories.iter().map(category_progress)}</> }
                }}
            </div>
        </>
    }
}

fn category_progress(row: &CategoryProgressView) -> Html {
    html! {
        <div class={classes!("category-progress", row.status_class)}>
            <div class="category-progress-header">
                <span class="category-name">{&row.category}</span>
                <span class="category-amounts">{&row.amount_summary}</span>
            </div>
            <div class="progress-bar">
                <div class="progress-fill" style={format!("width: {:.1}%", row.fill_percent)}></div>
            </div>
            <div class="category-progress-footer">
                <span>{&row.used_label}</span>
                <span>{&row.remaining_label}</span>
            </div>
        </div>
    }
}
