use yew::prelude::*;

use crate::coordinator::view_models::{GoalAction, GoalActions, GoalItemView, GoalListView};
use crate::coordinator::EntityKind;
use crate::hooks::use_view_coordinator::CoordinatorHandle;

#[derive(Properties, PartialEq)]
pub struct GoalListProps {
    pub coordinator: CoordinatorHandle,
    /// False until the savings tab has been opened once
    pub controls_enabled: bool,
    pub goals: Option<GoalListView>,
}

#[function_component(GoalList)]
pub fn goal_list(props: &GoalListProps) -> Html {
    let on_new_goal = {
        let coordinator = props.coordinator.clone();
        Callback::from(move |_: MouseEvent| {
            coordinator.spawn(|c| async move { c.create_goal().await });
        })
    };

    let on_toggle = {
        let coordinator = props.coordinator.clone();
        Callback::from(move |_: MouseEvent| {
            coordinator.spawn(|c| async move {
                c.toggle_archived_goals().await;
            });
        })
    };

    let toggle_label = props
        .goals
        .as_ref()
        .map(GoalListView::toggle_label)
        .unwrap_or("View Archived Goals");

    html! {
        <div class="card goals">
            <div class="goals-header">
                <h2>{"🎯 Savings Goals"}</h2>
                {if props.controls_enabled {
                    html! {
                        <div class="goals-controls">
                            <button type="button" class="btn btn-link" onclick={on_toggle}>
                                {toggle_label}
                            </button>
                            <button type="button" class="btn btn-primary" onclick={on_new_goal}>
                                {"+ New Goal"}
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }}
            </div>
            {match &props.goals {
                None => html! { <div class="loading">{"Loading..."}</div> },
                Some(list) if list.items.is_empty() => html! {
                    <p class="empty-state">{list.empty_message()}</p>
                },
                Some(list) => html! {
                    <>
                        {for list.items.iter().map(|item| html! {
                            <GoalItem
                                key={item.id.to_string()}
                                coordinator={props.coordinator.clone()}
                                item={item.clone()}
                            />
                        })}
                    </>
                },
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct GoalItemProps {
    coordinator: CoordinatorHandle,
    item: GoalItemView,
}

#[function_component(GoalItem)]
fn goal_item(props: &GoalItemProps) -> Html {
    let item = &props.item;

    let action_button = |action: GoalAction| {
        let coordinator = props.coordinator.clone();
        let id = item.id;
        let name = item.name.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            let name = name.clone();
            match action {
                GoalAction::AddMoney => coordinator
                    .spawn(move |c| async move { c.contribute_to_goal(id, &name).await }),
                GoalAction::Archive => {
                    coordinator.spawn(move |c| async move { c.archive_goal(id).await })
                }
                GoalAction::Delete => coordinator
                    .spawn(move |c| async move { c.delete_entity(EntityKind::Goal, id).await }),
            }
        });
        let class = match action {
            GoalAction::AddMoney => "btn btn-primary btn-small",
            GoalAction::Archive => "btn btn-secondary btn-small",
            GoalAction::Delete => "btn btn-danger btn-small",
        };
        html! { <button type="button" {class} {onclick}>{action.label()}</button> }
    };

    html! {
        <div class={classes!("goal-item", item.completed.then_some("completed"))}>
            <div class="goal-header">
                <span class="goal-name">{&item.name}</span>
                <span class="goal-amounts">{&item.amount_summary}</span>
            </div>
            <div class="progress-bar">
                <div class="progress-fill" style={format!("width: {:.1}%", item.progress_percent)}></div>
            </div>
            <div class="goal-footer">
                <span class="goal-progress">{&item.progress_label}</span>
                {match &item.actions {
                    GoalActions::Archived { archived_on } => html! {
                        <span class="goal-archived">{format!("Archived {}", archived_on)}</span>
                    },
                    GoalActions::Active => html! {
                        <div class="goal-actions">
                            {for item.actions.available().iter().map(|&action| action_button(action))}
                        </div>
                    },
                }}
            </div>
        </div>
    }
}
