use yew::prelude::*;

use super::{input_text, panel_classes};
use crate::coordinator::state::{ChartSlot, Tab};
use crate::hooks::use_view_coordinator::CoordinatorHandle;

const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 350;

#[derive(Properties, PartialEq)]
pub struct VisualizationsPanelProps {
    pub active: bool,
    pub coordinator: CoordinatorHandle,
}

/// Canvases stay mounted; the coordinator paints into them by id
#[function_component(VisualizationsPanel)]
pub fn visualizations_panel(props: &VisualizationsPanelProps) -> Html {
    let start_ref = use_node_ref();
    let end_ref = use_node_ref();

    let on_apply = {
        let coordinator = props.coordinator.clone();
        let start_ref = start_ref.clone();
        let end_ref = end_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let start = input_text(&start_ref);
            let end = input_text(&end_ref);
            coordinator.spawn(move |c| async move {
                c.refresh_category_breakdown(&start, &end).await
            });
        })
    };

    html! {
        <section id={Tab::Visualizations.panel_id()} class={panel_classes(props.active)}>
            {for ChartSlot::ALL.iter().map(|&slot| html! {
                <div class="card chart-card">
                    <h2>{slot.title()}</h2>
                    {if slot == ChartSlot::CategoryBreakdown {
                        html! {
                            <div class="filter-bar">
                                <label for="viz-start">{"From"}</label>
                                <input type="date" id="viz-start" ref={start_ref.clone()} />
                                <label for="viz-end">{"To"}</label>
                                <input type="date" id="viz-end" ref={end_ref.clone()} />
                                <button type="button" class="btn btn-secondary" onclick={on_apply.clone()}>
                                    {"Apply"}
                                </button>
                            </div>
                        }
                    } else {
                        html! {}
                    }}
                    <canvas
                        id={slot.canvas_id()}
                        width={CANVAS_WIDTH.to_string()}
                        height={CANVAS_HEIGHT.to_string()}
                    />
                </div>
            })}
        </section>
    }
}
