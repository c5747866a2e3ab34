use yew::prelude::*;

use crate::coordinator::state::Tab;

#[derive(Properties, PartialEq)]
pub struct TabBarProps {
    pub active: Tab,
    pub on_select: Callback<Tab>,
}

#[function_component(TabBar)]
pub fn tab_bar(props: &TabBarProps) -> Html {
    html! {
        <nav class="tabs">
            {for Tab::ALL.iter().map(|&tab| {
                let onclick = {
                    let on_select = props.on_select.clone();
                    Callback::from(move |_: MouseEvent| on_select.emit(tab))
                };
                html! {
                    <button
                        type="button"
                        class={classes!("tab", (tab == props.active).then_some("active"))}
                        data-tab={tab.panel_id()}
                        {onclick}
                    >
                        {tab.label()}
                    </button>
                }
            })}
        </nav>
    }
}
