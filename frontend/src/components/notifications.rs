use yew::prelude::*;

use crate::hooks::use_view_coordinator::Toast;

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
}

/// Newest toast at the bottom; each one removes itself on a timer
#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="notifications">
            {for props.toasts.iter().map(|toast| html! {
                <div
                    key={toast.id.to_string()}
                    class={classes!("notification", toast.notification.level.css_class())}
                >
                    {&toast.notification.message}
                </div>
            })}
        </div>
    }
}
