use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    /// Signed-in username, once known
    pub greeting: Option<String>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"💰 Personal Finance Tracker"}</h1>
                <div class="header-right">
                    {if let Some(username) = &props.greeting {
                        html! { <span class="greeting">{format!("Hi, {}", username)}</span> }
                    } else {
                        html! {}
                    }}
                </div>
            </div>
        </header>
    }
}
