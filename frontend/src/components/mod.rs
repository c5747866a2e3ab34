pub mod budget_setup;
pub mod dashboard;
pub mod dialog_modal;
pub mod expenses;
pub mod goal_list;
pub mod header;
pub mod notifications;
pub mod reports;
pub mod savings;
pub mod tab_bar;
pub mod visualizations;

use web_sys::{FormData, HtmlFormElement, HtmlInputElement};
use yew::{classes, Classes, NodeRef};

/// Panels stay mounted; only the active one is visible
pub(crate) fn panel_classes(active: bool) -> Classes {
    classes!("tab-content", active.then_some("active"))
}

pub(crate) fn form_values(form: &HtmlFormElement) -> Option<FormData> {
    match FormData::new_with_form(form) {
        Ok(data) => Some(data),
        Err(e) => {
            log::error!(target: "forms", "could not read form: {:?}", e);
            None
        }
    }
}

/// Missing fields read as empty
pub(crate) fn form_field(data: &FormData, name: &str) -> String {
    data.get(name).as_string().unwrap_or_default()
}

/// Current value of a text/date input, empty if the ref is not mounted
pub(crate) fn input_text(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}
