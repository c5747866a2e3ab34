use web_sys::{HtmlFormElement, MouseEvent};
use yew::prelude::*;

use super::{form_field, form_values};
use crate::coordinator::ports::{ConfirmRequest, FieldKind, PromptRequest};
use crate::services::dialogs::{DialogAnswer, DialogView};

#[derive(Properties, PartialEq)]
pub struct DialogModalProps {
    pub dialog: Option<DialogView>,
    pub on_answer: Callback<DialogAnswer>,
}

fn prompt_field_name(index: usize) -> String {
    format!("field-{}", index)
}

#[function_component(DialogModal)]
pub fn dialog_modal(props: &DialogModalProps) -> Html {
    let Some(dialog) = &props.dialog else {
        return html! {};
    };

    let on_backdrop_click = {
        let on_answer = props.on_answer.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_answer.emit(DialogAnswer::Cancelled);
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = {
        let on_answer = props.on_answer.clone();
        Callback::from(move |_: MouseEvent| on_answer.emit(DialogAnswer::Cancelled))
    };

    let body = match dialog {
        DialogView::Confirm(request) => confirm_body(request, &props.on_answer, on_cancel),
        DialogView::Prompt(request) => prompt_body(request, &props.on_answer, on_cancel),
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                {body}
            </div>
        </div>
    }
}

fn confirm_body(
    request: &ConfirmRequest,
    on_answer: &Callback<DialogAnswer>,
    on_cancel: Callback<MouseEvent>,
) -> Html {
    let on_confirm = {
        let on_answer = on_answer.clone();
        Callback::from(move |_: MouseEvent| on_answer.emit(DialogAnswer::Confirmed))
    };

    html! {
        <div class="modal-content">
            <h3 class="modal-title">{&request.title}</h3>
            <p class="modal-message">{&request.message}</p>
            <div class="modal-buttons">
                <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                    {"Cancel"}
                </button>
                <button type="button" class="btn btn-danger" onclick={on_confirm}>
                    {&request.confirm_label}
                </button>
            </div>
        </div>
    }
}

fn prompt_body(
    request: &PromptRequest,
    on_answer: &Callback<DialogAnswer>,
    on_cancel: Callback<MouseEvent>,
) -> Html {
    let onsubmit = {
        let on_answer = on_answer.clone();
        let field_count = request.fields.len();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: HtmlFormElement = e.target_unchecked_into();
            let Some(data) = form_values(&form) else {
                return;
            };
            let values = (0..field_count)
                .map(|index| form_field(&data, &prompt_field_name(index)))
                .collect();
            on_answer.emit(DialogAnswer::Submitted(values));
        })
    };

    html! {
        <form class="modal-content" {onsubmit}>
            <h3 class="modal-title">{&request.title}</h3>
            {for request.fields.iter().enumerate().map(|(index, field)| {
                let name = prompt_field_name(index);
                html! {
                    <div class="form-group">
                        <label for={name.clone()}>{&field.label}</label>
                        {match field.kind {
                            FieldKind::Text => html! {
                                <input type="text" id={name.clone()} name={name} />
                            },
                            FieldKind::Amount => html! {
                                <input type="number" id={name.clone()} name={name} step="0.01" min="0" />
                            },
                        }}
                    </div>
                }
            })}
            <div class="modal-buttons">
                <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                    {"Cancel"}
                </button>
                <button type="submit" class="btn btn-primary">{"OK"}</button>
            </div>
        </form>
    }
}
