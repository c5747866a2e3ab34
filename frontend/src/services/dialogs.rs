use std::cell::RefCell;

use async_trait::async_trait;
use tokio::sync::oneshot;
use yew::Callback;

use crate::coordinator::ports::{ConfirmRequest, Dialogs, PromptRequest};

/// What the modal component should display
#[derive(Debug, Clone, PartialEq)]
pub enum DialogView {
    Confirm(ConfirmRequest),
    Prompt(PromptRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogAnswer {
    Confirmed,
    Submitted(Vec<String>),
    Cancelled,
}

/// Dialogs drawn by the in-page modal.
///
/// Each request waits on its own oneshot channel. Opening a new dialog drops
/// the previous sender, so an abandoned request resolves as cancelled.
pub struct ModalDialogs {
    show: Callback<Option<DialogView>>,
    pending: RefCell<Option<oneshot::Sender<DialogAnswer>>>,
}

impl ModalDialogs {
    /// `show` receives the dialog to render, or `None` to close it
    pub fn new(show: Callback<Option<DialogView>>) -> Self {
        Self {
            show,
            pending: RefCell::new(None),
        }
    }

    /// Called by the modal's buttons
    pub fn resolve(&self, answer: DialogAnswer) {
        let sender = self.pending.borrow_mut().take();
        self.show.emit(None);

        match sender {
            Some(sender) => {
                if sender.send(answer).is_err() {
                    log::debug!(target: "dialogs", "answer arrived after the request was dropped");
                }
            }
            None => log::debug!(target: "dialogs", "no dialog waiting for an answer"),
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.borrow().is_some()
    }

    async fn ask(&self, view: DialogView) -> DialogAnswer {
        let (sender, receiver) = oneshot::channel();
        if self.pending.borrow_mut().replace(sender).is_some() {
            log::debug!(target: "dialogs", "replacing an unanswered dialog");
        }
        self.show.emit(Some(view));

        receiver.await.unwrap_or(DialogAnswer::Cancelled)
    }
}

#[async_trait(?Send)]
impl Dialogs for ModalDialogs {
    async fn confirm(&self, request: ConfirmRequest) -> bool {
        matches!(
            self.ask(DialogView::Confirm(request)).await,
            DialogAnswer::Confirmed
        )
    }

    async fn prompt(&self, request: PromptRequest) -> Option<Vec<String>> {
        match self.ask(DialogView::Prompt(request)).await {
            DialogAnswer::Submitted(values) => Some(values),
            DialogAnswer::Confirmed | DialogAnswer::Cancelled => None,
        }
    }
}

/// `window.confirm` / `window.prompt`; one browser prompt per field
pub struct NativeDialogs;

#[async_trait(?Send)]
impl Dialogs for NativeDialogs {
    async fn confirm(&self, request: ConfirmRequest) -> bool {
        gloo::dialogs::confirm(&format!("{}\n\n{}", request.title, request.message))
    }

    async fn prompt(&self, request: PromptRequest) -> Option<Vec<String>> {
        request
            .fields
            .iter()
            .map(|field| gloo::dialogs::prompt(&field.label, None))
            .collect()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::coordinator::ports::FieldKind;
    use std::rc::Rc;

    fn recording_modal() -> (Rc<ModalDialogs>, Rc<RefCell<Vec<Option<DialogView>>>>) {
        let shown = Rc::new(RefCell::new(Vec::new()));
        let show = {
            let shown = shown.clone();
            Callback::from(move |view: Option<DialogView>| shown.borrow_mut().push(view))
        };
        (Rc::new(ModalDialogs::new(show)), shown)
    }

    fn delete_request() -> ConfirmRequest {
        ConfirmRequest::new("Delete Expense?", "Really?", "Delete")
    }

    #[tokio::test]
    async fn test_confirm_resolves_with_answer() {
        let (dialogs, shown) = recording_modal();

        let (confirmed, _) = tokio::join!(dialogs.confirm(delete_request()), async {
            tokio::task::yield_now().await;
            dialogs.resolve(DialogAnswer::Confirmed);
        });

        assert!(confirmed);
        assert!(!dialogs.is_open());
        assert_eq!(
            *shown.borrow(),
            vec![Some(DialogView::Confirm(delete_request())), None]
        );
    }

    #[tokio::test]
    async fn test_cancel_resolves_false() {
        let (dialogs, _) = recording_modal();

        let (confirmed, _) = tokio::join!(dialogs.confirm(delete_request()), async {
            tokio::task::yield_now().await;
            dialogs.resolve(DialogAnswer::Cancelled);
        });

        assert!(!confirmed);
    }

    #[tokio::test]
    async fn test_prompt_returns_submitted_values() {
        let (dialogs, _) = recording_modal();
        let request = PromptRequest::new("New Savings Goal")
            .field("What are you saving for?", FieldKind::Text)
            .field("Target amount ($):", FieldKind::Amount);

        let (values, _) = tokio::join!(dialogs.prompt(request), async {
            tokio::task::yield_now().await;
            dialogs.resolve(DialogAnswer::Submitted(vec![
                "Bike".to_string(),
                "500".to_string(),
            ]));
        });

        assert_eq!(values, Some(vec!["Bike".to_string(), "500".to_string()]));
    }

    #[tokio::test]
    async fn test_new_dialog_cancels_the_pending_one() {
        let (dialogs, _) = recording_modal();

        let (first, second, _) = tokio::join!(
            dialogs.confirm(delete_request()),
            async {
                tokio::task::yield_now().await;
                dialogs
                    .confirm(ConfirmRequest::new("Archive Goal?", "Sure?", "Archive"))
                    .await
            },
            async {
                tokio::task::yield_now().await;
                tokio::task::yield_now().await;
                dialogs.resolve(DialogAnswer::Confirmed);
            }
        );

        assert!(!first);
        assert!(second);
    }

    #[test]
    fn test_resolve_without_pending_dialog_only_closes() {
        let (dialogs, shown) = recording_modal();

        dialogs.resolve(DialogAnswer::Confirmed);

        assert_eq!(*shown.borrow(), vec![None]);
    }
}
