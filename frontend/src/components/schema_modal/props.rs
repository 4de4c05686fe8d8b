use common::form::family::ModalMode;
use yew::prelude::*;

use crate::api::Api;

#[derive(Properties, PartialEq)]
pub struct SchemaModalProps<F: PartialEq> {
    pub api: Api,
    /// The resource family rendered by this modal.
    pub family: F,
    /// `Some` opens the modal; the parent resets it from `on_close`.
    #[prop_or_default]
    pub mode: Option<ModalMode>,
    /// Fired once the record was saved and the modal has closed.
    #[prop_or_default]
    pub on_submitted: Callback<()>,
    #[prop_or_default]
    pub on_close: Callback<()>,
}
