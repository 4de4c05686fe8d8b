use common::form::ModalEvent;

pub enum Msg {
    /// Forwarded to the modal state machine as is.
    Modal(ModalEvent),
    /// Raw control text; coerced by the field's widget.
    Input { name: String, raw: String },
    /// Options picked in a multi-select.
    Select { name: String, picked: Vec<String> },
    AddTag { name: String, tag: String },
    RemoveTag { name: String, index: usize },
}
