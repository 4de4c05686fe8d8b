use common::form::{FormField, ModalState};

/// Yew host for a [`ModalState`]. All form logic lives in the state machine;
/// this struct only adds the lookups the view needs.
pub struct SchemaModal<F> {
    pub modal: ModalState<F>,
}

impl<F: common::form::family::FormFamily> SchemaModal<F> {
    pub fn new(family: F) -> Self {
        Self {
            modal: ModalState::new(family),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.modal.fields().iter().find(|field| field.name == name)
    }

    /// Current tags of an array field, as strings.
    pub fn tags(&self, name: &str) -> Vec<String> {
        self.modal
            .values()
            .get(name)
            .and_then(|value| value.as_array())
            .map(|items| items.iter().map(|item| super::helpers::as_text(Some(item))).collect())
            .unwrap_or_default()
    }
}
