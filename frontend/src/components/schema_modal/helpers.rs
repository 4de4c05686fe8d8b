use serde_json::Value;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlOptionElement, HtmlSelectElement};
use yew::prelude::*;

pub use crate::components::helpers::display_value as as_text;

pub fn input_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn checkbox_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlInputElement>().checked().to_string()
}

pub fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

/// Selected options of a `<select multiple>`, in document order.
pub fn multi_select_value(e: &Event) -> Vec<String> {
    let options = e.target_unchecked_into::<HtmlSelectElement>().selected_options();
    (0..options.length())
        .filter_map(|i| options.item(i))
        .filter_map(|element| element.dyn_into::<HtmlOptionElement>().ok())
        .map(|option| option.value())
        .collect()
}

pub fn is_selected(value: Option<&Value>, option: &str) -> bool {
    match value {
        Some(Value::Array(items)) => items.iter().any(|item| as_text(Some(item)) == option),
        other => as_text(other) == option,
    }
}
