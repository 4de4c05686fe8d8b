//! Small pieces shared by every screen: toasts and icon buttons.

use common::form::{Notice, NoticeLevel};
use serde_json::Value;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::prelude::*;

const TOAST_MS: u32 = 3000;

/// Displays a temporary notification at the bottom of the screen.
///
/// The element is injected straight into `<body>` so toasts survive the
/// component that raised them, e.g. a modal closing right after a failure.
pub fn show_toast(notice: &Notice) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(&notice.message));
    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    let background = match notice.level {
        NoticeLevel::Success => "#2e7d32",
        NoticeLevel::Info => "rgba(0, 0, 0, 0.8)",
        NoticeLevel::Error => "#c62828",
    };
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", background).ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("white-space", "pre-line").ok();

    if notice.level == NoticeLevel::Error {
        log::warn!("{}", notice.message);
    }

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// Material icon button with a tooltip.
pub fn icon_button(icon: &str, title: &str, onclick: Callback<MouseEvent>, disabled: bool) -> Html {
    html! {
        <button class="icon-btn" title={title.to_string()} {onclick} {disabled}>
            <span class="material-icons">{ icon }</span>
        </button>
    }
}

/// Text shown for a JSON value inside inputs and table cells.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Short date for tables: the `YYYY-MM-DD` prefix of an ISO timestamp.
pub fn short_date(date: Option<&str>) -> String {
    date.map(|d| d.chars().take(10).collect()).unwrap_or_default()
}
