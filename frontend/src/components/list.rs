//! Performs the effects of a [`ListState`](common::overview::ListState) for
//! any screen component.

use common::api::ApiRequest;
use common::overview::{ListCommand, ListEffect};
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::show_toast;
use crate::api::Api;

/// How a screen fetches and deletes its records.
pub struct ListRequests<D> {
    pub fetch: ApiRequest,
    pub delete: D,
}

pub fn run_list_effects<COMP, D, W>(
    link: &Scope<COMP>,
    api: &Api,
    requests: ListRequests<D>,
    effects: Vec<ListEffect>,
    wrap: W,
) where
    COMP: Component,
    D: Fn(&str) -> ApiRequest,
    W: Fn(ListCommand) -> COMP::Message + Copy + 'static,
{
    for effect in effects {
        match effect {
            ListEffect::Fetch { ticket } => {
                let (api, link, request) = (api.clone(), link.clone(), requests.fetch.clone());
                spawn_local(async move {
                    let response = api.execute(&request).await;
                    link.send_message(wrap(ListCommand::Loaded { ticket, response }));
                });
            }
            ListEffect::Delete { key } => {
                let (api, link, request) = (api.clone(), link.clone(), (requests.delete)(&key));
                spawn_local(async move {
                    let response = api.execute(&request).await;
                    link.send_message(wrap(ListCommand::Deleted { key, response }));
                });
            }
            ListEffect::Notify(notice) => show_toast(&notice),
        }
    }
}

/// Edit and delete buttons of a table row.
pub fn row_actions(onedit: Option<Callback<MouseEvent>>, ondelete: Callback<MouseEvent>) -> Html {
    html! {
        <td class="row-actions">
            { onedit.map(|cb| super::helpers::icon_button("edit", "Edit", cb, false)).unwrap_or_default() }
            { super::helpers::icon_button("delete", "Delete", ondelete, false) }
        </td>
    }
}

pub fn refresh_button<COMP, W>(link: &Scope<COMP>, wrap: W) -> Html
where
    COMP: Component,
    W: Fn(ListCommand) -> COMP::Message + 'static,
{
    super::helpers::icon_button("refresh", "Refresh", link.callback(move |_| wrap(ListCommand::RefreshRequested)), false)
}
