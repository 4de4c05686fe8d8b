use common::api::{endpoints, ApiRequest, Resource};
use common::form::family::{DestinationFamily, ModalMode};
use common::model::destination::Destination;
use common::overview::{ListCommand, ListState};
use yew::prelude::*;

use super::helpers::short_date;
use super::list::{refresh_button, row_actions, run_list_effects, ListRequests};
use super::schema_modal::SchemaModal;
use crate::api::Api;

pub enum Msg {
    List(ListCommand),
    Open(ModalMode),
    Close,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub api: Api,
}

pub struct Destinations {
    list: ListState<Destination>,
    mode: Option<ModalMode>,
}

fn requests() -> ListRequests<fn(&str) -> ApiRequest> {
    ListRequests {
        fetch: endpoints::list(Resource::Destinations, &[]),
        delete: |key| endpoints::delete(Resource::Destinations, key),
    }
}

impl Component for Destinations {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let mut list = ListState::new("destinations");
        let effects = list.handle(ListCommand::RefreshRequested);
        run_list_effects(ctx.link(), &ctx.props().api, requests(), effects, Msg::List);
        Self { list, mode: None }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::List(command) => {
                let effects = self.list.handle(command);
                run_list_effects(ctx.link(), &ctx.props().api, requests(), effects, Msg::List);
            }
            Msg::Open(mode) => self.mode = Some(mode),
            Msg::Close => self.mode = None,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let rows = self.list.items().iter().map(|destination| {
            let record = serde_json::to_value(destination).unwrap_or_default();
            let key = destination.key.clone();
            let onedit = link.callback(move |_| {
                Msg::Open(ModalMode::Update {
                    key: key.clone(),
                    record: record.clone(),
                })
            });
            let key = destination.key.clone();
            let ondelete = link.callback(move |_| Msg::List(ListCommand::DeleteRequested(key.clone())));
            let kind = destination.kind();

            html! {
                <tr key={destination.key.clone()}>
                    <td>
                        { kind.map(|k| html! { <img class="destination-icon" src={k.icon()} alt={k.title()} /> }).unwrap_or_default() }
                    </td>
                    <td>{ destination.destination_name.clone() }</td>
                    <td>{ destination.destination_type().unwrap_or_default().to_string() }</td>
                    <td>{ short_date(destination.modified_date.as_deref()) }</td>
                    { row_actions(Some(onedit), ondelete) }
                </tr>
            }
        });

        html! {
            <div class="overview">
                <div class="overview-header">
                    <h1>{ "Destinations" }</h1>
                    { refresh_button(link, Msg::List) }
                    <button class="btn btn-primary" onclick={link.callback(|_| Msg::Open(ModalMode::Create))}>
                        { "Create Destination" }
                    </button>
                </div>
                <table class="overview-table">
                    <thead>
                        <tr>
                            <th />
                            <th>{ "Name" }</th>
                            <th>{ "Type" }</th>
                            <th>{ "Modified" }</th>
                            <th />
                        </tr>
                    </thead>
                    <tbody>{ for rows }</tbody>
                </table>
                <SchemaModal<DestinationFamily>
                    api={ctx.props().api.clone()}
                    family={DestinationFamily}
                    mode={self.mode.clone()}
                    on_submitted={link.callback(|_| Msg::List(ListCommand::RefreshRequested))}
                    on_close={link.callback(|_| Msg::Close)}
                />
            </div>
        }
    }
}
