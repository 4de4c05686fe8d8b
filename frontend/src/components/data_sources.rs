use common::api::{endpoints, Resource};
use common::form::family::{DatasourceFamily, ModalMode};
use common::model::datasource::Datasource;
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

pub struct DataSources {
    list: ListState<Datasource>,
    mode: Option<ModalMode>,
}

fn requests() -> ListRequests<fn(&str) -> common::api::ApiRequest> {
    ListRequests {
        fetch: endpoints::list(Resource::Datasources, &[]),
        delete: |key| endpoints::delete(Resource::Datasources, key),
    }
}

impl DataSources {
    fn dispatch(&mut self, ctx: &Context<Self>, command: ListCommand) {
        let effects = self.list.handle(command);
        run_list_effects(ctx.link(), &ctx.props().api, requests(), effects, Msg::List);
    }
}

impl Component for DataSources {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let mut screen = Self {
            list: ListState::new("data sources"),
            mode: None,
        };
        screen.dispatch(ctx, ListCommand::RefreshRequested);
        screen
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::List(command) => self.dispatch(ctx, command),
            Msg::Open(mode) => self.mode = Some(mode),
            Msg::Close => self.mode = None,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="overview">
                <div class="overview-header">
                    <h1>{ "Data Sources" }</h1>
                    { refresh_button(link, Msg::List) }
                    <button class="btn btn-primary" onclick={link.callback(|_| Msg::Open(ModalMode::Create))}>
                        { "Create Data Source" }
                    </button>
                </div>
                <table class="overview-table">
                    <thead>
                        <tr>
                            <th />
                            <th>{ "Name" }</th>
                            <th>{ "Engine" }</th>
                            <th>{ "Database" }</th>
                            <th>{ "Description" }</th>
                            <th>{ "Modified" }</th>
                            <th />
                        </tr>
                    </thead>
                    <tbody>
                        { for self.list.items().iter().map(|datasource| self.row(ctx, datasource)) }
                    </tbody>
                </table>
                { if self.list.is_loading() { html! { <div class="loading">{ "Loading..." }</div> } } else { html! {} } }
                <SchemaModal<DatasourceFamily>
                    api={ctx.props().api.clone()}
                    family={DatasourceFamily}
                    mode={self.mode.clone()}
                    on_submitted={link.callback(|_| Msg::List(ListCommand::RefreshRequested))}
                    on_close={link.callback(|_| Msg::Close)}
                />
            </div>
        }
    }
}

impl DataSources {
    fn row(&self, ctx: &Context<Self>, datasource: &Datasource) -> Html {
        let link = ctx.link();
        let record = serde_json::to_value(datasource).unwrap_or_default();
        let key = datasource.key.clone();
        let onedit = link.callback(move |_| {
            Msg::Open(ModalMode::Update {
                key: key.clone(),
                record: record.clone(),
            })
        });
        let key = datasource.key.clone();
        let ondelete = link.callback(move |_| Msg::List(ListCommand::DeleteRequested(key.clone())));
        let icon = datasource
            .engine_kind()
            .map(|engine| html! { <img class="engine-icon" src={engine.icon()} alt={datasource.engine.clone()} /> })
            .unwrap_or_default();

        html! {
            <tr key={datasource.key.clone()}>
                <td>{ icon }</td>
                <td>{ datasource.datasource_name.clone() }</td>
                <td>{ datasource.engine.clone() }</td>
                <td>{ datasource.database.clone().unwrap_or_default() }</td>
                <td>{ datasource.description.clone().unwrap_or_default() }</td>
                <td>{ short_date(datasource.modified_date.as_deref()) }</td>
                { row_actions(Some(onedit), ondelete) }
            </tr>
        }
    }
}
