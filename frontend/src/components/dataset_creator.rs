//! Sheet for registering a table as a dataset: data source, then schema,
//! then table, each list introspected from the previous choice.

use common::api::{endpoints, ApiRequest, ApiResponse, ClientError, Resource};
use common::form::outcome::{API_DOWN, UNKNOWN_ERROR};
use common::form::{classify_response, Notice, SubmitOutcome};
use common::model::datasource::Datasource;
use serde_json::{json, Value};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::show_toast;
use super::schema_modal::helpers::{input_value, select_value};
use crate::api::Api;
use crate::tops_sheet::top_sheet::TopSheet;

pub enum Msg {
    Datasources(Result<ApiResponse, ClientError>),
    SelectDatasource(String),
    Schemas(Result<ApiResponse, ClientError>),
    SelectSchema(String),
    Tables(Result<ApiResponse, ClientError>),
    SelectTable(String),
    Description(String),
    Submit,
    Submitted(Result<ApiResponse, ClientError>),
    Cancel,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub api: Api,
    pub open: bool,
    pub on_created: Callback<()>,
    pub on_close: Callback<()>,
}

#[derive(Default)]
pub struct DatasetCreator {
    datasources: Vec<Datasource>,
    schemas: Vec<String>,
    tables: Vec<String>,
    datasource_id: Option<String>,
    schema: Option<String>,
    table: Option<String>,
    description: String,
    errors: Vec<String>,
    submitting: bool,
}

impl DatasetCreator {
    fn send<F>(&self, ctx: &Context<Self>, request: ApiRequest, wrap: F)
    where
        F: FnOnce(Result<ApiResponse, ClientError>) -> Msg + 'static,
    {
        let (api, link) = (ctx.props().api.clone(), ctx.link().clone());
        spawn_local(async move {
            let response = api.execute(&request).await;
            link.send_message(wrap(response));
        });
    }

    fn payload(&self) -> Option<Value> {
        let datasource_id = self.datasource_id.as_deref()?;
        let datasource = self.datasources.iter().find(|d| d.key == datasource_id)?;
        Some(json!({
            "dataset_name": format!("{}.{}", self.schema.as_deref()?, self.table.as_deref()?),
            "description": self.description,
            "datasource_id": datasource_id,
            "datasource_name": datasource.datasource_name,
            "database": datasource.database,
        }))
    }
}

fn names(response: Result<ApiResponse, ClientError>, what: &str, errors: &mut Vec<String>) -> Vec<String> {
    match response {
        Ok(resp) if resp.status == Some(200) => resp.parse().unwrap_or_default(),
        Ok(resp) if resp.status == Some(422) => {
            *errors = resp.detail().map(|d| d.lines()).unwrap_or_default();
            Vec::new()
        }
        Ok(resp) if resp.is_unreachable() => {
            show_toast(&Notice::error(API_DOWN));
            Vec::new()
        }
        _ => {
            show_toast(&Notice::error(format!("An error occurred while introspecting {what}.")));
            Vec::new()
        }
    }
}

impl Component for DatasetCreator {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let creator = Self::default();
        if ctx.props().open {
            creator.send(ctx, endpoints::list(Resource::Datasources, &[]), Msg::Datasources);
        }
        creator
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().open && !old_props.open {
            *self = Self::default();
            self.send(ctx, endpoints::list(Resource::Datasources, &[]), Msg::Datasources);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Datasources(response) => match response {
                Ok(resp) if resp.status == Some(200) => self.datasources = resp.parse().unwrap_or_default(),
                Ok(resp) if resp.is_unreachable() => show_toast(&Notice::error(API_DOWN)),
                _ => show_toast(&Notice::error("An error occurred while retrieving data sources.")),
            },
            Msg::SelectDatasource(key) => {
                self.schema = None;
                self.table = None;
                self.schemas.clear();
                self.tables.clear();
                self.errors.clear();
                self.send(ctx, endpoints::introspect_schemas(&key), Msg::Schemas);
                self.datasource_id = Some(key);
            }
            Msg::Schemas(response) => self.schemas = names(response, "schemas", &mut self.errors),
            Msg::SelectSchema(schema) => {
                self.table = None;
                self.tables.clear();
                if let Some(datasource_id) = &self.datasource_id {
                    self.send(ctx, endpoints::introspect_tables(datasource_id, &schema), Msg::Tables);
                }
                self.schema = Some(schema);
            }
            Msg::Tables(response) => self.tables = names(response, "tables", &mut self.errors),
            Msg::SelectTable(table) => self.table = Some(table),
            Msg::Description(text) => self.description = text,
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                let Some(payload) = self.payload() else {
                    self.errors = vec!["Select a data source, schema and table.".to_string()];
                    return true;
                };
                self.submitting = true;
                self.errors.clear();
                self.send(ctx, endpoints::create(Resource::Datasets, payload), Msg::Submitted);
            }
            Msg::Submitted(response) => {
                self.submitting = false;
                let outcome = match response {
                    Ok(resp) => classify_response(&resp),
                    Err(err) => {
                        log::error!("{err}");
                        SubmitOutcome::Toast(Notice::error(UNKNOWN_ERROR))
                    }
                };
                match outcome {
                    SubmitOutcome::Success(_) => {
                        ctx.props().on_created.emit(());
                        ctx.props().on_close.emit(());
                    }
                    SubmitOutcome::Inline(lines) => self.errors = lines,
                    SubmitOutcome::Toast(notice) => show_toast(&notice),
                    SubmitOutcome::Unauthorized => {}
                }
            }
            Msg::Cancel => ctx.props().on_close.emit(()),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let select = |label: &str, options: Html, onchange: Callback<Event>| {
            html! {
                <div class="form-row">
                    <label class="form-label">{ label.to_string() }</label>
                    <select class="form-select" {onchange}>
                        <option value="" selected=true disabled=true>{ "Select..." }</option>
                        { options }
                    </select>
                </div>
            }
        };
        let plain = |items: &[String]| -> Html {
            items
                .iter()
                .map(|item| html! { <option value={item.clone()}>{ item.clone() }</option> })
                .collect()
        };
        let datasources: Html = self
            .datasources
            .iter()
            .map(|d| html! { <option value={d.key.clone()}>{ d.datasource_name.clone() }</option> })
            .collect();

        html! {
            <TopSheet open={ctx.props().open}>
                <div class="modal-form">
                    <h2 class="modal-title">{ "Create Dataset" }</h2>
                    { select("Data Source", datasources, link.callback(|e: Event| Msg::SelectDatasource(select_value(&e)))) }
                    { select("Schema", plain(&self.schemas), link.callback(|e: Event| Msg::SelectSchema(select_value(&e)))) }
                    { select("Table", plain(&self.tables), link.callback(|e: Event| Msg::SelectTable(select_value(&e)))) }
                    <div class="form-row">
                        <label class="form-label">{ "Description" }</label>
                        <input
                            type="text"
                            class="form-input"
                            placeholder="Enter a description"
                            value={self.description.clone()}
                            onchange={link.callback(|e: Event| Msg::Description(input_value(&e)))}
                        />
                    </div>
                    {
                        if self.errors.is_empty() {
                            html! {}
                        } else {
                            html! {
                                <div class="status status-failure">
                                    { for self.errors.iter().map(|line| html! { <div>{ line.clone() }</div> }) }
                                </div>
                            }
                        }
                    }
                    <div class="modal-footer">
                        <button class="btn" onclick={link.callback(|_| Msg::Cancel)}>{ "Cancel" }</button>
                        <button
                            class={classes!("btn", "btn-primary", self.submitting.then_some("loading"))}
                            disabled={self.submitting}
                            onclick={link.callback(|_| Msg::Submit)}
                        >
                            { "Create" }
                        </button>
                    </div>
                </div>
            </TopSheet>
        }
    }
}
