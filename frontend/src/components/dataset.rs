//! One dataset: its sample, its expectations and the suggestions the
//! backend generated for it.

use common::api::{endpoints, ApiRequest, ApiResponse, ClientError, Resource};
use common::form::family::{ExpectationFamily, ModalMode};
use common::form::outcome::{API_DOWN, UNKNOWN_ERROR};
use common::form::{classify_response, Notice, SubmitOutcome};
use common::model::dataset::Dataset;
use common::model::expectation::Expectation;
use common::overview::{ListCommand, ListState};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{display_value, icon_button, show_toast};
use super::list::{refresh_button, row_actions, run_list_effects, ListRequests};
use super::schema_modal::SchemaModal;
use crate::api::Api;

pub enum Msg {
    Loaded(Result<ApiResponse, ClientError>),
    Expectations(ListCommand),
    Suggestions(ListCommand),
    Open(ModalMode),
    Close,
    Validate,
    Validated(Result<ApiResponse, ClientError>),
    RefreshSample,
    SampleRefreshed(Result<ApiResponse, ClientError>),
    EnableSuggestion(String),
    SuggestionEnabled(Result<ApiResponse, ClientError>),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub api: Api,
    pub dataset_id: Option<String>,
}

pub struct DatasetScreen {
    dataset: Option<Dataset>,
    expectations: ListState<Expectation>,
    suggestions: ListState<Expectation>,
    mode: Option<ModalMode>,
    validating: bool,
    sampling: bool,
}

fn expectation_requests(dataset_id: &str) -> ListRequests<fn(&str) -> ApiRequest> {
    ListRequests {
        fetch: endpoints::list_expectations(Some(dataset_id), false, None),
        delete: |key| endpoints::delete(Resource::Expectations, key),
    }
}

fn suggestion_requests(dataset_id: &str) -> ListRequests<fn(&str) -> ApiRequest> {
    ListRequests {
        fetch: endpoints::list_suggestions(dataset_id),
        delete: |key| endpoints::delete(Resource::Suggestions, key),
    }
}

impl DatasetScreen {
    fn send<F>(ctx: &Context<Self>, request: ApiRequest, wrap: F)
    where
        F: FnOnce(Result<ApiResponse, ClientError>) -> Msg + 'static,
    {
        let (api, link) = (ctx.props().api.clone(), ctx.link().clone());
        spawn_local(async move {
            let response = api.execute(&request).await;
            link.send_message(wrap(response));
        });
    }

    fn load(&mut self, ctx: &Context<Self>) {
        let Some(dataset_id) = ctx.props().dataset_id.as_deref() else {
            return;
        };
        Self::send(ctx, endpoints::get(Resource::Datasets, dataset_id), Msg::Loaded);
        self.expectations(ctx, ListCommand::RefreshRequested);
        self.suggestions(ctx, ListCommand::RefreshRequested);
    }

    fn expectations(&mut self, ctx: &Context<Self>, command: ListCommand) {
        let Some(dataset_id) = ctx.props().dataset_id.as_deref() else {
            return;
        };
        let effects = self.expectations.handle(command);
        run_list_effects(ctx.link(), &ctx.props().api, expectation_requests(dataset_id), effects, Msg::Expectations);
    }

    fn suggestions(&mut self, ctx: &Context<Self>, command: ListCommand) {
        let Some(dataset_id) = ctx.props().dataset_id.as_deref() else {
            return;
        };
        let effects = self.suggestions.handle(command);
        run_list_effects(ctx.link(), &ctx.props().api, suggestion_requests(dataset_id), effects, Msg::Suggestions);
    }
}

/// Toast for a fire-and-forget action; `true` when it went through.
fn report(response: Result<ApiResponse, ClientError>, success: &str) -> bool {
    let outcome = match response {
        Ok(resp) => classify_response(&resp),
        Err(err) => {
            log::error!("{err}");
            SubmitOutcome::Toast(Notice::error(UNKNOWN_ERROR))
        }
    };
    match outcome {
        SubmitOutcome::Success(_) => {
            show_toast(&Notice::success(success));
            true
        }
        SubmitOutcome::Inline(lines) => {
            show_toast(&Notice::error(lines.join("\n")));
            false
        }
        SubmitOutcome::Toast(notice) => {
            show_toast(&notice);
            false
        }
        SubmitOutcome::Unauthorized => false,
    }
}

impl Component for DatasetScreen {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let mut screen = Self {
            dataset: None,
            expectations: ListState::new("expectations"),
            suggestions: ListState::new("suggestions"),
            mode: None,
            validating: false,
            sampling: false,
        };
        screen.load(ctx);
        screen
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().dataset_id != old_props.dataset_id {
            self.dataset = None;
            self.load(ctx);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(response) => match response {
                Ok(resp) if resp.status == Some(200) => self.dataset = resp.parse(),
                Ok(resp) if resp.is_unreachable() => show_toast(&Notice::error(API_DOWN)),
                _ => show_toast(&Notice::error("An error occurred while retrieving dataset.")),
            },
            Msg::Expectations(command) => self.expectations(ctx, command),
            Msg::Suggestions(command) => self.suggestions(ctx, command),
            Msg::Open(mode) => self.mode = Some(mode),
            Msg::Close => self.mode = None,
            Msg::Validate => {
                let Some(dataset) = &self.dataset else {
                    return false;
                };
                if self.validating {
                    return false;
                }
                self.validating = true;
                Self::send(ctx, endpoints::validate_dataset(&dataset.key), Msg::Validated);
            }
            Msg::Validated(response) => {
                self.validating = false;
                if report(response, "Validation complete.") {
                    self.expectations(ctx, ListCommand::RefreshRequested);
                }
            }
            Msg::RefreshSample => {
                let Some(dataset) = &self.dataset else {
                    return false;
                };
                if self.sampling {
                    return false;
                }
                self.sampling = true;
                Self::send(ctx, endpoints::refresh_sample(&dataset.key), Msg::SampleRefreshed);
            }
            Msg::SampleRefreshed(response) => {
                self.sampling = false;
                let refreshed = response.as_ref().ok().and_then(|resp| resp.parse::<Dataset>());
                if report(response, "Sample refreshed.") {
                    if let Some(dataset) = refreshed {
                        self.dataset = Some(dataset);
                    }
                }
            }
            Msg::EnableSuggestion(key) => {
                Self::send(ctx, endpoints::enable_suggestion(&key), Msg::SuggestionEnabled);
            }
            Msg::SuggestionEnabled(response) => {
                if report(response, "Suggestion enabled.") {
                    self.expectations(ctx, ListCommand::RefreshRequested);
                    self.suggestions(ctx, ListCommand::RefreshRequested);
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(dataset) = &self.dataset else {
            return html! { <div class="loading">{ "Loading..." }</div> };
        };
        let link = ctx.link();

        html! {
            <div class="overview">
                <div class="overview-header">
                    <h1>{ dataset.dataset_name.clone() }</h1>
                    { icon_button("play_arrow", "Validate", link.callback(|_| Msg::Validate), self.validating) }
                    { icon_button("sync", "Refresh Sample", link.callback(|_| Msg::RefreshSample), self.sampling) }
                    <button class="btn btn-primary" onclick={link.callback(|_| Msg::Open(ModalMode::Create))}>
                        { "Create Expectation" }
                    </button>
                </div>
                <p class="description">{ dataset.description.clone().unwrap_or_default() }</p>
                { sample_table(dataset) }
                <h2>{ "Expectations" }{ refresh_button(link, Msg::Expectations) }</h2>
                { self.expectation_table(ctx) }
                { self.suggestion_table(ctx) }
                <SchemaModal<ExpectationFamily>
                    api={ctx.props().api.clone()}
                    family={ExpectationFamily::for_dataset(dataset)}
                    mode={self.mode.clone()}
                    on_submitted={link.callback(|_| Msg::Expectations(ListCommand::RefreshRequested))}
                    on_close={link.callback(|_| Msg::Close)}
                />
            </div>
        }
    }
}

impl DatasetScreen {
    fn expectation_table(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let rows = self.expectations.items().iter().map(|expectation| {
            let record = serde_json::to_value(expectation).unwrap_or_default();
            let key = expectation.key.clone();
            let onedit = link.callback(move |_| {
                Msg::Open(ModalMode::Update {
                    key: key.clone(),
                    record: record.clone(),
                })
            });
            let key = expectation.key.clone();
            let ondelete = link.callback(move |_| Msg::Expectations(ListCommand::DeleteRequested(key.clone())));
            html! {
                <tr key={expectation.key.clone()}>
                    <td>{ expectation.expectation_type.clone() }</td>
                    <td>{ kwargs_summary(expectation) }</td>
                    { row_actions(Some(onedit), ondelete) }
                </tr>
            }
        });
        html! {
            <table class="overview-table">
                <thead>
                    <tr><th>{ "Expectation" }</th><th>{ "Arguments" }</th><th /></tr>
                </thead>
                <tbody>{ for rows }</tbody>
            </table>
        }
    }

    fn suggestion_table(&self, ctx: &Context<Self>) -> Html {
        if self.suggestions.items().is_empty() {
            return html! {};
        }
        let link = ctx.link();
        let rows = self.suggestions.items().iter().map(|suggestion| {
            let key = suggestion.key.clone();
            let onenable = link.callback(move |_| Msg::EnableSuggestion(key.clone()));
            let key = suggestion.key.clone();
            let ondelete = link.callback(move |_| Msg::Suggestions(ListCommand::DeleteRequested(key.clone())));
            html! {
                <tr key={suggestion.key.clone()}>
                    <td>{ suggestion.expectation_type.clone() }</td>
                    <td>{ kwargs_summary(suggestion) }</td>
                    <td>{ icon_button("add_task", "Enable", onenable, false) }</td>
                    { row_actions(None, ondelete) }
                </tr>
            }
        });
        html! {
            <>
                <h2>{ "Suggestions" }</h2>
                <table class="overview-table">
                    <tbody>{ for rows }</tbody>
                </table>
            </>
        }
    }
}

fn kwargs_summary(expectation: &Expectation) -> String {
    expectation
        .kwargs
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| format!("{name}: {}", display_value(Some(value))))
        .collect::<Vec<_>>()
        .join(", ")
}

fn sample_table(dataset: &Dataset) -> Html {
    let Some(sample) = dataset.sample.as_ref().filter(|s| !s.columns.is_empty()) else {
        return html! {};
    };
    html! {
        <div class="data-sample">
            <table class="overview-table">
                <thead>
                    <tr>{ for sample.columns.iter().map(|column| html! { <th>{ column.clone() }</th> }) }</tr>
                </thead>
                <tbody>
                    { for sample.rows.iter().map(|row| html! {
                        <tr>
                            { for sample.columns.iter().map(|column| html! {
                                <td>{ display_value(row.get(column)) }</td>
                            }) }
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}
