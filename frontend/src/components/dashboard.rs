use common::api::{endpoints, ApiRequest, ApiResponse, ClientError};
use common::form::outcome::API_DOWN;
use common::form::Notice;
use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{display_value, show_toast};
use crate::api::Api;

/// Metric cards in display order: response key and caption.
const METRICS: [(&str, &str); 4] = [
    ("datasource", "Data Sources"),
    ("dataset", "Datasets"),
    ("expectation", "Expectations"),
    ("validation", "Validations"),
];

const ISSUE_COLUMNS: [(&str, &str); 4] = [
    ("dataset_name", "Dataset"),
    ("datasource_name", "Data Source"),
    ("rate", "Success Rate"),
    ("#_failures", "Failures"),
];

pub enum Msg {
    Metrics(Result<ApiResponse, ClientError>),
    Issues(Result<ApiResponse, ClientError>),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub api: Api,
}

pub struct Dashboard {
    metrics: Option<Value>,
    issues: Vec<Value>,
}

fn fetch(ctx: &Context<Dashboard>, request: ApiRequest, wrap: fn(Result<ApiResponse, ClientError>) -> Msg) {
    let (api, link) = (ctx.props().api.clone(), ctx.link().clone());
    spawn_local(async move {
        let response = api.execute(&request).await;
        link.send_message(wrap(response));
    });
}

fn loaded(response: Result<ApiResponse, ClientError>, what: &str) -> Option<Value> {
    match response {
        Ok(resp) if resp.status == Some(200) => resp.data,
        Ok(resp) if resp.is_unreachable() => {
            show_toast(&Notice::error(API_DOWN));
            None
        }
        _ => {
            show_toast(&Notice::error(format!("An error occurred while retrieving {what}.")));
            None
        }
    }
}

impl Component for Dashboard {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        fetch(ctx, endpoints::dashboard_metrics(), Msg::Metrics);
        fetch(ctx, endpoints::dashboard_issues(), Msg::Issues);
        Self {
            metrics: None,
            issues: Vec::new(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Metrics(response) => self.metrics = loaded(response, "metrics"),
            Msg::Issues(response) => {
                self.issues = loaded(response, "issues")
                    .and_then(|body| body.as_array().cloned())
                    .unwrap_or_default()
            }
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let count = |key: &str| {
            self.metrics
                .as_ref()
                .and_then(|m| m.get(key))
                .and_then(|m| m.get("count"))
                .map(|c| display_value(Some(c)))
                .unwrap_or_else(|| "-".to_string())
        };

        html! {
            <div class="dashboard">
                <div class="metric-row">
                    { for METRICS.iter().map(|(key, caption)| html! {
                        <div class="metric-card">
                            <div class="metric-caption">{ *caption }</div>
                            <div class="metric-value">{ count(key) }</div>
                        </div>
                    }) }
                </div>
                <h2>{ "Top Issues" }</h2>
                <table class="overview-table">
                    <thead>
                        <tr>{ for ISSUE_COLUMNS.iter().map(|(_, caption)| html! { <th>{ *caption }</th> }) }</tr>
                    </thead>
                    <tbody>
                        { for self.issues.iter().map(|issue| html! {
                            <tr>
                                { for ISSUE_COLUMNS.iter().map(|(key, _)| html! {
                                    <td>{ display_value(issue.get(*key)) }</td>
                                }) }
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        }
    }
}
