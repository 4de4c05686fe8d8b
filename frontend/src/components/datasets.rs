use common::api::{endpoints, ApiRequest, Resource};
use common::form::family::{ModalMode, SamplingFamily};
use common::form::Notice;
use common::model::dataset::Dataset;
use common::overview::{ListCommand, ListState};
use common::routes::Route;
use yew::prelude::*;

use super::dataset_creator::DatasetCreator;
use super::helpers::{icon_button, show_toast, short_date};
use super::list::{refresh_button, row_actions, run_list_effects, ListRequests};
use super::schema_modal::SchemaModal;
use crate::api::Api;

pub enum Msg {
    List(ListCommand),
    OpenCreator,
    CloseCreator,
    ConfigureSampling(Dataset),
    CloseSampling,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub api: Api,
    pub on_navigate: Callback<Route>,
}

pub struct Datasets {
    list: ListState<Dataset>,
    creating: bool,
    /// Sampling modal target; the family carries the dataset it rewrites and
    /// the mode carries the current sampling for pre-fill.
    sampling: Option<(SamplingFamily, ModalMode)>,
}

fn requests() -> ListRequests<fn(&str) -> ApiRequest> {
    ListRequests {
        fetch: endpoints::list_datasets(None),
        delete: |key| endpoints::delete(Resource::Datasets, key),
    }
}

impl Component for Datasets {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let mut list = ListState::new("datasets");
        let effects = list.handle(ListCommand::RefreshRequested);
        run_list_effects(ctx.link(), &ctx.props().api, requests(), effects, Msg::List);
        Self {
            list,
            creating: false,
            sampling: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::List(command) => {
                let effects = self.list.handle(command);
                run_list_effects(ctx.link(), &ctx.props().api, requests(), effects, Msg::List);
            }
            Msg::OpenCreator => self.creating = true,
            Msg::CloseCreator => self.creating = false,
            Msg::ConfigureSampling(dataset) => {
                let target = serde_json::to_value(&dataset)
                    .map_err(|err| err.to_string())
                    .and_then(|record| {
                        let family = SamplingFamily::new(&record).map_err(|err| err.to_string())?;
                        let mode = ModalMode::Update {
                            key: dataset.key.clone(),
                            record,
                        };
                        Ok((family, mode))
                    });
                match target {
                    Ok(target) => self.sampling = Some(target),
                    Err(err) => show_toast(&Notice::error(err)),
                }
            }
            Msg::CloseSampling => self.sampling = None,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let api = ctx.props().api.clone();

        html! {
            <div class="overview">
                <div class="overview-header">
                    <h1>{ "Datasets" }</h1>
                    { refresh_button(link, Msg::List) }
                    <button class="btn btn-primary" onclick={link.callback(|_| Msg::OpenCreator)}>
                        { "Create Dataset" }
                    </button>
                </div>
                <table class="overview-table">
                    <thead>
                        <tr>
                            <th>{ "Dataset" }</th>
                            <th>{ "Data Source" }</th>
                            <th>{ "Description" }</th>
                            <th>{ "Modified" }</th>
                            <th />
                            <th />
                        </tr>
                    </thead>
                    <tbody>
                        { for self.list.items().iter().map(|dataset| self.row(ctx, dataset)) }
                    </tbody>
                </table>
                <DatasetCreator
                    api={api.clone()}
                    open={self.creating}
                    on_created={link.callback(|_| Msg::List(ListCommand::RefreshRequested))}
                    on_close={link.callback(|_| Msg::CloseCreator)}
                />
                {
                    match &self.sampling {
                        Some((family, mode)) => html! {
                            <SchemaModal<SamplingFamily>
                                api={api}
                                family={family.clone()}
                                mode={Some(mode.clone())}
                                on_submitted={link.callback(|_| Msg::List(ListCommand::RefreshRequested))}
                                on_close={link.callback(|_| Msg::CloseSampling)}
                            />
                        },
                        None => html! {},
                    }
                }
            </div>
        }
    }
}

impl Datasets {
    fn row(&self, ctx: &Context<Self>, dataset: &Dataset) -> Html {
        let link = ctx.link();
        let route = Route::Dataset {
            dataset_id: Some(dataset.key.clone()),
        };
        let on_navigate = ctx.props().on_navigate.clone();
        let onopen = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_navigate.emit(route.clone());
        });
        let target = dataset.clone();
        let onsampling = link.callback(move |_| Msg::ConfigureSampling(target.clone()));
        let key = dataset.key.clone();
        let ondelete = link.callback(move |_| Msg::List(ListCommand::DeleteRequested(key.clone())));
        let href = Route::Dataset {
            dataset_id: Some(dataset.key.clone()),
        }
        .href();

        html! {
            <tr key={dataset.key.clone()}>
                <td><a {href} onclick={onopen}>{ dataset.dataset_name.clone() }</a></td>
                <td>{ dataset.datasource_name.clone().unwrap_or_default() }</td>
                <td>{ dataset.description.clone().unwrap_or_default() }</td>
                <td>{ short_date(dataset.modified_date.as_deref()) }</td>
                <td>{ icon_button("tune", "Configure Sampling", onsampling, false) }</td>
                { row_actions(None, ondelete) }
            </tr>
        }
    }
}
