//! Root component: resolves the API location, checks the session, and
//! renders the screen for the current route.

use common::api::{endpoints, ApiResponse, ClientError, Navigator};
use common::auth::{access, session_outcome, Access, AuthEvent, AuthState};
use common::routes::{query_param, Route, FROM_PARAM};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::platform::spawn_local;
use yew::{html, Callback, Component, Context, Html};

use crate::api::{load_config, Api, ApiConfig, BrowserNavigator};
use crate::components::dashboard::Dashboard;
use crate::components::data_sources::DataSources;
use crate::components::dataset::DatasetScreen;
use crate::components::datasets::Datasets;
use crate::components::destinations::Destinations;
use crate::components::login::Login;
use crate::components::nav::NavBar;
use crate::components::settings::Settings;

pub enum Msg {
    Configured(ApiConfig),
    CheckSession,
    Session(Result<ApiResponse, ClientError>),
    Navigate(Route),
    LocationChanged,
    SignOut,
    SignedOut,
}

pub struct App {
    api: Option<Api>,
    auth: AuthState,
    route: Route,
    popstate: Option<Closure<dyn Fn()>>,
}

fn location() -> (String, String) {
    web_sys::window()
        .map(|w| w.location())
        .map(|l| (l.pathname().unwrap_or_default(), l.search().unwrap_or_default()))
        .unwrap_or_default()
}

fn current_route() -> Route {
    let (path, search) = location();
    Route::from_location(&path, &search)
}

impl App {
    /// Moves to `route`, falling back to the dashboard when the session may
    /// not see it.
    fn go(&mut self, route: Route) {
        let route = match access(&self.auth, &route) {
            Access::RedirectDashboard => Route::Dashboard,
            Access::Render | Access::Hide => route,
        };
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            if let Err(err) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&route.href())) {
                log::warn!("pushState failed: {err:?}");
            }
        }
        self.route = route;
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Configured(load_config().await));
        });

        let link = ctx.link().clone();
        let popstate = Closure::<dyn Fn()>::new(move || link.send_message(Msg::LocationChanged));
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref()) {
                log::warn!("popstate listener not installed: {err:?}");
            }
        }

        Self {
            api: None,
            auth: AuthState::default(),
            route: current_route(),
            popstate: Some(popstate),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Configured(config) => {
                log::info!("api domain {}", config.api_domain);
                self.api = Some(Api::new(&config.api_domain));
                ctx.link().send_message(Msg::CheckSession);
            }
            Msg::CheckSession => {
                let Some(api) = self.api.clone() else {
                    return false;
                };
                self.auth = std::mem::take(&mut self.auth).transition(AuthEvent::SessionCheckStarted);
                let link = ctx.link().clone();
                spawn_local(async move {
                    let response = api.execute(&endpoints::me()).await;
                    link.send_message(Msg::Session(response));
                });
            }
            Msg::Session(response) => {
                let response = match response {
                    Ok(response) => response,
                    Err(err) => {
                        log::error!("{err}");
                        ApiResponse::no_response()
                    }
                };
                let (_, search) = location();
                let from = query_param(&search, FROM_PARAM);
                let outcome = session_outcome(&response, &BrowserNavigator.current_path(), from.as_deref());
                self.auth = std::mem::take(&mut self.auth).transition(outcome.event);
                match outcome.redirect {
                    Some(target) => {
                        let (path, search) = target.split_once('?').unwrap_or((target.as_str(), ""));
                        self.go(Route::from_location(path, search));
                    }
                    None if access(&self.auth, &self.route) == Access::RedirectDashboard => {
                        self.go(Route::Dashboard);
                    }
                    None => {}
                }
            }
            Msg::Navigate(route) => self.go(route),
            Msg::LocationChanged => self.route = current_route(),
            Msg::SignOut => {
                let Some(api) = self.api.clone() else {
                    return false;
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    if let Ok(response) = api.execute(&endpoints::logout()).await {
                        if !response.is_success() {
                            log::warn!("logout answered {:?}", response.status);
                        }
                    }
                    link.send_message(Msg::SignedOut);
                });
            }
            Msg::SignedOut => {
                self.auth = std::mem::take(&mut self.auth).transition(AuthEvent::SignedOut);
                self.go(Route::Login);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(api) = self.api.clone() else {
            return html! { <div class="loading">{ "Loading..." }</div> };
        };
        let link = ctx.link();

        if self.route == Route::Login {
            return html! { <Login api={api} on_signed_in={link.callback(|_| Msg::CheckSession)} /> };
        }
        let Some(user) = self.auth.user().cloned() else {
            return html! { <div class="loading">{ "Loading..." }</div> };
        };
        if access(&self.auth, &self.route) != Access::Render {
            return html! {};
        }

        let on_navigate: Callback<_> = link.callback(Msg::Navigate);
        let screen = match &self.route {
            Route::Login | Route::Dashboard => html! { <Dashboard api={api} /> },
            Route::DataSources => html! { <DataSources api={api} /> },
            Route::Datasets => html! { <Datasets api={api} on_navigate={on_navigate.clone()} /> },
            Route::Dataset { dataset_id } => html! { <DatasetScreen api={api} dataset_id={dataset_id.clone()} /> },
            Route::Destinations => html! { <Destinations api={api} /> },
            Route::Settings => html! { <Settings api={api} /> },
        };

        html! {
            <div class="layout">
                <NavBar
                    route={self.route.clone()}
                    {user}
                    {on_navigate}
                    on_sign_out={link.callback(|_| Msg::SignOut)}
                />
                <main class="content">{ screen }</main>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let (Some(window), Some(popstate)) = (web_sys::window(), self.popstate.take()) {
            window
                .remove_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())
                .ok();
        }
    }
}
