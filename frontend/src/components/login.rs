//! Login screen: username and password, plus one button per configured
//! OAuth provider. Also completes the OAuth round trip when the provider
//! redirects back with `code`, `state` and `provider` in the query.

use common::api::{ApiRequest, ApiResponse, ClientError, endpoints};
use common::auth::{auth_methods_outcome, authorize_outcome, login_outcome, LoginOutcome};
use common::form::outcome::UNKNOWN_ERROR;
use common::form::Notice;
use common::model::auth::AuthMethod;
use common::routes::query_param;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::show_toast;
use super::schema_modal::helpers::input_value;
use crate::api::Api;

pub enum Msg {
    Methods(Result<ApiResponse, ClientError>),
    Email(String),
    Password(String),
    Submit,
    Answered(Result<ApiResponse, ClientError>),
    Provider(AuthMethod),
    Authorized(Result<ApiResponse, ClientError>),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub api: Api,
    /// The session cookie is set; the parent loads the user.
    pub on_signed_in: Callback<()>,
}

pub struct Login {
    methods: Vec<AuthMethod>,
    email: String,
    password: String,
    detail: Option<String>,
    pending: bool,
}

impl Login {
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
}

/// `(provider, code, state)` when the page is an OAuth redirect target.
fn oauth_return() -> Option<(String, String, String)> {
    let search = web_sys::window()?.location().search().ok()?;
    Some((
        query_param(&search, "provider")?,
        query_param(&search, "code")?,
        query_param(&search, "state")?,
    ))
}

fn failed(err: ClientError) -> Notice {
    log::error!("{err}");
    Notice::error(UNKNOWN_ERROR)
}

impl Component for Login {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        Self::send(ctx, endpoints::auth_methods(), Msg::Methods);
        let pending = match oauth_return() {
            Some((provider, code, state)) => {
                Self::send(ctx, endpoints::oauth_callback(&provider, &code, &state), Msg::Answered);
                true
            }
            None => false,
        };
        Self {
            methods: Vec::new(),
            email: String::new(),
            password: String::new(),
            detail: None,
            pending,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Methods(response) => match response.map_err(failed).map(|resp| auth_methods_outcome(&resp)) {
                Ok(Ok(methods)) => self.methods = methods,
                Ok(Err(None)) => {}
                Ok(Err(Some(notice))) | Err(notice) => show_toast(&notice),
            },
            Msg::Email(email) => self.email = email,
            Msg::Password(password) => self.password = password,
            Msg::Submit => {
                if self.pending {
                    return false;
                }
                if self.email.is_empty() || self.password.is_empty() {
                    self.detail = Some("Enter your email and password.".to_string());
                    return true;
                }
                self.pending = true;
                self.detail = None;
                Self::send(ctx, endpoints::login(&self.email, &self.password), Msg::Answered);
            }
            Msg::Answered(response) => {
                self.pending = false;
                match response {
                    Ok(resp) => match login_outcome(&resp) {
                        LoginOutcome::CheckSession => ctx.props().on_signed_in.emit(()),
                        LoginOutcome::Detail(detail) => self.detail = Some(detail),
                        LoginOutcome::Failed(notice) => show_toast(&notice),
                    },
                    Err(err) => show_toast(&failed(err)),
                }
            }
            Msg::Provider(method) => {
                self.pending = true;
                Self::send(ctx, endpoints::authorize(method.provider()), Msg::Authorized);
            }
            Msg::Authorized(response) => {
                self.pending = false;
                match response.map_err(failed).and_then(|resp| authorize_outcome(&resp)) {
                    Ok(url) => {
                        if let Some(window) = web_sys::window() {
                            if let Err(err) = window.location().set_href(&url) {
                                log::error!("authorization redirect failed: {err:?}");
                            }
                        }
                    }
                    Err(notice) => show_toast(&notice),
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let password_login = self.methods.contains(&AuthMethod::UsernameAndPassword);

        html! {
            <div class="login">
                <h1>{ "Swiple" }</h1>
                {
                    if password_login {
                        html! {
                            <form class="login-form" {onsubmit}>
                                <input type="email" class="form-input" placeholder="Email"
                                    onchange={link.callback(|e: Event| Msg::Email(input_value(&e)))} />
                                <input type="password" class="form-input" placeholder="Password"
                                    onchange={link.callback(|e: Event| Msg::Password(input_value(&e)))} />
                                <span class="form-error">{ self.detail.clone().unwrap_or_default() }</span>
                                <button type="submit" class={classes!("btn", "btn-primary", self.pending.then_some("loading"))}
                                    disabled={self.pending}>
                                    { "Sign in" }
                                </button>
                            </form>
                        }
                    } else {
                        html! {}
                    }
                }
                { for self.methods.iter().copied().filter(|m| m.is_oauth()).map(|method| html! {
                    <button
                        class="btn oauth-btn"
                        style={format!("background: {}", method.background())}
                        disabled={self.pending}
                        onclick={link.callback(move |_| Msg::Provider(method))}
                    >
                        <img class="oauth-icon" src={method.icon()} alt={method.provider()} />
                        { method.button_label() }
                    </button>
                }) }
            </div>
        }
    }
}
