//! User administration, reserved to superusers.

use common::api::{endpoints, ApiRequest, ApiResponse, ClientError, Resource};
use common::form::outcome::UNKNOWN_ERROR;
use common::form::{classify_response, Notice, SubmitOutcome};
use common::model::user::{PasswordRequirements, User, UserRequest};
use common::overview::{ListCommand, ListState};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::show_toast;
use super::list::{refresh_button, row_actions, run_list_effects, ListRequests};
use super::schema_modal::helpers::{checkbox_value, input_value};
use crate::api::Api;
use crate::tops_sheet::top_sheet::TopSheet;

const CLOSE_DELAY_MS: u32 = common::form::modal::CLOSE_DELAY_MS;

pub enum Msg {
    List(ListCommand),
    Create,
    Edit(User),
    Email(String),
    Password(String),
    Superuser(bool),
    Active(bool),
    Submit,
    Submitted(Result<ApiResponse, ClientError>),
    Close,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub api: Api,
}

/// Contents of the user sheet. `editing` is the user id on update.
#[derive(Default)]
struct Draft {
    editing: Option<String>,
    email: String,
    password: String,
    is_superuser: bool,
    is_active: bool,
    is_verified: bool,
}

pub struct Settings {
    list: ListState<User>,
    draft: Option<Draft>,
    errors: Vec<String>,
    succeeded: bool,
    submitting: bool,
}

fn requests() -> ListRequests<fn(&str) -> ApiRequest> {
    ListRequests {
        fetch: endpoints::list_users(),
        delete: endpoints::delete_user,
    }
}

impl Settings {
    fn dispatch(&mut self, ctx: &Context<Self>, command: ListCommand) {
        let effects = self.list.handle(command);
        run_list_effects(ctx.link(), &ctx.props().api, requests(), effects, Msg::List);
    }

    fn open(&mut self, draft: Draft) {
        self.draft = Some(draft);
        self.errors.clear();
        self.succeeded = false;
    }

    /// Checks the draft and builds the request for it.
    fn request(&self) -> Result<ApiRequest, Vec<String>> {
        let Some(draft) = &self.draft else {
            return Err(Vec::new());
        };
        let mut errors = Vec::new();
        if draft.email.trim().is_empty() {
            errors.push("Enter an email".to_string());
        }
        let password = (!draft.password.is_empty()).then(|| draft.password.clone());
        match &password {
            None if draft.editing.is_none() => errors.push("Enter a password".to_string()),
            Some(password) => {
                errors.extend(PasswordRequirements::check(password).unmet().into_iter().map(str::to_string))
            }
            None => {}
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let body = UserRequest {
            email: draft.email.trim().to_string(),
            password,
            is_superuser: draft.is_superuser,
            is_active: draft.is_active,
            is_verified: draft.is_verified,
        };
        let payload = serde_json::to_value(&body).map_err(|err| vec![err.to_string()])?;
        Ok(match &draft.editing {
            Some(id) => endpoints::update_user(id, payload),
            None => endpoints::create_user(payload),
        })
    }
}

impl Component for Settings {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let mut settings = Self {
            list: ListState::new("users"),
            draft: None,
            errors: Vec::new(),
            succeeded: false,
            submitting: false,
        };
        settings.dispatch(ctx, ListCommand::RefreshRequested);
        settings
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::List(command) => self.dispatch(ctx, command),
            Msg::Create => self.open(Draft {
                is_active: true,
                ..Draft::default()
            }),
            Msg::Edit(user) => self.open(Draft {
                editing: Some(user.id),
                email: user.email,
                password: String::new(),
                is_superuser: user.is_superuser,
                is_active: user.is_active,
                is_verified: user.is_verified,
            }),
            Msg::Email(email) => {
                if let Some(draft) = &mut self.draft {
                    draft.email = email;
                }
            }
            Msg::Password(password) => {
                if let Some(draft) = &mut self.draft {
                    draft.password = password;
                }
            }
            Msg::Superuser(checked) => {
                if let Some(draft) = &mut self.draft {
                    draft.is_superuser = checked;
                }
            }
            Msg::Active(checked) => {
                if let Some(draft) = &mut self.draft {
                    draft.is_active = checked;
                }
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                match self.request() {
                    Ok(request) => {
                        self.submitting = true;
                        self.errors.clear();
                        let (api, link) = (ctx.props().api.clone(), ctx.link().clone());
                        spawn_local(async move {
                            let response = api.execute(&request).await;
                            link.send_message(Msg::Submitted(response));
                        });
                    }
                    Err(errors) => self.errors = errors,
                }
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
                        self.succeeded = true;
                        let link = ctx.link().clone();
                        spawn_local(async move {
                            gloo_timers::future::TimeoutFuture::new(CLOSE_DELAY_MS).await;
                            link.send_message_batch(vec![Msg::Close, Msg::List(ListCommand::RefreshRequested)]);
                        });
                    }
                    SubmitOutcome::Inline(lines) => self.errors = lines,
                    SubmitOutcome::Toast(notice) => show_toast(&notice),
                    SubmitOutcome::Unauthorized => {}
                }
            }
            Msg::Close => {
                self.draft = None;
                self.errors.clear();
                self.succeeded = false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let rows = self.list.items().iter().map(|user| {
            let target = user.clone();
            let onedit = link.callback(move |_| Msg::Edit(target.clone()));
            let id = user.id.clone();
            let ondelete = link.callback(move |_| Msg::List(ListCommand::DeleteRequested(id.clone())));
            html! {
                <tr key={user.id.clone()}>
                    <td>{ user.email.clone() }</td>
                    <td>{ if user.is_superuser { "Yes" } else { "No" } }</td>
                    <td>{ if user.is_active { "Yes" } else { "No" } }</td>
                    { row_actions(Some(onedit), ondelete) }
                </tr>
            }
        });

        html! {
            <div class="overview">
                <div class="overview-header">
                    <h1>{ "Users" }</h1>
                    { refresh_button(link, Msg::List) }
                    <button class="btn btn-primary" onclick={link.callback(|_| Msg::Create)}>{ "Create User" }</button>
                </div>
                <table class="overview-table">
                    <thead>
                        <tr><th>{ "Email" }</th><th>{ "Superuser" }</th><th>{ "Active" }</th><th /></tr>
                    </thead>
                    <tbody>{ for rows }</tbody>
                </table>
                { self.user_sheet(ctx) }
            </div>
        }
    }
}

impl Settings {
    fn user_sheet(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let Some(draft) = &self.draft else {
            return html! { <TopSheet open=false /> };
        };
        let updating = draft.editing.is_some();
        let requirements = PasswordRequirements::check(&draft.password);
        let status = if self.succeeded {
            let verb = if updating { "updated" } else { "created" };
            html! { <div class="status status-success">{ format!("User {verb}") }</div> }
        } else if !self.errors.is_empty() {
            html! {
                <div class="status status-failure">
                    { for self.errors.iter().map(|line| html! { <div>{ line.clone() }</div> }) }
                </div>
            }
        } else {
            html! {}
        };

        html! {
            <TopSheet open=true>
                <div class="modal-form">
                    <h2 class="modal-title">{ if updating { "Update User" } else { "Create User" } }</h2>
                    <div class="form-row">
                        <label class="form-label">{ "Email" }</label>
                        <input type="email" class="form-input" placeholder="Email" value={draft.email.clone()}
                            onchange={link.callback(|e: Event| Msg::Email(input_value(&e)))} />
                    </div>
                    <div class="form-row">
                        <label class="form-label">{ "Password" }</label>
                        <input type="password" class="form-input" placeholder="Password" value={draft.password.clone()}
                            oninput={link.callback(|e: InputEvent| Msg::Password(input_value(&e)))} />
                        <ul class="password-rules">
                            { for [
                                ("At least 8 characters", requirements.length),
                                ("At least one upper case letter", requirements.upper_case),
                                ("At least one number", requirements.number),
                                ("At least one special character", requirements.special_char),
                            ].into_iter().map(|(rule, met)| html! {
                                <li class={if met { "rule-met" } else { "rule-unmet" }}>{ rule }</li>
                            }) }
                        </ul>
                    </div>
                    <div class="form-row">
                        <label class="form-label" title="Superusers have permissions to add users and configure Swiple.">
                            { "Superuser" }
                        </label>
                        <input type="checkbox" checked={draft.is_superuser}
                            onchange={link.callback(|e: Event| Msg::Superuser(checkbox_value(&e) == "true"))} />
                    </div>
                    {
                        if updating {
                            html! {
                                <div class="form-row">
                                    <label class="form-label" title="Inactive users cannot log in.">{ "Active" }</label>
                                    <input type="checkbox" checked={draft.is_active}
                                        onchange={link.callback(|e: Event| Msg::Active(checkbox_value(&e) == "true"))} />
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                    { status }
                    <div class="modal-footer">
                        <button class="btn" onclick={link.callback(|_| Msg::Close)}>{ "Cancel" }</button>
                        <button class={classes!("btn", "btn-primary", self.submitting.then_some("loading"))}
                            disabled={self.submitting} onclick={link.callback(|_| Msg::Submit)}>
                            { if updating { "Update" } else { "Create" } }
                        </button>
                    </div>
                </div>
            </TopSheet>
        }
    }
}
