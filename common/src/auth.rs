//! Session state held by the root component.
//!
//! The state only changes through [`AuthState::transition`]; the helpers
//! below translate API responses into events and navigation.

use crate::api::{ApiResponse, LOGIN_PATH};
use crate::form::outcome::{API_DOWN, Notice, UNKNOWN_ERROR};
use crate::model::auth::{AuthMethod, AuthorizationUrl, login_detail_message};
use crate::model::user::User;
use crate::routes::Route;

pub const LOGIN_FAILED: &str = "Failed to authenticate.";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated(User),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SessionCheckStarted,
    LoginStarted,
    Succeeded(User),
    Rejected(String),
    SignedOut,
}

impl AuthState {
    pub fn transition(self, event: AuthEvent) -> AuthState {
        match (self, event) {
            // a background re-check keeps the user on screen
            (AuthState::Authenticated(user), AuthEvent::SessionCheckStarted) => AuthState::Authenticated(user),
            (_, AuthEvent::SessionCheckStarted | AuthEvent::LoginStarted) => AuthState::Authenticating,
            (_, AuthEvent::Succeeded(user)) => AuthState::Authenticated(user),
            (_, AuthEvent::Rejected(reason)) => AuthState::Failed(reason),
            (_, AuthEvent::SignedOut) => AuthState::Unauthenticated,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AuthState::Authenticating)
    }
}

/// Result of `GET /user/me`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub event: AuthEvent,
    /// Where to go next, if anywhere.
    pub redirect: Option<String>,
}

/// Interprets the session check made at startup and after every login.
///
/// A 401 needs no navigation here: the client has already sent the user to
/// the login screen.
pub fn session_outcome(response: &ApiResponse, current_path: &str, from: Option<&str>) -> SessionOutcome {
    match response.status {
        Some(200) => match response.parse::<User>() {
            Some(user) => SessionOutcome {
                event: AuthEvent::Succeeded(user),
                redirect: (current_path == LOGIN_PATH)
                    .then(|| from.unwrap_or(Route::Dashboard.path()).to_string()),
            },
            None => SessionOutcome {
                event: AuthEvent::Rejected(UNKNOWN_ERROR.to_string()),
                redirect: None,
            },
        },
        Some(401) => SessionOutcome {
            event: AuthEvent::Rejected("Not signed in.".to_string()),
            redirect: None,
        },
        None => SessionOutcome {
            event: AuthEvent::Rejected(API_DOWN.to_string()),
            redirect: None,
        },
        Some(_) => SessionOutcome {
            event: AuthEvent::Rejected(UNKNOWN_ERROR.to_string()),
            redirect: None,
        },
    }
}

/// Result of `POST /auth/login` or the OAuth callback.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// The cookie is set; check the session to load the user.
    CheckSession,
    /// Rejected credentials, shown under the form.
    Detail(String),
    Failed(Notice),
}

pub fn login_outcome(response: &ApiResponse) -> LoginOutcome {
    match response.status {
        Some(200) | Some(204) => LoginOutcome::CheckSession,
        Some(400) => {
            let detail = response
                .data
                .as_ref()
                .and_then(|body| body.get("detail"))
                .and_then(|detail| detail.as_str())
                .unwrap_or_default();
            LoginOutcome::Detail(
                login_detail_message(detail)
                    .map(str::to_string)
                    .unwrap_or_else(|| detail.to_string()),
            )
        }
        _ => LoginOutcome::Failed(Notice::error(LOGIN_FAILED)),
    }
}

/// Result of `GET /auth/methods`. A 401 is expected before login and is
/// not an error.
pub fn auth_methods_outcome(response: &ApiResponse) -> Result<Vec<AuthMethod>, Option<Notice>> {
    match response.status {
        Some(200) => Ok(response.parse().unwrap_or_default()),
        Some(401) => Err(None),
        _ => Err(Some(Notice::error("Failed to get auth methods."))),
    }
}

/// Result of `GET /auth/{provider}/authorize`: the URL to send the browser to.
pub fn authorize_outcome(response: &ApiResponse) -> Result<String, Notice> {
    let failed = || Notice::error("Failed to navigate to authentication server.");
    if response.status != Some(200) {
        return Err(failed());
    }
    response
        .parse::<AuthorizationUrl>()
        .map(|url| url.authorization_url)
        .ok_or_else(failed)
}

/// What a route may show for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Render,
    /// Nothing is rendered until the session is known.
    Hide,
    RedirectDashboard,
}

pub fn access(state: &AuthState, route: &Route) -> Access {
    if !route.requires_auth() {
        return Access::Render;
    }
    match state.user() {
        None => Access::Hide,
        Some(user) if route.requires_superuser() && !user.is_superuser => Access::RedirectDashboard,
        Some(_) => Access::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(is_superuser: bool) -> User {
        User {
            id: "u-1".into(),
            email: "ops@example.com".into(),
            is_active: true,
            is_superuser,
            is_verified: true,
        }
    }

    #[test]
    fn login_flow_transitions() {
        let state = AuthState::default()
            .transition(AuthEvent::LoginStarted)
            .transition(AuthEvent::Succeeded(user(false)));
        assert_eq!(state.user().map(|u| u.email.as_str()), Some("ops@example.com"));

        let state = state.transition(AuthEvent::SessionCheckStarted);
        assert!(state.user().is_some());

        assert_eq!(state.transition(AuthEvent::SignedOut), AuthState::Unauthenticated);
    }

    #[test]
    fn rejected_login_fails() {
        let state = AuthState::Authenticating.transition(AuthEvent::Rejected("nope".into()));
        assert_eq!(state, AuthState::Failed("nope".into()));
    }

    #[test]
    fn signed_in_on_login_page_forwards() {
        let response = ApiResponse {
            status: Some(200),
            data: Some(json!({"id": "u-1", "email": "ops@example.com", "is_superuser": true})),
        };
        let outcome = session_outcome(&response, "/login", Some("/datasets/home"));
        assert_eq!(outcome.redirect.as_deref(), Some("/datasets/home"));
        let outcome = session_outcome(&response, "/login", None);
        assert_eq!(outcome.redirect.as_deref(), Some("/dashboard"));
        let outcome = session_outcome(&response, "/settings/home", None);
        assert_eq!(outcome.redirect, None);
    }

    #[test]
    fn bad_credentials_are_shown_inline() {
        let response = ApiResponse {
            status: Some(400),
            data: Some(json!({"detail": "LOGIN_BAD_CREDENTIALS"})),
        };
        assert_eq!(
            login_outcome(&response),
            LoginOutcome::Detail("Email or password is incorrect".into())
        );
        assert_eq!(
            login_outcome(&ApiResponse::no_response()),
            LoginOutcome::Failed(Notice::error(LOGIN_FAILED))
        );
    }

    #[test]
    fn settings_need_a_superuser() {
        let state = AuthState::Authenticated(user(false));
        assert_eq!(access(&state, &Route::Settings), Access::RedirectDashboard);
        assert_eq!(access(&state, &Route::Datasets), Access::Render);
        assert_eq!(access(&AuthState::Authenticating, &Route::Datasets), Access::Hide);
        assert_eq!(access(&AuthState::Unauthenticated, &Route::Login), Access::Render);
    }

    #[test]
    fn auth_methods_tolerate_unauthorized() {
        let response = ApiResponse { status: Some(401), data: None };
        assert_eq!(auth_methods_outcome(&response), Err(None));
        let response = ApiResponse { status: Some(200), data: Some(json!(["github"])) };
        assert_eq!(auth_methods_outcome(&response), Ok(vec![AuthMethod::Github]));
    }
}
