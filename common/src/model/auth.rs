use serde::{Deserialize, Serialize};

/// Identity providers the backend can be configured with, as listed by
/// `GET /auth/methods`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    #[serde(rename = "username_and_password")]
    UsernameAndPassword,
    Github,
    Google,
    Microsoft,
    Okta,
}

impl AuthMethod {
    /// `true` for providers that go through the OAuth authorize/callback dance.
    pub fn is_oauth(self) -> bool {
        !matches!(self, AuthMethod::UsernameAndPassword)
    }

    /// Path segment of `/auth/{provider}/authorize` and the `provider` query
    /// parameter of the callback.
    pub fn provider(self) -> &'static str {
        match self {
            AuthMethod::UsernameAndPassword => "username_and_password",
            AuthMethod::Github => "github",
            AuthMethod::Google => "google",
            AuthMethod::Microsoft => "microsoft",
            AuthMethod::Okta => "okta",
        }
    }

    pub fn from_provider(provider: &str) -> Option<AuthMethod> {
        [
            AuthMethod::UsernameAndPassword,
            AuthMethod::Github,
            AuthMethod::Google,
            AuthMethod::Microsoft,
            AuthMethod::Okta,
        ]
        .into_iter()
        .find(|method| method.provider() == provider)
    }

    pub fn button_label(self) -> &'static str {
        match self {
            AuthMethod::UsernameAndPassword => "Log in",
            AuthMethod::Github => "Login with Github",
            AuthMethod::Google => "Login with Google",
            AuthMethod::Microsoft => "Login with Microsoft",
            AuthMethod::Okta => "Login with Okta",
        }
    }

    /// Button background colour.
    pub fn background(self) -> &'static str {
        match self {
            AuthMethod::UsernameAndPassword => "#1890ff",
            AuthMethod::Github => "#333333",
            AuthMethod::Google => "#346DF1",
            AuthMethod::Microsoft => "#1A1A1B",
            AuthMethod::Okta => "#00297A",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AuthMethod::UsernameAndPassword => "/static/images/lock.svg",
            AuthMethod::Github => "/static/images/github.svg",
            AuthMethod::Google => "/static/images/google.svg",
            AuthMethod::Microsoft => "/static/images/microsoft.svg",
            AuthMethod::Okta => "/static/images/okta.svg",
        }
    }
}

/// Body of `GET /auth/{provider}/authorize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationUrl {
    pub authorization_url: String,
}

/// Maps the `detail` code of a rejected login to the message shown under
/// the form.
pub fn login_detail_message(detail: &str) -> Option<&'static str> {
    match detail {
        "LOGIN_BAD_CREDENTIALS" => Some("Email or password is incorrect"),
        "LOGIN_USER_NOT_VERIFIED" => Some("Email has not been verified."),
        _ => None,
    }
}
