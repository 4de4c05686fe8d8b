use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_verified: bool,
}

/// Payload of `POST /user` and `PATCH /user/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub is_superuser: bool,
    pub is_active: bool,
    pub is_verified: bool,
}

/// Which password rules a candidate satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordRequirements {
    pub length: bool,
    pub upper_case: bool,
    pub number: bool,
    pub special_char: bool,
}

pub const MIN_PASSWORD_LENGTH: usize = 8;

impl PasswordRequirements {
    pub fn check(password: &str) -> Self {
        Self {
            length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            upper_case: password.chars().any(char::is_uppercase),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special_char: password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        }
    }

    pub fn all_met(&self) -> bool {
        self.length && self.upper_case && self.number && self.special_char
    }

    /// Messages for the rules that are not met, in display order.
    pub fn unmet(&self) -> Vec<&'static str> {
        let mut unmet = Vec::new();
        if !self.length {
            unmet.push("At least 8 characters");
        }
        if !self.upper_case {
            unmet.push("At least one upper case letter");
        }
        if !self.number {
            unmet.push("At least one number");
        }
        if !self.special_char {
            unmet.push("At least one special character");
        }
        unmet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_password_meets_every_rule() {
        assert!(PasswordRequirements::check("Sup3r-secret").all_met());
    }

    #[test]
    fn reports_unmet_rules() {
        let requirements = PasswordRequirements::check("short");
        assert!(!requirements.all_met());
        assert_eq!(
            requirements.unmet(),
            vec![
                "At least 8 characters",
                "At least one upper case letter",
                "At least one number",
                "At least one special character"
            ]
        );
    }
}
