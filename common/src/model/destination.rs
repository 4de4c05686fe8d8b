use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A notification target. Type-specific settings, including the
/// `destination_type` discriminator, live in `kwargs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub key: String,
    pub destination_name: String,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
}

impl Destination {
    pub fn destination_type(&self) -> Option<&str> {
        self.kwargs.get("destination_type").and_then(Value::as_str)
    }

    pub fn kind(&self) -> Option<DestinationKind> {
        self.destination_type().and_then(DestinationKind::from_title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationKind {
    Slack,
    MicrosoftTeams,
    Email,
    PagerDuty,
    OpsGenie,
}

impl DestinationKind {
    pub const ALL: [DestinationKind; 5] = [
        DestinationKind::Slack,
        DestinationKind::MicrosoftTeams,
        DestinationKind::Email,
        DestinationKind::PagerDuty,
        DestinationKind::OpsGenie,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DestinationKind::Slack => "Slack",
            DestinationKind::MicrosoftTeams => "Microsoft Teams",
            DestinationKind::Email => "Email",
            DestinationKind::PagerDuty => "PagerDuty",
            DestinationKind::OpsGenie => "OpsGenie",
        }
    }

    pub fn from_title(title: &str) -> Option<DestinationKind> {
        DestinationKind::ALL
            .into_iter()
            .find(|kind| kind.title().eq_ignore_ascii_case(title))
    }

    pub fn icon(self) -> &'static str {
        match self {
            DestinationKind::Slack => "/static/images/slack.svg",
            DestinationKind::MicrosoftTeams => "/static/images/microsoft_teams.svg",
            DestinationKind::Email => "/static/images/email.svg",
            DestinationKind::PagerDuty => "/static/images/pager_duty.svg",
            DestinationKind::OpsGenie => "/static/images/ops_genie.svg",
        }
    }
}
