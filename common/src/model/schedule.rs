use serde::{Deserialize, Serialize};

/// When a dataset validation runs. Mirrors the three APScheduler trigger
/// kinds the backend accepts, discriminated by the `trigger` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "trigger", rename_all = "lowercase")]
pub enum Trigger {
    Cron {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        year: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        month: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        week: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        day: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        day_of_week: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hour: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minute: Option<String>,
    },
    Interval {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        days: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hours: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minutes: Option<u32>,
    },
    Date {
        run_date: String,
    },
}

impl Trigger {
    pub fn kind(&self) -> &'static str {
        match self {
            Trigger::Cron { .. } => "cron",
            Trigger::Interval { .. } => "interval",
            Trigger::Date { .. } => "date",
        }
    }

    /// Date triggers fire once, so there is nothing to preview.
    pub fn has_next_run_times(&self) -> bool {
        !matches!(self, Trigger::Date { .. })
    }
}

fn default_misfire_grace_time() -> Option<u32> {
    Some(300)
}

fn default_max_instances() -> Option<u32> {
    Some(1)
}

/// Payload of `POST /schedules` and `PUT /schedules/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub trigger: Trigger,
    #[serde(default = "default_misfire_grace_time")]
    pub misfire_grace_time: Option<u32>,
    #[serde(default = "default_max_instances")]
    pub max_instances: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    #[serde(default)]
    pub dataset_id: Option<String>,
    #[serde(default)]
    pub datasource_id: Option<String>,
    pub trigger: Trigger,
    #[serde(default)]
    pub misfire_grace_time: Option<u32>,
    #[serde(default)]
    pub max_instances: Option<u32>,
    #[serde(default)]
    pub next_run_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints;
    use serde_json::json;

    #[test]
    fn cron_trigger_serializes_with_discriminator() {
        let request = ScheduleRequest {
            trigger: Trigger::Cron {
                start_date: None,
                end_date: None,
                year: None,
                month: None,
                week: None,
                day: None,
                day_of_week: Some("mon-fri".into()),
                hour: Some("6".into()),
                minute: Some("0".into()),
            },
            misfire_grace_time: Some(300),
            max_instances: Some(1),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "trigger": {"trigger": "cron", "day_of_week": "mon-fri", "hour": "6", "minute": "0"},
                "misfire_grace_time": 300,
                "max_instances": 1
            })
        );
    }

    #[test]
    fn defaults_apply_when_absent() {
        let request: ScheduleRequest = serde_json::from_value(json!({
            "trigger": {"trigger": "date", "run_date": "2026-11-01T09:00:00"}
        }))
        .unwrap();
        assert_eq!(request.misfire_grace_time, Some(300));
        assert_eq!(request.max_instances, Some(1));
        assert!(!request.trigger.has_next_run_times());
    }

    #[test]
    fn schedule_request_is_posted_for_a_dataset() {
        let request = ScheduleRequest {
            trigger: Trigger::Interval {
                start_date: None,
                end_date: None,
                days: None,
                hours: Some(4),
                minutes: None,
            },
            misfire_grace_time: Some(300),
            max_instances: Some(1),
        };
        let req = endpoints::create_schedule("ds-1", serde_json::to_value(&request).unwrap());
        assert_eq!(req.url("http://api").unwrap(), "http://api/schedules?dataset_id=ds-1");
        assert_eq!(req.json_body().unwrap()["trigger"]["trigger"], "interval");
    }
}
