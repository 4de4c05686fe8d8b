//! List screens: one collection, refreshed on explicit request.
//!
//! Screens never re-fetch as a side effect of rendering. They send
//! [`ListCommand::RefreshRequested`] and perform the [`ListEffect::Fetch`]
//! they get back. A refresh asked for while a fetch is running is folded
//! into a single follow-up fetch.

use serde::de::DeserializeOwned;

use crate::api::{ApiResponse, ClientError};
use crate::form::outcome::{API_DOWN, Notice, UNKNOWN_ERROR};

#[derive(Debug, Clone, PartialEq)]
pub enum ListCommand {
    RefreshRequested,
    Loaded {
        ticket: u64,
        response: Result<ApiResponse, ClientError>,
    },
    DeleteRequested(String),
    Deleted {
        key: String,
        response: Result<ApiResponse, ClientError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEffect {
    Fetch { ticket: u64 },
    Delete { key: String },
    Notify(Notice),
}

#[derive(Debug, Clone)]
pub struct ListState<T> {
    noun: &'static str,
    items: Vec<T>,
    loading: bool,
    refresh_queued: bool,
    ticket: u64,
}

impl<T: DeserializeOwned> ListState<T> {
    /// `noun` is the plural used in messages, e.g. `"datasets"`.
    pub fn new(noun: &'static str) -> Self {
        Self {
            noun,
            items: Vec::new(),
            loading: false,
            refresh_queued: false,
            ticket: 0,
        }
    }

    pub fn handle(&mut self, command: ListCommand) -> Vec<ListEffect> {
        match command {
            ListCommand::RefreshRequested => self.refresh(),
            ListCommand::Loaded { ticket, response } => self.loaded(ticket, response),
            ListCommand::DeleteRequested(key) => vec![ListEffect::Delete { key }],
            ListCommand::Deleted { key, response } => self.deleted(&key, response),
        }
    }

    fn refresh(&mut self) -> Vec<ListEffect> {
        if self.loading {
            self.refresh_queued = true;
            return Vec::new();
        }
        self.loading = true;
        self.ticket += 1;
        vec![ListEffect::Fetch { ticket: self.ticket }]
    }

    fn loaded(&mut self, ticket: u64, response: Result<ApiResponse, ClientError>) -> Vec<ListEffect> {
        if ticket != self.ticket {
            return Vec::new();
        }
        self.loading = false;

        let mut effects = Vec::new();
        match response {
            Ok(resp) if resp.status == Some(200) => match resp.parse::<Vec<T>>() {
                Some(items) => self.items = items,
                None => effects.push(ListEffect::Notify(self.load_error())),
            },
            Ok(resp) if resp.is_unreachable() => effects.push(ListEffect::Notify(Notice::error(API_DOWN))),
            Ok(_) => effects.push(ListEffect::Notify(self.load_error())),
            Err(err) => {
                log::error!("{err}");
                effects.push(ListEffect::Notify(self.load_error()));
            }
        }

        if std::mem::take(&mut self.refresh_queued) {
            effects.extend(self.refresh());
        }
        effects
    }

    fn deleted(&mut self, key: &str, response: Result<ApiResponse, ClientError>) -> Vec<ListEffect> {
        let response = match response {
            Ok(response) => response,
            Err(err) => {
                log::error!("{err}");
                return vec![ListEffect::Notify(Notice::error(UNKNOWN_ERROR))];
            }
        };
        if response.is_success() {
            log::debug!("deleted {key}");
            return self.refresh();
        }
        let notice = match (response.status, response.detail()) {
            (None, _) => Notice::error(API_DOWN),
            (Some(_), Some(detail)) => Notice::error(detail.lines().join("\n")),
            (Some(_), None) => Notice::error(UNKNOWN_ERROR),
        };
        vec![ListEffect::Notify(notice)]
    }

    fn load_error(&self) -> Notice {
        Notice::error(format!("An error occurred while retrieving {}.", self.noun))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::destination::Destination;
    use serde_json::json;

    fn ok(data: serde_json::Value) -> Result<ApiResponse, ClientError> {
        Ok(ApiResponse { status: Some(200), data: Some(data) })
    }

    #[test]
    fn refresh_while_loading_is_coalesced() {
        let mut list: ListState<Destination> = ListState::new("destinations");
        assert_eq!(list.handle(ListCommand::RefreshRequested), vec![ListEffect::Fetch { ticket: 1 }]);
        assert!(list.handle(ListCommand::RefreshRequested).is_empty());
        assert!(list.handle(ListCommand::RefreshRequested).is_empty());

        let effects = list.handle(ListCommand::Loaded { ticket: 1, response: ok(json!([])) });
        assert_eq!(effects, vec![ListEffect::Fetch { ticket: 2 }]);
        assert!(list.is_loading());
    }

    #[test]
    fn loads_items() {
        let mut list: ListState<Destination> = ListState::new("destinations");
        list.handle(ListCommand::RefreshRequested);
        let effects = list.handle(ListCommand::Loaded {
            ticket: 1,
            response: ok(json!([{
                "key": "d-1",
                "destination_name": "alerts",
                "kwargs": {"destination_type": "Slack"}
            }])),
        });
        assert!(effects.is_empty());
        assert_eq!(list.items().len(), 1);
        assert!(!list.is_loading());
    }

    #[test]
    fn failed_load_notifies() {
        let mut list: ListState<Destination> = ListState::new("destinations");
        list.handle(ListCommand::RefreshRequested);
        let effects = list.handle(ListCommand::Loaded {
            ticket: 1,
            response: Ok(ApiResponse { status: Some(500), data: None }),
        });
        assert_eq!(
            effects,
            vec![ListEffect::Notify(Notice::error("An error occurred while retrieving destinations."))]
        );
    }

    #[test]
    fn delete_then_refresh() {
        let mut list: ListState<Destination> = ListState::new("destinations");
        assert_eq!(
            list.handle(ListCommand::DeleteRequested("d-1".into())),
            vec![ListEffect::Delete { key: "d-1".into() }]
        );
        let effects = list.handle(ListCommand::Deleted {
            key: "d-1".into(),
            response: Ok(ApiResponse { status: Some(200), data: None }),
        });
        assert_eq!(effects, vec![ListEffect::Fetch { ticket: 1 }]);
    }

    #[test]
    fn delete_conflict_shows_detail() {
        let mut list: ListState<Destination> = ListState::new("destinations");
        let effects = list.handle(ListCommand::Deleted {
            key: "d-1".into(),
            response: Ok(ApiResponse {
                status: Some(409),
                data: Some(json!({"detail": "Destination is used by 2 actions"})),
            }),
        });
        assert_eq!(
            effects,
            vec![ListEffect::Notify(Notice::error("Destination is used by 2 actions"))]
        );
    }
}
