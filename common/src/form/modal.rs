//! The modal lifecycle shared by every family:
//!
//! ```text
//! Closed -> SchemaLoading -> Ready -> VariantSelected -> Submitting
//!   Submitting -> Succeeded -> Closed
//!   Submitting -> VariantSelected (failure)
//! ```
//!
//! The state is driven by [`ModalEvent`]s and answers with [`Effect`]s for
//! the host to carry out. Every request carries the ticket it was issued
//! under; answers arriving under an older ticket are dropped.

use indexmap::IndexMap;
use serde_json::Value;

use super::family::{FormFamily, ModalMode, Prefill};
use super::field::{FormField, validate_form};
use super::outcome::{Notice, SubmitOutcome, UNKNOWN_ERROR, classify_response};
use super::values::FormValues;
use crate::api::{ApiRequest, ApiResponse, ClientError};
use crate::model::schema::ResourceSchema;

/// Delay between a successful submit and the modal closing itself.
pub const CLOSE_DELAY_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    SchemaLoading,
    Ready,
    VariantSelected,
    Submitting,
    Succeeded,
}

/// Line under the form reporting the last submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Success(String),
    Failure(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent {
    Open(ModalMode),
    SchemasLoaded {
        ticket: u64,
        response: Result<ApiResponse, ClientError>,
    },
    SelectVariant(String),
    SetValue {
        name: String,
        value: Option<Value>,
    },
    Submit,
    Response {
        ticket: u64,
        response: Result<ApiResponse, ClientError>,
    },
    CloseElapsed {
        ticket: u64,
    },
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchSchemas { ticket: u64, request: ApiRequest },
    Send { ticket: u64, request: ApiRequest },
    ScheduleClose { ticket: u64, delay_ms: u32 },
    Notify(Notice),
    /// The record was saved and the modal closed; the parent should refresh.
    Submitted,
    Cancelled,
}

/// A choice in the variant selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOption {
    pub key: String,
    pub label: String,
    pub description: Option<String>,
}

pub struct ModalState<F> {
    family: F,
    phase: Phase,
    mode: Option<ModalMode>,
    ticket: u64,
    schemas: Vec<ResourceSchema>,
    variant: Option<String>,
    fields: Vec<FormField>,
    values: FormValues,
    errors: IndexMap<String, String>,
    variant_error: Option<String>,
    status: Option<StatusLine>,
    pending_prefill: Option<Prefill>,
}

impl<F: FormFamily> ModalState<F> {
    pub fn new(family: F) -> Self {
        Self {
            family,
            phase: Phase::Closed,
            mode: None,
            ticket: 0,
            schemas: Vec::new(),
            variant: None,
            fields: Vec::new(),
            values: FormValues::new(),
            errors: IndexMap::new(),
            variant_error: None,
            status: None,
            pending_prefill: None,
        }
    }

    pub fn handle(&mut self, event: ModalEvent) -> Vec<Effect> {
        match event {
            ModalEvent::Open(mode) => self.open(mode),
            ModalEvent::SchemasLoaded { ticket, response } => self.schemas_loaded(ticket, response),
            ModalEvent::SelectVariant(key) => {
                self.select_variant(&key);
                Vec::new()
            }
            ModalEvent::SetValue { name, value } => {
                self.set_value(&name, value);
                Vec::new()
            }
            ModalEvent::Submit => self.submit(),
            ModalEvent::Response { ticket, response } => self.response(ticket, response),
            ModalEvent::CloseElapsed { ticket } => self.close_elapsed(ticket),
            ModalEvent::Cancel => {
                self.reset();
                vec![Effect::Cancelled]
            }
        }
    }

    fn open(&mut self, mode: ModalMode) -> Vec<Effect> {
        self.reset();
        self.pending_prefill = match &mode {
            ModalMode::Update { record, .. } => Some(self.family.prefill(record)),
            ModalMode::Create => None,
        };
        self.mode = Some(mode);
        self.phase = Phase::SchemaLoading;
        self.fields = self.family.base_fields();
        vec![Effect::FetchSchemas {
            ticket: self.ticket,
            request: self.family.schema_request(),
        }]
    }

    fn schemas_loaded(&mut self, ticket: u64, response: Result<ApiResponse, ClientError>) -> Vec<Effect> {
        if ticket != self.ticket || self.phase != Phase::SchemaLoading {
            log::debug!("dropping schemas for ticket {ticket}");
            return Vec::new();
        }
        self.phase = Phase::Ready;

        let schemas = match &response {
            Ok(resp) if resp.status == Some(200) => resp.data.as_ref().and_then(|body| self.family.variants(body)),
            Ok(_) => None,
            Err(err) => {
                log::error!("{err}");
                None
            }
        };
        let Some(schemas) = schemas else {
            return vec![Effect::Notify(Notice::error(self.family.schema_error_message()))];
        };
        self.schemas = schemas;

        if let Some(prefill) = self.pending_prefill.take() {
            self.values = prefill.values;
            if let Some(variant) = prefill.variant {
                self.apply_variant(&variant, true);
            }
        }
        Vec::new()
    }

    fn select_variant(&mut self, key: &str) {
        if !matches!(self.phase, Phase::Ready | Phase::VariantSelected) {
            log::debug!("variant change ignored in {:?}", self.phase);
            return;
        }
        if self.variant_locked() && self.variant.is_some() {
            return;
        }
        self.apply_variant(key, false);
    }

    fn apply_variant(&mut self, key: &str, keep_values: bool) {
        let Some(schema) = self.find_schema(key) else {
            log::warn!("unknown {} variant {key:?}", self.family.noun());
            return;
        };
        let key = self.family.variant_key(schema).unwrap_or_else(|| key.to_string());
        let variant_fields = self.family.variant_fields(schema);

        let base_fields = self.family.base_fields();
        if !keep_values && self.variant.as_deref() != Some(key.as_str()) {
            let base: Vec<&str> = base_fields.iter().map(|f| f.name.as_str()).collect();
            self.values.retain(&base);
        }
        for field in &variant_fields {
            if self.values.get(&field.name).is_none() {
                self.values.set(&field.name, field.initial_value());
            }
        }

        self.fields = base_fields;
        self.fields.extend(variant_fields);
        self.variant = Some(key);
        self.variant_error = None;
        self.errors.clear();
        self.status = None;
        self.phase = Phase::VariantSelected;
    }

    fn set_value(&mut self, name: &str, value: Option<Value>) {
        if !matches!(self.phase, Phase::Ready | Phase::VariantSelected) {
            log::debug!("input to {name} ignored in {:?}", self.phase);
            return;
        }
        self.values.set(name, value);
        self.errors.shift_remove(name);
    }

    fn submit(&mut self) -> Vec<Effect> {
        match self.phase {
            Phase::Ready | Phase::VariantSelected => {}
            Phase::Submitting => {
                log::debug!("submit ignored, a request is in flight");
                return Vec::new();
            }
            other => {
                log::debug!("submit ignored in {other:?}");
                return Vec::new();
            }
        }

        self.status = None;
        self.errors = validate_form(&self.fields, &self.values);
        self.variant_error = match self.variant {
            Some(_) => None,
            None => Some(self.family.variant_required_message().to_string()),
        };
        let (Some(variant), true) = (self.variant.clone(), self.errors.is_empty()) else {
            return Vec::new();
        };
        let Some(mode) = self.mode.as_ref() else {
            return Vec::new();
        };

        let request = self
            .family
            .build_payload(&variant, &self.rendered_values())
            .and_then(|payload| self.family.submit_request(mode, &variant, payload));
        match request {
            Ok(request) => {
                self.ticket += 1;
                self.phase = Phase::Submitting;
                vec![Effect::Send {
                    ticket: self.ticket,
                    request,
                }]
            }
            Err(err) => {
                self.status = Some(StatusLine::Failure(vec![err.to_string()]));
                Vec::new()
            }
        }
    }

    fn response(&mut self, ticket: u64, response: Result<ApiResponse, ClientError>) -> Vec<Effect> {
        if ticket != self.ticket || self.phase != Phase::Submitting {
            log::debug!("dropping response for ticket {ticket}");
            return Vec::new();
        }
        self.phase = Phase::VariantSelected;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                log::error!("{err}");
                return vec![Effect::Notify(Notice::error(UNKNOWN_ERROR))];
            }
        };
        match classify_response(&response) {
            SubmitOutcome::Success(_) => {
                self.phase = Phase::Succeeded;
                self.status = Some(StatusLine::Success(self.family.success_message().to_string()));
                vec![Effect::ScheduleClose {
                    ticket: self.ticket,
                    delay_ms: CLOSE_DELAY_MS,
                }]
            }
            SubmitOutcome::Inline(lines) => {
                self.status = Some(StatusLine::Failure(lines));
                Vec::new()
            }
            SubmitOutcome::Toast(notice) => vec![Effect::Notify(notice)],
            SubmitOutcome::Unauthorized => {
                self.status = None;
                Vec::new()
            }
        }
    }

    fn close_elapsed(&mut self, ticket: u64) -> Vec<Effect> {
        if ticket != self.ticket || self.phase != Phase::Succeeded {
            return Vec::new();
        }
        self.reset();
        vec![Effect::Submitted]
    }

    /// Back to `Closed` with nothing carried over. The ticket moves on so
    /// answers to anything still in flight are dropped.
    fn reset(&mut self) {
        self.ticket += 1;
        self.phase = Phase::Closed;
        self.mode = None;
        self.schemas.clear();
        self.variant = None;
        self.fields.clear();
        self.values.clear();
        self.errors.clear();
        self.variant_error = None;
        self.status = None;
        self.pending_prefill = None;
    }

    fn find_schema(&self, key: &str) -> Option<&ResourceSchema> {
        self.schemas.iter().find(|schema| {
            self.family
                .variant_key(schema)
                .is_some_and(|k| k.eq_ignore_ascii_case(key))
        })
    }

    fn rendered_values(&self) -> FormValues {
        let mut values = FormValues::new();
        for field in &self.fields {
            values.set(&field.name, self.values.get(&field.name).cloned());
        }
        values
    }

    pub fn family(&self) -> &F {
        &self.family
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != Phase::Closed
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn mode(&self) -> Option<&ModalMode> {
        self.mode.as_ref()
    }

    pub fn title(&self) -> String {
        let mode = self.mode.clone().unwrap_or(ModalMode::Create);
        self.family.title(&mode)
    }

    pub fn submit_label(&self) -> &'static str {
        self.mode.as_ref().map_or("Create", ModalMode::verb)
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    pub fn variant_locked(&self) -> bool {
        self.family.variant_locked_on_update() && self.mode.as_ref().is_some_and(ModalMode::is_update)
    }

    pub fn variant_options(&self) -> Vec<VariantOption> {
        self.schemas
            .iter()
            .filter_map(|schema| {
                Some(VariantOption {
                    key: self.family.variant_key(schema)?,
                    label: schema.title.clone(),
                    description: schema.description.clone(),
                })
            })
            .collect()
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    pub fn variant_error(&self) -> Option<&str> {
        self.variant_error.as_deref()
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }
}
