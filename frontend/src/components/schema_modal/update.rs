//! Turns UI messages into modal events and performs the effects the state
//! machine answers with.

use common::form::family::FormFamily;
use common::form::{Effect, ModalEvent};
use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::helpers::show_toast;

use super::messages::Msg;
use super::state::SchemaModal;

pub fn update<F>(component: &mut SchemaModal<F>, ctx: &Context<SchemaModal<F>>, msg: Msg) -> bool
where
    F: FormFamily + Clone + PartialEq + 'static,
{
    let event = match msg {
        Msg::Modal(event) => event,
        Msg::Input { name, raw } => {
            let Some(field) = component.field(&name) else {
                log::debug!("input for unknown field {name}");
                return false;
            };
            let value = field.coerce(&raw);
            ModalEvent::SetValue { name, value }
        }
        Msg::Select { name, picked } => {
            let Some(field) = component.field(&name) else {
                log::debug!("selection for unknown field {name}");
                return false;
            };
            let value = field.coerce_selection(picked);
            ModalEvent::SetValue { name, value }
        }
        Msg::AddTag { name, tag } => {
            let tag = tag.trim().to_string();
            let mut tags = component.tags(&name);
            if tag.is_empty() || tags.contains(&tag) {
                return false;
            }
            tags.push(tag);
            ModalEvent::SetValue {
                name,
                value: Some(Value::from(tags)),
            }
        }
        Msg::RemoveTag { name, index } => {
            let mut tags = component.tags(&name);
            if index >= tags.len() {
                return false;
            }
            tags.remove(index);
            ModalEvent::SetValue {
                name,
                value: (!tags.is_empty()).then(|| Value::from(tags)),
            }
        }
    };

    let effects = component.modal.handle(event);
    run_effects(ctx, effects);
    true
}

pub fn run_effects<F>(ctx: &Context<SchemaModal<F>>, effects: Vec<Effect>)
where
    F: FormFamily + Clone + PartialEq + 'static,
{
    for effect in effects {
        match effect {
            Effect::FetchSchemas { ticket, request } => {
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let response = api.execute(&request).await;
                    link.send_message(Msg::Modal(ModalEvent::SchemasLoaded { ticket, response }));
                });
            }
            Effect::Send { ticket, request } => {
                log::debug!("{} {}", request.method.as_str(), request.path);
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let response = api.execute(&request).await;
                    link.send_message(Msg::Modal(ModalEvent::Response { ticket, response }));
                });
            }
            Effect::ScheduleClose { ticket, delay_ms } => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    gloo_timers::future::TimeoutFuture::new(delay_ms).await;
                    link.send_message(Msg::Modal(ModalEvent::CloseElapsed { ticket }));
                });
            }
            Effect::Notify(notice) => show_toast(&notice),
            Effect::Submitted => {
                ctx.props().on_submitted.emit(());
                ctx.props().on_close.emit(());
            }
            Effect::Cancelled => ctx.props().on_close.emit(()),
        }
    }
}
