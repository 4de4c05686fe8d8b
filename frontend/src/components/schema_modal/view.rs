//! Rendering of the modal: variant selector, one control per field, the
//! status line and the footer buttons.

use common::form::family::FormFamily;
use common::form::{FieldWidget, FormField, ModalEvent, Phase, StatusLine};
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::{as_text, checkbox_value, input_value, is_selected, multi_select_value, select_value};
use super::messages::Msg;
use super::state::SchemaModal;
use crate::tops_sheet::top_sheet::TopSheet;

pub fn view<F>(component: &SchemaModal<F>, ctx: &Context<SchemaModal<F>>) -> Html
where
    F: FormFamily + Clone + PartialEq + 'static,
{
    let modal = &component.modal;
    let link = ctx.link();

    html! {
        <TopSheet open={modal.is_open()}>
            <div class="modal-form">
                <h2 class="modal-title">{ modal.title() }</h2>
                {
                    if modal.phase() == Phase::SchemaLoading {
                        html! { <div class="loading">{ "Loading..." }</div> }
                    } else {
                        html! {
                            <>
                                { build_variant_select(component, link) }
                                { for modal.fields().iter().map(|field| build_field(component, field, link)) }
                                { build_status(modal.status()) }
                            </>
                        }
                    }
                }
                { build_footer(component, link) }
            </div>
        </TopSheet>
    }
}

fn build_variant_select<F: FormFamily + Clone + PartialEq + 'static>(
    component: &SchemaModal<F>,
    link: &Scope<SchemaModal<F>>,
) -> Html {
    let modal = &component.modal;
    let options = modal.variant_options();
    if options.is_empty() {
        return html! {};
    }
    let current = modal.variant().unwrap_or_default().to_string();
    let description = options
        .iter()
        .find(|option| option.key == current)
        .and_then(|option| option.description.clone());
    let onchange = link.callback(|e: Event| Msg::Modal(ModalEvent::SelectVariant(select_value(&e))));

    html! {
        <div class="form-row">
            <label class="form-label">{ modal.family().noun() }</label>
            <select class="form-select" disabled={modal.variant_locked()} {onchange}>
                <option value="" selected={current.is_empty()} disabled=true>{ "Select..." }</option>
                { for options.iter().map(|option| html! {
                    <option value={option.key.clone()} selected={option.key == current}>
                        { option.label.clone() }
                    </option>
                }) }
            </select>
            {
                match (modal.variant_error(), description) {
                    (Some(error), _) => html! { <div class="form-error">{ error }</div> },
                    (None, Some(text)) => html! { <div class="form-help">{ text }</div> },
                    (None, None) => html! {},
                }
            }
        </div>
    }
}

fn build_field<F: FormFamily + Clone + PartialEq + 'static>(
    component: &SchemaModal<F>,
    field: &FormField,
    link: &Scope<SchemaModal<F>>,
) -> Html {
    let value = component.modal.values().get(&field.name);
    let error = component.modal.errors().get(&field.name);
    let name = field.name.clone();
    let disabled = component.modal.is_busy();

    let control = match &field.widget {
        FieldWidget::Select { options } => {
            let onchange = link.callback(move |e: Event| Msg::Input {
                name: name.clone(),
                raw: select_value(&e),
            });
            html! {
                <select class="form-select" {onchange} {disabled}>
                    <option value="" selected={value.is_none()}>{ "" }</option>
                    { for options.iter().map(|option| html! {
                        <option value={option.clone()} selected={is_selected(value, option)}>{ option.clone() }</option>
                    }) }
                </select>
            }
        }
        FieldWidget::MultiSelect { options } => {
            let onchange = link.callback(move |e: Event| Msg::Select {
                name: name.clone(),
                picked: multi_select_value(&e),
            });
            html! {
                <select class="form-select" multiple=true {onchange} {disabled}>
                    { for options.iter().map(|option| html! {
                        <option value={option.clone()} selected={is_selected(value, option)}>{ option.clone() }</option>
                    }) }
                </select>
            }
        }
        FieldWidget::Tags => build_tags(component, field, link),
        FieldWidget::Checkbox => {
            let onchange = link.callback(move |e: Event| Msg::Input {
                name: name.clone(),
                raw: checkbox_value(&e),
            });
            let checked = value.and_then(|v| v.as_bool()).unwrap_or(false);
            html! { <input type="checkbox" class="form-check" {checked} {onchange} {disabled} /> }
        }
        FieldWidget::Number { min, max, integer } => {
            let onchange = link.callback(move |e: Event| Msg::Input {
                name: name.clone(),
                raw: input_value(&e),
            });
            html! {
                <input
                    type="number"
                    class="form-input"
                    step={if *integer { "1" } else { "any" }}
                    min={min.map(|m| m.to_string())}
                    max={max.map(|m| m.to_string())}
                    value={as_text(value)}
                    {onchange}
                    {disabled}
                />
            }
        }
        FieldWidget::Password { placeholder } | FieldWidget::Text { placeholder } => {
            let kind = if matches!(field.widget, FieldWidget::Password { .. }) { "password" } else { "text" };
            let onchange = link.callback(move |e: Event| Msg::Input {
                name: name.clone(),
                raw: input_value(&e),
            });
            html! {
                <input
                    type={kind}
                    class="form-input"
                    placeholder={placeholder.clone().unwrap_or_default()}
                    value={as_text(value)}
                    {onchange}
                    {disabled}
                />
            }
        }
    };

    html! {
        <div class="form-row" key={field.name.clone()}>
            <label class="form-label" title={field.tooltip.clone()}>
                { field.label.clone() }
                { if field.required { html! { <span class="required">{ " *" }</span> } } else { html! {} } }
            </label>
            { control }
            { error.map(|message| html! { <div class="form-error">{ message.clone() }</div> }).unwrap_or_default() }
        </div>
    }
}

fn build_tags<F: FormFamily + Clone + PartialEq + 'static>(
    component: &SchemaModal<F>,
    field: &FormField,
    link: &Scope<SchemaModal<F>>,
) -> Html {
    let name = field.name.clone();
    let onkeydown = link.batch_callback(move |e: KeyboardEvent| {
        if e.key() != "Enter" {
            return None;
        }
        e.prevent_default();
        let input = e.target_unchecked_into::<HtmlInputElement>();
        let tag = input.value();
        input.set_value("");
        Some(Msg::AddTag {
            name: name.clone(),
            tag,
        })
    });

    html! {
        <div class="tags">
            { for component.tags(&field.name).into_iter().enumerate().map(|(index, tag)| {
                let name = field.name.clone();
                let onclick = link.callback(move |_| Msg::RemoveTag { name: name.clone(), index });
                html! {
                    <span class="tag">
                        { tag }
                        <button class="tag-remove" {onclick}>{ "×" }</button>
                    </span>
                }
            }) }
            <input
                type="text"
                class="form-input"
                placeholder={common::form::widget::TAGS_PLACEHOLDER}
                {onkeydown}
                disabled={component.modal.is_busy()}
            />
        </div>
    }
}

fn build_status(status: Option<&StatusLine>) -> Html {
    match status {
        None => html! {},
        Some(StatusLine::Success(message)) => html! {
            <div class="status status-success">{ message.clone() }</div>
        },
        Some(StatusLine::Failure(lines)) => html! {
            <div class="status status-failure">
                { for lines.iter().map(|line| html! { <div>{ line.clone() }</div> }) }
            </div>
        },
    }
}

fn build_footer<F: FormFamily + Clone + PartialEq + 'static>(
    component: &SchemaModal<F>,
    link: &Scope<SchemaModal<F>>,
) -> Html {
    let modal = &component.modal;
    let busy = modal.is_busy() || modal.phase() == Phase::SchemaLoading;
    html! {
        <div class="modal-footer">
            <button class="btn" onclick={link.callback(|_| Msg::Modal(ModalEvent::Cancel))}>
                { "Cancel" }
            </button>
            <button
                class={classes!("btn", "btn-primary", busy.then_some("loading"))}
                disabled={busy}
                onclick={link.callback(|_| Msg::Modal(ModalEvent::Submit))}
            >
                { modal.submit_label() }
            </button>
        </div>
    }
}
