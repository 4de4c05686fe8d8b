mod support;

use futures::executor::block_on;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use swiple_common::api::Method;
use swiple_common::form::{
    Effect, ExpectationFamily, ModalEvent, ModalMode, ModalState, Notice, Phase, StatusLine,
};
use swiple_common::validator::{build_validation_errors, validate};
use support::{MockTransport, RecordingNavigator, client, drive};

fn expectation_schemas() -> Value {
    json!([
        {
            "title": "Expect column values to be between",
            "description": "Expect column entries to be between a minimum value and a maximum value.",
            "properties": {
                "expectation_type": {"default": "expect_column_values_to_be_between", "type": "string"},
                "kwargs": {
                    "type": "object",
                    "properties": {
                        "column": {"title": "Column", "type": "string", "form_type": "column_select"},
                        "min_value": {"title": "Min Value", "type": "number"},
                        "max_value": {"title": "Max Value", "type": "number"},
                        "mostly": {"title": "Mostly", "type": "number", "minimum": 0, "maximum": 1},
                        "result_format": {"title": "Result Format", "type": "string", "default": "BASIC"},
                        "include_config": {"title": "Include Config", "type": "boolean"},
                        "catch_exceptions": {"title": "Catch Exceptions", "type": "boolean"}
                    },
                    "required": ["column", "min_value", "max_value"]
                }
            }
        },
        {
            "title": "Expect column to exist",
            "properties": {
                "expectation_type": {"default": "expect_column_to_exist", "type": "string"},
                "kwargs": {
                    "type": "object",
                    "properties": {"column": {"title": "Column", "type": "string"}},
                    "required": ["column"]
                }
            }
        }
    ])
}

fn family() -> ExpectationFamily {
    ExpectationFamily {
        datasource_id: "ds-1".into(),
        dataset_id: "set-1".into(),
        sample_columns: Some(vec!["id".into(), "age".into()]),
    }
}

fn set(name: &str, value: Value) -> ModalEvent {
    ModalEvent::SetValue {
        name: name.into(),
        value: Some(value),
    }
}

fn select_between() -> ModalEvent {
    ModalEvent::SelectVariant("expect_column_values_to_be_between".into())
}

#[test]
fn create_between_expectation_end_to_end() {
    let transport = MockTransport::new();
    transport
        .reply(200, expectation_schemas())
        .reply(200, json!({"key": "exp-1"}));
    let navigator = RecordingNavigator::at("/dataset/home");
    let client = client(&transport, &navigator);
    let mut modal = ModalState::new(family());

    block_on(async {
        drive(&mut modal, &client, ModalEvent::Open(ModalMode::Create)).await;
        drive(&mut modal, &client, select_between()).await;
        drive(&mut modal, &client, set("column", json!("age"))).await;
        drive(&mut modal, &client, set("min_value", json!(0))).await;
        drive(&mut modal, &client, set("max_value", json!(120))).await;
        let effects = drive(&mut modal, &client, ModalEvent::Submit).await;
        assert!(matches!(effects.last(), Some(Effect::ScheduleClose { delay_ms: 500, .. })));
    });

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    let post = &requests[1];
    assert_eq!(post.method, Method::Post);
    assert_eq!(post.path, "/expectations");
    assert_eq!(
        post.json_body(),
        Some(&json!({
            "datasource_id": "ds-1",
            "dataset_id": "set-1",
            "expectation_type": "expect_column_values_to_be_between",
            "kwargs": {"column": "age", "min_value": 0, "max_value": 120}
        }))
    );
    assert_eq!(modal.phase(), Phase::Succeeded);
    assert_eq!(modal.status(), Some(&StatusLine::Success("Looks good!".into())));
}

#[test]
fn column_select_offers_sampled_columns() {
    let transport = MockTransport::new();
    transport.reply(200, expectation_schemas());
    let navigator = RecordingNavigator::at("/dataset/home");
    let client = client(&transport, &navigator);
    let mut modal = ModalState::new(family());

    block_on(async {
        drive(&mut modal, &client, ModalEvent::Open(ModalMode::Create)).await;
        drive(&mut modal, &client, select_between()).await;
    });

    let names: Vec<_> = modal.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["column", "min_value", "max_value", "mostly"]);
    assert_eq!(
        modal.fields()[0].widget,
        swiple_common::form::FieldWidget::Select {
            options: vec!["id".into(), "age".into()]
        }
    );
}

#[test]
fn missing_required_field_never_reaches_the_network() {
    let transport = MockTransport::new();
    transport.reply(200, expectation_schemas());
    let navigator = RecordingNavigator::at("/dataset/home");
    let client = client(&transport, &navigator);
    let mut modal = ModalState::new(family());

    block_on(async {
        drive(&mut modal, &client, ModalEvent::Open(ModalMode::Create)).await;
        drive(&mut modal, &client, select_between()).await;
        drive(&mut modal, &client, set("column", json!("age"))).await;
        drive(&mut modal, &client, set("min_value", json!(0))).await;
        let effects = drive(&mut modal, &client, ModalEvent::Submit).await;
        assert!(effects.is_empty());
    });

    // only the schema fetch
    assert_eq!(transport.calls(), 1);
    assert_eq!(
        modal.errors().get("max_value").map(String::as_str),
        Some("Max Value is required")
    );
    assert_eq!(modal.phase(), Phase::VariantSelected);
}

#[test]
fn every_required_field_gates_submission() {
    for missing in ["column", "min_value", "max_value"] {
        let transport = MockTransport::new();
        transport.reply(200, expectation_schemas());
        let navigator = RecordingNavigator::at("/dataset/home");
        let client = client(&transport, &navigator);
        let mut modal = ModalState::new(family());

        block_on(async {
            drive(&mut modal, &client, ModalEvent::Open(ModalMode::Create)).await;
            drive(&mut modal, &client, select_between()).await;
            for (name, value) in [("column", json!("age")), ("min_value", json!(0)), ("max_value", json!(1))] {
                if name != missing {
                    drive(&mut modal, &client, set(name, value)).await;
                }
            }
            drive(&mut modal, &client, ModalEvent::Submit).await;
        });

        assert_eq!(transport.calls(), 1, "{missing} left empty");
    }
}

#[test]
fn second_submit_while_pending_is_ignored() {
    let transport = MockTransport::new();
    transport.reply(200, expectation_schemas());
    let navigator = RecordingNavigator::at("/dataset/home");
    let client = client(&transport, &navigator);
    let mut modal = ModalState::new(family());

    block_on(async {
        drive(&mut modal, &client, ModalEvent::Open(ModalMode::Create)).await;
        drive(&mut modal, &client, ModalEvent::SelectVariant("expect_column_to_exist".into())).await;
        drive(&mut modal, &client, set("column", json!("id"))).await;
    });

    // the host has not answered the first send yet
    let first = modal.handle(ModalEvent::Submit);
    let second = modal.handle(ModalEvent::Submit);
    assert!(matches!(&first[..], [Effect::Send { .. }]));
    assert!(second.is_empty());
    assert!(modal.is_busy());

    let Effect::Send { ticket, request } = first[0].clone() else {
        unreachable!()
    };
    transport.reply(200, json!({"key": "exp-2"}));
    let response = block_on(client.execute(&request));
    modal.handle(ModalEvent::Response { ticket, response });

    // one schema fetch, one create
    assert_eq!(transport.calls(), 2);
    assert_eq!(modal.phase(), Phase::Succeeded);
}

#[test]
fn cancel_resets_from_every_state() {
    // closed, ready, variant selected, after two rejected submits
    let setups: Vec<Vec<ModalEvent>> = vec![
        vec![],
        vec![ModalEvent::Open(ModalMode::Create)],
        vec![ModalEvent::Open(ModalMode::Create), select_between()],
        vec![
            ModalEvent::Open(ModalMode::Create),
            select_between(),
            set("column", json!("age")),
            ModalEvent::Submit,
            ModalEvent::Submit,
        ],
    ];

    for events in setups {
        let transport = MockTransport::new();
        transport.reply(200, expectation_schemas());
        let navigator = RecordingNavigator::at("/dataset/home");
        let client = client(&transport, &navigator);
        let mut modal = ModalState::new(family());
        block_on(async {
            for event in events {
                drive(&mut modal, &client, event).await;
            }
        });

        for _ in 0..2 {
            assert_eq!(modal.handle(ModalEvent::Cancel), vec![Effect::Cancelled]);
            assert_eq!(modal.phase(), Phase::Closed);
            assert!(modal.values().is_empty());
            assert!(modal.errors().is_empty());
            assert!(modal.fields().is_empty());
            assert_eq!(modal.variant(), None);
            assert_eq!(modal.status(), None);
            assert!(modal.variant_options().is_empty());
        }
    }

    // still waiting for schemas; the late answer is dropped
    let mut modal = ModalState::new(family());
    let Effect::FetchSchemas { ticket, .. } = modal.handle(ModalEvent::Open(ModalMode::Create))[0].clone() else {
        unreachable!()
    };
    assert_eq!(modal.handle(ModalEvent::Cancel), vec![Effect::Cancelled]);
    let late = modal.handle(ModalEvent::SchemasLoaded {
        ticket,
        response: Ok(swiple_common::api::ApiResponse {
            status: Some(200),
            data: Some(expectation_schemas()),
        }),
    });
    assert!(late.is_empty());
    assert!(modal.variant_options().is_empty());
    assert_eq!(modal.phase(), Phase::Closed);
}

#[test]
fn cancel_while_submitting_discards_the_late_answer() {
    let transport = MockTransport::new();
    transport.reply(200, expectation_schemas());
    let navigator = RecordingNavigator::at("/dataset/home");
    let client = client(&transport, &navigator);
    let mut modal = ModalState::new(family());

    block_on(async {
        drive(&mut modal, &client, ModalEvent::Open(ModalMode::Create)).await;
        drive(&mut modal, &client, ModalEvent::SelectVariant("expect_column_to_exist".into())).await;
        drive(&mut modal, &client, set("column", json!("id"))).await;
    });
    let Effect::Send { ticket, .. } = modal.handle(ModalEvent::Submit)[0].clone() else {
        unreachable!()
    };
    modal.handle(ModalEvent::Cancel);

    let late = modal.handle(ModalEvent::Response {
        ticket,
        response: Ok(swiple_common::api::ApiResponse {
            status: Some(200),
            data: Some(json!({"key": "exp-3"})),
        }),
    });
    assert!(late.is_empty());
    assert_eq!(modal.phase(), Phase::Closed);
}

#[test]
fn reopening_starts_clean() {
    let transport = MockTransport::new();
    transport
        .reply(200, expectation_schemas())
        .reply(200, expectation_schemas());
    let navigator = RecordingNavigator::at("/dataset/home");
    let client = client(&transport, &navigator);
    let mut modal = ModalState::new(family());

    block_on(async {
        drive(&mut modal, &client, ModalEvent::Open(ModalMode::Create)).await;
        drive(&mut modal, &client, select_between()).await;
        drive(&mut modal, &client, set("column", json!("age"))).await;
        drive(&mut modal, &client, ModalEvent::Cancel).await;
        drive(&mut modal, &client, ModalEvent::Open(ModalMode::Create)).await;
    });

    // schemas are fetched again for the new session
    assert_eq!(transport.calls(), 2);
    assert_eq!(modal.phase(), Phase::Ready);
    assert_eq!(modal.variant(), None);
    assert!(modal.values().is_empty());
}

#[test]
fn api_down_shows_toast_not_inline_error() {
    let transport = MockTransport::new();
    transport.reply(200, expectation_schemas()).fail();
    let navigator = RecordingNavigator::at("/dataset/home");
    let client = client(&transport, &navigator);
    let mut modal = ModalState::new(family());

    let effects = block_on(async {
        drive(&mut modal, &client, ModalEvent::Open(ModalMode::Create)).await;
        drive(&mut modal, &client, ModalEvent::SelectVariant("expect_column_to_exist".into())).await;
        drive(&mut modal, &client, set("column", json!("id"))).await;
        drive(&mut modal, &client, ModalEvent::Submit).await
    });

    assert_eq!(effects.last(), Some(&Effect::Notify(Notice::error("API appears to be down."))));
    assert_eq!(modal.status(), None);
    assert!(modal.errors().is_empty());
    assert_eq!(modal.phase(), Phase::VariantSelected);
}

#[test]
fn expired_session_on_submit_only_redirects() {
    let transport = MockTransport::new();
    transport
        .reply(200, expectation_schemas())
        .reply(401, json!({"detail": "Unauthorized"}));
    let navigator = RecordingNavigator::at("/dataset/home");
    let client = client(&transport, &navigator);
    let mut modal = ModalState::new(family());

    let effects = block_on(async {
        drive(&mut modal, &client, ModalEvent::Open(ModalMode::Create)).await;
        drive(&mut modal, &client, ModalEvent::SelectVariant("expect_column_to_exist".into())).await;
        drive(&mut modal, &client, set("column", json!("id"))).await;
        drive(&mut modal, &client, ModalEvent::Submit).await
    });

    assert!(!effects.iter().any(|effect| matches!(effect, Effect::Notify(_))));
    assert_eq!(modal.status(), None);
    assert_eq!(navigator.redirects(), vec!["/login".to_string()]);
    assert_eq!(transport.calls(), 2);
}

#[test]
fn server_field_errors_are_shown_inline() {
    let transport = MockTransport::new();
    transport.reply(200, expectation_schemas()).reply(
        422,
        json!({"detail": [{"loc": ["body", "kwargs", "column"], "msg": "column does not exist"}]}),
    );
    let navigator = RecordingNavigator::at("/dataset/home");
    let client = client(&transport, &navigator);
    let mut modal = ModalState::new(family());

    block_on(async {
        drive(&mut modal, &client, ModalEvent::Open(ModalMode::Create)).await;
        drive(&mut modal, &client, ModalEvent::SelectVariant("expect_column_to_exist".into())).await;
        drive(&mut modal, &client, set("column", json!("nope"))).await;
        drive(&mut modal, &client, ModalEvent::Submit).await;
    });

    assert_eq!(
        modal.status(),
        Some(&StatusLine::Failure(vec!["column: column does not exist".into()]))
    );
    assert_eq!(modal.phase(), Phase::VariantSelected);
}

#[test]
fn update_puts_prefilled_expectation() {
    let transport = MockTransport::new();
    transport
        .reply(200, expectation_schemas())
        .reply(200, json!({"key": "exp-9"}));
    let navigator = RecordingNavigator::at("/dataset/home");
    let client = client(&transport, &navigator);
    let mut modal = ModalState::new(family());
    let record = json!({
        "key": "exp-9",
        "expectation_type": "expect_column_values_to_be_between",
        "kwargs": {"column": "age", "min_value": 0, "max_value": 100, "result_format": "SUMMARY"}
    });

    block_on(async {
        drive(&mut modal, &client, ModalEvent::Open(ModalMode::Update { key: "exp-9".into(), record })).await;
        drive(&mut modal, &client, set("max_value", json!(120))).await;
        drive(&mut modal, &client, ModalEvent::Submit).await;
    });

    assert_eq!(modal.title(), "Update Expectation");
    let put = &transport.requests()[1];
    assert_eq!(put.method, Method::Put);
    assert_eq!(put.path, "/expectations/exp-9");
    assert_eq!(
        put.json_body().and_then(|b| b.get("kwargs")),
        Some(&json!({"column": "age", "min_value": 0, "max_value": 120}))
    );
}

#[test]
fn unknown_keyword_noise_is_not_an_error() {
    let messages = [
        "unknown keyword \"form_type\" ignored",
        "unknown keyword \"placeholder\" ignored",
    ];
    assert_eq!(build_validation_errors(&messages), "");

    let hinted = json!({"type": "string", "form_type": "column_select", "placeholder": "id"});
    assert_eq!(validate(&hinted, Some(&json!("id"))), Ok(()));
}
