use serde_json::json;

use form_autofill::driver::session::{DriverRequest, DriverSession, parse_response};
use form_autofill::error::AutofillError;

// ============================================================================
// Request encoding
// ============================================================================

#[test]
fn requests_are_tagged_by_command() {
    assert_eq!(serde_json::to_value(DriverRequest::Content).unwrap(), json!({ "cmd": "content" }));
    assert_eq!(serde_json::to_value(DriverRequest::Quit).unwrap(), json!({ "cmd": "quit" }));

    let navigate = DriverRequest::Navigate {
        url: "https://jobs.example.com".into(),
    };
    assert_eq!(
        serde_json::to_value(&navigate).unwrap(),
        json!({ "cmd": "navigate", "url": "https://jobs.example.com" })
    );
}

#[test]
fn field_actions_carry_their_arguments() {
    let typed = DriverRequest::Type {
        selector: "#first".into(),
        value: "Jane".into(),
        delay_ms: 80,
    };
    assert_eq!(
        serde_json::to_value(&typed).unwrap(),
        json!({ "cmd": "type", "selector": "#first", "value": "Jane", "delay_ms": 80 })
    );

    let click = DriverRequest::Click {
        selector: "#first".into(),
        click_count: 3,
    };
    assert_eq!(
        serde_json::to_value(&click).unwrap(),
        json!({ "cmd": "click", "selector": "#first", "click_count": 3 })
    );

    let events = DriverRequest::DispatchEvents {
        selector: "#first".into(),
        events: vec!["change".into(), "blur".into()],
    };
    assert_eq!(
        serde_json::to_value(&events).unwrap(),
        json!({ "cmd": "dispatch_events", "selector": "#first", "events": ["change", "blur"] })
    );

    let wait = DriverRequest::WaitForSelector {
        selector: "#first".into(),
        timeout_ms: 5000,
    };
    assert_eq!(serde_json::to_value(&wait).unwrap()["cmd"], json!("wait_for_selector"));
}

#[test]
fn command_names_match_wire_tags() {
    let requests = vec![
        DriverRequest::Content,
        DriverRequest::Check { selector: "#a".into() },
        DriverRequest::SelectOption {
            selector: "#a".into(),
            value: "US".into(),
        },
        DriverRequest::UploadFile {
            selector: "#a".into(),
            path: "/tmp/cv.pdf".into(),
        },
        DriverRequest::Fill {
            selector: "#a".into(),
            value: "".into(),
        },
    ];

    for request in requests {
        let tag = serde_json::to_value(&request).unwrap()["cmd"].clone();
        assert_eq!(tag, json!(request.command_name()));
    }
}

// ============================================================================
// Response decoding
// ============================================================================

#[test]
fn parses_ready_and_content_responses() {
    let ready = parse_response("{\"ok\":true,\"ready\":true}\n", "ready").unwrap();
    assert!(ready.ok);
    assert_eq!(ready.ready, Some(true));

    let content = parse_response(r#"{"ok":true,"html":"<form></form>"}"#, "content").unwrap();
    assert_eq!(content.html.as_deref(), Some("<form></form>"));
    assert!(content.error.is_none());
}

#[test]
fn parses_timeout_failure() {
    let response =
        parse_response(r#"{"ok":false,"timeout":true,"error":"waiting for #x"}"#, "wait").unwrap();
    assert!(!response.ok);
    assert_eq!(response.timeout, Some(true));
    assert_eq!(response.error.as_deref(), Some("waiting for #x"));
}

#[test]
fn garbage_line_is_parse_error() {
    let err = parse_response("Error: Cannot find module 'playwright'", "driver response").unwrap_err();
    match err {
        AutofillError::JsonParse { context, .. } => assert_eq!(context, "driver response"),
        other => panic!("unexpected error: {}", other),
    }
}

// ============================================================================
// Launch
// ============================================================================

#[test]
fn launch_fails_cleanly_without_node() {
    let result = DriverSession::launch("/nonexistent/bin/node", "driver/autofill_driver.js");
    match result {
        Err(AutofillError::SubprocessSpawn { script, .. }) => {
            assert_eq!(script, "driver/autofill_driver.js")
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("launch should fail"),
    }
}
