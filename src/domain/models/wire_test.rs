use anyhow::Result;
use test_utils::context_json_fixture;

use super::Inbound;
use super::Outbound;
use crate::domain::models::StuckReason;
use crate::domain::models::SubmissionStatus;

#[test]
fn it_parses_an_input_event() -> Result<()> {
    let parsed: Inbound = serde_json::from_str(r#"{"type":"input","session":"tab-7","ts":1700000000000}"#)?;
    assert_eq!(
        parsed,
        Inbound::Input {
            session: "tab-7".to_string(),
            ts: Some(1700000000000),
        }
    );
    return Ok(());
}

#[test]
fn it_parses_an_input_event_without_timestamp() -> Result<()> {
    let parsed: Inbound = serde_json::from_str(r#"{"type":"input","session":"tab-7"}"#)?;
    assert_eq!(
        parsed,
        Inbound::Input {
            session: "tab-7".to_string(),
            ts: None,
        }
    );
    return Ok(());
}

#[test]
fn it_parses_a_failed_submission_result() -> Result<()> {
    let parsed: Inbound =
        serde_json::from_str(r#"{"type":"result","session":"tab-7","status":"fail"}"#)?;
    assert_eq!(
        parsed,
        Inbound::SubmissionResult {
            session: "tab-7".to_string(),
            status: SubmissionStatus::Fail,
            ts: None,
        }
    );
    return Ok(());
}

#[test]
fn it_parses_a_context_response_with_defaults() -> Result<()> {
    let parsed: Inbound = serde_json::from_str(r#"{"type":"context","request":"req-1"}"#)?;
    assert_eq!(
        parsed,
        Inbound::Context {
            request: "req-1".to_string(),
            problem_id: "".to_string(),
            snippet: "".to_string(),
            url: "".to_string(),
            failure: "".to_string(),
        }
    );
    return Ok(());
}

#[test]
fn it_parses_the_context_fixture() -> Result<()> {
    let parsed: Inbound = serde_json::from_str(&context_json_fixture("req-9"))?;
    match parsed {
        Inbound::Context {
            request,
            problem_id,
            ..
        } => {
            assert_eq!(request, "req-9");
            assert_eq!(problem_id, "two-sum");
        }
        _ => panic!("wrong variant"),
    }
    return Ok(());
}

#[test]
fn it_parses_a_partial_settings_update() -> Result<()> {
    let parsed: Inbound =
        serde_json::from_str(r#"{"type":"settings","allow_send_to_server":true}"#)?;
    assert_eq!(
        parsed,
        Inbound::Settings {
            allow_send_to_server: Some(true),
            server_url: None,
        }
    );
    return Ok(());
}

#[test]
fn it_rejects_an_unknown_message_type() {
    let res = serde_json::from_str::<Inbound>(r#"{"type":"telemetry"}"#);
    assert!(res.is_err());
}

#[test]
fn it_serializes_a_delivery() -> Result<()> {
    let msg = Outbound::Delivery {
        session: "tab-7".to_string(),
        hint: "Think in pairs.".to_string(),
        level: 1,
        ask_for_code: false,
    };
    insta::assert_snapshot!(serde_json::to_string(&msg)?, @r###"{"type":"delivery","session":"tab-7","hint":"Think in pairs.","level":1,"ask_for_code":false}"###);
    return Ok(());
}

#[test]
fn it_serializes_a_nudge_with_a_lowercase_reason() -> Result<()> {
    let msg = Outbound::Nudge {
        session: "tab-7".to_string(),
        reason: StuckReason::Idle,
    };
    insta::assert_snapshot!(serde_json::to_string(&msg)?, @r###"{"type":"nudge","session":"tab-7","reason":"idle"}"###);
    return Ok(());
}
