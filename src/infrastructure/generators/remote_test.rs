use anyhow::Result;

use super::Remote;
use crate::domain::models::GeneratePayload;
use crate::domain::models::GenerateResponse;
use crate::domain::models::Generator;
use crate::domain::models::ProblemContext;

impl Remote {
    fn with_url(url: String) -> Remote {
        return Remote {
            url,
            generate_timeout: "9000".to_string(),
            health_timeout: "1000".to_string(),
        };
    }
}

fn payload() -> GeneratePayload {
    let context = ProblemContext::new(
        "two-sum",
        "def two_sum(nums, target):",
        "https://judge.dev/problems/two-sum/",
        "Wrong Answer on case 3",
    );
    return GeneratePayload::for_hint(&context, 2);
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/health").with_status(200).create();

    let generator = Remote::with_url(format!("{}/hint", server.url()));
    let res = generator.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/health").with_status(500).create();

    let generator = Remote::with_url(format!("{}/hint", server.url()));
    let res = generator.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks_without_a_url() {
    let generator = Remote::with_url("".to_string());
    let res = generator.health_check().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_probes_the_configured_provider() -> Result<()> {
    let body = r#"{"status":"ok","provider":"ollama","model":"llama3.2"}"#;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(body)
        .create();

    let generator = Remote::with_url(format!("{}/hint", server.url()));
    let res = generator.probe().await?;
    mock.assert();

    assert_eq!(res.status, "ok");
    assert_eq!(res.provider, Some("ollama".to_string()));
    assert_eq!(res.model, Some("llama3.2".to_string()));
    return Ok(());
}

#[tokio::test]
async fn it_generates_a_hint() -> Result<()> {
    let body = serde_json::to_string(&GenerateResponse {
        hint: Some("Use a hash map to remember complements.".to_string()),
        snippet: None,
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/hint")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"problemId":"two-sum","hintLevel":2}"#.to_string(),
        ))
        .with_status(200)
        .with_body(body)
        .create();

    let generator = Remote::with_url(format!("{}/hint", server.url()));
    let res = generator.generate_hint(payload()).await?;
    mock.assert();

    assert_eq!(res, "Use a hash map to remember complements.");
    return Ok(());
}

#[tokio::test]
async fn it_fails_on_a_server_error() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/hint").with_status(500).create();

    let generator = Remote::with_url(format!("{}/hint", server.url()));
    let res = generator.generate_hint(payload()).await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_on_a_malformed_body() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/hint")
        .with_status(200)
        .with_body("not json")
        .create();

    let generator = Remote::with_url(format!("{}/hint", server.url()));
    let res = generator.generate_hint(payload()).await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_on_an_empty_hint() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/hint")
        .with_status(200)
        .with_body(r#"{"hint":"  "}"#)
        .create();

    let generator = Remote::with_url(format!("{}/hint", server.url()));
    let res = generator.generate_hint(payload()).await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_when_the_service_is_unreachable() {
    // Nothing listens here.
    let generator = Remote::with_url("http://127.0.0.1:1/hint".to_string());
    let res = generator.generate_hint(payload()).await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_generates_an_excerpt() -> Result<()> {
    let body = serde_json::to_string(&GenerateResponse {
        hint: None,
        snippet: Some("seen = {}".to_string()),
    })?;

    let context = ProblemContext::new("two-sum", "def two_sum():", "", "");

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/hint")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"request":"snippet"}"#.to_string(),
        ))
        .with_status(200)
        .with_body(body)
        .create();

    let generator = Remote::with_url(format!("{}/hint", server.url()));
    let res = generator
        .generate_excerpt(GeneratePayload::for_excerpt(&context))
        .await?;
    mock.assert();

    assert_eq!(res, "seen = {}");
    return Ok(());
}
