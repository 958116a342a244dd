use anyhow::Result;
use tempfile::tempdir;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    let doc = toml_res.unwrap();
    assert_eq!(doc["allow-send-to-server"].as_bool(), Some(false));
    assert_eq!(
        doc["server-url"].as_str(),
        Some("http://localhost:3000/hint")
    );
    assert_eq!(doc["idle-threshold"].as_integer(), Some(180));
}

// One sequential test: the config store is process-wide, so interleaving
// loads from parallel tests would race each other.
#[tokio::test]
async fn it_loads_and_persists_config() -> Result<()> {
    let dir = tempdir()?;

    let bad_path = dir.path().join("bad-config.toml");
    tokio::fs::write(&bad_path, "generator = \"carrier-pigeon\"\n").await?;
    let matches =
        cli::build().try_get_matches_from(vec!["hinterland", "-c", bad_path.to_str().unwrap()])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());

    let config_path = dir.path().join("config.toml");
    tokio::fs::write(
        &config_path,
        "allow-send-to-server = true\nserver-url = \"https://hints.internal/generate\"\nidle-threshold = 240\n",
    )
    .await?;

    let matches = cli::build().try_get_matches_from(vec![
        "hinterland",
        "-c",
        config_path.to_str().unwrap(),
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::AllowSendToServer), "true");
    assert_eq!(
        Config::get(ConfigKey::ServerUrl),
        "https://hints.internal/generate"
    );
    assert_eq!(Config::get(ConfigKey::IdleThreshold), "240");

    // Explicit mutations rewrite the file they were loaded from.
    Config::persist_set(ConfigKey::AllowSendToServer, "false").await?;
    Config::persist_set(ConfigKey::ServerUrl, "https://hints.internal/generate").await?;

    let written = tokio::fs::read_to_string(&config_path).await?;
    let doc = written.parse::<toml_edit::Document>()?;
    assert_eq!(doc["allow-send-to-server"].as_bool(), Some(false));
    assert_eq!(
        doc["server-url"].as_str(),
        Some("https://hints.internal/generate")
    );
    // Existing keys survive the rewrite, untouched ones stay absent.
    assert_eq!(doc["idle-threshold"].as_integer(), Some(240));
    assert!(doc.get("cache-ttl").is_none());

    return Ok(());
}

#[test]
fn it_converts_seconds_to_milliseconds() {
    Config::set(ConfigKey::CacheTtl, "300");
    assert_eq!(Config::get_seconds_as_ms(ConfigKey::CacheTtl), 300_000);
}
