use anyhow::Result;
use tempfile::tempdir;

use super::HintLedger;
use crate::domain::models::HINT_CAP;

#[tokio::test]
async fn it_defaults_unseen_problems_to_zero() -> Result<()> {
    let dir = tempdir()?;
    let ledger = HintLedger::load(dir.path()).await;

    assert_eq!(ledger.count("two-sum"), 0);
    assert!(!ledger.cap_reached("two-sum"));
    return Ok(());
}

#[tokio::test]
async fn it_increments_up_to_the_cap() -> Result<()> {
    let dir = tempdir()?;
    let ledger = HintLedger::load(dir.path()).await;

    assert_eq!(ledger.commit_increment("two-sum").await, 1);
    assert_eq!(ledger.commit_increment("two-sum").await, 2);
    assert_eq!(ledger.commit_increment("two-sum").await, 3);
    assert!(ledger.cap_reached("two-sum"));
    return Ok(());
}

#[tokio::test]
async fn it_never_counts_past_the_cap() -> Result<()> {
    let dir = tempdir()?;
    let ledger = HintLedger::load(dir.path()).await;

    for _ in 0..10 {
        ledger.commit_increment("two-sum").await;
    }

    assert_eq!(ledger.count("two-sum"), HINT_CAP);
    return Ok(());
}

#[tokio::test]
async fn it_tracks_problems_independently() -> Result<()> {
    let dir = tempdir()?;
    let ledger = HintLedger::load(dir.path()).await;

    ledger.commit_increment("two-sum").await;
    ledger.commit_increment("two-sum").await;
    ledger.commit_increment("binary-search").await;

    assert_eq!(ledger.count("two-sum"), 2);
    assert_eq!(ledger.count("binary-search"), 1);
    return Ok(());
}

#[tokio::test]
async fn it_survives_a_reload() -> Result<()> {
    let dir = tempdir()?;

    {
        let ledger = HintLedger::load(dir.path()).await;
        ledger.commit_increment("two-sum").await;
        ledger.commit_increment("two-sum").await;
    }

    let reloaded = HintLedger::load(dir.path()).await;
    assert_eq!(reloaded.count("two-sum"), 2);
    return Ok(());
}

#[tokio::test]
async fn it_starts_empty_on_a_corrupt_file() -> Result<()> {
    let dir = tempdir()?;
    tokio::fs::write(dir.path().join("ledger.json"), "not json").await?;

    let ledger = HintLedger::load(dir.path()).await;
    assert_eq!(ledger.count("two-sum"), 0);
    return Ok(());
}

#[tokio::test]
async fn it_resets_idempotently() -> Result<()> {
    let dir = tempdir()?;
    let ledger = HintLedger::load(dir.path()).await;
    ledger.commit_increment("two-sum").await;

    ledger.reset().await;
    ledger.reset().await;

    assert_eq!(ledger.count("two-sum"), 0);

    let reloaded = HintLedger::load(dir.path()).await;
    assert_eq!(reloaded.count("two-sum"), 0);
    return Ok(());
}
