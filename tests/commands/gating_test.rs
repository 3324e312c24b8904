//! Tests for the operation gate (skip flag and mkdocs.yml presence).

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use mkdocs_runner::commands::{run_build, run_deploy, run_serve, Outcome};
use mkdocs_runner::config::MkdocsConfig;
use mkdocs_runner::mkdocs::LogSink;

use crate::support::CollectingSink;

/// A config whose command would fail loudly if anything were spawned.
fn unspawnable_config() -> MkdocsConfig {
    MkdocsConfig {
        command: vec!["definitely-not-a-real-mkdocs".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn missing_config_file_skips_every_operation() {
    let dir = tempfile::tempdir().unwrap();
    let config = MkdocsConfig {
        docs_dir: dir.path().to_path_buf(),
        ..unspawnable_config()
    };
    let cancel = CancellationToken::new();

    let sink = Arc::new(CollectingSink::default());
    let outcome = run_build(&config, Arc::clone(&sink) as Arc<dyn LogSink>, &cancel).await.unwrap();
    assert_eq!(outcome, Outcome::Skipped);

    let outcome = run_serve(&config, Arc::clone(&sink) as Arc<dyn LogSink>, &cancel).await.unwrap();
    assert_eq!(outcome, Outcome::Skipped);

    let outcome = run_deploy(&config, Arc::clone(&sink) as Arc<dyn LogSink>, &cancel).await.unwrap();
    assert_eq!(outcome, Outcome::Skipped);

    // Nothing was invoked, so nothing was relayed.
    assert!(sink.lines().is_empty());
}

#[tokio::test]
async fn skip_flag_wins_even_with_config_file_present() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("mkdocs.yml"), "site_name: test\n").unwrap();

    let config = MkdocsConfig {
        skip: true,
        docs_dir: dir.path().to_path_buf(),
        ..unspawnable_config()
    };

    let sink = Arc::new(CollectingSink::default());
    let outcome = run_build(&config, sink, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Skipped);
}

#[tokio::test]
async fn present_config_file_runs_the_tool() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("mkdocs.yml"), "site_name: test\n").unwrap();

    let config = MkdocsConfig {
        docs_dir: dir.path().to_path_buf(),
        // `true` swallows the subcommand arguments and exits 0.
        command: vec!["true".to_string()],
        ..Default::default()
    };

    let sink = Arc::new(CollectingSink::default());
    let outcome = run_build(&config, sink, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Ran);
}

#[tokio::test]
async fn failing_tool_propagates_as_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("mkdocs.yml"), "site_name: test\n").unwrap();

    let config = MkdocsConfig {
        docs_dir: dir.path().to_path_buf(),
        command: vec!["false".to_string()],
        ..Default::default()
    };

    let sink = Arc::new(CollectingSink::default());
    let result = run_build(&config, sink, &CancellationToken::new()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn explicit_missing_config_file_skips() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("mkdocs.yml"), "site_name: test\n").unwrap();

    let config = MkdocsConfig {
        docs_dir: dir.path().to_path_buf(),
        config_file: Some(dir.path().join("elsewhere.yml")),
        ..unspawnable_config()
    };

    let sink = Arc::new(CollectingSink::default());
    let outcome = run_deploy(&config, sink, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Skipped);
}
