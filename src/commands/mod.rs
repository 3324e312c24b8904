//! The mkdocs operations: build, serve and gh-deploy.
//!
//! Each operation runs through the same gate (skip flag, then presence of a
//! `mkdocs.yml`), assembles the argument vector for its subcommand and hands
//! the invocation to the process layer. Skipping is a normal, successful
//! outcome.

use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::{ConfigError, MkdocsConfig};
use crate::mkdocs::{
    self, build_args, deploy_args, serve_args, InvocationRequest, InvokeError, LogSink,
};

/// Error type for running an operation.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The mkdocs invocation failed.
    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

/// Outcome of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// mkdocs ran and succeeded.
    Ran,
    /// The operation was skipped without invoking mkdocs.
    Skipped,
}

/// Resolve the `mkdocs.yml` that gates the operation.
///
/// Uses the explicitly configured path if set, else the conventional
/// `<docs_dir>/mkdocs.yml`. Returns `None` when the chosen path is not a
/// file.
#[must_use]
pub fn resolve_config_file(config: &MkdocsConfig) -> Option<PathBuf> {
    let path = config
        .config_file
        .clone()
        .unwrap_or_else(|| config.docs_dir.join("mkdocs.yml"));
    path.is_file().then_some(path)
}

/// Run the build operation.
///
/// # Errors
///
/// Returns `RunError::Invoke` when mkdocs fails.
pub async fn run_build(
    config: &MkdocsConfig,
    sink: Arc<dyn LogSink>,
    cancel: &CancellationToken,
) -> Result<Outcome, RunError> {
    execute(config, sink, cancel, |config, verbose| {
        if config.build.strict {
            tracing::info!("Strict mode is enabled");
        }
        build_args(&config.build, config.config_file.as_deref(), verbose)
    })
    .await
}

/// Run the serve operation.
///
/// Blocks until the mkdocs dev server exits or the invocation is cancelled.
///
/// # Errors
///
/// Returns `RunError::Invoke` when mkdocs fails.
pub async fn run_serve(
    config: &MkdocsConfig,
    sink: Arc<dyn LogSink>,
    cancel: &CancellationToken,
) -> Result<Outcome, RunError> {
    execute(config, sink, cancel, |config, verbose| {
        if config.serve.strict {
            tracing::info!("Strict mode is enabled");
        }
        serve_args(&config.serve, config.config_file.as_deref(), verbose)
    })
    .await
}

/// Run the gh-deploy operation.
///
/// # Errors
///
/// Returns `RunError::Invoke` when mkdocs fails.
pub async fn run_deploy(
    config: &MkdocsConfig,
    sink: Arc<dyn LogSink>,
    cancel: &CancellationToken,
) -> Result<Outcome, RunError> {
    execute(config, sink, cancel, |config, verbose| {
        deploy_args(&config.deploy, config.config_file.as_deref(), verbose)
    })
    .await
}

/// Gate, assemble and invoke.
async fn execute<F>(
    config: &MkdocsConfig,
    sink: Arc<dyn LogSink>,
    cancel: &CancellationToken,
    assemble: F,
) -> Result<Outcome, RunError>
where
    F: FnOnce(&MkdocsConfig, bool) -> Vec<String>,
{
    if config.skip {
        tracing::info!("Skipping mkdocs build...");
        return Ok(Outcome::Skipped);
    }

    if resolve_config_file(config).is_none() {
        tracing::info!("No mkdocs.yml found, skipping mkdocs...");
        return Ok(Outcome::Skipped);
    }

    let mut argv = config.command.clone();
    argv.extend(assemble(config, sink.debug_enabled()));

    let request =
        InvocationRequest::new(argv, &config.docs_dir).envs(config.env.clone());

    mkdocs::invoke(&request, sink, cancel).await?;
    Ok(Outcome::Ran)
}
