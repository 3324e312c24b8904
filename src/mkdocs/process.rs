//! MkDocs process invocation.
//!
//! Builds the child argv and environment, launches mkdocs with both output
//! streams piped, drains them concurrently with the exit wait, and maps the
//! exit status to a result.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::drain::spawn_drain;
use super::sink::LogSink;

/// Timeout for graceful child termination after cancellation.
pub const TERMINATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for MkDocs invocations.
#[derive(thiserror::Error, Debug)]
pub enum InvokeError {
    /// The configured command list was empty.
    #[error("mkdocs command is empty")]
    EmptyCommand,
    /// The mkdocs executable was not found.
    #[error("mkdocs command not found: {0}")]
    NotFound(String),
    /// Permission denied when launching.
    #[error("Permission denied launching: {0}")]
    PermissionDenied(String),
    /// An output pipe was not available after spawn.
    #[error("mkdocs output pipe not available")]
    NoPipe,
    /// mkdocs ran but returned a failure code.
    #[error("mkdocs failed with exit code {code}")]
    ExitStatus {
        /// The non-zero exit code.
        code: i32,
    },
    /// mkdocs was terminated by a signal before exiting.
    #[error("mkdocs terminated by signal")]
    Signalled,
    /// Reading an output stream failed.
    #[error("Failed reading mkdocs output: {0}")]
    Stream(#[source] std::io::Error),
    /// The invocation was cancelled while waiting for mkdocs.
    #[error("mkdocs invocation cancelled")]
    Cancelled,
    /// Other I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InvokeError {
    /// Classify a launch error, keeping the program name for the message.
    fn from_launch(err: std::io::Error, program: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(program.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(program.to_string()),
            _ => Self::Io(err),
        }
    }
}

/// A fully assembled mkdocs invocation.
///
/// Carries the complete argv (tool command prefix included), the working
/// directory, and the environment overrides layered over the parent
/// environment. `NO_COLOR=1` is pre-seeded so the child output stays free of
/// ANSI codes and parseable; caller overrides win on key collision.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    args: Vec<String>,
    working_dir: PathBuf,
    env: BTreeMap<String, String>,
}

impl InvocationRequest {
    /// Create a request for the given argv and working directory.
    #[must_use]
    pub fn new(args: Vec<String>, working_dir: impl Into<PathBuf>) -> Self {
        let mut env = BTreeMap::new();
        env.insert("NO_COLOR".to_string(), "1".to_string());
        Self {
            args,
            working_dir: working_dir.into(),
            env,
        }
    }

    /// Merge environment overrides into the request.
    #[must_use]
    pub fn envs(mut self, overrides: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(overrides);
        self
    }

    /// The full argv, command prefix included.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The working directory mkdocs runs in.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// The environment overrides, sorted by key.
    #[must_use]
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }
}

/// Result of a successful mkdocs invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationResult {
    /// The child's exit code.
    pub exit_code: i32,
}

/// A running mkdocs child process.
#[derive(Debug)]
pub struct MkdocsProcess {
    child: Child,
}

impl MkdocsProcess {
    /// Spawn mkdocs with both output streams piped.
    ///
    /// # Errors
    ///
    /// Returns `InvokeError::EmptyCommand` for an empty argv, and a
    /// classified launch error when the executable cannot be started.
    pub fn spawn(request: &InvocationRequest) -> Result<Self, InvokeError> {
        let (program, args) = request
            .args()
            .split_first()
            .ok_or(InvokeError::EmptyCommand)?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(request.working_dir())
            .envs(request.env())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = cmd
            .spawn()
            .map_err(|e| InvokeError::from_launch(e, program))?;

        Ok(Self { child })
    }

    /// Take ownership of the stdout handle.
    ///
    /// This can only be called once; subsequent calls return `None`.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Take ownership of the stderr handle.
    ///
    /// This can only be called once; subsequent calls return `None`.
    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// Get the process ID, if still running.
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Wait for the process to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if waiting fails.
    pub async fn wait(&mut self) -> std::io::Result<std::process::ExitStatus> {
        self.child.wait().await
    }

    /// Attempt graceful termination with a timeout.
    ///
    /// On Unix, sends SIGTERM first, then SIGKILL after the timeout.
    /// On other platforms, falls back to immediate kill.
    ///
    /// # Errors
    ///
    /// Returns an error if termination fails.
    pub async fn graceful_terminate(&mut self, timeout: Duration) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            self.graceful_terminate_unix(timeout).await
        }

        #[cfg(not(unix))]
        {
            let _ = timeout;
            self.child.kill().await
        }
    }

    #[cfg(unix)]
    async fn graceful_terminate_unix(&mut self, timeout: Duration) -> std::io::Result<()> {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        if let Some(pid) = self.id() {
            let nix_pid = Pid::from_raw(i32::try_from(pid).unwrap_or(i32::MAX));
            let _ = kill(nix_pid, Signal::SIGTERM);

            match tokio::time::timeout(timeout, self.child.wait()).await {
                Ok(Ok(_)) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(_) => self.child.kill().await,
            }
        } else {
            // Process already exited
            Ok(())
        }
    }
}

/// Invoke mkdocs and relay its output through the sink.
///
/// Both output streams are drained concurrently with the exit wait so a
/// child that writes more than a pipe buffer to each stream cannot deadlock
/// the caller. Lines stream to the sink as they arrive rather than being
/// buffered until completion.
///
/// On cancellation, the child is terminated (SIGTERM, then SIGKILL after
/// [`TERMINATE_TIMEOUT`]) and the invocation fails with
/// `InvokeError::Cancelled`.
///
/// # Errors
///
/// Returns a launch error when mkdocs cannot be started, `ExitStatus` when
/// it exits non-zero, `Stream` when a drain failed even if the exit code was
/// zero, and `Cancelled` when the wait was interrupted.
pub async fn invoke(
    request: &InvocationRequest,
    sink: Arc<dyn LogSink>,
    cancel: &CancellationToken,
) -> Result<InvocationResult, InvokeError> {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let argv = request
            .args()
            .iter()
            .map(|a| format!("'{a}'"))
            .collect::<Vec<_>>()
            .join(" ");
        let env = request
            .env()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::debug!(%argv, %env, "Invoking mkdocs");
    }

    let mut process = MkdocsProcess::spawn(request)?;
    let stdout = process.take_stdout().ok_or(InvokeError::NoPipe)?;
    let stderr = process.take_stderr().ok_or(InvokeError::NoPipe)?;

    let out_drain = spawn_drain(stdout, Arc::clone(&sink));
    let err_drain = spawn_drain(stderr, sink);

    let status = tokio::select! {
        biased;

        () = cancel.cancelled() => {
            tracing::info!("Cancelled, terminating mkdocs");
            process.graceful_terminate(TERMINATE_TIMEOUT).await?;
            return Err(InvokeError::Cancelled);
        }
        status = process.wait() => status?,
    };

    // OS buffers may still hold unread bytes after the exit code is known;
    // a drain failure is surfaced even when the child exited cleanly.
    join_drain(out_drain).await?;
    join_drain(err_drain).await?;

    match status.code() {
        Some(0) => Ok(InvocationResult { exit_code: 0 }),
        Some(code) => Err(InvokeError::ExitStatus { code }),
        None => Err(InvokeError::Signalled),
    }
}

async fn join_drain(handle: JoinHandle<Result<(), std::io::Error>>) -> Result<(), InvokeError> {
    match handle.await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(InvokeError::Stream(e)),
        Err(e) => Err(InvokeError::Stream(std::io::Error::other(e))),
    }
}
