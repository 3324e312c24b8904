//! Concurrent draining of child output streams.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;

use super::classify::LineClassifier;
use super::sink::LogSink;

/// Drain a child output stream line-by-line into the sink.
///
/// The returned task reads complete lines until end-of-stream and emits each
/// one through its own classifier, in arrival order. Each stream gets a
/// private classifier so continuation state never leaks between stdout and
/// stderr. The task must run concurrently with the sibling stream's drain
/// and with the exit wait: a child that fills both pipe buffers before
/// exiting would otherwise deadlock the caller.
///
/// A read error ends this drain only; the invoker surfaces it after the
/// child has exited.
pub fn spawn_drain<R>(stream: R, sink: Arc<dyn LogSink>) -> JoinHandle<Result<(), std::io::Error>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut classifier = LineClassifier::new();
        let mut lines = BufReader::new(stream).lines();
        while let Some(line) = lines.next_line().await? {
            sink.emit(&classifier.classify(&line));
        }
        Ok(())
    })
}
