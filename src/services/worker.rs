//! Persistent worker loop.
//!
//! The worker serves build requests strictly one at a time:
//!
//! ```text
//! Idle --request--> Compiling --result--> Idle
//!   |                                       |
//!   +--end of input / signal / fatal--> Shutdown
//! ```
//!
//! Every per-request problem (malformed or non-UTF-8 input, failed
//! compilation, backend fault or panic) becomes a [`BuildResponse`]. Only
//! backend construction failures and I/O errors on the channel stop the loop.

use futures::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::collections::BTreeSet;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::Instrument;
use uuid::Uuid;

use crate::domain::errors::{WorkerError, WorkerResult};
use crate::domain::models::{
    BuildRequest, BuildResponse, CompileOutcome, CompilerVariant, ResponseStatus,
};
use crate::domain::ports::CompilerFactory;
use crate::infrastructure::transport::{decode_line, next_frame, write_response, Frame};

/// Lifecycle state of a [`Worker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    Idle,
    Compiling,
    Shutdown,
}

/// Running counters for a worker's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStats {
    pub requests: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub malformed: u64,
    /// Failures caused by a backend fault rather than bad source.
    pub faults: u64,
    pub baseline: u64,
    pub augmented: u64,
}

impl WorkerStats {
    fn record(&mut self, response: &BuildResponse) {
        match response.status {
            ResponseStatus::Success => self.succeeded += 1,
            ResponseStatus::Failure => self.failed += 1,
            ResponseStatus::MalformedRequest => self.malformed += 1,
        }
        match response.variant {
            Some(CompilerVariant::Baseline) => self.baseline += 1,
            Some(CompilerVariant::Augmented) => self.augmented += 1,
            None => {}
        }
    }
}

/// A worker serving build requests through a [`CompilerFactory`].
pub struct Worker<F> {
    factory: F,
    state: WorkerState,
    stats: WorkerStats,
}

impl<F: CompilerFactory> Worker<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            state: WorkerState::Idle,
            stats: WorkerStats::default(),
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn stats(&self) -> &WorkerStats {
        &self.stats
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Serve one request.
    ///
    /// Returns `Err` only for fatal errors, after which the worker is in
    /// [`WorkerState::Shutdown`] and refuses further requests.
    pub async fn handle(&mut self, request: BuildRequest) -> WorkerResult<BuildResponse> {
        if self.state == WorkerState::Shutdown {
            return Err(WorkerError::ShutDown);
        }

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("request", %request_id, rule = %request.rule);

        async {
            self.stats.requests += 1;
            let response = self.dispatch(&request).await?;
            self.stats.record(&response);

            tracing::info!(
                status = ?response.status,
                variant = response.variant.map_or("none", |v| v.as_str()),
                messages = response.messages.len(),
                duration_ms = response.duration_ms,
                "Request complete"
            );

            Ok::<_, WorkerError>(response)
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&mut self, request: &BuildRequest) -> WorkerResult<BuildResponse> {
        if let Err(e) = request.validate() {
            return reject(&request.rule, e);
        }

        let started = Instant::now();

        let constructed =
            std::panic::catch_unwind(AssertUnwindSafe(|| self.factory.new_compiler(request)));
        let mut compiler = match constructed {
            Ok(Ok(compiler)) => compiler,
            Ok(Err(e)) if e.is_fatal() => {
                tracing::error!(error = %e, "Compiler backend construction failed");
                self.state = WorkerState::Shutdown;
                return Err(e);
            }
            Ok(Err(e)) => {
                self.stats.faults += 1;
                return Ok(BuildResponse::fault(
                    &request.rule,
                    None,
                    e.to_string(),
                    elapsed_ms(started),
                ));
            }
            Err(panic) => {
                self.stats.faults += 1;
                let message = format!("Compiler construction panicked: {}", panic_message(&*panic));
                tracing::error!(error = %message, "Compiler fault");
                return Ok(BuildResponse::fault(
                    &request.rule,
                    None,
                    message,
                    elapsed_ms(started),
                ));
            }
        };

        let variant = compiler.variant();
        self.state = WorkerState::Compiling;
        let result = AssertUnwindSafe(compiler.compile()).catch_unwind().await;
        self.state = WorkerState::Idle;

        let duration_ms = elapsed_ms(started);
        let response = match result {
            Ok(Ok(outcome)) => {
                log_outcome(variant, &outcome);
                BuildResponse::from_outcome(&request.rule, variant, &outcome, duration_ms)
            }
            Ok(Err(e)) => {
                self.stats.faults += 1;
                tracing::error!(variant = %variant, error = %e, "Compiler fault");
                BuildResponse::fault(&request.rule, Some(variant), e.to_string(), duration_ms)
            }
            Err(panic) => {
                self.stats.faults += 1;
                let message = format!("Compiler panicked: {}", panic_message(&*panic));
                tracing::error!(variant = %variant, error = %message, "Compiler fault");
                BuildResponse::fault(&request.rule, Some(variant), message, duration_ms)
            }
        };

        Ok(response)
    }

    /// Serve one raw input line. Blank lines produce no response.
    pub async fn handle_line(&mut self, line: &str) -> WorkerResult<Option<BuildResponse>> {
        self.handle_frame(decode_line(line)).await
    }

    async fn handle_frame(&mut self, frame: Frame) -> WorkerResult<Option<BuildResponse>> {
        if self.state == WorkerState::Shutdown {
            return Err(WorkerError::ShutDown);
        }

        match frame {
            Frame::Blank => Ok(None),
            Frame::Request(request) => self.handle(request).await.map(Some),
            Frame::Undecodable { rule, error } => {
                let response = reject(&rule, error)?;
                self.stats.requests += 1;
                self.stats.record(&response);
                Ok(Some(response))
            }
        }
    }

    /// Run the request loop until input ends, `shutdown` resolves, or a
    /// fatal error occurs.
    ///
    /// `shutdown` is only observed between requests; a compilation in
    /// progress always runs to completion and is reported.
    pub async fn serve<R, W, S>(
        &mut self,
        mut reader: R,
        mut writer: W,
        shutdown: S,
    ) -> WorkerResult<WorkerStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        let mut buf = Vec::new();
        tokio::pin!(shutdown);

        tracing::info!("Worker ready");

        let result = loop {
            let next = tokio::select! {
                biased;
                () = &mut shutdown => {
                    tracing::info!("Termination signal received");
                    break Ok(());
                }
                next = next_frame(&mut reader, &mut buf) => next,
            };

            let frame = match next {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    tracing::info!("Input closed");
                    break Ok(());
                }
                Err(e) => break Err(e),
            };

            match self.handle_frame(frame).await {
                Ok(Some(response)) => {
                    if let Err(e) = write_response(&mut writer, &response).await {
                        break Err(e);
                    }
                }
                Ok(None) => {}
                Err(e) => break Err(e),
            }
        };

        self.state = WorkerState::Shutdown;

        let stats = &self.stats;
        tracing::info!(
            requests = stats.requests,
            succeeded = stats.succeeded,
            failed = stats.failed,
            malformed = stats.malformed,
            faults = stats.faults,
            baseline = stats.baseline,
            augmented = stats.augmented,
            "Worker shut down"
        );

        result.map(|()| self.stats.clone())
    }
}

/// Response for a request rejected before compilation. Errors other than
/// `MalformedRequest` pass through.
fn reject(rule: &str, error: WorkerError) -> WorkerResult<BuildResponse> {
    match error {
        WorkerError::MalformedRequest(reason) => {
            tracing::warn!(rule = %rule, reason = %reason, "Rejecting malformed request");
            Ok(BuildResponse::malformed(rule, reason))
        }
        other => Err(other),
    }
}

fn log_outcome(variant: CompilerVariant, outcome: &CompileOutcome) {
    for diagnostic in outcome.diagnostics() {
        tracing::debug!(
            file = diagnostic.file.as_deref(),
            line = diagnostic.line,
            severity = ?diagnostic.severity,
            check = diagnostic.check.as_deref(),
            message = %diagnostic.message,
            "Compiler diagnostic"
        );
    }

    let checks: BTreeSet<&str> = outcome
        .diagnostics()
        .iter()
        .filter_map(|d| d.check.as_deref())
        .collect();
    tracing::info!(
        variant = %variant,
        success = outcome.is_success(),
        errors = outcome.error_count(),
        diagnostics = outcome.diagnostics().len(),
        checks = ?checks,
        "Compiler finished"
    );
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
