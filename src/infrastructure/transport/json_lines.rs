//! Newline-delimited JSON framing.
//!
//! One [`BuildRequest`] object per input line, one [`BuildResponse`] object
//! per output line. Output is flushed after every record so the orchestrator
//! never waits on a buffered response.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::errors::{WorkerError, WorkerResult};
use crate::domain::models::{BuildRequest, BuildResponse};

/// A decoded input line.
#[derive(Debug)]
pub enum Frame {
    /// Whitespace-only line; ignored.
    Blank,
    /// A well-formed request object.
    Request(BuildRequest),
    /// A line that is not a request object. Carries the rule name when one
    /// could be recovered, and a [`WorkerError::MalformedRequest`].
    Undecodable { rule: String, error: WorkerError },
}

impl Frame {
    fn undecodable(rule: String, reason: String) -> Self {
        Self::Undecodable {
            rule,
            error: WorkerError::MalformedRequest(reason),
        }
    }
}

/// Read and decode the next input line.
///
/// Returns `Ok(None)` at end of input. Only I/O failures are errors; bytes
/// that are not UTF-8 decode to [`Frame::Undecodable`].
pub async fn next_frame<R>(reader: &mut R, buf: &mut Vec<u8>) -> WorkerResult<Option<Frame>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }
    Ok(Some(decode_bytes(buf)))
}

/// Decode one raw input line, with or without its line terminator.
pub fn decode_bytes(line: &[u8]) -> Frame {
    match std::str::from_utf8(line) {
        Ok(text) => decode_line(text),
        Err(e) => Frame::undecodable(String::new(), format!("invalid request: {e}")),
    }
}

/// Decode one input line.
pub fn decode_line(line: &str) -> Frame {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Frame::Blank;
    }

    match serde_json::from_str::<BuildRequest>(trimmed) {
        Ok(request) => Frame::Request(request),
        Err(e) => Frame::undecodable(recover_rule(trimmed), format!("invalid request: {e}")),
    }
}

/// Best-effort rule name from a line that failed to decode as a request.
fn recover_rule(line: &str) -> String {
    serde_json::from_str::<serde_json::Value>(line)
        .ok()
        .and_then(|v| v.get("rule").and_then(|r| r.as_str()).map(str::to_string))
        .unwrap_or_default()
}

/// Encode a response as a single line (without the trailing newline).
pub fn encode_response(response: &BuildResponse) -> WorkerResult<String> {
    serde_json::to_string(response).map_err(|e| WorkerError::Transport(e.to_string()))
}

/// Write one response record and flush.
pub async fn write_response<W>(writer: &mut W, response: &BuildResponse) -> WorkerResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = encode_response(response)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
