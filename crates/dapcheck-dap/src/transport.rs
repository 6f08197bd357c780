//! DAP transport layer — Content-Length based message framing.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::error::DapError;
use crate::protocol::Message;

/// Largest message body accepted from an adapter, in bytes.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024;

/// Encode a message into DAP wire format with a Content-Length header.
pub fn encode_message(message: &Message) -> Result<Vec<u8>, DapError> {
    let body = serde_json::to_vec(message)
        .map_err(|e| DapError::Transport(format!("cannot serialize message: {e}")))?;
    let header = format!("Content-Length: {}\r\n\r\n", body.len());
    let mut buf = Vec::with_capacity(header.len() + body.len());
    buf.extend_from_slice(header.as_bytes());
    buf.extend_from_slice(&body);
    Ok(buf)
}

/// Read the next framed message from `reader`.
///
/// Returns `Ok(None)` on a clean end of stream before any header byte.
/// A stream that ends mid-message is a `Transport` error; a body that is
/// not a DAP message is an `InvalidResponse` error.
pub async fn read_message<R>(reader: &mut R) -> Result<Option<Message>, DapError>
where
    R: AsyncBufRead + Unpin,
{
    let mut content_length: Option<usize> = None;
    let mut saw_header = false;
    loop {
        let mut line = String::new();
        let n = reader
            .read_line(&mut line)
            .await
            .map_err(|e| DapError::Transport(format!("read failed: {e}")))?;
        if n == 0 {
            if saw_header {
                return Err(DapError::Transport(
                    "stream closed inside message header".into(),
                ));
            }
            return Ok(None);
        }
        saw_header = true;

        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some(len) = parse_content_length(line)? {
            content_length = Some(len);
        }
    }

    let length = content_length
        .ok_or_else(|| DapError::Transport("missing Content-Length header".into()))?;
    if length > MAX_MESSAGE_SIZE {
        return Err(DapError::Transport(format!(
            "Content-Length {length} exceeds the {MAX_MESSAGE_SIZE} byte limit"
        )));
    }

    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await.map_err(|e| {
        DapError::Transport(format!("incomplete body: expected {length} bytes: {e}"))
    })?;

    let message = serde_json::from_slice(&body)
        .map_err(|e| DapError::InvalidResponse(format!("JSON parse error: {e}")))?;
    Ok(Some(message))
}

/// Parse a single header line, returning the length if it is `Content-Length`.
fn parse_content_length(line: &str) -> Result<Option<usize>, DapError> {
    let Some(value) = line.strip_prefix("Content-Length:") else {
        return Ok(None);
    };
    let value = value.trim();
    value.parse::<usize>().map(Some).map_err(|e| {
        DapError::Transport(format!("invalid Content-Length value '{value}': {e}"))
    })
}
