//! Newline-delimited JSON request/reply loop.
//!
//! Each input line is `{"sender": "...", "query": {...}}`; each output line is
//! `{"sender": "...", "response": {...}}`. Replies are written as queries
//! complete, so their order can differ from the input order.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::mpsc,
};

use crate::{
    QueryOrchestrator,
    model::LocationQuery,
    outcome::{Outcome, QueryResponse},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEnvelope {
    pub sender: String,
    pub query: LocationQuery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    /// `None` when the request line could not be parsed.
    pub sender: Option<String>,
    pub response: QueryResponse,
}

/// Serve requests from `reader` until EOF, writing replies to `writer`.
///
/// Returns the number of replies written.
pub async fn serve<R, W>(
    orchestrator: QueryOrchestrator,
    reader: R,
    mut writer: W,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<ReplyEnvelope>();

    let intake = tokio::spawn(async move {
        let mut reader = reader;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            match parse_request(&buf) {
                Ok(None) => continue,
                Ok(Some(QueryEnvelope { sender, query })) => {
                    tracing::info!(%sender, "Query received");
                    let orchestrator = orchestrator.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let response: QueryResponse = orchestrator.handle(query).await.into();
                        // Receiver only goes away if the writer failed.
                        let _ = tx.send(ReplyEnvelope {
                            sender: Some(sender),
                            response,
                        });
                    });
                }
                Err(message) => {
                    tracing::warn!(error = %message, "Rejected malformed request");
                    let _ = tx.send(ReplyEnvelope {
                        sender: None,
                        response: Outcome::Failure {
                            message: format!("invalid request: {message}"),
                        }
                        .into(),
                    });
                }
            }
        }
        Ok::<_, std::io::Error>(())
    });

    let mut written = 0;
    while let Some(reply) = rx.recv().await {
        let mut line = serde_json::to_vec(&reply).context("Failed to serialize reply")?;
        line.push(b'\n');
        writer.write_all(&line).await.context("Failed to write reply")?;
        writer.flush().await.context("Failed to flush reply")?;
        written += 1;
    }

    intake
        .await
        .context("Request reader task failed")?
        .context("Failed to read request")?;

    Ok(written)
}

/// Decode one raw request line. Blank lines yield `None`.
fn parse_request(raw: &[u8]) -> std::result::Result<Option<QueryEnvelope>, String> {
    let line = std::str::from_utf8(raw).map_err(|err| err.to_string())?.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some).map_err(|err| err.to_string())
}
