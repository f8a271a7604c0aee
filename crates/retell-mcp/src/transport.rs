//! Line-delimited JSON-RPC transport.
//!
//! Every input line is one message.  A reader task splits the input into
//! lines, each message is handled on its own task, and responses are
//! funnelled through a single writer task so frames never interleave on the
//! output.

use std::future::Future;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use crate::error::{McpError, Result};
use crate::mcp::{JsonRpcResponse, McpServer, PARSE_ERROR};

/// Serve over the process's stdin and stdout until input closes or
/// `shutdown` resolves.
pub async fn serve_stdio<F>(server: Arc<McpServer>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    serve(server, tokio::io::stdin(), tokio::io::stdout(), shutdown).await
}

/// Frames buffered between the reader task and the dispatch loop.
const INBOX_CAPACITY: usize = 64;

/// Serve over arbitrary streams.
///
/// Stops reading when `reader` hits EOF, fails, or `shutdown` resolves, then
/// waits for in-flight requests, flushes their responses and closes
/// `writer`.  A read error is returned only after that drain.
pub async fn serve<R, W, F>(server: Arc<McpServer>, reader: R, writer: W, shutdown: F) -> Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
    F: Future<Output = ()>,
{
    let (frames, outbox) = mpsc::unbounded_channel::<String>();
    let writer_task = tokio::spawn(write_frames(writer, outbox));

    let (inbox_tx, mut inbox) = mpsc::channel::<Vec<u8>>(INBOX_CAPACITY);
    let reader_task = tokio::spawn(read_frames(reader, inbox_tx));

    let mut in_flight = JoinSet::new();
    let mut input_closed = false;
    tokio::pin!(shutdown);

    info!(tools = server.tool_count(), "MCP server listening");

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!(pending = in_flight.len(), "shutdown requested");
                break;
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                log_join(joined);
            }
            frame = inbox.recv() => match frame {
                Some(frame) => {
                    let server = Arc::clone(&server);
                    let frames = frames.clone();
                    in_flight.spawn(async move {
                        let Some(response) = answer_frame(&server, &frame).await else {
                            return;
                        };
                        match serde_json::to_string(&response) {
                            Ok(frame) => {
                                if frames.send(frame).is_err() {
                                    warn!("writer closed before response was sent");
                                }
                            }
                            Err(e) => error!(error = %e, "failed to serialize response"),
                        }
                    });
                }
                None => {
                    debug!("input closed");
                    input_closed = true;
                    break;
                }
            }
        }
    }

    if !input_closed {
        reader_task.abort();
    }

    while let Some(joined) = in_flight.join_next().await {
        log_join(joined);
    }
    drop(frames);

    writer_task
        .await
        .map_err(|e| McpError::Task(e.to_string()))??;

    if input_closed {
        reader_task
            .await
            .map_err(|e| McpError::Task(e.to_string()))??;
    }
    info!("MCP server stopped");
    Ok(())
}

/// Split `reader` into newline-terminated frames.  Frames are raw bytes so
/// that a line which is not UTF-8 can still be answered.
async fn read_frames<R>(reader: R, inbox: mpsc::Sender<Vec<u8>>) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    loop {
        let mut frame = Vec::new();
        match reader.read_until(b'\n', &mut frame).await {
            Ok(0) => return Ok(()),
            Ok(_) => {
                if inbox.send(frame).await.is_err() {
                    return Ok(());
                }
            }
            Err(e) => {
                error!(error = %e, "failed to read input");
                return Err(e.into());
            }
        }
    }
}

/// Answer one input frame.  Blank frames are skipped.
async fn answer_frame(server: &McpServer, frame: &[u8]) -> Option<JsonRpcResponse> {
    match std::str::from_utf8(frame) {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => server.handle_message(line.trim_end_matches(['\r', '\n'])).await,
        Err(e) => {
            warn!(error = %e, "input line is not UTF-8");
            Some(JsonRpcResponse::error(
                None,
                PARSE_ERROR,
                format!("failed to parse JSON-RPC message: {e}"),
            ))
        }
    }
}

async fn write_frames<W>(mut writer: W, mut outbox: mpsc::UnboundedReceiver<String>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = outbox.recv().await {
        writer.write_all(frame.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    writer.shutdown().await?;
    Ok(())
}

fn log_join(joined: std::result::Result<(), JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "request task failed");
    }
}
