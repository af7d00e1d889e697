use anyhow::{Result, anyhow};
use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use fundlink_hub::{Hub, HubError};
use fundlink_types::api::{Command, Reply};
use fundlink_types::events::StoreEvent;
use fundlink_types::models::UserId;

use crate::render;

/// Read one JSON command per line, answer with one JSON reply per line.
/// Blank lines and `#` comments are skipped; bad lines get an `Error` reply.
pub async fn run<R, W>(hub: &Hub, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let reply = match serde_json::from_str::<Command>(line) {
            Ok(command) => match hub.execute(command).await {
                Ok(reply) => reply,
                Err(HubError::Closed) => return Err(anyhow!("hub stopped unexpectedly")),
                Err(e) => Reply::Error {
                    message: e.to_string(),
                },
            },
            Err(e) => {
                debug!("Rejected line {:?}: {}", line, e);
                Reply::Error {
                    message: format!("malformed command: {}", e),
                }
            }
        };

        let rendered = render::render(&reply, Utc::now())?;
        output.write_all(rendered.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }

    info!("Input closed");
    Ok(())
}

/// Log every store event until the hub goes away.
pub async fn log_events(mut events: broadcast::Receiver<StoreEvent>) {
    loop {
        match events.recv().await {
            Ok(StoreEvent::SessionStarted { user_id, role, name }) => {
                info!("Session started: {} ({}) as {}", name, user_id, role);
            }
            Ok(StoreEvent::SessionEnded { user_id }) => {
                info!("Session ended: {}", user_id);
            }
            Ok(event) => {
                let to = event.recipient().map(UserId::as_str).unwrap_or("-");
                match &event {
                    StoreEvent::RequestSent { request, .. } => info!(
                        "Request {} from {} -> notified {}",
                        request.id, request.from_user_id, to
                    ),
                    StoreEvent::RequestResolved { request, .. } => {
                        info!("Request {} {} -> notified {}", request.id, request.status, to)
                    }
                    _ => debug!("Read receipt for {}: {:?}", to, event),
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!("Event log lagged, skipped {} events", n);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
