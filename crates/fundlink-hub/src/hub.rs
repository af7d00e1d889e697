use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use fundlink_catalog::Catalog;
use fundlink_types::api::{Command, Reply};
use fundlink_types::events::StoreEvent;

use crate::{Engine, HubError};

/// Depth of the command queue in front of the engine task.
const COMMAND_QUEUE: usize = 64;

struct Envelope {
    command: Command,
    reply: oneshot::Sender<Result<Reply, HubError>>,
}

/// Handle to the task that owns the store. Cheap to clone; every clone
/// feeds the same queue, so commands apply strictly in arrival order.
#[derive(Clone)]
pub struct Hub {
    inner: Arc<HubInner>,
}

struct HubInner {
    command_tx: mpsc::Sender<Envelope>,

    /// Every store change is published here after it is applied
    event_tx: broadcast::Sender<StoreEvent>,
}

impl Hub {
    /// Spawn the engine task on the current runtime.
    pub fn spawn(catalog: Catalog, event_buffer: usize) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE);
        let (event_tx, _) = broadcast::channel(event_buffer.max(1));

        tokio::spawn(run(Engine::new(catalog), command_rx, event_tx.clone()));

        Self {
            inner: Arc::new(HubInner {
                command_tx,
                event_tx,
            }),
        }
    }

    /// Subscribe to store events. Returns a broadcast receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.event_tx.subscribe()
    }

    /// Queue a command and wait for the engine's reply.
    pub async fn execute(&self, command: Command) -> Result<Reply, HubError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.inner
            .command_tx
            .send(Envelope {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| HubError::Closed)?;

        reply_rx.await.map_err(|_| HubError::Closed)?
    }
}

async fn run(
    mut engine: Engine,
    mut command_rx: mpsc::Receiver<Envelope>,
    event_tx: broadcast::Sender<StoreEvent>,
) {
    info!("Hub started");

    while let Some(Envelope { command, reply }) = command_rx.recv().await {
        let result = engine.handle(command).map(|(reply, events)| {
            for event in events {
                // No subscribers is fine
                let _ = event_tx.send(event);
            }
            reply
        });

        if let Err(e) = &result {
            warn!("Command failed: {}", e);
        }

        if reply.send(result).is_err() {
            debug!("Caller went away before the reply was ready");
        }
    }

    info!("Hub stopped, all handles dropped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundlink_types::api::{LoginRequest, SendConnectionRequest};
    use fundlink_types::models::{Role, UserId};

    fn login(role: Role) -> Command {
        Command::Login(LoginRequest {
            role,
            user_id: None,
            name: String::new(),
            email: String::new(),
            company: String::new(),
        })
    }

    #[tokio::test]
    async fn events_follow_commands() {
        let hub = Hub::spawn(Catalog::seeded(), 16);
        let mut events = hub.subscribe();

        hub.execute(login(Role::Startup)).await.unwrap();
        hub.execute(Command::SendConnectionRequest(SendConnectionRequest {
            to_user_id: UserId::from("investor4"),
            message: None,
        }))
        .await
        .unwrap();

        assert!(matches!(
            events.recv().await.unwrap(),
            StoreEvent::SessionStarted { role: Role::Startup, .. }
        ));
        match events.recv().await.unwrap() {
            StoreEvent::RequestSent { request, notification } => {
                assert_eq!(request.to_user_id, UserId::from("investor4"));
                assert_eq!(notification.related_request_id, Some(request.id));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn errors_come_back_to_the_caller() {
        let hub = Hub::spawn(Catalog::seeded(), 16);

        let err = hub.execute(Command::IncomingRequests).await.unwrap_err();
        assert!(matches!(err, HubError::Store(_)));

        // The engine keeps serving after a failed command.
        hub.execute(login(Role::Investor)).await.unwrap();
        let reply = hub.execute(Command::IncomingRequests).await.unwrap();
        assert!(matches!(reply, Reply::Requests { requests } if requests.is_empty()));
    }

    #[tokio::test]
    async fn clones_share_one_store() {
        let hub = Hub::spawn(Catalog::seeded(), 16);
        let other = hub.clone();

        hub.execute(login(Role::Investor)).await.unwrap();
        let reply = other.execute(Command::WhoAmI).await.unwrap();
        assert!(matches!(reply, Reply::Session { session: Some(_) }));
    }
}
