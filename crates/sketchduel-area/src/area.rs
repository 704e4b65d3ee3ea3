//! Area actor: an isolated Tokio task that owns one dispatcher.
//!
//! Commands for an area are queued on a bounded channel and applied one at
//! a time, so no two commands ever interleave their reads and writes of the
//! session. Callers hold a cheap [`AreaHandle`] and wait for the reply on a
//! oneshot channel.

use sketchduel_protocol::{AreaId, AreaSnapshot, Command, CommandResponse};
use tokio::sync::{mpsc, oneshot};

use crate::history::LeaderboardRow;
use crate::{AreaError, ChannelObserver, Participant, SessionDispatcher, SnapshotSender};

/// Commands sent to an area actor through its channel.
pub(crate) enum AreaCommand {
    /// Apply a decoded command.
    Handle {
        command: Command,
        participant: Participant,
        reply: oneshot::Sender<Result<CommandResponse, AreaError>>,
    },

    /// Decode and apply a raw JSON command.
    HandleEncoded {
        bytes: Vec<u8>,
        participant: Participant,
        reply: oneshot::Sender<Result<CommandResponse, AreaError>>,
    },

    Snapshot {
        reply: oneshot::Sender<AreaSnapshot>,
    },

    Leaderboard {
        reply: oneshot::Sender<Vec<LeaderboardRow>>,
    },

    /// Register a snapshot subscriber. The reply is the state at the moment
    /// of subscribing.
    Subscribe {
        sender: SnapshotSender,
        reply: oneshot::Sender<AreaSnapshot>,
    },

    Shutdown,
}

/// Handle to a running area actor.
///
/// Cloning is cheap: it wraps an `mpsc::Sender`. Every method fails with
/// [`AreaError::Unavailable`] once the actor has stopped.
#[derive(Debug, Clone)]
pub struct AreaHandle {
    area_id: AreaId,
    sender: mpsc::Sender<AreaCommand>,
}

impl AreaHandle {
    pub fn area_id(&self) -> AreaId {
        self.area_id
    }

    /// Applies `command` for `participant` and waits for the outcome.
    pub async fn handle(
        &self,
        command: Command,
        participant: Participant,
    ) -> Result<CommandResponse, AreaError> {
        self.request(|reply| AreaCommand::Handle {
            command,
            participant,
            reply,
        })
        .await?
    }

    /// Like [`handle`](Self::handle), for a JSON-encoded command.
    pub async fn handle_encoded(
        &self,
        bytes: Vec<u8>,
        participant: Participant,
    ) -> Result<CommandResponse, AreaError> {
        self.request(|reply| AreaCommand::HandleEncoded {
            bytes,
            participant,
            reply,
        })
        .await?
    }

    pub async fn snapshot(&self) -> Result<AreaSnapshot, AreaError> {
        self.request(|reply| AreaCommand::Snapshot { reply }).await
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardRow>, AreaError> {
        self.request(|reply| AreaCommand::Leaderboard { reply }).await
    }

    /// Subscribes to every snapshot broadcast from now on.
    ///
    /// Returns the current state together with the receiver, so a late
    /// observer can render before the next change arrives.
    pub async fn subscribe(
        &self,
    ) -> Result<(AreaSnapshot, mpsc::UnboundedReceiver<AreaSnapshot>), AreaError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let current = self
            .request(|reply| AreaCommand::Subscribe { sender: tx, reply })
            .await?;
        Ok((current, rx))
    }

    /// Tells the area to stop. Commands already queued are dropped.
    pub async fn shutdown(&self) -> Result<(), AreaError> {
        self.sender
            .send(AreaCommand::Shutdown)
            .await
            .map_err(|_| AreaError::Unavailable(self.area_id))
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> AreaCommand,
    ) -> Result<T, AreaError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| AreaError::Unavailable(self.area_id))?;
        reply_rx
            .await
            .map_err(|_| AreaError::Unavailable(self.area_id))
    }
}

/// The internal actor state. Runs inside a Tokio task.
struct AreaActor {
    area_id: AreaId,
    dispatcher: SessionDispatcher,
    receiver: mpsc::Receiver<AreaCommand>,
}

impl AreaActor {
    async fn run(mut self) {
        tracing::info!(area_id = %self.area_id, "area actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                AreaCommand::Handle {
                    command,
                    participant,
                    reply,
                } => {
                    let result = self.dispatcher.handle(command, &participant);
                    let _ = reply.send(result);
                }
                AreaCommand::HandleEncoded {
                    bytes,
                    participant,
                    reply,
                } => {
                    let result = self.dispatcher.handle_encoded(&bytes, &participant);
                    let _ = reply.send(result);
                }
                AreaCommand::Snapshot { reply } => {
                    let _ = reply.send(self.dispatcher.snapshot());
                }
                AreaCommand::Leaderboard { reply } => {
                    let _ = reply.send(self.dispatcher.leaderboard());
                }
                AreaCommand::Subscribe { sender, reply } => {
                    self.dispatcher.add_observer(ChannelObserver::new(sender));
                    let _ = reply.send(self.dispatcher.snapshot());
                }
                AreaCommand::Shutdown => {
                    tracing::info!(area_id = %self.area_id, "area shutting down");
                    break;
                }
            }
        }

        tracing::info!(area_id = %self.area_id, "area actor stopped");
    }
}

/// Spawns an actor around `dispatcher` and returns a handle to it.
///
/// `channel_size` bounds the command queue; senders wait when it is full.
/// Must be called from within a Tokio runtime.
pub fn spawn_area(dispatcher: SessionDispatcher, channel_size: usize) -> AreaHandle {
    let area_id = dispatcher.area_id();
    let (tx, rx) = mpsc::channel(channel_size.max(1));

    let actor = AreaActor {
        area_id,
        dispatcher,
        receiver: rx,
    };
    tokio::spawn(actor.run());

    AreaHandle {
        area_id,
        sender: tx,
    }
}
