use async_trait::async_trait;
use kanban_domain::{MoveAck, MoveCardRequest};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Move request failed: {0}")]
    Request(String),

    #[error("Unreadable move response: {0}")]
    Decode(String),
}

/// Hands a move to the server without waiting for it. Implementations
/// normally spawn [`reconcile_move`].
pub trait MoveDispatcher {
    fn dispatch(&mut self, request: MoveCardRequest);
}

/// Sends one move request and decodes the acknowledgement body. A body
/// that decodes is returned as-is whatever the HTTP status was.
#[async_trait(?Send)]
pub trait MoveClient {
    async fn post_move(&self, request: &MoveCardRequest) -> Result<MoveAck, TransportError>;
}

/// Throws away the optimistic page state and reloads from the server.
pub trait Reloader {
    fn reload(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadReason {
    Rejected(String),
    Transport(TransportError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The server applied the move; the optimistic state stands.
    Confirmed,
    /// The server disagreed or could not be reached; a reload was forced.
    Reloaded(ReloadReason),
}

/// Send a move and reconcile: a positive acknowledgement leaves the page
/// alone, anything else reloads it. No retries.
pub async fn reconcile_move<C, R>(client: &C, reloader: &R, request: &MoveCardRequest) -> SyncOutcome
where
    C: MoveClient + ?Sized,
    R: Reloader + ?Sized,
{
    match client.post_move(request).await {
        Ok(ack) if ack.ok => {
            tracing::debug!("Move of card {:?} confirmed", request.card_id);
            SyncOutcome::Confirmed
        }
        Ok(ack) => {
            let reason = ack.error.unwrap_or_default();
            tracing::warn!("Move of card {:?} rejected: {}", request.card_id, reason);
            reloader.reload();
            SyncOutcome::Reloaded(ReloadReason::Rejected(reason))
        }
        Err(err) => {
            tracing::warn!("Move of card {:?} not delivered: {}", request.card_id, err);
            reloader.reload();
            SyncOutcome::Reloaded(ReloadReason::Transport(err))
        }
    }
}
