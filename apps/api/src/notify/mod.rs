//! Request-completion change feed over redis pub/sub.
//!
//! Best-effort on both ends: a failed publish is logged and swallowed by
//! the caller, and the listener only observes events while its task is
//! alive. The authoritative review-prompt source remains the
//! `pending_review_prompts` query.

use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;

pub const COMPLETION_CHANNEL: &str = "service_requests:completed";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub request_id: Uuid,
    pub user_id: Uuid,
    pub completed_at: DateTime<Utc>,
}

/// Publishes a completion event on the feed.
pub async fn publish_completion(
    client: &redis::Client,
    event: &CompletionEvent,
) -> Result<(), AppError> {
    let payload = serde_json::to_string(event)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("event serialization: {e}")))?;
    let mut conn = client.get_multiplexed_async_connection().await?;
    let _receivers: i64 = conn.publish(COMPLETION_CHANNEL, payload).await?;
    Ok(())
}

/// Spawns the background listener for the lifetime of the process. Events
/// observed here flag that a customer has a completed request awaiting
/// review; missed events are picked up by the pending query on next read.
pub fn spawn_completion_listener(client: redis::Client) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut pubsub = match client.get_async_pubsub().await {
            Ok(pubsub) => pubsub,
            Err(e) => {
                error!("completion listener could not connect: {e}");
                return;
            }
        };
        if let Err(e) = pubsub.subscribe(COMPLETION_CHANNEL).await {
            error!("completion listener could not subscribe: {e}");
            return;
        }
        info!("Completion listener subscribed to {COMPLETION_CHANNEL}");

        let mut stream = pubsub.on_message();
        while let Some(msg) = stream.next().await {
            let payload: String = match msg.get_payload() {
                Ok(p) => p,
                Err(e) => {
                    warn!("unreadable completion event: {e}");
                    continue;
                }
            };
            match serde_json::from_str::<CompletionEvent>(&payload) {
                Ok(event) => info!(
                    "Request {} completed; review prompt eligible for user {}",
                    event.request_id, event.user_id
                ),
                Err(e) => warn!("malformed completion event {payload:?}: {e}"),
            }
        }
        warn!("completion listener stream ended");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_round_trip() {
        let event = CompletionEvent {
            request_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            completed_at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: CompletionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.request_id, event.request_id);
        assert_eq!(back.user_id, event.user_id);
    }

    #[test]
    fn test_malformed_event_is_error_not_panic() {
        assert!(serde_json::from_str::<CompletionEvent>("{\"nope\":1}").is_err());
    }
}
