//! Update gating: classify, report, dispatch
//!
//! Reporting is strictly best-effort. A failed or slow API call never
//! blocks or breaks the bot's own update handling; the only way the
//! API can influence control flow is the explicit skip decision in
//! synchronous mode.

use std::collections::HashSet;
use std::future::Future;

use crate::client::TgvizClient;
use crate::config::TgvizConfig;
use crate::error::Result;
use crate::update::{EventType, Update};

/// Gates each update through classification, optional reporting to the
/// TGViz API, and handler dispatch.
///
/// Holds no mutable state; concurrent [`process_update`] calls are
/// fully independent.
///
/// [`process_update`]: UpdateProcessor::process_update
pub struct UpdateProcessor {
    client: TgvizClient,
    is_async: bool,
    exclude_events: HashSet<String>,
}

impl UpdateProcessor {
    /// Create a processor from configuration
    pub fn new(config: TgvizConfig) -> Result<Self> {
        let client = TgvizClient::new(&config)?;
        Ok(Self {
            client,
            is_async: config.is_async,
            exclude_events: config.exclude_events,
        })
    }

    /// Report the update, then run the caller's handler.
    ///
    /// Updates with no recognizable event type, or whose type is in the
    /// configured exclusion set, are not reported at all. In
    /// fire-and-forget mode the reporting call runs in a detached task
    /// and its outcome is only logged. In synchronous mode the API may
    /// answer with a skip decision, in which case the handler is not
    /// invoked and `None` is returned; every reporting error is logged
    /// and handling continues as if the API had returned no action.
    pub async fn process_update<H, Fut, T>(&self, update: Update, handler: H) -> Option<T>
    where
        H: FnOnce(Update) -> Fut,
        Fut: Future<Output = T>,
    {
        let event_type = EventType::classify(&update);

        if event_type == EventType::Undefined {
            tracing::warn!("update matched no known event type, reporting skipped");
        } else if self.exclude_events.contains(event_type.as_str()) {
            tracing::debug!(
                event_type = %event_type,
                "event type excluded from reporting"
            );
        } else if self.is_async {
            let client = self.client.clone();
            let payload = update.clone();
            tokio::spawn(async move {
                if let Err(e) = client.send_update(&payload).await {
                    tracing::error!(error = %e, "failed to report update");
                }
            });
        } else {
            match self.client.send_update(&update).await {
                Ok(response) if response.should_skip() => {
                    tracing::debug!(
                        update_id = response.update_id,
                        "update skipped by TGViz decision"
                    );
                    return None;
                }
                Ok(response) => {
                    tracing::debug!(update_id = response.update_id, "update reported");
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to report update, continuing");
                }
            }
        }

        Some(handler(update).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn update_from(value: serde_json::Value) -> Update {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test update must be a JSON object"),
        }
    }

    // Updates that bypass reporting never touch the network, so these
    // run against a processor pointed at the production URL.
    fn processor(exclude: &[&str]) -> UpdateProcessor {
        let mut config = TgvizConfig::new("tgv_live_test");
        config.is_async = false;
        config.exclude_events = exclude.iter().map(|s| s.to_string()).collect();
        UpdateProcessor::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_undefined_update_goes_straight_to_handler() {
        let processor = processor(&[]);
        let update = update_from(json!({"update_id": 1, "unknown_key": {"x": 1}}));

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in = calls.clone();
        let result = processor
            .process_update(update, move |u| async move {
                calls_in.fetch_add(1, Ordering::SeqCst);
                u.len()
            })
            .await;

        assert_eq!(result, Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_excluded_event_goes_straight_to_handler() {
        let processor = processor(&["inline_query"]);
        let update = update_from(json!({"inline_query": {"id": "q1", "query": "rust"}}));

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in = calls.clone();
        let result = processor
            .process_update(update, move |_| async move {
                calls_in.fetch_add(1, Ordering::SeqCst);
                "handled"
            })
            .await;

        assert_eq!(result, Some("handled"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handler_receives_original_update() {
        let processor = processor(&["message"]);
        let update = update_from(json!({"message": {"text": "hi"}}));

        let result = processor
            .process_update(update.clone(), |u| async move { u })
            .await;

        assert_eq!(result, Some(update));
    }
}
