//! Notification worker.
//!
//! Rendered messages are posted from a single background task so inbound
//! requests never wait on the chat service. Each job is attempted once.

use jaya_core::models::Message;
use jaya_core::notify::ChatNotifier;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Capacity of the notify queue.
pub const NOTIFY_QUEUE_CAPACITY: usize = 1000;

/// How long shutdown waits for queued messages to be posted.
pub const SHUTDOWN_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// A message waiting to be posted.
#[derive(Debug, Clone)]
pub struct NotifyJob {
    /// Delivery the message was rendered from.
    pub delivery_id: String,
    /// The event type the message was rendered from.
    pub event_type: String,
    pub message: Message,
}

/// Starts the notification worker.
///
/// Returns a sender for submitting jobs and a handle to the worker task. The
/// worker exits once every sender has been dropped and the queue is drained.
pub fn start_notify_processor(
    notifier: Arc<dyn ChatNotifier>,
) -> (mpsc::Sender<NotifyJob>, tokio::task::JoinHandle<()>) {
    let (tx, rx) = mpsc::channel::<NotifyJob>(NOTIFY_QUEUE_CAPACITY);

    let handle = tokio::spawn(async move {
        run_notify_processor(notifier, rx).await;
    });

    (tx, handle)
}

/// Waits for the worker to drain its queue, up to `timeout`.
///
/// Returns `false` if the wait timed out, in which case the worker is aborted
/// and any messages still queued are dropped.
pub async fn drain_notify_processor(mut handle: JoinHandle<()>, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, &mut handle).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::error!("Notify processor panicked: {}", e);
            true
        }
        Err(_) => {
            tracing::warn!(
                "Notify queue not drained after {:?}, dropping remaining messages",
                timeout
            );
            handle.abort();
            false
        }
    }
}

/// Main processor loop.
async fn run_notify_processor(notifier: Arc<dyn ChatNotifier>, mut rx: mpsc::Receiver<NotifyJob>) {
    tracing::info!("Notify processor started");

    while let Some(job) = rx.recv().await {
        tracing::debug!(
            "Posting message for delivery {} ({})",
            job.delivery_id,
            job.event_type
        );

        if let Err(e) = notifier.notify(&job.message).await {
            tracing::error!("Failed to post message for delivery {}: {}", job.delivery_id, e);
        }
    }

    tracing::info!("Notify processor stopped");
}
