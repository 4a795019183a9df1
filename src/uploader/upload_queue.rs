use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::models::NewMediaItem;

use super::MediaUploader;

/// Number of files uploaded in parallel. A fixed constant rather than a
/// function of input size or CPU count: uploads are network-bound.
pub const UPLOAD_CONCURRENCY: usize = 3;

/// Uploads all files, at most [`UPLOAD_CONCURRENCY`] at a time.
///
/// Best effort: a file that fails to upload is logged and skipped, and the
/// batch as a whole always completes. If no file could be uploaded the
/// returned vector is empty. Results arrive in completion order, not input
/// order.
pub async fn upload_all<U>(uploader: Arc<U>, file_paths: Vec<String>) -> Vec<NewMediaItem>
where
    U: MediaUploader + 'static,
{
    let total = file_paths.len();
    if total == 0 {
        return Vec::new();
    }

    // The queue is fully loaded before any worker starts, so a drained queue
    // is the only termination signal the workers need.
    let upload_queue: Arc<Mutex<VecDeque<String>>> =
        Arc::new(Mutex::new(file_paths.into_iter().collect()));
    log::info!("Queued {} file(s)", total);

    let (aggregate_tx, mut aggregate_rx) = mpsc::channel(total);
    let mut workers = Vec::with_capacity(UPLOAD_CONCURRENCY);
    for _ in 0..UPLOAD_CONCURRENCY {
        let upload_queue = Arc::clone(&upload_queue);
        let uploader = Arc::clone(&uploader);
        let aggregate_tx = aggregate_tx.clone();
        workers.push(tokio::spawn(async move {
            upload_worker(uploader, upload_queue, aggregate_tx).await;
        }));
    }
    // The workers now hold the only senders, so the channel closes once the
    // last worker exits. That is what ends the drain loop below.
    drop(aggregate_tx);

    let mut media_items = Vec::with_capacity(total);
    while let Some(media_item) = aggregate_rx.recv().await {
        media_items.push(media_item);
    }

    for worker in workers {
        if let Err(join_error) = worker.await {
            log::error!("Upload worker terminated abnormally: {}", join_error);
        }
    }

    media_items
}

async fn upload_worker<U>(
    uploader: Arc<U>,
    upload_queue: Arc<Mutex<VecDeque<String>>>,
    aggregate_tx: mpsc::Sender<NewMediaItem>,
) where
    U: MediaUploader,
{
    loop {
        let next = match upload_queue.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        let Some(file_path) = next else {
            break;
        };

        match uploader.upload(&file_path).await {
            // Channel capacity equals the queue length, so the send never
            // blocks; it only fails if the collector is gone, and then there
            // is nobody left to deliver to.
            Ok(media_item) => {
                if aggregate_tx.send(media_item).await.is_err() {
                    break;
                }
            }
            Err(err) => log::warn!("Error while uploading file {}: {}", file_path, err),
        }
    }
}
