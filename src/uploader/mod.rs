// Main uploader module - ties the upload pipeline together
//
// `library_client` talks to the remote media library; `upload_queue` runs the
// bounded worker pool that fans uploads out over it.

pub mod library_client;
pub mod upload_queue;

use crate::errors::AppResult;
use crate::models::NewMediaItem;

/// Uploads one local file to the media library's staging area.
///
/// The pipeline in [`upload_queue`] only depends on this trait, so tests can
/// drive it with doubles instead of a live service.
#[async_trait::async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, file_path: &str) -> AppResult<NewMediaItem>;
}

pub use library_client::LibraryClient;
pub use upload_queue::{upload_all, UPLOAD_CONCURRENCY};
