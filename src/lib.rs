//! Concurrent batch uploader for Google Photos-style media libraries.
//!
//! Uploads local files in parallel to the library's staging endpoint, then
//! registers the staged items in the user's library (or a chosen album) with
//! a single batch-create call. Both phases are best effort: individual files
//! or items may fail and are logged and skipped, while the batch as a whole
//! still completes. Only a failure of the batch-create call itself surfaces
//! as an error.
//!
//! ```no_run
//! use std::sync::Arc;
//! use photo_library_uploader::{upload_all, LibraryClient};
//!
//! # async fn run() -> photo_library_uploader::AppResult<()> {
//! // The reqwest client must already carry authorization.
//! let client = Arc::new(LibraryClient::new(reqwest::Client::new()));
//! let items = upload_all(
//!     Arc::clone(&client),
//!     vec!["a.jpg".to_string(), "b.jpg".to_string()],
//! )
//! .await;
//! client.append(None, &items).await?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod models;
pub mod uploader;

pub use errors::{AppError, AppResult};
pub use models::{Album, NewMediaItem};
pub use uploader::{upload_all, LibraryClient, MediaUploader, UPLOAD_CONCURRENCY};
