use std::path::Path;

use reqwest::{Body, Client, StatusCode};
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};

use crate::errors::{AppError, AppResult};
use crate::models::{
    Album, BatchCreateMediaItemsRequest, BatchCreateMediaItemsResponse, NewMediaItem,
    NewMediaItemResult,
};

use super::MediaUploader;

pub const BASE_URL: &str = "https://photoslibrary.googleapis.com";
const API_VERSION: &str = "v1";
const UPLOAD_FILE_NAME_HEADER: &str = "X-Goog-Upload-File-Name";

/// Client for the media library's upload and batch-create endpoints.
///
/// The wrapped `reqwest::Client` must already carry authorization; this type
/// only knows the endpoint shapes.
pub struct LibraryClient {
    client: Client,
    base_url: String,
}

impl LibraryClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Points the client at a different service root, mainly for tests.
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    /// Uploads one file and returns the staged item carrying the service's
    /// upload token.
    ///
    /// The file is streamed, its base name travels in the
    /// `X-Goog-Upload-File-Name` header, and the response body is taken
    /// verbatim as the token. A single attempt; retrying a batch is the
    /// caller's call.
    pub async fn upload_file(&self, file_path: &str) -> AppResult<NewMediaItem> {
        let file = File::open(file_path)
            .await
            .map_err(|source| AppError::open_file(file_path, source))?;
        let file_name = base_name(file_path);

        let request = self
            .client
            .post(format!("{}/{}/uploads", self.base_url, API_VERSION))
            .header(UPLOAD_FILE_NAME_HEADER, &file_name)
            .body(Body::wrap_stream(FramedRead::new(file, BytesCodec::new())))
            .build()
            .map_err(|source| AppError::build_request(file_path, source))?;

        log::info!("Uploading {}", file_path);
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| AppError::transport(file_path, source))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| AppError::read_body(file_path, status.as_u16(), source))?;

        if status != StatusCode::OK {
            return Err(AppError::upload_rejected(file_path, status.as_u16(), body));
        }

        Ok(NewMediaItem {
            description: file_name,
            upload_token: body,
        })
    }

    /// Appends the items to the album, or to the user's library when no album
    /// is given.
    ///
    /// Items the service rejects are logged and skipped; only a failure of
    /// the batch call itself comes back as an error, since then no per-item
    /// outcome exists at all.
    pub async fn append(
        &self,
        album: Option<&Album>,
        media_items: &[NewMediaItem],
    ) -> AppResult<()> {
        let request = BatchCreateMediaItemsRequest {
            album_id: album.map(|album| album.id.clone()),
            new_media_items: media_items.to_vec(),
        };

        let response = self
            .client
            .post(format!("{}/{}/mediaItems:batchCreate", self.base_url, API_VERSION))
            .json(&request)
            .send()
            .await
            .map_err(|source| AppError::BatchCreate { source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BatchCreateRejected {
                status: status.as_u16(),
                body,
            });
        }

        let batch: BatchCreateMediaItemsResponse = response
            .json()
            .await
            .map_err(|source| AppError::BatchCreate { source })?;

        for skipped in reconcile(media_items, &batch.new_media_item_results) {
            match skipped.description {
                Some(description) => log::warn!(
                    "Skipped {}: {} ({})",
                    description,
                    skipped.message,
                    skipped.code
                ),
                None => log::warn!(
                    "Error while adding files: {} ({})",
                    skipped.message,
                    skipped.code
                ),
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MediaUploader for LibraryClient {
    async fn upload(&self, file_path: &str) -> AppResult<NewMediaItem> {
        self.upload_file(file_path).await
    }
}

/// One rejected item from a batch-create response. The description is absent
/// when the service returned a token we never submitted.
#[derive(Debug, PartialEq, Eq)]
struct SkippedItem {
    description: Option<String>,
    message: String,
    code: i64,
}

/// Collects the results the service rejected, attributing each to the
/// submitted item with the matching upload token. An unknown token still
/// produces an entry, just without attribution.
fn reconcile(media_items: &[NewMediaItem], results: &[NewMediaItemResult]) -> Vec<SkippedItem> {
    results
        .iter()
        .filter(|result| result.status.code != 0)
        .map(|result| SkippedItem {
            description: find_media_item_by_upload_token(media_items, &result.upload_token)
                .map(|item| item.description.clone()),
            message: result.status.message.clone(),
            code: result.status.code,
        })
        .collect()
}

// Linear scan; fine at the tens-to-hundreds of items a batch holds.
fn find_media_item_by_upload_token<'a>(
    media_items: &'a [NewMediaItem],
    upload_token: &str,
) -> Option<&'a NewMediaItem> {
    media_items
        .iter()
        .find(|item| item.upload_token == upload_token)
}

fn base_name(file_path: &str) -> String {
    Path::new(file_path)
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn item(description: &str, upload_token: &str) -> NewMediaItem {
        NewMediaItem {
            description: description.to_string(),
            upload_token: upload_token.to_string(),
        }
    }

    fn result(upload_token: &str, code: i64, message: &str) -> NewMediaItemResult {
        NewMediaItemResult {
            upload_token: upload_token.to_string(),
            status: Status {
                code,
                message: message.to_string(),
            },
        }
    }

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name("/a/b/photo.jpg"), "photo.jpg");
        assert_eq!(base_name("photo.jpg"), "photo.jpg");
        assert_eq!(base_name("./nested/dir/clip.mp4"), "clip.mp4");
    }

    #[test]
    fn reconcile_attributes_skip_by_token() {
        let items = vec![item("a.jpg", "t1"), item("b.jpg", "t2"), item("c.jpg", "t3")];
        let results = vec![
            result("t1", 0, ""),
            result("t2", 5, "quota exceeded"),
            result("t3", 0, ""),
        ];

        let skipped = reconcile(&items, &results);
        assert_eq!(
            skipped,
            vec![SkippedItem {
                description: Some("b.jpg".to_string()),
                message: "quota exceeded".to_string(),
                code: 5,
            }]
        );
    }

    #[test]
    fn reconcile_keeps_unknown_tokens_without_attribution() {
        let items = vec![item("a.jpg", "t1")];
        let results = vec![result("t-unknown", 13, "internal")];

        let skipped = reconcile(&items, &results);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].description, None);
        assert_eq!(skipped[0].message, "internal");
        assert_eq!(skipped[0].code, 13);
    }

    #[test]
    fn reconcile_is_silent_for_successful_results() {
        let items = vec![item("a.jpg", "t1"), item("b.jpg", "t2")];
        let results = vec![result("t1", 0, ""), result("t2", 0, "")];

        assert!(reconcile(&items, &results).is_empty());
    }

    #[test]
    fn find_media_item_matches_exact_token_only() {
        let items = vec![item("a.jpg", "t1"), item("b.jpg", "t2")];

        assert_eq!(
            find_media_item_by_upload_token(&items, "t2").map(|i| i.description.as_str()),
            Some("b.jpg")
        );
        assert!(find_media_item_by_upload_token(&items, "t").is_none());
    }

    #[test]
    fn with_base_url_trims_trailing_slashes() {
        let client = LibraryClient::with_base_url(Client::new(), "http://localhost:1234///");
        assert_eq!(client.base_url, "http://localhost:1234");
    }

    #[tokio::test]
    async fn upload_file_reports_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.jpg");
        let client = LibraryClient::new(Client::new());

        let err = client
            .upload_file(missing.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::OpenFile { .. }));
        assert!(err.is_per_file());
        assert!(err.to_string().contains("missing.jpg"));
    }
}
