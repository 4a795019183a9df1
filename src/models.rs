//! Wire types for the media library's upload and batch-create endpoints.
//!
//! Field names follow the service's JSON casing via serde renames. Response
//! types default missing fields so a sparse payload still deserializes.

use serde::{Deserialize, Serialize};

/// A successfully uploaded blob awaiting batch creation into the library.
///
/// The upload token is opaque: it comes back from the upload endpoint as the
/// raw response body and is only ever round-tripped into the batch-create
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItem {
    pub description: String,
    pub upload_token: String,
}

/// An album that batch-created items can be appended to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateMediaItemsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    pub new_media_items: Vec<NewMediaItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateMediaItemsResponse {
    #[serde(default)]
    pub new_media_item_results: Vec<NewMediaItemResult>,
}

/// Per-item outcome of a batch-create call, keyed by upload token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItemResult {
    #[serde(default)]
    pub upload_token: String,
    #[serde(default)]
    pub status: Status,
}

/// Service status for one item. Code 0 means the item was created.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_create_request_serializes_camel_case() {
        let request = BatchCreateMediaItemsRequest {
            album_id: Some("album-1".to_string()),
            new_media_items: vec![NewMediaItem {
                description: "photo.jpg".to_string(),
                upload_token: "t1".to_string(),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["albumId"], "album-1");
        assert_eq!(json["newMediaItems"][0]["description"], "photo.jpg");
        assert_eq!(json["newMediaItems"][0]["uploadToken"], "t1");
    }

    #[test]
    fn batch_create_request_omits_absent_album() {
        let request = BatchCreateMediaItemsRequest {
            album_id: None,
            new_media_items: Vec::new(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("albumId").is_none());
    }

    #[test]
    fn batch_create_response_defaults_missing_status() {
        let response: BatchCreateMediaItemsResponse = serde_json::from_str(
            r#"{"newMediaItemResults":[{"uploadToken":"t1"},{"uploadToken":"t2","status":{"code":5,"message":"quota"}}]}"#,
        )
        .unwrap();

        assert_eq!(response.new_media_item_results.len(), 2);
        assert_eq!(response.new_media_item_results[0].status.code, 0);
        assert_eq!(response.new_media_item_results[1].status.code, 5);
        assert_eq!(response.new_media_item_results[1].status.message, "quota");
    }

    #[test]
    fn empty_batch_create_response_deserializes() {
        let response: BatchCreateMediaItemsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.new_media_item_results.is_empty());
    }
}
