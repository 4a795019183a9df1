use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Could not open file {path}: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create a request for uploading file {path}: {source}")]
    BuildRequest {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not send a request for uploading file {path}: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not read the response body while uploading file {path}: status={status}, {source}")]
    ReadBody {
        path: String,
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not upload file {path}: status={status}, body={body}")]
    UploadRejected {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Batch create request failed: {source}")]
    BatchCreate {
        #[source]
        source: reqwest::Error,
    },

    #[error("Batch create rejected: status={status}, body={body}")]
    BatchCreateRejected { status: u16, body: String },
}

/// Custom result type
pub type AppResult<T> = Result<T, AppError>;

/// Constructors taking borrowed paths, to keep `map_err` call sites short
impl AppError {
    pub fn open_file(path: &str, source: std::io::Error) -> Self {
        Self::OpenFile {
            path: path.to_string(),
            source,
        }
    }

    pub fn build_request(path: &str, source: reqwest::Error) -> Self {
        Self::BuildRequest {
            path: path.to_string(),
            source,
        }
    }

    pub fn transport(path: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            path: path.to_string(),
            source,
        }
    }

    pub fn read_body(path: &str, status: u16, source: reqwest::Error) -> Self {
        Self::ReadBody {
            path: path.to_string(),
            status,
            source,
        }
    }

    pub fn upload_rejected(path: &str, status: u16, body: String) -> Self {
        Self::UploadRejected {
            path: path.to_string(),
            status,
            body,
        }
    }

    /// True for failures that concern a single file rather than the batch.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            AppError::OpenFile { .. }
                | AppError::BuildRequest { .. }
                | AppError::Transport { .. }
                | AppError::ReadBody { .. }
                | AppError::UploadRejected { .. }
        )
    }
}
