use thiserror::Error;

/// Errors that can occur while exporting the practice sheet
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode practice sheet: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write practice sheet: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by the AI service collaborator.
///
/// Call sites never branch on the variant; every failure is logged and
/// surfaced as one generic notice.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("API key not found")]
    MissingApiKey,
    #[error("nothing to letter: exemplar text is empty")]
    EmptyText,
    #[error("no practice image supplied")]
    EmptyImage,
    #[error("no image generated")]
    NoImageGenerated,
    #[error("service request failed: {0}")]
    Backend(String),
}

/// Errors that can occur while loading a practice photo
#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("not a supported image file: {0}")]
    Unsupported(String),
    #[error("dropped file has no accessible data: {0}")]
    NoData(String),
}

/// Errors that can occur while loading the application config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}
