use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum FsTreeError {
    #[error("missing file system data")]
    MissingData,
    #[error("identifier {0} is reserved for the forest root")]
    ReservedId(u64),
    #[error("structural error: {0}")]
    Structural(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid record data: {0}")]
    Json(#[from] serde_json::Error),
}
impl FsTreeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsTreeError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn structural(msg: impl Into<String>) -> Self {
        FsTreeError::Structural(msg.into())
    }
    /// True for the empty-input sentinel returned before any construction work.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, FsTreeError::MissingData)
    }
}
