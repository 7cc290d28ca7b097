use crate::error::FsTreeError;
use crate::types::FsData;
use std::fs;
use std::path::Path;
/// Parses a JSON array of records.
pub fn parse_records(json: &str) -> Result<Vec<FsData>, FsTreeError> {
    Ok(serde_json::from_str(json)?)
}
/// Reads a JSON array of records from `path`.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<FsData>, FsTreeError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| FsTreeError::io(path, e))?;
    #[cfg(feature = "logging")]
    tracing::debug!("Loaded {} bytes of records from {}", json.len(), path.display());
    parse_records(&json)
}
