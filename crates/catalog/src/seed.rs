//! Parser for JSON seed files.
//!
//! Seed data is plain JSON: one array of item documents per content type
//! (`movies.json`, `songs.json`, `books.json`, `series.json`) and one array
//! of rating documents (`ratings.json`). Field names follow the upstream
//! camelCase convention, with `_id` for item identity.

use crate::error::{Result, StoreError};
use crate::types::{ContentItem, Rating};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read a seed file into memory, mapping a missing file to a dedicated error
fn read_seed_file(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(StoreError::SeedNotFound {
                path: path.display().to_string(),
            })
        }
        Err(err) => Err(StoreError::IoError(err)),
    }
}

/// Deserialize a JSON array of documents, attaching the file name on failure
fn parse_array<T: DeserializeOwned>(contents: &str, file: &str) -> Result<Vec<T>> {
    serde_json::from_str(contents).map_err(|err| StoreError::MalformedSeed {
        file: file.to_string(),
        reason: err.to_string(),
    })
}

/// Parse one content collection from a JSON seed file
pub fn read_items(path: &Path) -> Result<Vec<ContentItem>> {
    let contents = read_seed_file(path)?;
    parse_array(&contents, &path.display().to_string())
}

/// Parse the ratings collection from a JSON seed file
pub fn read_ratings(path: &Path) -> Result<Vec<Rating>> {
    let contents = read_seed_file(path)?;
    parse_array(&contents, &path.display().to_string())
}
