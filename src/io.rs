use std::io::Write;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StartupError;

/// Serializes a config object to a pretty-printed JSON file.
pub fn object_to_json<T: Serialize>(output_path: &str, object: &T) -> std::io::Result<()> {
    let j = serde_json::to_string_pretty(object).map_err(std::io::Error::other)?;
    let mut file = std::fs::File::create(output_path)?;
    file.write_all(j.as_bytes())
}

/// Deserializes a config object from a JSON file. Failure here is
/// startup-fatal: a broken config is reported once, before the loop.
pub fn object_from_json<T: DeserializeOwned>(file_path: &str) -> Result<T, StartupError> {
    let contents = std::fs::read_to_string(file_path).map_err(|source| StartupError::ConfigRead {
        path: file_path.to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| StartupError::ConfigParse {
        path: file_path.to_string(),
        source,
    })
}
