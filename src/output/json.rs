//! JSON output formatting

use serde::Serialize;

use crate::error::Result;

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}
