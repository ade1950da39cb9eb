//! Folder ID extraction for command-line overrides.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DriveError, Result};

/// Drive URL forms that carry a folder ID in their first capture group.
static FOLDER_URL_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"^https?://drive\.google\.com/drive/(?:u/\d+/)?folders/([a-zA-Z0-9_-]+)")
            .expect("Invalid folder URL regex"),
        Regex::new(r"^https?://drive\.google\.com/open\?id=([a-zA-Z0-9_-]+)")
            .expect("Invalid open URL regex"),
    ]
});

static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("Invalid ID regex"));

/// Extract a folder ID from a Drive folder URL, or validate a raw ID.
///
/// Accepted forms:
/// - `https://drive.google.com/drive/folders/<ID>`
/// - `https://drive.google.com/drive/u/0/folders/<ID>`
/// - `https://drive.google.com/open?id=<ID>`
/// - Raw ID string
///
/// # Examples
///
/// ```
/// use drive_export::url_parser::extract_folder_id;
///
/// let id = extract_folder_id("https://drive.google.com/drive/folders/1abc123").unwrap();
/// assert_eq!(id, "1abc123");
///
/// let id = extract_folder_id("1abc123").unwrap();
/// assert_eq!(id, "1abc123");
/// ```
pub fn extract_folder_id(url_or_id: &str) -> Result<String> {
    let trimmed = url_or_id.trim();

    let from_url = FOLDER_URL_PATTERNS
        .iter()
        .find_map(|re| re.captures(trimmed))
        .and_then(|captures| captures.get(1));
    if let Some(id) = from_url {
        return Ok(id.as_str().to_string());
    }

    if ID_REGEX.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(DriveError::InvalidUrlOrId(url_or_id.to_string()))
}
