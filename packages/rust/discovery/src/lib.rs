//! Seed URL validation and identifier extraction.
//!
//! Input to a labeling run is a text file of Confluence page/folder URLs,
//! one per line. This crate turns those lines into the numeric content
//! identifiers the REST API addresses, rejecting anything that matches
//! neither recognized URL shape.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error, warn};

use conflabel_shared::{ConflabelError, Result};

/// Page URL shape: `https://<site>.atlassian.net/wiki/spaces/<space>/pages/<id>/<title>`.
static PAGE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://[\w-]+\.atlassian\.net/wiki/spaces/.+/pages/(\d+)/.*$")
        .expect("page URL regex")
});

/// Folder URL shape: `https://<site>.atlassian.net/wiki/spaces/<space>/folder/<id>`,
/// with an optional trailing segment.
static FOLDER_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://[\w-]+\.atlassian\.net/wiki/spaces/.+/folder/(\d+)(/.*)?$")
        .expect("folder URL regex")
});

/// Validate a wiki URL and extract its content identifier.
///
/// Accepts both page and folder URLs. A path that somehow matches both
/// shapes resolves to the folder identifier — the page match is taken
/// first and then overwritten, so folder wins.
pub fn validate_url(url: &str) -> Result<String> {
    let mut id = PAGE_URL_RE
        .captures(url)
        .map(|caps| caps[1].to_string());

    if let Some(caps) = FOLDER_URL_RE.captures(url) {
        id = Some(caps[1].to_string());
    }

    match id {
        Some(id) => {
            debug!(url, id = %id, "valid wiki URL");
            Ok(id)
        }
        None => Err(ConflabelError::invalid_url(url)),
    }
}

/// Read a URL file and return the identifiers of every valid line.
///
/// Lines blank after trimming are skipped silently. Lines that fail
/// validation are logged and dropped; the rest of the file is still
/// processed. A whole-file read failure is logged and yields an empty
/// Vec — indistinguishable from a file with no valid lines except by
/// the log output.
pub fn read_valid_identifiers(path: &Path) -> Vec<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!(error = %ConflabelError::io(path, e), "failed to read URL file");
            return Vec::new();
        }
    };

    let mut ids = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match validate_url(line) {
            Ok(id) => ids.push(id),
            Err(e) => warn!(line, error = %e, "skipping invalid URL"),
        }
    }

    ids
}
