//! Scoped temporary storage for an uploaded résumé.
//!
//! Each request spools its upload to a uniquely-named file so concurrent
//! uploads sharing an original filename cannot clobber each other. The file
//! is removed when the handle drops, on every exit path; removal is
//! best-effort and an already-absent file is not an error.

use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// RAII handle to the spooled résumé. Dropping it deletes the file.
pub struct ResumeFile {
    inner: NamedTempFile,
}

impl ResumeFile {
    /// Writes the uploaded bytes to a fresh temp file whose name carries a
    /// sanitized trace of the original filename plus a random suffix.
    pub async fn spool(original_filename: &str, data: &[u8]) -> Result<Self> {
        let prefix = format!("resume-{}-", sanitize_filename(original_filename));
        let inner = tempfile::Builder::new()
            .prefix(&prefix)
            .tempfile()
            .context("failed to create temporary resume file")?;

        tokio::fs::write(inner.path(), data)
            .await
            .context("failed to spool resume upload")?;

        Ok(Self { inner })
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

/// Reduces a client-supplied filename to a safe name fragment: the final
/// path component with anything but alphanumerics, dots, dashes, and
/// underscores replaced, capped in length. Traversal components disappear
/// entirely.
fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim_matches('.');

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
