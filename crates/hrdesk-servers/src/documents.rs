use anyhow::{Context, Result};
use std::path::Path;

pub const DEFAULT_HR_POLICY: &str = include_str!("../data/hr_policy.md");
pub const DEFAULT_CODE_OF_CONDUCT: &str = include_str!("../data/code_of_conduct.md");

/// Read a document from `path`, falling back to the bundled text
///
/// A configured path that does not exist falls back with a warning; any other
/// read failure is an error.
pub async fn load_document(path: Option<&Path>, fallback: &'static str) -> Result<String> {
    let Some(path) = path else {
        return Ok(fallback.to_string());
    };

    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            tracing::info!(path = %path.display(), bytes = text.len(), "loaded document");
            Ok(text)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "document not found, using bundled default");
            Ok(fallback.to_string())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read document {}", path.display())),
    }
}
