use std::path::PathBuf;

use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::repository::PictureStore;
use crate::error::ServiceError;

/// Filesystem-backed profile picture storage. Files land in `dir` under a
/// uuid-prefixed name; the returned name is the stable reference the account
/// record carries.
#[derive(Clone)]
pub struct FsPictureStore {
    pub dir: PathBuf,
}

impl FsPictureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Reduce an uploaded filename to a safe basename: path separators and
/// anything outside [A-Za-z0-9._-] become underscores, leading dots are
/// stripped so the result can never traverse out of the picture dir.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let safe: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = safe.trim_start_matches('.');
    if trimmed.is_empty() {
        "picture".to_owned()
    } else {
        trimmed.to_owned()
    }
}

impl PictureStore for FsPictureStore {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        let stored = format!("{}_{}", Uuid::new_v4(), sanitize_filename(filename));
        tokio::fs::create_dir_all(&self.dir)
            .await
            .context("create picture dir")?;
        tokio::fs::write(self.dir.join(&stored), bytes)
            .await
            .context("write picture")?;
        Ok(stored)
    }
}
