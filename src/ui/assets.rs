//! Filesystem-based asset source for loading piece SVGs.

use gpui::{AssetSource, SharedString};
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use tracing::trace;

/// Looks for assets in an optional configured directory, next to the
/// executable, then relative to the working directory.
pub struct FileAssets {
    roots: Vec<PathBuf>,
}

impl FileAssets {
    pub fn new(asset_dir: Option<PathBuf>) -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));
        let cwd = std::env::current_dir().ok();

        let roots = asset_dir.into_iter().chain(exe_dir).chain(cwd).collect();
        Self { roots }
    }
}

impl AssetSource for FileAssets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        let candidates = self
            .roots
            .iter()
            .map(|root| root.join(path))
            .chain(std::iter::once(PathBuf::from(path)));

        for p in candidates {
            if let Ok(data) = fs::read(&p) {
                return Ok(Some(Cow::Owned(data)));
            }
        }
        trace!(path, "asset not found");
        Ok(None)
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        let mut results = Vec::new();
        let Some(dir_path) = self.roots.iter().map(|r| r.join(path)).find(|p| p.is_dir()) else {
            return Ok(results);
        };

        if let Ok(entries) = fs::read_dir(&dir_path) {
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    results.push(SharedString::from(name.to_string()));
                }
            }
        }
        Ok(results)
    }
}
