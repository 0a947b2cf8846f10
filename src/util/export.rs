use crate::ui::doc::Doc;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the plain-text form of `doc` to a timestamped file in `dir`.
pub fn write_report(doc: &Doc, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let name = format!("stgtui-report-{}.txt", chrono::Local::now().format("%Y%m%d-%H%M%S"));
    let path = dir.join(name);
    fs::write(&path, doc.plain()).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), lines = doc.len(), "exported page");
    Ok(path)
}
