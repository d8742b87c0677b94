use std::path::{Path, PathBuf};

use crate::runner::RunnerError;
use crate::utils;

pub const MARKER: &str = "__REPLACE_ANIMALS_INFO__";

pub fn load_template(path: &str) -> Result<String, RunnerError> {
    utils::read_input("template", path)
}

// a template without the marker comes back unchanged
pub fn compose(template: &str, fragment: &str) -> String {
    template.replacen(MARKER, fragment, 1)
}

// hidden sibling of the output, so the final rename stays on one filesystem
fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "page".to_string());
    target.with_file_name(format!(".{name}.tmp"))
}

// the previous page stays intact until the new one is fully on disk
pub fn write_page(path: &str, html: &str) -> Result<(), RunnerError> {
    let write_err = |source: std::io::Error| RunnerError::FileWrite {
        path: path.to_string(),
        source,
    };
    let target = Path::new(path);
    let staging = staging_path(target);
    std::fs::write(&staging, html).map_err(write_err)?;
    if let Err(e) = std::fs::rename(&staging, target) {
        let _ = std::fs::remove_file(&staging);
        return Err(write_err(e));
    }
    Ok(())
}
