//! Writing an assembly bundle to disk.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::AsmError;

/// Write each bundle entry to `<dir>/<name>.asm`, creating the
/// directory if needed. Entries are written in name order.
///
/// # Errors
/// Returns an error if the directory or any file cannot be written.
pub fn export_bundle(dir: &Path, bundle: &BTreeMap<String, String>) -> Result<(), AsmError> {
    std::fs::create_dir_all(dir).map_err(|e| AsmError::Write {
        path: dir.display().to_string(),
        source: e,
    })?;
    for (name, content) in bundle {
        let path = dir.join(format!("{name}.asm"));
        std::fs::write(&path, content).map_err(|e| AsmError::Write {
            path: path.display().to_string(),
            source: e,
        })?;
    }
    Ok(())
}
