/// `hypermap build`.
pub mod build;
/// `hypermap reconcile`.
pub mod reconcile;

use std::fs;
use std::path::Path;

use hm_core::errors::{ErrorInfo, HmError};

pub(crate) fn io_error(code: &str, path: &Path, err: impl ToString) -> HmError {
    HmError::Io(ErrorInfo::new(code, err.to_string())).with_context("path", path.display())
}

pub(crate) fn read_text(path: &Path) -> Result<String, HmError> {
    fs::read_to_string(path).map_err(|err| io_error("read-input", path, err))
}

pub(crate) fn write_text(path: &Path, text: &str) -> Result<(), HmError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| io_error("create-dir", parent, err))?;
    }
    fs::write(path, text).map_err(|err| io_error("write-output", path, err))
}
