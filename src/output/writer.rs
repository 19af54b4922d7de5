//! Whole-file JSON writes.
//!
//! Cell values serialize non-finite numbers as `null`, so written documents
//! never contain a bare `NaN` token.
use crate::error::ResultMessage;
use crate::error::SkillMatrixError;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Layout of a written document.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum JsonStyle {
    /// Two-space indentation, used for per-entity documents
    Pretty,
    /// No whitespace, used for bulk dumps
    Compact,
}

/// Serializes a value to text in the given style.
pub fn to_json<T: Serialize + ?Sized>(value: &T, style: JsonStyle) -> Result<String, SkillMatrixError> {
    let text = match style {
        JsonStyle::Pretty => serde_json::to_string_pretty(value)?,
        JsonStyle::Compact => serde_json::to_string(value)?,
    };
    Ok(text)
}

/// Writes a value to `path`, creating parent directories on demand.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, style: JsonStyle) -> Result<(), SkillMatrixError> {
    let prefix = path.display().to_string();
    let text = to_json(value, style).with_prefix(&prefix)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(SkillMatrixError::from).with_prefix(&prefix)?;
    }
    fs::write(path, text).map_err(SkillMatrixError::from).with_prefix(&prefix)?;
    log::debug!("Wrote {}", prefix);
    Ok(())
}
