//! Repair of JSON files holding bare `NaN` / `Infinity` tokens.
//!
//! Tokens inside string literals are left alone. The patched text is written
//! back before validation; a file that still fails to parse is not restored.
use crate::error::ResultMessage;
use crate::error::SkillMatrixError;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("JSON in '{path}' is still invalid: {source}")]
    InvalidJson {
        path: String,
        source: serde_json::Error,
    },
}

/// Non-standard literals, longest first so `-Infinity` wins over `Infinity`.
const INVALID_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];
const NULL: &str = "null";

/// Result of patching one file.
#[derive(Debug, PartialEq)]
pub struct PatchReport {
    pub replacements: usize,
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Replaces invalid numeric tokens outside string literals with `null`.
/// Returns the new text and the number of replacements.
pub fn patch_text(text: &str) -> (String, usize) {
    let bytes = text.as_bytes();
    let mut patched = String::with_capacity(text.len());
    let mut replacements = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut last = 0usize;
    let mut index = 0usize;
    while index < bytes.len() {
        let byte = bytes[index];
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => (),
            }
            index += 1;
            continue;
        }
        if byte == b'"' {
            in_string = true;
            index += 1;
            continue;
        }
        let after_boundary = index == 0 || !is_word_byte(bytes[index - 1]);
        let token = INVALID_TOKENS.iter().find(|token| {
            let end = index + token.len();
            after_boundary
                && bytes[index..].starts_with(token.as_bytes())
                && bytes.get(end).map(|next| !is_word_byte(*next)).unwrap_or(true)
        });
        match token {
            Some(token) => {
                patched.push_str(&text[last..index]);
                patched.push_str(NULL);
                replacements += 1;
                index += token.len();
                last = index;
            }
            None => index += 1,
        }
    }
    patched.push_str(&text[last..]);
    (patched, replacements)
}

/// Patches a file in place and checks that it parses afterwards.
pub fn patch_file(path: &Path) -> Result<PatchReport, SkillMatrixError> {
    let prefix = path.display().to_string();
    let content = fs::read_to_string(path).map_err(SkillMatrixError::from).with_prefix(&prefix)?;
    let (patched, replacements) = patch_text(&content);
    if replacements > 0 {
        fs::write(path, &patched).map_err(SkillMatrixError::from).with_prefix(&prefix)?;
        log::info!("Replaced {} invalid tokens in '{}'", replacements, prefix);
    }
    if let Err(source) = serde_json::from_str::<serde_json::Value>(&patched) {
        return Err(PatchError::InvalidJson { path: prefix, source }.into());
    }
    log::info!("JSON file '{}' fixed and validated successfully", prefix);
    Ok(PatchReport { replacements })
}
