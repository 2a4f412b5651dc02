//! Bundle output writing.
//!
//! Writes every chunk and asset of a [`BundleOutput`] into the project
//! directory, prepending the configured banner to JavaScript chunks. An
//! inline source map in the chunk is shifted by the banner's line count so
//! mappings stay accurate. Writes are atomic (temp file + rename, rollback
//! on failure) and output paths are validated so a hostile chunk name cannot
//! escape the target directory.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use path_clean::PathClean;
use rolldown::BundleOutput;
use rolldown_common::Output;

use crate::{Error, Result};

/// Write a bundle into `dir`, prepending `banner` to `.js` chunks.
///
/// Existing files are overwritten; watch mode rewrites the same output file
/// on every rebuild. Either all files land or none do: failures roll back any
/// temp files already written.
pub fn write_bundle(output: &BundleOutput, dir: &Path, banner: Option<&str>) -> Result<()> {
    let dir = normalize_dir(dir)?;

    fs::create_dir_all(&dir).map_err(|e| {
        Error::WriteFailure(format!(
            "failed to create output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut operations: Vec<(PathBuf, Vec<u8>)> = Vec::new();
    for item in &output.assets {
        match item {
            Output::Chunk(chunk) => {
                let target = validate_output_path(&dir, chunk.filename.as_str())?;
                let content = chunk_contents(banner, chunk.filename.as_str(), &chunk.code);
                operations.push((target, content));
            }
            Output::Asset(asset) => {
                let target = validate_output_path(&dir, asset.filename.as_str())?;
                operations.push((target, asset.source.as_bytes().to_vec()));
            }
        }
    }

    write_files_atomic(&operations)
}

/// Final bytes for a chunk file, banner included for `.js` outputs.
///
/// The banner shifts every generated line down, so an inline source map in
/// the chunk is rewritten with the matching line offset before the banner
/// goes on top.
fn chunk_contents(banner: Option<&str>, filename: &str, code: &str) -> Vec<u8> {
    match banner {
        Some(banner) if filename.ends_with(".js") => {
            let added_lines = banner.matches('\n').count() + 1;
            let code = offset_inline_sourcemap(code, added_lines);
            let mut bytes = Vec::with_capacity(banner.len() + 1 + code.len());
            bytes.extend_from_slice(banner.as_bytes());
            bytes.push(b'\n');
            bytes.extend_from_slice(code.as_bytes());
            bytes
        }
        _ => code.as_bytes().to_vec(),
    }
}

const SOURCEMAP_DATA_URL: &str = "//# sourceMappingURL=data:application/json";

/// Shift an inline source map's generated lines down by `added_lines`.
///
/// VLQ mappings separate generated lines with `;`, so prepending one `;` per
/// added line keeps every existing segment pointing at the same source
/// position. Chunks without an inline map, or with a payload that does not
/// decode as a JSON map, pass through unchanged.
fn offset_inline_sourcemap(code: &str, added_lines: usize) -> String {
    let Some(shifted) = try_offset_inline_sourcemap(code, added_lines) else {
        return code.to_string();
    };
    shifted
}

fn try_offset_inline_sourcemap(code: &str, added_lines: usize) -> Option<String> {
    let comment_start = code.rfind(SOURCEMAP_DATA_URL)?;
    let after_comment = &code[comment_start..];
    let base64_offset = after_comment.find(";base64,")? + ";base64,".len();
    let payload_start = comment_start + base64_offset;
    let payload_end = code[payload_start..]
        .find(|c: char| c.is_whitespace())
        .map_or(code.len(), |i| payload_start + i);

    let decoded = BASE64.decode(&code[payload_start..payload_end]).ok()?;
    let mut map: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    let mappings = map.get("mappings")?.as_str()?;
    let shifted = format!("{}{}", ";".repeat(added_lines), mappings);
    map["mappings"] = serde_json::Value::String(shifted);

    let reencoded = BASE64.encode(serde_json::to_string(&map).ok()?);
    let mut out = String::with_capacity(code.len());
    out.push_str(&code[..payload_start]);
    out.push_str(&reencoded);
    out.push_str(&code[payload_end..]);
    Some(out)
}

/// Normalize the output directory to an absolute, cleaned path.
fn normalize_dir(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.clean();
    if cleaned.is_absolute() {
        return Ok(cleaned);
    }
    let base = std::env::current_dir()
        .map_err(|e| Error::InvalidOutputPath(format!("failed to get current directory: {}", e)))?;
    Ok(base.join(cleaned).clean())
}

/// Validate an output file name, rejecting traversal out of `base_dir`.
fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "file name contains a null byte".to_string(),
        ));
    }

    let full_path = base_dir.join(Path::new(filename).clean()).clean();
    if !full_path.starts_with(base_dir) {
        return Err(Error::InvalidOutputPath(format!(
            "'{}' escapes output directory '{}'",
            filename,
            base_dir.display()
        )));
    }

    Ok(full_path)
}

/// Write files via temp + rename so readers never observe partial contents.
fn write_files_atomic(operations: &[(PathBuf, Vec<u8>)]) -> Result<()> {
    let mut temp_files = Vec::new();

    for (target, content) in operations {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                cleanup_temp_files(&temp_files);
                Error::WriteFailure(format!(
                    "failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = target.with_extension("tmp");
        fs::write(&temp_path, content).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "failed to write temporary file '{}': {}",
                temp_path.display(),
                e
            ))
        })?;
        temp_files.push((temp_path, target.clone()));
    }

    for (temp_path, target) in &temp_files {
        fs::rename(temp_path, target).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "failed to rename '{}' to '{}': {}",
                temp_path.display(),
                target.display(),
                e
            ))
        })?;
    }

    Ok(())
}

/// Best-effort removal of temp files after a failed write.
fn cleanup_temp_files(temp_files: &[(PathBuf, PathBuf)]) {
    for (temp_path, _) in temp_files {
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(temp_path) {
                tracing::warn!(
                    "failed to clean up temporary file '{}': {}",
                    temp_path.display(),
                    e
                );
            }
        }
    }
}
