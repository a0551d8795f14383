// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Analysis result writer

use crate::analysis::AnalysisResult;
use crate::error::{ScanError, ScanResult};
use std::fs;
use std::path::Path;
use tracing::info;

/// Render the analysis as pretty-printed JSON with a trailing newline
pub fn to_json(result: &AnalysisResult) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(result)?;
    json.push('\n');
    Ok(json)
}

/// Write the analysis file, replacing any previous one at `path`.
///
/// The document is rendered in full before the file is opened, so a failure
/// never leaves a truncated analysis behind.
pub fn write_analysis(result: &AnalysisResult, path: impl AsRef<Path>) -> ScanResult<()> {
    let path = path.as_ref();
    let write_err = |source: std::io::Error| ScanError::Write {
        path: path.to_path_buf(),
        source,
    };

    let json = to_json(result).map_err(|e| write_err(std::io::Error::other(e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, json.as_bytes()).map_err(write_err)?;

    info!("analysis written to {} ({} bytes)", path.display(), json.len());
    Ok(())
}
