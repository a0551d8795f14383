// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the scan extraction pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan extraction operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that abort an extraction run.
///
/// Every variant is fatal: the run stops and no output file is written.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Input file missing, unreadable, or not a usable mesh.
    #[error("failed to load {path}: {reason}")]
    Load {
        /// Mesh file that could not be loaded.
        path: PathBuf,
        /// Human-readable cause.
        reason: String,
    },

    /// A record in the mesh file could not be interpreted.
    #[error("{path}:{line}: {reason} (`{content}`)")]
    Parse {
        /// Mesh file being parsed.
        path: PathBuf,
        /// 1-based line number of the offending record.
        line: usize,
        /// The offending record, trimmed.
        content: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The analysis file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file unreadable or invalid.
    #[error("invalid configuration {path}: {reason}")]
    Config {
        /// Configuration file, or `<defaults>` for built-in settings.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
}

impl ScanError {
    /// Create a `Load` error.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a `Parse` error for a specific line.
    #[must_use]
    pub fn parse(
        path: impl Into<PathBuf>,
        line: usize,
        content: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            content: content.trim().to_string(),
            reason: reason.into(),
        }
    }

    /// Create a `Config` error.
    #[must_use]
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Process exit status reported by the `roomscan` binary. Codes start at 3;
    /// 1 is a generic failure and 2 is a command-line usage error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::Load { .. } => 3,
            ScanError::Parse { .. } => 4,
            ScanError::Write { .. } => 5,
            ScanError::Config { .. } => 6,
        }
    }
}
