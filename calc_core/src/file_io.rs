//! # File I/O Module
//!
//! Handles study file operations with safety features:
//! - **Atomic saves**: Write to .tmp, verify, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Studies are saved as `.mls` files containing JSON. Settings files are
//! plain JSON holding an [`AnalysisSettings`] object.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::calculations::{BeamSpec, LoadPair};
//! use calc_core::file_io::{load_study, save_study};
//! use calc_core::study::Study;
//! use std::path::Path;
//!
//! let mut study = Study::new(
//!     "Engineer",
//!     "25-001",
//!     BeamSpec { span_m: 10.0 },
//!     LoadPair { w1_kn: 30.0, w2_kn: 20.0, spacing_m: 3.0 },
//! );
//! study.run()?;
//!
//! let path = Path::new("girder.mls");
//! save_study(&study, path)?;
//! let reloaded = load_study(path)?;
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::errors::{CalcError, CalcResult};
use crate::study::{AnalysisSettings, Study, SCHEMA_VERSION};

/// Save a study to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize study to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target (atomic on most filesystems)
pub fn save_study(study: &Study, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(study)?;
    write_atomic(path, json.as_bytes())?;
    tracing::debug!(path = %path.display(), id = %study.meta.id, "saved study");
    Ok(())
}

fn write_atomic(path: &Path, contents: &[u8]) -> CalcResult<()> {
    let tmp_path = path.with_extension("mls.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a study from a file.
///
/// # Returns
///
/// * `Ok(Study)` - Successfully loaded study
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_study(path: &Path) -> CalcResult<Study> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let study: Study = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&study.meta.version)?;

    Ok(study)
}

/// Load analysis settings from a JSON file; missing fields take their defaults.
pub fn load_settings(path: &Path) -> CalcResult<AnalysisSettings> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let settings: AnalysisSettings = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid settings in {}: {}", path.display(), e))
    })?;
    settings.validate()?;

    Ok(settings)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor is a breaking change we can't read
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}
