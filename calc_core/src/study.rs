//! # Study Data Structures
//!
//! A `Study` is the root container for one moving load analysis: who ran
//! it, the settings it was run with, the input, and the latest result.
//! Studies serialize to `.mls` (moving load study) files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Study
//! ├── meta: StudyMetadata (id, version, engineer, job info, timestamps)
//! ├── settings: AnalysisSettings (resolutions, reference section, plot density)
//! ├── input: MovingLoadInput
//! └── result: Option<MovingLoadResult>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{BeamSpec, LoadPair};
//! use calc_core::study::Study;
//!
//! let mut study = Study::new(
//!     "Jane Engineer",
//!     "25-042",
//!     BeamSpec { span_m: 10.0 },
//!     LoadPair { w1_kn: 30.0, w2_kn: 20.0, spacing_m: 3.0 },
//! );
//! study.run().unwrap();
//!
//! let json = serde_json::to_string_pretty(&study).unwrap();
//! assert!(json.contains("\"engineer\": \"Jane Engineer\""));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::moving_load::{
    calculate, BeamSpec, LoadPair, MovingLoadInput, MovingLoadResult, SectionLocation, DEFAULT_SAMPLE_COUNT,
    DEFAULT_SECTION_COUNT,
};
use crate::errors::{CalcError, CalcResult};

/// Current schema version for .mls files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Default number of points per plotted influence line
pub const DEFAULT_PLOT_POINTS: usize = 100;

/// Root study container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Study {
    /// Study metadata (id, version, engineer, job info)
    pub meta: StudyMetadata,

    /// Analysis settings
    #[serde(default)]
    pub settings: AnalysisSettings,

    /// Beam and load pair being analysed
    pub input: MovingLoadInput,

    /// Result of the last run, if any
    #[serde(default)]
    pub result: Option<MovingLoadResult>,
}

impl Study {
    /// Create a new study with default settings.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `beam` - The span
    /// * `loads` - The moving load pair
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, beam: BeamSpec, loads: LoadPair) -> Self {
        let now = Utc::now();
        let settings = AnalysisSettings::default();
        let input = settings.apply(MovingLoadInput::new(beam, loads));
        Study {
            meta: StudyMetadata {
                id: Uuid::new_v4(),
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                created: now,
                modified: now,
            },
            settings,
            input,
            result: None,
        }
    }

    /// Replace the settings; the stored result is dropped because it no longer matches.
    pub fn set_settings(&mut self, settings: AnalysisSettings) {
        self.input = settings.apply(self.input.clone());
        self.settings = settings;
        self.result = None;
        self.touch();
    }

    /// Run the analysis and store the result.
    pub fn run(&mut self) -> CalcResult<&MovingLoadResult> {
        let result = calculate(&self.input)?;
        self.touch();
        let stored: &MovingLoadResult = self.result.insert(result);
        Ok(stored)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

/// Study metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyMetadata {
    /// Unique id
    pub id: Uuid,

    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// When the study was created
    pub created: DateTime<Utc>,

    /// When the study was last modified
    pub modified: DateTime<Utc>,
}

/// Resolution and section settings shared by the engine and the CLI.
///
/// Every field has a default, so a settings file only needs the values it changes:
///
/// ```json
/// { "sample_count": 5001, "section": { "Ratio": 0.25 } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Leading-load positions per sweep
    pub sample_count: usize,

    /// Reference section for shear and moment
    pub section: SectionLocation,

    /// Section positions for the absolute maxima scan
    pub section_count: usize,

    /// Points per plotted influence line
    pub plot_points: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            sample_count: DEFAULT_SAMPLE_COUNT,
            section: SectionLocation::Midspan,
            section_count: DEFAULT_SECTION_COUNT,
            plot_points: DEFAULT_PLOT_POINTS,
        }
    }
}

impl AnalysisSettings {
    /// Validate settings that do not depend on the beam.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("sample_count", self.sample_count),
            ("section_count", self.section_count),
            ("plot_points", self.plot_points),
        ] {
            if value < 2 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be at least 2",
                ));
            }
        }
        Ok(())
    }

    /// Copy these settings onto an input
    pub fn apply(&self, input: MovingLoadInput) -> MovingLoadInput {
        MovingLoadInput {
            section: self.section,
            sample_count: self.sample_count,
            section_count: self.section_count,
            ..input
        }
    }
}
