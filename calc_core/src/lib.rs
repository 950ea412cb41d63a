//! # calc_core - Moving Load Influence-Line Engine
//!
//! `calc_core` computes envelope (maximum) responses of a simply-supported
//! beam crossed by two linked point loads, using influence lines. All inputs
//! and outputs are JSON-serializable so results can be stored or handed to
//! other tools unchanged.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Validate at the edge**: Inputs are checked once; the sweep itself cannot fail
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{calculate, BeamSpec, LoadPair, MovingLoadInput};
//!
//! let input = MovingLoadInput::new(
//!     BeamSpec::new(10.0)?,
//!     LoadPair::new(30.0, 20.0, 3.0)?,
//! );
//! let result = calculate(&input)?;
//!
//! for max in result.envelope.iter() {
//!     println!("{}: {:.2} at W1 = {:.2} m", max.quantity, max.value, max.leading_position_m);
//! }
//! # Ok::<(), calc_core::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Influence lines, envelope sweep, exact and absolute maxima
//! - [`study`] - Study container, metadata and analysis settings
//! - [`units`] - Type-safe unit wrappers for reporting
//! - [`errors`] - Structured error types
//! - [`file_io`] - Study and settings files with atomic saves

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod study;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_settings, load_study, save_study};
pub use study::{AnalysisSettings, Study, StudyMetadata};
