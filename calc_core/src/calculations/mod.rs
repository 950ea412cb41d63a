//! # Structural Calculations
//!
//! Moving load analysis of a simply-supported span by influence lines.
//! The calculation follows the usual pattern:
//!
//! - [`MovingLoadInput`] - Input parameters (JSON-serializable)
//! - [`MovingLoadResult`] - Calculation results (JSON-serializable)
//! - [`calculate`] - Pure calculation function returning `CalcResult`
//!
//! The building blocks are public as well, for callers that want a single
//! sweep or a raw influence line:
//!
//! - [`influence`] - Unit-load ordinates and lazily resampled influence lines
//! - [`moving_load`] - Load pair sweep and envelope maxima at a section
//! - [`critical`] - Exact (breakpoint) maximum moment at a section
//! - [`absolute`] - Largest moment and shear anywhere on the span

pub mod absolute;
pub mod critical;
pub mod influence;
pub mod moving_load;

// Re-export commonly used types
pub use absolute::{absolute_maxima, AbsoluteMaxima, SectionExtreme};
pub use critical::{critical_moment, CriticalMoment};
pub use influence::{build_influence_ordinates, sample_ordinate_series, InfluenceLines, OrdinateSeries, Quantity};
pub use moving_load::{
    calculate, response_at, sweep_envelope, BeamSpec, Envelope, EnvelopeResult, LoadPair, MovingLoadInput,
    MovingLoadResult, Response, SectionLocation,
};
