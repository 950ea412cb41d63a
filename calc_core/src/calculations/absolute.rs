//! Absolute maxima anywhere along the span.
//!
//! The envelope in [`moving_load`](super::moving_load) watches one fixed
//! reference section. This module also moves the section: every section
//! position is paired with every leading-load position, and the largest
//! moment and largest shear magnitude found on the whole beam are reported
//! with both coordinates.

use serde::{Deserialize, Serialize};

use crate::calculations::influence::{build_influence_ordinates, sample_position};
use crate::calculations::moving_load::{superpose, ties, BeamSpec, LoadPair};

/// Extreme value of one quantity over all sections and load positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionExtreme {
    /// Extreme value (signed moment in kN·m, or shear magnitude in kN)
    pub value: f64,
    /// Section where it occurs (m from A)
    pub section_m: f64,
    /// Position of W1 at that moment (m from A)
    pub leading_position_m: f64,
}

/// Largest moment and shear anywhere on the span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteMaxima {
    /// Maximum sagging moment
    pub moment: SectionExtreme,
    /// Maximum shear magnitude
    pub shear: SectionExtreme,
}

fn keep_larger(slot: &mut Option<SectionExtreme>, candidate: SectionExtreme) {
    let replace = match slot {
        None => true,
        Some(best) => candidate.value > best.value && !ties(candidate.value, best.value),
    };
    if replace {
        *slot = Some(candidate);
    }
}

/// Scan `section_count` sections x `sample_count` leading-load positions.
///
/// Sections and positions are both visited low to high; on equal values
/// the first hit is kept.
pub fn absolute_maxima(
    beam: &BeamSpec,
    loads: &LoadPair,
    section_count: usize,
    sample_count: usize,
) -> AbsoluteMaxima {
    let mut moment: Option<SectionExtreme> = None;
    let mut shear: Option<SectionExtreme> = None;

    for j in 0..section_count {
        let section_m = sample_position(beam.span_m, j, section_count);
        let lines = build_influence_ordinates(beam.span_m, section_m);

        for i in 0..sample_count {
            let p = sample_position(beam.span_m, i, sample_count);
            let response = superpose(&lines, loads, p);

            keep_larger(
                &mut moment,
                SectionExtreme {
                    value: response.moment_knm,
                    section_m,
                    leading_position_m: p,
                },
            );
            keep_larger(
                &mut shear,
                SectionExtreme {
                    value: response.shear_kn.abs(),
                    section_m,
                    leading_position_m: p,
                },
            );
        }
    }

    let empty = SectionExtreme {
        value: 0.0,
        section_m: 0.0,
        leading_position_m: 0.0,
    };
    AbsoluteMaxima {
        moment: moment.unwrap_or(empty),
        shear: shear.unwrap_or(empty),
    }
}
