//! Closed-form maximum moment at a section.
//!
//! With W1 at `p` the moment at section `s` is piecewise linear in `p`, so
//! its maximum sits on a breakpoint: a span end, the point where W2 enters
//! (`p = x`), W1 over the section (`p = s`) or W2 over the section
//! (`p = s + x`). Evaluating only those positions gives the exact peak that
//! the sampled sweep converges to.

use serde::{Deserialize, Serialize};

use crate::calculations::influence::build_influence_ordinates;
use crate::calculations::moving_load::{superpose, ties, BeamSpec, LoadPair};

/// Exact maximum moment at a section and the leading-load position producing it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalMoment {
    /// Maximum moment (kN·m)
    pub moment_knm: f64,
    /// Position of W1 (m from A)
    pub leading_position_m: f64,
}

/// Leading-load positions where the moment at `section_m` can change slope,
/// sorted ascending and restricted to the span.
pub fn moment_breakpoints(beam: &BeamSpec, loads: &LoadPair, section_m: f64) -> Vec<f64> {
    let mut candidates: Vec<f64> = [
        0.0,
        beam.span_m,
        loads.spacing_m,
        section_m,
        section_m + loads.spacing_m,
    ]
    .into_iter()
    .filter(|&p| beam.contains(p))
    .collect();

    candidates.sort_by(f64::total_cmp);
    candidates.dedup();
    candidates
}

/// Exact maximum moment at `section_m` as the pair crosses the span.
///
/// Ties keep the smallest leading-load position, matching the sweep.
///
/// ```rust
/// use calc_core::calculations::critical::critical_moment;
/// use calc_core::calculations::moving_load::{BeamSpec, LoadPair};
///
/// let beam = BeamSpec { span_m: 10.0 };
/// let loads = LoadPair { w1_kn: 30.0, w2_kn: 20.0, spacing_m: 3.0 };
///
/// let peak = critical_moment(&beam, &loads, 5.0);
/// assert_eq!(peak.leading_position_m, 5.0);
/// assert!((peak.moment_knm - 95.0).abs() < 1e-9);
/// ```
pub fn critical_moment(beam: &BeamSpec, loads: &LoadPair, section_m: f64) -> CriticalMoment {
    let lines = build_influence_ordinates(beam.span_m, section_m);

    let mut best = CriticalMoment {
        moment_knm: 0.0,
        leading_position_m: 0.0,
    };
    let mut first = true;
    for p in moment_breakpoints(beam, loads, section_m) {
        let moment = superpose(&lines, loads, p).moment_knm;
        if first || (moment > best.moment_knm && !ties(moment, best.moment_knm)) {
            best = CriticalMoment {
                moment_knm: moment,
                leading_position_m: p,
            };
            first = false;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::moving_load::sweep_envelope;
    use approx::assert_relative_eq;

    #[test]
    fn test_breakpoints_inside_span() {
        let beam = BeamSpec { span_m: 10.0 };
        let loads = LoadPair {
            w1_kn: 30.0,
            w2_kn: 20.0,
            spacing_m: 3.0,
        };
        assert_eq!(moment_breakpoints(&beam, &loads, 5.0), vec![0.0, 3.0, 5.0, 8.0, 10.0]);
        // W2 can never reach a section at 9 m
        assert_eq!(moment_breakpoints(&beam, &loads, 9.0), vec![0.0, 3.0, 9.0, 10.0]);
    }

    #[test]
    fn test_trailing_load_governs() {
        // Heavy trailing load: peak occurs with W2 over the section
        let beam = BeamSpec { span_m: 10.0 };
        let loads = LoadPair {
            w1_kn: 10.0,
            w2_kn: 60.0,
            spacing_m: 2.0,
        };
        let peak = critical_moment(&beam, &loads, 5.0);

        // W2 at 5 (2.5 ordinate), W1 at 7 (0.3 * 5 = 1.5 ordinate): 150 + 15
        assert_relative_eq!(peak.leading_position_m, 7.0);
        assert_relative_eq!(peak.moment_knm, 165.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sweep_converges_to_exact_peak() {
        let beam = BeamSpec { span_m: 17.3 };
        let loads = LoadPair {
            w1_kn: 55.0,
            w2_kn: 35.0,
            spacing_m: 4.1,
        };
        let section_m = 7.7;
        let exact = critical_moment(&beam, &loads, section_m);
        let sampled = sweep_envelope(&beam, &loads, section_m, 2001);

        // Never overshoots; misses by at most slope * half a step
        let step = beam.span_m / 2000.0;
        let max_slope = loads.total_kn() * 1.0;
        assert!(sampled.moment.value <= exact.moment_knm + 1e-9);
        assert!(exact.moment_knm - sampled.moment.value <= max_slope * step);
        assert!((sampled.moment.leading_position_m - exact.leading_position_m).abs() <= step);
    }
}
