//! Influence Lines for a Simply-Supported Beam
//!
//! An influence line gives the value of one response quantity (a support
//! reaction, or the shear/moment at a fixed reference section) as a unit
//! load travels across the span. Every ordinate here is a total, pure
//! function of the unit-load position `a` on `[0, L]`.
//!
//! ## Sign Convention
//! - Reactions: positive upward
//! - Shear at section `s`: `+a/L` while the unit load is at or left of `s`,
//!   `-(L-a)/L` once it passes `s` (jump of exactly 1 at `a = s`)
//! - Moment at section `s`: positive sagging, peak `s(L-s)/L` at `a = s`
//!
//! ## Example
//! ```rust
//! use calc_core::calculations::influence::{build_influence_ordinates, Quantity};
//!
//! // 10 m span, section at midspan
//! let lines = build_influence_ordinates(10.0, 5.0);
//!
//! assert_eq!(lines.reaction_a(2.0), 0.8);
//! assert_eq!(lines.moment(5.0), 2.5);
//! assert_eq!(lines.ordinate(Quantity::ReactionB, 10.0), 1.0);
//! ```

use std::fmt;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

/// Response quantity tracked by the influence-line engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    /// Vertical reaction at the left support (A)
    ReactionA,
    /// Vertical reaction at the right support (B)
    ReactionB,
    /// Shear force at the reference section
    Shear,
    /// Bending moment at the reference section
    Moment,
}

impl Quantity {
    /// All quantities, in report order
    pub const ALL: [Quantity; 4] = [
        Quantity::ReactionA,
        Quantity::ReactionB,
        Quantity::Shear,
        Quantity::Moment,
    ];

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            Quantity::ReactionA => "Reaction at A",
            Quantity::ReactionB => "Reaction at B",
            Quantity::Shear => "Shear force",
            Quantity::Moment => "Bending moment",
        }
    }

    /// Unit symbol for a quantity produced by loads in kN
    pub fn unit_symbol(self) -> &'static str {
        match self {
            Quantity::Moment => "kN·m",
            _ => "kN",
        }
    }

    /// Whether the envelope ranks this quantity by magnitude instead of signed value
    pub fn ranked_by_magnitude(self) -> bool {
        matches!(self, Quantity::Shear)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four influence lines of a simply-supported span for one reference section.
///
/// Cheap to copy; ordinate methods do no validation and assume `span_m > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfluenceLines {
    span_m: f64,
    section_m: f64,
}

/// Build the influence ordinates for span `span_m` and reference section `section_m`.
///
/// The section is normally midspan (`span_m / 2`).
pub fn build_influence_ordinates(span_m: f64, section_m: f64) -> InfluenceLines {
    InfluenceLines { span_m, section_m }
}

impl InfluenceLines {
    /// Span length (m)
    pub fn span_m(&self) -> f64 {
        self.span_m
    }

    /// Reference section position (m from A)
    pub fn section_m(&self) -> f64 {
        self.section_m
    }

    /// Reaction at A for a unit load at `a`: (L - a) / L
    pub fn reaction_a(&self, a: f64) -> f64 {
        (self.span_m - a) / self.span_m
    }

    /// Reaction at B for a unit load at `a`: a / L
    pub fn reaction_b(&self, a: f64) -> f64 {
        a / self.span_m
    }

    /// Shear at the reference section for a unit load at `a`
    pub fn shear(&self, a: f64) -> f64 {
        if a <= self.section_m {
            self.reaction_b(a)
        } else {
            -self.reaction_a(a)
        }
    }

    /// Moment at the reference section for a unit load at `a`
    pub fn moment(&self, a: f64) -> f64 {
        if a <= self.section_m {
            self.reaction_b(a) * (self.span_m - self.section_m)
        } else {
            self.reaction_a(a) * self.section_m
        }
    }

    /// Ordinate of `quantity` for a unit load at `a`
    pub fn ordinate(&self, quantity: Quantity, a: f64) -> f64 {
        match quantity {
            Quantity::ReactionA => self.reaction_a(a),
            Quantity::ReactionB => self.reaction_b(a),
            Quantity::Shear => self.shear(a),
            Quantity::Moment => self.moment(a),
        }
    }

    /// Detach one influence line as a standalone function of the unit-load position
    pub fn ordinate_fn(self, quantity: Quantity) -> impl Fn(f64) -> f64 + Copy {
        move |a| self.ordinate(quantity, a)
    }

    /// Largest moment ordinate, reached with the unit load on the section: s(L - s)/L
    pub fn peak_moment_ordinate(&self) -> f64 {
        self.section_m * (self.span_m - self.section_m) / self.span_m
    }
}

/// Position of sample `index` out of `count` equally spaced samples on `[0, span_m]`.
///
/// The last sample is pinned to `span_m` so the far support is always hit exactly.
pub(crate) fn sample_position(span_m: f64, index: usize, count: usize) -> f64 {
    if count < 2 {
        0.0
    } else if index + 1 == count {
        span_m
    } else {
        span_m * index as f64 / (count - 1) as f64
    }
}

/// Lazily resampled influence line: `count` `(position, ordinate)` pairs on `[0, L]`.
///
/// Cloning the series (or calling [`OrdinateSeries::restart`]) replays it from the start.
#[derive(Debug, Clone)]
pub struct OrdinateSeries<F> {
    ordinate_fn: F,
    span_m: f64,
    count: usize,
    front: usize,
    back: usize,
}

/// Resample an ordinate function at `sample_count` evenly spaced positions.
///
/// ```rust
/// use calc_core::calculations::influence::{build_influence_ordinates, sample_ordinate_series, Quantity};
///
/// let lines = build_influence_ordinates(8.0, 4.0);
/// let points: Vec<_> = sample_ordinate_series(lines.ordinate_fn(Quantity::ReactionA), 8.0, 5).collect();
/// assert_eq!(points.first(), Some(&(0.0, 1.0)));
/// assert_eq!(points.last(), Some(&(8.0, 0.0)));
/// ```
pub fn sample_ordinate_series<F>(ordinate_fn: F, span_m: f64, sample_count: usize) -> OrdinateSeries<F>
where
    F: Fn(f64) -> f64,
{
    OrdinateSeries {
        ordinate_fn,
        span_m,
        count: sample_count,
        front: 0,
        back: sample_count,
    }
}

impl<F> OrdinateSeries<F>
where
    F: Fn(f64) -> f64,
{
    /// Rewind to the first sample
    pub fn restart(&mut self) {
        self.front = 0;
        self.back = self.count;
    }

    fn point(&self, index: usize) -> (f64, f64) {
        let x = sample_position(self.span_m, index, self.count);
        (x, (self.ordinate_fn)(x))
    }
}

impl<F> Iterator for OrdinateSeries<F>
where
    F: Fn(f64) -> f64,
{
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let point = self.point(self.front);
        self.front += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<F> DoubleEndedIterator for OrdinateSeries<F>
where
    F: Fn(f64) -> f64,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.point(self.back))
    }
}

impl<F> ExactSizeIterator for OrdinateSeries<F> where F: Fn(f64) -> f64 {}

impl<F> FusedIterator for OrdinateSeries<F> where F: Fn(f64) -> f64 {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_reactions_sum_to_unity() {
        let lines = build_influence_ordinates(12.0, 6.0);
        for i in 0..=120 {
            let a = 12.0 * i as f64 / 120.0;
            assert_relative_eq!(lines.reaction_a(a) + lines.reaction_b(a), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reaction_ordinates() {
        // Unit load at 3 m on 10 m span: R_A = 0.7, R_B = 0.3
        let lines = build_influence_ordinates(10.0, 5.0);
        assert_relative_eq!(lines.reaction_a(3.0), 0.7);
        assert_relative_eq!(lines.reaction_b(3.0), 0.3);
    }

    #[test]
    fn test_shear_jump_at_section() {
        let lines = build_influence_ordinates(10.0, 4.0);
        let left = lines.shear(4.0);
        let right = lines.shear(4.0 + 1e-9);
        assert_relative_eq!(left, 0.4);
        assert_abs_diff_eq!(left - right, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_moment_continuous_with_peak_at_section() {
        let lines = build_influence_ordinates(10.0, 4.0);
        // s(L - s)/L = 4 * 6 / 10 = 2.4
        assert_relative_eq!(lines.moment(4.0), 2.4);
        assert_relative_eq!(lines.peak_moment_ordinate(), 2.4);
        assert_abs_diff_eq!(lines.moment(4.0 + 1e-9), 2.4, epsilon = 1e-6);
        assert!(lines.moment(3.9) < 2.4);
        assert!(lines.moment(4.1) < 2.4);
    }

    #[test]
    fn test_boundary_ordinates_are_finite() {
        let lines = build_influence_ordinates(10.0, 5.0);
        for quantity in Quantity::ALL {
            assert!(lines.ordinate(quantity, 0.0).is_finite());
            assert!(lines.ordinate(quantity, 10.0).is_finite());
        }
        assert_eq!(lines.shear(0.0), 0.0);
        assert_eq!(lines.shear(10.0), 0.0);
        assert_eq!(lines.moment(0.0), 0.0);
        assert_eq!(lines.moment(10.0), 0.0);
    }

    #[test]
    fn test_section_at_support() {
        // Section at A: every on-span load is "right" of it except a = 0
        let lines = build_influence_ordinates(10.0, 0.0);
        assert_relative_eq!(lines.shear(2.0), -0.8);
        assert_eq!(lines.moment(2.0), 0.0);
    }

    #[test]
    fn test_series_spans_inclusive_range() {
        let lines = build_influence_ordinates(10.0, 5.0);
        let series = sample_ordinate_series(lines.ordinate_fn(Quantity::Moment), 10.0, 11);
        assert_eq!(series.len(), 11);

        let points: Vec<_> = series.collect();
        assert_eq!(points[0], (0.0, 0.0));
        assert_eq!(points[10].0, 10.0);
        assert_relative_eq!(points[5].1, 2.5);
    }

    #[test]
    fn test_series_is_restartable() {
        let lines = build_influence_ordinates(6.0, 3.0);
        let mut series = sample_ordinate_series(lines.ordinate_fn(Quantity::Shear), 6.0, 4);
        let first: Vec<_> = series.clone().collect();

        assert!(series.next().is_some());
        series.restart();
        let second: Vec<_> = series.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_series_reverse() {
        let lines = build_influence_ordinates(4.0, 2.0);
        let series = sample_ordinate_series(lines.ordinate_fn(Quantity::ReactionB), 4.0, 3);
        let reversed: Vec<_> = series.rev().map(|(x, _)| x).collect();
        assert_eq!(reversed, vec![4.0, 2.0, 0.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = sample_ordinate_series(|a: f64| a, 5.0, 0);
        assert_eq!(series.count(), 0);
    }
}
