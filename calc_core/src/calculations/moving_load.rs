//! # Moving Load Envelope
//!
//! Sweeps a pair of rigidly linked point loads across a simply-supported
//! span and records the largest reactions, shear and moment produced at a
//! reference section, together with the position of the leading load.
//!
//! ## Load Train
//!
//! ```text
//!        W2 <-- x --> W1     direction of travel -->
//!        |            |
//!   A ===v============v=================== B
//!   ^                 p                    ^
//! ```
//!
//! W1 leads at position `p`; W2 trails at `p - x`. A load outside `[0, L]`
//! has not yet entered (or has already left) the span and contributes nothing.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::moving_load::{calculate, BeamSpec, LoadPair, MovingLoadInput};
//!
//! let input = MovingLoadInput::new(
//!     BeamSpec { span_m: 10.0 },
//!     LoadPair { w1_kn: 30.0, w2_kn: 20.0, spacing_m: 3.0 },
//! );
//!
//! let result = calculate(&input).unwrap();
//! println!("Max moment: {:.2} kN·m", result.envelope.moment.value);
//! assert!((result.envelope.moment.value - 95.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::absolute::{absolute_maxima, AbsoluteMaxima};
use crate::calculations::critical::{critical_moment, CriticalMoment};
use crate::calculations::influence::{build_influence_ordinates, sample_position, InfluenceLines, Quantity};
use crate::errors::{CalcError, CalcResult};

/// Default number of leading-load positions in a sweep (step of L/1000)
pub const DEFAULT_SAMPLE_COUNT: usize = 1001;

/// Default number of section positions scanned for the absolute maxima
pub const DEFAULT_SECTION_COUNT: usize = 201;

/// Relative tolerance under which two maxima are treated as equal
const TIE_TOLERANCE: f64 = 1e-9;

/// Simply-supported span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSpec {
    /// Span between supports A and B (m)
    pub span_m: f64,
}

impl BeamSpec {
    /// Create a validated beam.
    pub fn new(span_m: f64) -> CalcResult<Self> {
        let beam = BeamSpec { span_m };
        beam.validate()?;
        Ok(beam)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.span_m.is_finite() || self.span_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "span_m",
                self.span_m.to_string(),
                "Span must be a positive number",
            ));
        }
        Ok(())
    }

    /// Midspan position (m from A)
    pub fn midspan_m(&self) -> f64 {
        self.span_m / 2.0
    }

    /// Whether `position_m` lies on the span (supports included)
    pub fn contains(&self, position_m: f64) -> bool {
        (0.0..=self.span_m).contains(&position_m)
    }
}

/// Two point loads travelling together at a fixed spacing, W1 leading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadPair {
    /// Leading load (kN)
    pub w1_kn: f64,
    /// Trailing load (kN)
    pub w2_kn: f64,
    /// Distance W2 trails behind W1 (m)
    pub spacing_m: f64,
}

impl LoadPair {
    /// Create a validated load pair.
    pub fn new(w1_kn: f64, w2_kn: f64, spacing_m: f64) -> CalcResult<Self> {
        let loads = LoadPair {
            w1_kn,
            w2_kn,
            spacing_m,
        };
        loads.validate()?;
        Ok(loads)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("w1_kn", self.w1_kn), ("w2_kn", self.w2_kn)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Load must be a positive number",
                ));
            }
        }
        if !self.spacing_m.is_finite() || self.spacing_m < 0.0 {
            return Err(CalcError::invalid_input(
                "spacing_m",
                self.spacing_m.to_string(),
                "Spacing cannot be negative",
            ));
        }
        Ok(())
    }

    /// Combined magnitude W1 + W2 (kN)
    pub fn total_kn(&self) -> f64 {
        self.w1_kn + self.w2_kn
    }

    /// Position of W2 when W1 is at `leading_m`
    pub fn trailing_position(&self, leading_m: f64) -> f64 {
        leading_m - self.spacing_m
    }
}

/// Where along the span shear and moment are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum SectionLocation {
    /// Half the span
    #[default]
    Midspan,
    /// Fraction of the span measured from A (0.0 = A, 1.0 = B)
    Ratio(f64),
    /// Distance from A (m)
    AtDistance(f64),
}

impl SectionLocation {
    /// Section position in metres from A
    pub fn resolve(&self, beam: &BeamSpec) -> f64 {
        match *self {
            SectionLocation::Midspan => beam.midspan_m(),
            SectionLocation::Ratio(r) => r * beam.span_m,
            SectionLocation::AtDistance(d) => d,
        }
    }
}

/// Input parameters for a moving load analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Crane girder",
///   "beam": { "span_m": 10.0 },
///   "loads": { "w1_kn": 30.0, "w2_kn": 20.0, "spacing_m": 3.0 },
///   "section": "Midspan",
///   "sample_count": 1001,
///   "section_count": 201
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingLoadInput {
    /// User label for this analysis
    #[serde(default)]
    pub label: String,

    /// The span
    pub beam: BeamSpec,

    /// The moving load pair
    pub loads: LoadPair,

    /// Reference section for shear and moment
    #[serde(default)]
    pub section: SectionLocation,

    /// Leading-load positions in the sweep (>= 2)
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Section positions scanned for the absolute maxima (>= 2)
    #[serde(default = "default_section_count")]
    pub section_count: usize,
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

fn default_section_count() -> usize {
    DEFAULT_SECTION_COUNT
}

impl MovingLoadInput {
    /// Input with a midspan section and default resolutions
    pub fn new(beam: BeamSpec, loads: LoadPair) -> Self {
        MovingLoadInput {
            label: String::new(),
            beam,
            loads,
            section: SectionLocation::Midspan,
            sample_count: DEFAULT_SAMPLE_COUNT,
            section_count: DEFAULT_SECTION_COUNT,
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the reference section
    pub fn with_section(mut self, section: SectionLocation) -> Self {
        self.section = section;
        self
    }

    /// Set the sweep resolution
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Reference section position (m from A)
    pub fn section_m(&self) -> f64 {
        self.section.resolve(&self.beam)
    }

    /// Validate input parameters.
    ///
    /// A spacing longer than the span is accepted (only one load can be on
    /// the span at a time) but logged as a warning.
    pub fn validate(&self) -> CalcResult<()> {
        self.beam.validate()?;
        self.loads.validate()?;

        let section_m = self.section_m();
        if !section_m.is_finite() || !self.beam.contains(section_m) {
            return Err(CalcError::invalid_input(
                "section",
                section_m.to_string(),
                format!("Reference section must lie within 0..={} m", self.beam.span_m),
            ));
        }
        if self.sample_count < 2 {
            return Err(CalcError::invalid_input(
                "sample_count",
                self.sample_count.to_string(),
                "At least 2 sample positions are required",
            ));
        }
        if self.section_count < 2 {
            return Err(CalcError::invalid_input(
                "section_count",
                self.section_count.to_string(),
                "At least 2 section positions are required",
            ));
        }
        if self.loads.spacing_m > self.beam.span_m {
            tracing::warn!(
                spacing_m = self.loads.spacing_m,
                span_m = self.beam.span_m,
                "load spacing exceeds span; only one load can be on the beam at a time"
            );
        }
        Ok(())
    }
}

/// Instantaneous response with the leading load at one position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Position of W1 (m from A)
    pub leading_position_m: f64,
    /// Reaction at A (kN)
    pub reaction_a_kn: f64,
    /// Reaction at B (kN)
    pub reaction_b_kn: f64,
    /// Shear at the reference section (kN)
    pub shear_kn: f64,
    /// Moment at the reference section (kN·m)
    pub moment_knm: f64,
}

impl Response {
    /// Signed value of `quantity`
    pub fn value(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::ReactionA => self.reaction_a_kn,
            Quantity::ReactionB => self.reaction_b_kn,
            Quantity::Shear => self.shear_kn,
            Quantity::Moment => self.moment_knm,
        }
    }
}

/// Contribution of a load of `magnitude` at `position_m`, zero when off the span.
fn contribution(lines: &InfluenceLines, quantity: Quantity, magnitude: f64, position_m: f64) -> f64 {
    if (0.0..=lines.span_m()).contains(&position_m) {
        magnitude * lines.ordinate(quantity, position_m)
    } else {
        0.0
    }
}

/// Superpose both loads with W1 at `leading_m`.
pub(crate) fn superpose(lines: &InfluenceLines, loads: &LoadPair, leading_m: f64) -> Response {
    let trailing_m = loads.trailing_position(leading_m);
    let value = |quantity| {
        contribution(lines, quantity, loads.w1_kn, leading_m)
            + contribution(lines, quantity, loads.w2_kn, trailing_m)
    };

    Response {
        leading_position_m: leading_m,
        reaction_a_kn: value(Quantity::ReactionA),
        reaction_b_kn: value(Quantity::ReactionB),
        shear_kn: value(Quantity::Shear),
        moment_knm: value(Quantity::Moment),
    }
}

/// Response with W1 at `leading_m` and shear/moment taken at `section_m`.
///
/// ```rust
/// use calc_core::calculations::moving_load::{response_at, BeamSpec, LoadPair};
///
/// let beam = BeamSpec { span_m: 10.0 };
/// let loads = LoadPair { w1_kn: 30.0, w2_kn: 20.0, spacing_m: 3.0 };
///
/// // W1 sitting on support A, W2 not yet on the span
/// let r = response_at(&beam, &loads, 5.0, 0.0);
/// assert_eq!(r.reaction_a_kn, 30.0);
/// assert_eq!(r.moment_knm, 0.0);
/// ```
pub fn response_at(beam: &BeamSpec, loads: &LoadPair, section_m: f64, leading_m: f64) -> Response {
    let lines = build_influence_ordinates(beam.span_m, section_m);
    superpose(&lines, loads, leading_m)
}

/// Whether `a` and `b` are equal within the tie tolerance
pub(crate) fn ties(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Running maximum of one quantity and the position where it was reached.
///
/// Values within the tie tolerance keep the lower position. The signed
/// response at the winning position is carried along with the ranked value.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Extremum {
    best: Option<(f64, f64)>,
    signed: f64,
}

impl Extremum {
    pub(crate) fn offer(&mut self, value: f64, position_m: f64) {
        self.offer_signed(value, value, position_m);
    }

    pub(crate) fn offer_signed(&mut self, value: f64, signed: f64, position_m: f64) {
        let replace = match self.best {
            None => true,
            Some((best, best_position)) => {
                if ties(value, best) {
                    position_m < best_position
                } else {
                    value > best
                }
            }
        };
        if replace {
            self.best = Some((value, position_m));
            self.signed = signed;
        }
    }

    pub(crate) fn merge(mut self, other: Extremum) -> Extremum {
        if let Some((value, position_m)) = other.best {
            self.offer_signed(value, other.signed, position_m);
        }
        self
    }

    pub(crate) fn get(&self) -> Option<(f64, f64)> {
        self.best
    }

    /// Signed response at the winning position
    pub(crate) fn signed(&self) -> f64 {
        self.signed
    }
}

/// Maximum of one quantity over a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeResult {
    /// Which response this is
    pub quantity: Quantity,
    /// Maximum value (magnitude for shear, signed value otherwise)
    pub value: f64,
    /// Signed response at that position; differs from `value` only for negative shear
    pub signed_value: f64,
    /// Position of W1 when the maximum occurs (m from A)
    pub leading_position_m: f64,
}

/// Envelope maxima for all four quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Maximum reaction at A
    pub reaction_a: EnvelopeResult,
    /// Maximum reaction at B
    pub reaction_b: EnvelopeResult,
    /// Maximum shear magnitude at the reference section
    pub shear: EnvelopeResult,
    /// Maximum moment at the reference section
    pub moment: EnvelopeResult,
}

impl Envelope {
    /// Result for `quantity`
    pub fn get(&self, quantity: Quantity) -> &EnvelopeResult {
        match quantity {
            Quantity::ReactionA => &self.reaction_a,
            Quantity::ReactionB => &self.reaction_b,
            Quantity::Shear => &self.shear,
            Quantity::Moment => &self.moment,
        }
    }

    /// All four results in report order
    pub fn iter(&self) -> impl Iterator<Item = &EnvelopeResult> {
        Quantity::ALL.into_iter().map(move |q| self.get(q))
    }
}

/// Four running maxima, one per quantity.
#[derive(Debug, Clone, Copy, Default)]
struct EnvelopeTracker {
    maxima: [Extremum; 4],
}

impl EnvelopeTracker {
    fn offer(&mut self, response: &Response) {
        for (slot, quantity) in self.maxima.iter_mut().zip(Quantity::ALL) {
            let value = response.value(quantity);
            let ranked = if quantity.ranked_by_magnitude() { value.abs() } else { value };
            slot.offer_signed(ranked, value, response.leading_position_m);
        }
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn merge(self, other: EnvelopeTracker) -> EnvelopeTracker {
        let mut merged = self;
        for (slot, theirs) in merged.maxima.iter_mut().zip(other.maxima) {
            *slot = slot.merge(theirs);
        }
        merged
    }

    fn finish(self) -> Envelope {
        let result = |index: usize| {
            let quantity = Quantity::ALL[index];
            let extremum = &self.maxima[index];
            let (value, leading_position_m) = extremum.get().unwrap_or((0.0, 0.0));
            EnvelopeResult {
                quantity,
                value,
                signed_value: extremum.signed(),
                leading_position_m,
            }
        };
        Envelope {
            reaction_a: result(0),
            reaction_b: result(1),
            shear: result(2),
            moment: result(3),
        }
    }
}

/// Sweep the load pair across `sample_count` leading-load positions and
/// return the envelope maxima at `section_m`.
///
/// Positions run low to high, `p_i = L·i/(N-1)`. No validation is done
/// here; use [`calculate`] for checked input.
pub fn sweep_envelope(beam: &BeamSpec, loads: &LoadPair, section_m: f64, sample_count: usize) -> Envelope {
    let lines = build_influence_ordinates(beam.span_m, section_m);
    let span_m = beam.span_m;

    #[cfg(feature = "parallel")]
    let tracker = {
        use rayon::prelude::*;

        (0..sample_count)
            .into_par_iter()
            .fold(EnvelopeTracker::default, |mut tracker, i| {
                let p = sample_position(span_m, i, sample_count);
                tracker.offer(&superpose(&lines, loads, p));
                tracker
            })
            .reduce(EnvelopeTracker::default, EnvelopeTracker::merge)
    };

    #[cfg(not(feature = "parallel"))]
    let tracker = (0..sample_count).fold(EnvelopeTracker::default(), |mut tracker, i| {
        let p = sample_position(span_m, i, sample_count);
        tracker.offer(&superpose(&lines, loads, p));
        tracker
    });

    tracker.finish()
}

/// Results from a moving load analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingLoadResult {
    /// Reference section used for shear and moment (m from A)
    pub section_m: f64,

    /// Sampled envelope maxima at the reference section
    pub envelope: Envelope,

    /// Exact maximum moment at the reference section
    pub critical_moment: CriticalMoment,

    /// Response as the train enters the span (W1 on support A)
    pub entry_response: Response,

    /// Largest moment and shear anywhere along the span
    pub absolute: AbsoluteMaxima,

    /// Number of leading-load positions swept
    pub sample_count: usize,
}

impl MovingLoadResult {
    /// Gap between the sampled and exact maximum moment (kN·m, never negative
    /// beyond rounding)
    pub fn moment_sampling_error(&self) -> f64 {
        self.critical_moment.moment_knm - self.envelope.moment.value
    }
}

/// Run a complete moving load analysis.
///
/// # Returns
///
/// * `Ok(MovingLoadResult)` - Envelope, exact moment peak and absolute maxima
/// * `Err(CalcError)` - Structured error if inputs are invalid
pub fn calculate(input: &MovingLoadInput) -> CalcResult<MovingLoadResult> {
    input.validate()?;

    let section_m = input.section_m();
    let envelope = sweep_envelope(&input.beam, &input.loads, section_m, input.sample_count);
    let critical_moment = critical_moment(&input.beam, &input.loads, section_m);
    let entry_response = response_at(&input.beam, &input.loads, section_m, 0.0);
    let absolute = absolute_maxima(&input.beam, &input.loads, input.section_count, input.sample_count);

    tracing::debug!(
        label = %input.label,
        span_m = input.beam.span_m,
        section_m,
        samples = input.sample_count,
        max_moment_knm = envelope.moment.value,
        exact_moment_knm = critical_moment.moment_knm,
        "moving load sweep complete"
    );

    Ok(MovingLoadResult {
        section_m,
        envelope,
        critical_moment,
        entry_response,
        absolute,
        sample_count: input.sample_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_beam() -> BeamSpec {
        BeamSpec { span_m: 10.0 }
    }

    fn reference_loads() -> LoadPair {
        LoadPair {
            w1_kn: 30.0,
            w2_kn: 20.0,
            spacing_m: 3.0,
        }
    }

    #[test]
    fn test_reference_scenario_envelope() {
        // L = 10, W1 = 30, W2 = 20 trailing by 3, section at midspan.
        let env = sweep_envelope(&reference_beam(), &reference_loads(), 5.0, 1001);

        // R_A peaks as W2 enters: 30(0.7) + 20(1.0) = 41 with W1 at 3 m
        assert_relative_eq!(env.reaction_a.value, 41.0, epsilon = 1e-9);
        assert_relative_eq!(env.reaction_a.leading_position_m, 3.0);

        // R_B peaks with W1 on B: 30 + 20(0.7) = 44
        assert_relative_eq!(env.reaction_b.value, 44.0, epsilon = 1e-9);
        assert_relative_eq!(env.reaction_b.leading_position_m, 10.0);

        // W1 on the section: 30(2.5) + 20(1.0) = 95
        assert_relative_eq!(env.moment.value, 95.0, epsilon = 1e-9);
        assert_relative_eq!(env.moment.leading_position_m, 5.0);

        // W1 just left of the section: 30(0.5) + 20(0.2) = 19
        assert_relative_eq!(env.shear.value, 19.0, epsilon = 1e-9);
        assert_relative_eq!(env.shear.leading_position_m, 5.0);
    }

    #[test]
    fn test_reaction_sum_equals_on_span_load() {
        let beam = reference_beam();
        let loads = reference_loads();
        let lines = build_influence_ordinates(beam.span_m, 5.0);

        for i in 0..1001 {
            let p = sample_position(beam.span_m, i, 1001);
            let r = superpose(&lines, &loads, p);
            let on_span = if beam.contains(loads.trailing_position(p)) {
                loads.total_kn()
            } else {
                loads.w1_kn
            };
            assert_relative_eq!(r.reaction_a_kn + r.reaction_b_kn, on_span, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_zero_spacing_matches_single_load() {
        let beam = reference_beam();
        let pair = LoadPair {
            w1_kn: 30.0,
            w2_kn: 20.0,
            spacing_m: 0.0,
        };
        let single = LoadPair {
            w1_kn: 50.0,
            w2_kn: 0.0,
            spacing_m: 0.0,
        };

        let a = sweep_envelope(&beam, &pair, 5.0, 501);
        let b = sweep_envelope(&beam, &single, 5.0, 501);
        for (ra, rb) in a.iter().zip(b.iter()) {
            assert_relative_eq!(ra.value, rb.value, max_relative = 1e-12);
            assert_relative_eq!(ra.leading_position_m, rb.leading_position_m);
        }
        // Single 50 kN load at midspan: PL/4 = 125
        assert_relative_eq!(a.moment.value, 125.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spacing_longer_than_span() {
        // W2 would only enter once W1 is beyond B, so W1 acts alone
        let beam = BeamSpec { span_m: 4.0 };
        let loads = LoadPair {
            w1_kn: 10.0,
            w2_kn: 50.0,
            spacing_m: 6.0,
        };
        let env = sweep_envelope(&beam, &loads, 2.0, 401);

        assert_relative_eq!(env.reaction_a.value, 10.0);
        assert_relative_eq!(env.reaction_b.value, 10.0);
        assert_relative_eq!(env.moment.value, 10.0 * 4.0 / 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ties_keep_first_position() {
        // Spacing equal to the span: R_A = 10 both with W1 on A (p = 0) and
        // with W2 arriving on A as W1 reaches B (p = 10)
        let beam = BeamSpec { span_m: 10.0 };
        let loads = LoadPair {
            w1_kn: 10.0,
            w2_kn: 10.0,
            spacing_m: 10.0,
        };
        let env = sweep_envelope(&beam, &loads, 5.0, 11);
        assert_relative_eq!(env.reaction_a.value, 10.0);
        assert_eq!(env.reaction_a.leading_position_m, 0.0);

        let mut extremum = Extremum::default();
        extremum.offer(5.0, 1.0);
        extremum.offer(5.0 + 1e-12, 2.0);
        extremum.offer(4.0, 3.0);
        assert_eq!(extremum.get(), Some((5.0, 1.0)));
    }

    #[test]
    fn test_governing_shear_keeps_its_sign() {
        // Reference pair midspan: +19 with W1 at the section
        let env = sweep_envelope(&reference_beam(), &reference_loads(), 5.0, 1001);
        assert_relative_eq!(env.shear.signed_value, 19.0, epsilon = 1e-9);

        // Section at 2 m: the largest |V| comes with both loads just right of the cut
        let env = sweep_envelope(&reference_beam(), &reference_loads(), 2.0, 1001);
        assert!(env.shear.signed_value < 0.0);
        assert_relative_eq!(env.shear.signed_value, -env.shear.value, max_relative = 1e-12);
        let r = response_at(&reference_beam(), &reference_loads(), 2.0, env.shear.leading_position_m);
        assert_relative_eq!(r.shear_kn, env.shear.signed_value, max_relative = 1e-12);

        // Non-shear quantities: signed and ranked values coincide
        assert_eq!(env.moment.signed_value, env.moment.value);
    }

    #[test]
    fn test_merge_carries_signed_value() {
        let mut left = Extremum::default();
        left.offer_signed(6.0, -6.0, 3.0);
        let mut right = Extremum::default();
        right.offer_signed(9.0, -9.0, 7.0);

        let merged = left.merge(right);
        assert_eq!(merged.get(), Some((9.0, 7.0)));
        assert_eq!(merged.signed(), -9.0);
    }

    #[test]
    fn test_merge_prefers_lower_position_on_tie() {
        let mut left = Extremum::default();
        left.offer(7.0, 4.0);
        let mut right = Extremum::default();
        right.offer(7.0, 2.0);
        assert_eq!(left.merge(right).get(), Some((7.0, 2.0)));

        let mut bigger = Extremum::default();
        bigger.offer(8.0, 9.0);
        assert_eq!(left.merge(bigger).get(), Some((8.0, 9.0)));
        assert_eq!(left.merge(Extremum::default()).get(), Some((7.0, 4.0)));
    }

    #[test]
    fn test_refinement_never_decreases_maxima() {
        let beam = BeamSpec { span_m: 13.7 };
        let loads = LoadPair {
            w1_kn: 42.0,
            w2_kn: 17.5,
            spacing_m: 2.3,
        };
        let coarse = sweep_envelope(&beam, &loads, 6.1, 100);
        let fine = sweep_envelope(&beam, &loads, 6.1, 10_000);
        for (c, f) in coarse.iter().zip(fine.iter()) {
            assert!(f.value >= c.value - 1e-9 * c.value.abs().max(1.0), "{:?} vs {:?}", f, c);
        }
    }

    #[test]
    fn test_response_at_entry() {
        let r = response_at(&reference_beam(), &reference_loads(), 5.0, 0.0);
        assert_eq!(r.reaction_a_kn, 30.0);
        assert_eq!(r.reaction_b_kn, 0.0);
        assert_eq!(r.shear_kn, 0.0);
        assert_eq!(r.moment_knm, 0.0);
    }

    #[test]
    fn test_response_with_both_loads_on() {
        // W1 at 6, W2 at 3: R_B = (30*6 + 20*3)/10 = 24, R_A = 26
        let r = response_at(&reference_beam(), &reference_loads(), 5.0, 6.0);
        assert_relative_eq!(r.reaction_a_kn, 26.0, epsilon = 1e-12);
        assert_relative_eq!(r.reaction_b_kn, 24.0, epsilon = 1e-12);
        // Left of the cut R_A - W2 = 6, signed per the influence-line convention
        assert_relative_eq!(r.shear_kn, -6.0, epsilon = 1e-12);
        // M(5) = R_A*5 - W2*(5-3) = 130 - 40 = 90
        assert_relative_eq!(r.moment_knm, 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_validation() {
        let ok = MovingLoadInput::new(reference_beam(), reference_loads());
        assert!(ok.validate().is_ok());

        let bad_span = MovingLoadInput::new(BeamSpec { span_m: 0.0 }, reference_loads());
        assert_eq!(bad_span.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let bad_load = MovingLoadInput::new(
            reference_beam(),
            LoadPair {
                w1_kn: 30.0,
                w2_kn: -1.0,
                spacing_m: 3.0,
            },
        );
        assert!(matches!(
            bad_load.validate(),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "w2_kn"
        ));

        let bad_spacing = MovingLoadInput::new(
            reference_beam(),
            LoadPair {
                w1_kn: 30.0,
                w2_kn: 20.0,
                spacing_m: -0.5,
            },
        );
        assert!(bad_spacing.validate().is_err());

        let bad_section = ok.clone().with_section(SectionLocation::AtDistance(12.0));
        assert!(bad_section.validate().is_err());

        let bad_samples = ok.clone().with_sample_count(1);
        assert!(bad_samples.validate().is_err());

        let long_spacing = MovingLoadInput::new(
            reference_beam(),
            LoadPair {
                w1_kn: 30.0,
                w2_kn: 20.0,
                spacing_m: 15.0,
            },
        );
        assert!(long_spacing.validate().is_ok());
    }

    #[test]
    fn test_section_location_resolve() {
        let beam = reference_beam();
        assert_eq!(SectionLocation::Midspan.resolve(&beam), 5.0);
        assert_eq!(SectionLocation::Ratio(0.25).resolve(&beam), 2.5);
        assert_eq!(SectionLocation::AtDistance(7.0).resolve(&beam), 7.0);
    }

    #[test]
    fn test_calculate_includes_exact_moment() {
        let input = MovingLoadInput::new(reference_beam(), reference_loads()).with_label("Reference");
        let result = calculate(&input).unwrap();

        assert_eq!(result.section_m, 5.0);
        assert_relative_eq!(result.critical_moment.moment_knm, 95.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.moment_sampling_error(), 0.0, epsilon = 1e-9);
        assert_eq!(result.entry_response.reaction_a_kn, 30.0);
    }

    #[test]
    fn test_input_json_defaults() {
        let json = r#"{
            "beam": { "span_m": 10.0 },
            "loads": { "w1_kn": 30.0, "w2_kn": 20.0, "spacing_m": 3.0 }
        }"#;
        let input: MovingLoadInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.section, SectionLocation::Midspan);
        assert_eq!(input.sample_count, DEFAULT_SAMPLE_COUNT);
        assert_eq!(input.section_count, DEFAULT_SECTION_COUNT);
    }

    #[test]
    fn test_result_serialization() {
        let input = MovingLoadInput::new(reference_beam(), reference_loads()).with_sample_count(101);
        let result = calculate(&input).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();

        assert!(json.contains("leading_position_m"));
        assert!(json.contains("\"ReactionA\""));

        let roundtrip: MovingLoadResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.sample_count, 101);
        assert_eq!(roundtrip.envelope.shear.quantity, Quantity::Shear);
        assert_relative_eq!(roundtrip.envelope.moment.value, result.envelope.moment.value, max_relative = 1e-12);
    }
}
