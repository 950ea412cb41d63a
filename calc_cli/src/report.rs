//! Plain-text rendering of a moving load result.

use std::fmt;

use calc_core::calculations::{MovingLoadInput, MovingLoadResult, Quantity};
use calc_core::units::{KiloNewtonMeters, KiloNewtons, Meters};

/// Report for one analysis; render with `to_string()` or `{}`.
pub struct Report<'a> {
    pub input: &'a MovingLoadInput,
    pub result: &'a MovingLoadResult,
}

impl<'a> Report<'a> {
    pub fn new(input: &'a MovingLoadInput, result: &'a MovingLoadResult) -> Self {
        Report { input, result }
    }
}

/// Value with the unit that matches its quantity, two decimals.
fn with_unit(quantity: Quantity, value: f64) -> String {
    match quantity {
        Quantity::Moment => KiloNewtonMeters(value).to_string(),
        _ => KiloNewtons(value).to_string(),
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = self.input;
        let result = self.result;
        let loads = &input.loads;

        writeln!(f, "═══════════════════════════════════════════════")?;
        writeln!(f, "  MOVING LOAD ANALYSIS - SIMPLY SUPPORTED BEAM")?;
        writeln!(f, "═══════════════════════════════════════════════")?;
        if !input.label.is_empty() {
            writeln!(f, "  {}", input.label)?;
        }
        writeln!(f)?;
        writeln!(f, "Input:")?;
        writeln!(f, "  Span L:        {}", Meters(input.beam.span_m))?;
        writeln!(f, "  Leading W1:    {}", KiloNewtons(loads.w1_kn))?;
        writeln!(f, "  Trailing W2:   {}", KiloNewtons(loads.w2_kn))?;
        writeln!(f, "  Spacing x:     {}", Meters(loads.spacing_m))?;
        writeln!(f, "  Section s:     {}", Meters(result.section_m))?;
        writeln!(f, "  Positions N:   {}", result.sample_count)?;
        writeln!(f)?;

        writeln!(f, "Envelope maxima:")?;
        for max in result.envelope.iter() {
            let (name, signed) = if max.quantity.ranked_by_magnitude() {
                (
                    format!("{} |V|", max.quantity),
                    format!(", V = {}", with_unit(max.quantity, max.signed_value)),
                )
            } else {
                (max.quantity.to_string(), String::new())
            };
            writeln!(
                f,
                "  {:<20} {:>14}  (W1 at {}{})",
                name,
                with_unit(max.quantity, max.value),
                Meters(max.leading_position_m),
                signed
            )?;
        }
        writeln!(f)?;

        let entry = &result.entry_response;
        writeln!(f, "W1 entering at A (p = 0):")?;
        writeln!(f, "  Shear at section      {}", KiloNewtons(entry.shear_kn))?;
        writeln!(f, "  Moment at section     {}", KiloNewtonMeters(entry.moment_knm))?;
        writeln!(f)?;

        let critical = &result.critical_moment;
        writeln!(
            f,
            "Exact maximum moment:   {} (W1 at {})",
            KiloNewtonMeters(critical.moment_knm),
            Meters(critical.leading_position_m)
        )?;
        writeln!(
            f,
            "  Sampling shortfall:   {}",
            KiloNewtonMeters(result.moment_sampling_error().max(0.0))
        )?;
        writeln!(f)?;

        let absolute = &result.absolute;
        writeln!(f, "Anywhere on the span:")?;
        writeln!(
            f,
            "  Max moment {} at {} (W1 at {})",
            KiloNewtonMeters(absolute.moment.value),
            Meters(absolute.moment.section_m),
            Meters(absolute.moment.leading_position_m)
        )?;
        writeln!(
            f,
            "  Max shear  {} at {} (W1 at {})",
            KiloNewtons(absolute.shear.value),
            Meters(absolute.shear.section_m),
            Meters(absolute.shear.leading_position_m)
        )?;
        write!(f, "═══════════════════════════════════════════════")
    }
}
