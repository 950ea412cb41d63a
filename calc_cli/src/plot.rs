//! Terminal charts of the four influence lines.
//!
//! Reactions, shear and moment are drawn in a 2x2 grid of `ratatui` charts,
//! each sampled at the configured number of plot points. Any key closes the
//! view.

use std::io;

use calc_core::calculations::{sample_ordinate_series, InfluenceLines, Quantity};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType};
use ratatui::{DefaultTerminal, Frame};

/// One sampled influence line ready for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub quantity: Quantity,
    pub points: Vec<(f64, f64)>,
    /// Vertical axis bounds, always including zero
    pub y_bounds: [f64; 2],
}

impl PlotSeries {
    fn title(&self, section_m: f64) -> String {
        match self.quantity {
            Quantity::ReactionA | Quantity::ReactionB => format!("IL {}", self.quantity.label()),
            _ => format!("IL {} at s = {:.2} m", self.quantity.label(), section_m),
        }
    }

    fn color(&self) -> Color {
        match self.quantity {
            Quantity::ReactionA => Color::Blue,
            Quantity::ReactionB => Color::Red,
            Quantity::Shear => Color::Green,
            Quantity::Moment => Color::Magenta,
        }
    }
}

/// Sample every influence line at `points` positions across the span.
pub fn influence_series(lines: &InfluenceLines, points: usize) -> Vec<PlotSeries> {
    Quantity::ALL
        .into_iter()
        .map(|quantity| {
            let points: Vec<(f64, f64)> =
                sample_ordinate_series(lines.ordinate_fn(quantity), lines.span_m(), points).collect();
            let y_bounds = padded_bounds(&points);
            PlotSeries {
                quantity,
                points,
                y_bounds,
            }
        })
        .collect()
}

fn padded_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let (lo, hi) = points
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    let pad = ((hi - lo) * 0.1).max(0.05);
    [lo - pad, hi + pad]
}

/// Show the charts until a key is pressed, restoring the terminal afterwards.
pub fn show_influence_lines(lines: &InfluenceLines, points: usize) -> io::Result<()> {
    let series = influence_series(lines, points);
    tracing::debug!(points, section_m = lines.section_m(), "opening influence line charts");

    let mut terminal = ratatui::try_init()?;
    let result = run(&mut terminal, &series, lines);
    ratatui::restore();
    result
}

fn run(terminal: &mut DefaultTerminal, series: &[PlotSeries], lines: &InfluenceLines) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, series, lines))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

fn draw(frame: &mut Frame, series: &[PlotSeries], lines: &InfluenceLines) {
    let [top, bottom] = Layout::vertical([Constraint::Fill(1); 2]).areas(frame.area());
    let [top_left, top_right] = Layout::horizontal([Constraint::Fill(1); 2]).areas(top);
    let [bottom_left, bottom_right] = Layout::horizontal([Constraint::Fill(1); 2]).areas(bottom);

    for (s, area) in series.iter().zip([top_left, top_right, bottom_left, bottom_right]) {
        draw_chart(frame, area, s, lines);
    }
}

fn draw_chart(frame: &mut Frame, area: Rect, series: &PlotSeries, lines: &InfluenceLines) {
    let span_m = lines.span_m();
    let [y_lo, y_hi] = series.y_bounds;

    let dataset = Dataset::default()
        .name(series.quantity.label())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(series.color()))
        .data(&series.points);

    let chart = Chart::new(vec![dataset])
        .block(Block::bordered().title(series.title(lines.section_m())))
        .x_axis(
            Axis::default()
                .title("Load position (m)")
                .bounds([0.0, span_m])
                .labels(["0".to_string(), format!("{:.1}", span_m / 2.0), format!("{:.1}", span_m)]),
        )
        .y_axis(
            Axis::default()
                .title("Ordinate")
                .bounds(series.y_bounds)
                .labels([format!("{:.2}", y_lo), "0".to_string(), format!("{:.2}", y_hi)]),
        );

    frame.render_widget(chart, area);
}
