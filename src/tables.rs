use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        curve::CurveModel,
        duration_curve::DurationCurve,
        enumeration::{CrossCheck, Enumeration},
        schedule::{OperationCounts, ScheduledObservation, Thresholds},
        solver::Solution,
    },
    fmt::FormattedPercentage,
    quantity::cost::Cost,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_duration_curve_table(curve: &DurationCurve, model: &CurveModel) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Duration", "Price", "Fit", "Residual"]);
    for (index, point) in curve.points().iter().enumerate() {
        let fitted = model.evaluate(point.duration);
        table.add_row(vec![
            Cell::new(index + 1).add_attribute(Attribute::Dim),
            Cell::new(FormattedPercentage(point.duration)).set_alignment(CellAlignment::Right),
            Cell::new(point.price).set_alignment(CellAlignment::Right),
            Cell::new(fitted).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(format!("{:+.2}", point.price.0 - fitted.0))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_enumeration_table(enumeration: &Enumeration) -> Table {
    let best = enumeration.argmax();
    let mut table = new_table();
    table.set_header(vec!["Split", "Profit"]);
    for point in enumeration.points() {
        let mut profit = Cell::new(point.profit)
            .set_alignment(CellAlignment::Right)
            .fg(if point.profit >= Cost::ZERO { Color::Green } else { Color::Red });
        if best == Some(*point) {
            profit = profit.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            Cell::new(FormattedPercentage(point.split)).set_alignment(CellAlignment::Right),
            profit,
        ]);
    }
    table
}

pub fn build_schedule_table(scheduled: &[ScheduledObservation]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Hour", "Start", "End", "Price", "Operation"]);
    for ScheduledObservation { observation, operation } in scheduled {
        table.add_row(vec![
            Cell::new(observation.operating_date.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(observation.operating_hour).set_alignment(CellAlignment::Right),
            Cell::new(observation.start_time.format("%H:%M")),
            Cell::new(observation.end_time.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(observation.price).set_alignment(CellAlignment::Right),
            Cell::new(operation).fg(operation.color()),
        ]);
    }
    table
}

pub fn build_summary_table(
    solution: &Solution,
    thresholds: Thresholds,
    counts: OperationCounts,
    analytic_split: Option<f64>,
    enumeration: Option<CrossCheck>,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Value"]);
    table.add_row(vec![
        Cell::new("Split"),
        Cell::new(FormattedPercentage(solution.split)).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Analytic split").add_attribute(Attribute::Dim),
        Cell::new(analytic_split.map_or_else(|| "n/a".to_owned(), |split| {
            FormattedPercentage(split).to_string()
        })),
    ]);
    if let Some(enumeration) = enumeration {
        table.add_row(vec![
            Cell::new("Enumeration argmax").add_attribute(Attribute::Dim),
            Cell::new(format!(
                "{} ({} away)",
                FormattedPercentage(enumeration.split),
                FormattedPercentage(enumeration.distance),
            )),
        ]);
    }
    table.add_row(vec![Cell::new("Revenue"), Cell::new(solution.outcome.revenue)]);
    table.add_row(vec![Cell::new("Pumping cost"), Cell::new(solution.outcome.pumping_cost)]);
    table.add_row(vec![
        Cell::new("Profit"),
        Cell::new(solution.outcome.profit).add_attribute(Attribute::Bold).fg(
            if solution.outcome.profit >= Cost::ZERO { Color::Green } else { Color::Red },
        ),
    ]);
    table.add_row(vec![Cell::new("Generate at or above"), Cell::new(thresholds.generating)]);
    table.add_row(vec![Cell::new("Pump at or below"), Cell::new(thresholds.pumping)]);
    table.add_row(vec![
        Cell::new("Intervals"),
        Cell::new(format!(
            "{} generate, {} pump, {} idle",
            counts.generate, counts.pump, counts.idle,
        )),
    ]);
    table.add_row(vec![
        Cell::new("Iterations").add_attribute(Attribute::Dim),
        Cell::new(format!("{} ({} evaluations)", solution.n_iterations, solution.n_evaluations)),
    ]);
    table.add_row(vec![
        Cell::new("Converged").add_attribute(Attribute::Dim),
        Cell::new(if solution.converged { "yes" } else { "no, the budget is exhausted" })
            .fg(if solution.converged { Color::Reset } else { Color::DarkYellow }),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::objective::Outcome, quantity::rate::MegawattHourRate};

    #[test]
    fn test_summary_reports_enumeration() {
        let solution = Solution {
            split: 42.759,
            outcome: Outcome {
                revenue: Cost::from(3.0),
                pumping_cost: Cost::from(1.0),
                profit: Cost::from(2.0),
            },
            n_iterations: 10,
            n_evaluations: 150,
            converged: true,
        };
        let thresholds = Thresholds {
            generating: MegawattHourRate::from(57.24),
            pumping: MegawattHourRate::from(43.79),
        };
        let enumeration = CrossCheck { split: 43.0, profit: Cost::from(1.99), distance: 0.241 };
        let table = build_summary_table(
            &solution,
            thresholds,
            OperationCounts::default(),
            None,
            Some(enumeration),
        )
        .to_string();
        assert!(table.contains("Enumeration argmax"));
        assert!(table.contains("43.00% (0.24% away)"));

        let table =
            build_summary_table(&solution, thresholds, OperationCounts::default(), None, None)
                .to_string();
        assert!(!table.contains("Enumeration argmax"));
    }
}
