//! Plain-text rendering of calculation results and schedules.

use rust_decimal::Decimal;
use vehicle_tax_core::format::StepFormatter;
use vehicle_tax_core::{CalculationStep, CombinedTaxResult, DimensionSchedule, TaxScheduleConfig};

pub const POWER_HEADING: &str = "Leistungsanteil";
pub const WEIGHT_HEADING: &str = "Gewichtsanteil";
pub const MONTHLY_LABEL: &str = "Monatliche Steuer:";

/// Renders one trace as an indented block with aligned details.
pub fn render_steps(
    heading: &str,
    steps: &[CalculationStep],
) -> String {
    let width = steps
        .iter()
        .filter(|s| !s.is_summary())
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("{heading}\n");
    for step in steps {
        if step.is_summary() {
            out.push_str(&format!("  {}\n", step.label));
        } else {
            out.push_str(&format!("  {:<width$}  {}\n", step.label, step.detail));
        }
    }
    out
}

/// Renders both traces followed by the monthly total.
pub fn render_combined(
    result: &CombinedTaxResult,
    formatter: &dyn StepFormatter,
) -> String {
    format!(
        "{}\n{}\n{} {}\n",
        render_steps(POWER_HEADING, &result.power_steps),
        render_steps(WEIGHT_HEADING, &result.weight_steps),
        MONTHLY_LABEL,
        formatter.format_currency(result.monthly_total)
    )
}

/// One line of a batch summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub name: String,
    pub power_total: Decimal,
    pub weight_total: Decimal,
    pub monthly_total: Decimal,
}

/// Renders a batch as a table with a closing sum row.
pub fn render_batch(
    rows: &[BatchRow],
    formatter: &dyn StepFormatter,
) -> String {
    const HEADERS: [&str; 4] = ["Fahrzeug", "Leistung", "Gewicht", "Monatlich"];

    let grand_total = rows
        .iter()
        .fold(Decimal::ZERO, |sum, r| sum.saturating_add(r.monthly_total));
    let mut table: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                formatter.format_currency(r.power_total),
                formatter.format_currency(r.weight_total),
                formatter.format_currency(r.monthly_total),
            ]
        })
        .collect();
    table.push([
        "Summe".to_string(),
        String::new(),
        String::new(),
        formatter.format_currency(grand_total),
    ]);

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &table {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format_row(&HEADERS.map(String::from), &widths);
    out.push_str(&format!("{}\n", "-".repeat(widths.iter().sum::<usize>() + 6)));
    for row in &table {
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(
    cells: &[String; 4],
    widths: &[usize; 4],
) -> String {
    let [name, power, weight, monthly] = cells;
    format!(
        "{name:<w0$}  {power:>w1$}  {weight:>w2$}  {monthly:>w3$}\n",
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    )
}

/// Renders the reduction, floor and brackets of both dimensions.
pub fn render_schedule(
    schedule: &TaxScheduleConfig,
    formatter: &dyn StepFormatter,
) -> String {
    format!(
        "{}\n{}",
        render_dimension(&schedule.power, formatter),
        render_dimension(&schedule.weight, formatter)
    )
}

fn render_dimension(
    schedule: &DimensionSchedule,
    formatter: &dyn StepFormatter,
) -> String {
    let unit = &schedule.unit;
    let mut out = format!(
        "{} ({unit}): Abzug {} {unit}, Minimum {} {unit}\n",
        schedule.dimension,
        formatter.format_number(schedule.reduction, 0),
        formatter.format_number(schedule.floor, 0),
    );
    for bracket in &schedule.brackets {
        let start = formatter.format_number(bracket.start, 0);
        let range = match bracket.end {
            Some(end) => format!("{start} – {}", formatter.format_number(end, 0)),
            None => format!("ab {start}"),
        };
        out.push_str(&format!(
            "  {range:<14} {:>7} €/{unit}  {}\n",
            formatter.format_rate(bracket.rate, bracket.rate_precision),
            bracket.label
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use vehicle_tax_core::compute_combined;
    use vehicle_tax_core::format::{Locale, LocaleFormatter};

    use super::*;

    #[test]
    fn render_steps_aligns_details() {
        let steps = vec![
            CalculationStep::new("Kurz:", "1"),
            CalculationStep::new("Etwas länger:", "2"),
            CalculationStep::summary("Gesamt: € 3,00"),
        ];

        let text = render_steps("Test", &steps);

        assert_eq!(
            text,
            "Test\n  Kurz:          1\n  Etwas länger:  2\n  Gesamt: € 3,00\n"
        );
    }

    #[test]
    fn render_combined_ends_with_monthly_total() {
        let result = compute_combined(dec!(100), dec!(2500));
        let formatter = LocaleFormatter::default();

        let text = render_combined(&result, &formatter);

        assert!(text.starts_with("Leistungsanteil\n  Berechnungsgrundlage:"));
        assert!(text.contains("  Nächste 25 kW um 0,35 €:  20 × 0.35 = € 7,00\n"));
        assert!(text.contains("Gewichtsanteil\n"));
        assert!(text.ends_with("Monatliche Steuer: € 62,25\n"));
    }

    #[test]
    fn render_batch_adds_sum_row() {
        let rows = vec![
            BatchRow {
                name: "A".to_string(),
                power_total: dec!(2.50),
                weight_total: dec!(3.00),
                monthly_total: dec!(5.50),
            },
            BatchRow {
                name: "Family EV".to_string(),
                power_total: dec!(15.75),
                weight_total: dec!(46.50),
                monthly_total: dec!(62.25),
            },
        ];
        let formatter = LocaleFormatter::new(Locale::EnUs);

        let text = render_batch(&rows, &formatter);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Fahrzeug   Leistung  Gewicht  Monatlich");
        assert_eq!(lines[2], "A             €2.50    €3.00      €5.50");
        assert_eq!(lines[4], "Summe                            €67.75");
    }

    #[test]
    fn render_batch_sum_saturates_at_decimal_max() {
        let row = BatchRow {
            name: "Max".to_string(),
            power_total: Decimal::MAX,
            weight_total: dec!(0),
            monthly_total: Decimal::MAX,
        };
        let formatter = LocaleFormatter::new(Locale::EnUs);

        let text = render_batch(&[row.clone(), row.clone(), row], &formatter);
        let sum_line = text.lines().last().unwrap();

        assert!(sum_line.starts_with("Summe"));
        assert!(sum_line.ends_with(&formatter.format_currency(Decimal::MAX)));
    }

    #[test]
    fn render_schedule_lists_all_brackets() {
        let formatter = LocaleFormatter::default();

        let text = render_schedule(&TaxScheduleConfig::austrian(), &formatter);

        assert!(text.contains("power (kW): Abzug 45 kW, Minimum 10 kW\n"));
        assert!(text.contains("weight (kg): Abzug 900 kg, Minimum 200 kg\n"));
        assert!(text.contains("0.030 €/kg"));
        assert!(text.contains("ab 1.200"));
        assert_eq!(text.lines().count(), 9);
    }
}
