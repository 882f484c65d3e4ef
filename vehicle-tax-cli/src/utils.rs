use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a command line value cannot be parsed as a quantity.
#[derive(Debug, Error)]
pub enum ParseQuantityError {
    #[error("value is empty")]
    Empty,

    #[error("invalid number '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Units accepted as a suffix on quantities, e.g. `100kW` or `2,500 kg`.
const UNIT_SUFFIXES: [&str; 2] = ["kw", "kg"];

/// Trims whitespace, drops `,` thousands separators and strips a trailing
/// unit.
fn normalize_quantity_input(s: &str) -> String {
    let trimmed = s.trim();
    let lower = trimmed.to_ascii_lowercase();
    let without_unit = UNIT_SUFFIXES
        .iter()
        .find(|unit| lower.ends_with(*unit))
        .map_or(trimmed, |unit| &trimmed[..trimmed.len() - unit.len()]);
    without_unit.trim_end().replace(',', "")
}

/// Parses a power or weight value given on the command line.
///
/// Accepts `,` as thousands separator and an optional `kW` / `kg` suffix.
/// Negative values are accepted and later clamped by the calculator.
/// `NaN` and `inf` are rejected, as is empty input.
pub fn parse_quantity(s: &str) -> Result<Decimal, ParseQuantityError> {
    let normalized = normalize_quantity_input(s);
    if normalized.is_empty() {
        return Err(ParseQuantityError::Empty);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid quantity: {}", e);
        ParseQuantityError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_quantity_plain_numbers() {
        assert_eq!(parse_quantity("100").unwrap(), dec!(100));
        assert_eq!(parse_quantity("  55.25 ").unwrap(), dec!(55.25));
        assert_eq!(parse_quantity("-20").unwrap(), dec!(-20));
    }

    #[test]
    fn parse_quantity_accepts_comma_thousands_separator() {
        assert_eq!(parse_quantity("2,500").unwrap(), dec!(2500));
        assert_eq!(parse_quantity("1,234,567.5").unwrap(), dec!(1234567.5));
    }

    #[test]
    fn parse_quantity_strips_unit_suffix() {
        assert_eq!(parse_quantity("100kW").unwrap(), dec!(100));
        assert_eq!(parse_quantity("2,500 kg").unwrap(), dec!(2500));
        assert_eq!(parse_quantity("80 KW").unwrap(), dec!(80));
    }

    #[test]
    fn parse_quantity_rejects_empty_input() {
        assert!(matches!(parse_quantity("   "), Err(ParseQuantityError::Empty)));
        assert!(matches!(parse_quantity("kg"), Err(ParseQuantityError::Empty)));
    }

    #[test]
    fn parse_quantity_rejects_non_finite_words() {
        assert!(parse_quantity("NaN").is_err());
        assert!(parse_quantity("inf").is_err());
        assert!(parse_quantity("abc").is_err());
    }
}
