//! Locale-aware rendering of the numbers that appear in calculation steps.
//!
//! The calculator only ever sees the [`StepFormatter`] trait. Front ends may
//! plug in their own implementation; [`LocaleFormatter`] covers the handful of
//! locales the command line tool offers.
//!
//! Formatting never feeds back into the arithmetic. A total of `8.755` is
//! shown as `€ 8,76` but stays `8.755` in the result.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::to_fixed;

/// Renders numbers for step labels and details.
pub trait StepFormatter: Send + Sync {
    /// Formats a plain number with exactly `decimals` fractional digits.
    fn format_number(
        &self,
        value: Decimal,
        decimals: u32,
    ) -> String;

    /// Formats a monetary amount with two fractional digits and the currency
    /// symbol.
    fn format_currency(
        &self,
        value: Decimal,
    ) -> String;

    /// Formats a bracket rate.
    ///
    /// Rates are shown in plain fixed-point notation regardless of locale, as
    /// they appear in the legal schedule.
    fn format_rate(
        &self,
        rate: Decimal,
        precision: u32,
    ) -> String {
        to_fixed(rate, precision).to_string()
    }
}

/// Error returned when a locale tag is not supported.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported locale '{0}' (expected one of: de-AT, de-DE, en-US)")]
pub struct UnknownLocaleError(String);

/// Supported display locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// `€ 1.234,50`
    #[default]
    DeAt,
    /// `1.234,50 €`
    DeDe,
    /// `€1,234.50`
    EnUs,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeAt => "de-AT",
            Self::DeDe => "de-DE",
            Self::EnUs => "en-US",
        }
    }

    /// Parses a BCP-47 style tag. Matching ignores case and accepts `_` in
    /// place of `-`. A bare language falls back to its main region.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "de-at" => Some(Self::DeAt),
            "de" | "de-de" => Some(Self::DeDe),
            "en" | "en-us" => Some(Self::EnUs),
            _ => None,
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Self::DeAt | Self::DeDe => ',',
            Self::EnUs => '.',
        }
    }

    fn group_separator(&self) -> char {
        match self {
            Self::DeAt | Self::DeDe => '.',
            Self::EnUs => ',',
        }
    }
}

impl FromStr for Locale {
    type Err = UnknownLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownLocaleError(s.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// [`StepFormatter`] with fixed separators and a euro sign per [`Locale`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleFormatter {
    locale: Locale,
}

impl LocaleFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl StepFormatter for LocaleFormatter {
    fn format_number(
        &self,
        value: Decimal,
        decimals: u32,
    ) -> String {
        let fixed = to_fixed(value, decimals);
        let negative = fixed.is_sign_negative() && !fixed.is_zero();
        let digits = fixed.abs().to_string();
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        out.push_str(&group_digits(int_part, self.locale.group_separator()));
        if let Some(frac_part) = frac_part {
            out.push(self.locale.decimal_separator());
            out.push_str(frac_part);
        }
        out
    }

    fn format_currency(
        &self,
        value: Decimal,
    ) -> String {
        let rounded = to_fixed(value, 2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let amount = self.format_number(rounded.abs(), 2);
        match self.locale {
            Locale::DeAt => format!("{sign}€ {amount}"),
            Locale::DeDe => format!("{sign}{amount} €"),
            Locale::EnUs => format!("{sign}€{amount}"),
        }
    }
}

/// Inserts `separator` between every group of three integer digits.
fn group_digits(
    digits: &str,
    separator: char,
) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // Locale tests
    // =========================================================================

    #[test]
    fn locale_parse_accepts_common_spellings() {
        assert_eq!(Locale::parse("de-AT"), Some(Locale::DeAt));
        assert_eq!(Locale::parse("de_at"), Some(Locale::DeAt));
        assert_eq!(Locale::parse(" DE-de "), Some(Locale::DeDe));
        assert_eq!(Locale::parse("de"), Some(Locale::DeDe));
        assert_eq!(Locale::parse("en"), Some(Locale::EnUs));
    }

    #[test]
    fn locale_from_str_rejects_unknown_tag() {
        let result = "fr-FR".parse::<Locale>();

        assert_eq!(result, Err(UnknownLocaleError("fr-FR".to_string())));
    }

    #[test]
    fn locale_round_trips_through_display() {
        for locale in [Locale::DeAt, Locale::DeDe, Locale::EnUs] {
            assert_eq!(Locale::parse(&locale.to_string()), Some(locale));
        }
    }

    // =========================================================================
    // format_number tests
    // =========================================================================

    #[test]
    fn format_number_whole_units_rounds_half_up() {
        let formatter = LocaleFormatter::default();

        assert_eq!(formatter.format_number(dec!(55), 0), "55");
        assert_eq!(formatter.format_number(dec!(55.5), 0), "56");
        assert_eq!(formatter.format_number(dec!(55.49), 0), "55");
    }

    #[test]
    fn format_number_groups_thousands() {
        let de = LocaleFormatter::new(Locale::DeAt);
        let en = LocaleFormatter::new(Locale::EnUs);

        assert_eq!(de.format_number(dec!(1600), 0), "1.600");
        assert_eq!(de.format_number(dec!(1234567.891), 2), "1.234.567,89");
        assert_eq!(en.format_number(dec!(1234567.891), 2), "1,234,567.89");
        assert_eq!(en.format_number(dec!(999), 0), "999");
    }

    #[test]
    fn format_number_keeps_sign_of_negative_values() {
        let formatter = LocaleFormatter::new(Locale::EnUs);

        assert_eq!(formatter.format_number(dec!(-1200), 0), "-1,200");
    }

    #[test]
    fn format_number_drops_sign_of_negative_zero() {
        let formatter = LocaleFormatter::new(Locale::EnUs);

        assert_eq!(formatter.format_number(dec!(-0.001), 2), "0.00");
    }

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn format_currency_per_locale() {
        let value = dec!(1234.5);

        assert_eq!(LocaleFormatter::new(Locale::DeAt).format_currency(value), "€ 1.234,50");
        assert_eq!(LocaleFormatter::new(Locale::DeDe).format_currency(value), "1.234,50 €");
        assert_eq!(LocaleFormatter::new(Locale::EnUs).format_currency(value), "€1,234.50");
    }

    #[test]
    fn format_currency_zero() {
        let formatter = LocaleFormatter::default();

        assert_eq!(formatter.format_currency(Decimal::ZERO), "€ 0,00");
    }

    #[test]
    fn format_currency_rounds_to_cents() {
        let formatter = LocaleFormatter::new(Locale::EnUs);

        assert_eq!(formatter.format_currency(dec!(8.755)), "€8.76");
        assert_eq!(formatter.format_currency(dec!(8.754)), "€8.75");
    }

    #[test]
    fn format_currency_negative_sign_leads() {
        assert_eq!(LocaleFormatter::new(Locale::DeAt).format_currency(dec!(-2.5)), "-€ 2,50");
        assert_eq!(LocaleFormatter::new(Locale::DeDe).format_currency(dec!(-2.5)), "-2,50 €");
    }

    // =========================================================================
    // format_rate tests
    // =========================================================================

    #[test]
    fn format_rate_uses_requested_precision() {
        let formatter = LocaleFormatter::default();

        assert_eq!(formatter.format_rate(dec!(0.25), 2), "0.25");
        assert_eq!(formatter.format_rate(dec!(0.03), 3), "0.030");
        assert_eq!(formatter.format_rate(dec!(0.045), 3), "0.045");
    }
}
