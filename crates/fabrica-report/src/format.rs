//! Fixed es-ES display conventions for the dashboard tables.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Whole-euro amount, es-ES style: thousands grouped with a dot, but
/// only from five digits up ("5400 €", "54.000 €").
pub fn eur(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let units = match rounded.to_i64() {
        Some(units) => units,
        None => return format!("{rounded} €"),
    };
    let digits = units.unsigned_abs().to_string();
    let grouped = if digits.len() >= 5 {
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        let lead = digits.len() % 3;
        if lead > 0 {
            out.push_str(&digits[..lead]);
        }
        for (i, chunk) in digits[lead..].as_bytes().chunks(3).enumerate() {
            if i > 0 || lead > 0 {
                out.push('.');
            }
            out.push_str(std::str::from_utf8(chunk).unwrap_or(""));
        }
        out
    } else {
        digits
    };
    let sign = if units < 0 { "-" } else { "" };
    format!("{sign}{grouped} €")
}

/// Short date, es-ES style: "09 ene 2026".
pub fn short_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{:02} {} {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eur_skips_grouping_below_five_digits() {
        assert_eq!(eur(Decimal::new(5400, 0)), "5400 €");
        assert_eq!(eur(Decimal::new(640, 0)), "640 €");
        assert_eq!(eur(Decimal::ZERO), "0 €");
    }

    #[test]
    fn eur_groups_thousands_with_dots() {
        assert_eq!(eur(Decimal::new(54_000, 0)), "54.000 €");
        assert_eq!(eur(Decimal::new(1_234_567, 0)), "1.234.567 €");
        assert_eq!(eur(Decimal::new(-23_750, 0)), "-23.750 €");
    }

    #[test]
    fn eur_rounds_to_whole_units() {
        assert_eq!(eur(Decimal::new(54955, 1)), "5496 €");
        assert_eq!(eur(Decimal::new(54949, 1)), "5495 €");
    }

    #[test]
    fn short_date_uses_spanish_months() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        assert_eq!(short_date(date), "09 ene 2026");
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(short_date(date), "31 dic 2025");
    }
}
