//! pt-BR display helpers for prices and creation dates.

use chrono::{DateTime, Utc};

/// Formats a price as Brazilian reais, e.g. `R$ 1.234,56` (non-breaking space after the symbol).
pub fn format_brl(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u64;
    let units = cents / 100;
    let fraction = cents % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if price < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$\u{a0}{},{:02}", sign, grouped, fraction)
}

/// `dd/mm/yyyy` (UTC) for a `createdAt` value, or `None` when it does not parse.
pub fn format_created_date(created_at: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(created_at)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).format("%d/%m/%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reais() {
        assert_eq!(format_brl(0.0), "R$\u{a0}0,00");
        assert_eq!(format_brl(9.9), "R$\u{a0}9,90");
        assert_eq!(format_brl(1234.56), "R$\u{a0}1.234,56");
        assert_eq!(format_brl(1_000_000.0), "R$\u{a0}1.000.000,00");
        assert_eq!(format_brl(-15.5), "-R$\u{a0}15,50");
    }

    #[test]
    fn formats_creation_date() {
        assert_eq!(
            format_created_date("2024-03-09T23:30:00.000Z").as_deref(),
            Some("09/03/2024")
        );
        assert_eq!(format_created_date("yesterday"), None);
    }
}
