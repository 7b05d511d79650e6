pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a serialized `LoanTerm` for humans.
///
/// Display-only: terms beyond 100 years and non-convergent schedules both
/// read "> 100 years", matching how the planner UI capped the field. The
/// JSON and CSV formats keep the tagged value untouched.
pub(crate) fn format_term(term: &Value) -> Option<String> {
    let status = term.get("status")?.as_str()?;

    match status {
        "non_convergent" => Some("> 100 years".to_string()),
        "finite" => {
            let years: Decimal = term.get("years")?.as_str()?.parse().ok()?;
            if years > dec!(100) {
                return Some("> 100 years".to_string());
            }

            let mut whole = years.floor();
            let mut months = ((years - whole) * dec!(12)).round();
            if months >= dec!(12) {
                whole += Decimal::ONE;
                months = Decimal::ZERO;
            }
            Some(format!(
                "{} {}, {} {}",
                whole.normalize(),
                pluralize(whole, "year"),
                months.normalize(),
                pluralize(months, "month")
            ))
        }
        _ => None,
    }
}

fn pluralize(count: Decimal, unit: &str) -> String {
    if count == Decimal::ONE {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::format_term;
    use serde_json::json;

    #[test]
    fn test_format_term_rounds_to_years_and_months() {
        let term = json!({ "status": "finite", "years": "28.06" });
        assert_eq!(format_term(&term).as_deref(), Some("28 years, 1 month"));
    }

    #[test]
    fn test_format_term_singular_and_plural_units() {
        let term = json!({ "status": "finite", "years": "1.0" });
        assert_eq!(format_term(&term).as_deref(), Some("1 year, 0 months"));

        let term = json!({ "status": "finite", "years": "1.085" });
        assert_eq!(format_term(&term).as_deref(), Some("1 year, 1 month"));

        let term = json!({ "status": "finite", "years": "2.5" });
        assert_eq!(format_term(&term).as_deref(), Some("2 years, 6 months"));
    }

    #[test]
    fn test_format_term_carries_rounded_up_month() {
        // 11.99 months rounds to 12 and rolls into the year count
        let term = json!({ "status": "finite", "years": "19.999" });
        assert_eq!(format_term(&term).as_deref(), Some("20 years, 0 months"));
    }

    #[test]
    fn test_format_term_caps_long_and_non_convergent_schedules() {
        let term = json!({ "status": "finite", "years": "150" });
        assert_eq!(format_term(&term).as_deref(), Some("> 100 years"));

        let term = json!({ "status": "non_convergent" });
        assert_eq!(format_term(&term).as_deref(), Some("> 100 years"));
    }

    #[test]
    fn test_format_term_ignores_non_term_values() {
        assert_eq!(format_term(&json!({ "loan_amount": "568560" })), None);
        assert_eq!(format_term(&json!("568560")), None);
    }
}
