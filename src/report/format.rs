use rust_decimal::prelude::*;

/// Magnitude from which fixed notation gives way to exponent notation.
const EXPONENT_FROM: f64 = 1e21;

/// Text for values that have no digits at all.
pub(crate) fn non_finite_text(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

/// Shortest round-trip digits with a signed exponent: `1e+300`, `1.5e+21`.
fn exponent_form(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

/// Formats `value` with exactly two decimals, rounding the exact binary value
/// half away from zero (`Number.prototype.toFixed(2)` semantics). Huge and
/// non-finite bankrolls, reachable with extreme inputs, follow the same
/// rules: exponent form from 1e21 up, `Infinity` once the value overflows.
pub fn two_decimals(value: f64) -> String {
    if let Some(text) = non_finite_text(value) {
        return text.to_string();
    }
    if value.abs() >= EXPONENT_FROM {
        return exponent_form(value);
    }
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.2}", rounded)
        }
        // below 1e21 every finite value fits a Decimal
        None => format!("{:.2}", value),
    }
}

pub fn euros(value: f64) -> String {
    format!("{} €", two_decimals(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_decimals_pads_and_rounds() {
        assert_eq!(two_decimals(10.0), "10.00");
        assert_eq!(two_decimals(1.2), "1.20");
        assert_eq!(two_decimals(19.5 * 1.35), "26.33");
        assert_eq!(two_decimals(975.8392268625016), "975.84");
    }

    #[test]
    fn test_exact_midpoint_goes_up() {
        // 0.125 is exactly representable, so this is a true tie
        assert_eq!(two_decimals(0.125), "0.13");
        assert_eq!(two_decimals(2.375), "2.38");
    }

    #[test]
    fn test_binary_value_below_midpoint_goes_down() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(two_decimals(1.005), "1.00");
    }

    #[test]
    fn test_huge_values_switch_to_exponent_form() {
        assert_eq!(two_decimals(1e21), "1e+21");
        assert_eq!(two_decimals(1.5e300), "1.5e+300");
        assert_eq!(two_decimals(-2e22), "-2e+22");
        assert_eq!(two_decimals(1e20), "100000000000000000000.00");
    }

    #[test]
    fn test_overflowed_values_are_named() {
        assert_eq!(two_decimals(f64::INFINITY), "Infinity");
        assert_eq!(two_decimals(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(two_decimals(f64::NAN), "NaN");
        assert_eq!(euros(f64::INFINITY), "Infinity €");
    }

    #[test]
    fn test_euros_suffix() {
        assert_eq!(euros(12.0), "12.00 €");
    }
}
