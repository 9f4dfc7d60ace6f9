use rust_decimal::{Decimal, RoundingStrategy};

/// Inserts `,` every three digits from the right of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats an amount as US dollars with cents, e.g. `$2,022.62`.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((&text, "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Formats a percentage without trailing zeros, e.g. `6.5%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_usd_groups_thousands_and_pads_cents() {
        assert_eq!(format_usd(dec!(2022.62)), "$2,022.62");
        assert_eq!(format_usd(dec!(728142.36)), "$728,142.36");
        assert_eq!(format_usd(dec!(1234567)), "$1,234,567.00");
        assert_eq!(format_usd(dec!(100)), "$100.00");
        assert_eq!(format_usd(dec!(0)), "$0.00");
    }

    #[test]
    fn format_usd_rounds_half_up_to_cents() {
        assert_eq!(format_usd(dec!(416.665)), "$416.67");
        assert_eq!(format_usd(dec!(0.004)), "$0.00");
    }

    #[test]
    fn format_usd_negative() {
        assert_eq!(format_usd(dec!(-1500.5)), "-$1,500.50");
        assert_eq!(format_usd(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn format_percent_trims_zeros() {
        assert_eq!(format_percent(dec!(6.500)), "6.5%");
        assert_eq!(format_percent(dec!(7)), "7%");
        assert_eq!(format_percent(dec!(0)), "0%");
    }
}
