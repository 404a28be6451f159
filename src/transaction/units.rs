//! Fixed-point helpers for amounts kept in smallest units.

/// `10^decimals`; saturates for absurd decimal counts.
pub fn pow10(decimals: u32) -> u128 {
    10u128.checked_pow(decimals).unwrap_or(u128::MAX)
}

/// Whole units to smallest units (`whole * 10^decimals`), saturating.
pub fn to_base_units(whole: u128, decimals: u32) -> u128 {
    whole.saturating_mul(pow10(decimals))
}

/// Exact decimal rendering with trailing fractional zeros removed.
pub fn format_units(raw: u128, decimals: u32) -> String {
    let scale = pow10(decimals);
    let whole = raw / scale;
    let frac = raw % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:0width$}", width = decimals as usize);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Signed amount rendered with exactly `places` decimals, rounding half up
/// on the magnitude.
pub fn format_fixed(value: i128, decimals: u32, places: u32) -> String {
    let negative = value < 0;
    let magnitude = value.unsigned_abs();
    let scale = pow10(decimals);
    let mut whole = magnitude / scale;
    let frac = magnitude % scale;

    let mut rounded = if places >= decimals {
        frac * pow10(places - decimals)
    } else {
        let divisor = pow10(decimals - places);
        (frac + divisor / 2) / divisor
    };
    if rounded >= pow10(places) {
        whole += 1;
        rounded -= pow10(places);
    }

    let sign = if negative && (whole != 0 || rounded != 0) {
        "-"
    } else {
        ""
    };
    if places == 0 {
        return format!("{sign}{whole}");
    }
    format!("{sign}{whole}.{rounded:0width$}", width = places as usize)
}

/// `0x`-prefixed lowercase hex quantity, `0x0` for zero.
pub fn to_quantity(value: u128) -> String {
    format!("{value:#x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_units() {
        assert_eq!(to_base_units(10, 6), 10_000_000);
        assert_eq!(
            to_base_units(144_000_000_000, 18),
            144_000_000_000_000_000_000_000_000_000
        );
        assert_eq!(to_base_units(u128::MAX, 18), u128::MAX);
    }

    #[test]
    fn format_units_trims() {
        assert_eq!(format_units(10_000_000, 6), "10");
        assert_eq!(format_units(1_500_000, 6), "1.5");
        assert_eq!(format_units(1, 6), "0.000001");
        assert_eq!(format_units(0, 6), "0");
        assert_eq!(format_units(42, 0), "42");
    }

    #[test]
    fn format_fixed_rounds_half_up() {
        let one = 10i128.pow(18);
        assert_eq!(format_fixed(one, 18, 4), "1.0000");
        assert_eq!(format_fixed(-one * 1_111, 18, 4), "-1111.0000");
        assert_eq!(format_fixed(one / 3, 18, 4), "0.3333");
        assert_eq!(format_fixed(one * 2 / 3, 18, 4), "0.6667");
        assert_eq!(format_fixed(one - 1, 18, 4), "1.0000");
        assert_eq!(format_fixed(-1, 18, 4), "0.0000");
        assert_eq!(format_fixed(0, 18, 4), "0.0000");
        assert_eq!(format_fixed(15, 1, 0), "2");
        assert_eq!(format_fixed(5, 2, 4), "0.0500");
    }

    #[test]
    fn quantities() {
        assert_eq!(to_quantity(0), "0x0");
        assert_eq!(to_quantity(255), "0xff");
        assert_eq!(to_quantity(21_000), "0x5208");
    }
}
