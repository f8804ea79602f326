mod prefix;

pub use prefix::{BinaryPrefix, PrefixTable};

use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;
use tracing::trace;

/// A byte count rendered with a binary prefix, e.g. `2.6Gi` or `256Mi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedField {
    /// Integer part, one or more characters
    pub integer: String,

    /// Single fractional digit, shown only when `integer` is one character
    pub fraction: char,

    /// Tier suffix
    pub prefix: BinaryPrefix,
}

impl FormattedField {
    pub fn has_fraction(&self) -> bool {
        self.integer.len() == 1
    }
}

impl fmt::Display for FormattedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_fraction() {
            write!(f, "{}.{}{}", self.integer, self.fraction, self.prefix)
        } else {
            write!(f, "{}{}", self.integer, self.prefix)
        }
    }
}

/// Parses a decimal digit string of any length. Anything that is not a
/// plain run of ASCII digits reads as zero.
pub fn parse_raw(raw: &str) -> BigUint {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return BigUint::zero();
    }
    BigUint::parse_bytes(raw.as_bytes(), 10).unwrap_or_default()
}

/// Converts a raw byte-count field into its binary-prefix form.
///
/// The fractional digit is the leading character of the remainder's own
/// decimal representation, not the remainder scaled to tenths of a unit:
/// `1100` bytes is `1.7Ki` (remainder 76), not `1.0Ki`. Existing consumers
/// of the output depend on this digit.
pub fn format_field(raw: &str) -> FormattedField {
    let table = PrefixTable::get();
    let value = parse_raw(raw);
    let prefix = table.select(&value);

    let Some(unit) = table.unit(prefix) else {
        return FormattedField {
            integer: raw.to_string(),
            fraction: '0',
            prefix,
        };
    };

    let quotient = &value / unit;
    let remainder = &value % unit;
    let fraction = remainder.to_string().chars().next().unwrap_or('0');
    trace!("{} -> {} rem {} in {}", raw, quotient, remainder, prefix);

    FormattedField {
        integer: quotient.to_string(),
        fraction,
        prefix,
    }
}

/// Shorthand for `format_field(raw).to_string()`.
pub fn format_bytes(raw: &str) -> String {
    format_field(raw).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_plain_bytes() {
        assert_eq!(format_bytes("0"), "0.0Bi");
        assert_eq!(format_bytes("7"), "7.0Bi");
        assert_eq!(format_bytes("16"), "16Bi");
        assert_eq!(format_bytes("1023"), "1023Bi");
    }

    #[test]
    fn test_format_exact_units() {
        assert_eq!(format_bytes("1024"), "1.0Ki");
        assert_eq!(format_bytes("2048"), "2.0Ki");
        assert_eq!(format_bytes(&(1024u64 * 512).to_string()), "512Ki");
        assert_eq!(format_bytes(&(1024u64 * 1024 * 256).to_string()), "256Mi");
        assert_eq!(format_bytes(&(2 * 1024u64.pow(3)).to_string()), "2.0Gi");
        assert_eq!(format_bytes(&1024u64.pow(4).to_string()), "1.0Ti");
        assert_eq!(format_bytes(&1024u64.pow(5).to_string()), "1.0Pi");
        assert_eq!(format_bytes(&1024u64.pow(6).to_string()), "1.0Ei");
    }

    #[test]
    fn test_fraction_is_leading_remainder_digit() {
        // remainder 512
        assert_eq!(format_bytes("1536"), "1.5Ki");
        // remainder 76
        assert_eq!(format_bytes("1100"), "1.7Ki");
        // remainder 1
        assert_eq!(format_bytes(&(2 * 1024u64.pow(3) + 1).to_string()), "2.1Gi");
        // remainder 9 * 1024^2, leading digit of 9437184
        assert_eq!(
            format_bytes(&(3 * 1024u64.pow(3) + 9 * 1024u64.pow(2)).to_string()),
            "3.9Gi"
        );
    }

    #[test]
    fn test_format_beyond_u64() {
        let zi = BigUint::from(1024u32).pow(7);
        assert_eq!(format_bytes(&zi.to_string()), "1.0Zi");

        let yi = BigUint::from(1024u32).pow(8);
        assert_eq!(format_bytes(&yi.to_string()), "1.0Yi");
        assert_eq!(format_bytes(&(&yi * 5u32).to_string()), "5.0Yi");

        let huge = BigUint::from(1024u32).pow(9);
        assert_eq!(format_bytes(&huge.to_string()), "1024Yi");
    }

    #[test]
    fn test_malformed_reads_as_zero() {
        assert_eq!(parse_raw("12ab"), BigUint::zero());
        assert_eq!(parse_raw(""), BigUint::zero());
        assert_eq!(parse_raw("+5"), BigUint::zero());
        assert_eq!(parse_raw("-"), BigUint::zero());

        // zero lands in the byte tier, which echoes the raw text
        assert_eq!(format_bytes("-"), "-.0Bi");
        assert_eq!(format_bytes("n/a"), "n/aBi");
    }

    #[test]
    fn test_field_parts() {
        let field = format_field("268435456");
        assert_eq!(field.integer, "256");
        assert_eq!(field.prefix, BinaryPrefix::Mi);
        assert!(!field.has_fraction());
    }

    proptest! {
        #[test]
        fn prop_below_1024_is_plain_bytes(v in 0u32..1024) {
            let expected = if v < 10 {
                format!("{v}.0Bi")
            } else {
                format!("{v}Bi")
            };
            prop_assert_eq!(format_bytes(&v.to_string()), expected);
        }

        #[test]
        fn prop_multi_digit_quotient_has_no_point(v in any::<u64>()) {
            let field = format_field(&v.to_string());
            let rendered = field.to_string();
            if field.integer.len() > 1 {
                prop_assert!(!rendered.contains('.'));
            } else {
                prop_assert_eq!(rendered.matches('.').count(), 1);
            }
            prop_assert!(rendered.ends_with(&field.prefix.to_string()));
        }

        #[test]
        fn prop_integer_part_is_quotient(v in 1024u64..) {
            let field = format_field(&v.to_string());
            let unit = 1024u64.pow(field.prefix.exponent());
            prop_assert_eq!(field.integer, (v / unit).to_string());
        }
    }
}
