//! Kubernetes Resource Quantities
//!
//! Parses the human-readable sizes users put on the CR (`100m`, `10Gi`,
//! `1e3`) into exact values and renders them in canonical Kubernetes form,
//! so a quantity written to a template compares equal to what the API server
//! would store for the same input.

use crate::error::{Error, Result};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity as K8sQuantity;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Constants
// =============================================================================

/// Every value is kept as an integer number of nano-units
const NANOS_PER_UNIT: u128 = 1_000_000_000;

/// Binary-suffixed quantities are capped at i64::MAX units
const MAX_BINARY_NANOS: u128 = i64::MAX as u128 * NANOS_PER_UNIT;

/// Characters allowed in the suffix part before an optional signed exponent
const SUFFIX_CHARS: &str = "eEinumkKMGTP";

const BINARY_SUFFIXES: [&str; 6] = ["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];

const REASON_FORMAT: &str = "unexpected character in quantity";
const REASON_SUFFIX: &str = "unable to parse quantity's suffix";
const REASON_NUMERIC: &str = "unable to parse numeric part of quantity";

// =============================================================================
// Quantity
// =============================================================================

/// How a quantity was written, which decides how it is rendered back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityFormat {
    /// Powers of 1024: Ki, Mi, Gi, Ti, Pi, Ei
    BinarySI,
    /// Powers of 1000: n, u, m, k, M, G, T, P, E
    DecimalSI,
    /// Explicit exponent: 1e3, 5E-2
    DecimalExponent,
}

/// An exact, validated resource quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quantity {
    nanos: i128,
    format: QuantityFormat,
}

impl Quantity {
    /// Parse a quantity string, rejecting anything outside the Kubernetes
    /// quantity grammar
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidQuantity {
            value: input.to_string(),
            reason: reason.to_string(),
        };

        let bytes = input.as_bytes();
        let mut pos = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };

        let int_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let int_digits = &input[int_start..pos];

        let mut frac_digits = "";
        if pos < bytes.len() && bytes[pos] == b'.' {
            pos += 1;
            let frac_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            frac_digits = &input[frac_start..pos];
        }

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid(REASON_FORMAT));
        }

        let suffix = &input[pos..];
        if !is_well_formed_suffix(suffix) {
            return Err(invalid(REASON_FORMAT));
        }
        let (suffix, format) = Suffix::interpret(suffix).ok_or_else(|| invalid(REASON_SUFFIX))?;

        let (multiplier, shift) = match suffix {
            Suffix::Decimal(exponent) => (1, i64::from(exponent) + 9),
            Suffix::Binary(power) => (1u128 << power, 9),
        };
        let frac_len = frac_digits.len() as i64;
        let magnitude = scale_digits(int_digits, frac_digits, multiplier, shift - frac_len);

        let magnitude = match (magnitude, format) {
            (Some(m), QuantityFormat::BinarySI) => m.min(MAX_BINARY_NANOS),
            (None, QuantityFormat::BinarySI) => MAX_BINARY_NANOS,
            (Some(m), _) => m,
            (None, _) => return Err(invalid(REASON_NUMERIC)),
        };

        let nanos = i128::try_from(magnitude).map_err(|_| invalid(REASON_NUMERIC))?;
        let nanos = if negative { -nanos } else { nanos };

        Ok(Self { nanos, format })
    }

    /// The format the quantity was written in
    pub fn format(&self) -> QuantityFormat {
        self.format
    }

    /// Whether the quantity is zero
    pub fn is_zero(&self) -> bool {
        self.nanos == 0
    }

    /// Whether the quantity is below zero
    pub fn is_negative(&self) -> bool {
        self.nanos < 0
    }

    /// Exact value in nano-units
    pub fn as_nanos(&self) -> i128 {
        self.nanos
    }

    /// Canonical Kubernetes representation
    pub fn to_k8s(&self) -> K8sQuantity {
        K8sQuantity(self.to_string())
    }
}

impl FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanos == 0 {
            return f.write_str("0");
        }

        let sign = if self.nanos < 0 { "-" } else { "" };
        let magnitude = self.nanos.unsigned_abs();

        // Small or fractional binary values are shown in decimal to avoid rounding
        if self.format == QuantityFormat::BinarySI
            && magnitude >= 1024 * NANOS_PER_UNIT
            && magnitude % NANOS_PER_UNIT == 0
        {
            let mut units = magnitude / NANOS_PER_UNIT;
            let mut power = 0;
            while power < BINARY_SUFFIXES.len() && units % 1024 == 0 {
                units /= 1024;
                power += 1;
            }
            let suffix = match power {
                0 => "",
                p => BINARY_SUFFIXES[p - 1],
            };
            return write!(f, "{}{}{}", sign, units, suffix);
        }

        let (mantissa, exponent) = decimal_parts(magnitude);
        match (self.format, decimal_suffix(exponent)) {
            (QuantityFormat::DecimalExponent, _) if exponent == 0 => {
                write!(f, "{}{}", sign, mantissa)
            }
            (QuantityFormat::DecimalExponent, _) | (_, None) => {
                write!(f, "{}{}e{}", sign, mantissa, exponent)
            }
            (_, Some(suffix)) => write!(f, "{}{}{}", sign, mantissa, suffix),
        }
    }
}

impl From<Quantity> for K8sQuantity {
    fn from(value: Quantity) -> Self {
        value.to_k8s()
    }
}

impl TryFrom<&K8sQuantity> for Quantity {
    type Error = Error;

    fn try_from(value: &K8sQuantity) -> Result<Self> {
        Quantity::parse(&value.0)
    }
}

/// Validate a size string and return its canonical Kubernetes form
pub fn canonicalize(input: &str) -> Result<K8sQuantity> {
    Quantity::parse(input).map(|q| q.to_k8s())
}

// =============================================================================
// Suffix Handling
// =============================================================================

/// Multiplier encoded by a suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suffix {
    /// 10^n
    Decimal(i32),
    /// 2^n
    Binary(u32),
}

impl Suffix {
    fn interpret(suffix: &str) -> Option<(Self, QuantityFormat)> {
        let decimal = |exp| Some((Suffix::Decimal(exp), QuantityFormat::DecimalSI));
        let binary = |exp| Some((Suffix::Binary(exp), QuantityFormat::BinarySI));

        match suffix {
            "n" => decimal(-9),
            "u" => decimal(-6),
            "m" => decimal(-3),
            "" => decimal(0),
            "k" => decimal(3),
            "M" => decimal(6),
            "G" => decimal(9),
            "T" => decimal(12),
            "P" => decimal(15),
            "E" => decimal(18),
            "Ki" => binary(10),
            "Mi" => binary(20),
            "Gi" => binary(30),
            "Ti" => binary(40),
            "Pi" => binary(50),
            "Ei" => binary(60),
            s if s.len() > 1 && (s.starts_with('e') || s.starts_with('E')) => s[1..]
                .parse::<i32>()
                .ok()
                .map(|exp| (Suffix::Decimal(exp), QuantityFormat::DecimalExponent)),
            _ => None,
        }
    }
}

/// Suffix letters, then an optional sign, then digits
fn is_well_formed_suffix(suffix: &str) -> bool {
    let rest = suffix.trim_start_matches(|c: char| SUFFIX_CHARS.contains(c));
    let rest = rest
        .strip_prefix('+')
        .or_else(|| rest.strip_prefix('-'))
        .unwrap_or(rest);
    rest.bytes().all(|b| b.is_ascii_digit())
}

fn decimal_suffix(exponent: i32) -> Option<&'static str> {
    match exponent {
        -9 => Some("n"),
        -6 => Some("u"),
        -3 => Some("m"),
        0 => Some(""),
        3 => Some("k"),
        6 => Some("M"),
        9 => Some("G"),
        12 => Some("T"),
        15 => Some("P"),
        18 => Some("E"),
        _ => None,
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

/// `digits * multiplier * 10^exp` as an integer, rounding away from zero
///
/// Works on the decimal digits directly so that precision below one nano-unit
/// never has to fit in a `u128`. `None` when the result does not fit.
fn scale_digits(int_digits: &str, frac_digits: &str, multiplier: u128, exp: i64) -> Option<u128> {
    let mut digits: Vec<u8> = int_digits
        .bytes()
        .chain(frac_digits.bytes())
        .map(|b| b - b'0')
        .collect();

    if multiplier != 1 {
        let mut carry = 0u128;
        for digit in digits.iter_mut().rev() {
            let value = u128::from(*digit) * multiplier + carry;
            *digit = (value % 10) as u8;
            carry = value / 10;
        }
        let mut head = Vec::new();
        while carry > 0 {
            head.push((carry % 10) as u8);
            carry /= 10;
        }
        head.reverse();
        head.extend(digits);
        digits = head;
    }

    let mut round_up = false;
    if exp < 0 {
        let dropped = usize::try_from(-exp).unwrap_or(usize::MAX).min(digits.len());
        let kept = digits.len() - dropped;
        round_up = digits[kept..].iter().any(|&d| d != 0);
        digits.truncate(kept);
    }

    let value = digits
        .iter()
        .try_fold(0u128, |acc, &d| acc.checked_mul(10)?.checked_add(u128::from(d)))?;
    if value == 0 {
        return Some(u128::from(round_up));
    }

    let value = if exp > 0 {
        let factor = 10u128.checked_pow(u32::try_from(exp).ok()?)?;
        value.checked_mul(factor)?
    } else {
        value
    };
    value.checked_add(u128::from(round_up))
}

/// Split nano-units into a mantissa and an exponent that is a multiple of 3
fn decimal_parts(magnitude: u128) -> (u128, i32) {
    let mut mantissa = magnitude;
    let mut exponent: i32 = -9;
    while mantissa % 10 == 0 {
        mantissa /= 10;
        exponent += 1;
    }
    let rem = exponent.rem_euclid(3);
    (mantissa * 10u128.pow(rem as u32), exponent - rem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn canonical(s: &str) -> String {
        Quantity::parse(s).unwrap().to_string()
    }

    #[test]
    fn test_canonical_decimal() {
        assert_eq!(canonical("100m"), "100m");
        assert_eq!(canonical("1000"), "1k");
        assert_eq!(canonical("1500m"), "1500m");
        assert_eq!(canonical("1.5"), "1500m");
        assert_eq!(canonical("5G"), "5G");
        assert_eq!(canonical("0.1n"), "1n");
        assert_eq!(canonical("007"), "7");
        assert_eq!(canonical("+2k"), "2k");
        assert_eq!(canonical("-2k"), "-2k");
        assert_eq!(canonical("1."), "1");
        assert_eq!(canonical(".5"), "500m");
        assert_eq!(canonical("100E"), "100E");
        assert_eq!(canonical("1000E"), "1e21");
    }

    #[test]
    fn test_canonical_binary() {
        assert_eq!(canonical("10Gi"), "10Gi");
        assert_eq!(canonical("1024Mi"), "1Gi");
        assert_eq!(canonical("1.5Gi"), "1536Mi");
        assert_eq!(canonical("1.5Ki"), "1536");
        assert_eq!(canonical("0.5Ki"), "512");
        assert_eq!(canonical("100Gi"), "100Gi");
        assert_eq!(canonical("16Ei"), "9223372036854775807");
    }

    #[test]
    fn test_canonical_exponent() {
        assert_eq!(canonical("1e3"), "1e3");
        assert_eq!(canonical("12e2"), "1200");
        assert_eq!(canonical("1E-3"), "1e-3");
        assert_eq!(canonical("5e+6"), "5e6");
    }

    #[test]
    fn test_zero() {
        assert_eq!(canonical("0"), "0");
        assert_eq!(canonical("-0"), "0");
        assert_eq!(canonical("0Gi"), "0");
        assert_eq!(canonical("0.000m"), "0");
        assert!(Quantity::parse("0Mi").unwrap().is_zero());
    }

    #[test]
    fn test_rejects_malformed() {
        for input in ["10x", "", "abc", ".", "-", "Gi", "10 Gi", " 10Gi", "1.2.3", "10Gi5x"] {
            assert_matches!(
                Quantity::parse(input),
                Err(Error::InvalidQuantity { ref value, .. }) if value == input,
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_rejects_unknown_suffix() {
        let err = Quantity::parse("10ki").unwrap_err();
        assert_matches!(err, Error::InvalidQuantity { ref reason, .. } if reason == REASON_SUFFIX);

        assert!(Quantity::parse("10e").is_err());
        assert!(Quantity::parse("10Mii").is_err());
        assert!(Quantity::parse("3ee3").is_err());
    }

    #[test]
    fn test_long_fraction_rounds_up_to_nanos() {
        assert_eq!(
            canonical("1.0000000000000000000000000000000000000001"),
            "1000000001n"
        );
        assert_eq!(canonical("1.0000000000000000000000000000000000000000"), "1");
        assert_eq!(
            canonical("0.000000000000000000000000000000000000000000001"),
            "1n"
        );
        assert_eq!(canonical("1.0001Ki"), "1024102400u");
        assert_eq!(
            canonical("1.00000000000000000000000000000000000000001Ki"),
            "1024000000001n"
        );
        assert_eq!(canonical("1e-40"), "1e-9");
        assert_eq!(canonical("1000E"), "1e21");
    }

    #[test]
    fn test_huge_binary_is_capped() {
        assert_eq!(
            canonical("1000000000000000000000000000000000000000Ei"),
            "9223372036854775807"
        );
    }

    #[test]
    fn test_decimal_parts_aligns_exponent() {
        assert_eq!(decimal_parts(1_500_000_000), (1500, -3));
        assert_eq!(decimal_parts(1), (1, -9));
        assert_eq!(decimal_parts(10_000_000_000_000), (10, 3));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = Quantity::parse("1e40").unwrap_err();
        assert_matches!(err, Error::InvalidQuantity { ref reason, .. } if reason == REASON_NUMERIC);
    }

    #[test]
    fn test_error_message_names_grammar() {
        let err = Quantity::parse("10x").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("10x"));
        assert!(msg.contains("quantities must match the regular expression"));
    }

    #[test]
    fn test_round_trip_is_stable() {
        for input in ["100m", "10Gi", "1.5Gi", "1e3", "12e2", "0.5Ki", "1000"] {
            let first = canonical(input);
            assert_eq!(canonical(&first), first, "input {:?}", input);
        }
    }

    #[test]
    fn test_k8s_conversion() {
        let q: K8sQuantity = Quantity::parse("2048Mi").unwrap().into();
        assert_eq!(q, K8sQuantity("2Gi".to_string()));

        let back = Quantity::try_from(&q).unwrap();
        assert_eq!(back.format(), QuantityFormat::BinarySI);
        assert_eq!(back.as_nanos(), 2 * 1024 * 1024 * 1024 * 1_000_000_000);

        assert_eq!(canonicalize("100m").unwrap(), K8sQuantity("100m".to_string()));
    }
}
