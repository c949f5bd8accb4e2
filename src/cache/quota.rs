//! Cache size quota parsing
//!
//! Quotas are written as byte quantities in the notation used by
//! Kubernetes resource limits: `512`, `1.4Ki`, `10Mi`, `2G`, `5e6`.
//! Binary suffixes are powers of 1024, decimal suffixes powers of 1000.
//! Fractional byte counts round up.

use crate::error::{FetchCacheError, FetchCacheResult};
use std::fmt;
use std::str::FromStr;

/// Quota used when nothing is configured
pub const DEFAULT_MAX_SIZE: &str = "1Mi";

/// Maximum size of a source tree that may be cached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quota {
    expr: String,
    bytes: u64,
}

impl Quota {
    /// Parse a quantity expression into an exact byte count
    pub fn parse(expr: &str) -> FetchCacheResult<Self> {
        let bytes =
            parse_bytes(expr.trim()).map_err(|reason| FetchCacheError::quota(expr, reason))?;
        Ok(Self {
            expr: expr.trim().to_string(),
            bytes,
        })
    }

    /// Quota in bytes
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Whether a tree of `size` bytes fits within the quota
    pub fn admits(&self, size: u64) -> bool {
        size <= self.bytes
    }
}

impl Default for Quota {
    fn default() -> Self {
        Self {
            expr: DEFAULT_MAX_SIZE.to_string(),
            bytes: 1024 * 1024,
        }
    }
}

impl FromStr for Quota {
    type Err = FetchCacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

/// Scale applied by a suffix
enum Scale {
    /// Multiply by `base^power`
    Power { base: u128, power: u32 },
    /// Multiply by `10^exp` (exp may be negative)
    Exponent(i32),
}

fn parse_suffix(suffix: &str) -> Result<Scale, String> {
    let binary = |power: u32| -> Result<Scale, String> { Ok(Scale::Power { base: 1024, power }) };
    let decimal = |power: u32| -> Result<Scale, String> { Ok(Scale::Power { base: 1000, power }) };

    match suffix {
        "" => decimal(0),
        "Ki" => binary(1),
        "Mi" => binary(2),
        "Gi" => binary(3),
        "Ti" => binary(4),
        "Pi" => binary(5),
        "Ei" => binary(6),
        "k" => decimal(1),
        "M" => decimal(2),
        "G" => decimal(3),
        "T" => decimal(4),
        "P" => decimal(5),
        "E" => decimal(6),
        _ => {
            let exp = suffix
                .strip_prefix('e')
                .or_else(|| suffix.strip_prefix('E'))
                .ok_or_else(|| format!("unknown suffix {:?}", suffix))?;
            exp.parse::<i32>()
                .map(Scale::Exponent)
                .map_err(|_| format!("invalid exponent {:?}", exp))
        }
    }
}

fn pow10(exp: u32) -> Result<u128, String> {
    10u128
        .checked_pow(exp)
        .ok_or_else(|| "value is too large".to_string())
}

fn parse_bytes(expr: &str) -> Result<u64, String> {
    if expr.is_empty() {
        return Err("empty expression".to_string());
    }
    if expr.starts_with('-') {
        return Err("size must not be negative".to_string());
    }
    let expr = expr.strip_prefix('+').unwrap_or(expr);

    let number_len = expr
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(expr.len());
    let (number, suffix) = expr.split_at(number_len);

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err("missing number".to_string());
    }
    if fraction.contains('.') {
        return Err("more than one decimal point".to_string());
    }

    let too_large = || "value is too large".to_string();
    let digits = format!("{}{}", whole, fraction);
    let mantissa: u128 = digits.parse().map_err(|_| too_large())?;

    let mut numerator = mantissa;
    let mut denominator = pow10(fraction.len() as u32)?;

    match parse_suffix(suffix)? {
        Scale::Power { base, power } => {
            let factor = base.checked_pow(power).ok_or_else(too_large)?;
            numerator = numerator.checked_mul(factor).ok_or_else(too_large)?;
        }
        Scale::Exponent(exp) if exp >= 0 => {
            numerator = numerator
                .checked_mul(pow10(exp.unsigned_abs())?)
                .ok_or_else(too_large)?;
        }
        Scale::Exponent(exp) => {
            denominator = denominator
                .checked_mul(pow10(exp.unsigned_abs())?)
                .ok_or_else(too_large)?;
        }
    }

    let bytes = numerator.div_ceil(denominator);
    u64::try_from(bytes).map_err(|_| too_large())
}
