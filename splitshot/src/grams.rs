//! Fixed-point masses.
//!
//! Every catalog mass is an exact multiple of 0.01 g, so sums are computed on integer
//! [`Centigrams`]. Targets keep millionths of a gram as [`Micrograms`]; an offset is the
//! difference taken at that precision and rounded once to hundredths.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A mass expressed in hundredths of a gram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Centigrams(i64);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseGramsError {
    #[error("invalid weight '{0}'")]
    Invalid(String),
    #[error("weight '{0}' is out of range")]
    OutOfRange(String),
}

impl Centigrams {
    pub const ZERO: Centigrams = Centigrams(0);
    /// Largest magnitude accepted from callers (10 000 tonnes).
    pub const MAX: Centigrams = Centigrams(1_000_000_000_000_000);

    pub const fn new(centigrams: i64) -> Self {
        Self(centigrams)
    }

    /// Rounds `grams` half away from zero to the nearest hundredth.
    pub fn from_grams(grams: f64) -> Option<Self> {
        scale_grams(grams, 100.0, Self::MAX.0).map(Self)
    }

    pub const fn centigrams(self) -> i64 {
        self.0
    }

    pub fn as_grams(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Add for Centigrams {
    type Output = Centigrams;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Centigrams {
    type Output = Centigrams;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Centigrams {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Centigrams> for Centigrams {
    fn sum<I: Iterator<Item = &'a Centigrams>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Prints the shortest decimal form, e.g. `1.2`, `0.05`, `3`.
impl fmt::Display for Centigrams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_decimal(f, self.0, 2)
    }
}

/// Parses decimal text exactly. A trailing `g` unit is accepted and digits past the second
/// decimal place round half away from zero.
impl FromStr for Centigrams {
    type Err = ParseGramsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s, 2, Self::MAX.0).map(Self)
    }
}

impl Serialize for Centigrams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_grams())
    }
}

impl<'de> Deserialize<'de> for Centigrams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let grams = f64::deserialize(deserializer)?;
        Centigrams::from_grams(grams).ok_or_else(|| de::Error::custom(format!("weight {grams} is out of range")))
    }
}

/// A mass expressed in millionths of a gram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Micrograms(i64);

impl Micrograms {
    const PER_CENTIGRAM: i128 = 10_000;
    /// Largest magnitude accepted from callers (1 000 tonnes).
    pub const MAX: Micrograms = Micrograms(1_000_000_000_000_000);

    pub const fn new(micrograms: i64) -> Self {
        Self(micrograms)
    }

    /// Rounds `grams` half away from zero to the nearest millionth.
    pub fn from_grams(grams: f64) -> Option<Self> {
        scale_grams(grams, 1_000_000.0, Self::MAX.0).map(Self)
    }

    pub const fn micrograms(self) -> i64 {
        self.0
    }

    pub fn as_grams(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// `total - self`, rounded half away from zero to the nearest hundredth.
    pub fn offset_of(self, total: Centigrams) -> Centigrams {
        let diff = i128::from(total.0) * Self::PER_CENTIGRAM - i128::from(self.0);
        let half = Self::PER_CENTIGRAM / 2;
        let rounded = if diff < 0 { (diff - half) / Self::PER_CENTIGRAM } else { (diff + half) / Self::PER_CENTIGRAM };
        Centigrams(rounded as i64)
    }
}

impl From<Centigrams> for Micrograms {
    fn from(value: Centigrams) -> Self {
        Self(value.0 * 10_000)
    }
}

impl fmt::Display for Micrograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_decimal(f, self.0, 6)
    }
}

impl FromStr for Micrograms {
    type Err = ParseGramsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s, 6, Self::MAX.0).map(Self)
    }
}

impl Serialize for Micrograms {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_grams())
    }
}

impl<'de> Deserialize<'de> for Micrograms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let grams = f64::deserialize(deserializer)?;
        Micrograms::from_grams(grams).ok_or_else(|| de::Error::custom(format!("weight {grams} is out of range")))
    }
}

fn scale_grams(grams: f64, units_per_gram: f64, max: i64) -> Option<i64> {
    if !grams.is_finite() {
        return None;
    }
    let scaled = (grams * units_per_gram).round();
    if scaled.abs() > max as f64 {
        return None;
    }
    Some(scaled as i64)
}

fn write_decimal(f: &mut fmt::Formatter<'_>, value: i64, places: u32) -> fmt::Result {
    let sign = if value < 0 { "-" } else { "" };
    let scale = 10u64.pow(places);
    let magnitude = value.unsigned_abs();
    let (whole, fraction) = (magnitude / scale, magnitude % scale);
    if fraction == 0 {
        return write!(f, "{sign}{whole}");
    }
    let digits = format!("{fraction:0width$}", width = places as usize);
    write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
}

/// Exact decimal parsing into `places` fractional digits; the next digit rounds half away
/// from zero.
fn parse_decimal(s: &str, places: u32, max: i64) -> Result<i64, ParseGramsError> {
    let invalid = || ParseGramsError::Invalid(s.to_string());
    let out_of_range = || ParseGramsError::OutOfRange(s.to_string());

    let trimmed = s.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let body = body.strip_suffix('g').unwrap_or(body);
    let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| out_of_range())? };
    let digits = fraction.as_bytes();
    let width = places as usize;
    let kept = (0..width).fold(0i64, |acc, i| acc * 10 + digits.get(i).map_or(0, |d| i64::from(d - b'0')));
    let round_up = i64::from(digits.get(width).is_some_and(|d| *d >= b'5'));

    let magnitude = whole
        .checked_mul(10i64.pow(places))
        .and_then(|v| v.checked_add(kept + round_up))
        .filter(|v| *v <= max)
        .ok_or_else(out_of_range)?;
    Ok(if negative { -magnitude } else { magnitude })
}
