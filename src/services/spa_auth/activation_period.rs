/*
 * Responsibility
 * - Parse human-readable token lifetimes ("15m", "2 hours", "5 days")
 * - Convert them into the whole seconds added to `iat` when computing `exp`
 *
 * Grammar: `-?(\d+)?\.?\d+ *unit?`, case-insensitive unit, bare number = milliseconds.
 */
use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

const MAX_INPUT_LEN: usize = 100;

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const WEEK: f64 = DAY * 7.0;
const YEAR: f64 = DAY * 365.25;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActivationPeriodError {
    #[error("activation period must be 1..={MAX_INPUT_LEN} characters, got {0}")]
    Length(usize),
    #[error("invalid number in activation period {0:?}")]
    Number(String),
    #[error("unknown unit {unit:?} in activation period {input:?}")]
    Unit { input: String, unit: String },
}

/// Lifetime of a token kind, stored in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct ActivationPeriod {
    millis: i64,
}

impl ActivationPeriod {
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self::from_millis(secs * 1_000)
    }

    pub const fn days(days: i64) -> Self {
        Self::from_secs(days * 86_400)
    }

    pub fn as_millis(&self) -> i64 {
        self.millis
    }

    /// Seconds to add to an integral `iat`, floored (negative periods floor away from zero).
    pub fn as_secs(&self) -> i64 {
        self.millis.div_euclid(1_000)
    }

    pub fn parse(input: &str) -> Result<Self, ActivationPeriodError> {
        if input.is_empty() || input.len() > MAX_INPUT_LEN {
            return Err(ActivationPeriodError::Length(input.len()));
        }

        let split = input
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
            .unwrap_or(input.len());
        let (number, rest) = input.split_at(split);

        let value = parse_number(number)
            .ok_or_else(|| ActivationPeriodError::Number(input.to_string()))?;

        let unit = rest.trim_start_matches(' ').to_ascii_lowercase();
        let factor = unit_factor(&unit).ok_or_else(|| ActivationPeriodError::Unit {
            input: input.to_string(),
            unit: unit.clone(),
        })?;

        Ok(Self::from_millis((value * factor).floor() as i64))
    }
}

fn parse_number(number: &str) -> Option<f64> {
    let digits = number.strip_prefix('-').unwrap_or(number);
    if digits.is_empty()
        || digits.ends_with('.')
        || digits.contains('-')
        || digits.matches('.').count() > 1
    {
        return None;
    }
    number.parse::<f64>().ok()
}

fn unit_factor(unit: &str) -> Option<f64> {
    let factor = match unit {
        "" | "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => SECOND,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR,
        "d" | "day" | "days" => DAY,
        "w" | "week" | "weeks" => WEEK,
        "y" | "yr" | "yrs" | "year" | "years" => YEAR,
        _ => return None,
    };
    Some(factor)
}

impl FromStr for ActivationPeriod {
    type Err = ActivationPeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ActivationPeriod {
    type Error = ActivationPeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for ActivationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}
