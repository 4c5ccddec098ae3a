//! Field parsing utilities for CFG records
//!
//! This module provides helper functions for splitting CFG lines into
//! fields and parsing typed values with strict full-token semantics.

use crate::constants::EMPTY_FIELD_DEFAULTS;
use crate::error::{ComtradeError, Result};
use std::fmt::Display;
use std::str::FromStr;

/// Position and content of the line being parsed, used to build errors
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub index: usize,
    pub content: &'a str,
}

impl<'a> LineContext<'a> {
    pub fn new(index: usize, content: &'a str) -> Self {
        Self { index, content }
    }

    /// Build a malformed record error for this line
    pub fn malformed(&self, reason: impl Into<String>) -> ComtradeError {
        ComtradeError::malformed(self.index, self.content, reason)
    }

    /// Build an invalid date/time error for this line
    pub fn invalid_datetime(&self, reason: impl Into<String>) -> ComtradeError {
        ComtradeError::invalid_datetime(self.index, self.content, reason)
    }

    /// Fail unless the record has one of the allowed field counts
    pub fn expect_arity(&self, fields: &[&str], allowed: &[usize], shape: &str) -> Result<()> {
        if allowed.contains(&fields.len()) {
            return Ok(());
        }

        let expected = allowed
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        Err(self.malformed(format!(
            "{} record expects {} fields, found {}",
            shape,
            expected,
            fields.len()
        )))
    }
}

/// Split a CFG line into whitespace-trimmed fields
pub fn split_fields(content: &str) -> Vec<&str> {
    content.split(',').map(str::trim).collect()
}

/// Substitute the declared default for a field that may legally be empty
pub fn field_or_default<'a>(field_name: &str, value: &'a str) -> &'a str {
    if !value.is_empty() {
        return value;
    }

    EMPTY_FIELD_DEFAULTS
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, default)| *default)
        .unwrap_or(value)
}

/// Parse a value that must consume the entire token
fn parse_strict<T>(ctx: &LineContext, field_name: &str, value: &str, kind: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    if value.is_empty() {
        return Err(ctx.malformed(format!("Empty value for {} field '{}'", kind, field_name)));
    }

    value.parse::<T>().map_err(|e| {
        ctx.malformed(format!(
            "Invalid {} format for {}: '{}' ({})",
            kind, field_name, value, e
        ))
    })
}

/// Parse a non-negative count or index
pub fn parse_count(ctx: &LineContext, field_name: &str, value: &str) -> Result<usize> {
    parse_strict(ctx, field_name, value, "count")
}

/// Parse a signed integer
pub fn parse_integer(ctx: &LineContext, field_name: &str, value: &str) -> Result<i64> {
    parse_strict(ctx, field_name, value, "integer")
}

/// Parse a sample number
pub fn parse_sample_number(ctx: &LineContext, field_name: &str, value: &str) -> Result<u64> {
    parse_strict(ctx, field_name, value, "sample number")
}

/// Parse a finite floating point value
pub fn parse_float(ctx: &LineContext, field_name: &str, value: &str) -> Result<f64> {
    let parsed: f64 = parse_strict(ctx, field_name, value, "float")?;
    if !parsed.is_finite() {
        return Err(ctx.malformed(format!(
            "Non-finite value for {}: '{}'",
            field_name, value
        )));
    }
    Ok(parsed)
}

/// Parse a count followed by a literal suffix, as in `4A` or `16D`
pub fn parse_suffixed_count(
    ctx: &LineContext,
    field_name: &str,
    value: &str,
    suffix: &str,
) -> Result<usize> {
    let digits = value.strip_suffix(suffix).ok_or_else(|| {
        ctx.malformed(format!(
            "Expected {} to end with '{}', found '{}'",
            field_name, suffix, value
        ))
    })?;
    parse_count(ctx, field_name, digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::fields;

    fn ctx() -> LineContext<'static> {
        LineContext::new(7, "raw,line")
    }

    #[test]
    fn test_split_fields_trims_whitespace() {
        assert_eq!(split_fields(" a , b,c \r"), vec!["a", "b", "c"]);
        assert_eq!(split_fields(",,"), vec!["", "", ""]);
        assert_eq!(split_fields(""), vec![""]);
    }

    #[test]
    fn test_field_or_default() {
        assert_eq!(field_or_default(fields::TIME_MULTIPLIER, ""), "1.0");
        assert_eq!(field_or_default(fields::ANALOG_COUNT, ""), "0A");
        assert_eq!(field_or_default(fields::TIME_MULTIPLIER, "0.5"), "0.5");
        assert_eq!(field_or_default("frequency", ""), "");
    }

    #[test]
    fn test_strict_integer_rejects_trailing_garbage() {
        assert_eq!(parse_count(&ctx(), "n", "12").unwrap(), 12);
        let err = parse_count(&ctx(), "n", "12x").unwrap_err();
        match err {
            ComtradeError::MalformedRecord { line, content, .. } => {
                assert_eq!(line, 7);
                assert_eq!(content, "raw,line");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(parse_count(&ctx(), "n", "-1").is_err());
        assert!(parse_count(&ctx(), "n", "").is_err());
        assert_eq!(parse_integer(&ctx(), "y", "-1").unwrap(), -1);
    }

    #[test]
    fn test_strict_float() {
        assert_eq!(parse_float(&ctx(), "a", "0.5").unwrap(), 0.5);
        assert_eq!(parse_float(&ctx(), "a", "-1e-3").unwrap(), -0.001);
        assert!(parse_float(&ctx(), "a", "0.5V").is_err());
        assert!(parse_float(&ctx(), "a", "inf").is_err());
        assert!(parse_float(&ctx(), "a", "NaN").is_err());
    }

    #[test]
    fn test_suffixed_count() {
        assert_eq!(parse_suffixed_count(&ctx(), "analog", "4A", "A").unwrap(), 4);
        assert!(parse_suffixed_count(&ctx(), "analog", "4D", "A").is_err());
        assert!(parse_suffixed_count(&ctx(), "analog", "4a", "A").is_err());
        assert!(parse_suffixed_count(&ctx(), "analog", "A", "A").is_err());
    }

    #[test]
    fn test_expect_arity() {
        assert!(ctx().expect_arity(&["a", "b"], &[2, 3], "header").is_ok());
        let err = ctx().expect_arity(&["a"], &[2, 3], "header").unwrap_err();
        assert!(err.to_string().contains("2 or 3 fields, found 1"));
    }
}
