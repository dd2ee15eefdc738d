//! Form input helpers
//!
//! Turns raw text inputs into payload values. Blank optional inputs become
//! `None` so they are left out of request bodies entirely.

use crate::error::{AppError, AppResult, ErrorCode};
use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

// ── Text length limits ──────────────────────────────────────────────

/// Reasons, notes and query texts
pub const MAX_NOTE_LEN: usize = 500;

/// Entity names
pub const MAX_NAME_LEN: usize = 200;

/// Policy codes
pub const MAX_POLICY_CODE_LEN: usize = 64;

// ── Text inputs ─────────────────────────────────────────────────────

/// Trimmed value, or `None` when blank
pub fn optional_text(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}

/// Same as [`optional_text`] for an already optional input
pub fn optional_text_opt(value: Option<&str>) -> Option<String> {
    value.and_then(optional_text)
}

/// Trimmed value; blank is a validation error naming the field
pub fn required_text(value: &str, field: &str) -> AppResult<String> {
    optional_text(value).ok_or_else(|| AppError::required_field(field))
}

/// Trimmed value within `max_len` characters
pub fn bounded_text(value: &str, field: &str, max_len: usize) -> AppResult<String> {
    let v = required_text(value, field)?;
    let len = v.chars().count();
    if len > max_len {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(v)
}

/// Comma separated list, blanks dropped
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').filter_map(optional_text).collect()
}

// ── Numbers ─────────────────────────────────────────────────────────

/// Parsed amount, or `None` when blank
pub fn optional_amount(value: &str, field: &str) -> AppResult<Option<Decimal>> {
    let Some(v) = optional_text(value) else {
        return Ok(None);
    };
    let amount = Decimal::from_str(&v).map_err(|_| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("{field} must be a number"))
            .with_detail("field", field)
    })?;
    if amount.is_sign_negative() {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must not be negative"),
        ));
    }
    Ok(Some(amount))
}

/// Parsed amount that must be present
pub fn required_amount(value: &str, field: &str, code: ErrorCode) -> AppResult<Decimal> {
    optional_amount(value, field)?.ok_or_else(|| AppError::new(code))
}

// ── JSON inputs ─────────────────────────────────────────────────────

/// Parsed free-form JSON (rules, meta), or `None` when blank
pub fn parse_json_field(value: &str) -> AppResult<Option<Value>> {
    let Some(v) = optional_text(value) else {
        return Ok(None);
    };
    serde_json::from_str(&v).map(Some).map_err(|e| {
        AppError::new(ErrorCode::InvalidRulesJson).with_detail("cause", e.to_string())
    })
}

// ── Date-time inputs ────────────────────────────────────────────────

const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// A date-time input as a UTC timestamp (`2026-03-01T04:00:00.000Z`), or
/// `None` when blank. RFC 3339 values keep their offset; values without one
/// are read in the local time zone.
pub fn optional_datetime(value: &str, field: &str) -> AppResult<Option<String>> {
    let Some(v) = optional_text(value) else {
        return Ok(None);
    };
    let invalid = || {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("{field} must be a date and time, e.g. 2026-03-01T09:30"),
        )
    };
    let utc = match DateTime::parse_from_rfc3339(&v) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => LOCAL_DATETIME_FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(&v, f).ok())
            .and_then(|naive| naive.and_local_timezone(Local).earliest())
            .ok_or_else(invalid)?
            .with_timezone(&Utc),
    };
    Ok(Some(utc.to_rfc3339_opts(SecondsFormat::Millis, true)))
}

// ── Codes ───────────────────────────────────────────────────────────

/// Entity code: trimmed and upper-cased
pub fn normalize_code(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Unit codes: 2-32 chars, letters, digits and hyphen, starting alphanumeric
pub fn validate_unit_code(value: &str) -> AppResult<String> {
    let code = normalize_code(value);
    if code.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Unit code is required",
        ));
    }
    let mut chars = code.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
    let len = code.chars().count();
    if !first_ok || !rest_ok || !(2..=32).contains(&len) {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            "Code must be 2-32 chars, letters/numbers/hyphen (example: OT-1, TH01, LAB1)",
        ));
    }
    Ok(code)
}

/// Policy codes: upper-case, anything outside `[A-Z0-9_]` becomes `_`,
/// runs of `_` collapse, at most 64 chars
pub fn normalize_policy_code(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.trim().to_uppercase().chars() {
        let c = if c.is_ascii_uppercase() || c.is_ascii_digit() { c } else { '_' };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.chars().take(MAX_POLICY_CODE_LEN).collect()
}
