//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;
use chrono::NaiveDate;
use regex::Regex;

/// Validate an email address in the loose `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex"))
        .is_match(email)
}

/// Validate a phone number: digits only, 10 to 15 of them
pub fn is_valid_phone(phone: &str) -> bool {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE
        .get_or_init(|| Regex::new(r"^[0-9]{10,15}$").expect("phone regex"))
        .is_match(phone)
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Treat empty or whitespace-only strings as absent
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Escape `LIKE` wildcards so user input matches literally
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a `%value%` pattern for substring matching
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@kampus.ac.id"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("not an email"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("0812345678"));
        assert!(is_valid_phone("081234567890123"));
        assert!(!is_valid_phone("081234567"));
        assert!(!is_valid_phone("0812345678901234"));
        assert!(!is_valid_phone("+628123456789"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-01-01"), NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(parse_date(" 2025-12-31 "), NaiveDate::from_ymd_opt(2025, 12, 31));
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(parse_date("tomorrow"), None);
        assert_eq!(parse_date("01/01/2025"), None);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Sains ")), Some("Sains"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_like_escaping() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(contains_pattern("Sains"), "%Sains%");
    }
}
