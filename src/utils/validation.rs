//! Format validators. Every check answers with a plain bool and never raises.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

use super::text;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    )
    .unwrap();
    static ref MAC: Regex = Regex::new(
        r"^(?:[0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2}$|^(?:[0-9a-fA-F]{2}-){5}[0-9a-fA-F]{2}$|^(?:[0-9a-fA-F]{4}\.){2}[0-9a-fA-F]{4}$"
    )
    .unwrap();
}

/// Whether `value` already is PascalCase.
pub fn is_pascal_case(value: &str) -> bool {
    value == text::pascal_case(value)
}

/// Whether `value` already is camelCase.
pub fn is_camel_case(value: &str) -> bool {
    value == text::camel_case(value)
}

/// Whether `value` already is snake_case.
pub fn is_snake_case(value: &str) -> bool {
    value == text::snake_case(value)
}

/// Whether `value` already is kebab-case.
pub fn is_kebab_case(value: &str) -> bool {
    value == text::kebab_case(value)
}

/// Strict `YYYY-MM-DD` calendar date; impossible dates are rejected.
pub fn is_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Strict `HH:MM:SS` time of day.
pub fn is_time(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok()
}

/// Strict `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn is_datetime(value: &str) -> bool {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
}

/// Pragmatic mailbox shape: local part, `@`, dotted host.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// `http`/`https` URL shape with a non-empty host.
pub fn is_url(value: &str) -> bool {
    let rest = if let Some(rest) = value.strip_prefix("http://") {
        rest
    } else if let Some(rest) = value.strip_prefix("https://") {
        rest
    } else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    !host.is_empty()
}

/// IPv4 or IPv6 literal.
pub fn is_ip(value: &str) -> bool {
    value.parse::<std::net::IpAddr>().is_ok()
}

/// MAC address in colon, hyphen or dotted-quad grouping.
pub fn is_mac_address(value: &str) -> bool {
    MAC.is_match(value)
}
