//! Email Address

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9.-]+$").unwrap();
}

/// Returns `true` if `raw` is a non-blank string that matches the address pattern.
///
/// The pattern is matched against `raw` as given, so surrounding whitespace
/// makes an address invalid rather than being trimmed away.
pub fn is_valid_email(raw: &str) -> bool {
    !raw.trim().is_empty() && EMAIL_REGEX.is_match(raw)
}
