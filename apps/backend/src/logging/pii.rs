//! Masking of requester contact details before they reach the log.

use std::borrow::Cow;
use std::fmt;

use lazy_regex::regex;
use regex::Captures;

fn mask_emails(input: &str) -> Cow<'_, str> {
    regex!(r"\b([A-Za-z0-9._%+-])[A-Za-z0-9._%+-]*(@[A-Za-z0-9.-]+\.[A-Za-z]+)\b")
        .replace_all(input, "$1***$2")
}

/// Bearer tokens and form keys: long base64-ish runs.
fn mask_tokens(input: &str) -> Cow<'_, str> {
    regex!(r"\b[A-Za-z0-9+/]{16,}={0,2}").replace_all(input, "[REDACTED_TOKEN]")
}

/// Form relay ids in `/f/<id>` endpoint paths.
fn mask_form_ids(input: &str) -> Cow<'_, str> {
    regex!(r"/f/[A-Za-z0-9]+").replace_all(input, "/f/[REDACTED_FORM]")
}

/// Seven to fifteen digits, optionally `+`-prefixed or space separated.
/// Keeps the last two digits.
fn mask_phones(input: &str) -> Cow<'_, str> {
    regex!(r"\+?\b\d(?: ?\d){6,14}\b").replace_all(input, |caps: &Captures| {
        let digits: Vec<char> = caps[0].chars().filter(char::is_ascii_digit).collect();
        let tail: String = digits[digits.len().saturating_sub(2)..].iter().collect();
        format!("***{tail}")
    })
}

pub fn redact(input: &str) -> String {
    let masked = mask_emails(input);
    let masked = mask_tokens(&masked);
    let masked = mask_form_ids(&masked);
    mask_phones(&masked).into_owned()
}

/// Formats the wrapped text through [`redact`]. Use in `tracing` fields:
/// `requester = %Redacted(&email)`.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
