use serde::Serialize;
use std::fmt;

const COUNTRY_PREFIX: &str = "+91";
const MOBILE_DIGITS: usize = 10;

/// Strips whitespace, a leading `+91`, and hyphens from a raw contact cell.
///
/// The result is not guaranteed to be numeric; use [`MobileNumber::parse`] when
/// a dialable number is required.
pub fn normalize_phone(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let local = compact.strip_prefix(COUNTRY_PREFIX).unwrap_or(&compact);
    local.chars().filter(|c| *c != '-').collect()
}

/// A 10-digit Indian mobile number, without country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MobileNumber(String);

impl MobileNumber {
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = normalize_phone(raw);
        if digits.len() == MOBILE_DIGITS && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(digits))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
