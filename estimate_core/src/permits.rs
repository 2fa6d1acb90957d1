//! # Permit Advisory
//!
//! Flags addresses whose ZIP code is on a fixed list of codes where a
//! building permit has to be mentioned on the quote. This is a static
//! lookup, not a regulatory check.
//!
//! Only runs of exactly 5 digits starting with `21` are considered, whatever
//! surrounds them (`MD21201` counts, `212010` does not). Every such token in
//! the address is checked, so a house number like `21050` does not hide the
//! real ZIP code further along.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::permits::requires_permit;
//!
//! assert!(requires_permit("100 N Charles St, Baltimore, MD 21201"));
//! assert!(!requires_permit("1 Main St, Somewhere, MD 21999"));
//! assert!(!requires_permit("1600 Pennsylvania Ave NW, Washington, DC 20500"));
//! ```

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("digit run pattern is valid"));

fn zip_tokens(address: &str) -> impl Iterator<Item = &str> {
    DIGIT_RUN
        .find_iter(address)
        .map(|m| m.as_str())
        .filter(|run| run.len() == 5 && run.starts_with("21"))
}

/// Baltimore City ZIP codes
pub const BALTIMORE_CITY_ZIPS: &[&str] = &[
    "21201", "21202", "21205", "21206", "21207", "21208", "21209", "21210", "21211", "21212",
    "21213", "21214", "21215", "21216", "21217", "21218", "21222", "21223", "21224", "21225",
    "21226", "21227", "21229", "21230", "21231", "21234", "21236", "21237", "21239", "21251",
];

/// Allow-list of ZIP codes requiring a permit disclosure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermitAdvisory {
    /// Shown on quotes, e.g. "Baltimore City"
    pub jurisdiction: String,
    pub zip_codes: BTreeSet<String>,
}

impl Default for PermitAdvisory {
    fn default() -> Self {
        PermitAdvisory {
            jurisdiction: "Baltimore City".to_string(),
            zip_codes: BALTIMORE_CITY_ZIPS.iter().map(|z| z.to_string()).collect(),
        }
    }
}

impl PermitAdvisory {
    pub fn new(jurisdiction: impl Into<String>, zip_codes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        PermitAdvisory {
            jurisdiction: jurisdiction.into(),
            zip_codes: zip_codes.into_iter().map(Into::into).collect(),
        }
    }

    /// First ZIP code in the address that is on the allow-list.
    pub fn matching_zip(&self, address: &str) -> Option<String> {
        zip_tokens(address)
            .find(|zip| self.zip_codes.contains(*zip))
            .map(str::to_string)
    }

    pub fn requires_permit(&self, address: &str) -> bool {
        self.matching_zip(address).is_some()
    }

    /// Sentence for the quote, if a permit applies.
    pub fn notice(&self, address: &str) -> Option<String> {
        self.matching_zip(address).map(|zip| {
            format!(
                "ZIP code {} is in {}: a building permit may be required for this project.",
                zip, self.jurisdiction
            )
        })
    }
}

/// Check an address against the default (Baltimore City) allow-list.
pub fn requires_permit(address: &str) -> bool {
    static DEFAULT: Lazy<PermitAdvisory> = Lazy::new(PermitAdvisory::default);
    DEFAULT.requires_permit(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_zip_anywhere_in_address() {
        assert!(requires_permit("21201"));
        assert!(requires_permit("Apt 4, 21201 Baltimore"));
        assert!(requires_permit("10 Light St, Baltimore MD 21201-1234"));
        assert!(requires_permit("Baltimore MD21201"));
        assert!(requires_permit("Baltimore,21201,USA"));
        assert!(requires_permit("ZIP:21201x"));
    }

    #[test]
    fn test_unlisted_zip() {
        assert!(!requires_permit("10 Light St, Baltimore MD 21999"));
    }

    #[test]
    fn test_no_matching_token() {
        assert!(!requires_permit("10 Light St, Baltimore MD"));
        assert!(!requires_permit("123 Elm St, Springfield 62704"));
        assert!(!requires_permit(""));
    }

    #[test]
    fn test_token_must_be_five_digits() {
        assert!(!requires_permit("Unit 212010"));
        assert!(!requires_permit("2120 Oak Ave"));
        assert!(!requires_permit("MD212010"));
    }

    #[test]
    fn test_later_token_is_checked() {
        // The house number matches the pattern but is not a listed ZIP
        assert!(requires_permit("21050 Oak Rd, Baltimore MD 21230"));
        assert!(requires_permit("21050 21230"));
    }

    #[test]
    fn test_custom_allow_list() {
        let advisory = PermitAdvisory::new("Testville", ["21999"]);
        assert!(advisory.requires_permit("Somewhere 21999"));
        assert!(!advisory.requires_permit("Baltimore 21201"));
    }

    #[test]
    fn test_notice_names_zip_and_jurisdiction() {
        let advisory = PermitAdvisory::default();
        let notice = advisory.notice("Baltimore, MD 21224").unwrap();
        assert!(notice.contains("21224"));
        assert!(notice.contains("Baltimore City"));
        assert!(advisory.notice("Towson, MD 21286").is_none());
    }
}
