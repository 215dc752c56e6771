// Input format validation
// Permissive email shape check, intentionally not RFC-complete

use once_cell::sync::Lazy;
use regex::Regex;

// local@domain.tld with at least a two-letter TLD.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("invalid email regex")
});

/// Check that `email` has the shape `local@domain.tld`.
///
/// Deliberately permissive: good enough to reject obvious typos at the API
/// boundary, not a substitute for address verification.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
