//! Construction of the text that is actually signed.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Default lifetime of a signature, in seconds.
pub const DEFAULT_VALIDITY_SECS: i64 = 3600;

/// The `(created)` / `(expires)` pair covered by a signature.
///
/// No ordering between the two is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub created: i64,
    pub expires: i64,
}

impl ValidityWindow {
    /// Fills in whichever bound is missing from the current time. With
    /// neither given the window starts now and lasts [`DEFAULT_VALIDITY_SECS`].
    #[must_use]
    pub fn with_defaults(created: Option<i64>, expires: Option<i64>) -> Self {
        let now = Utc::now().timestamp();
        Self {
            created: created.unwrap_or(now),
            expires: expires.unwrap_or(now + DEFAULT_VALIDITY_SECS),
        }
    }
}

/// Formats `digest` and the validity window into the three-line signing string.
///
/// Missing bounds default to now and now plus one hour. Signer and verifier
/// must pass the same values or the signature will not match.
#[must_use]
pub fn build_signing_string(digest: &str, created: Option<i64>, expires: Option<i64>) -> String {
    let window = ValidityWindow::with_defaults(created, expires);
    format_signing_string(digest, &window)
}

pub(crate) fn format_signing_string(digest: &str, window: &ValidityWindow) -> String {
    format!(
        "(created): {}\n(expires): {}\ndigest: BLAKE-512={}",
        window.created, window.expires, digest
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_template() {
        let signing_string = build_signing_string("abc=", Some(1689620709), Some(1689624309));
        assert_eq!(
            signing_string,
            "(created): 1689620709\n(expires): 1689624309\ndigest: BLAKE-512=abc="
        );
    }

    #[test]
    fn test_defaults_span_one_hour() {
        let window = ValidityWindow::with_defaults(None, None);
        assert_eq!(window.expires - window.created, DEFAULT_VALIDITY_SECS);
    }

    #[test]
    fn test_partial_defaults() {
        let window = ValidityWindow::with_defaults(Some(10), None);
        assert_eq!(window.created, 10);
        assert!(window.expires > 10);

        let window = ValidityWindow::with_defaults(None, Some(5));
        assert_eq!(window.expires, 5);
        assert!(window.created > 5, "ordering is not enforced");
    }

    #[test]
    fn test_default_created_is_current_time() {
        let before = Utc::now().timestamp();
        let signing_string = build_signing_string("d", None, Some(0));
        let after = Utc::now().timestamp();

        let created: i64 = signing_string
            .lines()
            .next()
            .and_then(|line| line.strip_prefix("(created): "))
            .and_then(|value| value.parse().ok())
            .expect("should have a created line");
        assert!(created >= before && created <= after);
    }
}
