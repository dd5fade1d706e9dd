//! Provider error classification.
//!
//! Raw provider messages are matched against [`CLASSIFICATION_RULES`] in order; the first rule
//! with a phrase contained in the message wins. Matching is case-sensitive, so a phrase only
//! matches with the exact spelling Cloudflare uses. Messages that match nothing classify as
//! [`ProviderErrorKind::Unknown`], which never blocks a fallback.

use serde::{Deserialize, Serialize};

/// Closed taxonomy of provider failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderErrorKind {
    InvalidToken,
    ZoneNotFound,
    RecordConflict,
    RateLimited,
    AuthenticationFailed,
    PermissionDenied,
    Unknown,
}

impl ProviderErrorKind {
    /// Fatal kinds abort the mutation; all others allow degrading to local storage.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(
            self,
            Self::RecordConflict | Self::PermissionDenied | Self::RateLimited
        )
    }

    /// Human-readable message shown to callers.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::InvalidToken => "Invalid API token. Please check your credentials.",
            Self::ZoneNotFound => "Invalid zone ID. Please verify the zone identifier.",
            Self::RecordConflict => "DNS record already exists at the provider.",
            Self::RateLimited => "Provider API rate limit exceeded. Please try again later.",
            Self::AuthenticationFailed => {
                "Provider authentication failed. Please check your API token."
            }
            Self::PermissionDenied => {
                "Insufficient permissions. Please ensure the API token has DNS edit permissions."
            }
            Self::Unknown => "Provider API error. Please check your configuration.",
        }
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub kind: ProviderErrorKind,
    /// Exact substrings; any one of them matching selects `kind`.
    pub phrases: &'static [&'static str],
}

/// Priority-ordered classification table.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        kind: ProviderErrorKind::InvalidToken,
        phrases: &["Invalid API Token"],
    },
    ClassificationRule {
        kind: ProviderErrorKind::ZoneNotFound,
        phrases: &["zone not found", "Zone ID"],
    },
    ClassificationRule {
        kind: ProviderErrorKind::RecordConflict,
        phrases: &["already exists"],
    },
    ClassificationRule {
        kind: ProviderErrorKind::RateLimited,
        phrases: &["rate limit"],
    },
    ClassificationRule {
        kind: ProviderErrorKind::AuthenticationFailed,
        phrases: &["authentication"],
    },
    ClassificationRule {
        kind: ProviderErrorKind::PermissionDenied,
        phrases: &["permission"],
    },
];

/// Classify a raw provider message.
#[must_use]
pub fn classify(message: &str) -> ProviderErrorKind {
    classify_with(CLASSIFICATION_RULES, message)
}

/// Classify against an explicit rule table.
#[must_use]
pub fn classify_with(rules: &[ClassificationRule], message: &str) -> ProviderErrorKind {
    rules
        .iter()
        .find(|rule| rule.phrases.iter().any(|phrase| message.contains(phrase)))
        .map_or(ProviderErrorKind::Unknown, |rule| rule.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_api_token() {
        assert_eq!(
            classify("Invalid API Token"),
            ProviderErrorKind::InvalidToken
        );
    }

    #[test]
    fn zone_not_found_phrases() {
        assert_eq!(
            classify("zone not found for request"),
            ProviderErrorKind::ZoneNotFound
        );
        assert_eq!(
            classify("Invalid Zone ID supplied"),
            ProviderErrorKind::ZoneNotFound
        );
    }

    #[test]
    fn record_conflict() {
        assert_eq!(
            classify("An A, AAAA, or CNAME record with that host already exists."),
            ProviderErrorKind::RecordConflict
        );
    }

    #[test]
    fn rate_limit() {
        assert_eq!(
            classify("You have exceeded the rate limit"),
            ProviderErrorKind::RateLimited
        );
    }

    #[test]
    fn authentication() {
        assert_eq!(
            classify("request failed authentication"),
            ProviderErrorKind::AuthenticationFailed
        );
    }

    #[test]
    fn permission() {
        assert_eq!(
            classify("token lacks permission to edit DNS"),
            ProviderErrorKind::PermissionDenied
        );
    }

    #[test]
    fn unmatched_is_unknown() {
        assert_eq!(classify("socket hang up"), ProviderErrorKind::Unknown);
        assert_eq!(classify(""), ProviderErrorKind::Unknown);
    }

    #[test]
    fn matching_is_case_sensitive() {
        for message in [
            "Permission denied",
            "Rate limit reached",
            "Record Already Exists",
            "Authentication error",
            "invalid api token",
        ] {
            let kind = classify(message);
            assert_eq!(kind, ProviderErrorKind::Unknown, "{message}");
            assert!(!kind.is_fatal(), "{message}");
        }
    }

    #[test]
    fn first_match_wins() {
        // Matches both InvalidToken and AuthenticationFailed; InvalidToken is listed first.
        assert_eq!(
            classify("authentication error: Invalid API Token"),
            ProviderErrorKind::InvalidToken
        );
        // Matches both RecordConflict and PermissionDenied.
        assert_eq!(
            classify("permission check skipped: record already exists"),
            ProviderErrorKind::RecordConflict
        );
    }

    #[test]
    fn table_order_is_stable() {
        let order: Vec<_> = CLASSIFICATION_RULES.iter().map(|r| r.kind).collect();
        assert_eq!(
            order,
            vec![
                ProviderErrorKind::InvalidToken,
                ProviderErrorKind::ZoneNotFound,
                ProviderErrorKind::RecordConflict,
                ProviderErrorKind::RateLimited,
                ProviderErrorKind::AuthenticationFailed,
                ProviderErrorKind::PermissionDenied,
            ]
        );
    }

    #[test]
    fn custom_table() {
        let rules = [ClassificationRule {
            kind: ProviderErrorKind::PermissionDenied,
            phrases: &["Forbidden"],
        }];
        assert_eq!(
            classify_with(&rules, "403 Forbidden"),
            ProviderErrorKind::PermissionDenied
        );
        assert_eq!(
            classify_with(&rules, "Invalid API Token"),
            ProviderErrorKind::Unknown
        );
    }

    #[test]
    fn fatal_kinds() {
        assert!(ProviderErrorKind::RecordConflict.is_fatal());
        assert!(ProviderErrorKind::PermissionDenied.is_fatal());
        assert!(ProviderErrorKind::RateLimited.is_fatal());
        assert!(!ProviderErrorKind::InvalidToken.is_fatal());
        assert!(!ProviderErrorKind::ZoneNotFound.is_fatal());
        assert!(!ProviderErrorKind::AuthenticationFailed.is_fatal());
        assert!(!ProviderErrorKind::Unknown.is_fatal());
    }
}
