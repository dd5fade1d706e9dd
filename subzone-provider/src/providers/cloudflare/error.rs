//! Cloudflare error mapping

use crate::classifier::{ProviderErrorKind, classify};
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::CloudflareClient;

/// Cloudflare error codes consulted when the message itself matches no classification phrase.
///
/// Only fallback-eligible kinds appear here: a code alone never makes a failure fatal.
/// Reference: <https://developers.cloudflare.com/api/>
const CODE_HINTS: &[(&str, ProviderErrorKind)] = &[
    // 1000: Invalid API Token
    // 6003: Invalid request headers
    // 6103: Invalid format for X-Auth-Key header
    // 6111: Invalid format for Authorization header
    ("1000", ProviderErrorKind::InvalidToken),
    ("6003", ProviderErrorKind::InvalidToken),
    ("6103", ProviderErrorKind::InvalidToken),
    ("6111", ProviderErrorKind::InvalidToken),
    // 1001: Invalid zone identifier
    // 7000: No route for that URI
    // 7003: Could not route to /zones/..., perhaps your object identifier is invalid?
    ("1001", ProviderErrorKind::ZoneNotFound),
    ("7000", ProviderErrorKind::ZoneNotFound),
    ("7003", ProviderErrorKind::ZoneNotFound),
    // 10000: Authentication error
    ("10000", ProviderErrorKind::AuthenticationFailed),
    ("401", ProviderErrorKind::AuthenticationFailed),
];

impl ProviderErrorMapper for CloudflareClient {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    /// Phrase table first, error code second.
    fn classify_raw(&self, raw: &RawApiError) -> ProviderErrorKind {
        match classify(&raw.message) {
            ProviderErrorKind::Unknown => raw
                .code
                .as_deref()
                .and_then(|code| {
                    CODE_HINTS
                        .iter()
                        .find(|(hint, _)| *hint == code)
                        .map(|(_, kind)| *kind)
                })
                .unwrap_or(ProviderErrorKind::Unknown),
            kind => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::traits::ErrorContext;

    fn client() -> CloudflareClient {
        CloudflareClient::new()
    }

    fn ctx() -> ErrorContext {
        ErrorContext {
            record_name: Some("api.example.com".to_string()),
            zone_id: Some("zone-abcdef-123".to_string()),
        }
    }

    #[test]
    fn provider_name() {
        assert_eq!(client().provider_name(), "cloudflare");
    }

    #[test]
    fn message_phrase_wins_over_code() {
        // Code 10000 hints AuthenticationFailed, but the message names the token.
        let err = client().map_error(RawApiError::with_code("10000", "Invalid API Token"), ctx());
        assert!(matches!(err, ProviderError::InvalidToken { .. }));
    }

    #[test]
    fn code_hint_zone_not_found() {
        let err = client().map_error(
            RawApiError::with_code("7003", "Could not route to /zones/xyz"),
            ctx(),
        );
        assert!(matches!(
            err,
            ProviderError::ZoneNotFound { ref zone_id, .. } if zone_id == "zone-abcdef-123"
        ));
    }

    #[test]
    fn codes_alone_never_make_a_failure_fatal() {
        // 971 (throttling), 9109 (unauthorized) and 81057 (identical record) carry no phrase.
        for (code, message) in [
            ("971", "Please wait and consider throttling your request speed"),
            ("9109", "Unauthorized to access requested resource"),
            ("81057", "Identical record detected."),
        ] {
            let err = client().map_error(RawApiError::with_code(code, message), ctx());
            assert!(
                matches!(err, ProviderError::Unknown { ref raw_code, .. } if raw_code.as_deref() == Some(code)),
                "{code}: {err:?}"
            );
            assert!(err.is_fallback_eligible(), "{code}");
        }
    }

    #[test]
    fn capitalised_permission_message_falls_back() {
        let err = client().map_error(RawApiError::with_code("9109", "Permission denied"), ctx());
        assert!(err.is_fallback_eligible(), "{err:?}");
    }

    #[test]
    fn hint_table_has_no_fatal_kind() {
        assert!(CODE_HINTS.iter().all(|(_, kind)| !kind.is_fatal()));
    }

    #[test]
    fn code_hint_invalid_headers() {
        let err = client().map_error(
            RawApiError::with_code("6003", "Invalid request headers"),
            ctx(),
        );
        assert!(matches!(err, ProviderError::InvalidToken { .. }));
    }

    #[test]
    fn unknown_code_stays_unknown() {
        let err = client().map_error(RawApiError::with_code("99999", "Something odd"), ctx());
        assert!(matches!(
            err,
            ProviderError::Unknown { ref raw_code, .. } if raw_code.as_deref() == Some("99999")
        ));
        assert!(err.is_fallback_eligible());
    }

    #[test]
    fn missing_code_uses_phrases_only() {
        let err = client().map_error(RawApiError::new("Authentication error"), ctx());
        assert!(matches!(err, ProviderError::Unknown { .. }));
        let err = client().map_error(RawApiError::new("request failed authentication"), ctx());
        assert!(matches!(err, ProviderError::AuthenticationFailed { .. }));
    }
}
