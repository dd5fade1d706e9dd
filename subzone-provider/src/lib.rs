//! # subzone-provider
//!
//! External DNS client and error classification used by subzone.
//!
//! The crate exposes one capability, [`ExternalDnsClient`], and the closed failure taxonomy
//! every implementation reports through, [`ProviderError`]. Raw provider messages are classified
//! by an ordered phrase table ([`CLASSIFICATION_RULES`]) so callers can decide between aborting a
//! mutation and degrading to local-only storage ([`ProviderError::is_fatal`]).
//!
//! ## Feature Flags
//!
//! - **`cloudflare`** *(default)*: Enable [`CloudflareClient`].
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use subzone_provider::{CloudflareClient, ExternalDnsClient, RecordType, Zone, ZoneCredentials};
//!
//! # async fn example() -> subzone_provider::Result<()> {
//! let client = CloudflareClient::new();
//! let zone = Zone::new(
//!     "example.com",
//!     ZoneCredentials::new("cf-api-token-0123456789", "0123456789abcdef0123456789abcdef"),
//! );
//!
//! client.verify_credentials(&zone.credentials).await?;
//! let record = client
//!     .create_record(&zone, "api", RecordType::Cname, "target.example.net")
//!     .await?;
//! println!("created {} ({})", record.name, record.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Only [`ProviderError::RecordConflict`], [`ProviderError::PermissionDenied`] and
//! [`ProviderError::RateLimited`] are fatal. Requests are never retried inside this crate.

mod classifier;
mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use classifier::{
    CLASSIFICATION_RULES, ClassificationRule, ProviderErrorKind, classify, classify_with,
};
pub use error::{ProviderError, Result};
pub use traits::ExternalDnsClient;
pub use types::{
    ExternalRecord, MIN_CREDENTIAL_LEN, RecordType, UnsupportedRecordType, Zone,
    ZoneCredentials, ZoneInfo,
};
pub use utils::log_sanitizer::mask_secret;

pub use providers::common::{normalize_domain_name, relative_to_full_name};

#[cfg(feature = "cloudflare")]
pub use providers::{CF_API_BASE, CloudflareClient};
