//! HTTP client construction
//!
//! All outbound requests go through a single reqwest::Client configured
//! here. System proxy env vars (HTTP_PROXY, HTTPS_PROXY, NO_PROXY) are
//! honored by reqwest's default proxy handling.

use reqwest::Client;
use std::time::Duration;

/// Default per-request timeout for catalog fetches
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a reqwest Client with the given timeout and a versioned user agent
pub fn client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("partscout/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(client_with_timeout(DEFAULT_TIMEOUT).is_ok());
    }
}
