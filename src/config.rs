use std::env;

use crate::error::ApiError;

const DEFAULT_SITE_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Base URL of the academy backend, without a trailing slash.
    pub base_url: String,
    /// Public URL of the site itself, used to build payment return URLs.
    pub site_url: String,
    /// Publishable key handed to the payment provider's browser SDK. Never
    /// used to sign anything on this side.
    pub payment_publishable_key: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: strip_trailing_slash(base_url.into()),
            site_url: DEFAULT_SITE_URL.to_string(),
            payment_publishable_key: None,
        }
    }

    pub fn new_from_env() -> Result<Self, ApiError> {
        let base_url = env::var("COURTSIDE_API_URL")
            .map_err(|_| ApiError::Config("COURTSIDE_API_URL is not set".to_string()))?;
        let site_url = env::var("COURTSIDE_SITE_URL")
            .unwrap_or_else(|_| DEFAULT_SITE_URL.to_string());
        let payment_publishable_key = env::var("COURTSIDE_PAYMENT_KEY").ok();

        Ok(Self {
            base_url: strip_trailing_slash(base_url),
            site_url: strip_trailing_slash(site_url),
            payment_publishable_key,
        })
    }

    /// Joins an endpoint path (starting with `/`) onto the backend base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn strip_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
