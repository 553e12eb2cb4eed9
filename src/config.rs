use std::time::Duration;

use url::Url;

use crate::{ACCESS_TOKEN_URL, API_PREFIX, AUTHORIZE_URL, REQUEST_TOKEN_URL};

/// Endpoints and switches for a [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix joined with every endpoint path, ending in `/`
    pub api_prefix: String,
    /// Temporary credential request URI
    pub request_token_url: String,
    /// Page where the user grants access and receives a PIN
    pub authorize_url: String,
    /// Token request URI
    pub access_token_url: String,
    /// Log every request and response
    pub debug: bool,
    /// Whole-request timeout applied by the HTTP client
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_prefix: API_PREFIX.to_string(),
            request_token_url: REQUEST_TOKEN_URL.to_string(),
            authorize_url: AUTHORIZE_URL.to_string(),
            access_token_url: ACCESS_TOKEN_URL.to_string(),
            debug: false,
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl Config {
    pub fn with_api_prefix<T: Into<String>>(mut self, prefix: T) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Points all three OAuth endpoints at `base`, e.g. a local test server.
    pub fn with_oauth_base(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.request_token_url = format!("{}/oauth/request_token", base);
        self.authorize_url = format!("{}/oauth/authenticate", base);
        self.access_token_url = format!("{}/oauth/access_token", base);
        self
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// `prefix + path + ".json"`, with slashes around `path` trimmed.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}{}.json",
            self.api_prefix,
            path.trim_matches('/')
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_trims_path() {
        let config = Config::default();
        assert_eq!(
            config.endpoint_url("/statuses/home_timeline/").unwrap().as_str(),
            "https://api.twitter.com/1.1/statuses/home_timeline.json"
        );
        assert_eq!(
            config.endpoint_url("users/show").unwrap().as_str(),
            "https://api.twitter.com/1.1/users/show.json"
        );
    }

    #[test]
    fn malformed_prefix_is_an_error() {
        let config = Config::default().with_api_prefix("not a url/");
        assert!(config.endpoint_url("account/verify_credentials").is_err());
    }

    #[test]
    fn oauth_base_rewrites_endpoints() {
        let config = Config::default().with_oauth_base("http://127.0.0.1:8080/");
        assert_eq!(
            config.request_token_url,
            "http://127.0.0.1:8080/oauth/request_token"
        );
        assert_eq!(config.authorize_url, "http://127.0.0.1:8080/oauth/authenticate");
        assert_eq!(
            config.access_token_url,
            "http://127.0.0.1:8080/oauth/access_token"
        );
    }
}
