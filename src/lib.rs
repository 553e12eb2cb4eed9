/*!
twitter-oauth1: a blocking Twitter REST client built on reqwest ♡ oauth1-request.

# Overview

This library talks to the Twitter 1.1 JSON API on behalf of a user.
Every request is signed with OAuth 1.0a (HMAC-SHA1) through the
[oauth1-request](https://crates.io/crates/oauth1-request) crate and sent with
[reqwest](https://crates.io/crates/reqwest)'s blocking client. Responses are
decoded into `serde_json` containers, either a [`Map`] or a [`List`].

# How to use

## Basic usecase 1 - sending the tweet

```no_run
use twitter_oauth1::{Client, Credentials, Params};

# fn main() -> twitter_oauth1::Result<()> {
let client = Client::new(Credentials::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]"))?;
client.set_user_credentials(Credentials::new("[ACCESS_TOKEN]", "[TOKEN_SECRET]"));

let tweet = client.update("Hello, Twitter!", Params::new())?;
println!("posted {}", tweet["id_str"]);
# Ok(())
# }
```

## Basic usecase 2 - Acquiring OAuth token & secret

```no_run
use twitter_oauth1::{console_prompt, AuthorizationFlow, Client, Credentials};

# fn main() -> twitter_oauth1::Result<()> {
let client = Client::new(Credentials::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]"))?;

// step 1: acquire request token, step 2: ask for the PIN,
// step 3: exchange it for the access token
let access = AuthorizationFlow::new(&client).run(console_prompt)?;
println!(
    "your token and secret is: \n token: {}\n secret: {}",
    access.identifier, access.secret
);
# Ok(())
# }
```
*/
mod auth;
mod client;
mod config;
mod credentials;
mod endpoints;
mod error;
mod multipart;
mod params;
mod request;
mod secrets;
mod signer;
mod token_reader;

// exposed to external program
pub use auth::{console_prompt, AuthorizationFlow, AuthorizationState, TemporaryCredentials};
pub use client::Client;
pub use config::Config;
pub use credentials::{CredentialStore, Credentials};
pub use error::{Error, Result, TokenReaderError, TokenReaderResult, ValidationError};
pub use multipart::MultipartBody;
pub use params::Params;
pub use request::{RequestBuilder, RequestDescriptor};
pub use secrets::{Secrets, SecretsProvider};
pub use signer::{OAuthParameters, Signer};
pub use token_reader::{TokenReader, TokenResponse};

/// JSON object returned by map-shaped endpoints.
pub type Map = serde_json::Map<String, serde_json::Value>;
/// JSON array returned by list-shaped endpoints.
pub type List = Vec<serde_json::Value>;
pub use serde_json::Value;

// provider endpoints
/// Prefix of every versioned API path.
pub const API_PREFIX: &str = "https://api.twitter.com/1.1/";
/// Temporary credential request URI.
pub const REQUEST_TOKEN_URL: &str = "https://api.twitter.com/oauth/request_token";
/// Resource owner authorization URI.
pub const AUTHORIZE_URL: &str = "https://api.twitter.com/oauth/authenticate";
/// Token request URI.
pub const ACCESS_TOKEN_URL: &str = "https://api.twitter.com/oauth/access_token";

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_token_secret`.
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";
pub(crate) const OOB_CALLBACK: &str = "oob";
pub(crate) const MEDIA_FIELD: &str = "media[]";
