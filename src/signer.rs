use std::borrow::Cow;

use http::Method;
use oauth1_request::signer::Signer as OAuthSigner;
use oauth1_request::{HmacSha1, Options};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::{SecretsProvider, OAUTH_KEY_PREFIX};

// RFC 3986 unreserved characters pass through, everything else is escaped
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(s: &str) -> String {
    utf8_percent_encode(s, UNRESERVED).to_string()
}

/// Computes `Authorization: OAuth ...` header values with HMAC-SHA1.
#[derive(Debug, Clone)]
pub struct Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    secrets: &'a TSecretsProvider,
    parameters: OAuthParameters<'a>,
}

impl<'a, TSecretsProvider> Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    pub fn new(secrets: &'a TSecretsProvider, parameters: OAuthParameters<'a>) -> Self {
        Signer {
            secrets,
            parameters,
        }
    }

    /// Signs `method url` over `pairs` (decoded query and form parameters)
    /// and returns the header value.
    ///
    /// `url` must not carry a query; its parameters belong in `pairs`.
    pub fn generate_signature<'p, I>(self, method: Method, url: Url, pairs: I) -> String
    where
        I: IntoIterator<Item = (Cow<'p, str>, Cow<'p, str>)>,
    {
        let (consumer_key, consumer_secret) = self.secrets.get_consumer_key_pair();
        let (token, token_secret) = self.secrets.get_token_option_pair();
        let options = self.parameters.build_options(token);

        // protocol parameters are supplied by the signer itself;
        // ordering is defined over the encoded pairs
        let mut encoded: Vec<(String, String)> = pairs
            .into_iter()
            .filter(|(k, _)| !k.starts_with(OAUTH_KEY_PREFIX))
            .map(|(k, v)| (encode(&k), encode(&v)))
            .collect();
        encoded.sort();

        // oauth1-request takes parameters in ascending order, with the
        // oauth_* block inserted at its alphabetical position
        let split = encoded.partition_point(|(k, _)| k.as_str() < OAUTH_KEY_PREFIX);
        let (before_oauth, after_oauth) = encoded.split_at(split);

        let mut signer = OAuthSigner::with_signature_method(
            HmacSha1,
            method.as_str(),
            url,
            consumer_secret,
            token_secret,
        );
        for (key, value) in before_oauth {
            signer.parameter_encoded(key, value);
        }
        let mut signer = signer.oauth_parameters(consumer_key, &options);
        for (key, value) in after_oauth {
            signer.parameter_encoded(key, value);
        }

        signer.finish().authorization
    }
}

/// Overrides for the `oauth_*` protocol parameters of one request.
///
/// Nonce and timestamp are generated per request unless pinned here.
#[derive(Debug, Clone, Default)]
pub struct OAuthParameters<'a> {
    callback: Option<Cow<'a, str>>,
    nonce: Option<Cow<'a, str>>,
    timestamp: Option<u64>,
    verifier: Option<Cow<'a, str>>,
    version: bool,
}

impl<'a> OAuthParameters<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    /// set the oauth_callback value
    pub fn callback<T>(self, callback: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// set the oauth_nonce value
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value
    pub fn timestamp<T>(self, timestamp: T) -> Self
    where
        T: Into<u64>,
    {
        OAuthParameters {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }

    /// set the oauth_verifier value
    pub fn verifier<T>(self, verifier: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            verifier: Some(verifier.into()),
            ..self
        }
    }

    /// set the oauth_version value (boolean)
    ///
    /// # Note
    /// When `true`, oauth_version is sent as "1.0".
    /// Otherwise it is left out, which the protocol allows.
    pub fn version<T>(self, version: T) -> Self
    where
        T: Into<bool>,
    {
        OAuthParameters {
            version: version.into(),
            ..self
        }
    }

    fn build_options<'b>(&'b self, token: Option<&'b str>) -> Options<'b> {
        let mut opt = Options::new();

        // NOTE: items must be added by alphabetical order

        if let Some(ref callback) = self.callback {
            opt.callback(callback.as_ref());
        }
        if let Some(ref nonce) = self.nonce {
            opt.nonce(nonce.as_ref());
        }
        if let Some(timestamp) = self.timestamp {
            opt.timestamp(timestamp);
        }
        if let Some(token) = token {
            opt.token(token);
        }
        if let Some(ref verifier) = self.verifier {
            opt.verifier(verifier.as_ref());
        }
        opt.version(self.version);

        opt
    }
}

/// Decoded `oauth_signature` of an `Authorization` header value.
#[cfg(test)]
pub(crate) fn extract_signature(auth_header: &str) -> String {
    extract_oauth_param(auth_header, "oauth_signature").unwrap()
}

#[cfg(test)]
pub(crate) fn extract_oauth_param(auth_header: &str, key: &str) -> Option<String> {
    let content = auth_header.strip_prefix("OAuth ")?;
    content
        .split(',')
        .filter_map(|item| {
            let mut kv = item.splitn(2, '=');
            Some((kv.next()?, kv.next()?))
        })
        .find(|(k, _)| *k == key)
        .map(|(_, v)| {
            percent_encoding::percent_decode_str(v.trim_matches('"'))
                .decode_utf8_lossy()
                .to_string()
        })
}
