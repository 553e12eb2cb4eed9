// ----------------------------------------------------------------------------
// This source code contains derived artifacts from seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use std::borrow::Cow;

use http::{header::AUTHORIZATION, Method};
use reqwest::blocking::{multipart, RequestBuilder as ReqwestRequestBuilder, Response};
use serde::Serialize;
use url::Url;

use crate::{MultipartBody, OAuthParameters, Params, SecretsProvider, Signer};

/// One API call: verb, endpoint path and parameters.
///
/// The path is relative to the API prefix and carries no `.json` suffix,
/// e.g. `statuses/show/20`.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Params,
    pub form: Params,
    pub multipart: Option<MultipartBody>,
}

impl RequestDescriptor {
    pub fn new<P: Into<String>>(method: Method, path: P) -> Self {
        RequestDescriptor {
            method,
            path: path.into(),
            query: Params::new(),
            form: Params::new(),
            multipart: None,
        }
    }

    pub fn get<P: Into<String>>(path: P) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post<P: Into<String>>(path: P) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    pub fn form(mut self, form: Params) -> Self {
        self.form = form;
        self
    }

    /// Replaces the form body with a multipart upload.
    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.multipart = Some(body);
        self
    }
}

/// A blocking request builder that adds an OAuth `Authorization` header
/// when it is sent.
///
/// Query and form parameters are captured as they are set so the signature
/// covers them. Multipart bodies are not part of the signature.
pub struct RequestBuilder<'a, TSecrets>
where
    TSecrets: SecretsProvider,
{
    method: Method,
    inner: ReqwestRequestBuilder,
    secrets: &'a TSecrets,
    parameters: OAuthParameters<'a>,
    url: Url,
    body: String,
}

impl<'a, TSecrets> RequestBuilder<'a, TSecrets>
where
    TSecrets: SecretsProvider,
{
    pub(crate) fn new(
        builder: ReqwestRequestBuilder,
        method: Method,
        url: Url,
        secrets: &'a TSecrets,
    ) -> Self {
        RequestBuilder {
            inner: builder,
            method,
            url,
            secrets,
            parameters: OAuthParameters::new(),
            body: String::new(),
        }
    }

    /// Pins the `oauth_*` parameters used for this request.
    pub fn oauth_parameters(mut self, parameters: OAuthParameters<'a>) -> Self {
        self.parameters = parameters;
        self
    }

    // ------------------------------------------------------------------------
    // Trapped with the wrapper

    /// Modify the query string of the URL.
    ///
    /// This method appends and does not overwrite. The key will simply show
    /// up twice in the query string if used twice.
    ///
    /// # Note
    /// Parameters that cannot be serialized into a query string are skipped.
    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Self {
        {
            let mut pairs = self.url.query_pairs_mut();
            let serializer = serde_urlencoded::Serializer::new(&mut pairs);
            let _ = query.serialize(serializer);
        }
        // cleanup
        if let Some("") = self.url.query() {
            self.url.set_query(None);
        }
        self.inner = self.inner.query(query);
        self
    }

    /// Send a form body.
    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        match serde_urlencoded::to_string(form) {
            Ok(body) => {
                self.inner = self.inner.form(form);
                self.body = body;
                self
            }
            Err(_) => self.pass_through(|b| b.form(form)),
        }
    }

    /// Sends a multipart/form-data body.
    ///
    /// Note: multipart/form-data is not handled by the OAuth signer.
    pub fn multipart(self, multipart: multipart::Form) -> Self {
        self.pass_through(|b| b.multipart(multipart))
    }

    // ------------------------------------------------------------------------
    // Pass-through to inner builder

    fn pass_through<F>(self, f: F) -> Self
    where
        F: FnOnce(ReqwestRequestBuilder) -> ReqwestRequestBuilder,
    {
        RequestBuilder {
            inner: f(self.inner),
            ..self
        }
    }

    // ------------------------------------------------------------------------
    // Finish building the request and send it to server with OAuth signature

    /// The `Authorization` header value for the request built so far.
    pub fn authorization(&self) -> String {
        let mut base_url = self.url.clone();
        base_url.set_query(None);

        let pairs = self
            .url
            .query_pairs()
            .chain(url::form_urlencoded::parse(self.body.as_bytes()))
            .collect::<Vec<(Cow<str>, Cow<str>)>>();

        Signer::new(self.secrets, self.parameters.clone()).generate_signature(
            self.method.clone(),
            base_url,
            pairs,
        )
    }

    /// Generate an OAuth signature and return the reqwest's `RequestBuilder`.
    pub fn generate_signature(self) -> ReqwestRequestBuilder {
        let signature = self.authorization();
        self.inner.header(AUTHORIZATION, signature)
    }

    /// Signs the request and sends it.
    ///
    /// # Errors
    ///
    /// This method fails if there was an error while sending request,
    /// redirect loop was detected or redirect limit was exhausted.
    pub fn send(self) -> reqwest::Result<Response> {
        self.generate_signature().send()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::extract_signature;
    use crate::Secrets;

    fn builder<'a, T: SecretsProvider>(
        secrets: &'a T,
        method: Method,
        endpoint: &str,
    ) -> RequestBuilder<'a, T> {
        let url = Url::parse(endpoint).unwrap();
        let inner = reqwest::blocking::Client::new().request(method.clone(), url.clone());
        RequestBuilder::new(inner, method, url, secrets)
    }

    #[test]
    fn capture_get_query() {
        let secrets = Secrets::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44");
        let req = builder(&secrets, Method::GET, "https://photos.example.net/photos")
            .query(&[("file", "vacation.jpg"), ("size", "original")]);
        assert_eq!(req.url().query(), Some("file=vacation.jpg&size=original"));

        let req = builder(&secrets, Method::GET, "https://photos.example.net/photos")
            .query(&Params::new());
        assert_eq!(req.url().query(), None);
    }

    #[test]
    fn capture_body() {
        let secrets = Secrets::new("ck", "cs");
        let req = builder(
            &secrets,
            Method::POST,
            "https://api.twitter.com/1.1/statuses/update.json",
        )
        .form(&[
            ("include_entities", "true"),
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
        ]);
        assert_eq!(
            req.body,
            "include_entities=true&status=Hello+Ladies+%2B+Gentlemen%2C+a+signed+OAuth+request%21"
        );
    }

    #[test]
    fn sign_get_query() {
        // https://tools.ietf.org/html/rfc5849
        let secrets = Secrets::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44")
            .token("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00");
        let params = OAuthParameters::new()
            .nonce("chapoH")
            .timestamp(137_131_202u64);

        let req = builder(
            &secrets,
            Method::GET,
            "http://photos.example.net/photos?file=vacation.jpg&size=original",
        )
        .oauth_parameters(params)
        .generate_signature()
        .build()
        .unwrap();

        let sign = req.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(
            extract_signature(sign.to_str().unwrap()),
            "MdpQcU8iPSUjWoN/UDMsK2sui9I="
        );
    }

    #[test]
    fn sign_post_body() {
        // https://developer.twitter.com/ja/docs/basics/authentication/guides/creating-a-signature
        let secrets = Secrets::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        )
        .token(
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        );
        let params = OAuthParameters::new()
            .nonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg")
            .timestamp(1_318_622_958u64)
            .version(true);

        let req = builder(
            &secrets,
            Method::POST,
            "https://api.twitter.com/1.1/statuses/update.json",
        )
        .oauth_parameters(params)
        .form(&[
            ("include_entities", "true"),
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
        ])
        .generate_signature()
        .build()
        .unwrap();

        let sign = req.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(
            extract_signature(sign.to_str().unwrap()),
            "hCtSmYh+iHYCEqBWrE7C7hYmtUk="
        );
    }

    #[test]
    fn sign_query_and_body_together() {
        // the Twitter example sends include_entities in the query string
        let secrets = Secrets::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        )
        .token(
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        );
        let params = OAuthParameters::new()
            .nonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg")
            .timestamp(1_318_622_958u64)
            .version(true);
        let endpoint = "https://api.twitter.com/1.1/statuses/update.json";

        let header = builder(&secrets, Method::POST, endpoint)
            .oauth_parameters(params.clone())
            .query(&[("include_entities", "true")])
            .form(&[(
                "status",
                "Hello Ladies + Gentlemen, a signed OAuth request!",
            )])
            .authorization();

        let union = Signer::new(&secrets, params).generate_signature(
            Method::POST,
            Url::parse(endpoint).unwrap(),
            vec![
                (Cow::from("include_entities"), Cow::from("true")),
                (
                    Cow::from("status"),
                    Cow::from("Hello Ladies + Gentlemen, a signed OAuth request!"),
                ),
            ],
        );
        assert_eq!(extract_signature(&header), extract_signature(&union));
        assert_eq!(extract_signature(&header), "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn multipart_fields_are_not_signed() {
        let secrets = Secrets::new("ck", "cs").token("tok", "tok-secret");
        let params = OAuthParameters::new()
            .nonce("nonce")
            .timestamp(1_318_622_958u64);
        let endpoint = "https://api.twitter.com/1.1/statuses/update_with_media.json";

        let plain = builder(&secrets, Method::POST, endpoint)
            .oauth_parameters(params.clone())
            .authorization();
        let with_body = builder(&secrets, Method::POST, endpoint)
            .oauth_parameters(params)
            .multipart(multipart::Form::new().text("status", "hello"))
            .authorization();
        assert_eq!(extract_signature(&with_body), extract_signature(&plain));
    }
}
