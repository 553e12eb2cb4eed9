use http::Method;
use reqwest::blocking::{Client as ReqwestClient, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    Config, CredentialStore, Credentials, Error, OAuthParameters, RequestBuilder,
    RequestDescriptor, Result, SecretsProvider, ValidationError,
};

/// A Twitter API client bound to one application and, once authorized,
/// one user.
///
/// `Client` is `Send + Sync`; calls may run concurrently from several
/// threads. Each call signs with the user credentials current when it
/// starts.
#[derive(Debug)]
pub struct Client {
    inner: ReqwestClient,
    config: Config,
    credentials: CredentialStore,
}

impl Client {
    /// Constructs a new `Client` for the public API with default settings.
    pub fn new(application: Credentials) -> Result<Self> {
        Self::with_config(application, Config::default())
    }

    pub fn with_config(application: Credentials, config: Config) -> Result<Self> {
        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new_with_client(application, config, builder.build()?))
    }

    /// Constructs a new `Client` with specifying inner `reqwest::blocking::Client`.
    pub fn new_with_client(
        application: Credentials,
        config: Config,
        client: ReqwestClient,
    ) -> Self {
        Client {
            inner: client,
            config,
            credentials: CredentialStore::new(application),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn application_credentials(&self) -> &Credentials {
        self.credentials.application_credentials()
    }

    pub fn user_credentials(&self) -> Option<Credentials> {
        self.credentials.user_credentials()
    }

    /// Sets the user credentials, replacing any previous ones.
    pub fn set_user_credentials(&self, credentials: Credentials) {
        self.credentials.set_user_credentials(credentials);
    }

    /// Start building a signed request with the `Method` and `Url`.
    pub fn request<'a, T: SecretsProvider>(
        &self,
        method: Method,
        url: Url,
        secrets: &'a T,
    ) -> RequestBuilder<'a, T> {
        RequestBuilder::new(
            self.inner.request(method.clone(), url.clone()),
            method,
            url,
            secrets,
        )
    }

    /// Sends one API request and decodes its JSON body into `T`.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for a method other than GET or POST, or when
    ///   no user credentials are set. Nothing is sent in that case.
    /// - [`Error::Transport`] when no response was received.
    /// - [`Error::Provider`] for any status other than 200.
    /// - [`Error::MalformedResponse`] for a 200 without a body.
    /// - [`Error::Decode`] when the body is not JSON of the requested shape.
    pub fn execute<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        self.execute_with_params(request, OAuthParameters::new())
    }

    /// Same as [`execute`](Self::execute), with pinned `oauth_*` parameters.
    pub fn execute_with_params<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
        parameters: OAuthParameters<'_>,
    ) -> Result<T> {
        check_method(&request.method)?;
        let secrets = self
            .credentials
            .secrets()
            .ok_or(ValidationError::MissingUserCredentials)?;
        let url = self.config.endpoint_url(&request.path)?;

        let RequestDescriptor {
            method,
            query,
            form,
            multipart,
            ..
        } = request;
        let mut builder = self
            .request(method.clone(), url, &secrets)
            .oauth_parameters(parameters)
            .query(&query);
        builder = match multipart {
            Some(body) => builder.multipart(body.into_form()?),
            None if method == Method::POST => builder.form(&form),
            None => builder,
        };

        if self.config.debug {
            log::debug!("{} {}", builder.method(), builder.url());
        }
        let response = builder.send()?;
        self.read_response(response)
    }

    /// The `Authorization` header [`execute`](Self::execute) would send for
    /// `request`.
    pub fn authorization_header(
        &self,
        request: &RequestDescriptor,
        parameters: OAuthParameters<'_>,
    ) -> Result<String> {
        check_method(&request.method)?;
        let secrets = self
            .credentials
            .secrets()
            .ok_or(ValidationError::MissingUserCredentials)?;
        let url = self.config.endpoint_url(&request.path)?;

        let mut builder = self
            .request(request.method.clone(), url, &secrets)
            .oauth_parameters(parameters)
            .query(&request.query);
        if request.multipart.is_none() && request.method == Method::POST {
            builder = builder.form(&request.form);
        }
        Ok(builder.authorization())
    }

    /// Checks the status and decodes the body.
    pub(crate) fn read_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes()?;
        if self.config.debug {
            log::debug!("Response: {} {}", status, String::from_utf8_lossy(&body));
        }

        if status != StatusCode::OK {
            return Err(Error::Provider {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        if body.is_empty() {
            return Err(Error::MalformedResponse);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

fn check_method(method: &Method) -> std::result::Result<(), ValidationError> {
    if *method == Method::GET || *method == Method::POST {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedMethod(method.clone()))
    }
}
