use std::io::{self, BufRead, Write};

use http::Method;
use url::Url;

use crate::{
    Client, Credentials, OAuthParameters, Result, SecretsProvider, TokenReader, TokenResponse,
    ValidationError, OAUTH_TOKEN_KEY, OOB_CALLBACK,
};

/// Request token issued by the provider, waiting for the user's verifier.
#[derive(Debug, Clone)]
pub struct TemporaryCredentials {
    pub credentials: Credentials,
    pub authorization_url: Url,
}

/// Where an [`AuthorizationFlow`] stands.
#[derive(Debug, Clone)]
pub enum AuthorizationState {
    Unauthenticated,
    PendingVerification(TemporaryCredentials),
    Authorized(TokenResponse),
}

impl AuthorizationState {
    fn name(&self) -> &'static str {
        match self {
            AuthorizationState::Unauthenticated => "unauthenticated",
            AuthorizationState::PendingVerification(_) => "pending verification",
            AuthorizationState::Authorized(_) => "authorized",
        }
    }
}

/// The three-legged OAuth 1.0a handshake with PIN-based verification.
///
/// [`begin`](Self::begin) obtains temporary credentials and the URL the user
/// has to open. [`verify`](Self::verify) trades the PIN shown on that page
/// for access credentials and stores them in the client. A failed step
/// leaves the state untouched and is never retried.
#[derive(Debug)]
pub struct AuthorizationFlow<'c> {
    client: &'c Client,
    state: AuthorizationState,
}

impl<'c> AuthorizationFlow<'c> {
    pub fn new(client: &'c Client) -> Self {
        AuthorizationFlow {
            client,
            state: AuthorizationState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &AuthorizationState {
        &self.state
    }

    /// Requests temporary credentials and returns the authorization URL.
    pub fn begin(&mut self) -> Result<Url> {
        if !matches!(self.state, AuthorizationState::Unauthenticated) {
            return Err(invalid_state(&self.state, "unauthenticated"));
        }

        let client = self.client;
        let secrets = client.credentials().application_secrets();
        let params = OAuthParameters::new().callback(OOB_CALLBACK);
        let token = self.request_token(&client.config().request_token_url, &secrets, params)?;

        let mut authorization_url = Url::parse(&client.config().authorize_url)?;
        authorization_url
            .query_pairs_mut()
            .append_pair(OAUTH_TOKEN_KEY, &token.oauth_token);

        self.state = AuthorizationState::PendingVerification(TemporaryCredentials {
            credentials: token.credentials(),
            authorization_url: authorization_url.clone(),
        });
        Ok(authorization_url)
    }

    /// Exchanges `verifier` for access credentials and stores them as the
    /// client's user credentials.
    pub fn verify(&mut self, verifier: &str) -> Result<TokenResponse> {
        let temporary = match self.state {
            AuthorizationState::PendingVerification(ref pending) => pending.credentials.clone(),
            ref other => return Err(invalid_state(other, "pending verification")),
        };

        let client = self.client;
        let secrets = client
            .credentials()
            .application_secrets()
            .token(temporary.identifier, temporary.secret);
        let params = OAuthParameters::new().verifier(verifier.trim());
        let token = self.request_token(&client.config().access_token_url, &secrets, params)?;

        client.set_user_credentials(token.credentials());
        self.state = AuthorizationState::Authorized(token.clone());
        Ok(token)
    }

    /// Runs the whole handshake. `prompt` receives the authorization URL and
    /// returns the verifier the user copied from it.
    pub fn run<F>(mut self, prompt: F) -> Result<Credentials>
    where
        F: FnOnce(&Url) -> io::Result<String>,
    {
        let url = self.begin()?;
        let verifier = prompt(&url)?;
        Ok(self.verify(&verifier)?.credentials())
    }

    fn request_token<T: SecretsProvider>(
        &self,
        endpoint: &str,
        secrets: &T,
        params: OAuthParameters<'_>,
    ) -> Result<TokenResponse> {
        let url = Url::parse(endpoint)?;
        let debug = self.client.config().debug;
        if debug {
            log::debug!("POST {}", url);
        }
        let token = self
            .client
            .request(Method::POST, url, secrets)
            .oauth_parameters(params)
            .send()
            .parse_oauth_token();
        if debug {
            match token {
                Ok(ref token) => log::debug!("Response: {:?}", token.remain),
                Err(ref err) => log::debug!("Response: {}", err),
            }
        }
        token
    }
}

fn invalid_state(state: &AuthorizationState, expected: &'static str) -> crate::Error {
    ValidationError::InvalidFlowState(state.name(), expected).into()
}

/// Asks for the PIN on the terminal.
pub fn console_prompt(url: &Url) -> io::Result<String> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Hello, we are about to obtain your Twitter token.\n")?;
    writeln!(out, "Please open this URL in your browser:")?;
    writeln!(out, "{}\n", url)?;
    writeln!(out, "What's the PIN?")?;
    out.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
