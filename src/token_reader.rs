use std::collections::HashMap;

use reqwest::blocking::Response;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{
    Credentials, Error, Result, TokenReaderError, TokenReaderResult, OAUTH_TOKEN_KEY,
    OAUTH_TOKEN_SECRET_KEY,
};

/// Represents response of token acquisition.
#[derive(Deserialize, Debug, Clone)]
pub struct TokenResponse {
    /// OAuth Token
    pub oauth_token: String,
    /// OAuth Token Secret
    pub oauth_token_secret: String,
    /// Other contents, such as `user_id` and `screen_name`
    #[serde(flatten)]
    pub remain: HashMap<String, String>,
}

impl TokenResponse {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.oauth_token.as_str(), self.oauth_token_secret.as_str())
    }
}

/// Add parse_oauth_token feature to reqwest::blocking::Response.
// this trait is sealed
pub trait TokenReader: private::Sealed {
    fn parse_oauth_token(self) -> Result<TokenResponse>;
}

impl TokenReader for Response {
    fn parse_oauth_token(self) -> Result<TokenResponse> {
        let status = self.status();
        let text = self.text()?;
        if status != StatusCode::OK {
            return Err(Error::Provider {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(read_oauth_token(text)?)
    }
}

impl<E> TokenReader for std::result::Result<Response, E>
where
    E: Into<Error>,
{
    fn parse_oauth_token(self) -> Result<TokenResponse> {
        match self {
            Ok(resp) => resp.parse_oauth_token(),
            Err(err) => Err(err.into()),
        }
    }
}

pub(crate) fn read_oauth_token(text: String) -> TokenReaderResult<TokenResponse> {
    let mut destructured = url::form_urlencoded::parse(text.as_bytes())
        .into_owned()
        .collect::<HashMap<String, String>>();
    let oauth_token = destructured.remove(OAUTH_TOKEN_KEY);
    let oauth_token_secret = destructured.remove(OAUTH_TOKEN_SECRET_KEY);
    match (oauth_token, oauth_token_secret) {
        (Some(t), Some(s)) => Ok(TokenResponse {
            oauth_token: t,
            oauth_token_secret: s,
            remain: destructured,
        }),
        (None, _) => Err(TokenReaderError::TokenKeyNotFound(OAUTH_TOKEN_KEY, text)),
        (_, _) => Err(TokenReaderError::TokenKeyNotFound(
            OAUTH_TOKEN_SECRET_KEY,
            text,
        )),
    }
}

mod private {
    use reqwest::blocking::Response;

    use crate::Error;

    pub trait Sealed {}
    impl Sealed for Response {}
    impl<E> Sealed for std::result::Result<Response, E> where E: Into<Error> {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_request_token() {
        let resp_str_sample = "oauth_token=Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik&oauth_token_secret=Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM&oauth_callback_confirmed=true";
        for parsed in &[
            read_oauth_token(resp_str_sample.to_string()).unwrap(),
            serde_urlencoded::from_str::<TokenResponse>(resp_str_sample).unwrap(),
        ] {
            assert_eq!(
                parsed.credentials(),
                Credentials::new(
                    "Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik",
                    "Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM"
                )
            );
            assert_eq!(parsed.remain.len(), 1);
            assert_eq!(parsed.remain["oauth_callback_confirmed"], "true");
        }
    }

    #[test]
    fn parse_access_token_attributes() {
        let resp_str_sample = "oauth_token=6253282-eWudHldSbIaelX7swmsiHImEL4KinwaGloHANdrY&oauth_token_secret=2EEfA6BG3ly3sR3RjE0IBSnlQu4ZrUzPiYKmrkVU&user_id=6253282&screen_name=twitterapi";
        let parsed = read_oauth_token(resp_str_sample.to_string()).unwrap();
        assert_eq!(parsed.remain["user_id"], "6253282");
        assert_eq!(parsed.remain["screen_name"], "twitterapi");
    }

    #[test]
    fn parse_escaped_values() {
        let resp_str_sample =
            "oauth_token=1-ab%2Bc&oauth_token_secret=s%3Dcret&screen_name=some%20one";
        let parsed = read_oauth_token(resp_str_sample.to_string()).unwrap();
        assert_eq!(parsed.credentials(), Credentials::new("1-ab+c", "s=cret"));
        assert_eq!(parsed.remain["screen_name"], "some one");
    }

    #[test]
    fn parse_minimal() {
        let parsed = read_oauth_token("oauth_token&oauth_token_secret".to_string()).unwrap();
        assert_eq!(parsed.oauth_token, "");
        assert_eq!(parsed.oauth_token_secret, "");
        assert!(parsed.remain.is_empty());
    }

    #[test]
    fn parse_token_notfound() {
        let resp_str_sample = "oauth_token_secret=";
        match read_oauth_token(resp_str_sample.to_string()) {
            Err(TokenReaderError::TokenKeyNotFound(key, resp_str)) => {
                assert_eq!(key, OAUTH_TOKEN_KEY);
                assert_eq!(resp_str, resp_str_sample)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn parse_token_secret_notfound() {
        let resp_str_sample = "oauth_token=";
        match read_oauth_token(resp_str_sample.to_string()) {
            Err(TokenReaderError::TokenKeyNotFound(key, resp_str)) => {
                assert_eq!(key, OAUTH_TOKEN_SECRET_KEY);
                assert_eq!(resp_str, resp_str_sample)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
