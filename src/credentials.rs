use std::borrow::Cow;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::Secrets;

/// An OAuth identifier and its shared secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new<TId, TSecret>(identifier: TId, secret: TSecret) -> Self
    where
        TId: Into<String>,
        TSecret: Into<String>,
    {
        Credentials {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

/// Holds the application credentials and, once known, the user credentials.
///
/// User credentials sit behind a lock with a single writer
/// ([`set_user_credentials`](Self::set_user_credentials)) and any number of
/// readers. Requests read them once through [`secrets`](Self::secrets) so a
/// signature never mixes two generations of secrets.
#[derive(Debug)]
pub struct CredentialStore {
    application: Credentials,
    user: RwLock<Option<Credentials>>,
}

impl CredentialStore {
    pub fn new(application: Credentials) -> Self {
        CredentialStore {
            application,
            user: RwLock::new(None),
        }
    }

    pub fn application_credentials(&self) -> &Credentials {
        &self.application
    }

    pub fn user_credentials(&self) -> Option<Credentials> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the user credentials, whatever was stored before.
    pub fn set_user_credentials(&self, credentials: Credentials) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(credentials);
    }

    /// Snapshot of the application and user secrets, `None` when no user
    /// credentials are set.
    pub fn secrets(&self) -> Option<Secrets<'_, Cow<'_, str>>> {
        self.user_credentials().map(|user| {
            Secrets::from_credentials(&self.application).token(user.identifier, user.secret)
        })
    }

    /// Application-only secrets, used before any user token exists.
    pub fn application_secrets(&self) -> Secrets<'_, ()> {
        Secrets::from_credentials(&self.application)
    }
}
