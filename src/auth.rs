//! Session management: logging in and out, and the authenticated user.

use serde::Serialize;

use crate::client::WriteAsClient;
use crate::error::{DomainErrorKind, Result, WriteAsError};
use crate::models::{AuthUser, User};

#[derive(Serialize)]
struct LoginRequest<'a> {
    alias: &'a str,
    pass: &'a str,
}

impl WriteAsClient {
    /// Authenticate with a username and password.
    ///
    /// On success the access token is stored on this client and sent with
    /// every later request.
    ///
    /// # Errors
    ///
    /// Returns [`WriteAsError::Auth`] for an unknown user or a wrong password.
    #[tracing::instrument(skip(self, password))]
    pub async fn log_in(&mut self, username: &str, password: &str) -> Result<AuthUser> {
        let request = LoginRequest {
            alias: username,
            pass: password,
        };

        let env = self.post::<_, AuthUser>("auth/login", &request).await?;
        match env.code {
            200 => {}
            400 => return Err(env.bad_request()),
            401 => return Err(env.auth_error("Incorrect password.")),
            404 => return Err(env.auth_error("User does not exist.")),
            429 => {
                return Err(env.error(
                    DomainErrorKind::RateLimited,
                    "Stop repeatedly trying to log in.",
                ))
            }
            _ => return Err(env.unexpected("authenticating")),
        }

        let auth = env.into_data()?;
        match auth.access_token.as_deref() {
            Some(token) if !token.is_empty() => self.set_token(token),
            _ => return Err(WriteAsError::auth("No access token returned.", Some(200))),
        }

        tracing::debug!(username = %auth.user.username, "logged in");
        Ok(auth)
    }

    /// Revoke the session token on the server and forget it locally.
    ///
    /// # Errors
    ///
    /// Returns [`WriteAsError::Auth`] if no token is held (nothing is sent)
    /// or the server reports it invalid. The local token is kept on failure.
    #[tracing::instrument(skip(self))]
    pub async fn log_out(&mut self) -> Result<()> {
        if !self.is_authenticated() {
            return Err(WriteAsError::auth("Not logged in.", None));
        }

        let env = self.delete("auth/me").await?;
        match env.code {
            204 => {
                self.clear_token();
                Ok(())
            }
            401 | 404 => Err(env.auth_error("Access token is invalid or doesn't exist.")),
            _ => Err(env.unexpected("logging out")),
        }
    }

    /// Get the authenticated user.
    ///
    /// With `verbose`, subscription details are included.
    ///
    /// # Errors
    ///
    /// Returns [`WriteAsError::Auth`] if no token is held (nothing is sent)
    /// or the token is invalid or expired.
    #[tracing::instrument(skip(self))]
    pub async fn get_me(&self, verbose: bool) -> Result<User> {
        if !self.is_authenticated() {
            return Err(WriteAsError::auth(
                "Unable to get user; no access token given.",
                None,
            ));
        }

        let path = if verbose { "me?verbose=true" } else { "me" };
        let env = self.get::<User>(path).await?;
        match env.code {
            200 => env.into_data(),
            401 => Err(env.auth_error("Invalid or expired token.")),
            _ => Err(env.unexpected("getting user")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_out_without_token_sends_nothing() {
        // Unroutable URL: reaching the network would surface a transport error
        let mut client = WriteAsClient::with_config(
            crate::ClientConfig::default().with_url("http://127.0.0.1:9/api"),
        )
        .unwrap();

        let err = tokio_test::block_on(client.log_out()).unwrap_err();
        assert!(matches!(err, WriteAsError::Auth { status_code: None, .. }));
    }

    #[test]
    fn test_get_me_without_token_sends_nothing() {
        let client = WriteAsClient::with_config(
            crate::ClientConfig::default().with_url("http://127.0.0.1:9/api"),
        )
        .unwrap();

        let err = tokio_test::block_on(client.get_me(true)).unwrap_err();
        assert!(err.is_not_authenticated());
        assert!(err.to_string().contains("no access token"));
    }
}
