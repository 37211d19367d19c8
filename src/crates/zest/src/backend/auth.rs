//! GoTrue authentication
//!
//! Email/password sign-in and sign-up, token refresh, user lookup and
//! sign-out. Every successful sign-in produces a [`Session`] that callers
//! pass explicitly into data operations.

use super::{read_body, read_json, BackendClient};
use crate::error::{Result, ZestError};
use crate::models::{Session, User};
use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Result of a sign-up request
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// The project auto-confirms users; the new user is signed in
    SignedIn(Session),
    /// The user must confirm their email before signing in
    ConfirmationPending(User),
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Token grant response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Sign-up answers with a token grant when auto-confirm is on, otherwise with
/// the bare user
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(User),
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(ZestError::InvalidInput(format!("Invalid email address: '{}'", email)));
    }
    if password.is_empty() {
        return Err(ZestError::InvalidInput("Password cannot be empty".to_string()));
    }
    Ok(())
}

impl BackendClient {
    /// `POST /auth/v1/token?grant_type=password`
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        validate_credentials(email, password)?;

        let req = self
            .request(Method::POST, &self.auth_url("token?grant_type=password"), None)
            .json(&Credentials { email, password });

        let response = self.send(req).await?;
        let token: TokenResponse = read_json(response, "Sign in failed").await?;

        info!(user_id = %token.user.id, "Signed in");
        Ok(token.into_session(Utc::now()))
    }

    /// `POST /auth/v1/signup`
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        validate_credentials(email, password)?;

        let req = self
            .request(Method::POST, &self.auth_url("signup"), None)
            .json(&Credentials { email, password });

        let response = self.send(req).await?;
        let outcome = match read_json::<SignUpResponse>(response, "Sign up failed").await? {
            SignUpResponse::Session(token) => {
                info!(user_id = %token.user.id, "Signed up and signed in");
                SignUpOutcome::SignedIn(token.into_session(Utc::now()))
            }
            SignUpResponse::User(user) => {
                info!(user_id = %user.id, "Signed up, confirmation pending");
                SignUpOutcome::ConfirmationPending(user)
            }
        };

        Ok(outcome)
    }

    /// `POST /auth/v1/token?grant_type=refresh_token`
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        if refresh_token.is_empty() {
            return Err(ZestError::NotAuthenticated);
        }

        let req = self
            .request(Method::POST, &self.auth_url("token?grant_type=refresh_token"), None)
            .json(&RefreshRequest { refresh_token });

        let response = self.send(req).await?;
        let token: TokenResponse = read_json(response, "Session refresh failed").await?;

        Ok(token.into_session(Utc::now()))
    }

    /// `GET /auth/v1/user`
    pub async fn get_user(&self, session: &Session) -> Result<User> {
        let req = self.request(Method::GET, &self.auth_url("user"), Some(session));
        let response = self.send(req).await?;

        match read_json(response, "Failed to fetch user").await {
            Err(e) if e.is_auth_error() => Err(ZestError::NotAuthenticated),
            other => other,
        }
    }

    /// `POST /auth/v1/logout`
    pub async fn sign_out(&self, session: &Session) -> Result<()> {
        let req = self.request(Method::POST, &self.auth_url("logout"), Some(session));
        let response = self.send(req).await?;
        read_body(response, "Sign out failed").await?;

        info!(user_id = %session.user.id, "Signed out");
        Ok(())
    }
}
