//! # Admin Session
//!
//! ```text
//! ┌───────────┐   login(ok)    ┌──────────────────────────┐
//! │ LoggedOut │───────────────►│ LoggedIn{username, since}│
//! │           │◄───────────────│                          │
//! └───────────┘    logout()    └──────────────────────────┘
//!       ▲  │
//!       └──┘ login(wrong credentials)
//! ```
//!
//! Commands that export or share never look the session up themselves:
//! they take an [`Operator`], which only [`Session::require`] hands out.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};

/// A username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn {
        username: String,
        since: DateTime<Utc>,
    },
}

/// Proof of a logged-in session, borrowed for the length of a command.
#[derive(Debug, Clone, Copy)]
pub struct Operator<'a> {
    pub username: &'a str,
    pub since: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Session::LoggedOut
    }

    /// Checks `attempt` against `expected`. A failed attempt leaves the
    /// session logged out.
    pub fn login(&mut self, attempt: &Credentials, expected: &Credentials) -> ApiResult<()> {
        if attempt != expected {
            warn!(username = %attempt.username, "Rejected admin login");
            *self = Session::LoggedOut;
            return Err(ApiError::unauthorized("Invalid username or password"));
        }
        info!(username = %attempt.username, "Admin logged in");
        *self = Session::LoggedIn {
            username: attempt.username.clone(),
            since: Utc::now(),
        };
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Session::LoggedIn { username, .. } = self {
            info!(username = %username, "Admin logged out");
        }
        *self = Session::LoggedOut;
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    pub fn require(&self) -> ApiResult<Operator<'_>> {
        match self {
            Session::LoggedIn { username, since } => Ok(Operator {
                username,
                since: *since,
            }),
            Session::LoggedOut => Err(ApiError::unauthorized("Please log in first")),
        }
    }
}
