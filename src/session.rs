// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::UserProfile;

/// Errors raised by the session gate. Every store read and mutation funnels
/// through [`Session::require`] first.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("invalid email or password")]
    BadCredentials,
    #[error("email '{0}' is already registered")]
    EmailTaken(String),
    #[error("reauthentication failed; account was not deleted")]
    Reauthentication,
}

/// Tracks the signed-in user for the lifetime of a store. The identity is
/// persisted in the settings table so CLI invocations stay signed in.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<UserProfile>,
}

impl Session {
    pub fn new(user: Option<UserProfile>) -> Self {
        Session { user }
    }

    pub fn current(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn require(&self) -> Result<&UserProfile, AuthError> {
        self.user.as_ref().ok_or(AuthError::NotSignedIn)
    }

    pub fn set(&mut self, user: Option<UserProfile>) {
        self.user = user;
    }
}

pub fn digest_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let out = hasher.finalize();
    out.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn verify_password(password: &str, digest: &str) -> bool {
    digest_password(password) == digest
}
