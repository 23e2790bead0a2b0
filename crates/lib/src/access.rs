//! # Shared-Password Access Gate
//!
//! The gate decides whether a client session may use protected operations. It
//! knows nothing about how the session travels between requests; the server
//! stores it in a signed cookie.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("비밀번호가 올바르지 않습니다.")]
    InvalidPassword,
}

/// The per-client session state.
///
/// A fresh session is unauthenticated and not permanent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub auth: bool,
    /// Set on a password login; the session then outlives the browser session.
    pub permanent: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    password: Option<String>,
}

impl AuthGate {
    /// Creates a gate. `None` or an empty password disables the gate.
    pub fn new(password: Option<String>) -> Self {
        Self {
            password: password.filter(|p| !p.is_empty()),
        }
    }

    pub fn password_required(&self) -> bool {
        self.password.is_some()
    }

    pub fn is_authenticated(&self, session: &Session) -> bool {
        match self.password {
            None => true,
            Some(_) => session.auth,
        }
    }

    /// Marks the session authenticated if `password` matches.
    ///
    /// Without a configured password every login succeeds, but the session is
    /// not made permanent.
    pub fn login(&self, session: &mut Session, password: &str) -> Result<(), AccessError> {
        match &self.password {
            None => {
                session.auth = true;
                Ok(())
            }
            Some(expected) if expected == password => {
                session.auth = true;
                session.permanent = true;
                Ok(())
            }
            Some(_) => Err(AccessError::InvalidPassword),
        }
    }

    pub fn logout(&self, session: &mut Session) {
        *session = Session::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_gate_admits_everyone() {
        let gate = AuthGate::new(None);
        let mut session = Session::default();

        assert!(!gate.password_required());
        assert!(gate.is_authenticated(&session));
        assert!(gate.login(&mut session, "anything").is_ok());
        assert!(session.auth);
        assert!(!session.permanent);
    }

    #[test]
    fn empty_password_counts_as_unset() {
        let gate = AuthGate::new(Some(String::new()));
        assert!(!gate.password_required());
        assert!(gate.is_authenticated(&Session::default()));
    }

    #[test]
    fn configured_gate_requires_exact_match() {
        let gate = AuthGate::new(Some("s3cret".to_string()));
        let mut session = Session::default();

        assert!(gate.password_required());
        assert!(!gate.is_authenticated(&session));

        assert_eq!(
            gate.login(&mut session, "S3CRET"),
            Err(AccessError::InvalidPassword)
        );
        assert_eq!(
            gate.login(&mut session, "s3cret "),
            Err(AccessError::InvalidPassword)
        );
        assert!(!gate.is_authenticated(&session));

        gate.login(&mut session, "s3cret").unwrap();
        assert!(gate.is_authenticated(&session));
        assert!(session.permanent);
    }

    #[test]
    fn logout_clears_everything() {
        let gate = AuthGate::new(Some("pw".to_string()));
        let mut session = Session::default();
        gate.login(&mut session, "pw").unwrap();

        gate.logout(&mut session);

        assert_eq!(session, Session::default());
        assert!(!gate.is_authenticated(&session));
    }
}
