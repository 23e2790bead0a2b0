//! # Session Cookie
//!
//! The session is carried in an HttpOnly, `SameSite=Lax` cookie holding an
//! HS256-signed token. Nothing is stored server-side, so a token that fails
//! verification simply reads as a fresh, unauthenticated session.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use cjm_builder::Session;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SESSION_COOKIE: &str = "session";

/// Token lifetime, and the cookie `Max-Age` of a permanent session.
pub const SESSION_LIFETIME_SECS: i64 = 86_400;

/// The claims carried in the session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub auth: bool,
    pub permanent: bool,
    /// The expiration timestamp.
    pub exp: usize,
}

#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    secure: bool,
}

impl SessionKeys {
    pub fn new(secret: &[u8], secure: bool) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            secure,
        }
    }

    /// Reads the session from the request cookies.
    pub fn read(&self, jar: &CookieJar) -> Session {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Session::default();
        };
        match decode::<SessionClaims>(
            cookie.value(),
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        ) {
            Ok(data) => Session {
                auth: data.claims.auth,
                permanent: data.claims.permanent,
            },
            Err(e) => {
                debug!("Ignoring invalid session cookie: {e}");
                Session::default()
            }
        }
    }

    /// Signs `session` into a fresh cookie.
    pub fn write(
        &self,
        jar: CookieJar,
        session: &Session,
    ) -> Result<CookieJar, jsonwebtoken::errors::Error> {
        let claims = SessionClaims {
            auth: session.auth,
            permanent: session.permanent,
            exp: (Utc::now().timestamp() + SESSION_LIFETIME_SECS) as usize,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;

        let mut cookie = Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        if session.permanent {
            cookie = cookie.max_age(time::Duration::seconds(SESSION_LIFETIME_SECS));
        }
        Ok(jar.add(cookie))
    }

    /// Expires the session cookie.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }
}
