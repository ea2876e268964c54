//! Session management
//!
//! A session maps an opaque random token to the email of the member who
//! logged in. Expiry is sliding: every successful lookup pushes it forward.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use member_shared::constants::SESSION_TOKEN_BYTES;
use member_shared::utils::mask_email;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session TTL must be positive and representable, got {0} seconds")]
    InvalidTtl(i64),

    #[error("Session expiry out of range")]
    ExpiryOverflow,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub member_email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn new(member_email: String, ttl: Duration) -> Result<Self, SessionError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(SessionError::ExpiryOverflow)?;
        Ok(Self {
            token: generate_token(),
            member_email,
            created_at: now,
            expires_at,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rng().fill(&mut bytes[..]);
    hex::encode(bytes)
}

pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_seconds: i64) -> Result<Self, SessionError> {
        let ttl = Duration::try_seconds(ttl_seconds)
            .filter(|ttl| *ttl > Duration::zero())
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or(SessionError::InvalidTtl(ttl_seconds))?;
        Ok(Self {
            sessions: DashMap::new(),
            ttl,
        })
    }

    /// Start a session for `member_email` and return it, token included.
    pub fn create(&self, member_email: &str) -> Result<Session, SessionError> {
        let session = Session::new(member_email.to_string(), self.ttl)?;
        debug!("Session created for {}", mask_email(member_email));
        self.sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    /// Look up a live session and extend it. Expired sessions are removed and
    /// reported as absent.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        let now = Utc::now();
        let mut entry = self.sessions.get_mut(token)?;
        if entry.is_expired_at(now) {
            drop(entry);
            self.sessions.remove(token);
            debug!("Session expired");
            return None;
        }
        if let Some(next) = now.checked_add_signed(self.ttl) {
            entry.expires_at = next;
        }
        Some(entry.clone())
    }

    /// Point an existing session at a different email, e.g. after the member
    /// changed theirs.
    pub fn rebind(&self, token: &str, member_email: &str) -> bool {
        match self.sessions.get_mut(token) {
            Some(mut session) => {
                session.member_email = member_email.to_string();
                true
            }
            None => false,
        }
    }

    pub fn invalidate(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drop every expired session, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired_at(now));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[cfg(test)]
    fn expire_now(&self, token: &str) {
        if let Some(mut session) = self.sessions.get_mut(token) {
            session.expires_at = Utc::now() - Duration::seconds(1);
        }
    }
}
