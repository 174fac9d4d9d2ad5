//! Session entity - a server-side login bound to a bearer cookie

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::{ActivitySlot, SessionToken, UserId};

/// Session entity
///
/// `uuid` is the durable row identity; `cookie_token` is what the client
/// presents. `last_seen` only moves forward through the session tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uuid: Uuid,
    pub user_id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub cookie_token: String,
    pub last_seen: ActivitySlot,
}

impl Session {
    /// Create a new session for a user with a fresh uuid
    pub fn new(user_id: UserId, email: String, last_seen: ActivitySlot) -> Self {
        let uuid = Uuid::new_v4();
        Self {
            uuid,
            user_id,
            email,
            created_at: Utc::now(),
            cookie_token: SessionToken::new(user_id, uuid).encode(),
            last_seen,
        }
    }

    /// Parsed form of the cookie token
    pub fn token(&self) -> SessionToken {
        SessionToken::new(self.user_id, self.uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_token_format() {
        let session = Session::new(UserId::new(5), "a@b.c".to_string(), ActivitySlot::MIDNIGHT);
        assert_eq!(session.cookie_token, format!("5&{}", session.uuid));
        assert_eq!(session.cookie_token.parse::<SessionToken>().unwrap(), session.token());
    }

    #[test]
    fn test_sessions_get_distinct_uuids() {
        let a = Session::new(UserId::new(5), String::new(), ActivitySlot::MIDNIGHT);
        let b = Session::new(UserId::new(5), String::new(), ActivitySlot::MIDNIGHT);
        assert_ne!(a.uuid, b.uuid);
        assert_ne!(a.cookie_token, b.cookie_token);
    }
}
