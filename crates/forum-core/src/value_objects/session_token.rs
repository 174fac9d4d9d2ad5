//! Session cookie token
//!
//! The bearer credential handed to the browser has the form
//! `"<userId>&<sessionUuid>"`. The server treats it as opaque for lookups
//! but parses it to reject obviously forged values before touching the store.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::ids::UserId;

/// Error when parsing a cookie token
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenParseError {
    #[error("missing '&' separator")]
    MissingSeparator,

    #[error("invalid user id")]
    InvalidUserId,

    #[error("invalid session uuid")]
    InvalidUuid,
}

/// Parsed `"<userId>&<uuid>"` cookie token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken {
    pub user_id: UserId,
    pub session_uuid: Uuid,
}

impl SessionToken {
    pub const SEPARATOR: char = '&';

    pub fn new(user_id: UserId, session_uuid: Uuid) -> Self {
        Self {
            user_id,
            session_uuid,
        }
    }

    /// Encode into the cookie string form
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.user_id, Self::SEPARATOR, self.session_uuid)
    }
}

impl FromStr for SessionToken {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (user, uuid) = s
            .split_once(Self::SEPARATOR)
            .ok_or(TokenParseError::MissingSeparator)?;
        let user_id = user.parse().map_err(|_| TokenParseError::InvalidUserId)?;
        let session_uuid = Uuid::parse_str(uuid).map_err(|_| TokenParseError::InvalidUuid)?;
        Ok(Self::new(user_id, session_uuid))
    }
}
