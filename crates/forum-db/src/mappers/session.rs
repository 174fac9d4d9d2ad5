//! Session entity <-> model mapper

use forum_core::entities::{Session, User};
use forum_core::error::DomainError;
use forum_core::value_objects::{ActivitySlot, UserId};

use crate::models::{OnlineUserModel, SessionModel};
use crate::repositories::corrupt_row;

fn slot(raw: i32) -> Result<ActivitySlot, DomainError> {
    ActivitySlot::try_from(raw).map_err(|e| corrupt_row("session", e))
}

impl TryFrom<SessionModel> for Session {
    type Error = DomainError;

    fn try_from(model: SessionModel) -> Result<Self, Self::Error> {
        Ok(Session {
            uuid: model.uuid,
            user_id: UserId::new(model.user_id),
            email: model.email,
            created_at: model.created_at,
            cookie_token: model.cookie_token,
            last_seen: slot(model.last_seen)?,
        })
    }
}

impl TryFrom<OnlineUserModel> for (User, ActivitySlot) {
    type Error = DomainError;

    fn try_from(model: OnlineUserModel) -> Result<Self, Self::Error> {
        let last_seen = slot(model.last_seen)?;
        let user = User {
            id: UserId::new(model.id),
            uuid: model.uuid,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        };
        Ok((user, last_seen))
    }
}

/// Column values for inserting a session
pub struct SessionInsert<'a> {
    pub uuid: uuid::Uuid,
    pub user_id: i64,
    pub email: &'a str,
    pub cookie_token: &'a str,
    pub last_seen: i32,
}

impl<'a> SessionInsert<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            uuid: session.uuid,
            user_id: session.user_id.into_inner(),
            email: &session.email,
            cookie_token: &session.cookie_token,
            last_seen: session.last_seen.into(),
        }
    }
}
