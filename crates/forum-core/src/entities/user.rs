//! User entity - a registered forum member

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::value_objects::UserId;

/// User entity. Credentials live in the store, never on the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with a fresh uuid
    pub fn new(id: UserId, name: String, email: String) -> Self {
        Self {
            id,
            uuid: Uuid::new_v4(),
            name,
            email,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(UserId::new(1), "alice".to_string(), "alice@example.com".to_string());
        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.name, "alice");
        assert!(!user.uuid.is_nil());
    }
}
