//! User entity <-> model mapper

use forum_core::entities::User;
use forum_core::value_objects::UserId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            uuid: model.uuid,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        }
    }
}
