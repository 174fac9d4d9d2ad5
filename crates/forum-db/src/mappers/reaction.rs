//! Reaction entity -> insert values

use forum_core::entities::Reaction;

/// Column values for inserting a reaction
pub struct ReactionInsert {
    pub subject_kind: &'static str,
    pub subject_id: i64,
    pub user_id: i64,
    pub polarity: &'static str,
}

impl ReactionInsert {
    pub fn new(reaction: &Reaction) -> Self {
        Self {
            subject_kind: reaction.subject_kind.as_str(),
            subject_id: reaction.subject_id.into_inner(),
            user_id: reaction.user_id.into_inner(),
            polarity: reaction.polarity.as_str(),
        }
    }
}
