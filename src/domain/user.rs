// src/domain/user.rs
use serde::Serialize;

/// A platform member. Referenced by questions as author; never created
/// or mutated by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    /// Key issued by the external identity provider.
    pub provider_key: String,
    pub name: String,
    pub username: String,
    pub avatar_url: String,
}

/// Author projection attached to enriched questions: identifier,
/// identity-provider key, display name, username and avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: String,
    pub provider_key: String,
    pub name: String,
    pub username: String,
    pub avatar_url: String,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            provider_key: user.provider_key.clone(),
            name: user.name.clone(),
            username: user.username.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}
