// src/domain/question.rs
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::Serialize;

use crate::domain::tag::TagRef;
use crate::domain::user::AuthorSummary;

/// The primary content entity: authored by a user, labeled with tags.
///
/// Tag references form the other side of the weak many-to-many relation
/// held on `Tag::question_ids`; both sides are kept consistent by the
/// authoring workflow, not by this crate.
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(setter(into))]
pub struct Question {
    pub id: String,
    pub title: String,
    #[builder(default)]
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[builder(default)]
    pub tag_ids: Vec<String>,
    pub author_id: String,
}

/// A question with its references resolved for display: tag references
/// replaced by `TagRef` projections and the author reference replaced by
/// an `AuthorSummary`. An author that no longer resolves yields `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedQuestion {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<TagRef>,
    pub author: Option<AuthorSummary>,
}

impl EnrichedQuestion {
    pub fn from_parts(
        question: &Question,
        tags: Vec<TagRef>,
        author: Option<AuthorSummary>,
    ) -> Self {
        Self {
            id: question.id.clone(),
            title: question.title.clone(),
            created_at: question.created_at,
            tags,
            author,
        }
    }
}
