// src/domain/tag.rs
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::Serialize;

/// A named topic label attachable to multiple questions.
///
/// The question relation is a weak, ordered sequence of question
/// identifiers maintained by the authoring workflow outside this crate.
/// Entries may dangle; consumers must treat unresolved identifiers as
/// absent.
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(setter(into))]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[builder(default)]
    pub question_ids: Vec<String>,
}

impl Tag {
    /// Length of the raw question relation, dangling entries included.
    ///
    /// Not an authoritative popularity count: ranking always resolves
    /// the relation against the question store.
    pub fn relation_len(&self) -> usize {
        self.question_ids.len()
    }
}

/// Minimal tag projection used when enriching questions (id + name only,
/// matching what listing pages render as tag chips).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRef {
    pub id: String,
    pub name: String,
}

impl From<&Tag> for TagRef {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id.clone(),
            name: tag.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_tag() -> Tag {
        TagBuilder::default()
            .id("t1")
            .name("rust")
            .created_at(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap())
            .question_ids(vec!["q1".to_string(), "q2".to_string()])
            .build()
            .unwrap()
    }

    #[test]
    fn given_builder_when_build_then_returns_tag_with_fields() {
        let tag = sample_tag();
        assert_eq!(tag.id, "t1");
        assert_eq!(tag.name, "rust");
        assert_eq!(tag.relation_len(), 2);
    }

    #[test]
    fn given_builder_without_questions_when_build_then_relation_is_empty() {
        let tag = TagBuilder::default()
            .id("t2")
            .name("go")
            .created_at(Utc::now())
            .build()
            .unwrap();
        assert_eq!(tag.relation_len(), 0);
    }

    #[test]
    fn given_tag_when_projected_then_tag_ref_carries_id_and_name_only() {
        let tag = sample_tag();
        let tag_ref = TagRef::from(&tag);
        assert_eq!(tag_ref.id, "t1");
        assert_eq!(tag_ref.name, "rust");
    }
}
