// src/infrastructure/repositories/memory.rs
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard};

use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::question::Question;
use crate::domain::repositories::query::{TagOrdering, TagQuery};
use crate::domain::repositories::repository::{
    QuestionRepository, TagRepository, UserRepository,
};
use crate::domain::tag::Tag;
use crate::domain::user::User;
use crate::infrastructure::error::InfrastructureError;

/// Reference document-store backend holding the three collections in
/// memory. Tags keep insertion order, which is the store's natural
/// iteration order for unsorted listings.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    tags: RwLock<Vec<Tag>>,
    questions: RwLock<HashMap<String, Question>>,
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tag by identifier.
    pub fn put_tag(&self, tag: Tag) -> Result<(), DomainError> {
        let mut tags = self
            .tags
            .write()
            .map_err(|e| InfrastructureError::LockPoisoned(e.to_string()))?;
        match tags.iter_mut().find(|t| t.id == tag.id) {
            Some(existing) => *existing = tag,
            None => tags.push(tag),
        }
        Ok(())
    }

    /// Insert or replace a question by identifier.
    pub fn put_question(&self, question: Question) -> Result<(), DomainError> {
        self.questions
            .write()
            .map_err(|e| InfrastructureError::LockPoisoned(e.to_string()))?
            .insert(question.id.clone(), question);
        Ok(())
    }

    /// Insert or replace a user by identifier.
    pub fn put_user(&self, user: User) -> Result<(), DomainError> {
        self.users
            .write()
            .map_err(|e| InfrastructureError::LockPoisoned(e.to_string()))?
            .insert(user.id.clone(), user);
        Ok(())
    }

    fn read_tags(&self) -> Result<RwLockReadGuard<'_, Vec<Tag>>, DomainError> {
        self.tags
            .read()
            .map_err(|e| InfrastructureError::LockPoisoned(e.to_string()).into())
    }
}

impl TagRepository for InMemoryDocumentStore {
    fn get_by_id(&self, id: &str) -> Result<Option<Tag>, DomainError> {
        Ok(self.read_tags()?.iter().find(|t| t.id == id).cloned())
    }

    fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Tag>, DomainError> {
        let tags = self.read_tags()?;
        let by_id: HashMap<&str, &Tag> = tags.iter().map(|t| (t.id.as_str(), t)).collect();
        Ok(ids
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).map(|t| (*t).clone()))
            .collect())
    }

    #[instrument(skip(self, query), level = "trace")]
    fn find(&self, query: &TagQuery) -> Result<Vec<Tag>, DomainError> {
        let tags = self.read_tags()?;

        // Filter with the specification, then sort, then window
        let mut result: Vec<Tag> = tags
            .iter()
            .filter(|tag| query.matches(tag))
            .cloned()
            .collect();

        if let Some(ordering) = query.ordering {
            match ordering {
                TagOrdering::Recent => {
                    result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                }
                TagOrdering::Old => {
                    result.sort_by_key(|t| t.created_at);
                }
                TagOrdering::Name => {
                    result.sort_by(|a, b| a.name.cmp(&b.name));
                }
            }
        }

        if let Some(offset) = query.offset {
            if offset < result.len() {
                result = result.into_iter().skip(offset).collect();
            } else {
                result = Vec::new();
            }
        }

        if let Some(limit) = query.limit {
            result.truncate(limit);
        }

        Ok(result)
    }

    fn get_all(&self) -> Result<Vec<Tag>, DomainError> {
        Ok(self.read_tags()?.clone())
    }
}

impl QuestionRepository for InMemoryDocumentStore {
    fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Question>, DomainError> {
        let questions = self
            .questions
            .read()
            .map_err(|e| InfrastructureError::LockPoisoned(e.to_string()))?;

        Ok(ids
            .iter()
            .filter_map(|id| questions.get(id).cloned())
            .collect())
    }

    fn count_existing(&self, ids: &[String]) -> Result<usize, DomainError> {
        let questions = self
            .questions
            .read()
            .map_err(|e| InfrastructureError::LockPoisoned(e.to_string()))?;

        let distinct: HashSet<&str> = ids
            .iter()
            .map(String::as_str)
            .filter(|id| questions.contains_key(*id))
            .collect();
        Ok(distinct.len())
    }
}

impl UserRepository for InMemoryDocumentStore {
    fn get_by_ids(&self, ids: &[String]) -> Result<Vec<User>, DomainError> {
        let users = self
            .users
            .read()
            .map_err(|e| InfrastructureError::LockPoisoned(e.to_string()))?;

        Ok(ids
            .iter()
            .filter_map(|id| users.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::question::QuestionBuilder;
    use crate::domain::repositories::query::NameMatchSpecification;
    use crate::domain::tag::TagBuilder;
    use chrono::{TimeZone, Utc};

    fn tag(id: &str, name: &str, day: u32) -> Tag {
        TagBuilder::default()
            .id(id)
            .name(name)
            .created_at(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap())
            .build()
            .unwrap()
    }

    fn question(id: &str, title: &str) -> Question {
        QuestionBuilder::default()
            .id(id)
            .title(title)
            .created_at(Utc::now())
            .author_id("u1")
            .build()
            .unwrap()
    }

    fn store_with_tags() -> InMemoryDocumentStore {
        let store = InMemoryDocumentStore::new();
        store.put_tag(tag("t1", "rust", 3)).unwrap();
        store.put_tag(tag("t2", "go", 1)).unwrap();
        store.put_tag(tag("t3", "ruby", 2)).unwrap();
        store
    }

    #[test]
    fn given_existing_id_when_get_by_id_then_returns_tag() {
        let store = store_with_tags();

        let found = TagRepository::get_by_id(&store, "t2").unwrap();
        assert_eq!(found.unwrap().name, "go");

        let missing = TagRepository::get_by_id(&store, "t9").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn given_same_id_when_put_tag_twice_then_replaces_in_place() {
        let store = store_with_tags();

        store.put_tag(tag("t2", "golang", 1)).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].name, "golang");
    }

    #[test]
    fn given_no_query_constraints_when_find_then_returns_natural_order() {
        let store = store_with_tags();

        let result = store.find(&TagQuery::new()).unwrap();

        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn given_specification_when_find_then_filters_before_sorting() {
        let store = store_with_tags();
        let query = TagQuery::new()
            .with_specification(NameMatchSpecification::new("ru").unwrap())
            .with_ordering(TagOrdering::Name);

        let result = store.find(&query).unwrap();

        let names: Vec<&str> = result.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ruby", "rust"]);
    }

    #[test]
    fn given_orderings_when_find_then_sorts_by_timestamp_or_name() {
        let store = store_with_tags();

        let recent = store
            .find(&TagQuery::new().with_ordering(TagOrdering::Recent))
            .unwrap();
        let ids: Vec<&str> = recent.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t3", "t2"]);

        let old = store
            .find(&TagQuery::new().with_ordering(TagOrdering::Old))
            .unwrap();
        let ids: Vec<&str> = old.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t3", "t1"]);
    }

    #[test]
    fn given_offset_and_limit_when_find_then_windows_result() {
        let store = store_with_tags();
        let query = TagQuery::new()
            .with_ordering(TagOrdering::Name)
            .with_offset(1)
            .with_limit(1);

        let result = store.find(&query).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "ruby");
    }

    #[test]
    fn given_offset_past_end_when_find_then_returns_empty() {
        let store = store_with_tags();
        let query = TagQuery::new().with_offset(10);

        assert!(store.find(&query).unwrap().is_empty());
    }

    #[test]
    fn given_dangling_ids_when_get_questions_by_ids_then_drops_them() {
        let store = InMemoryDocumentStore::new();
        store.put_question(question("q1", "one")).unwrap();
        store.put_question(question("q2", "two")).unwrap();

        let ids = vec![
            "q2".to_string(),
            "missing".to_string(),
            "q1".to_string(),
        ];
        let result = QuestionRepository::get_by_ids(&store, &ids).unwrap();

        let found: Vec<&str> = result.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(found, vec!["q2", "q1"], "input order kept, dangling dropped");
    }

    #[test]
    fn given_duplicate_and_dangling_ids_when_count_existing_then_counts_distinct() {
        let store = InMemoryDocumentStore::new();
        store.put_question(question("q1", "one")).unwrap();

        let ids = vec![
            "q1".to_string(),
            "q1".to_string(),
            "missing".to_string(),
        ];
        assert_eq!(store.count_existing(&ids).unwrap(), 1);
    }

    #[test]
    fn given_unknown_user_ids_when_get_users_by_ids_then_drops_them() {
        let store = InMemoryDocumentStore::new();
        store
            .put_user(User {
                id: "u1".to_string(),
                provider_key: "idp_1".to_string(),
                name: "Jane".to_string(),
                username: "jane".to_string(),
                avatar_url: String::new(),
            })
            .unwrap();

        let result = UserRepository::get_by_ids(
            &store,
            &["u1".to_string(), "u2".to_string()],
        )
        .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "u1");
    }
}
