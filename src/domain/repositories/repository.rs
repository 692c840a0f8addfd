// src/domain/repositories/repository.rs
use crate::domain::error::DomainError;
use crate::domain::question::Question;
use crate::domain::repositories::query::TagQuery;
use crate::domain::tag::Tag;
use crate::domain::user::User;

/// Store client for the tag collection.
///
/// The traits in this module are the crate's persistence boundary: they
/// speak in domain terms and hide whatever document store sits behind
/// them. Each call observes a consistent snapshot of one collection;
/// no cross-call isolation is promised.
pub trait TagRepository: std::fmt::Debug + Send + Sync {
    /// Get a tag by its identifier
    fn get_by_id(&self, id: &str) -> Result<Option<Tag>, DomainError>;

    /// Batch-fetch tags by identifier. Identifiers that do not resolve
    /// are silently dropped.
    fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Tag>, DomainError>;

    /// Find tags matching a filter/ordering/window specification
    fn find(&self, query: &TagQuery) -> Result<Vec<Tag>, DomainError>;

    /// Get all tags in natural store order
    fn get_all(&self) -> Result<Vec<Tag>, DomainError>;
}

/// Store client for the question collection.
pub trait QuestionRepository: std::fmt::Debug + Send + Sync {
    /// Batch-fetch questions by identifier. Identifiers that do not
    /// resolve are silently dropped; the input order is preserved for
    /// the ones that do.
    fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Question>, DomainError>;

    /// Count the distinct identifiers that resolve to stored questions.
    /// This is the aggregate-over-relation operation backing popularity.
    fn count_existing(&self, ids: &[String]) -> Result<usize, DomainError>;
}

/// Store client for the user collection.
pub trait UserRepository: std::fmt::Debug + Send + Sync {
    /// Batch-fetch users by identifier; unresolved identifiers are
    /// silently dropped.
    fn get_by_ids(&self, ids: &[String]) -> Result<Vec<User>, DomainError>;
}
