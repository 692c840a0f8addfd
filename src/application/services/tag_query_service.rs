// src/application/services/tag_query_service.rs
use serde::Serialize;

use crate::application::error::ApplicationResult;
use crate::domain::question::EnrichedQuestion;
use crate::domain::repositories::query::TagSortMode;
use crate::domain::tag::Tag;

/// Parameters for the tag listing operation.
#[derive(Debug, Clone, Default)]
pub struct ListTagsRequest {
    /// Free text matched case-insensitively against tag names
    pub search_query: Option<String>,
    /// Ordering policy; `None` keeps the store's natural order
    pub sort: Option<TagSortMode>,
}

/// Parameters for resolving a tag into its related questions.
///
/// `page` and `page_size` are 1-based and only applied when `paginate`
/// (or the service's `paginate_tag_questions` setting) is set; the
/// platform's listing pages historically received the full joined set
/// and windowed it themselves.
#[derive(Debug, Clone)]
pub struct TagQuestionsRequest {
    pub tag_id: String,
    /// Free text matched case-insensitively against question titles
    pub search_query: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub paginate: bool,
}

impl TagQuestionsRequest {
    pub fn new(tag_id: impl Into<String>) -> Self {
        Self {
            tag_id: tag_id.into(),
            search_query: None,
            page: None,
            page_size: None,
            paginate: false,
        }
    }

    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn with_pagination(mut self, paginate: bool) -> Self {
        self.paginate = paginate;
        self
    }
}

/// A tag's display name paired with its enriched, recency-ordered
/// question sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagQuestions {
    pub tag_name: String,
    pub questions: Vec<EnrichedQuestion>,
}

/// One entry of the popularity ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagPopularity {
    pub tag_id: String,
    pub name: String,
    pub question_count: usize,
}

/// Service interface for the tag query and aggregation operations.
/// All operations are stateless reads; identical inputs against an
/// unchanged store yield identical output.
pub trait TagQueryService: Send + Sync {
    /// List tags filtered by optional free-text name search and ordered
    /// by the selected sort mode. An empty match set is a successful
    /// empty listing, not an error.
    fn list_tags(&self, request: &ListTagsRequest) -> ApplicationResult<Vec<Tag>>;

    /// Resolve a tag into its related questions with nested enrichment
    /// (question tags and author fully resolved), ordered by recency.
    /// Fails with `ApplicationError::TagNotFound` when the identifier
    /// does not resolve.
    fn resolve_tag_questions(
        &self,
        request: &TagQuestionsRequest,
    ) -> ApplicationResult<TagQuestions>;

    /// Rank all tags by their resolved question count, descending, and
    /// truncate to `limit` (configured default when `None`). Ties order
    /// by tag identifier ascending.
    fn top_tags(&self, limit: Option<usize>) -> ApplicationResult<Vec<TagPopularity>>;
}
