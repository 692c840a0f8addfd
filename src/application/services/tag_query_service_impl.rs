// src/application/services/tag_query_service_impl.rs
use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::tag_query_service::{
    ListTagsRequest, TagPopularity, TagQueryService, TagQuestions, TagQuestionsRequest,
};
use crate::config::Settings;
use crate::domain::question::{EnrichedQuestion, Question};
use crate::domain::repositories::query::{
    NameMatchSpecification, Specification, TagOrdering, TagQuery, TagSortMode,
    TitleMatchSpecification,
};
use crate::domain::repositories::repository::{QuestionRepository, TagRepository, UserRepository};
use crate::domain::tag::{Tag, TagRef};
use crate::domain::user::AuthorSummary;

#[derive(Debug)]
pub struct TagQueryServiceImpl<R: TagRepository> {
    tags: Arc<R>,
    questions: Arc<dyn QuestionRepository>,
    users: Arc<dyn UserRepository>,
    settings: Settings,
}

impl<R: TagRepository> TagQueryServiceImpl<R> {
    pub fn new(
        tags: Arc<R>,
        questions: Arc<dyn QuestionRepository>,
        users: Arc<dyn UserRepository>,
        settings: Settings,
    ) -> Self {
        debug!("Creating new TagQueryServiceImpl");
        Self {
            tags,
            questions,
            users,
            settings,
        }
    }

    fn validate_page_window(&self, request: &TagQuestionsRequest) -> ApplicationResult<()> {
        if request.page == Some(0) {
            return Err(ApplicationError::Validation(
                "page must be 1 or greater".to_string(),
            ));
        }
        if request.page_size == Some(0) {
            return Err(ApplicationError::Validation(
                "page_size must be 1 or greater".to_string(),
            ));
        }
        Ok(())
    }

    /// Rank tags by their resolved question count, descending.
    ///
    /// The count is the number of distinct relation entries that resolve
    /// in the question store, never the raw relation length. Ties order
    /// by tag identifier ascending.
    fn rank_by_popularity(&self, tags: Vec<Tag>) -> ApplicationResult<Vec<(Tag, usize)>> {
        let mut counted = Vec::with_capacity(tags.len());
        for tag in tags {
            let count = self.questions.count_existing(&tag.question_ids)?;
            counted.push((tag, count));
        }

        Ok(counted
            .into_iter()
            .sorted_by(|(tag_a, count_a), (tag_b, count_b)| {
                count_b.cmp(count_a).then_with(|| tag_a.id.cmp(&tag_b.id))
            })
            .collect())
    }

    /// Batch-resolve the references of the given questions and stitch
    /// the results back by identifier: tag references become `TagRef`
    /// projections, the author reference becomes an `AuthorSummary`.
    /// References that do not resolve are simply absent.
    fn enrich_questions(
        &self,
        questions: &[Question],
    ) -> ApplicationResult<Vec<EnrichedQuestion>> {
        let tag_ids: Vec<String> = questions
            .iter()
            .flat_map(|q| q.tag_ids.iter().cloned())
            .unique()
            .collect();
        let author_ids: Vec<String> = questions
            .iter()
            .map(|q| q.author_id.clone())
            .unique()
            .collect();

        let tag_map: HashMap<String, TagRef> = self
            .tags
            .get_by_ids(&tag_ids)?
            .iter()
            .map(|tag| (tag.id.clone(), TagRef::from(tag)))
            .collect();
        let author_map: HashMap<String, AuthorSummary> = self
            .users
            .get_by_ids(&author_ids)?
            .iter()
            .map(|user| (user.id.clone(), AuthorSummary::from(user)))
            .collect();

        Ok(questions
            .iter()
            .map(|question| {
                let tags = question
                    .tag_ids
                    .iter()
                    .filter_map(|id| tag_map.get(id).cloned())
                    .collect();
                let author = author_map.get(&question.author_id).cloned();
                EnrichedQuestion::from_parts(question, tags, author)
            })
            .collect())
    }

    fn page_window(&self, questions: Vec<Question>, request: &TagQuestionsRequest) -> Vec<Question> {
        let page = request.page.unwrap_or(1);
        let page_size = request
            .page_size
            .unwrap_or(self.settings.default_page_size);

        // Saturating window math: an absurd page simply lands past the
        // end and yields an empty page
        questions
            .into_iter()
            .skip(page.saturating_sub(1).saturating_mul(page_size))
            .take(page_size)
            .collect()
    }
}

impl<R: TagRepository> TagQueryService for TagQueryServiceImpl<R> {
    #[instrument(skip(self), level = "debug", fields(repo_type = std::any::type_name::<R>()))]
    fn list_tags(&self, request: &ListTagsRequest) -> ApplicationResult<Vec<Tag>> {
        let mut query = TagQuery::new();

        if let Some(search) = request.search_query.as_deref() {
            query = query.with_specification(NameMatchSpecification::new(search)?);
        }

        query = match request.sort {
            Some(TagSortMode::Recent) => query.with_ordering(TagOrdering::Recent),
            Some(TagSortMode::Old) => query.with_ordering(TagOrdering::Old),
            Some(TagSortMode::Name) => query.with_ordering(TagOrdering::Name),
            // Popularity is an aggregate; ranked below from resolved counts
            Some(TagSortMode::Popular) | None => query,
        };

        let tags = self.tags.find(&query)?;

        if request.sort == Some(TagSortMode::Popular) {
            let ranked = self.rank_by_popularity(tags)?;
            return Ok(ranked.into_iter().map(|(tag, _)| tag).collect());
        }

        Ok(tags)
    }

    #[instrument(skip(self), level = "debug", fields(tag_id = %request.tag_id))]
    fn resolve_tag_questions(
        &self,
        request: &TagQuestionsRequest,
    ) -> ApplicationResult<TagQuestions> {
        self.validate_page_window(request)?;

        let tag = self
            .tags
            .get_by_id(&request.tag_id)?
            .ok_or_else(|| ApplicationError::TagNotFound(request.tag_id.clone()))?;

        // Dangling relation entries drop out of the batch fetch
        let mut questions = self.questions.get_by_ids(&tag.question_ids)?;
        debug!(
            "Resolved {} of {} question references for tag '{}'",
            questions.len(),
            tag.question_ids.len(),
            tag.name
        );

        if let Some(search) = request.search_query.as_deref() {
            let spec = TitleMatchSpecification::new(search)?;
            questions.retain(|question| spec.is_satisfied_by(question));
        }

        // Recency order; equal timestamps fall back to id descending
        questions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        if request.paginate || self.settings.paginate_tag_questions {
            questions = self.page_window(questions, request);
        }

        let enriched = self.enrich_questions(&questions)?;

        Ok(TagQuestions {
            tag_name: tag.name,
            questions: enriched,
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn top_tags(&self, limit: Option<usize>) -> ApplicationResult<Vec<TagPopularity>> {
        let limit = limit.unwrap_or(self.settings.default_top_tags_limit);

        let tags = self.tags.get_all()?;
        let ranked = self.rank_by_popularity(tags)?;

        Ok(ranked
            .into_iter()
            .take(limit)
            .map(|(tag, question_count)| TagPopularity {
                tag_id: tag.id,
                name: tag.name,
                question_count,
            })
            .collect())
    }
}
