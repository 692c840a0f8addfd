// src/application/services/factory.rs
use std::sync::Arc;

use crate::application::services::tag_query_service::TagQueryService;
use crate::application::TagQueryServiceImpl;
use crate::config::{load_settings, Settings};
use crate::domain::repositories::repository::{
    QuestionRepository, TagRepository, UserRepository,
};

/// Creates a tag query service over the given store clients.
pub fn create_tag_query_service<R>(
    tags: Arc<R>,
    questions: Arc<dyn QuestionRepository>,
    users: Arc<dyn UserRepository>,
    settings: Settings,
) -> Arc<dyn TagQueryService>
where
    R: TagRepository + 'static,
{
    Arc::new(TagQueryServiceImpl::new(tags, questions, users, settings))
}

/// Creates a tag query service with settings loaded from the
/// environment.
pub fn create_tag_query_service_from_env<R>(
    tags: Arc<R>,
    questions: Arc<dyn QuestionRepository>,
    users: Arc<dyn UserRepository>,
) -> Arc<dyn TagQueryService>
where
    R: TagRepository + 'static,
{
    create_tag_query_service(tags, questions, users, load_settings())
}
