// src/domain/repositories/query.rs
use std::marker::PhantomData;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::question::Question;
use crate::domain::tag::Tag;

/// The Specification trait defines a predicate that determines if an
/// entity matches filter criteria. Specifications compose with AND, OR
/// and NOT so query logic stays in small reusable pieces.
pub trait Specification<T> {
    /// Check if an entity satisfies this specification
    fn is_satisfied_by(&self, entity: &T) -> bool;
}

impl<T> Specification<T> for Box<dyn Specification<T>> {
    fn is_satisfied_by(&self, entity: &T) -> bool {
        (**self).is_satisfied_by(entity)
    }
}

/// Combines specifications with logical AND
pub struct AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    spec_a: A,
    spec_b: B,
    _marker: PhantomData<T>,
}

impl<T, A, B> AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    pub fn new(spec_a: A, spec_b: B) -> Self {
        Self {
            spec_a,
            spec_b,
            _marker: PhantomData,
        }
    }
}

impl<T, A, B> Specification<T> for AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        self.spec_a.is_satisfied_by(entity) && self.spec_b.is_satisfied_by(entity)
    }
}

/// Combines specifications with logical OR
pub struct OrSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    spec_a: A,
    spec_b: B,
    _marker: PhantomData<T>,
}

impl<T, A, B> OrSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    pub fn new(spec_a: A, spec_b: B) -> Self {
        Self {
            spec_a,
            spec_b,
            _marker: PhantomData,
        }
    }
}

impl<T, A, B> Specification<T> for OrSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        self.spec_a.is_satisfied_by(entity) || self.spec_b.is_satisfied_by(entity)
    }
}

/// Negates a specification
pub struct NotSpecification<T, S>
where
    S: Specification<T>,
{
    spec: S,
    _marker: PhantomData<T>,
}

impl<T, S> NotSpecification<T, S>
where
    S: Specification<T>,
{
    pub fn new(spec: S) -> Self {
        Self {
            spec,
            _marker: PhantomData,
        }
    }
}

impl<T, S> Specification<T> for NotSpecification<T, S>
where
    S: Specification<T>,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        !self.spec.is_satisfied_by(entity)
    }
}

/// Case-insensitive substring matcher shared by the name and title
/// specifications. The free text is escaped before compilation, so the
/// caller's input is never interpreted as a pattern.
fn build_search_regex(query: &str) -> DomainResult<Regex> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .map_err(|e| DomainError::InvalidSearchQuery(e.to_string()))
}

/// Specification for filtering tags by free-text name search
pub struct NameMatchSpecification {
    pattern: Regex,
}

impl NameMatchSpecification {
    pub fn new(query: &str) -> DomainResult<Self> {
        Ok(Self {
            pattern: build_search_regex(query)?,
        })
    }
}

impl Specification<Tag> for NameMatchSpecification {
    fn is_satisfied_by(&self, tag: &Tag) -> bool {
        self.pattern.is_match(&tag.name)
    }
}

/// Specification for filtering questions by free-text title search
pub struct TitleMatchSpecification {
    pattern: Regex,
}

impl TitleMatchSpecification {
    pub fn new(query: &str) -> DomainResult<Self> {
        Ok(Self {
            pattern: build_search_regex(query)?,
        })
    }
}

impl Specification<Question> for TitleMatchSpecification {
    fn is_satisfied_by(&self, question: &Question) -> bool {
        self.pattern.is_match(&question.title)
    }
}

/// Extension trait to make combining specifications more readable
pub trait SpecificationExt<T>: Specification<T> {
    /// Combine with another specification using AND
    fn and<S: Specification<T>>(self, other: S) -> AndSpecification<T, Self, S>
    where
        Self: Sized,
    {
        AndSpecification::new(self, other)
    }

    /// Combine with another specification using OR
    fn or<S: Specification<T>>(self, other: S) -> OrSpecification<T, Self, S>
    where
        Self: Sized,
    {
        OrSpecification::new(self, other)
    }

    /// Negate this specification
    fn not(self) -> NotSpecification<T, Self>
    where
        Self: Sized,
    {
        NotSpecification::new(self)
    }
}

impl<T, S> SpecificationExt<T> for S where S: Specification<T> {}

/// Caller-selected ordering policy for tag listings.
///
/// `Popular` is an aggregate ordering: it ranks by the resolved question
/// count, which only the application layer can compute. The store-level
/// orderings live in [`TagOrdering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSortMode {
    Popular,
    Recent,
    Old,
    Name,
}

impl FromStr for TagSortMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(TagSortMode::Popular),
            "recent" => Ok(TagSortMode::Recent),
            "old" => Ok(TagSortMode::Old),
            "name" => Ok(TagSortMode::Name),
            other => Err(DomainError::Other(format!(
                "Unknown tag sort mode: {}",
                other
            ))),
        }
    }
}

/// Orderings a document store can apply directly from stored fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOrdering {
    /// Creation timestamp descending
    Recent,
    /// Creation timestamp ascending
    Old,
    /// Name lexicographic ascending
    Name,
}

/// A query object that encapsulates filter specification, ordering and
/// windowing for a tag lookup.
pub struct TagQuery {
    pub specification: Option<Box<dyn Specification<Tag>>>,
    pub ordering: Option<TagOrdering>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl TagQuery {
    pub fn new() -> Self {
        Self {
            specification: None,
            ordering: None,
            limit: None,
            offset: None,
        }
    }

    pub fn with_specification<S>(mut self, spec: S) -> Self
    where
        S: Specification<Tag> + 'static,
    {
        self.specification = Some(Box::new(spec));
        self
    }

    pub fn with_ordering(mut self, ordering: TagOrdering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn matches(&self, tag: &Tag) -> bool {
        match &self.specification {
            Some(spec) => spec.is_satisfied_by(tag),
            None => true,
        }
    }
}

impl Default for TagQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::question::QuestionBuilder;
    use crate::domain::tag::TagBuilder;
    use chrono::Utc;

    fn tag(name: &str) -> Tag {
        TagBuilder::default()
            .id(format!("tag-{}", name))
            .name(name)
            .created_at(Utc::now())
            .build()
            .unwrap()
    }

    fn question(title: &str) -> Question {
        QuestionBuilder::default()
            .id(format!("q-{}", title))
            .title(title)
            .created_at(Utc::now())
            .author_id("u1")
            .build()
            .unwrap()
    }

    #[test]
    fn given_mixed_case_query_when_name_match_then_matches_case_insensitively() {
        let spec = NameMatchSpecification::new("RuSt").unwrap();

        assert!(spec.is_satisfied_by(&tag("rust")));
        assert!(spec.is_satisfied_by(&tag("Rustlang")));
        assert!(spec.is_satisfied_by(&tag("web-rust")));
        assert!(!spec.is_satisfied_by(&tag("go")));
    }

    #[test]
    fn given_regex_metacharacters_when_name_match_then_treated_literally() {
        let spec = NameMatchSpecification::new("c++").unwrap();

        assert!(spec.is_satisfied_by(&tag("c++")));
        assert!(!spec.is_satisfied_by(&tag("ccc")));
    }

    #[test]
    fn given_title_query_when_title_match_then_filters_questions() {
        let spec = TitleMatchSpecification::new("rust").unwrap();

        assert!(spec.is_satisfied_by(&question("Intro to Rust")));
        assert!(!spec.is_satisfied_by(&question("Go basics")));
    }

    #[test]
    fn given_two_specs_when_combined_with_and_then_both_must_match() {
        let spec = NameMatchSpecification::new("rust")
            .unwrap()
            .and(NameMatchSpecification::new("web").unwrap());

        assert!(spec.is_satisfied_by(&tag("web-rust")));
        assert!(!spec.is_satisfied_by(&tag("rust")));
    }

    #[test]
    fn given_two_specs_when_combined_with_or_then_either_may_match() {
        let spec = NameMatchSpecification::new("rust")
            .unwrap()
            .or(NameMatchSpecification::new("go").unwrap());

        assert!(spec.is_satisfied_by(&tag("rust")));
        assert!(spec.is_satisfied_by(&tag("golang")));
        assert!(!spec.is_satisfied_by(&tag("python")));
    }

    #[test]
    fn given_spec_when_negated_then_match_inverts() {
        let spec = NameMatchSpecification::new("rust").unwrap().not();

        assert!(!spec.is_satisfied_by(&tag("rust")));
        assert!(spec.is_satisfied_by(&tag("go")));
    }

    #[test]
    fn given_query_without_specification_when_matches_then_accepts_everything() {
        let query = TagQuery::new().with_ordering(TagOrdering::Name).with_limit(10);

        assert!(query.matches(&tag("anything")));
        assert_eq!(query.ordering, Some(TagOrdering::Name));
        assert_eq!(query.limit, Some(10));
    }

    #[test]
    fn given_sort_mode_strings_when_parsed_then_maps_to_variants() {
        assert_eq!("popular".parse::<TagSortMode>().unwrap(), TagSortMode::Popular);
        assert_eq!("recent".parse::<TagSortMode>().unwrap(), TagSortMode::Recent);
        assert_eq!("old".parse::<TagSortMode>().unwrap(), TagSortMode::Old);
        assert_eq!("name".parse::<TagSortMode>().unwrap(), TagSortMode::Name);
        assert!("frequent".parse::<TagSortMode>().is_err());
    }
}
