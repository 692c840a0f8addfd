// src/util/testing.rs

use std::env;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::domain::question::{Question, QuestionBuilder};
use crate::domain::tag::{Tag, TagBuilder};
use crate::domain::user::User;
use crate::infrastructure::repositories::memory::InMemoryDocumentStore;

/// Logging setup only runs once; subsequent calls do nothing if
/// `tracing` is already set.
pub fn init_test_logging() {
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "debug");
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

const QTAGS_ENV_VARS: [&str; 3] = [
    "QTAGS_TOP_TAGS_LIMIT",
    "QTAGS_PAGE_SIZE",
    "QTAGS_PAGINATE_TAG_QUESTIONS",
];

/// Snapshots the crate's environment overrides on creation and clears
/// them, so each test starts from a clean environment; the snapshot is
/// restored on drop. Tests touching these variables must run serially.
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    pub fn new() -> Self {
        let saved = QTAGS_ENV_VARS
            .iter()
            .map(|name| {
                let value = env::var(name).ok();
                env::remove_var(name);
                (*name, value)
            })
            .collect();
        Self { saved }
    }
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(v) => env::set_var(name, v),
                None => env::remove_var(name),
            }
        }
    }
}

pub fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn tag_fixture(id: &str, name: &str, created_at: DateTime<Utc>, question_ids: &[&str]) -> Tag {
    TagBuilder::default()
        .id(id)
        .name(name)
        .created_at(created_at)
        .question_ids(
            question_ids
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>(),
        )
        .build()
        .expect("valid tag fixture")
}

pub fn question_fixture(
    id: &str,
    title: &str,
    created_at: DateTime<Utc>,
    tag_ids: &[&str],
    author_id: &str,
) -> Question {
    QuestionBuilder::default()
        .id(id)
        .title(title)
        .created_at(created_at)
        .tag_ids(tag_ids.iter().map(|s| s.to_string()).collect::<Vec<_>>())
        .author_id(author_id)
        .build()
        .expect("valid question fixture")
}

pub fn user_fixture(id: &str, name: &str, username: &str) -> User {
    User {
        id: id.to_string(),
        provider_key: format!("idp_{}", username),
        name: name.to_string(),
        username: username.to_string(),
        avatar_url: format!("https://cdn.example.com/{}.png", username),
    }
}

/// A store populated with a small Q&A corpus:
///
/// - `tag-rust` ("rust"): three resolvable questions
/// - `tag-go` ("go"): one question
/// - `tag-web` ("web-dev"): two questions
/// - `tag-empty` ("fortran"): no questions
/// - `tag-stale` ("stale"): two dangling question references plus one
///   live question whose author and one tag reference do not resolve
pub fn seeded_store() -> Arc<InMemoryDocumentStore> {
    let store = InMemoryDocumentStore::new();

    store
        .put_user(user_fixture("u1", "Jane Doe", "jane"))
        .expect("seed user");
    store
        .put_user(user_fixture("u2", "Arun Patel", "arun"))
        .expect("seed user");

    let questions = [
        question_fixture(
            "q-rust-1",
            "Intro to Rust",
            ts(2024, 5, 10),
            &["tag-rust", "tag-web"],
            "u1",
        ),
        question_fixture(
            "q-rust-2",
            "Why is Rust fast?",
            ts(2024, 6, 1),
            &["tag-rust"],
            "u2",
        ),
        question_fixture(
            "q-go",
            "Go basics",
            ts(2024, 4, 20),
            &["tag-go", "tag-rust"],
            "u1",
        ),
        question_fixture("q-web-1", "CSS grid layout", ts(2024, 5, 1), &["tag-web"], "u2"),
        question_fixture(
            "q-stale-1",
            "Legacy migration",
            ts(2024, 3, 15),
            &["tag-stale", "tag-ghost"],
            "u-gone",
        ),
    ];
    for question in questions {
        store.put_question(question).expect("seed question");
    }

    let tags = [
        tag_fixture(
            "tag-rust",
            "rust",
            ts(2024, 3, 1),
            &["q-rust-1", "q-rust-2", "q-go"],
        ),
        tag_fixture("tag-go", "go", ts(2024, 1, 15), &["q-go"]),
        tag_fixture("tag-web", "web-dev", ts(2024, 4, 1), &["q-rust-1", "q-web-1"]),
        tag_fixture("tag-empty", "fortran", ts(2023, 12, 1), &[]),
        tag_fixture(
            "tag-stale",
            "stale",
            ts(2024, 2, 10),
            &["q-gone-1", "q-gone-2", "q-stale-1"],
        ),
    ];
    for tag in tags {
        store.put_tag(tag).expect("seed tag");
    }

    Arc::new(store)
}
