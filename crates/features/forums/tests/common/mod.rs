#![allow(dead_code)]

use agora_forums::Forums;
use agora_forums::data::{DataError, ForumsDataContext, InMemoryForums};
use agora_kernel::context::RequestContext;
use agora_kernel::domain::config::ApiConfig;
use agora_kernel::domain::forums::{Forum, ForumId, NewThread, Thread, ThreadId};
use agora_kernel::domain::roles::RoleSet;
use agora_kernel::security::identity::Identity;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;

pub const AUTHOR: &str = "author-1";
pub const OTHER_USER: &str = "user-2";

pub struct Fixture {
    pub forums: Forums,
    pub store: Arc<InMemoryForums>,
    pub forum: Forum,
}

pub fn config(page_size: usize) -> ApiConfig {
    let mut config = ApiConfig::default();
    config.forums.page_size = page_size;
    config.forums.public_base_url = "https://example.com".to_owned();
    config.forums.seed.clear();
    config
}

pub fn fixture(page_size: usize) -> Fixture {
    let store = Arc::new(InMemoryForums::new());
    let forum = store.add_forum("general", "General Discussion", true);
    let forums = Forums::build(&config(page_size), store.clone()).unwrap();
    Fixture { forums, store, forum }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub async fn seed_thread(store: &InMemoryForums, forum_id: ForumId, title: &str) -> Thread {
    store
        .create_thread(NewThread {
            forum_id,
            author_id: AUTHOR.to_owned(),
            title: title.to_owned(),
            content: format!("Opening post of **{title}**"),
        })
        .await
        .unwrap()
}

pub fn seed_replies(store: &InMemoryForums, thread_id: ThreadId, count: i64) {
    for n in 1..=count {
        store.add_reply(thread_id, OTHER_USER, &format!("reply {n}"), epoch() + Duration::minutes(n));
    }
}

pub fn writer(user_id: &str) -> RequestContext {
    RequestContext::new(Identity::authenticated(user_id, RoleSet::FORUMS_WRITER))
}

/// Reads pass through to an in-memory store; every write fails.
#[derive(Debug, Default)]
pub struct ReadOnlyData {
    pub inner: InMemoryForums,
}

#[async_trait]
impl ForumsDataContext for ReadOnlyData {
    async fn get_forums(&self) -> Result<Vec<Forum>, DataError> {
        self.inner.get_forums().await
    }

    async fn get_forum_by_slug(&self, slug: &str) -> Result<Option<Forum>, DataError> {
        self.inner.get_forum_by_slug(slug).await
    }

    async fn get_thread_by_id(&self, id: ThreadId) -> Result<Option<Thread>, DataError> {
        self.inner.get_thread_by_id(id).await
    }

    async fn get_thread_by_slug(&self, slug: &str) -> Result<Option<Thread>, DataError> {
        self.inner.get_thread_by_slug(slug).await
    }

    async fn get_threads_for_forum(&self, forum_id: ForumId) -> Result<Vec<Thread>, DataError> {
        self.inner.get_threads_for_forum(forum_id).await
    }

    async fn create_thread(&self, _thread: NewThread) -> Result<Thread, DataError> {
        Err(DataError::Unavailable { message: "read-only replica".into(), context: None })
    }

    async fn delete_thread(&self, _thread: &Thread) -> Result<(), DataError> {
        Err(DataError::Unavailable { message: "read-only replica".into(), context: None })
    }
}
