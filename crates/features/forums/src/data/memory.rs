use super::{DataError, ForumsDataContext};
use agora_kernel::domain::config::ForumsConfig;
use agora_kernel::domain::forums::{
    Forum, ForumId, NewThread, Reply, ReplyId, Thread, ThreadId, UserId,
};
use agora_kernel::safe_nanoid;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct ThreadRecord {
    id: ThreadId,
    forum_id: ForumId,
    slug: String,
    title: String,
    content: String,
    author_id: UserId,
    created_at: DateTime<Utc>,
    is_locked: bool,
    is_deleted: bool,
    is_pinned: bool,
    replies: Vec<Reply>,
}

#[derive(Debug, Default)]
struct Store {
    forums: FxHashMap<ForumId, Forum>,
    threads: FxHashMap<ThreadId, ThreadRecord>,
    thread_slugs: FxHashMap<String, ThreadId>,
    next_forum_id: ForumId,
    next_thread_id: ThreadId,
    next_reply_id: ReplyId,
}

impl Store {
    fn assemble(&self, record: &ThreadRecord) -> Result<Thread, DataError> {
        let forum = self.forums.get(&record.forum_id).cloned().ok_or_else(|| DataError::Internal {
            message: format!("thread {} references unknown forum {}", record.id, record.forum_id)
                .into(),
            context: None,
        })?;

        Ok(Thread {
            id: record.id,
            slug: record.slug.clone(),
            title: record.title.clone(),
            content: record.content.clone(),
            author_id: record.author_id.clone(),
            created_at: record.created_at,
            is_locked: record.is_locked,
            is_deleted: record.is_deleted,
            is_pinned: record.is_pinned,
            forum,
            replies: record.replies.clone(),
        })
    }

    fn unique_slug(&self, title: &str) -> String {
        let base = slugify(title);
        if self.thread_slugs.contains_key(&base) {
            format!("{base}-{}", safe_nanoid!(6).to_lowercase())
        } else {
            base
        }
    }

    fn record_mut(&mut self, id: ThreadId) -> Option<&mut ThreadRecord> {
        self.threads.get_mut(&id)
    }
}

/// Process-local [`ForumsDataContext`] used by the server binary and tests.
///
/// Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryForums {
    store: RwLock<Store>,
}

impl InMemoryForums {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the forums listed in `config.seed`.
    #[must_use]
    pub fn from_config(config: &ForumsConfig) -> Self {
        let forums = Self::new();
        for seed in &config.seed {
            forums.add_forum(&seed.slug, &seed.title, seed.active);
        }
        forums
    }

    pub fn add_forum(&self, slug: &str, title: &str, is_active: bool) -> Forum {
        let mut store = self.store.write();
        store.next_forum_id += 1;
        let forum = Forum {
            id: store.next_forum_id,
            slug: slug.to_owned(),
            title: title.to_owned(),
            is_active,
        };
        store.forums.insert(forum.id, forum.clone());
        debug!(forum_id = forum.id, slug, "Forum added");
        forum
    }

    /// Appends a reply; `None` when the thread does not exist.
    pub fn add_reply(
        &self,
        thread_id: ThreadId,
        author_id: &str,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Option<Reply> {
        let mut store = self.store.write();
        store.next_reply_id += 1;
        let reply = Reply {
            id: store.next_reply_id,
            thread_id,
            author_id: author_id.to_owned(),
            content: content.to_owned(),
            created_at,
            is_deleted: false,
        };
        store.record_mut(thread_id)?.replies.push(reply.clone());
        Some(reply)
    }

    /// Soft-deletes a reply; returns whether it was found.
    pub fn delete_reply(&self, thread_id: ThreadId, reply_id: ReplyId) -> bool {
        let mut store = self.store.write();
        store
            .record_mut(thread_id)
            .and_then(|record| record.replies.iter_mut().find(|reply| reply.id == reply_id))
            .map(|reply| reply.is_deleted = true)
            .is_some()
    }

    pub fn set_thread_locked(&self, thread_id: ThreadId, locked: bool) -> bool {
        self.store.write().record_mut(thread_id).map(|record| record.is_locked = locked).is_some()
    }

    pub fn set_thread_pinned(&self, thread_id: ThreadId, pinned: bool) -> bool {
        self.store.write().record_mut(thread_id).map(|record| record.is_pinned = pinned).is_some()
    }

    pub fn set_forum_active(&self, forum_id: ForumId, active: bool) -> bool {
        self.store.write().forums.get_mut(&forum_id).map(|forum| forum.is_active = active).is_some()
    }
}

#[async_trait]
impl ForumsDataContext for InMemoryForums {
    async fn get_forums(&self) -> Result<Vec<Forum>, DataError> {
        Ok(self.store.read().forums.values().cloned().collect())
    }

    async fn get_forum_by_slug(&self, slug: &str) -> Result<Option<Forum>, DataError> {
        Ok(self.store.read().forums.values().find(|forum| forum.slug == slug).cloned())
    }

    async fn get_thread_by_id(&self, id: ThreadId) -> Result<Option<Thread>, DataError> {
        let store = self.store.read();
        store.threads.get(&id).map(|record| store.assemble(record)).transpose()
    }

    async fn get_thread_by_slug(&self, slug: &str) -> Result<Option<Thread>, DataError> {
        let store = self.store.read();
        store
            .thread_slugs
            .get(slug)
            .and_then(|id| store.threads.get(id))
            .map(|record| store.assemble(record))
            .transpose()
    }

    async fn get_threads_for_forum(&self, forum_id: ForumId) -> Result<Vec<Thread>, DataError> {
        let store = self.store.read();
        store
            .threads
            .values()
            .filter(|record| record.forum_id == forum_id)
            .map(|record| store.assemble(record))
            .collect()
    }

    async fn create_thread(&self, thread: NewThread) -> Result<Thread, DataError> {
        let mut store = self.store.write();
        if !store.forums.contains_key(&thread.forum_id) {
            return Err(DataError::Conflict {
                message: format!("forum {} does not exist", thread.forum_id).into(),
                context: Some("create_thread".into()),
            });
        }

        store.next_thread_id += 1;
        let record = ThreadRecord {
            id: store.next_thread_id,
            forum_id: thread.forum_id,
            slug: store.unique_slug(&thread.title),
            title: thread.title,
            content: thread.content,
            author_id: thread.author_id,
            created_at: Utc::now(),
            is_locked: false,
            is_deleted: false,
            is_pinned: false,
            replies: Vec::new(),
        };
        let created = store.assemble(&record)?;

        store.thread_slugs.insert(record.slug.clone(), record.id);
        store.threads.insert(record.id, record);
        debug!(thread_id = created.id, slug = %created.slug, "Thread created");
        Ok(created)
    }

    async fn delete_thread(&self, thread: &Thread) -> Result<(), DataError> {
        let mut store = self.store.write();
        let record = store.record_mut(thread.id).ok_or_else(|| DataError::Conflict {
            message: format!("thread {} does not exist", thread.id).into(),
            context: Some("delete_thread".into()),
        })?;
        record.is_deleted = true;
        debug!(thread_id = thread.id, "Thread soft-deleted");
        Ok(())
    }
}

/// Lowercase ASCII, dash-separated slug. Non-ASCII letters and digits are
/// dropped without splitting the word. Purely numeric results get a prefix so
/// the slug never reads as a thread id.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !ch.is_alphanumeric() && !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        "thread".to_owned()
    } else if slug.parse::<u64>().is_ok() {
        format!("thread-{slug}")
    } else {
        slug.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_thread(forum_id: ForumId, title: &str) -> NewThread {
        NewThread {
            forum_id,
            author_id: "author".to_owned(),
            title: title.to_owned(),
            content: "body".to_owned(),
        }
    }

    #[test]
    fn slugify_normalizes_titles() {
        assert_eq!(slugify("  Raid Night: Schedule!  "), "raid-night-schedule");
        assert_eq!(slugify("Café night"), "caf-night");
        assert_eq!(slugify("Привет мир"), "thread");
        assert_eq!(slugify("2024"), "thread-2024");
        assert_eq!(slugify("!!!"), "thread");
    }

    #[tokio::test]
    async fn duplicate_titles_get_distinct_slugs() {
        let forums = InMemoryForums::new();
        let forum = forums.add_forum("general", "General", true);

        let first = forums.create_thread(new_thread(forum.id, "Hello")).await.unwrap();
        let second = forums.create_thread(new_thread(forum.id, "Hello")).await.unwrap();

        assert_eq!(first.slug, "hello");
        assert_ne!(first.slug, second.slug);
        assert!(second.slug.starts_with("hello-"));
        assert_eq!(forums.get_thread_by_slug(&second.slug).await.unwrap().unwrap().id, second.id);
    }

    #[tokio::test]
    async fn delete_is_soft() {
        let forums = InMemoryForums::new();
        let forum = forums.add_forum("general", "General", true);
        let thread = forums.create_thread(new_thread(forum.id, "Going away")).await.unwrap();

        forums.delete_thread(&thread).await.unwrap();

        let stored = forums.get_thread_by_id(thread.id).await.unwrap().unwrap();
        assert!(stored.is_deleted);
    }

    #[tokio::test]
    async fn create_in_unknown_forum_fails() {
        let forums = InMemoryForums::new();
        let result = forums.create_thread(new_thread(99, "Orphan")).await;
        assert!(matches!(result, Err(DataError::Conflict { .. })));
    }
}
